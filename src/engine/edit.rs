//! Delete operations built from the surface's single-char primitives.
//!
//! Each removed char costs one `Delete` (or `Backspace`) call on the
//! surface, so a line of n chars takes n calls.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::viewport::ensure_visible;
use super::{line_len, lines_of, place_cursor};
use crate::surface::TextSurface;

fn delete_key() -> KeyEvent {
    KeyEvent::new(KeyCode::Delete, KeyModifiers::NONE)
}

fn backspace_key() -> KeyEvent {
    KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE)
}

/// `x`. Past the end of the line there is nothing under the cursor.
pub(crate) fn delete_char<S: TextSurface + ?Sized>(surface: &mut S) {
    let (col, row) = surface.cursor();
    if col < line_len(surface, row) {
        surface.insert_default(delete_key());
    }
}

/// `dd`: empty the line from column 0, then remove its separator. The cursor
/// ends at column 0 of the line that moved up into this row. The last line
/// has no separator after it, so it is joined onto the line above instead
/// and the cursor moves there.
pub(crate) fn delete_line<S: TextSurface + ?Sized>(surface: &mut S) {
    let (_, row) = surface.cursor();
    let len = line_len(surface, row);
    let count = lines_of(&surface.buffer()).len();

    place_cursor(surface, 0, row);
    for _ in 0..len {
        surface.insert_default(delete_key());
    }

    if row + 1 < count {
        surface.insert_default(delete_key());
        place_cursor(surface, 0, row);
    } else if row > 0 {
        surface.insert_default(backspace_key());
        place_cursor(surface, 0, row - 1);
    }
    ensure_visible(surface);
}

/// `d$`: delete from the cursor through the last char; the cursor stays put.
pub(crate) fn delete_to_line_end<S: TextSurface + ?Sized>(surface: &mut S) {
    let (col, row) = surface.cursor();
    let len = line_len(surface, row);
    for _ in col..len {
        surface.insert_default(delete_key());
    }
}

/// `d0`: delete from column 0 up to (not including) the cursor, leaving the
/// cursor at column 0.
pub(crate) fn delete_to_line_start<S: TextSurface + ?Sized>(surface: &mut S) {
    let (col, row) = surface.cursor();
    let count = col.min(line_len(surface, row));
    place_cursor(surface, 0, row);
    for _ in 0..count {
        surface.insert_default(delete_key());
    }
    place_cursor(surface, 0, row);
}
