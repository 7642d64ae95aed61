//! Keeps the cursor row inside the visible window.

use super::{lines_of, place_cursor, place_origin};
use crate::surface::TextSurface;

/// The origin row that keeps `cursor_row` visible in a window of `height`
/// rows currently starting at `origin_row`. A zero-height window leaves the
/// origin alone.
pub fn scroll_row(cursor_row: usize, origin_row: usize, height: usize) -> usize {
    if height == 0 {
        origin_row
    } else if cursor_row < origin_row {
        cursor_row
    } else if cursor_row >= origin_row + height {
        cursor_row + 1 - height
    } else {
        origin_row
    }
}

/// The origin row that puts `last_row` on the bottom line of the window, or
/// 0 when everything fits.
pub fn bottom_row(last_row: usize, height: usize) -> usize {
    (last_row + 1).saturating_sub(height)
}

pub(crate) fn ensure_visible<S: TextSurface + ?Sized>(surface: &mut S) {
    let (_, row) = surface.cursor();
    let (origin_col, origin_row) = surface.origin();
    let (_, height) = surface.size();
    let target = scroll_row(row, origin_row, height);
    if target != origin_row {
        place_origin(surface, origin_col, target);
    }
}

/// `gg`
pub(crate) fn goto_top<S: TextSurface + ?Sized>(surface: &mut S) {
    place_cursor(surface, 0, 0);
    place_origin(surface, 0, 0);
}

/// `G`: column 0 of the last line, scrolled so that line is visible. A
/// trailing empty line left by a final newline does not count.
pub(crate) fn goto_bottom<S: TextSurface + ?Sized>(surface: &mut S) {
    let text = surface.buffer();
    if text.is_empty() {
        place_cursor(surface, 0, 0);
        place_origin(surface, 0, 0);
        return;
    }

    let lines = lines_of(&text);
    let mut last = lines.len() - 1;
    if last > 0 && lines[last].is_empty() {
        last -= 1;
    }
    place_cursor(surface, 0, last);

    let (_, height) = surface.size();
    if height > 0 {
        place_origin(surface, 0, bottom_row(last, height));
    }
}
