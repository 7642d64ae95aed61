use super::motion::Motion;
use super::viewport::ensure_visible;
use super::{line_len, lines_of, place_cursor};
use crate::surface::TextSurface;

/// Column for a Normal-mode cursor on a line of `len` chars: the cursor sits
/// on the last char, never past it.
fn normal_col(col: usize, len: usize) -> usize {
    col.min(len.saturating_sub(1))
}

fn line_count<S: TextSurface + ?Sized>(surface: &S) -> usize {
    lines_of(&surface.buffer()).len()
}

/// `h`
pub(crate) fn move_left<S: TextSurface + ?Sized>(surface: &mut S) {
    let (col, row) = surface.cursor();
    if col > 0 {
        place_cursor(surface, col - 1, row);
    }
}

/// `l`
pub(crate) fn move_right<S: TextSurface + ?Sized>(surface: &mut S) {
    let (col, row) = surface.cursor();
    if col < line_len(surface, row) {
        place_cursor(surface, col + 1, row);
    }
}

/// `j`
pub(crate) fn move_down<S: TextSurface + ?Sized>(surface: &mut S) {
    let (col, row) = surface.cursor();
    if row + 1 < line_count(surface) {
        let len = line_len(surface, row + 1);
        place_cursor(surface, normal_col(col, len), row + 1);
        ensure_visible(surface);
    }
}

/// `k`
pub(crate) fn move_up<S: TextSurface + ?Sized>(surface: &mut S) {
    let (col, row) = surface.cursor();
    if row > 0 {
        let len = line_len(surface, row - 1);
        place_cursor(surface, normal_col(col, len), row - 1);
        ensure_visible(surface);
    }
}

/// Enter: start of the next line.
pub(crate) fn next_line_start<S: TextSurface + ?Sized>(surface: &mut S) {
    let (_, row) = surface.cursor();
    if row + 1 < line_count(surface) {
        place_cursor(surface, 0, row + 1);
        ensure_visible(surface);
    }
}

/// `0`
pub(crate) fn line_start<S: TextSurface + ?Sized>(surface: &mut S) {
    let (_, row) = surface.cursor();
    place_cursor(surface, 0, row);
}

/// `$`: last char of the line; an empty line leaves the cursor alone.
pub(crate) fn line_end<S: TextSurface + ?Sized>(surface: &mut S) {
    let (_, row) = surface.cursor();
    let len = line_len(surface, row);
    if len > 0 {
        place_cursor(surface, len - 1, row);
    }
}

/// `w`, `W`, `b`, `B`
pub(crate) fn apply_motion<S: TextSurface + ?Sized>(surface: &mut S, motion: Motion) {
    let (col, row) = surface.cursor();
    let line = surface.line(row);
    let text = surface.buffer();
    let lines = lines_of(&text);
    let (new_col, new_row) = motion.apply(&line, col, row, &lines, surface.size());
    place_cursor(surface, new_col, new_row);
    ensure_visible(surface);
}
