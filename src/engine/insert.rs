use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::viewport::ensure_visible;
use super::{ViEngine, line_len, place_cursor};
use crate::mode::Mode;
use crate::surface::TextSurface;

fn enter_key() -> KeyEvent {
    KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)
}

impl ViEngine {
    /// `i`
    pub(crate) fn enter_insert_mode(&mut self) {
        self.set_mode(Mode::Insert);
    }

    /// `a`
    pub(crate) fn enter_insert_mode_append<S: TextSurface + ?Sized>(&mut self, surface: &mut S) {
        let (col, row) = surface.cursor();
        if col < line_len(surface, row) {
            place_cursor(surface, col + 1, row);
        }
        self.set_mode(Mode::Insert);
    }

    /// `A`
    pub(crate) fn enter_insert_mode_line_end<S: TextSurface + ?Sized>(&mut self, surface: &mut S) {
        let (_, row) = surface.cursor();
        let len = line_len(surface, row);
        place_cursor(surface, len, row);
        self.set_mode(Mode::Insert);
    }

    /// `o`
    pub(crate) fn enter_insert_mode_open_below<S: TextSurface + ?Sized>(
        &mut self,
        surface: &mut S,
    ) {
        let (_, row) = surface.cursor();
        let len = line_len(surface, row);
        place_cursor(surface, len, row);
        surface.insert_default(enter_key());
        place_cursor(surface, 0, row + 1);
        ensure_visible(surface);
        self.set_mode(Mode::Insert);
    }

    /// `O`
    pub(crate) fn enter_insert_mode_open_above<S: TextSurface + ?Sized>(
        &mut self,
        surface: &mut S,
    ) {
        let (_, row) = surface.cursor();
        place_cursor(surface, 0, row);
        surface.insert_default(enter_key());
        place_cursor(surface, 0, row);
        ensure_visible(surface);
        self.set_mode(Mode::Insert);
    }

    /// Escape from Insert mode: back to Normal with the cursor one column to
    /// the left, unless it is already at column 0.
    pub(crate) fn exit_insert_mode<S: TextSurface + ?Sized>(&mut self, surface: &mut S) {
        let (col, row) = surface.cursor();
        if col > 0 {
            place_cursor(surface, col - 1, row);
        }
        self.set_mode(Mode::Normal);
    }
}
