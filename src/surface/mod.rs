//! The editable text surface the modal engine drives.
//!
//! The engine owns no text and no cursor. Everything it reads or changes goes
//! through [`TextSurface`], so any line-buffer/view pair can host it.

mod rope;

pub use rope::RopeSurface;

use crossterm::event::KeyEvent;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SurfaceError {
    #[error("position ({col}, {row}) is outside the buffer")]
    OutOfBounds { col: usize, row: usize },
}

/// Cursor, text and viewport access for a single editable surface.
///
/// Positions are `(col, row)` pairs, zero-based and counted in chars.
pub trait TextSurface {
    fn cursor(&self) -> (usize, usize);

    fn set_cursor(&mut self, col: usize, row: usize) -> Result<(), SurfaceError>;

    /// Text of `row` without its line separator, or an empty string when
    /// `row` is out of range.
    fn line(&self, row: usize) -> String;

    /// The full text, lines joined by `\n`.
    fn buffer(&self) -> String;

    /// Viewport dimensions as `(width, height)`.
    fn size(&self) -> (usize, usize);

    /// Scroll origin: the buffer position shown at the viewport's top-left.
    fn origin(&self) -> (usize, usize);

    fn set_origin(&mut self, col: usize, row: usize) -> Result<(), SurfaceError>;

    /// The surface's own handling of a raw key: literal characters,
    /// Enter (split line), Backspace, Delete (delete under cursor) and
    /// navigation keys.
    fn insert_default(&mut self, key: KeyEvent);
}
