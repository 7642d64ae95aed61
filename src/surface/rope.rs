use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{SurfaceError, TextSurface};
use crate::buffer::Buffer;

/// A [`TextSurface`] over a rope-backed [`Buffer`] with its own cursor,
/// scroll origin and viewport size.
#[derive(Debug, Clone)]
pub struct RopeSurface {
    buffer: Buffer,
    cursor_col: usize,
    cursor_row: usize,
    origin_col: usize,
    origin_row: usize,
    width: usize,
    height: usize,
}

impl RopeSurface {
    pub fn new(buffer: Buffer, width: usize, height: usize) -> Self {
        Self {
            buffer,
            cursor_col: 0,
            cursor_row: 0,
            origin_col: 0,
            origin_row: 0,
            width,
            height,
        }
    }

    pub fn contents(&self) -> &Buffer {
        &self.buffer
    }

    pub fn text(&self) -> String {
        self.buffer.text()
    }

    /// Replace the whole text and put the cursor and origin back at the top.
    pub fn set_text(&mut self, text: &str) {
        self.buffer.set_text(text);
        self.cursor_col = 0;
        self.cursor_row = 0;
        self.origin_col = 0;
        self.origin_row = 0;
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
    }

    fn last_row(&self) -> usize {
        self.buffer.line_count().saturating_sub(1)
    }

    fn clamp_cursor_col(&mut self) {
        self.cursor_col = self.cursor_col.min(self.buffer.line_len(self.cursor_row));
    }
}

impl TextSurface for RopeSurface {
    fn cursor(&self) -> (usize, usize) {
        (self.cursor_col, self.cursor_row)
    }

    /// Rows past the last line are rejected; columns are clamped to the
    /// line length (one past the last char is the append position).
    fn set_cursor(&mut self, col: usize, row: usize) -> Result<(), SurfaceError> {
        if row > self.last_row() {
            return Err(SurfaceError::OutOfBounds { col, row });
        }
        self.cursor_row = row;
        self.cursor_col = col;
        self.clamp_cursor_col();
        Ok(())
    }

    fn line(&self, row: usize) -> String {
        self.buffer.line(row).unwrap_or_default()
    }

    fn buffer(&self) -> String {
        self.buffer.text()
    }

    fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn origin(&self) -> (usize, usize) {
        (self.origin_col, self.origin_row)
    }

    fn set_origin(&mut self, col: usize, row: usize) -> Result<(), SurfaceError> {
        if row > self.last_row() {
            return Err(SurfaceError::OutOfBounds { col, row });
        }
        self.origin_col = col;
        self.origin_row = row;
        Ok(())
    }

    fn insert_default(&mut self, key: KeyEvent) {
        self.clamp_cursor_col();
        let (col, row) = (self.cursor_col, self.cursor_row);
        match key.code {
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.buffer.insert_char(row, col, ch);
                self.cursor_col += 1;
            }
            KeyCode::Tab => {
                self.buffer.insert_char(row, col, '\t');
                self.cursor_col += 1;
            }
            KeyCode::Enter => {
                self.buffer.insert_newline(row, col);
                self.cursor_row += 1;
                self.cursor_col = 0;
            }
            KeyCode::Backspace => {
                let (new_row, new_col) = self.buffer.delete_char_back(row, col);
                self.cursor_row = new_row;
                self.cursor_col = new_col;
            }
            KeyCode::Delete => self.buffer.delete_char_at(row, col),

            KeyCode::Left => self.cursor_col = col.saturating_sub(1),
            KeyCode::Right => {
                if col < self.buffer.line_len(row) {
                    self.cursor_col += 1;
                }
            }
            KeyCode::Up => {
                self.cursor_row = row.saturating_sub(1);
                self.clamp_cursor_col();
            }
            KeyCode::Down => {
                if row < self.last_row() {
                    self.cursor_row += 1;
                }
                self.clamp_cursor_col();
            }
            KeyCode::Home => self.cursor_col = 0,
            KeyCode::End => self.cursor_col = self.buffer.line_len(row),

            _ => {}
        }
    }
}
