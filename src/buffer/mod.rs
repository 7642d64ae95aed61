use std::io::{BufWriter, Write};
use std::path::Path;

use ropey::Rope;

use crate::error::VichatError;

/// A text buffer backed by a rope data structure.
///
/// Positions are (line, col) pairs counted in chars. Line numbering follows
/// a plain split on `\n`, so text ending in a newline has a trailing empty
/// line, and an empty buffer has exactly one (empty) line. A lone `\r` or a
/// Unicode line separator stays inside its line.
#[derive(Debug, Clone, Default)]
pub struct Buffer {
    rope: Rope,
}

impl Buffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a file from disk into a rope-backed buffer.
    pub fn from_file(path: &Path) -> Result<Self, VichatError> {
        let read_err = |source| VichatError::FileRead {
            path: path.to_path_buf(),
            source,
        };
        let file = std::fs::File::open(path).map_err(read_err)?;
        let rope = Rope::from_reader(file).map_err(read_err)?;
        Ok(Self { rope })
    }

    /// Total number of lines in the buffer.
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Returns the text of line `idx` (0-indexed), without the trailing newline.
    pub fn line(&self, idx: usize) -> Option<String> {
        if idx >= self.line_count() {
            return None;
        }
        let text = self.rope.line(idx).to_string();
        Some(
            text.trim_end_matches('\n')
                .trim_end_matches('\r')
                .to_string(),
        )
    }

    /// Length of line `idx` in characters (excluding trailing newline).
    pub fn line_len(&self, idx: usize) -> usize {
        self.line(idx).map_or(0, |l| l.chars().count())
    }

    /// The whole buffer as a single string.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    pub fn set_text(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
    }

    /// Append the buffer contents, followed by a newline, to `path`.
    pub fn append_to(&self, path: &Path) -> Result<(), VichatError> {
        let write_err = |source| VichatError::FileWrite {
            path: path.to_path_buf(),
            source,
        };
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(write_err)?;
        let mut out = BufWriter::new(file);
        self.rope.write_to(&mut out).map_err(write_err)?;
        out.write_all(b"\n").map_err(write_err)?;
        out.flush().map_err(write_err)?;
        Ok(())
    }

    // -- Mutation --

    fn char_idx(&self, line: usize, col: usize) -> usize {
        self.rope.line_to_char(line) + col.min(self.line_len(line))
    }

    /// Insert a character at the given (line, col) position.
    pub fn insert_char(&mut self, line: usize, col: usize, ch: char) {
        if line >= self.line_count() {
            return;
        }
        let char_idx = self.char_idx(line, col);
        self.rope.insert_char(char_idx, ch);
    }

    /// Insert a newline at the given (line, col) position, splitting the line.
    pub fn insert_newline(&mut self, line: usize, col: usize) {
        self.insert_char(line, col, '\n');
    }

    /// Delete the character at (line, col). At or past the end of a line the
    /// line separator is removed instead, joining the next line onto this one.
    /// Does nothing at the very end of the buffer.
    pub fn delete_char_at(&mut self, line: usize, col: usize) {
        if line >= self.line_count() {
            return;
        }
        let line_len = self.line_len(line);
        if col < line_len {
            let char_idx = self.rope.line_to_char(line) + col;
            self.rope.remove(char_idx..char_idx + 1);
        } else if line + 1 < self.line_count() {
            // Everything between the end of the text and the next line start
            // is the separator ("\n" or "\r\n").
            let start = self.rope.line_to_char(line) + line_len;
            let end = self.rope.line_to_char(line + 1);
            self.rope.remove(start..end);
        }
    }

    /// Delete the character before (line, col). Returns the new cursor (line, col).
    /// At col 0, joins with the previous line. Otherwise deletes the char before cursor.
    pub fn delete_char_back(&mut self, line: usize, col: usize) -> (usize, usize) {
        if line >= self.line_count() {
            return (line, col);
        }
        let col = col.min(self.line_len(line));
        if col == 0 {
            if line == 0 {
                return (0, 0);
            }
            let prev_line_len = self.line_len(line - 1);
            let start = self.rope.line_to_char(line - 1) + prev_line_len;
            let end = self.rope.line_to_char(line);
            self.rope.remove(start..end);
            (line - 1, prev_line_len)
        } else {
            let char_idx = self.rope.line_to_char(line) + col;
            self.rope.remove(char_idx - 1..char_idx);
            (line, col - 1)
        }
    }
}

impl From<&str> for Buffer {
    fn from(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }
}
