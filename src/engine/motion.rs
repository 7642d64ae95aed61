//! Word and WORD motions.
//!
//! Every function here is pure: it takes the cursor line, the cursor
//! position, the whole buffer split into lines and the viewport size, and
//! returns the new `(col, row)`. Columns are counted in chars.

/// Character classes used to find token boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    Whitespace,
    /// Letters, digits and underscore.
    Word,
    Punctuation,
}

pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Three-class split used by `w` and `b`.
pub fn word_class(c: char) -> CharClass {
    if c.is_whitespace() {
        CharClass::Whitespace
    } else if is_word_char(c) {
        CharClass::Word
    } else {
        CharClass::Punctuation
    }
}

/// Two-class split used by `W` and `B`: anything that is not whitespace
/// belongs to the same WORD.
pub fn big_word_class(c: char) -> CharClass {
    if c.is_whitespace() {
        CharClass::Whitespace
    } else {
        CharClass::Word
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    /// `w`
    WordForward,
    /// `W`
    BigWordForward,
    /// `b`
    WordBackward,
    /// `B`
    BigWordBackward,
}

impl Motion {
    pub fn apply(
        self,
        line: &str,
        col: usize,
        row: usize,
        lines: &[&str],
        size: (usize, usize),
    ) -> (usize, usize) {
        match self {
            Motion::WordForward => find_next_word_start(line, col, row, lines, size),
            Motion::BigWordForward => find_next_big_word_start(line, col, row, lines, size),
            Motion::WordBackward => find_prev_word_start(line, col, row, lines, size),
            Motion::BigWordBackward => find_prev_big_word_start(line, col, row, lines, size),
        }
    }
}

pub fn find_next_word_start(
    line: &str,
    col: usize,
    row: usize,
    lines: &[&str],
    size: (usize, usize),
) -> (usize, usize) {
    next_start(line, col, row, lines, size.0, word_class)
}

pub fn find_next_big_word_start(
    line: &str,
    col: usize,
    row: usize,
    lines: &[&str],
    size: (usize, usize),
) -> (usize, usize) {
    next_start(line, col, row, lines, size.0, big_word_class)
}

pub fn find_prev_word_start(
    line: &str,
    col: usize,
    row: usize,
    lines: &[&str],
    _size: (usize, usize),
) -> (usize, usize) {
    prev_start(line, col, row, lines, word_class)
}

pub fn find_prev_big_word_start(
    line: &str,
    col: usize,
    row: usize,
    lines: &[&str],
    _size: (usize, usize),
) -> (usize, usize) {
    prev_start(line, col, row, lines, big_word_class)
}

fn first_non_blank(line: &str) -> usize {
    line.chars().position(|c| !c.is_whitespace()).unwrap_or(0)
}

/// Skip the rest of the token under the cursor, then any whitespace after
/// it. Running off the line lands on the next line's first non-blank (column
/// 0 for an empty or blank line); with no next line the column becomes the
/// viewport width.
fn next_start(
    line: &str,
    col: usize,
    row: usize,
    lines: &[&str],
    width: usize,
    class: fn(char) -> CharClass,
) -> (usize, usize) {
    let chars: Vec<char> = line.chars().collect();
    let mut col = col;

    if col < chars.len() {
        let start = class(chars[col]);
        if start != CharClass::Whitespace {
            while col < chars.len() && class(chars[col]) == start {
                col += 1;
            }
        }
        while col < chars.len() && chars[col].is_whitespace() {
            col += 1;
        }
        if col < chars.len() {
            return (col, row);
        }
    }

    match lines.get(row + 1) {
        Some(next) => (first_non_blank(next), row + 1),
        None => (width, row),
    }
}

/// Step left over whitespace, then over the run of same-class chars before
/// it, landing on the first char of that run. Empty lines, blank prefixes
/// and column 0 all unwind to the end of the previous line.
fn prev_start(
    line: &str,
    col: usize,
    row: usize,
    lines: &[&str],
    class: fn(char) -> CharClass,
) -> (usize, usize) {
    let mut chars: Vec<char> = line.chars().collect();
    let mut col = col.min(chars.len());
    let mut row = row;

    loop {
        if col == 0 || chars.is_empty() {
            if row == 0 {
                return (0, 0);
            }
            row -= 1;
            chars = lines.get(row).copied().unwrap_or("").chars().collect();
            col = chars.len();
            continue;
        }

        let mut i = col;
        while i > 0 && chars[i - 1].is_whitespace() {
            i -= 1;
        }
        if i == 0 {
            col = 0;
            continue;
        }

        let cls = class(chars[i - 1]);
        while i > 0 && class(chars[i - 1]) == cls {
            i -= 1;
        }
        return (i, row);
    }
}
