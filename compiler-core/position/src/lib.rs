//! Source positions for lexer specifications.

use std::fmt;

/// Width of a tab stop, in columns.
pub const TAB_STOP: u32 = 8;

/// A location in the source text.
///
/// `offset` counts characters, not bytes, consumed since the start of the
/// stream. `line` and `column` are both 1-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub offset: usize,
    pub line: u32,
    pub column: u32,
}

impl Position {
    /// The position before any character has been consumed.
    pub const START: Position = Position { offset: 0, line: 1, column: 1 };

    pub fn new(offset: usize, line: u32, column: u32) -> Position {
        Position { offset, line, column }
    }

    /// Computes the position after consuming `character`.
    ///
    /// Tabs move the column to the next tab stop, that is, the next column
    /// of the form `8k + 1`. Newlines start a new line at column 1.
    #[must_use]
    pub fn advance(self, character: char) -> Position {
        let Position { offset, line, column } = self;
        let offset = offset + 1;
        match character {
            '\t' => {
                let column = (column + TAB_STOP - 1) / TAB_STOP * TAB_STOP + 1;
                Position { offset, line, column }
            }
            '\n' => {
                let line = line + 1;
                Position { offset, line, column: 1 }
            }
            _ => {
                let column = column + 1;
                Position { offset, line, column }
            }
        }
    }

    /// Computes the position after consuming all of `text`.
    #[must_use]
    pub fn advance_str(self, text: &str) -> Position {
        text.chars().fold(self, Position::advance)
    }
}

impl Default for Position {
    fn default() -> Position {
        Position::START
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
