use std::sync::Arc;

use position::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    UnknownSetMacro,
    UnknownRegexMacro,
    /// Raised by the token driver when no token matches.
    Lexical,
    /// Raised by grammar code through [`crate::ParseState::fail`].
    User,
}

/// A fatal error that aborts the whole computation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub position: Option<Position>,
    pub message: Arc<str>,
}

impl ParseError {
    pub fn new(
        kind: ParseErrorKind,
        position: Option<Position>,
        message: impl Into<Arc<str>>,
    ) -> ParseError {
        let message = message.into();
        ParseError { kind, position, message }
    }

    pub(crate) fn unknown_set_macro(position: Position, name: &str) -> ParseError {
        let message = format!("unknown set macro: ${name}");
        ParseError::new(ParseErrorKind::UnknownSetMacro, Some(position), message)
    }

    // NOTE: Regex macro references carry no position of their own, so the
    // error is left unpositioned rather than guessing one from the cursor.
    pub(crate) fn unknown_regex_macro(name: &str) -> ParseError {
        let message = format!("unknown regex macro: %{name}");
        ParseError::new(ParseErrorKind::UnknownRegexMacro, None, message)
    }

    /// Formats the error as `file:line:column: message`.
    pub fn render(&self, file: &str) -> String {
        match self.position {
            Some(position) => format!("{file}:{position}: {}", self.message),
            None => format!("{file}: {}", self.message),
        }
    }
}
