use std::sync::Arc;

use lexing::Cursor;
use position::Position;
use syntax::{CharSet, RExp};

use crate::{ParseError, ParseErrorKind, RegexMacros, SetMacros, Warning, WarningLog};

/// The environment threaded through a parse.
///
/// Grammar code may work with a `&mut ParseState` directly and propagate
/// errors with `?`, or build [`crate::Parse`] computations that do the same.
#[derive(Debug)]
pub struct ParseState<'s> {
    warnings: WarningLog,
    set_macros: SetMacros,
    regex_macros: RegexMacros,
    start_code: u32,
    input: Cursor<'s>,
}

impl<'s> ParseState<'s> {
    pub fn new(
        source: &'s str,
        set_macros: SetMacros,
        regex_macros: RegexMacros,
    ) -> ParseState<'s> {
        let warnings = WarningLog::default();
        let start_code = 0;
        let input = Cursor::new(source);
        ParseState { warnings, set_macros, regex_macros, start_code, input }
    }

    pub(crate) fn finish(self) -> Vec<Warning> {
        self.warnings.drain()
    }

    /// The position of the input cursor.
    pub fn position(&self) -> Position {
        self.input.position()
    }

    /// Creates an error positioned at the input cursor.
    pub fn error(&self, message: impl Into<Arc<str>>) -> ParseError {
        ParseError::new(ParseErrorKind::User, Some(self.position()), message)
    }

    /// Aborts the parse with an error positioned at the input cursor.
    pub fn fail<T>(&self, message: impl Into<Arc<str>>) -> Result<T, ParseError> {
        let error = self.error(message);
        tracing::debug!(position = %self.position(), message = %error.message, "fail");
        Err(error)
    }

    pub fn lookup_set_macro(&self, position: Position, name: &str) -> Result<CharSet, ParseError> {
        self.set_macros.resolve(position, name)
    }

    pub fn lookup_regex_macro(&self, name: &str) -> Result<RExp, ParseError> {
        self.regex_macros.resolve(name)
    }

    pub fn define_set_macro(&mut self, name: &str, value: CharSet) {
        tracing::trace!(name, %value, "define set macro");
        self.set_macros.define(name, value);
    }

    pub fn define_regex_macro(&mut self, name: &str, value: RExp) {
        tracing::trace!(name, %value, "define regex macro");
        self.regex_macros.define(name, value);
    }

    pub fn set_macros(&self) -> &SetMacros {
        &self.set_macros
    }

    pub fn regex_macros(&self) -> &RegexMacros {
        &self.regex_macros
    }

    pub fn start_code(&self) -> u32 {
        self.start_code
    }

    pub fn set_start_code(&mut self, start_code: u32) {
        self.start_code = start_code;
    }

    pub fn input(&self) -> Cursor<'s> {
        self.input
    }

    pub fn set_input(&mut self, input: Cursor<'s>) {
        self.input = input;
    }

    /// Warns about a rule matching the empty string, unless it is spelled
    /// out as the empty sequence `()`.
    pub fn warn_if_nullable(&mut self, rexp: &RExp, position: Position) {
        if !rexp.is_eps() && rexp.nullable() {
            self.warnings.record_nullable(position, rexp);
        }
    }

    pub fn warnings(&self) -> &[Warning] {
        self.warnings.as_slice()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(source: &str) -> ParseState<'_> {
        ParseState::new(source, SetMacros::default(), RegexMacros::default())
    }

    #[test]
    fn initial_state() {
        let state = state("abc");
        assert_eq!(state.start_code(), 0);
        assert_eq!(state.position(), Position::START);
        assert_eq!(state.input().remaining(), "abc");
        assert_eq!(state.input().last_char(), '\n');
        assert!(state.warnings().is_empty());
        assert!(state.set_macros().is_empty());
        assert!(state.regex_macros().is_empty());
    }

    #[test]
    fn fail_uses_cursor_position() {
        let mut state = state("ab\ncd");
        let mut input = state.input();
        for _ in 0..4 {
            input = input.next_char().unwrap().1;
        }
        state.set_input(input);
        let error = state.fail::<()>("unexpected").unwrap_err();
        assert_eq!(error.kind, ParseErrorKind::User);
        assert_eq!(error.position, Some(Position::new(4, 2, 2)));
    }

    #[test]
    fn warn_if_nullable_skips_explicit_empty() {
        let mut state = state("");
        state.warn_if_nullable(&RExp::Eps, Position::START);
        assert!(state.warnings().is_empty());
    }

    #[test]
    fn warn_if_nullable_skips_non_nullable() {
        let mut state = state("");
        state.warn_if_nullable(&RExp::string("a"), Position::START);
        assert!(state.warnings().is_empty());
    }

    #[test]
    fn warn_if_nullable_records_each_occurrence() {
        let mut state = state("");
        let rexp = RExp::star(RExp::string("a"));
        state.warn_if_nullable(&rexp, Position::START);
        state.warn_if_nullable(&rexp, Position::START);
        assert_eq!(state.warnings().len(), 2);
        let message = &*state.warnings()[0].message;
        assert_eq!(message, "Regular expression a* matches the empty string.");
    }

    #[test]
    fn warn_if_nullable_flags_sequence_of_empties() {
        let mut state = state("");
        state.warn_if_nullable(&RExp::seq(RExp::Eps, RExp::Eps), Position::START);
        assert_eq!(state.warnings().len(), 1);
    }
}
