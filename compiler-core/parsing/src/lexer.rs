//! Drives a [`Scanner`] over the input held by the [`ParseState`].

use lexing::{Scan, Scanner};
use position::Position;
use smol_str::SmolStr;

use crate::{ParseError, ParseErrorKind, ParseState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lexeme<A> {
    Token { position: Position, text: SmolStr, action: A },
    EndOfFile { position: Position },
}

impl<A> Lexeme<A> {
    pub fn position(&self) -> Position {
        match self {
            Lexeme::Token { position, .. } | Lexeme::EndOfFile { position } => *position,
        }
    }
}

impl ParseState<'_> {
    /// Scans the next token under the current start code, skipping over
    /// input the scanner ignores.
    pub fn lex_token<S: Scanner>(&mut self, scanner: &S) -> Result<Lexeme<S::Action>, ParseError> {
        loop {
            let input = self.input();
            let position = input.position();
            match scanner.scan(input, self.start_code()) {
                Scan::EndOfFile => {
                    tracing::trace!(%position, "end of file");
                    return Ok(Lexeme::EndOfFile { position });
                }
                Scan::Error => {
                    return self.lex_error("lexical error");
                }
                Scan::Skip(input) => {
                    self.set_input(input);
                }
                Scan::Token { input: next, length, action } => {
                    self.set_input(next);
                    let text = take_chars(input.remaining(), length);
                    tracing::trace!(%position, text, "token");
                    let text = SmolStr::new(text);
                    return Ok(Lexeme::Token { position, text, action });
                }
            }
        }
    }

    /// Fails with `message`, naming the next unconsumed character. While
    /// bytes are pending, that is the partially emitted last character.
    pub fn lex_error<T>(&self, message: &str) -> Result<T, ParseError> {
        let input = self.input();
        let next = if input.pending_bytes().is_empty() {
            input.remaining().chars().next()
        } else {
            Some(input.last_char())
        };
        let message = match next {
            Some(next) => format!("{message} at {next:?}"),
            None => format!("{message} at end of file"),
        };
        tracing::debug!(position = %input.position(), message = %message, "lexical error");
        Err(ParseError::new(ParseErrorKind::Lexical, Some(input.position()), message))
    }
}

fn take_chars(text: &str, length: usize) -> &str {
    let end = text.char_indices().nth(length).map_or(text.len(), |(index, _)| index);
    &text[..end]
}

#[cfg(test)]
mod tests {
    use lexing::Cursor;

    use super::*;
    use crate::{RegexMacros, SetMacros};

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Word {
        Lower,
        Upper,
    }

    /// Lowercase words under start code 0, uppercase under 1.
    struct Words;

    impl Scanner for Words {
        type Action = Word;

        fn scan<'s>(&self, input: Cursor<'s>, start_code: u32) -> Scan<'s, Word> {
            let Some((first, mut cursor)) = input.next_char() else {
                return Scan::EndOfFile;
            };
            if first.is_whitespace() {
                return Scan::Skip(cursor);
            }
            let action = if start_code == 0 { Word::Lower } else { Word::Upper };
            let accept = |c: char| match action {
                Word::Lower => c.is_ascii_lowercase(),
                Word::Upper => c.is_ascii_uppercase(),
            };
            if !accept(first) {
                return Scan::Error;
            }
            let mut length = 1;
            while let Some((next, rest)) = cursor.next_char() {
                if !accept(next) {
                    break;
                }
                cursor = rest;
                length += 1;
            }
            Scan::Token { input: cursor, length, action }
        }
    }

    fn state(source: &str) -> ParseState<'_> {
        ParseState::new(source, SetMacros::default(), RegexMacros::default())
    }

    #[test]
    fn lexical_error_names_character() {
        let mut state = state("  héllo");
        let h = state.lex_token(&Words).unwrap();
        assert!(matches!(h, Lexeme::Token { ref text, .. } if text == "h"));
        let error = state.lex_token(&Words).unwrap_err();
        assert_eq!(&*error.message, "lexical error at 'é'");
        assert_eq!(error.kind, ParseErrorKind::Lexical);
        assert_eq!(error.position, Some(Position::new(3, 1, 4)));
    }

    #[test]
    fn skip_then_token() {
        let mut state = state("  hello\n\tworld ");
        let hello = state.lex_token(&Words).unwrap();
        let world = state.lex_token(&Words).unwrap();
        let end = state.lex_token(&Words).unwrap();
        let position = Position::new(2, 1, 3);
        let text = SmolStr::new("hello");
        assert_eq!(hello, Lexeme::Token { position, text, action: Word::Lower });
        let position = Position::new(9, 2, 9);
        let text = SmolStr::new("world");
        assert_eq!(world, Lexeme::Token { position, text, action: Word::Lower });
        assert_eq!(end, Lexeme::EndOfFile { position: Position::new(15, 2, 15) });
    }

    #[test]
    fn start_code_selects_rules() {
        let mut state = state("ABC def");
        state.set_start_code(1);
        let upper = state.lex_token(&Words).unwrap();
        assert!(matches!(upper, Lexeme::Token { action: Word::Upper, .. }));
        let error = state.lex_token(&Words).unwrap_err();
        assert_eq!(&*error.message, "lexical error at 'd'");
        state.set_start_code(0);
        let lower = state.lex_token(&Words).unwrap();
        assert!(matches!(lower, Lexeme::Token { action: Word::Lower, .. }));
    }

    #[test]
    fn lex_error_at_end_of_file() {
        let state = state("");
        let error = state.lex_error::<()>("unterminated string").unwrap_err();
        assert_eq!(&*error.message, "unterminated string at end of file");
        assert_eq!(error.position, Some(Position::START));
    }

    #[test]
    fn lex_error_with_pending_bytes() {
        let mut state = state("λx");
        let (_, input) = state.input().next_byte().unwrap();
        state.set_input(input);
        let error = state.lex_error::<()>("lexical error").unwrap_err();
        assert_eq!(&*error.message, "lexical error at 'λ'");
        assert_eq!(error.position, Some(Position::new(1, 1, 2)));
    }

    #[test]
    fn take_chars_counts_characters() {
        assert_eq!(take_chars("λx.y", 2), "λx");
        assert_eq!(take_chars("ab", 5), "ab");
        assert_eq!(take_chars("ab", 0), "");
    }
}
