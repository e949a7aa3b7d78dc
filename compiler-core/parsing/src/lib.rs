//! The stateful engine behind the lexer specification reader.
//!
//! A parse threads a single [`ParseState`] through a chain of steps: the
//! input [`Cursor`], the set and regex macro environments, the active start
//! code, and the warnings collected so far. Any step may abort the parse
//! with a [`ParseError`], which is returned from [`run`] as-is.

mod environment;
mod error;
mod lexer;
mod parse;
mod state;
mod warning;

pub use environment::*;
pub use error::*;
pub use lexer::Lexeme;
pub use parse::*;
pub use state::ParseState;
pub use warning::*;

pub use lexing::{Cursor, Scan, Scanner};
pub use position::Position;

/// Warnings in the order they were recorded, and the parsed value.
pub type FullParse<T> = (Vec<Warning>, T);

/// Runs `parse` over `source` with the given initial macro environments.
pub fn run<'s, T: 's>(
    source: &'s str,
    set_macros: SetMacros,
    regex_macros: RegexMacros,
    parse: Parse<'s, T>,
) -> Result<FullParse<T>, ParseError> {
    run_with(source, set_macros, regex_macros, |state| parse.run_on(state))
}

/// Like [`run`], for grammar code written directly against [`ParseState`].
pub fn run_with<'s, T, F>(
    source: &'s str,
    set_macros: SetMacros,
    regex_macros: RegexMacros,
    parse: F,
) -> Result<FullParse<T>, ParseError>
where
    F: FnOnce(&mut ParseState<'s>) -> Result<T, ParseError>,
{
    let _span = tracing::info_span!("run", length = source.len()).entered();
    let mut state = ParseState::new(source, set_macros, regex_macros);
    let value = parse(&mut state)?;
    let warnings = state.finish();
    tracing::debug!("Finished with {} warnings.", warnings.len());
    Ok((warnings, value))
}

#[cfg(test)]
mod tests {
    use syntax::{CharSet, RExp};

    use super::*;

    /// Consumes a `$name` reference and resolves it.
    fn set_reference<'s>() -> Parse<'s, CharSet> {
        get_input().and_then(|input| {
            let position = input.position();
            let Some(('$', mut input)) = input.next_char() else {
                return fail("expected a set macro");
            };
            let start = input.remaining();
            while let Some((c, rest)) = input.next_char() {
                if !c.is_alphanumeric() {
                    break;
                }
                input = rest;
            }
            let name = &start[..start.len() - input.remaining().len()];
            set_input(input).then(lookup_set_macro(position, name))
        })
    }

    #[test]
    fn unknown_set_macro_end_to_end() {
        let error = run("$foo", SetMacros::default(), RegexMacros::default(), set_reference())
            .unwrap_err();
        assert_eq!(error.kind, ParseErrorKind::UnknownSetMacro);
        assert!(error.message.contains("unknown set macro: $foo"));
        assert_eq!(error.position, Some(Position::START));
    }

    #[test]
    fn known_set_macro_end_to_end() {
        let letters = CharSet::range('a', 'z');
        let set_macros: SetMacros = [("foo", letters.clone())].into_iter().collect();
        let (warnings, value) =
            run("$foo", set_macros, RegexMacros::default(), set_reference()).unwrap();
        assert_eq!(value, letters);
        assert!(warnings.is_empty());
    }

    #[test]
    fn failure_hides_later_effects() {
        let parse = warn_if_nullable(RExp::star(RExp::string("a")), Position::START)
            .then(fail::<()>("stop"))
            .then(warn_if_nullable(RExp::star(RExp::string("b")), Position::START));
        let error = run("", SetMacros::default(), RegexMacros::default(), parse).unwrap_err();
        assert_eq!(&*error.message, "stop");
    }

    #[test]
    fn warnings_are_oldest_first() {
        let positions = [Position::new(0, 1, 1), Position::new(10, 2, 1), Position::new(20, 3, 1)];
        let nullable = RExp::ques(RExp::string("x"));
        let steps = positions.map(|position| warn_if_nullable(nullable.clone(), position));
        let parse = sequence(steps).then(warn_if_nullable(RExp::Eps, Position::new(30, 4, 1)));
        let (warnings, ()) =
            run("", SetMacros::default(), RegexMacros::default(), parse).unwrap();
        let recorded: Vec<_> = warnings.iter().map(|warning| warning.position).collect();
        assert_eq!(recorded, positions);
    }

    #[test]
    fn start_code_defaults_to_zero() {
        let parse = get_start_code();
        let (_, start_code) = run("", SetMacros::default(), RegexMacros::default(), parse).unwrap();
        assert_eq!(start_code, 0);
    }

    #[test]
    fn run_with_direct_style() {
        let result = run_with("%w", SetMacros::default(), RegexMacros::default(), |state| {
            state.define_regex_macro("w", RExp::plus(RExp::string("w")));
            let rexp = state.lookup_regex_macro("w")?;
            state.warn_if_nullable(&rexp, state.position());
            state.lookup_regex_macro("missing")
        });
        let error = result.unwrap_err();
        assert_eq!(error.kind, ParseErrorKind::UnknownRegexMacro);
        assert_eq!(error.position, None);
    }
}
