//! Parsing computations as first-class values.
//!
//! A [`Parse`] is a step over the [`ParseState`]: it either produces a value
//! or aborts with a [`ParseError`]. Steps are chained with
//! [`Parse::and_then`]; once a step fails, no later step runs.

use std::sync::Arc;

use lexing::{Cursor, Scanner};
use position::Position;
use smol_str::SmolStr;
use syntax::{CharSet, RExp};

use crate::{Lexeme, ParseError, ParseState};

type Step<'s, T> = Box<dyn FnOnce(&mut ParseState<'s>) -> Result<T, ParseError> + 's>;

#[must_use]
pub struct Parse<'s, T> {
    step: Step<'s, T>,
}

impl<'s, T: 's> Parse<'s, T> {
    pub fn new<F>(step: F) -> Parse<'s, T>
    where
        F: FnOnce(&mut ParseState<'s>) -> Result<T, ParseError> + 's,
    {
        let step = Box::new(step);
        Parse { step }
    }

    pub fn pure(value: T) -> Parse<'s, T> {
        Parse::new(move |_| Ok(value))
    }

    /// Runs this step against `state`.
    pub fn run_on(self, state: &mut ParseState<'s>) -> Result<T, ParseError> {
        (self.step)(state)
    }

    pub fn and_then<U: 's, F>(self, next: F) -> Parse<'s, U>
    where
        F: FnOnce(T) -> Parse<'s, U> + 's,
    {
        Parse::new(move |state| {
            let value = self.run_on(state)?;
            next(value).run_on(state)
        })
    }

    pub fn then<U: 's>(self, next: Parse<'s, U>) -> Parse<'s, U> {
        self.and_then(move |_| next)
    }

    pub fn map<U: 's, F>(self, f: F) -> Parse<'s, U>
    where
        F: FnOnce(T) -> U + 's,
    {
        Parse::new(move |state| self.run_on(state).map(f))
    }
}

/// Runs `steps` in order, collecting their values.
pub fn sequence<'s, T: 's>(
    steps: impl IntoIterator<Item = Parse<'s, T>> + 's,
) -> Parse<'s, Vec<T>> {
    Parse::new(move |state| steps.into_iter().map(|step| step.run_on(state)).collect())
}

pub fn fail<'s, T: 's>(message: impl Into<Arc<str>>) -> Parse<'s, T> {
    let message = message.into();
    Parse::new(move |state| state.fail(message))
}

pub fn lookup_set_macro<'s>(position: Position, name: impl Into<SmolStr>) -> Parse<'s, CharSet> {
    let name = name.into();
    Parse::new(move |state| state.lookup_set_macro(position, &name))
}

pub fn lookup_regex_macro<'s>(name: impl Into<SmolStr>) -> Parse<'s, RExp> {
    let name = name.into();
    Parse::new(move |state| state.lookup_regex_macro(&name))
}

pub fn define_set_macro<'s>(name: impl Into<SmolStr>, value: CharSet) -> Parse<'s, ()> {
    let name = name.into();
    Parse::new(move |state| {
        state.define_set_macro(&name, value);
        Ok(())
    })
}

pub fn define_regex_macro<'s>(name: impl Into<SmolStr>, value: RExp) -> Parse<'s, ()> {
    let name = name.into();
    Parse::new(move |state| {
        state.define_regex_macro(&name, value);
        Ok(())
    })
}

pub fn get_start_code<'s>() -> Parse<'s, u32> {
    Parse::new(|state| Ok(state.start_code()))
}

pub fn set_start_code<'s>(start_code: u32) -> Parse<'s, ()> {
    Parse::new(move |state| {
        state.set_start_code(start_code);
        Ok(())
    })
}

pub fn get_input<'s>() -> Parse<'s, Cursor<'s>> {
    Parse::new(|state| Ok(state.input()))
}

pub fn set_input(input: Cursor<'_>) -> Parse<'_, ()> {
    Parse::new(move |state| {
        state.set_input(input);
        Ok(())
    })
}

pub fn warn_if_nullable<'s>(rexp: RExp, position: Position) -> Parse<'s, ()> {
    Parse::new(move |state| {
        state.warn_if_nullable(&rexp, position);
        Ok(())
    })
}

pub fn lex_token<'s, S>(scanner: &'s S) -> Parse<'s, Lexeme<S::Action>>
where
    S: Scanner,
    S::Action: 's,
{
    Parse::new(move |state| state.lex_token(scanner))
}

pub fn lex_error<'s, T: 's>(message: impl Into<SmolStr>) -> Parse<'s, T> {
    let message = message.into();
    Parse::new(move |state| state.lex_error(&message))
}
