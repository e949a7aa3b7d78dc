//! A miniature lexer specification reader built on the `parsing` engine.
//!
//! Each line is one of:
//!
//! ```text
//! # comment
//! $name = set          -- set macro, e.g. `$alnum = a-z A-Z $digit`
//! %name = regex        -- regex macro, e.g. `%ident = $alpha $alnum*`
//! <n>                  -- start code for the rules that follow
//! name :- regex        -- rule
//! ```

mod reader;
mod scanner;

use parsing::{FullParse, Lexeme, Parse, ParseError, RegexMacros, SetMacros};
use position::Position;
use smol_str::SmolStr;
use syntax::RExp;

pub use scanner::{SpecScanner, Token};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub start_code: u32,
    pub name: SmolStr,
    pub rexp: RExp,
    pub position: Position,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Specification {
    pub rules: Vec<Rule>,
}

pub fn specification<'s>() -> Parse<'s, Specification> {
    Parse::new(|state| reader::Reader::new(state).specification())
}

pub fn read(source: &str) -> Result<FullParse<Specification>, ParseError> {
    read_with(source, SetMacros::default(), RegexMacros::default())
}

pub fn read_with(
    source: &str,
    set_macros: SetMacros,
    regex_macros: RegexMacros,
) -> Result<FullParse<Specification>, ParseError> {
    parsing::run(source, set_macros, regex_macros, specification())
}

/// Collects every token up to the end of the input.
pub fn tokens<'s>() -> Parse<'s, Vec<(Position, Token, SmolStr)>> {
    fn collect<'s>(
        mut tokens: Vec<(Position, Token, SmolStr)>,
    ) -> Parse<'s, Vec<(Position, Token, SmolStr)>> {
        parsing::lex_token(&SpecScanner).and_then(move |lexeme| match lexeme {
            Lexeme::Token { position, text, action } => {
                tokens.push((position, action, text));
                collect(tokens)
            }
            Lexeme::EndOfFile { .. } => Parse::pure(tokens),
        })
    }
    collect(vec![])
}

/// Renders the rules and warnings of `source`, or the error that stopped it.
pub fn report(file: &str, source: &str) -> String {
    match read(source) {
        Ok((warnings, specification)) => {
            let rules = specification.rules.iter().map(|rule| {
                let Rule { start_code, name, rexp, position } = rule;
                format!("{start_code} {name} @ {position}: {rexp}")
            });
            let warnings = warnings.iter().map(|warning| warning.render(file));
            rules.chain(warnings).collect::<Vec<_>>().join("\n")
        }
        Err(error) => error.render(file),
    }
}
