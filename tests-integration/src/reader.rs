use parsing::{Lexeme, ParseError, ParseState};
use smol_str::SmolStr;
use syntax::{CharSet, RExp};

use crate::scanner::{SpecScanner, Token};
use crate::{Rule, Specification};

/// A recursive descent reader with single token lookahead.
pub(crate) struct Reader<'a, 's> {
    state: &'a mut ParseState<'s>,
}

impl<'a, 's> Reader<'a, 's> {
    pub(crate) fn new(state: &'a mut ParseState<'s>) -> Reader<'a, 's> {
        Reader { state }
    }

    fn next(&mut self) -> Result<Lexeme<Token>, ParseError> {
        self.state.lex_token(&SpecScanner)
    }

    fn peek(&mut self) -> Result<Lexeme<Token>, ParseError> {
        let input = self.state.input();
        let lexeme = self.next()?;
        self.state.set_input(input);
        Ok(lexeme)
    }

    fn peek_kind(&mut self) -> Result<Option<Token>, ParseError> {
        Ok(match self.peek()? {
            Lexeme::Token { action, .. } => Some(action),
            Lexeme::EndOfFile { .. } => None,
        })
    }

    fn unexpected<T>(&self, lexeme: Lexeme<Token>) -> Result<T, ParseError> {
        match lexeme {
            Lexeme::Token { text, .. } => {
                self.state.fail(format!("parse error: unexpected '{text}'"))
            }
            Lexeme::EndOfFile { .. } => self.state.fail("parse error: unexpected end of file"),
        }
    }

    fn expect(&mut self, expected: Token) -> Result<(), ParseError> {
        let lexeme = self.next()?;
        match lexeme {
            Lexeme::Token { action, .. } if action == expected => Ok(()),
            lexeme => self.unexpected(lexeme),
        }
    }

    fn end_of_line(&mut self) -> Result<(), ParseError> {
        match self.next()? {
            Lexeme::Token { action: Token::Newline, .. } | Lexeme::EndOfFile { .. } => Ok(()),
            lexeme => self.unexpected(lexeme),
        }
    }

    pub(crate) fn specification(mut self) -> Result<Specification, ParseError> {
        let mut rules = vec![];
        loop {
            let (position, text, action) = match self.next()? {
                Lexeme::Token { position, text, action } => (position, text, action),
                Lexeme::EndOfFile { .. } => return Ok(Specification { rules }),
            };
            match action {
                Token::Newline => continue,
                Token::SetMacro => {
                    self.expect(Token::Equals)?;
                    let set = self.set()?;
                    self.end_of_line()?;
                    self.state.define_set_macro(&text[1..], set);
                }
                Token::RegexMacro => {
                    self.expect(Token::Equals)?;
                    let rexp = self.regex()?;
                    self.end_of_line()?;
                    self.state.define_regex_macro(&text[1..], rexp);
                }
                Token::StartCode(start_code) => {
                    self.end_of_line()?;
                    self.state.set_start_code(start_code);
                }
                Token::Word => {
                    self.expect(Token::Turnstile)?;
                    let at = self.peek()?.position();
                    let rexp = self.regex()?;
                    self.end_of_line()?;
                    self.state.warn_if_nullable(&rexp, at);
                    let start_code = self.state.start_code();
                    rules.push(Rule { start_code, name: text, rexp, position });
                }
                _ => return self.unexpected(Lexeme::Token { position, text, action }),
            }
        }
    }

    fn set(&mut self) -> Result<CharSet, ParseError> {
        let mut set = CharSet::empty();
        loop {
            let (position, text, action) = match self.peek()? {
                Lexeme::Token { action: Token::Newline, .. } | Lexeme::EndOfFile { .. } => {
                    return Ok(set);
                }
                Lexeme::Token { position, text, action } => (position, text, action),
            };
            let lexeme = self.next()?;
            let item = match action {
                Token::SetMacro => self.state.lookup_set_macro(position, &text[1..])?,
                Token::Dot => CharSet::any(),
                Token::Word | Token::Escape => match literal(action, &text) {
                    Some(low) if self.peek_kind()? == Some(Token::Dash) => {
                        self.next()?;
                        let high = self.range_end()?;
                        CharSet::range(low, high)
                    }
                    Some(single) => CharSet::singleton(single),
                    None => CharSet::from_chars(text.chars()),
                },
                _ => return self.unexpected(lexeme),
            };
            set = set.union(&item);
        }
    }

    fn range_end(&mut self) -> Result<char, ParseError> {
        let lexeme = self.next()?;
        if let Lexeme::Token { action, text, .. } = &lexeme {
            if let Some(high) = literal(*action, text) {
                return Ok(high);
            }
        }
        self.unexpected(lexeme)
    }

    fn regex(&mut self) -> Result<RExp, ParseError> {
        let mut rexp = self.sequence()?;
        while self.peek_kind()? == Some(Token::Bar) {
            self.next()?;
            let right = self.sequence()?;
            rexp = RExp::alt(rexp, right);
        }
        Ok(rexp)
    }

    fn sequence(&mut self) -> Result<RExp, ParseError> {
        let mut sequence = None;
        loop {
            match self.peek_kind()? {
                None
                | Some(Token::Newline)
                | Some(Token::Bar)
                | Some(Token::RightParenthesis) => break,
                Some(_) => {
                    let item = self.postfix()?;
                    sequence = Some(match sequence {
                        Some(previous) => RExp::seq(previous, item),
                        None => item,
                    });
                }
            }
        }
        match sequence {
            Some(sequence) => Ok(sequence),
            None => {
                let lexeme = self.next()?;
                self.unexpected(lexeme)
            }
        }
    }

    fn postfix(&mut self) -> Result<RExp, ParseError> {
        let mut rexp = self.atom()?;
        loop {
            rexp = match self.peek_kind()? {
                Some(Token::Star) => RExp::star(rexp),
                Some(Token::Plus) => RExp::plus(rexp),
                Some(Token::Question) => RExp::ques(rexp),
                _ => return Ok(rexp),
            };
            self.next()?;
        }
    }

    fn atom(&mut self) -> Result<RExp, ParseError> {
        let (position, text, action) = match self.next()? {
            Lexeme::Token { position, text, action } => (position, text, action),
            lexeme => return self.unexpected(lexeme),
        };
        match action {
            Token::LeftParenthesis => {
                if self.peek_kind()? == Some(Token::RightParenthesis) {
                    self.next()?;
                    return Ok(RExp::Eps);
                }
                let rexp = self.regex()?;
                self.expect(Token::RightParenthesis)?;
                Ok(rexp)
            }
            Token::SetMacro => {
                let set = self.state.lookup_set_macro(position, &text[1..])?;
                Ok(RExp::Ch(set))
            }
            Token::RegexMacro => self.state.lookup_regex_macro(&text[1..]),
            Token::Word => Ok(RExp::string(&text)),
            Token::Escape => Ok(RExp::Ch(CharSet::singleton(unescape(&text)))),
            Token::Dot => Ok(RExp::Ch(CharSet::any())),
            _ => self.unexpected(Lexeme::Token { position, text, action }),
        }
    }
}

/// The character a single-character word or an escape stands for.
fn literal(action: Token, text: &SmolStr) -> Option<char> {
    match action {
        Token::Escape => Some(unescape(text)),
        Token::Word => {
            let mut chars = text.chars();
            let first = chars.next()?;
            chars.next().is_none().then_some(first)
        }
        _ => None,
    }
}

fn unescape(text: &str) -> char {
    match text.chars().nth(1) {
        Some('n') => '\n',
        Some('t') => '\t',
        Some(c) => c,
        None => '\\',
    }
}
