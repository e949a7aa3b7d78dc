use lexing::{Cursor, Scan, Scanner};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// `$name`
    SetMacro,
    /// `%name`
    RegexMacro,
    Word,
    /// A backslash followed by any character.
    Escape,
    /// `<n>`
    StartCode(u32),
    Equals,
    /// `:-`
    Turnstile,
    Dash,
    Dot,
    LeftParenthesis,
    RightParenthesis,
    Bar,
    Star,
    Plus,
    Question,
    Newline,
}

/// Tokeniser for the miniature specification language.
pub struct SpecScanner;

impl Scanner for SpecScanner {
    type Action = Token;

    fn scan<'s>(&self, input: Cursor<'s>, _: u32) -> Scan<'s, Token> {
        let Some((first, cursor)) = input.next_char() else {
            return Scan::EndOfFile;
        };
        let single = |action| Scan::Token { input: cursor, length: 1, action };
        match first {
            ' ' | '\t' | '\r' => Scan::Skip(cursor),
            '#' => Scan::Skip(take_while(cursor, |c| c != '\n').0),
            '\n' => single(Token::Newline),
            '=' => single(Token::Equals),
            '-' => single(Token::Dash),
            '.' => single(Token::Dot),
            '(' => single(Token::LeftParenthesis),
            ')' => single(Token::RightParenthesis),
            '|' => single(Token::Bar),
            '*' => single(Token::Star),
            '+' => single(Token::Plus),
            '?' => single(Token::Question),
            ':' => match cursor.next_char() {
                Some(('-', input)) => Scan::Token { input, length: 2, action: Token::Turnstile },
                _ => Scan::Error,
            },
            '\\' => match cursor.next_char() {
                Some((_, input)) => Scan::Token { input, length: 2, action: Token::Escape },
                None => Scan::Error,
            },
            '$' | '%' => {
                let (input, length) = take_while(cursor, is_name);
                if length == 0 {
                    return Scan::Error;
                }
                let action = if first == '$' { Token::SetMacro } else { Token::RegexMacro };
                Scan::Token { input, length: length + 1, action }
            }
            '<' => {
                let digits = cursor.remaining();
                let (input, length) = take_while(cursor, |c| c.is_ascii_digit());
                let Ok(code) = digits[..length].parse() else {
                    return Scan::Error;
                };
                match input.next_char() {
                    Some(('>', input)) => {
                        Scan::Token { input, length: length + 2, action: Token::StartCode(code) }
                    }
                    _ => Scan::Error,
                }
            }
            c if is_name(c) => {
                let (input, length) = take_while(cursor, is_name);
                Scan::Token { input, length: length + 1, action: Token::Word }
            }
            _ => Scan::Error,
        }
    }
}

fn is_name(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '\''
}

/// Consumes characters matching `predicate`, returning how many were taken.
fn take_while(mut cursor: Cursor<'_>, predicate: impl Fn(char) -> bool) -> (Cursor<'_>, usize) {
    let mut length = 0;
    while let Some((c, rest)) = cursor.next_char() {
        if !predicate(c) {
            break;
        }
        cursor = rest;
        length += 1;
    }
    (cursor, length)
}
