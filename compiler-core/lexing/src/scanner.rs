use crate::Cursor;

/// The outcome of scanning a single token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scan<'s, A> {
    EndOfFile,
    Error,
    /// Input that produces no token, such as whitespace.
    Skip(Cursor<'s>),
    /// A token of `length` characters, with `input` positioned after it.
    Token { input: Cursor<'s>, length: usize, action: A },
}

/// A tokeniser over a [`Cursor`], parameterised by the active start code.
pub trait Scanner {
    type Action;

    fn scan<'s>(&self, input: Cursor<'s>, start_code: u32) -> Scan<'s, Self::Action>;
}
