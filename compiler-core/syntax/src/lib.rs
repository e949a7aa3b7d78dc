//! Character set and regular expression values for lexer specifications.

mod charset;
mod rexp;

pub use charset::CharSet;
pub use rexp::RExp;
