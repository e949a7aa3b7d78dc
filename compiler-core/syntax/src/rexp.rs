use std::fmt;

use crate::CharSet;

/// A regular expression over characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RExp {
    /// The empty sequence, written `()`.
    Eps,
    Ch(CharSet),
    Seq(Box<RExp>, Box<RExp>),
    Alt(Box<RExp>, Box<RExp>),
    Star(Box<RExp>),
    Plus(Box<RExp>),
    Ques(Box<RExp>),
}

impl RExp {
    pub fn seq(left: RExp, right: RExp) -> RExp {
        RExp::Seq(Box::new(left), Box::new(right))
    }

    pub fn alt(left: RExp, right: RExp) -> RExp {
        RExp::Alt(Box::new(left), Box::new(right))
    }

    pub fn star(inner: RExp) -> RExp {
        RExp::Star(Box::new(inner))
    }

    pub fn plus(inner: RExp) -> RExp {
        RExp::Plus(Box::new(inner))
    }

    pub fn ques(inner: RExp) -> RExp {
        RExp::Ques(Box::new(inner))
    }

    /// Matches `text` literally, one character at a time.
    pub fn string(text: &str) -> RExp {
        text.chars().map(|c| RExp::Ch(CharSet::singleton(c))).reduce(RExp::seq).unwrap_or(RExp::Eps)
    }

    /// Whether this is the explicit empty sequence, as opposed to an
    /// expression that merely happens to match the empty string.
    pub fn is_eps(&self) -> bool {
        matches!(self, RExp::Eps)
    }

    /// Whether this expression matches the empty string.
    pub fn nullable(&self) -> bool {
        match self {
            RExp::Eps => true,
            RExp::Ch(_) => false,
            RExp::Seq(left, right) => left.nullable() && right.nullable(),
            RExp::Alt(left, right) => left.nullable() || right.nullable(),
            RExp::Star(_) => true,
            RExp::Plus(inner) => inner.nullable(),
            RExp::Ques(_) => true,
        }
    }

    fn fmt_postfix(&self, f: &mut fmt::Formatter<'_>, operator: char) -> fmt::Result {
        match self {
            RExp::Seq(..) => write!(f, "({self}){operator}"),
            _ => write!(f, "{self}{operator}"),
        }
    }
}

impl fmt::Display for RExp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RExp::Eps => f.write_str("()"),
            RExp::Ch(set) => write!(f, "{set}"),
            RExp::Seq(left, right) => write!(f, "{left}{right}"),
            RExp::Alt(left, right) => write!(f, "({left}|{right})"),
            RExp::Star(inner) => inner.fmt_postfix(f, '*'),
            RExp::Plus(inner) => inner.fmt_postfix(f, '+'),
            RExp::Ques(inner) => inner.fmt_postfix(f, '?'),
        }
    }
}
