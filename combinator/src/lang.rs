//! Surface syntax, as written by the user and before any name is resolved.

use std::rc::Rc;

use crate::prelude::*;

/// Letters that name variables, in the order the printer hands them out.
pub const VARIABLE_NAMES: &str = "abcdefghijklmnopqrstuvwxyz";

pub fn is_variable_name(c: char) -> bool {
    c.is_ascii_lowercase()
}

#[derive(PartialEq, Eq, Hash, Clone, derive_more::Display, Debug)]
pub enum Token {
    #[display(fmt = "(")]
    LParen,
    #[display(fmt = ")")]
    RParen,
    #[display(fmt = ".")]
    Dot,
    #[display(fmt = "λ")]
    Lambda,
    #[display(fmt = "{_0}")]
    Letter(char),
    #[display(fmt = "{_0}")]
    Symbol(Identifier),
}

#[derive(Clone, Debug)]
pub enum Term {
    /// `x`
    Letter(char),
    /// `S`, `B₁`, `NotX`
    Symbol(Identifier),
    /// `λxy. t`
    Abstract(Vec<Spanned<char>>, Rc<Spanned<Self>>),
    /// `t t ...`, a single element for a lone term
    Sequence(Vec<Spanned<Self>>),
}

impl std::fmt::Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Term::Letter(c) => f.write_fmt(format_args!("{c}")),
            Term::Symbol(name) => f.write_str(name),
            Term::Abstract(params, body) => {
                f.write_str("(λ")?;
                for param in params {
                    f.write_fmt(format_args!("{param}"))?;
                }
                f.write_fmt(format_args!(".{body})"))
            }
            Term::Sequence(terms) if terms.len() == 1 => f.write_fmt(format_args!("{}", terms[0])),
            Term::Sequence(terms) => {
                f.write_str("(")?;
                for (i, term) in terms.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    f.write_fmt(format_args!("{term}"))?;
                }
                f.write_str(")")
            }
        }
    }
}
