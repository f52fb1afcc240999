use std::{collections::HashMap, rc::Rc};

use crate::prelude::*;

/// Identity of a bound or free variable. Display names are assigned only when printing.
#[derive(PartialEq, Eq, Hash, PartialOrd, Ord, Clone, Copy, derive_more::Display, Debug)]
#[display(fmt = "{_0}")]
pub struct Variable(u64);

/// Hands out variables that are unique for the lifetime of the allocator.
///
/// Terms built from different allocators must not be mixed.
#[derive(Default, Debug)]
pub struct VarAllocator {
    last: u64,
}
impl VarAllocator {
    pub fn fresh(&mut self) -> Variable {
        self.last += 1;
        Variable(self.last)
    }
}

/// A lambda term.
///
/// Terms produced by [`crate::reduce::Reducer`] keep these shapes:
/// the head of an `Apply` is never an `Apply` or an `Abstract`,
/// an `Apply` has at least two parts,
/// and the body of an `Abstract` is never an `Abstract`.
#[derive(PartialEq, Eq, Clone, Debug)]
pub enum Term {
    /// No term at all, the result of applying nothing.
    Empty,
    /// An opaque symbol.
    Constant(Identifier),
    Variable(Variable),
    /// `t0 t1 ... tn`, `t0` applied to the remaining parts left to right
    Apply(Vec<Self>),
    /// `λx1...xn. t`
    Abstract(Vec<Variable>, Rc<Self>),
}

impl Term {
    pub fn constant(name: &str) -> Self {
        Term::Constant(Identifier::new(name.to_string()))
    }

    /// Whether `var` occurs free in this term.
    pub fn is_free(&self, var: Variable) -> bool {
        match self {
            Term::Empty | Term::Constant(_) => false,
            Term::Variable(v) => *v == var,
            Term::Apply(parts) => parts.iter().any(|part| part.is_free(var)),
            Term::Abstract(params, body) => !params.contains(&var) && body.is_free(var),
        }
    }

    /// Copies the term, binding every abstraction to fresh variables.
    ///
    /// Free variables and constants are kept as they are.
    pub fn duplicate(&self, vars: &mut VarAllocator) -> Self {
        fn rec(term: &Term, renamed: &mut HashMap<Variable, Variable>, vars: &mut VarAllocator) -> Term {
            match term {
                Term::Empty | Term::Constant(_) => term.clone(),
                Term::Variable(v) => Term::Variable(renamed.get(v).copied().unwrap_or(*v)),
                Term::Apply(parts) => {
                    Term::Apply(parts.iter().map(|part| rec(part, renamed, vars)).collect())
                }
                Term::Abstract(params, body) => {
                    let params = params
                        .iter()
                        .map(|param| {
                            let fresh = vars.fresh();
                            renamed.insert(*param, fresh);
                            fresh
                        })
                        .collect();
                    Term::Abstract(params, rec(body, renamed, vars).into())
                }
            }
        }
        rec(self, &mut HashMap::new(), vars)
    }

    /// Structural form showing variable identities, used in trace output.
    pub fn raw(&self) -> Raw<'_> {
        Raw(self)
    }
}

impl std::fmt::Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rendered = crate::print::render(self).map_err(|_| std::fmt::Error)?;
        f.write_str(&rendered)
    }
}

pub struct Raw<'a>(&'a Term);

impl std::fmt::Display for Raw<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Term::Empty => f.write_str("{}"),
            Term::Constant(name) => f.write_fmt(format_args!("{{const {name}}}")),
            Term::Variable(v) => f.write_fmt(format_args!("{{var {v}}}")),
            Term::Apply(parts) => {
                f.write_str("{App")?;
                for part in parts {
                    f.write_fmt(format_args!(" {}", part.raw()))?;
                }
                f.write_str("}")
            }
            Term::Abstract(params, body) => {
                f.write_str("{lambda")?;
                for param in params {
                    f.write_fmt(format_args!(" {{var {param}}}"))?;
                }
                f.write_fmt(format_args!(".{}}}", body.raw()))
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_is_free() {
        let mut vars = VarAllocator::default();
        let (x, y) = (vars.fresh(), vars.fresh());
        let term = Term::Abstract(
            vec![x],
            Term::Apply(vec![Term::Variable(x), Term::Variable(y)]).into(),
        );
        assert!(term.is_free(y));
        assert!(!term.is_free(x));
        assert!(!Term::constant("x").is_free(x));
        assert!(!Term::Empty.is_free(x));
    }

    #[test]
    fn test_duplicate() {
        let mut vars = VarAllocator::default();
        let (x, free) = (vars.fresh(), vars.fresh());
        let term = Term::Abstract(
            vec![x],
            Term::Apply(vec![
                Term::Variable(x),
                Term::Variable(free),
                Term::constant("K"),
            ])
            .into(),
        );
        let copy = term.duplicate(&mut vars);
        assert_ne!(copy, term);
        assert_eq!(copy.to_string(), term.to_string());
        match &copy {
            Term::Abstract(params, body) => {
                assert_eq!(params.len(), 1);
                assert_ne!(params[0], x);
                assert!(body.is_free(params[0]));
                assert!(body.is_free(free));
                assert!(!body.is_free(x));
            }
            other => panic!("expected an abstraction, got {}", other.raw()),
        }
    }

    #[test]
    fn test_raw() {
        let mut vars = VarAllocator::default();
        let x = vars.fresh();
        let term = Term::Abstract(
            vec![x],
            Term::Apply(vec![Term::constant("f"), Term::Variable(x)]).into(),
        );
        assert_eq!(term.raw().to_string(), "{lambda {var 1}.{App {const f} {var 1}}}");
        assert_eq!(Term::Empty.raw().to_string(), "{}");
    }
}
