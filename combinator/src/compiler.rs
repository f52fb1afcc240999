//! Resolves names in the surface syntax and builds normalized terms.

use std::collections::HashMap;

use rpds::HashTrieMap;

use crate::{
    known, lang, parser,
    prelude::*,
    reduce::Reducer,
    term::{Term, Variable},
};

/// What a letter denotes when no enclosing lambda binds it.
#[derive(PartialEq, Eq, Clone, Copy, Default, Debug)]
pub enum UnboundLetter {
    /// A free variable, shared by every unbound use of the letter in one input.
    #[default]
    Free,
    /// A constant named by the letter.
    Constant,
    /// An error.
    Reject,
}

type Scope = HashTrieMap<char, Variable>;

pub struct Compiler<'r> {
    reducer: &'r mut Reducer,
    unbound: UnboundLetter,
    free: HashMap<char, Variable>,
}

impl<'r> Compiler<'r> {
    pub fn new(reducer: &'r mut Reducer, unbound: UnboundLetter) -> Self {
        Self {
            reducer,
            unbound,
            free: HashMap::new(),
        }
    }

    pub fn compile(&mut self, term: &Spanned<lang::Term>) -> Result<Term> {
        self.compile_in(&Scope::new(), term)
    }

    fn compile_in(&mut self, scope: &Scope, term: &Spanned<lang::Term>) -> Result<Term> {
        match term.value() {
            lang::Term::Letter(c) => self.resolve(scope, *c, term.span()),
            lang::Term::Symbol(name) => match known::expansion(name) {
                Some(text) => self.expand(name, text, term.span()),
                None => Ok(Term::Constant(name.clone())),
            },
            lang::Term::Abstract(params, body) => {
                let mut inner = scope.clone();
                let mut vars = Vec::with_capacity(params.len());
                for param in params {
                    let var = self.reducer.fresh();
                    inner = inner.insert(*param.value(), var);
                    vars.push(var);
                }
                let body = self.compile_in(&inner, body)?;
                self.reducer
                    .abstraction(vars, body)
                    .map_err(|e| Error::custom(term.span(), e))
            }
            lang::Term::Sequence(terms) => {
                let Some((first, rest)) = terms.split_first() else {
                    return Ok(Term::Empty);
                };
                let first = self.compile_in(scope, first)?;
                rest.iter().try_fold(first, |applied, arg| {
                    let arg = self.compile_in(scope, arg)?;
                    self.reducer
                        .apply(vec![applied, arg])
                        .map_err(|e| Error::custom(term.span(), e))
                })
            }
        }
    }

    fn resolve(&mut self, scope: &Scope, c: char, span: Span) -> Result<Term> {
        if let Some(var) = scope.get(&c) {
            return Ok(Term::Variable(*var));
        }
        match self.unbound {
            UnboundLetter::Free => {
                let reducer = &mut self.reducer;
                let var = *self.free.entry(c).or_insert_with(|| reducer.fresh());
                Ok(Term::Variable(var))
            }
            UnboundLetter::Constant => Ok(Term::constant(&c.to_string())),
            UnboundLetter::Reject => Err(Error::custom(span, format!("unknown variable {c}"))),
        }
    }

    /// Builds a fresh copy of a known combinator from its text.
    fn expand(&mut self, name: &str, text: &str, span: Span) -> Result<Term> {
        let surface = parser::parse(text)
            .map_err(|_| Error::custom(span.clone(), format!("cannot expand combinator {name}")))?;
        self.compile_in(&Scope::new(), &surface)
            .map_err(|e| Error::custom(span, format!("{name}: {}", describe(&e))))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn compile(input: &str, unbound: UnboundLetter) -> Result<Term> {
        let surface = parser::parse(input).map_err(|mut es| es.remove(0))?;
        let mut reducer = Reducer::default();
        Compiler::new(&mut reducer, unbound).compile(&surface)
    }

    #[test]
    fn test_expand() {
        assert_eq!(compile("K", UnboundLetter::Free).unwrap().to_string(), "K");
        assert_eq!(
            compile("NotX", UnboundLetter::Free).unwrap(),
            Term::constant("NotX")
        );
        // the expansion is an abstraction, so it reduces right away
        assert_eq!(
            compile("K NotX", UnboundLetter::Free).unwrap().to_string(),
            "λa.NotX"
        );
    }

    #[test]
    fn test_unbound_letters() {
        let term = compile("f f", UnboundLetter::Free).unwrap();
        match &term {
            Term::Apply(parts) => assert_eq!(parts[0], parts[1]),
            other => panic!("expected an application, got {}", other.raw()),
        }
        // a binder shadows the free letter
        assert_eq!(
            compile("f (λf.f f)", UnboundLetter::Free).unwrap().to_string(),
            "a(λb.bb)"
        );
        assert_eq!(
            compile("f g", UnboundLetter::Constant).unwrap(),
            Term::Apply(vec![Term::constant("f"), Term::constant("g")])
        );
        assert_eq!(
            compile("λx.x", UnboundLetter::Reject).unwrap().to_string(),
            "I"
        );
        let error = compile("λx.y", UnboundLetter::Reject).unwrap_err();
        assert_eq!(describe(&error), "unknown variable y");
        assert_eq!(error.span(), 3..4);
    }

    #[test]
    fn test_empty_parameters() {
        let error = compile("a (λ.a)", UnboundLetter::Free).unwrap_err();
        assert_eq!(describe(&error), "lambda parameter list cannot be empty");
    }
}
