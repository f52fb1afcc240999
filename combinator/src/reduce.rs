//! Normalizing constructors: building an application beta-reduces its head,
//! building an abstraction eta-contracts it.

use std::rc::Rc;

use log::trace;
use thiserror::Error;

use crate::term::{Term, VarAllocator, Variable};

pub const DEFAULT_MAX_STEPS: usize = 256;

#[derive(PartialEq, Eq, Clone, Debug, Error)]
pub enum ReduceError {
    #[error("lambda parameter list cannot be empty")]
    EmptyParameters,
    #[error("no normal form reached within {0} beta steps")]
    StepLimit(usize),
}
pub type Result<T, E = ReduceError> = std::result::Result<T, E>;

#[derive(Debug)]
pub struct Reducer {
    vars: VarAllocator,
    max_steps: usize,
    steps: usize,
}

impl Default for Reducer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_STEPS)
    }
}

impl Reducer {
    pub fn new(max_steps: usize) -> Self {
        Self {
            vars: VarAllocator::default(),
            max_steps,
            steps: 0,
        }
    }

    pub fn fresh(&mut self) -> Variable {
        self.vars.fresh()
    }

    /// Starts a new budget of beta steps. Variables stay unique across budgets.
    pub fn reset_budget(&mut self) {
        self.steps = 0;
    }

    fn spend_step(&mut self) -> Result<()> {
        self.steps += 1;
        if self.steps > self.max_steps {
            return Err(ReduceError::StepLimit(self.max_steps));
        }
        Ok(())
    }

    /// Replaces every free occurrence of `var` in `term` by its own copy of `replacement`.
    pub fn substitute(&mut self, term: &Term, var: Variable, replacement: &Term) -> Result<Term> {
        if !term.is_free(var) {
            return Ok(term.clone());
        }
        match term {
            Term::Variable(_) => Ok(replacement.duplicate(&mut self.vars)),
            Term::Apply(parts) => {
                let parts = parts
                    .iter()
                    .map(|part| self.substitute(part, var, replacement))
                    .collect::<Result<Vec<_>>>()?;
                self.apply(parts)
            }
            Term::Abstract(params, body) => {
                let body = self.substitute(body, var, replacement)?;
                self.abstraction(params.clone(), body)
            }
            Term::Empty | Term::Constant(_) => unreachable!("nothing is free in {}", term.raw()),
        }
    }

    /// Applies `parts[0]` to the remaining parts, reducing while the head is an abstraction.
    ///
    /// A single part is returned as is, no parts at all give [`Term::Empty`].
    pub fn apply(&mut self, parts: Vec<Term>) -> Result<Term> {
        if !log::log_enabled!(log::Level::Trace) {
            return self.reduce_head(parts);
        }
        let inputs = parts
            .iter()
            .map(|part| part.raw().to_string())
            .collect::<Vec<_>>()
            .join(" ");
        let result = self.reduce_head(parts)?;
        trace!("apply {inputs} -> {}", result.raw());
        Ok(result)
    }

    fn reduce_head(&mut self, mut parts: Vec<Term>) -> Result<Term> {
        loop {
            if parts.len() < 2 {
                return Ok(parts.pop().unwrap_or(Term::Empty));
            }
            if let Term::Apply(_) = &parts[0] {
                if let Term::Apply(mut head) = parts.remove(0) {
                    head.append(&mut parts);
                    parts = head;
                }
                continue;
            }
            let Term::Abstract(params, body) = &parts[0] else {
                return Ok(Term::Apply(parts));
            };
            let Some((param, rest)) = params.split_first() else {
                return Err(ReduceError::EmptyParameters);
            };
            self.spend_step()?;
            let reduced = self.substitute(body, *param, &parts[1])?;
            let head = if rest.is_empty() {
                reduced
            } else {
                self.abstraction(rest.to_vec(), reduced)?
            };
            parts.splice(0..2, std::iter::once(head));
        }
    }

    /// Builds `λparams. body`, merging a nested abstraction in `body`
    /// and contracting `λx1...xn. f x1 ... xn` to `f`.
    pub fn abstraction(&mut self, mut params: Vec<Variable>, body: Term) -> Result<Term> {
        if params.is_empty() {
            return Err(ReduceError::EmptyParameters);
        }
        let body = match body {
            Term::Abstract(inner, body) => {
                params.extend(inner);
                body
            }
            body => Rc::new(body),
        };
        if let Term::Apply(parts) = body.as_ref() {
            if let Some(head) = eta_head(&params, parts) {
                return Ok(head.clone());
            }
        }
        Ok(Term::Abstract(params, body))
    }
}

fn eta_head<'t>(params: &[Variable], parts: &'t [Term]) -> Option<&'t Term> {
    let (head, args) = parts.split_first()?;
    let trailing = args.len() == params.len()
        && args
            .iter()
            .zip(params)
            .all(|(arg, param)| matches!(arg, Term::Variable(v) if v == param));
    (trailing && !params.iter().any(|param| head.is_free(*param))).then_some(head)
}
