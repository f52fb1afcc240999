use std::collections::HashMap;

use log::trace;
use thiserror::Error;

use crate::{known, lang::VARIABLE_NAMES, term::Term, term::Variable};

#[derive(PartialEq, Eq, Clone, Debug, Error)]
pub enum PrintError {
    #[error("more than {} variables to name", VARIABLE_NAMES.len())]
    TooManyVariables,
}

/// Letters for variables, handed out in order of first request. Lives for one render.
#[derive(Default)]
struct Naming {
    known: HashMap<Variable, char>,
    next: usize,
}
impl Naming {
    fn get(&mut self, var: Variable) -> Result<char, PrintError> {
        if let Some(name) = self.known.get(&var) {
            return Ok(*name);
        }
        let name = VARIABLE_NAMES
            .chars()
            .nth(self.next)
            .ok_or(PrintError::TooManyVariables)?;
        self.next += 1;
        self.known.insert(var, name);
        Ok(name)
    }
}

/// Strips one pair of parentheses if it encloses the whole text.
pub fn remove_braces(s: &str) -> &str {
    let Some(inner) = s.strip_prefix('(').and_then(|s| s.strip_suffix(')')) else {
        return s;
    };
    let mut depth = 0usize;
    for c in inner.chars() {
        match c {
            '(' => depth += 1,
            ')' if depth == 0 => return s,
            ')' => depth -= 1,
            _ => {}
        }
    }
    if depth == 0 {
        inner
    } else {
        s
    }
}

fn fmt_rec(term: &Term, naming: &mut Naming) -> Result<String, PrintError> {
    Ok(match term {
        Term::Empty => "○".to_string(),
        Term::Constant(name) => format!("{name} "),
        Term::Variable(var) => naming.get(*var)?.to_string(),
        Term::Apply(parts) => {
            let mut text = String::from("(");
            for part in parts {
                text.push_str(&fmt_rec(part, naming)?);
            }
            format!("{})", text.trim_end())
        }
        Term::Abstract(params, body) => {
            // parameters are named before the body so letters follow parameter order
            let params = params
                .iter()
                .map(|param| naming.get(*param))
                .collect::<Result<String, _>>()?;
            let body = fmt_rec(body, naming)?;
            let text = format!("λ{params}.{}", remove_braces(body.trim_end()));
            match known::name_of(&text) {
                Some(name) => {
                    trace!("→ {text}");
                    format!("{name} ")
                }
                None => format!("({text})"),
            }
        }
    })
}

/// Renders a term, naming combinators it recognizes.
pub fn render(term: &Term) -> Result<String, PrintError> {
    let text = fmt_rec(term, &mut Naming::default())?;
    Ok(remove_braces(text.trim_end()).to_string())
}
