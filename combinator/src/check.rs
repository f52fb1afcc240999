//! Built-in self test: inputs and the rendering they must reduce to.

use crate::{EvalError, Session};

pub struct Check {
    pub input: &'static str,
    pub expected: &'static str,
}

const fn check(input: &'static str, expected: &'static str) -> Check {
    Check { input, expected }
}

pub const CHECKS: &[Check] = &[
    check("K", "K"),
    check("S K K", "I"),
    check("K I", "π"),
    check("K (S K K)", "π"),
    check("B B", "D"),
    check("B D", "D₁"),
    check("B (B B)", "D₁"),
    check("D D", "D₂"),
    check("B B D", "D₂"),
    check("D (B B)", "D₂"),
    check("B B (B B)", "D₂"),
    check("B B₁", "E"),
    check("B (D B)", "E"),
    check("B (B B B)", "E"),
    check("D B", "B₁"),
    check("D B₁", "B₂"),
    check("B D B", "B₃"),
    check("S(B B S)(K K)", "C"),
    check("C I", "T"),
    check("S(K S)K", "B"),
    check("B₁ S B", "Φ"),
    check("B Φ Φ", "Φ₁"),
];

pub enum Outcome {
    Passed(String),
    Mismatch(String),
    Failed(EvalError),
}

impl Check {
    pub fn run(&self, session: &mut Session) -> Outcome {
        match session.evaluate(self.input) {
            Ok(result) if result == self.expected => Outcome::Passed(result),
            Ok(result) => Outcome::Mismatch(result),
            Err(e) => Outcome::Failed(e),
        }
    }
}
