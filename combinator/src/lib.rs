//! Reduction of untyped lambda expressions with named combinators.
//!
//! Text is parsed into a [`term::Term`] that is already reduced: every
//! application beta-reduces its head as it is built and every abstraction is
//! eta-contracted. Rendering names bound variables `a`, `b`, ... in order
//! and replaces abstractions that match a [known combinator](known) by its name.
//!
//! ```
//! use combinator::Session;
//!
//! let mut session = Session::default();
//! assert_eq!(session.evaluate("S K K").unwrap(), "I");
//! assert_eq!(session.evaluate("B B").unwrap(), "D");
//! ```

pub mod check;
pub mod compiler;
pub mod known;
pub mod lang;
pub mod parser;
pub mod prelude;
pub mod print;
pub mod reduce;
pub mod term;

use thiserror::Error;

pub use compiler::UnboundLetter;
use prelude::*;
pub use print::{render, PrintError};
pub use reduce::DEFAULT_MAX_STEPS;
use reduce::Reducer;
pub use term::Term;

#[derive(Debug, Error)]
pub enum EvalError {
    #[error("{}", .0.iter().map(describe).collect::<Vec<_>>().join("; "))]
    Malformed(Vec<Error>),
    #[error(transparent)]
    Print(#[from] PrintError),
}

#[derive(Clone, Copy, Debug)]
pub struct Options {
    pub unbound: UnboundLetter,
    /// Beta steps allowed for one input.
    pub max_steps: usize,
}
impl Default for Options {
    fn default() -> Self {
        Self {
            unbound: UnboundLetter::default(),
            max_steps: DEFAULT_MAX_STEPS,
        }
    }
}

/// Parses inputs into terms whose variables never collide with each other.
#[derive(Debug)]
pub struct Session {
    reducer: Reducer,
    unbound: UnboundLetter,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Options::default())
    }
}

impl Session {
    pub fn new(options: Options) -> Self {
        Self {
            reducer: Reducer::new(options.max_steps),
            unbound: options.unbound,
        }
    }

    pub fn parse(&mut self, input: &str) -> Result<Term, Vec<Error>> {
        let surface = parser::parse(input)?;
        self.reducer.reset_budget();
        compiler::Compiler::new(&mut self.reducer, self.unbound)
            .compile(&surface)
            .map_err(|e| vec![e])
    }

    /// Parses and renders `input`.
    pub fn evaluate(&mut self, input: &str) -> Result<String, EvalError> {
        let term = self.parse(input).map_err(EvalError::Malformed)?;
        Ok(render(&term)?)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn eval(input: &str) -> String {
        Session::default().evaluate(input).unwrap()
    }

    #[test]
    fn test_known_collapse() {
        assert_eq!(eval("S K K"), "I");
        assert_eq!(eval("K I"), "π");
        assert_eq!(eval("B B"), "D");
    }

    #[test]
    fn test_eta_exact_match_only() {
        assert_eq!(eval("λabcd.MMM abcd"), "MMM");
        assert_eq!(eval("λabcd.MMM abdc"), "λabcd.MMM abdc");
        assert_eq!(eval("λabcd.MMM abc"), "λabcd.MMM abc");
        assert_eq!(eval("λx.NotX x"), "NotX");
    }

    #[test]
    fn test_grouping() {
        assert_eq!(eval("B (B B)"), "D₁");
        assert_eq!(eval("B B B"), "B₁");
        assert_eq!(eval("(B B) B"), eval("B B B"));
        assert_eq!(eval("((B) B B)"), eval("B B B"));
    }

    #[test]
    fn test_constants() {
        assert_eq!(eval("F"), "F");
        assert_eq!(eval("NotX"), "NotX");
        assert_eq!(eval("NotX Y Z"), "NotX Y Z");
        assert_eq!(eval("K NotX Y"), "NotX");
        let mut session = Session::new(Options {
            unbound: UnboundLetter::Constant,
            ..Options::default()
        });
        assert_eq!(session.evaluate("f").unwrap(), "f");
        assert_eq!(session.evaluate("f g").unwrap(), "f g");
    }

    #[test]
    fn test_free_variables() {
        assert_eq!(eval("f"), "a");
        assert_eq!(eval("f f"), "aa");
        assert_eq!(eval("f g"), "ab");
        assert_eq!(eval("λx.x f"), "λa.ab");
        assert_eq!(eval("X K f"), "X K c");
    }

    #[test]
    fn test_capture_avoidance() {
        // the free y must not be captured by the inner binder of the same name
        assert_eq!(eval("(λxy.y x) y"), "λa.ab");
        assert_eq!(eval("(λxy.x y) y"), "a");
        // reused letters in nested lambdas stay distinct bindings
        assert_eq!(eval("(λx.λx.x) A B"), "B");
        assert_eq!(eval("(λf.f f) (λxy.y x)"), "λa.a(λbc.cb)");
    }

    #[test]
    fn test_rendering_is_stable() {
        let mut session = Session::default();
        for input in [
            "S K K",
            "λx.x f",
            "λabcd.MMM abdc",
            "f (λf.f f) g",
            "X K f",
            "a K b",
            "S(B B S)(K K)",
            "NotX (λx.x Y) z",
        ] {
            let rendered = session.evaluate(input).unwrap();
            assert_eq!(session.evaluate(&rendered).unwrap(), rendered, "{input}");
        }
    }

    #[test]
    fn test_malformed() {
        let mut session = Session::default();
        for input in ["(S K", "S K)", "λ.a", "λA.a", "", "S . K"] {
            assert!(
                matches!(session.evaluate(input), Err(EvalError::Malformed(_))),
                "{input}"
            );
        }
        // a failure does not spoil the session
        assert_eq!(session.evaluate("C I").unwrap(), "T");
    }

    #[test]
    fn test_no_normal_form() {
        let mut session = Session::new(Options {
            max_steps: 32,
            ..Options::default()
        });
        let error = session.evaluate("M M").unwrap_err();
        assert!(error.to_string().contains("32 beta steps"), "{error}");
        assert!(session.evaluate("(λa.aa)(λa.aa)").is_err());
        assert_eq!(session.evaluate("M I").unwrap(), "I");
    }

    #[test]
    fn test_too_many_variables() {
        let letters = lang::VARIABLE_NAMES
            .chars()
            .map(String::from)
            .collect::<Vec<_>>()
            .join(" ");
        let mut session = Session::default();
        assert!(session.evaluate(&letters).is_ok());
        let input = format!("NotX ({letters}) (λx.x Y)");
        assert!(matches!(
            session.evaluate(&input),
            Err(EvalError::Print(PrintError::TooManyVariables))
        ));
    }
}
