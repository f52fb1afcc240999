use std::io::Write;

use anyhow::Result;
use ariadne::{Color, Fmt, Label, Report, ReportKind, Source};
use clap::{Parser, ValueEnum};
use combinator::{
    check::{Outcome, CHECKS},
    prelude::*,
    EvalError, Options, Session, UnboundLetter, DEFAULT_MAX_STEPS,
};
use log::LevelFilter;
use util::repl;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Unbound {
    Free,
    Constant,
    Reject,
}
impl From<Unbound> for UnboundLetter {
    fn from(unbound: Unbound) -> Self {
        match unbound {
            Unbound::Free => UnboundLetter::Free,
            Unbound::Constant => UnboundLetter::Constant,
            Unbound::Reject => UnboundLetter::Reject,
        }
    }
}

/// Reduce lambda expressions and name the combinators they reduce to.
///
/// Without expressions, starts a REPL.
#[derive(Clone, Debug, Parser)]
#[command(version)]
struct Cli {
    /// Log every reduction step and recognized combinator.
    #[arg(short, long)]
    tracing: bool,
    /// Run the built-in self test.
    #[arg(long)]
    check: bool,
    /// What a letter bound by no lambda stands for.
    #[arg(long, value_name = "MODE", value_enum, default_value_t = Unbound::Free)]
    unbound: Unbound,
    /// Beta steps allowed for one expression.
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_STEPS)]
    max_steps: usize,

    expressions: Vec<String>,
}

impl Cli {
    fn options(&self) -> Options {
        Options {
            unbound: self.unbound.into(),
            max_steps: self.max_steps,
        }
    }
}

fn build_report(e: &Error) -> Report<Span> {
    use chumsky::error::SimpleReason;
    let report = Report::build(ReportKind::Error, (), e.span().start);
    match e.reason() {
        SimpleReason::Unexpected => {
            let found = e.found().map(String::as_str).unwrap_or("end of the input");
            report.with_message(describe(e)).with_label(
                Label::new(e.span())
                    .with_message(format!("Unexpected {}", found.fg(Color::Red)))
                    .with_color(Color::Red),
            )
        }
        SimpleReason::Unclosed { span, delimiter } => report
            .with_message(describe(e))
            .with_label(
                Label::new(span.clone())
                    .with_message(format!(
                        "Unclosed delimiter {}",
                        delimiter.fg(Color::Yellow)
                    ))
                    .with_color(Color::Yellow),
            )
            .with_label(
                Label::new(e.span())
                    .with_message(format!(
                        "Must be closed before this {}",
                        e.found()
                            .map(String::as_str)
                            .unwrap_or("end of the input")
                            .fg(Color::Red)
                    ))
                    .with_color(Color::Red),
            ),
        SimpleReason::Custom(msg) => report.with_message(msg).with_label(
            Label::new(e.span())
                .with_message(format!("{}", msg.fg(Color::Red)))
                .with_color(Color::Red),
        ),
    }
    .finish()
}

fn report(input: &str, error: EvalError) -> Result<()> {
    match error {
        EvalError::Malformed(es) => {
            for e in es {
                build_report(&e).eprint(Source::from(input))?;
            }
        }
        EvalError::Print(e) => eprintln!("{e}"),
    }
    Ok(())
}

/// Evaluates each expression, returning whether all of them succeeded.
fn handle(session: &mut Session, expressions: &[String]) -> Result<bool> {
    let mut ok = true;
    for input in expressions {
        println!("{}", "━".repeat(48));
        println!("{input}");
        match session.evaluate(input) {
            Ok(result) => println!("⇒ {result}"),
            Err(e) => {
                report(input, e)?;
                ok = false;
            }
        }
    }
    Ok(ok)
}

fn check(session: &mut Session) -> Result<bool> {
    let mut ok = true;
    for check in CHECKS {
        match check.run(session) {
            Outcome::Passed(result) => println!("✅ {} → {result}", check.input),
            Outcome::Mismatch(result) => {
                println!("❌ {} → {result} but {}", check.input, check.expected);
                ok = false;
            }
            Outcome::Failed(e) => {
                println!("❌ {} failed", check.input);
                report(check.input, e)?;
                ok = false;
            }
        }
    }
    Ok(ok)
}

struct Repl {
    session: Session,
}
impl repl::Repl for Repl {
    type Error = anyhow::Error;
    const HISTORY: Option<&'static str> = Some("/tmp/combinator.history");
    fn evaluate(&mut self, input: String) -> Result<(), Self::Error> {
        match self.session.evaluate(&input) {
            Ok(result) => println!("⇒ {result}"),
            Err(e) => report(&input, e)?,
        }
        Ok(())
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logger = env_logger::Builder::from_env("LOG");
    logger.format(|buf, record| writeln!(buf, "{}", record.args()));
    // the self test stays quiet regardless of --tracing
    if cli.tracing && !cli.check {
        logger.filter_module("combinator", LevelFilter::Trace);
    }
    logger.init();

    let mut session = Session::new(cli.options());
    let ok = if cli.check {
        check(&mut session)?
    } else if !cli.expressions.is_empty() {
        handle(&mut session, &cli.expressions)?
    } else {
        println!("Hi, this is a combinator REPL. End a line with \\ to continue it.");
        println!();
        repl::start_repl(Repl { session })?;
        true
    };
    if !ok {
        std::process::exit(1);
    }
    Ok(())
}
