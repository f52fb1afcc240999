use rustyline::{error::ReadlineError, Editor};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error<E> {
    #[error(transparent)]
    Readline(ReadlineError),
    #[error("Eval failed: {0:?}")]
    EvalError(E),
}

pub trait Repl {
    type Error: std::fmt::Debug;
    const HISTORY: Option<&'static str> = None;
    const PROMPT: &'static str = ">> ";
    const CONTINUATION: &'static str = ".. ";
    fn evaluate(&mut self, input: String) -> Result<(), Self::Error>;
}

/// Reads one logical input. A line ending with `\` continues on the next line.
///
/// Returns `Ok(None)` once the user interrupts or closes the input.
fn read_input<R: Repl>(editor: &mut Editor<()>) -> Result<Option<String>, ReadlineError> {
    let mut input = String::new();
    loop {
        let prompt = if input.is_empty() {
            R::PROMPT
        } else {
            R::CONTINUATION
        };
        match editor.readline(prompt) {
            Ok(mut line) if line.ends_with('\\') => {
                line.pop();
                input.push_str(&line);
                input.push('\n');
            }
            Ok(line) => {
                input.push_str(&line);
                return Ok(Some(input));
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => return Ok(None),
            Err(e) => return Err(e),
        }
    }
}

pub fn start_repl<R: Repl>(mut repl: R) -> Result<(), Error<R::Error>> {
    let mut editor = Editor::<()>::new();
    if let Some(history) = R::HISTORY {
        editor.load_history(history).ok();
    }
    while let Some(input) = read_input::<R>(&mut editor).map_err(Error::Readline)? {
        if input.trim().is_empty() {
            continue;
        }
        editor.add_history_entry(input.as_str());
        repl.evaluate(input).map_err(Error::EvalError)?;
        if let Some(history) = R::HISTORY {
            editor.save_history(history).map_err(Error::Readline)?;
        }
    }
    println!("Bye!");
    Ok(())
}
