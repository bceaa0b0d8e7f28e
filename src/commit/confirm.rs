//! Yes/no confirmation before committing.

use std::io::{self, BufRead, IsTerminal, Write};

use dialoguer::Input;

/// Asks the user a question and returns the raw answer line.
#[cfg_attr(test, mockall::automock)]
pub trait Confirmer {
    fn ask(&self, question: &str) -> io::Result<String>;
}

/// Reads the answer from the terminal, or one plain line when stdin is piped.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalConfirmer;

impl Confirmer for TerminalConfirmer {
    fn ask(&self, question: &str) -> io::Result<String> {
        if !io::stdin().is_terminal() {
            return read_answer(&mut io::stdin().lock(), &mut io::stdout(), question);
        }

        Input::<String>::new()
            .with_prompt(question)
            .allow_empty(true)
            .interact_text()
            .map_err(io::Error::other)
    }
}

/// Print the question and read a single answer line.
///
/// End of input reads as an empty answer, which declines.
fn read_answer<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    question: &str,
) -> io::Result<String> {
    write!(output, "{question}: ")?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// `y` or `yes` in any case, ignoring surrounding whitespace.
pub fn is_affirmative(answer: &str) -> bool {
    let answer = answer.trim();
    answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
}
