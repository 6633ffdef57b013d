//! Terminal prompts
//!
//! Implements the core's `Interact` port on top of stdin. Questions are
//! written to stderr so stdout stays clean for `--json`.

use std::io::{self, BufRead, Write};

use todo_md_core::{Choice, Interact};

use crate::output::Output;

/// Prompts on the controlling terminal
pub struct TerminalPrompt<'a> {
    output: &'a Output,
    /// Answer yes to confirmations without asking (--yes)
    assume_yes: bool,
    /// Whether stdin is a TTY
    tty: bool,
}

impl<'a> TerminalPrompt<'a> {
    pub fn new(output: &'a Output, assume_yes: bool) -> Self {
        Self {
            output,
            assume_yes,
            tty: atty::is(atty::Stream::Stdin),
        }
    }
}

impl Interact for TerminalPrompt<'_> {
    fn confirm(&mut self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        // Nobody to ask
        if !self.tty {
            return false;
        }

        let answer = ask(&format!("{} [y/N] ", message)).unwrap_or_default();
        is_yes(&answer)
    }

    fn choose(&mut self, query: &str, candidates: &[String], allow_new: bool) -> Choice {
        if !self.tty {
            return Choice::Abort;
        }

        eprintln!("No such list named as '{}'.", query);
        eprintln!("Possible lists you'd like to refer to:");
        for (i, name) in candidates.iter().enumerate() {
            eprintln!("{}. {}", i + 1, name);
        }
        if allow_new {
            eprintln!("Use 0 for a new list '{}', simple <Enter> to abort", query);
        } else {
            eprintln!("Simple <Enter> to abort");
        }

        match ask("Your selection: ") {
            Ok(input) => Choice::parse(&input, candidates.len(), allow_new),
            Err(_) => Choice::Abort,
        }
    }

    fn notice(&mut self, message: &str) {
        self.output.message(message);
    }

    fn is_interactive(&self) -> bool {
        self.tty
    }
}

/// Print `prompt` and read one line
///
/// End of input reads as an empty answer.
fn ask(prompt: &str) -> io::Result<String> {
    eprint!("{}", prompt);
    io::stderr().flush()?;

    let mut input = String::new();
    io::stdin().lock().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.to_lowercase().as_str(), "y" | "yes")
}
