/// Terminal implementation of the installer's confirmation prompts.
///
/// Policy for sessions that cannot be answered:
///
/// - stdin is not a terminal: every question is declined without being shown.
/// - stdin reaches EOF (Ctrl-D, closed pipe): the current question and every
///   later one are declined.
///
/// An empty answer means "no"; anything unrecognised re-asks.
use std::io::{self, BufRead, IsTerminal, StdinLock, Stderr, Write};

use tracing::warn;

use crate::install::Prompter;

/// y/N prompts over a line-oriented input.
pub struct TerminalPrompter<R, W> {
    input: R,
    output: W,
    interactive: bool,
    cancelled: bool,
}

impl TerminalPrompter<StdinLock<'static>, Stderr> {
    /// Prompt on stderr, reading answers from stdin.
    #[must_use]
    pub fn stdio() -> Self {
        let stdin = io::stdin();
        let interactive = stdin.is_terminal();
        Self::new(stdin.lock(), io::stderr(), interactive)
    }
}

impl<R: BufRead, W: Write> TerminalPrompter<R, W> {
    #[must_use]
    pub fn new(input: R, output: W, interactive: bool) -> Self {
        Self {
            input,
            output,
            interactive,
            cancelled: false,
        }
    }
}

impl<R: BufRead, W: Write> Prompter for TerminalPrompter<R, W> {
    fn confirm(&mut self, message: &str) -> io::Result<bool> {
        if !self.interactive {
            warn!("stdin is not a terminal; answering no to: {message}");
            return Ok(false);
        }
        if self.cancelled {
            return Ok(false);
        }

        loop {
            write!(self.output, "? {message} (y/N) ")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.output)?;
                self.cancelled = true;
                return Ok(false);
            }

            match line.trim().to_lowercase().as_str() {
                "y" | "yes" => return Ok(true),
                "" | "n" | "no" => return Ok(false),
                _ => writeln!(self.output, "Please answer y or n.")?,
            }
        }
    }
}
