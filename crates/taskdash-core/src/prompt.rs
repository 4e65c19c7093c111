use std::io::{self, BufRead, Stderr, StdinLock, Write};

use tracing::debug;

/// Blocking user interaction used before destructive or rejected actions.
pub trait Prompter {
    /// Yes/no question; anything but an explicit yes counts as no.
    fn confirm(&mut self, message: &str) -> bool;

    fn alert(&mut self, message: &str);
}

pub struct TerminalPrompter<R, W> {
    input: R,
    output: W,
}

impl TerminalPrompter<StdinLock<'static>, Stderr> {
    pub fn new() -> Self {
        Self {
            input: io::stdin().lock(),
            output: io::stderr(),
        }
    }
}

impl Default for TerminalPrompter<StdinLock<'static>, Stderr> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: BufRead, W: Write> TerminalPrompter<R, W> {
    pub fn with_io(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Prompter for TerminalPrompter<R, W> {
    fn confirm(&mut self, message: &str) -> bool {
        if write!(self.output, "{message} [y/N] ").is_err() || self.output.flush().is_err() {
            return false;
        }

        let mut answer = String::new();
        if let Err(err) = self.input.read_line(&mut answer) {
            debug!(error = %err, "confirmation read failed; treating as no");
            return false;
        }

        matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }

    fn alert(&mut self, message: &str) {
        if let Err(err) = writeln!(self.output, "{message}") {
            debug!(error = %err, "failed to write alert");
        }
    }
}
