//! Console input and output
//!
//! The `Ui` trait is the seam between the core and the terminal: a blocking
//! line source plus a text sink. `ConsoleUi` implements it over any buffered
//! reader and writer, so tests can drive a whole session from a byte slice.

use crate::types::LendingError;
use std::io::{self, BufRead, Write};

const DIVIDER: &str = "____________________________________________________________";

/// Line-input source and text-output sink
pub trait Ui {
    /// Block until the next line of input is available
    ///
    /// # Returns
    ///
    /// * `Ok(Some(line))` - The line without its terminator
    /// * `Ok(None)` - The input is exhausted
    fn read_input(&mut self) -> Result<Option<String>, LendingError>;

    /// Print a normal response
    fn print_response(&mut self, message: &str);

    /// Print an error message
    fn print_error(&mut self, message: &str);
}

/// `Ui` over a reader and a writer
///
/// Output failures are not propagated: a console that can no longer be
/// written to leaves nothing useful to report the failure on.
pub struct ConsoleUi<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ConsoleUi<R, W> {
    pub fn new(input: R, output: W) -> Self {
        ConsoleUi { input, output }
    }

    /// Give back the writer, e.g. to inspect captured output
    pub fn into_output(self) -> W {
        self.output
    }

    fn print_block(&mut self, message: &str) {
        let _ = writeln!(self.output, "{}\n{}\n{}", DIVIDER, message, DIVIDER);
        let _ = self.output.flush();
    }
}

impl ConsoleUi<io::StdinLock<'static>, io::Stdout> {
    /// Console bound to the process's standard input and output
    pub fn stdio() -> Self {
        ConsoleUi::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Ui for ConsoleUi<R, W> {
    fn read_input(&mut self) -> Result<Option<String>, LendingError> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    fn print_response(&mut self, message: &str) {
        self.print_block(message);
    }

    fn print_error(&mut self, message: &str) {
        self.print_block(&format!("Error: {}", message));
    }
}
