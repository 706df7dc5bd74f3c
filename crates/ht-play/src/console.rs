//! Line-oriented input and output.

use std::fmt::Display;
use std::io::{BufRead, Write};

use crate::error::PlayResult;

/// A prompt-and-answer console over any reader and writer.
#[derive(Debug)]
pub struct Console<I, O> {
    input: I,
    output: O,
}

impl<I: BufRead, O: Write> Console<I, O> {
    /// Wrap an input and output.
    pub fn new(input: I, output: O) -> Self {
        Self { input, output }
    }

    /// Print `prompt` and read one trimmed line. `None` at end of input.
    pub fn ask(&mut self, prompt: &str) -> PlayResult<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Print a line.
    pub fn say(&mut self, text: impl Display) -> PlayResult<()> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    /// Print text without a newline and flush, for streamed narration.
    pub fn write_fragment(&mut self, text: &str) -> std::io::Result<()> {
        write!(self.output, "{text}")?;
        self.output.flush()
    }

    /// Give back the output, e.g. to inspect it in tests.
    pub fn into_output(self) -> O {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn ask_trims_and_detects_eof() {
        let mut console = Console::new(Cursor::new("  Aria \n"), Vec::new());
        assert_eq!(console.ask("Name: ").unwrap().as_deref(), Some("Aria"));
        assert_eq!(console.ask("Again: ").unwrap(), None);
        let out = String::from_utf8(console.into_output()).unwrap();
        assert!(out.starts_with("Name: Again: "));
    }
}
