use std::io::{BufRead, Write};

use crate::error::CliError;

/// Line-oriented prompting over any reader/writer pair.
///
/// Numeric reads loop until the input parses; only end of input or an IO
/// failure gets out.
#[derive(Debug)]
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn say(&mut self, line: impl core::fmt::Display) -> Result<(), CliError> {
        writeln!(self.output, "{line}")?;
        Ok(())
    }

    /// Print `message` and read one trimmed line.
    ///
    /// Bytes that are not UTF-8 become U+FFFD, so a garbled line is just
    /// malformed input rather than an IO failure.
    pub fn line(&mut self, message: &str) -> Result<String, CliError> {
        write!(self.output, "{message}")?;
        self.output.flush()?;

        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            return Err(CliError::Eof);
        }
        Ok(String::from_utf8_lossy(&buf).trim().to_string())
    }

    pub fn int(&mut self, message: &str) -> Result<i64, CliError> {
        loop {
            match self.line(message)?.parse::<i64>() {
                Ok(value) => return Ok(value),
                Err(_) => self.say("Please enter a valid integer.")?,
            }
        }
    }

    /// Reads a finite decimal; "NaN" and "inf" count as malformed.
    pub fn decimal(&mut self, message: &str) -> Result<f64, CliError> {
        loop {
            match self.line(message)?.parse::<f64>() {
                Ok(value) if value.is_finite() => return Ok(value),
                _ => self.say("Please enter a valid number.")?,
            }
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}
