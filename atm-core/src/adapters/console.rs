//! Console adapters: buffered streams and a scripted test double

use std::collections::VecDeque;
use std::io::{BufRead, Write};

use crate::domain::result::{Error, Result};
use crate::ports::Console;

/// Console over any buffered reader and writer
///
/// `StreamConsole::new(stdin.lock(), stdout())` is the terminal binding;
/// `Cursor`/`Vec<u8>` pairs give an in-memory one.
pub struct StreamConsole<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> StreamConsole<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_parts(self) -> (R, W) {
        (self.input, self.output)
    }
}

impl<R: BufRead, W: Write> Console for StreamConsole<R, W> {
    fn read_line(&mut self) -> Result<String> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(Error::InputExhausted);
        }
        Ok(strip_line_terminator(line))
    }

    fn write_text(&mut self, text: &str) -> Result<()> {
        self.output.write_all(text.as_bytes())?;
        self.output.flush()?;
        Ok(())
    }
}

/// Remove exactly one trailing `\n` and the `\r` before it, if any
fn strip_line_terminator(mut line: String) -> String {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    line
}

/// Console fed from a fixed list of lines, capturing everything written
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    lines: VecDeque<String>,
    output: String,
}

impl ScriptedConsole {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            output: String::new(),
        }
    }

    /// Everything written so far
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Lines not consumed yet
    pub fn remaining(&self) -> usize {
        self.lines.len()
    }
}

impl Console for ScriptedConsole {
    fn read_line(&mut self) -> Result<String> {
        self.lines.pop_front().ok_or(Error::InputExhausted)
    }

    fn write_text(&mut self, text: &str) -> Result<()> {
        self.output.push_str(text);
        Ok(())
    }
}
