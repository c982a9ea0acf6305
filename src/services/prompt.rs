use crate::services::installer::InstallError;
use std::fmt::Display;
use std::io::{BufRead, Write};

/// Line-oriented terminal session: prompts go to `out`, answers come from
/// `input`. End of input is treated as the operator abandoning the run.
pub struct Console<R, W> {
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, out: W) -> Self {
        Self { input, out }
    }

    /// Prints `prompt` without a newline and returns the answer with the
    /// line terminator removed.
    pub fn ask(&mut self, prompt: &str) -> anyhow::Result<String> {
        write!(self.out, "{}", prompt)?;
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(InstallError::Interrupted.into());
        }
        Ok(line.trim_end_matches(['\n', '\r']).to_string())
    }

    pub fn say(&mut self, line: impl Display) -> anyhow::Result<()> {
        writeln!(self.out, "{}", line)?;
        Ok(())
    }

    pub fn blank(&mut self) -> anyhow::Result<()> {
        writeln!(self.out)?;
        Ok(())
    }

    pub fn out(&mut self) -> &mut W {
        &mut self.out
    }

    pub fn into_output(self) -> W {
        self.out
    }
}
