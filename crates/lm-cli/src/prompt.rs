//! Line-based prompts

use std::io::{self, BufRead, StdinLock, Write};
use std::ops::RangeInclusive;
use std::str::FromStr;

use anyhow::{Context, Result, bail};

/// Reads answers one line at a time
pub struct Input<R> {
    reader: R,
}

impl Input<StdinLock<'static>> {
    pub fn stdin() -> Self {
        Self::new(io::stdin().lock())
    }
}

impl<R: BufRead> Input<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Next line without its terminator, `None` at end of input
    pub fn line(&mut self) -> Result<Option<String>> {
        let mut buf = String::new();
        let read = self
            .reader
            .read_line(&mut buf)
            .context("Failed to read from stdin")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(buf.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Ask until the answer parses and lies in `range`
    pub fn ask<T>(&mut self, prompt: &str, range: RangeInclusive<T>, error: &str) -> Result<T>
    where
        T: FromStr + PartialOrd,
    {
        loop {
            print!("{prompt}");
            io::stdout().flush().context("Failed to flush stdout")?;

            let Some(line) = self.line()? else {
                bail!("Input closed before a value was entered");
            };
            match line.trim().parse::<T>() {
                Ok(value) if range.contains(&value) => return Ok(value),
                _ => eprintln!("***ERROR: {error} !!!"),
            }
        }
    }
}
