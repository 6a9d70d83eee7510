//! Interactive region prompts.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InputError {
    #[error("Input closed while waiting for: {0}")]
    Eof(String),
    #[error("Failed to read input: {0}")]
    Io(#[from] io::Error),
}

/// Source of region names typed by the user.
pub trait RegionSource {
    /// Show `prompt` and return the answer with surrounding whitespace removed.
    fn ask(&mut self, prompt: &str) -> Result<String, InputError>;
}

/// Console prompts: writes to stdout, reads a line from stdin.
pub struct StdinSource<R = io::StdinLock<'static>, W = io::Stdout> {
    reader: R,
    writer: W,
}

impl StdinSource {
    pub fn new() -> Self {
        Self {
            reader: io::stdin().lock(),
            writer: io::stdout(),
        }
    }
}

impl Default for StdinSource {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: BufRead, W: Write> StdinSource<R, W> {
    pub fn with_streams(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }
}

impl<R: BufRead, W: Write> RegionSource for StdinSource<R, W> {
    fn ask(&mut self, prompt: &str) -> Result<String, InputError> {
        write!(self.writer, "{prompt}")?;
        self.writer.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(InputError::Eof(prompt.trim().to_string()));
        }
        Ok(line.trim().to_string())
    }
}

/// Fixed answers, handed out in order. Prompts are recorded for inspection.
#[derive(Debug, Default)]
pub struct ScriptedSource {
    answers: VecDeque<String>,
    pub prompts: Vec<String>,
}

impl ScriptedSource {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
        }
    }
}

impl RegionSource for ScriptedSource {
    fn ask(&mut self, prompt: &str) -> Result<String, InputError> {
        self.prompts.push(prompt.to_string());
        self.answers
            .pop_front()
            .map(|answer| answer.trim().to_string())
            .ok_or_else(|| InputError::Eof(prompt.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn console_source_prints_prompt_and_trims_answer() {
        let mut out = Vec::new();
        let answer = StdinSource::with_streams(&b"  New York \r\n"[..], &mut out)
            .ask("State? ")
            .unwrap();

        assert_eq!(answer, "New York");
        assert_eq!(String::from_utf8(out).unwrap(), "State? ");
    }

    #[test]
    fn console_source_reports_closed_input() {
        let mut out = Vec::new();
        let err = StdinSource::with_streams(&b""[..], &mut out)
            .ask("State? ")
            .unwrap_err();
        assert!(matches!(err, InputError::Eof(p) if p == "State?"));
    }

    #[test]
    fn scripted_source_answers_in_order() {
        let mut source = ScriptedSource::new(["ny", "ca"]);
        assert_eq!(source.ask("first").unwrap(), "ny");
        assert_eq!(source.ask("second").unwrap(), "ca");
        assert!(source.ask("third").is_err());
        assert_eq!(source.prompts, vec!["first", "second", "third"]);
    }
}
