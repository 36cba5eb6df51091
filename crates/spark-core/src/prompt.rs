// crates/spark-core/src/prompt.rs - Interactive Line Prompt
//
// The whole program is a linear sequence of questions: configuration fields,
// idea title, idea description, and occasionally a remote URL. This module is
// the single place that talks to the user.
//
// DESIGN NOTES:
// - `Prompt` is a trait so workflows can be driven by scripted answers in tests
// - `LinePrompt` owns ONE buffered reader for the whole run. Creating a fresh
//   reader per question would swallow buffered lines when input is piped.

use std::io::{self, BufRead, Write};
use thiserror::Error;

/// Errors raised while reading user input
#[derive(Error, Debug)]
pub enum PromptError {
    #[error("Input stream closed while waiting for: {0}")]
    Closed(String),

    #[error("Failed to read user input: {0}")]
    Io(#[from] io::Error),
}

/// Result type for prompt operations
pub type PromptResult<T> = Result<T, PromptError>;

/// Asks the user a question and returns one line of answer
pub trait Prompt {
    /// Show `message` (no trailing newline) and block until a line is entered
    ///
    /// The returned string has its line terminator removed and is otherwise
    /// verbatim. Empty answers are returned as empty strings; interpreting
    /// them is the caller's business (config fields trim, idea text does not).
    fn ask(&mut self, message: &str) -> PromptResult<String>;
}

/// Prompt backed by any reader/writer pair
///
/// In the binary this wraps locked stdin/stdout; in tests it wraps
/// `Cursor`s and a borrowed `Vec<u8>`.
pub struct LinePrompt<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }
}

impl<R: BufRead, W: Write> Prompt for LinePrompt<R, W> {
    fn ask(&mut self, message: &str) -> PromptResult<String> {
        self.writer.write_all(message.as_bytes())?;
        self.writer.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(PromptError::Closed(message.trim().to_string()));
        }

        Ok(strip_line_ending(line))
    }
}

fn strip_line_ending(mut line: String) -> String {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    line
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::collections::VecDeque;

    /// Prompt that answers from a fixed script and records every question
    #[derive(Default)]
    pub struct ScriptedPrompt {
        answers: VecDeque<String>,
        pub asked: Vec<String>,
    }

    impl ScriptedPrompt {
        pub fn new(answers: &[&str]) -> Self {
            Self {
                answers: answers.iter().map(|a| a.to_string()).collect(),
                asked: Vec::new(),
            }
        }
    }

    impl Prompt for ScriptedPrompt {
        fn ask(&mut self, message: &str) -> PromptResult<String> {
            self.asked.push(message.to_string());
            self.answers
                .pop_front()
                .ok_or_else(|| PromptError::Closed(message.to_string()))
        }
    }
}
