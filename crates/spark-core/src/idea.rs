// crates/spark-core/src/idea.rs - Idea entries and their markdown form

use std::fmt;

use crate::prompt::{Prompt, PromptResult};

/// Header written once when the idea file is created
pub const IDEA_FILE_HEADER: &str = "# Ideas\n\n";

/// A single idea, alive only for the duration of one run
///
/// Title and description are taken verbatim: no validation and no markdown
/// escaping. Empty strings are valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Idea {
    pub title: String,
    pub description: String,
}

impl Idea {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    /// Ask for a title, then a description
    pub fn from_prompt(prompt: &mut impl Prompt) -> PromptResult<Self> {
        let title = prompt.ask("Idea title: ")?;
        let description = prompt.ask("Description: ")?;
        Ok(Self { title, description })
    }

    /// Markdown block appended to the idea file
    pub fn to_markdown(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Idea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "## {}\n\n{}\n\n", self.title, self.description)
    }
}
