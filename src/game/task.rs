//! # Tasks
//!
//! Content a room requires the player to resolve before the room counts as
//! entered.

use crate::persistence::{SaveReader, SaveWriter};
use crate::{DelveError, DelveResult, TaskPresenter};
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

/// A task gating entry into a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Task {
    /// Cleared as soon as it has been shown.
    Information { text: String },
    /// Cleared only by the correct answer. The answer is stored lowercased.
    Question { prompt: String, answer: String },
}

impl Task {
    /// Creates an information task.
    pub fn information(text: impl Into<String>) -> Self {
        Task::Information { text: text.into() }
    }

    /// Creates a question task, lowercasing the expected answer.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::Task;
    ///
    /// let task = Task::question("Name the golden ratio symbol.", "Phi");
    /// assert_eq!(task, Task::Question {
    ///     prompt: "Name the golden ratio symbol.".to_string(),
    ///     answer: "phi".to_string(),
    /// });
    /// ```
    pub fn question(prompt: impl Into<String>, answer: impl AsRef<str>) -> Self {
        Task::Question {
            prompt: prompt.into(),
            answer: answer.as_ref().to_lowercase(),
        }
    }

    /// Tag written to save files.
    pub fn kind(&self) -> &'static str {
        match self {
            Task::Information { .. } => "Information",
            Task::Question { .. } => "Question",
        }
    }

    /// Checks a player's answer against the expected one.
    ///
    /// Surrounding whitespace and case are ignored. Information tasks accept
    /// anything.
    pub fn accepts(&self, given: &str) -> bool {
        match self {
            Task::Information { .. } => true,
            Task::Question { answer, .. } => given.trim().to_lowercase() == *answer,
        }
    }

    /// Presents the task and reports whether it was cleared.
    pub fn resolve<P: TaskPresenter + ?Sized>(&self, presenter: &mut P) -> bool {
        match self {
            Task::Information { text } => {
                presenter.present_information(text);
                true
            }
            Task::Question { prompt, .. } => {
                let given = presenter.present_question(prompt);
                self.accepts(&given)
            }
        }
    }

    /// Writes the task kind followed by its payload.
    pub fn encode<W: Write>(&self, writer: &mut SaveWriter<W>) -> DelveResult<()> {
        writer.write_str(self.kind())?;
        match self {
            Task::Information { text } => writer.write_str(text),
            Task::Question { prompt, answer } => {
                writer.write_str(prompt)?;
                writer.write_str(answer)
            }
        }
    }

    /// Reads a task record.
    pub fn decode<R: Read>(reader: &mut SaveReader<R>) -> DelveResult<Self> {
        let kind = reader.read_string()?;
        match kind.as_str() {
            "Information" => Ok(Task::Information {
                text: reader.read_string()?,
            }),
            "Question" => {
                let prompt = reader.read_string()?;
                let answer = reader.read_string()?;
                Ok(Task::question(prompt, answer))
            }
            _ => Err(DelveError::UnknownTaskKind(kind)),
        }
    }
}
