//! Plain text holders: titles, copy and prompts.

use crate::console::Console;
use crate::error::StepError;
use crate::step::{Step, StepKind};
use std::io::Write;

/// A title with a subtitle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleStep {
    title: String,
    subtitle: String,
}

impl TitleStep {
    /// Creates a title step.
    pub fn new(title: impl Into<String>, subtitle: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: subtitle.into(),
        }
    }

    fn write_block(&self, w: &mut dyn Write) -> std::io::Result<()> {
        write!(w, "Title: {}\nSubtitle: {}\n", self.title, self.subtitle)
    }
}

impl Step for TitleStep {
    fn kind(&self) -> StepKind {
        StepKind::Title
    }

    fn try_execute(&mut self, console: &mut dyn Console) -> Result<(), StepError> {
        self.write_block(console.out()).map_err(StepError::Sink)
    }

    fn try_render_to(
        &mut self,
        sink: &mut dyn Write,
        _console: &mut dyn Console,
    ) -> Result<(), StepError> {
        self.write_block(sink).map_err(StepError::Sink)
    }
}

/// A title followed by a block of copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextStep {
    title: String,
    copy: String,
}

impl TextStep {
    /// Creates a text step.
    pub fn new(title: impl Into<String>, copy: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            copy: copy.into(),
        }
    }

    fn write_block(&self, w: &mut dyn Write) -> std::io::Result<()> {
        write!(w, "Title: {}\nCopy: {}\n", self.title, self.copy)
    }
}

impl Step for TextStep {
    fn kind(&self) -> StepKind {
        StepKind::Text
    }

    fn try_execute(&mut self, console: &mut dyn Console) -> Result<(), StepError> {
        self.write_block(console.out()).map_err(StepError::Sink)
    }

    fn try_render_to(
        &mut self,
        sink: &mut dyn Write,
        _console: &mut dyn Console,
    ) -> Result<(), StepError> {
        self.write_block(sink).map_err(StepError::Sink)
    }
}

/// Asks the user for a single token of text.
///
/// The answer is read and dropped; nothing is stored, so rendering only
/// ever shows the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextPromptStep {
    description: String,
}

impl TextPromptStep {
    /// Creates a prompt step.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

impl Step for TextPromptStep {
    fn kind(&self) -> StepKind {
        StepKind::TextPrompt
    }

    fn try_execute(&mut self, console: &mut dyn Console) -> Result<(), StepError> {
        write!(console.out(), "{}: ", self.description).map_err(StepError::Sink)?;
        console.read_token().map_err(StepError::Input)?;
        Ok(())
    }

    fn try_render_to(
        &mut self,
        sink: &mut dyn Write,
        _console: &mut dyn Console,
    ) -> Result<(), StepError> {
        write!(sink, "{}: ", self.description).map_err(StepError::Sink)
    }
}
