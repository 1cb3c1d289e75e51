use crate::console::Console;
use crate::error::StepError;
use crate::step::{NumericStep, Step, StepKind};
use std::io::Write;

/// A described integer, readable by later calculus steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberStep {
    description: String,
    value: i32,
}

impl NumberStep {
    /// Creates a number step.
    pub fn new(description: impl Into<String>, value: i32) -> Self {
        Self {
            description: description.into(),
            value,
        }
    }

    /// The description shown next to the value.
    pub fn description(&self) -> &str {
        &self.description
    }

    fn write_line(&self, w: &mut dyn Write) -> std::io::Result<()> {
        writeln!(w, "{}: {}", self.description, self.value)
    }
}

impl Step for NumberStep {
    fn kind(&self) -> StepKind {
        StepKind::Number
    }

    fn try_execute(&mut self, console: &mut dyn Console) -> Result<(), StepError> {
        self.write_line(console.out()).map_err(StepError::Sink)
    }

    fn try_render_to(
        &mut self,
        sink: &mut dyn Write,
        _console: &mut dyn Console,
    ) -> Result<(), StepError> {
        self.write_line(sink).map_err(StepError::Sink)
    }

    fn as_numeric(&self) -> Option<&dyn NumericStep> {
        Some(self)
    }
}

impl NumericStep for NumberStep {
    fn number(&self) -> i32 {
        self.value
    }
}
