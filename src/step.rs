use crate::console::Console;
use crate::error::StepError;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};
use std::io::Write;
use tracing::{debug, warn};

/// The variant a step belongs to.
///
/// Used in logs, in [`FlowError::NotNumeric`](crate::FlowError::NotNumeric)
/// and in [`FlowSummary`](crate::FlowSummary).
///
/// # Examples
///
/// ```
/// use stepflow::StepKind;
///
/// assert_eq!(StepKind::CsvFileCreate.to_string(), "csv file");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    /// [`TitleStep`](crate::TitleStep)
    Title,
    /// [`TextStep`](crate::TextStep)
    Text,
    /// [`TextPromptStep`](crate::TextPromptStep)
    TextPrompt,
    /// [`NumberStep`](crate::NumberStep)
    Number,
    /// [`CalculusStep`](crate::CalculusStep)
    Calculus,
    /// [`TextFileCreateStep`](crate::TextFileCreateStep)
    TextFileCreate,
    /// [`CsvFileCreateStep`](crate::CsvFileCreateStep)
    CsvFileCreate,
    /// [`DisplayStep`](crate::DisplayStep)
    Display,
    /// [`CompositeOutputStep`](crate::CompositeOutputStep)
    CompositeOutput,
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StepKind::Title => "title",
            StepKind::Text => "text",
            StepKind::TextPrompt => "text prompt",
            StepKind::Number => "number",
            StepKind::Calculus => "calculus",
            StepKind::TextFileCreate => "text file",
            StepKind::CsvFileCreate => "csv file",
            StepKind::Display => "display",
            StepKind::CompositeOutput => "output",
        };
        f.write_str(label)
    }
}

/// One unit of a [`Flow`](crate::Flow).
///
/// Implementors provide the fallible [`try_execute`](Step::try_execute) and
/// [`try_render_to`](Step::try_render_to). Callers use the provided
/// [`execute`](Step::execute) and [`render_to`](Step::render_to), which
/// never fail: an error is written to the console error stream, logged, and
/// the operation becomes a no-op for this step.
///
/// # Examples
///
/// ```
/// use std::io::Write;
/// use stepflow::{Console, MemoryConsole, Step, StepError, StepKind};
///
/// #[derive(Debug)]
/// struct Greeting;
///
/// impl Step for Greeting {
///     fn kind(&self) -> StepKind {
///         StepKind::Text
///     }
///
///     fn try_execute(&mut self, console: &mut dyn Console) -> Result<(), StepError> {
///         writeln!(console.out(), "hello").map_err(StepError::Sink)
///     }
///
///     fn try_render_to(
///         &mut self,
///         sink: &mut dyn Write,
///         _console: &mut dyn Console,
///     ) -> Result<(), StepError> {
///         sink.write_all(b"hello\n").map_err(StepError::Sink)
///     }
/// }
///
/// let mut console = MemoryConsole::default();
/// Greeting.execute(&mut console);
/// assert_eq!(console.stdout(), "hello\n");
/// ```
pub trait Step: Debug {
    /// Returns which variant this step is.
    fn kind(&self) -> StepKind;

    /// Performs the step's user-facing action.
    fn try_execute(&mut self, console: &mut dyn Console) -> Result<(), StepError>;

    /// Writes the step's textual representation into `sink`.
    fn try_render_to(
        &mut self,
        sink: &mut dyn Write,
        console: &mut dyn Console,
    ) -> Result<(), StepError>;

    /// Exposes the numeric-read capability, if this step has one.
    fn as_numeric(&self) -> Option<&dyn NumericStep> {
        None
    }

    /// Executes the step, reporting any failure instead of returning it.
    fn execute(&mut self, console: &mut dyn Console) {
        debug!("Executing {} step", self.kind());
        if let Err(e) = self.try_execute(console) {
            report(self.kind(), &e, console);
        }
    }

    /// Renders the step into `sink`, reporting any failure instead of
    /// returning it.
    fn render_to(&mut self, sink: &mut dyn Write, console: &mut dyn Console) {
        debug!("Rendering {} step", self.kind());
        if let Err(e) = self.try_render_to(sink, console) {
            report(self.kind(), &e, console);
        }
    }
}

/// A step that holds a number other steps may read.
pub trait NumericStep: Step {
    /// The stored number.
    fn number(&self) -> i32;
}

fn report(kind: StepKind, error: &StepError, console: &mut dyn Console) {
    warn!("{} step failed: {}", kind, error);
    // Nowhere left to report to if the error stream itself is broken.
    let _ = writeln!(console.err(), "Error: {error}");
}
