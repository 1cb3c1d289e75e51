use crate::console::Console;
use crate::error::FlowError;
use crate::step::{Step, StepKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;
use tracing::info;

/// Name of a flow. Not required to be unique.
///
/// # Examples
///
/// ```
/// use stepflow::FlowName;
///
/// let name: FlowName = "weekly".into();
/// assert_eq!(name.as_str(), "weekly");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlowName(String);

impl FlowName {
    /// Creates a new FlowName
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FlowName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FlowName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for FlowName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for FlowName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Identity of a step inside one flow, handed out by [`Flow::add_step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StepId(u64);

/// A step together with its identity.
#[derive(Debug)]
pub struct FlowEntry {
    id: StepId,
    step: Box<dyn Step>,
}

impl FlowEntry {
    /// The step's identity.
    pub fn id(&self) -> StepId {
        self.id
    }

    /// The step itself.
    pub fn step(&self) -> &dyn Step {
        self.step.as_ref()
    }
}

/// Serializable description of a flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowSummary {
    /// The flow's name
    pub name: FlowName,
    /// When the flow was created
    pub created_at: DateTime<Utc>,
    /// Number of steps
    pub step_count: usize,
    /// Step variants in order
    pub kinds: Vec<StepKind>,
}

/// A named, ordered sequence of steps.
///
/// The flow owns its steps; dropping the flow drops them. Order is both the
/// replay order and the 0-based addressing used by [`Flow::number_at`].
///
/// # Examples
///
/// ```
/// use stepflow::{Flow, MemoryConsole, NumberStep, TitleStep};
///
/// let mut flow = Flow::new("demo");
/// flow.add_step(TitleStep::new("Budget", "2024"));
/// flow.add_step(NumberStep::new("count", 7));
///
/// let mut console = MemoryConsole::default();
/// let mut sink = Vec::new();
/// flow.render_to(&mut sink, &mut console);
///
/// let rendered = String::from_utf8(sink).unwrap();
/// assert_eq!(rendered, "Title: Budget\nSubtitle: 2024\ncount: 7\n");
/// ```
pub struct Flow {
    name: FlowName,
    created_at: DateTime<Utc>,
    entries: Vec<FlowEntry>,
    next_id: u64,
}

impl fmt::Debug for Flow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Flow")
            .field("name", &self.name)
            .field("created_at", &self.created_at)
            .field("steps", &self.kinds())
            .finish()
    }
}

impl Flow {
    /// Creates an empty flow stamped with the current time.
    pub fn new(name: impl Into<FlowName>) -> Self {
        Self {
            name: name.into(),
            created_at: Utc::now(),
            entries: Vec::new(),
            next_id: 0,
        }
    }

    /// The flow's name.
    pub fn name(&self) -> &FlowName {
        &self.name
    }

    /// When the flow was created.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the flow has no steps.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Appends a step and returns its identity.
    pub fn add_step<S: Step + 'static>(&mut self, step: S) -> StepId {
        self.add_boxed(Box::new(step))
    }

    /// Appends an already boxed step.
    pub fn add_boxed(&mut self, step: Box<dyn Step>) -> StepId {
        let id = StepId(self.next_id);
        self.next_id += 1;
        self.entries.push(FlowEntry { id, step });
        id
    }

    /// Removes the step with the given identity, if present.
    pub fn delete_step(&mut self, id: StepId) -> Option<Box<dyn Step>> {
        let index = self.entries.iter().position(|entry| entry.id == id)?;
        Some(self.entries.remove(index).step)
    }

    /// Removes the step at a 0-based position, if present.
    ///
    /// Later steps shift down by one, so positions previously resolved for
    /// calculus operands may now point elsewhere.
    pub fn remove_at(&mut self, index: usize) -> Option<Box<dyn Step>> {
        if index >= self.entries.len() {
            return None;
        }
        Some(self.entries.remove(index).step)
    }

    /// The live ordered sequence of steps.
    pub fn steps(&self) -> &[FlowEntry] {
        &self.entries
    }

    /// The step at a 0-based position.
    pub fn step(&self, index: usize) -> Option<&dyn Step> {
        self.entries.get(index).map(FlowEntry::step)
    }

    /// Reads the number held by the step at a 0-based position.
    ///
    /// # Errors
    ///
    /// - [`FlowError::StepOutOfRange`] if there is no such step
    /// - [`FlowError::NotNumeric`] if the step cannot provide a number
    pub fn number_at(&self, index: usize) -> Result<i32, FlowError> {
        let step = self.step(index).ok_or(FlowError::StepOutOfRange {
            index,
            len: self.len(),
        })?;
        step.as_numeric()
            .map(|numeric| numeric.number())
            .ok_or(FlowError::NotNumeric {
                index,
                kind: step.kind(),
            })
    }

    /// Executes every step in order.
    ///
    /// A failing step reports its own error; the remaining steps still run.
    pub fn execute(&mut self, console: &mut dyn Console) {
        info!("Executing flow '{}' ({} steps)", self.name, self.len());
        for entry in &mut self.entries {
            entry.step.execute(console);
        }
    }

    /// Renders every step in order into the same sink.
    pub fn render_to(&mut self, sink: &mut dyn Write, console: &mut dyn Console) {
        info!("Rendering flow '{}' ({} steps)", self.name, self.len());
        for entry in &mut self.entries {
            entry.step.render_to(sink, console);
        }
    }

    /// Step variants in order.
    pub fn kinds(&self) -> Vec<StepKind> {
        self.entries.iter().map(|entry| entry.step.kind()).collect()
    }

    /// A serializable description of the flow.
    pub fn summary(&self) -> FlowSummary {
        FlowSummary {
            name: self.name.clone(),
            created_at: self.created_at,
            step_count: self.len(),
            kinds: self.kinds(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::MemoryConsole;
    use crate::steps::{CalculusStep, NumberStep, TextStep, TitleStep};

    fn render(flow: &mut Flow) -> String {
        let mut console = MemoryConsole::default();
        let mut sink = Vec::new();
        flow.render_to(&mut sink, &mut console);
        String::from_utf8(sink).unwrap()
    }

    #[test]
    fn test_steps_keep_append_order() {
        let mut flow = Flow::new("order");
        flow.add_step(TitleStep::new("a", "b"));
        flow.add_step(NumberStep::new("n", 1));
        flow.add_step(TextStep::new("c", "d"));

        assert_eq!(
            flow.kinds(),
            vec![StepKind::Title, StepKind::Number, StepKind::Text]
        );
        assert_eq!(flow.steps().len(), 3);
    }

    #[test]
    fn test_render_is_prefix_of_longer_render() {
        let mut flow = Flow::new("prefix");
        flow.add_step(TitleStep::new("a", "b"));
        flow.add_step(NumberStep::new("count", 7));
        let first = render(&mut flow);

        flow.add_step(TextStep::new("c", "d"));
        let second = render(&mut flow);

        assert!(second.starts_with(&first));
        assert!(second.len() > first.len());
        assert!(first.contains("count: 7"));
    }

    #[test]
    fn test_delete_step_by_identity() {
        let mut flow = Flow::new("delete");
        let first = flow.add_step(NumberStep::new("a", 1));
        let second = flow.add_step(NumberStep::new("b", 2));

        assert!(flow.delete_step(first).is_some());
        assert!(flow.delete_step(first).is_none());
        assert_eq!(flow.len(), 1);
        assert_eq!(flow.steps()[0].id(), second);
        assert_eq!(flow.number_at(0).unwrap(), 2);
    }

    #[test]
    fn test_ids_not_reused_after_delete() {
        let mut flow = Flow::new("ids");
        let first = flow.add_step(NumberStep::new("a", 1));
        flow.delete_step(first);
        let second = flow.add_step(NumberStep::new("b", 2));
        assert_ne!(first, second);
    }

    #[test]
    fn test_remove_at() {
        let mut flow = Flow::new("remove");
        flow.add_step(TitleStep::new("a", "b"));
        assert!(flow.remove_at(1).is_none());
        assert!(flow.remove_at(0).is_some());
        assert!(flow.is_empty());
    }

    #[test]
    fn test_number_at_checks_capability() {
        let mut flow = Flow::new("numbers");
        flow.add_step(TitleStep::new("a", "b"));
        flow.add_step(NumberStep::new("n", 42));

        assert_eq!(flow.number_at(1).unwrap(), 42);
        assert!(matches!(
            flow.number_at(0),
            Err(FlowError::NotNumeric {
                index: 0,
                kind: StepKind::Title
            })
        ));
        assert!(matches!(
            flow.number_at(5),
            Err(FlowError::StepOutOfRange { index: 5, len: 2 })
        ));
    }

    #[test]
    fn test_execute_continues_after_failure() {
        let mut flow = Flow::new("resilient");
        flow.add_step(CalculusStep::new(1, 0, '/'));
        flow.add_step(NumberStep::new("after", 3));

        let mut console = MemoryConsole::default();
        flow.execute(&mut console);

        assert_eq!(console.stderr(), "Error: Division by zero!\n");
        assert_eq!(console.stdout(), "after: 3\n");
    }

    #[test]
    fn test_summary() {
        let mut flow = Flow::new("summary");
        flow.add_step(NumberStep::new("n", 1));

        let summary = flow.summary();
        assert_eq!(summary.name.as_str(), "summary");
        assert_eq!(summary.step_count, 1);
        assert_eq!(summary.kinds, vec![StepKind::Number]);
        assert_eq!(summary.created_at, flow.created_at());

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["name"], "summary");
        assert_eq!(json["kinds"][0], "number");
    }
}
