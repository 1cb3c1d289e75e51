//! The set of flows created during a session.

use crate::error::FlowError;
use crate::flow::{Flow, FlowName};
use tracing::info;

/// Ordered collection of flows, addressed by 1-based position.
///
/// Created once and handed to the driving loop; there is no global flow
/// list.
///
/// # Examples
///
/// ```
/// use stepflow::FlowRegistry;
///
/// let mut registry = FlowRegistry::new();
/// registry.create("morning");
/// registry.create("evening");
///
/// let names: Vec<_> = registry.list_names().collect();
/// assert_eq!(names, vec![(1, "morning"), (2, "evening")]);
///
/// assert!(registry.delete(3).is_err());
/// assert_eq!(registry.len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct FlowRegistry {
    flows: Vec<Flow>,
}

impl FlowRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates and stores a new empty flow, returning it for building.
    pub fn create(&mut self, name: impl Into<FlowName>) -> &mut Flow {
        self.insert(Flow::new(name))
    }

    /// Stores an already built flow at the end of the registry.
    pub fn insert(&mut self, flow: Flow) -> &mut Flow {
        info!("Registered flow '{}' at position {}", flow.name(), self.flows.len() + 1);
        self.flows.push(flow);
        let last = self.flows.len() - 1;
        &mut self.flows[last]
    }

    /// `(position, name)` pairs in insertion order, positions starting at 1.
    pub fn list_names(&self) -> impl Iterator<Item = (usize, &str)> + '_ {
        self.flows
            .iter()
            .enumerate()
            .map(|(index, flow)| (index + 1, flow.name().as_str()))
    }

    /// Looks up a flow by 1-based position.
    pub fn get(&self, position: usize) -> Result<&Flow, FlowError> {
        let index = self.index_of(position)?;
        Ok(&self.flows[index])
    }

    /// Looks up a flow by 1-based position for modification or replay.
    pub fn select(&mut self, position: usize) -> Result<&mut Flow, FlowError> {
        let index = self.index_of(position)?;
        Ok(&mut self.flows[index])
    }

    /// Removes the flow at a 1-based position and returns it.
    ///
    /// Dropping the returned flow releases all of its steps. An out-of-range
    /// position leaves the registry untouched.
    pub fn delete(&mut self, position: usize) -> Result<Flow, FlowError> {
        let index = self.index_of(position)?;
        let flow = self.flows.remove(index);
        info!("Deleted flow '{}' from position {}", flow.name(), position);
        Ok(flow)
    }

    /// Number of flows.
    pub fn len(&self) -> usize {
        self.flows.len()
    }

    /// Returns `true` if no flow exists.
    pub fn is_empty(&self) -> bool {
        self.flows.is_empty()
    }

    /// All flows in insertion order.
    pub fn flows(&self) -> &[Flow] {
        &self.flows
    }

    fn index_of(&self, position: usize) -> Result<usize, FlowError> {
        if position == 0 || position > self.flows.len() {
            return Err(FlowError::FlowOutOfRange {
                position,
                len: self.flows.len(),
            });
        }
        Ok(position - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::steps::NumberStep;

    fn names(registry: &FlowRegistry) -> Vec<String> {
        registry
            .list_names()
            .map(|(_, name)| name.to_string())
            .collect()
    }

    #[test]
    fn test_create_returns_buildable_flow() {
        let mut registry = FlowRegistry::new();
        registry.create("build").add_step(NumberStep::new("n", 1));
        assert_eq!(registry.get(1).unwrap().len(), 1);
    }

    #[test]
    fn test_duplicate_names_allowed() {
        let mut registry = FlowRegistry::new();
        registry.create("same");
        registry.create("same");
        assert_eq!(names(&registry), vec!["same", "same"]);
    }

    #[test]
    fn test_delete_middle_shifts_listing() {
        let mut registry = FlowRegistry::new();
        registry.create("a");
        registry.create("b");
        registry.create("c");

        let removed = registry.delete(2).unwrap();
        assert_eq!(removed.name().as_str(), "b");

        let listing: Vec<_> = registry.list_names().collect();
        assert_eq!(listing, vec![(1, "a"), (2, "c")]);

        assert!(matches!(
            registry.delete(3),
            Err(FlowError::FlowOutOfRange { position: 3, len: 2 })
        ));
        assert_eq!(names(&registry), vec!["a", "c"]);
    }

    #[test]
    fn test_position_zero_rejected() {
        let mut registry = FlowRegistry::new();
        registry.create("a");
        assert!(registry.select(0).is_err());
        assert!(registry.get(0).is_err());
        assert!(registry.select(1).is_ok());
    }

    #[test]
    fn test_empty_registry() {
        let mut registry = FlowRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.list_names().next().is_none());
        assert!(registry.delete(1).is_err());
    }
}
