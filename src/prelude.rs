//! Commonly used types and traits

pub use crate::console::{Console, MemoryConsole, StdConsole};
pub use crate::error::{FlowError, StepError};
pub use crate::flow::Flow;
pub use crate::registry::FlowRegistry;
pub use crate::step::{NumericStep, Step, StepKind};
pub use crate::steps::{
    CalculusStep, CompositeOutputStep, CsvFileCreateStep, DisplayStep, NumberStep,
    TextFileCreateStep, TextPromptStep, TextStep, TitleStep,
};
