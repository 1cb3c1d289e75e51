//! Concrete [`Step`](crate::Step) variants.

mod calculus;
mod display;
mod file;
mod number;
mod output;
mod text;

pub use calculus::{CalculusStep, Operation};
pub use display::DisplayStep;
pub use file::{CsvFileCreateStep, TextFileCreateStep};
pub use number::NumberStep;
pub use output::CompositeOutputStep;
pub use text::{TextPromptStep, TextStep, TitleStep};
