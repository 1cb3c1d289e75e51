//! # stepflow
//!
//! Build named sequences of heterogeneous steps and replay them, either on
//! the console or rendered into a single text document.
//!
//! ## Features
//!
//! - **One trait, many steps**: titles, text, prompts, numbers, arithmetic,
//!   TXT/CSV file creation, file display and standalone output documents all
//!   implement [`Step`]
//! - **Errors never escape a step**: [`Step::execute`] and [`Step::render_to`]
//!   report failures on the [`Console`] and the flow carries on
//! - **Checked cross-step reads**: [`CalculusStep`] operands are resolved
//!   through [`Flow::number_at`], which rejects non-numeric steps instead of
//!   guessing
//! - **No global state**: flows live in a [`FlowRegistry`] owned by the
//!   caller, typically the interactive [`Shell`]
//!
//! ## Quick Start
//!
//! ```rust
//! use stepflow::prelude::*;
//!
//! let mut flow = Flow::new("budget");
//! flow.add_step(TitleStep::new("Budget", "2024"));
//! flow.add_step(NumberStep::new("income", 5));
//! flow.add_step(NumberStep::new("costs", 3));
//!
//! let lhs = flow.number_at(1).expect("income is a number");
//! let rhs = flow.number_at(2).expect("costs is a number");
//! flow.add_step(CalculusStep::new(lhs, rhs, '-'));
//!
//! let mut console = MemoryConsole::default();
//! flow.execute(&mut console);
//! assert!(console.stdout().ends_with("The result is: 2\n"));
//!
//! let mut document = Vec::new();
//! flow.render_to(&mut document, &mut console);
//! assert_eq!(
//!     String::from_utf8(document).unwrap(),
//!     "Title: Budget\nSubtitle: 2024\nincome: 5\ncosts: 3\nThe result is: 2.000000\n"
//! );
//! ```
//!
//! ## Capability Checks
//!
//! Only number steps can feed a calculation:
//!
//! ```rust
//! use stepflow::prelude::*;
//!
//! let mut flow = Flow::new("checked");
//! flow.add_step(TextStep::new("Intro", "Hello"));
//!
//! match flow.number_at(0) {
//!     Err(FlowError::NotNumeric { index, kind }) => {
//!         assert_eq!(index, 0);
//!         assert_eq!(kind, StepKind::Text);
//!     }
//!     other => unreachable!("unexpected {other:?}"),
//! }
//! ```
//!
//! ## Registry
//!
//! ```rust
//! use stepflow::prelude::*;
//!
//! let mut registry = FlowRegistry::new();
//! registry.create("first").add_step(NumberStep::new("count", 7));
//! registry.create("second");
//!
//! let removed = registry.delete(1).expect("position 1 exists");
//! assert_eq!(removed.name().as_str(), "first");
//! assert!(registry.select(2).is_err());
//! ```

mod config;
mod console;
mod error;
mod flow;
mod registry;
mod shell;
mod step;
mod steps;

pub mod prelude;

pub use config::{load_env_file, Settings, DIR_ENV, LOG_ENV};
pub use console::{Console, MemoryConsole, StdConsole};
pub use error::{ConfigError, FlowError, ShellError, StepError};
pub use flow::{Flow, FlowEntry, FlowName, FlowSummary, StepId};
pub use registry::FlowRegistry;
pub use shell::Shell;
pub use step::{NumericStep, Step, StepKind};
pub use steps::{
    CalculusStep, CompositeOutputStep, CsvFileCreateStep, DisplayStep, NumberStep, Operation,
    TextFileCreateStep, TextPromptStep, TextStep, TitleStep,
};
