//! Error types for steps, flows, the shell and configuration.

use crate::step::StepKind;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures raised while a single step executes or renders.
///
/// These never leave a step: [`Step::execute`](crate::Step::execute) and
/// [`Step::render_to`](crate::Step::render_to) report them on the console
/// error stream and carry on with the next step.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum StepError {
    /// A file the step owns could not be created, opened or read.
    #[error("I/O failure on '{}': {source}", .path.display())]
    Io {
        /// The file being accessed
        path: PathBuf,
        /// The underlying error
        source: io::Error,
    },

    /// Writing into the render sink or the console failed.
    #[error("Unable to write output: {0}")]
    Sink(#[source] io::Error),

    /// Reading interactive input failed.
    #[error("Unable to read input: {0}")]
    Input(#[source] io::Error),

    /// Neither `<name>.txt` nor `<name>.csv` exists.
    #[error("File '{}' not found.", .0.display())]
    NotFound(PathBuf),

    /// The divisor of a `/` calculation is zero.
    #[error("Division by zero!")]
    DivisionByZero,

    /// The operator symbol is not one of `+ - * / m M`.
    #[error("Invalid operation '{0}'!")]
    InvalidOperation(String),
}

impl StepError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        StepError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors returned to the driving loop by [`Flow`](crate::Flow) and
/// [`FlowRegistry`](crate::FlowRegistry) lookups.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum FlowError {
    /// A 1-based flow position outside the registry.
    #[error("Invalid option: flow {position} does not exist ({len} available)")]
    FlowOutOfRange {
        /// The requested position
        position: usize,
        /// Number of flows in the registry
        len: usize,
    },

    /// A 0-based step index outside the flow.
    #[error("Step {index} does not exist (flow has {len} steps)")]
    StepOutOfRange {
        /// The requested index
        index: usize,
        /// Number of steps in the flow
        len: usize,
    },

    /// The step at `index` cannot provide a number.
    #[error("Step {index} is a {kind} step, not a number step")]
    NotNumeric {
        /// The requested index
        index: usize,
        /// What the step actually is
        kind: StepKind,
    },
}

/// Fatal errors of the interactive shell.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ShellError {
    /// The console itself could not be read or written.
    #[error("Console I/O failed: {0}")]
    Io(#[from] io::Error),
}

/// Invalid configuration values.
#[derive(Error, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    /// A variable was set but empty.
    #[error("Environment variable {0} is set but empty")]
    Empty(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_error_display() {
        assert_eq!(StepError::DivisionByZero.to_string(), "Division by zero!");
        assert_eq!(
            StepError::InvalidOperation("?".to_string()).to_string(),
            "Invalid operation '?'!"
        );
        assert_eq!(
            StepError::NotFound(PathBuf::from("report")).to_string(),
            "File 'report' not found."
        );
    }

    #[test]
    fn test_io_error_display() {
        let error = StepError::io(
            "out.txt",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(error.to_string(), "I/O failure on 'out.txt': denied");
    }

    #[test]
    fn test_flow_error_display() {
        let error = FlowError::FlowOutOfRange {
            position: 3,
            len: 2,
        };
        assert_eq!(
            error.to_string(),
            "Invalid option: flow 3 does not exist (2 available)"
        );

        let error = FlowError::NotNumeric {
            index: 0,
            kind: StepKind::Title,
        };
        assert_eq!(error.to_string(), "Step 0 is a title step, not a number step");
    }

    #[test]
    fn test_config_error_display() {
        assert_eq!(
            ConfigError::Empty("STEPFLOW_DIR").to_string(),
            "Environment variable STEPFLOW_DIR is set but empty"
        );
    }
}
