//! Arithmetic over two previously resolved numbers.

use crate::console::Console;
use crate::error::StepError;
use crate::step::{Step, StepKind};
use std::fmt;
use std::io::Write;
use tracing::warn;

/// The operator of a [`CalculusStep`].
///
/// Parsed from a symbol: `+`, `-`, `*`, `/`, `m` or `min`, `M` or `max`.
/// Any other symbol is kept as [`Operation::Invalid`] and only rejected when
/// the step executes.
///
/// # Examples
///
/// ```
/// use stepflow::Operation;
///
/// assert_eq!(Operation::from("m"), Operation::Min);
/// assert_eq!(Operation::from('M'), Operation::Max);
/// assert_eq!(Operation::from("%"), Operation::Invalid("%".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// `+`
    Add,
    /// `-`
    Subtract,
    /// `*`
    Multiply,
    /// `/`, truncating integer division
    Divide,
    /// `m` / `min`
    Min,
    /// `M` / `max`
    Max,
    /// Anything else, kept verbatim.
    Invalid(String),
}

impl Operation {
    /// The canonical symbol.
    pub fn symbol(&self) -> &str {
        match self {
            Operation::Add => "+",
            Operation::Subtract => "-",
            Operation::Multiply => "*",
            Operation::Divide => "/",
            Operation::Min => "m",
            Operation::Max => "M",
            Operation::Invalid(symbol) => symbol,
        }
    }

    /// Applies the operation with integer semantics.
    pub fn apply(&self, lhs: i32, rhs: i32) -> Result<f64, StepError> {
        let (a, b) = (i64::from(lhs), i64::from(rhs));
        let value = match self {
            Operation::Add => a + b,
            Operation::Subtract => a - b,
            Operation::Multiply => a * b,
            Operation::Divide => {
                if b == 0 {
                    return Err(StepError::DivisionByZero);
                }
                a / b
            }
            Operation::Min => a.min(b),
            Operation::Max => a.max(b),
            Operation::Invalid(symbol) => {
                return Err(StepError::InvalidOperation(symbol.clone()));
            }
        };
        Ok(value as f64)
    }
}

impl From<&str> for Operation {
    fn from(symbol: &str) -> Self {
        match symbol {
            "+" => Operation::Add,
            "-" => Operation::Subtract,
            "*" => Operation::Multiply,
            "/" => Operation::Divide,
            "m" | "min" => Operation::Min,
            "M" | "max" => Operation::Max,
            other => Operation::Invalid(other.to_string()),
        }
    }
}

impl From<String> for Operation {
    fn from(symbol: String) -> Self {
        Operation::from(symbol.as_str())
    }
}

impl From<char> for Operation {
    fn from(symbol: char) -> Self {
        Operation::from(&*symbol.encode_utf8(&mut [0; 4]))
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Combines two numbers copied out of earlier steps.
///
/// The step never refers back to the flow it lives in; operands are resolved
/// by the caller (see [`Flow::number_at`](crate::Flow::number_at)) before
/// construction.
///
/// A failed computation (division by zero, unknown operator) leaves the
/// stored result untouched, and rendering still writes that stored value.
///
/// # Examples
///
/// ```
/// use stepflow::{CalculusStep, MemoryConsole, Step};
///
/// let mut step = CalculusStep::new(5, 3, '+');
/// step.execute(&mut MemoryConsole::default());
/// assert_eq!(step.result(), 8.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CalculusStep {
    lhs: i32,
    rhs: i32,
    operation: Operation,
    result: f64,
    computed: bool,
}

impl CalculusStep {
    /// Creates a calculus step over two resolved operands.
    pub fn new(lhs: i32, rhs: i32, operation: impl Into<Operation>) -> Self {
        Self {
            lhs,
            rhs,
            operation: operation.into(),
            result: 0.0,
            computed: false,
        }
    }

    /// The stored result; `0.0` until a computation succeeds.
    pub fn result(&self) -> f64 {
        self.result
    }

    /// Whether any execution has produced a result.
    pub fn is_computed(&self) -> bool {
        self.computed
    }

    /// The two operands, in order.
    pub fn operands(&self) -> (i32, i32) {
        (self.lhs, self.rhs)
    }

    /// The operator.
    pub fn operation(&self) -> &Operation {
        &self.operation
    }
}

impl Step for CalculusStep {
    fn kind(&self) -> StepKind {
        StepKind::Calculus
    }

    fn try_execute(&mut self, console: &mut dyn Console) -> Result<(), StepError> {
        self.result = self.operation.apply(self.lhs, self.rhs)?;
        self.computed = true;
        writeln!(console.out(), "The result is: {}", self.result).map_err(StepError::Sink)
    }

    fn try_render_to(
        &mut self,
        sink: &mut dyn Write,
        _console: &mut dyn Console,
    ) -> Result<(), StepError> {
        if !self.computed {
            warn!(
                "Rendering calculus {} {} {} without a computed result",
                self.lhs, self.operation, self.rhs
            );
        }
        writeln!(sink, "The result is: {:.6}", self.result).map_err(StepError::Sink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::MemoryConsole;

    fn run(lhs: i32, rhs: i32, op: char) -> (CalculusStep, MemoryConsole) {
        let mut step = CalculusStep::new(lhs, rhs, op);
        let mut console = MemoryConsole::default();
        step.execute(&mut console);
        (step, console)
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(run(5, 3, '+').0.result(), 8.0);
        assert_eq!(run(5, 3, '-').0.result(), 2.0);
        assert_eq!(run(5, 3, '*').0.result(), 15.0);
        assert_eq!(run(7, 2, '/').0.result(), 3.0);
        assert_eq!(run(5, 3, 'm').0.result(), 3.0);
        assert_eq!(run(5, 3, 'M').0.result(), 5.0);
    }

    #[test]
    fn test_execute_prints_result() {
        let (_, console) = run(5, 3, '+');
        assert_eq!(console.stdout(), "The result is: 8\n");
    }

    #[test]
    fn test_division_by_zero_leaves_result() {
        let (step, console) = run(5, 0, '/');
        assert_eq!(step.result(), 0.0);
        assert!(!step.is_computed());
        assert_eq!(console.stderr(), "Error: Division by zero!\n");
    }

    #[test]
    fn test_invalid_operation() {
        let (step, console) = run(5, 3, '?');
        assert!(!step.is_computed());
        assert_eq!(step.operation(), &Operation::Invalid("?".to_string()));
        assert_eq!(console.stderr(), "Error: Invalid operation '?'!\n");
    }

    #[test]
    fn test_extreme_operands_do_not_overflow() {
        assert_eq!(
            run(i32::MAX, i32::MAX, '+').0.result(),
            2.0 * f64::from(i32::MAX)
        );
        assert_eq!(run(i32::MIN, -1, '/').0.result(), -f64::from(i32::MIN));
    }

    #[test]
    fn test_render_uses_stored_result() {
        let mut console = MemoryConsole::default();

        let mut step = CalculusStep::new(5, 3, "*");
        let mut sink = Vec::new();
        step.render_to(&mut sink, &mut console);
        assert_eq!(sink, b"The result is: 0.000000\n");

        step.execute(&mut console);
        let mut sink = Vec::new();
        step.render_to(&mut sink, &mut console);
        assert_eq!(sink, b"The result is: 15.000000\n");
    }

    #[test]
    fn test_repeat_execute_recomputes() {
        let mut console = MemoryConsole::default();
        let mut step = CalculusStep::new(6, 3, '/');
        step.execute(&mut console);
        assert_eq!(step.result(), 2.0);

        step.execute(&mut console);
        assert_eq!(step.result(), 2.0);
        assert_eq!(step.operands(), (6, 3));
    }

    #[test]
    fn test_operation_symbols() {
        assert_eq!(Operation::from("min"), Operation::Min);
        assert_eq!(Operation::from("max".to_string()), Operation::Max);
        assert_eq!(Operation::Divide.to_string(), "/");
        assert_eq!(Operation::Invalid("^".to_string()).symbol(), "^");
    }
}
