//! Formula evaluator
//!
//! Evaluates formula ASTs against the current cell values. Evaluation is a
//! pure function of the tree and the lookup: it returns the numeric result
//! together with the fault it raised, and never mutates anything.

use crate::ast::{BinaryOperator, FormulaExpr};
use ripple_sheets_core::{CellAddress, CellError};

/// Read access to cell state during evaluation
pub trait CellLookup {
    /// Current value of a cell; 0 for a cell that was never written
    fn cell_value(&self, address: CellAddress) -> f64;

    /// Whether a cell currently carries a fault; false for a cell that was
    /// never written
    fn cell_has_error(&self, address: CellAddress) -> bool;
}

/// Result of evaluating a formula or sub-expression
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    /// Numeric result
    pub value: f64,
    /// Fault raised anywhere in the evaluated tree
    pub error: CellError,
}

impl Evaluation {
    /// A clean numeric result
    pub fn number(value: f64) -> Self {
        Self {
            value,
            error: CellError::None,
        }
    }

    /// A faulted result; faults always yield 0
    pub fn fault(error: CellError) -> Self {
        Self { value: 0.0, error }
    }

    /// Check if evaluation raised a fault
    pub fn is_error(&self) -> bool {
        self.error.is_error()
    }
}

/// Context for formula evaluation
pub struct EvaluationContext<'a> {
    /// Cell state for reference lookups
    pub cells: Option<&'a dyn CellLookup>,
}

impl<'a> EvaluationContext<'a> {
    /// Create a new evaluation context
    pub fn new(cells: &'a dyn CellLookup) -> Self {
        Self { cells: Some(cells) }
    }

    /// Create a simple context without cells (for testing); every
    /// reference reads as an empty cell
    pub fn simple() -> Self {
        Self { cells: None }
    }

    /// Read a referenced cell.
    ///
    /// A faulted cell yields 0 and an inherited `Ref` fault without its
    /// stored value being consulted.
    pub fn get_cell_value(&self, address: CellAddress) -> Evaluation {
        let cells = match self.cells {
            Some(cells) => cells,
            None => return Evaluation::number(0.0),
        };

        if cells.cell_has_error(address) {
            return Evaluation::fault(CellError::Ref);
        }

        Evaluation::number(cells.cell_value(address))
    }
}

/// Evaluate a formula expression
pub fn evaluate(expr: &FormulaExpr, ctx: &EvaluationContext) -> Evaluation {
    match expr {
        FormulaExpr::Number(n) => Evaluation::number(*n),
        FormulaExpr::CellRef(address) => ctx.get_cell_value(*address),
        FormulaExpr::BinaryOp { op, left, right } => evaluate_binary_op(*op, left, right, ctx),
    }
}

/// Evaluate a binary operation
///
/// Both operands are always evaluated, so faults from either side are
/// merged even when the other side already failed.
fn evaluate_binary_op(
    op: BinaryOperator,
    left: &FormulaExpr,
    right: &FormulaExpr,
    ctx: &EvaluationContext,
) -> Evaluation {
    let left_val = evaluate(left, ctx);
    let right_val = evaluate(right, ctx);
    let error = left_val.error.combine(right_val.error);

    let (l, r) = (left_val.value, right_val.value);
    let value = match op {
        BinaryOperator::Add => l + r,
        BinaryOperator::Subtract => l - r,
        BinaryOperator::Multiply => l * r,
        BinaryOperator::Divide => {
            // Exact comparison: only a true zero divisor faults
            if r == 0.0 {
                return Evaluation::fault(error.combine(CellError::DivZero));
            }
            l / r
        }
    };

    Evaluation { value, error }
}
