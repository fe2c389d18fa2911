//! Per-cell state

use ripple_sheets_core::CellError;
use ripple_sheets_formula::{Evaluation, FormulaExpr};

/// A materialised cell
///
/// Dependency edges are not stored here; they live in the sheet's
/// [`DependencyGraph`](ripple_sheets_formula::DependencyGraph) so both
/// directions are always updated together.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cell {
    /// Text as last written, kept for re-display
    raw_input: String,
    /// Last computed (or literal) value
    value: f64,
    /// Fault from the last pass; `None` when clean
    error: CellError,
    /// Parsed formula, present only for formula cells
    formula: Option<FormulaExpr>,
}

impl Cell {
    pub(crate) fn literal(raw_input: &str, value: f64) -> Self {
        Self {
            raw_input: raw_input.to_string(),
            value,
            error: CellError::None,
            formula: None,
        }
    }

    pub(crate) fn with_formula(raw_input: &str, formula: FormulaExpr) -> Self {
        Self {
            raw_input: raw_input.to_string(),
            value: 0.0,
            error: CellError::None,
            formula: Some(formula),
        }
    }

    /// A cell whose formula was refused for closing a cycle
    pub(crate) fn rejected(raw_input: &str) -> Self {
        Self {
            raw_input: raw_input.to_string(),
            value: 0.0,
            error: CellError::Cycle,
            formula: None,
        }
    }

    /// Record the outcome of evaluating this cell's formula
    pub(crate) fn store(&mut self, evaluation: Evaluation) {
        self.error = evaluation.error;
        self.value = if evaluation.is_error() {
            0.0
        } else {
            evaluation.value
        };
    }

    /// The text the cell was last set to
    pub fn raw_input(&self) -> &str {
        &self.raw_input
    }

    /// The stored value; 0 while the cell is faulted
    pub fn value(&self) -> f64 {
        if self.has_error() {
            0.0
        } else {
            self.value
        }
    }

    /// Whether the cell carries a fault
    pub fn has_error(&self) -> bool {
        self.error.is_error()
    }

    /// The fault kind
    pub fn error(&self) -> CellError {
        self.error
    }

    /// The parsed formula, if this is a formula cell
    pub fn formula(&self) -> Option<&FormulaExpr> {
        self.formula.as_ref()
    }

    /// Check if the cell contains a formula
    pub fn is_formula(&self) -> bool {
        self.formula.is_some()
    }
}
