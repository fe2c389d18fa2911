//! # ripple-sheets
//!
//! An in-memory spreadsheet engine with incremental recalculation.
//!
//! Cells hold either a literal number or a formula over other cells. Every
//! write re-evaluates exactly the cells that transitively depend on the
//! edited one, in dependency order, and formulas that would close a cycle
//! are rejected at write time.
//!
//! ## Features
//!
//! - Formulas with `+ - * /`, parentheses, numbers and cell references
//! - Bidirectional dependency graph with cycle rejection on every edit
//! - Incremental topological recalculation (Kahn's algorithm)
//! - Per-cell fault tracking (`#DIV/0!`, `#REF!`, `#CYCLE!`) with propagation
//! - Automatic or manual calculation mode
//!
//! ## Example
//!
//! ```rust
//! use ripple_sheets::prelude::*;
//!
//! let mut sheet = Sheet::new();
//!
//! sheet.set_cell("A1", "10").unwrap();
//! sheet.set_cell("B1", "=A1+5").unwrap();
//! sheet.set_cell("C1", "=B1*2").unwrap();
//! assert_eq!(sheet.cell_value("C1").unwrap(), 30.0);
//!
//! // Dependents follow the edit
//! sheet.set_cell("A1", "20").unwrap();
//! assert_eq!(sheet.cell_value("C1").unwrap(), 50.0);
//!
//! // Division by zero is a cell fault, not a Rust error
//! sheet.set_cell("D1", "=C1/0").unwrap();
//! assert!(sheet.has_error("D1").unwrap());
//! ```

pub mod calculation;
mod cell;
pub mod prelude;
mod sheet;

// Re-export calculation types
pub use calculation::{CalculationMode, CalculationOptions, CalculationStats};
pub use cell::Cell;
pub use sheet::Sheet;

// Re-export core types
pub use ripple_sheets_core::{CellAddress, CellError, Error, Result};

// Re-export formula types
pub use ripple_sheets_formula::{
    evaluate, parse_formula, DependencyGraph, Evaluation, EvaluationContext, FormulaError,
    FormulaExpr, FormulaResult,
};
