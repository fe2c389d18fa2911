//! # ripple-sheets-formula
//!
//! Formula parser and evaluator for ripple-sheets.
//!
//! This crate provides:
//! - Formula lexing and parsing (text → AST)
//! - Formula evaluation (AST → value + fault)
//! - Dependency extraction and the bidirectional dependency graph
//!
//! ## Example
//!
//! ```rust
//! use ripple_sheets_formula::{evaluate, parse_formula, EvaluationContext};
//!
//! let ast = parse_formula("=(1+2)*3").unwrap();
//! let result = evaluate(&ast, &EvaluationContext::simple());
//! assert_eq!(result.value, 9.0);
//! assert!(!result.is_error());
//! ```

pub mod ast;
pub mod dependency;
pub mod error;
pub mod evaluator;
pub mod lexer;
pub mod parser;

pub use ast::{BinaryOperator, FormulaExpr};
pub use dependency::{extract_dependencies, DependencyGraph};
pub use error::{FormulaError, FormulaResult};
pub use evaluator::{evaluate, CellLookup, Evaluation, EvaluationContext};
pub use lexer::{Lexer, Token};
pub use parser::{parse_expression, parse_formula};
