//! Formula error types

use thiserror::Error;

/// Result type for formula operations
pub type FormulaResult<T> = std::result::Result<T, FormulaError>;

/// Errors that can occur while lexing or parsing a formula
///
/// Evaluation never fails with one of these; evaluation faults are reported
/// as a [`ripple_sheets_core::CellError`] on the result instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormulaError {
    /// Character outside the formula alphabet
    #[error("Invalid character '{character}' at position {position}")]
    InvalidCharacter { character: char, position: usize },

    /// Number token that does not convert to a value
    #[error("Invalid number: {0}")]
    InvalidNumber(String),

    /// Reference to invalid cell
    #[error("Invalid reference: {0}")]
    InvalidReference(String),

    /// A factor was expected but something else was found
    #[error("Syntax error: {0}")]
    Syntax(String),

    /// Formula exceeds the operator or nesting limits
    #[error("Formula too complex: {0}")]
    TooComplex(String),

    /// Opening parenthesis without its closing partner
    #[error("Missing closing parenthesis")]
    MissingParenthesis,

    /// Text that was expected to be a formula did not start with '='
    #[error("Formula must start with '='")]
    NotAFormula,
}
