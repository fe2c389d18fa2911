//! Error types for ripple-sheets-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Structural failures surfaced to the caller of a sheet write.
///
/// None of these ever leave a cell half-updated: they are raised before the
/// sheet is touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Invalid cell address format
    #[error("Invalid cell address: {0}")]
    InvalidAddress(String),

    /// Literal cell text that is not a decimal number
    #[error("Invalid number: {0}")]
    InvalidNumber(String),

    /// Formula parse error
    #[error("Formula parse error: {0}")]
    FormulaParse(String),
}
