//! # ripple-sheets-core
//!
//! Core value types for the ripple-sheets recalculation engine.
//!
//! This crate provides the fundamental types used throughout ripple-sheets:
//! - [`CellAddress`] - A cell's location (e.g., "A1", "AA12")
//! - [`CellError`] - The evaluation fault stored on a cell
//! - [`Error`] - Structural failures (bad address, bad number, bad formula)
//!
//! ## Example
//!
//! ```rust
//! use ripple_sheets_core::CellAddress;
//!
//! let addr = CellAddress::parse("AA12").unwrap();
//! assert_eq!(addr.row, 11);
//! assert_eq!(addr.col, 26);
//! assert_eq!(addr.to_string(), "AA12");
//! ```

pub mod cell;
pub mod error;

// Re-exports for convenience
pub use cell::{CellAddress, CellError};
pub use error::{Error, Result};
