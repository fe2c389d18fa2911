//! Cell-related types and utilities
//!
//! This module contains:
//! - [`CellAddress`] - A cell's location (e.g., "A1")
//! - [`CellError`] - The fault kind recorded on a cell after evaluation

mod address;
mod error;

pub use address::CellAddress;
pub use error::CellError;
