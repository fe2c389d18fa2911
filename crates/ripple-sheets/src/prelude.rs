//! Prelude module - common imports for ripple-sheets users
//!
//! ```rust
//! use ripple_sheets::prelude::*;
//! ```

pub use crate::{
    // Calculation types
    CalculationMode,
    CalculationOptions,
    CalculationStats,
    // Cell types
    Cell,
    CellAddress,
    CellError,
    // Error types
    Error,
    Result,
    // Main type
    Sheet,
};
