//! Cell error kinds

use std::fmt;

/// The evaluation fault recorded on a cell.
///
/// Unlike [`crate::Error`], a `CellError` is sheet data: it is stored on the
/// cell by the last recalculation pass and read back through the sheet API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellError {
    /// No fault
    #[default]
    None,
    /// #DIV/0! - The cell's own formula divided by exact zero
    DivZero,
    /// #REF! - A referenced cell is itself in error
    Ref,
    /// #VALUE! - Wrong kind of operand
    Value,
    /// #CYCLE! - The cell's formula was rejected for closing a cycle
    Cycle,
}

impl CellError {
    /// Get the display string for this error
    pub fn as_str(&self) -> &'static str {
        match self {
            CellError::None => "",
            CellError::DivZero => "#DIV/0!",
            CellError::Ref => "#REF!",
            CellError::Value => "#VALUE!",
            CellError::Cycle => "#CYCLE!",
        }
    }

    /// Check if this is an actual fault
    pub fn is_error(&self) -> bool {
        !matches!(self, CellError::None)
    }

    /// Merge the faults of two sub-expressions.
    ///
    /// A fault raised by the formula itself outranks one inherited from a
    /// referenced cell, which outranks no fault at all.
    pub fn combine(self, other: CellError) -> CellError {
        if other.rank() > self.rank() {
            other
        } else {
            self
        }
    }

    fn rank(&self) -> u8 {
        match self {
            CellError::None => 0,
            CellError::Ref => 1,
            CellError::Value => 2,
            CellError::DivZero => 3,
            CellError::Cycle => 4,
        }
    }
}

impl fmt::Display for CellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
