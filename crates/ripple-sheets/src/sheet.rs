//! Sheet type

use ahash::AHashMap;
use log::debug;

use crate::calculation::{CalculationMode, CalculationOptions, CalculationStats};
use crate::cell::Cell;
use ripple_sheets_core::{CellAddress, CellError, Error, Result};
use ripple_sheets_formula::{
    extract_dependencies, parse_expression, CellLookup, DependencyGraph, FormulaExpr,
};

/// A single sheet of cells
///
/// The sheet owns every cell and the dependency graph between them. Cells
/// that were never written are not stored; they read as a clean 0.
#[derive(Debug, Default)]
pub struct Sheet {
    /// Written cells
    pub(crate) cells: AHashMap<CellAddress, Cell>,
    /// Edges between formula cells and the cells they read
    pub(crate) graph: DependencyGraph,
    /// Calculation settings
    options: CalculationOptions,
}

/// Parsed form of the text written to a cell
enum CellInput {
    Literal(f64),
    Formula(FormulaExpr),
}

impl CellInput {
    fn parse(text: &str) -> Result<Self> {
        match text.strip_prefix('=') {
            Some(body) => parse_expression(body)
                .map(CellInput::Formula)
                .map_err(|e| Error::FormulaParse(e.to_string())),
            None => parse_literal(text).map(CellInput::Literal),
        }
    }
}

/// Parse literal cell text as a finite decimal number
fn parse_literal(text: &str) -> Result<f64> {
    let trimmed = text.trim();
    let numeric = !trimmed.is_empty()
        && trimmed
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'+' | b'-' | b'e' | b'E'));

    match trimmed.parse::<f64>() {
        Ok(value) if numeric && value.is_finite() => Ok(value),
        _ => Err(Error::InvalidNumber(text.to_string())),
    }
}

impl Sheet {
    /// Create an empty sheet with automatic calculation
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty sheet with the given calculation options
    pub fn with_options(options: CalculationOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Current calculation options
    pub fn options(&self) -> &CalculationOptions {
        &self.options
    }

    /// Switch between automatic and manual calculation.
    ///
    /// Switching back to automatic does not recalculate by itself; call
    /// [`Sheet::calculate`] to bring deferred formulas up to date.
    pub fn set_calculation_mode(&mut self, mode: CalculationMode) {
        self.options.mode = mode;
    }

    // === Writes ===

    /// Set a cell from its A1-style address
    ///
    /// See [`Sheet::set_cell_at`].
    pub fn set_cell(&mut self, address: &str, text: &str) -> Result<CalculationStats> {
        let addr = CellAddress::parse(address)?;
        self.set_cell_at(addr, text)
    }

    /// Set a cell's raw text.
    ///
    /// Text starting with `=` is a formula; anything else must be a decimal
    /// number. A malformed number or formula is returned as an error and the
    /// sheet is left exactly as it was.
    ///
    /// A formula that would make the cell depend on itself, directly or
    /// through other cells, is not committed: the cell loses its formula and
    /// its previous dependency edges and is marked with [`CellError::Cycle`].
    /// No recalculation runs in that case.
    pub fn set_cell_at(&mut self, address: CellAddress, text: &str) -> Result<CalculationStats> {
        let input = CellInput::parse(text)?;

        // Every write replaces the cell's outgoing edges
        self.graph.clear_precedents(address);

        match input {
            CellInput::Literal(value) => {
                self.cells.insert(address, Cell::literal(text, value));
            }
            CellInput::Formula(expr) => {
                let dependencies = extract_dependencies(&expr);

                if self.graph.would_create_cycle(address, &dependencies) {
                    debug!(
                        "rejected formula for {}: '{}' would create a circular reference",
                        address, text
                    );
                    self.cells.insert(address, Cell::rejected(text));
                    return Ok(CalculationStats {
                        circular_references: 1,
                        errors: 1,
                        ..CalculationStats::default()
                    });
                }

                self.graph.set_precedents(address, &dependencies);
                self.cells.insert(address, Cell::with_formula(text, expr));
            }
        }

        Ok(match self.options.mode {
            CalculationMode::Automatic => self.recalculate_from(address),
            CalculationMode::Manual => CalculationStats::default(),
        })
    }

    // === Reads ===

    /// Value of a cell by A1-style address
    pub fn cell_value(&self, address: &str) -> Result<f64> {
        Ok(self.cell_value_at(CellAddress::parse(address)?))
    }

    /// Value of a cell; 0 for an unwritten or faulted cell
    pub fn cell_value_at(&self, address: CellAddress) -> f64 {
        self.cells.get(&address).map_or(0.0, Cell::value)
    }

    /// Fault flag of a cell by A1-style address
    pub fn has_error(&self, address: &str) -> Result<bool> {
        Ok(self.has_error_at(CellAddress::parse(address)?))
    }

    /// Fault flag of a cell; false for an unwritten cell
    pub fn has_error_at(&self, address: CellAddress) -> bool {
        self.cells.get(&address).map_or(false, Cell::has_error)
    }

    /// Fault kind of a cell; [`CellError::None`] for an unwritten cell
    pub fn error_kind_at(&self, address: CellAddress) -> CellError {
        self.cells
            .get(&address)
            .map_or(CellError::None, Cell::error)
    }

    /// The text a cell was last set to
    pub fn raw_input_at(&self, address: CellAddress) -> Option<&str> {
        self.cells.get(&address).map(Cell::raw_input)
    }

    /// The committed formula of a cell
    pub fn formula_at(&self, address: CellAddress) -> Option<&FormulaExpr> {
        self.cells.get(&address).and_then(Cell::formula)
    }

    /// Get a written cell
    pub fn cell_at(&self, address: CellAddress) -> Option<&Cell> {
        self.cells.get(&address)
    }

    /// Cells the given cell's formula reads, in address order
    pub fn dependencies_at(&self, address: CellAddress) -> Vec<CellAddress> {
        let mut cells: Vec<_> = self.graph.get_precedents(address).collect();
        cells.sort();
        cells
    }

    /// Cells whose formulas read the given cell, in address order
    pub fn dependents_at(&self, address: CellAddress) -> Vec<CellAddress> {
        let mut cells: Vec<_> = self.graph.get_dependents(address).collect();
        cells.sort();
        cells
    }

    /// The dependency graph
    pub fn graph(&self) -> &DependencyGraph {
        &self.graph
    }

    /// Number of written cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if no cell has been written
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl CellLookup for Sheet {
    fn cell_value(&self, address: CellAddress) -> f64 {
        self.cell_value_at(address)
    }

    fn cell_has_error(&self, address: CellAddress) -> bool {
        self.has_error_at(address)
    }
}
