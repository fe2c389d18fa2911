//! Sheet calculation engine
//!
//! Recalculation after an edit touches only the cells that can observe it:
//! the edited cell plus everything reachable from it along dependent edges.
//! That subset is ordered with Kahn's algorithm, counting only the edges
//! that stay inside it, and each formula cell is evaluated exactly once.
//!
//! # Example
//!
//! ```rust
//! use ripple_sheets::prelude::*;
//!
//! let mut sheet = Sheet::new();
//! sheet.set_cell("A1", "1").unwrap();
//! sheet.set_cell("B1", "=A1*2").unwrap();
//! sheet.set_cell("C1", "=A1+B1").unwrap();
//! sheet.set_cell("Z9", "=5").unwrap();
//!
//! // Z9 does not read A1, so it is left alone
//! let stats = sheet.set_cell("A1", "10").unwrap();
//! assert_eq!(stats.affected, 3);
//! assert_eq!(stats.cells_calculated, 2);
//! assert_eq!(sheet.cell_value("C1").unwrap(), 30.0);
//! ```

use std::collections::VecDeque;

use ahash::{AHashMap, AHashSet};
use log::{debug, trace, warn};

use crate::{evaluate, EvaluationContext, Sheet};
use ripple_sheets_core::CellAddress;
use ripple_sheets_formula::DependencyGraph;

/// When formulas are evaluated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CalculationMode {
    /// Every write recalculates the cells it affects
    #[default]
    Automatic,
    /// Writes only update the graph; values wait for [`Sheet::calculate`]
    Manual,
}

/// Options for sheet calculation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalculationOptions {
    /// Calculation mode (default: automatic)
    pub mode: CalculationMode,
}

/// Statistics from a calculation run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CalculationStats {
    /// Number of cells in the affected set, literals included
    pub affected: usize,
    /// Number of formula cells evaluated
    pub cells_calculated: usize,
    /// Number of cells left with a fault
    pub errors: usize,
    /// Number of formulas rejected for closing a cycle
    pub circular_references: usize,
}

/// Collect `seed` and every cell that transitively reads it
pub(crate) fn collect_affected(
    graph: &DependencyGraph,
    seed: CellAddress,
) -> AHashSet<CellAddress> {
    let mut affected = AHashSet::new();
    let mut stack = vec![seed];

    while let Some(cell) = stack.pop() {
        if affected.insert(cell) {
            stack.extend(
                graph
                    .get_dependents(cell)
                    .filter(|dependent| !affected.contains(dependent)),
            );
        }
    }

    affected
}

/// Order the affected cells so every cell comes after the affected cells it
/// reads.
///
/// Precedents outside `affected` are treated as settled inputs and do not
/// hold a cell back. A cell that never reaches indegree zero is left out,
/// which can only happen if the graph contains a cycle.
pub(crate) fn topological_order(
    graph: &DependencyGraph,
    affected: &AHashSet<CellAddress>,
) -> Vec<CellAddress> {
    let mut indegree: AHashMap<CellAddress, usize> = affected
        .iter()
        .map(|&cell| {
            let count = graph
                .get_precedents(cell)
                .filter(|precedent| affected.contains(precedent))
                .count();
            (cell, count)
        })
        .collect();

    let mut queue: VecDeque<CellAddress> = indegree
        .iter()
        .filter(|&(_, &count)| count == 0)
        .map(|(&cell, _)| cell)
        .collect();

    let mut order = Vec::with_capacity(affected.len());

    while let Some(cell) = queue.pop_front() {
        order.push(cell);

        for dependent in graph.get_dependents(cell) {
            if let Some(count) = indegree.get_mut(&dependent) {
                *count -= 1;
                if *count == 0 {
                    queue.push_back(dependent);
                }
            }
        }
    }

    order
}

impl Sheet {
    /// Recalculate everything downstream of `seed`, `seed` included
    pub(crate) fn recalculate_from(&mut self, seed: CellAddress) -> CalculationStats {
        let affected = collect_affected(&self.graph, seed);
        let stats = self.run_pass(&affected);

        debug!(
            "recalculated from {}: {} affected, {} evaluated, {} faulted",
            seed, stats.affected, stats.cells_calculated, stats.errors
        );

        stats
    }

    /// Recalculate every formula on the sheet.
    ///
    /// This is how values catch up after writes made in
    /// [`CalculationMode::Manual`].
    pub fn calculate(&mut self) -> CalculationStats {
        let affected: AHashSet<CellAddress> = self.cells.keys().copied().collect();
        let stats = self.run_pass(&affected);

        debug!(
            "full calculation: {} cells, {} evaluated, {} faulted",
            stats.affected, stats.cells_calculated, stats.errors
        );

        stats
    }

    /// Evaluate the formula cells of `affected` in topological order
    fn run_pass(&mut self, affected: &AHashSet<CellAddress>) -> CalculationStats {
        let mut stats = CalculationStats {
            affected: affected.len(),
            ..CalculationStats::default()
        };

        let order = topological_order(&self.graph, affected);
        if order.len() < affected.len() {
            warn!(
                "{} of {} affected cells could not be ordered and were skipped",
                affected.len() - order.len(),
                affected.len()
            );
        }

        for address in order {
            let evaluation = {
                let sheet: &Sheet = self;
                match sheet.cells.get(&address).and_then(|cell| cell.formula()) {
                    Some(expr) => evaluate(expr, &EvaluationContext::new(sheet)),
                    // Literals and never-written references are settled inputs
                    None => continue,
                }
            };

            trace!(
                "evaluated {}: {} ({:?})",
                address, evaluation.value, evaluation.error
            );

            stats.cells_calculated += 1;
            if evaluation.is_error() {
                stats.errors += 1;
            }

            if let Some(cell) = self.cells.get_mut(&address) {
                cell.store(evaluation);
            }
        }

        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn addr(s: &str) -> CellAddress {
        CellAddress::parse(s).unwrap()
    }

    fn position(order: &[CellAddress], cell: &str) -> usize {
        let cell = addr(cell);
        order.iter().position(|&c| c == cell).unwrap()
    }

    /// B1 and C1 read A1, D1 reads B1 and C1, E1 reads D1
    fn diamond() -> DependencyGraph {
        let mut graph = DependencyGraph::new();
        graph.add_dependency(addr("A1"), addr("B1"));
        graph.add_dependency(addr("A1"), addr("C1"));
        graph.add_dependency(addr("B1"), addr("D1"));
        graph.add_dependency(addr("C1"), addr("D1"));
        graph.add_dependency(addr("D1"), addr("E1"));
        graph
    }

    #[test]
    fn test_collect_affected() {
        let graph = diamond();

        let affected = collect_affected(&graph, addr("A1"));
        assert_eq!(affected.len(), 5);

        let affected = collect_affected(&graph, addr("C1"));
        let expected: AHashSet<_> = ["C1", "D1", "E1"].iter().map(|s| addr(s)).collect();
        assert_eq!(affected, expected);

        // A cell nothing reads affects only itself
        let affected = collect_affected(&graph, addr("Z1"));
        assert_eq!(affected.len(), 1);
        assert!(affected.contains(&addr("Z1")));
    }

    #[test]
    fn test_topological_order_diamond() {
        let graph = diamond();
        let affected = collect_affected(&graph, addr("A1"));
        let order = topological_order(&graph, &affected);

        assert_eq!(order.len(), 5);
        assert_eq!(order[0], addr("A1"));
        assert!(position(&order, "B1") < position(&order, "D1"));
        assert!(position(&order, "C1") < position(&order, "D1"));
        assert!(position(&order, "D1") < position(&order, "E1"));
    }

    #[test]
    fn test_outside_precedents_do_not_block() {
        let graph = diamond();
        // A1 and B1 are outside; D1 must still be released by C1 alone
        let affected = collect_affected(&graph, addr("C1"));
        let order = topological_order(&graph, &affected);

        assert_eq!(order, vec![addr("C1"), addr("D1"), addr("E1")]);
    }

    #[test]
    fn test_cycle_cells_are_left_out() {
        let mut graph = DependencyGraph::new();
        graph.add_dependency(addr("A1"), addr("B1"));
        graph.add_dependency(addr("B1"), addr("A1"));
        graph.add_dependency(addr("C1"), addr("A1"));

        let affected: AHashSet<_> = ["A1", "B1", "C1"].iter().map(|s| addr(s)).collect();
        let order = topological_order(&graph, &affected);

        assert_eq!(order, vec![addr("C1")]);
    }

    #[test]
    fn test_manual_mode_defers_evaluation() {
        let mut sheet = Sheet::with_options(CalculationOptions {
            mode: CalculationMode::Manual,
        });

        sheet.set_cell("A1", "2").unwrap();
        let stats = sheet.set_cell("B1", "=A1*3").unwrap();
        assert_eq!(stats, CalculationStats::default());
        assert_eq!(sheet.cell_value("B1").unwrap(), 0.0);

        let stats = sheet.calculate();
        assert_eq!(stats.affected, 2);
        assert_eq!(stats.cells_calculated, 1);
        assert_eq!(sheet.cell_value("B1").unwrap(), 6.0);
    }

    #[test]
    fn test_calculate_counts_faults() {
        let mut sheet = Sheet::new();
        sheet.set_cell("A1", "=1/0").unwrap();
        sheet.set_cell("B1", "=A1+1").unwrap();
        sheet.set_cell("C1", "=2").unwrap();

        let stats = sheet.calculate();
        assert_eq!(
            stats,
            CalculationStats {
                affected: 3,
                cells_calculated: 3,
                errors: 2,
                circular_references: 0,
            }
        );
    }

    #[test]
    fn test_switching_mode() {
        let mut sheet = Sheet::new();
        assert_eq!(sheet.options().mode, CalculationMode::Automatic);

        sheet.set_calculation_mode(CalculationMode::Manual);
        sheet.set_cell("A1", "=4").unwrap();
        assert_eq!(sheet.cell_value("A1").unwrap(), 0.0);

        sheet.set_calculation_mode(CalculationMode::Automatic);
        sheet.set_cell("B1", "=A1").unwrap();
        // B1 reads A1's stale value until A1 is evaluated
        assert_eq!(sheet.cell_value("B1").unwrap(), 0.0);

        sheet.calculate();
        assert_eq!(sheet.cell_value("B1").unwrap(), 4.0);
    }
}
