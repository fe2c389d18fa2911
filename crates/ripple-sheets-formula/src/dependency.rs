//! Dependency tracking for formula calculation

use crate::ast::FormulaExpr;
use ahash::{AHashMap, AHashSet};
use ripple_sheets_core::CellAddress;

/// Collect every cell a formula reads.
///
/// Duplicates are merged; the set has no meaningful order.
pub fn extract_dependencies(expr: &FormulaExpr) -> AHashSet<CellAddress> {
    let mut refs = AHashSet::new();
    extract_dependencies_recursive(expr, &mut refs);
    refs
}

fn extract_dependencies_recursive(expr: &FormulaExpr, refs: &mut AHashSet<CellAddress>) {
    match expr {
        FormulaExpr::Number(_) => {}
        FormulaExpr::CellRef(address) => {
            refs.insert(*address);
        }
        FormulaExpr::BinaryOp { left, right, .. } => {
            extract_dependencies_recursive(left, refs);
            extract_dependencies_recursive(right, refs);
        }
    }
}

/// Dependency graph for formula cells
///
/// Tracks which cells depend on which other cells. Both directions are kept
/// and every mutation goes through a method that updates both sides, so `b`
/// is a precedent of `a` exactly when `a` is a dependent of `b`.
#[derive(Debug, Default, Clone)]
pub struct DependencyGraph {
    /// Cell → Cells that depend on it (dependents)
    dependents: AHashMap<CellAddress, AHashSet<CellAddress>>,
    /// Cell → Cells it depends on (precedents)
    precedents: AHashMap<CellAddress, AHashSet<CellAddress>>,
}

impl DependencyGraph {
    /// Create a new empty dependency graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a dependency: dependent depends on precedent
    pub fn add_dependency(&mut self, precedent: CellAddress, dependent: CellAddress) {
        self.dependents
            .entry(precedent)
            .or_default()
            .insert(dependent);
        self.precedents
            .entry(dependent)
            .or_default()
            .insert(precedent);
    }

    /// Remove a single dependency edge, if present
    pub fn remove_dependency(&mut self, precedent: CellAddress, dependent: CellAddress) {
        remove_edge(&mut self.dependents, precedent, dependent);
        remove_edge(&mut self.precedents, dependent, precedent);
    }

    /// Remove every edge from `cell` to the cells it reads.
    ///
    /// Edges from cells that read `cell` are left in place.
    pub fn clear_precedents(&mut self, cell: CellAddress) {
        if let Some(precedents) = self.precedents.remove(&cell) {
            for precedent in precedents {
                remove_edge(&mut self.dependents, precedent, cell);
            }
        }
    }

    /// Replace the set of cells `cell` reads
    pub fn set_precedents(&mut self, cell: CellAddress, precedents: &AHashSet<CellAddress>) {
        self.clear_precedents(cell);
        for &precedent in precedents {
            self.add_dependency(precedent, cell);
        }
    }

    /// Get cells that depend on the given cell
    pub fn get_dependents(&self, cell: CellAddress) -> impl Iterator<Item = CellAddress> + '_ {
        self.dependents
            .get(&cell)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    /// Get cells that the given cell depends on
    pub fn get_precedents(&self, cell: CellAddress) -> impl Iterator<Item = CellAddress> + '_ {
        self.precedents
            .get(&cell)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    /// Check whether `precedent` is a direct precedent of `dependent`
    pub fn has_dependency(&self, precedent: CellAddress, dependent: CellAddress) -> bool {
        self.precedents
            .get(&dependent)
            .map_or(false, |set| set.contains(&precedent))
    }

    /// Total number of dependency edges
    pub fn edge_count(&self) -> usize {
        self.precedents.values().map(|set| set.len()).sum()
    }

    /// Check whether making `cell` read `candidates` would close a cycle.
    ///
    /// Each candidate is searched independently: a cycle exists if `cell`
    /// can be reached from the candidate by following precedent edges. A
    /// candidate equal to `cell` is a self-reference.
    pub fn would_create_cycle<'a, I>(&self, cell: CellAddress, candidates: I) -> bool
    where
        I: IntoIterator<Item = &'a CellAddress>,
    {
        candidates
            .into_iter()
            .any(|&candidate| self.reaches(candidate, cell))
    }

    /// Depth-first search from `start` along precedent edges looking for
    /// `target`. Iterative, so chain length does not grow the call stack.
    pub fn reaches(&self, start: CellAddress, target: CellAddress) -> bool {
        let mut visited = AHashSet::new();
        let mut stack = vec![start];

        while let Some(current) = stack.pop() {
            if current == target {
                return true;
            }
            if !visited.insert(current) {
                continue;
            }
            stack.extend(
                self.get_precedents(current)
                    .filter(|precedent| !visited.contains(precedent)),
            );
        }

        false
    }

    /// Clear the entire graph
    pub fn clear(&mut self) {
        self.dependents.clear();
        self.precedents.clear();
    }
}

fn remove_edge(
    map: &mut AHashMap<CellAddress, AHashSet<CellAddress>>,
    from: CellAddress,
    to: CellAddress,
) {
    if let Some(set) = map.get_mut(&from) {
        set.remove(&to);
        if set.is_empty() {
            map.remove(&from);
        }
    }
}
