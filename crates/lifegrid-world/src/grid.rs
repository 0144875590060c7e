//! Flat cell-state storage and the neighbor-count scratch buffer.

use lifegrid_types::CellState;
use serde::Serialize;

use crate::topology::Topology;

/// Live/dead state for every cell, plus a same-sized scratch buffer for
/// neighbor counts.
///
/// Cells are stored flat in the enumeration order defined by [`Topology`]
/// (column-major, `x` outer). The scratch buffer exists so the generation
/// step never allocates; it carries no meaning between ticks.
///
/// A grid is always created from the [`Topology`] it will be simulated
/// with, so the two containers are guaranteed to agree on length.
#[derive(Debug, Clone, Serialize)]
pub struct CellGrid {
    /// Live/dead state per cell.
    cells: Vec<bool>,
    /// Per-cell live-neighbor counts from the most recent generation step.
    #[serde(skip)]
    counts: Vec<u8>,
}

/// Equality considers cell states only; the scratch buffer carries no
/// meaning between ticks.
impl PartialEq for CellGrid {
    fn eq(&self, other: &Self) -> bool {
        self.cells == other.cells
    }
}

impl Eq for CellGrid {}

impl CellGrid {
    /// Create an all-dead grid sized to match `topology`.
    pub fn new(topology: &Topology) -> Self {
        let cell_count = topology.cell_count();
        Self {
            cells: vec![false; cell_count],
            counts: vec![0; cell_count],
        }
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True if the grid holds no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// True if the cell at `index` is alive. Out-of-bounds reads as dead.
    pub fn is_live(&self, index: usize) -> bool {
        self.cells.get(index).copied().unwrap_or(false)
    }

    /// The [`CellState`] of the cell at `index`. Out-of-bounds reads as dead.
    pub fn state(&self, index: usize) -> CellState {
        CellState::from(self.is_live(index))
    }

    /// Set the cell at `index`. Out-of-bounds writes are ignored.
    pub fn set(&mut self, index: usize, alive: bool) {
        if let Some(cell) = self.cells.get_mut(index) {
            *cell = alive;
        }
    }

    /// Flip the cell at `index` and return its new state.
    ///
    /// Out-of-bounds indices leave the grid untouched and report dead.
    pub fn toggle(&mut self, index: usize) -> CellState {
        if let Some(cell) = self.cells.get_mut(index) {
            *cell = !*cell;
            CellState::from(*cell)
        } else {
            CellState::Dead
        }
    }

    /// Kill every cell.
    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    /// Number of live cells.
    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    /// Iterate over `(index, state)` for every cell in enumeration order.
    pub fn states(&self) -> impl Iterator<Item = (usize, CellState)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(index, &alive)| (index, CellState::from(alive)))
    }

    /// The scratch neighbor count for the cell at `index`.
    pub(crate) fn count(&self, index: usize) -> u8 {
        self.counts.get(index).copied().unwrap_or(0)
    }

    /// Store a scratch neighbor count for the cell at `index`.
    pub(crate) fn set_count(&mut self, index: usize, count: u8) {
        if let Some(slot) = self.counts.get_mut(index) {
            *slot = count;
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn grid_5x4() -> (Topology, CellGrid) {
        let topo = Topology::new(5, 4).unwrap();
        let grid = CellGrid::new(&topo);
        (topo, grid)
    }

    #[test]
    fn starts_all_dead() {
        let (topo, grid) = grid_5x4();
        assert_eq!(grid.len(), topo.cell_count());
        assert_eq!(grid.live_count(), 0);
        assert!(grid.states().all(|(_, state)| !state.is_live()));
    }

    #[test]
    fn toggle_flips_and_reports() {
        let (topo, mut grid) = grid_5x4();
        let index = topo.index_of(2, 3).unwrap();
        assert_eq!(grid.toggle(index), CellState::Live);
        assert!(grid.is_live(index));
        assert_eq!(grid.toggle(index), CellState::Dead);
        assert!(!grid.is_live(index));
    }

    #[test]
    fn out_of_bounds_access_is_inert() {
        let (_, mut grid) = grid_5x4();
        let beyond = grid.len();
        assert!(!grid.is_live(beyond));
        assert_eq!(grid.toggle(beyond), CellState::Dead);
        grid.set(beyond, true);
        assert_eq!(grid.live_count(), 0);
    }

    #[test]
    fn clear_kills_everything() {
        let (_, mut grid) = grid_5x4();
        grid.set(0, true);
        grid.set(7, true);
        assert_eq!(grid.live_count(), 2);
        grid.clear();
        assert_eq!(grid.live_count(), 0);
    }
}
