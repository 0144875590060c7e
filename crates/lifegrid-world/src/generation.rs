//! The two-phase Conway generation step.
//!
//! [`advance`] computes one generation: first every cell's live-neighbor
//! count is taken from the *current* generation into the grid's scratch
//! buffer, then all transitions are applied from that buffer. A cell's
//! count never observes an already-updated neighbor within the same tick,
//! so the result is independent of enumeration order.
//!
//! The step is a pure function of the current state: advancing two
//! identical grids yields identical results.

use tracing::debug;

use crate::grid::CellGrid;
use crate::topology::Topology;

/// Counts describing what one generation step changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationSummary {
    /// Dead cells that became live.
    pub births: usize,
    /// Live cells that died.
    pub deaths: usize,
    /// Live cells after the step.
    pub live: usize,
}

/// Advance `grid` by one generation under the standard Conway rule.
///
/// A live cell survives with 2 or 3 live neighbors and otherwise dies; a
/// dead cell with exactly 3 live neighbors is born; everything else keeps
/// its state. `grid` must have been created from `topology` so the two
/// agree on cell count.
pub fn advance(grid: &mut CellGrid, topology: &Topology) -> GenerationSummary {
    // Phase 1: neighbor counts from the current generation only.
    for index in 0..grid.len() {
        let count = topology
            .neighbors(index)
            .map(|ring| ring.iter().filter(|&&n| grid.is_live(n)).count())
            .unwrap_or(0);
        grid.set_count(index, u8::try_from(count).unwrap_or(u8::MAX));
    }

    // Phase 2: apply all transitions from the scratch buffer.
    let mut births: usize = 0;
    let mut deaths: usize = 0;
    for index in 0..grid.len() {
        let alive = grid.is_live(index);
        let next = matches!((alive, grid.count(index)), (true, 2 | 3) | (false, 3));
        if next != alive {
            if next {
                births = births.saturating_add(1);
            } else {
                deaths = deaths.saturating_add(1);
            }
            grid.set(index, next);
        }
    }

    let live = grid.live_count();
    debug!(births, deaths, live, "generation advanced");
    GenerationSummary {
        births,
        deaths,
        live,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn world(width: usize, height: usize) -> (Topology, CellGrid) {
        let topo = Topology::new(width, height).unwrap();
        let grid = CellGrid::new(&topo);
        (topo, grid)
    }

    fn seed(grid: &mut CellGrid, topo: &Topology, cells: &[(usize, usize)]) {
        for &(x, y) in cells {
            grid.set(topo.index_of(x, y).unwrap(), true);
        }
    }

    fn live_cells(grid: &CellGrid, topo: &Topology) -> Vec<(usize, usize)> {
        grid.states()
            .filter(|(_, state)| state.is_live())
            .map(|(index, _)| topo.coords_of(index).unwrap())
            .collect()
    }

    #[test]
    fn lone_cell_dies_of_underpopulation() {
        let (topo, mut grid) = world(20, 18);
        seed(&mut grid, &topo, &[(10, 9)]);
        let summary = advance(&mut grid, &topo);
        assert_eq!(summary.deaths, 1);
        assert_eq!(grid.live_count(), 0);
    }

    #[test]
    fn dead_cell_with_three_neighbors_is_born() {
        let (topo, mut grid) = world(20, 18);
        seed(&mut grid, &topo, &[(5, 5), (6, 5), (5, 6)]);
        advance(&mut grid, &topo);
        assert!(grid.is_live(topo.index_of(6, 6).unwrap()));
    }

    #[test]
    fn block_is_a_still_life() {
        let (topo, mut grid) = world(20, 18);
        seed(&mut grid, &topo, &[(8, 8), (9, 8), (8, 9), (9, 9)]);
        let before = grid.clone();
        for _ in 0..10 {
            advance(&mut grid, &topo);
        }
        assert_eq!(grid, before);
    }

    #[test]
    fn glider_translates_by_one_one_after_four_generations() {
        let (topo, mut grid) = world(20, 18);
        // Classic glider anchored at (3, 3), well clear of the wrap.
        let anchor = (3, 3);
        let pattern = [(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)];
        let seeded: Vec<(usize, usize)> = pattern
            .iter()
            .map(|&(dx, dy)| (anchor.0 + dx, anchor.1 + dy))
            .collect();
        seed(&mut grid, &topo, &seeded);

        for _ in 0..4 {
            advance(&mut grid, &topo);
        }

        let mut expected: Vec<(usize, usize)> =
            seeded.iter().map(|&(x, y)| (x + 1, y + 1)).collect();
        expected.sort_unstable();
        let mut actual = live_cells(&grid, &topo);
        actual.sort_unstable();
        assert_eq!(actual, expected);
    }

    #[test]
    fn blinker_oscillates_across_the_wrap() {
        // A vertical blinker straddling the top edge exercises toroidal
        // neighbor counting: (0, 17), (0, 0), (0, 1) on a 20x18 grid.
        let (topo, mut grid) = world(20, 18);
        seed(&mut grid, &topo, &[(0, 17), (0, 0), (0, 1)]);
        let before = grid.clone();

        advance(&mut grid, &topo);
        // Horizontal phase: (19, 0), (0, 0), (1, 0).
        let mut actual = live_cells(&grid, &topo);
        actual.sort_unstable();
        assert_eq!(actual, vec![(0, 0), (1, 0), (19, 0)]);

        advance(&mut grid, &topo);
        assert_eq!(grid, before);
    }

    #[test]
    fn step_is_a_pure_function_of_state() {
        let (topo, mut first) = world(20, 18);
        seed(
            &mut first,
            &topo,
            &[(4, 3), (5, 4), (3, 5), (4, 5), (5, 5), (10, 10), (11, 10)],
        );
        let mut second = first.clone();

        let summary_first = advance(&mut first, &topo);
        let summary_second = advance(&mut second, &topo);

        assert_eq!(first, second);
        assert_eq!(summary_first, summary_second);
    }
}
