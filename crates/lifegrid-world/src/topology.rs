//! The toroidal neighbor graph, built once at startup.
//!
//! [`Topology`] stores, for every cell, the flat indices of its 8 neighbors
//! on a toroidal grid: each axis wraps, so edge and corner cells see
//! neighbors on the opposite edge. The relation is computed once at
//! construction and never rewired; only cell *state* (held separately in
//! [`CellGrid`]) mutates after startup.
//!
//! # Enumeration order
//!
//! Flat indices enumerate cells column-major: `index = x * height + y`,
//! with `x` as the outer loop. The snapshot codec relies on the same order,
//! so the contract lives in one place -- [`Topology::index_of`] and
//! [`Topology::coords_of`] are the only coordinate/index conversions in the
//! workspace.
//!
//! Each cell's 8 neighbors are enumerated `dx` outer, `dy` inner over
//! `{-1, 0, 1}² \ {(0, 0)}`. The order is stable and covers each of the 8
//! offsets exactly once.
//!
//! [`CellGrid`]: crate::grid::CellGrid

use crate::error::WorldError;

/// Minimum extent of each grid axis.
///
/// Below 3 the wraparound would alias a cell with its own neighbor ring.
pub const MIN_AXIS: usize = 3;

/// Number of neighbors of every cell on a torus.
pub const NEIGHBOR_COUNT: usize = 8;

/// The fixed adjacency relation between cells on a toroidal grid.
///
/// Neighbor links are stored as indices into the flat cell arena rather
/// than references, which keeps the graph trivially serializable and free
/// of aliasing concerns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topology {
    /// Grid width in cells.
    width: usize,
    /// Grid height in cells.
    height: usize,
    /// Per-cell neighbor indices, in the documented enumeration order.
    neighbors: Vec<[usize; NEIGHBOR_COUNT]>,
}

impl Topology {
    /// Build the neighbor relation for a `width` x `height` torus.
    ///
    /// Runs in `O(width * height)` and allocates the neighbor storage once.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidDimensions`] if either axis is below
    /// [`MIN_AXIS`], or [`WorldError::ArithmeticOverflow`] if the cell
    /// count does not fit in `usize`.
    pub fn new(width: usize, height: usize) -> Result<Self, WorldError> {
        if width < MIN_AXIS {
            return Err(WorldError::InvalidDimensions {
                axis: "width",
                min: MIN_AXIS,
                size: width,
            });
        }
        if height < MIN_AXIS {
            return Err(WorldError::InvalidDimensions {
                axis: "height",
                min: MIN_AXIS,
                size: height,
            });
        }

        let cell_count = width
            .checked_mul(height)
            .ok_or(WorldError::ArithmeticOverflow)?;

        let mut neighbors = Vec::with_capacity(cell_count);
        for x in 0..width {
            for y in 0..height {
                neighbors.push(neighbor_ring(x, y, width, height));
            }
        }

        Ok(Self {
            width,
            height,
            neighbors,
        })
    }

    /// Grid width in cells.
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells.
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.neighbors.len()
    }

    /// Convert grid coordinates to a flat index (column-major).
    ///
    /// Returns `None` if either coordinate is out of bounds.
    pub fn index_of(&self, x: usize, y: usize) -> Option<usize> {
        if x < self.width && y < self.height {
            x.checked_mul(self.height)?.checked_add(y)
        } else {
            None
        }
    }

    /// Convert a flat index back to grid coordinates.
    ///
    /// Returns `None` if the index is out of bounds.
    pub fn coords_of(&self, index: usize) -> Option<(usize, usize)> {
        if index < self.cell_count() && self.height > 0 {
            let x = index.checked_div(self.height)?;
            let y = index.checked_rem(self.height)?;
            Some((x, y))
        } else {
            None
        }
    }

    /// The 8 neighbor indices of the cell at `index`.
    ///
    /// Returns `None` if the index is out of bounds.
    pub fn neighbors(&self, index: usize) -> Option<&[usize; NEIGHBOR_COUNT]> {
        self.neighbors.get(index)
    }
}

/// Compute the 8 wrapped neighbor indices of cell `(x, y)`.
fn neighbor_ring(x: usize, y: usize, width: usize, height: usize) -> [usize; NEIGHBOR_COUNT] {
    let mut ring = [0; NEIGHBOR_COUNT];
    let mut slot = ring.iter_mut();
    for dx in [-1i8, 0, 1] {
        for dy in [-1i8, 0, 1] {
            if dx == 0 && dy == 0 {
                continue;
            }
            let nx = wrap(x, dx, width);
            let ny = wrap(y, dy, height);
            if let Some(entry) = slot.next() {
                *entry = nx.saturating_mul(height).saturating_add(ny);
            }
        }
    }
    ring
}

/// Apply a unit delta to a coordinate with toroidal wraparound.
///
/// Implemented with explicit boundary checks rather than modulo:
/// `0 - 1` wraps to `extent - 1` and `extent - 1 + 1` wraps to `0`.
const fn wrap(coord: usize, delta: i8, extent: usize) -> usize {
    match delta {
        -1 => {
            if coord == 0 {
                extent.saturating_sub(1)
            } else {
                coord.saturating_sub(1)
            }
        }
        1 => {
            let next = coord.saturating_add(1);
            if next >= extent { 0 } else { next }
        }
        _ => coord,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    #[test]
    fn rejects_narrow_axes() {
        assert!(matches!(
            Topology::new(2, 18),
            Err(WorldError::InvalidDimensions { axis: "width", .. })
        ));
        assert!(matches!(
            Topology::new(20, 1),
            Err(WorldError::InvalidDimensions { axis: "height", .. })
        ));
        assert!(Topology::new(3, 3).is_ok());
    }

    #[test]
    fn every_cell_has_eight_distinct_in_bounds_neighbors() {
        let topo = Topology::new(5, 4).unwrap();
        for index in 0..topo.cell_count() {
            let ring = topo.neighbors(index).unwrap();
            let distinct: BTreeSet<usize> = ring.iter().copied().collect();
            assert_eq!(distinct.len(), NEIGHBOR_COUNT, "cell {index}");
            for &n in ring {
                assert!(n < topo.cell_count());
                assert_ne!(n, index, "cell {index} is its own neighbor");
            }
        }
    }

    #[test]
    fn neighbor_relation_is_symmetric() {
        let topo = Topology::new(20, 18).unwrap();
        for index in 0..topo.cell_count() {
            for &n in topo.neighbors(index).unwrap() {
                let back = topo.neighbors(n).unwrap();
                assert!(
                    back.contains(&index),
                    "cell {n} does not see {index} back"
                );
            }
        }
    }

    #[test]
    fn left_edge_wraps_to_right_edge() {
        let topo = Topology::new(20, 18).unwrap();
        let origin = topo.index_of(0, 5).unwrap();
        let wrapped = topo.index_of(19, 5).unwrap();
        assert!(topo.neighbors(origin).unwrap().contains(&wrapped));
    }

    #[test]
    fn corner_sees_opposite_corner() {
        let topo = Topology::new(6, 5).unwrap();
        let corner = topo.index_of(0, 0).unwrap();
        let opposite = topo.index_of(5, 4).unwrap();
        assert!(topo.neighbors(corner).unwrap().contains(&opposite));
    }

    #[test]
    fn index_round_trips_through_coords() {
        let topo = Topology::new(7, 9).unwrap();
        for x in 0..7 {
            for y in 0..9 {
                let index = topo.index_of(x, y).unwrap();
                assert_eq!(topo.coords_of(index), Some((x, y)));
            }
        }
        assert_eq!(topo.index_of(7, 0), None);
        assert_eq!(topo.index_of(0, 9), None);
        assert_eq!(topo.coords_of(7 * 9), None);
    }

    #[test]
    fn neighbor_order_is_stable() {
        let a = Topology::new(5, 5).unwrap();
        let b = Topology::new(5, 5).unwrap();
        assert_eq!(a, b);
    }
}
