//! The toroidal cursor controller.
//!
//! The cursor is a single mutable position on the same torus as the cell
//! grid. Directional input moves it by unit deltas with wraparound, and the
//! tick layer projects the new position to pixels for the rendering sink.

use lifegrid_world::Topology;

use crate::config::DisplayConfig;

/// The player's cursor position on the toroidal grid.
///
/// Always in bounds: `0 <= x < width`, `0 <= y < height`. Created once at
/// the grid center and mutated only through [`Cursor::move_by`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    /// Column position in cells.
    x: usize,
    /// Row position in cells.
    y: usize,
}

impl Cursor {
    /// Create a cursor at the startup position `(width / 2 - 1,
    /// height / 2 - 1)`, just above and left of the grid center.
    pub const fn centered(topology: &Topology) -> Self {
        Self {
            x: (topology.width() / 2).saturating_sub(1),
            y: (topology.height() / 2).saturating_sub(1),
        }
    }

    /// Column position in cells.
    pub const fn x(&self) -> usize {
        self.x
    }

    /// Row position in cells.
    pub const fn y(&self) -> usize {
        self.y
    }

    /// Move by unit deltas with toroidal wraparound, each axis independent.
    ///
    /// Wrapping uses explicit boundary checks, semantically equivalent to
    /// modulo arithmetic: leaving the left edge re-enters at the right edge
    /// and so on. Deltas outside `{-1, 0, 1}` are clamped per axis.
    pub fn move_by(&mut self, dx: i8, dy: i8, topology: &Topology) {
        self.x = wrap_step(self.x, dx, topology.width());
        self.y = wrap_step(self.y, dy, topology.height());
    }

    /// The flat cell index under the cursor.
    pub fn index(&self, topology: &Topology) -> Option<usize> {
        topology.index_of(self.x, self.y)
    }

    /// Project the cursor to its pixel position:
    /// `tile_size * (coord + offset)` per axis.
    pub const fn pixel_position(&self, display: &DisplayConfig) -> (usize, usize) {
        let px = display
            .tile_size
            .saturating_mul(self.x.saturating_add(display.cursor_offset_x));
        let py = display
            .tile_size
            .saturating_mul(self.y.saturating_add(display.cursor_offset_y));
        (px, py)
    }
}

/// Apply a unit delta to one axis with explicit boundary-check wrapping.
const fn wrap_step(coord: usize, delta: i8, extent: usize) -> usize {
    if delta < 0 {
        if coord == 0 {
            extent.saturating_sub(1)
        } else {
            coord.saturating_sub(1)
        }
    } else if delta > 0 {
        let next = coord.saturating_add(1);
        if next >= extent { 0 } else { next }
    } else {
        coord
    }
}
