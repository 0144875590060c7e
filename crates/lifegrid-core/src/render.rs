//! The rendering notification seam.
//!
//! The core never draws anything itself; it emits one-way, fire-and-forget
//! notifications through [`TileSink`] whenever a cell's visual state, the
//! cursor, or the saved marker should change. No return value is ever
//! consumed, so a sink cannot influence simulation state.

use lifegrid_types::CellState;

/// One-way notifications from the core to the display subsystem.
pub trait TileSink {
    /// Set the visual for the cell at grid coordinate `(x, y)`.
    fn set_cell(&mut self, x: usize, y: usize, state: CellState);

    /// Move the cursor visual to a pixel position.
    fn move_cursor(&mut self, pixel_x: usize, pixel_y: usize);

    /// Show or hide the cursor visual.
    fn set_cursor_visible(&mut self, visible: bool);

    /// Reset every cell visual to the dead state.
    fn clear_all(&mut self);

    /// Paint a marker tile at grid coordinate `(x, y)`.
    fn set_marker(&mut self, x: usize, y: usize, tile: u8);
}

/// A sink that discards every notification, for tests and headless runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpSink;

impl TileSink for NoOpSink {
    fn set_cell(&mut self, _x: usize, _y: usize, _state: CellState) {}
    fn move_cursor(&mut self, _pixel_x: usize, _pixel_y: usize) {}
    fn set_cursor_visible(&mut self, _visible: bool) {}
    fn clear_all(&mut self) {}
    fn set_marker(&mut self, _x: usize, _y: usize, _tile: u8) {}
}
