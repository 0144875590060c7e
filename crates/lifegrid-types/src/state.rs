//! Cell state and simulation mode enums.

use serde::{Deserialize, Serialize};

/// The live/dead state of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    /// The cell is alive.
    Live,
    /// The cell is dead.
    Dead,
}

impl CellState {
    /// True if the cell is alive.
    pub const fn is_live(self) -> bool {
        matches!(self, Self::Live)
    }
}

impl From<bool> for CellState {
    fn from(alive: bool) -> Self {
        if alive { Self::Live } else { Self::Dead }
    }
}

impl From<CellState> for bool {
    fn from(state: CellState) -> Self {
        state.is_live()
    }
}

/// The two-state simulation mode flag.
///
/// The simulator starts paused. The mode changes only in response to the
/// run-toggle button; no other event touches it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Mode {
    /// Editing mode: the cursor is visible and the grid can be edited.
    #[default]
    Paused,
    /// Simulation mode: one generation runs per tick.
    Running,
}

impl Mode {
    /// Return the opposite mode.
    pub const fn toggled(self) -> Self {
        match self {
            Self::Paused => Self::Running,
            Self::Running => Self::Paused,
        }
    }

    /// True while the simulation is running generations.
    pub const fn is_running(self) -> bool {
        matches!(self, Self::Running)
    }
}
