//! Shared type definitions for the lifegrid simulator.
//!
//! This crate holds the leaf vocabulary used across the workspace:
//!
//! - [`Buttons`] -- the bitmask of input buttons sampled once per tick.
//! - [`CellState`] -- the live/dead state of a single grid cell.
//! - [`Mode`] -- the two-state simulation mode flag (paused or running).
//!
//! It deliberately contains no behavior beyond conversions; the simulation
//! rules live in `lifegrid-world` and the dispatch logic in `lifegrid-core`.

pub mod buttons;
pub mod state;

pub use buttons::Buttons;
pub use state::{CellState, Mode};
