//! Toroidal topology, cell grid, and generation engine for the lifegrid
//! simulator.
//!
//! This crate models the simulation world: a fixed-size toroidal grid of
//! binary cells, the precomputed neighbor relation between them, the Conway
//! generation rule, and the persisted snapshot byte format.
//!
//! # Modules
//!
//! - [`error`] -- Error types for world construction.
//! - [`topology`] -- [`Topology`]: the arena-and-index neighbor graph,
//!   built once at startup with toroidal wraparound.
//! - [`grid`] -- [`CellGrid`]: flat live/dead cell storage plus the
//!   neighbor-count scratch buffer.
//! - [`generation`] -- The two-phase Conway generation step.
//! - [`snapshot`] -- The persisted snapshot byte codec (marker byte plus
//!   one byte per cell).
//!
//! Everything here is pure state and rules; rendering, input, and storage
//! collaborators are wired up in `lifegrid-core`.

pub mod error;
pub mod generation;
pub mod grid;
pub mod snapshot;
pub mod topology;

pub use error::WorldError;
pub use generation::{GenerationSummary, advance};
pub use grid::CellGrid;
pub use topology::Topology;
