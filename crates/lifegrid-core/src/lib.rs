//! Cursor, input dispatch, tick cycle, and persistence seams for the
//! lifegrid simulator.
//!
//! This crate owns everything between the pure world rules
//! (`lifegrid-world`) and the hardware-facing frontend (`lifegrid-engine`):
//! the cursor controller, edge-triggered input sampling, the per-tick
//! paused/running state machine, the scoped save-store access window, typed
//! configuration, and the bounded async run loop.
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `lifegrid-config.yaml` into
//!   strongly-typed structs.
//! - [`cursor`] -- The toroidal cursor controller and its pixel projection.
//! - [`input`] -- [`InputSource`] trait, edge-triggered [`InputSampler`],
//!   and the [`ScriptedInput`] test stub.
//! - [`render`] -- [`TileSink`], the one-way rendering notification seam.
//! - [`store`] -- [`SaveStore`] trait, the RAII access window, and
//!   snapshot save/load.
//! - [`tick`] -- [`SimulationState`] and the single-tick dispatch.
//! - [`runner`] -- The bounded, fixed-rate async simulation loop.
//!
//! [`InputSource`]: input::InputSource
//! [`InputSampler`]: input::InputSampler
//! [`ScriptedInput`]: input::ScriptedInput
//! [`TileSink`]: render::TileSink
//! [`SaveStore`]: store::SaveStore
//! [`SimulationState`]: tick::SimulationState

pub mod config;
pub mod cursor;
pub mod input;
pub mod render;
pub mod runner;
pub mod store;
pub mod tick;
