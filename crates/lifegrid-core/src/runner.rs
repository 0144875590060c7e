//! The bounded, fixed-rate simulation loop.
//!
//! [`run_simulation`] drives [`run_tick`] at a fixed real-time rate, using
//! an async sleep where a display would impose a vertical-sync wait. The
//! ordering guarantee holds regardless of pacing: exactly one input sample
//! and at most one generation step per tick.
//!
//! A run ends at the tick bound (`max_ticks`, 0 = unlimited) or on a
//! frontend stop request, so tests and terminal sessions can end cleanly.
//!
//! [`run_tick`]: crate::tick::run_tick

use std::time::Duration;

use tracing::info;

use crate::input::InputSource;
use crate::render::TileSink;
use crate::store::SaveStore;
use crate::tick::{self, SimulationState, TickError, TickSummary};

/// Errors that can occur during the simulation run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// A tick execution failed.
    #[error("tick error: {source}")]
    Tick {
        /// The underlying tick error.
        #[from]
        source: TickError,
    },
}

/// Reason why the simulation run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// Reached the configured `max_ticks` limit.
    MaxTicksReached,
    /// The input frontend requested a stop.
    StopRequested,
}

/// Bounds and pacing for a simulation run.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunBounds {
    /// Maximum number of ticks to run (0 = unlimited).
    pub max_ticks: u64,
    /// Real-time milliseconds to wait between ticks (0 = no wait).
    pub tick_interval_ms: u64,
}

/// Result of a simulation run.
#[derive(Debug)]
pub struct SimulationResult {
    /// Why the run ended.
    pub end_reason: EndReason,
    /// The last tick summary, if any tick completed.
    pub final_summary: Option<TickSummary>,
    /// Total number of ticks executed.
    pub total_ticks: u64,
}

/// Callback invoked after each tick completes.
///
/// Frontends can use this to flush their display or surface per-tick
/// statistics without coupling the loop to a concrete observer.
pub trait TickCallback {
    /// Called after a tick completes successfully.
    fn on_tick(&mut self, summary: &TickSummary, state: &SimulationState);
}

/// A no-op tick callback for testing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpCallback;

impl TickCallback for NoOpCallback {
    fn on_tick(&mut self, _summary: &TickSummary, _state: &SimulationState) {}
}

/// Run the simulation loop until a termination condition is met.
///
/// Per iteration: check the frontend stop hook, execute one tick, notify
/// the callback, check the tick bound, then wait out the tick interval.
///
/// # Errors
///
/// Returns [`RunnerError`] if a tick execution fails unrecoverably.
pub async fn run_simulation(
    state: &mut SimulationState,
    input: &mut dyn InputSource,
    sink: &mut dyn TileSink,
    save_store: &mut dyn SaveStore,
    bounds: RunBounds,
    callback: &mut dyn TickCallback,
) -> Result<SimulationResult, RunnerError> {
    let mut last_summary: Option<TickSummary> = None;
    let mut total_ticks: u64 = 0;

    info!(
        max_ticks = bounds.max_ticks,
        tick_interval_ms = bounds.tick_interval_ms,
        "simulation starting"
    );

    loop {
        if input.stop_requested() {
            info!(total_ticks, "frontend requested stop");
            return Ok(SimulationResult {
                end_reason: EndReason::StopRequested,
                final_summary: last_summary,
                total_ticks,
            });
        }

        let summary = tick::run_tick(state, input, sink, save_store)?;
        total_ticks = total_ticks.saturating_add(1);

        callback.on_tick(&summary, state);

        if bounds.max_ticks > 0 && total_ticks >= bounds.max_ticks {
            info!(total_ticks, "tick limit reached");
            return Ok(SimulationResult {
                end_reason: EndReason::MaxTicksReached,
                final_summary: Some(summary),
                total_ticks,
            });
        }

        last_summary = Some(summary);

        if bounds.tick_interval_ms > 0 {
            tokio::time::sleep(Duration::from_millis(bounds.tick_interval_ms)).await;
        }
    }
}

/// Log the end-of-run summary.
pub fn log_run_end(result: &SimulationResult) {
    info!(
        end_reason = ?result.end_reason,
        total_ticks = result.total_ticks,
        final_tick = result.final_summary.as_ref().map(|s| s.tick),
        final_live_cells = result.final_summary.as_ref().map(|s| s.live_cells),
        "simulation ended"
    );
}
