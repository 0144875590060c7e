//! Terminal frontend binary for the lifegrid simulator.
//!
//! Wires together the simulation core, a crossterm rendering sink, a
//! keyboard input source, and a file-backed save store, then runs the
//! fixed-rate tick loop until the player quits or the configured tick
//! bound is reached.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing, to stderr)
//! 2. Load configuration from `lifegrid-config.yaml`
//! 3. Build the simulation state (topology, empty grid, centered cursor)
//! 4. Open the save store and restore a saved grid if one exists
//! 5. Set up the terminal sink and paint the initial frame
//! 6. Run the simulation loop
//! 7. Log the result

mod error;
mod store;
mod terminal;

use std::path::Path;

use lifegrid_core::config::SimulationConfig;
use lifegrid_core::runner::{self, RunBounds};
use lifegrid_core::tick::SimulationState;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;
use crate::store::FileStore;
use crate::terminal::{TerminalInput, TerminalSink};

/// Application entry point for the terminal frontend.
///
/// Initializes all subsystems and runs the simulation loop.
///
/// # Errors
///
/// Returns an error if any initialization step or the simulation itself
/// fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Initialize structured logging. The alternate screen owns stdout,
    //    so logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    info!("lifegrid-engine starting");

    // 2. Load configuration.
    let config = load_config()?;
    info!(
        world_name = config.world.name,
        width = config.grid.width,
        height = config.grid.height,
        tick_interval_ms = config.world.tick_interval_ms,
        "Configuration loaded"
    );

    // 3. Build the simulation state.
    let mut state = SimulationState::new(&config).map_err(EngineError::from)?;
    info!(
        cells = state.topology.cell_count(),
        "Simulation state initialized"
    );

    // 4. Restore a saved grid, if one exists.
    let mut save_store = FileStore::new(&config.world.save_path);
    let restored = state.load_saved(&mut save_store);
    info!(
        save_path = config.world.save_path,
        restored, "Save store opened"
    );

    // 5. Set up the terminal and paint the initial frame.
    let mut sink = TerminalSink::new(&config.grid, &config.display)?;
    state.render_full(&mut sink);
    let mut input = TerminalInput::new();
    info!("Terminal frontend ready");

    // 6. Run the simulation.
    let bounds = RunBounds {
        max_ticks: config.simulation.max_ticks,
        tick_interval_ms: config.world.tick_interval_ms,
    };
    let result = runner::run_simulation(
        &mut state,
        &mut input,
        &mut sink,
        &mut save_store,
        bounds,
        &mut runner::NoOpCallback,
    )
    .await
    .map_err(EngineError::from)?;

    // Restore the terminal before the final log lines.
    drop(sink);

    // 7. Log results.
    runner::log_run_end(&result);
    info!(
        end_reason = ?result.end_reason,
        total_ticks = result.total_ticks,
        "lifegrid-engine shutdown complete"
    );

    Ok(())
}

/// Load the simulation configuration from `lifegrid-config.yaml`.
///
/// Looks for the config file relative to the current working directory;
/// falls back to the built-in defaults when it is absent.
fn load_config() -> Result<SimulationConfig, EngineError> {
    let config_path = Path::new("lifegrid-config.yaml");
    if config_path.exists() {
        let config = SimulationConfig::from_file(config_path)?;
        Ok(config)
    } else {
        info!("Config file not found, using defaults");
        Ok(SimulationConfig::default())
    }
}
