//! Error types for the `lifegrid-engine` binary.

/// Errors that can occur during engine startup or the run itself.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: lifegrid_core::config::ConfigError,
    },

    /// World construction failed.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: lifegrid_world::WorldError,
    },

    /// Terminal setup or teardown failed.
    #[error("terminal error: {source}")]
    Terminal {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// The simulation loop failed.
    #[error("runner error: {source}")]
    Runner {
        /// The underlying runner error.
        #[from]
        source: lifegrid_core::runner::RunnerError,
    },
}
