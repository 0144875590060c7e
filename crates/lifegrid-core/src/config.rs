//! Configuration loading and typed config structures.
//!
//! The canonical configuration lives in `lifegrid-config.yaml` at the
//! project root. This module defines strongly-typed structs mirroring the
//! YAML structure, with per-field defaults matching the classic handheld
//! layout (a 20x18 tile grid, 8-pixel tiles, roughly 60 ticks per second).

use std::path::Path;

use serde::Deserialize;

use lifegrid_world::topology::MIN_AXIS;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// A grid axis is below the minimum required for a valid torus.
    #[error("grid {axis} must be at least {min} (got {size})")]
    InvalidGrid {
        /// Which axis is invalid ("width" or "height").
        axis: &'static str,
        /// The minimum allowed extent.
        min: usize,
        /// The extent that was configured.
        size: usize,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level simulation configuration.
///
/// Mirrors the structure of `lifegrid-config.yaml`. Every field has a
/// default, so an absent or partial file still yields a runnable setup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SimulationConfig {
    /// World-level settings (name, tick pacing).
    #[serde(default)]
    pub world: WorldConfig,

    /// Grid dimensions.
    #[serde(default)]
    pub grid: GridConfig,

    /// Display geometry used to project the cursor to pixels.
    #[serde(default)]
    pub display: DisplayConfig,

    /// Run boundary parameters.
    #[serde(default)]
    pub simulation: SimulationBoundsConfig,
}

impl SimulationConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::InvalidGrid`] if the grid dimensions are invalid.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::InvalidGrid`] if the grid dimensions are invalid.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(yaml)?;
        config.grid.validate()?;
        Ok(config)
    }
}

/// World-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WorldConfig {
    /// Human-readable simulation name.
    #[serde(default = "default_world_name")]
    pub name: String,

    /// Real-time milliseconds per tick (the frame-wait substitute).
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Path of the persisted save image.
    #[serde(default = "default_save_path")]
    pub save_path: String,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            name: default_world_name(),
            tick_interval_ms: default_tick_interval_ms(),
            save_path: default_save_path(),
        }
    }
}

/// Grid dimensions in cells.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GridConfig {
    /// Grid width in cells. Must be at least 3.
    #[serde(default = "default_width")]
    pub width: usize,

    /// Grid height in cells. Must be at least 3.
    #[serde(default = "default_height")]
    pub height: usize,
}

impl GridConfig {
    /// Check the toroidal minimum-extent precondition.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidGrid`] if either axis is below 3.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.width < MIN_AXIS {
            return Err(ConfigError::InvalidGrid {
                axis: "width",
                min: MIN_AXIS,
                size: self.width,
            });
        }
        if self.height < MIN_AXIS {
            return Err(ConfigError::InvalidGrid {
                axis: "height",
                min: MIN_AXIS,
                size: self.height,
            });
        }
        Ok(())
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
        }
    }
}

/// Display geometry for projecting grid coordinates to pixels.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DisplayConfig {
    /// Tile edge length in pixels.
    #[serde(default = "default_tile_size")]
    pub tile_size: usize,

    /// Horizontal cursor offset in tiles, aligning the sprite to the cells.
    #[serde(default = "default_cursor_offset_x")]
    pub cursor_offset_x: usize,

    /// Vertical cursor offset in tiles.
    #[serde(default = "default_cursor_offset_y")]
    pub cursor_offset_y: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            tile_size: default_tile_size(),
            cursor_offset_x: default_cursor_offset_x(),
            cursor_offset_y: default_cursor_offset_y(),
        }
    }
}

/// Run boundary parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SimulationBoundsConfig {
    /// Maximum number of ticks to run (0 = unlimited).
    #[serde(default)]
    pub max_ticks: u64,
}

fn default_world_name() -> String {
    String::from("lifegrid")
}

const fn default_tick_interval_ms() -> u64 {
    17
}

fn default_save_path() -> String {
    String::from("lifegrid-save.sav")
}

const fn default_width() -> usize {
    20
}

const fn default_height() -> usize {
    18
}

const fn default_tile_size() -> usize {
    8
}

const fn default_cursor_offset_x() -> usize {
    1
}

const fn default_cursor_offset_y() -> usize {
    2
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_handheld_layout() {
        let config = SimulationConfig::default();
        assert_eq!(config.grid.width, 20);
        assert_eq!(config.grid.height, 18);
        assert_eq!(config.display.tile_size, 8);
        assert_eq!(config.display.cursor_offset_x, 1);
        assert_eq!(config.display.cursor_offset_y, 2);
        assert_eq!(config.world.tick_interval_ms, 17);
        assert_eq!(config.simulation.max_ticks, 0);
    }

    #[test]
    fn parses_partial_yaml_with_defaults() {
        let config = SimulationConfig::parse(
            "world:\n  tick_interval_ms: 100\ngrid:\n  width: 32\n",
        )
        .unwrap();
        assert_eq!(config.world.tick_interval_ms, 100);
        assert_eq!(config.grid.width, 32);
        assert_eq!(config.grid.height, 18);
        assert_eq!(config.world.name, "lifegrid");
    }

    #[test]
    fn rejects_narrow_grid() {
        let result = SimulationConfig::parse("grid:\n  width: 2\n");
        assert!(matches!(
            result,
            Err(ConfigError::InvalidGrid { axis: "width", .. })
        ));
        let result = SimulationConfig::parse("grid:\n  height: 0\n");
        assert!(matches!(
            result,
            Err(ConfigError::InvalidGrid { axis: "height", .. })
        ));
    }

    #[test]
    fn rejects_malformed_yaml() {
        assert!(matches!(
            SimulationConfig::parse(": not yaml"),
            Err(ConfigError::Yaml { .. })
        ));
    }
}
