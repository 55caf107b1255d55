//! # Simulation Configuration
//!
//! Loaded once at startup from TOML. Every section is optional:
//!
//! ```toml
//! seed = 42
//!
//! [world]
//! width = 128
//! height = 128
//! chunk_size = 16
//!
//! [terrain]
//! threshold = 0.15
//!
//! [player]
//! spawn_x = -32.0
//! spawn_y = 25.0
//!
//! [camera]
//! scale = 8.0
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tileworld_core::WorldConfig;
use tileworld_procedural::TerrainConfig;

use crate::error::{SimulationError, SimulationResult};

/// Where the player starts.
///
/// View coordinates: the player stands on world cell `(-x, -y)`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Spawn x in view coordinates.
    pub spawn_x: f64,
    /// Spawn y in view coordinates.
    pub spawn_y: f64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            spawn_x: -32.0,
            spawn_y: 25.0,
        }
    }
}

/// Camera zoom limits and defaults.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Starting scale. A cell is `2 * scale` by `scale` screen units.
    pub scale: f64,
    /// Scale restored by a zoom reset.
    pub reset_scale: f64,
    /// Zoom step per input.
    pub zoom_step: f64,
    /// Zooming out stops once the scale is at or below this.
    pub min_scale: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            scale: 8.0,
            reset_scale: 4.0,
            zoom_step: 0.25,
            min_scale: 0.5,
        }
    }
}

/// Full startup configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Seed of the terrain roll source.
    pub seed: u64,
    /// World extent.
    pub world: WorldConfig,
    /// Terrain rule parameters.
    pub terrain: TerrainConfig,
    /// Player spawn.
    pub player: PlayerConfig,
    /// Camera zoom.
    pub camera: CameraConfig,
}

impl SimulationConfig {
    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `Config` if the text is not valid TOML or has mistyped keys.
    pub fn from_toml_str(text: &str) -> SimulationResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Loads a configuration file.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file cannot be read and `Config` if it does not
    /// parse.
    pub fn load(path: impl AsRef<Path>) -> SimulationResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| SimulationError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}
