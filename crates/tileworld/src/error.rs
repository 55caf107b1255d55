//! # Simulation Error Types
//!
//! Everything that can fail while configuring or building a simulation.

use std::path::PathBuf;

use thiserror::Error;
use tileworld_core::WorldError;

/// Errors that can occur while setting up a simulation.
#[derive(Error, Debug)]
pub enum SimulationError {
    /// Building or generating the world failed.
    #[error("world error: {0}")]
    World(#[from] WorldError),

    /// The configuration text is not valid TOML for `SimulationConfig`.
    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// The configuration file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Result type for simulation operations.
pub type SimulationResult<T> = Result<T, SimulationError>;
