//! # Tileworld
//!
//! Session layer over the tile-world engine.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────┐
//! │  tileworld               │  Simulation, config, hotbar, camera
//! ├──────────────────────────┤
//! │  tileworld_core          │  registry, chunks, World::place
//! ├──────────────────────────┤
//! │  tileworld_procedural    │  noise, terrain rule
//! └──────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use tileworld::{Simulation, SimulationConfig};
//!
//! let config = SimulationConfig::from_toml_str("[world]\nwidth = 32\nheight = 32").unwrap();
//! let mut sim = Simulation::new(config).unwrap();
//!
//! sim.hotbar_mut().select(2);
//! sim.build_at((3, 3));
//! assert_eq!(sim.world().get_state((3, 3)).kind, sim.tiles().dirt);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod camera;
pub mod config;
pub mod error;
pub mod hotbar;
pub mod simulation;

// Re-export the engine crates
pub use tileworld_core as core;
pub use tileworld_procedural as procedural;

pub use camera::{Camera, Player};
pub use config::{CameraConfig, PlayerConfig, SimulationConfig};
pub use error::{SimulationError, SimulationResult};
pub use hotbar::{Hotbar, HOTBAR_SLOTS};
pub use simulation::Simulation;
