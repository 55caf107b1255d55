//! # Tileworld Procedural Generation
//!
//! Deterministic terrain decisions for a fixed-size tile world.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: noise has no seed and no state; the only
//!    randomness is a source the caller passes in
//! 2. **Tile-agnostic**: produces `TerrainCell` values, never tile ids
//! 3. **Cheap**: O(1) per sample, no allocations
//!
//! ## Core Components
//!
//! - `NoiseField`: fractal value noise sampler
//! - `TerrainRule`: noise + depth + random roll -> `TerrainCell`
//!
//! ## Example
//!
//! ```rust
//! use rand::rngs::mock::StepRng;
//! use tileworld_procedural::{TerrainCell, TerrainRule};
//!
//! let rule = TerrainRule::default();
//! let mut rng = StepRng::new(0, 1);
//!
//! // Everything past the depth cutoff is empty.
//! assert_eq!(rule.classify(10, 120, &mut rng), TerrainCell::Air);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod noise;
pub mod terrain;

pub use noise::{fractal, hash_noise, interpolated_noise, smoothed_noise, NoiseField};
pub use terrain::{TerrainCell, TerrainConfig, TerrainRule};
