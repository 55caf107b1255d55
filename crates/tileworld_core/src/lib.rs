//! # Tileworld Core Engine
//!
//! A fixed-size 2D tile world:
//! - A capacity-bounded registry of tile kinds with lifecycle hooks
//! - Packed 5-byte cell states (kind id + connection bits)
//! - Chunked storage generated once from a `CellGenerator`
//! - A single placement protocol through which every mutation flows
//!
//! ## Architecture Rules
//!
//! 1. **Total reads** - every coordinate resolves, outside reads as AIR
//! 2. **One write path** - `World::place` runs destroy, write, create and
//!    neighbour updates in that order
//! 3. **Shared kinds** - the registry is built first and read-only after
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use tileworld_core::{CellState, TileRegistry, World, WorldConfig};
//!
//! let (registry, tiles) = TileRegistry::standard().unwrap();
//! let mut world = World::new(WorldConfig::new(16, 16, 8), Arc::new(registry)).unwrap();
//!
//! world.place((4, 4), CellState::new(tiles.stone));
//! world.place((5, 4), CellState::new(tiles.stone));
//!
//! // The first stone connected east when its neighbour arrived.
//! assert_eq!(world.get_state((4, 4)).connection_mask(), 0b0010);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod autotile;
pub mod cell;
pub mod chunk;
pub mod error;
pub mod generator;
pub mod registry;
pub mod tile;
pub mod world;

pub use cell::{CellState, Direction, TileId, TilePos, CONNECTION_MASK};
pub use chunk::{Chunk, ChunkCoord, ChunkState, CHUNK_SIZE};
pub use error::{WorldError, WorldResult};
pub use generator::{CellGenerator, NoiseTerrain};
pub use registry::{BuiltinTiles, TileRegistry, MAX_TILE_KINDS};
pub use tile::{Appearance, AtlasRect, AtlasSample, Connective, TileBehavior, TileDef, TileKind};
pub use world::{GenerationReport, TileComplete, World, WorldConfig};
