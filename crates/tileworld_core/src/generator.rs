//! # Cell Generators
//!
//! Decide the initial state of every cell during world generation.
//!
//! `World::generate` asks its generator once per cell, chunk by chunk.
//! Any `FnMut(i32, i32) -> CellState` closure is a generator, which keeps
//! tests short. `NoiseTerrain` is the stock terrain.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tileworld_procedural::{TerrainCell, TerrainConfig, TerrainRule};

use crate::cell::{CellState, TileId};
use crate::registry::{BuiltinTiles, TileRegistry};

/// Source of initial cell states.
pub trait CellGenerator {
    /// Returns the state the cell at global `(x, y)` starts with.
    fn initial_state(&mut self, registry: &TileRegistry, x: i32, y: i32) -> CellState;
}

impl<F> CellGenerator for F
where
    F: FnMut(i32, i32) -> CellState,
{
    fn initial_state(&mut self, _registry: &TileRegistry, x: i32, y: i32) -> CellState {
        self(x, y)
    }
}

/// Noise-carved terrain of soil and rock.
///
/// Deterministic for a given seed and visiting order. The roll source is
/// consumed once per solid cell, so two generators with the same seed
/// build the same world only when asked in the same order.
#[derive(Clone, Debug)]
pub struct NoiseTerrain {
    /// Noise and depth rule.
    rule: TerrainRule,
    /// Soil-or-rock roll source.
    rng: ChaCha8Rng,
    /// Kind written for soil.
    soil: TileId,
    /// Kind written for rock.
    rock: TileId,
}

impl NoiseTerrain {
    /// Creates a terrain generator writing `soil` and `rock`.
    #[must_use]
    pub fn new(rule: TerrainRule, seed: u64, soil: TileId, rock: TileId) -> Self {
        Self {
            rule,
            rng: ChaCha8Rng::seed_from_u64(seed),
            soil,
            rock,
        }
    }

    /// Dirt and stone terrain over the built-in catalogue.
    #[must_use]
    pub fn standard(config: TerrainConfig, seed: u64, tiles: &BuiltinTiles) -> Self {
        Self::new(TerrainRule::new(config), seed, tiles.dirt, tiles.stone)
    }
}

impl CellGenerator for NoiseTerrain {
    fn initial_state(&mut self, registry: &TileRegistry, x: i32, y: i32) -> CellState {
        match self.rule.classify(x, y, &mut self.rng) {
            TerrainCell::Air => registry.air().default_state(),
            TerrainCell::Soil => registry.get(self.soil).default_state(),
            TerrainCell::Rock => registry.get(self.rock).default_state(),
        }
    }
}
