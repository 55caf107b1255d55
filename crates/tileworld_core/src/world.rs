//! # World
//!
//! Owns every chunk and is the single mutation entry point.
//!
//! ## Addressing
//!
//! ```text
//! chunk = (x / chunk_size, y / chunk_size)      row-major in storage
//! local = (x % chunk_size, y % chunk_size)
//! ```
//!
//! Reads are total over all of i32 x i32: anything outside
//! `[0, width) x [0, height)` reads as a copy of the AIR state.
//!
//! ## Placement Protocol
//!
//! ```text
//! place(pos, new):
//!   1. old kind .on_destroy(pos)      old cell still stored
//!   2. write new state
//!   3. new kind .on_create(pos)       sees the written cell
//!   4. N, E, S, W neighbours .on_update
//! ```
//!
//! ## Generation
//!
//! Chunks are generated once, row-major over chunk coordinates. Each chunk
//! writes its terrain, then runs `on_create` for its cells through full
//! world resolution, so cells on a seam with a later chunk briefly see AIR.
//! A final pass runs `on_update` on every cell to settle those seams.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::cell::{CellState, Direction, TilePos};
use crate::chunk::{Chunk, ChunkCoord, CHUNK_SIZE};
use crate::error::{WorldError, WorldResult};
use crate::generator::CellGenerator;
use crate::registry::TileRegistry;
use crate::tile::{Appearance, TileDef};

/// World extent. Fixed before the world is built.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Width in cells.
    pub width: i32,
    /// Height in cells.
    pub height: i32,
    /// Chunk edge length in cells.
    pub chunk_size: i32,
}

impl WorldConfig {
    /// Creates a config.
    #[inline]
    #[must_use]
    pub const fn new(width: i32, height: i32, chunk_size: i32) -> Self {
        Self {
            width,
            height,
            chunk_size,
        }
    }

    /// Checks that the extent can be addressed.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDimensions` for non-positive values and
    /// `ChunkSizeMismatch` when the chunk size does not divide the extent.
    pub fn validate(&self) -> WorldResult<()> {
        if self.width <= 0 || self.height <= 0 || self.chunk_size <= 0 {
            return Err(WorldError::InvalidDimensions {
                width: self.width,
                height: self.height,
                chunk_size: self.chunk_size,
            });
        }
        if self.width % self.chunk_size != 0 || self.height % self.chunk_size != 0 {
            return Err(WorldError::ChunkSizeMismatch {
                width: self.width,
                height: self.height,
                chunk_size: self.chunk_size,
            });
        }
        Ok(())
    }

    /// Number of chunk columns.
    #[inline]
    #[must_use]
    pub const fn chunk_count_x(&self) -> i32 {
        self.width / self.chunk_size
    }

    /// Number of chunk rows.
    #[inline]
    #[must_use]
    pub const fn chunk_count_y(&self) -> i32 {
        self.height / self.chunk_size
    }

    /// Returns true if `pos` lies inside the extent.
    #[inline]
    #[must_use]
    pub const fn contains(&self, pos: TilePos) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self::new(128, 128, CHUNK_SIZE)
    }
}

impl From<(i32, i32)> for TilePos {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// A resolved cell: its position, a copy of its state and its kind.
///
/// Borrowed from the registry; do not hold one across a `place`.
#[derive(Clone, Copy, Debug)]
pub struct TileComplete<'a> {
    /// Where the cell was resolved.
    pub pos: TilePos,
    /// State at resolution time.
    pub state: CellState,
    /// Kind of the cell.
    pub tile: &'a TileDef,
}

impl TileComplete<'_> {
    /// Returns true unless the cell is AIR.
    #[inline]
    #[must_use]
    pub const fn is_solid(&self) -> bool {
        self.tile.is_solid()
    }

    /// Produces the appearance at a point of this cell.
    #[must_use]
    pub fn appearance_at(&self, local_x: f32, local_y: f32, cell_width: f32, cell_height: f32) -> Appearance {
        self.tile
            .appearance_at(&self.state, local_x, local_y, cell_width, cell_height)
    }
}

/// Summary of a generation run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GenerationReport {
    /// Chunks generated.
    pub chunks: usize,
    /// Cells written.
    pub cells: usize,
    /// Non-AIR cells after generation.
    pub solid_cells: usize,
}

/// The tile world.
pub struct World {
    /// Extent.
    config: WorldConfig,
    /// Shared, read-only tile kinds.
    registry: Arc<TileRegistry>,
    /// Chunks, row-major: `cy * chunk_count_x + cx`.
    chunks: Vec<Chunk>,
}

impl World {
    /// Builds a world with every chunk allocated and all cells AIR.
    ///
    /// # Errors
    ///
    /// Returns the validation error of a malformed `config`.
    pub fn new(config: WorldConfig, registry: Arc<TileRegistry>) -> WorldResult<Self> {
        config.validate()?;

        let mut chunks = Vec::new();
        for cy in 0..config.chunk_count_y() {
            for cx in 0..config.chunk_count_x() {
                chunks.push(Chunk::new(ChunkCoord::new(cx, cy), config.chunk_size));
            }
        }

        debug!(
            "Allocated {} chunks ({}x{}) for a {}x{} world",
            chunks.len(),
            config.chunk_count_x(),
            config.chunk_count_y(),
            config.width,
            config.height
        );

        Ok(Self {
            config,
            registry,
            chunks,
        })
    }

    /// Builds and generates a world in one step.
    ///
    /// # Errors
    ///
    /// Returns the validation error of a malformed `config`.
    pub fn generated<G>(config: WorldConfig, registry: Arc<TileRegistry>, generator: &mut G) -> WorldResult<Self>
    where
        G: CellGenerator + ?Sized,
    {
        let mut world = Self::new(config, registry)?;
        world.generate(generator)?;
        Ok(world)
    }

    /// Returns the extent.
    #[inline]
    #[must_use]
    pub const fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Width in cells.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.config.width
    }

    /// Height in cells.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.config.height
    }

    /// Returns the tile kinds.
    #[inline]
    #[must_use]
    pub fn registry(&self) -> &Arc<TileRegistry> {
        &self.registry
    }

    /// Returns true if `pos` lies inside the world.
    ///
    /// Checks y against the height. A square world cannot tell this apart
    /// from checking both axes against the width.
    #[inline]
    #[must_use]
    pub fn contains(&self, pos: impl Into<TilePos>) -> bool {
        self.config.contains(pos.into())
    }

    /// Resolves a position to (chunk index, local x, local y).
    fn locate(&self, pos: TilePos) -> Option<(usize, i32, i32)> {
        if !self.config.contains(pos) {
            return None;
        }
        let size = self.config.chunk_size;
        let coord = ChunkCoord::from_cell(pos.x, pos.y, size);
        let index = usize::try_from(coord.y * self.config.chunk_count_x() + coord.x).ok()?;
        Some((index, pos.x - coord.origin_x(size), pos.y - coord.origin_y(size)))
    }

    /// Returns a copy of the state at `pos`. Outside the world: AIR.
    #[must_use]
    pub fn get_state(&self, pos: impl Into<TilePos>) -> CellState {
        self.locate(pos.into())
            .and_then(|(index, lx, ly)| self.chunks.get(index).map(|chunk| chunk.cell(lx, ly)))
            .unwrap_or_else(|| self.registry.air().default_state())
    }

    /// Resolves the cell at `pos` with its kind.
    #[must_use]
    pub fn get_complete(&self, pos: impl Into<TilePos>) -> TileComplete<'_> {
        let pos = pos.into();
        let state = self.get_state(pos);
        TileComplete {
            pos,
            state,
            tile: self.registry.get(state.kind),
        }
    }

    /// Returns true if the cell at `pos` is not AIR.
    #[inline]
    #[must_use]
    pub fn is_solid(&self, pos: impl Into<TilePos>) -> bool {
        self.get_state(pos).is_solid()
    }

    /// Mutable slot for `pos`, if inside the world.
    fn slot_mut(&mut self, pos: TilePos) -> Option<&mut CellState> {
        let (index, lx, ly) = self.locate(pos)?;
        self.chunks.get_mut(index)?.cell_mut(lx, ly)
    }

    /// Replaces the N/E/S/W connection bits of the cell at `pos`.
    ///
    /// Only the autotiler calls this, from inside `on_create` and
    /// `on_update`. Returns false outside the world.
    pub(crate) fn set_connection_mask(&mut self, pos: impl Into<TilePos>, mask: u8) -> bool {
        match self.slot_mut(pos.into()) {
            Some(cell) => {
                cell.set_connection_mask(mask);
                true
            }
            None => false,
        }
    }

    /// Places `state` at `pos` and runs the placement protocol.
    ///
    /// Returns the freshly created cell. Outside the world nothing is
    /// written, no hook runs and the AIR sentinel is returned.
    ///
    /// This is the only way to write a cell from outside the crate:
    ///
    /// ```compile_fail
    /// use std::sync::Arc;
    /// use tileworld_core::{TileRegistry, World, WorldConfig};
    ///
    /// let mut world = World::new(WorldConfig::new(8, 8, 4), Arc::new(TileRegistry::new())).unwrap();
    /// world.set_connection_mask((1, 1), 0b1111);
    /// ```
    pub fn place(&mut self, pos: impl Into<TilePos>, state: CellState) -> TileComplete<'_> {
        let pos = pos.into();
        if !self.config.contains(pos) {
            trace!("Ignored placement outside the world at ({}, {})", pos.x, pos.y);
            return self.get_complete(pos);
        }

        let registry = Arc::clone(&self.registry);
        let stale = self.get_state(pos);
        registry.get(stale.kind).on_destroy(self, pos);

        let fresh_kind = registry.get(state.kind);
        if let Some(slot) = self.slot_mut(pos) {
            *slot = fresh_kind.normalize(state);
        }
        trace!(
            "Placed {} at ({}, {}), replacing {}",
            fresh_kind.name(),
            pos.x,
            pos.y,
            registry.get(stale.kind).name()
        );

        let created = self.get_state(pos);
        registry.get(created.kind).on_create(self, pos);

        self.notify_neighbors(&registry, pos);

        self.get_complete(pos)
    }

    /// Runs `on_update` on the 4 cardinal neighbours, N, E, S, W.
    fn notify_neighbors(&mut self, registry: &TileRegistry, pos: TilePos) {
        for direction in Direction::ALL {
            let neighbor = pos.neighbor(direction);
            let state = self.get_state(neighbor);
            registry.get(state.kind).on_update(self, neighbor);
        }
    }

    /// Generates every chunk, then settles cross-chunk connections.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyGenerated` if any chunk was generated before.
    pub fn generate<G>(&mut self, generator: &mut G) -> WorldResult<GenerationReport>
    where
        G: CellGenerator + ?Sized,
    {
        if self.chunks.iter().any(Chunk::is_generated) {
            return Err(WorldError::AlreadyGenerated);
        }

        let registry = Arc::clone(&self.registry);
        let mut report = GenerationReport::default();

        for index in 0..self.chunks.len() {
            report.cells += self.generate_chunk(&registry, index, generator);
            report.chunks += 1;
        }

        for x in 0..self.config.width {
            for y in 0..self.config.height {
                let pos = TilePos::new(x, y);
                let state = self.get_state(pos);
                registry.get(state.kind).on_update(self, pos);
            }
        }

        report.solid_cells = self.solid_count();
        info!(
            "Generated {}x{} world: {} chunks, {} solid cells",
            self.config.width, self.config.height, report.chunks, report.solid_cells
        );
        Ok(report)
    }

    /// Writes a chunk's terrain and runs its creation hooks.
    ///
    /// Returns the number of cells written.
    fn generate_chunk<G>(&mut self, registry: &TileRegistry, index: usize, generator: &mut G) -> usize
    where
        G: CellGenerator + ?Sized,
    {
        let size = self.config.chunk_size;
        let Some(chunk) = self.chunks.get_mut(index) else {
            return 0;
        };
        let coord = chunk.coord();
        let (ox, oy) = (coord.origin_x(size), coord.origin_y(size));

        let mut written = 0;
        for lx in 0..size {
            for ly in 0..size {
                let state = generator.initial_state(registry, ox + lx, oy + ly);
                if let Some(cell) = chunk.cell_mut(lx, ly) {
                    *cell = registry.get(state.kind).normalize(state);
                    written += 1;
                }
            }
        }

        for lx in 0..size {
            for ly in 0..size {
                let pos = TilePos::new(ox + lx, oy + ly);
                let state = self.get_state(pos);
                registry.get(state.kind).on_create(self, pos);
            }
        }

        if let Some(chunk) = self.chunks.get_mut(index) {
            chunk.mark_generated();
            debug!(
                "Generated chunk [{},{}]: {} solid cells",
                coord.x,
                coord.y,
                chunk.solid_count()
            );
        }
        written
    }

    /// Returns true once every chunk is generated.
    #[must_use]
    pub fn is_generated(&self) -> bool {
        self.chunks.iter().all(Chunk::is_generated)
    }

    /// Returns the chunk at `coord`.
    #[must_use]
    pub fn chunk(&self, coord: ChunkCoord) -> Option<&Chunk> {
        if coord.x < 0 || coord.y < 0 || coord.x >= self.config.chunk_count_x() {
            return None;
        }
        let index = usize::try_from(coord.y * self.config.chunk_count_x() + coord.x).ok()?;
        self.chunks.get(index)
    }

    /// Iterates chunks in row-major order.
    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.iter()
    }

    /// Number of non-AIR cells.
    #[must_use]
    pub fn solid_count(&self) -> usize {
        self.chunks.iter().map(Chunk::solid_count).sum()
    }
}
