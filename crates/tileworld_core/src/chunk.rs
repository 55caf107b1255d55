//! # Chunk Storage
//!
//! The world grid is split into square chunks, the unit of batch
//! generation.
//!
//! ## Lifecycle
//!
//! ```text
//! (not yet built) --World::new--> Allocated --World::generate--> Generated
//! ```
//!
//! All chunks are allocated eagerly when the world is built and generated
//! exactly once. Chunks are never evicted.

use crate::cell::CellState;

/// Default chunk edge length in cells.
pub const CHUNK_SIZE: i32 = 16;

/// Position of a chunk in chunk space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ChunkCoord {
    /// Chunk column.
    pub x: i32,
    /// Chunk row.
    pub y: i32,
}

impl ChunkCoord {
    /// Creates a chunk coordinate.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the chunk containing the global cell `(x, y)`.
    #[inline]
    #[must_use]
    pub const fn from_cell(x: i32, y: i32, chunk_size: i32) -> Self {
        Self {
            x: x.div_euclid(chunk_size),
            y: y.div_euclid(chunk_size),
        }
    }

    /// Returns the global x of the chunk's first column.
    #[inline]
    #[must_use]
    pub const fn origin_x(self, chunk_size: i32) -> i32 {
        self.x * chunk_size
    }

    /// Returns the global y of the chunk's first row.
    #[inline]
    #[must_use]
    pub const fn origin_y(self, chunk_size: i32) -> i32 {
        self.y * chunk_size
    }
}

/// Generation state of a chunk.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ChunkState {
    /// Storage exists, every cell is AIR.
    #[default]
    Allocated,
    /// Terrain written and creation hooks run.
    Generated,
}

/// A square block of cell states.
///
/// `cell(lx, ly)` holds global cell
/// `(coord.x * size + lx, coord.y * size + ly)`.
#[derive(Clone, Debug)]
pub struct Chunk {
    /// Position in chunk space.
    coord: ChunkCoord,
    /// Edge length in cells.
    size: i32,
    /// Cell states, indexed `ly * size + lx`.
    cells: Box<[CellState]>,
    /// Generation state.
    state: ChunkState,
}

impl Chunk {
    /// Allocates an all-AIR chunk. A non-positive size yields no cells.
    #[must_use]
    pub fn new(coord: ChunkCoord, size: i32) -> Self {
        let edge = usize::try_from(size).unwrap_or(0);
        Self {
            coord,
            size,
            cells: vec![CellState::AIR; edge * edge].into_boxed_slice(),
            state: ChunkState::Allocated,
        }
    }

    /// Returns the chunk position.
    #[inline]
    #[must_use]
    pub const fn coord(&self) -> ChunkCoord {
        self.coord
    }

    /// Returns the edge length.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> i32 {
        self.size
    }

    /// Returns the generation state.
    #[inline]
    #[must_use]
    pub const fn state(&self) -> ChunkState {
        self.state
    }

    /// Returns true once the chunk is generated.
    #[inline]
    #[must_use]
    pub fn is_generated(&self) -> bool {
        self.state == ChunkState::Generated
    }

    /// Marks the chunk generated.
    pub(crate) fn mark_generated(&mut self) {
        self.state = ChunkState::Generated;
    }

    /// Converts local coordinates to a storage index.
    #[inline]
    fn index(&self, lx: i32, ly: i32) -> Option<usize> {
        if (0..self.size).contains(&lx) && (0..self.size).contains(&ly) {
            usize::try_from(ly * self.size + lx).ok()
        } else {
            None
        }
    }

    /// Reads a cell at local coordinates. Outside the chunk reads as AIR.
    #[inline]
    #[must_use]
    pub fn cell(&self, lx: i32, ly: i32) -> CellState {
        self.index(lx, ly).map_or(CellState::AIR, |i| self.cells[i])
    }

    /// Mutable access to a cell at local coordinates.
    #[inline]
    pub(crate) fn cell_mut(&mut self, lx: i32, ly: i32) -> Option<&mut CellState> {
        let index = self.index(lx, ly)?;
        self.cells.get_mut(index)
    }

    /// Iterates cells with their local coordinates, row by row.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32, CellState)> + '_ {
        let size = self.size;
        self.cells.iter().zip(0..).map(move |(&state, i)| (i % size, i / size, state))
    }

    /// Number of non-AIR cells.
    #[must_use]
    pub fn solid_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_solid()).count()
    }
}
