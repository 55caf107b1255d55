//! # World Error Types
//!
//! Everything that can fail while building a tile world.
//!
//! Out-of-bounds reads are deliberately absent: every coordinate resolves,
//! cells outside the world read as AIR.

use thiserror::Error;

/// Errors that can occur while registering tiles or building a world.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorldError {
    /// Registered more tile kinds than the registry can hold.
    #[error("tile registry full: capacity {capacity}, rejected '{name}'")]
    RegistryFull {
        /// Registry capacity.
        capacity: usize,
        /// Name of the rejected kind.
        name: String,
    },

    /// A world dimension or the chunk size is not positive.
    #[error("invalid world dimensions: {width}x{height} with chunk size {chunk_size}")]
    InvalidDimensions {
        /// Configured width in cells.
        width: i32,
        /// Configured height in cells.
        height: i32,
        /// Configured chunk edge length.
        chunk_size: i32,
    },

    /// The chunk size does not evenly divide the world extent.
    #[error("chunk size {chunk_size} does not evenly divide world extent {width}x{height}")]
    ChunkSizeMismatch {
        /// Configured width in cells.
        width: i32,
        /// Configured height in cells.
        height: i32,
        /// Configured chunk edge length.
        chunk_size: i32,
    },

    /// Generation was requested on a world that already went through it.
    #[error("world already generated")]
    AlreadyGenerated,
}

/// Result type for world operations.
pub type WorldResult<T> = Result<T, WorldError>;
