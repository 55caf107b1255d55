//! # Cell State
//!
//! The per-cell payload stored inside chunks: a tile kind id plus a
//! 4-slot connection array.
//!
//! ## Layout
//!
//! ```text
//! byte 0      : kind id
//! bytes 1..5  : connections[0..4]
//!               connections[0] bits 0..4 = N, E, S, W
//! ```
//!
//! Only the low nibble of slot 0 carries meaning today. The other bits and
//! slots are preserved untouched for custom tile behaviours.

use bytemuck::{Pod, Zeroable};

/// Identifier of a registered tile kind.
///
/// Ids are assigned 0-based in registration order. Id 0 is always AIR.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Pod, Zeroable)]
#[repr(transparent)]
pub struct TileId(pub u8);

impl TileId {
    /// The AIR kind. Empty space, not solid.
    pub const AIR: Self = Self(0);

    /// Returns the raw id.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Returns the id as a registry index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns true if this is the AIR id.
    #[inline]
    #[must_use]
    pub const fn is_air(self) -> bool {
        self.0 == Self::AIR.0
    }
}

impl From<u8> for TileId {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

/// Cardinal direction.
///
/// The discriminant is the bit index in the connection mask.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Direction {
    /// Towards y - 1.
    North = 0,
    /// Towards x + 1.
    East = 1,
    /// Towards y + 1.
    South = 2,
    /// Towards x - 1.
    West = 3,
}

impl Direction {
    /// All directions in notification order.
    pub const ALL: [Self; 4] = [Self::North, Self::East, Self::South, Self::West];

    /// Returns the connection bit for this direction.
    #[inline]
    #[must_use]
    pub const fn bit(self) -> u8 {
        1 << (self as u8)
    }

    /// Returns the (dx, dy) step for this direction.
    #[inline]
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::North => (0, -1),
            Self::East => (1, 0),
            Self::South => (0, 1),
            Self::West => (-1, 0),
        }
    }

    /// Returns the opposite direction.
    #[inline]
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
        }
    }
}

/// A global cell coordinate.
///
/// Any pair of i32 is valid; cells outside the world read as AIR.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TilePos {
    /// Column.
    pub x: i32,
    /// Row, growing downwards.
    pub y: i32,
}

impl TilePos {
    /// Creates a coordinate.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the adjacent coordinate in `direction`.
    #[inline]
    #[must_use]
    pub const fn neighbor(self, direction: Direction) -> Self {
        let (dx, dy) = direction.offset();
        Self {
            x: self.x.wrapping_add(dx),
            y: self.y.wrapping_add(dy),
        }
    }

    /// Returns the 4 cardinal neighbours in N, E, S, W order.
    #[must_use]
    pub const fn neighbors(self) -> [Self; 4] {
        [
            self.neighbor(Direction::North),
            self.neighbor(Direction::East),
            self.neighbor(Direction::South),
            self.neighbor(Direction::West),
        ]
    }
}

/// Mask of the 4 direction bits in connection slot 0.
pub const CONNECTION_MASK: u8 = 0x0f;

/// Mutable per-cell state.
///
/// Plain `Copy` data. Reads always hand out copies, so the shared AIR
/// state can never be mutated through an alias.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
#[repr(C)]
pub struct CellState {
    /// Kind of tile occupying the cell.
    pub kind: TileId,
    /// Connection slots. Slot 0 low nibble holds the N/E/S/W bits.
    pub connections: [u8; 4],
}

impl CellState {
    /// Empty cell: AIR with no connections.
    pub const AIR: Self = Self {
        kind: TileId::AIR,
        connections: [0; 4],
    };

    /// Creates a state of the given kind with no connections.
    #[inline]
    #[must_use]
    pub const fn new(kind: TileId) -> Self {
        Self {
            kind,
            connections: [0; 4],
        }
    }

    /// Creates a state with an explicit direction mask in slot 0.
    #[inline]
    #[must_use]
    pub const fn with_mask(kind: TileId, mask: u8) -> Self {
        Self {
            kind,
            connections: [mask & CONNECTION_MASK, 0, 0, 0],
        }
    }

    /// Returns the N/E/S/W bits.
    #[inline]
    #[must_use]
    pub const fn connection_mask(&self) -> u8 {
        self.connections[0] & CONNECTION_MASK
    }

    /// Returns true if the edge towards `direction` is connected.
    #[inline]
    #[must_use]
    pub const fn has_connection(&self, direction: Direction) -> bool {
        self.connections[0] & direction.bit() != 0
    }

    /// Marks the edge towards `direction` as connected.
    #[inline]
    pub fn set_connection(&mut self, direction: Direction) {
        self.connections[0] |= direction.bit();
    }

    /// Replaces the N/E/S/W bits, keeping the rest of slot 0.
    #[inline]
    pub fn set_connection_mask(&mut self, mask: u8) {
        self.connections[0] = (self.connections[0] & !CONNECTION_MASK) | (mask & CONNECTION_MASK);
    }

    /// Clears the N/E/S/W bits, keeping the rest of slot 0.
    #[inline]
    pub fn clear_connections(&mut self) {
        self.connections[0] &= !CONNECTION_MASK;
    }

    /// Returns the connection slots packed into one little-endian word.
    #[inline]
    #[must_use]
    pub const fn packed_connections(&self) -> u32 {
        u32::from_le_bytes(self.connections)
    }

    /// Returns true if the cell is occupied by anything but AIR.
    #[inline]
    #[must_use]
    pub const fn is_solid(&self) -> bool {
        !self.kind.is_air()
    }
}
