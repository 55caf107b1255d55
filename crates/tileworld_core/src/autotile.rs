//! # Autotiling
//!
//! Recomputes a cell's connection bits from its 4 cardinal neighbours.
//!
//! "Connected" means the neighbour is solid (not AIR), regardless of its
//! kind. Cells outside the world read as AIR and never connect.

use crate::cell::{Direction, TilePos};
use crate::world::World;

/// Computes the N/E/S/W connection mask for the cell at `pos`.
///
/// Pure function of current neighbour occupancy.
#[must_use]
pub fn neighbor_mask(world: &World, pos: TilePos) -> u8 {
    Direction::ALL
        .iter()
        .filter(|&&dir| world.get_state(pos.neighbor(dir)).is_solid())
        .fold(0, |mask, &dir| mask | dir.bit())
}

/// Clears and recomputes the connection bits of the cell at `pos`.
///
/// No-op outside the world.
pub fn connect_to_neighbors(world: &mut World, pos: TilePos) {
    let mask = neighbor_mask(world, pos);
    world.set_connection_mask(pos, mask);
}
