//! # Tile Registry
//!
//! Ordered, capacity-bounded table of tile kinds.
//!
//! Ids are handed out 0-based in registration order. Id 0 is always AIR:
//! every registry is born with it, so "first registered" and "AIR" are the
//! same kind. Lookups never fail; unknown ids resolve to AIR.
//!
//! The registry is populated before any world exists and shared read-only
//! (`Arc<TileRegistry>`) afterwards.

use tracing::warn;

use crate::cell::TileId;
use crate::error::{WorldError, WorldResult};
use crate::tile::{AtlasRect, Connective, TileDef, TileKind};

/// Maximum number of registered kinds, AIR included.
pub const MAX_TILE_KINDS: usize = 12;

/// Ids of the built-in tile catalogue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BuiltinTiles {
    /// Empty space.
    pub air: TileId,
    /// Stone.
    pub stone: TileId,
    /// Dirt.
    pub dirt: TileId,
    /// Stone bricks.
    pub stone_bricks: TileId,
    /// Gold.
    pub gold: TileId,
    /// Horizontal wood planks.
    pub wood_horizontal: TileId,
    /// Vertical wood planks.
    pub wood_vertical: TileId,
    /// Leaves.
    pub leaves: TileId,
    /// Glass.
    pub glass: TileId,
}

/// The tile kind table.
#[derive(Clone, Debug)]
pub struct TileRegistry {
    /// Registered kinds, indexed by id.
    tiles: Vec<TileDef>,
}

impl TileRegistry {
    /// Atlas rectangle of the AIR kind.
    pub const AIR_ATLAS: AtlasRect = AtlasRect::new(0, 0, 1, 1);

    /// Creates a registry holding only AIR.
    #[must_use]
    pub fn new() -> Self {
        let mut tiles = Vec::with_capacity(MAX_TILE_KINDS);
        tiles.push(TileDef::new(
            TileId::AIR,
            "air".to_string(),
            Self::AIR_ATLAS,
            TileKind::Plain,
        ));
        Self { tiles }
    }

    /// Creates a registry with the built-in catalogue.
    ///
    /// # Errors
    ///
    /// Never in practice: the catalogue fits the capacity. Surfaced as a
    /// `Result` so a catalogue edit cannot fail silently.
    pub fn standard() -> WorldResult<(Self, BuiltinTiles)> {
        let mut registry = Self::new();
        let wide = |x0: u8, y0: u8, x1: u8, y1: u8, margin: f32| {
            TileKind::Connective(Connective::new(AtlasRect::new(x0, y0, x1, y1), margin))
        };

        let stone = registry.register("stone", AtlasRect::new(0, 1, 1, 2), TileKind::connective())?;
        let dirt = registry.register("dirt", AtlasRect::new(1, 0, 2, 1), wide(3, 1, 4, 2, 0.25))?;
        let stone_bricks =
            registry.register("stone_bricks", AtlasRect::new(2, 0, 3, 1), wide(2, 1, 3, 2, 0.125))?;
        let gold = registry.register("gold", AtlasRect::new(3, 0, 4, 1), TileKind::connective())?;
        let wood_horizontal =
            registry.register("wood_horizontal", AtlasRect::new(5, 0, 6, 1), TileKind::Plain)?;
        let wood_vertical =
            registry.register("wood_vertical", AtlasRect::new(5, 1, 6, 2), TileKind::Plain)?;
        let leaves = registry.register("leaves", AtlasRect::new(6, 1, 7, 2), wide(7, 1, 8, 2, 0.25))?;
        let glass = registry.register("glass", AtlasRect::new(6, 0, 7, 1), wide(2, 1, 3, 2, 0.125))?;

        let builtin = BuiltinTiles {
            air: TileId::AIR,
            stone,
            dirt,
            stone_bricks,
            gold,
            wood_horizontal,
            wood_vertical,
            leaves,
            glass,
        };
        Ok((registry, builtin))
    }

    /// Registers a kind and returns its id.
    ///
    /// # Errors
    ///
    /// Returns `RegistryFull` once `MAX_TILE_KINDS` kinds exist. The
    /// rejected kind is not retrievable.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        atlas: AtlasRect,
        kind: TileKind,
    ) -> WorldResult<TileId> {
        let name = name.into();
        let next = self.tiles.len();
        let id = match u8::try_from(next) {
            Ok(raw) if next < MAX_TILE_KINDS => TileId(raw),
            _ => {
                warn!("Tile registry full ({} kinds), rejected '{}'", MAX_TILE_KINDS, name);
                return Err(WorldError::RegistryFull {
                    capacity: MAX_TILE_KINDS,
                    name,
                });
            }
        };

        self.tiles.push(TileDef::new(id, name, atlas, kind));
        Ok(id)
    }

    /// Returns the kind for `id`, or AIR for unknown ids.
    #[inline]
    #[must_use]
    pub fn get(&self, id: TileId) -> &TileDef {
        self.try_get(id).unwrap_or_else(|| self.air())
    }

    /// Returns the kind for `id` if registered.
    #[inline]
    #[must_use]
    pub fn try_get(&self, id: TileId) -> Option<&TileDef> {
        self.tiles.get(id.index())
    }

    /// Returns the AIR kind.
    #[inline]
    #[must_use]
    pub fn air(&self) -> &TileDef {
        &self.tiles[TileId::AIR.index()]
    }

    /// Finds a kind by name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&TileDef> {
        self.tiles.iter().find(|tile| tile.name() == name)
    }

    /// Number of registered kinds, AIR included.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Always false: AIR is always registered.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Iterates kinds in id order.
    pub fn iter(&self) -> impl Iterator<Item = &TileDef> {
        self.tiles.iter()
    }
}

impl Default for TileRegistry {
    fn default() -> Self {
        Self::new()
    }
}
