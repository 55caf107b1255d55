//! # Tile Kinds
//!
//! Shared, immutable behaviour for every cell of a kind.
//!
//! A kind is a tagged variant:
//!
//! - `Plain`: single atlas rectangle, no-op hooks
//! - `Connective`: blends a connection atlas along unconnected edges and
//!   recomputes its connection bits on create/update
//! - `Custom`: any `TileBehavior` implementation
//!
//! Appearance output is opaque to the engine: atlas coordinates the
//! renderer samples. No pixels are produced here.

use std::fmt;
use std::sync::Arc;

use crate::autotile;
use crate::cell::{CellState, Direction, TileId, TilePos};
use crate::world::World;

/// Rectangle in the texture atlas, in atlas-cell units.
///
/// Sampling only uses the top-left corner; the far corner documents the
/// intended extent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct AtlasRect {
    /// Left column.
    pub x0: u8,
    /// Top row.
    pub y0: u8,
    /// Right column (exclusive).
    pub x1: u8,
    /// Bottom row (exclusive).
    pub y1: u8,
}

impl AtlasRect {
    /// Creates an atlas rectangle.
    #[inline]
    #[must_use]
    pub const fn new(x0: u8, y0: u8, x1: u8, y1: u8) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Maps a point inside a rendered cell onto this rectangle.
    ///
    /// `(local_x, local_y)` ranges over `[0, cell_width) x [0, cell_height)`
    /// and lands linearly inside one atlas cell.
    #[must_use]
    pub fn sample(self, local_x: f32, local_y: f32, cell_width: f32, cell_height: f32) -> AtlasSample {
        let fx = if cell_width > 0.0 { local_x / cell_width } else { 0.0 };
        let fy = if cell_height > 0.0 { local_y / cell_height } else { 0.0 };
        AtlasSample {
            u: f32::from(self.x0) + fx,
            v: f32::from(self.y0) + fy,
        }
    }
}

/// A point in the atlas, in atlas-cell units.
///
/// The renderer multiplies by its texel size to find the source pixel.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AtlasSample {
    /// Horizontal atlas coordinate.
    pub u: f32,
    /// Vertical atlas coordinate.
    pub v: f32,
}

/// What to draw at one point of a cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Appearance {
    /// Main texture sample.
    pub primary: AtlasSample,
    /// Edge-blend sample, present on unconnected edges of connective tiles.
    pub overlay: Option<AtlasSample>,
}

impl Appearance {
    /// Alpha of a fully opaque texel.
    pub const OPAQUE: u8 = 255;

    /// Appearance with no edge blending.
    #[inline]
    #[must_use]
    pub const fn plain(primary: AtlasSample) -> Self {
        Self {
            primary,
            overlay: None,
        }
    }

    /// Resolves the texel to draw, or `None` for a transparent point.
    ///
    /// `fetch` reads a texel and `alpha` extracts its alpha. The overlay
    /// cuts a hole where its alpha is 0 and replaces the primary where it
    /// is opaque; partial overlay alpha leaves the primary in place. Any
    /// non-opaque result is transparent.
    pub fn resolve<P, F, A>(&self, mut fetch: F, alpha: A) -> Option<P>
    where
        F: FnMut(AtlasSample) -> P,
        A: Fn(&P) -> u8,
    {
        let mut texel = fetch(self.primary);
        if let Some(overlay) = self.overlay {
            let blend = fetch(overlay);
            match alpha(&blend) {
                0 => return None,
                Self::OPAQUE => texel = blend,
                _ => {}
            }
        }
        (alpha(&texel) == Self::OPAQUE).then_some(texel)
    }
}

/// Edge-blending parameters of a connective kind.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Connective {
    /// Atlas rectangle blended along unconnected edges.
    pub connection_atlas: AtlasRect,
    /// Fraction of the cell edge used for blending.
    pub blend_margin: f32,
}

impl Connective {
    /// Connection atlas used when none is given.
    pub const DEFAULT_ATLAS: AtlasRect = AtlasRect::new(1, 1, 2, 2);
    /// Blend margin used when none is given.
    pub const DEFAULT_MARGIN: f32 = 0.25;

    /// Creates connective parameters.
    #[inline]
    #[must_use]
    pub const fn new(connection_atlas: AtlasRect, blend_margin: f32) -> Self {
        Self {
            connection_atlas,
            blend_margin,
        }
    }

    /// Returns true if `(x, y)` lies in the blend band of `direction`.
    #[must_use]
    pub fn in_edge_band(&self, direction: Direction, x: f32, y: f32, width: f32, height: f32) -> bool {
        let mw = width * self.blend_margin;
        let mh = height * self.blend_margin;
        let (x0, x1, y0, y1) = match direction {
            Direction::North => (0.0, width, 0.0, mh),
            Direction::East => (width - mw, width, 0.0, height),
            Direction::South => (0.0, width, height - mh, height),
            Direction::West => (0.0, mw, 0.0, height),
        };
        x0 <= x && x < x1 && y0 <= y && y < y1
    }

    /// Produces the appearance of a connective cell.
    #[must_use]
    pub fn appearance_at(
        &self,
        atlas: AtlasRect,
        state: &CellState,
        local_x: f32,
        local_y: f32,
        cell_width: f32,
        cell_height: f32,
    ) -> Appearance {
        let primary = atlas.sample(local_x, local_y, cell_width, cell_height);
        let blended = Direction::ALL.iter().any(|&dir| {
            !state.has_connection(dir) && self.in_edge_band(dir, local_x, local_y, cell_width, cell_height)
        });
        Appearance {
            primary,
            overlay: blended.then(|| {
                self.connection_atlas
                    .sample(local_x, local_y, cell_width, cell_height)
            }),
        }
    }
}

impl Default for Connective {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ATLAS, Self::DEFAULT_MARGIN)
    }
}

/// Behaviour of a custom tile kind.
///
/// Every method has the `Plain` behaviour as its default. Hooks run
/// inside the placement protocol and may read the world freely; writes
/// other than connection bits must not happen from a hook.
pub trait TileBehavior: fmt::Debug + Send + Sync {
    /// Builds the state a freshly placed cell of this kind starts with.
    fn default_state(&self, id: TileId) -> CellState {
        CellState::new(id)
    }

    /// Produces the appearance at a point of a cell.
    fn appearance_at(
        &self,
        atlas: AtlasRect,
        _state: &CellState,
        local_x: f32,
        local_y: f32,
        cell_width: f32,
        cell_height: f32,
    ) -> Appearance {
        Appearance::plain(atlas.sample(local_x, local_y, cell_width, cell_height))
    }

    /// Called after a cell of this kind is written.
    fn on_create(&self, _world: &mut World, _pos: TilePos) {}

    /// Called when a cardinal neighbour was just placed.
    fn on_update(&self, _world: &mut World, _pos: TilePos) {}

    /// Called before a cell of this kind is overwritten.
    fn on_destroy(&self, _world: &mut World, _pos: TilePos) {}
}

/// Behaviour variant of a tile kind.
#[derive(Clone, Debug)]
pub enum TileKind {
    /// Single texture, no hooks.
    Plain,
    /// Autotiled edges.
    Connective(Connective),
    /// User-defined behaviour.
    Custom(Arc<dyn TileBehavior>),
}

impl TileKind {
    /// Connective kind with the default connection atlas and margin.
    #[must_use]
    pub fn connective() -> Self {
        Self::Connective(Connective::default())
    }

    /// Returns true for `Connective` kinds.
    #[must_use]
    pub const fn is_connective(&self) -> bool {
        matches!(self, Self::Connective(_))
    }
}

/// A registered tile kind.
///
/// Created once by the registry and shared by every cell of the kind.
#[derive(Clone, Debug)]
pub struct TileDef {
    /// Registry id.
    id: TileId,
    /// Human-readable name.
    name: String,
    /// Main atlas rectangle.
    atlas: AtlasRect,
    /// Behaviour variant.
    kind: TileKind,
}

impl TileDef {
    /// Creates a definition. Only the registry assigns ids.
    pub(crate) fn new(id: TileId, name: String, atlas: AtlasRect, kind: TileKind) -> Self {
        Self {
            id,
            name,
            atlas,
            kind,
        }
    }

    /// Returns the registry id.
    #[inline]
    #[must_use]
    pub const fn id(&self) -> TileId {
        self.id
    }

    /// Returns the name.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the main atlas rectangle.
    #[inline]
    #[must_use]
    pub const fn atlas(&self) -> AtlasRect {
        self.atlas
    }

    /// Returns the behaviour variant.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> &TileKind {
        &self.kind
    }

    /// Returns true unless this is AIR.
    #[inline]
    #[must_use]
    pub const fn is_solid(&self) -> bool {
        !self.id.is_air()
    }

    /// Builds the default state of this kind.
    #[must_use]
    pub fn default_state(&self) -> CellState {
        match &self.kind {
            TileKind::Plain | TileKind::Connective(_) => CellState::new(self.id),
            TileKind::Custom(behavior) => behavior.default_state(self.id),
        }
    }

    /// Brings a state in line with this kind's invariants.
    ///
    /// Plain kinds always present a zeroed connection array. A state whose
    /// id resolved to the AIR fallback collapses to AIR.
    #[must_use]
    pub fn normalize(&self, state: CellState) -> CellState {
        match self.kind {
            TileKind::Plain => CellState::new(self.id),
            TileKind::Connective(_) | TileKind::Custom(_) => state,
        }
    }

    /// Produces the appearance at a point of a cell of this kind.
    #[must_use]
    pub fn appearance_at(
        &self,
        state: &CellState,
        local_x: f32,
        local_y: f32,
        cell_width: f32,
        cell_height: f32,
    ) -> Appearance {
        match &self.kind {
            TileKind::Plain => Appearance::plain(self.atlas.sample(local_x, local_y, cell_width, cell_height)),
            TileKind::Connective(connective) => {
                connective.appearance_at(self.atlas, state, local_x, local_y, cell_width, cell_height)
            }
            TileKind::Custom(behavior) => {
                behavior.appearance_at(self.atlas, state, local_x, local_y, cell_width, cell_height)
            }
        }
    }

    /// Creation hook.
    pub fn on_create(&self, world: &mut World, pos: TilePos) {
        match &self.kind {
            TileKind::Plain => {}
            TileKind::Connective(_) => autotile::connect_to_neighbors(world, pos),
            TileKind::Custom(behavior) => behavior.on_create(world, pos),
        }
    }

    /// Neighbour-changed hook.
    pub fn on_update(&self, world: &mut World, pos: TilePos) {
        match &self.kind {
            TileKind::Plain => {}
            TileKind::Connective(_) => autotile::connect_to_neighbors(world, pos),
            TileKind::Custom(behavior) => behavior.on_update(world, pos),
        }
    }

    /// Destruction hook.
    pub fn on_destroy(&self, world: &mut World, pos: TilePos) {
        match &self.kind {
            TileKind::Plain | TileKind::Connective(_) => {}
            TileKind::Custom(behavior) => behavior.on_destroy(world, pos),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dirt() -> TileDef {
        TileDef::new(
            TileId(2),
            "dirt".to_string(),
            AtlasRect::new(1, 0, 2, 1),
            TileKind::Connective(Connective::new(AtlasRect::new(3, 1, 4, 2), 0.25)),
        )
    }

    #[test]
    fn test_atlas_sample_is_linear() {
        let rect = AtlasRect::new(5, 1, 6, 2);
        assert_eq!(rect.sample(0.0, 0.0, 16.0, 8.0), AtlasSample { u: 5.0, v: 1.0 });
        assert_eq!(rect.sample(8.0, 4.0, 16.0, 8.0), AtlasSample { u: 5.5, v: 1.5 });
        assert_eq!(rect.sample(3.0, 3.0, 0.0, 0.0), AtlasSample { u: 5.0, v: 1.0 });
    }

    #[test]
    fn test_plain_appearance_has_no_overlay() {
        let def = TileDef::new(TileId(5), "wood".to_string(), AtlasRect::new(5, 0, 6, 1), TileKind::Plain);
        let state = def.default_state();
        for y in 0..8 {
            for x in 0..16 {
                let app = def.appearance_at(&state, x as f32, y as f32, 16.0, 8.0);
                assert!(app.overlay.is_none());
            }
        }
    }

    #[test]
    fn test_isolated_connective_blends_all_edges() {
        let def = dirt();
        let state = def.default_state();

        // Corner and each edge band blend; the centre does not.
        assert!(def.appearance_at(&state, 0.0, 0.0, 16.0, 8.0).overlay.is_some());
        assert!(def.appearance_at(&state, 8.0, 0.0, 16.0, 8.0).overlay.is_some());
        assert!(def.appearance_at(&state, 15.0, 4.0, 16.0, 8.0).overlay.is_some());
        assert!(def.appearance_at(&state, 8.0, 7.0, 16.0, 8.0).overlay.is_some());
        assert!(def.appearance_at(&state, 0.0, 4.0, 16.0, 8.0).overlay.is_some());
        assert!(def.appearance_at(&state, 8.0, 4.0, 16.0, 8.0).overlay.is_none());
    }

    #[test]
    fn test_connected_edges_do_not_blend() {
        let def = dirt();
        let state = CellState::with_mask(def.id(), 0b1111);
        for y in 0..8 {
            for x in 0..16 {
                let app = def.appearance_at(&state, x as f32, y as f32, 16.0, 8.0);
                assert!(app.overlay.is_none(), "fully connected cell blended at ({x}, {y})");
            }
        }

        // Only north open: the top band blends, the bottom band does not.
        let north_open = CellState::with_mask(def.id(), 0b1110);
        assert!(def.appearance_at(&north_open, 8.0, 1.0, 16.0, 8.0).overlay.is_some());
        assert!(def.appearance_at(&north_open, 8.0, 7.0, 16.0, 8.0).overlay.is_none());
    }

    #[test]
    fn test_overlay_sample_uses_connection_atlas() {
        let def = dirt();
        let app = def.appearance_at(&def.default_state(), 0.0, 0.0, 16.0, 8.0);
        assert_eq!(app.primary, AtlasSample { u: 1.0, v: 0.0 });
        assert_eq!(app.overlay, Some(AtlasSample { u: 3.0, v: 1.0 }));
    }

    #[test]
    fn test_resolve_alpha_rules() {
        let primary = AtlasSample { u: 0.0, v: 0.0 };
        let overlay = AtlasSample { u: 1.0, v: 0.0 };
        let texel = |alpha_primary: u8, alpha_overlay: u8| {
            move |s: AtlasSample| if s.u < 0.5 { ('p', alpha_primary) } else { ('o', alpha_overlay) }
        };
        let alpha = |t: &(char, u8)| t.1;

        let plain = Appearance::plain(primary);
        assert_eq!(plain.resolve(texel(255, 255), alpha), Some(('p', 255)));
        assert_eq!(plain.resolve(texel(10, 255), alpha), None);

        let blended = Appearance {
            primary,
            overlay: Some(overlay),
        };
        assert_eq!(blended.resolve(texel(255, 255), alpha), Some(('o', 255)));
        assert_eq!(blended.resolve(texel(255, 0), alpha), None);
        assert_eq!(blended.resolve(texel(255, 100), alpha), Some(('p', 255)));
    }

    #[test]
    fn test_plain_normalize_zeroes_mask() {
        let def = TileDef::new(TileId(5), "wood".to_string(), AtlasRect::new(5, 0, 6, 1), TileKind::Plain);
        let dirty = CellState::with_mask(TileId(5), 0b1010);
        assert_eq!(def.normalize(dirty), CellState::new(TileId(5)));

        let conn = dirt();
        let masked = CellState::with_mask(TileId(2), 0b1010);
        assert_eq!(conn.normalize(masked), masked);
    }

    #[test]
    fn test_air_fallback_normalizes_unknown_id() {
        let air = TileDef::new(TileId::AIR, "air".to_string(), AtlasRect::new(0, 0, 1, 1), TileKind::Plain);
        assert_eq!(air.normalize(CellState::with_mask(TileId(200), 0b0011)), CellState::AIR);
    }
}
