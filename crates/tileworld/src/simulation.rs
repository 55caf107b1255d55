//! # Simulation Context
//!
//! One object owning everything a session needs:
//!
//! ```text
//! Simulation
//! ├── Arc<TileRegistry>   built once, shared with the world
//! ├── World               generated from NoiseTerrain(seed)
//! ├── Hotbar              what build_at places
//! ├── Camera              zoom and scroll
//! └── Player              position and grounding
//! ```
//!
//! Renderers and input layers borrow it; nothing here is global.

use std::sync::Arc;

use tileworld_core::{
    BuiltinTiles, GenerationReport, NoiseTerrain, TileComplete, TilePos, TileRegistry, World,
};
use tracing::{debug, info};

use crate::camera::{floor_to_cell, Camera, Player};
use crate::config::SimulationConfig;
use crate::error::SimulationResult;
use crate::hotbar::Hotbar;

/// Horizontal half-width of the player's footprint, in cells.
pub const PLAYER_HALF_WIDTH: f64 = 0.4;

/// A running tile-world session.
pub struct Simulation {
    /// Startup configuration, reused by `reset`.
    config: SimulationConfig,
    /// Tile kinds.
    registry: Arc<TileRegistry>,
    /// Ids of the built-in kinds.
    tiles: BuiltinTiles,
    /// The world.
    world: World,
    /// Summary of the last generation.
    report: GenerationReport,
    /// Build selection.
    hotbar: Hotbar,
    /// View state.
    camera: Camera,
    /// Player state.
    player: Player,
}

impl Simulation {
    /// Builds the registry and generates a world.
    ///
    /// # Errors
    ///
    /// Returns `World` if the world config is malformed.
    pub fn new(config: SimulationConfig) -> SimulationResult<Self> {
        let (registry, tiles) = TileRegistry::standard()?;
        let registry = Arc::new(registry);
        let (world, report) = Self::build_world(&config, &registry, &tiles)?;

        Ok(Self {
            config,
            registry,
            tiles,
            world,
            report,
            hotbar: Hotbar::new(),
            camera: Camera::new(config.camera),
            player: Player::spawn(&config.player),
        })
    }

    fn build_world(
        config: &SimulationConfig,
        registry: &Arc<TileRegistry>,
        tiles: &BuiltinTiles,
    ) -> SimulationResult<(World, GenerationReport)> {
        let mut terrain = NoiseTerrain::standard(config.terrain, config.seed, tiles);
        let mut world = World::new(config.world, Arc::clone(registry))?;
        let report = world.generate(&mut terrain)?;
        Ok((world, report))
    }

    /// Rebuilds the world and restores selection, view and player.
    ///
    /// The same seed rebuilds the same world.
    ///
    /// # Errors
    ///
    /// Returns `World` if generation fails.
    pub fn reset(&mut self) -> SimulationResult<GenerationReport> {
        let (world, report) = Self::build_world(&self.config, &self.registry, &self.tiles)?;
        self.world = world;
        self.report = report;
        self.hotbar = Hotbar::new();
        self.camera = Camera::new(self.config.camera);
        self.player = Player::spawn(&self.config.player);
        info!("Simulation reset with seed {}", self.config.seed);
        Ok(report)
    }

    /// Startup configuration.
    #[must_use]
    pub const fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// The world, read-only. Mutate through `break_at` and `build_at`.
    #[must_use]
    pub const fn world(&self) -> &World {
        &self.world
    }

    /// Tile kinds.
    #[must_use]
    pub fn registry(&self) -> &TileRegistry {
        &self.registry
    }

    /// Ids of the built-in kinds.
    #[must_use]
    pub const fn tiles(&self) -> &BuiltinTiles {
        &self.tiles
    }

    /// Summary of the last generation.
    #[must_use]
    pub const fn report(&self) -> GenerationReport {
        self.report
    }

    /// Build selection.
    #[must_use]
    pub const fn hotbar(&self) -> &Hotbar {
        &self.hotbar
    }

    /// Mutable build selection.
    pub fn hotbar_mut(&mut self) -> &mut Hotbar {
        &mut self.hotbar
    }

    /// View state.
    #[must_use]
    pub const fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Mutable view state.
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Player state.
    #[must_use]
    pub const fn player(&self) -> &Player {
        &self.player
    }

    /// Mutable player state.
    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    /// Replaces the cell at `pos` with AIR.
    pub fn break_at(&mut self, pos: impl Into<TilePos>) -> TileComplete<'_> {
        let pos = pos.into();
        debug!("Break at ({}, {})", pos.x, pos.y);
        let air = self.registry.air().default_state();
        self.world.place(pos, air)
    }

    /// Places the selected kind at `pos`.
    pub fn build_at(&mut self, pos: impl Into<TilePos>) -> TileComplete<'_> {
        let pos = pos.into();
        let state = self.hotbar.selected_state(&self.registry);
        debug!(
            "Build {} at ({}, {})",
            self.registry.get(state.kind).name(),
            pos.x,
            pos.y
        );
        self.world.place(pos, state)
    }

    /// Returns true if the world point `(x, y)` lies in a solid cell.
    #[must_use]
    pub fn solid_at(&self, x: f64, y: f64) -> bool {
        self.world
            .get_complete((floor_to_cell(x), floor_to_cell(y)))
            .is_solid()
    }

    /// Returns true if a solid cell lies under either edge of the player.
    #[must_use]
    pub fn is_grounded(&self) -> bool {
        let (x, y) = self.player.world_position();
        self.solid_at(x + PLAYER_HALF_WIDTH, y + 1.0) || self.solid_at(x - PLAYER_HALF_WIDTH, y + 1.0)
    }

    /// Renders the world as text, one line per row: `#` solid, `.` air.
    #[must_use]
    pub fn ascii_map(&self) -> String {
        let width = usize::try_from(self.world.width()).unwrap_or(0);
        let height = usize::try_from(self.world.height()).unwrap_or(0);
        let mut out = String::with_capacity((width + 1) * height);
        for y in 0..self.world.height() {
            for x in 0..self.world.width() {
                out.push(if self.world.is_solid((x, y)) { '#' } else { '.' });
            }
            out.push('\n');
        }
        out
    }

    /// One-line summary for logs.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{}x{} world, seed {}, {} chunks, {} solid cells",
            self.world.width(),
            self.world.height(),
            self.config.seed,
            self.report.chunks,
            self.world.solid_count()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tileworld_core::{CellState, WorldConfig};

    fn small() -> Simulation {
        let config = SimulationConfig {
            world: WorldConfig::new(32, 32, 8),
            ..SimulationConfig::default()
        };
        Simulation::new(config).unwrap()
    }

    #[test]
    fn test_build_and_break() {
        let mut sim = small();
        sim.hotbar_mut().select(3);

        let built = sim.build_at((5, 5)).state.kind;
        assert_eq!(built, sim.tiles().stone_bricks);
        assert!(sim.world().is_solid((5, 5)));

        let broken = sim.break_at((5, 5));
        assert_eq!(broken.state, CellState::AIR);
        assert!(!sim.world().is_solid((5, 5)));
    }

    #[test]
    fn test_build_outside_is_ignored() {
        let mut sim = small();
        let solid = sim.world().solid_count();
        let placed = sim.build_at((-1, 40));
        assert!(!placed.is_solid());
        assert_eq!(sim.world().solid_count(), solid);
    }

    #[test]
    fn test_grounding() {
        let mut sim = small();
        for x in 0..32 {
            sim.break_at((x, 10));
            sim.break_at((x, 11));
        }

        // Player stands on world (10.5, 9.5); feet probe row 10.
        *sim.player_mut() = Player { x: -10.5, y: -9.5 };
        assert!(!sim.is_grounded());

        sim.hotbar_mut().select(1);
        sim.build_at((10, 10));
        assert!(sim.is_grounded());

        // Spawn sits above the world, which reads as AIR.
        sim.reset().unwrap();
        assert!(!sim.is_grounded());
    }

    #[test]
    fn test_reset_restores_state() {
        let mut sim = small();
        let before = sim.ascii_map();

        sim.hotbar_mut().select(6);
        sim.camera_mut().zoom_in();
        for x in 0..32 {
            sim.break_at((x, 0));
        }

        let report = sim.reset().unwrap();
        assert_eq!(report, sim.report());
        assert_eq!(sim.hotbar().selected(), 1);
        assert!((sim.camera().scale() - 8.0).abs() < f64::EPSILON);
        assert_eq!(sim.ascii_map(), before);
    }

    #[test]
    fn test_ascii_map_shape() {
        let sim = small();
        let map = sim.ascii_map();
        let rows: Vec<&str> = map.lines().collect();
        assert_eq!(rows.len(), 32);
        assert!(rows.iter().all(|row| row.len() == 32));
        assert_eq!(map.matches('#').count(), sim.world().solid_count());
    }
}
