//! # Camera and Player
//!
//! View state handed to the renderer and input layers.
//!
//! ## Coordinates
//!
//! ```text
//! view space:  player (px, py)   camera (view_x, view_y)
//! world space: cell = floor(-view)         player stands on (-px, -py)
//! screen:      cell (x, y) drawn at ((x + view_x) * 2s, (y + view_y) * s)
//! ```
//!
//! A cell is twice as wide as tall on screen, `s` being the scale.

use tileworld_core::TilePos;

use crate::config::{CameraConfig, PlayerConfig};

/// Player position in view coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Player {
    /// Horizontal view coordinate.
    pub x: f64,
    /// Vertical view coordinate.
    pub y: f64,
}

impl Player {
    /// Spawns a player.
    #[must_use]
    pub const fn spawn(config: &PlayerConfig) -> Self {
        Self {
            x: config.spawn_x,
            y: config.spawn_y,
        }
    }

    /// World-space point the player stands on.
    #[inline]
    #[must_use]
    pub fn world_position(&self) -> (f64, f64) {
        (-self.x, -self.y)
    }
}

/// Zoom and scroll state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    /// Screen units per cell row; a cell is `2 * scale` wide.
    scale: f64,
    /// Horizontal view offset in cells.
    view_x: f64,
    /// Vertical view offset in cells.
    view_y: f64,
    /// Zoom limits.
    config: CameraConfig,
}

impl Camera {
    /// Creates a camera at the origin.
    #[must_use]
    pub const fn new(config: CameraConfig) -> Self {
        Self {
            scale: config.scale,
            view_x: 0.0,
            view_y: 0.0,
            config,
        }
    }

    /// Current scale.
    #[inline]
    #[must_use]
    pub const fn scale(&self) -> f64 {
        self.scale
    }

    /// Current view offset.
    #[inline]
    #[must_use]
    pub const fn view(&self) -> (f64, f64) {
        (self.view_x, self.view_y)
    }

    /// On-screen size of one cell.
    #[inline]
    #[must_use]
    pub fn cell_size(&self) -> (f64, f64) {
        (2.0 * self.scale, self.scale)
    }

    /// Zooms in by one step.
    pub fn zoom_in(&mut self) {
        self.scale += self.config.zoom_step;
    }

    /// Zooms out by one step unless at the minimum scale.
    pub fn zoom_out(&mut self) {
        if self.scale > self.config.min_scale {
            self.scale -= self.config.zoom_step;
        }
    }

    /// Restores the reset scale.
    pub fn reset_zoom(&mut self) {
        self.scale = self.config.reset_scale;
    }

    /// Centres the view on `player` for a screen of the given size.
    pub fn follow(&mut self, player: &Player, screen_width: f64, screen_height: f64) {
        let (cell_w, cell_h) = self.cell_size();
        if cell_w <= 0.0 || cell_h <= 0.0 {
            return;
        }
        self.view_x = player.x + (screen_width / cell_w) * 0.5;
        self.view_y = player.y + (screen_height / cell_h) * 0.5;
    }

    /// World cell under a screen point.
    #[must_use]
    pub fn screen_to_cell(&self, screen_x: f64, screen_y: f64) -> TilePos {
        let (cell_w, cell_h) = self.cell_size();
        let x = -self.view_x + screen_x / cell_w;
        let y = -self.view_y + screen_y / cell_h;
        TilePos::new(floor_to_cell(x), floor_to_cell(y))
    }

    /// Screen point of a world cell's top-left corner.
    #[must_use]
    pub fn cell_to_screen(&self, pos: TilePos) -> (f64, f64) {
        let (cell_w, cell_h) = self.cell_size();
        (
            (f64::from(pos.x) + self.view_x) * cell_w,
            (f64::from(pos.y) + self.view_y) * cell_h,
        )
    }
}

/// Cell index containing a world coordinate, saturating at the i32 range.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn floor_to_cell(value: f64) -> i32 {
    // `as` saturates and maps NaN to 0
    value.floor() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_steps_and_floor() {
        let mut camera = Camera::new(CameraConfig::default());
        assert!((camera.scale() - 8.0).abs() < f64::EPSILON);
        camera.zoom_in();
        assert!((camera.scale() - 8.25).abs() < f64::EPSILON);

        camera.reset_zoom();
        assert!((camera.scale() - 4.0).abs() < f64::EPSILON);

        for _ in 0..100 {
            camera.zoom_out();
        }
        assert!((camera.scale() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_screen_round_trip() {
        let mut camera = Camera::new(CameraConfig::default());
        let player = Player { x: -32.0, y: 25.0 };
        camera.follow(&player, 160.0, 80.0);
        assert_eq!(camera.view(), (-27.0, 30.0));

        let pos = TilePos::new(40, -20);
        let (sx, sy) = camera.cell_to_screen(pos);
        assert_eq!(camera.screen_to_cell(sx + 1.0, sy + 1.0), pos);
    }

    #[test]
    fn test_floor_to_cell() {
        assert_eq!(floor_to_cell(2.9), 2);
        assert_eq!(floor_to_cell(-0.1), -1);
        assert_eq!(floor_to_cell(f64::NAN), 0);
        assert_eq!(floor_to_cell(1e20), i32::MAX);
    }

    #[test]
    fn test_player_world_position() {
        let player = Player::spawn(&PlayerConfig::default());
        assert_eq!(player.world_position(), (32.0, -25.0));
    }
}
