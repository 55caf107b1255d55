//! # Terrain Rule
//!
//! Decides what occupies a world cell from fractal noise and depth.
//!
//! The whole terrain algorithm is one rule:
//!
//! ```text
//! n = fractal(x * f + K, (y / 2) * f + K)
//! if n < threshold and y < depth_cutoff:
//!     roll < soil_weight * (y / depth_scale)  -> Soil
//!     otherwise                               -> Rock
//! else                                        -> Air
//! ```
//!
//! The random roll comes from a caller-supplied source, so the rule is
//! testable without touching global state.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::noise::NoiseField;

/// What the terrain rule places in a cell.
///
/// The core maps these onto registered tile kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TerrainCell {
    /// Empty cell.
    Air,
    /// Soft solid (dirt). More likely deeper down.
    Soil,
    /// Hard solid (stone).
    Rock,
}

impl TerrainCell {
    /// Returns true for `Soil` and `Rock`.
    #[inline]
    #[must_use]
    pub const fn is_solid(self) -> bool {
        !matches!(self, Self::Air)
    }
}

/// Tunables for the terrain rule.
///
/// Defaults reproduce the classic look: caves carved by noise, a dirt
/// gradient that thickens with depth, and an empty band below the cutoff.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Noise octave count.
    pub octaves: u32,
    /// Noise amplitude decay per octave.
    pub persistence: f64,
    /// Coordinate scale applied before sampling.
    pub frequency: f64,
    /// Offset added to both sample coordinates, away from the origin.
    pub offset: f64,
    /// Noise values below this are solid.
    pub threshold: f64,
    /// Rows at or below this y are never solid.
    pub depth_cutoff: i32,
    /// Soil probability at `depth_scale`.
    pub soil_weight: f64,
    /// Depth at which soil reaches `soil_weight` probability.
    pub depth_scale: f64,
    /// Number of buckets in the random roll.
    pub roll_resolution: u32,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            octaves: NoiseField::DEFAULT_OCTAVES,
            persistence: NoiseField::DEFAULT_PERSISTENCE,
            frequency: 0.1,
            offset: 1000.0,
            threshold: 0.15,
            depth_cutoff: 112,
            soil_weight: 0.8,
            depth_scale: 120.0,
            roll_resolution: 120,
        }
    }
}

/// The terrain decision rule.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TerrainRule {
    /// Noise sampler.
    field: NoiseField,
    /// Rule parameters.
    config: TerrainConfig,
}

impl TerrainRule {
    /// Creates a rule from its configuration.
    #[must_use]
    pub fn new(config: TerrainConfig) -> Self {
        debug!(
            "Terrain rule: {} octaves, threshold {}, depth cutoff {}",
            config.octaves, config.threshold, config.depth_cutoff
        );
        Self {
            field: NoiseField::new(config.octaves, config.persistence),
            config,
        }
    }

    /// Returns the rule parameters.
    #[inline]
    #[must_use]
    pub const fn config(&self) -> &TerrainConfig {
        &self.config
    }

    /// Samples the terrain noise for a world cell.
    ///
    /// The vertical axis is stretched by two so caves run wide.
    #[must_use]
    pub fn density(&self, global_x: i32, global_y: i32) -> f64 {
        let c = &self.config;
        let sx = f64::from(global_x) * c.frequency + c.offset;
        let sy = (f64::from(global_y) / 2.0) * c.frequency + c.offset;
        self.field.sample(sx, sy)
    }

    /// Returns true if the noise and depth gates admit a solid cell.
    ///
    /// Does not consume randomness.
    #[must_use]
    pub fn is_solid(&self, global_x: i32, global_y: i32) -> bool {
        global_y < self.config.depth_cutoff && self.density(global_x, global_y) < self.config.threshold
    }

    /// Classifies a world cell.
    ///
    /// `rng` is only drawn from when the cell is solid, once per cell.
    pub fn classify<R: Rng + ?Sized>(&self, global_x: i32, global_y: i32, rng: &mut R) -> TerrainCell {
        if !self.is_solid(global_x, global_y) {
            return TerrainCell::Air;
        }

        let resolution = self.config.roll_resolution.max(1);
        let roll = f64::from(rng.gen_range(0..resolution)) / f64::from(resolution);
        let soil_chance = self.config.soil_weight * (f64::from(global_y) / self.config.depth_scale);

        if roll < soil_chance {
            TerrainCell::Soil
        } else {
            TerrainCell::Rock
        }
    }
}

impl Default for TerrainRule {
    fn default() -> Self {
        Self::new(TerrainConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_density_matches_noise_field() {
        let rule = TerrainRule::default();
        let expected = NoiseField::default().sample(3.0 * 0.1 + 1000.0, (10.0 / 2.0) * 0.1 + 1000.0);
        assert_eq!(rule.density(3, 10).to_bits(), expected.to_bits());
    }

    #[test]
    fn test_below_cutoff_is_air() {
        let rule = TerrainRule::new(TerrainConfig {
            threshold: f64::INFINITY,
            ..TerrainConfig::default()
        });
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for x in 0..64 {
            assert_eq!(rule.classify(x, 112, &mut rng), TerrainCell::Air);
            assert_eq!(rule.classify(x, 127, &mut rng), TerrainCell::Air);
            assert!(rule.classify(x, 111, &mut rng).is_solid());
        }
    }

    #[test]
    fn test_threshold_gate() {
        let rule = TerrainRule::new(TerrainConfig {
            threshold: f64::NEG_INFINITY,
            ..TerrainConfig::default()
        });
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for y in 0..112 {
            assert_eq!(rule.classify(5, y, &mut rng), TerrainCell::Air);
        }
    }

    #[test]
    fn test_air_does_not_consume_rng() {
        let rule = TerrainRule::new(TerrainConfig {
            threshold: f64::NEG_INFINITY,
            ..TerrainConfig::default()
        });
        let mut a = ChaCha8Rng::seed_from_u64(99);
        let mut b = ChaCha8Rng::seed_from_u64(99);
        for x in 0..32 {
            let _ = rule.classify(x, 10, &mut a);
        }
        assert_eq!(a.gen::<u64>(), b.gen::<u64>());
    }

    #[test]
    fn test_top_row_is_always_rock() {
        // Soil chance is zero at y = 0.
        let rule = TerrainRule::new(TerrainConfig {
            threshold: f64::INFINITY,
            ..TerrainConfig::default()
        });
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for x in 0..100 {
            assert_eq!(rule.classify(x, 0, &mut rng), TerrainCell::Rock);
        }
    }

    #[test]
    fn test_zero_roll_gives_soil_below_surface() {
        let rule = TerrainRule::new(TerrainConfig {
            threshold: f64::INFINITY,
            ..TerrainConfig::default()
        });
        // A constant-zero source always rolls bucket 0.
        let mut rng = StepRng::new(0, 0);
        assert_eq!(rule.classify(0, 60, &mut rng), TerrainCell::Soil);
        assert_eq!(rule.classify(0, 0, &mut rng), TerrainCell::Rock);
    }

    #[test]
    fn test_classification_is_reproducible() {
        let rule = TerrainRule::default();
        let mut a = ChaCha8Rng::seed_from_u64(1234);
        let mut b = ChaCha8Rng::seed_from_u64(1234);
        for y in 0..128 {
            for x in 0..128 {
                assert_eq!(rule.classify(x, y, &mut a), rule.classify(x, y, &mut b));
            }
        }
    }
}
