//! # Fractal Value Noise
//!
//! Deterministic 2D value noise built from an integer hash.
//!
//! ## Pipeline
//!
//! 1. `hash_noise`: scrambles an integer lattice point into [-1, 1]
//! 2. `smoothed_noise`: 3x3 weighted average of the hashed lattice
//! 3. `interpolated_noise`: cosine-eased bilinear blend of the 4 corners
//! 4. `fractal`: sum of octaves at doubling frequency
//!
//! ## Determinism Guarantee
//!
//! There is no seed and no hidden state. A sample depends only on its
//! arguments and the fixed hash constants, so the same call returns the
//! bit-identical value on any platform, any time.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

/// Weight of each diagonal neighbour in the smoothing kernel.
const CORNER_WEIGHT: f64 = 1.0 / 16.0;
/// Weight of each orthogonal neighbour in the smoothing kernel.
const SIDE_WEIGHT: f64 = 1.0 / 8.0;
/// Weight of the centre sample in the smoothing kernel.
const CENTER_WEIGHT: f64 = 1.0 / 4.0;

/// Hashes an integer lattice point to a value in [-1, 1].
///
/// Classic multiplicative/XOR scramble with 32-bit wrapping arithmetic.
#[inline]
#[must_use]
pub fn hash_noise(ix: i32, iy: i32) -> f64 {
    let n = ix.wrapping_add(iy.wrapping_mul(57));
    let n = (n << 13) ^ n;
    let scrambled = n
        .wrapping_mul(n.wrapping_mul(n).wrapping_mul(15_731).wrapping_add(789_221))
        .wrapping_add(1_376_312_589);
    1.0 - f64::from(scrambled & 0x7fff_ffff) / 1_073_741_824.0
}

/// Smooths the hashed lattice with a 3x3 kernel.
///
/// Diagonals weigh 1/16, orthogonals 1/8 and the centre 1/4, so the
/// result stays inside [-1, 1].
#[must_use]
pub fn smoothed_noise(ix: i32, iy: i32) -> f64 {
    let (l, r) = (ix.wrapping_sub(1), ix.wrapping_add(1));
    let (u, d) = (iy.wrapping_sub(1), iy.wrapping_add(1));

    let corners = hash_noise(l, u) + hash_noise(r, u) + hash_noise(l, d) + hash_noise(r, d);
    let sides = hash_noise(l, iy) + hash_noise(r, iy) + hash_noise(ix, u) + hash_noise(ix, d);
    let center = hash_noise(ix, iy);

    corners * CORNER_WEIGHT + sides * SIDE_WEIGHT + center * CENTER_WEIGHT
}

/// Cosine-eased interpolation between `a` and `b`.
#[inline]
#[must_use]
pub fn cosine_interpolate(a: f64, b: f64, t: f64) -> f64 {
    let eased = (1.0 - (t * PI).cos()) * 0.5;
    a * (1.0 - eased) + b * eased
}

/// Samples smoothed noise at a fractional coordinate.
///
/// Blends the 4 surrounding lattice corners with cosine easing. At integer
/// coordinates this is exactly `smoothed_noise`.
#[must_use]
pub fn interpolated_noise(x: f64, y: f64) -> f64 {
    let x_floor = x.floor();
    let y_floor = y.floor();
    let x_frac = x - x_floor;
    let y_frac = y - y_floor;
    let x_whole = lattice(x_floor);
    let y_whole = lattice(y_floor);

    let v1 = smoothed_noise(x_whole, y_whole);
    let v2 = smoothed_noise(x_whole, y_whole.wrapping_add(1));
    let v3 = smoothed_noise(x_whole.wrapping_add(1), y_whole);
    let v4 = smoothed_noise(x_whole.wrapping_add(1), y_whole.wrapping_add(1));

    let top = cosine_interpolate(v1, v3, x_frac);
    let bottom = cosine_interpolate(v2, v4, x_frac);

    cosine_interpolate(top, bottom, y_frac)
}

/// Sums `octaves - 1` layers of interpolated noise.
///
/// Layer `i` samples at frequency `2^i` with amplitude `persistence^i`.
/// `octaves` of 0 or 1 yields 0.0.
#[must_use]
pub fn fractal(x: f64, y: f64, octaves: u32, persistence: f64) -> f64 {
    let mut total = 0.0;
    let mut frequency = 1.0;
    let mut amplitude = 1.0;

    for _ in 0..octaves.saturating_sub(1) {
        total += interpolated_noise(x * frequency, y * frequency) * amplitude;
        frequency *= 2.0;
        amplitude *= persistence;
    }

    total
}

/// Converts a floored coordinate to a lattice index.
///
/// Saturates outside the i32 range, which is far beyond any world extent.
#[inline]
#[allow(clippy::cast_possible_truncation)]
fn lattice(floored: f64) -> i32 {
    floored as i32
}

/// Fractal noise sampler with fixed octave parameters.
///
/// # Example
///
/// ```rust
/// use tileworld_procedural::NoiseField;
///
/// let field = NoiseField::default();
/// let a = field.sample(100.5, 200.25);
/// let b = field.sample(100.5, 200.25);
/// assert_eq!(a.to_bits(), b.to_bits());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NoiseField {
    /// Octave count. Only `octaves - 1` layers are summed.
    pub octaves: u32,
    /// Amplitude decay per octave.
    pub persistence: f64,
}

impl NoiseField {
    /// Default octave count.
    pub const DEFAULT_OCTAVES: u32 = 8;
    /// Default amplitude decay.
    pub const DEFAULT_PERSISTENCE: f64 = 0.5;

    /// Creates a sampler with the given octave parameters.
    #[inline]
    #[must_use]
    pub const fn new(octaves: u32, persistence: f64) -> Self {
        Self {
            octaves,
            persistence,
        }
    }

    /// Samples fractal noise at (x, y).
    #[inline]
    #[must_use]
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        fractal(x, y, self.octaves, self.persistence)
    }

    /// Samples fractal noise remapped linearly from [-1, 1] to [0, 1].
    ///
    /// Multi-octave sums can exceed [-1, 1]; those values map outside
    /// [0, 1] and are not clamped.
    #[inline]
    #[must_use]
    pub fn normalized(&self, x: f64, y: f64) -> f64 {
        remap(self.sample(x, y), -1.0, 1.0, 0.0, 1.0)
    }

    /// Upper bound on the absolute value of any sample.
    #[must_use]
    pub fn amplitude_bound(&self) -> f64 {
        let mut bound = 0.0;
        let mut amplitude: f64 = 1.0;
        for _ in 0..self.octaves.saturating_sub(1) {
            bound += amplitude.abs();
            amplitude *= self.persistence;
        }
        bound
    }
}

impl Default for NoiseField {
    fn default() -> Self {
        Self::new(Self::DEFAULT_OCTAVES, Self::DEFAULT_PERSISTENCE)
    }
}

/// Linearly remaps `value` from `[from_min, from_max]` to `[to_min, to_max]`.
#[inline]
#[must_use]
pub fn remap(value: f64, from_min: f64, from_max: f64, to_min: f64, to_max: f64) -> f64 {
    (to_max - to_min) / (from_max - from_min) * (value - from_max) + to_max
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_stable() {
        // Reference values of the fixed hash constants.
        let expected = [
            ((0, 0), -0.281_790_983_863_174_9),
            ((1, 0), -0.226_373_051_293_194_3),
            ((0, 1), 0.204_343_984_834_849_83),
            ((-3, 7), -0.104_864_009_656_012_06),
        ];
        for ((x, y), value) in expected {
            let got = hash_noise(x, y);
            assert!(
                (got - value).abs() < 1e-12,
                "hash_noise({x}, {y}) = {got}, expected {value}"
            );
        }
    }

    #[test]
    fn test_hash_range() {
        for y in -200..200 {
            for x in -200..200 {
                let v = hash_noise(x, y);
                assert!((-1.0..=1.0).contains(&v), "hash {v} out of range at ({x}, {y})");
            }
        }
    }

    #[test]
    fn test_hash_survives_extremes() {
        for &(x, y) in &[(i32::MAX, i32::MAX), (i32::MIN, i32::MIN), (i32::MAX, i32::MIN)] {
            let v = hash_noise(x, y);
            assert!((-1.0..=1.0).contains(&v));
            let _ = smoothed_noise(x, y);
        }
    }

    #[test]
    fn test_smoothed_matches_kernel() {
        let (x, y) = (5, -9);
        let manual = (hash_noise(4, -10) + hash_noise(6, -10) + hash_noise(4, -8) + hash_noise(6, -8))
            / 16.0
            + (hash_noise(4, -9) + hash_noise(6, -9) + hash_noise(5, -10) + hash_noise(5, -8)) / 8.0
            + hash_noise(5, -9) / 4.0;
        assert!((smoothed_noise(x, y) - manual).abs() < 1e-12);
    }

    #[test]
    fn test_interpolated_hits_lattice() {
        for i in -20..20 {
            let x = i * 3;
            let y = i * 7 + 2;
            let lattice_value = smoothed_noise(x, y);
            let sampled = interpolated_noise(f64::from(x), f64::from(y));
            assert!((lattice_value - sampled).abs() < 1e-12);
        }
    }

    #[test]
    fn test_cosine_interpolate_endpoints() {
        assert!((cosine_interpolate(2.0, 5.0, 0.0) - 2.0).abs() < 1e-12);
        assert!((cosine_interpolate(2.0, 5.0, 1.0) - 5.0).abs() < 1e-12);
        assert!((cosine_interpolate(2.0, 5.0, 0.5) - 3.5).abs() < 1e-12);
    }

    #[test]
    fn test_continuity() {
        let x = 1000.3;
        let y = 1000.7;
        let delta = 0.0001;

        let v1 = interpolated_noise(x, y);
        let v2 = interpolated_noise(x + delta, y);
        let v3 = interpolated_noise(x, y + delta);

        assert!((v1 - v2).abs() < 0.01, "noise should be continuous in x");
        assert!((v1 - v3).abs() < 0.01, "noise should be continuous in y");
    }

    #[test]
    fn test_fractal_determinism() {
        for i in 0..200 {
            let x = f64::from(i) * 0.37 + 1000.0;
            let y = f64::from(i) * 0.11 + 1000.0;
            let a = fractal(x, y, 8, 0.5);
            let b = fractal(x, y, 8, 0.5);
            assert_eq!(a.to_bits(), b.to_bits(), "fractal must be bit-identical");
        }
    }

    #[test]
    fn test_fractal_octave_count() {
        let (x, y) = (1003.25, 1001.5);
        assert_eq!(fractal(x, y, 0, 0.5), 0.0);
        assert_eq!(fractal(x, y, 1, 0.5), 0.0);
        assert!((fractal(x, y, 2, 0.5) - interpolated_noise(x, y)).abs() < 1e-12);

        let two_layers = interpolated_noise(x, y) + interpolated_noise(x * 2.0, y * 2.0) * 0.5;
        assert!((fractal(x, y, 3, 0.5) - two_layers).abs() < 1e-12);
    }

    #[test]
    fn test_fractal_within_bound() {
        let field = NoiseField::default();
        let bound = field.amplitude_bound();
        assert!((bound - 1.984_375).abs() < 1e-12);

        for i in 0..2000 {
            let x = f64::from(i) * 0.13 - 130.0;
            let y = f64::from(i) * 0.29 + 7.0;
            let v = field.sample(x, y);
            assert!(v.abs() <= bound, "sample {v} exceeds bound {bound}");
        }
    }

    #[test]
    fn test_normalized_remap() {
        assert!((remap(-1.0, -1.0, 1.0, 0.0, 1.0) - 0.0).abs() < 1e-12);
        assert!((remap(1.0, -1.0, 1.0, 0.0, 1.0) - 1.0).abs() < 1e-12);
        assert!((remap(0.0, -1.0, 1.0, 0.0, 1.0) - 0.5).abs() < 1e-12);

        let field = NoiseField::default();
        let raw = field.sample(1012.0, 1034.5);
        assert!((field.normalized(1012.0, 1034.5) - (raw + 1.0) / 2.0).abs() < 1e-12);
    }
}
