//! # Terrain Quality Tests
//!
//! Verifies the terrain rule produces caves, an empty floor band and a
//! dirt gradient that thickens with depth.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tileworld_procedural::{TerrainCell, TerrainConfig, TerrainRule};

const WORLD: i32 = 128;

/// Test: The default rule yields both solid ground and open space.
#[test]
fn test_world_has_ground_and_caves() {
    let rule = TerrainRule::default();
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    let mut solid = 0;
    let mut air = 0;
    for y in 0..WORLD {
        for x in 0..WORLD {
            if rule.classify(x, y, &mut rng).is_solid() {
                solid += 1;
            } else {
                air += 1;
            }
        }
    }

    println!("Solid: {solid}, Air: {air}");
    assert!(solid > 0, "terrain should contain solid cells");
    assert!(air > 0, "terrain should contain open cells");
}

/// Test: Nothing solid exists at or below the depth cutoff.
#[test]
fn test_floor_band_is_empty() {
    let rule = TerrainRule::default();
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    for y in rule.config().depth_cutoff..WORLD {
        for x in 0..WORLD {
            assert_eq!(
                rule.classify(x, y, &mut rng),
                TerrainCell::Air,
                "solid cell below cutoff at ({x}, {y})"
            );
        }
    }
}

/// Test: Dirt is far more common deep down than near the top.
#[test]
fn test_soil_thickens_with_depth() {
    // Open the noise gate so every cell above the cutoff is solid.
    let rule = TerrainRule::new(TerrainConfig {
        threshold: f64::INFINITY,
        ..TerrainConfig::default()
    });
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    let soil_ratio = |rows: std::ops::Range<i32>, rng: &mut ChaCha8Rng| {
        let mut soil = 0u32;
        let mut total = 0u32;
        for y in rows {
            for x in 0..WORLD {
                if rule.classify(x, y, rng) == TerrainCell::Soil {
                    soil += 1;
                }
                total += 1;
            }
        }
        f64::from(soil) / f64::from(total)
    };

    let shallow = soil_ratio(0..20, &mut rng);
    let deep = soil_ratio(90..112, &mut rng);

    println!("Soil ratio shallow: {shallow:.3}, deep: {deep:.3}");
    assert!(shallow < 0.2, "shallow soil ratio too high: {shallow}");
    assert!(deep > 0.4, "deep soil ratio too low: {deep}");
}

/// Test: The same seed reproduces the same world.
#[test]
fn test_seeded_world_is_reproducible() {
    let rule = TerrainRule::default();
    let mut a = ChaCha8Rng::seed_from_u64(2024);
    let mut b = ChaCha8Rng::seed_from_u64(2024);

    for y in 0..WORLD {
        for x in 0..WORLD {
            assert_eq!(rule.classify(x, y, &mut a), rule.classify(x, y, &mut b));
        }
    }
}
