//! Benchmark for noise generation performance.
//!
//! Run with: cargo bench --package tileworld_procedural --bench noise_benchmark

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use rand::rngs::mock::StepRng;
use tileworld_procedural::{hash_noise, interpolated_noise, NoiseField, TerrainRule};

fn benchmark_hash(c: &mut Criterion) {
    c.bench_function("hash_noise", |b| {
        let mut i = 0i32;
        b.iter(|| {
            i = i.wrapping_add(1);
            black_box(hash_noise(black_box(i), black_box(i ^ 0x55)))
        });
    });
}

fn benchmark_interpolated(c: &mut Criterion) {
    c.bench_function("interpolated_noise", |b| {
        let mut x = 1000.0f64;
        b.iter(|| {
            x += 0.1;
            black_box(interpolated_noise(black_box(x), black_box(x * 0.7)))
        });
    });
}

fn benchmark_fractal(c: &mut Criterion) {
    let field = NoiseField::default();

    c.bench_function("fractal_8_octaves", |b| {
        let mut x = 1000.0f64;
        b.iter(|| {
            x += 0.1;
            black_box(field.sample(black_box(x), black_box(x * 0.7)))
        });
    });
}

fn benchmark_terrain_world(c: &mut Criterion) {
    let rule = TerrainRule::default();

    let mut group = c.benchmark_group("terrain_rule");
    group.throughput(Throughput::Elements(128 * 128));
    group.sample_size(10);

    group.bench_function("classify_128x128", |b| {
        b.iter(|| {
            let mut rng = StepRng::new(0, 0x9E37_79B9);
            for y in 0..128 {
                for x in 0..128 {
                    black_box(rule.classify(x, y, &mut rng));
                }
            }
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_hash,
    benchmark_interpolated,
    benchmark_fractal,
    benchmark_terrain_world
);
criterion_main!(benches);
