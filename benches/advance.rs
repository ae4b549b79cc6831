//! Benchmarks for the per-frame particle update.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use hvac_flow::{advance, ParticlePool, Params, Simulation, ZoneMap};

/// Pool that has been running long enough to fill every stage of the duct.
fn warmed_up(count: usize, params: Params) -> Simulation {
    let mut sim = Simulation::seeded(count, ZoneMap::default(), 42);
    for _ in 0..400 {
        sim.advance(params);
    }
    sim
}

fn bench_advance(c: &mut Criterion) {
    let mut group = c.benchmark_group("advance");
    let params = Params {
        blend_door: 0.5,
        mode_defrost: true,
        mode_foot: true,
        ..Params::default()
    };

    for count in [2_000, 20_000, 200_000] {
        group.bench_with_input(BenchmarkId::new("particles", count), &count, |b, &count| {
            let mut sim = warmed_up(count, params);
            b.iter(|| black_box(sim.advance(black_box(params))))
        });
    }

    group.finish();
}

fn bench_spawn(c: &mut Criterion) {
    let zones = ZoneMap::default();
    c.bench_function("spawn_2000", |b| {
        let mut rng = SmallRng::seed_from_u64(7);
        b.iter(|| black_box(ParticlePool::spawn(2_000, &zones, &mut rng)))
    });
}

fn bench_stats(c: &mut Criterion) {
    let sim = warmed_up(20_000, Params::default());
    c.bench_function("stats_20000", |b| b.iter(|| black_box(sim.stats())));
}

fn bench_free_function(c: &mut Criterion) {
    let zones = ZoneMap::default();
    let mut rng = SmallRng::seed_from_u64(9);
    let mut pool = ParticlePool::spawn(20_000, &zones, &mut rng);
    let params = Params::default();
    c.bench_function("advance_fn_20000", |b| {
        b.iter(|| black_box(advance(&mut pool, &zones, &params, 0.0, &mut rng)))
    });
}

criterion_group!(benches, bench_advance, bench_spawn, bench_stats, bench_free_function);
criterion_main!(benches);
