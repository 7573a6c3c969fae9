// Copyright 2025 the Vicinity Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::Point;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use vicinity_grid::Grid;
use vicinity_select::{
    ExactPotentials, GridPotentials, InverseDistance, Place, PlaceSet, PotentialComputer,
};

fn gen_uniform(count: usize, extent: f64) -> PlaceSet {
    let mut rng = SmallRng::seed_from_u64(0xCAFE_F00D_DEAD_BEEF);
    let places = (0..count as u64)
        .map(|i| {
            Place::new(i, rng.random_range(0.0..extent), rng.random_range(0.0..extent))
                .with_relevance(rng.random_range(0.0..=1.0))
        })
        .collect();
    PlaceSet::new(places).unwrap()
}

fn gen_clustered(n_clusters: usize, per_cluster: usize, spread: f64) -> PlaceSet {
    let mut rng = SmallRng::seed_from_u64(0xC1A5_7E55_9999_ABCD);
    let mut centers = Vec::with_capacity(n_clusters);
    for _ in 0..n_clusters {
        centers.push((rng.random_range(0.0_f64..2000.0), rng.random_range(0.0_f64..2000.0)));
    }
    let mut places = Vec::with_capacity(n_clusters * per_cluster);
    for (cx, cy) in centers {
        for _ in 0..per_cluster {
            let dx = rng.random_range(-0.5_f64..0.5) * spread;
            let dy = rng.random_range(-0.5_f64..0.5) * spread;
            let id = places.len() as u64;
            places.push(Place::new(id, cx + dx, cy + dy).with_relevance(rng.random_range(0.0..=1.0)));
        }
    }
    PlaceSet::new(places).unwrap()
}

fn bench_grid_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid_build");
    let mut rng = SmallRng::seed_from_u64(0xFACE_FEED_CAFE_BABE);
    let points: Vec<Point> = (0..16_384)
        .map(|_| Point::new(rng.random_range(0.0..2000.0), rng.random_range(0.0..2000.0)))
        .collect();
    group.throughput(Throughput::Elements(points.len() as u64));
    for &g in &[16usize, 256, 4096] {
        group.bench_function(format!("build_g{g}"), |b| {
            b.iter(|| {
                let grid = Grid::build(black_box(&points), g).unwrap();
                black_box(grid.active_len());
            });
        });
    }
    group.finish();
}

fn bench_exact(c: &mut Criterion) {
    let mut group = c.benchmark_group("exact_potentials");
    group.sample_size(20);
    for &n in &[500usize, 1000, 2000] {
        let set = gen_uniform(n, 2000.0);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("uniform_n{n}"), |b| {
            let computer = ExactPotentials::new(InverseDistance::new(50.0));
            b.iter(|| black_box(computer.compute(&set).unwrap().potentials.total()));
        });
    }
    group.finish();
}

fn bench_grid_potentials(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid_potentials");
    let uniform = gen_uniform(8192, 2000.0);
    let clustered = gen_clustered(16, 512, 80.0);
    group.throughput(Throughput::Elements(uniform.len() as u64));
    for &g in &[64usize, 256, 1024] {
        group.bench_function(format!("uniform_g{g}"), |b| {
            b.iter_batched(
                || GridPotentials::new(InverseDistance::new(50.0), g),
                |computer| black_box(computer.compute(&uniform).unwrap().potentials.total()),
                BatchSize::SmallInput,
            );
        });
        group.bench_function(format!("clustered_g{g}"), |b| {
            b.iter_batched(
                || GridPotentials::new(InverseDistance::new(50.0), g),
                |computer| black_box(computer.compute(&clustered).unwrap().active_cells),
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_grid_build, bench_exact, bench_grid_potentials);
criterion_main!(benches);
