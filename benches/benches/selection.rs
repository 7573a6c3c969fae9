// Copyright 2025 the Vicinity Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use vicinity_select::{
    ExactPotentials, GridPotentials, InverseDistance, Params, Place, PlaceSet, PotentialComputer,
    Redundancy, SelectConfig, Selector, Strategies, Strategy, weight_for,
};

fn gen_uniform(count: usize) -> PlaceSet {
    let mut rng = SmallRng::seed_from_u64(0xBADC_F00D_1234_5678);
    let places = (0..count as u64)
        .map(|i| {
            Place::new(i, rng.random_range(0.0..2000.0), rng.random_range(0.0..2000.0))
                .with_relevance(rng.random_range(0.0..=1.0))
        })
        .collect();
    PlaceSet::new(places).unwrap()
}

fn bench_selector(c: &mut Criterion) {
    let mut group = c.benchmark_group("selector");
    let kernel = InverseDistance::new(50.0);
    let set = gen_uniform(4096);
    let potentials = ExactPotentials::new(kernel).compute(&set).unwrap().potentials;
    let (_, grid) = GridPotentials::new(kernel, 256)
        .compute_with_grid(&set)
        .unwrap();
    for &k in &[10usize, 50, 100] {
        let config = SelectConfig::new(weight_for(set.len(), 1.0, k), k);
        group.bench_function(format!("pairwise_k{k}"), |b| {
            let selector = Selector::new(kernel);
            b.iter(|| black_box(selector.select(&set, &potentials, config).unwrap().len()));
        });
        group.bench_function(format!("cells_k{k}"), |b| {
            let selector = Selector::new(kernel).with_redundancy(Redundancy::Cells(&grid));
            b.iter(|| black_box(selector.select(&set, &potentials, config).unwrap().len()));
        });
    }
    group.finish();
}

fn bench_pipelines(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipelines");
    group.sample_size(10);
    let set = gen_uniform(2000);
    let strategies = Strategies::new(&set, InverseDistance::new(50.0)).unwrap();
    let k = 20;
    let params = Params::new(k, weight_for(set.len(), 1.0, k))
        .with_cells(256)
        .with_sample_size(400);
    for strategy in Strategy::ALL {
        group.bench_function(strategy.name(), |b| {
            let mut rng = SmallRng::seed_from_u64(0x5EED);
            b.iter(|| {
                let out = strategies.run(strategy, params, &mut rng).unwrap();
                black_box(out.score.combined)
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_selector, bench_pipelines);
criterion_main!(benches);
