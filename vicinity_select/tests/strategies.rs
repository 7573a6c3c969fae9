// Copyright 2025 the Vicinity Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end scenarios over the composed pipelines.

use std::error::Error as _;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use vicinity_select::{
    Error, ExactPotentials, GridPotentials, InverseDistance, Params, Place, PlaceId, PlaceSet,
    PotentialComputer, Stage, Strategies, Strategy, score,
};

fn square() -> PlaceSet {
    PlaceSet::new(vec![
        Place::new(0, 0.0, 0.0).with_relevance(1.0),
        Place::new(1, 0.0, 10.0).with_relevance(1.0),
        Place::new(2, 10.0, 0.0).with_relevance(1.0),
        Place::new(3, 10.0, 10.0).with_relevance(1.0),
    ])
    .unwrap()
}

fn two_clusters() -> PlaceSet {
    let mut places = Vec::new();
    for (cx, cy) in [(0.0, 0.0), (100.0, 100.0)] {
        for (dx, dy) in [(0.0, 0.0), (0.1, 0.0), (0.0, 0.1), (0.1, 0.1)] {
            let id = places.len() as u64;
            places.push(Place::new(id, cx + dx, cy + dy));
        }
    }
    PlaceSet::new(places).unwrap()
}

fn lattice(n: u64) -> PlaceSet {
    PlaceSet::new(
        (0..n * n)
            .map(|i| Place::new(i, (i % n) as f64 * 5.0, (i / n) as f64 * 5.0))
            .collect(),
    )
    .unwrap()
}

#[test]
fn square_picks_a_diagonal() {
    let set = square();
    let kernel = InverseDistance::default();
    let strategies = Strategies::new(&set, kernel).unwrap();
    let out = strategies.exact(Params::new(2, 1.0)).unwrap();

    let ids: Vec<PlaceId> = out.selection.ids().collect();
    assert!(
        ids == [PlaceId(0), PlaceId(3)] || ids == [PlaceId(1), PlaceId(2)],
        "expected a diagonal, got {ids:?}"
    );

    let places = set.as_slice();
    let adjacent = score(&[places[0], places[1]], strategies.ground_truth(), &kernel, 1.0).unwrap();
    assert!(
        out.score.combined > adjacent.combined,
        "diagonal {} vs adjacent {}",
        out.score.combined,
        adjacent.combined
    );
}

#[test]
fn single_cell_potentials_match_mean_of_their_total() {
    let set = lattice(5);
    let pot = GridPotentials::new(InverseDistance::new(5.0), 1)
        .compute(&set)
        .unwrap()
        .potentials;
    let expected = pot.total() / set.len() as f64;
    for (id, v) in pot.iter() {
        assert!((v - expected).abs() < 1e-12, "{id}: {v} vs {expected}");
    }
}

#[test]
fn selecting_everything_covers_everything() {
    let set = lattice(3);
    let strategies = Strategies::new(&set, InverseDistance::new(5.0)).unwrap();
    let out = strategies.exact(Params::new(set.len(), 1.0)).unwrap();
    let mut ids: Vec<PlaceId> = out.selection.ids().collect();
    ids.sort();
    assert_eq!(ids, set.ids().collect::<Vec<_>>());
    assert!((out.score.coverage() - 1.0).abs() < 1e-12, "coverage={}", out.score.coverage());
    // Redundancy over every ordered pair equals the total, so diversity is 1 − W.
    assert!(out.score.diversity.abs() < 1e-12, "diversity={}", out.score.diversity);
}

#[test]
fn grid_error_shrinks_as_clusters_separate() {
    let set = two_clusters();
    let kernel = InverseDistance::default();
    let exact = ExactPotentials::new(kernel).compute(&set).unwrap().potentials;

    let mut previous = f64::INFINITY;
    for cells in [1, 4, 64] {
        let approx = GridPotentials::new(kernel, cells)
            .compute(&set)
            .unwrap()
            .potentials;
        let err = approx.mean_abs_error(&exact).unwrap();
        assert!(err <= previous + 1e-9, "G={cells}: {err} > {previous}");
        previous = err;
    }
    assert!(previous < 0.05, "clusters in their own cells, err={previous}");
}

/// Low-discrepancy scatter over a 100 × 100 square.
fn scatter(n: u64) -> PlaceSet {
    let a = (5.0_f64.sqrt() - 1.0) / 2.0;
    let b = 2.0_f64.sqrt() - 1.0;
    PlaceSet::new(
        (0..n)
            .map(|i| {
                let t = i as f64;
                Place::new(i, (t * a) % 1.0 * 100.0, (t * b) % 1.0 * 100.0)
            })
            .collect(),
    )
    .unwrap()
}

fn grid_error(set: &PlaceSet, kernel: InverseDistance, cells: usize) -> f64 {
    let exact = ExactPotentials::new(kernel).compute(set).unwrap().potentials;
    GridPotentials::new(kernel, cells)
        .compute(set)
        .unwrap()
        .potentials
        .mean_abs_error(&exact)
        .unwrap()
}

#[test]
fn grid_error_never_grows_under_nested_refinement() {
    let set = scatter(100);
    let kernel = InverseDistance::new(10.0);
    let mut previous = f64::INFINITY;
    for side in [1_usize, 2, 4, 8, 16, 32] {
        let err = grid_error(&set, kernel, side * side);
        assert!(err <= previous + 1e-9, "side={side}: {err} > {previous}");
        previous = err;
    }
    assert!(previous < 1e-9, "one place per cell, err={previous}");
}

#[test]
fn grid_error_sweep_stays_below_the_single_cell_error() {
    let set = lattice(8);
    let kernel = InverseDistance::new(5.0);
    let coarsest = grid_error(&set, kernel, 1);
    for cells in 2..=set.len() {
        let err = grid_error(&set, kernel, cells);
        assert!(err <= coarsest + 1e-9, "G={cells}: {err} > {coarsest}");
    }
    assert!(grid_error(&set, kernel, set.len()) < 1e-9, "one place per cell");
}

#[test]
fn grids_that_do_not_nest_may_lose_accuracy() {
    // A 3 × 3 tiling of a 6 × 6 lattice lines up with it; a 4 × 4 tiling does not.
    let set = lattice(6);
    let kernel = InverseDistance::new(5.0);
    let aligned = grid_error(&set, kernel, 9);
    let misaligned = grid_error(&set, kernel, 16);
    assert!(misaligned > aligned, "{misaligned} vs {aligned}");
    assert!(grid_error(&set, kernel, 36) < 1e-9, "one place per cell");
}

#[cfg(target_pointer_width = "64")]
#[test]
fn huge_cell_counts_run_through_the_grid_pipelines() {
    let set = square();
    let strategies = Strategies::new(&set, InverseDistance::default()).unwrap();
    let params = Params::new(2, 1.0).with_cells(1 << 40).with_sample_size(4);
    let out = strategies.grid(params).unwrap();
    assert_eq!(out.active_cells, Some(4));
    let out = strategies
        .hybrid_grid(params, &mut SmallRng::seed_from_u64(3))
        .unwrap();
    assert_eq!(out.selection.len(), 2);
}

#[test]
fn grid_matches_exact_when_every_place_has_its_own_cell() {
    let set = lattice(6);
    let kernel = InverseDistance::new(5.0);
    let strategies = Strategies::new(&set, kernel).unwrap();
    let grid = GridPotentials::new(kernel, 36).compute(&set).unwrap();
    assert_eq!(grid.active_cells, Some(36));
    let err = grid
        .potentials
        .mean_abs_error(strategies.ground_truth())
        .unwrap();
    assert!(err < 1e-9, "err={err}");

    let params = Params::new(4, 1.0).with_cells(36);
    let via_cells = strategies.grid(params).unwrap();
    let pairwise = strategies.grid_potentials(params).unwrap();
    assert_eq!(
        via_cells.selection.places(),
        pairwise.selection.places(),
        "singleton cells make cell redundancy pairwise"
    );
}

#[test]
fn hybrid_and_random_run_on_seeded_sources() {
    let set = lattice(8);
    let strategies = Strategies::new(&set, InverseDistance::new(5.0)).unwrap();
    let params = Params::new(5, 2.0).with_cells(16).with_sample_size(32);

    for strategy in [Strategy::HybridExact, Strategy::HybridGrid, Strategy::Random] {
        let a = strategies
            .run(strategy, params, &mut SmallRng::seed_from_u64(42))
            .unwrap();
        let b = strategies
            .run(strategy, params, &mut SmallRng::seed_from_u64(42))
            .unwrap();
        assert_eq!(a.selection.places(), b.selection.places(), "{strategy} is seeded");
        assert!(a.timings.get(Stage::Sampling).is_some(), "{strategy} samples");
        assert_eq!(a.score.sum_s, strategies.ground_truth().total());
    }

    let hybrid = strategies
        .hybrid_exact(params, &mut SmallRng::seed_from_u64(1))
        .unwrap();
    assert_eq!(hybrid.weight_used, 2.0 * 32.0 / 64.0);
}

#[test]
fn failures_name_their_pipeline_and_cause() {
    let set = square();
    let strategies = Strategies::new(&set, InverseDistance::default()).unwrap();
    let mut rng = SmallRng::seed_from_u64(0);

    let err = strategies
        .run(Strategy::HybridGrid, Params::new(2, 1.0).with_cells(4), &mut rng)
        .unwrap_err();
    assert_eq!(err.strategy, Strategy::HybridGrid);
    assert!(err.to_string().contains("hybrid-grid"), "{err}");
    assert!(err.source().is_some(), "cause is chained");

    let err = strategies
        .run(Strategy::Random, Params::new(5, 1.0), &mut rng)
        .unwrap_err();
    assert_eq!(
        err.source,
        Error::InsufficientCandidates {
            requested: 5,
            available: 4
        }
    );
}
