// Copyright 2025 the Vicinity Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Strategy comparison.
//!
//! Generate a clustered city, run every strategy with the same parameters, and compare
//! scores and stage timings against the exact baseline.
//!
//! Run:
//! - `cargo run -p vicinity_demos --example compare_strategies`
//! - `RUST_LOG=vicinity_select=debug cargo run -p vicinity_demos --example compare_strategies`

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing_subscriber::EnvFilter;
use vicinity_select::{InverseDistance, Params, Place, PlaceSet, Strategies, Strategy, weight_for};

fn city(rng: &mut SmallRng, districts: usize, per_district: usize) -> PlaceSet {
    let mut places = Vec::with_capacity(districts * per_district);
    for _ in 0..districts {
        let cx = rng.random_range(0.0..1000.0);
        let cy = rng.random_range(0.0..1000.0);
        let radius = rng.random_range(10.0..60.0);
        for _ in 0..per_district {
            let id = places.len() as u64;
            let x = cx + rng.random_range(-radius..radius);
            let y = cy + rng.random_range(-radius..radius);
            places.push(Place::new(id, x, y).with_relevance(rng.random_range(0.0..1.0)));
        }
    }
    PlaceSet::new(places).unwrap()
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let mut rng = SmallRng::seed_from_u64(0x0C17_5EED);
    let places = city(&mut rng, 12, 150);
    let strategies = Strategies::new(&places, InverseDistance::new(25.0)).unwrap();
    tracing::info!(
        places = places.len(),
        elapsed = ?strategies.ground_truth_elapsed(),
        "ground truth"
    );

    let k = 15;
    let params = Params::new(k, weight_for(places.len(), 2.0, k))
        .with_cells(144)
        .with_sample_size(300);
    println!("{params}");

    let Ok(baseline) = strategies.exact(params) else {
        return;
    };
    for strategy in Strategy::ALL {
        match strategies.run(strategy, params, &mut rng) {
            Ok(out) => {
                let times: Vec<String> = out
                    .timings
                    .iter()
                    .map(|(stage, d)| format!("{}={:.2}ms", stage.name(), d.as_secs_f64() * 1e3))
                    .collect();
                println!(
                    "{:<16} combined={:.4} ({:+.1}%) relevance={:.3} diversity={:.4} cells={:?} {}",
                    strategy.name(),
                    out.score.combined,
                    out.score.pct_diff(&baseline.score),
                    out.score.relevance,
                    out.score.diversity,
                    out.active_cells,
                    times.join(" ")
                );
            }
            Err(err) => tracing::warn!(error = %err, cause = %err.source, "skipped"),
        }
    }
}
