// Copyright 2025 the Vicinity Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Selection basics.
//!
//! Compute exact potentials for a handful of places, then grow a selection one pick at a
//! time and score it.
//!
//! Run:
//! - `cargo run -p vicinity_demos --example select_basics`
//! - `RUST_LOG=vicinity_select=trace cargo run -p vicinity_demos --example select_basics`

use tracing_subscriber::EnvFilter;
use vicinity_select::{
    ExactPotentials, InverseDistance, Phase, Place, PlaceSet, PotentialComputer, SelectConfig,
    Selector, score,
};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    // A dense downtown block and a few outlying landmarks.
    let places = PlaceSet::new(vec![
        Place::new(1, 0.0, 0.0).with_relevance(0.9),
        Place::new(2, 0.5, 0.2).with_relevance(0.8),
        Place::new(3, 0.3, 0.6).with_relevance(0.7),
        Place::new(4, 0.9, 0.4).with_relevance(0.6),
        Place::new(5, 12.0, 3.0).with_relevance(0.95),
        Place::new(6, 4.0, 14.0).with_relevance(0.5),
        Place::new(7, 15.0, 15.0),
    ])
    .unwrap();

    let kernel = InverseDistance::new(2.0);
    let computed = ExactPotentials::new(kernel).compute(&places).unwrap();
    for (id, value) in computed.potentials.iter() {
        println!("potential {id}: {value:.3}");
    }

    let config = SelectConfig::new(1.0, 3);
    let selector = Selector::new(kernel);
    let mut growth = selector
        .start(&places, &computed.potentials, config)
        .unwrap();
    assert_eq!(growth.phase(), Phase::Growing);
    while let Some(place) = growth.step() {
        println!("picked {} at {:?}", place.id, place.position);
    }
    assert_eq!(growth.phase(), Phase::Done);

    let selection = growth.finish();
    let sc = score(selection.places(), &computed.potentials, &kernel, config.weight).unwrap();
    println!(
        "relevance={:.3} diversity={:.3} combined={:.3} coverage={:.3}",
        sc.relevance,
        sc.diversity,
        sc.combined,
        sc.coverage()
    );
}
