// Copyright 2025 the Vicinity Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Vicinity Select: pick `k` places that are relevant, spread out, and representative.
//!
//! Given a set of geo-located places, each with an intrinsic relevance, Vicinity Select
//! chooses a subset that balances three things: individually relevant places, places
//! that "stand for" many others nearby (high potential), and places that are not
//! redundant with one another.
//!
//! - [`Kernel`]: distance → influence. [`InverseDistance`] is the default.
//! - [`PotentialComputer`]: per-place potentials, exact ([`ExactPotentials`]) or
//!   approximated on a uniform grid ([`GridPotentials`], backed by `vicinity_grid`).
//! - [`Selector`]: incremental greedy selection with a redundancy weight `W`, pairwise
//!   or at cell level ([`Redundancy`]).
//! - [`score()`]: composite relevance + diversity against ground-truth potentials.
//! - [`sample()`]: uniform random pruning with an injected random source.
//! - [`Strategies`]: the composed pipelines, timed and scored side by side.
//!
//! # Example
//!
//! ```rust
//! use rand::SeedableRng;
//! use rand::rngs::SmallRng;
//! use vicinity_select::{InverseDistance, Params, Place, PlaceSet, Strategies, Strategy};
//!
//! let places = PlaceSet::new(
//!     (0..100_u64)
//!         .map(|i| Place::new(i, (i % 10) as f64, (i / 10) as f64))
//!         .collect(),
//! )
//! .unwrap();
//!
//! let strategies = Strategies::new(&places, InverseDistance::default()).unwrap();
//! let params = Params::new(5, 1.0).with_cells(16).with_sample_size(40);
//! let mut rng = SmallRng::seed_from_u64(7);
//!
//! let exact = strategies.run(Strategy::Exact, params, &mut rng).unwrap();
//! let grid = strategies.run(Strategy::Grid, params, &mut rng).unwrap();
//! assert_eq!(exact.selection.len(), 5);
//! assert_eq!(grid.active_cells, Some(16));
//! // Both are scored against the same exact ground truth.
//! assert_eq!(exact.score.sum_s, grid.score.sum_s);
//! ```
//!
//! ### Logging
//!
//! Pipelines emit `tracing` events at `debug` level (one per pipeline run) and
//! `trace` level (one per greedy pick and per potential computation). Nothing is
//! printed unless the embedding application installs a subscriber.

pub mod error;
pub mod kernel;
pub mod place;
pub mod potential;
pub mod sample;
pub mod score;
pub mod select;
pub mod strategy;

pub use error::{Error, PipelineError};
pub use kernel::{InverseDistance, Kernel, Linear};
pub use place::{DEFAULT_RELEVANCE, Place, PlaceId, PlaceSet};
pub use potential::{Computed, ExactPotentials, GridPotentials, PotentialComputer, Potentials};
pub use sample::sample;
pub use score::{Score, score};
pub use select::{Growth, Phase, Redundancy, SelectConfig, Selection, Selector};
pub use strategy::{Outcome, Params, Stage, Strategies, Strategy, Timings, weight_for};
