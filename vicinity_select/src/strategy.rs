// Copyright 2025 the Vicinity Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Composed selection pipelines.
//!
//! [`Strategies`] owns no algorithm of its own. It sequences sampling, potential
//! precomputation, selection and scoring, times each stage, and scores every result
//! against the same exact ground truth over the full set so strategies are comparable.
//!
//! | Strategy | Sampling | Precompute | Selection redundancy |
//! |----------|----------|------------|----------------------|
//! | [`Strategy::Exact`] | – | exact over `S` | pairwise |
//! | [`Strategy::Grid`] | – | grid over `S` | cell centroids |
//! | [`Strategy::GridPotentials`] | – | grid over `S` | pairwise |
//! | [`Strategy::HybridExact`] | `K'` of `S` | exact over sample | pairwise |
//! | [`Strategy::HybridGrid`] | `K'` of `S` | grid over sample | cell centroids |
//! | [`Strategy::Random`] | `k` of `S` | – | – |
//!
//! Hybrid strategies select on the sample with the weight rescaled to the sample size,
//! `W' = W · K' / N`, and keep that selection as final.

use std::collections::BTreeMap;
use std::fmt;
use std::time::{Duration, Instant};

use rand::Rng;

use crate::error::{Error, PipelineError};
use crate::kernel::Kernel;
use crate::place::PlaceSet;
use crate::potential::{Computed, ExactPotentials, GridPotentials, PotentialComputer, Potentials};
use crate::sample::sample;
use crate::score::{Score, score};
use crate::select::{Redundancy, SelectConfig, Selection, Selector};

/// Available pipelines.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Strategy {
    /// Exact potentials, pairwise redundancy.
    Exact,
    /// Grid potentials, cell-level redundancy.
    Grid,
    /// Grid potentials, pairwise redundancy.
    GridPotentials,
    /// Sample `K'` places, then [`Strategy::Exact`] on the sample.
    HybridExact,
    /// Sample `K'` places, then [`Strategy::Grid`] on the sample.
    HybridGrid,
    /// `k` places uniformly at random.
    Random,
}

impl Strategy {
    /// Every strategy, in a stable order.
    pub const ALL: [Self; 6] = [
        Self::Exact,
        Self::Grid,
        Self::GridPotentials,
        Self::HybridExact,
        Self::HybridGrid,
        Self::Random,
    ];

    /// Short lowercase name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Grid => "grid",
            Self::GridPotentials => "grid-potentials",
            Self::HybridExact => "hybrid-exact",
            Self::HybridGrid => "hybrid-grid",
            Self::Random => "random",
        }
    }

    /// Whether the strategy needs a cell count `G`.
    pub const fn needs_cells(self) -> bool {
        matches!(self, Self::Grid | Self::GridPotentials | Self::HybridGrid)
    }

    /// Whether the strategy needs a sample size `K'`.
    pub const fn needs_sample(self) -> bool {
        matches!(self, Self::HybridExact | Self::HybridGrid)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-invocation parameters.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Params {
    /// Number of places to select.
    pub k: usize,
    /// Redundancy weight `W`.
    pub weight: f64,
    /// Requested cell count `G`, for grid strategies.
    pub cells: Option<usize>,
    /// Sample size `K'`, for hybrid strategies.
    pub sample_size: Option<usize>,
}

impl Params {
    /// Parameters with no grid or sample settings.
    pub const fn new(k: usize, weight: f64) -> Self {
        Self {
            k,
            weight,
            cells: None,
            sample_size: None,
        }
    }

    /// Set the cell count `G`.
    #[must_use]
    pub const fn with_cells(mut self, cells: usize) -> Self {
        self.cells = Some(cells);
        self
    }

    /// Set the sample size `K'`.
    #[must_use]
    pub const fn with_sample_size(mut self, sample_size: usize) -> Self {
        self.sample_size = Some(sample_size);
        self
    }

    fn select_config(&self) -> SelectConfig {
        SelectConfig::new(self.weight, self.k)
    }
}

impl fmt::Display for Params {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "k={}, W={:.3}", self.k, self.weight)?;
        if let Some(g) = self.cells {
            write!(f, ", G={g}")?;
        }
        if let Some(s) = self.sample_size {
            write!(f, ", K'={s}")?;
        }
        Ok(())
    }
}

/// Weight derived from set size, a damping factor `gamma` and `k`: `total / (gamma · k)`.
pub fn weight_for(total: usize, gamma: f64, k: usize) -> f64 {
    total as f64 / (gamma * k as f64)
}

/// Timed pipeline stage.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Stage {
    /// Random sampling or pruning.
    Sampling,
    /// Potential computation.
    Precompute,
    /// Greedy selection.
    Selection,
}

impl Stage {
    /// Short lowercase name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sampling => "sampling",
            Self::Precompute => "precompute",
            Self::Selection => "selection",
        }
    }
}

/// Wall time per stage, in the order the stages ran.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Timings {
    stages: Vec<(Stage, Duration)>,
}

impl Timings {
    fn record(&mut self, stage: Stage, elapsed: Duration) {
        self.stages.push((stage, elapsed));
    }

    /// Time spent in a stage, if it ran.
    pub fn get(&self, stage: Stage) -> Option<Duration> {
        self.stages
            .iter()
            .find(|(s, _)| *s == stage)
            .map(|(_, d)| *d)
    }

    /// Sum over all stages.
    pub fn total(&self) -> Duration {
        self.stages.iter().map(|(_, d)| *d).sum()
    }

    /// Stages and durations in execution order.
    pub fn iter(&self) -> impl Iterator<Item = (Stage, Duration)> + '_ {
        self.stages.iter().copied()
    }

    /// Stage name → elapsed seconds.
    pub fn as_seconds(&self) -> BTreeMap<&'static str, f64> {
        self.stages
            .iter()
            .map(|(s, d)| (s.name(), d.as_secs_f64()))
            .collect()
    }
}

/// Result of one pipeline invocation.
#[derive(Clone, Debug)]
pub struct Outcome {
    /// Strategy that produced this outcome.
    pub strategy: Strategy,
    /// Selected places.
    pub selection: Selection,
    /// Score against the full-set ground truth.
    pub score: Score,
    /// Per-stage wall time.
    pub timings: Timings,
    /// Weight the selector actually used (`W'` for hybrids).
    pub weight_used: f64,
    /// `|CL|` for grid strategies.
    pub active_cells: Option<usize>,
}

/// The pipelines over one place set, sharing its exact ground truth.
#[derive(Debug)]
pub struct Strategies<'a, K> {
    places: &'a PlaceSet,
    kernel: K,
    ground_truth: Potentials,
    ground_truth_elapsed: Duration,
}

impl<'a, K: Kernel> Strategies<'a, K> {
    /// Compute the exact ground truth over `places`.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyInput`] for an empty set.
    pub fn new(places: &'a PlaceSet, kernel: K) -> Result<Self, Error> {
        let Computed {
            potentials,
            elapsed,
            ..
        } = ExactPotentials::new(&kernel).compute(places)?;
        tracing::debug!(places = places.len(), ?elapsed, "ground truth ready");
        Ok(Self {
            places,
            kernel,
            ground_truth: potentials,
            ground_truth_elapsed: elapsed,
        })
    }

    /// The full set.
    pub const fn places(&self) -> &'a PlaceSet {
        self.places
    }

    /// Exact potentials over the full set.
    pub const fn ground_truth(&self) -> &Potentials {
        &self.ground_truth
    }

    /// Time the ground truth took.
    pub const fn ground_truth_elapsed(&self) -> Duration {
        self.ground_truth_elapsed
    }

    /// Run any strategy. The random source is only consumed by hybrid and random ones.
    pub fn run<R: Rng + ?Sized>(
        &self,
        strategy: Strategy,
        params: Params,
        rng: &mut R,
    ) -> Result<Outcome, PipelineError> {
        match strategy {
            Strategy::Exact => self.exact(params),
            Strategy::Grid => self.grid(params),
            Strategy::GridPotentials => self.grid_potentials(params),
            Strategy::HybridExact => self.hybrid_exact(params, rng),
            Strategy::HybridGrid => self.hybrid_grid(params, rng),
            Strategy::Random => self.random(params, rng),
        }
    }

    /// Exact potentials over the full set, pairwise selection.
    pub fn exact(&self, params: Params) -> Result<Outcome, PipelineError> {
        self.guarded(Strategy::Exact, params, || {
            let mut timings = Timings::default();
            let pre = ExactPotentials::new(&self.kernel).compute(self.places)?;
            timings.record(Stage::Precompute, pre.elapsed);
            let selector = Selector::new(&self.kernel);
            let selection = timed(&mut timings, Stage::Selection, || {
                selector.select(self.places, &pre.potentials, params.select_config())
            })?;
            self.finish(Strategy::Exact, params, selection, timings, params.weight, None)
        })
    }

    /// Grid potentials over the full set, cell-level redundancy.
    pub fn grid(&self, params: Params) -> Result<Outcome, PipelineError> {
        self.guarded(Strategy::Grid, params, || {
            self.on_grid(Strategy::Grid, params, self.places, params.weight, Timings::default(), true)
        })
    }

    /// Grid potentials over the full set, pairwise redundancy.
    pub fn grid_potentials(&self, params: Params) -> Result<Outcome, PipelineError> {
        self.guarded(Strategy::GridPotentials, params, || {
            self.on_grid(
                Strategy::GridPotentials,
                params,
                self.places,
                params.weight,
                Timings::default(),
                false,
            )
        })
    }

    /// Sample `K'` places, then exact potentials and pairwise selection on the sample.
    pub fn hybrid_exact<R: Rng + ?Sized>(
        &self,
        params: Params,
        rng: &mut R,
    ) -> Result<Outcome, PipelineError> {
        self.guarded(Strategy::HybridExact, params, || {
            let (pool, weight, mut timings) = self.prune(params, rng)?;
            let pre = ExactPotentials::new(&self.kernel).compute(&pool)?;
            timings.record(Stage::Precompute, pre.elapsed);
            let selector = Selector::new(&self.kernel);
            let config = params.select_config().with_weight(weight);
            let selection = timed(&mut timings, Stage::Selection, || {
                selector.select(&pool, &pre.potentials, config)
            })?;
            self.finish(Strategy::HybridExact, params, selection, timings, weight, None)
        })
    }

    /// Sample `K'` places, then grid potentials and cell-level selection on the sample.
    pub fn hybrid_grid<R: Rng + ?Sized>(
        &self,
        params: Params,
        rng: &mut R,
    ) -> Result<Outcome, PipelineError> {
        self.guarded(Strategy::HybridGrid, params, || {
            let (pool, weight, timings) = self.prune(params, rng)?;
            self.on_grid(Strategy::HybridGrid, params, &pool, weight, timings, true)
        })
    }

    /// `k` places uniformly at random, scored like every other strategy.
    pub fn random<R: Rng + ?Sized>(
        &self,
        params: Params,
        rng: &mut R,
    ) -> Result<Outcome, PipelineError> {
        self.guarded(Strategy::Random, params, || {
            let mut timings = Timings::default();
            let picked = timed(&mut timings, Stage::Sampling, || {
                sample(self.places, params.k, rng)
            })?;
            let selection = Selection::unscored(picked.as_slice().to_vec());
            self.finish(Strategy::Random, params, selection, timings, params.weight, None)
        })
    }

    fn on_grid(
        &self,
        strategy: Strategy,
        params: Params,
        pool: &PlaceSet,
        weight: f64,
        mut timings: Timings,
        cell_redundancy: bool,
    ) -> Result<Outcome, Error> {
        let cells = params.cells.unwrap_or_default();
        let (pre, grid) = GridPotentials::new(&self.kernel, cells).compute_with_grid(pool)?;
        timings.record(Stage::Precompute, pre.elapsed);
        let redundancy = if cell_redundancy {
            Redundancy::Cells(&grid)
        } else {
            Redundancy::Pairwise
        };
        let selector = Selector::new(&self.kernel).with_redundancy(redundancy);
        let config = params.select_config().with_weight(weight);
        let selection = timed(&mut timings, Stage::Selection, || {
            selector.select(pool, &pre.potentials, config)
        })?;
        self.finish(strategy, params, selection, timings, weight, pre.active_cells)
    }

    /// Sample the candidate pool for hybrid strategies and rescale the weight to it.
    fn prune<R: Rng + ?Sized>(
        &self,
        params: Params,
        rng: &mut R,
    ) -> Result<(PlaceSet, f64, Timings), Error> {
        let size = params.sample_size.unwrap_or_default();
        let mut timings = Timings::default();
        let pool = timed(&mut timings, Stage::Sampling, || sample(self.places, size, rng))?;
        let weight = params.weight * size as f64 / self.places.len() as f64;
        Ok((pool, weight, timings))
    }

    fn finish(
        &self,
        strategy: Strategy,
        params: Params,
        selection: Selection,
        timings: Timings,
        weight_used: f64,
        active_cells: Option<usize>,
    ) -> Result<Outcome, Error> {
        let score = score(
            selection.places(),
            &self.ground_truth,
            &self.kernel,
            params.weight,
        )?;
        tracing::debug!(
            %strategy,
            %params,
            weight_used,
            active_cells,
            combined = score.combined,
            relevance = score.relevance,
            diversity = score.diversity,
            total = ?timings.total(),
            "pipeline finished"
        );
        Ok(Outcome {
            strategy,
            selection,
            score,
            timings,
            weight_used,
            active_cells,
        })
    }

    /// Validate parameters, run the body, and tag any failure with its inputs.
    fn guarded(
        &self,
        strategy: Strategy,
        params: Params,
        body: impl FnOnce() -> Result<Outcome, Error>,
    ) -> Result<Outcome, PipelineError> {
        validate(strategy, &params, self.places.len())
            .and_then(|()| body())
            .map_err(|source| {
                tracing::debug!(%strategy, %params, error = %source, "pipeline failed");
                PipelineError {
                    strategy,
                    params,
                    source,
                }
            })
    }
}

fn validate(strategy: Strategy, params: &Params, available: usize) -> Result<(), Error> {
    if params.k == 0 {
        return Err(Error::InvalidArgument("k must be at least 1".into()));
    }
    if !(params.weight.is_finite() && params.weight > 0.0) {
        return Err(Error::InvalidArgument(format!(
            "weight W must be positive and finite, got {}",
            params.weight
        )));
    }
    if params.k > available {
        return Err(Error::InsufficientCandidates {
            requested: params.k,
            available,
        });
    }
    if strategy.needs_cells() {
        match params.cells {
            None => {
                return Err(Error::InvalidArgument(format!(
                    "{strategy} needs a cell count G"
                )));
            }
            Some(0) => {
                return Err(Error::InvalidArgument("cell count G must be at least 1".into()));
            }
            Some(_) => {}
        }
    }
    if strategy.needs_sample() {
        let Some(size) = params.sample_size else {
            return Err(Error::InvalidArgument(format!(
                "{strategy} needs a sample size K'"
            )));
        };
        if size < params.k || size > available {
            return Err(Error::InvalidArgument(format!(
                "sample size K'={size} outside [{}, {available}]",
                params.k
            )));
        }
    }
    Ok(())
}

fn timed<T>(
    timings: &mut Timings,
    stage: Stage,
    f: impl FnOnce() -> Result<T, Error>,
) -> Result<T, Error> {
    let start = Instant::now();
    let out = f()?;
    timings.record(stage, start.elapsed());
    Ok(out)
}
