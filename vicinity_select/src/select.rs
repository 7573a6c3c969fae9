// Copyright 2025 the Vicinity Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Incremental diversified selection.
//!
//! Greedy "incremental addition with updates": every candidate carries a priority
//! (relevance plus its share of the total potential) and a redundancy penalty. Each
//! round picks the candidate with the best
//!
//! `gain(p) = relevance(p) / k + potential(p) / T − 2 · W · penalty(p) / T`
//!
//! where `T` is the summed potential of the candidates, then adds the influence of the
//! new pick to the penalty of every remaining candidate. Nothing is recomputed from
//! scratch, so a run costs O(k · N) kernel evaluations on top of sorting.
//!
//! The gain is exactly the marginal change of the composite score in
//! [`crate::score`], so greedy steps climb the same objective the scorer reports.
//!
//! # Example
//!
//! ```rust
//! use vicinity_select::{
//!     ExactPotentials, InverseDistance, Place, PlaceSet, PotentialComputer, SelectConfig,
//!     Selector,
//! };
//!
//! let places = PlaceSet::new(vec![
//!     Place::new(0, 0.0, 0.0),
//!     Place::new(1, 0.0, 10.0),
//!     Place::new(2, 10.0, 0.0),
//!     Place::new(3, 10.0, 10.0),
//! ])
//! .unwrap();
//! let kernel = InverseDistance::default();
//! let potentials = ExactPotentials::new(kernel).compute(&places).unwrap().potentials;
//!
//! let picked = Selector::new(kernel)
//!     .select(&places, &potentials, SelectConfig::new(1.0, 2))
//!     .unwrap();
//! // Ties go to the lowest id, then the far corner wins.
//! let ids: Vec<u64> = picked.ids().map(|id| id.0).collect();
//! assert_eq!(ids, [0, 3]);
//! ```

use kurbo::Point;
use vicinity_grid::Grid;

use crate::error::Error;
use crate::kernel::Kernel;
use crate::place::{Place, PlaceId, PlaceSet};
use crate::potential::Potentials;
use crate::potential::grid::intra_influence;

/// Weight and size of a selection run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectConfig {
    /// Redundancy weight `W`; positive and finite.
    pub weight: f64,
    /// Number of places to select.
    pub k: usize,
}

impl Default for SelectConfig {
    fn default() -> Self {
        Self { weight: 1.0, k: 10 }
    }
}

impl SelectConfig {
    /// Config with the given weight and size.
    #[must_use]
    pub const fn new(weight: f64, k: usize) -> Self {
        Self { weight, k }
    }

    /// Set the redundancy weight.
    #[must_use]
    pub const fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Set the number of places to select.
    #[must_use]
    pub const fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }
}

/// Where pairwise redundancy between a candidate and a pick comes from.
#[derive(Copy, Clone, Debug, Default)]
pub enum Redundancy<'g> {
    /// Kernel between the two places' positions.
    #[default]
    Pairwise,
    /// Kernel between the centroids of their cells; within one cell, the kernel at the
    /// cell's mean pair distance. The grid must be built over the same place set.
    Cells(&'g Grid),
}

/// Ordered result of a selection run.
#[derive(Clone, Debug, PartialEq)]
pub struct Selection {
    places: Vec<Place>,
    gains: Vec<f64>,
}

impl Selection {
    /// Wrap places picked by some other means (sampling), with no gains recorded.
    pub(crate) fn unscored(places: Vec<Place>) -> Self {
        Self {
            places,
            gains: Vec::new(),
        }
    }

    /// Selected places, in pick order.
    #[inline]
    pub fn places(&self) -> &[Place] {
        &self.places
    }

    /// Marginal gain recorded at each pick. Empty for sampled selections.
    #[inline]
    pub fn gains(&self) -> &[f64] {
        &self.gains
    }

    /// Identifiers in pick order.
    pub fn ids(&self) -> impl Iterator<Item = PlaceId> + '_ {
        self.places.iter().map(|p| p.id)
    }

    /// Number of selected places.
    #[inline]
    pub fn len(&self) -> usize {
        self.places.len()
    }

    /// Whether nothing was selected.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }
}

/// Phase of a [`Growth`] run.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Validating inputs and ordering candidates. Only observable while
    /// [`Selector::start`] runs.
    Initializing,
    /// Picking one place per [`Growth::step`].
    Growing,
    /// `k` places picked.
    Done,
}

/// Greedy selector over a kernel and a redundancy source.
#[derive(Copy, Clone, Debug)]
pub struct Selector<'g, K> {
    kernel: K,
    redundancy: Redundancy<'g>,
}

impl<'g, K: Kernel> Selector<'g, K> {
    /// Selector with pairwise redundancy.
    pub const fn new(kernel: K) -> Self {
        Self {
            kernel,
            redundancy: Redundancy::Pairwise,
        }
    }

    /// Use another redundancy source.
    #[must_use]
    pub const fn with_redundancy(mut self, redundancy: Redundancy<'g>) -> Self {
        self.redundancy = redundancy;
        self
    }

    /// Select exactly `config.k` places.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidArgument`] for `k = 0`, a non-positive or non-finite weight,
    ///   potentials missing a candidate, or a grid built over another set.
    /// - [`Error::InsufficientCandidates`] when `k` exceeds the number of places.
    pub fn select(
        &self,
        places: &PlaceSet,
        potentials: &Potentials,
        config: SelectConfig,
    ) -> Result<Selection, Error> {
        Ok(self.start(places, potentials, config)?.finish())
    }

    /// Validate inputs and return a run positioned before the first pick.
    pub fn start<'s>(
        &'s self,
        places: &'s PlaceSet,
        potentials: &Potentials,
        config: SelectConfig,
    ) -> Result<Growth<'s, K>, Error> {
        Growth::new(self, places, potentials, config)
    }
}

/// Cell lookups for [`Redundancy::Cells`], flattened for the update loop.
#[derive(Debug)]
struct CellTable {
    of: Vec<usize>,
    centroids: Vec<Point>,
    intra: Vec<f64>,
}

impl CellTable {
    fn new<K: Kernel>(kernel: &K, grid: &Grid, candidates: &[Place]) -> Result<Self, Error> {
        if grid.len() != candidates.len() {
            return Err(Error::InvalidArgument(format!(
                "grid covers {} places but {} candidates were given",
                grid.len(),
                candidates.len()
            )));
        }
        // Each candidate must sit in the cell the grid assigned to its position.
        for (i, p) in candidates.iter().enumerate() {
            if grid.cell_at(p.position) != grid.cell_of(i) {
                return Err(Error::InvalidArgument(format!(
                    "grid was not built over these candidates: {} is outside its cell",
                    p.id
                )));
            }
        }
        let mut of = vec![0; candidates.len()];
        for (c, cell) in grid.cells().iter().enumerate() {
            for &m in cell.members() {
                of[m] = c;
            }
        }
        Ok(Self {
            of,
            centroids: grid.cells().iter().map(|c| c.aggregate().centroid()).collect(),
            intra: grid.cells().iter().map(|c| intra_influence(kernel, c)).collect(),
        })
    }
}

/// A selection run in progress.
#[derive(Debug)]
pub struct Growth<'s, K> {
    kernel: &'s K,
    cells: Option<CellTable>,
    candidates: &'s [Place],
    order: Vec<usize>,
    base: Vec<f64>,
    penalty: Vec<f64>,
    taken: Vec<bool>,
    chosen: Vec<usize>,
    gains: Vec<f64>,
    scale: f64,
    k: usize,
    phase: Phase,
}

impl<'s, K: Kernel> Growth<'s, K> {
    fn new(
        selector: &'s Selector<'_, K>,
        places: &'s PlaceSet,
        potentials: &Potentials,
        config: SelectConfig,
    ) -> Result<Self, Error> {
        let SelectConfig { weight, k } = config;
        if k == 0 {
            return Err(Error::InvalidArgument("k must be at least 1".into()));
        }
        if !(weight.is_finite() && weight > 0.0) {
            return Err(Error::InvalidArgument(format!(
                "weight W must be positive and finite, got {weight}"
            )));
        }
        if k > places.len() {
            return Err(Error::InsufficientCandidates {
                requested: k,
                available: places.len(),
            });
        }

        let candidates = places.as_slice();
        let mut own = Vec::with_capacity(candidates.len());
        for p in candidates {
            let Some(v) = potentials.get(p.id) else {
                return Err(Error::InvalidArgument(format!(
                    "no potential for candidate {}",
                    p.id
                )));
            };
            own.push(v);
        }
        let total: f64 = own.iter().sum();
        let share = if total > 0.0 { 1.0 / total } else { 0.0 };
        let kf = k as f64;
        let base: Vec<f64> = candidates
            .iter()
            .zip(&own)
            .map(|(p, v)| p.relevance() / kf + v * share)
            .collect();

        let mut order: Vec<usize> = (0..candidates.len()).collect();
        order.sort_by(|&a, &b| {
            base[b]
                .total_cmp(&base[a])
                .then_with(|| candidates[a].id.cmp(&candidates[b].id))
        });

        let cells = match selector.redundancy {
            Redundancy::Pairwise => None,
            Redundancy::Cells(grid) => {
                Some(CellTable::new(&selector.kernel, grid, candidates)?)
            }
        };

        Ok(Self {
            kernel: &selector.kernel,
            cells,
            candidates,
            order,
            base,
            penalty: vec![0.0; candidates.len()],
            taken: vec![false; candidates.len()],
            chosen: Vec::with_capacity(k),
            gains: Vec::with_capacity(k),
            scale: 2.0 * weight * share,
            k,
            phase: Phase::Growing,
        })
    }

    /// Current phase.
    #[inline]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Places picked so far, in order.
    pub fn picked(&self) -> impl Iterator<Item = &'s Place> + '_ {
        let candidates = self.candidates;
        self.chosen.iter().map(move |&i| &candidates[i])
    }

    /// Pick one place. Returns `None` once the run is done.
    pub fn step(&mut self) -> Option<&'s Place> {
        if self.phase != Phase::Growing {
            return None;
        }
        let (pick, gain) = self.best()?;
        self.taken[pick] = true;
        self.chosen.push(pick);
        self.gains.push(gain);

        for i in 0..self.candidates.len() {
            if !self.taken[i] {
                self.penalty[i] += self.influence(i, pick);
            }
        }

        let candidates = self.candidates;
        let place = &candidates[pick];
        tracing::trace!(round = self.chosen.len(), id = %place.id, gain, "picked");
        if self.chosen.len() == self.k {
            self.phase = Phase::Done;
        }
        Some(place)
    }

    /// Run to completion and return the selection.
    pub fn finish(mut self) -> Selection {
        while self.step().is_some() {}
        Selection {
            places: self.chosen.iter().map(|&i| self.candidates[i]).collect(),
            gains: self.gains,
        }
    }

    /// Best untaken candidate; ties go to the lowest identifier.
    fn best(&self) -> Option<(usize, f64)> {
        let mut best: Option<(usize, f64)> = None;
        for &i in &self.order {
            if self.taken[i] {
                continue;
            }
            let gain = self.base[i] - self.scale * self.penalty[i];
            let better = match best {
                None => true,
                Some((b, bg)) => {
                    gain > bg || (gain == bg && self.candidates[i].id < self.candidates[b].id)
                }
            };
            if better {
                best = Some((i, gain));
            }
        }
        best
    }

    fn influence(&self, i: usize, pick: usize) -> f64 {
        match &self.cells {
            None => self
                .kernel
                .between(&self.candidates[i], &self.candidates[pick]),
            Some(t) => {
                let (a, b) = (t.of[i], t.of[pick]);
                if a == b {
                    t.intra[a]
                } else {
                    self.kernel.at(t.centroids[a].distance(t.centroids[b]))
                }
            }
        }
    }
}
