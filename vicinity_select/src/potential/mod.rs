// Copyright 2025 the Vicinity Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-place potentials and the computers that produce them.
//!
//! The potential of a place is the summed influence it receives from every other place
//! of the set. Two computers share the [`PotentialComputer`] seam:
//!
//! - [`ExactPotentials`]: all pairs, O(N²).
//! - [`GridPotentials`]: cell aggregates stand in for their members, O(N + |CL|²).
//!   Places sharing a cell share a value; that is where the approximation error comes
//!   from, and it vanishes once every place has a cell of its own.

use std::collections::HashMap;
use std::time::Duration;

use crate::error::Error;
use crate::place::{PlaceId, PlaceSet};

pub mod exact;
pub mod grid;

pub use exact::ExactPotentials;
pub use grid::GridPotentials;

/// Something that turns a place set into potentials.
pub trait PotentialComputer {
    /// Compute one potential per place. Fails with [`Error::EmptyInput`] on an empty set.
    fn compute(&self, places: &PlaceSet) -> Result<Computed, Error>;
}

/// Output of a [`PotentialComputer`].
#[derive(Clone, Debug)]
pub struct Computed {
    /// One potential per input place.
    pub potentials: Potentials,
    /// Wall time spent computing. Informational only.
    pub elapsed: Duration,
    /// Number of non-empty cells, for grid computers.
    pub active_cells: Option<usize>,
}

/// Identifier → potential map over exactly the places it was computed for.
#[derive(Clone, Debug, PartialEq)]
pub struct Potentials {
    ids: Vec<PlaceId>,
    values: Vec<f64>,
    index: HashMap<PlaceId, usize>,
    total: f64,
}

impl Potentials {
    /// Pair `values` with the identifiers of `places`, in order.
    pub(crate) fn from_values(places: &PlaceSet, values: Vec<f64>) -> Self {
        debug_assert_eq!(places.len(), values.len(), "one value per place");
        let ids: Vec<PlaceId> = places.ids().collect();
        let index = ids.iter().enumerate().map(|(i, id)| (*id, i)).collect();
        let total = values.iter().sum();
        Self {
            ids,
            values,
            index,
            total,
        }
    }

    /// Potential of a place, if it belongs to the domain.
    #[inline]
    pub fn get(&self, id: PlaceId) -> Option<f64> {
        self.index.get(&id).map(|&i| self.values[i])
    }

    /// Sum of all potentials.
    #[inline]
    pub const fn total(&self) -> f64 {
        self.total
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the map is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Whether `id` is part of the domain.
    #[inline]
    pub fn contains(&self, id: PlaceId) -> bool {
        self.index.contains_key(&id)
    }

    /// Entries in the order of the set they were computed over.
    pub fn iter(&self) -> impl Iterator<Item = (PlaceId, f64)> + '_ {
        self.ids.iter().copied().zip(self.values.iter().copied())
    }

    /// Mean absolute difference to another map over the same identifiers.
    ///
    /// `None` when the domains differ or are empty.
    pub fn mean_abs_error(&self, other: &Self) -> Option<f64> {
        if self.is_empty() || self.len() != other.len() {
            return None;
        }
        let mut sum = 0.0;
        for (id, v) in self.iter() {
            sum += (v - other.get(id)?).abs();
        }
        Some(sum / self.len() as f64)
    }
}
