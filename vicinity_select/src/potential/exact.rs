// Copyright 2025 the Vicinity Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! All-pairs potentials.

use std::time::Instant;

use crate::error::Error;
use crate::kernel::Kernel;
use crate::place::PlaceSet;
use crate::potential::{Computed, PotentialComputer, Potentials};

/// Exact potentials: `potential(p) = Σ_{q ≠ p} f(p, q)`.
///
/// Each unordered pair is evaluated once and credited to both ends.
#[derive(Copy, Clone, Debug, Default)]
pub struct ExactPotentials<K> {
    kernel: K,
}

impl<K: Kernel> ExactPotentials<K> {
    /// Exact computer over the given kernel.
    pub const fn new(kernel: K) -> Self {
        Self { kernel }
    }

    /// The kernel in use.
    pub const fn kernel(&self) -> &K {
        &self.kernel
    }
}

impl<K: Kernel> PotentialComputer for ExactPotentials<K> {
    fn compute(&self, places: &PlaceSet) -> Result<Computed, Error> {
        if places.is_empty() {
            return Err(Error::EmptyInput);
        }
        let start = Instant::now();
        let items = places.as_slice();
        let mut values = vec![0.0; items.len()];
        for (i, a) in items.iter().enumerate() {
            for (j, b) in items.iter().enumerate().skip(i + 1) {
                let f = self.kernel.between(a, b);
                values[i] += f;
                values[j] += f;
            }
        }
        let potentials = Potentials::from_values(places, values);
        let elapsed = start.elapsed();
        tracing::trace!(places = items.len(), ?elapsed, "exact potentials");
        Ok(Computed {
            potentials,
            elapsed,
            active_cells: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::InverseDistance;
    use crate::place::{Place, PlaceId};

    #[test]
    fn empty_input_fails() {
        let exact = ExactPotentials::new(InverseDistance::default());
        let err = exact.compute(&PlaceSet::default()).unwrap_err();
        assert_eq!(err, Error::EmptyInput);
    }

    #[test]
    fn single_place_has_zero_potential() {
        let exact = ExactPotentials::new(InverseDistance::default());
        let set = PlaceSet::new(vec![Place::new(4, 1.0, 1.0)]).unwrap();
        let out = exact.compute(&set).unwrap();
        assert_eq!(out.potentials.get(PlaceId(4)), Some(0.0));
        assert_eq!(out.potentials.total(), 0.0);
    }

    #[test]
    fn three_on_a_line() {
        // d(0,1) = 1, d(1,2) = 1, d(0,2) = 2 → f = 1/2, 1/2, 1/3.
        let exact = ExactPotentials::new(InverseDistance::default());
        let set = PlaceSet::new(vec![
            Place::new(0, 0.0, 0.0),
            Place::new(1, 1.0, 0.0),
            Place::new(2, 2.0, 0.0),
        ])
        .unwrap();
        let out = exact.compute(&set).unwrap();
        assert!(out.active_cells.is_none(), "no grid involved");
        let pot = out.potentials;
        let close = |a: f64, b: f64| (a - b).abs() < 1e-12;
        assert!(close(pot.get(PlaceId(0)).unwrap(), 0.5 + 1.0 / 3.0), "end");
        assert!(close(pot.get(PlaceId(1)).unwrap(), 1.0), "middle");
        assert!(close(pot.get(PlaceId(2)).unwrap(), 0.5 + 1.0 / 3.0), "end");
        let sum: f64 = pot.iter().map(|(_, v)| v).sum();
        assert!(close(sum, pot.total()), "total is the sum");
    }
}
