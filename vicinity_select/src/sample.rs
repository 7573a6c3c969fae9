// Copyright 2025 the Vicinity Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Uniform sampling without replacement.

use rand::Rng;
use rand::seq::index;

use crate::error::Error;
use crate::place::PlaceSet;

/// Draw `m` distinct places uniformly at random.
///
/// The random source is injected so that seeded runs are reproducible. `m = 0` yields an
/// empty set; `m = |places|` yields a permutation of the input.
///
/// # Errors
///
/// [`Error::InvalidArgument`] when `m` exceeds the number of places.
pub fn sample<R: Rng + ?Sized>(places: &PlaceSet, m: usize, rng: &mut R) -> Result<PlaceSet, Error> {
    if m > places.len() {
        return Err(Error::InvalidArgument(format!(
            "cannot sample {m} of {} places",
            places.len()
        )));
    }
    Ok(places.pick(index::sample(rng, places.len(), m)))
}
