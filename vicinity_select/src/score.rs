// Copyright 2025 the Vicinity Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Composite scoring of a selection against ground-truth potentials.
//!
//! For a selection `R` of size `k` over a set `S`, with ground-truth potentials `ps`
//! computed over all of `S`:
//!
//! | Term | Definition |
//! |------|------------|
//! | `sum_r` | `Σ_{p∈R} ps(p)` |
//! | `sum_s` | `Σ_{p∈S} ps(p)` |
//! | `redundancy` | `Σ_{p≠q ∈ R} f(p, q)` over ordered pairs |
//! | relevance | `Σ_{p∈R} relevance(p) / k` |
//! | diversity | `(sum_r − W · redundancy) / sum_s`, zero when `sum_s = 0` |
//! | combined | relevance + diversity |
//!
//! `sum_r − redundancy` is the influence `R` exerts on the places it left out, so the
//! diversity term rewards selections that stand in for the rest of the set and punishes
//! selections that crowd together. The same closed form scores every strategy.
//!
//! Selecting the whole set maximizes the potential share (coverage is 1), but not
//! diversity: redundancy over all ordered pairs equals `sum_s`, so diversity there is
//! exactly `1 − W`.

use crate::error::Error;
use crate::kernel::Kernel;
use crate::place::Place;
use crate::potential::Potentials;

/// Decomposed score of one selection.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Score {
    /// Mean intrinsic relevance of the selection.
    pub relevance: f64,
    /// Coverage minus weighted redundancy, normalized by `sum_s`.
    pub diversity: f64,
    /// `relevance + diversity`.
    pub combined: f64,
    /// Ground-truth potential summed over the selection.
    pub sum_r: f64,
    /// Ground-truth potential summed over the whole set.
    pub sum_s: f64,
    /// Kernel summed over ordered pairs of selected places.
    pub redundancy: f64,
}

impl Score {
    /// Share of the set's potential held by the selection; zero when the set has none.
    pub fn coverage(&self) -> f64 {
        if self.sum_s > 0.0 {
            self.sum_r / self.sum_s
        } else {
            0.0
        }
    }

    /// Signed percentage difference of `combined` relative to a baseline score.
    ///
    /// Zero when the baseline is zero.
    pub fn pct_diff(&self, baseline: &Self) -> f64 {
        if baseline.combined == 0.0 {
            0.0
        } else {
            (self.combined - baseline.combined) / baseline.combined.abs() * 100.0
        }
    }
}

/// Score `selection` against potentials computed over the full set.
///
/// The result does not depend on the order of `selection`, up to floating-point
/// summation order.
///
/// # Errors
///
/// - [`Error::EmptyResult`] for an empty selection.
/// - [`Error::InvalidArgument`] for a non-positive or non-finite weight, or a selected
///   place the ground truth does not know.
pub fn score<K: Kernel>(
    selection: &[Place],
    ground_truth: &Potentials,
    kernel: &K,
    weight: f64,
) -> Result<Score, Error> {
    if selection.is_empty() {
        return Err(Error::EmptyResult);
    }
    if !(weight.is_finite() && weight > 0.0) {
        return Err(Error::InvalidArgument(format!(
            "weight W must be positive and finite, got {weight}"
        )));
    }

    let mut sum_r = 0.0;
    let mut relevance = 0.0;
    for p in selection {
        let Some(v) = ground_truth.get(p.id) else {
            return Err(Error::InvalidArgument(format!(
                "selected place {} is not in the ground truth",
                p.id
            )));
        };
        sum_r += v;
        relevance += p.relevance();
    }

    let mut pairs = 0.0;
    for (i, a) in selection.iter().enumerate() {
        for b in &selection[i + 1..] {
            pairs += kernel.between(a, b);
        }
    }
    let redundancy = 2.0 * pairs;

    let sum_s = ground_truth.total();
    let relevance = relevance / selection.len() as f64;
    let diversity = if sum_s > 0.0 {
        (sum_r - weight * redundancy) / sum_s
    } else {
        0.0
    };

    Ok(Score {
        relevance,
        diversity,
        combined: relevance + diversity,
        sum_r,
        sum_s,
        redundancy,
    })
}
