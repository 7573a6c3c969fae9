// Copyright 2025 the Vicinity Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pairwise influence kernels.
//!
//! A kernel turns the distance between two places into their mutual influence. Every
//! kernel here depends on distance only, so influence is symmetric; potentials, the
//! redundancy penalty in selection, and the score all go through the same kernel.

use core::fmt::Debug;

use crate::place::Place;

/// Symmetric, non-negative influence as a function of distance.
pub trait Kernel: Debug {
    /// Influence at distance `d ≥ 0`. Must be finite and non-negative.
    fn at(&self, d: f64) -> f64;

    /// Influence between two places.
    #[inline]
    fn between(&self, a: &Place, b: &Place) -> f64 {
        self.at(a.distance(b))
    }
}

impl<K: Kernel + ?Sized> Kernel for &K {
    #[inline]
    fn at(&self, d: f64) -> f64 {
        (**self).at(d)
    }
}

/// `1 / (1 + d / scale)`: one at zero distance, decaying with a long tail.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct InverseDistance {
    scale: f64,
}

impl InverseDistance {
    /// Kernel with the given distance scale. Non-positive or non-finite scales fall back
    /// to 1.
    pub fn new(scale: f64) -> Self {
        let scale = if scale.is_finite() && scale > 0.0 {
            scale
        } else {
            1.0
        };
        Self { scale }
    }

    /// Distance scale.
    pub const fn scale(&self) -> f64 {
        self.scale
    }
}

impl Default for InverseDistance {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

impl Kernel for InverseDistance {
    #[inline]
    fn at(&self, d: f64) -> f64 {
        1.0 / (1.0 + d / self.scale)
    }
}

/// `max(0, 1 − d / reach)`: linear fall-off that vanishes beyond `reach`.
///
/// Typically `reach` is the diameter of the data set, which makes every pair count.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Linear {
    reach: f64,
}

impl Linear {
    /// Kernel reaching zero at distance `reach`. Non-positive or non-finite reaches fall
    /// back to 1.
    pub fn new(reach: f64) -> Self {
        let reach = if reach.is_finite() && reach > 0.0 {
            reach
        } else {
            1.0
        };
        Self { reach }
    }

    /// Distance at which influence reaches zero.
    pub const fn reach(&self) -> f64 {
        self.reach
    }
}

impl Kernel for Linear {
    #[inline]
    fn at(&self, d: f64) -> f64 {
        (1.0 - d / self.reach).max(0.0)
    }
}
