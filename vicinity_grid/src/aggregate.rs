// Copyright 2025 the Vicinity Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-cell aggregate descriptors.

use kurbo::{Point, Vec2};

/// Running summary of the items that fall into one cell.
///
/// Everything is kept as sums so that merging and incremental insertion are O(1);
/// the derived quantities (centroid, spread, mean attribute) are computed on demand.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct CellAggregate {
    count: usize,
    sum: Vec2,
    sum_sq: f64,
    attribute_sum: f64,
}

impl CellAggregate {
    /// Fold one item into the aggregate.
    pub fn push(&mut self, position: Point, attribute: f64) {
        let v = position.to_vec2();
        self.count += 1;
        self.sum += v;
        self.sum_sq += v.hypot2();
        self.attribute_sum += attribute;
    }

    /// Number of items in the cell.
    #[inline]
    pub const fn count(&self) -> usize {
        self.count
    }

    /// Whether no item was folded in.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Sum of the attributes of all items.
    #[inline]
    pub const fn attribute_sum(&self) -> f64 {
        self.attribute_sum
    }

    /// Mean attribute, or zero for an empty cell.
    pub fn mean_attribute(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.attribute_sum / self.count as f64
        }
    }

    /// Mean position of the items, or the origin for an empty cell.
    pub fn centroid(&self) -> Point {
        if self.count == 0 {
            Point::ORIGIN
        } else {
            (self.sum / self.count as f64).to_point()
        }
    }

    /// Mean squared distance of the items to the centroid.
    ///
    /// `E[|p|²] − |E[p]|²`, clamped at zero against cancellation.
    pub fn spread(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        let n = self.count as f64;
        let mean = self.sum / n;
        (self.sum_sq / n - mean.hypot2()).max(0.0)
    }

    /// Mean squared distance over distinct pairs of items in the cell.
    ///
    /// Exact: `Σ_{i≠j} |p_i − p_j|² / (n(n−1)) = 2n · spread / (n − 1)`.
    /// Zero for cells with fewer than two items.
    pub fn pair_distance_sq(&self) -> f64 {
        if self.count < 2 {
            return 0.0;
        }
        let n = self.count as f64;
        2.0 * n * self.spread() / (n - 1.0)
    }
}
