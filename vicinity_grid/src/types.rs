// Copyright 2025 the Vicinity Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Item and cell addressing types.

use kurbo::Point;

/// Something with a 2D position and a scalar attribute that cells aggregate.
pub trait Located {
    /// Position of the item.
    fn position(&self) -> Point;

    /// Scalar attribute summed into the owning cell's aggregate.
    ///
    /// Defaults to zero for items that carry no attribute.
    fn attribute(&self) -> f64 {
        0.0
    }
}

impl Located for Point {
    #[inline]
    fn position(&self) -> Point {
        *self
    }
}

impl Located for (Point, f64) {
    #[inline]
    fn position(&self) -> Point {
        self.0
    }

    #[inline]
    fn attribute(&self) -> f64 {
        self.1
    }
}

/// Row/column address of a cell in the full `side × side` tiling.
///
/// Keys order row-major: by row, then by column.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellKey {
    /// Row, growing with `y`.
    pub row: usize,
    /// Column, growing with `x`.
    pub col: usize,
}

impl CellKey {
    /// Create a key from row and column.
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Dense handle of an active (non-empty) cell.
///
/// Valid only for the [`Grid`](crate::Grid) that produced it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId(pub(crate) u32);

impl CellId {
    /// Position of the cell in the active list.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Side length of the square tiling for a requested cell count: `round(√cells)`.
///
/// Integer arithmetic only, so it behaves identically with and without `std`.
/// Returns 0 only for `cells == 0`.
pub fn side_for(cells: usize) -> usize {
    if cells == 0 {
        return 0;
    }
    // Floor square root by Newton iteration, started at or above the root so the
    // iterates decrease and `s + cells / s` stays below `cells`.
    let mut s = cells / 2 + 1;
    let mut next = (s + cells / s) / 2;
    while next < s {
        s = next;
        next = (s + cells / s) / 2;
    }
    // (s + 0.5)² = s² + s + 0.25, so round up iff cells > s² + s.
    if cells - s * s > s { s + 1 } else { s }
}
