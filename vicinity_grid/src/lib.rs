// Copyright 2025 the Vicinity Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Vicinity Grid: a uniform 2D grid with per-cell aggregates.
//!
//! Vicinity Grid is the spatial building block behind approximate proximity sums.
//!
//! - Partition any set of [`Located`] items into a square tiling of their bounding box.
//! - Every item maps to exactly one cell; empty cells are left out of the active list.
//! - Each active cell carries a [`CellAggregate`]: count, centroid, spread, and summed
//!   attribute, enough to stand in for its members in pairwise computations.
//!
//! The requested cell count `G` becomes a `side × side` tiling with `side = round(√G)`.
//!
//! # Example
//!
//! ```rust
//! use kurbo::Point;
//! use vicinity_grid::Grid;
//!
//! let points = [
//!     Point::new(0.0, 0.0),
//!     Point::new(1.0, 1.0),
//!     Point::new(9.0, 9.0),
//!     Point::new(10.0, 10.0),
//! ];
//!
//! // A 2×2 tiling; the two clusters land in opposite corners.
//! let grid = Grid::build(&points, 4).unwrap();
//! assert_eq!(grid.side(), 2);
//! assert_eq!(grid.active_len(), 2);
//!
//! let near = grid.cell_of(0).unwrap();
//! assert_eq!(grid.cell_of(1), Some(near));
//! assert_eq!(grid.cell(near).aggregate().centroid(), Point::new(0.5, 0.5));
//! ```
//!
//! ### Float semantics
//!
//! Coordinates must be finite; [`Grid::build`] rejects NaN and infinities.

#![no_std]

extern crate alloc;

pub mod aggregate;
pub mod error;
pub mod grid;
pub mod types;

pub use aggregate::CellAggregate;
pub use error::GridError;
pub use grid::{Cell, Grid};
pub use types::{CellId, CellKey, Located, side_for};
