// Copyright 2025 the Vicinity Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grid-approximate potentials.

use std::time::Instant;

use vicinity_grid::{Cell, Grid};

use crate::error::Error;
use crate::kernel::Kernel;
use crate::place::PlaceSet;
use crate::potential::{Computed, PotentialComputer, Potentials};

/// Approximate potentials from cell aggregates.
///
/// For a place in cell `c` with `n_c` members:
///
/// `potential ≈ (n_c − 1) · f(d_c) + Σ_{c' ≠ c} n_{c'} · f(|centroid_c − centroid_{c'}|)`
///
/// where `d_c` is the root mean squared distance between distinct members of `c`.
/// Every member of a cell receives the same value.
#[derive(Copy, Clone, Debug)]
pub struct GridPotentials<K> {
    kernel: K,
    cells: usize,
}

impl<K: Kernel> GridPotentials<K> {
    /// Grid computer requesting `cells` cells (`G`).
    pub const fn new(kernel: K, cells: usize) -> Self {
        Self { kernel, cells }
    }

    /// Requested cell count.
    pub const fn cells(&self) -> usize {
        self.cells
    }

    /// Compute potentials and hand back the grid they were derived from.
    pub fn compute_with_grid(&self, places: &PlaceSet) -> Result<(Computed, Grid), Error> {
        if places.is_empty() {
            return Err(Error::EmptyInput);
        }
        if self.cells == 0 {
            return Err(Error::InvalidArgument("cell count G must be at least 1".into()));
        }
        let start = Instant::now();
        let grid = Grid::build(places.as_slice(), self.cells)?;
        let per_cell = cell_potentials(&self.kernel, grid.cells());

        let mut values = vec![0.0; places.len()];
        for (cell, value) in grid.cells().iter().zip(&per_cell) {
            for &m in cell.members() {
                values[m] = *value;
            }
        }
        let potentials = Potentials::from_values(places, values);
        let elapsed = start.elapsed();
        tracing::trace!(
            places = places.len(),
            active_cells = grid.active_len(),
            ?elapsed,
            "grid potentials"
        );
        Ok((
            Computed {
                potentials,
                elapsed,
                active_cells: Some(grid.active_len()),
            },
            grid,
        ))
    }
}

impl<K: Kernel> PotentialComputer for GridPotentials<K> {
    fn compute(&self, places: &PlaceSet) -> Result<Computed, Error> {
        self.compute_with_grid(places).map(|(computed, _)| computed)
    }
}

/// Influence a single member of each cell receives from the whole set.
fn cell_potentials<K: Kernel>(kernel: &K, cells: &[Cell]) -> Vec<f64> {
    let centroids: Vec<_> = cells.iter().map(|c| c.aggregate().centroid()).collect();
    cells
        .iter()
        .enumerate()
        .map(|(a, cell)| {
            let intra = intra_influence(kernel, cell) * (cell.len() - 1) as f64;
            let inter: f64 = cells
                .iter()
                .enumerate()
                .filter(|(b, _)| *b != a)
                .map(|(b, other)| other.len() as f64 * kernel.at(centroids[a].distance(centroids[b])))
                .sum();
            intra + inter
        })
        .collect()
}

/// Influence between two members of the same cell, at the cell's mean pair distance.
///
/// Zero for single-member cells.
pub(crate) fn intra_influence<K: Kernel>(kernel: &K, cell: &Cell) -> f64 {
    if cell.len() < 2 {
        return 0.0;
    }
    kernel.at(cell.aggregate().pair_distance_sq().sqrt())
}
