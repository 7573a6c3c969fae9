// Copyright 2025 the Vicinity Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Uniform grid over the bounding box of an item set.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use core::fmt::Debug;

use kurbo::{Point, Rect};

use crate::aggregate::CellAggregate;
use crate::error::GridError;
use crate::types::{CellId, CellKey, Located, side_for};

/// A non-empty cell: its address, the items it owns, and their aggregate.
#[derive(Clone, Debug)]
pub struct Cell {
    key: CellKey,
    members: Vec<usize>,
    aggregate: CellAggregate,
}

impl Cell {
    /// Row/column address of the cell.
    #[inline]
    pub const fn key(&self) -> CellKey {
        self.key
    }

    /// Indices (into the slice the grid was built from) of the items in this cell,
    /// in input order.
    #[inline]
    pub fn members(&self) -> &[usize] {
        &self.members
    }

    /// Aggregate descriptor of the members.
    #[inline]
    pub const fn aggregate(&self) -> &CellAggregate {
        &self.aggregate
    }

    /// Number of items in the cell. Never zero for cells handed out by a [`Grid`].
    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Always false for cells handed out by a [`Grid`]; present for API symmetry.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Square `side × side` tiling of an item set's bounding box.
///
/// Cells are stored as a flat arena: `cells` holds only the non-empty ones (the active
/// list) in row-major order, and `slots` maps the key of each occupied cell to its
/// handle. Storage never depends on `side²`, so any cell count is safe to request.
/// Items map to cells through a lookup table, never back-references.
pub struct Grid {
    bounds: Rect,
    side: usize,
    slots: BTreeMap<CellKey, CellId>,
    cells: Vec<Cell>,
    assignment: Vec<CellId>,
}

impl Grid {
    /// Build a grid with `round(√cells)` columns and rows over `items`.
    ///
    /// Every item lands in exactly one cell. Items on the upper edge of the bounding box
    /// are clamped into the last row/column; an axis with zero extent maps everything to
    /// index 0. The result depends only on the inputs.
    pub fn build<L: Located>(items: &[L], cells: usize) -> Result<Self, GridError> {
        if items.is_empty() {
            return Err(GridError::EmptyInput);
        }
        if cells == 0 {
            return Err(GridError::ZeroCells);
        }

        let mut bounds: Option<Rect> = None;
        for (index, item) in items.iter().enumerate() {
            let p = item.position();
            if !(p.x.is_finite() && p.y.is_finite()) {
                return Err(GridError::NonFinite { index });
            }
            bounds = Some(match bounds {
                None => Rect::from_points(p, p),
                Some(b) => b.union_pt(p),
            });
        }
        let Some(bounds) = bounds else {
            return Err(GridError::EmptyInput);
        };

        let side = side_for(cells);
        let keys: Vec<CellKey> = items
            .iter()
            .map(|item| key_in(bounds, side, item.position()))
            .collect();

        // Only occupied cells get an entry, so memory tracks the item count, not `side²`.
        let mut slots: BTreeMap<CellKey, CellId> = keys.iter().map(|k| (*k, CellId(0))).collect();
        let mut active = Vec::with_capacity(slots.len());
        for (key, id) in &mut slots {
            *id = cell_id(active.len());
            active.push(Cell {
                key: *key,
                members: Vec::new(),
                aggregate: CellAggregate::default(),
            });
        }

        let mut assignment = Vec::with_capacity(items.len());
        for (index, (item, key)) in items.iter().zip(&keys).enumerate() {
            let Some(&id) = slots.get(key) else {
                unreachable!("every key was inserted above");
            };
            let cell = &mut active[id.index()];
            cell.members.push(index);
            cell.aggregate.push(item.position(), item.attribute());
            assignment.push(id);
        }

        Ok(Self {
            bounds,
            side,
            slots,
            cells: active,
            assignment,
        })
    }

    /// Bounding box of the items the grid was built from.
    #[inline]
    pub const fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Number of rows (equal to the number of columns).
    #[inline]
    pub const fn side(&self) -> usize {
        self.side
    }

    /// Number of items assigned.
    #[inline]
    pub fn len(&self) -> usize {
        self.assignment.len()
    }

    /// Whether no items are assigned. A built grid is never empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.assignment.is_empty()
    }

    /// Number of non-empty cells (`|CL|`).
    #[inline]
    pub fn active_len(&self) -> usize {
        self.cells.len()
    }

    /// Non-empty cells in row-major order.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// The cell behind a handle produced by this grid.
    #[inline]
    pub fn cell(&self, id: CellId) -> &Cell {
        &self.cells[id.index()]
    }

    /// Cell of the item at `index` in the input slice.
    #[inline]
    pub fn cell_of(&self, index: usize) -> Option<CellId> {
        self.assignment.get(index).copied()
    }

    /// Active cell containing `point`, if the point is inside the bounds and the cell is
    /// non-empty.
    pub fn cell_at(&self, point: Point) -> Option<CellId> {
        let b = self.bounds;
        if point.x < b.x0 || point.x > b.x1 || point.y < b.y0 || point.y > b.y1 {
            return None;
        }
        self.slots.get(&key_in(b, self.side, point)).copied()
    }
}

impl Debug for Grid {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Grid")
            .field("bounds", &self.bounds)
            .field("side", &self.side)
            .field("items", &self.assignment.len())
            .field("active_cells", &self.cells.len())
            .finish_non_exhaustive()
    }
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "Active cell counts are bounded by the item count, which fits in 32 bits in practice."
)]
const fn cell_id(index: usize) -> CellId {
    CellId(index as u32)
}

fn key_in(bounds: Rect, side: usize, p: Point) -> CellKey {
    CellKey::new(
        axis_index(p.y, bounds.y0, bounds.height(), side),
        axis_index(p.x, bounds.x0, bounds.width(), side),
    )
}

#[inline]
fn axis_index(v: f64, min: f64, extent: f64, side: usize) -> usize {
    if extent <= 0.0 {
        return 0;
    }
    let t = (v - min) / extent * side as f64;
    if t <= 0.0 {
        return 0;
    }
    #[allow(
        clippy::cast_possible_truncation,
        reason = "t is non-negative, so truncation is floor; the result is clamped below."
    )]
    let i = t as usize;
    i.min(side - 1)
}
