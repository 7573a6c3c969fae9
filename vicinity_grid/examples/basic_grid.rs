// Copyright 2025 the Vicinity Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Basic usage of Vicinity Grid: build, look up cells, and read aggregates.

use kurbo::Point;
use vicinity_grid::Grid;

fn main() {
    let items = [
        (Point::new(0.0, 0.0), 1.0),
        (Point::new(2.0, 1.0), 0.5),
        (Point::new(9.0, 8.0), 0.8),
        (Point::new(10.0, 10.0), 0.2),
        (Point::new(1.0, 9.0), 1.0),
    ];
    let grid = Grid::build(&items, 4).unwrap();
    println!("side={} active={}", grid.side(), grid.active_len());

    for cell in grid.cells() {
        let agg = cell.aggregate();
        println!(
            "cell {:?}: members={:?} centroid={:?} spread={:.3} mean_attr={:.2}",
            cell.key(),
            cell.members(),
            agg.centroid(),
            agg.spread(),
            agg.mean_attribute()
        );
    }

    // Point lookup uses the same clamped mapping as the build.
    let query = Point::new(9.5, 9.5);
    if let Some(id) = grid.cell_at(query) {
        println!("{query:?} falls in {:?}", grid.cell(id).key());
    }
}
