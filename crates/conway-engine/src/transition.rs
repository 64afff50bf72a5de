//! Single-generation transition for bounded grids.
//!
//! Every cell looks at the eight cells of its Moore neighborhood that lie
//! inside `[0, rows) x [0, cols)`. Positions past an edge are simply
//! absent: there is no wraparound, so a one-row grid has no neighbors
//! above or below.
//!
//! The classic rule applies:
//!
//! | Current | Live neighbors | Next |
//! |---------|----------------|------|
//! | alive   | 2 or 3         | alive |
//! | alive   | otherwise      | dead |
//! | dead    | exactly 3      | alive |
//! | dead    | otherwise      | dead |

use conway_types::Grid;

/// Row/column offsets of the Moore neighborhood.
const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Compute the next generation of `grid`.
///
/// The argument is not modified and the result always has the same
/// dimensions. A grid with no cells is returned unchanged.
pub fn next_generation(grid: &Grid) -> Grid {
    let mut next = grid.clone();

    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            let alive = grid.get(row, col).unwrap_or(false);
            let neighbors = live_neighbors(grid, row, col);
            next.set(row, col, cell_survives(alive, neighbors));
        }
    }

    next
}

/// Count live cells among the in-bounds neighbors of `(row, col)`.
pub fn live_neighbors(grid: &Grid, row: usize, col: usize) -> u8 {
    let mut count: u8 = 0;
    for (dr, dc) in NEIGHBOR_OFFSETS {
        let (Some(r), Some(c)) = (row.checked_add_signed(dr), col.checked_add_signed(dc)) else {
            continue;
        };
        if grid.get(r, c) == Some(true) {
            count = count.saturating_add(1);
        }
    }
    count
}

/// Whether a cell is alive in the next generation.
pub const fn cell_survives(alive: bool, neighbors: u8) -> bool {
    matches!((alive, neighbors), (true, 2 | 3) | (false, 3))
}
