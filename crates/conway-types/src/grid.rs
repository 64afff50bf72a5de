//! Rectangular boolean matrix holding one generation of a board.
//!
//! A [`Grid`] stores its cells in a flat row-major buffer with a fixed
//! row stride. Rectangularity is established once, at construction, so
//! every consumer (the transition engine in particular) can rely on
//! `cells.len() == rows * cols` without re-checking.
//!
//! On the wire a grid is an array of arrays of booleans. Deserialization
//! goes through [`Grid::from_rows`], which rejects irregular input rather
//! than truncating or padding it.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::error::GridError;

/// One generation of a board: `rows` x `cols` cells, alive or dead.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<bool>>", into = "Vec<Vec<bool>>")]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
}

impl Grid {
    /// Create an all-dead grid of the given dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::TooLarge`] if `rows * cols` overflows.
    pub fn dead(rows: usize, cols: usize) -> Result<Self, GridError> {
        let len = rows
            .checked_mul(cols)
            .ok_or(GridError::TooLarge { rows, cols })?;
        Ok(Self {
            rows,
            cols,
            cells: vec![false; len],
        })
    }

    /// Build a grid from row-major nested vectors.
    ///
    /// An empty outer vector yields a 0x0 grid. Every row must have the
    /// same length as row 0.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::Irregular`] naming the first row whose length
    /// differs from row 0.
    pub fn from_rows(rows: Vec<Vec<bool>>) -> Result<Self, GridError> {
        let cols = rows.first().map_or(0, Vec::len);
        let row_count = rows.len();
        let mut cells = Vec::with_capacity(row_count.saturating_mul(cols));

        for (index, row) in rows.into_iter().enumerate() {
            if row.len() != cols {
                return Err(GridError::Irregular {
                    row: index,
                    expected: cols,
                    found: row.len(),
                });
            }
            cells.extend(row);
        }

        Ok(Self {
            rows: row_count,
            cols,
            cells,
        })
    }

    /// Build a grid from an optional wire matrix.
    ///
    /// This is the boundary conversion used for request bodies, where the
    /// matrix may be absent entirely.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::Missing`] for `None`, or any error from
    /// [`Grid::from_rows`].
    pub fn from_wire(rows: Option<Vec<Vec<bool>>>) -> Result<Self, GridError> {
        rows.map_or(Err(GridError::Missing), Self::from_rows)
    }

    /// Number of rows.
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`.
    pub const fn dims(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Whether the grid has no cells at all.
    pub const fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// State of the cell at `(row, col)`, or `None` when out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<bool> {
        let index = self.index(row, col)?;
        self.cells.get(index).copied()
    }

    /// Set the cell at `(row, col)`. Returns `false` when out of bounds.
    pub fn set(&mut self, row: usize, col: usize, alive: bool) -> bool {
        let Some(index) = self.index(row, col) else {
            return false;
        };
        self.cells.get_mut(index).is_some_and(|cell| {
            *cell = alive;
            true
        })
    }

    /// Number of live cells.
    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    /// Iterate over rows as slices.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[bool]> {
        // chunks() rejects a zero size, and a zero-column grid has no cells.
        self.cells.chunks(self.cols.max(1))
    }

    /// Convert back to row-major nested vectors.
    ///
    /// A grid with rows but no columns yields that many empty rows.
    pub fn to_rows(&self) -> Vec<Vec<bool>> {
        if self.cols == 0 {
            return vec![Vec::new(); self.rows];
        }
        self.iter_rows().map(<[bool]>::to_vec).collect()
    }

    fn index(&self, row: usize, col: usize) -> Option<usize> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        row.checked_mul(self.cols)?.checked_add(col)
    }
}

impl TryFrom<Vec<Vec<bool>>> for Grid {
    type Error = GridError;

    fn try_from(rows: Vec<Vec<bool>>) -> Result<Self, Self::Error> {
        Self::from_rows(rows)
    }
}

impl From<Grid> for Vec<Vec<bool>> {
    fn from(grid: Grid) -> Self {
        grid.to_rows()
    }
}

impl fmt::Display for Grid {
    /// Renders live cells as `#` and dead cells as `.`, one line per row.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.cols == 0 {
            return Ok(());
        }
        for (index, row) in self.iter_rows().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            for &alive in row {
                f.write_str(if alive { "#" } else { "." })?;
            }
        }
        Ok(())
    }
}
