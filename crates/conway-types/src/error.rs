//! Error types for grid construction.
//!
//! Every way a raw matrix can fail to become a [`Grid`](crate::Grid) is a
//! [`GridError`]. Nothing downstream of construction can observe an
//! irregular matrix.

/// Errors raised when a raw boolean matrix is converted into a grid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// No matrix was supplied at all.
    #[error("board state must be provided")]
    Missing,

    /// A row's length differs from the first row's length.
    #[error("all rows must have the same number of columns: row {row} has {found}, expected {expected}")]
    Irregular {
        /// Zero-based index of the offending row.
        row: usize,
        /// Column count established by row 0.
        expected: usize,
        /// Column count of the offending row.
        found: usize,
    },

    /// The requested dimensions do not fit in memory addressing.
    #[error("grid dimensions {rows}x{cols} overflow")]
    TooLarge {
        /// Requested row count.
        rows: usize,
        /// Requested column count.
        cols: usize,
    },
}
