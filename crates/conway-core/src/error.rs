//! Error types for the store and the board service.
//!
//! Lower-level errors pass through [`ServiceError`] unchanged; nothing is
//! swallowed or downgraded on the way up. [`ServiceError::kind`] collapses
//! the nesting into the flat [`ErrorKind`] taxonomy that the transport
//! maps to status codes.

use std::path::PathBuf;

use conway_engine::EngineError;
use conway_types::{BoardId, GridError};

/// Errors raised by a [`BoardStore`](crate::store::BoardStore).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No board with this id exists.
    #[error("board {0} not found")]
    NotFound(BoardId),

    /// A thread panicked while holding the board map lock.
    #[error("board map lock poisoned")]
    LockPoisoned,

    /// Reading or writing the snapshot file failed.
    #[error("snapshot I/O error at {}: {source}", path.display())]
    Io {
        /// The snapshot file involved.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The snapshot could not be encoded or decoded.
    #[error("snapshot serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The snapshot was written by an incompatible format version.
    #[error("unsupported snapshot version {found} (expected {expected})")]
    UnsupportedSnapshot {
        /// Version found in the file.
        found: u32,
        /// Version this build reads and writes.
        expected: u32,
    },
}

/// Errors raised by [`BoardService`](crate::service::BoardService).
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// The supplied matrix was absent or not rectangular.
    #[error(transparent)]
    Grid(#[from] GridError),

    /// The uploaded board is smaller than the configured minimum.
    #[error("board must be at least {min_rows}x{min_cols}, got {rows}x{cols}")]
    Validation {
        /// Rows supplied.
        rows: usize,
        /// Columns supplied.
        cols: usize,
        /// Configured minimum rows.
        min_rows: usize,
        /// Configured minimum columns.
        min_cols: usize,
    },

    /// A simulation argument was rejected before the board was looked up.
    #[error("board {id}: {source}")]
    Argument {
        /// The board the request named.
        id: BoardId,
        /// The underlying range error.
        source: EngineError,
    },

    /// Simulating a specific board failed.
    #[error("board {id}: {source}")]
    Engine {
        /// The board being simulated.
        id: BoardId,
        /// The underlying engine error.
        source: EngineError,
    },

    /// The store rejected or failed the operation.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Flat failure taxonomy shared with the transport layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Absent grid.
    Input,
    /// Non-rectangular grid.
    Shape,
    /// Board too small at upload.
    Validation,
    /// Negative steps or non-positive iteration budget.
    Range,
    /// Unknown board id.
    NotFound,
    /// No fixed point within the iteration budget.
    NotConverged,
    /// Storage or other server-side failure.
    Internal,
}

impl ServiceError {
    /// Classify this error.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Grid(GridError::Missing) => ErrorKind::Input,
            Self::Grid(GridError::Irregular { .. } | GridError::TooLarge { .. }) => {
                ErrorKind::Shape
            }
            Self::Validation { .. } => ErrorKind::Validation,
            Self::Argument { source, .. } | Self::Engine { source, .. } => match source {
                EngineError::Range { .. } => ErrorKind::Range,
                EngineError::NotConverged { .. } => ErrorKind::NotConverged,
            },
            Self::Store(StoreError::NotFound(_)) => ErrorKind::NotFound,
            Self::Store(_) => ErrorKind::Internal,
        }
    }
}
