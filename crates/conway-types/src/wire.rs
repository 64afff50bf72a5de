//! Request and response bodies for the HTTP API.
//!
//! Grids travel as row-major arrays of arrays of booleans. These structs
//! keep the raw nested vectors so that shape validation happens in one
//! place, [`Grid::from_wire`], with a precise [`GridError`].
//!
//! [`GridError`]: crate::GridError

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::board::Board;
use crate::grid::Grid;
use crate::ids::BoardId;

/// A board state as exchanged with clients: `{ "board": [[bool]] }`.
///
/// `board` is optional on input so that an absent matrix is reported as
/// an input error rather than a generic parse failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct BoardStateDto {
    /// Row-major cell states.
    #[serde(default)]
    pub board: Option<Vec<Vec<bool>>>,
}

impl From<&Grid> for BoardStateDto {
    fn from(grid: &Grid) -> Self {
        Self {
            board: Some(grid.to_rows()),
        }
    }
}

/// Response to a successful upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct BoardCreated {
    /// Identifier of the new board.
    pub id: BoardId,
}

/// Read-only view of a stored board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct BoardView {
    /// Board identifier.
    pub id: BoardId,
    /// Current row-major cell states.
    pub board: Vec<Vec<bool>>,
    /// Number of rows.
    pub rows: usize,
    /// Number of columns.
    pub cols: usize,
    /// Number of live cells.
    pub live_cells: usize,
    /// Transitions applied since upload.
    pub generation: u64,
    /// Upload time.
    pub created_at: DateTime<Utc>,
    /// Time of the last state replacement.
    pub updated_at: DateTime<Utc>,
}

impl From<&Board> for BoardView {
    fn from(board: &Board) -> Self {
        Self {
            id: board.id,
            board: board.state.to_rows(),
            rows: board.state.rows(),
            cols: board.state.cols(),
            live_cells: board.state.live_count(),
            generation: board.generation,
            created_at: board.created_at,
            updated_at: board.updated_at,
        }
    }
}
