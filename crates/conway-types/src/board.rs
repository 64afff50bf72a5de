//! The stored board record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::grid::Grid;
use crate::ids::BoardId;

/// A board as held by the store: its identity and current generation.
///
/// The `state` is replaced wholesale on every successful simulation step;
/// it is never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// Opaque unique identifier assigned at upload.
    pub id: BoardId,
    /// The current generation.
    pub state: Grid,
    /// Number of transitions applied since upload.
    pub generation: u64,
    /// When the board was uploaded.
    pub created_at: DateTime<Utc>,
    /// When `state` was last replaced.
    pub updated_at: DateTime<Utc>,
}

impl Board {
    /// Create a freshly uploaded board at generation 0.
    pub fn new(id: BoardId, state: Grid) -> Self {
        let now = Utc::now();
        Self {
            id,
            state,
            generation: 0,
            created_at: now,
            updated_at: now,
        }
    }
}
