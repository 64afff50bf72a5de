//! Board service: validate, fetch, simulate, write back.
//!
//! Each operation runs to completion on the calling thread. The store
//! serializes the individual `get` and `put`, but the read-simulate-write
//! sequence as a whole is not atomic: two concurrent `next` calls on the
//! same board may both start from the same generation, and the later
//! `put` wins.

use std::sync::Arc;

use conway_engine::{
    EngineError, advance_by, advance_one, advance_until_stable, iteration_budget, step_count,
};
use conway_types::{Board, BoardId, Grid};

use crate::config::BoardSection;
use crate::error::ServiceError;
use crate::log::{EventLog, LogLevel};
use crate::store::BoardStore;

/// Minimum dimensions accepted at upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardLimits {
    /// Minimum rows.
    pub min_rows: usize,
    /// Minimum columns.
    pub min_cols: usize,
}

impl Default for BoardLimits {
    fn default() -> Self {
        Self::from(BoardSection::default())
    }
}

impl From<BoardSection> for BoardLimits {
    fn from(section: BoardSection) -> Self {
        Self {
            min_rows: section.min_rows,
            min_cols: section.min_cols,
        }
    }
}

/// Coordinates uploads and simulation requests against a [`BoardStore`].
pub struct BoardService {
    store: Arc<dyn BoardStore>,
    limits: BoardLimits,
    log: Arc<dyn EventLog>,
}

impl BoardService {
    /// Create a service over `store`.
    pub fn new(store: Arc<dyn BoardStore>, limits: BoardLimits, log: Arc<dyn EventLog>) -> Self {
        Self { store, limits, log }
    }

    /// The configured upload limits.
    pub const fn limits(&self) -> BoardLimits {
        self.limits
    }

    /// Store a new board and return its id.
    ///
    /// # Errors
    ///
    /// [`ServiceError::Validation`] if `initial` is smaller than the
    /// configured minimum in either dimension; store errors otherwise.
    pub fn upload(&self, initial: Grid) -> Result<BoardId, ServiceError> {
        let (rows, cols) = initial.dims();
        if rows < self.limits.min_rows || cols < self.limits.min_cols {
            let err = ServiceError::Validation {
                rows,
                cols,
                min_rows: self.limits.min_rows,
                min_cols: self.limits.min_cols,
            };
            self.log.log(LogLevel::Warn, &format!("upload rejected: {err}"));
            return Err(err);
        }

        let id = self.store.create(initial)?;
        self.log
            .log(LogLevel::Info, &format!("board {id} uploaded ({rows}x{cols})"));
        Ok(id)
    }

    /// Return the stored board without advancing it.
    pub fn board(&self, id: BoardId) -> Result<Board, ServiceError> {
        Ok(self.store.get(id)?)
    }

    /// Advance a board by one generation, store and return it.
    pub fn next(&self, id: BoardId) -> Result<Grid, ServiceError> {
        let board = self.store.get(id)?;
        let next = advance_one(&board.state);
        self.commit(&board, next, 1)
    }

    /// Advance a board by `steps` generations, store and return it.
    ///
    /// `steps` is validated before the board is looked up.
    pub fn after_steps(&self, id: BoardId, steps: i64) -> Result<Grid, ServiceError> {
        let count = step_count(steps).map_err(|e| self.reject(id, e))?;
        let board = self.store.get(id)?;
        let state = advance_by(&board.state, steps).map_err(|e| self.fail(id, e))?;
        self.commit(&board, state, count)
    }

    /// Advance a board until a generation equals its predecessor, store
    /// and return that fixed point.
    ///
    /// `max_iterations` is validated before the board is looked up. When
    /// the budget runs out the stored board is left untouched.
    pub fn final_state(&self, id: BoardId, max_iterations: i64) -> Result<Grid, ServiceError> {
        iteration_budget(max_iterations).map_err(|e| self.reject(id, e))?;
        let board = self.store.get(id)?;
        let stable = advance_until_stable(&board.state, max_iterations).map_err(|e| self.fail(id, e))?;
        self.log.log(
            LogLevel::Info,
            &format!(
                "board {id} reached a fixed point after {} iterations",
                stable.iterations
            ),
        );
        self.commit(&board, stable.grid, stable.iterations)
    }

    /// Flush the store to durable storage.
    pub fn persist(&self) -> Result<(), ServiceError> {
        self.store.persist()?;
        Ok(())
    }

    /// Number of stored boards.
    pub fn board_count(&self) -> Result<usize, ServiceError> {
        Ok(self.store.len()?)
    }

    fn commit(&self, board: &Board, state: Grid, advanced: usize) -> Result<Grid, ServiceError> {
        let advanced = u64::try_from(advanced).unwrap_or(u64::MAX);
        let generation = board.generation.saturating_add(advanced);
        self.store.put(board.id, state.clone(), generation)?;
        self.log.log(
            LogLevel::Debug,
            &format!(
                "board {} now at generation {generation} ({} live cells)",
                board.id,
                state.live_count()
            ),
        );
        Ok(state)
    }

    fn reject(&self, id: BoardId, source: EngineError) -> ServiceError {
        self.log
            .log(LogLevel::Warn, &format!("board {id}: {source}"));
        ServiceError::Argument { id, source }
    }

    fn fail(&self, id: BoardId, source: EngineError) -> ServiceError {
        self.log
            .log(LogLevel::Error, &format!("board {id}: {source}"));
        ServiceError::Engine { id, source }
    }
}
