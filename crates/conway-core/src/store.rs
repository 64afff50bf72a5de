//! The board store contract and its in-memory implementation.
//!
//! A store exclusively owns the authoritative [`Board`] for each id.
//! Callers always receive clones, never references into the map, so no
//! grid can change outside the store's write path.
//!
//! # Concurrency
//!
//! Every read and write on the map goes through one lock per store
//! instance. A `get` can never observe a half-written board, and
//! concurrent `put`s on different ids cannot disturb each other.
//! Concurrent `put`s on the *same* id are last-write-wins; there is no
//! versioning or compare-and-swap.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use conway_types::{Board, BoardId, Grid};

use crate::error::StoreError;
use crate::log::{EventLog, LogLevel};

/// Owner of the id-to-board mapping.
pub trait BoardStore: Send + Sync {
    /// Store `initial` under a fresh id at generation 0 and return the id.
    fn create(&self, initial: Grid) -> Result<BoardId, StoreError>;

    /// Return a copy of the board stored under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] for an unknown id.
    fn get(&self, id: BoardId) -> Result<Board, StoreError>;

    /// Replace the state of an existing board.
    ///
    /// Never inserts: an unknown id fails with [`StoreError::NotFound`]
    /// and leaves the store unchanged.
    fn put(&self, id: BoardId, state: Grid, generation: u64) -> Result<(), StoreError>;

    /// Flush the whole mapping to durable storage, if the store has any.
    fn persist(&self) -> Result<(), StoreError>;

    /// Number of boards held.
    fn len(&self) -> Result<usize, StoreError>;

    /// Whether the store holds no boards.
    fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

/// A [`BoardStore`] backed by a locked in-process map. Nothing survives a
/// restart; [`persist`](BoardStore::persist) does nothing.
pub struct MemoryBoardStore {
    boards: RwLock<BTreeMap<BoardId, Board>>,
    log: Arc<dyn EventLog>,
}

impl MemoryBoardStore {
    /// Create an empty store.
    pub fn new(log: Arc<dyn EventLog>) -> Self {
        Self::with_boards(BTreeMap::new(), log)
    }

    /// Create a store pre-populated with `boards` (e.g. from a snapshot).
    pub fn with_boards(boards: BTreeMap<BoardId, Board>, log: Arc<dyn EventLog>) -> Self {
        Self {
            boards: RwLock::new(boards),
            log,
        }
    }

    /// Acquire the map for reading.
    pub(crate) fn read(&self) -> Result<RwLockReadGuard<'_, BTreeMap<BoardId, Board>>, StoreError> {
        self.boards.read().map_err(|e| {
            self.log
                .log(LogLevel::Error, &format!("board map read lock poisoned: {e}"));
            StoreError::LockPoisoned
        })
    }

    /// Acquire the map for writing.
    pub(crate) fn write(
        &self,
    ) -> Result<RwLockWriteGuard<'_, BTreeMap<BoardId, Board>>, StoreError> {
        self.boards.write().map_err(|e| {
            self.log
                .log(LogLevel::Error, &format!("board map write lock poisoned: {e}"));
            StoreError::LockPoisoned
        })
    }

    /// Insert under an already-held write guard.
    pub(crate) fn insert_locked(
        &self,
        boards: &mut BTreeMap<BoardId, Board>,
        initial: Grid,
    ) -> BoardId {
        let id = BoardId::new();
        let (rows, cols) = initial.dims();
        boards.insert(id, Board::new(id, initial));
        self.log.log(
            LogLevel::Info,
            &format!("added board {id} ({rows}x{cols})"),
        );
        id
    }

    /// Replace under an already-held write guard.
    pub(crate) fn replace_locked(
        &self,
        boards: &mut BTreeMap<BoardId, Board>,
        id: BoardId,
        state: Grid,
        generation: u64,
    ) -> Result<(), StoreError> {
        let Some(board) = boards.get_mut(&id) else {
            self.log
                .log(LogLevel::Warn, &format!("put rejected: board {id} not found"));
            return Err(StoreError::NotFound(id));
        };
        board.state = state;
        board.generation = generation;
        board.updated_at = Utc::now();
        self.log.log(
            LogLevel::Debug,
            &format!("updated board {id} to generation {generation}"),
        );
        Ok(())
    }
}

impl BoardStore for MemoryBoardStore {
    fn create(&self, initial: Grid) -> Result<BoardId, StoreError> {
        let mut boards = self.write()?;
        Ok(self.insert_locked(&mut boards, initial))
    }

    fn get(&self, id: BoardId) -> Result<Board, StoreError> {
        let boards = self.read()?;
        boards.get(&id).cloned().ok_or_else(|| {
            self.log
                .log(LogLevel::Warn, &format!("board {id} not found"));
            StoreError::NotFound(id)
        })
    }

    fn put(&self, id: BoardId, state: Grid, generation: u64) -> Result<(), StoreError> {
        let mut boards = self.write()?;
        self.replace_locked(&mut boards, id, state, generation)
    }

    fn persist(&self) -> Result<(), StoreError> {
        Ok(())
    }

    fn len(&self) -> Result<usize, StoreError> {
        Ok(self.read()?.len())
    }
}
