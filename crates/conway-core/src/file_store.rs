//! JSON snapshot persistence for boards.
//!
//! [`FileBoardStore`] keeps the authoritative map in a
//! [`MemoryBoardStore`] and mirrors it to a single JSON file. The file is
//! read once on [`open`](FileBoardStore::open) and written on
//! [`persist`](BoardStore::persist), and additionally after every
//! `create`/`put` when write-through is enabled.
//!
//! # Snapshot format
//!
//! ```text
//! {
//!   "version": 1,
//!   "boards": {
//!     "<uuid>": {
//!       "state": [[true, false], [false, true]],
//!       "generation": 4,
//!       "created_at": "...",
//!       "updated_at": "..."
//!     }
//!   }
//! }
//! ```
//!
//! # Ordering
//!
//! Writers take the file mutex first and the map lock second. The
//! snapshot is serialized while the map lock is held, so it always
//! reflects a state the map actually passed through, and file writes
//! land in the same order as the mutations they capture.
//!
//! With write-through, a mutation is applied to a staged copy of the map,
//! written to disk, and only then committed. A failed write leaves both
//! the file and the in-memory boards at their previous state.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use conway_types::{Board, BoardId, Grid};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::log::{EventLog, LogLevel};
use crate::store::{BoardStore, MemoryBoardStore};

/// Snapshot format version written by this build.
pub const SNAPSHOT_VERSION: u32 = 1;

/// One board as written to the snapshot.
#[derive(Serialize)]
struct SnapshotEntry<'a> {
    state: &'a Grid,
    generation: u64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Serialize)]
struct SnapshotOut<'a> {
    version: u32,
    boards: BTreeMap<BoardId, SnapshotEntry<'a>>,
}

/// One board as read back from the snapshot.
#[derive(Deserialize)]
struct StoredBoard {
    state: Grid,
    generation: u64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Deserialize)]
struct SnapshotIn {
    version: u32,
    boards: BTreeMap<BoardId, StoredBoard>,
}

/// A [`BoardStore`] that survives restarts via a JSON snapshot file.
pub struct FileBoardStore {
    inner: MemoryBoardStore,
    path: PathBuf,
    write_through: bool,
    file_lock: Mutex<()>,
    log: Arc<dyn EventLog>,
}

impl FileBoardStore {
    /// Open the store at `path`, loading the snapshot if the file exists.
    ///
    /// A missing file yields an empty store; the file is created on the
    /// first write.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the file exists but cannot be read,
    /// [`StoreError::Serialization`] if it is not a valid snapshot (an
    /// irregular grid included), or [`StoreError::UnsupportedSnapshot`]
    /// for a foreign format version.
    pub fn open(
        path: impl Into<PathBuf>,
        write_through: bool,
        log: Arc<dyn EventLog>,
    ) -> Result<Self, StoreError> {
        let path = path.into();
        let boards = if path.exists() {
            let boards = load_snapshot(&path)?;
            log.log(
                LogLevel::Info,
                &format!("loaded {} boards from {}", boards.len(), path.display()),
            );
            boards
        } else {
            log.log(
                LogLevel::Info,
                &format!(
                    "no snapshot at {}, starting with an empty collection",
                    path.display()
                ),
            );
            BTreeMap::new()
        };

        Ok(Self {
            inner: MemoryBoardStore::with_boards(boards, Arc::clone(&log)),
            path,
            write_through,
            file_lock: Mutex::new(()),
            log,
        })
    }

    /// Location of the snapshot file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_file(&self) -> Result<MutexGuard<'_, ()>, StoreError> {
        self.file_lock.lock().map_err(|e| {
            self.log
                .log(LogLevel::Error, &format!("snapshot file lock poisoned: {e}"));
            StoreError::LockPoisoned
        })
    }

    fn write_file(&self, bytes: &[u8]) -> Result<(), StoreError> {
        let io_err = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, bytes).map_err(io_err)?;
        fs::rename(&tmp, &self.path).map_err(io_err)?;

        self.log.log(
            LogLevel::Debug,
            &format!("saved boards to {}", self.path.display()),
        );
        Ok(())
    }
}

impl BoardStore for FileBoardStore {
    fn create(&self, initial: Grid) -> Result<BoardId, StoreError> {
        if !self.write_through {
            return self.inner.create(initial);
        }

        let _file = self.lock_file()?;
        let mut boards = self.inner.write()?;
        let mut staged = boards.clone();
        let id = self.inner.insert_locked(&mut staged, initial);
        self.write_file(&encode_snapshot(&staged)?)?;
        *boards = staged;
        Ok(id)
    }

    fn get(&self, id: BoardId) -> Result<Board, StoreError> {
        self.inner.get(id)
    }

    fn put(&self, id: BoardId, state: Grid, generation: u64) -> Result<(), StoreError> {
        if !self.write_through {
            return self.inner.put(id, state, generation);
        }

        let _file = self.lock_file()?;
        let mut boards = self.inner.write()?;
        let mut staged = boards.clone();
        self.inner
            .replace_locked(&mut staged, id, state, generation)?;
        self.write_file(&encode_snapshot(&staged)?)?;
        *boards = staged;
        Ok(())
    }

    fn persist(&self) -> Result<(), StoreError> {
        let _file = self.lock_file()?;
        let (count, bytes) = {
            let boards = self.inner.read()?;
            (boards.len(), encode_snapshot(&boards)?)
        };
        self.write_file(&bytes)?;
        self.log.log(
            LogLevel::Info,
            &format!("persisted {count} boards to {}", self.path.display()),
        );
        Ok(())
    }

    fn len(&self) -> Result<usize, StoreError> {
        self.inner.len()
    }
}

fn encode_snapshot(boards: &BTreeMap<BoardId, Board>) -> Result<Vec<u8>, StoreError> {
    let snapshot = SnapshotOut {
        version: SNAPSHOT_VERSION,
        boards: boards
            .iter()
            .map(|(&id, board)| {
                (
                    id,
                    SnapshotEntry {
                        state: &board.state,
                        generation: board.generation,
                        created_at: board.created_at,
                        updated_at: board.updated_at,
                    },
                )
            })
            .collect(),
    };
    Ok(serde_json::to_vec_pretty(&snapshot)?)
}

fn load_snapshot(path: &Path) -> Result<BTreeMap<BoardId, Board>, StoreError> {
    let contents = fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let snapshot: SnapshotIn = serde_json::from_str(&contents)?;

    if snapshot.version != SNAPSHOT_VERSION {
        return Err(StoreError::UnsupportedSnapshot {
            found: snapshot.version,
            expected: SNAPSHOT_VERSION,
        });
    }

    Ok(snapshot
        .boards
        .into_iter()
        .map(|(id, stored)| {
            (
                id,
                Board {
                    id,
                    state: stored.state,
                    generation: stored.generation,
                    created_at: stored.created_at,
                    updated_at: stored.updated_at,
                },
            )
        })
        .collect())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use uuid::Uuid;

    use super::*;
    use crate::log::NoopLog;

    /// Unique snapshot path under the system temp dir, removed on drop.
    struct TempSnapshot(PathBuf);

    impl TempSnapshot {
        fn new() -> Self {
            Self(std::env::temp_dir().join(format!("conway-store-{}.json", Uuid::now_v7())))
        }
    }

    impl Drop for TempSnapshot {
        fn drop(&mut self) {
            let _ = fs::remove_file(&self.0);
        }
    }

    fn open(path: &Path, write_through: bool) -> FileBoardStore {
        FileBoardStore::open(path, write_through, Arc::new(NoopLog)).unwrap()
    }

    fn block() -> Grid {
        Grid::from_rows(vec![
            vec![false, false, false, false],
            vec![false, true, true, false],
            vec![false, true, true, false],
            vec![false, false, false, false],
        ])
        .unwrap()
    }

    #[test]
    fn missing_file_opens_empty() {
        let tmp = TempSnapshot::new();
        let store = open(&tmp.0, false);
        assert!(store.is_empty().unwrap());
        assert!(!tmp.0.exists());
    }

    #[test]
    fn persist_then_reopen_restores_boards() {
        let tmp = TempSnapshot::new();
        let store = open(&tmp.0, false);
        let id = store.create(block()).unwrap();
        store.put(id, block(), 3).unwrap();
        store.persist().unwrap();

        let reopened = open(&tmp.0, false);
        let board = reopened.get(id).unwrap();
        assert_eq!(board.state, block());
        assert_eq!(board.generation, 3);
        assert_eq!(reopened.len().unwrap(), 1);
    }

    #[test]
    fn without_write_through_nothing_is_written_until_persist() {
        let tmp = TempSnapshot::new();
        let store = open(&tmp.0, false);
        store.create(block()).unwrap();
        assert!(!tmp.0.exists());
        store.persist().unwrap();
        assert!(tmp.0.exists());
    }

    #[test]
    fn write_through_saves_every_mutation() {
        let tmp = TempSnapshot::new();
        let store = open(&tmp.0, true);
        let id = store.create(block()).unwrap();
        assert_eq!(open(&tmp.0, false).get(id).unwrap().generation, 0);

        store.put(id, Grid::dead(4, 4).unwrap(), 9).unwrap();
        let reread = open(&tmp.0, false).get(id).unwrap();
        assert_eq!(reread.generation, 9);
        assert_eq!(reread.state.live_count(), 0);
    }

    #[test]
    fn put_unknown_does_not_touch_file() {
        let tmp = TempSnapshot::new();
        let store = open(&tmp.0, true);
        assert!(matches!(
            store.put(BoardId::new(), block(), 1),
            Err(StoreError::NotFound(_))
        ));
        assert!(!tmp.0.exists());
    }

    #[test]
    fn failed_write_through_create_stores_nothing() {
        let blocker = TempSnapshot::new();
        fs::write(&blocker.0, b"not a directory").unwrap();
        let store = open(&blocker.0.join("boards.json"), true);

        assert!(matches!(store.create(block()), Err(StoreError::Io { .. })));
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn failed_write_through_put_keeps_previous_state() {
        let tmp = TempSnapshot::new();
        let store = open(&tmp.0, true);
        let id = store.create(block()).unwrap();

        // A non-empty directory at the snapshot path makes the final rename fail.
        fs::remove_file(&tmp.0).unwrap();
        fs::create_dir(&tmp.0).unwrap();
        fs::write(tmp.0.join("occupied"), b"").unwrap();

        let result = store.put(id, Grid::dead(4, 4).unwrap(), 5);
        assert!(matches!(result, Err(StoreError::Io { .. })));
        let board = store.get(id).unwrap();
        assert_eq!(board.state, block());
        assert_eq!(board.generation, 0);

        fs::remove_dir_all(&tmp.0).unwrap();
        let _ = fs::remove_file(tmp.0.with_extension("json.tmp"));
    }

    #[test]
    fn irregular_snapshot_is_rejected() {
        let tmp = TempSnapshot::new();
        let id = BoardId::new();
        let json = format!(
            r#"{{"version":1,"boards":{{"{id}":{{"state":[[true,false],[true]],"generation":0,"created_at":"2024-01-01T00:00:00Z","updated_at":"2024-01-01T00:00:00Z"}}}}}}"#
        );
        fs::write(&tmp.0, json).unwrap();

        let result = FileBoardStore::open(&tmp.0, false, Arc::new(NoopLog));
        assert!(matches!(result, Err(StoreError::Serialization(_))));
    }

    #[test]
    fn foreign_version_is_rejected() {
        let tmp = TempSnapshot::new();
        fs::write(&tmp.0, r#"{"version":99,"boards":{}}"#).unwrap();

        let result = FileBoardStore::open(&tmp.0, false, Arc::new(NoopLog));
        assert!(matches!(
            result,
            Err(StoreError::UnsupportedSnapshot {
                found: 99,
                expected: 1
            })
        ));
    }
}
