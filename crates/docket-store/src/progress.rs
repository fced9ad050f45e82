//! # Progress Store
//!
//! Persists one progress record per attorney under the key
//! `edpa-24376-progress-<attorney>`:
//!
//! ```json
//! { "tasks": [ ... ], "lastUpdated": "2026-11-02T09:00:00Z" }
//! ```
//!
//! ## Recovery
//!
//! A missing record, a record that does not parse, and a record without a
//! `tasks` field all load as the freshly derived task list. Recovery is
//! logged at `warn` and never surfaces as an error. Backend I/O failures do.
//!
//! Stored records are used as-is. Tasks whose node no longer exists in the
//! timeline are kept and counted in a warning.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use docket_core::fixture::TimelineNode;
use docket_core::{Attorney, Timestamp};
use docket_state::{derive_tasks, Board, Task};

use crate::error::StoreError;
use crate::kv::KeyValueStore;

/// Prefix of every progress key.
pub const KEY_PREFIX: &str = "edpa-24376-progress-";

/// Storage key for an attorney's record.
pub fn storage_key(attorney: Attorney) -> String {
    format!("{KEY_PREFIX}{}", attorney.key())
}

/// The persisted document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    pub tasks: Vec<Task>,
    pub last_updated: Timestamp,
}

/// Lenient read shape: both fields may be absent.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredRecord {
    #[serde(default)]
    tasks: Option<Vec<Task>>,
    #[serde(default)]
    last_updated: Option<String>,
}

/// Where a loaded board came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Read from the store.
    Stored,
    /// No record existed.
    Fresh,
    /// A record existed but was unusable and was replaced by defaults.
    Recovered,
}

/// A board plus what is known about its stored record.
#[derive(Debug, Clone)]
pub struct LoadedBoard {
    pub board: Board,
    pub origin: Origin,
    pub last_updated: Option<Timestamp>,
    /// Stored tasks referencing nodes missing from the timeline.
    pub stale_tasks: usize,
}

/// Per-attorney progress persistence over any [`KeyValueStore`].
#[derive(Debug)]
pub struct ProgressStore<S: KeyValueStore> {
    backend: S,
}

impl<S: KeyValueStore> ProgressStore<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// The attorney's board, falling back to tasks derived from `nodes`.
    pub fn load(&self, attorney: Attorney, nodes: &[TimelineNode]) -> Result<Board, StoreError> {
        Ok(self.load_detailed(attorney, nodes)?.board)
    }

    /// Like [`load`](Self::load), reporting origin and staleness.
    pub fn load_detailed(&self, attorney: Attorney, nodes: &[TimelineNode]) -> Result<LoadedBoard, StoreError> {
        let key = storage_key(attorney);
        let fresh = |origin| LoadedBoard {
            board: Board::new(derive_tasks(nodes)),
            origin,
            last_updated: None,
            stale_tasks: 0,
        };

        let Some(text) = self.backend.get(&key)? else {
            tracing::debug!(%key, "no progress record; deriving tasks");
            return Ok(fresh(Origin::Fresh));
        };

        let stored: StoredRecord = match serde_json::from_str(&text) {
            Ok(stored) => stored,
            Err(e) => {
                tracing::warn!(%key, error = %e, "discarding unreadable progress record");
                return Ok(fresh(Origin::Recovered));
            }
        };
        let Some(tasks) = stored.tasks else {
            tracing::warn!(%key, "progress record has no tasks; deriving tasks");
            return Ok(fresh(Origin::Recovered));
        };

        let known: HashSet<u32> = nodes.iter().map(|n| n.id).collect();
        let stale_tasks = tasks.iter().filter(|t| !known.contains(&t.node_id)).count();
        if stale_tasks > 0 {
            tracing::warn!(%key, stale_tasks, "progress record references nodes missing from the timeline");
        }

        Ok(LoadedBoard {
            board: Board::new(tasks),
            origin: Origin::Stored,
            last_updated: stored.last_updated.as_deref().and_then(|s| Timestamp::parse(s).ok()),
            stale_tasks,
        })
    }

    /// Write the board with a fresh `lastUpdated`.
    pub fn save(&mut self, attorney: Attorney, board: &Board) -> Result<ProgressRecord, StoreError> {
        self.save_at(attorney, board, Timestamp::now())
    }

    /// Write the board stamped with `at`.
    pub fn save_at(&mut self, attorney: Attorney, board: &Board, at: Timestamp) -> Result<ProgressRecord, StoreError> {
        let key = storage_key(attorney);
        let record = ProgressRecord {
            tasks: board.tasks().to_vec(),
            last_updated: at,
        };
        let json = serde_json::to_string_pretty(&record).map_err(|source| StoreError::Serialize {
            key: key.clone(),
            source,
        })?;
        self.backend.set(&key, &json)?;
        tracing::info!(%key, tasks = record.tasks.len(), "progress saved");
        Ok(record)
    }

    /// Delete the attorney's record. Returns whether one existed.
    pub fn reset(&mut self, attorney: Attorney) -> Result<bool, StoreError> {
        self.backend.remove(&storage_key(attorney))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::{FileStore, MemoryStore};
    use docket_core::{CascadePolicy, FixtureBundle};
    use docket_state::TaskStatus;
    use proptest::prelude::*;

    fn nodes() -> Vec<TimelineNode> {
        FixtureBundle::bundled(CascadePolicy::Strict).unwrap().timeline.nodes
    }

    fn at(s: &str) -> Timestamp {
        Timestamp::parse(s).unwrap()
    }

    #[test]
    fn test_storage_key() {
        assert_eq!(storage_key(Attorney::Cooper), "edpa-24376-progress-cooper");
        assert_eq!(storage_key(Attorney::Rush), "edpa-24376-progress-rush");
    }

    #[test]
    fn test_missing_record_is_fresh() {
        let store = ProgressStore::new(MemoryStore::new());
        let loaded = store.load_detailed(Attorney::Cooper, &nodes()).unwrap();
        assert_eq!(loaded.origin, Origin::Fresh);
        assert_eq!(loaded.board.tasks(), derive_tasks(&nodes()).as_slice());
    }

    #[test]
    fn test_corrupted_record_equals_defaults() {
        let nodes = nodes();
        let mut backend = MemoryStore::new();
        backend.set("edpa-24376-progress-cooper", "{not json").unwrap();
        let store = ProgressStore::new(backend);
        let loaded = store.load_detailed(Attorney::Cooper, &nodes).unwrap();
        assert_eq!(loaded.origin, Origin::Recovered);

        let empty = ProgressStore::new(MemoryStore::new());
        assert_eq!(loaded.board, empty.load(Attorney::Cooper, &nodes).unwrap());
    }

    #[test]
    fn test_record_without_tasks_is_recovered() {
        let mut backend = MemoryStore::new();
        backend
            .set("edpa-24376-progress-rush", r#"{"lastUpdated":"2026-11-02T09:00:00Z"}"#)
            .unwrap();
        let store = ProgressStore::new(backend);
        let loaded = store.load_detailed(Attorney::Rush, &nodes()).unwrap();
        assert_eq!(loaded.origin, Origin::Recovered);
        assert_eq!(loaded.board.tasks().len(), 18);
    }

    #[test]
    fn test_records_are_per_attorney() {
        let nodes = nodes();
        let mut store = ProgressStore::new(MemoryStore::new());
        let mut board = store.load(Attorney::Cooper, &nodes).unwrap();
        board.set_status(0, TaskStatus::Done).unwrap();
        store.save(Attorney::Cooper, &board).unwrap();

        let rush = store.load(Attorney::Rush, &nodes).unwrap();
        assert_eq!(rush.task(0).unwrap().status, TaskStatus::Todo);
        let cooper = store.load(Attorney::Cooper, &nodes).unwrap();
        assert_eq!(cooper.task(0).unwrap().status, TaskStatus::Done);
    }

    #[test]
    fn test_save_refreshes_last_updated_only() {
        let nodes = nodes();
        let mut store = ProgressStore::new(MemoryStore::new());
        let board = store.load(Attorney::Cooper, &nodes).unwrap();
        let first = store.save_at(Attorney::Cooper, &board, at("2026-11-02T09:00:00Z")).unwrap();
        let reloaded = store.load(Attorney::Cooper, &nodes).unwrap();
        let second = store.save_at(Attorney::Cooper, &reloaded, at("2026-11-03T10:30:00Z")).unwrap();
        assert_eq!(first.tasks, second.tasks);
        assert_ne!(first.last_updated, second.last_updated);

        let loaded = store.load_detailed(Attorney::Cooper, &nodes).unwrap();
        assert_eq!(loaded.last_updated, Some(at("2026-11-03T10:30:00Z")));
    }

    #[test]
    fn test_stale_tasks_kept_and_counted() {
        let nodes = nodes();
        let mut store = ProgressStore::new(MemoryStore::new());
        let board = Board::new(derive_tasks(&nodes));
        store.save(Attorney::Cooper, &board).unwrap();

        let trimmed = &nodes[..nodes.len() - 1];
        let loaded = store.load_detailed(Attorney::Cooper, trimmed).unwrap();
        assert_eq!(loaded.origin, Origin::Stored);
        assert_eq!(loaded.stale_tasks, 2);
        assert_eq!(loaded.board.tasks().len(), 18);
    }

    #[test]
    fn test_reads_browser_written_record() {
        let nodes = nodes();
        let mut tasks = serde_json::to_value(derive_tasks(&nodes)).unwrap();
        tasks[4]["status"] = serde_json::json!("in_progress");
        let doc = serde_json::json!({ "tasks": tasks, "lastUpdated": "2026-11-05T14:22:31.482Z" });
        let mut backend = MemoryStore::new();
        backend.set("edpa-24376-progress-cooper", &doc.to_string()).unwrap();

        let loaded = ProgressStore::new(backend).load_detailed(Attorney::Cooper, &nodes).unwrap();
        assert_eq!(loaded.origin, Origin::Stored);
        assert_eq!(loaded.board.task(4).unwrap().status, TaskStatus::InProgress);
        assert_eq!(loaded.last_updated, Some(at("2026-11-05T14:22:31Z")));
    }

    #[test]
    fn test_file_backed_roundtrip_and_reset() {
        let dir = tempfile::tempdir().unwrap();
        let nodes = nodes();
        let mut store = ProgressStore::new(FileStore::new(dir.path()));
        let mut board = store.load(Attorney::Rush, &nodes).unwrap();
        board.set_status(9, TaskStatus::InProgress).unwrap();
        store.save(Attorney::Rush, &board).unwrap();
        assert!(dir.path().join("edpa-24376-progress-rush.json").is_file());

        assert_eq!(store.load(Attorney::Rush, &nodes).unwrap(), board);
        assert!(store.reset(Attorney::Rush).unwrap());
        let fresh = store.load_detailed(Attorney::Rush, &nodes).unwrap();
        assert_eq!(fresh.origin, Origin::Fresh);
    }

    #[test]
    fn test_relative_state_dir_falls_back_for_other_attorney_and_after_reset() {
        let dir = tempfile::tempdir_in(".").unwrap();
        let nodes = nodes();
        let mut store = ProgressStore::new(FileStore::new(dir.path().join(".docket/state")));
        let board = store.load(Attorney::Cooper, &nodes).unwrap();
        store.save(Attorney::Cooper, &board).unwrap();

        let rush = store.load_detailed(Attorney::Rush, &nodes).unwrap();
        assert_eq!(rush.origin, Origin::Fresh);

        assert!(store.reset(Attorney::Cooper).unwrap());
        let cooper = store.load_detailed(Attorney::Cooper, &nodes).unwrap();
        assert_eq!(cooper.origin, Origin::Fresh);
        assert_eq!(cooper.board.tasks(), derive_tasks(&nodes).as_slice());
    }

    fn status() -> impl Strategy<Value = TaskStatus> {
        prop_oneof![
            Just(TaskStatus::Todo),
            Just(TaskStatus::InProgress),
            Just(TaskStatus::Done)
        ]
    }

    proptest! {
        /// save(load()) leaves task ids and statuses unchanged.
        #[test]
        fn save_load_preserves_tasks(moves in prop::collection::vec((0u32..18, status()), 0..30)) {
            let nodes = nodes();
            let mut store = ProgressStore::new(MemoryStore::new());
            let mut board = store.load(Attorney::Cooper, &nodes).unwrap();
            for (id, s) in moves {
                board.set_status(id, s).unwrap();
            }
            store.save(Attorney::Cooper, &board).unwrap();
            let once = store.load(Attorney::Cooper, &nodes).unwrap();
            store.save(Attorney::Cooper, &once).unwrap();
            let twice = store.load(Attorney::Cooper, &nodes).unwrap();
            prop_assert_eq!(&once, &board);
            prop_assert_eq!(&twice, &board);
        }
    }
}
