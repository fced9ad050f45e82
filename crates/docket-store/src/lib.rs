//! # docket-store — Progress Persistence
//!
//! The only durable state in the workspace: each attorney's progress board,
//! stored as one JSON record in a key-value backend.
//!
//! ## Backends
//!
//! - [`MemoryStore`]: process memory.
//! - [`FileStore`]: `<state_dir>/<key>.json`, with keys validated against
//!   path traversal.
//!
//! ## Crate Policy
//!
//! - Writes are synchronous and last-write-wins.
//! - Unreadable records are replaced by defaults, never reported as errors.

pub mod error;
pub mod kv;
pub mod progress;

pub use error::StoreError;
pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use progress::{storage_key, LoadedBoard, Origin, ProgressRecord, ProgressStore, KEY_PREFIX};
