//! # Key-Value Backends
//!
//! The progress store writes one JSON document per key. Two backends:
//!
//! - [`MemoryStore`]: a map in process memory, for tests and dry runs.
//! - [`FileStore`]: one `<key>.json` file per key under a state directory.
//!
//! Writes are synchronous and last-write-wins.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::StoreError;

/// A string-keyed store of string documents.
///
/// Object-safe so callers can hold a `Box<dyn KeyValueStore>`.
pub trait KeyValueStore: std::fmt::Debug {
    /// The document under `key`, or `None` if absent.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the document under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete the document under `key`. Returns whether one existed.
    fn remove(&mut self, key: &str) -> Result<bool, StoreError>;
}

// ─── Memory ─────────────────────────────────────────────────────────

/// In-memory backend.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<bool, StoreError> {
        Ok(self.entries.remove(key).is_some())
    }
}

// ─── Files ──────────────────────────────────────────────────────────

/// Filesystem backend: `<root>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// A store rooted at `root`. The directory is created on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file holding `key`, after validating the key.
    ///
    /// A valid key is a single path component, so the file always sits
    /// directly under `root` whether or not `root` is relative, exists yet,
    /// or is reached through a symlink.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        validate_key(key)?;
        Ok(self.root.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.root).map_err(|source| StoreError::Io {
            path: self.root.clone(),
            source,
        })?;
        std::fs::write(&path, value).map_err(|source| StoreError::Io { path: path.clone(), source })?;
        tracing::debug!(path = %path.display(), bytes = value.len(), "wrote record");
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<bool, StoreError> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }
}

/// Reject keys that could escape the state directory.
fn validate_key(key: &str) -> Result<(), StoreError> {
    let invalid = |reason| {
        Err(StoreError::InvalidKey {
            key: key.to_string(),
            reason,
        })
    };
    if key.is_empty() {
        return invalid("empty");
    }
    if key.contains('/') || key.contains('\\') || key.contains('\0') {
        return invalid("contains path separators");
    }
    if key == "." || key == ".." || key.starts_with("..") {
        return invalid("path traversal");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("k").unwrap(), None);
        store.set("k", "v1").unwrap();
        store.set("k", "v2").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v2"));
        assert_eq!(store.len(), 1);
        assert!(store.remove("k").unwrap());
        assert!(!store.remove("k").unwrap());
        assert!(store.is_empty());
    }

    #[test]
    fn test_file_store_creates_root_on_write() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("state");
        let mut store = FileStore::new(&root);
        assert_eq!(store.get("edpa-24376-progress-cooper").unwrap(), None);
        store.set("edpa-24376-progress-cooper", "{}").unwrap();
        assert!(root.join("edpa-24376-progress-cooper.json").is_file());
        assert_eq!(store.get("edpa-24376-progress-cooper").unwrap().as_deref(), Some("{}"));
        assert!(store.remove("edpa-24376-progress-cooper").unwrap());
        assert_eq!(store.get("edpa-24376-progress-cooper").unwrap(), None);
    }

    #[test]
    fn test_file_store_rejects_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path());
        for key in ["", "..", "../escape", "a/b", "a\\b", "nul\0"] {
            assert!(
                matches!(store.set(key, "x"), Err(StoreError::InvalidKey { .. })),
                "accepted {key:?}"
            );
        }
    }

    #[test]
    fn test_relative_root_missing_key_is_absent() {
        // Relative to the package directory, as with the default `.docket/state`.
        let dir = tempfile::tempdir_in(".").unwrap();
        let root = dir.path().join("state");
        assert!(root.is_relative());
        let mut store = FileStore::new(&root);
        store.set("edpa-24376-progress-cooper", "{}").unwrap();

        assert_eq!(store.get("edpa-24376-progress-rush").unwrap(), None);
        assert!(!store.remove("edpa-24376-progress-rush").unwrap());
        assert!(store.remove("edpa-24376-progress-cooper").unwrap());
        assert_eq!(store.get("edpa-24376-progress-cooper").unwrap(), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_root_missing_key_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        let real = dir.path().join("real");
        std::fs::create_dir(&real).unwrap();
        let link = dir.path().join("link");
        std::os::unix::fs::symlink(&real, &link).unwrap();

        let mut store = FileStore::new(&link);
        store.set("edpa-24376-progress-cooper", "{}").unwrap();
        assert!(real.join("edpa-24376-progress-cooper.json").is_file());
        assert_eq!(store.get("edpa-24376-progress-rush").unwrap(), None);
    }

    #[test]
    fn test_trait_object() {
        let mut store: Box<dyn KeyValueStore> = Box::new(MemoryStore::new());
        store.set("a", "1").unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("1"));
    }
}
