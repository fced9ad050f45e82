//! Store error type.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by key-value backends and the progress store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The key cannot be used as a file name inside the state directory.
    #[error("invalid storage key {key:?}: {reason}")]
    InvalidKey { key: String, reason: &'static str },

    /// Reading or writing the backing file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A record could not be serialized for writing.
    #[error("failed to serialize record for {key}: {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_key_display() {
        let err = StoreError::InvalidKey {
            key: "../x".into(),
            reason: "path traversal",
        };
        assert_eq!(err.to_string(), "invalid storage key \"../x\": path traversal");
    }

    #[test]
    fn test_io_display_names_path() {
        let err = StoreError::Io {
            path: PathBuf::from("/tmp/state/k.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("/tmp/state/k.json"));
    }
}
