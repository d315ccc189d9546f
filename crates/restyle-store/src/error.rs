//! Error types for storage, the export codec and the store.

use std::io;
use std::path::PathBuf;

use restyle_core::PatchError;
use thiserror::Error;

/// A storage backend failed to read, write or remove an entry.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to remove '{path}': {source}")]
    Remove {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The in-memory backend's lock was poisoned by a panicking writer.
    #[error("storage lock poisoned")]
    Poisoned,

    #[error("failed to encode state: {0}")]
    Encode(#[from] serde_json::Error),
}

/// An export file could not be produced or accepted.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("import file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The payload parsed but lacks the `version`/`timestamp`/`state` envelope.
    #[error("invalid import file: expected string 'version' and 'timestamp' and an object 'state'")]
    InvalidEnvelope,
}

/// Errors surfaced by [`StyleStore`](crate::StyleStore) operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Patch(#[from] PatchError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Codec(#[from] CodecError),
}
