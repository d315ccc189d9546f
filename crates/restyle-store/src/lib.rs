//! # Restyle Store - State Ownership, Undo and Persistence
//!
//! `restyle-store` owns a [`StyleState`](restyle_core::StyleState) for the length of an
//! editing session.
//!
//! - [`StyleStore`]: the single mutation entry point, with memoized generator output
//! - [`History`]: bounded undo stack (20 entries unless configured otherwise)
//! - [`Persistence`]: merge-over-defaults loading and debounced saving over a [`Storage`]
//! - [`codec`]: the versioned export/import envelope
//!
//! A store is single-threaded. Mutations happen in call order and every one of
//! them is undoable; nothing here blocks on I/O except an explicit
//! [`flush`](StyleStore::flush), a [`poll`](StyleStore::poll) that finds a due
//! write, an import, or dropping the store.

pub mod codec;
mod error;
mod history;
mod persist;
mod store;

pub use codec::{
    export_config, import_config, validate_import_config, ExportedConfig, ImportedConfig,
    CONFIG_VERSION,
};
pub use error::{CodecError, StorageError, StoreError};
pub use history::{History, DEFAULT_CAPACITY};
pub use persist::{
    FileStorage, MemoryStorage, Persistence, Storage, WriteScheduler, DEFAULT_DEBOUNCE,
    DEFAULT_KEY,
};
pub use store::{StoreOptions, StyleStore, UndoOutcome, Update};
