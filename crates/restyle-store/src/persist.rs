//! Persistence of the style state to a key-value backend.
//!
//! Three layers, each usable on its own:
//!
//! - [`Storage`]: a synchronous `get`/`set`/`remove` string store, with
//!   [`MemoryStorage`] and [`FileStorage`] backends
//! - [`WriteScheduler`]: a debounce timer holding at most one pending payload
//! - [`Persistence`]: a storage key plus a scheduler, loading with
//!   merge-over-defaults and saving through the debounce window
//!
//! Time is passed in explicitly as an [`Instant`], so nothing here spawns a
//! timer thread. The owner calls [`Persistence::poll`] from its event loop and
//! [`Persistence::flush`] before shutting down.
//!
//! ```rust
//! use std::time::{Duration, Instant};
//! use restyle_core::StyleState;
//! use restyle_store::{MemoryStorage, Persistence, Storage};
//!
//! let storage = MemoryStorage::new();
//! let window = Duration::from_millis(400);
//! let mut persistence = Persistence::new(storage.clone(), "restyle:state", window);
//!
//! let start = Instant::now();
//! persistence.save(&StyleState::default(), start).unwrap();
//! assert!(storage.get("restyle:state").unwrap().is_none());
//!
//! persistence.poll(start + Duration::from_millis(400)).unwrap();
//! assert!(storage.get("restyle:state").unwrap().is_some());
//! ```

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use restyle_core::StyleState;
use serde_json::Value;

use crate::error::StorageError;

/// Storage key used by the editor when none is configured.
pub const DEFAULT_KEY: &str = "restyle:state";

/// Quiet window used by the editor when none is configured.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(400);

/// A string key-value store.
pub trait Storage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    /// Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

impl<S: Storage + ?Sized> Storage for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// In-process storage. Clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries, shared across clones.
    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        entries.remove(key);
        Ok(())
    }
}

/// One JSON file per key under a directory.
///
/// Keys are mapped to file names by replacing every character outside
/// `[A-Za-z0-9._-]` with `_` (`restyle:state` is stored in
/// `restyle_state.json`). The directory is created on first write. Writes go
/// to a temporary sibling first and are renamed into place.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The file backing `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        let name = if name.is_empty() || name.chars().all(|c| c == '.') {
            "_".to_string()
        } else {
            name
        };
        self.dir.join(format!("{}.json", name))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Read { path, source }),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);
        fs::create_dir_all(&self.dir).map_err(|source| StorageError::Write {
            path: self.dir.clone(),
            source,
        })?;

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).map_err(|source| StorageError::Write {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &path).map_err(|source| StorageError::Write { path, source })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Remove { path, source }),
        }
    }
}

/// Debounce timer holding at most one pending payload.
///
/// Every [`schedule`](Self::schedule) replaces the pending payload and pushes
/// the deadline out by the full window, so a burst of writes closer together
/// than the window coalesces into a single release once the burst goes quiet.
#[derive(Debug, Clone)]
pub struct WriteScheduler<T> {
    window: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> WriteScheduler<T> {
    /// Creates an idle scheduler with the given quiet window.
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    /// The quiet window applied after each [`schedule`](Self::schedule).
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Replaces the pending payload and restarts the window at `now`.
    pub fn schedule(&mut self, payload: T, now: Instant) {
        self.pending = Some((payload, now + self.window));
    }

    /// Releases the pending payload if its quiet window has elapsed at `now`.
    pub fn due(&mut self, now: Instant) -> Option<T> {
        let elapsed = matches!(&self.pending, Some((_, deadline)) if *deadline <= now);
        if elapsed {
            self.take()
        } else {
            None
        }
    }

    /// Releases the pending payload immediately.
    pub fn take(&mut self) -> Option<T> {
        self.pending.take().map(|(payload, _)| payload)
    }

    /// Puts back a released payload that could not be delivered, due at
    /// `deadline`. A payload scheduled since the release is newer and wins.
    pub fn restore(&mut self, payload: T, deadline: Instant) {
        if self.pending.is_none() {
            self.pending = Some((payload, deadline));
        }
    }

    /// Drops the pending payload without releasing it.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending payload becomes due, if there is one.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, deadline)| *deadline)
    }
}

/// The style state stored under one key, written through a debounce window.
#[derive(Debug)]
pub struct Persistence<S> {
    storage: S,
    key: String,
    scheduler: WriteScheduler<String>,
}

impl<S: Storage> Persistence<S> {
    /// Binds `key` in `storage`, coalescing saves within `debounce`.
    pub fn new(storage: S, key: impl Into<String>, debounce: Duration) -> Self {
        Self {
            storage,
            key: key.into(),
            scheduler: WriteScheduler::new(debounce),
        }
    }

    /// The backing storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// The key the state is stored under.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Reads the stored state merged over `defaults`.
    ///
    /// Never fails: a missing entry yields `defaults`, and an unreadable entry
    /// or a payload that is not a JSON object is logged and also yields
    /// `defaults`. Individual fields that do not decode keep their default.
    pub fn load(&self, defaults: &StyleState) -> StyleState {
        let raw = match self.storage.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return defaults.clone(),
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "failed to read persisted state");
                return defaults.clone();
            }
        };

        let stored = match serde_json::from_str::<Value>(&raw) {
            Ok(value @ Value::Object(_)) => value,
            Ok(_) => {
                tracing::warn!(key = %self.key, "persisted state is not an object, using defaults");
                return defaults.clone();
            }
            Err(e) => {
                tracing::warn!(
                    key = %self.key,
                    error = %e,
                    "persisted state is not valid JSON, using defaults"
                );
                return defaults.clone();
            }
        };

        StyleState::merged_over(defaults, stored).unwrap_or_else(|| {
            tracing::warn!(key = %self.key, "persisted state does not decode, using defaults");
            defaults.clone()
        })
    }

    /// Schedules a write of `state`, replacing any pending one.
    pub fn save(&mut self, state: &StyleState, now: Instant) -> Result<(), StorageError> {
        let payload = serde_json::to_string(state)?;
        self.scheduler.schedule(payload, now);
        Ok(())
    }

    /// Writes the pending payload if its window has elapsed. Returns whether a
    /// write happened. A failed write stays pending and is retried by the next
    /// poll or flush.
    pub fn poll(&mut self, now: Instant) -> Result<bool, StorageError> {
        match self.scheduler.due(now) {
            Some(payload) => self.deliver(payload, now),
            None => Ok(false),
        }
    }

    /// Writes the pending payload now, if any. A failed write stays pending.
    pub fn flush(&mut self) -> Result<bool, StorageError> {
        match self.scheduler.take() {
            Some(payload) => self.deliver(payload, Instant::now()),
            None => Ok(false),
        }
    }

    /// Writes `state` immediately, dropping any pending write.
    pub fn write_now(&mut self, state: &StyleState) -> Result<(), StorageError> {
        self.scheduler.cancel();
        let payload = serde_json::to_string(state)?;
        self.write(&payload)
    }

    /// Drops any pending write and removes the stored entry.
    pub fn clear(&mut self) -> Result<(), StorageError> {
        self.scheduler.cancel();
        self.storage.remove(&self.key)?;
        tracing::debug!(key = %self.key, "cleared persisted state");
        Ok(())
    }

    /// True while a saved state has not reached storage yet.
    pub fn has_pending(&self) -> bool {
        self.scheduler.is_pending()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.scheduler.deadline()
    }

    fn deliver(&mut self, payload: String, now: Instant) -> Result<bool, StorageError> {
        match self.write(&payload) {
            Ok(()) => Ok(true),
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "write failed, keeping state pending");
                self.scheduler.restore(payload, now);
                Err(e)
            }
        }
    }

    fn write(&self, payload: &str) -> Result<(), StorageError> {
        self.storage.set(&self.key, payload)?;
        tracing::debug!(key = %self.key, bytes = payload.len(), "persisted state");
        Ok(())
    }
}
