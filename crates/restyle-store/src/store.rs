//! The style store: current state, undo history, derived artifacts and
//! persistence behind one mutation entry point.

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use restyle_core::{
    generate_classes, generate_markup, generate_styles, patch, Appearance, Border, Breakpoint,
    Effects, Margin, Padding, Position, Section, Size, StyleMap, StyleState, Tag, Transforms,
    Transforms3D, Typography,
};
use serde_json::Value;

use crate::codec::{export_config, import_config, ExportedConfig, ImportedConfig};
use crate::error::StoreError;
use crate::history::{History, DEFAULT_CAPACITY};
use crate::persist::{Persistence, Storage, DEFAULT_DEBOUNCE, DEFAULT_KEY};

/// Construction options for [`StyleStore`].
#[derive(Debug, Clone)]
pub struct StoreOptions {
    pub key: String,
    pub debounce: Duration,
    pub history_capacity: usize,
    /// The state a fresh session and [`StyleStore::reset`] start from.
    pub defaults: StyleState,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            key: DEFAULT_KEY.to_string(),
            debounce: DEFAULT_DEBOUNCE,
            history_capacity: DEFAULT_CAPACITY,
            defaults: StyleState::default(),
        }
    }
}

impl StoreOptions {
    /// Storage key the state is persisted under.
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Quiet window before a save reaches storage.
    pub fn debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Number of undo snapshots kept; at least one.
    pub fn history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }
}

/// Replacement of one top-level [`StyleState`] field.
#[derive(Debug, Clone, PartialEq)]
pub enum Update {
    Tag(Tag),
    ElementId(String),
    Link(String),
    TextContent(String),
    TailwindClasses(String),
    InlineCss(String),
    Appearance(Appearance),
    Typography(Typography),
    Border(Border),
    Effects(Effects),
    Padding(Padding),
    Margin(Margin),
    Size(Size),
    Position(Position),
    Transforms(Transforms),
    Transforms3D(Transforms3D),
}

impl Update {
    /// Serialized name of the replaced field.
    pub fn key(&self) -> &'static str {
        match self {
            Update::Tag(_) => "tag",
            Update::ElementId(_) => "elementId",
            Update::Link(_) => "link",
            Update::TextContent(_) => "textContent",
            Update::TailwindClasses(_) => "tailwindClasses",
            Update::InlineCss(_) => "inlineCss",
            Update::Appearance(_) => Section::Appearance.key(),
            Update::Typography(_) => Section::Typography.key(),
            Update::Border(_) => Section::Border.key(),
            Update::Effects(_) => Section::Effects.key(),
            Update::Padding(_) => Section::Padding.key(),
            Update::Margin(_) => Section::Margin.key(),
            Update::Size(_) => Section::Size.key(),
            Update::Position(_) => Section::Position.key(),
            Update::Transforms(_) => Section::Transforms.key(),
            Update::Transforms3D(_) => Section::Transforms3D.key(),
        }
    }

    fn apply_to(self, state: &mut StyleState) {
        match self {
            Update::Tag(v) => state.tag = v,
            Update::ElementId(v) => state.element_id = v,
            Update::Link(v) => state.link = v,
            Update::TextContent(v) => state.text_content = v,
            Update::TailwindClasses(v) => state.tailwind_classes = v,
            Update::InlineCss(v) => state.inline_css = v,
            Update::Appearance(v) => state.appearance = v,
            Update::Typography(v) => state.typography = v,
            Update::Border(v) => state.border = v,
            Update::Effects(v) => state.effects = v,
            Update::Padding(v) => state.padding = v,
            Update::Margin(v) => state.margin = v,
            Update::Size(v) => state.size = v,
            Update::Position(v) => state.position = v,
            Update::Transforms(v) => state.transforms = v,
            Update::Transforms3D(v) => state.transforms_3d = v,
        }
    }
}

/// Result of [`StyleStore::undo`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UndoOutcome {
    Restored,
    NothingToUndo,
}

#[derive(Debug, Default)]
struct Derived {
    classes: HashMap<Breakpoint, String>,
    styles: Option<StyleMap>,
    markup: HashMap<Breakpoint, String>,
}

/// The single owner of the edited element's state.
///
/// Every mutation pushes the previous snapshot onto the undo history,
/// normalizes the new state, invalidates the memoized generator output and
/// schedules a debounced write. Snapshots are shared [`Arc`]s, so reading the
/// state never copies it and history entries cost one clone per mutation.
///
/// Pending writes are released by [`poll`](Self::poll) and flushed when the
/// store is dropped.
///
/// ```rust
/// use restyle_core::Breakpoint;
/// use restyle_store::{MemoryStorage, StoreOptions, StyleStore, UndoOutcome, Update};
///
/// let mut store = StyleStore::open(MemoryStorage::new(), StoreOptions::default());
/// store.update(Update::TextContent("Hello".into())).unwrap();
/// store.set_path("effects.opacity", serde_json::json!(50)).unwrap();
/// assert!(store.classes(Breakpoint::Sm).contains("sm:opacity-[0.5]"));
///
/// assert_eq!(store.undo().unwrap(), UndoOutcome::Restored);
/// assert_eq!(store.get().text_content, "Hello");
/// ```
pub struct StyleStore<S: Storage> {
    state: Arc<StyleState>,
    defaults: StyleState,
    history: History<Arc<StyleState>>,
    persistence: Persistence<S>,
    derived: RefCell<Derived>,
}

impl<S: Storage> StyleStore<S> {
    /// Opens a store over `storage`, loading any persisted state.
    pub fn open(storage: S, options: StoreOptions) -> Self {
        let persistence = Persistence::new(storage, options.key, options.debounce);
        let state = persistence.load(&options.defaults);
        Self {
            state: Arc::new(state),
            defaults: options.defaults,
            history: History::new(options.history_capacity),
            persistence,
            derived: RefCell::new(Derived::default()),
        }
    }

    /// The current snapshot.
    pub fn get(&self) -> Arc<StyleState> {
        Arc::clone(&self.state)
    }

    /// The state [`reset`](Self::reset) returns to.
    pub fn defaults(&self) -> &StyleState {
        &self.defaults
    }

    pub fn storage(&self) -> &S {
        self.persistence.storage()
    }

    /// Replaces one top-level field.
    pub fn update(&mut self, update: Update) -> Result<(), StoreError> {
        self.update_many([update])
    }

    /// Replaces several top-level fields as one undoable step.
    ///
    /// An empty batch changes nothing and records no history.
    pub fn update_many(
        &mut self,
        updates: impl IntoIterator<Item = Update>,
    ) -> Result<(), StoreError> {
        let mut updates = updates.into_iter().peekable();
        if updates.peek().is_none() {
            return Ok(());
        }
        let mut next = (*self.state).clone();
        for update in updates {
            tracing::trace!(field = update.key(), "update");
            update.apply_to(&mut next);
        }
        self.commit(next)
    }

    /// Replaces one field inside a nested section.
    ///
    /// Fails without touching state or history when `key` is not a field of
    /// `section` or `value` does not fit it.
    pub fn update_nested(
        &mut self,
        section: Section,
        key: &str,
        value: Value,
    ) -> Result<(), StoreError> {
        let next = patch::apply_nested(&self.state, section, key, value)?;
        self.commit(next)
    }

    /// Replaces the field at a dotted path such as `border.radius.tl`.
    pub fn set_path(&mut self, path: &str, value: Value) -> Result<(), StoreError> {
        let next = patch::apply(&self.state, path, value)?;
        self.commit(next)
    }

    /// Restores the defaults and clears persisted storage. Undoable.
    pub fn reset(&mut self) -> Result<(), StoreError> {
        self.persistence.clear()?;
        self.commit(self.defaults.clone())
    }

    /// Restores the most recent snapshot from history.
    pub fn undo(&mut self) -> Result<UndoOutcome, StoreError> {
        let Some(previous) = self.history.pop() else {
            return Ok(UndoOutcome::NothingToUndo);
        };
        self.state = previous;
        self.invalidate();
        self.persistence.save(&self.state, Instant::now())?;
        Ok(UndoOutcome::Restored)
    }

    /// True when [`undo`](Self::undo) has a snapshot to restore.
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Memoized [`generate_classes`] for the current state.
    pub fn classes(&self, breakpoint: Breakpoint) -> String {
        let mut derived = self.derived.borrow_mut();
        derived
            .classes
            .entry(breakpoint)
            .or_insert_with(|| generate_classes(&self.state, breakpoint))
            .clone()
    }

    /// Memoized [`generate_styles`] for the current state.
    pub fn styles(&self) -> StyleMap {
        let mut derived = self.derived.borrow_mut();
        derived
            .styles
            .get_or_insert_with(|| generate_styles(&self.state))
            .clone()
    }

    /// Memoized [`generate_markup`] over the classes for `breakpoint`.
    pub fn markup(&self, breakpoint: Breakpoint) -> String {
        if let Some(markup) = self.derived.borrow().markup.get(&breakpoint) {
            return markup.clone();
        }
        let classes = self.classes(breakpoint);
        let markup = generate_markup(&self.state, &classes);
        self.derived
            .borrow_mut()
            .markup
            .insert(breakpoint, markup.clone());
        markup
    }

    /// Writes a pending save whose quiet window has elapsed.
    pub fn poll(&mut self) -> Result<bool, StoreError> {
        self.poll_at(Instant::now())
    }

    /// [`poll`](Self::poll) against an explicit clock.
    pub fn poll_at(&mut self, now: Instant) -> Result<bool, StoreError> {
        Ok(self.persistence.poll(now)?)
    }

    /// Writes any pending save now.
    pub fn flush(&mut self) -> Result<bool, StoreError> {
        Ok(self.persistence.flush()?)
    }

    pub fn has_pending_write(&self) -> bool {
        self.persistence.has_pending()
    }

    /// Wraps the current state in a versioned export envelope.
    pub fn export(&self, breakpoint: Breakpoint) -> ExportedConfig {
        export_config(&self.state, breakpoint)
    }

    /// Replaces persisted state with an imported file and reloads from it.
    ///
    /// The write is immediate and the undo history is cleared; the session
    /// continues as if it had been opened on the imported state.
    pub fn import(&mut self, config: ImportedConfig) -> Result<(), StoreError> {
        self.persistence.write_now(&config.state)?;
        self.state = Arc::new(self.persistence.load(&self.defaults));
        self.history.clear();
        self.invalidate();
        tracing::debug!(version = %config.version, "imported configuration");
        Ok(())
    }

    /// Parses, validates and imports an export file. Returns the file's
    /// breakpoint, if it names a known one.
    ///
    /// Nothing is touched when validation fails.
    pub fn import_json(&mut self, text: &str) -> Result<Option<Breakpoint>, StoreError> {
        let config = import_config(text)?;
        let breakpoint = config.breakpoint;
        self.import(config)?;
        Ok(breakpoint)
    }

    fn commit(&mut self, next: StyleState) -> Result<(), StoreError> {
        let next = Arc::new(next.normalized());
        let previous = std::mem::replace(&mut self.state, next);
        self.history.push(previous);
        self.invalidate();
        self.persistence.save(&self.state, Instant::now())?;
        Ok(())
    }

    fn invalidate(&self) {
        *self.derived.borrow_mut() = Derived::default();
    }
}

impl<S: Storage> Drop for StyleStore<S> {
    fn drop(&mut self) {
        if let Err(e) = self.persistence.flush() {
            tracing::warn!(error = %e, "failed to flush pending state on close");
        }
    }
}

impl<S: Storage> std::fmt::Debug for StyleStore<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StyleStore")
            .field("state", &self.state)
            .field("history", &self.history.len())
            .field("pending_write", &self.persistence.has_pending())
            .finish()
    }
}
