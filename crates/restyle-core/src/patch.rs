//! Path-addressed updates over the fixed [`StyleState`] schema.
//!
//! A path is a dotted sequence of the serialized (camelCase) field names, for
//! example `"textContent"`, `"effects.opacity"` or `"border.radius.tl"`. Only
//! paths that already exist in the schema can be written, so a patch can never
//! grow the state with arbitrary keys, and the written value must decode into
//! the field's type.
//!
//! ```rust
//! use restyle_core::{patch, Section, StyleState};
//! use serde_json::json;
//!
//! let state = StyleState::default();
//! let state = patch::apply(&state, "border.radius.all", json!(12)).unwrap();
//! let state = patch::apply_nested(&state, Section::Padding, "top", json!("8")).unwrap();
//! assert_eq!(state.border.radius.all, 12.0);
//! assert_eq!(state.padding.top, "8");
//!
//! assert!(patch::apply(&state, "border.glow", json!(1)).is_err());
//! ```

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::error::PatchError;
use crate::state::StyleState;

/// The nested object fields of [`StyleState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Appearance,
    Typography,
    Border,
    Effects,
    Padding,
    Margin,
    Size,
    Position,
    Transforms,
    Transforms3D,
}

impl Section {
    pub const ALL: [Section; 10] = [
        Section::Appearance,
        Section::Typography,
        Section::Border,
        Section::Effects,
        Section::Padding,
        Section::Margin,
        Section::Size,
        Section::Position,
        Section::Transforms,
        Section::Transforms3D,
    ];

    /// Serialized field name.
    pub fn key(&self) -> &'static str {
        match self {
            Section::Appearance => "appearance",
            Section::Typography => "typography",
            Section::Border => "border",
            Section::Effects => "effects",
            Section::Padding => "padding",
            Section::Margin => "margin",
            Section::Size => "size",
            Section::Position => "position",
            Section::Transforms => "transforms",
            Section::Transforms3D => "transforms3D",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Section {
    type Err = PatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Section::ALL
            .into_iter()
            .find(|section| section.key() == s)
            .ok_or_else(|| PatchError::UnknownPath(s.to_string()))
    }
}

/// Returns a copy of `state` with the field at `path` replaced by `value`.
///
/// String-encoded fields accept JSON numbers and booleans (stored as their
/// text), and numeric fields accept numeric strings, mirroring how the editor
/// panel hands values around.
pub fn apply(state: &StyleState, path: &str, value: Value) -> Result<StyleState, PatchError> {
    let segments: Vec<&str> = path.split('.').map(str::trim).collect();
    if segments.iter().any(|s| s.is_empty()) {
        return Err(PatchError::UnknownPath(path.to_string()));
    }

    let mut tree = serde_json::to_value(state).map_err(|e| PatchError::invalid(path, e))?;
    let slot = lookup_mut(&mut tree, &segments)
        .ok_or_else(|| PatchError::UnknownPath(path.to_string()))?;
    *slot = coerce(slot, value);

    serde_json::from_value(tree).map_err(|e| PatchError::invalid(path, e))
}

/// Replaces `key` (itself possibly dotted) inside a nested section.
pub fn apply_nested(
    state: &StyleState,
    section: Section,
    key: &str,
    value: Value,
) -> Result<StyleState, PatchError> {
    apply(state, &format!("{}.{}", section.key(), key), value)
}

/// Reads the serialized value at `path`.
pub fn get(state: &StyleState, path: &str) -> Result<Value, PatchError> {
    let segments: Vec<&str> = path.split('.').map(str::trim).collect();
    let mut tree = serde_json::to_value(state).map_err(|e| PatchError::invalid(path, e))?;
    lookup_mut(&mut tree, &segments)
        .map(|v| v.take())
        .ok_or_else(|| PatchError::UnknownPath(path.to_string()))
}

fn lookup_mut<'a>(tree: &'a mut Value, segments: &[&str]) -> Option<&'a mut Value> {
    segments
        .iter()
        .try_fold(tree, |node, segment| node.as_object_mut()?.get_mut(*segment))
}

/// Converts between JSON numbers and strings when `existing` is the other kind.
pub(crate) fn coerce(existing: &Value, value: Value) -> Value {
    match (existing, value) {
        (Value::String(_), Value::Number(n)) => Value::String(n.to_string()),
        (Value::String(_), Value::Bool(b)) => Value::String(b.to_string()),
        (Value::Number(_), Value::String(s)) => match s.trim().parse::<f64>() {
            Ok(n) => serde_json::Number::from_f64(n)
                .map(Value::Number)
                .unwrap_or(Value::String(s)),
            Err(_) => Value::String(s),
        },
        (_, value) => value,
    }
}
