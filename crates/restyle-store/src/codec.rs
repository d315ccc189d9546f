//! The export/import file envelope.
//!
//! An export is the full state wrapped with a version, a timestamp and the
//! breakpoint that was active:
//!
//! ```json
//! { "state": { ... }, "version": "1.0.0", "timestamp": "2024-05-01T12:00:00.000Z", "breakpoint": "md" }
//! ```
//!
//! Import validation is structural only. Anything odd inside `state` is
//! reconciled against the defaults the same way a persisted payload is.

use chrono::{DateTime, SecondsFormat, Utc};
use restyle_core::{Breakpoint, StyleState};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CodecError;

/// Version written into every export.
pub const CONFIG_VERSION: &str = "1.0.0";

/// An exported configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedConfig {
    pub state: StyleState,
    pub version: String,
    pub timestamp: String,
    pub breakpoint: Breakpoint,
}

impl ExportedConfig {
    pub fn to_json_pretty(&self) -> Result<String, CodecError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// An accepted import, reconciled over the defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedConfig {
    pub state: StyleState,
    pub version: String,
    pub timestamp: String,
    /// `None` when the file names no breakpoint or one this build does not know.
    pub breakpoint: Option<Breakpoint>,
}

/// Wraps `state` for export, stamped with the current UTC time.
pub fn export_config(state: &StyleState, breakpoint: Breakpoint) -> ExportedConfig {
    export_config_at(state, breakpoint, Utc::now())
}

/// [`export_config`] with an explicit timestamp.
pub fn export_config_at(
    state: &StyleState,
    breakpoint: Breakpoint,
    at: DateTime<Utc>,
) -> ExportedConfig {
    ExportedConfig {
        state: state.clone(),
        version: CONFIG_VERSION.to_string(),
        timestamp: at.to_rfc3339_opts(SecondsFormat::Millis, true),
        breakpoint,
    }
}

/// True if `payload` has a string `version`, a string `timestamp` and a
/// non-null object `state`.
///
/// The contents of `state` are not checked.
pub fn validate_import_config(payload: &Value) -> bool {
    payload.get("version").is_some_and(Value::is_string)
        && payload.get("timestamp").is_some_and(Value::is_string)
        && payload.get("state").is_some_and(Value::is_object)
}

/// Parses and validates an export file.
///
/// A file that fails the structural check is rejected. Inside a valid envelope,
/// `state` is merged over the defaults field by field: a value that does not
/// fit its field keeps the default, matching what a load of the same payload
/// would produce.
pub fn import_config(text: &str) -> Result<ImportedConfig, CodecError> {
    let mut payload: Value = serde_json::from_str(text)?;
    if !validate_import_config(&payload) {
        return Err(CodecError::InvalidEnvelope);
    }

    let breakpoint = payload
        .get("breakpoint")
        .and_then(Value::as_str)
        .and_then(|bp| bp.parse::<Breakpoint>().ok());
    let version = string_field(&payload, "version");
    let timestamp = string_field(&payload, "timestamp");
    let stored = payload
        .get_mut("state")
        .map(Value::take)
        .unwrap_or(Value::Null);

    let defaults = StyleState::default();
    let state = StyleState::merged_over(&defaults, stored).unwrap_or_else(|| {
        tracing::warn!("imported state does not decode, using defaults");
        defaults
    });

    Ok(ImportedConfig {
        state,
        version,
        timestamp,
        breakpoint,
    })
}

fn string_field(payload: &Value, name: &str) -> String {
    payload
        .get(name)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
