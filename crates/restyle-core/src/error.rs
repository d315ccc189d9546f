//! Error types for state construction and patching.

use thiserror::Error;

/// Error returned when a gradient definition is structurally invalid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GradientError {
    /// A gradient needs at least two stops to be rendered.
    #[error("gradient requires at least 2 stops, got {0}")]
    TooFewStops(usize),
}

/// Error returned when a path-addressed update cannot be applied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatchError {
    /// The path does not name a field of the state schema.
    #[error("unknown style field '{0}'")]
    UnknownPath(String),

    /// The value does not decode into the field's type.
    #[error("invalid value for '{path}': {message}")]
    InvalidValue { path: String, message: String },
}

impl PatchError {
    pub(crate) fn invalid(path: impl Into<String>, message: impl ToString) -> Self {
        Self::InvalidValue {
            path: path.into(),
            message: message.to_string(),
        }
    }
}
