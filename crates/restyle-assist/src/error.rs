//! Error types for the assist path.

use thiserror::Error;

/// A failed or abandoned assist request. None of these change the style state.
#[derive(Debug, Error)]
pub enum AssistError {
    /// The relay rejected the credentials (401 or 403).
    #[error("assist request was not authorized (status {status}); check RESTYLE_API_KEY")]
    Unauthorized { status: u16 },

    /// The relay is throttling requests (429).
    #[error("assist rate limit reached; try again shortly")]
    RateLimited,

    /// Any other non-success status.
    #[error("assist relay returned status {status}: {body}")]
    Http { status: u16, body: String },

    /// The relay could not be reached or the stream broke off.
    #[error("assist network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The caller aborted the request.
    #[error("assist request cancelled")]
    Cancelled,
}

impl AssistError {
    /// Maps a non-success response status to its error.
    pub fn from_status(status: u16, body: impl Into<String>) -> Self {
        match status {
            401 | 403 => Self::Unauthorized { status },
            429 => Self::RateLimited,
            _ => Self::Http {
                status,
                body: body.into(),
            },
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
