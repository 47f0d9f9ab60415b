//! Client error types.

use thiserror::Error;

/// Errors that can occur when talking to the Disco API.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP transport error (connection refused, timeout, ...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status code.
    #[error("API error ({status}): {message}")]
    Upstream {
        /// HTTP status code returned by the API.
        status: u16,
        /// `error.message` from the body, or the raw body if it was not JSON.
        message: String,
    },

    /// A success response whose body did not match the expected type.
    #[error("decode error: {0}")]
    Decode(String),
}

impl ClientError {
    /// Upstream HTTP status, if the API answered at all.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Upstream { status: 404, .. })
    }
}
