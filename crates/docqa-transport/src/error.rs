//! Transport error types.

use docqa_core::ActionError;
use thiserror::Error;

/// Failure of a single backend call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// No response was obtained (DNS, connect, TLS, timeout).
    #[error("request failed: {0}")]
    Network(String),

    /// The backend answered with a non-success status.
    #[error("API error ({status}): {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// The response body did not match the expected shape.
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl TransportError {
    /// Convert into the slice-level error value.
    ///
    /// A status error keeps the server payload; `fallback` is the operation's
    /// generic marker used when the payload carries no message.
    #[must_use]
    pub fn into_action_error(self, fallback: &str) -> ActionError {
        match self {
            Self::Status { status, body } => ActionError::from_response(status, &body, fallback),
            Self::Network(message) | Self::Decode(message) => ActionError::transport(message),
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            Self::Decode(error.to_string())
        } else {
            Self::Network(error.to_string())
        }
    }
}
