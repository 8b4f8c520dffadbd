//! LLM error types

use thiserror::Error;

/// Errors that can occur during a completion round-trip
///
/// Any of these aborts the whole loop invocation: there is no retry at
/// this layer, and no partial transcript is returned.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Malformed response: {0}")]
    InvalidResponse(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LlmError {
    /// The HTTP status, when the endpoint answered with one
    pub fn status(&self) -> Option<u16> {
        match self {
            LlmError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Check if this is a transport-level failure (network, timeout)
    pub fn is_transport(&self) -> bool {
        matches!(self, LlmError::Network(_))
    }
}
