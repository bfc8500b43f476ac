//! Error types for sl-render

use sl_core::CoreError;
use thiserror::Error;

/// Rendering service and submission errors
#[derive(Error, Debug)]
pub enum RenderError {
    /// R001: The service rejected the request
    #[error("[R001] Rendering service error ({code}): {message}")]
    Service { code: String, message: String },

    /// R002: The single submission attempt did not finish in time
    #[error("[R002] Rendering service did not respond within {seconds}s")]
    Timeout { seconds: u64 },

    /// R003: Connection or protocol failure
    #[error("[R003] Rendering service transport error: {0}")]
    Transport(String),

    /// R004: The service answered with a body we could not read
    #[error("[R004] Unexpected rendering service response: {0}")]
    InvalidResponse(String),

    /// R005: Audit artifact could not be written
    #[error("[R005] Failed to write audit record '{path}': {source}")]
    Audit {
        path: String,
        source: std::io::Error,
    },

    /// Builder validation or precondition failure
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl RenderError {
    /// The service's own message, unmodified, for service rejections
    pub fn service_message(&self) -> Option<&str> {
        match self {
            RenderError::Service { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Returns true for builder precondition failures (nothing was submitted)
    pub fn is_precondition(&self) -> bool {
        matches!(self, RenderError::Core(e) if e.is_precondition())
    }
}

impl From<reqwest::Error> for RenderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            RenderError::InvalidResponse(err.to_string())
        } else {
            RenderError::Transport(err.to_string())
        }
    }
}

/// Result type alias for RenderError
pub type RenderResult<T> = Result<T, RenderError>;

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
