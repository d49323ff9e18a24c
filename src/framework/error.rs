//! # Controller Errors
//!
//! Two layers of errors flow through a list controller:
//!
//! - [`SourceError`]: a remote query failed (the "network error" class). These never
//!   escape the controller; they become a cache fallback or a [`LoadError`] on the view.
//! - [`ListError`]: returned to callers of [`ListQueryClient`](crate::framework::ListQueryClient)
//!   when an input is rejected or the controller task is gone.

use thiserror::Error;

/// Failures reported by a [`RemoteSource`](crate::sources::RemoteSource).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SourceError {
    /// The request never produced a response (DNS, connect, reset...).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The backend answered with a non-2xx status.
    #[error("Backend returned HTTP {0}")]
    Status(u16),

    /// The response body did not have the expected shape.
    #[error("Malformed response: {0}")]
    Decode(String),

    /// The per-call timeout elapsed.
    #[error("Request timed out after {0} ms")]
    Timeout(u64),

    /// The fetch task ended without reporting a result (panic or runtime shutdown).
    #[error("Fetch aborted before completion")]
    Aborted,
}

impl From<reqwest::Error> for SourceError {
    fn from(e: reqwest::Error) -> Self {
        if let Some(status) = e.status() {
            SourceError::Status(status.as_u16())
        } else if e.is_decode() {
            SourceError::Decode(e.to_string())
        } else {
            SourceError::Transport(e.to_string())
        }
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(e: serde_json::Error) -> Self {
        SourceError::Decode(e.to_string())
    }
}

/// Errors returned to callers of the controller handle.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ListError {
    /// A local input was rejected (unknown filter, page 0, bad date...).
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Controller closed")]
    ActorClosed,

    #[error("Controller dropped response channel")]
    ActorDropped,
}

/// The displayable failure carried by a [`ViewModel`](crate::query::ViewModel)
/// when a fetch failed and no cache was available.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadError {
    pub message: String,
    pub source: SourceError,
}

impl LoadError {
    pub fn new(view: &str, source: SourceError) -> Self {
        Self {
            message: format!("Failed to load {view}"),
            source,
        }
    }
}
