//! Error taxonomy for the prediction pipeline
//!
//! Primary persistence failures are hard errors; status sync and audit
//! events are best-effort and never surface here. That asymmetry keeps
//! the prediction record authoritative.

use thiserror::Error;

/// Failure talking to the backing data store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage read failed: {0}")]
    Read(String),

    #[error("storage write failed: {0}")]
    Write(String),

    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
}

/// Failure of a prediction run
#[derive(Debug, Error)]
pub enum PredictionError {
    /// Equipment code did not resolve; no side effects were applied.
    /// The message is the caller-facing error string.
    #[error("Equipment {0} not found")]
    NotFound(String),

    /// Equipment lookup failed before evaluation could run
    #[error("failed to load equipment: {0}")]
    Lookup(#[source] StoreError),

    /// The prediction was computed but could not be saved. Callers
    /// must not assume a retry is safe without a dedupe key.
    #[error("failed to persist prediction: {0}")]
    Persistence(#[source] StoreError),
}

impl PredictionError {
    /// True for failures that map to the caller-facing `{ "error" }` shape
    /// rather than a transport-level hard error
    pub fn is_domain_error(&self) -> bool {
        matches!(self, PredictionError::NotFound(_))
    }
}
