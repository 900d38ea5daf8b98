//! Structured error types for fetch and parse operations.
//!
//! None of these escape a hydration run: the hydrator converts each one into
//! a failed facet. They are public so fetchers and parsers can be used and
//! tested on their own.

use crate::domain::{FacetFailure, FailureKind};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("HTTP {status} for {target}")]
    Fetch { target: String, status: u16 },

    #[error("response format changed: {0}")]
    Parse(String),

    #[error("network unreachable: {0}")]
    Network(String),

    #[error("unexpected error: {0}")]
    Unknown(String),
}

impl ScrapeError {
    /// How this error is classified on a failed facet.
    pub fn kind(&self) -> FailureKind {
        match self {
            ScrapeError::Fetch { .. } => FailureKind::Fetch,
            ScrapeError::Parse(_) => FailureKind::Parse,
            ScrapeError::Network(_) | ScrapeError::Unknown(_) => FailureKind::Unknown,
        }
    }
}

impl From<ScrapeError> for FacetFailure {
    fn from(err: ScrapeError) -> Self {
        FacetFailure::new(err.kind(), err.to_string())
    }
}

impl From<serde_json::Error> for ScrapeError {
    fn from(err: serde_json::Error) -> Self {
        ScrapeError::Parse(format!("invalid JSON: {err}"))
    }
}
