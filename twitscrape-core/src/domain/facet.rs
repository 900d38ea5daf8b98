//! Per-symbol facet state.
//!
//! Each symbol carries two independent facets (sentiment/volume and posts).
//! A facet is in exactly one of three states: never attempted, fetched
//! (possibly with an empty value), or failed with a classified reason.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which of the two per-symbol data dimensions a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FacetKind {
    SentimentVolume,
    Posts,
}

impl fmt::Display for FacetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FacetKind::SentimentVolume => write!(f, "sentiment/volume"),
            FacetKind::Posts => write!(f, "posts"),
        }
    }
}

/// Classification of a failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Non-success HTTP status on the final attempt.
    Fetch,
    /// Body did not have the expected structure.
    Parse,
    /// Anything else: transport errors, timeouts, unreadable bodies.
    Unknown,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Fetch => write!(f, "fetch error"),
            FailureKind::Parse => write!(f, "parse error"),
            FailureKind::Unknown => write!(f, "unknown error"),
        }
    }
}

/// A failed facet attempt: what kind of failure, and the diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl FacetFailure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for FacetFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

/// Tri-state for one facet of one symbol.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum Facet<T> {
    #[default]
    NotFetched,
    Fetched(T),
    Failed(FacetFailure),
}

impl<T> Facet<T> {
    pub fn is_fetched(&self) -> bool {
        matches!(self, Facet::Fetched(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Facet::Failed(_))
    }

    /// The fetched value, if any.
    pub fn value(&self) -> Option<&T> {
        match self {
            Facet::Fetched(v) => Some(v),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&FacetFailure> {
        match self {
            Facet::Failed(f) => Some(f),
            _ => None,
        }
    }
}
