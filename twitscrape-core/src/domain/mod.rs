//! Domain types for per-symbol sentiment, volume and post data.

pub mod facet;
pub mod post;
pub mod sentiment;

pub use facet::{Facet, FacetFailure, FacetKind, FailureKind};
pub use post::PostRecord;
pub use sentiment::SentimentVolume;

/// Symbol type alias
pub type Symbol = String;
