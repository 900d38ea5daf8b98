//! twitscrape core — symbol store, page fetcher, response parser, hydrator.
//!
//! Given a list of ticker symbols, the hydrator fetches two independent
//! facets per symbol from a social trading site:
//! - sentiment and volume change, scraped from the symbol's HTML page
//! - recent posts, from the message stream JSON (with one fallback endpoint)
//!
//! Results land in a [`SymbolStore`]. Symbols for which both facets failed
//! are treated as invalid (typo, delisted) and pruned after the pass.

pub mod config;
pub mod domain;
pub mod error;
pub mod fetch;
pub mod hydrate;
pub mod parse;
pub mod present;
pub mod store;

pub use config::{ConfigError, EndpointConfig, HttpConfig, ScrapeConfig};
pub use domain::{Facet, FacetFailure, FacetKind, FailureKind, PostRecord, SentimentVolume, Symbol};
pub use error::ScrapeError;
pub use fetch::{HttpClient, PageFetcher, RawResponse, ReqwestClient, StocktwitsFetcher};
pub use hydrate::{FacetError, HydrationProgress, HydrationReport, Hydrator, TracingProgress};
pub use store::SymbolStore;
