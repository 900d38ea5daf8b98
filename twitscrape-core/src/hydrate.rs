//! Hydration — fetch both facets for every active symbol and prune the
//! symbols that produced nothing.
//!
//! Symbols are processed strictly one after another, sentiment/volume
//! first, then posts. Every error from a fetch or parse is caught at the
//! facet boundary and stored as a failed facet; a hydration pass always
//! runs to completion. A symbol is invalid only when both facets failed.
//! Pruning happens once, after every symbol has been attempted.

use crate::domain::{Facet, FacetFailure, FacetKind, PostRecord, SentimentVolume, Symbol};
use crate::error::ScrapeError;
use crate::fetch::{PageFetcher, RawResponse};
use crate::parse::{parse_posts, parse_sentiment_volume};
use crate::store::SymbolStore;
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Progress callback for a hydration pass.
pub trait HydrationProgress {
    /// Called before a symbol's first facet is attempted.
    fn on_start(&self, symbol: &str, index: usize, total: usize);

    /// Called once per failed facet.
    fn on_facet_failed(&self, symbol: &str, facet: FacetKind, failure: &FacetFailure);

    /// Called after the pass, once invalid symbols have been removed.
    fn on_complete(&self, report: &HydrationReport);
}

/// Progress sink that reports through `tracing`.
pub struct TracingProgress;

impl HydrationProgress for TracingProgress {
    fn on_start(&self, symbol: &str, index: usize, total: usize) {
        debug!(symbol, "[{}/{}] hydrating", index + 1, total);
    }

    fn on_facet_failed(&self, symbol: &str, facet: FacetKind, failure: &FacetFailure) {
        warn!(symbol, facet = %facet, kind = %failure.kind, "error scraping {facet}: {}", failure.message);
    }

    fn on_complete(&self, report: &HydrationReport) {
        info!(
            attempted = report.attempted,
            survivors = report.survivors(),
            invalid = report.invalid.len(),
            "hydration complete"
        );
        for symbol in &report.invalid {
            info!(symbol = symbol.as_str(), "removed invalid symbol");
        }
    }
}

/// A failed facet attempt recorded in the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetError {
    pub symbol: Symbol,
    pub facet: FacetKind,
    pub failure: FacetFailure,
}

/// Summary of one hydration pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HydrationReport {
    /// Number of symbols attempted (the active list at pass start).
    pub attempted: usize,
    /// Every failed facet, in attempt order.
    pub failures: Vec<FacetError>,
    /// Symbols removed from the active list, in original order.
    pub invalid: Vec<Symbol>,
}

impl HydrationReport {
    pub fn survivors(&self) -> usize {
        self.attempted - self.invalid.len()
    }

    pub fn all_valid(&self) -> bool {
        self.invalid.is_empty()
    }
}

/// Drives a [`PageFetcher`] over a [`SymbolStore`].
pub struct Hydrator<F> {
    fetcher: F,
}

impl<F: PageFetcher> Hydrator<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    /// Hydrate `store`, logging through `tracing`.
    pub fn hydrate(&self, store: &mut SymbolStore) -> HydrationReport {
        self.hydrate_with_progress(store, &TracingProgress)
    }

    /// Hydrate `store`, reporting through `progress`.
    pub fn hydrate_with_progress(
        &self,
        store: &mut SymbolStore,
        progress: &dyn HydrationProgress,
    ) -> HydrationReport {
        // Snapshot: the active list must not change under us mid-pass.
        let symbols: Vec<Symbol> = store.symbols().to_vec();
        let total = symbols.len();
        let mut report = HydrationReport {
            attempted: total,
            ..HydrationReport::default()
        };
        let mut invalid = HashSet::new();

        for (i, symbol) in symbols.iter().enumerate() {
            progress.on_start(symbol, i, total);

            let sentiment = into_facet(self.pull_sentiment_volume(symbol));
            let posts = into_facet(self.pull_posts(symbol));

            for (kind, failure) in [
                (FacetKind::SentimentVolume, sentiment.failure()),
                (FacetKind::Posts, posts.failure()),
            ] {
                if let Some(failure) = failure {
                    progress.on_facet_failed(symbol, kind, failure);
                    report.failures.push(FacetError {
                        symbol: symbol.clone(),
                        facet: kind,
                        failure: failure.clone(),
                    });
                }
            }

            if sentiment.is_failed() && posts.is_failed() {
                invalid.insert(symbol.clone());
                report.invalid.push(symbol.clone());
            }

            store.record_sentiment_volume(symbol, sentiment);
            store.record_posts(symbol, posts);
        }

        store.retain_valid(&invalid);
        progress.on_complete(&report);
        report
    }

    fn pull_sentiment_volume(&self, symbol: &str) -> Result<SentimentVolume, ScrapeError> {
        let resp = self.fetcher.fetch_sentiment_page(symbol)?;
        let body = require_success(resp, symbol, FacetKind::SentimentVolume)?;
        parse_sentiment_volume(&body)
    }

    fn pull_posts(&self, symbol: &str) -> Result<Vec<PostRecord>, ScrapeError> {
        let resp = self.fetcher.fetch_posts_page(symbol)?;
        let body = require_success(resp, symbol, FacetKind::Posts)?;
        parse_posts(&body)
    }
}

/// Non-200 on the final attempt is a fetch failure; the body is discarded.
fn require_success(
    resp: RawResponse,
    symbol: &str,
    facet: FacetKind,
) -> Result<String, ScrapeError> {
    if resp.is_success() {
        Ok(resp.body)
    } else {
        Err(ScrapeError::Fetch {
            target: format!("{facet} page for {symbol}"),
            status: resp.status,
        })
    }
}

fn into_facet<T>(result: Result<T, ScrapeError>) -> Facet<T> {
    match result {
        Ok(value) => Facet::Fetched(value),
        Err(err) => Facet::Failed(err.into()),
    }
}
