//! Symbol store — the active symbol list and per-symbol facet data.
//!
//! The store is the sole owner of scraped data. Accessors never fail:
//! anything not stored (or stored for a symbol that is no longer active)
//! comes back as an empty sentinel.

use crate::domain::{Facet, PostRecord, SentimentVolume, Symbol};
use crate::fetch::PageFetcher;
use crate::hydrate::Hydrator;
use std::collections::{HashMap, HashSet};

static UNFETCHED_SENTIMENT: Facet<SentimentVolume> = Facet::NotFetched;
static UNFETCHED_POSTS: Facet<Vec<PostRecord>> = Facet::NotFetched;

#[derive(Debug, Clone, Default)]
pub struct SymbolStore {
    symbols: Vec<Symbol>,
    sentiment: HashMap<Symbol, Facet<SentimentVolume>>,
    posts: HashMap<Symbol, Facet<Vec<PostRecord>>>,
}

impl SymbolStore {
    /// Create a store over `symbols`. Duplicates are dropped, keeping the
    /// first occurrence so caller order is preserved.
    pub fn new<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Symbol>,
    {
        let mut store = Self::default();
        for symbol in symbols {
            store.add_symbol(symbol);
        }
        store
    }

    /// Create a store and run one hydration pass over it.
    pub fn hydrated<I, S, F>(symbols: I, hydrator: &Hydrator<F>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Symbol>,
        F: PageFetcher,
    {
        let mut store = Self::new(symbols);
        hydrator.hydrate(&mut store);
        store
    }

    /// Active symbols, in insertion order. May shrink across a hydration pass.
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.symbols.iter().any(|s| s == symbol)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Append `symbol` unless it is already active.
    pub fn add_symbol(&mut self, symbol: impl Into<Symbol>) {
        let symbol = symbol.into();
        if !self.contains(&symbol) {
            self.symbols.push(symbol);
        }
    }

    /// Stored sentiment/volume, or [`SentimentVolume::empty`].
    pub fn get_sentiment_volume(&self, symbol: &str) -> SentimentVolume {
        self.sentiment_facet(symbol)
            .value()
            .cloned()
            .unwrap_or_else(SentimentVolume::empty)
    }

    /// Stored posts, or an empty slice.
    pub fn get_posts(&self, symbol: &str) -> &[PostRecord] {
        self.posts_facet(symbol)
            .value()
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Raw sentiment/volume state for an active symbol.
    pub fn sentiment_facet(&self, symbol: &str) -> &Facet<SentimentVolume> {
        self.active_entry(&self.sentiment, symbol)
            .unwrap_or(&UNFETCHED_SENTIMENT)
    }

    /// Raw posts state for an active symbol.
    pub fn posts_facet(&self, symbol: &str) -> &Facet<Vec<PostRecord>> {
        self.active_entry(&self.posts, symbol)
            .unwrap_or(&UNFETCHED_POSTS)
    }

    fn active_entry<'a, T>(
        &self,
        map: &'a HashMap<Symbol, Facet<T>>,
        symbol: &str,
    ) -> Option<&'a Facet<T>> {
        if self.contains(symbol) {
            map.get(symbol)
        } else {
            None
        }
    }

    pub(crate) fn record_sentiment_volume(&mut self, symbol: &str, facet: Facet<SentimentVolume>) {
        self.sentiment.insert(symbol.to_string(), facet);
    }

    pub(crate) fn record_posts(&mut self, symbol: &str, facet: Facet<Vec<PostRecord>>) {
        self.posts.insert(symbol.to_string(), facet);
    }

    /// Drop every symbol in `invalid` from the active list and clear its
    /// data. Survivors keep their relative order.
    pub(crate) fn retain_valid(&mut self, invalid: &HashSet<Symbol>) {
        if invalid.is_empty() {
            return;
        }
        self.symbols.retain(|s| !invalid.contains(s));
        self.sentiment.retain(|s, _| !invalid.contains(s));
        self.posts.retain(|s, _| !invalid.contains(s));
    }
}
