//! Rendering of stored data for human (text) or machine (JSON) consumption.
//!
//! Only reads the store. Symbols render in active-list order; facets that
//! were not fetched are skipped rather than printed as blanks.

use crate::domain::{FacetFailure, PostRecord, SentimentVolume, Symbol};
use crate::store::SymbolStore;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::{self, Write};

const RULE: &str = "----------------------";
const POST_RULE: &str = "=================================";

/// Print the sentiment/volume block for `symbol`. Writes nothing when the
/// facet was not fetched.
pub fn render_sentiment_volume<W: Write>(
    store: &SymbolStore,
    symbol: &str,
    out: &mut W,
) -> io::Result<()> {
    let Some(sv) = store.sentiment_facet(symbol).value() else {
        return Ok(());
    };
    writeln!(out, "{RULE}")?;
    writeln!(out, "{symbol} Sentiment Change: {}%", sv.sentiment)?;
    writeln!(out, "{symbol} Volume Change: {}%", sv.volume)?;
    writeln!(out, "{RULE}")?;
    Ok(())
}

/// Print every stored post for `symbol`. Writes nothing when the facet was
/// not fetched.
pub fn render_posts<W: Write>(store: &SymbolStore, symbol: &str, out: &mut W) -> io::Result<()> {
    let Some(posts) = store.posts_facet(symbol).value() else {
        return Ok(());
    };
    writeln!(out, "{RULE}")?;
    writeln!(out, "Posts for {symbol}:")?;
    writeln!(out, "{RULE}")?;
    if posts.is_empty() {
        writeln!(out, "(no posts)")?;
    }
    for post in posts {
        writeln!(out, "Message: {}", post.body)?;
        writeln!(out, "Likes: {}", post.like_count)?;
        writeln!(out, "Author: {}", post.author_username)?;
        writeln!(out, "{POST_RULE}")?;
    }
    Ok(())
}

/// Both blocks for every active symbol.
pub fn render_all<W: Write>(store: &SymbolStore, out: &mut W) -> io::Result<()> {
    for symbol in store.symbols() {
        render_sentiment_volume(store, symbol, out)?;
        render_posts(store, symbol, out)?;
    }
    Ok(())
}

/// Serializable view of the store.
#[derive(Debug, Serialize)]
pub struct StoreSnapshot<'a> {
    pub generated_at: DateTime<Utc>,
    pub symbols: Vec<SymbolSnapshot<'a>>,
}

#[derive(Debug, Serialize)]
pub struct SymbolSnapshot<'a> {
    pub symbol: &'a Symbol,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentiment_volume: Option<&'a SentimentVolume>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub posts: Option<&'a [PostRecord]>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<&'a FacetFailure>,
}

impl<'a> StoreSnapshot<'a> {
    pub fn capture(store: &'a SymbolStore) -> Self {
        let symbols = store
            .symbols()
            .iter()
            .map(|symbol| {
                let sentiment = store.sentiment_facet(symbol);
                let posts = store.posts_facet(symbol);
                SymbolSnapshot {
                    symbol,
                    sentiment_volume: sentiment.value(),
                    posts: posts.value().map(Vec::as_slice),
                    errors: [sentiment.failure(), posts.failure()]
                        .into_iter()
                        .flatten()
                        .collect(),
                }
            })
            .collect();
        Self {
            generated_at: Utc::now(),
            symbols,
        }
    }
}

/// Pretty-printed JSON snapshot of every active symbol.
pub fn render_json<W: Write>(store: &SymbolStore, out: &mut W) -> io::Result<()> {
    let snapshot = StoreSnapshot::capture(store);
    serde_json::to_writer_pretty(&mut *out, &snapshot)?;
    writeln!(out)
}
