//! Response parsing for the sentiment page and the message stream.
//!
//! The sentiment page is HTML with a JSON fragment embedded in a script
//! tag. We do not parse the HTML; we locate the fragment by its field
//! sequence `"sentimentChange":…,"volumeChange":…,"lastUpdated` and take
//! the two values verbatim. A layout change on the site shows up as a
//! parse error, not a panic.
//!
//! The message stream is parsed per element: one malformed message is
//! skipped rather than failing the whole facet.

use crate::domain::{PostRecord, SentimentVolume};
use crate::error::ScrapeError;
use regex::Regex;
use serde::{Deserialize, Deserializer};
use std::sync::LazyLock;
use tracing::debug;

// Each value must stay inside its own field: no commas, no inner quotes.
static SENTIMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#""sentimentChange":\s*("?[^,"]*"?)\s*,\s*"volumeChange":\s*("?[^,"]*"?)\s*,\s*"lastUpdated"#,
    )
    .expect("sentiment pattern is valid")
});

/// Message stream response. Only `messages` is read; elements are decoded
/// one at a time.
#[derive(Debug, Deserialize)]
struct StreamResponse {
    messages: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct Message {
    body: String,
    #[serde(default)]
    likes: Option<Likes>,
    user: User,
}

#[derive(Debug, Deserialize)]
struct Likes {
    #[serde(default, deserialize_with = "lenient_count")]
    total: u64,
}

#[derive(Debug, Deserialize)]
struct User {
    username: String,
}

/// Like counts that are missing, null, negative or fractional read as 0.
fn lenient_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_u64().unwrap_or(0))
}

impl From<Message> for PostRecord {
    fn from(msg: Message) -> Self {
        let like_count = msg.likes.map(|l| l.total).unwrap_or(0);
        PostRecord {
            body: msg.body,
            like_count,
            author_username: msg.user.username,
        }
    }
}

/// Extract sentiment and volume change from the sentiment page HTML.
pub fn parse_sentiment_volume(body: &str) -> Result<SentimentVolume, ScrapeError> {
    let caps = SENTIMENT_RE
        .captures(body)
        .ok_or_else(|| ScrapeError::Parse("sentiment/volume fragment not found".into()))?;
    Ok(SentimentVolume::new(
        clean_value(&caps[1]),
        clean_value(&caps[2]),
    ))
}

fn clean_value(raw: &str) -> &str {
    let v = raw.trim();
    v.strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(v)
}

/// Parse the message stream JSON into post records.
///
/// A missing or malformed `messages` array fails the whole body. Elements
/// without a `body` or `user.username` are dropped.
pub fn parse_posts(body: &str) -> Result<Vec<PostRecord>, ScrapeError> {
    let resp: StreamResponse = serde_json::from_str(body)?;
    let posts = resp
        .messages
        .into_iter()
        .enumerate()
        .filter_map(|(i, raw)| match serde_json::from_value::<Message>(raw) {
            Ok(msg) => Some(PostRecord::from(msg)),
            Err(e) => {
                debug!(index = i, error = %e, "skipping malformed message");
                None
            }
        })
        .collect();
    Ok(posts)
}
