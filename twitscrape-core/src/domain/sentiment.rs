use serde::{Deserialize, Serialize};

/// Sentiment and volume change for a symbol, as the site reports them.
///
/// Both values are kept in their string-encoded form (e.g. `"12.34"`); the
/// site is not consistent about emitting numbers vs. strings, and nothing
/// downstream does arithmetic on them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentVolume {
    /// Sentiment change, in percent.
    pub sentiment: String,
    /// Message volume change, in percent.
    pub volume: String,
}

impl SentimentVolume {
    pub fn new(sentiment: impl Into<String>, volume: impl Into<String>) -> Self {
        Self {
            sentiment: sentiment.into(),
            volume: volume.into(),
        }
    }

    /// Sentinel returned by accessors when nothing is stored.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.sentiment.is_empty() && self.volume.is_empty()
    }
}
