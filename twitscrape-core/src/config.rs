//! Scraper configuration — endpoint templates and HTTP client settings.
//!
//! Stored as TOML. Every field has a default, so an empty file (or no file
//! at all) yields the public site endpoints.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_SENTIMENT_URL: &str = "https://stocktwits.com/symbol";
pub const DEFAULT_MESSAGES_PRIMARY_URL: &str = "https://api.stocktwits.com/api/2/streams/symbol";
pub const DEFAULT_MESSAGES_FALLBACK_URL: &str =
    "https://api.stocktwits.com/api/2/streams/symbol/ric";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config file {path}: {reason}")]
    Read { path: String, reason: String },

    #[error("parse config TOML: {0}")]
    Parse(String),

    #[error("serialize config: {0}")]
    Serialize(String),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrapeConfig {
    pub endpoints: EndpointConfig,
    pub http: HttpConfig,
}

/// Base URLs the fetcher builds request URLs from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    /// HTML page with the embedded sentiment fragment: `{base}/{symbol}`.
    pub sentiment_base_url: String,
    /// Message stream, tried first: `{base}/{symbol}.json`.
    pub messages_primary_url: String,
    /// Message stream, tried once when the primary is not 200.
    pub messages_fallback_url: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            sentiment_base_url: DEFAULT_SENTIMENT_URL.into(),
            messages_primary_url: DEFAULT_MESSAGES_PRIMARY_URL.into(),
            messages_fallback_url: DEFAULT_MESSAGES_FALLBACK_URL.into(),
        }
    }
}

impl EndpointConfig {
    /// Point all three endpoints at one base (useful for local test servers).
    pub fn with_base(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            sentiment_base_url: format!("{base}/symbol"),
            messages_primary_url: format!("{base}/api/2/streams/symbol"),
            messages_fallback_url: format!("{base}/api/2/streams/symbol/ric"),
        }
    }

    pub fn sentiment_url(&self, symbol: &str) -> String {
        format!("{}/{symbol}", self.sentiment_base_url.trim_end_matches('/'))
    }

    pub fn messages_primary(&self, symbol: &str) -> String {
        format!("{}/{symbol}.json", self.messages_primary_url.trim_end_matches('/'))
    }

    pub fn messages_fallback(&self, symbol: &str) -> String {
        format!("{}/{symbol}.json", self.messages_fallback_url.trim_end_matches('/'))
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Per-request timeout. Keeps a stalled endpoint from hanging the run.
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".into(),
        }
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl ScrapeConfig {
    /// Load a configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate a configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let urls = [
            ("endpoints.sentiment_base_url", &self.endpoints.sentiment_base_url),
            ("endpoints.messages_primary_url", &self.endpoints.messages_primary_url),
            ("endpoints.messages_fallback_url", &self.endpoints.messages_fallback_url),
        ];
        for (field, url) in urls {
            if url.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("{field} must not be empty")));
            }
        }
        if self.http.timeout_secs == 0 {
            return Err(ConfigError::Invalid("http.timeout_secs must be positive".into()));
        }
        Ok(())
    }
}
