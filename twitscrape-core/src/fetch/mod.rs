//! Remote fetching.
//!
//! Two seams: [`HttpClient`] is a single GET against a full URL, and
//! [`PageFetcher`] is "give me the page for this symbol" including any
//! endpoint fallback. The hydrator only sees `PageFetcher`, so tests can
//! mock at either level.

pub mod http;
pub mod stocktwits;

pub use http::ReqwestClient;
pub use stocktwits::StocktwitsFetcher;

use crate::error::ScrapeError;

/// Raw body and status code of one HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Only 200 counts as success; other 2xx codes do not carry a usable body.
    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}

/// A single blocking HTTP GET.
///
/// Non-success statuses are returned as `Ok`; `Err` is reserved for
/// transport-level failures (connect, timeout, unreadable body).
pub trait HttpClient: Send + Sync {
    fn get(&self, url: &str) -> Result<RawResponse, ScrapeError>;
}

/// Per-symbol page retrieval.
pub trait PageFetcher: Send + Sync {
    /// Fetch the HTML page carrying the sentiment/volume fragment.
    fn fetch_sentiment_page(&self, symbol: &str) -> Result<RawResponse, ScrapeError>;

    /// Fetch the message stream JSON. Implementations may try a fallback
    /// endpoint; the returned response is the last one attempted.
    fn fetch_posts_page(&self, symbol: &str) -> Result<RawResponse, ScrapeError>;
}

impl<T: HttpClient + ?Sized> HttpClient for &T {
    fn get(&self, url: &str) -> Result<RawResponse, ScrapeError> {
        (**self).get(url)
    }
}

impl<T: PageFetcher + ?Sized> PageFetcher for &T {
    fn fetch_sentiment_page(&self, symbol: &str) -> Result<RawResponse, ScrapeError> {
        (**self).fetch_sentiment_page(symbol)
    }

    fn fetch_posts_page(&self, symbol: &str) -> Result<RawResponse, ScrapeError> {
        (**self).fetch_posts_page(symbol)
    }
}
