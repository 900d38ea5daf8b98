//! Fetcher for the social trading site's sentiment page and message stream.

use super::http::ReqwestClient;
use super::{HttpClient, PageFetcher, RawResponse};
use crate::config::{EndpointConfig, ScrapeConfig};
use crate::error::ScrapeError;
use tracing::debug;

pub struct StocktwitsFetcher<C> {
    client: C,
    endpoints: EndpointConfig,
}

impl<C: HttpClient> StocktwitsFetcher<C> {
    pub fn new(client: C, endpoints: EndpointConfig) -> Self {
        Self { client, endpoints }
    }

    fn get(&self, url: &str) -> Result<RawResponse, ScrapeError> {
        let resp = self.client.get(url)?;
        debug!(url, status = resp.status, "GET");
        Ok(resp)
    }
}

impl StocktwitsFetcher<ReqwestClient> {
    /// Build a fetcher backed by a real HTTP client.
    pub fn from_config(config: &ScrapeConfig) -> Result<Self, ScrapeError> {
        let client = ReqwestClient::new(&config.http)?;
        Ok(Self::new(client, config.endpoints.clone()))
    }
}

impl<C: HttpClient> PageFetcher for StocktwitsFetcher<C> {
    fn fetch_sentiment_page(&self, symbol: &str) -> Result<RawResponse, ScrapeError> {
        self.get(&self.endpoints.sentiment_url(symbol))
    }

    fn fetch_posts_page(&self, symbol: &str) -> Result<RawResponse, ScrapeError> {
        let primary = self.get(&self.endpoints.messages_primary(symbol))?;
        if primary.is_success() {
            return Ok(primary);
        }

        debug!(symbol, status = primary.status, "primary message stream failed, trying fallback");
        self.get(&self.endpoints.messages_fallback(symbol))
    }
}
