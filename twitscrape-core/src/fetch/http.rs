//! Blocking `reqwest` implementation of [`HttpClient`].

use super::{HttpClient, RawResponse};
use crate::config::HttpConfig;
use crate::error::ScrapeError;

pub struct ReqwestClient {
    client: reqwest::blocking::Client,
}

impl ReqwestClient {
    pub fn new(config: &HttpConfig) -> Result<Self, ScrapeError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| ScrapeError::Unknown(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

impl HttpClient for ReqwestClient {
    fn get(&self, url: &str) -> Result<RawResponse, ScrapeError> {
        let resp = self.client.get(url).send().map_err(|e| {
            if e.is_timeout() {
                ScrapeError::Network(format!("timed out requesting {url}"))
            } else if e.is_connect() {
                ScrapeError::Network(format!("connection failed for {url}: {e}"))
            } else {
                ScrapeError::Unknown(format!("request to {url} failed: {e}"))
            }
        })?;

        let status = resp.status().as_u16();
        let body = resp
            .text()
            .map_err(|e| ScrapeError::Network(format!("failed to read body from {url}: {e}")))?;

        Ok(RawResponse { status, body })
    }
}
