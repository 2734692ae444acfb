//! The fetch capability consumed by the crawl loop
//!
//! The crawler core never talks to the network directly: it consumes a
//! [`Fetcher`], which resolves a URL to the final post-redirect URL plus raw
//! markup, or a failure. [`HttpFetcher`] is the production implementation
//! over reqwest; tests substitute an in-memory fetcher.

use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

/// A successfully fetched HTML page
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Final URL after following redirects
    pub final_url: String,
    /// Raw page markup
    pub body: String,
}

/// Why a fetch failed. Every variant marks the URL known-bad; none is
/// retried in this design.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,

    #[error("network error: {0}")]
    Network(String),

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("not an HTML page (content-type: {0})")]
    NotHtml(String),
}

/// External capability that resolves a URL to its final URL and raw markup.
#[allow(async_fn_in_trait)]
pub trait Fetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError>;
}

/// Builds the HTTP client used by [`HttpFetcher`].
///
/// Redirects are followed by reqwest (up to its default hop limit), so the
/// response URL is already the final URL the crawler re-normalizes.
pub fn build_http_client(user_agent: &str) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.to_string())
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Production fetcher over reqwest
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(user_agent)?,
        })
    }
}

impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout
            } else {
                FetchError::Network(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        if !content_type.contains("text/html") {
            return Err(FetchError::NotHtml(content_type));
        }

        let final_url = response.url().to_string();
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        Ok(FetchedPage { final_url, body })
    }
}
