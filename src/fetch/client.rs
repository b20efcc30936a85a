//! HTTP client wrapper for page and image fetches.
//!
//! This module provides the `FetchClient` struct which performs buffered
//! GET requests with redirect following, per-request timeouts, and a
//! browser-style User-Agent.

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, ClientBuilder};
use tracing::{debug, instrument};
use url::Url;

use super::constants::CONNECT_TIMEOUT_SECS;
use super::error::FetchError;
use crate::user_agent::BROWSER_USER_AGENT;

/// HTTP client for buffered fetches with redirect following.
///
/// This client is designed to be created once per pipeline invocation and
/// reused for the page fetch and every image fetch, taking advantage of
/// connection pooling.
#[derive(Debug, Clone)]
pub struct FetchClient {
    client: Client,
}

/// A completed fetch: final URL after redirects, status, and buffered body.
#[derive(Debug)]
pub struct FetchedPage {
    /// Final URL after following redirects.
    pub final_url: Url,
    /// HTTP status code of the final response.
    pub status: u16,
    /// Content-Type header value, if present.
    pub content_type: Option<String>,
    /// Buffered response body.
    pub body: Vec<u8>,
}

impl FetchedPage {
    /// Body decoded as UTF-8 text (lossily), for HTML parsing.
    #[must_use]
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

impl FetchClient {
    /// Creates a fetch client with the given per-request timeout.
    ///
    /// Configuration: redirects followed (default policy), gzip
    /// decompression, 10 second connect timeout, browser User-Agent.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidUrl`] if the underlying client cannot
    /// be built; this does not happen with the static configuration used
    /// here, but the constructor propagates rather than panics.
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = ClientBuilder::new()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(timeout)
            .gzip(true)
            .user_agent(BROWSER_USER_AGENT)
            .build()
            .map_err(|e| FetchError::Network {
                url: String::new(),
                source: e,
            })?;
        Ok(Self { client })
    }

    /// Performs a GET request and buffers the full response body.
    ///
    /// Redirects are followed; `final_url` in the result is the URL of the
    /// last response in the chain. A non-2xx status is returned as
    /// [`FetchError::HttpStatus`] - callers decide whether that is fatal
    /// (page fetch) or a per-item skip (image fetch).
    ///
    /// # Errors
    ///
    /// - [`FetchError::InvalidUrl`] for unparseable or non-HTTP(S) URLs
    /// - [`FetchError::Timeout`] when the per-request timeout elapses
    /// - [`FetchError::Network`] for transport failures
    /// - [`FetchError::HttpStatus`] for non-2xx responses
    #[instrument(level = "debug", skip(self))]
    pub async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        let parsed = Url::parse(url).map_err(|_| FetchError::invalid_url(url))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(FetchError::invalid_url(url));
        }

        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))?;

        let final_url = response.url().clone();
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::http_status(url, status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_ascii_lowercase());

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))?
            .to_vec();

        debug!(
            url,
            final_url = %final_url,
            status = status.as_u16(),
            bytes = body.len(),
            "fetch completed"
        );

        Ok(FetchedPage {
            final_url,
            status: status.as_u16(),
            content_type,
            body,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_rejects_non_http_scheme() {
        let client = FetchClient::new(Duration::from_secs(5)).unwrap();
        let err = tokio_block(client.fetch("ftp://example.com/a.png")).unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl { .. }));
    }

    #[test]
    fn test_fetch_rejects_malformed_url() {
        let client = FetchClient::new(Duration::from_secs(5)).unwrap();
        let err = tokio_block(client.fetch("not a url")).unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl { .. }));
    }

    fn tokio_block<F: std::future::Future>(fut: F) -> F::Output {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap()
            .block_on(fut)
    }
}
