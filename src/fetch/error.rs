//! Error types for the fetch module.
//!
//! These errors carry the failing URL so skip records and fatal page
//! errors can be reported with full context.

use thiserror::Error;

/// Errors that can occur while fetching a URL.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network-level error (DNS resolution, connection refused, TLS errors, etc.)
    #[error("network error fetching {url}: {source}")]
    Network {
        /// The URL that failed to fetch.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// Request timed out before completion.
    #[error("timeout fetching {url}")]
    Timeout {
        /// The URL that timed out.
        url: String,
    },

    /// HTTP error response (anything outside 200-299).
    #[error("HTTP {status} fetching {url}")]
    HttpStatus {
        /// The URL that returned an error status.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// The provided URL is malformed or uses an unsupported scheme.
    #[error("invalid URL: {url}")]
    InvalidUrl {
        /// The invalid URL string.
        url: String,
    },
}

impl FetchError {
    /// Creates a network error from a reqwest error, classifying timeouts.
    pub fn from_reqwest(url: impl Into<String>, source: reqwest::Error) -> Self {
        let url = url.into();
        if source.is_timeout() {
            Self::Timeout { url }
        } else {
            Self::Network { url, source }
        }
    }

    /// Creates an HTTP status error.
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// Creates an invalid URL error.
    pub fn invalid_url(url: impl Into<String>) -> Self {
        Self::InvalidUrl { url: url.into() }
    }

    /// Short reason text used for per-image skip records.
    #[must_use]
    pub fn skip_reason(&self) -> String {
        match self {
            Self::Network { source, .. } => format!("network error: {source}"),
            Self::Timeout { .. } => "timeout".to_string(),
            Self::HttpStatus { status, .. } => format!("http status {status}"),
            Self::InvalidUrl { .. } => "invalid url".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_error_display_includes_url_and_code() {
        let err = FetchError::http_status("https://example.com/a.png", 404);
        assert_eq!(err.to_string(), "HTTP 404 fetching https://example.com/a.png");
    }

    #[test]
    fn test_skip_reason_for_http_status() {
        let err = FetchError::http_status("https://example.com/a.png", 503);
        assert_eq!(err.skip_reason(), "http status 503");
    }

    #[test]
    fn test_skip_reason_for_timeout() {
        let err = FetchError::Timeout {
            url: "https://example.com/slow.png".to_string(),
        };
        assert_eq!(err.skip_reason(), "timeout");
    }
}
