//! HTTP transport for page and image fetches.
//!
//! This module wraps a pooled [`reqwest::Client`] behind the one capability
//! the pipeline needs: "fetch a URL and hand back final URL, status,
//! content type, and body bytes". Redirects are followed automatically and
//! the URL reported back is the post-redirect one, which the extractor
//! uses as the base for relative-reference resolution.
//!
//! # Features
//!
//! - Connection pooling (create one client, reuse for every fetch)
//! - Per-request timeout (hard upper bound per request, not cumulative)
//! - Gzip decompression
//! - Structured error types with full context

mod client;
mod constants;
mod error;

pub use client::{FetchClient, FetchedPage};
pub use constants::{CONNECT_TIMEOUT_SECS, MAX_TIMEOUT_SECS, MIN_TIMEOUT_SECS};
pub use error::FetchError;
