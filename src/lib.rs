//! Imgzip Core Library
//!
//! This library provides the core functionality for the imgzip tool,
//! which fetches a single web page, discovers every embedded image
//! reference, downloads each image, and packages the successful
//! downloads into one ZIP archive.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`fetch`] - HTTP transport (page and image fetches)
//! - [`extract`] - Image URL extraction from HTML, srcset selection
//! - [`archive`] - Entry-name sanitization and ZIP assembly
//! - [`pipeline`] - Fetch-and-package orchestration

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod archive;
pub mod extract;
pub mod fetch;
pub mod pipeline;
pub(crate) mod user_agent;

// Re-export commonly used types
pub use archive::{NameRegistry, sanitize};
pub use extract::{extract_image_urls, select_best_from_srcset};
pub use fetch::{FetchClient, FetchError, FetchedPage};
pub use pipeline::{
    DEFAULT_CONCURRENCY, DEFAULT_MAX_IMAGES, DEFAULT_TIMEOUT_SECS, DownloadedImage,
    PackagedResult, PipelineConfig, PipelineError, SkippedImage, run, suggested_archive_name,
};
