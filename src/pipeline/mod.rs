//! Fetch-and-package pipeline.
//!
//! One invocation fetches a page, extracts every image URL, downloads
//! each image with independent failure isolation, and packages the
//! accepted payloads into a deflate-compressed ZIP archive.
//!
//! # Failure model
//!
//! The initial page fetch is the only fatal stage: transport failures
//! and non-2xx statuses there abort the invocation. Every per-image
//! failure - timeout, 404, connection reset, non-image content type,
//! empty body - is caught at the per-URL boundary and recorded as a
//! [`SkippedImage`], never aborting the batch. No outcome is retried.
//!
//! # Concurrency model
//!
//! Image fetches run under a semaphore-bounded worker pool (default 8).
//! Naming and archive writing happen serially on the orchestrating task
//! after payloads are collected, so the [`NameRegistry`] and the ZIP
//! writer have a single logical writer and the result lists come back in
//! attempted (URL-sorted) order regardless of fetch completion order.
//! A concurrency of 1 reproduces strictly sequential fetching.

mod outcome;

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tracing::{debug, info, instrument, warn};
use url::Url;
use zip::result::ZipError;

use crate::archive::{
    ArchiveWriter, NameRegistry, extension_for_content_type, has_image_extension, sanitize,
};
use crate::extract::extract_image_urls;
use crate::fetch::{FetchClient, FetchError, MAX_TIMEOUT_SECS, MIN_TIMEOUT_SECS};

pub use outcome::{DownloadedImage, PackagedResult, SkippedImage};

/// Default maximum number of images attempted per page.
pub const DEFAULT_MAX_IMAGES: usize = 300;

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 25;

/// Default number of concurrent image fetches.
pub const DEFAULT_CONCURRENCY: usize = 8;

/// Upper bound for the image count limit.
const MAX_MAX_IMAGES: usize = 2000;

/// Upper bound for concurrent image fetches.
const MAX_CONCURRENCY: usize = 16;

/// Configuration for one pipeline invocation.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Absolute HTTP/HTTPS URL of the page to scan.
    pub page_url: String,
    /// Per-request timeout in seconds (5-120). Applies to the page fetch
    /// and to each image fetch independently, not cumulatively.
    pub timeout_secs: u64,
    /// Maximum number of image URLs attempted (1-2000); the sorted URL
    /// list is truncated to this count before fetching.
    pub max_images: usize,
    /// Concurrent image fetches (1-16); 1 means strictly sequential.
    pub concurrency: usize,
}

impl PipelineConfig {
    /// Creates a config for `page_url` with default limits.
    #[must_use]
    pub fn new(page_url: impl Into<String>) -> Self {
        Self {
            page_url: page_url.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_images: DEFAULT_MAX_IMAGES,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    /// Validates bounds and the page URL.
    ///
    /// This is the pipeline's only cancellation point: once `run` passes
    /// validation, the invocation proceeds to completion or fatal page
    /// fetch failure.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::InvalidConfig`] describing the first
    /// violated bound.
    pub fn validate(&self) -> Result<(), PipelineError> {
        let parsed = Url::parse(&self.page_url)
            .map_err(|_| PipelineError::invalid_config("page URL is not a valid absolute URL"))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(PipelineError::invalid_config(
                "page URL must use http or https",
            ));
        }
        if self.max_images == 0 || self.max_images > MAX_MAX_IMAGES {
            return Err(PipelineError::invalid_config(format!(
                "max_images must be between 1 and {MAX_MAX_IMAGES}"
            )));
        }
        if self.timeout_secs < MIN_TIMEOUT_SECS || self.timeout_secs > MAX_TIMEOUT_SECS {
            return Err(PipelineError::invalid_config(format!(
                "timeout must be between {MIN_TIMEOUT_SECS} and {MAX_TIMEOUT_SECS} seconds"
            )));
        }
        if self.concurrency == 0 || self.concurrency > MAX_CONCURRENCY {
            return Err(PipelineError::invalid_config(format!(
                "concurrency must be between 1 and {MAX_CONCURRENCY}"
            )));
        }
        Ok(())
    }
}

/// Error type for pipeline invocations.
///
/// Per-image failures never appear here; they are converted to
/// [`SkippedImage`] records at the per-URL boundary.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Input validation failed before the pipeline started.
    #[error("invalid configuration: {message}")]
    InvalidConfig {
        /// Description of the violated bound.
        message: String,
    },

    /// The page itself was unreachable or returned a non-2xx status.
    /// This is the only fatal fetch stage.
    #[error("page fetch failed: {0}")]
    PageFetch(#[from] FetchError),

    /// The ZIP archive could not be assembled.
    #[error("archive error: {0}")]
    Archive(#[from] ZipError),
}

impl PipelineError {
    fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}

/// Buffered payload of an accepted image fetch, before naming.
struct AcceptedPayload {
    media_type: String,
    body: Vec<u8>,
}

/// Runs the full fetch-and-package pipeline.
///
/// Steps: fetch the page (fatal on failure), extract image URLs against
/// the post-redirect base URL, truncate to `max_images`, fetch each
/// image independently, and package accepted payloads into a ZIP. A page
/// with no images yields an empty successful result, not an error.
///
/// # Errors
///
/// - [`PipelineError::InvalidConfig`] if bounds or the page URL are invalid
/// - [`PipelineError::PageFetch`] if the page fetch fails (transport or
///   non-2xx status)
/// - [`PipelineError::Archive`] if ZIP assembly fails
#[instrument(skip(config), fields(page_url = %config.page_url))]
pub async fn run(config: &PipelineConfig) -> Result<PackagedResult, PipelineError> {
    config.validate()?;

    let client = FetchClient::new(Duration::from_secs(config.timeout_secs))?;

    let page = client.fetch(&config.page_url).await?;
    let base_url = page.final_url.clone();
    debug!(base_url = %base_url, "page fetched");

    let mut urls = extract_image_urls(&page.body_text(), &base_url);
    if urls.is_empty() {
        info!("no image URLs found on page");
        return Ok(PackagedResult::empty());
    }

    let found = urls.len();
    urls.truncate(config.max_images);
    info!(
        found,
        attempting = urls.len(),
        "image URLs extracted"
    );

    // Fan out fetches under the semaphore; classification happens inside
    // each task so failures stay at the per-URL boundary.
    let semaphore = Arc::new(Semaphore::new(config.concurrency));
    let mut handles = Vec::with_capacity(urls.len());
    for url in &urls {
        let client = client.clone();
        let semaphore = Arc::clone(&semaphore);
        let url = url.clone();
        handles.push(tokio::spawn(async move {
            // Never closed; acquire failure would mean a dropped semaphore.
            let _permit = semaphore.acquire_owned().await.ok();
            fetch_image(&client, &url).await
        }));
    }

    // Serial phase: naming and archive writing on this task only.
    let mut registry = NameRegistry::new();
    let mut archive = ArchiveWriter::new();
    let mut downloaded = Vec::new();
    let mut skipped = Vec::new();

    for (idx, (url, handle)) in urls.into_iter().zip(handles).enumerate() {
        let ordinal = idx + 1;
        let result = match handle.await {
            Ok(result) => result,
            Err(e) => {
                warn!(url, error = %e, "image fetch task failed");
                Err("task failed".to_string())
            }
        };

        match result {
            Ok(payload) => {
                let filename = assign_entry_name(&url, ordinal, &payload.media_type, &mut registry);
                archive.add_entry(&filename, &payload.body)?;
                debug!(url, filename, bytes = payload.body.len(), "image archived");
                downloaded.push(DownloadedImage {
                    url,
                    filename,
                    size_bytes: payload.body.len() as u64,
                    content_type: payload.media_type,
                });
            }
            Err(reason) => {
                debug!(url, reason, "image skipped");
                skipped.push(SkippedImage { url, reason });
            }
        }
    }

    // Even when every attempt was skipped the archive is finalized; only
    // the zero-URLs case short-circuits with truly empty bytes.
    let archive_bytes = archive.finish()?;

    info!(
        downloaded = downloaded.len(),
        skipped = skipped.len(),
        archive_bytes = archive_bytes.len(),
        "pipeline complete"
    );

    Ok(PackagedResult {
        archive_bytes,
        downloaded,
        skipped,
    })
}

/// Fetches one image and classifies the response.
///
/// Any transport error or non-2xx status, a content type that is not
/// `image/*`, or an empty body yields `Err(reason)`; the caller records
/// it as a skip. A timeout, a 404, and a connection reset are all
/// equivalent at this level.
async fn fetch_image(client: &FetchClient, url: &str) -> Result<AcceptedPayload, String> {
    let response = client.fetch(url).await.map_err(|e| e.skip_reason())?;

    let media_type = response
        .content_type
        .as_deref()
        .and_then(|ct| ct.split(';').next())
        .map(str::trim)
        .unwrap_or_default()
        .to_string();

    if !media_type.starts_with("image/") {
        // Some sites return an HTML error page for blocked assets.
        let shown = if media_type.is_empty() {
            "none"
        } else {
            &media_type
        };
        return Err(format!("non-image content-type: {shown}"));
    }
    if response.body.is_empty() {
        return Err("empty body".to_string());
    }

    Ok(AcceptedPayload {
        media_type,
        body: response.body,
    })
}

/// Derives the unique archive entry name for an accepted image.
///
/// Base name comes from the URL path's last segment (`image_<ordinal>`
/// when empty), sanitized. A recognized image extension is kept as-is;
/// otherwise one is appended from the content type, with `.img` as the
/// generic placeholder. The result is then uniquified against the
/// invocation's registry.
fn assign_entry_name(
    url: &str,
    ordinal: usize,
    media_type: &str,
    registry: &mut NameRegistry,
) -> String {
    let last_segment = Url::parse(url)
        .ok()
        .and_then(|u| {
            u.path_segments()
                .and_then(|mut segments| segments.next_back().map(ToString::to_string))
        })
        .unwrap_or_default();

    let fallback = format!("image_{ordinal}");
    let raw = if last_segment.is_empty() {
        fallback.clone()
    } else {
        last_segment
    };
    let base = sanitize(&raw, &fallback);

    let proposed = if has_image_extension(&base) {
        base
    } else {
        let ext = extension_for_content_type(media_type).unwrap_or(".img");
        format!("{base}{ext}")
    };

    registry.uniquify(&proposed)
}

/// Proposed archive filename for a page: sanitized host plus a fixed
/// suffix, e.g. `example.com_images.zip`.
#[must_use]
pub fn suggested_archive_name(page_url: &str) -> String {
    let authority = Url::parse(page_url)
        .ok()
        .and_then(|u| {
            u.host_str().map(|host| match u.port() {
                Some(port) => format!("{host}:{port}"),
                None => host.to_string(),
            })
        })
        .unwrap_or_default();
    let base = if authority.is_empty() {
        "images".to_string()
    } else {
        sanitize(&authority, "images")
    };
    format!("{base}_images.zip")
}
