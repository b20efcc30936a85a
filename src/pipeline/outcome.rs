//! Result records produced by one pipeline invocation.

use serde::Serialize;

/// One successfully downloaded and archived image.
#[derive(Debug, Clone, Serialize)]
pub struct DownloadedImage {
    /// Absolute URL the image was fetched from.
    pub url: String,
    /// Final unique archive entry name.
    pub filename: String,
    /// Payload size in bytes (uncompressed).
    pub size_bytes: u64,
    /// Normalized media type (parameters stripped, lowercase).
    pub content_type: String,
}

/// One image URL that was attempted but not archived.
///
/// Transport failures, non-2xx statuses, non-image content types, and
/// empty bodies all collapse into this one record; the reason string is
/// informational only.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedImage {
    /// Absolute URL that was skipped.
    pub url: String,
    /// Short description of why the image was skipped.
    pub reason: String,
}

/// The complete output of one pipeline invocation.
///
/// Owned solely by the caller after the pipeline returns; the pipeline
/// holds no state afterwards. Both lists are in attempted (URL-sorted)
/// order.
#[derive(Debug, Serialize)]
pub struct PackagedResult {
    /// ZIP archive bytes. Empty when no images were found.
    #[serde(skip)]
    pub archive_bytes: Vec<u8>,
    /// Images written into the archive.
    pub downloaded: Vec<DownloadedImage>,
    /// Attempted URLs that did not make it into the archive.
    pub skipped: Vec<SkippedImage>,
}

impl PackagedResult {
    /// An empty result: no archive, no downloads, no skips.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            archive_bytes: Vec::new(),
            downloaded: Vec::new(),
            skipped: Vec::new(),
        }
    }

    /// Sum of uncompressed payload sizes across downloaded images.
    #[must_use]
    pub fn total_raw_bytes(&self) -> u64 {
        self.downloaded.iter().map(|d| d.size_bytes).sum()
    }
}
