//! Entry-name sanitization and collision resolution.
//!
//! Names written to the archive must be safe (no separators, bounded
//! length) and unique within one archive. Sanitization is pure;
//! collision resolution is stateful through [`NameRegistry`], which is
//! scoped to a single pipeline invocation.

use std::collections::HashSet;

use sha2::{Digest, Sha256};

/// Maximum length of a sanitized name, in characters.
pub const MAX_NAME_LEN: usize = 180;

/// Upper bound for numeric collision suffixes before the digest fallback.
const MAX_SUFFIX: u32 = 9999;

/// File extensions recognized as images. A sanitized name already ending
/// in one of these keeps it; otherwise an extension is appended from the
/// response content-type.
const IMAGE_EXTS: &[&str] = &[
    ".jpg", ".jpeg", ".png", ".gif", ".webp", ".bmp", ".tif", ".tiff", ".svg", ".avif",
];

/// Sanitizes an arbitrary string into a safe archive entry name.
///
/// Every run of characters outside `[alphanumeric, '_', '-', '.']`
/// (whitespace included) collapses into a single underscore. An empty
/// result is replaced with `fallback`, and the output is truncated to
/// [`MAX_NAME_LEN`] characters. Pure and deterministic.
///
/// ```
/// use imgzip_core::sanitize;
/// assert_eq!(sanitize("My Photo! 2024.JPG", "image"), "My_Photo_2024.JPG");
/// ```
#[must_use]
pub fn sanitize(raw: &str, fallback: &str) -> String {
    let mut out = String::new();
    let mut prev_sep = false;
    for ch in raw.trim().chars() {
        if ch.is_alphanumeric() || matches!(ch, '_' | '-' | '.') {
            out.push(ch);
            prev_sep = false;
        } else if !prev_sep {
            out.push('_');
            prev_sep = true;
        }
    }
    if out.is_empty() {
        out = fallback.to_string();
    }
    out.chars().take(MAX_NAME_LEN).collect()
}

/// Returns true if the name ends in a recognized image extension
/// (case-insensitive).
#[must_use]
pub fn has_image_extension(name: &str) -> bool {
    let lower = name.to_lowercase();
    IMAGE_EXTS.iter().any(|ext| lower.ends_with(ext))
}

/// Maps an image media type (parameters already stripped) to a file
/// extension. Returns `None` for unrecognized subtypes; the pipeline
/// falls back to a generic `.img` placeholder.
#[must_use]
pub fn extension_for_content_type(media_type: &str) -> Option<&'static str> {
    match media_type {
        "image/jpeg" | "image/jpg" => Some(".jpg"),
        "image/png" => Some(".png"),
        "image/gif" => Some(".gif"),
        "image/webp" => Some(".webp"),
        "image/avif" => Some(".avif"),
        "image/svg+xml" => Some(".svg"),
        "image/bmp" => Some(".bmp"),
        "image/tiff" => Some(".tiff"),
        _ => None,
    }
}

/// Set of entry names already claimed within one archive.
///
/// Mutated only through [`uniquify`](Self::uniquify); discarded when the
/// pipeline invocation ends. Not shared across tasks - naming happens on
/// the single orchestrating task, so no locking is needed here.
#[derive(Debug, Default)]
pub struct NameRegistry {
    names: HashSet<String>,
}

impl NameRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of names claimed so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if no names have been claimed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Claims a unique name for `proposed`, registering the result.
    ///
    /// If `proposed` is free it is returned unchanged. Otherwise the name
    /// is split at the last `.` and numeric suffixes `stem_2.ext` through
    /// `stem_9999.ext` are tried; if all are taken, the suffix becomes
    /// the first 10 hex characters of the SHA-256 digest of `proposed`,
    /// inserted unconditionally (treated as always-unique). Every
    /// returned name is registered before return.
    pub fn uniquify(&mut self, proposed: &str) -> String {
        if self.names.insert(proposed.to_string()) {
            return proposed.to_string();
        }

        let (stem, ext) = match proposed.rfind('.') {
            Some(pos) => (&proposed[..pos], &proposed[pos..]),
            None => (proposed, ""),
        };

        for i in 2..=MAX_SUFFIX {
            let candidate = format!("{stem}_{i}{ext}");
            if self.names.insert(candidate.clone()) {
                return candidate;
            }
        }

        // Last resort: deterministic digest suffix, not re-checked.
        let digest = Sha256::digest(proposed.as_bytes());
        let short: String = digest[..5].iter().map(|b| format!("{b:02x}")).collect();
        let candidate = format!("{stem}_{short}{ext}");
        self.names.insert(candidate.clone());
        candidate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_collapses_disallowed_runs_to_single_underscore() {
        assert_eq!(sanitize("My Photo! 2024.JPG", "image"), "My_Photo_2024.JPG");
    }

    #[test]
    fn test_sanitize_preserves_word_chars_dash_dot() {
        assert_eq!(sanitize("photo-01.final.png", "image"), "photo-01.final.png");
        assert_eq!(sanitize("Unter_strich.jpg", "image"), "Unter_strich.jpg");
    }

    #[test]
    fn test_sanitize_collapses_whitespace_runs() {
        assert_eq!(sanitize("a   b\t\tc.png", "image"), "a_b_c.png");
    }

    #[test]
    fn test_sanitize_empty_input_uses_fallback() {
        assert_eq!(sanitize("", "image"), "image");
        assert_eq!(sanitize("   ", "image"), "image");
    }

    #[test]
    fn test_sanitize_truncates_to_max_len() {
        let long = "a".repeat(500);
        assert_eq!(sanitize(&long, "image").chars().count(), MAX_NAME_LEN);
    }

    #[test]
    fn test_has_image_extension_is_case_insensitive() {
        assert!(has_image_extension("photo.JPG"));
        assert!(has_image_extension("photo.webp"));
        assert!(!has_image_extension("photo.txt"));
        assert!(!has_image_extension("photo"));
    }

    #[test]
    fn test_extension_for_content_type_known_and_unknown() {
        assert_eq!(extension_for_content_type("image/jpeg"), Some(".jpg"));
        assert_eq!(extension_for_content_type("image/svg+xml"), Some(".svg"));
        assert_eq!(extension_for_content_type("image/x-icon"), None);
    }

    #[test]
    fn test_uniquify_first_claim_returns_unchanged() {
        let mut registry = NameRegistry::new();
        assert_eq!(registry.uniquify("a.png"), "a.png");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_uniquify_adds_numeric_suffix_before_extension() {
        let mut registry = NameRegistry::new();
        assert_eq!(registry.uniquify("a.png"), "a.png");
        assert_eq!(registry.uniquify("a.png"), "a_2.png");
        assert_eq!(registry.uniquify("a.png"), "a_3.png");
    }

    #[test]
    fn test_uniquify_without_extension_suffixes_whole_name() {
        let mut registry = NameRegistry::new();
        assert_eq!(registry.uniquify("logo"), "logo");
        assert_eq!(registry.uniquify("logo"), "logo_2");
    }

    #[test]
    fn test_uniquify_never_returns_registered_name() {
        let mut registry = NameRegistry::new();
        let mut seen = HashSet::new();
        for _ in 0..50 {
            let name = registry.uniquify("img.jpg");
            assert!(seen.insert(name), "uniquify returned a duplicate");
        }
    }

    #[test]
    fn test_uniquify_exhausted_suffixes_fall_back_to_digest() {
        let mut registry = NameRegistry::new();
        registry.names.insert("a.png".to_string());
        for i in 2..=MAX_SUFFIX {
            registry.names.insert(format!("a_{i}.png"));
        }

        let name = registry.uniquify("a.png");
        let digest = Sha256::digest(b"a.png");
        let short: String = digest[..5].iter().map(|b| format!("{b:02x}")).collect();
        assert_eq!(name, format!("a_{short}.png"));

        // Deterministic: the same exhausted stem produces the same digest name.
        let mut other = NameRegistry::new();
        other.names.insert("a.png".to_string());
        for i in 2..=MAX_SUFFIX {
            other.names.insert(format!("a_{i}.png"));
        }
        assert_eq!(other.uniquify("a.png"), name);
    }
}
