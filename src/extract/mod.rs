//! Image URL extraction from HTML markup.
//!
//! This module finds every `<img>` element in a page, resolves the best
//! candidate URL per element (srcset first, then `src` and common
//! lazy-load attributes), joins it against the page's post-redirect base
//! URL, and returns a deduplicated list.
//!
//! The output order is lexicographic by URL, not document order. That is
//! an explicit contract: downstream truncation to a maximum image count
//! depends on it, and it keeps results reproducible across parses of
//! reordered-but-equivalent markup.

mod srcset;

use std::collections::BTreeSet;
use std::sync::LazyLock;

use scraper::{Html, Selector};
use tracing::{debug, trace};
use url::Url;

pub use srcset::select_best_from_srcset;

/// Attribute fallback chain tried when an `<img>` has no usable srcset.
/// First non-empty value wins.
const SOURCE_ATTRS: &[&str] = &["src", "data-src", "data-original", "data-lazy-src"];

#[allow(clippy::expect_used)]
static IMG_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("img").expect("img selector is valid")); // Static selector, safe to panic

/// Extracts candidate image URLs from HTML markup.
///
/// For each `<img>` element the srcset attribute is consulted first (the
/// largest-width candidate is taken); otherwise the element falls back
/// through `src`, `data-src`, `data-original`, and `data-lazy-src`.
/// References are resolved against `base_url` with standard relative-URL
/// resolution; elements with no resolvable attribute are skipped
/// silently.
///
/// Returns a lexicographically sorted, deduplicated list of absolute
/// URLs. Re-extracting identical markup yields an identical list
/// regardless of element order.
#[must_use]
pub fn extract_image_urls(markup: &str, base_url: &Url) -> Vec<String> {
    let document = Html::parse_document(markup);
    let mut urls: BTreeSet<String> = BTreeSet::new();

    for img in document.select(&IMG_SELECTOR) {
        let best = img
            .value()
            .attr("srcset")
            .and_then(select_best_from_srcset);

        let candidate = best.or_else(|| {
            SOURCE_ATTRS.iter().find_map(|attr| {
                img.value()
                    .attr(attr)
                    .map(str::trim)
                    .filter(|v| !v.is_empty())
                    .map(str::to_string)
            })
        });

        let Some(reference) = candidate else {
            trace!("img element without resolvable source attribute, skipping");
            continue;
        };

        match base_url.join(&reference) {
            Ok(resolved) => {
                urls.insert(resolved.into());
            }
            Err(_) => {
                trace!(reference, "unresolvable image reference, skipping");
            }
        }
    }

    debug!(count = urls.len(), base_url = %base_url, "extracted image URLs");
    urls.into_iter().collect()
}
