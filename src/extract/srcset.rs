//! Responsive-image (`srcset`) descriptor selection.

use std::sync::LazyLock;

use regex::Regex;

/// Matches a srcset size token: digits followed by `w` (width) or `x`
/// (pixel density), e.g. `640w` or `2x`.
#[allow(clippy::expect_used)]
static SIZE_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)(w|x)$").expect("size token regex is valid")); // Static pattern, safe to panic

/// Picks the best candidate from a srcset descriptor set.
///
/// A srcset looks like `"img-320.jpg 320w, img-640.jpg 640w"`. Each
/// comma-separated entry contributes a URL and an optional width; tokens
/// not matching `^\d+(w|x)$`, or absent, contribute width 0. The
/// candidate with the maximum width wins; ties resolve to the last
/// candidate in parse order.
///
/// Returns `None` when the input is empty or contains no parseable
/// entries.
#[must_use]
pub fn select_best_from_srcset(srcset: &str) -> Option<String> {
    let mut best: Option<(u64, String)> = None;

    for entry in srcset.split(',') {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }
        let mut bits = entry.split_whitespace();
        let Some(url) = bits.next() else {
            continue;
        };
        let width = bits
            .next()
            .and_then(|token| SIZE_TOKEN.captures(token))
            .and_then(|caps| caps[1].parse::<u64>().ok())
            .unwrap_or(0);

        // >= keeps the last candidate on width ties
        if best.as_ref().is_none_or(|(w, _)| width >= *w) {
            best = Some((width, url.to_string()));
        }
    }

    best.map(|(_, url)| url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_best_picks_maximum_width() {
        assert_eq!(
            select_best_from_srcset("a.jpg 320w, b.jpg 640w"),
            Some("b.jpg".to_string())
        );
        assert_eq!(
            select_best_from_srcset("b.jpg 640w, a.jpg 320w"),
            Some("b.jpg".to_string())
        );
    }

    #[test]
    fn test_select_best_tie_goes_to_last_candidate() {
        assert_eq!(
            select_best_from_srcset("a.jpg 640w, b.jpg 640w"),
            Some("b.jpg".to_string())
        );
    }

    #[test]
    fn test_select_best_accepts_density_tokens() {
        assert_eq!(
            select_best_from_srcset("a.jpg 1x, b.jpg 2x"),
            Some("b.jpg".to_string())
        );
    }

    #[test]
    fn test_select_best_unparseable_tokens_count_as_zero_width() {
        // "huge" is not a size token, so b.jpg has width 0; a.jpg wins.
        assert_eq!(
            select_best_from_srcset("a.jpg 320w, b.jpg huge"),
            Some("a.jpg".to_string())
        );
    }

    #[test]
    fn test_select_best_without_tokens_takes_last_entry() {
        // All widths 0: tie resolves to the last candidate.
        assert_eq!(
            select_best_from_srcset("a.jpg, b.jpg"),
            Some("b.jpg".to_string())
        );
    }

    #[test]
    fn test_select_best_empty_input_returns_none() {
        assert_eq!(select_best_from_srcset(""), None);
        assert_eq!(select_best_from_srcset("  ,  , "), None);
    }
}
