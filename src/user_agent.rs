//! Shared User-Agent string for page and image fetches.
//!
//! Many image CDNs serve different payloads (or block outright) when the
//! requester does not look like a browser, so both the page fetch and the
//! per-image fetches identify as a mainstream browser.

/// Browser-style User-Agent sent on every request.
pub(crate) const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_agent_looks_like_a_browser() {
        assert!(BROWSER_USER_AGENT.starts_with("Mozilla/5.0"));
        assert!(BROWSER_USER_AGENT.contains("Chrome/"));
    }
}
