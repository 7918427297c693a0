//! Utility functions and helpers.

pub mod http;

use url::Url;

/// Whether a feed source is an HTTP(S) location rather than a local path.
pub fn is_remote(source: &str) -> bool {
    Url::parse(source.trim())
        .map(|url| matches!(url.scheme(), "http" | "https"))
        .unwrap_or(false)
}

/// Host part of a URL, for log lines.
pub fn get_domain(url_str: &str) -> Option<String> {
    Url::parse(url_str)
        .ok()
        .and_then(|u| u.host_str().map(|s| s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_remote() {
        assert!(is_remote("https://example.com/feed.xml"));
        assert!(is_remote("http://example.com/feed.xml"));
        assert!(!is_remote("data/feeds/realty.xml"));
        assert!(!is_remote("/tmp/feed.xml"));
        assert!(!is_remote("file:///tmp/feed.xml"));
    }

    #[test]
    fn test_get_domain() {
        assert_eq!(
            get_domain("https://autoload.avito.ru/format/New_developments.xml"),
            Some("autoload.avito.ru".to_string())
        );
        assert_eq!(get_domain("not a url"), None);
    }
}
