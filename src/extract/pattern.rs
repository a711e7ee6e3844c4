//! Generic absolute-URL pattern scan

use super::UrlSet;
use regex::Regex;
use std::sync::OnceLock;

/// Broadest reasonable absolute-URL token; scheme is case-insensitive
const URL_PATTERN: &str = r"(?i)https?://[\w\-.:%#?/=+&@~\[\]]+";

static URL_REGEX: OnceLock<Regex> = OnceLock::new();

fn url_regex() -> &'static Regex {
    URL_REGEX.get_or_init(|| Regex::new(URL_PATTERN).expect("valid regex"))
}

/// Scans arbitrary text for URL tokens, keeping first-seen order
pub fn scan_urls(text: &str) -> UrlSet {
    url_regex().find_iter(text).map(|m| m.as_str()).collect()
}

/// Returns true if the string begins with a URL token
///
/// Only the start is anchored: `"http://a.com and more"` is URL-shaped.
pub fn is_url_shaped(value: &str) -> bool {
    url_regex().find(value).map_or(false, |m| m.start() == 0)
}

/// Returns true if the string is an absolute http(s) reference
///
/// The scheme comparison is case-insensitive and the part after `://` must be
/// non-empty.
pub fn is_absolute_url(value: &str) -> bool {
    ["http://", "https://"].iter().any(|scheme| {
        value.len() > scheme.len()
            && value
                .get(..scheme.len())
                .map_or(false, |prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}
