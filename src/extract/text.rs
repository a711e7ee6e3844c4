//! Line-oriented extraction for URL lists and logs

use super::pattern::is_absolute_url;
use super::UrlSet;

/// Collects whole lines that are URLs
///
/// A line qualifies when, once trimmed, it starts with `http` and is an
/// absolute URL; the trimmed line is kept as-is. Declines when no line
/// qualifies so that URLs embedded mid-line can be picked up by the pattern
/// scan instead.
pub(super) fn scan_lines(content: &str) -> Option<UrlSet> {
    let urls: UrlSet = content
        .lines()
        .map(str::trim)
        .filter(|line| line.starts_with("http") && is_absolute_url(line))
        .collect();

    if urls.is_empty() {
        None
    } else {
        Some(urls)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_lines_in_order() {
        let urls = scan_lines("https://b.com/2\r\n\thttps://a.com/1 \nhttps://b.com/2\n").unwrap();
        assert_eq!(urls.as_slice(), ["https://b.com/2", "https://a.com/1"]);
    }

    #[test]
    fn test_line_is_kept_whole() {
        let urls = scan_lines("http://a.com/page 200 OK\n").unwrap();
        assert_eq!(urls.as_slice(), ["http://a.com/page 200 OK"]);
    }

    #[test]
    fn test_skips_non_url_lines() {
        let urls = scan_lines("# targets\nhttpbin\nhttp://\nhttp://a.com\n").unwrap();
        assert_eq!(urls.as_slice(), ["http://a.com"]);
    }

    #[test]
    fn test_declines_without_url_lines() {
        assert!(scan_lines("GET http://a.com 200\nnothing here\n").is_none());
        assert!(scan_lines("").is_none());
    }
}
