//! URL extraction from scan exports and URL lists
//!
//! This module recovers the absolute page URLs contained in heterogeneous,
//! possibly malformed input:
//! - plain text and log files (`.txt`, `.log`)
//! - structured JSON exports (`.json`)
//! - HTML/XML reports (`.html`, `.htm`, `.xml`)
//! - anything else, through a generic pattern scan
//!
//! Each format is handled by an ordered chain of strategies. A strategy either
//! produces a result or declines, in which case the next one is tried. The
//! generic pattern scan never declines, so every chain ends with a result.

mod markup;
mod pattern;
mod structured;
mod text;

use crate::{Result, SweepError};
use std::collections::HashSet;
use std::fmt;
use std::path::Path;

pub use pattern::{is_absolute_url, is_url_shaped, scan_urls};

/// Format of the content handed to the extractor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputFormat {
    /// Plain text or log output, one URL per line where possible
    Text,
    /// JSON document, e.g. a ZAP JSON report
    Json,
    /// HTML or XML markup
    Markup,
    /// Anything else
    Unknown,
}

impl InputFormat {
    /// Infers the format from a file extension (case-insensitive)
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "txt" | "log" => Self::Text,
            "json" => Self::Json,
            "html" | "htm" | "xml" => Self::Markup,
            _ => Self::Unknown,
        }
    }

    /// Infers the format from a path's extension
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(Self::Unknown)
    }

    /// Returns true if the extraction result keeps first-seen order
    ///
    /// Structured and markup results are sorted lexicographically instead.
    pub fn preserves_order(&self) -> bool {
        matches!(self, Self::Text | Self::Unknown)
    }

    fn strategies(&self) -> &'static [(&'static str, Strategy)] {
        match self {
            Self::Text => &[("line", text::scan_lines), ("pattern", scan_pattern)],
            Self::Json => &[("json", structured::walk_document), ("pattern", scan_pattern)],
            Self::Markup => &[("markup", markup::scan_markup)],
            Self::Unknown => &[("pattern", scan_pattern)],
        }
    }
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
            Self::Markup => write!(f, "markup"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// An extraction strategy: `None` means "no result, try the next one"
type Strategy = fn(&str) -> Option<UrlSet>;

fn scan_pattern(content: &str) -> Option<UrlSet> {
    Some(scan_urls(content))
}

/// Ordered set of URLs; the first occurrence of a URL wins
#[derive(Debug, Clone, Default)]
pub struct UrlSet {
    urls: Vec<String>,
    seen: HashSet<String>,
}

impl UrlSet {
    /// Creates an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a URL unless it is already present
    ///
    /// Returns true if the URL was added.
    pub fn insert(&mut self, url: impl Into<String>) -> bool {
        let url = url.into();
        if self.seen.contains(&url) {
            return false;
        }
        self.seen.insert(url.clone());
        self.urls.push(url);
        true
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    pub fn contains(&self, url: &str) -> bool {
        self.seen.contains(url)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.urls.iter()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.urls
    }

    /// Keeps only the first `max` URLs in discovery order
    pub fn truncate(&mut self, max: usize) {
        for dropped in self.urls.drain(max.min(self.urls.len())..) {
            self.seen.remove(&dropped);
        }
    }

    /// Reorders the set lexicographically
    pub fn sort(&mut self) {
        self.urls.sort();
    }

    pub fn into_vec(self) -> Vec<String> {
        self.urls
    }
}

impl PartialEq for UrlSet {
    fn eq(&self, other: &Self) -> bool {
        self.urls == other.urls
    }
}

impl Eq for UrlSet {}

impl<S: Into<String>> FromIterator<S> for UrlSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = UrlSet::new();
        for url in iter {
            set.insert(url);
        }
        set
    }
}

impl<S: Into<String>> Extend<S> for UrlSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for url in iter {
            self.insert(url);
        }
    }
}

impl IntoIterator for UrlSet {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.urls.into_iter()
    }
}

impl<'a> IntoIterator for &'a UrlSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.urls.iter()
    }
}

/// Extracts URLs from already-decoded content
///
/// # Example
///
/// ```
/// use wcag_sweep::extract::{extract_urls, InputFormat};
///
/// let urls = extract_urls("visit http://a.com today\nhttp://b.com\n", InputFormat::Unknown);
/// assert_eq!(urls.as_slice(), ["http://a.com", "http://b.com"]);
/// ```
pub fn extract_urls(content: &str, format: InputFormat) -> UrlSet {
    for (name, strategy) in format.strategies() {
        if let Some(urls) = strategy(content) {
            tracing::debug!(
                "{} extraction via {} strategy found {} URL(s)",
                format,
                name,
                urls.len()
            );
            return urls;
        }
        tracing::debug!("{} strategy had no result for {} input, falling back", name, format);
    }

    UrlSet::new()
}

/// Extracts URLs from raw bytes, dropping invalid UTF-8 sequences
pub fn extract_urls_from_bytes(bytes: &[u8], format: InputFormat) -> UrlSet {
    extract_urls(&decode_ignoring_errors(bytes), format)
}

/// Reads a file and extracts the URLs it contains
///
/// The format is inferred from the file extension.
///
/// # Returns
///
/// * `Ok(UrlSet)` - URLs found in the file (possibly empty)
/// * `Err(SweepError::NotFound)` - The path does not name an existing file
/// * `Err(SweepError::Io)` - The file exists but could not be read
pub fn extract_urls_from_file(path: &Path) -> Result<UrlSet> {
    if !path.is_file() {
        return Err(SweepError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let format = InputFormat::from_path(path);
    let bytes = std::fs::read(path)?;
    tracing::debug!(
        "Read {} bytes from {} (format: {})",
        bytes.len(),
        path.display(),
        format
    );

    Ok(extract_urls_from_bytes(&bytes, format))
}

/// UTF-8 byte-order mark
const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

/// Decodes UTF-8, silently skipping malformed byte sequences
///
/// A leading byte-order mark is dropped.
pub fn decode_ignoring_errors(bytes: &[u8]) -> String {
    let mut rest = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let mut decoded = String::with_capacity(rest.len());

    loop {
        match std::str::from_utf8(rest) {
            Ok(valid) => {
                decoded.push_str(valid);
                break;
            }
            Err(e) => {
                let (valid, after) = rest.split_at(e.valid_up_to());
                if let Ok(valid) = std::str::from_utf8(valid) {
                    decoded.push_str(valid);
                }
                match e.error_len() {
                    Some(len) => rest = &after[len..],
                    // Truncated sequence at the end of input
                    None => break,
                }
            }
        }
    }

    decoded
}
