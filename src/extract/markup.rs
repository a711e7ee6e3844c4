//! HTML/XML extraction
//!
//! Collects absolute `href` and `src` attribute values, plus any URL that
//! appears elsewhere in the raw text (visible text, comments, XML element
//! bodies such as ZAP's `<uri>` entries).

use super::pattern::{is_absolute_url, scan_urls};
use super::UrlSet;
use scraper::{Html, Selector};
use std::collections::BTreeSet;

/// Selectors and attributes that carry page or resource references
const LINK_ATTRIBUTES: &[(&str, &str)] = &[("[href]", "href"), ("[src]", "src")];

/// Parses the content as markup and returns the sorted union of attribute
/// and text URLs
///
/// Markup parsing is error-tolerant, so this strategy never declines.
pub(super) fn scan_markup(content: &str) -> Option<UrlSet> {
    let document = Html::parse_document(content);
    let mut found: BTreeSet<String> = BTreeSet::new();

    for (css, attribute) in LINK_ATTRIBUTES {
        let Ok(selector) = Selector::parse(css) else {
            continue;
        };

        for element in document.select(&selector) {
            if let Some(value) = element.value().attr(attribute) {
                if value.starts_with("http") && is_absolute_url(value) {
                    found.insert(value.to_string());
                }
            }
        }
    }

    found.extend(scan_urls(content));

    Some(found.into_iter().collect())
}
