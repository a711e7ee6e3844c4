//! JSON document walk (ZAP JSON reports and similar exports)

use super::pattern::is_url_shaped;
use super::UrlSet;
use serde_json::Value;
use std::collections::BTreeSet;

/// Keys whose string values are read as page references
const URL_KEYS: &[&str] = &["uri", "url"];

/// Parses the content as JSON and collects every URL-shaped string in it
///
/// The result is sorted lexicographically, since walk order carries no
/// meaning. Declines when the content is not valid JSON.
pub(super) fn walk_document(content: &str) -> Option<UrlSet> {
    let document: Value = match serde_json::from_str(content) {
        Ok(document) => document,
        Err(e) => {
            tracing::debug!("JSON parse failed ({}), using pattern scan", e);
            return None;
        }
    };

    let mut found = BTreeSet::new();
    collect(&document, &mut found);

    Some(found.into_iter().collect())
}

fn collect(node: &Value, found: &mut BTreeSet<String>) {
    match node {
        Value::Object(map) => {
            for (key, value) in map {
                if URL_KEYS.contains(&key.as_str()) {
                    if let Value::String(s) = value {
                        if is_url_shaped(s) {
                            found.insert(s.clone());
                        }
                    }
                }
                collect(value, found);
            }
        }
        Value::Array(items) => {
            for item in items {
                collect(item, found);
            }
        }
        Value::String(s) => {
            if is_url_shaped(s) {
                found.insert(s.clone());
            }
        }
        Value::Number(_) | Value::Bool(_) | Value::Null => {}
    }
}
