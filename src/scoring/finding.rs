//! Accessibility findings as reported by axe-core
//!
//! Only the fields the scoring needs are decoded; node matches are kept as raw
//! JSON since only their number matters.

use crate::scoring::Impact;
use serde::{Deserialize, Serialize};

/// One reported accessibility violation for a page
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Finding {
    /// Rule identifier, e.g. `color-contrast`
    #[serde(default)]
    pub id: String,

    /// Normalized impact (absent or unrecognized values are minor)
    #[serde(default)]
    pub impact: Impact,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub help: Option<String>,

    #[serde(default, rename = "helpUrl")]
    pub help_url: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    /// DOM nodes matching the rule
    #[serde(default)]
    pub nodes: Vec<serde_json::Value>,
}

impl Finding {
    /// Number of occurrences counted for scoring (at least one)
    pub fn occurrences(&self) -> u32 {
        u32::try_from(self.nodes.len()).unwrap_or(u32::MAX).max(1)
    }
}

/// The subset of an axe results object used by the scoring
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AxeResults {
    #[serde(default)]
    pub violations: Vec<Finding>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_axe_violation() {
        let raw = r##"{
            "id": "image-alt",
            "impact": "Critical",
            "tags": ["cat.text-alternatives", "wcag2a", "wcag111"],
            "description": "Ensures <img> elements have alternate text",
            "help": "Images must have alternate text",
            "helpUrl": "https://dequeuniversity.com/rules/axe/4.8/image-alt",
            "nodes": [{"target": ["img"]}, {"target": ["#logo"]}]
        }"##;
        let finding: Finding = serde_json::from_str(raw).unwrap();

        assert_eq!(finding.id, "image-alt");
        assert_eq!(finding.impact, Impact::Critical);
        assert_eq!(finding.tags.len(), 3);
        assert_eq!(
            finding.help_url.as_deref(),
            Some("https://dequeuniversity.com/rules/axe/4.8/image-alt")
        );
        assert_eq!(finding.occurrences(), 2);
    }

    #[test]
    fn test_decode_sparse_violation() {
        let finding: Finding = serde_json::from_str(r#"{"id": "region", "impact": null}"#).unwrap();
        assert_eq!(finding.impact, Impact::Minor);
        assert!(finding.nodes.is_empty());
        assert_eq!(finding.occurrences(), 1);
        assert!(finding.help.is_none());
    }

    #[test]
    fn test_decode_axe_results_ignores_other_sections() {
        let raw = r#"{
            "testEngine": {"name": "axe-core", "version": "4.8.2"},
            "url": "https://example.com/",
            "passes": [{"id": "document-title"}],
            "incomplete": [],
            "violations": [{"id": "label", "impact": "serious", "nodes": [{}]}]
        }"#;
        let results: AxeResults = serde_json::from_str(raw).unwrap();
        assert_eq!(results.violations.len(), 1);
        assert_eq!(results.violations[0].impact, Impact::Serious);
    }

    #[test]
    fn test_results_without_violations() {
        let results: AxeResults = serde_json::from_str("{}").unwrap();
        assert!(results.violations.is_empty());
    }
}
