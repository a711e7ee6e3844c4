//! Markdown report generation
//!
//! This module generates a human-readable markdown version of the sweep
//! report, suitable for pull requests and issue trackers.

use crate::scoring::{BatchReport, PageReport};

/// Formats a batch report as markdown
///
/// # Arguments
///
/// * `report` - The scored batch report
///
/// # Returns
///
/// A formatted markdown string
pub fn format_markdown_report(report: &BatchReport) -> String {
    let mut md = String::new();

    md.push_str("# Accessibility Sweep Report\n\n");

    // Run information
    md.push_str("## Run Information\n\n");
    md.push_str(&format!(
        "- **Generated**: {}\n",
        report.generated_at.format("%Y-%m-%d %H:%M:%S")
    ));
    if let Some(hash) = &report.config_hash {
        md.push_str(&format!("- **Config Hash**: {}\n", hash));
    }
    md.push_str(&format!("- **Overall Score**: {} / 100\n", report.overall_score));
    md.push_str(&format!("- **Pages Scored**: {}\n", report.scored_count()));
    md.push_str(&format!("- **Pages Failed**: {}\n\n", report.failed_count()));

    // Page overview
    if !report.pages.is_empty() {
        md.push_str("## Pages\n\n");
        md.push_str("| URL | Score | Penalty | Violations |\n");
        md.push_str("|-----|-------|---------|------------|\n");
        for page in &report.pages {
            match page {
                PageReport::Scored { url, score } => md.push_str(&format!(
                    "| {} | {} | {} | {} |\n",
                    cell(url),
                    score.score,
                    score.penalty,
                    score.violations_total
                )),
                PageReport::Failed { url, .. } => {
                    md.push_str(&format!("| {} | ERROR | - | - |\n", cell(url)))
                }
            }
        }
        md.push('\n');
    }

    // Per-page detail
    for page in &report.pages {
        md.push_str(&format!("### {}\n\n", page.url()));

        let score = match page {
            PageReport::Failed { error, .. } => {
                md.push_str(&format!("**Error**: {}\n\n", error));
                continue;
            }
            PageReport::Scored { score, .. } => score,
        };

        let tally = score
            .breakdown
            .by_impact
            .iter()
            .map(|(impact, count)| format!("{}: {}", impact, count))
            .collect::<Vec<_>>()
            .join(", ");
        md.push_str(&format!("Violations by impact: {}\n\n", tally));

        let top = score.breakdown.top_violations();
        if top.is_empty() {
            md.push_str("No violations found.\n\n");
            continue;
        }

        md.push_str(&format!(
            "Key violations ({} of {}):\n\n",
            top.len(),
            score.breakdown.violations.len()
        ));
        md.push_str("| ID | Impact | Description | Occurrences |\n");
        md.push_str("|----|--------|-------------|-------------|\n");
        for violation in top {
            let description = violation.display_text().unwrap_or("-");
            let description = match &violation.help_url {
                Some(url) => format!("[{}]({})", cell(description), url),
                None => cell(description),
            };
            md.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                cell(&violation.id),
                violation.impact,
                description,
                violation.occurrences
            ));
        }
        md.push('\n');
    }

    md
}

/// Keeps table cells on one line and escapes column separators
fn cell(text: &str) -> String {
    text.replace('|', "\\|").replace(['\n', '\r'], " ")
}
