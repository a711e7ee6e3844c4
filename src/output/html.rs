//! HTML report generation
//!
//! Produces a single self-contained page: the overall score, then one section
//! per page with its score, impact tally and key violations.

use crate::scoring::{BatchReport, PageReport, PageScore};

const STYLE: &str = "\
body { font-family: Arial, sans-serif; margin: 20px; }
h1, h2, h3 { color: #2c3e50; }
.score { font-weight: bold; }
.critical { color: red; }
.serious { color: darkorange; }
.moderate { color: goldenrod; }
.minor { color: gray; }
table { border-collapse: collapse; width: 100%; margin: 10px 0; }
th, td { border: 1px solid #ccc; padding: 6px 10px; }
th { background: #f5f5f5; }";

/// Formats a batch report as an HTML document
pub fn format_html_report(report: &BatchReport) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang='en'>\n<head>\n");
    html.push_str("<meta charset='UTF-8'>\n");
    html.push_str("<meta name='viewport' content='width=device-width, initial-scale=1.0'>\n");
    html.push_str("<title>Accessibility Report</title>\n");
    html.push_str(&format!("<style>\n{}\n</style>\n", STYLE));
    html.push_str("</head>\n<body>\n");

    html.push_str("<h1>Accessibility Report (axe)</h1>\n");
    html.push_str(&format!(
        "<p><b>Generated:</b> {}</p>\n",
        report.generated_at.format("%Y-%m-%dT%H:%M:%S")
    ));
    if let Some(hash) = &report.config_hash {
        html.push_str(&format!("<p><b>Config hash:</b> {}</p>\n", escape(hash)));
    }
    html.push_str(&format!(
        "<p><b>Overall score (0-100):</b> <span class='score'>{}</span></p>\n",
        report.overall_score
    ));
    html.push_str(&format!(
        "<p><b>Pages:</b> {} scored, {} failed</p>\n",
        report.scored_count(),
        report.failed_count()
    ));

    for page in &report.pages {
        html.push_str(&format!("<h2>{}</h2>\n", escape(page.url())));
        match page {
            PageReport::Failed { error, .. } => {
                html.push_str("<p><b>Status:</b> ERROR</p>\n");
                html.push_str(&format!("<p><b>Details:</b> {}</p>\n", escape(error)));
            }
            PageReport::Scored { score, .. } => push_page_score(&mut html, score),
        }
    }

    html.push_str("</body></html>\n");
    html
}

fn push_page_score(html: &mut String, score: &PageScore) {
    html.push_str(&format!(
        "<p><b>Page score:</b> <span class='score'>{}</span> (penalty: {}, violations: {})</p>\n",
        score.score, score.penalty, score.violations_total
    ));

    let tally = score
        .breakdown
        .by_impact
        .iter()
        .map(|(impact, count)| format!("{}: {}", impact, count))
        .collect::<Vec<_>>()
        .join(", ");
    html.push_str(&format!("<p><b>Violations by impact:</b> {}</p>\n", tally));

    let top = score.breakdown.top_violations();
    if top.is_empty() {
        html.push_str("<p>No violations found.</p>\n");
        return;
    }

    html.push_str("<h3>Key Violations</h3>\n<table>\n");
    html.push_str("<tr><th>ID</th><th>Impact</th><th>Description</th>");
    html.push_str("<th>Guide</th><th>Occurrences</th></tr>\n");

    for violation in top {
        html.push_str("<tr>");
        html.push_str(&format!("<td>{}</td>", escape(&violation.id)));
        html.push_str(&format!(
            "<td class='{}'>{}</td>",
            violation.impact.as_str(),
            violation.impact
        ));
        html.push_str(&format!(
            "<td>{}</td>",
            escape(violation.display_text().unwrap_or("-"))
        ));
        match &violation.help_url {
            Some(url) => html.push_str(&format!(
                "<td><a href='{}' target='_blank'>Guide</a></td>",
                escape(url)
            )),
            None => html.push_str("<td>-</td>"),
        }
        html.push_str(&format!("<td>{}</td>", violation.occurrences));
        html.push_str("</tr>\n");
    }

    html.push_str("</table>\n");
}

/// Escapes text for use in element content and quoted attributes
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::PageResult;
    use crate::scoring::{Finding, Impact};

    fn finding(id: &str, impact: Impact, help: Option<&str>, nodes: usize) -> Finding {
        Finding {
            id: id.to_string(),
            impact,
            help: help.map(str::to_string),
            description: Some(format!("{} description", id)),
            help_url: Some(format!("https://dequeuniversity.com/rules/axe/4.8/{}", id)),
            nodes: vec![serde_json::Value::Null; nodes],
            ..Default::default()
        }
    }

    fn sample_report() -> BatchReport {
        BatchReport::from_results(vec![
            PageResult::audited(
                "https://example.com/",
                vec![
                    finding("region", Impact::Moderate, None, 4),
                    finding(
                        "image-alt",
                        Impact::Critical,
                        Some("Images must have alternate text"),
                        2,
                    ),
                ],
            ),
            PageResult::failed("https://example.com/<broken>", "Timeout waiting for <body>"),
        ])
    }

    #[test]
    fn test_contains_scores() {
        let html = format_html_report(&sample_report());

        assert!(html.contains("<span class='score'>76</span>"));
        assert!(html.contains("(penalty: 24, violations: 2)"));
        assert!(html.contains("minor: 0, moderate: 4, serious: 0, critical: 2"));
        assert!(html.contains("1 scored, 1 failed"));
    }

    #[test]
    fn test_violations_ranked_and_described() {
        let html = format_html_report(&sample_report());

        let critical = html.find("<td>image-alt</td>").unwrap();
        let moderate = html.find("<td>region</td>").unwrap();
        assert!(critical < moderate);
        assert!(html.contains("<td>Images must have alternate text</td>"));
        assert!(html.contains("<td>region description</td>"));
        assert!(html.contains("<td class='critical'>critical</td>"));
        assert!(html.contains("href='https://dequeuniversity.com/rules/axe/4.8/image-alt'"));
    }

    #[test]
    fn test_failed_page_is_escaped() {
        let html = format_html_report(&sample_report());

        assert!(html.contains("<h2>https://example.com/&lt;broken&gt;</h2>"));
        assert!(html.contains("<p><b>Status:</b> ERROR</p>"));
        assert!(html.contains("Timeout waiting for &lt;body&gt;"));
    }

    #[test]
    fn test_clean_page() {
        let report =
            BatchReport::from_results(vec![PageResult::audited("https://clean.example/", vec![])]);
        let html = format_html_report(&report);
        assert!(html.contains("No violations found."));
        assert!(!html.contains("Key Violations"));
    }

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;"
        );
    }
}
