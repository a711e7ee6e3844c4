//! Page-level scoring: penalty, impact tally, and ranked violations

use crate::scoring::{Finding, Impact, MAX_PENALTY_PER_PAGE, MAX_SCORE, TOP_VIOLATIONS};
use serde::Serialize;

/// Occurrence counts per impact level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImpactCounts {
    pub minor: u32,
    pub moderate: u32,
    pub serious: u32,
    pub critical: u32,
}

impl ImpactCounts {
    pub fn get(&self, impact: Impact) -> u32 {
        match impact {
            Impact::Minor => self.minor,
            Impact::Moderate => self.moderate,
            Impact::Serious => self.serious,
            Impact::Critical => self.critical,
        }
    }

    fn add(&mut self, impact: Impact, count: u32) {
        let slot = match impact {
            Impact::Minor => &mut self.minor,
            Impact::Moderate => &mut self.moderate,
            Impact::Serious => &mut self.serious,
            Impact::Critical => &mut self.critical,
        };
        *slot = slot.saturating_add(count);
    }

    /// Iterates over `(impact, count)` in ascending weight
    pub fn iter(&self) -> impl Iterator<Item = (Impact, u32)> + '_ {
        Impact::ALL.iter().map(move |impact| (*impact, self.get(*impact)))
    }

    pub fn total(&self) -> u32 {
        self.iter()
            .fold(0u32, |acc, (_, count)| acc.saturating_add(count))
    }
}

/// Compact summary of one violation on a page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViolationSummary {
    pub id: String,
    pub impact: Impact,
    pub description: Option<String>,
    pub help: Option<String>,
    #[serde(rename = "helpUrl")]
    pub help_url: Option<String>,
    /// Number of matched nodes, at least one
    pub occurrences: u32,
    pub tags: Vec<String>,
}

impl ViolationSummary {
    fn from_finding(finding: &Finding) -> Self {
        Self {
            id: finding.id.clone(),
            impact: finding.impact,
            description: finding.description.clone(),
            help: finding.help.clone(),
            help_url: finding.help_url.clone(),
            occurrences: finding.occurrences(),
            tags: finding.tags.clone(),
        }
    }

    /// Text shown for the violation: help, falling back to description
    pub fn display_text(&self) -> Option<&str> {
        self.help
            .as_deref()
            .filter(|help| !help.is_empty())
            .or(self.description.as_deref())
    }
}

/// Per-page breakdown: impact tally plus every violation, in input order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PageBreakdown {
    pub by_impact: ImpactCounts,
    pub violations: Vec<ViolationSummary>,
}

impl PageBreakdown {
    /// The most pressing violations, at most [`TOP_VIOLATIONS`]
    pub fn top_violations(&self) -> Vec<&ViolationSummary> {
        rank_violations(&self.violations, TOP_VIOLATIONS)
    }
}

/// Computes the capped penalty and breakdown for a page's findings
///
/// Each finding contributes `weight(impact) * max(1, nodes)`; the sum is
/// capped at [`MAX_PENALTY_PER_PAGE`].
///
/// # Example
///
/// ```
/// use wcag_sweep::scoring::{score_page, Finding, Impact};
///
/// let finding = Finding {
///     impact: Impact::Critical,
///     nodes: vec![serde_json::json!({}), serde_json::json!({})],
///     ..Default::default()
/// };
/// let (penalty, breakdown) = score_page(&[finding]);
/// assert_eq!(penalty, 16);
/// assert_eq!(breakdown.by_impact.critical, 2);
/// ```
pub fn score_page(findings: &[Finding]) -> (u32, PageBreakdown) {
    let mut penalty: u64 = 0;
    let mut breakdown = PageBreakdown::default();

    for finding in findings {
        let count = finding.occurrences();
        penalty = penalty.saturating_add(u64::from(finding.impact.weight()) * u64::from(count));
        breakdown.by_impact.add(finding.impact, count);
        breakdown
            .violations
            .push(ViolationSummary::from_finding(finding));
    }

    let capped = penalty.min(u64::from(MAX_PENALTY_PER_PAGE)) as u32;
    (capped, breakdown)
}

/// Orders violations by impact weight, then occurrences, both descending
///
/// The sort is stable: violations that tie on both keys keep input order.
pub fn rank_violations(violations: &[ViolationSummary], limit: usize) -> Vec<&ViolationSummary> {
    let mut ranked: Vec<&ViolationSummary> = violations.iter().collect();
    ranked.sort_by(|a, b| {
        b.impact
            .weight()
            .cmp(&a.impact.weight())
            .then_with(|| b.occurrences.cmp(&a.occurrences))
    });
    ranked.truncate(limit);
    ranked
}

/// Score of a successfully audited page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageScore {
    /// `100 - penalty`, within `[0, 100]`
    pub score: u32,
    /// Capped penalty, within `[0, 100]`
    pub penalty: u32,
    /// Number of distinct violations reported
    pub violations_total: usize,
    pub breakdown: PageBreakdown,
}

impl PageScore {
    pub fn from_findings(findings: &[Finding]) -> Self {
        let (penalty, breakdown) = score_page(findings);
        Self {
            score: MAX_SCORE.saturating_sub(penalty),
            penalty,
            violations_total: findings.len(),
            breakdown,
        }
    }
}
