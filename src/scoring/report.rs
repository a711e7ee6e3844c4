//! Batch-level aggregation into the final report

use crate::audit::PageResult;
use crate::scoring::PageScore;
use chrono::{DateTime, Local};
use serde::Serialize;

/// Outcome of one page in the batch report
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PageReport {
    /// The page was audited and scored
    Scored { url: String, score: PageScore },
    /// The audit failed; the page has no score
    Failed { url: String, error: String },
}

impl PageReport {
    pub fn url(&self) -> &str {
        match self {
            Self::Scored { url, .. } | Self::Failed { url, .. } => url,
        }
    }

    /// The page score, if the audit succeeded
    pub fn score(&self) -> Option<&PageScore> {
        match self {
            Self::Scored { score, .. } => Some(score),
            Self::Failed { .. } => None,
        }
    }
}

impl From<PageResult> for PageReport {
    fn from(result: PageResult) -> Self {
        match result {
            PageResult::Audited { url, findings } => {
                let score = PageScore::from_findings(&findings);
                PageReport::Scored { url, score }
            }
            PageResult::Failed { url, error } => PageReport::Failed { url, error },
        }
    }
}

/// Final aggregate of a run
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub generated_at: DateTime<Local>,
    /// SHA-256 of the configuration file used, if any
    pub config_hash: Option<String>,
    /// Mean score of successfully audited pages; 0 when there are none
    pub overall_score: u32,
    /// Pages in audit order
    pub pages: Vec<PageReport>,
}

impl BatchReport {
    /// Scores every page result and computes the overall score
    pub fn from_results(results: Vec<PageResult>) -> Self {
        let pages: Vec<PageReport> = results.into_iter().map(PageReport::from).collect();
        let overall_score = overall_score(pages.iter().filter_map(|p| p.score()).map(|s| s.score));

        Self {
            generated_at: Local::now(),
            config_hash: None,
            overall_score,
            pages,
        }
    }

    pub fn with_config_hash(mut self, hash: Option<String>) -> Self {
        self.config_hash = hash;
        self
    }

    pub fn scored_count(&self) -> usize {
        self.pages.iter().filter(|p| p.score().is_some()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.pages.len() - self.scored_count()
    }
}

/// Computes the overall score of a batch of page results
///
/// Failed pages are excluded from the mean; with no successful page the
/// overall score is 0.
pub fn aggregate(results: &[PageResult]) -> u32 {
    overall_score(results.iter().filter_map(|result| match result {
        PageResult::Audited { findings, .. } => Some(PageScore::from_findings(findings).score),
        PageResult::Failed { .. } => None,
    }))
}

/// Mean of the given scores, rounded to the nearest integer (ties to even)
fn overall_score(scores: impl Iterator<Item = u32>) -> u32 {
    let (sum, count) = scores.fold((0u64, 0u64), |(sum, count), score| {
        (sum + u64::from(score), count + 1)
    });

    if count == 0 {
        return 0;
    }

    let quotient = sum / count;
    let remainder = sum % count;
    let rounded = match (remainder * 2).cmp(&count) {
        std::cmp::Ordering::Less => quotient,
        std::cmp::Ordering::Greater => quotient + 1,
        std::cmp::Ordering::Equal => quotient + quotient % 2,
    };

    rounded as u32
}
