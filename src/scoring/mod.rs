//! Violation scoring and aggregation
//!
//! This module turns raw axe findings into comparable numbers:
//! - a capped penalty and score per page
//! - a per-impact tally and a ranked list of the worst violations
//! - an overall score for a batch of pages
//!
//! Impact weights are `minor: 1, moderate: 2, serious: 4, critical: 8`.

mod finding;
mod impact;
mod page;
mod report;

pub use finding::{AxeResults, Finding};
pub use impact::Impact;
pub use page::{
    rank_violations, score_page, ImpactCounts, PageBreakdown, PageScore, ViolationSummary,
};
pub use report::{aggregate, BatchReport, PageReport};

/// Best possible page score
pub const MAX_SCORE: u32 = 100;

/// Maximum penalty per page, so that a single page cannot dominate the batch
pub const MAX_PENALTY_PER_PAGE: u32 = 100;

/// Number of violations shown per page in reports
pub const TOP_VIOLATIONS: usize = 10;
