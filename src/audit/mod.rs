//! Page auditing and sweep orchestration
//!
//! This module contains:
//! - the [`Auditor`] seam: one independent accessibility audit per URL
//! - [`RemoteAuditor`], which delegates audits to an axe service over HTTP
//! - the sweep coordinator tying extraction, auditing and scoring together

mod coordinator;
mod remote;

pub use coordinator::{audit_urls, run_sweep, stop_on_ctrl_c, StopFlag};
pub use remote::{AuditError, RemoteAuditor};

use crate::scoring::Finding;
use serde::Serialize;
use std::future::Future;

/// Result of auditing one page: findings, or the reason the audit failed
///
/// There are no partial results: a page either has its full finding list or
/// an error description.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum PageResult {
    Audited { url: String, findings: Vec<Finding> },
    Failed { url: String, error: String },
}

impl PageResult {
    pub fn audited(url: impl Into<String>, findings: Vec<Finding>) -> Self {
        Self::Audited {
            url: url.into(),
            findings,
        }
    }

    pub fn failed(url: impl Into<String>, error: impl Into<String>) -> Self {
        Self::Failed {
            url: url.into(),
            error: error.into(),
        }
    }

    pub fn url(&self) -> &str {
        match self {
            Self::Audited { url, .. } | Self::Failed { url, .. } => url,
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Audited { .. })
    }
}

/// Runs an accessibility audit on a single page
///
/// Implementations must not leak state between calls: each audit is
/// independent, and failures are reported as [`PageResult::Failed`] rather
/// than returned as errors.
pub trait Auditor {
    /// Audits `url`, letting the page settle for `wait_seconds` after load
    fn audit(&self, url: &str, wait_seconds: u64) -> impl Future<Output = PageResult> + Send;
}
