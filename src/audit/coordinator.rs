//! Sweep coordinator - main orchestration logic
//!
//! This module contains the sweep pipeline:
//! - extracting the URL set from the input file
//! - applying the page cap
//! - auditing each URL in discovery order
//! - handing the completed batch to the scoring
//!
//! Audits run one at a time. An interrupt stops the loop after the page in
//! flight, and the report is built from the pages completed so far.

use crate::audit::{Auditor, PageResult};
use crate::config::ScanConfig;
use crate::extract::{extract_urls_from_file, UrlSet};
use crate::scoring::BatchReport;
use crate::{Result, SweepError};
use std::future::Future;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Shared flag requesting the audit loop to stop
pub type StopFlag = Arc<AtomicBool>;

/// Exit status after a second interrupt (128 + SIGINT)
const FORCED_EXIT_CODE: i32 = 130;

/// Installs a Ctrl-C handler that raises the returned stop flag
///
/// A second Ctrl-C exits the process immediately, without a report.
/// Must be called from within a Tokio runtime.
pub fn stop_on_ctrl_c() -> StopFlag {
    let stop: StopFlag = Arc::new(AtomicBool::new(false));

    tokio::spawn(watch_interrupts(
        tokio::signal::ctrl_c,
        Arc::clone(&stop),
        || std::process::exit(FORCED_EXIT_CODE),
    ));

    stop
}

/// Raises `stop` on the first interrupt and calls `force_quit` on the second
///
/// A failing signal listener ends the watch.
async fn watch_interrupts<S, F>(mut next_interrupt: S, stop: StopFlag, force_quit: impl FnOnce())
where
    S: FnMut() -> F,
    F: Future<Output = std::io::Result<()>>,
{
    if next_interrupt().await.is_err() {
        return;
    }
    tracing::warn!("Interrupt received, finishing current page (press Ctrl-C again to quit now)");
    stop.store(true, Ordering::SeqCst);

    if next_interrupt().await.is_ok() {
        tracing::error!("Second interrupt received, quitting without a report");
        force_quit();
    }
}

/// Audits each URL in order, stopping early if `stop` is raised
///
/// # Returns
///
/// One page result per audited URL, in the order of `urls`. When stopped
/// early, only the pages audited before the stop are returned.
pub async fn audit_urls<A: Auditor>(
    auditor: &A,
    urls: &UrlSet,
    wait_seconds: u64,
    stop: &AtomicBool,
) -> Vec<PageResult> {
    let total = urls.len();
    let mut results = Vec::with_capacity(total);
    let start_time = Instant::now();

    for (idx, url) in urls.iter().enumerate() {
        if stop.load(Ordering::SeqCst) {
            tracing::warn!(
                "Sweep interrupted after {} of {} pages; reporting completed pages",
                results.len(),
                total
            );
            break;
        }

        tracing::info!("({}/{}) {}", idx + 1, total, url);
        results.push(auditor.audit(url, wait_seconds).await);
    }

    let failed = results.iter().filter(|r| !r.is_ok()).count();
    tracing::info!(
        "Audited {} page(s) in {:?} ({} failed)",
        results.len(),
        start_time.elapsed(),
        failed
    );

    results
}

/// Runs a complete sweep over the URLs found in `input`
///
/// This is the main entry point. It will:
/// 1. Extract the URL set from the input file
/// 2. Keep the first `max_pages` URLs (0 keeps all)
/// 3. Audit each URL
/// 4. Score the batch
///
/// # Returns
///
/// * `Ok(BatchReport)` - Sweep completed (possibly with failed pages)
/// * `Err(SweepError::NotFound)` - The input file does not exist
/// * `Err(SweepError::EmptyExtraction)` - No URL found in the input
pub async fn run_sweep<A: Auditor>(
    input: &Path,
    scan: &ScanConfig,
    auditor: &A,
    stop: &AtomicBool,
) -> Result<BatchReport> {
    tracing::info!("Reading file: {}", input.display());
    let mut urls = extract_urls_from_file(input)?;

    if urls.is_empty() {
        return Err(SweepError::EmptyExtraction {
            path: input.to_path_buf(),
        });
    }

    let found = urls.len();
    if scan.max_pages > 0 && found > scan.max_pages {
        urls.truncate(scan.max_pages);
        tracing::info!(
            "Found {} URLs, auditing the first {}",
            found,
            scan.max_pages
        );
    }
    tracing::info!("URLs to scan: {}", urls.len());

    let results = audit_urls(auditor, &urls, scan.page_wait, stop).await;

    Ok(BatchReport::from_results(results))
}
