//! Output module for writing sweep reports
//!
//! This module handles:
//! - Rendering a batch report as HTML, Markdown, or JSON
//! - Writing timestamped report files next to a configurable prefix

mod html;
mod json;
mod markdown;

pub use html::format_html_report;
pub use json::format_json_report;
pub use markdown::format_markdown_report;

use crate::scoring::BatchReport;
use std::fmt;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to format output: {0}")]
    Format(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Supported report formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportFormat {
    Html,
    Markdown,
    Json,
}

impl ReportFormat {
    /// File extension used for this format
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Markdown => "md",
            Self::Json => "json",
        }
    }

    /// Renders the report in this format
    pub fn render(&self, report: &BatchReport) -> OutputResult<String> {
        match self {
            Self::Html => Ok(format_html_report(report)),
            Self::Markdown => Ok(format_markdown_report(report)),
            Self::Json => format_json_report(report),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Html => write!(f, "html"),
            Self::Markdown => write!(f, "markdown"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "html" | "htm" => Ok(Self::Html),
            "markdown" | "md" => Ok(Self::Markdown),
            "json" => Ok(Self::Json),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}

/// Builds the report path `<prefix>_<YYYYmmdd_HHMMSS>.<ext>`
pub fn report_path(prefix: &str, report: &BatchReport, format: ReportFormat) -> PathBuf {
    PathBuf::from(format!(
        "{}_{}.{}",
        prefix,
        report.generated_at.format("%Y%m%d_%H%M%S"),
        format.extension()
    ))
}

/// Writes the report once per requested format
///
/// # Returns
///
/// * `Ok(Vec<PathBuf>)` - Paths of the written files, in `formats` order
/// * `Err(OutputError)` - Failed to render or write a report
pub fn write_reports(
    report: &BatchReport,
    prefix: &str,
    formats: &[ReportFormat],
) -> OutputResult<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(formats.len());

    for format in formats {
        let path = report_path(prefix, report, *format);
        let rendered = format.render(report)?;

        let mut file = File::create(&path)?;
        file.write_all(rendered.as_bytes())?;

        tracing::info!("Wrote {} report: {}", format, path.display());
        written.push(path);
    }

    Ok(written)
}
