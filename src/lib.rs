//! wcag-sweep: accessibility sweeps driven by scan exports
//!
//! This crate recovers the set of page URLs contained in a security-scan export
//! (or a plain URL list), audits each page through an axe audit service, and
//! scores the findings into a single prioritized report.

pub mod audit;
pub mod config;
pub mod extract;
pub mod output;
pub mod scoring;

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for wcag-sweep operations
#[derive(Debug, Error)]
pub enum SweepError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Input file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("No URL found in {}", path.display())]
    EmptyExtraction { path: PathBuf },

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for wcag-sweep operations
pub type Result<T> = std::result::Result<T, SweepError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use audit::{Auditor, PageResult, RemoteAuditor};
pub use config::Config;
pub use extract::{extract_urls, extract_urls_from_file, InputFormat, UrlSet};
pub use scoring::{aggregate, score_page, BatchReport, Finding, Impact, PageScore};
