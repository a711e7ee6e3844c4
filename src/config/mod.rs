//! Configuration module for wcag-sweep
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file. Every key has a default, so an absent file behaves like
//! an empty one.
//!
//! # Example
//!
//! ```no_run
//! use wcag_sweep::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("sweep.toml")).unwrap();
//! println!("Will audit at most {} pages", config.scan.max_pages);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{AuditorConfig, Config, OutputConfig, ScanConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate;
