use crate::config::types::{AuditorConfig, Config, OutputConfig, ScanConfig};
use crate::output::ReportFormat;
use crate::ConfigError;
use url::Url;

/// Upper bound for the post-load wait handed to the audit service
const MAX_PAGE_WAIT_SECS: u64 = 300;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_scan_config(&config.scan)?;
    validate_auditor_config(&config.auditor)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates scan configuration
fn validate_scan_config(config: &ScanConfig) -> Result<(), ConfigError> {
    // max_pages == 0 means "no cap", so any value is accepted

    if config.page_wait > MAX_PAGE_WAIT_SECS {
        return Err(ConfigError::Validation(format!(
            "page_wait must be <= {}s, got {}s",
            MAX_PAGE_WAIT_SECS, config.page_wait
        )));
    }

    Ok(())
}

/// Validates audit service configuration
fn validate_auditor_config(config: &AuditorConfig) -> Result<(), ConfigError> {
    let endpoint = Url::parse(&config.endpoint).map_err(|e| {
        ConfigError::InvalidUrl(format!("Invalid endpoint '{}': {}", config.endpoint, e))
    })?;

    if endpoint.scheme() != "http" && endpoint.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "Endpoint '{}' must use http or https",
            config.endpoint
        )));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout_secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.out_prefix.is_empty() {
        return Err(ConfigError::Validation(
            "out_prefix cannot be empty".to_string(),
        ));
    }

    if config.formats.is_empty() {
        return Err(ConfigError::Validation(
            "at least one output format is required".to_string(),
        ));
    }

    for format in &config.formats {
        format
            .parse::<ReportFormat>()
            .map_err(ConfigError::Validation)?;
    }

    Ok(())
}
