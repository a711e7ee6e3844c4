//! HTTP client for an axe audit service
//!
//! The service loads the page in a real browser, runs axe-core, and answers
//! with the axe results object. This module handles:
//! - building the HTTP client with the configured user agent and timeout
//! - sending one audit request per page
//! - classifying transport, status and decoding failures

use crate::audit::{Auditor, PageResult};
use crate::config::AuditorConfig;
use crate::scoring::{AxeResults, Finding};
use crate::ConfigError;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Longest error body excerpt kept in a failure description
const MAX_ERROR_BODY: usize = 200;

/// Reasons a single page audit can fail
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("Request timeout")]
    Timeout,

    #[error("Connection refused by audit service")]
    Connect,

    #[error("Audit request failed: {0}")]
    Transport(String),

    #[error("Audit service returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Invalid audit results: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<reqwest::Error> for AuditError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            AuditError::Timeout
        } else if e.is_connect() {
            AuditError::Connect
        } else {
            AuditError::Transport(e.to_string())
        }
    }
}

/// Body of an audit request
#[derive(Debug, Serialize)]
struct AuditRequest<'a> {
    url: &'a str,
    wait_seconds: u64,
}

/// Audits pages through an HTTP axe service
#[derive(Debug, Clone)]
pub struct RemoteAuditor {
    client: Client,
    endpoint: Url,
}

impl RemoteAuditor {
    /// Builds an auditor from the audit service configuration
    ///
    /// # Returns
    ///
    /// * `Ok(RemoteAuditor)` - Ready to send audit requests
    /// * `Err(SweepError)` - Invalid endpoint or failed to build the client
    pub fn new(config: &AuditorConfig) -> crate::Result<Self> {
        let endpoint = Url::parse(&config.endpoint).map_err(|e| {
            ConfigError::InvalidUrl(format!("Invalid endpoint '{}': {}", config.endpoint, e))
        })?;

        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .gzip(true)
            .brotli(true)
            .build()?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Sends one audit request and decodes the reported violations
    pub async fn request_findings(
        &self,
        url: &str,
        wait_seconds: u64,
    ) -> Result<Vec<Finding>, AuditError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&AuditRequest { url, wait_seconds })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(AuditError::Status {
                status,
                body: excerpt(&body),
            });
        }

        let results: AxeResults = serde_json::from_str(&body)?;
        Ok(results.violations)
    }
}

impl Auditor for RemoteAuditor {
    async fn audit(&self, url: &str, wait_seconds: u64) -> PageResult {
        match self.request_findings(url, wait_seconds).await {
            Ok(findings) => {
                tracing::debug!("{}: {} violation(s)", url, findings.len());
                PageResult::audited(url, findings)
            }
            Err(e) => {
                tracing::warn!("Audit failed for {}: {}", url, e);
                PageResult::failed(url, e.to_string())
            }
        }
    }
}

/// Trims an error body to a single short line
fn excerpt(body: &str) -> String {
    let line = body.split_whitespace().collect::<Vec<_>>().join(" ");
    if line.chars().count() <= MAX_ERROR_BODY {
        return line;
    }
    let mut cut: String = line.chars().take(MAX_ERROR_BODY).collect();
    cut.push_str("...");
    cut
}
