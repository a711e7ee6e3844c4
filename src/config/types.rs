use serde::Deserialize;

/// Main configuration structure for wcag-sweep
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(default)]
    pub auditor: AuditorConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Scan behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Maximum number of pages to audit (0 disables the cap)
    #[serde(rename = "max-pages")]
    pub max_pages: usize,

    /// Seconds the audit service waits after the page has loaded
    #[serde(rename = "page-wait")]
    pub page_wait: u64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            max_pages: 100,
            page_wait: 5,
        }
    }
}

/// Audit service configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuditorConfig {
    /// Endpoint accepting audit requests and answering with axe results
    pub endpoint: String,

    /// Request timeout for a single page audit (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// User agent sent to the audit service
    #[serde(rename = "user-agent")]
    pub user_agent: String,
}

impl Default for AuditorConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:8085/axe".to_string(),
            timeout_secs: 60,
            user_agent: format!("wcag-sweep/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Prefix of the generated report files
    #[serde(rename = "out-prefix")]
    pub out_prefix: String,

    /// Report formats to write (html, markdown, json)
    pub formats: Vec<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            out_prefix: "report_accessibility".to_string(),
            formats: vec!["html".to_string()],
        }
    }
}
