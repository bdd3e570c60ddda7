//! Parcel service configuration from TOML (`[service]` section)

use parcel_application::{DEFAULT_CONCURRENCY, FetchParams};
use parcel_domain::{ConfigIssue, ConfigIssueCode, Severity};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Public ULDK endpoint
pub const DEFAULT_BASE_URL: &str = "https://uldk.gugik.gov.pl/";

/// Raw service configuration from TOML
///
/// # Example
///
/// ```toml
/// [service]
/// base_url = "https://uldk.gugik.gov.pl/"
/// timeout_secs = 30
/// concurrency = 5
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileServiceConfig {
    pub base_url: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Fetches in flight at once
    pub concurrency: usize,
    pub user_agent: String,
}

impl Default for FileServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            concurrency: DEFAULT_CONCURRENCY,
            user_agent: format!("parcel-drawer/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl FileServiceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }

    /// Build fetch parameters, raising a zero concurrency to 1.
    pub fn to_fetch_params(&self) -> (FetchParams, Vec<ConfigIssue>) {
        let mut issues = Vec::new();
        if self.concurrency == 0 {
            issues.push(ConfigIssue {
                severity: Severity::Warning,
                code: ConfigIssueCode::OutOfRange {
                    field: "service.concurrency".to_string(),
                    value: "0".to_string(),
                },
                message: "service.concurrency: must be at least 1, using 1".to_string(),
            });
        }
        let params = FetchParams::default().with_concurrency(self.concurrency);
        (params, issues)
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = self.to_fetch_params().1;

        if self.timeout_secs == 0 {
            issues.push(ConfigIssue {
                severity: Severity::Warning,
                code: ConfigIssueCode::OutOfRange {
                    field: "service.timeout_secs".to_string(),
                    value: "0".to_string(),
                },
                message: "service.timeout_secs: must be at least 1, using 1".to_string(),
            });
        }

        let url = self.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            issues.push(ConfigIssue {
                severity: Severity::Error,
                code: ConfigIssueCode::InvalidEnumValue {
                    field: "service.base_url".to_string(),
                    value: self.base_url.clone(),
                    valid_values: vec!["http://...".to_string(), "https://...".to_string()],
                },
                message: format!(
                    "service.base_url: '{}' is not an http(s) URL",
                    self.base_url
                ),
            });
        }

        issues
    }
}
