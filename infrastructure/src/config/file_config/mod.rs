//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! Enum-like fields stay strings here and are parsed with warnings, so a
//! typo falls back to a default instead of rejecting the whole file.

mod drawing;
mod output;
mod service;

pub use drawing::FileDrawingConfig;
pub use output::{DEFAULT_FAILURE_LOG, FileOutputConfig, FileOutputFormat};
pub use service::{DEFAULT_BASE_URL, FileServiceConfig};

use parcel_domain::ConfigIssue;
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Parcel service settings
    pub service: FileServiceConfig,
    /// Rendering defaults
    pub drawing: FileDrawingConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        issues.extend(self.service.validate());
        issues.extend(self.drawing.validate());
        issues
    }
}
