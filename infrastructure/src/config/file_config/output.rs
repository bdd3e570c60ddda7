//! Output configuration from TOML (`[output]` section)

use parcel_domain::OutputFormat;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// Re-export OutputFormat from domain for convenience
pub use parcel_domain::OutputFormat as FileOutputFormat;

/// Where the failure log goes unless configured otherwise
pub const DEFAULT_FAILURE_LOG: &str = "failed_identifiers.txt";

/// Raw output configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Default DXF path when `-o` is not given
    pub path: Option<PathBuf>,
    /// File receiving identifiers that could not be drawn
    pub failure_log: PathBuf,
    /// Report format (uses domain type)
    pub format: Option<OutputFormat>,
    /// Enable colored terminal output
    pub color: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            path: None,
            failure_log: PathBuf::from(DEFAULT_FAILURE_LOG),
            format: None,
            color: true,
        }
    }
}
