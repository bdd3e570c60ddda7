//! Presentation-level configuration
//!
//! How the final report and progress are shown.

use parcel_domain::OutputFormat;

/// Output configuration for the presentation layer
#[derive(Debug, Clone, PartialEq)]
pub struct OutputConfig {
    /// Report format
    pub format: OutputFormat,
    /// Enable colored terminal output
    pub color: bool,
    /// Show the progress bar
    pub show_progress: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            color: true,
            show_progress: true,
        }
    }
}

impl OutputConfig {
    /// Combine the file setting with command line flags; flags win.
    ///
    /// JSON output never shows a progress bar so stdout stays parseable.
    pub fn resolve(
        file_format: Option<OutputFormat>,
        file_color: bool,
        cli_format: Option<OutputFormat>,
        quiet: bool,
    ) -> Self {
        let format = cli_format.or(file_format).unwrap_or_default();
        Self {
            format,
            color: file_color,
            show_progress: !quiet && format == OutputFormat::Text,
        }
    }

    /// Turn colored output off globally when disabled
    pub fn apply_color(&self) {
        if !self.color {
            colored::control::set_override(false);
        }
    }
}
