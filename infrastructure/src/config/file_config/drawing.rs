//! Drawing configuration from TOML (`[drawing]` section)

use parcel_domain::{AciColor, ConfigIssue, ConfigIssueCode, DrawMode, Severity};
use serde::{Deserialize, Serialize};

const COLOR_NAMES: [&str; 8] = [
    "red", "yellow", "green", "cyan", "blue", "magenta", "black", "white",
];

/// Raw drawing configuration from TOML
///
/// # Example
///
/// ```toml
/// [drawing]
/// mode = "lines"
/// color = "green"
/// label = true
/// label_color = "red"
/// reproject = true
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDrawingConfig {
    /// "polygon" or "lines"
    pub mode: String,
    /// Outline color name or ACI index
    pub color: String,
    /// Add identifier labels
    pub label: bool,
    pub label_color: String,
    /// Label height; unset picks 10 with reprojection, 2.5 without
    pub text_height: Option<f64>,
    /// Reproject into the batch's PUWG 2000 zone
    pub reproject: bool,
}

impl Default for FileDrawingConfig {
    fn default() -> Self {
        Self {
            mode: "polygon".to_string(),
            color: "white".to_string(),
            label: false,
            label_color: "white".to_string(),
            text_height: None,
            reproject: false,
        }
    }
}

impl FileDrawingConfig {
    pub fn parse_mode(&self) -> (DrawMode, Vec<ConfigIssue>) {
        match self.mode.parse::<DrawMode>() {
            Ok(mode) => (mode, vec![]),
            Err(_) => {
                let issue = ConfigIssue {
                    severity: Severity::Warning,
                    code: ConfigIssueCode::InvalidEnumValue {
                        field: "drawing.mode".to_string(),
                        value: self.mode.clone(),
                        valid_values: vec!["polygon".to_string(), "lines".to_string()],
                    },
                    message: format!(
                        "drawing.mode: unknown value '{}', falling back to 'polygon'",
                        self.mode
                    ),
                };
                (DrawMode::default(), vec![issue])
            }
        }
    }

    pub fn parse_color(&self) -> (AciColor, Vec<ConfigIssue>) {
        parse_color_field("drawing.color", &self.color)
    }

    pub fn parse_label_color(&self) -> (AciColor, Vec<ConfigIssue>) {
        parse_color_field("drawing.label_color", &self.label_color)
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        issues.extend(self.parse_mode().1);
        issues.extend(self.parse_color().1);
        issues.extend(self.parse_label_color().1);

        if let Some(height) = self.text_height
            && !(height.is_finite() && height > 0.0)
        {
            issues.push(ConfigIssue {
                severity: Severity::Error,
                code: ConfigIssueCode::OutOfRange {
                    field: "drawing.text_height".to_string(),
                    value: height.to_string(),
                },
                message: format!("drawing.text_height: must be positive, got {height}"),
            });
        }

        issues
    }
}

fn parse_color_field(field: &str, value: &str) -> (AciColor, Vec<ConfigIssue>) {
    match value.parse::<AciColor>() {
        Ok(color) => (color, vec![]),
        Err(_) => {
            let issue = ConfigIssue {
                severity: Severity::Warning,
                code: ConfigIssueCode::InvalidEnumValue {
                    field: field.to_string(),
                    value: value.to_string(),
                    valid_values: COLOR_NAMES.iter().map(|s| s.to_string()).collect(),
                },
                message: format!("{field}: unknown color '{value}', falling back to 'white'"),
            };
            (AciColor::default(), vec![issue])
        }
    }
}
