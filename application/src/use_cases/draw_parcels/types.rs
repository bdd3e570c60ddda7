//! Type definitions for the DrawParcels use case.

use crate::ports::drawing::DrawingError;
use chrono::{DateTime, Utc};
use parcel_domain::{AciColor, Crs, DrawMode, ParcelId, RunState, Zone};
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Label height used when coordinates are reprojected into a zone CRS
pub const DEFAULT_TEXT_HEIGHT_REPROJECTED: f64 = 10.0;
/// Label height used for native PUWG 1992 coordinates
pub const DEFAULT_TEXT_HEIGHT: f64 = 2.5;

/// Errors that end a run without saving
#[derive(Error, Debug)]
pub enum DrawParcelsError {
    #[error("No parcel identifiers given")]
    NoIdentifiers,

    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    #[error(
        "Parcel {identifier} lies in {found}, but the batch was anchored to {expected}; \
         every parcel in one drawing must come from the same zone"
    )]
    WrongZone {
        identifier: ParcelId,
        expected: Zone,
        found: Zone,
    },

    #[error(
        "Parcel {identifier} does not belong to any known zone, but the batch was \
         anchored to {expected}"
    )]
    ZoneUnknown { identifier: ParcelId, expected: Zone },

    #[error("Cannot reach the parcel service: {0}")]
    Connection(String),

    #[error(transparent)]
    Save(#[from] DrawingError),
}

impl DrawParcelsError {
    /// Whether the error happened before anything was fetched
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            DrawParcelsError::NoIdentifiers | DrawParcelsError::InvalidOptions(_)
        )
    }
}

/// How parcels are rendered and where the drawing goes
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub draw_mode: DrawMode,
    pub outline_color: AciColor,
    pub add_identifier: bool,
    pub identifier_color: AciColor,
    /// Explicit label height; `None` picks a default from `reproject`
    pub identifier_text_height: Option<f64>,
    /// Move coordinates from PUWG 1992 into the batch zone's CRS
    pub reproject: bool,
    pub output_path: PathBuf,
}

impl RunOptions {
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self {
            draw_mode: DrawMode::default(),
            outline_color: AciColor::default(),
            add_identifier: false,
            identifier_color: AciColor::default(),
            identifier_text_height: None,
            reproject: false,
            output_path: output_path.into(),
        }
    }

    pub fn with_draw_mode(mut self, mode: DrawMode) -> Self {
        self.draw_mode = mode;
        self
    }

    pub fn with_outline_color(mut self, color: AciColor) -> Self {
        self.outline_color = color;
        self
    }

    /// Turn on identifier labels drawn in `color`
    pub fn with_identifier(mut self, color: AciColor) -> Self {
        self.add_identifier = true;
        self.identifier_color = color;
        self
    }

    pub fn with_text_height(mut self, height: f64) -> Self {
        self.identifier_text_height = Some(height);
        self
    }

    pub fn with_reproject(mut self, reproject: bool) -> Self {
        self.reproject = reproject;
        self
    }

    pub fn text_height(&self) -> f64 {
        match self.identifier_text_height {
            Some(height) => height,
            None if self.reproject => DEFAULT_TEXT_HEIGHT_REPROJECTED,
            None => DEFAULT_TEXT_HEIGHT,
        }
    }

    pub fn validate(&self) -> Result<(), DrawParcelsError> {
        let height = self.text_height();
        if !(height.is_finite() && height > 0.0) {
            return Err(DrawParcelsError::InvalidOptions(format!(
                "text height must be positive, got {height}"
            )));
        }
        if self.output_path.as_os_str().is_empty() {
            return Err(DrawParcelsError::InvalidOptions(
                "output path is empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Input for the DrawParcels use case
#[derive(Debug, Clone)]
pub struct DrawParcelsInput {
    pub identifiers: Vec<ParcelId>,
    pub options: RunOptions,
}

impl DrawParcelsInput {
    pub fn new(identifiers: Vec<ParcelId>, options: RunOptions) -> Self {
        Self {
            identifiers,
            options,
        }
    }
}

/// Outcome of a run, handed to the caller and to `on_run_finished`
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub state: RunState,
    pub total: usize,
    pub rendered: usize,
    /// Identifiers that failed, in the order they were consumed
    pub failed: Vec<ParcelId>,
    pub zone: Option<Zone>,
    /// CRS of the coordinates written to the drawing
    pub output_crs: Option<Crs>,
    pub output_path: PathBuf,
    pub saved: bool,
    pub failure_log: Option<PathBuf>,
    /// Set when the run ended in `Failed`
    pub error: Option<String>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl RunReport {
    pub fn is_success(&self) -> bool {
        self.state == RunState::Completed
    }

    pub fn duration_ms(&self) -> i64 {
        (self.finished_at - self.started_at).num_milliseconds()
    }
}

/// What happened to one consumed fetch result
#[derive(Debug, Clone, PartialEq)]
pub(super) enum ParcelOutcome {
    Rendered,
    Skipped,
    Stop,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_height_defaults() {
        let plain = RunOptions::new("out.dxf");
        assert_eq!(plain.text_height(), 2.5);

        let reprojected = RunOptions::new("out.dxf").with_reproject(true);
        assert_eq!(reprojected.text_height(), 10.0);

        let explicit = RunOptions::new("out.dxf")
            .with_reproject(true)
            .with_text_height(4.0);
        assert_eq!(explicit.text_height(), 4.0);
    }

    #[test]
    fn test_validate_rejects_non_positive_height() {
        assert!(RunOptions::new("out.dxf").validate().is_ok());
        assert!(
            RunOptions::new("out.dxf")
                .with_text_height(0.0)
                .validate()
                .is_err()
        );
        assert!(
            RunOptions::new("out.dxf")
                .with_text_height(f64::NAN)
                .validate()
                .is_err()
        );
        assert!(RunOptions::new("").validate().is_err());
    }

    #[test]
    fn test_with_identifier_turns_labels_on() {
        let options = RunOptions::new("out.dxf").with_identifier(AciColor::RED);
        assert!(options.add_identifier);
        assert_eq!(options.identifier_color, AciColor::RED);
    }

    #[test]
    fn test_report_serializes_state_and_zone() {
        let now = Utc::now();
        let report = RunReport {
            state: RunState::Completed,
            total: 1,
            rendered: 1,
            failed: vec![],
            zone: Some(Zone::Zone5),
            output_crs: Some(Crs::Puwg1992),
            output_path: PathBuf::from("out.dxf"),
            saved: true,
            failure_log: None,
            error: None,
            started_at: now,
            finished_at: now,
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["state"], "completed");
        assert_eq!(json["output_crs"], "EPSG:2180");
        assert!(report.is_success());
    }
}
