//! Drawing document port
//!
//! Defines the interface for the persistent vector drawing that parcels are
//! rendered into. The DXF adapter lives in the infrastructure layer.

use parcel_domain::{AciColor, Point};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when persisting a drawing
#[derive(Error, Debug)]
pub enum DrawingError {
    /// The destination directory does not exist
    #[error("Output directory does not exist: {}", .0.display())]
    PathNotFound(PathBuf),

    /// Serialising or writing the file failed
    #[error("Failed to write drawing: {0}")]
    Write(String),
}

/// Opens drawing documents
pub trait DrawingStore: Send + Sync {
    /// Load the document at `path`, or start an empty one when the file is
    /// missing or unreadable. Never fails.
    fn open_or_create(&self, path: &Path) -> Box<dyn DrawingDocument>;
}

/// An open drawing being mutated during a run
///
/// All operations except [`save`](DrawingDocument::save) touch memory only;
/// nothing reaches the disk until the run completes.
pub trait DrawingDocument: Send {
    /// Create the layer unless one with this name already exists.
    /// Names compare case-insensitively; existing layers are left untouched.
    fn ensure_layer(&mut self, name: &str, color: AciColor);

    /// Add one closed polyline through `points` and return how many
    /// entities were added: 0 when there are fewer than two points.
    fn add_polygon(&mut self, points: &[Point], layer: &str, color: AciColor) -> usize;

    /// Add a line entity for every adjacent pair in `points` and return how
    /// many were added. The last point is not joined back to the first.
    fn add_line_segments(&mut self, points: &[Point], layer: &str, color: AciColor) -> usize;

    /// Add a single-line text entity anchored at `position`
    fn add_text(&mut self, text: &str, position: Point, height: f64, layer: &str, color: AciColor);

    /// Number of entities currently held, including loaded ones
    fn entity_count(&self) -> usize;

    /// Write the document to `path`
    fn save(&mut self, path: &Path) -> Result<(), DrawingError>;
}
