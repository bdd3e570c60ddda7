//! Failure log port
//!
//! Persists the identifiers that could not be drawn so they can be retried.

use parcel_domain::ParcelId;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FailureLogError {
    #[error("Failed to write failure log {}: {message}", .path.display())]
    Write { path: PathBuf, message: String },
}

/// Sink for the identifiers that failed in a completed run
pub trait FailureLogPort: Send + Sync {
    /// Persist `ids` in order and return where they went.
    /// Only called with a non-empty slice.
    fn write(&self, ids: &[ParcelId]) -> Result<PathBuf, FailureLogError>;
}

