//! Application layer for parcel-drawer
//!
//! This crate contains the drawing use case, port definitions, and fetch
//! configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{DEFAULT_CONCURRENCY, FetchParams};
pub use ports::{
    drawing::{DrawingDocument, DrawingError, DrawingStore},
    error_policy::{AutoContinuePolicy, AutoStopPolicy, ErrorPolicyError, ErrorPolicyPort},
    failure_log::{FailureLogError, FailureLogPort},
    geometry_source::{FetchError, GeometrySource},
    progress::{NoProgress, ProgressNotifier},
};
pub use use_cases::draw_parcels::{
    DEFAULT_TEXT_HEIGHT, DEFAULT_TEXT_HEIGHT_REPROJECTED, DrawParcelsError, DrawParcelsInput,
    DrawParcelsUseCase, RunOptions, RunReport,
};
