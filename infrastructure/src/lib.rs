//! Infrastructure layer for parcel-drawer
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod drawing;
pub mod failure_log;
pub mod uldk;

// Re-export commonly used types
pub use config::{
    ConfigLoader, DEFAULT_BASE_URL, DEFAULT_FAILURE_LOG, FileConfig, FileDrawingConfig,
    FileOutputConfig, FileOutputFormat, FileServiceConfig,
};
pub use drawing::{DxfDocument, DxfDrawingStore};
pub use failure_log::FileFailureLog;
pub use uldk::{UldkGeometrySource, parse_uldk_response};
