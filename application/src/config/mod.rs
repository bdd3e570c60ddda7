//! Application-level configuration.
//!
//! - [`FetchParams`] - fetch concurrency and the source coordinate system

pub mod fetch_params;

pub use fetch_params::{DEFAULT_CONCURRENCY, FetchParams};
