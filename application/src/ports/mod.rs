//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod drawing;
pub mod error_policy;
pub mod failure_log;
pub mod geometry_source;
pub mod progress;
