//! Failure log adapters

mod file;

pub use file::FileFailureLog;
