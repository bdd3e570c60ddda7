//! Presentation layer for parcel-drawer
//!
//! This crate contains CLI definitions, identifier input handling,
//! output formatters, progress reporters, and the interactive error prompt.

pub mod cli;
pub mod config;
pub mod error_policy;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{Cli, OutputFormat};
pub use cli::input::{InputError, collect_identifiers};
pub use config::OutputConfig;
pub use error_policy::interactive::{InteractiveErrorPolicy, parse_decision};
pub use output::console::ConsoleFormatter;
pub use output::formatter::OutputFormatter;
pub use progress::reporter::{ProgressReporter, SimpleProgress};
