//! Configuration file loading for parcel-drawer
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. Project root: `./parcel-drawer.toml` or `./.parcel-drawer.toml`
//! 3. Global: `$XDG_CONFIG_HOME/parcel-drawer/config.toml`
//! 4. Default values

mod file_config;
mod loader;

pub use file_config::{
    DEFAULT_BASE_URL, DEFAULT_FAILURE_LOG, FileConfig, FileDrawingConfig, FileOutputConfig,
    FileOutputFormat, FileServiceConfig,
};
pub use loader::ConfigLoader;
