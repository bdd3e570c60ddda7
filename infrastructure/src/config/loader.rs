//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "parcel-drawer";
const PROJECT_FILES: [&str; 2] = ["parcel-drawer.toml", ".parcel-drawer.toml"];

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Explicit config path (if provided)
    /// 2. Project root: `./parcel-drawer.toml` or `./.parcel-drawer.toml`
    /// 3. Global: `$XDG_CONFIG_HOME/parcel-drawer/config.toml`
    /// 4. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        if let Some(path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(&path));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment.extract().map_err(Box::new)
    }

    /// Load a single file on top of the defaults, ignoring discovery
    pub fn load_file(path: &Path) -> Result<FileConfig, Box<figment::Error>> {
        Figment::new()
            .merge(Serialized::defaults(FileConfig::default()))
            .merge(Toml::file(path))
            .extract()
            .map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for --show-config)
    pub fn print_config_sources(explicit: Option<&PathBuf>) {
        println!("Configuration sources (in priority order):");

        if let Some(path) = explicit {
            let mark = if path.exists() { "FOUND" } else { "MISSING" };
            println!("  [{mark}] Explicit: {}", path.display());
        }

        match Self::project_config_path() {
            Some(path) => println!("  [FOUND] Project: {}", path.display()),
            None => println!("  [     ] Project: ./{} or ./{}", PROJECT_FILES[0], PROJECT_FILES[1]),
        }

        if let Some(path) = Self::global_config_path() {
            let mark = if path.exists() { "FOUND" } else { "     " };
            println!("  [{mark}] Global:  {}", path.display());
        }

        println!("  [     ] Default: built-in defaults");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.service.concurrency, 5);
        assert!(!config.drawing.reproject);
    }

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        assert!(path.unwrap().to_string_lossy().contains("parcel-drawer"));
    }

    #[test]
    fn test_load_file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[drawing]\nmode = \"lines\"\n\n[service]\nconcurrency = 2").unwrap();

        let config = ConfigLoader::load_file(file.path()).unwrap();
        assert_eq!(config.drawing.mode, "lines");
        assert_eq!(config.service.concurrency, 2);
        // Untouched keys keep their defaults
        assert_eq!(config.drawing.color, "white");
        assert_eq!(config.service.timeout_secs, 30);
    }

    #[test]
    fn test_load_file_rejects_wrong_types() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[service]\nconcurrency = \"many\"").unwrap();

        assert!(ConfigLoader::load_file(file.path()).is_err());
    }
}
