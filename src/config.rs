//! Configuration types for fetch operations.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// URL fetched when no URLs are given on the command line.
pub const DEFAULT_URL: &str =
    "https://www.wwf.org.au/Images/UserUploadedImages/416/img-koala-eating-leaf-queensland-1000px.jpg";

/// Configuration for fetch operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Directory downloaded files are written to; created if absent.
    pub download_dir: PathBuf,
    /// Whether a failed URL lets the rest of the batch continue.
    pub keep_going: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            download_dir: PathBuf::from("."),
            keep_going: false,
        }
    }
}

impl FetchConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the download directory.
    #[must_use]
    pub fn with_download_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.download_dir = dir.into();
        self
    }

    /// Sets whether the batch continues past a failed URL.
    #[must_use]
    pub const fn with_keep_going(mut self, keep_going: bool) -> Self {
        self.keep_going = keep_going;
        self
    }
}

/// Complete application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// URL used when none are supplied.
    pub default_url: String,
    /// Fetch configuration.
    pub fetch: FetchConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_url: DEFAULT_URL.to_string(),
            fetch: FetchConfig::default(),
        }
    }
}

impl AppConfig {
    /// Creates a new config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Location of the user config file, if a config directory is known.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tee-dl").join("config.toml"))
    }

    /// Loads configuration from the user config file, falling back to defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Loads configuration from `path`; a missing file yields defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(Error::Io(e)),
        };
        let config = toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_fetch_config() {
        let config = FetchConfig::default();
        assert_eq!(config.download_dir, PathBuf::from("."));
        assert!(!config.keep_going);
    }

    #[test]
    fn fetch_config_builder_pattern() {
        let config = FetchConfig::new()
            .with_download_dir("downloads")
            .with_keep_going(true);

        assert_eq!(config.download_dir, PathBuf::from("downloads"));
        assert!(config.keep_going);
    }

    #[test]
    fn default_app_config() {
        let config = AppConfig::new();
        assert_eq!(config.default_url, DEFAULT_URL);
        assert_eq!(config.fetch, FetchConfig::default());
    }

    #[test]
    fn app_config_roundtrips_through_toml() {
        let config = AppConfig {
            default_url: "https://example.com/file.bin".to_string(),
            fetch: FetchConfig::new().with_keep_going(true),
        };
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn load_from_missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn load_from_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[fetch]\ndownload_dir = \"downloads\"\n").unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.fetch.download_dir, PathBuf::from("downloads"));
        assert!(!config.fetch.keep_going);
        assert_eq!(config.default_url, DEFAULT_URL);
    }

    #[test]
    fn load_from_malformed_file_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "fetch = [not toml").unwrap();

        let err = AppConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
