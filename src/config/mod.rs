//! Configuration module for imgmeta
//!
//! Settings live in `<config_dir>/imgmeta/config.toml` and can be overridden
//! by `IMGMETA_*` environment variables (for example `IMGMETA_EXIFTOOL` or
//! `IMGMETA_EXTENSIONS=jpg,png`). Command-line flags override both.

use std::fs;
use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::batch::WorkerPool;
use crate::gateway::ExifTool;
use crate::targets::ExtensionFilter;

/// Path display format
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PathFormat {
    /// Display absolute paths
    #[default]
    Absolute,
    /// Display paths relative to the current directory
    Relative,
}

fn default_exiftool() -> String {
    ExifTool::DEFAULT_PROGRAM.to_string()
}

fn default_extensions() -> Vec<String> {
    ["jpg", "jpeg", "png", "heic", "tif", "tiff"]
        .iter()
        .map(ToString::to_string)
        .collect()
}

const fn default_jobs() -> usize {
    WorkerPool::DEFAULT_SIZE
}

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ImgmetaConfig {
    /// exiftool executable name or path
    #[serde(default = "default_exiftool")]
    pub exiftool: String,

    /// Extensions admitted when expanding directories and globs
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Descend into subdirectories by default
    #[serde(default)]
    pub recursive: bool,

    /// Number of files processed concurrently
    #[serde(default = "default_jobs")]
    pub jobs: usize,

    /// Suppress informational output by default
    #[serde(default)]
    pub quiet: bool,

    /// Default format for displaying paths (absolute or relative)
    #[serde(default)]
    pub path_format: PathFormat,
}

impl Default for ImgmetaConfig {
    fn default() -> Self {
        Self {
            exiftool: default_exiftool(),
            extensions: default_extensions(),
            recursive: false,
            jobs: default_jobs(),
            quiet: false,
            path_format: PathFormat::default(),
        }
    }
}

impl ImgmetaConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            ConfigError::Message("Could not determine config directory".to_string())
        })?;
        Ok(config_dir.join("imgmeta").join("config.toml"))
    }

    /// Load configuration from the default location, creating it if missing
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read, parsed, or created.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path`, writing the defaults there first if
    /// the file does not exist. Environment overrides are applied on top.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read, parsed, or created,
    /// or if a value is out of range.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "writing default configuration");
            Self::default().save_to(path)?;
        }

        let settings = Config::builder()
            .add_source(File::from(path.to_path_buf()).format(FileFormat::Toml))
            .add_source(
                Environment::with_prefix("IMGMETA")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("extensions"),
            )
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to the default location
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be written.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to `path`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config directory cannot be created, the configuration
    /// cannot be serialized to TOML, or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                ConfigError::Message(format!("Failed to create config directory: {e}"))
            })?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        fs::write(path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Reject values the rest of the program cannot work with
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `jobs` is zero or `exiftool` is blank.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jobs == 0 {
            return Err(ConfigError::Message("jobs must be at least 1".to_string()));
        }
        if self.exiftool.trim().is_empty() {
            return Err(ConfigError::Message(
                "exiftool must name an executable".to_string(),
            ));
        }
        Ok(())
    }

    /// Extension filter built from the configured extensions
    #[must_use]
    pub fn extension_filter(&self) -> ExtensionFilter {
        ExtensionFilter::new(&self.extensions)
    }
}
