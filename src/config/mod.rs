//! Configuration module for metafilter
//!
//! Manages application configuration: database location, default user,
//! message locale and output verbosity. Configuration is stored in the
//! user's config directory and can be overridden with `METAFILTER_*`
//! environment variables (e.g. `METAFILTER_LOCALE=fr`).

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

fn default_locale() -> String {
    "en".to_string()
}

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct MetaFilterConfig {
    /// Database directory; defaults to the platform data directory
    #[serde(default)]
    pub database: Option<PathBuf>,

    /// Default acting user when `--user` and `METAFILTER_USER` are absent
    #[serde(default)]
    pub user: Option<String>,

    /// Locale of the message catalog
    #[serde(default = "default_locale")]
    pub locale: String,

    /// Suppress informational output by default
    #[serde(default)]
    pub quiet: bool,
}

impl Default for MetaFilterConfig {
    fn default() -> Self {
        Self {
            database: None,
            user: None,
            locale: default_locale(),
            quiet: false,
        }
    }
}

impl MetaFilterConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;

        Ok(config_dir.join("metafilter").join("config.toml"))
    }

    /// Load configuration from the default location, creating it if it doesn't exist
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read, parsed, or created.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path`, creating a default file if it doesn't exist
    ///
    /// Environment variables prefixed with `METAFILTER_` override file values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read, parsed, or created.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            Self::default().save_to(path)?;
        }

        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml))
            .add_source(Environment::with_prefix("METAFILTER"))
            .build()?;

        settings.try_deserialize()
    }

    /// Save configuration to the default location
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the configuration cannot be written.
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
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Message(format!("Failed to create config directory: {e}")))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        fs::write(path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Database directory to open
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if no database is configured and the platform data
    /// directory cannot be determined.
    pub fn database_path(&self) -> Result<PathBuf, ConfigError> {
        if let Some(path) = &self.database {
            return Ok(path.clone());
        }

        let data_dir = dirs::data_local_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine data directory".to_string()))?;
        Ok(data_dir.join("metafilter").join("db"))
    }

    /// Update a setting by key
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for unknown keys or unparsable values.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "database" => self.database = non_empty(value).map(PathBuf::from),
            "user" => self.user = non_empty(value).map(str::to_string),
            "locale" => {
                self.locale = non_empty(value).map_or_else(default_locale, str::to_string);
            }
            "quiet" => {
                self.quiet = value
                    .parse()
                    .map_err(|_| ConfigError::Message(format!("Invalid value for quiet: {value}")))?;
            }
            _ => return Err(ConfigError::NotFound(key.to_string())),
        }
        Ok(())
    }

    /// Read a setting by key, formatted for display
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` for unknown keys.
    pub fn get(&self, key: &str) -> Result<String, ConfigError> {
        let value = match key {
            "database" => self
                .database
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
            "user" => self.user.clone().unwrap_or_default(),
            "locale" => self.locale.clone(),
            "quiet" => self.quiet.to_string(),
            _ => return Err(ConfigError::NotFound(key.to_string())),
        };
        Ok(value)
    }
}

fn non_empty(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}
