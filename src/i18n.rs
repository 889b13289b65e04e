//! Message translation
//!
//! User-facing messages are looked up by their English text. Translations
//! come from flat TOML tables stored next to the configuration:
//!
//! ```toml
//! # ~/.config/metafilter/messages_fr.toml
//! "You are not allowed to remove this filter" = "Vous n'êtes pas autorisé à supprimer ce filtre"
//! ```
//!
//! Missing catalogs and missing keys fall back to the key itself.

use config::ConfigError;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Message shown when a user tries to remove a filter they do not own
pub const NOT_ALLOWED_TO_REMOVE: &str = "You are not allowed to remove this filter";

/// Translations for one locale
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    messages: HashMap<String, String>,
}

impl Catalog {
    /// Load the catalog for `locale` from the configuration directory
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config directory cannot be determined or
    /// an existing catalog file cannot be read or parsed.
    pub fn load(locale: &str) -> Result<Self, ConfigError> {
        Self::from_path(&Self::catalog_path(locale)?)
    }

    /// Path of the catalog file for `locale`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn catalog_path(locale: &str) -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;
        Ok(config_dir
            .join("metafilter")
            .join(format!("messages_{locale}.toml")))
    }

    /// Load a catalog file, returning an empty catalog if it does not exist
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file exists but cannot be read or parsed.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .map_err(|e| ConfigError::Message(format!("Failed to read message catalog: {e}")))?;
        Self::from_toml(&contents)
    }

    /// Parse a catalog from TOML text
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the text is not a flat table of strings.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let messages: HashMap<String, String> = toml::from_str(contents)
            .map_err(|e| ConfigError::Message(format!("Invalid message catalog: {e}")))?;
        Ok(Self { messages })
    }

    /// Translate `key`, or return it unchanged if there is no translation
    #[must_use]
    pub fn get(&self, key: &str) -> String {
        self.messages
            .get(key)
            .filter(|value| !value.is_empty())
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_catalog_falls_back_to_key() {
        let catalog = Catalog::default();
        assert_eq!(catalog.get(NOT_ALLOWED_TO_REMOVE), NOT_ALLOWED_TO_REMOVE);
    }

    #[test]
    fn test_translation() {
        let catalog = Catalog::from_toml(
            r#""You are not allowed to remove this filter" = "Sie dürfen diesen Filter nicht entfernen""#,
        )
        .unwrap();

        assert_eq!(
            catalog.get(NOT_ALLOWED_TO_REMOVE),
            "Sie dürfen diesen Filter nicht entfernen"
        );
        assert_eq!(catalog.get("Unknown"), "Unknown");
    }

    #[test]
    fn test_blank_translation_falls_back() {
        let catalog = Catalog::from_toml(r#""Hello" = """#).unwrap();
        assert_eq!(catalog.get("Hello"), "Hello");
    }

    #[test]
    fn test_invalid_catalog() {
        assert!(Catalog::from_toml("key = [1, 2]").is_err());
    }

    #[test]
    fn test_missing_file_falls_back_to_key() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = Catalog::from_path(&dir.path().join("messages_xx.toml")).unwrap();
        assert_eq!(catalog.get(NOT_ALLOWED_TO_REMOVE), NOT_ALLOWED_TO_REMOVE);
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("messages_fr.toml");
        fs::write(&path, "\"Save\" = \"Enregistrer\"\n").unwrap();

        let catalog = Catalog::from_path(&path).unwrap();
        assert_eq!(catalog.get("Save"), "Enregistrer");
    }
}
