//! Metafilter - saved filter presets for UI views
//!
//! This library stores named filter presets per view and per user in an
//! embedded database. Presets are private to their owner unless shared, and
//! only the owner may change a preset's sharing or delete it.

use thiserror::Error;

pub mod cli;
pub mod commands;
pub mod config;
pub mod db;
pub mod filters;
pub mod i18n;
pub mod output;
pub mod session;

#[cfg(test)]
pub mod testing;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum MetaFilterError {
    /// Database error
    #[error("Database error: {0}")]
    DbError(#[from] db::DbError),
    /// Filter operation error
    #[error("{0}")]
    FilterError(#[from] filters::FilterError),
    /// No acting user could be determined
    #[error("{0}")]
    SessionError(#[from] session::SessionError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ::config::ConfigError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// Output could not be serialized
    #[error("Serialization error: {0}")]
    SerializationError(String),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<toml::ser::Error> for MetaFilterError {
    fn from(err: toml::ser::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

impl From<serde_json::Error> for MetaFilterError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}
