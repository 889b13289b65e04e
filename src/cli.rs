//! Command-line interface definitions and parsing
//!
//! This module defines the CLI structure for metafilter using the `clap` crate.
//!
//! # Commands
//!
//! - **save**: Create or update a filter preset on a view
//! - **remove**: Delete one of your presets
//! - **list**: Presets visible to you on a view
//! - **show**: Details of a single preset
//! - **export**: Dump the visible presets of a view as TOML
//! - **config**: Read and change configuration values
//!
//! Global flags (`--user`, `--db`, `--quiet`) may appear before or after the
//! subcommand.

use crate::filters::Filter;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Saved filter presets for UI views
#[derive(Parser, Debug)]
#[command(name = "metafilter", version, about, long_about = None)]
pub struct Cli {
    /// Suppress informational output
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,

    /// Acting user (overrides METAFILTER_USER and the configured user)
    #[arg(short = 'u', long = "user", value_name = "CODE", global = true)]
    pub user: Option<String>,

    /// Database directory (overrides the configured database)
    #[arg(long = "db", value_name = "PATH", global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Parse command line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// View selector shared by the filter commands
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ViewArgs {
    /// UI view the preset belongs to
    #[arg(short = 'v', long = "view", value_name = "VIEW")]
    pub view: String,
}

/// Arguments of the save command
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct SaveArgs {
    /// Name of the preset
    pub name: String,

    #[command(flatten)]
    pub view: ViewArgs,

    /// Display title (defaults to the name)
    #[arg(short = 't', long = "title")]
    pub title: Option<String>,

    /// Structured filter expression (JSON)
    #[arg(short = 'f', long = "filters", value_name = "JSON")]
    pub filters: Option<String>,

    /// Custom filter expression
    #[arg(short = 'c', long = "custom", value_name = "EXPR")]
    pub custom: Option<String>,

    /// Share the preset with every user of the view
    #[arg(short = 's', long = "shared")]
    pub shared: bool,
}

impl SaveArgs {
    /// Build the candidate filter passed to the service
    #[must_use]
    pub fn to_candidate(&self) -> Filter {
        let mut filter = Filter::new(self.name.clone(), self.view.view.clone())
            .with_title(self.title.clone().unwrap_or_else(|| self.name.clone()))
            .with_shared(self.shared);
        filter.filters.clone_from(&self.filters);
        filter.filter_custom.clone_from(&self.custom);
        filter
    }
}

/// Output format for listings
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human readable table
    #[default]
    Text,
    /// JSON array
    Json,
    /// TOML `[[filter]]` tables
    Toml,
}

/// Top-level subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Create or update a filter preset
    Save(SaveArgs),

    /// Remove one of your filter presets
    #[command(visible_alias = "rm")]
    Remove {
        /// Name of the preset
        name: String,

        #[command(flatten)]
        view: ViewArgs,
    },

    /// List presets visible to you on a view
    #[command(visible_alias = "ls")]
    List {
        #[command(flatten)]
        view: ViewArgs,

        /// Output format
        #[arg(long = "format", value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Show details of a preset
    Show {
        /// Name of the preset
        name: String,

        #[command(flatten)]
        view: ViewArgs,
    },

    /// Export presets visible to you on a view as TOML
    Export {
        #[command(flatten)]
        view: ViewArgs,

        /// Write to this file instead of stdout
        #[arg(short = 'o', long = "output", value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Manage configuration settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

/// Configuration management subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Set a configuration value
    Set {
        /// Configuration key=value (e.g., user=alice)
        #[arg(value_name = "KEY=VALUE")]
        setting: String,
    },

    /// Get a configuration value
    Get {
        /// Configuration key to retrieve (database, user, locale, quiet)
        #[arg(value_name = "KEY")]
        key: String,
    },

    /// Print the configuration file location
    Path,
}
