//! Command implementations
//!
//! Each command takes parsed CLI args and runs the operation against the
//! filter service or the configuration.

pub mod config;
pub mod filter;

pub use config::execute as config;
