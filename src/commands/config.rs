//! Configuration command implementation

use crate::cli::ConfigCommands;
use crate::config::MetaFilterConfig;
use crate::MetaFilterError;

type Result<T> = std::result::Result<T, MetaFilterError>;

/// Execute a configuration subcommand against the default config file
///
/// # Errors
///
/// Returns `MetaFilterError` if the setting is malformed or the config file
/// cannot be read or written.
pub fn execute(command: &ConfigCommands, config: &mut MetaFilterConfig, quiet: bool) -> Result<()> {
    match command {
        ConfigCommands::Set { setting } => {
            let (key, value) = parse_setting(setting)?;
            config.set(key, value)?;
            config.save()?;
            if !quiet {
                println!("Set {key} = {}", config.get(key)?);
            }
        }
        ConfigCommands::Get { key } => {
            println!("{}", config.get(key)?);
        }
        ConfigCommands::Path => {
            println!("{}", MetaFilterConfig::config_path()?.display());
        }
    }
    Ok(())
}

/// Split a `KEY=VALUE` argument
///
/// # Errors
///
/// Returns `MetaFilterError::InvalidInput` if there is no `=` or the key is empty.
pub fn parse_setting(setting: &str) -> Result<(&str, &str)> {
    match setting.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => Ok((key.trim(), value.trim())),
        _ => Err(MetaFilterError::InvalidInput(format!(
            "Expected KEY=VALUE, got '{setting}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_setting() {
        assert_eq!(parse_setting("user=alice").unwrap(), ("user", "alice"));
        assert_eq!(parse_setting(" locale = fr ").unwrap(), ("locale", "fr"));
        assert_eq!(parse_setting("user=").unwrap(), ("user", ""));
        assert!(parse_setting("user").is_err());
        assert!(parse_setting("=alice").is_err());
    }
}
