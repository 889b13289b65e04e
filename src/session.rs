//! Acting identity for filter operations
//!
//! Every filter operation takes the acting user explicitly. This module owns
//! the identity type and the lookup that turns CLI flags, environment and
//! configuration into a `UserCode`.

use crate::config::MetaFilterConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Environment variable consulted when no `--user` flag is given
pub const USER_ENV: &str = "METAFILTER_USER";

/// Errors raised while resolving the acting identity
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    /// No identity was supplied by any source
    #[error("No authenticated user (pass --user, set {USER_ENV} or configure `user`)")]
    Unauthenticated,
}

/// Login code identifying a user
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserCode(String);

impl UserCode {
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Resolve the acting user
///
/// Sources are consulted in order: the explicit value (usually `--user`),
/// the `METAFILTER_USER` environment variable, then `config.user`. Blank
/// values are skipped.
///
/// # Errors
///
/// Returns `SessionError::Unauthenticated` if no source yields a user.
pub fn resolve_user(
    explicit: Option<&str>,
    config: &MetaFilterConfig,
) -> Result<UserCode, SessionError> {
    let from_env = std::env::var(USER_ENV).ok();
    resolve_from(explicit, from_env.as_deref(), config.user.as_deref())
}

fn resolve_from(
    explicit: Option<&str>,
    env: Option<&str>,
    configured: Option<&str>,
) -> Result<UserCode, SessionError> {
    [explicit, env, configured]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|code| !code.is_empty())
        .map(UserCode::new)
        .ok_or(SessionError::Unauthenticated)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_user_wins() {
        let user = resolve_from(Some("alice"), Some("bob"), Some("carol")).unwrap();
        assert_eq!(user, UserCode::new("alice"));
    }

    #[test]
    fn test_env_before_config() {
        let user = resolve_from(None, Some("bob"), Some("carol")).unwrap();
        assert_eq!(user.as_str(), "bob");
    }

    #[test]
    fn test_blank_values_skipped() {
        let user = resolve_from(Some("  "), Some(""), Some("carol")).unwrap();
        assert_eq!(user.as_str(), "carol");
    }

    #[test]
    fn test_no_identity() {
        assert_eq!(
            resolve_from(None, None, None),
            Err(SessionError::Unauthenticated)
        );
    }

    #[test]
    fn test_user_code_serializes_transparently() {
        let json = serde_json::to_string(&UserCode::new("admin")).unwrap();
        assert_eq!(json, "\"admin\"");
    }
}
