//! Error types for filter operations

use crate::db::DbError;
use thiserror::Error;

/// Errors that can occur during filter operations
#[derive(Debug, Error)]
pub enum FilterError {
    /// The acting user may not modify this filter (message is localized)
    #[error("{0}")]
    NotAllowed(String),

    /// Invalid filter name
    #[error("Invalid filter name '{0}': {1}")]
    InvalidName(String, String),

    /// Invalid view identifier
    #[error("Invalid filter view '{0}': {1}")]
    InvalidView(String, String),

    /// Persistence failure, passed through unchanged
    #[error(transparent)]
    Database(#[from] DbError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_allowed_shows_message_only() {
        let err = FilterError::NotAllowed("Vous ne pouvez pas supprimer ce filtre".into());
        assert_eq!(err.to_string(), "Vous ne pouvez pas supprimer ce filtre");
    }

    #[test]
    fn test_database_error_is_transparent() {
        let db_err = DbError::SerializeError("Invalid filter key length: 3".to_string());
        let expected = db_err.to_string();
        let err: FilterError = db_err.into();
        assert_eq!(err.to_string(), expected);
        assert!(matches!(err, FilterError::Database(DbError::SerializeError(_))));
    }
}
