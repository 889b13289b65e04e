//! Unit tests for database error types

#[cfg(test)]
mod tests {
    use crate::db::error::DbError;
    use std::error::Error;

    #[test]
    fn test_serialize_error() {
        let error = DbError::SerializeError("Invalid filter key length: 3".to_string());
        assert_eq!(
            error.to_string(),
            "Error during serialization: Invalid filter key length: 3"
        );
    }

    #[test]
    fn test_serialize_error_has_no_source() {
        let error = DbError::SerializeError("bad key".to_string());
        assert!(error.source().is_none());
    }

    #[test]
    fn test_sled_error_conversion() {
        let error: DbError = sled::Error::Unsupported("nope".to_string()).into();
        assert!(matches!(error, DbError::SledError(_)));
        assert!(error.to_string().starts_with("Database error:"));
        assert!(error.source().is_some());
    }

    #[test]
    fn test_error_debug() {
        let error = DbError::SerializeError("test error".to_string());
        let debug = format!("{error:?}");
        assert!(debug.contains("SerializeError"));
        assert!(debug.contains("test error"));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DbError>();
    }
}
