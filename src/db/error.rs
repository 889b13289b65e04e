//! Database-specific error types
//!
//! # Error Types
//!
//! - **`SledError`**: Errors from the underlying sled embedded database
//! - **`DecodeError`**: Failures when deserializing records from the database
//! - **`EncodeError`**: Failures when serializing records to the database
//! - **`SerializeError`**: Malformed keys or other representation problems

use thiserror::Error;

/// Database-specific errors
#[derive(Debug, Error)]
pub enum DbError {
    /// Represents a sled database error
    #[error("Database error: {0}")]
    SledError(#[from] sled::Error),

    /// Represents a bincode decoding error
    #[error("Error while decoding data: {0}")]
    DecodeError(#[from] bincode::error::DecodeError),

    /// Represents a bincode encoding error
    #[error("Error while encoding data: {0}")]
    EncodeError(#[from] bincode::error::EncodeError),

    /// Generic serialization/deserialization error
    #[error("Error during serialization: {0}")]
    SerializeError(String),
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
