//! Key encoding for the filter tree
//!
//! Filter ids are stored as 8-byte big-endian keys so sled's lexicographic
//! key order is the same as ascending numeric id order.

use super::error::DbError;
use crate::filters::FilterId;

/// Database key for a filter record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdKey(pub FilterId);

impl IdKey {
    #[must_use]
    pub const fn new(id: FilterId) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn to_bytes(self) -> [u8; 8] {
        self.0.0.to_be_bytes()
    }

    /// # Errors
    ///
    /// Returns `DbError::SerializeError` if `bytes` is not exactly eight bytes long.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DbError> {
        let raw: [u8; 8] = bytes.try_into().map_err(|_| {
            DbError::SerializeError(format!("Invalid filter key length: {}", bytes.len()))
        })?;
        Ok(Self(FilterId(u64::from_be_bytes(raw))))
    }

    #[must_use]
    pub const fn into_inner(self) -> FilterId {
        self.0
    }
}
