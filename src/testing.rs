//! Testing utilities for metafilter
//!
//! Only available when compiled with `cfg(test)`.

use crate::db::Database;
use crate::filters::Filter;
use crate::session::UserCode;

/// Wrapper for a throwaway test database
///
/// Backed by a sled temporary database, which removes its files when dropped,
/// so tests don't leave artifacts behind.
pub struct TestDb {
    db: Database,
}

impl TestDb {
    /// Create a new empty test database
    ///
    /// # Panics
    /// Panics if the database cannot be opened.
    #[must_use]
    pub fn new() -> Self {
        let db = Database::temporary().expect("Failed to open test database");
        Self { db }
    }

    /// Get a reference to the underlying database
    #[must_use]
    pub const fn db(&self) -> &Database {
        &self.db
    }

    /// Store `filter` as-is, bypassing the service
    ///
    /// # Panics
    /// Panics if the write fails.
    pub fn insert(&self, filter: Filter) -> Filter {
        self.db
            .transaction(|tx| tx.save(filter))
            .expect("Failed to insert test filter")
    }
}

impl Default for TestDb {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a stored-looking filter owned by `owner`
#[must_use]
pub fn owned_filter(name: &str, view: &str, owner: &str, shared: bool) -> Filter {
    let mut filter = Filter::new(name, view).with_shared(shared);
    filter.owner = Some(UserCode::new(owner));
    filter
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_testdb_starts_empty() {
        let test_db = TestDb::new();
        assert_eq!(test_db.db().count(), 0);
    }

    #[test]
    fn test_testdb_insert() {
        let test_db = TestDb::new();
        let stored = test_db.insert(owned_filter("f", "v", "alice", true));

        assert!(stored.id.is_some());
        assert_eq!(test_db.db().count(), 1);
    }

    #[test]
    fn test_databases_are_isolated() {
        let first = TestDb::new();
        let second = TestDb::new();
        first.insert(owned_filter("f", "v", "alice", false));

        assert_eq!(first.db().count(), 1);
        assert_eq!(second.db().count(), 0);
    }
}
