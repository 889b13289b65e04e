//! Database wrapper module for metafilter
//!
//! Provides a clean API for storing and querying filter presets using sled
//! as the embedded database backend.
//!
//! Records live in a single `filters` tree keyed by big-endian id, so a
//! forward scan yields filters in ascending id (creation) order. Reads are
//! expressed with the composable criteria in [`query`]. Writes go through
//! [`Database::transaction`], which buffers them and commits them as one
//! atomic sled batch.

use crate::filters::{Filter, FilterId};
use sled::{Batch, Db, Tree};
use std::path::Path;
use std::sync::Mutex;
use tracing::{debug, warn};

pub mod error;
pub mod query;
pub mod types;

pub use error::DbError;
pub use types::IdKey;

use query::Criterion;

/// Database wrapper that encapsulates all database operations
pub struct Database {
    db: Db,
    filters: Tree, // id -> filter
    write_lock: Mutex<()>,
}

impl Database {
    /// Opens or creates a database at the specified path
    ///
    /// # Examples
    /// ```no_run
    /// use metafilter::db::Database;
    /// let db = Database::open("my_db").unwrap();
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the database or its trees cannot be opened.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, DbError> {
        debug!(path = %path.as_ref().display(), "opening filter database");
        Self::from_db(sled::open(path)?)
    }

    /// Opens a throwaway database that is deleted when dropped
    ///
    /// # Errors
    ///
    /// Returns `DbError` if sled cannot create the temporary database.
    pub fn temporary() -> Result<Self, DbError> {
        Self::from_db(sled::Config::new().temporary(true).open()?)
    }

    fn from_db(db: Db) -> Result<Self, DbError> {
        let filters = db.open_tree("filters")?;
        Ok(Self {
            db,
            filters,
            write_lock: Mutex::new(()),
        })
    }

    /// Get a filter by id
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the read fails or the record cannot be decoded.
    pub fn get(&self, id: FilterId) -> Result<Option<Filter>, DbError> {
        self.filters
            .get(IdKey::new(id).to_bytes())?
            .map(|value| decode(&value))
            .transpose()
    }

    /// All filters matching `criterion`, in ascending id order
    ///
    /// The store does not enforce uniqueness of any field, so several records
    /// may match a lookup that is meant to identify one.
    ///
    /// # Errors
    ///
    /// Returns `DbError` if iteration fails or a record cannot be decoded.
    pub fn fetch<C: Criterion<Filter>>(&self, criterion: &C) -> Result<Vec<Filter>, DbError> {
        let mut found = Vec::new();
        for result in &self.filters {
            let (key, value) = result?;
            let filter = decode_entry(&key, &value)?;
            if criterion.matches(&filter) {
                found.push(filter);
            }
        }
        Ok(found)
    }

    /// Get the number of stored filters
    #[must_use]
    pub fn count(&self) -> usize {
        self.filters.len()
    }

    /// Run `f` as a single atomic unit of work
    ///
    /// Writes staged through the [`Transaction`] are applied as one sled batch,
    /// and only if `f` returns `Ok`. An `Err` discards them. Transactions on the
    /// same `Database` are serialized, so a lookup followed by a write cannot
    /// interleave with another transaction in this process.
    ///
    /// # Errors
    ///
    /// Returns the closure's error, or `DbError` (converted into `E`) if the
    /// commit fails.
    pub fn transaction<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut Transaction<'_>) -> Result<T, E>,
        E: From<DbError>,
    {
        // guards no data; writes staged by a panicked closure are never applied
        let _guard = self.write_lock.lock().unwrap_or_else(|poisoned| {
            warn!("recovering filter write lock after a panicked transaction");
            self.write_lock.clear_poison();
            poisoned.into_inner()
        });

        let mut tx = Transaction {
            db: self,
            batch: Batch::default(),
            staged: 0,
        };

        let value = f(&mut tx)?;

        if tx.staged > 0 {
            debug!(writes = tx.staged, "committing filter transaction");
            self.filters.apply_batch(tx.batch).map_err(DbError::from)?;
        }

        Ok(value)
    }

    /// Flush all pending writes to disk
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the flush operation fails.
    pub fn flush(&self) -> Result<(), DbError> {
        self.db.flush()?;
        Ok(())
    }

    fn next_id(&self) -> Result<FilterId, DbError> {
        // sled ids start at zero, filter ids at one
        Ok(FilterId(self.db.generate_id()? + 1))
    }
}

impl Drop for Database {
    fn drop(&mut self) {
        // Best-effort flush on drop. Callers should explicitly flush()
        // if they need guaranteed durability.
        let _ = self.db.flush();
    }
}

/// Unit of work handed to [`Database::transaction`]
///
/// Reads see the committed state of the database. Writes are buffered until
/// the transaction closure returns successfully.
pub struct Transaction<'a> {
    db: &'a Database,
    batch: Batch,
    staged: usize,
}

impl Transaction<'_> {
    /// See [`Database::fetch`]
    ///
    /// # Errors
    ///
    /// Returns `DbError` if iteration fails or a record cannot be decoded.
    pub fn fetch<C: Criterion<Filter>>(&self, criterion: &C) -> Result<Vec<Filter>, DbError> {
        self.db.fetch(criterion)
    }

    /// Stage an insert or update and return the record as it will be stored
    ///
    /// Records without an id get a fresh one. An aborted transaction leaves a
    /// gap in the id sequence.
    ///
    /// # Errors
    ///
    /// Returns `DbError` if id allocation or encoding fails.
    pub fn save(&mut self, mut filter: Filter) -> Result<Filter, DbError> {
        let id = match filter.id {
            Some(id) => id,
            None => {
                let id = self.db.next_id()?;
                filter.id = Some(id);
                id
            }
        };

        let key = IdKey::new(id).to_bytes();
        self.batch.insert(&key[..], encode(&filter)?);
        self.staged += 1;
        Ok(filter)
    }

    /// Stage a delete
    ///
    /// Returns `false` for records that were never saved (no id).
    pub fn remove(&mut self, filter: &Filter) -> bool {
        match filter.id {
            Some(id) => {
                let key = IdKey::new(id).to_bytes();
                self.batch.remove(&key[..]);
                self.staged += 1;
                true
            }
            None => false,
        }
    }
}

fn encode(filter: &Filter) -> Result<Vec<u8>, DbError> {
    Ok(bincode::serde::encode_to_vec(
        filter,
        bincode::config::standard(),
    )?)
}

fn decode(bytes: &[u8]) -> Result<Filter, DbError> {
    let (filter, _): (Filter, usize) =
        bincode::serde::decode_from_slice(bytes, bincode::config::standard())?;
    Ok(filter)
}

// The key is authoritative for the id
fn decode_entry(key: &[u8], value: &[u8]) -> Result<Filter, DbError> {
    let mut filter = decode(value)?;
    filter.id = Some(IdKey::from_bytes(key)?.into_inner());
    Ok(filter)
}
