//! Save, remove and list filter presets on behalf of a user
//!
//! Lookups for save and remove use the same key: the preset name, its view,
//! and visibility to the acting user (owned by them or shared). A shared
//! preset is therefore found by everyone, but only its owner may change its
//! `shared` flag or delete it. When the key matches both the user's own preset
//! and shared presets of others, the user's own preset is the one acted on.

use super::error::FilterError;
use super::types::Filter;
use crate::db::Database;
use crate::db::query::{CriterionExt, ViewIs, filter_key, visible_to};
use crate::i18n::{Catalog, NOT_ALLOWED_TO_REMOVE};
use crate::session::UserCode;
use chrono::Utc;
use tracing::{debug, info, warn};

/// Filter operations bound to a database and a message catalog
///
/// # Examples
///
/// ```no_run
/// use metafilter::db::Database;
/// use metafilter::filters::{Filter, FilterService};
/// use metafilter::i18n::Catalog;
/// use metafilter::session::UserCode;
///
/// let db = Database::open("filters_db").unwrap();
/// let messages = Catalog::default();
/// let service = FilterService::new(&db, &messages);
///
/// let alice = UserCode::new("alice");
/// let saved = service
///     .save_filter(&alice, &Filter::new("late", "orders").with_title("Late orders"))
///     .unwrap();
/// assert_eq!(saved.owner, Some(alice));
/// ```
pub struct FilterService<'a> {
    db: &'a Database,
    messages: &'a Catalog,
}

impl<'a> FilterService<'a> {
    #[must_use]
    pub const fn new(db: &'a Database, messages: &'a Catalog) -> Self {
        Self { db, messages }
    }

    /// Create or update the preset identified by the candidate's name and view
    ///
    /// An existing preset owned by `user`, or a shared one, is updated in place.
    /// Otherwise a new preset owned by `user` is created. Title and expressions
    /// are always copied from `candidate`. `shared` is copied only when `user`
    /// owns the record.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::InvalidName`/`InvalidView` for a malformed key, or
    /// `FilterError::Database` if the lookup or write fails. Nothing is written
    /// on error.
    pub fn save_filter(&self, user: &UserCode, candidate: &Filter) -> Result<Filter, FilterError> {
        candidate.validate()?;

        self.db.transaction(|tx| {
            let key = filter_key(&candidate.name, &candidate.filter_view, user);
            let now = Utc::now();

            let mut filter = match pick_target(tx.fetch(&key)?, user) {
                Some(existing) => {
                    debug!(
                        name = %existing.name,
                        view = %existing.filter_view,
                        id = ?existing.id,
                        "updating existing filter"
                    );
                    existing
                }
                None => Filter {
                    name: candidate.name.clone(),
                    filter_view: candidate.filter_view.clone(),
                    owner: Some(user.clone()),
                    created: Some(now),
                    ..Filter::default()
                },
            };

            filter.title.clone_from(&candidate.title);
            filter.filters.clone_from(&candidate.filters);
            filter.filter_custom.clone_from(&candidate.filter_custom);
            filter.updated = Some(now);

            if filter.is_owned_by(user) {
                filter.shared = candidate.shared;
            }

            let created = filter.id.is_none();
            let saved = tx.save(filter)?;
            info!(
                user = %user,
                name = %saved.name,
                view = %saved.filter_view,
                id = ?saved.id,
                created,
                "saved filter"
            );
            Ok(saved)
        })
    }

    /// Delete the preset identified by the candidate's name and view
    ///
    /// Returns `candidate` unchanged, whether or not anything was deleted. A
    /// missing preset is not an error.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::NotAllowed` (with a localized message) if the
    /// matching preset belongs to someone else, or `FilterError::Database` if
    /// the lookup or delete fails. Nothing is deleted on error.
    pub fn remove_filter(&self, user: &UserCode, candidate: Filter) -> Result<Filter, FilterError> {
        self.remove_matching(user, &candidate)?;
        Ok(candidate)
    }

    /// Same as [`remove_filter`](Self::remove_filter), but returns the deleted
    /// record, or `None` if nothing matched
    ///
    /// # Errors
    ///
    /// See [`remove_filter`](Self::remove_filter).
    pub fn remove_matching(
        &self,
        user: &UserCode,
        candidate: &Filter,
    ) -> Result<Option<Filter>, FilterError> {
        self.db.transaction(|tx| {
            let key = filter_key(&candidate.name, &candidate.filter_view, user);

            let Some(existing) = pick_target(tx.fetch(&key)?, user) else {
                debug!(name = %candidate.name, view = %candidate.filter_view, "no filter to remove");
                return Ok(None);
            };

            if !existing.is_owned_by(user) {
                warn!(
                    user = %user,
                    name = %existing.name,
                    view = %existing.filter_view,
                    owner = ?existing.owner,
                    "refused to remove filter owned by another user"
                );
                return Err(FilterError::NotAllowed(self.messages.get(NOT_ALLOWED_TO_REMOVE)));
            }

            tx.remove(&existing);
            info!(user = %user, name = %existing.name, view = %existing.filter_view, id = ?existing.id, "removed filter");
            Ok(Some(existing))
        })
    }

    /// Presets on `filter_view` that `user` owns or that are shared, oldest first
    ///
    /// # Errors
    ///
    /// Returns `FilterError::Database` if the store cannot be read.
    pub fn get_filters(&self, user: &UserCode, filter_view: &str) -> Result<Vec<Filter>, FilterError> {
        let filters = self
            .db
            .fetch(&ViewIs::new(filter_view).and(visible_to(user)))?;
        debug!(user = %user, view = %filter_view, count = filters.len(), "listed filters");
        Ok(filters)
    }

    /// The preset save and remove would act on, if any
    ///
    /// # Errors
    ///
    /// Returns `FilterError::Database` if the store cannot be read.
    pub fn find_filter(
        &self,
        user: &UserCode,
        name: &str,
        filter_view: &str,
    ) -> Result<Option<Filter>, FilterError> {
        let matches = self.db.fetch(&filter_key(name, filter_view, user))?;
        Ok(pick_target(matches, user))
    }
}

/// Choose the record a keyed lookup acts on
///
/// `matches` is in ascending id order. The caller's own preset wins over
/// shared presets of other users; otherwise the oldest match is used.
fn pick_target(matches: Vec<Filter>, user: &UserCode) -> Option<Filter> {
    let index = matches
        .iter()
        .position(|filter| filter.is_owned_by(user))
        .unwrap_or(0);
    matches.into_iter().nth(index)
}
