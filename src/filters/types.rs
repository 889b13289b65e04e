//! Filter data structures and types
//!
//! This module defines the core data structures for saved filter presets:
//! - `FilterId`: Store-assigned record identifier
//! - `Filter`: A named preset bound to a UI view, owned by a user and optionally shared
//! - `FilterStorage`: Container used for TOML export

use super::error::FilterError;
use crate::db::query::Shareable;
use crate::session::UserCode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length of filter names and view identifiers
pub const MAX_KEY_LEN: usize = 255;

/// Store-assigned filter identifier
///
/// Ids grow monotonically, so ascending id order is creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterId(pub u64);

impl fmt::Display for FilterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Saved filter preset
///
/// A candidate (as passed to `FilterService::save_filter`) carries `name`,
/// `filter_view`, `title`, the two expressions and `shared`. The store fills in
/// `id`, `owner` and the timestamps.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Filter {
    /// Assigned on first save, `None` for candidates
    pub id: Option<FilterId>,

    /// Preset name, unique per view and owner
    pub name: String,

    /// Display label
    #[serde(default)]
    pub title: String,

    /// UI view the preset applies to
    pub filter_view: String,

    /// Structured filter expression (JSON as produced by the view)
    #[serde(default)]
    pub filters: Option<String>,

    /// Free-form custom expression
    #[serde(default)]
    pub filter_custom: Option<String>,

    /// Creator of the preset, fixed once set
    #[serde(default)]
    pub owner: Option<UserCode>,

    /// Visible to every user of the view
    #[serde(default)]
    pub shared: bool,

    #[serde(default)]
    pub created: Option<DateTime<Utc>>,

    #[serde(default)]
    pub updated: Option<DateTime<Utc>>,
}

impl Filter {
    /// Create a candidate for the given name and view
    #[must_use]
    pub fn new(name: impl Into<String>, filter_view: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            filter_view: filter_view.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn with_filters(mut self, filters: impl Into<String>) -> Self {
        self.filters = Some(filters.into());
        self
    }

    #[must_use]
    pub fn with_custom(mut self, custom: impl Into<String>) -> Self {
        self.filter_custom = Some(custom.into());
        self
    }

    #[must_use]
    pub const fn with_shared(mut self, shared: bool) -> Self {
        self.shared = shared;
        self
    }

    /// Whether `user` created this preset
    #[must_use]
    pub fn is_owned_by(&self, user: &UserCode) -> bool {
        self.owner.as_ref() == Some(user)
    }

    /// Validate the lookup key of this filter
    ///
    /// # Errors
    ///
    /// Returns `FilterError::InvalidName` or `FilterError::InvalidView` for the
    /// first problem found.
    pub fn validate(&self) -> Result<(), FilterError> {
        validate_filter_name(&self.name)
            .map_err(|e| FilterError::InvalidName(self.name.clone(), e))?;
        validate_filter_view(&self.filter_view)
            .map_err(|e| FilterError::InvalidView(self.filter_view.clone(), e))?;
        Ok(())
    }
}

impl Shareable for Filter {
    fn owner(&self) -> Option<&UserCode> {
        self.owner.as_ref()
    }

    fn is_shared(&self) -> bool {
        self.shared
    }
}

/// Export container for filters
///
/// This is the root structure that gets serialized to TOML.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FilterStorage {
    #[serde(rename = "filter", default)]
    pub filters: Vec<Filter>,
}

/// Validate a filter name
///
/// Names must be non-empty, at most 255 characters and free of control characters.
///
/// # Errors
///
/// Returns an error message describing why the name was rejected.
pub fn validate_filter_name(name: &str) -> Result<(), String> {
    validate_key("Filter name", name)
}

/// Validate a view identifier, using the same rules as filter names
///
/// # Errors
///
/// Returns an error message describing why the view was rejected.
pub fn validate_filter_view(view: &str) -> Result<(), String> {
    validate_key("Filter view", view)
}

fn validate_key(what: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{what} cannot be empty"));
    }

    let len = value.chars().count();
    if len > MAX_KEY_LEN {
        return Err(format!("{what} too long (max {MAX_KEY_LEN} chars): {len}"));
    }

    if value.chars().any(char::is_control) {
        return Err(format!("{what} contains control characters"));
    }

    Ok(())
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Filter: {}", self.name)?;
        if let Some(id) = self.id {
            writeln!(f, "Id: {id}")?;
        }
        if !self.title.is_empty() {
            writeln!(f, "Title: {}", self.title)?;
        }
        writeln!(f, "View: {}", self.filter_view)?;
        if let Some(owner) = &self.owner {
            writeln!(f, "Owner: {owner}")?;
        }
        writeln!(f, "Shared: {}", if self.shared { "yes" } else { "no" })?;

        writeln!(f)?;
        writeln!(
            f,
            "Filters: {}",
            self.filters.as_deref().unwrap_or("(none)")
        )?;
        writeln!(
            f,
            "Custom: {}",
            self.filter_custom.as_deref().unwrap_or("(none)")
        )?;

        if let Some(created) = self.created {
            writeln!(f)?;
            writeln!(f, "Created: {}", created.format("%Y-%m-%d %H:%M:%S"))?;
        }
        if let Some(updated) = self.updated {
            writeln!(f, "Updated: {}", updated.format("%Y-%m-%d %H:%M:%S"))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_filter_name() {
        assert!(validate_filter_name("my-filter").is_ok());
        assert!(validate_filter_name("Open orders (EU)").is_ok());
        assert!(validate_filter_name("filter.with.dots").is_ok());

        assert!(validate_filter_name("").is_err());
        assert!(validate_filter_name("   ").is_err());
        assert!(validate_filter_name("tab\there").is_err());
        assert!(validate_filter_name(&"a".repeat(256)).is_err());
        assert!(validate_filter_name(&"a".repeat(255)).is_ok());
    }

    #[test]
    fn test_candidate_builder() {
        let filter = Filter::new("late", "sale.order.grid")
            .with_title("Late orders")
            .with_filters(r#"[{"field":"dueDate","op":"<"}]"#)
            .with_shared(true);

        assert_eq!(filter.id, None);
        assert_eq!(filter.owner, None);
        assert_eq!(filter.title, "Late orders");
        assert!(filter.filters.is_some());
        assert!(filter.filter_custom.is_none());
        assert!(filter.shared);
        assert!(filter.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_view() {
        let filter = Filter::new("late", "");
        let err = filter.validate().unwrap_err();
        assert!(matches!(err, FilterError::InvalidView(..)));
        assert!(err.to_string().contains("Filter view cannot be empty"));

        let err = Filter::new("bad\nname", "orders").validate().unwrap_err();
        assert!(matches!(err, FilterError::InvalidName(..)));
    }

    #[test]
    fn test_is_owned_by() {
        let mut filter = Filter::new("f", "v");
        assert!(!filter.is_owned_by(&UserCode::new("alice")));

        filter.owner = Some(UserCode::new("alice"));
        assert!(filter.is_owned_by(&UserCode::new("alice")));
        assert!(!filter.is_owned_by(&UserCode::new("bob")));
    }

    #[test]
    fn test_filter_storage_toml() {
        let mut filter = Filter::new("late", "orders").with_title("Late");
        filter.id = Some(FilterId(7));
        filter.owner = Some(UserCode::new("alice"));

        let storage = FilterStorage {
            filters: vec![filter],
        };

        let toml = toml::to_string_pretty(&storage).unwrap();
        assert!(toml.contains("[[filter]]"));
        assert!(toml.contains("late"));
        assert!(toml.contains("alice"));

        let back: FilterStorage = toml::from_str(&toml).unwrap();
        assert_eq!(back.filters.len(), 1);
        assert_eq!(back.filters[0].id, Some(FilterId(7)));
        assert_eq!(back.filters[0].filters, None);
    }

    #[test]
    fn test_display() {
        let mut filter = Filter::new("late", "orders").with_title("Late orders");
        filter.owner = Some(UserCode::new("alice"));
        let text = filter.to_string();
        assert!(text.contains("Filter: late"));
        assert!(text.contains("Owner: alice"));
        assert!(text.contains("Shared: no"));
        assert!(text.contains("Custom: (none)"));
    }
}
