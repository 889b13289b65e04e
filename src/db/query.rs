//! Composable record criteria
//!
//! Reads against the store are expressed as small predicates that can be
//! combined with [`CriterionExt::and`] and [`CriterionExt::or`]:
//!
//! ```
//! use metafilter::db::query::{visible_to, CriterionExt, NameIs, ViewIs};
//! use metafilter::session::UserCode;
//!
//! let user = UserCode::new("alice");
//! let lookup = NameIs::new("late")
//!     .and(ViewIs::new("orders"))
//!     .and(visible_to(&user));
//! # let _ = lookup;
//! ```
//!
//! The ownership predicates ([`OwnedBy`], [`IsShared`]) work for any record
//! implementing [`Shareable`], not only filters.

use crate::filters::Filter;
use crate::session::UserCode;

/// A predicate over stored records
pub trait Criterion<T> {
    fn matches(&self, record: &T) -> bool;
}

/// Records that have an owner and may be shared with everyone
pub trait Shareable {
    fn owner(&self) -> Option<&UserCode>;
    fn is_shared(&self) -> bool;
}

/// `and`/`or` combinators for the criteria in this module
pub trait CriterionExt: Sized {
    /// Both criteria must match
    fn and<B>(self, other: B) -> And<Self, B> {
        And(self, other)
    }

    /// Either criterion may match
    fn or<B>(self, other: B) -> Or<Self, B> {
        Or(self, other)
    }
}

impl<A, B> CriterionExt for And<A, B> {}
impl<A, B> CriterionExt for Or<A, B> {}
impl CriterionExt for OwnedBy {}
impl CriterionExt for IsShared {}
impl CriterionExt for NameIs {}
impl CriterionExt for ViewIs {}

/// Conjunction of two criteria
#[derive(Debug, Clone)]
pub struct And<A, B>(pub A, pub B);

impl<T, A: Criterion<T>, B: Criterion<T>> Criterion<T> for And<A, B> {
    fn matches(&self, record: &T) -> bool {
        self.0.matches(record) && self.1.matches(record)
    }
}

/// Disjunction of two criteria
#[derive(Debug, Clone)]
pub struct Or<A, B>(pub A, pub B);

impl<T, A: Criterion<T>, B: Criterion<T>> Criterion<T> for Or<A, B> {
    fn matches(&self, record: &T) -> bool {
        self.0.matches(record) || self.1.matches(record)
    }
}

/// Record owned by the given user
#[derive(Debug, Clone)]
pub struct OwnedBy(pub UserCode);

impl OwnedBy {
    #[must_use]
    pub fn new(user: &UserCode) -> Self {
        Self(user.clone())
    }
}

impl<T: Shareable> Criterion<T> for OwnedBy {
    fn matches(&self, record: &T) -> bool {
        record.owner() == Some(&self.0)
    }
}

/// Record shared with everyone
#[derive(Debug, Clone, Copy)]
pub struct IsShared;

impl<T: Shareable> Criterion<T> for IsShared {
    fn matches(&self, record: &T) -> bool {
        record.is_shared()
    }
}

/// Filter with the given name
#[derive(Debug, Clone)]
pub struct NameIs(pub String);

impl NameIs {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

impl Criterion<Filter> for NameIs {
    fn matches(&self, record: &Filter) -> bool {
        record.name == self.0
    }
}

/// Filter bound to the given view
#[derive(Debug, Clone)]
pub struct ViewIs(pub String);

impl ViewIs {
    #[must_use]
    pub fn new(view: impl Into<String>) -> Self {
        Self(view.into())
    }
}

impl Criterion<Filter> for ViewIs {
    fn matches(&self, record: &Filter) -> bool {
        record.filter_view == self.0
    }
}

/// Records `user` may see: their own, plus everything shared
#[must_use]
pub fn visible_to(user: &UserCode) -> Or<OwnedBy, IsShared> {
    OwnedBy::new(user).or(IsShared)
}

/// Lookup used by save and remove: one name on one view, visible to `user`
#[must_use]
pub fn filter_key(
    name: &str,
    filter_view: &str,
    user: &UserCode,
) -> And<And<NameIs, ViewIs>, Or<OwnedBy, IsShared>> {
    NameIs::new(name)
        .and(ViewIs::new(filter_view))
        .and(visible_to(user))
}
