//! Filter preset management
//!
//! Filters are named search presets attached to a UI view. Each one is owned
//! by the user who created it and is visible only to them unless it is
//! shared, in which case every user of the view sees it.
//!
//! # Operations
//!
//! - **Save**: create a preset, or update the one with the same name on the same
//!   view that the user owns or that is shared
//! - **Remove**: delete a preset. Only its owner may do so
//! - **List**: the presets on a view that the user owns or that are shared, oldest first
//!
//! # Examples
//!
//! ```no_run
//! use metafilter::db::Database;
//! use metafilter::filters::{Filter, FilterService};
//! use metafilter::i18n::Catalog;
//! use metafilter::session::UserCode;
//!
//! let db = Database::open("filters_db").unwrap();
//! let messages = Catalog::default();
//! let service = FilterService::new(&db, &messages);
//! let user = UserCode::new("alice");
//!
//! service.save_filter(&user, &Filter::new("late", "orders").with_shared(true)).unwrap();
//! for filter in service.get_filters(&user, "orders").unwrap() {
//!     println!("{} - {}", filter.name, filter.title);
//! }
//! ```

pub mod error;
pub mod service;
pub mod types;

pub use error::FilterError;
pub use service::FilterService;
pub use types::{Filter, FilterId, FilterStorage, validate_filter_name, validate_filter_view};
