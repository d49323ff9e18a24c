//! # ListRecord Trait
//!
//! The contract a record type must satisfy to be listed by a
//! [`ListQueryActor`](crate::framework::ListQueryActor).
//!
//! The controller never looks inside a record except through this trait: the
//! equality and search filters read named string fields, and the date filter
//! reads the record's timestamp. Everything else (rendering, mutation) belongs
//! to the presentation layer.

use chrono::{DateTime, Utc};
use std::borrow::Cow;
use std::fmt::Debug;

/// A record that can be filtered and paginated locally.
///
/// # Example
///
/// ```rust
/// use std::borrow::Cow;
/// use chrono::{DateTime, Utc};
/// use hostel_list_query::framework::ListRecord;
///
/// #[derive(Clone, Debug)]
/// struct Visitor { name: String, status: String, at: DateTime<Utc> }
///
/// impl ListRecord for Visitor {
///     fn field(&self, name: &str) -> Option<Cow<'_, str>> {
///         match name {
///             "status" => Some(Cow::Borrowed(&self.status)),
///             "name" => Some(Cow::Borrowed(&self.name)),
///             _ => None,
///         }
///     }
///
///     fn timestamp(&self) -> Option<DateTime<Utc>> {
///         Some(self.at)
///     }
/// }
/// ```
pub trait ListRecord: Clone + Debug + Send + Sync + 'static {
    /// String projection of a named field, used by equality and search filters.
    /// Returns `None` when the record has no such field, which never matches.
    fn field(&self, name: &str) -> Option<Cow<'_, str>>;

    /// The instant used by the calendar-date filter.
    fn timestamp(&self) -> Option<DateTime<Utc>>;
}
