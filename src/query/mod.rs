//! Leaf state owned by a list controller.
//!
//! - [`FilterStore`] - named filter values and the sentinel rules
//! - [`PaginationState`] - page, page size and totals
//! - [`derive`] - local filter + slice of a snapshot
//! - [`ViewModel`] - what presentation code renders
//!
//! None of these types do I/O; the actor in [`crate::framework`] composes them.

pub mod derive;
pub mod filters;
pub mod options;
pub mod pagination;
pub mod view;

pub use derive::*;
pub use filters::*;
pub use options::*;
pub use pagination::*;
pub use view::*;
