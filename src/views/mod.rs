//! The dashboard's list views, one module per view.
//!
//! Each module declares its [`ListOptions`](crate::query::ListOptions), its
//! backend endpoint, and a `new()` factory returning the controller and a typed
//! client, in that order.

pub mod access_history;
pub mod api_keys;
pub mod room_changes;
