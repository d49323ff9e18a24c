//! Record types listed by the dashboards, each implementing
//! [`ListRecord`](crate::framework::ListRecord).

pub mod access_entry;
pub mod api_key;
pub mod room_change;

pub use access_entry::*;
pub use api_key::*;
pub use room_change::*;
