//! Type-safe wrappers around [`ListQueryClient`](crate::framework::ListQueryClient).

pub mod access_history_client;
pub mod api_key_client;
pub mod list_client;
pub mod room_change_client;

pub use access_history_client::*;
pub use api_key_client::*;
pub use list_client::*;
pub use room_change_client::*;
