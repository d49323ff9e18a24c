//! Implementations of the [`RemoteSource`] seam.
//!
//! - [`HttpSource`] - the hostel REST backend
//! - [`StaticSource`] - an in-memory backend for demos and tests
//!
//! Test doubles with scripted replies live in [`crate::framework::mock`].

pub mod http;
pub mod memory;
pub mod remote;

pub use http::*;
pub use memory::*;
pub use remote::*;
