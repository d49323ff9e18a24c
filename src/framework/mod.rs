//! Generic list-controller framework.
//!
//! This module provides the building blocks every list view is made of: a record
//! contract, an actor that owns the fetch cycle, and a client handle.
//!
//! # Main Components
//!
//! - [`ListRecord`] - Trait that record types implement to be filtered locally
//! - [`ListQueryActor`] - Generic controller task (debounce, sequencing, fallback)
//! - [`ListQueryClient`] - Type-safe handle for driving a controller
//! - [`SourceError`], [`ListError`] - Error taxonomy
//!
//! # Testing
//!
//! See [`mock`] for a scripted [`RemoteSource`](crate::sources::RemoteSource).

pub mod actor;
pub mod client;
pub mod error;
pub mod message;
pub mod mock;
pub mod record;

pub use actor::*;
pub use client::*;
pub use error::*;
pub use message::*;
pub use record::*;
