//! Runtime orchestration: starting the dashboard's controllers, fanning inputs
//! out to them, shutting them down, and installing the log subscriber.
//!
//! # Main Components
//!
//! - [`Dashboard`] - Owns one controller per view and their clients
//! - [`setup_tracing`] - Initializes the tracing/logging infrastructure

pub mod dashboard;
pub mod tracing;

pub use dashboard::*;
pub use tracing::*;
