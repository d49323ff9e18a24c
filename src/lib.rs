#![doc(html_logo_url = "https://www.rust-lang.org/logos/rust-logo-128x128.png")]
#![doc(html_favicon_url = "https://www.rust-lang.org/favicon.ico")]
//! # Hostel List Query
//!
//! > **Filtered, paginated, offline-tolerant lists for a hostel management dashboard.**
//!
//! Every list screen of the dashboard (access history, room-change requests, API
//! keys) is driven by the same controller: it owns the filter and paging inputs,
//! debounces changes, fetches from the backend, and falls back to a cached
//! snapshot when the backend cannot be reached.
//!
//! ## 🏗️ Design Philosophy
//!
//! ### One controller, many views
//! `ListQueryActor<T: ListRecord>` is written once. A view is nothing but a
//! [`ListOptions`](query::ListOptions) value (filters, tabs, page sizes) plus a
//! record type, so adding a screen means adding a module under [`views`].
//!
//! ### Actor per list
//! Each controller runs in its own Tokio task and processes inputs one at a
//! time, so filter, paging and connectivity state need no locks. Remote calls
//! run in spawned tasks and report back tagged with a cycle number; results
//! from superseded cycles are dropped, so the screen never flickers back to an
//! older query.
//!
//! ### Degrade, don't blank
//! Offline with a snapshot, the controller derives the page locally and never
//! touches the network. A failed fetch falls back to the snapshot when there is
//! one and otherwise leaves the previous items on screen next to the error.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Engine ([`framework`])
//! The generic controller, its client handle, error types and the
//! [`ListRecord`](framework::ListRecord) contract.
//! - **Key items**: [`ListQueryActor`](framework::ListQueryActor), [`ListQueryClient`](framework::ListQueryClient).
//!
//! ### 2. Query State ([`query`])
//! Pure, synchronous state: [`FilterStore`](query::FilterStore),
//! [`PaginationState`](query::PaginationState), local derivation and the
//! published [`ViewModel`](query::ViewModel).
//!
//! ### 3. Backends ([`sources`])
//! The [`RemoteSource`](sources::RemoteSource) seam, an HTTP implementation
//! and an in-memory one.
//!
//! ### 4. The Screens ([`views`], [`model`], [`clients`])
//! Per-view options, record types, and typed clients such as
//! [`AccessHistoryClient`](clients::AccessHistoryClient).
//!
//! ### 5. The Orchestrator ([`lifecycle`])
//! [`Dashboard`](lifecycle::Dashboard) starts and stops the controllers;
//! [`setup_tracing`](lifecycle::setup_tracing) installs logging.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Demo against in-memory data
//! RUST_LOG=info cargo run
//!
//! # Tests (timing tests run on a paused clock)
//! cargo test
//! ```
//!
//! Settings are read from the environment, see [`config`].

pub mod clients;
pub mod config;
pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod query;
pub mod sources;
pub mod views;
