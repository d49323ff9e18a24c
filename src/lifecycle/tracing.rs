//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter filtered
//! by `RUST_LOG`. Module paths are hidden (`with_target(false)`); every
//! controller event carries a `view` field instead.
//!
//! ## Usage Examples
//!
//! ```bash
//! # Cycle starts, applied pages, fallbacks and failures
//! RUST_LOG=info cargo run
//!
//! # Every input change, issued query and discarded stale result
//! RUST_LOG=debug cargo run
//! ```
//!
//! ## What Gets Traced
//!
//! - **Controller lifecycle**: `Controller started`, `Shutdown` with the cycle count
//! - **Inputs**: `SetFilter`, `SetPage`, `Connectivity changed`... at debug
//! - **Fetch cycles**: `Fetch` with the query, `Page applied`, `Derived locally`
//! - **Degradation**: `Fetch failed`, `Falling back to cache` at warn/info
//!
//! **With `RUST_LOG=debug`**, an offline filter change reads:
//!
//! ```text
//! DEBUG SetFilter view="access history" name=status value=Checked In
//! INFO Connectivity changed view="access history" online=false
//! INFO Offline, deriving from cache view="access history" cycle=3 records=37
//! DEBUG Derived locally view="access history" cycle=3 items=10 total=12
//! ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // the `view` field identifies the controller
        .compact()
        .init();
}
