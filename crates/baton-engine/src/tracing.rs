//! # Observability & Tracing
//!
//! The engine emits structured `tracing` events at every step boundary, so a
//! run of [`run_sequence`](crate::Orchestrator::run_sequence) reads as a
//! step-by-step transcript in the logs.
//!
//! ## What Gets Traced
//!
//! - **Registry changes**: `set_registry` logs the number of installed steps
//! - **Step dispatch**: each step logs its operation name and, at `debug`,
//!   the fully materialized argument list
//! - **Completion**: successful steps log how many runs the operation has
//!   accumulated in the history
//! - **Failures**: unknown keys and operation errors log at `warn` before the
//!   error propagates to the caller
//!
//! ## Usage Examples
//!
//! ```bash
//! # Step-level progress
//! RUST_LOG=info cargo run
//!
//! # Also show materialized arguments for every step
//! RUST_LOG=debug cargo run
//!
//! # Filter to the engine only
//! RUST_LOG=baton_engine=debug cargo run
//! ```
//!
//! **With `RUST_LOG=info`** (compact):
//!
//! ```text
//! INFO Registry installed steps=3
//! INFO Step completed op=create_order runs=1
//! INFO Step completed op=update_order runs=1
//! ```
//!
//! **With `RUST_LOG=debug`** (detailed):
//!
//! ```text
//! DEBUG Step op=create_order args=[String("My Essay"), Number(10)]
//! INFO Step completed op=create_order runs=1
//! DEBUG Step op=update_order args=[Number(1), String("Amazing Essay")]
//! INFO Step completed op=update_order runs=1
//! ```

/// Initializes the global tracing subscriber.
///
/// Call this once at the top of `main`. Binaries that need a custom
/// subscriber can skip this and install their own; the engine only emits
/// events, it never requires this particular setup.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // Don't show module paths - events carry an op field instead
        .compact() // Compact format shows caller spans inline (e.g., "registry_flow")
        .init();
}
