//! # Baton Engine
//!
//! This crate provides the building blocks for **registry-driven step
//! orchestration**: named async operations run one at a time, each able to
//! feed its result into the next, with the whole run recorded in a per-
//! operation history.
//!
//! ## Why Steps as Data?
//!
//! Hardcoded control flow couples *what* a pipeline does to *how* it is
//! wired. This engine splits the two:
//!
//! - **Operations** are plain async (or sync) callables over JSON values
//! - **Steps** are data: a target (a callable, or a registry key) plus an
//!   optional argument source
//! - **Registries** map step keys to operations with default argument
//!   sources, and are swapped wholesale to rewire a flow
//!
//! Because steps are data, the same pipeline definition can run against
//! different registries, individual steps can override their arguments at
//! the call site, and every run leaves an inspectable trail.
//!
//! ## Architecture Overview
//!
//! The crate separates concerns into three layers:
//!
//! 1. **Operation Layer** ([`Operation`], [`FnOp`], [`op!`]) - Your domain
//!    callables, lifted into a uniform async contract
//! 2. **Vocabulary Layer** ([`Step`], [`ArgSource`], [`StepRegistry`]) - The
//!    data types that describe what to run and how to build its arguments
//! 3. **Runtime Layer** ([`Orchestrator`], [`Pipe`]) - The engines that
//!    resolve, await, and record
//!
//! You write operations once; the runtime handles dispatch, argument
//! materialization, error propagation, and bookkeeping.
//!
//! ## Core Abstractions
//!
//! A registry names the steps; the orchestrator runs them and keeps history
//! keyed by operation name:
//!
//! ```rust
//! use baton_engine::{op, OpError, Orchestrator, StepEntry, StepRegistry};
//! use serde_json::{json, Value};
//!
//! // 1. Define operations as async functions
//! async fn create_order(_args: Vec<Value>) -> Result<Value, OpError> {
//!     Ok(json!(7)) // the new order's id
//! }
//!
//! async fn update_order(args: Vec<Value>) -> Result<Value, OpError> {
//!     Ok(json!({ "id": args[0].clone(), "title": args[1].clone() }))
//! }
//!
//! // 2. Name them in a registry
//! #[tokio::main]
//! async fn main() -> Result<(), baton_engine::EngineError> {
//!     let registry = StepRegistry::new()
//!         .with_entry(
//!             "CREATE_ORDER",
//!             StepEntry::new(op!(create_order)).with_args(vec![json!("My Essay"), json!(10)]),
//!         )
//!         .with_entry(
//!             "UPDATE_ORDER",
//!             // A resolver builds arguments from the previous step's result.
//!             StepEntry::new(op!(update_order)).with_resolver(|prev| {
//!                 vec![prev.cloned().unwrap_or(Value::Null), json!("Amazing Essay")]
//!             }),
//!         );
//!
//!     // 3. Run the flow by key
//!     let mut runner = Orchestrator::with_registry(registry);
//!     runner.run_sequence(["CREATE_ORDER", "UPDATE_ORDER"]).await?;
//!
//!     assert_eq!(runner.last_operation_name(), Some("update_order"));
//!     assert_eq!(
//!         runner.history()["update_order"],
//!         vec![json!({ "id": 7, "title": "Amazing Essay" })]
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ## Uniform Async
//!
//! Every callable is awaited the same way, whatever it was written as:
//!
//! - `async fn`s and closures returning futures go through [`FnOp::new`]
//! - Plain synchronous functions are lifted via [`FnOp::sync`]
//! - Hand-rolled types implement [`Operation`] directly
//!
//! The runtime cannot tell them apart, so flows mix and match freely.
//!
//! ## Concurrency Model
//!
//! - Running a step takes `&mut self`; the borrow checker enforces
//!   one-step-at-a-time, so the orchestrator holds no locks
//! - [`run_sequence`](Orchestrator::run_sequence) awaits each step to
//!   completion before starting the next, and aborts on the first failure
//! - State is instance-owned; two orchestrators never share anything
//!
//! ## Testing
//!
//! The crate ships a [`mock`] module with deterministic operations
//! (`constant`, `failing`, `recording`, `delayed`) so pipeline logic can be
//! tested without any domain code. The engine's own test suite is built on
//! them; see the module docs for the full menu.

pub mod error;
pub mod mock;
pub mod operation;
pub mod orchestrator;
pub mod pipe;
pub mod registry;
pub mod step;
pub mod tracing;

// Re-export core types for convenience
pub use error::EngineError;
pub use operation::{FnOp, OpError, OpFuture, Operation};
pub use orchestrator::Orchestrator;
pub use pipe::Pipe;
pub use registry::{StepEntry, StepRegistry};
pub use step::{ArgResolver, ArgSource, Step, StepTarget};
