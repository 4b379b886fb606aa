//! # Value Pipes
//!
//! A [`Pipe`] is a reusable composition of operations that threads a single
//! value: each operation receives the previous output as its only argument,
//! and the final output is returned to the caller.
//!
//! Pipes keep no state between runs and no history; they are the lightweight
//! sibling of [`Orchestrator::run_sequence`](crate::Orchestrator::run_sequence)
//! for pure value transformation chains.

use crate::error::EngineError;
use crate::operation::Operation;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

/// Reusable chain of operations threading one value.
///
/// ```rust
/// use baton_engine::{OpError, Pipe};
/// use serde_json::{json, Value};
///
/// async fn add_one(args: Vec<Value>) -> Result<Value, OpError> {
///     let n = args.first().and_then(Value::as_i64).unwrap_or(0);
///     Ok(json!(n + 1))
/// }
///
/// #[tokio::main]
/// async fn main() -> Result<(), baton_engine::EngineError> {
///     let pipe = Pipe::new()
///         .then(baton_engine::op!(add_one))
///         .then(baton_engine::op!(add_one));
///
///     assert_eq!(pipe.run(json!(40)).await?, json!(42));
///     // Pipes are reusable.
///     assert_eq!(pipe.run(json!(0)).await?, json!(2));
///     Ok(())
/// }
/// ```
#[derive(Default)]
pub struct Pipe {
    ops: Vec<Arc<dyn Operation>>,
}

impl Pipe {
    /// Empty pipe. Running it returns the initial value unchanged.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an operation to the chain.
    pub fn then(mut self, operation: impl Operation + 'static) -> Self {
        self.ops.push(Arc::new(operation));
        self
    }

    /// Number of operations in the chain.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Whether the chain is empty.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Threads `initial` through every operation in order and returns the
    /// final value. Aborts on the first failure, carrying the operation's
    /// original error.
    pub async fn run(&self, initial: Value) -> Result<Value, EngineError> {
        let mut value = initial;
        for op in &self.ops {
            value = match op.call(vec![value]).await {
                Ok(next) => next,
                Err(source) => {
                    warn!(op = %op.name(), error = %source, "Pipe stage failed");
                    return Err(EngineError::OperationFailed {
                        name: op.name().to_string(),
                        source,
                    });
                }
            };
            debug!(op = %op.name(), result = %value, "Pipe stage");
        }
        Ok(value)
    }
}
