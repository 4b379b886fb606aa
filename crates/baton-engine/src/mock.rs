//! # Mock Operations & Testing Guide
//!
//! Deterministic operations for testing code that drives an
//! [`Orchestrator`](crate::Orchestrator) or [`Pipe`](crate::Pipe) without
//! touching real domain logic. The engine's own test suite is built on these,
//! and downstream crates can use them the same way.
//!
//! | Helper | Behavior | Typical assertion |
//! |--------|----------|-------------------|
//! | [`constant`] | Always returns the given value | History contents |
//! | [`failing`] | Always fails with [`MockFailure`] | Error propagation, abort-on-failure |
//! | [`recording`] | Returns a value and logs every argument list | What a resolver produced |
//! | [`delayed`] | Sleeps, then returns the given value | Strictly sequential awaiting |
//!
//! ## Example
//!
//! ```rust
//! use baton_engine::{mock, Orchestrator, Step};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() {
//!     let (probe, log) = mock::recording("probe", json!("ok"));
//!
//!     let mut runner = Orchestrator::new();
//!     runner
//!         .run_step(Step::op(probe).with_args(vec![json!(1), json!(2)]))
//!         .await
//!         .unwrap();
//!
//!     // The recording op captured exactly the materialized arguments.
//!     assert_eq!(log.calls(), vec![vec![json!(1), json!(2)]]);
//! }
//! ```
//!
//! ## Failure Injection
//!
//! [`failing`] makes the hard-to-reproduce case trivial: an operation error
//! surfaces as [`EngineError::OperationFailed`](crate::EngineError) whose
//! source downcasts back to [`MockFailure`], proving the engine did not
//! rewrite it.

use crate::operation::{FnOp, OpError};
use serde_json::Value;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Error returned by [`failing`] operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct MockFailure(pub String);

/// Shareable log of the argument lists a [`recording`] operation received,
/// in call order.
#[derive(Clone, Default)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<Vec<Value>>>>,
}

impl CallLog {
    /// Snapshot of all recorded argument lists.
    pub fn calls(&self) -> Vec<Vec<Value>> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of recorded calls.
    pub fn len(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Whether the operation was never called.
    pub fn is_empty(&self) -> bool {
        self.calls.lock().unwrap().is_empty()
    }
}

/// Operation that returns `value` on every call.
pub fn constant(name: impl Into<String>, value: Value) -> FnOp {
    FnOp::sync(name, move |_args| Ok::<_, OpError>(value.clone()))
}

/// Operation that always fails with [`MockFailure`]`(message)`.
pub fn failing(name: impl Into<String>, message: impl Into<String>) -> FnOp {
    let message = message.into();
    FnOp::sync(name, move |_args| {
        Err::<Value, _>(MockFailure(message.clone()))
    })
}

/// Operation that records every argument list it receives and returns
/// `result`. The returned [`CallLog`] is a cheap clone handle; keep it and
/// assert on it after the run.
pub fn recording(name: impl Into<String>, result: Value) -> (FnOp, CallLog) {
    let log = CallLog::default();
    let captured = log.clone();
    let op = FnOp::sync(name, move |args| {
        captured.calls.lock().unwrap().push(args);
        Ok::<_, OpError>(result.clone())
    });
    (op, log)
}

/// Operation that sleeps for `delay` and then returns `value`. Useful for
/// verifying that a sequence awaits each step to completion before starting
/// the next.
pub fn delayed(name: impl Into<String>, delay: Duration, value: Value) -> FnOp {
    FnOp::new(name, move |_args| {
        let value = value.clone();
        async move {
            tokio::time::sleep(delay).await;
            Ok::<_, OpError>(value)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operation::Operation;
    use serde_json::json;

    #[tokio::test]
    async fn test_recording_captures_calls_in_order() {
        let (op, log) = recording("probe", json!(null));

        op.call(vec![json!(1)]).await.unwrap();
        op.call(vec![json!("two"), json!(3)]).await.unwrap();

        assert_eq!(log.len(), 2);
        assert_eq!(
            log.calls(),
            vec![vec![json!(1)], vec![json!("two"), json!(3)]]
        );
    }

    #[tokio::test]
    async fn test_failing_preserves_the_original_error() {
        let op = failing("broken", "boom");
        let err = op.call(Vec::new()).await.unwrap_err();
        let original = err.downcast::<MockFailure>().expect("MockFailure");
        assert_eq!(*original, MockFailure("boom".into()));
    }

    #[tokio::test]
    async fn test_constant_repeats_its_value() {
        let op = constant("ping", json!("pong"));
        assert_eq!(op.call(Vec::new()).await.unwrap(), json!("pong"));
        assert_eq!(op.call(vec![json!("ignored")]).await.unwrap(), json!("pong"));
    }
}
