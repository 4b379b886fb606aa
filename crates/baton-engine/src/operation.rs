//! # Operation Contract
//!
//! The [`Operation`] trait defines the contract that every step callable must
//! implement to be driven by an [`Orchestrator`](crate::Orchestrator) or a
//! [`Pipe`](crate::Pipe). An operation is an opaque async callable: it takes a
//! positional list of JSON values and produces one JSON value, or an error.
//!
//! # Architecture Note
//! Why a trait instead of bare function pointers?
//! By defining a contract that all step callables satisfy, the run loop is
//! written *once* and works for anything: hand-written types holding shared
//! state, closures, or plain functions. Stateful operations implement the
//! trait directly; functions and closures go through the [`FnOp`] adapter.
//!
//! The engine never inspects arguments or results. `serde_json::Value` is the
//! currency precisely so heterogeneous steps (an id here, an object there)
//! can share one history.

use async_trait::async_trait;
use serde_json::Value;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Error type operations report failures with.
///
/// Any `Error + Send + Sync` type converts into this via `?`; the engine
/// carries it through [`EngineError::OperationFailed`](crate::EngineError)
/// without translating it.
pub type OpError = Box<dyn std::error::Error + Send + Sync>;

/// Boxed future type produced by [`FnOp`] callables.
pub type OpFuture = Pin<Box<dyn Future<Output = Result<Value, OpError>> + Send>>;

/// Trait that any step callable must implement to be run by the engine.
///
/// # Naming
/// [`Operation::name`] is the identifier used for history bookkeeping and
/// `last_operation_name`, independent of any registry key the operation may
/// be registered under. Two registry keys pointing at operations with the
/// same name accumulate into one history entry.
///
/// # Async & Sync
/// The trait is `#[async_trait]`, so implementations may await freely.
/// Synchronous callables are lifted once, at construction, via
/// [`FnOp::sync`]; the run loop awaits everything through this one method.
#[async_trait]
pub trait Operation: Send + Sync {
    /// Identifier recorded in the history when this operation completes.
    fn name(&self) -> &str;

    /// Runs the operation with a positional argument list.
    async fn call(&self, args: Vec<Value>) -> Result<Value, OpError>;
}

/// Adapter turning a named function or closure into an [`Operation`].
///
/// Use [`FnOp::new`] for async callables and [`FnOp::sync`] for plain ones.
/// The [`op!`](crate::op) macro wraps a bare function item and derives the
/// operation name from its identifier.
///
/// Cloning is cheap; clones share the underlying callable.
#[derive(Clone)]
pub struct FnOp {
    name: String,
    func: Arc<dyn Fn(Vec<Value>) -> OpFuture + Send + Sync>,
}

impl FnOp {
    /// Wraps an async function or closure.
    ///
    /// The callable may fail with any error convertible into [`OpError`];
    /// conversion happens here, at the boundary, so domain code keeps its own
    /// error types.
    pub fn new<F, Fut, E>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(Vec<Value>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, E>> + Send + 'static,
        E: Into<OpError>,
    {
        Self {
            name: name.into(),
            func: Arc::new(move |args| -> OpFuture {
                let fut = func(args);
                Box::pin(async move { fut.await.map_err(Into::into) })
            }),
        }
    }

    /// Wraps a synchronous function or closure, lifting it into the async
    /// contract.
    ///
    /// The callable is evaluated eagerly and its result wrapped in an
    /// immediately-ready future, so sync and async operations flow through
    /// the same awaiting path in the run loop.
    pub fn sync<F, E>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(Vec<Value>) -> Result<Value, E> + Send + Sync + 'static,
        E: Into<OpError>,
    {
        Self {
            name: name.into(),
            func: Arc::new(move |args| -> OpFuture {
                let result = func(args).map_err(Into::into);
                Box::pin(std::future::ready(result))
            }),
        }
    }
}

#[async_trait]
impl Operation for FnOp {
    fn name(&self) -> &str {
        &self.name
    }

    async fn call(&self, args: Vec<Value>) -> Result<Value, OpError> {
        (self.func)(args).await
    }
}

impl fmt::Debug for FnOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnOp")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Builds an [`FnOp`] from a function item, using the identifier as the
/// operation name.
///
/// ```rust
/// use baton_engine::{op, OpError, Operation};
/// use serde_json::{json, Value};
///
/// async fn greet(_args: Vec<Value>) -> Result<Value, OpError> {
///     Ok(json!("hello"))
/// }
///
/// let operation = op!(greet);
/// assert_eq!(operation.name(), "greet");
///
/// // An explicit name works for closures, which have no identifier.
/// let doubled = op!("double", |args: Vec<Value>| async move {
///     let n = args[0].as_i64().unwrap_or(0);
///     Ok::<_, OpError>(json!(n * 2))
/// });
/// assert_eq!(doubled.name(), "double");
/// ```
#[macro_export]
macro_rules! op {
    ($func:ident) => {
        $crate::FnOp::new(stringify!($func), $func)
    };
    ($name:expr, $func:expr) => {
        $crate::FnOp::new($name, $func)
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    async fn shout(args: Vec<Value>) -> Result<Value, OpError> {
        let text = args.first().and_then(Value::as_str).unwrap_or("");
        Ok(json!(text.to_uppercase()))
    }

    #[tokio::test]
    async fn test_macro_derives_name_from_identifier() {
        let operation = op!(shout);
        assert_eq!(operation.name(), "shout");

        let result = operation.call(vec![json!("quiet")]).await.unwrap();
        assert_eq!(result, json!("QUIET"));
    }

    #[tokio::test]
    async fn test_sync_callables_are_lifted() {
        let operation = FnOp::sync("add_one", |args: Vec<Value>| {
            let n = args.first().and_then(Value::as_i64).unwrap_or(0);
            Ok::<_, OpError>(json!(n + 1))
        });

        let result = operation.call(vec![json!(41)]).await.unwrap();
        assert_eq!(result, json!(42));
    }

    #[tokio::test]
    async fn test_domain_errors_cross_the_boundary_intact() {
        #[derive(Debug, thiserror::Error, PartialEq)]
        #[error("nope")]
        struct Nope;

        let operation = FnOp::sync("refuse", |_args| Err::<Value, _>(Nope));
        let err = operation.call(Vec::new()).await.unwrap_err();
        assert_eq!(*err.downcast::<Nope>().unwrap(), Nope);
    }
}
