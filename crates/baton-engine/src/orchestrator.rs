//! # Orchestrator
//!
//! This module defines the [`Orchestrator`], the core component that drives
//! steps and owns all run state. It resolves each step's target, materializes
//! its arguments, awaits the operation, and records the outcome.

use crate::error::EngineError;
use crate::registry::StepRegistry;
use crate::step::{Step, StepTarget};
use indexmap::IndexMap;
use serde_json::Value;
use tracing::{debug, info, warn};

/// The stateful engine that runs steps one at a time.
///
/// # State
/// Each instance owns four pieces of state, none of it shared or global:
///
/// * **registry** - step key to entry map, replaced wholesale via
///   [`set_registry`](Self::set_registry).
/// * **last result** - output of the most recent successful step, fed to
///   resolver argument sources. Absent until a first step succeeds.
/// * **last operation name** - name of the most recently completed
///   operation.
/// * **history** - for every operation name, the results it has produced, in
///   call order. History only grows until [`reset_history`](Self::reset_history).
///
/// **Concurrency model**:
/// Running takes `&mut self`, so the borrow checker enforces the
/// one-step-at-a-time discipline; no locks are needed and none are held. The
/// orchestrator spawns nothing and works on any async runtime whose futures
/// are `Send`.
///
/// # Usage Pattern
///
/// ```rust
/// use baton_engine::{op, OpError, Orchestrator, Step};
/// use serde_json::{json, Value};
///
/// async fn roll(_args: Vec<Value>) -> Result<Value, OpError> {
///     Ok(json!(4))
/// }
///
/// #[tokio::main]
/// async fn main() -> Result<(), baton_engine::EngineError> {
///     let mut runner = Orchestrator::new();
///
///     let value = runner.run_step(Step::op(op!(roll))).await?;
///
///     assert_eq!(value, json!(4));
///     assert_eq!(runner.last_operation_name(), Some("roll"));
///     assert_eq!(runner.history()["roll"], vec![json!(4)]);
///     Ok(())
/// }
/// ```
///
/// # Implementation Details
///
/// [`run_step`](Self::run_step) proceeds in a fixed order:
///
/// 1. Resolve the target. A direct operation is used as-is; a key is looked
///    up in the registry, failing with [`EngineError::StepNotFound`] before
///    any state changes.
/// 2. Pick the argument source. A step-level override wins outright; the
///    registry default applies otherwise; with neither, the argument list is
///    empty. A resolver source is invoked with the current last result.
/// 3. Await the operation.
/// 4. On success only: overwrite last result and last operation name, append
///    to the operation's history. A failed step changes nothing.
#[derive(Default)]
pub struct Orchestrator {
    registry: StepRegistry,
    last_result: Option<Value>,
    last_operation: Option<String>,
    history: IndexMap<String, Vec<Value>>,
}

impl Orchestrator {
    /// Orchestrator with an empty registry. Direct-operation steps work
    /// immediately; keyed steps need [`set_registry`](Self::set_registry)
    /// first.
    pub fn new() -> Self {
        Self::default()
    }

    /// Orchestrator with `registry` pre-installed.
    pub fn with_registry(registry: StepRegistry) -> Self {
        Self {
            registry,
            ..Self::default()
        }
    }

    /// Replaces the whole step registry. Entries are never merged; lookups
    /// from this point on see only the new registry. Run state (last result,
    /// history) is untouched.
    pub fn set_registry(&mut self, registry: StepRegistry) {
        info!(steps = registry.len(), "Registry installed");
        self.registry = registry;
    }

    /// Runs a single step and returns its result.
    ///
    /// Accepts anything convertible into a [`Step`]; in particular a bare
    /// `&str` runs the registry entry under that key:
    ///
    /// ```rust,ignore
    /// runner.run_step("CREATE_ORDER").await?;
    /// ```
    ///
    /// # Errors
    ///
    /// [`EngineError::StepNotFound`] for an unknown key,
    /// [`EngineError::OperationFailed`] when the operation itself fails; the
    /// original error rides along as the source. Either way, no state is
    /// updated.
    pub async fn run_step(&mut self, step: impl Into<Step>) -> Result<Value, EngineError> {
        let Step {
            target,
            args: override_args,
        } = step.into();

        let (op, declared_args) = match target {
            StepTarget::Direct(op) => (op, None),
            StepTarget::Key(key) => match self.registry.get(&key) {
                Some(entry) => (entry.op.clone(), entry.args.clone()),
                None => {
                    warn!(key = %key, "Step not found");
                    return Err(EngineError::StepNotFound(key));
                }
            },
        };

        // An override wins outright; the registry source is not consulted,
        // so a registry resolver is never invoked alongside one.
        let args = override_args
            .or(declared_args)
            .map(|source| source.into_args(self.last_result.as_ref()))
            .unwrap_or_default();

        let name = op.name().to_string();
        debug!(op = %name, ?args, "Step");

        let result = match op.call(args).await {
            Ok(value) => value,
            Err(source) => {
                warn!(op = %name, error = %source, "Step failed");
                return Err(EngineError::OperationFailed { name, source });
            }
        };

        self.last_result = Some(result.clone());
        self.last_operation = Some(name.clone());
        let runs = self.history.entry(name.clone()).or_default();
        runs.push(result.clone());
        info!(op = %name, runs = runs.len(), "Step completed");

        Ok(result)
    }

    /// Runs steps strictly sequentially: each is awaited to completion before
    /// the next starts, and the first failure aborts the rest.
    ///
    /// Returns nothing on success; results are observable through the
    /// accessors and each operation's history.
    pub async fn run_sequence<I>(&mut self, steps: I) -> Result<(), EngineError>
    where
        I: IntoIterator,
        I::Item: Into<Step>,
    {
        for step in steps {
            self.run_step(step).await?;
        }
        Ok(())
    }

    /// Output of the most recent successful step, if any.
    pub fn last_result(&self) -> Option<&Value> {
        self.last_result.as_ref()
    }

    /// Name of the most recently completed operation, if any.
    pub fn last_operation_name(&self) -> Option<&str> {
        self.last_operation.as_deref()
    }

    /// Results per operation name, in call order. Read-only; the map cannot
    /// be mutated through this reference.
    pub fn history(&self) -> &IndexMap<String, Vec<Value>> {
        &self.history
    }

    /// Clears the history map. The registry, last result, and last operation
    /// name are untouched.
    pub fn reset_history(&mut self) {
        debug!(ops = self.history.len(), "History cleared");
        self.history.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock;
    use crate::registry::StepEntry;
    use serde_json::json;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_override_wins_and_registry_resolver_stays_cold() {
        let (echo, log) = mock::recording("echo", json!("done"));
        let resolver_ran = Arc::new(AtomicBool::new(false));
        let flag = resolver_ran.clone();

        let registry = StepRegistry::new().with_entry(
            "ECHO",
            StepEntry::new(echo).with_resolver(move |_prev| {
                flag.store(true, Ordering::SeqCst);
                vec![json!("from registry")]
            }),
        );

        let mut runner = Orchestrator::with_registry(registry);
        runner
            .run_step(Step::key("ECHO").with_args(vec![json!("from override")]))
            .await
            .unwrap();

        assert_eq!(log.calls(), vec![vec![json!("from override")]]);
        assert!(!resolver_ran.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_reset_history_keeps_everything_else() {
        let registry = StepRegistry::new().with("PING", mock::constant("ping", json!("pong")));
        let mut runner = Orchestrator::with_registry(registry);

        runner.run_step("PING").await.unwrap();
        runner.reset_history();

        assert!(runner.history().is_empty());
        assert_eq!(runner.last_result(), Some(&json!("pong")));
        assert_eq!(runner.last_operation_name(), Some("ping"));
        // Registry survives the reset too.
        runner.run_step("PING").await.unwrap();
        assert_eq!(runner.history()["ping"].len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_key_fails_without_touching_state() {
        let registry = StepRegistry::new().with("PING", mock::constant("ping", json!("pong")));
        let mut runner = Orchestrator::with_registry(registry);
        runner.run_step("PING").await.unwrap();

        let err = runner.run_step("MISSING").await.unwrap_err();
        assert!(matches!(err, EngineError::StepNotFound(key) if key == "MISSING"));
        assert_eq!(runner.history().len(), 1);
        assert_eq!(runner.last_result(), Some(&json!("pong")));
        assert_eq!(runner.last_operation_name(), Some("ping"));
    }
}
