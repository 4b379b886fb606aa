//! # Step Registry
//!
//! A [`StepRegistry`] maps step keys to entries: an operation plus an
//! optional default argument source. The orchestrator consults it whenever a
//! step targets a key instead of a direct operation.
//!
//! Registries are installed wholesale via
//! [`Orchestrator::set_registry`](crate::Orchestrator::set_registry); there
//! is no merging. Entries iterate in insertion order, which keeps demo output
//! and serialized reports deterministic.

use crate::operation::Operation;
use crate::step::ArgSource;
use indexmap::IndexMap;
use serde_json::Value;
use std::sync::Arc;

/// One registered step: the operation to run and, optionally, the default
/// argument source used when the step itself carries no override.
#[derive(Clone)]
pub struct StepEntry {
    pub(crate) op: Arc<dyn Operation>,
    pub(crate) args: Option<ArgSource>,
}

impl StepEntry {
    /// Entry with no default argument source; the operation runs with zero
    /// arguments unless the step overrides.
    pub fn new(operation: impl Operation + 'static) -> Self {
        Self {
            op: Arc::new(operation),
            args: None,
        }
    }

    /// Declares a default argument source for this entry.
    pub fn with_args(mut self, args: impl Into<ArgSource>) -> Self {
        self.args = Some(args.into());
        self
    }

    /// Declares a default resolver of the previous result for this entry.
    pub fn with_resolver<F>(self, resolve: F) -> Self
    where
        F: Fn(Option<&Value>) -> Vec<Value> + Send + Sync + 'static,
    {
        self.with_args(ArgSource::resolver(resolve))
    }

    /// Name of the registered operation.
    pub fn operation_name(&self) -> &str {
        self.op.name()
    }
}

/// Ordered map from step key to [`StepEntry`].
#[derive(Clone, Default)]
pub struct StepRegistry {
    entries: IndexMap<String, StepEntry>,
}

impl StepRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `operation` under `key` with no default arguments,
    /// returning the registry for chaining.
    pub fn with(self, key: impl Into<String>, operation: impl Operation + 'static) -> Self {
        self.with_entry(key, StepEntry::new(operation))
    }

    /// Registers a full entry under `key`, returning the registry for
    /// chaining. A later registration for the same key replaces the earlier
    /// one.
    pub fn with_entry(mut self, key: impl Into<String>, entry: StepEntry) -> Self {
        self.entries.insert(key.into(), entry);
        self
    }

    /// Inserts an entry into an existing registry.
    pub fn insert(&mut self, key: impl Into<String>, entry: StepEntry) {
        self.entries.insert(key.into(), entry);
    }

    /// Looks a key up.
    pub fn get(&self, key: &str) -> Option<&StepEntry> {
        self.entries.get(key)
    }

    /// Whether `key` is registered.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of registered steps.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered keys, in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operation::{FnOp, OpError};
    use serde_json::json;

    fn noop(name: &str) -> FnOp {
        FnOp::sync(name, |_args| Ok::<_, OpError>(json!(null)))
    }

    #[test]
    fn test_keys_iterate_in_insertion_order() {
        let registry = StepRegistry::new()
            .with("CREATE", noop("create"))
            .with("UPDATE", noop("update"))
            .with("HIRE", noop("hire"));

        let keys: Vec<&str> = registry.keys().collect();
        assert_eq!(keys, ["CREATE", "UPDATE", "HIRE"]);
    }

    #[test]
    fn test_reregistering_a_key_replaces_the_entry() {
        let registry = StepRegistry::new()
            .with("STEP", noop("first"))
            .with("STEP", noop("second"));

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("STEP").unwrap().operation_name(), "second");
    }
}
