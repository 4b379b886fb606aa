//! # Step Vocabulary
//!
//! This module defines the types callers use to describe *what to run* and
//! *with which arguments*. Both choice points are explicit tagged unions
//! rather than sentinel conventions:
//!
//! - [`StepTarget`]: run a direct [`Operation`], or look a key up in the
//!   registry.
//! - [`ArgSource`]: pass a fixed argument list verbatim, or derive the
//!   arguments from the previous step's result through a resolver.
//!
//! A [`Step`] pairs a target with an optional argument-source override. The
//! same descriptor drives ad-hoc runs and registry-based sequences.

use crate::operation::Operation;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Resolver function deriving an argument list from the previous step's
/// result. The result is absent when no step has completed yet.
pub type ArgResolver = Arc<dyn Fn(Option<&Value>) -> Vec<Value> + Send + Sync>;

/// Where a step's arguments come from.
#[derive(Clone)]
pub enum ArgSource {
    /// Fixed positional values, passed to the operation verbatim. The engine
    /// never interprets or invokes them.
    Fixed(Vec<Value>),
    /// Derives the arguments from the previous step's result at the moment
    /// the step begins.
    Resolver(ArgResolver),
}

impl ArgSource {
    /// Fixed argument list.
    pub fn fixed<I>(values: I) -> Self
    where
        I: IntoIterator<Item = Value>,
    {
        Self::Fixed(values.into_iter().collect())
    }

    /// Resolver of the previous result.
    pub fn resolver<F>(resolve: F) -> Self
    where
        F: Fn(Option<&Value>) -> Vec<Value> + Send + Sync + 'static,
    {
        Self::Resolver(Arc::new(resolve))
    }

    /// Materializes the argument list for a step that is about to run.
    pub(crate) fn into_args(self, last_result: Option<&Value>) -> Vec<Value> {
        match self {
            Self::Fixed(values) => values,
            Self::Resolver(resolve) => resolve(last_result),
        }
    }
}

impl From<Vec<Value>> for ArgSource {
    fn from(values: Vec<Value>) -> Self {
        Self::Fixed(values)
    }
}

impl fmt::Debug for ArgSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(values) => f.debug_tuple("Fixed").field(values).finish(),
            Self::Resolver(_) => f.write_str("Resolver"),
        }
    }
}

/// What a step runs: a direct operation, or a registry lookup by key.
#[derive(Clone)]
pub enum StepTarget {
    /// An operation supplied inline, bypassing the registry.
    Direct(Arc<dyn Operation>),
    /// A key resolved against the orchestrator's registry when the step runs.
    Key(String),
}

impl fmt::Debug for StepTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Direct(op) => f.debug_tuple("Direct").field(&op.name()).finish(),
            Self::Key(key) => f.debug_tuple("Key").field(key).finish(),
        }
    }
}

/// Execution step descriptor: a target plus an optional argument-source
/// override.
///
/// An override wins outright over whatever argument source the registry
/// declares for the key; a registry resolver is not even invoked when an
/// override is present. A step with neither source runs with zero arguments.
#[derive(Clone, Debug)]
pub struct Step {
    pub(crate) target: StepTarget,
    pub(crate) args: Option<ArgSource>,
}

impl Step {
    /// Step that looks `key` up in the registry at run time.
    pub fn key(key: impl Into<String>) -> Self {
        Self {
            target: StepTarget::Key(key.into()),
            args: None,
        }
    }

    /// Step that runs `operation` directly, without a registry.
    pub fn op(operation: impl Operation + 'static) -> Self {
        Self {
            target: StepTarget::Direct(Arc::new(operation)),
            args: None,
        }
    }

    /// Overrides the argument source for this step.
    pub fn with_args(mut self, args: impl Into<ArgSource>) -> Self {
        self.args = Some(args.into());
        self
    }

    /// Overrides the argument source with a resolver of the previous result.
    pub fn with_resolver<F>(self, resolve: F) -> Self
    where
        F: Fn(Option<&Value>) -> Vec<Value> + Send + Sync + 'static,
    {
        self.with_args(ArgSource::resolver(resolve))
    }
}

impl From<&str> for Step {
    fn from(key: &str) -> Self {
        Self::key(key)
    }
}

impl From<String> for Step {
    fn from(key: String) -> Self {
        Self::key(key)
    }
}
