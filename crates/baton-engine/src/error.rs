//! # Engine Errors
//!
//! This module defines the common error types used throughout the engine.
//! By centralizing error definitions, we ensure consistent error handling
//! across the orchestrator, pipes, and caller-supplied operations.

use crate::operation::OpError;

/// Errors that can occur while driving steps through the engine.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The requested step key has no registry entry. This also covers the
    /// case where no registry was ever installed.
    #[error("no operation registered for step \"{0}\"")]
    StepNotFound(String),
    /// A caller-supplied operation failed. The operation's own error is
    /// carried untouched as the source, so callers can downcast it back to
    /// the concrete type.
    #[error("operation \"{name}\" failed: {source}")]
    OperationFailed { name: String, source: OpError },
}
