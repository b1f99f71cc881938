//! Evaluation errors.
//!
//! Failures raised by native backend calls travel as `EvalError::Native`
//! with their kind untouched; the evaluator only appends notes naming the
//! failing call.

use symbolite_ir::{BuildError, NativeError};

/// Result of evaluating a tree.
pub type EvalResult<T = symbolite_ir::Native> = Result<T, EvalError>;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvalError {
    /// The backend explicitly declines this operation.
    #[error("{name} is not supported by backend {backend}")]
    Unsupported { name: String, backend: String },

    /// The backend has no member under this path at all.
    #[error("backend {backend} has no member {name}")]
    UnknownName { name: String, backend: String },

    #[error("no implementation of {function} for backend {backend} and no default implementation")]
    UnresolvedImplementation { function: String, backend: String },

    /// A path resolved to a constant but sits in call position.
    #[error("{name} does not resolve to a callable")]
    NotCallable { name: String },

    #[error("no backend in scope and the default backend fallback is disabled")]
    NoBackend,

    #[error(transparent)]
    Native(#[from] NativeError),

    #[error(transparent)]
    Build(#[from] BuildError),
}

impl EvalError {
    /// Whether the operation is one the backend declines, so callers can
    /// skip it and carry on.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, EvalError::Unsupported { .. })
    }
}

pub fn unsupported(name: impl ToString, backend: &str) -> EvalError {
    EvalError::Unsupported {
        name: name.to_string(),
        backend: backend.to_string(),
    }
}

pub fn unknown_name(name: impl ToString, backend: &str) -> EvalError {
    EvalError::UnknownName {
        name: name.to_string(),
        backend: backend.to_string(),
    }
}

pub fn unresolved_implementation(function: impl ToString, backend: &str) -> EvalError {
    EvalError::UnresolvedImplementation {
        function: function.to_string(),
        backend: backend.to_string(),
    }
}

pub fn not_callable(name: impl ToString) -> EvalError {
    EvalError::NotCallable {
        name: name.to_string(),
    }
}
