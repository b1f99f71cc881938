//! `Evaluator`: evaluation with a configured backend policy.

use std::sync::Arc;

use symbolite_ir::Value;

use crate::backend::Backend;
use crate::context::current_backend;
use crate::errors::{EvalError, EvalResult};
use crate::evaluate::evaluate;
use crate::libstd::libstd;

/// What to do when neither an explicit nor a scoped backend is available.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Fallback {
    /// Warn and evaluate with the standard backend.
    #[default]
    DefaultBackend,
    /// Fail with `EvalError::NoBackend`.
    Deny,
}

/// Evaluates values against an explicit backend, the scoped backend, or
/// the fallback, in that order.
#[derive(Clone, Default)]
pub struct Evaluator {
    backend: Option<Arc<dyn Backend>>,
    fallback: Fallback,
}

impl Evaluator {
    /// An evaluator with no explicit backend and the default fallback.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> EvaluatorBuilder {
        EvaluatorBuilder::new()
    }

    pub fn fallback(&self) -> Fallback {
        self.fallback
    }

    /// The backend evaluation would use right now.
    pub fn resolve_backend(&self) -> EvalResult<Arc<dyn Backend>> {
        if let Some(backend) = &self.backend {
            return Ok(Arc::clone(backend));
        }
        if let Some(backend) = current_backend() {
            return Ok(backend);
        }
        match self.fallback {
            Fallback::DefaultBackend => {
                let backend: Arc<dyn Backend> = libstd();
                tracing::warn!(
                    backend = backend.name(),
                    "no backend in scope, falling back to the default backend"
                );
                Ok(backend)
            }
            Fallback::Deny => Err(EvalError::NoBackend),
        }
    }

    pub fn evaluate(&self, value: &Value) -> EvalResult {
        let backend = self.resolve_backend()?;
        evaluate(value, backend.as_ref())
    }
}

impl std::fmt::Debug for Evaluator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Evaluator")
            .field("backend", &self.backend.as_ref().map(|backend| backend.name()))
            .field("fallback", &self.fallback)
            .finish()
    }
}

/// Builder for `Evaluator`.
#[derive(Default)]
#[must_use]
pub struct EvaluatorBuilder {
    backend: Option<Arc<dyn Backend>>,
    fallback: Fallback,
}

impl EvaluatorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Always evaluate with `backend`, ignoring any scoped one.
    pub fn backend(mut self, backend: Arc<dyn Backend>) -> Self {
        self.backend = Some(backend);
        self
    }

    pub fn fallback(mut self, fallback: Fallback) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn build(self) -> Evaluator {
        Evaluator {
            backend: self.backend,
            fallback: self.fallback,
        }
    }
}

/// Evaluate with the scoped backend, falling back to the standard one.
pub fn evaluate_in_context(value: &Value) -> EvalResult {
    Evaluator::new().evaluate(value)
}
