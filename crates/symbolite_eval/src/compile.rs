//! Turning an expression into a callable.

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;
use symbolite_ir::{substitute_by_name, Native, NativeError, NativeErrorKind, NativeFn, Value};

use crate::backend::Backend;
use crate::errors::{EvalError, EvalResult};
use crate::evaluate::evaluate;

/// An expression bound to parameter names and a backend.
///
/// Calling it substitutes the arguments for the free symbols of the same
/// name and evaluates the result.
#[derive(Clone)]
pub struct CompiledFunction {
    name: Arc<str>,
    params: Vec<Arc<str>>,
    body: Value,
    backend: Arc<dyn Backend>,
}

impl CompiledFunction {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &[Arc<str>] {
        &self.params
    }

    pub fn body(&self) -> &Value {
        &self.body
    }

    pub fn call(&self, args: &[Native]) -> EvalResult {
        if args.len() != self.params.len() {
            return Err(EvalError::Native(NativeError::type_error(format!(
                "{}() takes {} positional argument(s) but {} were given",
                self.name,
                self.params.len(),
                args.len()
            ))));
        }
        let bindings: FxHashMap<&str, Value> = self
            .params
            .iter()
            .map(|param| &**param)
            .zip(args.iter().cloned().map(Value::Native))
            .collect();
        let bound = substitute_by_name(&self.body, &bindings)?;
        evaluate(&bound, self.backend.as_ref())
    }

    /// Wrap as a native callable, for instance to register as a user
    /// function implementation.
    pub fn to_native(&self) -> NativeFn {
        let compiled = self.clone();
        NativeFn::positional(Arc::clone(&self.name), move |args| {
            compiled.call(args).map_err(|error| match error {
                EvalError::Native(native) => native,
                other => NativeError::new(NativeErrorKind::Other, other.to_string()),
            })
        })
    }
}

impl fmt::Display for CompiledFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "def {}({}): return {}", self.name, self.params.join(", "), self.body)
    }
}

impl fmt::Debug for CompiledFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledFunction")
            .field("name", &self.name)
            .field("params", &self.params)
            .field("body", &self.body)
            .field("backend", &self.backend.name())
            .finish()
    }
}

/// Bind `expr` to positional parameters named `params`.
pub fn as_function(
    expr: &Value,
    name: &str,
    params: &[&str],
    backend: Arc<dyn Backend>,
) -> CompiledFunction {
    CompiledFunction {
        name: name.into(),
        params: params.iter().map(|&param| Arc::from(param)).collect(),
        body: expr.clone(),
        backend,
    }
}
