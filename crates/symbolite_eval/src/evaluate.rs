//! Evaluating a tree against a backend.
//!
//! Evaluation is bottom-up: operands are evaluated first, then the
//! function of the call node is resolved by its dotted path and called
//! with the native results. Free symbols are turned into backend-native
//! variables by calling the constructor registered for their kind.

use std::sync::Arc;

use symbolite_ir::{
    visit_all, visit_entries, Expression, Function, FunctionKind, Native, NativeFn, Symbol,
    Value, Visitor,
};

use crate::backend::{Backend, Resolved};
use crate::errors::{
    not_callable, unknown_name, unresolved_implementation, unsupported, EvalError, EvalResult,
};

/// Evaluation visitor bound to one backend.
pub struct Evaluate<'b> {
    backend: &'b dyn Backend,
}

impl<'b> Evaluate<'b> {
    pub fn new(backend: &'b dyn Backend) -> Self {
        Evaluate { backend }
    }

    fn lookup(&self, path: &str) -> EvalResult<Resolved> {
        match self.backend.resolve(path) {
            Some(Resolved::Unsupported) => Err(unsupported(path, self.backend.name())),
            Some(resolved) => Ok(resolved),
            None => Err(unknown_name(path, self.backend.name())),
        }
    }

    /// The native callable standing behind `function` in this backend.
    fn callable(&self, function: &Function) -> EvalResult<NativeFn> {
        if let FunctionKind::User(impls) = function.kind() {
            return impls
                .resolve(self.backend.name())
                .ok_or_else(|| unresolved_implementation(function, self.backend.name()));
        }
        let path = function.named().to_string();
        match self.lookup(&path)? {
            Resolved::Function(native) => Ok(native),
            _ => Err(not_callable(path)),
        }
    }
}

/// `f(1, 2, k=3)`, used to annotate failing native calls.
fn describe_call(function: &Function, args: &[Native], kwargs: &[(Arc<str>, Native)]) -> String {
    let operands: Vec<String> = args
        .iter()
        .map(ToString::to_string)
        .chain(kwargs.iter().map(|(key, value)| format!("{key}={value}")))
        .collect();
    format!("{function}({})", operands.join(", "))
}

impl Visitor for Evaluate<'_> {
    type Output = Native;
    type Error = EvalError;

    fn visit_expression(&mut self, expression: &Expression) -> EvalResult {
        let function = expression.function();
        let callable = self.callable(function)?;
        let args = visit_all(self, expression.args())?;
        let kwargs = visit_entries(self, expression.kwargs_items())?;
        callable.call(&args, &kwargs).map_err(|error| {
            let note = format!("while evaluating {}", describe_call(function, &args, &kwargs));
            EvalError::Native(error.with_note(note))
        })
    }

    fn visit_function(&mut self, function: &Function) -> EvalResult {
        self.callable(function).map(Native::Function)
    }

    fn visit_symbol(&mut self, symbol: &Symbol) -> EvalResult {
        if let Some(expression) = symbol.expression() {
            return self.visit_expression(expression);
        }
        if !symbol.is_free() {
            let path = symbol.named().to_string();
            return match self.lookup(&path)? {
                Resolved::Constant(value) => Ok(value),
                Resolved::Function(native) => Ok(Native::Function(native)),
                Resolved::Unsupported => Err(unsupported(path, self.backend.name())),
            };
        }
        let constructor = symbol.kind().constructor_path();
        let Resolved::Function(native) = self.lookup(constructor)? else {
            return Err(not_callable(constructor));
        };
        let name = symbol.name().unwrap_or_default();
        native.call(&[Native::from(name)], &[]).map_err(|error| {
            EvalError::Native(error.with_note(format!("while constructing {name}")))
        })
    }

    fn visit_list(&mut self, items: &[Value]) -> EvalResult {
        visit_all(self, items).map(Native::from)
    }

    fn visit_tuple(&mut self, items: &[Value]) -> EvalResult {
        visit_all(self, items).map(Native::from)
    }

    /// Maps evaluate to a sequence of `(key, value)` pairs.
    fn visit_map(&mut self, entries: &[(Arc<str>, Value)]) -> EvalResult {
        let pairs = visit_entries(self, entries)?;
        Ok(Native::seq(pairs.into_iter().map(|(key, value)| {
            Native::seq([Native::Str(key), value])
        })))
    }

    fn visit_native(&mut self, native: &Native) -> EvalResult {
        Ok(native.clone())
    }
}

/// Evaluate `value` against `backend`.
#[tracing::instrument(level = "trace", skip_all, fields(backend = backend.name()))]
pub fn evaluate(value: &Value, backend: &dyn Backend) -> EvalResult {
    Evaluate::new(backend).visit(value)
}

#[cfg(test)]
mod tests;
