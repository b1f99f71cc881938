//! Call nodes.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, OnceLock};

use rustc_hash::FxHashMap;

use crate::errors::{not_callable, BuildError};
use crate::function::Function;
use crate::value::Value;

/// A function applied to positional and keyword arguments.
///
/// Immutable once built. Keyword arguments are stored in declaration
/// order; `kwargs()` exposes a lazily built map view that takes no part
/// in equality or hashing.
pub struct Expression {
    function: Function,
    args: Vec<Value>,
    kwargs: Vec<(Arc<str>, Value)>,
    kwargs_view: OnceLock<FxHashMap<Arc<str>, Value>>,
}

impl Expression {
    /// Arity has already been checked by the caller.
    pub(crate) fn new(function: Function, args: Vec<Value>, kwargs: Vec<(Arc<str>, Value)>) -> Self {
        Expression {
            function,
            args,
            kwargs,
            kwargs_view: OnceLock::new(),
        }
    }

    /// Build a call node from a value standing in call position, as
    /// happens after the function of an expression has been substituted.
    pub fn rebuild(
        function: Value,
        args: Vec<Value>,
        kwargs: Vec<(Arc<str>, Value)>,
    ) -> Result<Expression, BuildError> {
        match function {
            Value::Function(function) => function.build(args, kwargs),
            other => Err(not_callable(other)),
        }
    }

    pub fn function(&self) -> &Function {
        &self.function
    }

    pub fn args(&self) -> &[Value] {
        &self.args
    }

    /// Keyword arguments in declaration order.
    pub fn kwargs_items(&self) -> &[(Arc<str>, Value)] {
        &self.kwargs
    }

    pub fn kwargs(&self) -> &FxHashMap<Arc<str>, Value> {
        self.kwargs_view
            .get_or_init(|| self.kwargs.iter().cloned().collect())
    }

    /// Positional then keyword argument values.
    pub fn operands(&self) -> impl Iterator<Item = &Value> {
        self.args
            .iter()
            .chain(self.kwargs.iter().map(|(_, value)| value))
    }
}

impl Clone for Expression {
    fn clone(&self) -> Self {
        Expression::new(self.function.clone(), self.args.clone(), self.kwargs.clone())
    }
}

impl PartialEq for Expression {
    fn eq(&self, other: &Self) -> bool {
        self.function == other.function && self.args == other.args && self.kwargs == other.kwargs
    }
}

impl Eq for Expression {}

impl Hash for Expression {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.function.hash(state);
        self.args.hash(state);
        self.kwargs.hash(state);
    }
}

impl fmt::Debug for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("Expression");
        debug.field("function", &self.function.named());
        debug.field("args", &self.args);
        if !self.kwargs.is_empty() {
            debug.field("kwargs", &self.kwargs);
        }
        debug.finish()
    }
}
