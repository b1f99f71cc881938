//! Rewriting trees by replacing nodes.
//!
//! A node found in the mapping is replaced by its image and not walked
//! further. Every other composite node is rebuilt from its substituted
//! children, keeping its category: a derived symbol stays a derived
//! symbol with the same name.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::{BuildHasher, Hash};
use std::sync::Arc;

use crate::errors::BuildError;
use crate::expression::Expression;
use crate::function::Function;
use crate::native::Native;
use crate::stack::ensure_sufficient_stack;
use crate::symbol::Symbol;
use crate::value::Value;
use crate::visitor::{visit_all, visit_entries, walk, Visitor};

/// Substitution visitor driven by a lookup function.
pub struct Substitute<F> {
    lookup: F,
}

impl<F> Substitute<F>
where
    F: FnMut(&Value) -> Option<Value>,
{
    pub fn new(lookup: F) -> Self {
        Substitute { lookup }
    }

    fn rebuild(&mut self, expression: &Expression) -> Result<Expression, BuildError> {
        let function = self.visit(&Value::Function(expression.function().clone()))?;
        let args = visit_all(self, expression.args())?;
        let kwargs = visit_entries(self, expression.kwargs_items())?;
        Expression::rebuild(function, args, kwargs)
    }
}

impl<F> Visitor for Substitute<F>
where
    F: FnMut(&Value) -> Option<Value>,
{
    type Output = Value;
    type Error = BuildError;

    fn visit(&mut self, value: &Value) -> Result<Value, BuildError> {
        if let Some(replacement) = (self.lookup)(value) {
            return Ok(replacement);
        }
        ensure_sufficient_stack(|| walk(self, value))
    }

    fn visit_expression(&mut self, expression: &Expression) -> Result<Value, BuildError> {
        self.rebuild(expression).map(Value::from)
    }

    fn visit_function(&mut self, function: &Function) -> Result<Value, BuildError> {
        Ok(Value::Function(function.clone()))
    }

    fn visit_symbol(&mut self, symbol: &Symbol) -> Result<Value, BuildError> {
        match symbol.expression() {
            Some(expression) => {
                let rebuilt = self.rebuild(expression)?;
                Ok(Value::Symbol(symbol.with_expression(rebuilt)))
            }
            None => Ok(Value::Symbol(symbol.clone())),
        }
    }

    fn visit_list(&mut self, items: &[Value]) -> Result<Value, BuildError> {
        visit_all(self, items).map(Value::List)
    }

    fn visit_tuple(&mut self, items: &[Value]) -> Result<Value, BuildError> {
        visit_all(self, items).map(Value::Tuple)
    }

    fn visit_map(&mut self, entries: &[(Arc<str>, Value)]) -> Result<Value, BuildError> {
        visit_entries(self, entries).map(Value::Map)
    }

    fn visit_native(&mut self, native: &Native) -> Result<Value, BuildError> {
        Ok(Value::Native(native.clone()))
    }
}

/// Replace every node structurally equal to a key of `mapping`.
pub fn substitute<S: BuildHasher>(
    value: &Value,
    mapping: &HashMap<Value, Value, S>,
) -> Result<Value, BuildError> {
    if mapping.is_empty() {
        return Ok(value.clone());
    }
    Substitute::new(|node: &Value| mapping.get(node).cloned()).visit(value)
}

/// Replace leaf symbols and functions whose dotted name is a key of
/// `mapping`.
pub fn substitute_by_name<K, S>(
    value: &Value,
    mapping: &HashMap<K, Value, S>,
) -> Result<Value, BuildError>
where
    K: Borrow<str> + Hash + Eq,
    S: BuildHasher,
{
    if mapping.is_empty() {
        return Ok(value.clone());
    }
    Substitute::new(|node: &Value| {
        let named = match node {
            Value::Symbol(symbol) if symbol.is_leaf() => symbol.named(),
            Value::Function(function) => function.named(),
            _ => return None,
        };
        mapping.get(named.to_string().as_str()).cloned()
    })
    .visit(value)
}

#[cfg(test)]
mod tests;
