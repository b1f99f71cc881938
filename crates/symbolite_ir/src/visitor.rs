//! Visitor over the node categories of an expression tree.
//!
//! # Design
//!
//! Each traversal (formatting, substitution, evaluation, ...) is one
//! `Visitor` implementation producing a `Result<Output, Error>` per node.
//! The category set is closed: there is one required method per `Value`
//! variant, so a new variant fails to compile until every visitor
//! handles it.
//!
//! `visit` dispatches through `walk` behind a stack guard. Override
//! `visit` to intercept nodes before dispatch (substitution does this to
//! look nodes up in its mapping) and call `walk` to continue.
//!
//! # Example
//!
//! ```text
//! struct Depth;
//!
//! impl Visitor for Depth {
//!     type Output = usize;
//!     type Error = Infallible;
//!
//!     fn visit_expression(&mut self, e: &Expression) -> Result<usize, Infallible> {
//!         let deepest = e.operands().map(|v| self.visit(v)).max_by_key(...);
//!         ...
//!     }
//!     ...
//! }
//! ```

use std::sync::Arc;

use crate::expression::Expression;
use crate::function::Function;
use crate::native::Native;
use crate::stack::ensure_sufficient_stack;
use crate::symbol::Symbol;
use crate::value::Value;

pub trait Visitor {
    type Output;
    type Error;

    /// Visit any node.
    fn visit(&mut self, value: &Value) -> Result<Self::Output, Self::Error> {
        ensure_sufficient_stack(|| walk(self, value))
    }

    /// A call node, bare or wrapped by a derived symbol.
    fn visit_expression(&mut self, expression: &Expression) -> Result<Self::Output, Self::Error>;

    fn visit_function(&mut self, function: &Function) -> Result<Self::Output, Self::Error>;

    fn visit_symbol(&mut self, symbol: &Symbol) -> Result<Self::Output, Self::Error>;

    fn visit_list(&mut self, items: &[Value]) -> Result<Self::Output, Self::Error>;

    fn visit_tuple(&mut self, items: &[Value]) -> Result<Self::Output, Self::Error>;

    fn visit_map(&mut self, entries: &[(Arc<str>, Value)]) -> Result<Self::Output, Self::Error>;

    fn visit_native(&mut self, native: &Native) -> Result<Self::Output, Self::Error>;
}

/// Dispatch `value` to the visitor method of its category.
pub fn walk<V: Visitor + ?Sized>(visitor: &mut V, value: &Value) -> Result<V::Output, V::Error> {
    match value {
        Value::Expr(expression) => visitor.visit_expression(expression),
        Value::Function(function) => visitor.visit_function(function),
        Value::Symbol(symbol) => visitor.visit_symbol(symbol),
        Value::List(items) => visitor.visit_list(items),
        Value::Tuple(items) => visitor.visit_tuple(items),
        Value::Map(entries) => visitor.visit_map(entries),
        Value::Native(native) => visitor.visit_native(native),
    }
}

/// Visit every item of a sequence, stopping at the first error.
pub fn visit_all<V: Visitor + ?Sized>(
    visitor: &mut V,
    items: &[Value],
) -> Result<Vec<V::Output>, V::Error> {
    items.iter().map(|item| visitor.visit(item)).collect()
}

/// Visit the values of keyword pairs, keeping the keys.
pub fn visit_entries<V: Visitor + ?Sized>(
    visitor: &mut V,
    entries: &[(Arc<str>, Value)],
) -> Result<Vec<(Arc<str>, V::Output)>, V::Error> {
    entries
        .iter()
        .map(|(key, value)| Ok((Arc::clone(key), visitor.visit(value)?)))
        .collect()
}
