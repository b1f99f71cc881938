//! Collecting the named entities of a tree.

use std::convert::Infallible;
use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::expression::Expression;
use crate::function::Function;
use crate::named::Named;
use crate::native::Native;
use crate::symbol::Symbol;
use crate::value::Value;
use crate::visitor::Visitor;

/// A named entity met while walking a tree.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NamedRef<'a> {
    Symbol(&'a Symbol),
    Function(&'a Function),
}

impl<'a> NamedRef<'a> {
    pub fn named(self) -> &'a Named {
        match self {
            NamedRef::Symbol(symbol) => symbol.named(),
            NamedRef::Function(function) => function.named(),
        }
    }

    pub fn to_value(self) -> Value {
        match self {
            NamedRef::Symbol(symbol) => Value::Symbol(symbol.clone()),
            NamedRef::Function(function) => Value::Function(function.clone()),
        }
    }
}

enum Frame<'a> {
    Value(&'a Value),
    Expression(&'a Expression),
}

/// Lazy pre-order walk yielding the function of every call node and every
/// leaf symbol.
///
/// Calls yield their function first, then walk positional arguments left
/// to right, then keyword values in declaration order. Derived symbols
/// yield nothing themselves. Repeated entities are yielded every time
/// they occur.
pub struct CollectNamed<'a> {
    stack: Vec<Frame<'a>>,
    include_anonymous: bool,
}

impl<'a> CollectNamed<'a> {
    fn keep(&self, named: &Named) -> bool {
        self.include_anonymous || !named.is_anonymous()
    }

    fn push_expression(&mut self, expression: &'a Expression) {
        self.stack.extend(
            expression
                .kwargs_items()
                .iter()
                .rev()
                .map(|(_, value)| Frame::Value(value)),
        );
        self.stack
            .extend(expression.args().iter().rev().map(Frame::Value));
    }
}

impl<'a> Iterator for CollectNamed<'a> {
    type Item = NamedRef<'a>;

    fn next(&mut self) -> Option<NamedRef<'a>> {
        while let Some(frame) = self.stack.pop() {
            let value = match frame {
                Frame::Expression(expression) => {
                    self.push_expression(expression);
                    let function = expression.function();
                    if self.keep(function.named()) {
                        return Some(NamedRef::Function(function));
                    }
                    continue;
                }
                Frame::Value(value) => value,
            };
            match value {
                Value::Expr(expression) => self.stack.push(Frame::Expression(expression)),
                Value::Function(function) => {
                    if self.keep(function.named()) {
                        return Some(NamedRef::Function(function));
                    }
                }
                Value::Symbol(symbol) => match symbol.expression() {
                    Some(expression) => self.stack.push(Frame::Expression(expression)),
                    None if self.keep(symbol.named()) => return Some(NamedRef::Symbol(symbol)),
                    None => {}
                },
                Value::List(items) | Value::Tuple(items) => {
                    self.stack.extend(items.iter().rev().map(Frame::Value));
                }
                Value::Map(entries) => {
                    self.stack
                        .extend(entries.iter().rev().map(|(_, value)| Frame::Value(value)));
                }
                Value::Native(_) => {}
            }
        }
        None
    }
}

/// Walk `value` lazily, yielding named functions and leaf symbols.
pub fn collect_named(value: &Value, include_anonymous: bool) -> CollectNamed<'_> {
    CollectNamed {
        stack: vec![Frame::Value(value)],
        include_anonymous,
    }
}

/// What occurs in `value` and how many times.
///
/// A tree without named entities (a bare literal, say) reports itself
/// once.
pub fn inspect(value: &Value) -> FxHashMap<Value, usize> {
    let mut counter = FxHashMap::default();
    for named in collect_named(value, false) {
        *counter.entry(named.to_value()).or_insert(0) += 1;
    }
    if counter.is_empty() {
        counter.insert(value.clone(), 1);
    }
    counter
}

/// Dotted names of the entities in `value`.
///
/// `Some(ns)` keeps entities of namespace `ns` (`Some("")` selects user
/// symbols), `None` keeps everything.
pub fn symbol_names(value: &Value, namespace: Option<&str>) -> FxHashSet<String> {
    collect_named(value, false)
        .filter(|named| namespace.map_or(true, |ns| named.named().namespace() == ns))
        .map(|named| named.named().to_string())
        .collect()
}

/// Namespaces of the entities in `value`.
pub fn symbol_namespaces(value: &Value) -> FxHashSet<String> {
    collect_named(value, false)
        .map(|named| named.named().namespace().to_string())
        .collect()
}

/// Counts every node category, calls included when `calls` is set.
///
/// The eager companion of `collect_named`: literals are counted too.
pub struct Counter {
    pub calls: bool,
    pub counts: FxHashMap<Value, usize>,
}

impl Counter {
    pub fn new(calls: bool) -> Self {
        Counter {
            calls,
            counts: FxHashMap::default(),
        }
    }

    fn bump(&mut self, value: Value) {
        *self.counts.entry(value).or_insert(0) += 1;
    }
}

impl Visitor for Counter {
    type Output = ();
    type Error = Infallible;

    fn visit_expression(&mut self, expression: &Expression) -> Result<(), Infallible> {
        if self.calls {
            self.bump(Value::Expr(Arc::new(expression.clone())));
        }
        self.visit_function(expression.function())?;
        for operand in expression.operands() {
            self.visit(operand)?;
        }
        Ok(())
    }

    fn visit_function(&mut self, function: &Function) -> Result<(), Infallible> {
        self.bump(Value::Function(function.clone()));
        Ok(())
    }

    fn visit_symbol(&mut self, symbol: &Symbol) -> Result<(), Infallible> {
        match symbol.expression() {
            Some(expression) => self.visit_expression(expression),
            None => {
                self.bump(Value::Symbol(symbol.clone()));
                Ok(())
            }
        }
    }

    fn visit_list(&mut self, items: &[Value]) -> Result<(), Infallible> {
        items.iter().try_for_each(|item| self.visit(item))
    }

    fn visit_tuple(&mut self, items: &[Value]) -> Result<(), Infallible> {
        items.iter().try_for_each(|item| self.visit(item))
    }

    fn visit_map(&mut self, entries: &[(Arc<str>, Value)]) -> Result<(), Infallible> {
        entries.iter().try_for_each(|(_, value)| self.visit(value))
    }

    fn visit_native(&mut self, native: &Native) -> Result<(), Infallible> {
        self.bump(Value::Native(native.clone()));
        Ok(())
    }
}
