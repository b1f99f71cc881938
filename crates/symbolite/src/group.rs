//! Groups of expressions handled together.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};
use symbolite_eval::{evaluate, Backend, EvalResult};
use symbolite_ir::{
    collect_named, substitute, substitute_by_name, BuildError, Native, NamedRef, Symbol, Value,
};

/// An ordered list of expressions.
///
/// Displays one member per line. Bulk operations apply member by member
/// and keep the order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct SymbolicList {
    items: Vec<Value>,
}

impl SymbolicList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, value: impl Into<Value>) {
        self.items.push(value.into());
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[Value] {
        &self.items
    }

    pub fn substitute<S: BuildHasher>(
        &self,
        mapping: &HashMap<Value, Value, S>,
    ) -> Result<SymbolicList, BuildError> {
        self.items
            .iter()
            .map(|item| substitute(item, mapping))
            .collect()
    }

    pub fn substitute_by_name<K, S>(
        &self,
        mapping: &HashMap<K, Value, S>,
    ) -> Result<SymbolicList, BuildError>
    where
        K: Borrow<str> + Hash + Eq,
        S: BuildHasher,
    {
        self.items
            .iter()
            .map(|item| substitute_by_name(item, mapping))
            .collect()
    }

    pub fn evaluate(&self, backend: &dyn Backend) -> EvalResult<Vec<Native>> {
        self.items
            .iter()
            .map(|item| evaluate(item, backend))
            .collect()
    }

    /// Named entities of every member, in member order.
    pub fn collect_named(&self, include_anonymous: bool) -> impl Iterator<Item = NamedRef<'_>> {
        self.items
            .iter()
            .flat_map(move |item| collect_named(item, include_anonymous))
    }

    /// Dotted names of the entities of every member, filtered by namespace
    /// as `symbol_names` does.
    pub fn symbol_names(&self, namespace: Option<&str>) -> FxHashSet<String> {
        self.collect_named(false)
            .filter(|named| namespace.map_or(true, |ns| named.named().namespace() == ns))
            .map(|named| named.named().to_string())
            .collect()
    }
}

impl fmt::Display for SymbolicList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{item}")?;
        }
        Ok(())
    }
}

impl<V: Into<Value>> FromIterator<V> for SymbolicList {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        SymbolicList {
            items: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<V: Into<Value>> Extend<V> for SymbolicList {
    fn extend<I: IntoIterator<Item = V>>(&mut self, iter: I) {
        self.items.extend(iter.into_iter().map(Into::into));
    }
}

impl<'a> IntoIterator for &'a SymbolicList {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl From<SymbolicList> for Value {
    fn from(list: SymbolicList) -> Self {
        Value::List(list.items)
    }
}

/// A set of named symbols and the relations between them.
///
/// Members are declared in order. `auto_symbol` declares a free symbol
/// named after its member, `define` binds a member to an expression, and
/// `push` records an unnamed relation such as an equation.
#[derive(Clone, Debug, Default)]
pub struct SymbolicNamespace {
    expressions: SymbolicList,
    members: FxHashMap<Arc<str>, Symbol>,
    definitions: Vec<(Symbol, Value)>,
}

impl SymbolicNamespace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a free symbol called `name`, or return the existing member.
    pub fn auto_symbol(&mut self, name: &str) -> Symbol {
        if let Some(symbol) = self.members.get(name) {
            return symbol.clone();
        }
        let symbol = Symbol::new(name);
        self.members.insert(name.into(), symbol.clone());
        self.expressions.push(symbol.clone());
        symbol
    }

    /// Declare `name` and bind it to `value`.
    ///
    /// Redefining a member replaces its earlier definition.
    pub fn define(&mut self, name: &str, value: impl Into<Value>) -> Symbol {
        let symbol = self.auto_symbol(name);
        let value = value.into();
        match self.definitions.iter_mut().find(|(member, _)| *member == symbol) {
            Some((_, previous)) => *previous = value,
            None => self.definitions.push((symbol.clone(), value)),
        }
        symbol
    }

    /// Record an unnamed relation.
    pub fn push(&mut self, value: impl Into<Value>) {
        self.expressions.push(value);
    }

    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.members.get(name)
    }

    /// Declared members and relations, in declaration order.
    pub fn expressions(&self) -> &SymbolicList {
        &self.expressions
    }

    /// Names of the user symbols appearing in the namespace.
    pub fn symbol_names(&self) -> FxHashSet<String> {
        self.expressions.symbol_names(Some(""))
    }

    /// Definitions keyed by their member symbol, ready for
    /// `substitute_content` or `eval_content`.
    pub fn content(&self) -> FxHashMap<Value, Value> {
        self.definitions
            .iter()
            .map(|(symbol, value)| (Value::from(symbol), value.clone()))
            .collect()
    }

    /// Whether `value` is one of the defined members.
    pub fn is_member(&self, value: &Value) -> bool {
        value
            .as_symbol()
            .is_some_and(|symbol| self.definitions.iter().any(|(member, _)| member == symbol))
    }
}

#[cfg(test)]
mod tests;
