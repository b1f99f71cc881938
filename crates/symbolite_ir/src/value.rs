//! The closed set of node categories an expression tree is built from.
//!
//! Every traversal (formatting, collection, substitution, evaluation)
//! matches exhaustively on `Value`. Adding a category means extending
//! `Visitor` and each of its implementations; the compiler lists them.

use std::sync::Arc;

use crate::expression::Expression;
use crate::function::{Function, UserFunction};
use crate::native::{Native, NativeFn};
use crate::symbol::Symbol;

/// A node of an expression tree.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Value {
    /// A bare call node.
    Expr(Arc<Expression>),
    Function(Function),
    /// A leaf symbol, or a derived symbol wrapping a call node.
    Symbol(Symbol),
    List(Vec<Value>),
    Tuple(Vec<Value>),
    /// String-keyed mapping, kept in insertion order.
    Map(Vec<(Arc<str>, Value)>),
    /// Opaque host value.
    Native(Native),
}

impl Value {
    pub fn tuple(items: impl IntoIterator<Item = impl Into<Value>>) -> Self {
        Value::Tuple(items.into_iter().map(Into::into).collect())
    }

    pub fn list(items: impl IntoIterator<Item = impl Into<Value>>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }

    pub fn as_symbol(&self) -> Option<&Symbol> {
        match self {
            Value::Symbol(symbol) => Some(symbol),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&Function> {
        match self {
            Value::Function(function) => Some(function),
            _ => None,
        }
    }

    pub fn as_native(&self) -> Option<&Native> {
        match self {
            Value::Native(native) => Some(native),
            _ => None,
        }
    }

    /// The call node behind this value, for bare and derived expressions.
    pub fn as_expression(&self) -> Option<&Expression> {
        match self {
            Value::Expr(expression) => Some(expression),
            Value::Symbol(symbol) => symbol.expression(),
            _ => None,
        }
    }

    /// Whether this value is a free symbol: a leaf outside every library
    /// namespace.
    pub fn is_free_symbol(&self) -> bool {
        self.as_symbol().is_some_and(Symbol::is_free)
    }
}

impl From<Symbol> for Value {
    fn from(value: Symbol) -> Self {
        Value::Symbol(value)
    }
}

impl From<&Symbol> for Value {
    fn from(value: &Symbol) -> Self {
        Value::Symbol(value.clone())
    }
}

impl From<Function> for Value {
    fn from(value: Function) -> Self {
        Value::Function(value)
    }
}

impl From<&Function> for Value {
    fn from(value: &Function) -> Self {
        Value::Function(value.clone())
    }
}

impl From<UserFunction> for Value {
    fn from(value: UserFunction) -> Self {
        Value::Function(value.into())
    }
}

impl From<&UserFunction> for Value {
    fn from(value: &UserFunction) -> Self {
        Value::Function(value.function().clone())
    }
}

impl From<Expression> for Value {
    fn from(value: Expression) -> Self {
        Value::Expr(Arc::new(value))
    }
}

impl From<Arc<Expression>> for Value {
    fn from(value: Arc<Expression>) -> Self {
        Value::Expr(value)
    }
}

impl From<Native> for Value {
    fn from(value: Native) -> Self {
        Value::Native(value)
    }
}

impl From<&Value> for Value {
    fn from(value: &Value) -> Self {
        value.clone()
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

macro_rules! native_literal {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Native(Native::from(value))
                }
            }
        )*
    };
}

native_literal!(bool, i32, i64, f64, &str, String, NativeFn);
