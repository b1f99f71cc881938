//! Symbols: leaf placeholders and derived values.

use std::sync::Arc;

use crate::expression::Expression;
use crate::named::Named;

/// The runtime class of a symbol.
///
/// Backends construct native variables for free symbols by calling the
/// constructor registered under `constructor_path()` with the symbol name.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    #[default]
    Symbol,
    Scalar,
    Vector,
}

impl SymbolKind {
    pub const fn constructor_path(self) -> &'static str {
        match self {
            SymbolKind::Symbol => "symbol.Symbol",
            SymbolKind::Scalar => "scalar.Scalar",
            SymbolKind::Vector => "vector.Vector",
        }
    }
}

/// A named placeholder, or the result of a call.
///
/// Without an expression the symbol is a leaf: a free variable when its
/// namespace is empty, a library constant otherwise. With one it is
/// derived, and formats and evaluates as that expression.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Symbol {
    named: Named,
    kind: SymbolKind,
    expression: Option<Arc<Expression>>,
}

impl Symbol {
    /// A free symbol.
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self::leaf(Named::user(name), SymbolKind::Symbol)
    }

    /// A free scalar symbol.
    pub fn scalar(name: impl Into<Arc<str>>) -> Self {
        Self::leaf(Named::user(name), SymbolKind::Scalar)
    }

    /// A free vector symbol.
    pub fn vector(name: impl Into<Arc<str>>) -> Self {
        Self::leaf(Named::user(name), SymbolKind::Vector)
    }

    /// A library constant such as `scalar.pi`.
    pub fn constant(
        name: impl Into<Arc<str>>,
        namespace: impl Into<Arc<str>>,
        kind: SymbolKind,
    ) -> Self {
        Self::leaf(Named::new(name, namespace), kind)
    }

    /// A leaf without a name.
    pub fn anonymous(kind: SymbolKind) -> Self {
        Self::leaf(Named::anonymous(""), kind)
    }

    /// The anonymous result of a call.
    pub fn derived(expression: Expression) -> Self {
        Symbol {
            named: Named::anonymous(""),
            kind: SymbolKind::Symbol,
            expression: Some(Arc::new(expression)),
        }
    }

    fn leaf(named: Named, kind: SymbolKind) -> Self {
        Symbol {
            named,
            kind,
            expression: None,
        }
    }

    pub fn named(&self) -> &Named {
        &self.named
    }

    pub fn name(&self) -> Option<&str> {
        self.named.name()
    }

    pub fn namespace(&self) -> &str {
        self.named.namespace()
    }

    pub fn kind(&self) -> SymbolKind {
        self.kind
    }

    pub fn expression(&self) -> Option<&Expression> {
        self.expression.as_deref()
    }

    pub fn is_leaf(&self) -> bool {
        self.expression.is_none()
    }

    /// A leaf outside every library namespace.
    pub fn is_free(&self) -> bool {
        self.is_leaf() && self.namespace().is_empty()
    }

    /// Same symbol under a new name. A derived symbol keeps its expression.
    #[must_use]
    pub fn with_name(&self, name: impl Into<Arc<str>>) -> Self {
        Symbol {
            named: self.named.renamed(name),
            kind: self.kind,
            expression: self.expression.clone(),
        }
    }

    /// Same identity wrapping another expression.
    #[must_use]
    pub fn with_expression(&self, expression: impl Into<Arc<Expression>>) -> Self {
        Symbol {
            named: self.named.clone(),
            kind: self.kind,
            expression: Some(expression.into()),
        }
    }

    #[must_use]
    pub fn with_kind(&self, kind: SymbolKind) -> Self {
        Symbol {
            kind,
            ..self.clone()
        }
    }
}
