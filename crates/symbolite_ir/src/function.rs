//! Symbolic functions.
//!
//! Calling a `Function` never computes anything: it checks the argument
//! count and returns a derived `Symbol` wrapping the new `Expression`.
//! Evaluation later resolves the function's dotted name against a backend
//! (or, for user functions, against the function's own implementation table).

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::errors::{arity_mismatch, unexpected_keywords, BuildError};
use crate::expression::Expression;
use crate::named::Named;
use crate::native::{Native, NativeFn, NativeResult};
use crate::operator::OperatorSpec;
use crate::symbol::Symbol;
use crate::value::Value;

/// Backend key of the fallback implementation of a user function.
pub const DEFAULT_IMPL: &str = "default";

/// Namespace given to user functions.
pub const USER_NAMESPACE: &str = "user";

/// What a function is, beyond its name.
#[derive(Clone, Debug)]
pub enum FunctionKind {
    /// Formatted as `name(args)` or through its template.
    Plain,
    /// Infix/prefix/postfix operator, parenthesized by precedence.
    Operator(OperatorSpec),
    /// User function carrying its own per-backend implementations.
    User(UserImpls),
}

/// A named callable primitive with a declared arity and display format.
#[derive(Clone, Debug)]
pub struct Function {
    named: Named,
    arity: Option<usize>,
    fmt: Option<Arc<str>>,
    kind: FunctionKind,
}

impl Function {
    /// A variadic plain function.
    pub fn new(name: impl Into<Arc<str>>, namespace: impl Into<Arc<str>>) -> Self {
        Function {
            named: Named::new(name, namespace),
            arity: None,
            fmt: None,
            kind: FunctionKind::Plain,
        }
    }

    /// A fixed-arity operator rendered through `fmt`.
    pub fn operator(
        name: impl Into<Arc<str>>,
        namespace: impl Into<Arc<str>>,
        arity: usize,
        fmt: impl Into<Arc<str>>,
        spec: OperatorSpec,
    ) -> Self {
        Function {
            named: Named::new(name, namespace),
            arity: Some(arity),
            fmt: Some(fmt.into()),
            kind: FunctionKind::Operator(spec),
        }
    }

    #[must_use]
    pub fn with_arity(mut self, arity: usize) -> Self {
        self.arity = Some(arity);
        self
    }

    #[must_use]
    pub fn with_format(mut self, fmt: impl Into<Arc<str>>) -> Self {
        self.fmt = Some(fmt.into());
        self
    }

    pub fn named(&self) -> &Named {
        &self.named
    }

    pub fn arity(&self) -> Option<usize> {
        self.arity
    }

    pub fn format_template(&self) -> Option<&str> {
        self.fmt.as_deref()
    }

    pub fn kind(&self) -> &FunctionKind {
        &self.kind
    }

    pub fn operator_spec(&self) -> Option<OperatorSpec> {
        match self.kind {
            FunctionKind::Operator(spec) => Some(spec),
            _ => None,
        }
    }

    pub fn user_impls(&self) -> Option<&UserImpls> {
        match &self.kind {
            FunctionKind::User(impls) => Some(impls),
            _ => None,
        }
    }

    /// Build the expression node for a call, checking arity.
    pub fn build(
        &self,
        args: Vec<Value>,
        kwargs: Vec<(Arc<str>, Value)>,
    ) -> Result<Expression, BuildError> {
        if let Some(expected) = self.arity {
            if !kwargs.is_empty() {
                return Err(unexpected_keywords(&self.named));
            }
            if args.len() != expected {
                return Err(arity_mismatch(&self.named, expected, args.len()));
            }
        }
        Ok(Expression::new(self.clone(), args, kwargs))
    }

    /// Call with positional arguments.
    pub fn call<I, V>(&self, args: I) -> Result<Symbol, BuildError>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.call_with(args, Vec::new())
    }

    /// Call with positional and keyword arguments.
    pub fn call_with<I, V>(
        &self,
        args: I,
        kwargs: Vec<(Arc<str>, Value)>,
    ) -> Result<Symbol, BuildError>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let args = args.into_iter().map(Into::into).collect();
        self.build(args, kwargs)
            .map(|expression| Symbol::derived(expression))
    }

    /// Call a library function whose arity is known to match.
    pub(crate) fn apply(&self, args: Vec<Value>) -> Symbol {
        debug_assert!(self.arity.map_or(true, |n| n == args.len()));
        Symbol::derived(Expression::new(self.clone(), args, Vec::new()))
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        let same_kind = match (&self.kind, &other.kind) {
            (FunctionKind::Plain, FunctionKind::Plain) => true,
            (FunctionKind::Operator(a), FunctionKind::Operator(b)) => a == b,
            (FunctionKind::User(a), FunctionKind::User(b)) => a.same_table(b),
            _ => false,
        };
        same_kind && self.named == other.named && self.arity == other.arity && self.fmt == other.fmt
    }
}

impl Eq for Function {}

impl Hash for Function {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.named.hash(state);
        self.arity.hash(state);
        self.fmt.hash(state);
        std::mem::discriminant(&self.kind).hash(state);
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.named, f)
    }
}

/// Per-backend implementation table of a user function.
///
/// Shared by every clone of the owning function. Registration is expected
/// to finish before evaluation starts; the lock only keeps concurrent
/// readers sound.
#[derive(Clone, Default)]
pub struct UserImpls(Arc<RwLock<FxHashMap<Arc<str>, NativeFn>>>);

impl UserImpls {
    /// Register `implementation` for `backend`, replacing any earlier one.
    pub fn register(&self, backend: &str, implementation: NativeFn) {
        let previous = self.0.write().insert(backend.into(), implementation);
        if previous.is_some() {
            tracing::debug!(backend, "replaced user function implementation");
        }
    }

    /// Implementation for `backend`, falling back to the default one.
    pub fn resolve(&self, backend: &str) -> Option<NativeFn> {
        let table = self.0.read();
        table
            .get(backend)
            .or_else(|| table.get(DEFAULT_IMPL))
            .cloned()
    }

    /// Backends with a registered implementation, sorted.
    pub fn backends(&self) -> Vec<String> {
        let mut names: Vec<String> = self.0.read().keys().map(|k| k.to_string()).collect();
        names.sort();
        names
    }

    fn same_table(&self, other: &UserImpls) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for UserImpls {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("UserImpls").field(&self.backends()).finish()
    }
}

/// A function defined by the user, evaluated through native
/// implementations registered per backend.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct UserFunction {
    function: Function,
}

impl UserFunction {
    /// A user function with no implementation registered yet.
    pub fn new(name: impl Into<Arc<str>>, arity: Option<usize>) -> Self {
        UserFunction {
            function: Function {
                named: Named::new(name, USER_NAMESPACE),
                arity,
                fmt: None,
                kind: FunctionKind::User(UserImpls::default()),
            },
        }
    }

    /// A user function whose default implementation is `implementation`.
    pub fn with_default(
        name: impl Into<Arc<str>>,
        arity: Option<usize>,
        implementation: NativeFn,
    ) -> Self {
        let function = Self::new(name, arity);
        function.register_impl(DEFAULT_IMPL, implementation);
        function
    }

    /// Wrap a positional Rust closure as the default implementation.
    pub fn from_fn(
        name: impl Into<Arc<str>>,
        arity: usize,
        implementation: impl Fn(&[Native]) -> NativeResult + Send + Sync + 'static,
    ) -> Self {
        let name: Arc<str> = name.into();
        let native = NativeFn::positional(Arc::clone(&name), implementation);
        Self::with_default(name, Some(arity), native)
    }

    /// Register the implementation used when evaluating against `backend`.
    ///
    /// Last registration wins.
    pub fn register_impl(&self, backend: &str, implementation: NativeFn) {
        if let FunctionKind::User(impls) = &self.function.kind {
            impls.register(backend, implementation);
        }
    }

    pub fn implementation(&self, backend: &str) -> Option<NativeFn> {
        self.function
            .user_impls()
            .and_then(|impls| impls.resolve(backend))
    }

    pub fn function(&self) -> &Function {
        &self.function
    }
}

impl std::ops::Deref for UserFunction {
    type Target = Function;

    fn deref(&self) -> &Function {
        &self.function
    }
}

impl From<UserFunction> for Function {
    fn from(value: UserFunction) -> Self {
        value.function
    }
}
