//! Native host values.
//!
//! A `Native` is anything a backend hands back from a resolved callable or
//! constant, and anything the user drops into an expression as an opaque
//! literal (`x + 2`). The engine never inspects natives beyond equality,
//! hashing and display; arithmetic on them is the backend's business.
//!
//! Floats compare and hash by bit pattern so that natives can be used as
//! substitution keys. `Native::Float(f64::NAN)` therefore equals itself,
//! and `0.0` differs from `-0.0`.

use std::any::Any;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Result of calling a native backend function.
pub type NativeResult = Result<Native, NativeError>;

/// Keyword arguments passed to a native function, in declaration order.
pub type NativeKwargs = [(Arc<str>, Native)];

type NativeCallable = dyn Fn(&[Native], &NativeKwargs) -> NativeResult + Send + Sync;

/// A callable provided by a backend.
///
/// Equality is identity of the underlying closure, so two handles obtained
/// from the same registration compare equal.
#[derive(Clone)]
pub struct NativeFn {
    name: Arc<str>,
    callable: Arc<NativeCallable>,
}

impl NativeFn {
    /// Wrap a callable that accepts positional and keyword arguments.
    pub fn new(
        name: impl Into<Arc<str>>,
        callable: impl Fn(&[Native], &NativeKwargs) -> NativeResult + Send + Sync + 'static,
    ) -> Self {
        NativeFn {
            name: name.into(),
            callable: Arc::new(callable),
        }
    }

    /// Wrap a callable that only accepts positional arguments.
    ///
    /// Calling it with keyword arguments yields a type error.
    pub fn positional(
        name: impl Into<Arc<str>>,
        callable: impl Fn(&[Native]) -> NativeResult + Send + Sync + 'static,
    ) -> Self {
        let name: Arc<str> = name.into();
        let owner = Arc::clone(&name);
        Self::new(name, move |args, kwargs| {
            if let Some((key, _)) = kwargs.first() {
                return Err(NativeError::type_error(format!(
                    "{owner}() got an unexpected keyword argument '{key}'"
                )));
            }
            callable(args)
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn call(&self, args: &[Native], kwargs: &NativeKwargs) -> NativeResult {
        (self.callable)(args, kwargs)
    }

    fn address(&self) -> *const () {
        Arc::as_ptr(&self.callable).cast::<()>()
    }
}

impl PartialEq for NativeFn {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.address(), other.address())
    }
}

impl Eq for NativeFn {}

impl Hash for NativeFn {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.address().hash(state);
    }
}

impl fmt::Debug for NativeFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NativeFn({})", self.name)
    }
}

/// A backend-specific object the engine cannot see into
/// (an array handle, a computer-algebra symbol, ...).
#[derive(Clone)]
pub struct NativeObject {
    type_name: Arc<str>,
    value: Arc<dyn Any + Send + Sync>,
}

impl NativeObject {
    pub fn new<T: Any + Send + Sync>(type_name: impl Into<Arc<str>>, value: T) -> Self {
        NativeObject {
            type_name: type_name.into(),
            value: Arc::new(value),
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }

    fn address(&self) -> *const () {
        Arc::as_ptr(&self.value).cast::<()>()
    }
}

impl PartialEq for NativeObject {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.address(), other.address())
    }
}

impl Eq for NativeObject {}

impl Hash for NativeObject {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.address().hash(state);
    }
}

impl fmt::Debug for NativeObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NativeObject(<{}>)", self.type_name)
    }
}

/// Opaque host value.
#[derive(Clone, Debug)]
pub enum Native {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Arc<str>),
    /// Ordered, immutable sequence (tuple or array).
    Seq(Arc<[Native]>),
    Function(NativeFn),
    Object(NativeObject),
}

impl Native {
    pub fn seq(items: impl IntoIterator<Item = Native>) -> Self {
        Native::Seq(items.into_iter().collect())
    }

    /// Host-facing type name, used in error messages.
    pub fn type_name(&self) -> &str {
        match self {
            Native::Bool(_) => "bool",
            Native::Int(_) => "int",
            Native::Float(_) => "float",
            Native::Str(_) => "str",
            Native::Seq(_) => "seq",
            Native::Function(_) => "function",
            Native::Object(object) => object.type_name(),
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Native::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Numeric view of an int or float.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Native::Int(n) => Some(*n as f64),
            Native::Float(x) => Some(*x),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Native::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Native::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_seq(&self) -> Option<&[Native]> {
        match self {
            Native::Seq(items) => Some(items),
            _ => None,
        }
    }

    /// Negative numeric literals bind like a unary minus when printed.
    pub fn is_negative_number(&self) -> bool {
        match self {
            Native::Int(n) => *n < 0,
            Native::Float(x) => x.is_sign_negative() && !x.is_nan(),
            _ => false,
        }
    }
}

impl PartialEq for Native {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Native::Bool(a), Native::Bool(b)) => a == b,
            (Native::Int(a), Native::Int(b)) => a == b,
            (Native::Float(a), Native::Float(b)) => a.to_bits() == b.to_bits(),
            (Native::Str(a), Native::Str(b)) => a == b,
            (Native::Seq(a), Native::Seq(b)) => a == b,
            (Native::Function(a), Native::Function(b)) => a == b,
            (Native::Object(a), Native::Object(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Native {}

impl Hash for Native {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Native::Bool(b) => b.hash(state),
            Native::Int(n) => n.hash(state),
            Native::Float(x) => x.to_bits().hash(state),
            Native::Str(s) => s.hash(state),
            Native::Seq(items) => items.hash(state),
            Native::Function(f) => f.hash(state),
            Native::Object(object) => object.hash(state),
        }
    }
}

impl fmt::Display for Native {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Native::Bool(true) => f.write_str("True"),
            Native::Bool(false) => f.write_str("False"),
            Native::Int(n) => write!(f, "{n}"),
            Native::Float(x) => write!(f, "{x:?}"),
            Native::Str(s) => f.write_str(s),
            Native::Seq(items) => {
                f.write_str("(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                if items.len() == 1 {
                    f.write_str(",")?;
                }
                f.write_str(")")
            }
            Native::Function(func) => f.write_str(func.name()),
            Native::Object(object) => write!(f, "<{}>", object.type_name()),
        }
    }
}

impl From<bool> for Native {
    fn from(value: bool) -> Self {
        Native::Bool(value)
    }
}

impl From<i64> for Native {
    fn from(value: i64) -> Self {
        Native::Int(value)
    }
}

impl From<i32> for Native {
    fn from(value: i32) -> Self {
        Native::Int(i64::from(value))
    }
}

impl From<f64> for Native {
    fn from(value: f64) -> Self {
        Native::Float(value)
    }
}

impl From<&str> for Native {
    fn from(value: &str) -> Self {
        Native::Str(value.into())
    }
}

impl From<String> for Native {
    fn from(value: String) -> Self {
        Native::Str(value.into())
    }
}

impl From<Vec<Native>> for Native {
    fn from(items: Vec<Native>) -> Self {
        Native::Seq(items.into())
    }
}

impl From<NativeFn> for Native {
    fn from(value: NativeFn) -> Self {
        Native::Function(value)
    }
}

/// Category of a native failure. Annotation never changes it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NativeErrorKind {
    ZeroDivision,
    Type,
    Value,
    Overflow,
    Index,
    Other,
}

impl fmt::Display for NativeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            NativeErrorKind::ZeroDivision => "zero division error",
            NativeErrorKind::Type => "type error",
            NativeErrorKind::Value => "value error",
            NativeErrorKind::Overflow => "overflow error",
            NativeErrorKind::Index => "index error",
            NativeErrorKind::Other => "error",
        };
        f.write_str(label)
    }
}

/// Failure raised by a native backend callable.
///
/// Notes accumulate context (such as the failing call) as the error
/// travels up through the evaluator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NativeError {
    kind: NativeErrorKind,
    message: String,
    notes: Vec<String>,
}

impl NativeError {
    pub fn new(kind: NativeErrorKind, message: impl Into<String>) -> Self {
        NativeError {
            kind,
            message: message.into(),
            notes: Vec::new(),
        }
    }

    pub fn type_error(message: impl Into<String>) -> Self {
        Self::new(NativeErrorKind::Type, message)
    }

    pub fn value_error(message: impl Into<String>) -> Self {
        Self::new(NativeErrorKind::Value, message)
    }

    pub fn zero_division(message: impl Into<String>) -> Self {
        Self::new(NativeErrorKind::ZeroDivision, message)
    }

    pub fn overflow(message: impl Into<String>) -> Self {
        Self::new(NativeErrorKind::Overflow, message)
    }

    pub fn index_error(message: impl Into<String>) -> Self {
        Self::new(NativeErrorKind::Index, message)
    }

    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn kind(&self) -> NativeErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn notes(&self) -> &[String] {
        &self.notes
    }
}

impl fmt::Display for NativeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)?;
        for note in &self.notes {
            write!(f, "\n  note: {note}")?;
        }
        Ok(())
    }
}

impl std::error::Error for NativeError {}
