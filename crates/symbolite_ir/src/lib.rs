//! Symbolite IR - symbolic expression trees and their traversals.
//!
//! Trees are built lazily from symbols and library functions: `x + 1`
//! or `scalar::cos(&x)` returns a new derived `Symbol` wrapping an
//! `Expression`, and nothing is computed. The traversals in this crate
//! render, inspect and rewrite those trees. Evaluation against a numeric
//! backend lives in `symbolite_eval`.
//!
//! # Architecture
//!
//! - `Value`: the closed set of node categories
//! - `Visitor`: one method per category, used by every traversal
//! - `Function` / `UserFunction`: callables that build `Expression`s
//! - `library()`: the static table of operators, scalar and vector functions
//!
//! Everything is immutable once built, except the per-backend
//! implementation table owned by each `UserFunction`.

mod collect;
mod errors;
mod expression;
mod format;
mod function;
mod library;
mod named;
mod native;
mod operator;
mod ops;
pub mod scalar;
mod stack;
mod substitute;
mod symbol;
mod value;
pub mod vector;
mod visitor;

pub use collect::{
    collect_named, inspect, symbol_names, symbol_namespaces, CollectNamed, Counter, NamedRef,
};
pub use errors::{arity_mismatch, not_callable, unexpected_keywords, BuildError};
pub use expression::Expression;
pub use format::{fill_template, stringify, Rendered, Stringify};
pub use function::{
    Function, FunctionKind, UserFunction, UserImpls, DEFAULT_IMPL, USER_NAMESPACE,
};
pub use library::{library, Library, LibraryEntry};
pub use named::{Named, ANONYMOUS};
pub use native::{
    Native, NativeError, NativeErrorKind, NativeFn, NativeKwargs, NativeObject, NativeResult,
};
pub use operator::{Associativity, Op, OperatorSpec, Precedence, SYMBOL_NAMESPACE};
pub use stack::ensure_sufficient_stack;
pub use substitute::{substitute, substitute_by_name, Substitute};
pub use symbol::{Symbol, SymbolKind};
pub use value::Value;
pub use vector::{auto_vectorize, vectorize, VectorIndex};
pub use visitor::{visit_all, visit_entries, walk, Visitor};
