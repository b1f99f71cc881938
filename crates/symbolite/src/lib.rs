//! Symbolite - a minimal symbolic toolkit.
//!
//! Build expression trees from symbols and library functions, then
//! render, rewrite or evaluate them against a pluggable backend:
//!
//! ```
//! use symbolite::{evaluate, libstd, scalar, substitute_by_name, Native, Symbol, Value};
//! use rustc_hash::FxHashMap;
//!
//! let x = Symbol::scalar("x");
//! let expr = Value::from(scalar::cos(&x) * 2_i64);
//! assert_eq!(expr.to_string(), "scalar.cos(x) * 2");
//!
//! let mut bindings = FxHashMap::default();
//! bindings.insert("x", Value::from(0_i64));
//! let bound = substitute_by_name(&expr, &bindings).unwrap();
//! assert_eq!(evaluate(&bound, libstd().as_ref()).unwrap(), Native::Float(2.0));
//! ```
//!
//! This crate re-exports `symbolite_ir` and `symbolite_eval` and adds
//! groups of definitions with dependency-ordered evaluation.

mod errors;
mod group;
mod schedule;

pub use errors::{CyclicDependency, GroupError};
pub use group::{SymbolicList, SymbolicNamespace};
pub use schedule::{
    compute_dependencies, eval_content, solve_dependencies, substitute_content, Layers,
};

pub use symbolite_eval::{
    as_function, current_backend, evaluate, evaluate_in_context, libstd, with_backend, Backend,
    CompiledFunction, EvalError, EvalResult, Evaluate, Evaluator, EvaluatorBuilder, Fallback,
    ModuleBackend, ModuleBackendBuilder, Resolved, LIBSTD,
};
pub use symbolite_ir::{
    auto_vectorize, collect_named, ensure_sufficient_stack, fill_template, inspect, library,
    scalar, stringify, substitute, substitute_by_name, symbol_names, symbol_namespaces, vector,
    vectorize, visit_all, visit_entries, walk, Associativity, BuildError, CollectNamed, Counter,
    Expression, Function, FunctionKind, Library, LibraryEntry, Named, NamedRef, Native,
    NativeError, NativeErrorKind, NativeFn, NativeKwargs, NativeObject, NativeResult, Op,
    OperatorSpec, Precedence, Rendered, Stringify, Substitute, Symbol, SymbolKind, UserFunction,
    UserImpls, Value, VectorIndex, Visitor, ANONYMOUS, DEFAULT_IMPL, SYMBOL_NAMESPACE,
    USER_NAMESPACE,
};
