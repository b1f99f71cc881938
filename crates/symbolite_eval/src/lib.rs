//! Symbolite evaluation - resolving expression trees against backends.
//!
//! A backend maps dotted paths such as `scalar.cos` or `symbol.add` to
//! native callables and constants. The same tree evaluates against any
//! backend without change; `libstd()` is the built-in one.
//!
//! Backends are passed explicitly to `evaluate`, or installed for a scope
//! with `with_backend` and picked up by `Evaluator` and
//! `evaluate_in_context`. Without either, the evaluator warns and uses the
//! standard backend unless configured with `Fallback::Deny`.

mod backend;
mod compile;
mod context;
mod errors;
mod evaluate;
mod evaluator;
mod libstd;

pub use backend::{Backend, ModuleBackend, ModuleBackendBuilder, Resolved};
pub use compile::{as_function, CompiledFunction};
pub use context::{current_backend, with_backend};
pub use errors::{
    not_callable, unknown_name, unresolved_implementation, unsupported, EvalError, EvalResult,
};
pub use evaluate::{evaluate, Evaluate};
pub use evaluator::{evaluate_in_context, Evaluator, EvaluatorBuilder, Fallback};
pub use libstd::{libstd, LIBSTD};
