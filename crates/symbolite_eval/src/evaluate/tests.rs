#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;
use crate::backend::ModuleBackend;
use crate::context::with_backend;
use crate::evaluator::{evaluate_in_context, Evaluator, Fallback};
use crate::libstd::libstd;
use pretty_assertions::assert_eq;
use symbolite_ir::{scalar, vector, NativeErrorKind, NativeFn, UserFunction, DEFAULT_IMPL};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::Layer;

fn eval(value: impl Into<Value>) -> EvalResult {
    evaluate(&value.into(), libstd().as_ref())
}

fn bind(value: impl Into<Value>, pairs: &[(&str, Native)]) -> Value {
    let mapping: rustc_hash::FxHashMap<&str, Value> = pairs
        .iter()
        .map(|(name, native)| (*name, Value::Native(native.clone())))
        .collect();
    symbolite_ir::substitute_by_name(&value.into(), &mapping).unwrap()
}

#[test]
fn test_substituted_sum() {
    let x = Symbol::new("x");
    let y = Symbol::new("y");
    let bound = bind(&x + &y, &[("x", Native::Int(2)), ("y", Native::Int(3))]);
    assert_eq!(eval(bound).unwrap(), Native::Int(5));
}

#[test]
fn test_library_functions_and_constants() {
    let value = scalar::cos(scalar::pi()) + 1_i64;
    assert_eq!(eval(value).unwrap(), Native::Float(0.0));
}

#[test]
fn test_containers() {
    let items = Value::list([Value::from(1_i64), Value::from(2.5)]);
    assert_eq!(
        eval(items).unwrap(),
        Native::seq([Native::Int(1), Native::Float(2.5)])
    );

    let map = Value::Map(vec![("a".into(), Value::from(1_i64))]);
    assert_eq!(
        eval(map).unwrap(),
        Native::seq([Native::seq([Native::from("a"), Native::Int(1)])])
    );

    let sum = vector::sum(Value::tuple([1_i64, 2, 3]));
    assert_eq!(eval(sum).unwrap(), Native::Int(6));
}

#[test]
fn test_native_errors_keep_kind_and_gain_a_note() {
    let x = Symbol::new("x");
    let bound = bind(&x / 0_i64, &[("x", Native::Int(1))]);
    let EvalError::Native(error) = eval(bound).unwrap_err() else {
        panic!("expected a native error");
    };
    assert_eq!(error.kind(), NativeErrorKind::ZeroDivision);
    assert_eq!(error.notes(), ["while evaluating symbol.truediv(1, 0)"]);
}

#[test]
fn test_unsupported_is_distinct_from_unknown() {
    let err = eval(scalar::erf(1_i64)).unwrap_err();
    assert!(err.is_unsupported());
    assert_eq!(err.to_string(), "scalar.erf is not supported by backend libstd");

    let empty = ModuleBackend::builder("empty").build();
    let err = evaluate(&Value::from(scalar::cos(1_i64)), &empty).unwrap_err();
    assert!(!err.is_unsupported());
    assert!(matches!(err, EvalError::UnknownName { .. }));
}

#[test]
fn test_free_symbols_need_a_constructor() {
    let err = eval(Symbol::new("x")).unwrap_err();
    assert!(err.is_unsupported());

    let named = ModuleBackend::builder("names")
        .positional("scalar.Scalar", |args| {
            Ok(Native::from(format!("<{}>", args[0])))
        })
        .build();
    let value = evaluate(&Value::from(Symbol::scalar("t")), &named).unwrap();
    assert_eq!(value, Native::from("<t>"));
}

#[test]
fn test_constant_in_call_position() {
    let odd = libstd().to_builder("odd").constant("scalar.cos", 1.0).build();
    let err = evaluate(&Value::from(scalar::cos(1_i64)), &odd).unwrap_err();
    assert!(matches!(err, EvalError::NotCallable { .. }));
}

#[test]
fn test_user_function_dispatch() {
    let f = UserFunction::new("f", Some(1));
    f.register_impl(
        "a",
        NativeFn::positional("f", |args| {
            let n = args[0].as_int().unwrap_or_default();
            Ok(Native::Int(2 * n))
        }),
    );
    let call = Value::from(f.call([1_i64]).unwrap());

    let a = libstd().to_builder("a").build();
    let b = libstd().to_builder("b").build();
    assert_eq!(evaluate(&call, &a).unwrap(), Native::Int(2));

    let err = evaluate(&call, &b).unwrap_err();
    assert!(matches!(err, EvalError::UnresolvedImplementation { .. }));

    f.register_impl(DEFAULT_IMPL, NativeFn::positional("f", |_| Ok(Native::Int(-1))));
    assert_eq!(evaluate(&call, &b).unwrap(), Native::Int(-1));
    assert_eq!(evaluate(&call, &a).unwrap(), Native::Int(2));
}

#[test]
fn test_scoped_backend_wins_over_fallback() {
    let renamed = libstd().to_builder("scoped").constant("scalar.pi", 3.0).build();
    let value = with_backend(Arc::new(renamed), || evaluate_in_context(&scalar::pi().into()));
    assert_eq!(value.unwrap(), Native::Float(3.0));
}

#[test]
fn test_explicit_backend_wins_over_scope() {
    let three = libstd().to_builder("three").constant("scalar.pi", 3.0).build();
    let evaluator = Evaluator::builder().backend(libstd()).build();
    let value = with_backend(Arc::new(three), || evaluator.evaluate(&scalar::pi().into()));
    assert_eq!(value.unwrap(), Native::Float(std::f64::consts::PI));
}

#[test]
fn test_denied_fallback() {
    let evaluator = Evaluator::builder().fallback(Fallback::Deny).build();
    let err = evaluator.evaluate(&Value::from(1_i64)).unwrap_err();
    assert_eq!(err, EvalError::NoBackend);
}

struct CountWarnings(Arc<AtomicUsize>);

impl<S: tracing::Subscriber> Layer<S> for CountWarnings {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == tracing::Level::WARN {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }
}

#[test]
fn test_fallback_warns() {
    let warnings = Arc::new(AtomicUsize::new(0));
    let subscriber = tracing_subscriber::registry().with(CountWarnings(Arc::clone(&warnings)));

    let value = tracing::subscriber::with_default(subscriber, || {
        evaluate_in_context(&Value::from(scalar::sqrt(4_i64)))
    });
    assert_eq!(value.unwrap(), Native::Float(2.0));
    assert_eq!(warnings.load(Ordering::SeqCst), 1);
}
