//! End-to-end scenarios: build, render, rewrite, schedule and evaluate.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use std::sync::Arc;

use pretty_assertions::assert_eq;
use rustc_hash::{FxHashMap, FxHashSet};
use symbolite::{
    auto_vectorize, compute_dependencies, evaluate, evaluate_in_context, fill_template, libstd,
    library, scalar, solve_dependencies, substitute_by_name, substitute_content, vectorize,
    with_backend, Backend, BuildError, EvalError, GroupError, ModuleBackend, Native, NativeFn, Op,
    Symbol, SymbolicList, UserFunction, Value, VectorIndex, DEFAULT_IMPL,
};

fn bindings<const N: usize>(pairs: [(&'static str, i64); N]) -> FxHashMap<&'static str, Value> {
    pairs
        .into_iter()
        .map(|(name, value)| (name, Value::from(value)))
        .collect()
}

#[test]
fn sum_of_bound_symbols() {
    let x = Symbol::new("x");
    let y = Symbol::new("y");
    let expr = Value::from(&x + &y);
    let bound = substitute_by_name(&expr, &bindings([("x", 2), ("y", 3)])).unwrap();
    assert_eq!(evaluate(&bound, libstd().as_ref()).unwrap(), Native::Int(5));
}

#[test]
fn minimal_parentheses() {
    let (x, y, z) = (Symbol::new("x"), Symbol::new("y"), Symbol::new("z"));
    assert_eq!((x.pow(&y) % &z).to_string(), "x ** y % z");
    assert_eq!((&x - (&y - &z)).to_string(), "x - (y - z)");
    assert_eq!((&x - &y - &z).to_string(), "x - y - z");

    for text in ["x ** y % z", "x - (y - z)", "x - y - z"] {
        assert_eq!(common::parse(text).unwrap().to_string(), text);
    }
}

#[test]
fn arity_is_checked_when_building() {
    let cos = library().function("scalar.cos").unwrap();
    let err = cos.call([Symbol::new("x"), Symbol::new("y")]).unwrap_err();
    assert_eq!(
        err,
        BuildError::Arity {
            function: "scalar.cos".into(),
            expected: 1,
            got: 2
        }
    );
}

#[test]
fn user_function_dispatch_by_backend() {
    let f = UserFunction::new("f", Some(1));
    f.register_impl(
        "a",
        NativeFn::positional("f", |args| Ok(Native::Int(2 * args[0].as_int().unwrap()))),
    );
    let call = Value::from(f.call([1_i64]).unwrap());
    let a = libstd().to_builder("a").build();
    let b = libstd().to_builder("b").build();

    assert_eq!(evaluate(&call, &a).unwrap(), Native::Int(2));
    assert!(matches!(
        evaluate(&call, &b),
        Err(EvalError::UnresolvedImplementation { .. })
    ));

    f.register_impl(DEFAULT_IMPL, NativeFn::positional("f", |_| Ok(Native::Int(0))));
    assert_eq!(evaluate(&call, &b).unwrap(), Native::Int(0));
}

#[test]
fn scheduler_layers_and_cycles() {
    let f = UserFunction::from_fn("f", 1, |args| Ok(args[0].clone()));
    let (a, b, c) = (Symbol::new("a"), Symbol::new("b"), Symbol::new("c"));

    let content: FxHashMap<Value, Value> = [
        (a.clone().into(), f.call([&b]).unwrap().into()),
        (b.clone().into(), f.call([&c]).unwrap().into()),
        (c.clone().into(), Value::from(5_i64)),
    ]
    .into_iter()
    .collect();
    let deps = compute_dependencies(&content, |value| content.contains_key(value));
    let layers: Vec<FxHashSet<Value>> = solve_dependencies(&deps).map(Result::unwrap).collect();
    let expected: Vec<FxHashSet<Value>> = [c, b.clone(), a.clone()]
        .into_iter()
        .map(|symbol| FxHashSet::from_iter([Value::from(symbol)]))
        .collect();
    assert_eq!(layers, expected);

    let cyclic: FxHashMap<Value, Value> = [
        (a.clone().into(), f.call([&b]).unwrap().into()),
        (b.clone().into(), f.call([&a]).unwrap().into()),
    ]
    .into_iter()
    .collect();
    let result = substitute_content(&cyclic, |value| cyclic.contains_key(value));
    let Err(GroupError::Cycle(err)) = result else {
        panic!("expected a cycle");
    };
    assert_eq!(err.items, ["a", "b"]);
}

#[test]
fn vectorization() {
    let x = Symbol::scalar("x");
    let y = Symbol::scalar("y");
    let vec = Symbol::vector("vec");
    let expr = Value::from(&x + 2_i64 * &y);
    let expected = Value::from(vec.get(0) + 2_i64 * vec.get(1));

    let explicit = vectorize(&expr, VectorIndex::Positional(&["x", "y"]), "vec").unwrap();
    assert_eq!(explicit, expected);

    let (names, automatic) = auto_vectorize(&expr, "vec").unwrap();
    assert_eq!(names, ["x", "y"]);
    assert_eq!(automatic, expected);
}

/// Renders every operation instead of computing it.
fn text_backend() -> ModuleBackend {
    let mut builder = ModuleBackend::builder("text").positional("symbol.Symbol", |args| {
        Ok(args[0].clone())
    });
    for op in Op::ALL {
        builder = builder.positional(&format!("symbol.{}", op.name()), move |args| {
            let operands: Vec<String> = args.iter().map(ToString::to_string).collect();
            Ok(Native::from(fill_template(op.template(), &operands)))
        });
    }
    builder.build()
}

#[test]
fn backends_are_interchangeable() {
    let x = Symbol::new("x");
    let y = Symbol::new("y");
    let expr = Value::from(&x * 3_i64 + &y);

    let bound = substitute_by_name(&expr, &bindings([("x", 2), ("y", 1)])).unwrap();
    assert_eq!(evaluate(&bound, libstd().as_ref()).unwrap(), Native::Int(7));
    assert_eq!(
        evaluate(&expr, &text_backend()).unwrap(),
        Native::from("x * 3 + y")
    );
}

#[test]
fn unsupported_operations_can_be_skipped() {
    let x = Symbol::scalar("x");
    let list: SymbolicList = [scalar::sin(&x), scalar::erf(&x), scalar::exp(&x)]
        .into_iter()
        .collect();
    let bound = list.substitute_by_name(&bindings([("x", 0)])).unwrap();

    let backend = libstd();
    let mut results = Vec::new();
    for item in &bound {
        match evaluate(item, backend.as_ref()) {
            Ok(value) => results.push(value),
            Err(err) if err.is_unsupported() => continue,
            Err(err) => panic!("unexpected failure: {err}"),
        }
    }
    assert_eq!(results, [Native::Float(0.0), Native::Float(1.0)]);
}

#[test]
fn scoped_backend() {
    let text: Arc<dyn Backend> = Arc::new(text_backend());
    let expr = Value::from(Symbol::new("x") - 1_i64);
    let value = with_backend(text, || evaluate_in_context(&expr)).unwrap();
    assert_eq!(value, Native::from("x - 1"));
}
