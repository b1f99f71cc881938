#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use crate::scalar;
use crate::symbol::SymbolKind;
use pretty_assertions::assert_eq;
use rustc_hash::FxHashMap;

fn mapping<const N: usize>(pairs: [(Value, Value); N]) -> FxHashMap<Value, Value> {
    pairs.into_iter().collect()
}

#[test]
fn test_leaf_replacement() {
    let x = Symbol::new("x");
    let y = Symbol::new("y");
    let expr = Value::from(&x + &y);

    let out = substitute(&expr, &mapping([(x.into(), 2_i64.into())])).unwrap();
    assert_eq!(out, Value::from(2_i64 + &y));
    assert_eq!(out.to_string(), "2 + y");
}

#[test]
fn test_nested_occurrences_replaced() {
    let x = Symbol::new("x");
    let y = Symbol::new("y");
    let expr = Value::from(scalar::cos(&x) * &x);

    let out = substitute(&expr, &mapping([((&x).into(), (&y).into())])).unwrap();
    assert_eq!(out, Value::from(scalar::cos(&y) * &y));
}

#[test]
fn test_matching_subtree_replaced_whole() {
    let x = Symbol::new("x");
    let z = Symbol::new("z");
    let inner = &x + 1;
    let expr = Value::from(&inner * 2);

    let out = substitute(
        &expr,
        &mapping([(inner.into(), (&z).into()), (x.into(), 5.into())]),
    )
    .unwrap();
    assert_eq!(out.to_string(), "z * 2");
}

#[test]
fn test_function_replacement() {
    let x = Symbol::new("x");
    let cos = scalar::cos(&x).expression().unwrap().function().clone();
    let sin = scalar::sin(&x).expression().unwrap().function().clone();
    let expr = Value::from(scalar::cos(&x) + 1);

    let out = substitute(&expr, &mapping([(cos.into(), sin.into())])).unwrap();
    assert_eq!(out.to_string(), "scalar.sin(x) + 1");
}

#[test]
fn test_non_callable_replacement_is_rejected() {
    let x = Symbol::new("x");
    let cos = scalar::cos(&x).expression().unwrap().function().clone();
    let expr = Value::from(scalar::cos(&x));

    let err = substitute(&expr, &mapping([(cos.into(), 3.into())])).unwrap_err();
    assert_eq!(
        err,
        BuildError::NotCallable {
            value: "3".to_string()
        }
    );
}

#[test]
fn test_arity_rechecked_after_function_replacement() {
    let x = Symbol::new("x");
    let cos = scalar::cos(&x).expression().unwrap().function().clone();
    let atan2 = scalar::atan2(&x, &x).expression().unwrap().function().clone();

    let err = substitute(&scalar::cos(&x).into(), &mapping([(cos.into(), atan2.into())]))
        .unwrap_err();
    assert!(matches!(err, BuildError::Arity { expected: 2, got: 1, .. }));
}

#[test]
fn test_empty_mapping_is_identity() {
    let x = Symbol::new("x");
    let expr = Value::from(x.pow(2) - scalar::pi());
    assert_eq!(substitute(&expr, &FxHashMap::default()).unwrap(), expr);
}

#[test]
fn test_kind_is_part_of_the_key() {
    let expr = Value::from(Symbol::scalar("x") + Symbol::new("x"));
    let out = substitute(&expr, &mapping([(Symbol::scalar("x").into(), 1.into())])).unwrap();
    assert_eq!(out.to_string(), "1 + x");
}

#[test]
fn test_derived_symbol_keeps_its_name() {
    let x = Symbol::new("x");
    let named = (&x + 1).with_name("a");
    let out = substitute(&named.into(), &mapping([(x.into(), 2.into())])).unwrap();

    let symbol = out.as_symbol().unwrap();
    assert_eq!(symbol.name(), Some("a"));
    assert_eq!(symbol.to_string(), "2 + 1");
}

#[test]
fn test_bare_expressions_stay_bare() {
    let x = Symbol::new("x");
    let expr: Value = (&x + 1).expression().unwrap().clone().into();
    let out = substitute(&expr, &mapping([(x.into(), 2.into())])).unwrap();
    assert!(matches!(out, Value::Expr(_)));
}

#[test]
fn test_by_name_matches_leaves_and_functions() {
    let x = Symbol::scalar("x");
    let y = Symbol::new("y");
    let sin = scalar::sin(&x).expression().unwrap().function().clone();
    let expr = Value::from(scalar::cos(&x) + &y);

    let mut by_name: FxHashMap<&str, Value> = FxHashMap::default();
    by_name.insert("x", 2.into());
    by_name.insert("scalar.cos", sin.into());
    let out = substitute_by_name(&expr, &by_name).unwrap();
    assert_eq!(out.to_string(), "scalar.sin(2) + y");
}

#[test]
fn test_by_name_ignores_derived_symbols() {
    let x = Symbol::new("x");
    let named = (&x + 1).with_name("a");
    let mut by_name: FxHashMap<String, Value> = FxHashMap::default();
    by_name.insert("a".to_string(), 5.into());

    let value: Value = named.into();
    assert_eq!(substitute_by_name(&value, &by_name).unwrap(), value);
}

#[test]
fn test_by_name_replaces_whole_vector() {
    let vec = Symbol::new("vec");
    let mut by_name: FxHashMap<&str, Value> = FxHashMap::default();
    by_name.insert("vec", Value::tuple([1, 2, 3]));

    let out = substitute_by_name(&vec.get(1).into(), &by_name).unwrap();
    assert_eq!(out.to_string(), "(1, 2, 3)[1]");
    assert_eq!(
        substitute_by_name(&Symbol::anonymous(SymbolKind::Vector).into(), &by_name).unwrap(),
        Value::from(Symbol::anonymous(SymbolKind::Vector))
    );
}
