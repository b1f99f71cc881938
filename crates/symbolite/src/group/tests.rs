#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use crate::schedule::eval_content;
use pretty_assertions::assert_eq;
use symbolite_eval::libstd;
use symbolite_ir::scalar;

fn names<const N: usize>(items: [&str; N]) -> FxHashSet<String> {
    items.into_iter().map(String::from).collect()
}

#[test]
fn test_list_displays_one_member_per_line() {
    let x = Symbol::new("x");
    let y = Symbol::new("y");
    let list: SymbolicList = [&x + &y, scalar::cos(&x)].into_iter().collect();
    assert_eq!(list.to_string(), "x + y\nscalar.cos(x)");
    assert_eq!(SymbolicList::new().to_string(), "");
}

#[test]
fn test_list_bulk_operations_keep_order() {
    let x = Symbol::new("x");
    let y = Symbol::new("y");
    let list: SymbolicList = [&x * 2_i64, &y - &x].into_iter().collect();

    let mut mapping = FxHashMap::default();
    mapping.insert("x", Value::from(3_i64));
    mapping.insert("y", Value::from(1_i64));
    let bound = list.substitute_by_name(&mapping).unwrap();
    assert_eq!(bound.to_string(), "3 * 2\n1 - 3");
    assert_eq!(
        bound.evaluate(libstd().as_ref()).unwrap(),
        vec![Native::Int(6), Native::Int(-2)]
    );

    let mut by_value = FxHashMap::default();
    by_value.insert(Value::from(&x), Value::from(&y));
    assert_eq!(list.substitute(&by_value).unwrap().to_string(), "y * 2\ny - y");
}

#[test]
fn test_list_collects_across_members() {
    let x = Symbol::new("x");
    let y = Symbol::new("y");
    let list: SymbolicList = [scalar::cos(&x), &y + 1_i64].into_iter().collect();
    assert_eq!(list.symbol_names(Some("")), names(["x", "y"]));
    assert_eq!(list.symbol_names(Some("scalar")), names(["scalar.cos"]));
    assert_eq!(list.collect_named(false).count(), 4);
}

#[test]
fn test_auto_symbols_are_named_after_their_member() {
    let mut ns = SymbolicNamespace::new();
    let x = ns.auto_symbol("x");
    let y = ns.auto_symbol("y");
    assert_eq!(x.name(), Some("x"));
    assert_eq!(y.name(), Some("y"));
    assert_eq!(ns.auto_symbol("x"), x);
    assert_eq!(ns.symbol_names(), names(["x", "y"]));
    assert_eq!(ns.expressions().len(), 2);
}

#[test]
fn test_relations_join_the_namespace() {
    let mut ns = SymbolicNamespace::new();
    let x = ns.auto_symbol("x");
    let y = ns.auto_symbol("y");
    ns.push(x.equals(2_i64 * &y));
    assert_eq!(ns.expressions().to_string(), "x\ny\nx == 2 * y");
    assert_eq!(ns.symbol_names(), names(["x", "y"]));
}

#[test]
fn test_definitions_evaluate_in_dependency_order() {
    let mut ns = SymbolicNamespace::new();
    let x = ns.auto_symbol("x");
    let y = ns.define("y", &x * 3_i64);
    ns.define("x", 2_i64);
    let z = ns.define("z", &y + &x);

    let content = ns.content();
    assert_eq!(content.len(), 3);
    let out = eval_content(&content, libstd().as_ref(), |value| ns.is_member(value)).unwrap();
    assert_eq!(out[&Value::from(&z)], Native::Int(8));
}

#[test]
fn test_redefinition_replaces() {
    let mut ns = SymbolicNamespace::new();
    let a = ns.define("a", 1_i64);
    ns.define("a", 2_i64);
    assert_eq!(ns.content()[&Value::from(&a)], Value::from(2_i64));
    assert_eq!(ns.get("a"), Some(&a));
}
