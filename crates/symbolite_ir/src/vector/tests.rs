#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_vectorize_positional() {
    let x = Symbol::scalar("x");
    let y = Symbol::scalar("y");
    let vec = Symbol::vector("vec");
    let expr = Value::from(&x + 2_i64 * &y);

    let out = vectorize(&expr, VectorIndex::Positional(&["x", "y"]), "vec").unwrap();
    assert_eq!(out, Value::from(vec.get(0) + 2_i64 * vec.get(1)));
    assert_eq!(out.to_string(), "vec[0] + 2 * vec[1]");
}

#[test]
fn test_vectorize_explicit_indices() {
    let expr = Value::from(Symbol::scalar("x") - Symbol::scalar("y"));
    let out = vectorize(&expr, VectorIndex::Explicit(&[("y", 0), ("x", 3)]), "arr").unwrap();
    assert_eq!(out.to_string(), "arr[3] - arr[0]");
}

#[test]
fn test_only_scalars_are_vectorized() {
    let expr = Value::from(Symbol::scalar("x") * Symbol::new("x"));
    let out = vectorize(&expr, VectorIndex::Positional(&["x"]), "v").unwrap();
    assert_eq!(out.to_string(), "v[0] * x");
}

#[test]
fn test_auto_vectorize_orders_alphabetically() {
    let x = Symbol::scalar("x");
    let y = Symbol::scalar("y");
    let expr = Value::from(&y * &x + &x);

    let (names, out) = auto_vectorize(&expr, "vec").unwrap();
    assert_eq!(names, ["x", "y"]);
    assert_eq!(out.to_string(), "vec[1] * vec[0] + vec[0]");

    let explicit = vectorize(&expr, VectorIndex::Positional(&["x", "y"]), "vec").unwrap();
    assert_eq!(out, explicit);
}

#[test]
fn test_reductions() {
    let v = Symbol::vector("v");
    assert_eq!(sum(&v).to_string(), "vector.sum(v)");
    assert_eq!(prod(Value::tuple([1, 2, 3])).to_string(), "vector.prod((1, 2, 3))");
}
