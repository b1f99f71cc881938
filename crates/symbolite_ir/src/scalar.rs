//! The `scalar` namespace: math functions and constants.
//!
//! Helpers build the same `Function` values the library table holds, so
//! `scalar::cos(&x)` equals a call through `library().function("scalar.cos")`.

use crate::function::Function;
use crate::symbol::{Symbol, SymbolKind};
use crate::value::Value;

pub const SCALAR_NAMESPACE: &str = "scalar";

/// Every scalar function with its arity; `None` is variadic.
pub const FUNCTIONS: &[(&str, Option<usize>)] = &[
    ("abs", Some(1)),
    ("acos", Some(1)),
    ("acosh", Some(1)),
    ("asin", Some(1)),
    ("asinh", Some(1)),
    ("atan", Some(1)),
    ("atan2", Some(2)),
    ("atanh", Some(1)),
    ("ceil", Some(1)),
    ("comb", Some(2)),
    ("copysign", Some(2)),
    ("cos", Some(1)),
    ("cosh", Some(1)),
    ("degrees", Some(1)),
    ("erf", Some(1)),
    ("erfc", Some(1)),
    ("exp", Some(1)),
    ("expm1", Some(1)),
    ("fabs", Some(1)),
    ("factorial", Some(1)),
    ("floor", Some(1)),
    ("fmod", Some(2)),
    ("frexp", Some(1)),
    ("gamma", Some(1)),
    ("hypot", None),
    ("isfinite", Some(1)),
    ("isinf", Some(1)),
    ("isnan", Some(1)),
    ("isqrt", Some(1)),
    ("ldexp", Some(2)),
    ("lgamma", Some(1)),
    ("log", Some(1)),
    ("log10", Some(1)),
    ("log1p", Some(1)),
    ("log2", Some(1)),
    ("modf", Some(1)),
    ("nextafter", Some(2)),
    ("pow", Some(2)),
    ("radians", Some(1)),
    ("remainder", Some(2)),
    ("sin", Some(1)),
    ("sinh", Some(1)),
    ("sqrt", Some(1)),
    ("tan", Some(1)),
    ("tanh", Some(1)),
    ("trunc", Some(1)),
    ("ulp", Some(1)),
];

pub const CONSTANTS: &[&str] = &["e", "inf", "pi", "nan", "tau"];

pub(crate) fn function(name: &'static str, arity: Option<usize>) -> Function {
    let function = Function::new(name, SCALAR_NAMESPACE);
    match arity {
        Some(arity) => function.with_arity(arity),
        None => function,
    }
}

pub(crate) fn constant(name: &'static str) -> Symbol {
    Symbol::constant(name, SCALAR_NAMESPACE, SymbolKind::Scalar)
}

macro_rules! unary {
    ($($name:ident),* $(,)?) => {
        $(
            #[doc = concat!("`scalar.", stringify!($name), "(x)`")]
            pub fn $name(x: impl Into<Value>) -> Symbol {
                function(stringify!($name), Some(1)).apply(vec![x.into()])
            }
        )*
    };
}

macro_rules! binary {
    ($($name:ident),* $(,)?) => {
        $(
            #[doc = concat!("`scalar.", stringify!($name), "(x, y)`")]
            pub fn $name(x: impl Into<Value>, y: impl Into<Value>) -> Symbol {
                function(stringify!($name), Some(2)).apply(vec![x.into(), y.into()])
            }
        )*
    };
}

macro_rules! constants {
    ($($name:ident),* $(,)?) => {
        $(
            #[doc = concat!("The constant `scalar.", stringify!($name), "`.")]
            pub fn $name() -> Symbol {
                constant(stringify!($name))
            }
        )*
    };
}

unary!(
    abs, acos, acosh, asin, asinh, atan, atanh, ceil, cos, cosh, degrees, erf, erfc, exp, expm1,
    fabs, factorial, floor, frexp, gamma, isfinite, isinf, isnan, isqrt, lgamma, log, log10,
    log1p, log2, modf, radians, sin, sinh, sqrt, tan, tanh, trunc, ulp,
);

binary!(atan2, comb, copysign, fmod, ldexp, nextafter, pow, remainder);

constants!(e, inf, pi, nan, tau);

/// `scalar.hypot(*coordinates)`
pub fn hypot<I, V>(coordinates: I) -> Symbol
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    function("hypot", None).apply(coordinates.into_iter().map(Into::into).collect())
}
