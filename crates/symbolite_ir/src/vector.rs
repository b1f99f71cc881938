//! The `vector` namespace and vectorization of scalar expressions.

use rustc_hash::FxHashMap;

use crate::collect::symbol_names;
use crate::errors::BuildError;
use crate::function::Function;
use crate::substitute::substitute;
use crate::symbol::Symbol;
use crate::value::Value;

pub const VECTOR_NAMESPACE: &str = "vector";

pub const FUNCTIONS: &[&str] = &["sum", "prod"];

pub(crate) fn function(name: &'static str) -> Function {
    Function::new(name, VECTOR_NAMESPACE).with_arity(1)
}

/// `vector.sum(v)`
pub fn sum(v: impl Into<Value>) -> Symbol {
    function("sum").apply(vec![v.into()])
}

/// `vector.prod(v)`
pub fn prod(v: impl Into<Value>) -> Symbol {
    function("prod").apply(vec![v.into()])
}

/// Where each scalar lands in the vector.
#[derive(Clone, Copy, Debug)]
pub enum VectorIndex<'a> {
    /// The n-th name maps to index n.
    Positional(&'a [&'a str]),
    /// Explicit name to index pairs.
    Explicit(&'a [(&'a str, i64)]),
}

/// Replace the free scalars named in `indices` by items of the vector
/// `varname`: with `["x", "y"]`, `x` becomes `varname[0]` and `y`
/// becomes `varname[1]`.
pub fn vectorize(
    expr: &Value,
    indices: VectorIndex<'_>,
    varname: &str,
) -> Result<Value, BuildError> {
    let vector = Symbol::vector(varname);
    let pairs: Vec<(&str, i64)> = match indices {
        VectorIndex::Positional(names) => names.iter().copied().zip(0..).collect(),
        VectorIndex::Explicit(pairs) => pairs.to_vec(),
    };
    let mapping: FxHashMap<Value, Value> = pairs
        .into_iter()
        .map(|(name, index)| (Value::from(Symbol::scalar(name)), Value::from(vector.get(index))))
        .collect();
    substitute(expr, &mapping)
}

/// Vectorize every free symbol, ordered alphabetically by name.
///
/// Returns the names in vector order alongside the rewritten expression.
pub fn auto_vectorize(expr: &Value, varname: &str) -> Result<(Vec<String>, Value), BuildError> {
    let mut names: Vec<String> = symbol_names(expr, Some("")).into_iter().collect();
    names.sort();
    let positional: Vec<&str> = names.iter().map(String::as_str).collect();
    let vectorized = vectorize(expr, VectorIndex::Positional(&positional), varname)?;
    Ok((names, vectorized))
}

#[cfg(test)]
mod tests;
