//! Errors of group operations.

use symbolite_eval::EvalError;
use symbolite_ir::BuildError;

/// No item of the remaining graph is free of unresolved dependencies.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("cyclic dependencies exist among these items: {}", items.join(", "))]
pub struct CyclicDependency {
    /// The items left unresolved, sorted.
    pub items: Vec<String>,
}

/// Failure while substituting or evaluating a group of definitions.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GroupError {
    #[error(transparent)]
    Cycle(#[from] CyclicDependency),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Eval(#[from] EvalError),
}
