//! Construction-time errors.
//!
//! Tree building fails fast: a wrong argument count is reported when the
//! expression is built, never deferred to evaluation.

/// Failure while building or rebuilding an expression tree.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    #[error("invalid number of arguments for {function} ({got}), expected {expected}")]
    Arity {
        function: String,
        expected: usize,
        got: usize,
    },

    #[error("{function} declares an arity, keyword arguments should not be provided")]
    KeywordArguments { function: String },

    /// A substitution put something that is not a function in call position.
    #[error("cannot call `{value}`: not a function")]
    NotCallable { value: String },
}

pub fn arity_mismatch(function: impl ToString, expected: usize, got: usize) -> BuildError {
    BuildError::Arity {
        function: function.to_string(),
        expected,
        got,
    }
}

pub fn unexpected_keywords(function: impl ToString) -> BuildError {
    BuildError::KeywordArguments {
        function: function.to_string(),
    }
}

pub fn not_callable(value: impl ToString) -> BuildError {
    BuildError::NotCallable {
        value: value.to_string(),
    }
}
