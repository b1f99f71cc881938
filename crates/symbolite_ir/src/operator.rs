//! Built-in operators of the `symbol` namespace.
//!
//! Each operator is a fixed-arity `Function` carrying an `OperatorSpec`,
//! which the formatter uses to insert the minimal set of parentheses.

use std::sync::LazyLock;

use crate::function::Function;

/// Namespace of the built-in operators.
pub const SYMBOL_NAMESPACE: &str = "symbol";

/// Binding strength, weakest first.
///
/// Matches the host expression grammar, so a rendered expression parses
/// back into the same call tree.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Precedence {
    /// `==`, `!=`, `<`, `<=`, `>`, `>=`
    Comparison,
    BitOr,
    BitXor,
    BitAnd,
    /// `<<`, `>>`
    Shift,
    /// `+`, `-`
    Additive,
    /// `*`, `@`, `/`, `//`, `%`
    Multiplicative,
    /// Prefix `-`, `+`, `~`
    Unary,
    /// `**`, binds tighter than a prefix operator on its left.
    Power,
    /// Indexing and attribute access.
    Postfix,
}

/// How operands of equal precedence group.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Associativity {
    /// `a - b - c` is `(a - b) - c`.
    Left,
    /// `a ** b ** c` is `a ** (b ** c)`.
    Right,
    /// Comparisons chain in the host grammar, so equal precedence always
    /// needs parentheses.
    NonAssoc,
    /// Single operand written after the operator.
    Prefix,
    /// Only the first operand is exposed; the rest sit inside brackets.
    Postfix,
}

/// Formatting metadata of an operator function.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct OperatorSpec {
    pub precedence: Precedence,
    pub associativity: Associativity,
}

impl OperatorSpec {
    pub const fn new(precedence: Precedence, associativity: Associativity) -> Self {
        OperatorSpec {
            precedence,
            associativity,
        }
    }

    /// Whether an operand of precedence `child` at `position` must be
    /// wrapped in parentheses under this operator.
    pub fn needs_parens(self, child: Precedence, position: usize) -> bool {
        let parent = self.precedence;
        match self.associativity {
            Associativity::Postfix => position == 0 && child < parent,
            Associativity::Prefix => child < parent,
            Associativity::Left => child < parent || (position > 0 && child == parent),
            Associativity::Right => child < parent || (position == 0 && child == parent),
            Associativity::NonAssoc => child <= parent,
        }
    }
}

/// The built-in operator set.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Op {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    GetItem,
    GetAttr,
    Add,
    Sub,
    Mul,
    MatMul,
    TrueDiv,
    FloorDiv,
    Mod,
    Pow,
    /// Modular power, `pow(x, y, z)`.
    Pow3,
    LShift,
    RShift,
    And,
    Xor,
    Or,
    Neg,
    Pos,
    Invert,
}

impl Op {
    pub const ALL: [Op; 25] = [
        Op::Eq,
        Op::Ne,
        Op::Lt,
        Op::Le,
        Op::Gt,
        Op::Ge,
        Op::GetItem,
        Op::GetAttr,
        Op::Add,
        Op::Sub,
        Op::Mul,
        Op::MatMul,
        Op::TrueDiv,
        Op::FloorDiv,
        Op::Mod,
        Op::Pow,
        Op::Pow3,
        Op::LShift,
        Op::RShift,
        Op::And,
        Op::Xor,
        Op::Or,
        Op::Neg,
        Op::Pos,
        Op::Invert,
    ];

    /// Function name inside the `symbol` namespace.
    pub const fn name(self) -> &'static str {
        match self {
            Op::Eq => "eq",
            Op::Ne => "ne",
            Op::Lt => "lt",
            Op::Le => "le",
            Op::Gt => "gt",
            Op::Ge => "ge",
            Op::GetItem => "getitem",
            Op::GetAttr => "symgetattr",
            Op::Add => "add",
            Op::Sub => "sub",
            Op::Mul => "mul",
            Op::MatMul => "matmul",
            Op::TrueDiv => "truediv",
            Op::FloorDiv => "floordiv",
            Op::Mod => "mod",
            Op::Pow => "pow",
            Op::Pow3 => "pow3",
            Op::LShift => "lshift",
            Op::RShift => "rshift",
            Op::And => "and_",
            Op::Xor => "xor",
            Op::Or => "or_",
            Op::Neg => "neg",
            Op::Pos => "pos",
            Op::Invert => "invert",
        }
    }

    pub const fn template(self) -> &'static str {
        match self {
            Op::Eq => "{} == {}",
            Op::Ne => "{} != {}",
            Op::Lt => "{} < {}",
            Op::Le => "{} <= {}",
            Op::Gt => "{} > {}",
            Op::Ge => "{} >= {}",
            Op::GetItem => "{}[{}]",
            Op::GetAttr => "{}.{}",
            Op::Add => "{} + {}",
            Op::Sub => "{} - {}",
            Op::Mul => "{} * {}",
            Op::MatMul => "{} @ {}",
            Op::TrueDiv => "{} / {}",
            Op::FloorDiv => "{} // {}",
            Op::Mod => "{} % {}",
            Op::Pow => "{} ** {}",
            Op::Pow3 => "pow({}, {}, {})",
            Op::LShift => "{} << {}",
            Op::RShift => "{} >> {}",
            Op::And => "{} & {}",
            Op::Xor => "{} ^ {}",
            Op::Or => "{} | {}",
            Op::Neg => "-{}",
            Op::Pos => "+{}",
            Op::Invert => "~{}",
        }
    }

    pub const fn arity(self) -> usize {
        match self {
            Op::Neg | Op::Pos | Op::Invert => 1,
            Op::Pow3 => 3,
            _ => 2,
        }
    }

    /// Formatting metadata, `None` for operators rendered as a call.
    pub const fn spec(self) -> Option<OperatorSpec> {
        use Associativity::{Left, NonAssoc, Postfix, Prefix, Right};
        let (precedence, associativity) = match self {
            Op::Eq | Op::Ne | Op::Lt | Op::Le | Op::Gt | Op::Ge => {
                (Precedence::Comparison, NonAssoc)
            }
            Op::GetItem | Op::GetAttr => (Precedence::Postfix, Postfix),
            Op::Add | Op::Sub => (Precedence::Additive, Left),
            Op::Mul | Op::MatMul | Op::TrueDiv | Op::FloorDiv | Op::Mod => {
                (Precedence::Multiplicative, Left)
            }
            Op::Pow => (Precedence::Power, Right),
            Op::Pow3 => return None,
            Op::LShift | Op::RShift => (Precedence::Shift, Left),
            Op::And => (Precedence::BitAnd, Left),
            Op::Xor => (Precedence::BitXor, Left),
            Op::Or => (Precedence::BitOr, Left),
            Op::Neg | Op::Pos | Op::Invert => (Precedence::Unary, Prefix),
        };
        Some(OperatorSpec::new(precedence, associativity))
    }

    /// The shared `Function` value of this operator.
    pub fn function(self) -> &'static Function {
        &OPERATORS[self as usize]
    }

    /// Look an operator up by its function name (`"add"`, `"and_"`, ...).
    pub fn from_name(name: &str) -> Option<Op> {
        Op::ALL.into_iter().find(|op| op.name() == name)
    }
}

static OPERATORS: LazyLock<Vec<Function>> = LazyLock::new(|| {
    Op::ALL
        .into_iter()
        .map(|op| match op.spec() {
            Some(spec) => Function::operator(
                op.name(),
                SYMBOL_NAMESPACE,
                op.arity(),
                op.template(),
                spec,
            ),
            None => Function::new(op.name(), SYMBOL_NAMESPACE)
                .with_arity(op.arity())
                .with_format(op.template()),
        })
        .collect()
});

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_table_order_matches_discriminants() {
        for (index, op) in Op::ALL.into_iter().enumerate() {
            assert_eq!(op as usize, index);
            assert_eq!(op.function().named().name(), Some(op.name()));
        }
    }

    #[test]
    fn test_precedence_order() {
        assert!(Precedence::Comparison < Precedence::BitOr);
        assert!(Precedence::Shift < Precedence::Additive);
        assert!(Precedence::Unary < Precedence::Power);
        assert!(Precedence::Power < Precedence::Postfix);
    }

    #[test]
    fn test_left_assoc_parens() {
        let sub = Op::Sub.spec().unwrap();
        assert!(!sub.needs_parens(Precedence::Additive, 0));
        assert!(sub.needs_parens(Precedence::Additive, 1));
        assert!(!sub.needs_parens(Precedence::Multiplicative, 1));
    }

    #[test]
    fn test_right_assoc_parens() {
        let pow = Op::Pow.spec().unwrap();
        assert!(pow.needs_parens(Precedence::Power, 0));
        assert!(!pow.needs_parens(Precedence::Power, 1));
        assert!(pow.needs_parens(Precedence::Unary, 0));
    }

    #[test]
    fn test_comparisons_never_chain() {
        let lt = Op::Lt.spec().unwrap();
        assert!(lt.needs_parens(Precedence::Comparison, 0));
        assert!(lt.needs_parens(Precedence::Comparison, 1));
        assert!(!lt.needs_parens(Precedence::BitOr, 1));
    }

    #[test]
    fn test_pow3_is_a_call() {
        assert_eq!(Op::Pow3.spec(), None);
        assert_eq!(Op::Pow3.function().arity(), Some(3));
        assert_eq!(Op::from_name("and_"), Some(Op::And));
    }
}
