//! Operator overloads on symbols.
//!
//! Overloads never compute: `x + 1` builds `symbol.add(x, 1)`. Operators
//! the language cannot overload (power, floor division, comparisons
//! returning symbols, indexing) are inherent methods instead.

use std::ops;

use crate::operator::Op;
use crate::symbol::Symbol;
use crate::value::Value;

fn binary(op: Op, lhs: impl Into<Value>, rhs: impl Into<Value>) -> Symbol {
    op.function().apply(vec![lhs.into(), rhs.into()])
}

fn unary(op: Op, operand: impl Into<Value>) -> Symbol {
    op.function().apply(vec![operand.into()])
}

macro_rules! binary_overload {
    ($($trait:ident :: $method:ident => $op:expr),* $(,)?) => {
        $(
            impl<R: Into<Value>> ops::$trait<R> for Symbol {
                type Output = Symbol;

                fn $method(self, rhs: R) -> Symbol {
                    binary($op, self, rhs)
                }
            }

            impl<R: Into<Value>> ops::$trait<R> for &Symbol {
                type Output = Symbol;

                fn $method(self, rhs: R) -> Symbol {
                    binary($op, self, rhs)
                }
            }

            binary_overload!(@literal $trait :: $method => $op; i64, f64);
        )*
    };
    (@literal $trait:ident :: $method:ident => $op:expr; $($lit:ty),*) => {
        $(
            impl ops::$trait<Symbol> for $lit {
                type Output = Symbol;

                fn $method(self, rhs: Symbol) -> Symbol {
                    binary($op, self, rhs)
                }
            }

            impl ops::$trait<&Symbol> for $lit {
                type Output = Symbol;

                fn $method(self, rhs: &Symbol) -> Symbol {
                    binary($op, self, rhs)
                }
            }
        )*
    };
}

binary_overload! {
    Add::add => Op::Add,
    Sub::sub => Op::Sub,
    Mul::mul => Op::Mul,
    Div::div => Op::TrueDiv,
    Rem::rem => Op::Mod,
    Shl::shl => Op::LShift,
    Shr::shr => Op::RShift,
    BitAnd::bitand => Op::And,
    BitOr::bitor => Op::Or,
    BitXor::bitxor => Op::Xor,
}

macro_rules! unary_overload {
    ($($trait:ident :: $method:ident => $op:expr),* $(,)?) => {
        $(
            impl ops::$trait for Symbol {
                type Output = Symbol;

                fn $method(self) -> Symbol {
                    unary($op, self)
                }
            }

            impl ops::$trait for &Symbol {
                type Output = Symbol;

                fn $method(self) -> Symbol {
                    unary($op, self)
                }
            }
        )*
    };
}

unary_overload! {
    Neg::neg => Op::Neg,
    Not::not => Op::Invert,
}

impl Symbol {
    /// `self ** exponent`
    pub fn pow(&self, exponent: impl Into<Value>) -> Symbol {
        binary(Op::Pow, self, exponent)
    }

    /// `pow(self, exponent, modulus)`
    pub fn pow_mod(&self, exponent: impl Into<Value>, modulus: impl Into<Value>) -> Symbol {
        Op::Pow3
            .function()
            .apply(vec![self.into(), exponent.into(), modulus.into()])
    }

    /// `self // rhs`
    pub fn floordiv(&self, rhs: impl Into<Value>) -> Symbol {
        binary(Op::FloorDiv, self, rhs)
    }

    /// `self @ rhs`
    pub fn matmul(&self, rhs: impl Into<Value>) -> Symbol {
        binary(Op::MatMul, self, rhs)
    }

    pub fn lt(&self, rhs: impl Into<Value>) -> Symbol {
        binary(Op::Lt, self, rhs)
    }

    pub fn le(&self, rhs: impl Into<Value>) -> Symbol {
        binary(Op::Le, self, rhs)
    }

    pub fn gt(&self, rhs: impl Into<Value>) -> Symbol {
        binary(Op::Gt, self, rhs)
    }

    pub fn ge(&self, rhs: impl Into<Value>) -> Symbol {
        binary(Op::Ge, self, rhs)
    }

    /// Symbolic `self == rhs`. `PartialEq` stays structural.
    pub fn equals(&self, rhs: impl Into<Value>) -> Symbol {
        binary(Op::Eq, self, rhs)
    }

    /// Symbolic `self != rhs`.
    pub fn not_equals(&self, rhs: impl Into<Value>) -> Symbol {
        binary(Op::Ne, self, rhs)
    }

    /// `+self`
    pub fn pos(&self) -> Symbol {
        unary(Op::Pos, self)
    }

    /// `self[index]`
    pub fn get(&self, index: impl Into<Value>) -> Symbol {
        binary(Op::GetItem, self, index)
    }

    /// `self.name`
    pub fn attr(&self, name: &str) -> Symbol {
        binary(Op::GetAttr, self, name)
    }
}
