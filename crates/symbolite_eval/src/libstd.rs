//! The standard backend: native `i64` and `f64` arithmetic.
//!
//! Integers are `i64` with checked arithmetic (overflow is an error rather
//! than a silent wrap). Division always yields a float; floor division
//! and modulo round toward negative infinity. Math functions report
//! invalid inputs as value errors (`math domain error`) and results too
//! large to represent as overflow errors (`math range error`).

use std::cmp::Ordering;
use std::sync::{Arc, LazyLock};

use symbolite_ir::{scalar, vector, Native, NativeError, NativeResult, Op, SymbolKind};

use crate::backend::{ModuleBackend, ModuleBackendBuilder};

/// Name of the standard backend.
pub const LIBSTD: &str = "libstd";

static LIBSTD_BACKEND: LazyLock<Arc<ModuleBackend>> = LazyLock::new(|| Arc::new(build()));

/// The shared standard backend.
pub fn libstd() -> Arc<ModuleBackend> {
    Arc::clone(&LIBSTD_BACKEND)
}

// Numeric coercion

#[derive(Copy, Clone, Debug)]
enum Num {
    Int(i64),
    Float(f64),
}

impl Num {
    fn of(native: &Native) -> Option<Num> {
        match native {
            Native::Bool(b) => Some(Num::Int(i64::from(*b))),
            Native::Int(n) => Some(Num::Int(*n)),
            Native::Float(x) => Some(Num::Float(*x)),
            _ => None,
        }
    }

    fn to_f64(self) -> f64 {
        match self {
            Num::Int(n) => n as f64,
            Num::Float(x) => x,
        }
    }
}

// Error helpers

fn integer_overflow(operation: &str) -> NativeError {
    NativeError::overflow(format!("integer overflow in {operation}"))
}

fn domain_error() -> NativeError {
    NativeError::value_error("math domain error")
}

fn range_error() -> NativeError {
    NativeError::overflow("math range error")
}

fn operand_mismatch(symbol: &str, a: &Native, b: &Native) -> NativeError {
    NativeError::type_error(format!(
        "unsupported operand type(s) for {symbol}: '{}' and '{}'",
        a.type_name(),
        b.type_name()
    ))
}

fn bad_operand(symbol: &str, a: &Native) -> NativeError {
    NativeError::type_error(format!(
        "bad operand type for unary {symbol}: '{}'",
        a.type_name()
    ))
}

// Argument helpers

fn exactly<'a, const N: usize>(
    name: &str,
    args: &'a [Native],
) -> Result<&'a [Native; N], NativeError> {
    <&[Native; N]>::try_from(args).map_err(|_| {
        NativeError::type_error(format!(
            "{name}() takes exactly {N} argument(s) ({} given)",
            args.len()
        ))
    })
}

fn real(name: &str, arg: &Native) -> Result<f64, NativeError> {
    Num::of(arg).map(Num::to_f64).ok_or_else(|| {
        NativeError::type_error(format!(
            "{name}() argument must be a real number, not '{}'",
            arg.type_name()
        ))
    })
}

fn integer(name: &str, arg: &Native) -> Result<i64, NativeError> {
    match Num::of(arg) {
        Some(Num::Int(n)) => Ok(n),
        _ => Err(NativeError::type_error(format!(
            "{name}() argument must be an integer, not '{}'",
            arg.type_name()
        ))),
    }
}

fn float_to_int(x: f64) -> Result<i64, NativeError> {
    if x.is_nan() {
        return Err(NativeError::value_error("cannot convert float NaN to integer"));
    }
    if x.is_infinite() {
        return Err(NativeError::overflow("cannot convert float infinity to integer"));
    }
    // i64::MAX as f64 rounds up to 2^63, which is out of range.
    if x >= 9.223_372_036_854_775_808e18 || x < -9.223_372_036_854_775_808e18 {
        return Err(integer_overflow("float to integer conversion"));
    }
    Ok(x as i64)
}

// Operators

const fn op_symbol(op: Op) -> &'static str {
    match op {
        Op::Eq => "==",
        Op::Ne => "!=",
        Op::Lt => "<",
        Op::Le => "<=",
        Op::Gt => ">",
        Op::Ge => ">=",
        Op::Add => "+",
        Op::Sub | Op::Neg => "-",
        Op::Mul => "*",
        Op::MatMul => "@",
        Op::TrueDiv => "/",
        Op::FloorDiv => "//",
        Op::Mod => "%",
        Op::Pow | Op::Pow3 => "** or pow()",
        Op::LShift => "<<",
        Op::RShift => ">>",
        Op::And => "&",
        Op::Xor => "^",
        Op::Or => "|",
        Op::Pos => "+",
        Op::Invert => "~",
        Op::GetItem => "[]",
        Op::GetAttr => ".",
    }
}

/// Floor division of integers, rounding toward negative infinity.
fn int_floor_div(a: i64, b: i64) -> Result<i64, NativeError> {
    if b == 0 {
        return Err(NativeError::zero_division("integer division or modulo by zero"));
    }
    let q = a.checked_div(b).ok_or_else(|| integer_overflow("floor division"))?;
    if a % b != 0 && ((a < 0) != (b < 0)) {
        Ok(q - 1)
    } else {
        Ok(q)
    }
}

/// Modulo of integers, taking the sign of the divisor.
fn int_mod(a: i64, b: i64) -> Result<i64, NativeError> {
    if b == 0 {
        return Err(NativeError::zero_division("integer division or modulo by zero"));
    }
    let r = a.checked_rem(b).unwrap_or(0);
    if r != 0 && ((r < 0) != (b < 0)) {
        Ok(r + b)
    } else {
        Ok(r)
    }
}

fn float_mod(a: f64, b: f64) -> f64 {
    let r = a % b;
    if r != 0.0 && ((r < 0.0) != (b < 0.0)) {
        r + b
    } else {
        r
    }
}

fn int_pow(a: i64, b: i64) -> NativeResult {
    if b < 0 {
        return float_pow(a as f64, b as f64);
    }
    match a {
        0 | 1 if b > 0 => return Ok(Native::Int(a)),
        -1 => return Ok(Native::Int(if b % 2 == 0 { 1 } else { -1 })),
        _ => {}
    }
    let exponent = u32::try_from(b).map_err(|_| integer_overflow("exponentiation"))?;
    a.checked_pow(exponent)
        .map(Native::Int)
        .ok_or_else(|| integer_overflow("exponentiation"))
}

fn float_pow(a: f64, b: f64) -> NativeResult {
    if a == 0.0 && b < 0.0 {
        return Err(NativeError::zero_division(
            "0.0 cannot be raised to a negative power",
        ));
    }
    if a < 0.0 && b.fract() != 0.0 && b.is_finite() {
        return Err(NativeError::value_error(
            "negative number cannot be raised to a fractional power",
        ));
    }
    let result = a.powf(b);
    if result.is_infinite() && a.is_finite() && b.is_finite() {
        return Err(NativeError::overflow("numerical result out of range"));
    }
    Ok(Native::Float(result))
}

fn shift(op: Op, a: i64, b: i64) -> NativeResult {
    if b < 0 {
        return Err(NativeError::value_error("negative shift count"));
    }
    let result = match op {
        Op::LShift => {
            if a == 0 {
                0
            } else {
                let amount = u32::try_from(b)
                    .ok()
                    .filter(|amount| *amount < 64)
                    .ok_or_else(|| integer_overflow("left shift"))?;
                let shifted = a << amount;
                if shifted >> amount != a {
                    return Err(integer_overflow("left shift"));
                }
                shifted
            }
        }
        _ => match u32::try_from(b).ok().filter(|amount| *amount < 64) {
            Some(amount) => a >> amount,
            None if a < 0 => -1,
            None => 0,
        },
    };
    Ok(Native::Int(result))
}

fn eval_int_binary(op: Op, a: i64, b: i64) -> NativeResult {
    let overflow = |name: &'static str| move || integer_overflow(name);
    match op {
        Op::Add => a.checked_add(b).map(Native::Int).ok_or_else(overflow("addition")),
        Op::Sub => a.checked_sub(b).map(Native::Int).ok_or_else(overflow("subtraction")),
        Op::Mul => a
            .checked_mul(b)
            .map(Native::Int)
            .ok_or_else(overflow("multiplication")),
        Op::TrueDiv => {
            if b == 0 {
                Err(NativeError::zero_division("division by zero"))
            } else {
                Ok(Native::Float(a as f64 / b as f64))
            }
        }
        Op::FloorDiv => int_floor_div(a, b).map(Native::Int),
        Op::Mod => int_mod(a, b).map(Native::Int),
        Op::Pow => int_pow(a, b),
        Op::LShift | Op::RShift => shift(op, a, b),
        Op::And => Ok(Native::Int(a & b)),
        Op::Xor => Ok(Native::Int(a ^ b)),
        Op::Or => Ok(Native::Int(a | b)),
        _ => Err(NativeError::type_error(format!(
            "unsupported operation {} on integers",
            op.name()
        ))),
    }
}

fn eval_float_binary(op: Op, a: f64, b: f64, lhs: &Native, rhs: &Native) -> NativeResult {
    match op {
        Op::Add => Ok(Native::Float(a + b)),
        Op::Sub => Ok(Native::Float(a - b)),
        Op::Mul => Ok(Native::Float(a * b)),
        Op::TrueDiv => {
            if b == 0.0 {
                Err(NativeError::zero_division("float division by zero"))
            } else {
                Ok(Native::Float(a / b))
            }
        }
        Op::FloorDiv => {
            if b == 0.0 {
                Err(NativeError::zero_division("float floor division by zero"))
            } else {
                Ok(Native::Float((a / b).floor()))
            }
        }
        Op::Mod => {
            if b == 0.0 {
                Err(NativeError::zero_division("float modulo"))
            } else {
                Ok(Native::Float(float_mod(a, b)))
            }
        }
        Op::Pow => float_pow(a, b),
        _ => Err(operand_mismatch(op_symbol(op), lhs, rhs)),
    }
}

fn eval_bool_binary(op: Op, a: bool, b: bool) -> Option<Native> {
    match op {
        Op::And => Some(Native::Bool(a & b)),
        Op::Xor => Some(Native::Bool(a ^ b)),
        Op::Or => Some(Native::Bool(a | b)),
        _ => None,
    }
}

/// Arithmetic and bitwise binary operators.
fn arithmetic(op: Op, lhs: &Native, rhs: &Native) -> NativeResult {
    if let (Native::Bool(a), Native::Bool(b)) = (lhs, rhs) {
        if let Some(result) = eval_bool_binary(op, *a, *b) {
            return Ok(result);
        }
    }
    match (Num::of(lhs), Num::of(rhs)) {
        (Some(Num::Int(a)), Some(Num::Int(b))) => eval_int_binary(op, a, b),
        (Some(a), Some(b)) => eval_float_binary(op, a.to_f64(), b.to_f64(), lhs, rhs),
        _ => match (op, lhs, rhs) {
            (Op::Add, Native::Str(a), Native::Str(b)) => Ok(Native::from(format!("{a}{b}"))),
            (Op::Add, Native::Seq(a), Native::Seq(b)) => {
                Ok(Native::seq(a.iter().chain(b.iter()).cloned()))
            }
            _ => Err(operand_mismatch(op_symbol(op), lhs, rhs)),
        },
    }
}

fn compare(op: Op, lhs: &Native, rhs: &Native) -> NativeResult {
    let ordering = match (Num::of(lhs), Num::of(rhs)) {
        (Some(Num::Int(a)), Some(Num::Int(b))) => Some(a.cmp(&b)),
        (Some(a), Some(b)) => a.to_f64().partial_cmp(&b.to_f64()),
        _ => match (lhs, rhs) {
            (Native::Str(a), Native::Str(b)) => Some(a.cmp(b)),
            _ if matches!(op, Op::Eq | Op::Ne) => {
                return Ok(Native::Bool((lhs == rhs) == (op == Op::Eq)));
            }
            _ => {
                return Err(NativeError::type_error(format!(
                    "'{}' not supported between instances of '{}' and '{}'",
                    op_symbol(op),
                    lhs.type_name(),
                    rhs.type_name()
                )));
            }
        },
    };
    let result = match op {
        Op::Eq => ordering == Some(Ordering::Equal),
        Op::Ne => ordering != Some(Ordering::Equal),
        Op::Lt => ordering == Some(Ordering::Less),
        Op::Le => matches!(ordering, Some(Ordering::Less | Ordering::Equal)),
        Op::Gt => ordering == Some(Ordering::Greater),
        _ => matches!(ordering, Some(Ordering::Greater | Ordering::Equal)),
    };
    Ok(Native::Bool(result))
}

fn get_item(container: &Native, index: &Native) -> NativeResult {
    let position = |len: usize| -> Result<usize, NativeError> {
        let index = integer("getitem", index)?;
        let len = i64::try_from(len).map_err(|_| integer_overflow("indexing"))?;
        let resolved = if index < 0 { index + len } else { index };
        usize::try_from(resolved)
            .ok()
            .filter(|_| resolved < len)
            .ok_or_else(|| NativeError::index_error("index out of range"))
    };
    match container {
        Native::Seq(items) => Ok(items[position(items.len())?].clone()),
        Native::Str(text) => {
            let chars: Vec<char> = text.chars().collect();
            Ok(Native::from(chars[position(chars.len())?].to_string()))
        }
        other => Err(NativeError::type_error(format!(
            "'{}' object is not subscriptable",
            other.type_name()
        ))),
    }
}

fn unary(op: Op, operand: &Native) -> NativeResult {
    match (op, Num::of(operand)) {
        (Op::Neg, Some(Num::Int(n))) => n
            .checked_neg()
            .map(Native::Int)
            .ok_or_else(|| integer_overflow("negation")),
        (Op::Neg, Some(Num::Float(x))) => Ok(Native::Float(-x)),
        (Op::Pos, Some(Num::Int(n))) => Ok(Native::Int(n)),
        (Op::Pos, Some(Num::Float(x))) => Ok(Native::Float(x)),
        (Op::Invert, Some(Num::Int(n))) => Ok(Native::Int(!n)),
        _ => Err(bad_operand(op_symbol(op), operand)),
    }
}

fn modular_pow(base: i64, exponent: i64, modulus: i64) -> NativeResult {
    if modulus == 0 {
        return Err(NativeError::value_error("pow() 3rd argument cannot be 0"));
    }
    if exponent < 0 {
        return Err(NativeError::value_error(
            "pow() negative exponent is not supported with a modulus",
        ));
    }
    let m = i128::from(modulus);
    let mut result: i128 = 1;
    let mut base = i128::from(base).rem_euclid(m.abs());
    let mut exponent = exponent;
    while exponent > 0 {
        if exponent & 1 == 1 {
            result = result * base % m.abs();
        }
        base = base * base % m.abs();
        exponent >>= 1;
    }
    result %= m.abs();
    if m < 0 && result != 0 {
        result += m;
    }
    i64::try_from(result)
        .map(Native::Int)
        .map_err(|_| integer_overflow("modular exponentiation"))
}

fn register_operators(builder: ModuleBackendBuilder) -> ModuleBackendBuilder {
    let mut builder = builder;
    for op in Op::ALL {
        let path = format!("symbol.{}", op.name());
        let name = op.name();
        builder = match op {
            Op::MatMul | Op::GetAttr => builder.unsupported(&path),
            Op::Eq | Op::Ne | Op::Lt | Op::Le | Op::Gt | Op::Ge => {
                builder.positional(&path, move |args| {
                    let [a, b] = exactly(name, args)?;
                    compare(op, a, b)
                })
            }
            Op::GetItem => builder.positional(&path, move |args| {
                let [container, index] = exactly(name, args)?;
                get_item(container, index)
            }),
            Op::Neg | Op::Pos | Op::Invert => builder.positional(&path, move |args| {
                let [operand] = exactly(name, args)?;
                unary(op, operand)
            }),
            Op::Pow3 => builder.positional(&path, move |args| {
                let [base, exponent, modulus] = exactly(name, args)?;
                modular_pow(
                    integer("pow", base)?,
                    integer("pow", exponent)?,
                    integer("pow", modulus)?,
                )
            }),
            _ => builder.positional(&path, move |args| {
                let [a, b] = exactly(name, args)?;
                arithmetic(op, a, b)
            }),
        };
    }
    builder
}

// Math functions

/// Float function with an input domain; outputs out of range are errors.
fn float_fn(
    builder: ModuleBackendBuilder,
    name: &'static str,
    f: fn(f64) -> f64,
    domain: fn(f64) -> bool,
) -> ModuleBackendBuilder {
    builder.positional(&format!("scalar.{name}"), move |args| {
        let [x] = exactly(name, args)?;
        let x = real(name, x)?;
        if !x.is_nan() && !domain(x) {
            return Err(domain_error());
        }
        let y = f(x);
        if y.is_nan() && !x.is_nan() {
            return Err(domain_error());
        }
        if y.is_infinite() && x.is_finite() {
            return Err(range_error());
        }
        Ok(Native::Float(y))
    })
}

fn float_to_int_fn(
    builder: ModuleBackendBuilder,
    name: &'static str,
    f: fn(f64) -> f64,
) -> ModuleBackendBuilder {
    builder.positional(&format!("scalar.{name}"), move |args| {
        let [x] = exactly(name, args)?;
        match Num::of(x) {
            Some(Num::Int(n)) => Ok(Native::Int(n)),
            _ => float_to_int(f(real(name, x)?)).map(Native::Int),
        }
    })
}

fn predicate_fn(
    builder: ModuleBackendBuilder,
    name: &'static str,
    f: fn(f64) -> bool,
) -> ModuleBackendBuilder {
    builder.positional(&format!("scalar.{name}"), move |args| {
        let [x] = exactly(name, args)?;
        Ok(Native::Bool(f(real(name, x)?)))
    })
}

fn next_after(x: f64, y: f64) -> f64 {
    if x.is_nan() || y.is_nan() {
        return f64::NAN;
    }
    if x == y {
        return y;
    }
    if x == 0.0 {
        return f64::from_bits(1).copysign(y);
    }
    let bits = x.to_bits();
    if (y > x) == (x > 0.0) {
        f64::from_bits(bits + 1)
    } else {
        f64::from_bits(bits - 1)
    }
}

fn ulp(x: f64) -> f64 {
    if !x.is_finite() {
        return x.abs();
    }
    let x = x.abs();
    if x == f64::MAX {
        return x - next_after(x, f64::NEG_INFINITY);
    }
    next_after(x, f64::INFINITY) - x
}

#[allow(clippy::cast_possible_wrap)]
fn frexp(x: f64) -> (f64, i64) {
    if x == 0.0 || !x.is_finite() {
        return (x, 0);
    }
    let bits = x.to_bits();
    let exponent = ((bits >> 52) & 0x7ff) as i64;
    if exponent == 0 {
        let (mantissa, e) = frexp(x * 2f64.powi(54));
        return (mantissa, e - 54);
    }
    let mantissa = f64::from_bits((bits & !(0x7ff << 52)) | (1022 << 52));
    (mantissa, exponent - 1022)
}

fn ldexp(x: f64, exponent: i64) -> NativeResult {
    let mut result = x;
    let mut remaining = exponent.clamp(-2200, 2200);
    while remaining != 0 {
        let step = remaining.clamp(-1000, 1000);
        result *= 2f64.powi(i32::try_from(step).unwrap_or(0));
        remaining -= step;
    }
    if result.is_infinite() && x.is_finite() {
        return Err(range_error());
    }
    Ok(Native::Float(result))
}

fn factorial(n: i64) -> NativeResult {
    if n < 0 {
        return Err(NativeError::value_error(
            "factorial() not defined for negative values",
        ));
    }
    (1..=n)
        .try_fold(1_i64, i64::checked_mul)
        .map(Native::Int)
        .ok_or_else(|| integer_overflow("factorial"))
}

fn comb(n: i64, k: i64) -> NativeResult {
    if n < 0 || k < 0 {
        return Err(NativeError::value_error(
            "comb() arguments must be non-negative integers",
        ));
    }
    if k > n {
        return Ok(Native::Int(0));
    }
    let k = k.min(n - k);
    let mut result: i128 = 1;
    for i in 1..=i128::from(k) {
        result = result
            .checked_mul(i128::from(n) - i128::from(k) + i)
            .ok_or_else(|| integer_overflow("comb"))?
            / i;
    }
    i64::try_from(result)
        .map(Native::Int)
        .map_err(|_| integer_overflow("comb"))
}

fn isqrt(n: i64) -> NativeResult {
    if n < 0 {
        return Err(NativeError::value_error(
            "isqrt() argument must be nonnegative",
        ));
    }
    let mut root = (n as f64).sqrt() as i64;
    while root.checked_mul(root).map_or(true, |square| square > n) {
        root -= 1;
    }
    while (root + 1).checked_mul(root + 1).is_some_and(|square| square <= n) {
        root += 1;
    }
    Ok(Native::Int(root))
}

fn remainder(x: f64, y: f64) -> NativeResult {
    if x.is_nan() || y.is_nan() {
        return Ok(Native::Float(f64::NAN));
    }
    if y == 0.0 || x.is_infinite() {
        return Err(domain_error());
    }
    if y.is_infinite() {
        return Ok(Native::Float(x));
    }
    let quotient = (x / y).round_ties_even();
    Ok(Native::Float(x - quotient * y))
}

fn binary_real(
    builder: ModuleBackendBuilder,
    name: &'static str,
    f: impl Fn(f64, f64) -> NativeResult + Send + Sync + 'static,
) -> ModuleBackendBuilder {
    builder.positional(&format!("scalar.{name}"), move |args| {
        let [x, y] = exactly(name, args)?;
        f(real(name, x)?, real(name, y)?)
    })
}

fn register_scalar(builder: ModuleBackendBuilder) -> ModuleBackendBuilder {
    let always = |_: f64| true;
    let mut builder = builder
        .positional("scalar.abs", |args| {
            let [x] = exactly("abs", args)?;
            match Num::of(x) {
                Some(Num::Int(n)) => n
                    .checked_abs()
                    .map(Native::Int)
                    .ok_or_else(|| integer_overflow("abs")),
                _ => Ok(Native::Float(real("abs", x)?.abs())),
            }
        })
        .positional("scalar.factorial", |args| {
            let [n] = exactly("factorial", args)?;
            factorial(integer("factorial", n)?)
        })
        .positional("scalar.comb", |args| {
            let [n, k] = exactly("comb", args)?;
            comb(integer("comb", n)?, integer("comb", k)?)
        })
        .positional("scalar.isqrt", |args| {
            let [n] = exactly("isqrt", args)?;
            isqrt(integer("isqrt", n)?)
        })
        .positional("scalar.frexp", |args| {
            let [x] = exactly("frexp", args)?;
            let (mantissa, exponent) = frexp(real("frexp", x)?);
            Ok(Native::seq([Native::Float(mantissa), Native::Int(exponent)]))
        })
        .positional("scalar.modf", |args| {
            let [x] = exactly("modf", args)?;
            let x = real("modf", x)?;
            let (fraction, whole) = if x.is_infinite() {
                (0.0_f64.copysign(x), x)
            } else {
                (x.fract(), x.trunc())
            };
            Ok(Native::seq([Native::Float(fraction), Native::Float(whole)]))
        })
        .positional("scalar.ldexp", |args| {
            let [x, i] = exactly("ldexp", args)?;
            ldexp(real("ldexp", x)?, integer("ldexp", i)?)
        })
        .positional("scalar.hypot", |args| {
            let mut total = 0.0_f64;
            for coordinate in args {
                total = total.hypot(real("hypot", coordinate)?);
            }
            Ok(Native::Float(total))
        })
        .positional("scalar.ulp", |args| {
            let [x] = exactly("ulp", args)?;
            Ok(Native::Float(ulp(real("ulp", x)?)))
        });

    builder = binary_real(builder, "atan2", |y, x| Ok(Native::Float(y.atan2(x))));
    builder = binary_real(builder, "copysign", |x, y| Ok(Native::Float(x.copysign(y))));
    builder = binary_real(builder, "fmod", |x, y| {
        if y == 0.0 || x.is_infinite() {
            Err(domain_error())
        } else {
            Ok(Native::Float(x % y))
        }
    });
    builder = binary_real(builder, "nextafter", |x, y| {
        Ok(Native::Float(next_after(x, y)))
    });
    builder = binary_real(builder, "remainder", remainder);
    builder = binary_real(builder, "pow", |x, y| {
        if (x == 0.0 && y < 0.0) || (x < 0.0 && y.is_finite() && y.fract() != 0.0) {
            return Err(domain_error());
        }
        let result = x.powf(y);
        if result.is_infinite() && x.is_finite() && y.is_finite() {
            return Err(range_error());
        }
        Ok(Native::Float(result))
    });

    let float_fns: [(&'static str, fn(f64) -> f64, fn(f64) -> bool); 22] = [
        ("acos", f64::acos, |x| (-1.0..=1.0).contains(&x)),
        ("acosh", f64::acosh, |x| x >= 1.0),
        ("asin", f64::asin, |x| (-1.0..=1.0).contains(&x)),
        ("asinh", f64::asinh, always),
        ("atan", f64::atan, always),
        ("atanh", f64::atanh, |x| x > -1.0 && x < 1.0),
        ("cos", f64::cos, |x| x.is_finite()),
        ("cosh", f64::cosh, always),
        ("degrees", f64::to_degrees, always),
        ("exp", f64::exp, always),
        ("expm1", f64::exp_m1, always),
        ("fabs", f64::abs, always),
        ("log", f64::ln, |x| x > 0.0),
        ("log10", f64::log10, |x| x > 0.0),
        ("log1p", f64::ln_1p, |x| x > -1.0),
        ("log2", f64::log2, |x| x > 0.0),
        ("radians", f64::to_radians, always),
        ("sin", f64::sin, |x| x.is_finite()),
        ("sinh", f64::sinh, always),
        ("sqrt", f64::sqrt, |x| x >= 0.0),
        ("tan", f64::tan, |x| x.is_finite()),
        ("tanh", f64::tanh, always),
    ];
    for (name, f, domain) in float_fns {
        builder = float_fn(builder, name, f, domain);
    }
    builder = float_to_int_fn(builder, "trunc", f64::trunc);
    builder = float_to_int_fn(builder, "ceil", f64::ceil);
    builder = float_to_int_fn(builder, "floor", f64::floor);

    builder = predicate_fn(builder, "isfinite", f64::is_finite);
    builder = predicate_fn(builder, "isinf", f64::is_infinite);
    builder = predicate_fn(builder, "isnan", f64::is_nan);

    for name in ["erf", "erfc", "gamma", "lgamma"] {
        builder = builder.unsupported(&format!("scalar.{name}"));
    }

    builder
        .constant("scalar.e", std::f64::consts::E)
        .constant("scalar.inf", f64::INFINITY)
        .constant("scalar.pi", std::f64::consts::PI)
        .constant("scalar.nan", f64::NAN)
        .constant("scalar.tau", std::f64::consts::TAU)
}

fn fold_seq(name: &'static str, start: i64, op: Op) -> impl Fn(&[Native]) -> NativeResult {
    move |args: &[Native]| {
        let [items] = exactly(name, args)?;
        let items = items.as_seq().ok_or_else(|| {
            NativeError::type_error(format!(
                "{name}() argument must be a sequence, not '{}'",
                items.type_name()
            ))
        })?;
        items
            .iter()
            .try_fold(Native::Int(start), |acc, item| arithmetic(op, &acc, item))
    }
}

fn register_vector(builder: ModuleBackendBuilder) -> ModuleBackendBuilder {
    builder
        .positional("vector.sum", fold_seq("sum", 0, Op::Add))
        .positional("vector.prod", fold_seq("prod", 1, Op::Mul))
}

fn build() -> ModuleBackend {
    let mut builder = ModuleBackend::builder(LIBSTD);
    builder = register_operators(builder);
    builder = register_scalar(builder);
    builder = register_vector(builder);
    // Plain numbers have no notion of a named variable.
    for kind in [SymbolKind::Symbol, SymbolKind::Scalar, SymbolKind::Vector] {
        builder = builder.unsupported(kind.constructor_path());
    }
    let backend = builder.build();
    tracing::trace!(members = backend.paths().len(), "built standard backend");
    debug_assert!(scalar::FUNCTIONS
        .iter()
        .all(|(name, _)| backend.paths().contains(&format!("scalar.{name}").as_str())));
    debug_assert!(vector::FUNCTIONS
        .iter()
        .all(|name| backend.paths().contains(&format!("vector.{name}").as_str())));
    backend
}
