//! Binary operator implementations for the evaluator.
//!
//! Dispatch is a single match on the operand type pair. Each per-type
//! function returns `None` for an operator that type pair does not
//! support; `evaluate_binary` turns that into the standard
//! unsupported-operands error naming both types.
//!
//! `&&` and `||` short-circuit in the interpreter and never reach here
//! with both operands evaluated, except through `evaluate_binary` called
//! directly, where they combine truthiness.

use std::cmp::Ordering;

use tam_ir::BinaryOp;

use crate::errors::{division_by_zero, integer_overflow, unsupported_operands, EvalResult};
use crate::object::{compare_int_float, Heap, Object};

#[inline]
fn checked_int(result: Option<i64>) -> EvalResult {
    result.map(Object::Integer).ok_or_else(integer_overflow)
}

#[inline]
fn checked_int_div(divisor: i64, op: impl FnOnce() -> Option<i64>) -> EvalResult {
    if divisor == 0 {
        Err(division_by_zero())
    } else {
        checked_int(op())
    }
}

/// Map an ordering onto the six comparison operators.
fn compare(ordering: Option<Ordering>, op: BinaryOp) -> Option<EvalResult> {
    let result = match op {
        BinaryOp::Eq => ordering == Some(Ordering::Equal),
        BinaryOp::NotEq => ordering != Some(Ordering::Equal),
        BinaryOp::Lt => ordering == Some(Ordering::Less),
        BinaryOp::LtEq => matches!(ordering, Some(Ordering::Less | Ordering::Equal)),
        BinaryOp::Gt => ordering == Some(Ordering::Greater),
        BinaryOp::GtEq => matches!(ordering, Some(Ordering::Greater | Ordering::Equal)),
        _ => return None,
    };
    Some(Ok(Object::Boolean(result)))
}

/// Evaluate `left op right`.
#[allow(clippy::cast_precision_loss)]
pub fn evaluate_binary(left: &Object, right: &Object, op: BinaryOp) -> EvalResult {
    if matches!(op, BinaryOp::And | BinaryOp::Or) {
        let result = match op {
            BinaryOp::And => left.is_truthy() && right.is_truthy(),
            _ => left.is_truthy() || right.is_truthy(),
        };
        return Ok(Object::Boolean(result));
    }

    let result = match (left, right) {
        (Object::Integer(a), Object::Integer(b)) => eval_int_binary(*a, *b, op),
        (Object::Float(a), Object::Float(b)) => eval_float_binary(*a, *b, op),
        // Comparisons are exact; arithmetic promotes to Float.
        (Object::Integer(a), Object::Float(b)) => compare(compare_int_float(*a, *b), op)
            .or_else(|| eval_float_binary(*a as f64, *b, op)),
        (Object::Float(a), Object::Integer(b)) => {
            compare(compare_int_float(*b, *a).map(Ordering::reverse), op)
                .or_else(|| eval_float_binary(*a, *b as f64, op))
        }
        (Object::String(a), Object::String(b)) => eval_string_binary(a, b, op),
        (Object::Boolean(a), Object::Boolean(b)) => eval_bool_binary(*a, *b, op),
        (Object::Duration(a), Object::Duration(b)) => eval_duration_binary(*a, *b, op),
        (Object::Array(a), Object::Array(b)) => eval_array_binary(a, b, left, right, op),
        (Object::Null, _) | (_, Object::Null) => eval_null_binary(left, right, op),
        _ if left.kind() == right.kind() => eval_identity_binary(left, right, op),
        _ => None,
    };
    result.unwrap_or_else(|| Err(unsupported_operands(op.as_symbol(), left, right)))
}

fn eval_int_binary(a: i64, b: i64, op: BinaryOp) -> Option<EvalResult> {
    Some(match op {
        BinaryOp::Add => checked_int(a.checked_add(b)),
        BinaryOp::Sub => checked_int(a.checked_sub(b)),
        BinaryOp::Mul => checked_int(a.checked_mul(b)),
        BinaryOp::Div => checked_int_div(b, || a.checked_div(b)),
        BinaryOp::Mod => checked_int_div(b, || a.checked_rem(b)),
        BinaryOp::Pow => int_pow(a, b),
        _ => return compare(Some(a.cmp(&b)), op),
    })
}

/// `a ** b`; a negative exponent yields a Float.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
fn int_pow(a: i64, b: i64) -> EvalResult {
    if b < 0 {
        return Ok(Object::Float((a as f64).powf(b as f64)));
    }
    let exp = u32::try_from(b).map_err(|_| integer_overflow())?;
    checked_int(a.checked_pow(exp))
}

fn eval_float_binary(a: f64, b: f64, op: BinaryOp) -> Option<EvalResult> {
    Some(Ok(Object::Float(match op {
        BinaryOp::Add => a + b,
        BinaryOp::Sub => a - b,
        BinaryOp::Mul => a * b,
        BinaryOp::Div => a / b,
        BinaryOp::Mod => a % b,
        BinaryOp::Pow => a.powf(b),
        // partial_cmp keeps IEEE semantics: NaN is unordered.
        _ => return compare(a.partial_cmp(&b), op),
    })))
}

fn eval_string_binary(a: &str, b: &str, op: BinaryOp) -> Option<EvalResult> {
    match op {
        BinaryOp::Add => Some(Ok(Object::string(format!("{a}{b}")))),
        _ => compare(Some(a.cmp(b)), op),
    }
}

fn eval_bool_binary(a: bool, b: bool, op: BinaryOp) -> Option<EvalResult> {
    match op {
        BinaryOp::Eq | BinaryOp::NotEq => compare(Some(a.cmp(&b)), op),
        _ => None,
    }
}

fn eval_duration_binary(a: i64, b: i64, op: BinaryOp) -> Option<EvalResult> {
    let sum = match op {
        BinaryOp::Add => a.checked_add(b),
        BinaryOp::Sub => a.checked_sub(b),
        _ => return compare(Some(a.cmp(&b)), op),
    };
    Some(sum.map(Object::Duration).ok_or_else(integer_overflow))
}

fn eval_array_binary(
    a: &Heap<Vec<Object>>,
    b: &Heap<Vec<Object>>,
    left: &Object,
    right: &Object,
    op: BinaryOp,
) -> Option<EvalResult> {
    match op {
        BinaryOp::Add => {
            let mut items = a.borrow().clone();
            items.extend(b.borrow().iter().cloned());
            Some(Ok(Object::array(items)))
        }
        BinaryOp::Eq => Some(Ok(Object::Boolean(left.equals(right)))),
        BinaryOp::NotEq => Some(Ok(Object::Boolean(!left.equals(right)))),
        _ => None,
    }
}

/// `null` compares unequal to everything but itself.
fn eval_null_binary(left: &Object, right: &Object, op: BinaryOp) -> Option<EvalResult> {
    let both_null = matches!((left, right), (Object::Null, Object::Null));
    match op {
        BinaryOp::Eq => Some(Ok(Object::Boolean(both_null))),
        BinaryOp::NotEq => Some(Ok(Object::Boolean(!both_null))),
        _ => None,
    }
}

/// Equality for same-typed hashes, sets, callables, modules and errors.
fn eval_identity_binary(left: &Object, right: &Object, op: BinaryOp) -> Option<EvalResult> {
    match op {
        BinaryOp::Eq => Some(Ok(Object::Boolean(left.equals(right)))),
        BinaryOp::NotEq => Some(Ok(Object::Boolean(!left.equals(right)))),
        _ => None,
    }
}

// Unary operators

/// Numeric negation.
pub fn evaluate_negation(value: &Object) -> EvalResult {
    match value {
        Object::Integer(n) => checked_int(n.checked_neg()),
        Object::Float(f) => Ok(Object::Float(-f)),
        Object::Duration(d) => d
            .checked_neg()
            .map(Object::Duration)
            .ok_or_else(integer_overflow),
        other => Err(crate::errors::bad_unary_operand("-", other)),
    }
}

/// Logical not; defined for every value through truthiness.
#[inline]
pub fn evaluate_not(value: &Object) -> Object {
    Object::Boolean(!value.is_truthy())
}
