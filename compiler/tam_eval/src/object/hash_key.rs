//! Hash keys for Hash and Set storage.

use std::cmp::Ordering;
use std::rc::Rc;

use super::Object;

/// Type-aware key derived from a hashable object.
///
/// Objects that compare equal produce equal keys. In particular an
/// integral Float maps to the `Int` key, so `1` and `1.0` address the
/// same slot.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum HashKey {
    Int(i64),
    Float(u64),
    Bool(bool),
    Str(Rc<str>),
    Duration(i64),
}

// 2^63 as f64; integral floats in [-2^63, 2^63) convert to i64 exactly.
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

#[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
fn float_key(value: f64) -> HashKey {
    if value.fract() == 0.0 && (-I64_BOUND..I64_BOUND).contains(&value) {
        HashKey::Int(value as i64)
    } else {
        HashKey::Float(value.to_bits())
    }
}

/// Exact ordering of an Integer against a Float, with no rounding of
/// `int`; `None` when `float` is NaN.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn compare_int_float(int: i64, float: f64) -> Option<Ordering> {
    if float.is_nan() {
        return None;
    }
    if float >= I64_BOUND {
        return Some(Ordering::Less);
    }
    if float < -I64_BOUND {
        return Some(Ordering::Greater);
    }
    let whole = float.trunc();
    Some(int.cmp(&(whole as i64)).then_with(|| {
        if float > whole {
            Ordering::Less
        } else if float < whole {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }))
}

/// Integer/Float equality that agrees with `float_key`, so equal numbers
/// always share a key.
#[inline]
pub(crate) fn int_equals_float(int: i64, float: f64) -> bool {
    compare_int_float(int, float) == Some(Ordering::Equal)
}

impl HashKey {
    /// Key for `object`, or `None` if its type is not hashable.
    pub fn of(object: &Object) -> Option<HashKey> {
        match object {
            Object::Integer(n) => Some(HashKey::Int(*n)),
            Object::Float(f) => Some(float_key(*f)),
            Object::Boolean(b) => Some(HashKey::Bool(*b)),
            Object::String(s) => Some(HashKey::Str(Rc::clone(s))),
            Object::Duration(d) => Some(HashKey::Duration(*d)),
            _ => None,
        }
    }
}
