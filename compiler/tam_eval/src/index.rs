//! Indexing, index assignment and slicing.
//!
//! Sequence indices may be negative and count from the end. Out-of-range
//! errors report the index as written, not the normalized one.

use crate::errors::{
    index_not_integer, index_out_of_range, item_assignment_unsupported, key_not_found,
    not_subscriptable, unhashable, EvalError, EvalResult,
};
use crate::object::{HashPair, Object};

/// Normalize `index` against `len`; `None` if out of range.
fn normalize(index: i64, len: usize) -> Option<usize> {
    let len = i64::try_from(len).ok()?;
    let resolved = if index < 0 { index.checked_add(len)? } else { index };
    if (0..len).contains(&resolved) {
        usize::try_from(resolved).ok()
    } else {
        None
    }
}

/// `receiver[index]`
pub fn get_index(receiver: &Object, index: &Object) -> EvalResult {
    match receiver {
        Object::Array(items) => {
            let Object::Integer(i) = index else {
                return Err(index_not_integer("array", index));
            };
            let items = items.borrow();
            normalize(*i, items.len())
                .map(|pos| items[pos].clone())
                .ok_or_else(|| index_out_of_range("array", *i))
        }
        Object::String(text) => {
            let Object::Integer(i) = index else {
                return Err(index_not_integer("string", index));
            };
            let len = text.chars().count();
            normalize(*i, len)
                .and_then(|pos| text.chars().nth(pos))
                .map(|c| Object::string(c.to_string()))
                .ok_or_else(|| index_out_of_range("string", *i))
        }
        Object::Hash(pairs) => {
            let key = index.hash_key().ok_or_else(|| unhashable(index))?;
            pairs
                .borrow()
                .get(&key)
                .map(|pair| pair.value.clone())
                .ok_or_else(|| key_not_found(index))
        }
        other => Err(not_subscriptable(other)),
    }
}

/// `receiver[index] = value`
pub fn set_index(receiver: &Object, index: &Object, value: Object) -> Result<(), EvalError> {
    match receiver {
        Object::Array(items) => {
            let Object::Integer(i) = index else {
                return Err(index_not_integer("array", index));
            };
            let mut items = items.borrow_mut();
            let pos = normalize(*i, items.len()).ok_or_else(|| index_out_of_range("array", *i))?;
            items[pos] = value;
            Ok(())
        }
        Object::Hash(pairs) => {
            let key = index.hash_key().ok_or_else(|| unhashable(index))?;
            pairs.borrow_mut().insert(
                key,
                HashPair {
                    key: index.clone(),
                    value,
                },
            );
            Ok(())
        }
        other => Err(item_assignment_unsupported(other)),
    }
}

/// Resolve one slice bound: default, negative offset from the end,
/// then clamp to `[0, len]`.
fn slice_bound(bound: Option<&Object>, default: usize, len: usize) -> Result<usize, EvalError> {
    let Some(bound) = bound else {
        return Ok(default);
    };
    let Object::Integer(n) = bound else {
        return Err(index_not_integer("slice", bound));
    };
    let len_i = i64::try_from(len).unwrap_or(i64::MAX);
    let resolved = if *n < 0 { n.saturating_add(len_i) } else { *n };
    Ok(usize::try_from(resolved.clamp(0, len_i)).unwrap_or(0))
}

/// `receiver[low:high]`; an inverted range yields an empty result.
pub fn get_slice(receiver: &Object, low: Option<&Object>, high: Option<&Object>) -> EvalResult {
    match receiver {
        Object::Array(items) => {
            let items = items.borrow();
            let len = items.len();
            let start = slice_bound(low, 0, len)?;
            let end = slice_bound(high, len, len)?;
            let slice = if start < end {
                items[start..end].to_vec()
            } else {
                Vec::new()
            };
            Ok(Object::array(slice))
        }
        Object::String(text) => {
            let len = text.chars().count();
            let start = slice_bound(low, 0, len)?;
            let end = slice_bound(high, len, len)?;
            let slice: String = if start < end {
                text.chars().skip(start).take(end - start).collect()
            } else {
                String::new()
            };
            Ok(Object::string(slice))
        }
        other => Err(not_subscriptable(other)),
    }
}
