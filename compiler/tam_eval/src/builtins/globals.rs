//! Global builtin functions: `len`, `type`, `print`, conversions and
//! container helpers.

use std::time::Duration;

use super::{check_arity, check_arity_range, finish, BuiltinRegistry};
use crate::errors::{
    cancelled, expected_type, unhashable, unsupported_argument, ErrorKind, EvalError, EvalResult,
};
use crate::object::{set_items, sorted_pairs, CallContext, Object, SetItems};

pub(super) fn register(registry: &mut BuiltinRegistry) {
    registry
        .register("len", |_, args| finish(len(args)))
        .register("type", |_, args| finish(type_of(args)))
        .register("print", print)
        .register("string", |_, args| finish(to_string(args)))
        .register("int", |_, args| finish(to_int(args)))
        .register("float", |_, args| finish(to_float(args)))
        .register("keys", |_, args| finish(keys(args)))
        .register("delete", |_, args| finish(delete(args)))
        .register("set", |_, args| finish(make_set(args)))
        .register("sleep", |cx, args| finish(sleep(cx, args)));
}

fn count(n: usize) -> Object {
    Object::Integer(i64::try_from(n).unwrap_or(i64::MAX))
}

fn len(args: &[Object]) -> EvalResult {
    check_arity(args, 1)?;
    match &args[0] {
        Object::String(s) => Ok(count(s.chars().count())),
        Object::Array(items) => Ok(count(items.borrow().len())),
        Object::Hash(pairs) => Ok(count(pairs.borrow().len())),
        Object::Set(items) => Ok(count(items.borrow().len())),
        other => Err(unsupported_argument("len", other)),
    }
}

fn type_of(args: &[Object]) -> EvalResult {
    check_arity(args, 1)?;
    Ok(Object::string(args[0].kind().script_name()))
}

/// Space-joined display values, one line per call.
fn print(cx: &CallContext<'_>, args: &[Object]) -> Object {
    let line: Vec<String> = args.iter().map(Object::display_value).collect();
    cx.output().println(&line.join(" "));
    Object::Null
}

fn to_string(args: &[Object]) -> EvalResult {
    check_arity(args, 1)?;
    Ok(Object::string(args[0].display_value()))
}

// 2^63 as f64, the first float past i64::MAX.
const I64_LIMIT: f64 = 9_223_372_036_854_775_808.0;

#[allow(clippy::cast_possible_truncation)]
fn to_int(args: &[Object]) -> EvalResult {
    check_arity(args, 1)?;
    match &args[0] {
        Object::Integer(n) => Ok(Object::Integer(*n)),
        Object::Float(f) => {
            let truncated = f.trunc();
            if truncated.is_finite() && (-I64_LIMIT..I64_LIMIT).contains(&truncated) {
                Ok(Object::Integer(truncated as i64))
            } else {
                Err(EvalError::new(
                    ErrorKind::Value,
                    format_args!("cannot convert {f:?} to integer"),
                ))
            }
        }
        Object::String(s) => s.trim().parse::<i64>().map(Object::Integer).map_err(|_| {
            EvalError::new(
                ErrorKind::Value,
                format_args!("invalid literal for int(): {:?}", &**s),
            )
        }),
        Object::Boolean(b) => Ok(Object::Integer(i64::from(*b))),
        Object::Duration(d) => Ok(Object::Integer(*d)),
        other => Err(unsupported_argument("int", other)),
    }
}

#[allow(clippy::cast_precision_loss)]
fn to_float(args: &[Object]) -> EvalResult {
    check_arity(args, 1)?;
    match &args[0] {
        Object::Integer(n) => Ok(Object::Float(*n as f64)),
        Object::Float(f) => Ok(Object::Float(*f)),
        Object::String(s) => s.trim().parse::<f64>().map(Object::Float).map_err(|_| {
            EvalError::new(
                ErrorKind::Value,
                format_args!("invalid literal for float(): {:?}", &**s),
            )
        }),
        other => Err(unsupported_argument("float", other)),
    }
}

/// Keys of a hash, ordered by their inspect text.
fn keys(args: &[Object]) -> EvalResult {
    check_arity(args, 1)?;
    match &args[0] {
        Object::Hash(pairs) => {
            let keys = sorted_pairs(&pairs.borrow())
                .into_iter()
                .map(|pair| pair.key)
                .collect();
            Ok(Object::array(keys))
        }
        other => Err(unsupported_argument("keys", other)),
    }
}

/// Remove a key from a hash or an element from a set.
fn delete(args: &[Object]) -> EvalResult {
    check_arity(args, 2)?;
    let target = &args[1];
    let key = || target.hash_key().ok_or_else(|| unhashable(target));
    match &args[0] {
        Object::Hash(pairs) => {
            pairs.borrow_mut().remove(&key()?);
            Ok(Object::Null)
        }
        Object::Set(items) => {
            items.borrow_mut().remove(&key()?);
            Ok(Object::Null)
        }
        other => Err(unsupported_argument("delete", other)),
    }
}

/// `set()` or `set(array_or_set)`.
fn make_set(args: &[Object]) -> EvalResult {
    check_arity_range(args, 0, 1)?;
    let Some(source) = args.first() else {
        return Ok(Object::set(SetItems::default()));
    };
    match source {
        Object::Array(items) => Ok(Object::set(set_items(items.borrow().iter().cloned())?)),
        Object::Set(items) => Ok(Object::set(items.borrow().clone())),
        other => Err(unsupported_argument("set", other)),
    }
}

/// Block for a duration, waking early if the context is done.
#[allow(clippy::cast_sign_loss)]
fn sleep(cx: &CallContext<'_>, args: &[Object]) -> EvalResult {
    check_arity(args, 1)?;
    let Object::Duration(nanos) = &args[0] else {
        return Err(expected_type("sleep", "a duration", &args[0]));
    };
    let wait = Duration::from_nanos((*nanos).max(0) as u64);
    tracing::trace!(?wait, "sleep");
    cx.context().sleep(wait).map_err(cancelled)?;
    Ok(Object::Null)
}
