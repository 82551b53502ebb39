//! Attribute access: `receiver.name`.
//!
//! Module attributes are plain member lookups. On every other type an
//! attribute is a method: the result is a builtin bound to the receiver,
//! so `h.get` can be stored and called later.

use crate::builtins::{check_arity, check_arity_range, finish};
use crate::errors::{expected_type, no_attribute, unhashable, ErrorKind, EvalError, EvalResult};
use crate::object::{duration, set_items, sorted_pairs, HashPairs, Heap, Object, SetItems};

/// Wrap a method body as a builtin named `qualified`.
fn method(qualified: &'static str, body: impl Fn(&[Object]) -> EvalResult + 'static) -> Object {
    Object::builtin(qualified, move |_, args| finish(body(args)))
}

/// Resolve `receiver.name`.
pub fn get_attribute(receiver: &Object, name: &str) -> EvalResult {
    let found = match receiver {
        Object::Module(module) => module.get(name),
        Object::Hash(pairs) => hash_method(pairs, name),
        Object::Array(items) => array_method(receiver, items, name),
        Object::Set(items) => set_method(receiver, items, name),
        Object::String(text) => string_method(text, name),
        Object::Duration(d) => duration_method(*d, name),
        _ => None,
    };
    found.ok_or_else(|| no_attribute(receiver, name))
}

fn key_of(object: &Object) -> Result<crate::object::HashKey, EvalError> {
    object.hash_key().ok_or_else(|| unhashable(object))
}

// Hash

fn hash_method(pairs: &Heap<HashPairs>, name: &str) -> Option<Object> {
    let pairs = pairs.clone();
    Some(match name {
        "get" => method("hash.get", move |args| {
            check_arity_range(args, 1, 2)?;
            let key = key_of(&args[0])?;
            let found = pairs.borrow().get(&key).map(|pair| pair.value.clone());
            Ok(found.unwrap_or_else(|| args.get(1).cloned().unwrap_or(Object::Null)))
        }),
        "keys" => method("hash.keys", move |args| {
            check_arity(args, 0)?;
            let keys = sorted_pairs(&pairs.borrow())
                .into_iter()
                .map(|pair| pair.key)
                .collect();
            Ok(Object::array(keys))
        }),
        "values" => method("hash.values", move |args| {
            check_arity(args, 0)?;
            let values = sorted_pairs(&pairs.borrow())
                .into_iter()
                .map(|pair| pair.value)
                .collect();
            Ok(Object::array(values))
        }),
        "contains" => method("hash.contains", move |args| {
            check_arity(args, 1)?;
            let key = key_of(&args[0])?;
            Ok(Object::Boolean(pairs.borrow().contains_key(&key)))
        }),
        _ => return None,
    })
}

// Array

fn array_method(receiver: &Object, items: &Heap<Vec<Object>>, name: &str) -> Option<Object> {
    let items = items.clone();
    Some(match name {
        "append" => {
            let receiver = receiver.clone();
            method("array.append", move |args| {
                items.borrow_mut().extend(args.iter().cloned());
                Ok(receiver.clone())
            })
        }
        "pop" => method("array.pop", move |args| {
            check_arity(args, 0)?;
            items
                .borrow_mut()
                .pop()
                .ok_or_else(|| EvalError::new(ErrorKind::Index, "pop from empty array"))
        }),
        _ => return None,
    })
}

// Set

fn set_method(receiver: &Object, items: &Heap<SetItems>, name: &str) -> Option<Object> {
    let items = items.clone();
    Some(match name {
        "contains" => method("set.contains", move |args| {
            check_arity(args, 1)?;
            let key = key_of(&args[0])?;
            Ok(Object::Boolean(items.borrow().contains_key(&key)))
        }),
        "add" => {
            let receiver = receiver.clone();
            method("set.add", move |args| {
                let added = set_items(args.iter().cloned())?;
                let mut items = items.borrow_mut();
                for (key, element) in added {
                    items.entry(key).or_insert(element);
                }
                Ok(receiver.clone())
            })
        }
        _ => return None,
    })
}

// String

fn string_arg(builtin: &str, arg: &Object) -> Result<std::rc::Rc<str>, EvalError> {
    match arg {
        Object::String(s) => Ok(std::rc::Rc::clone(s)),
        other => Err(expected_type(builtin, "a string", other)),
    }
}

fn string_method(text: &std::rc::Rc<str>, name: &str) -> Option<Object> {
    let text = std::rc::Rc::clone(text);
    Some(match name {
        "upper" => method("string.upper", move |args| {
            check_arity(args, 0)?;
            Ok(Object::string(text.to_uppercase()))
        }),
        "lower" => method("string.lower", move |args| {
            check_arity(args, 0)?;
            Ok(Object::string(text.to_lowercase()))
        }),
        "contains" => method("string.contains", move |args| {
            check_arity(args, 1)?;
            let needle = string_arg("string.contains", &args[0])?;
            Ok(Object::Boolean(text.contains(&*needle)))
        }),
        "split" => method("string.split", move |args| {
            check_arity_range(args, 0, 1)?;
            let parts: Vec<Object> = match args.first() {
                None => text.split_whitespace().map(Object::from).collect(),
                Some(sep) => {
                    let sep = string_arg("string.split", sep)?;
                    if sep.is_empty() {
                        text.chars().map(|c| Object::string(c.to_string())).collect()
                    } else {
                        text.split(&*sep).map(Object::from).collect()
                    }
                }
            };
            Ok(Object::array(parts))
        }),
        _ => return None,
    })
}

// Duration

fn duration_arg(builtin: &str, arg: &Object) -> Result<i64, EvalError> {
    match arg {
        Object::Duration(d) => Ok(*d),
        other => Err(expected_type(builtin, "a duration", other)),
    }
}

fn duration_method(d: i64, name: &str) -> Option<Object> {
    fn float(
        qualified: &'static str,
        d: i64,
        convert: fn(i64) -> f64,
    ) -> Object {
        method(qualified, move |args| {
            check_arity(args, 0)?;
            Ok(Object::Float(convert(d)))
        })
    }
    fn int(qualified: &'static str, d: i64, convert: fn(i64) -> i64) -> Object {
        method(qualified, move |args| {
            check_arity(args, 0)?;
            Ok(Object::Integer(convert(d)))
        })
    }

    Some(match name {
        "hours" => float("duration.hours", d, duration::hours),
        "minutes" => float("duration.minutes", d, duration::minutes),
        "seconds" => float("duration.seconds", d, duration::seconds),
        "milliseconds" => int("duration.milliseconds", d, duration::milliseconds),
        "microseconds" => int("duration.microseconds", d, duration::microseconds),
        "nanoseconds" => int("duration.nanoseconds", d, |n| n),
        "abs" => method("duration.abs", move |args| {
            check_arity(args, 0)?;
            Ok(Object::Duration(duration::abs(d)))
        }),
        "round" => method("duration.round", move |args| {
            check_arity(args, 1)?;
            let m = duration_arg("duration.round", &args[0])?;
            Ok(Object::Duration(duration::round(d, m)))
        }),
        "truncate" => method("duration.truncate", move |args| {
            check_arity(args, 1)?;
            let m = duration_arg("duration.truncate", &args[0])?;
            Ok(Object::Duration(duration::truncate(d, m)))
        }),
        "tostring" => method("duration.tostring", move |args| {
            check_arity(args, 0)?;
            Ok(Object::string(duration::format(d)))
        }),
        _ => return None,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::context::Context;
    use crate::object::{hash_pairs, CallContext};
    use crate::print_handler::silent_handler;
    use pretty_assertions::assert_eq;

    fn call(receiver: &Object, name: &str, args: &[Object]) -> String {
        let ctx = Context::background();
        let output = silent_handler();
        let cx = CallContext::new(&ctx, &output);
        match get_attribute(receiver, name) {
            Ok(Object::Builtin(b)) => b.call(&cx, args).display_value(),
            Ok(other) => other.inspect(),
            Err(err) => err.message().to_string(),
        }
    }

    #[test]
    fn hash_methods() {
        let h = Object::hash(
            hash_pairs([
                (Object::string("b"), Object::Integer(2)),
                (Object::string("a"), Object::Integer(1)),
            ])
            .unwrap(),
        );
        assert_eq!(call(&h, "get", &[Object::string("a")]), "1");
        assert_eq!(call(&h, "get", &[Object::string("z")]), "null");
        assert_eq!(call(&h, "get", &[Object::string("z"), Object::Integer(0)]), "0");
        assert_eq!(call(&h, "keys", &[]), "[\"a\", \"b\"]");
        assert_eq!(call(&h, "values", &[]), "[1, 2]");
        assert_eq!(call(&h, "contains", &[Object::string("b")]), "true");
    }

    #[test]
    fn array_methods_mutate_in_place() {
        let a = Object::array(vec![Object::Integer(1)]);
        assert_eq!(call(&a, "append", &[Object::Integer(2), Object::Integer(3)]), "[1, 2, 3]");
        assert_eq!(call(&a, "pop", &[]), "3");
        assert_eq!(a.inspect(), "[1, 2]");

        let empty = Object::array(vec![]);
        assert_eq!(call(&empty, "pop", &[]), "index error: pop from empty array");
    }

    #[test]
    fn set_methods() {
        let s = Object::set(set_items([Object::Integer(1)]).unwrap());
        assert_eq!(call(&s, "contains", &[Object::Integer(1)]), "true");
        assert_eq!(call(&s, "add", &[Object::Integer(2)]), "{1, 2}");
        assert_eq!(call(&s, "contains", &[Object::Float(2.0)]), "true");
    }

    #[test]
    fn string_methods() {
        let s = Object::string("a b  c");
        assert_eq!(call(&s, "upper", &[]), "A B  C");
        assert_eq!(call(&s, "split", &[]), "[\"a\", \"b\", \"c\"]");
        assert_eq!(call(&s, "split", &[Object::string(" ")]), "[\"a\", \"b\", \"\", \"c\"]");
        assert_eq!(call(&s, "contains", &[Object::string("b ")]), "true");
        assert_eq!(
            call(&s, "contains", &[Object::Integer(1)]),
            "type error: string.contains expected a string (INTEGER given)"
        );
    }

    #[test]
    fn duration_methods() {
        let d = Object::Duration(90 * duration::MINUTE);
        assert_eq!(call(&d, "hours", &[]), "1.5");
        assert_eq!(call(&d, "milliseconds", &[]), "5400000");
        assert_eq!(call(&d, "tostring", &[]), "1h30m0s");
        assert_eq!(
            call(&d, "round", &[Object::Duration(duration::HOUR)]),
            "2h0m0s"
        );
        assert_eq!(
            call(&d, "round", &[Object::Integer(1)]),
            "type error: duration.round expected a duration (INTEGER given)"
        );
        assert_eq!(
            call(&d, "abs", &[Object::Null]),
            "wrong number of arguments. got=1, want=0"
        );
    }

    #[test]
    fn unknown_attributes() {
        assert_eq!(
            call(&Object::Integer(1), "foo", &[]),
            "type error: INTEGER object has no attribute \"foo\""
        );
        assert_eq!(
            call(&Object::string("x"), "nope", &[]),
            "type error: STRING object has no attribute \"nope\""
        );
    }
}
