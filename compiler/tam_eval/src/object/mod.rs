//! Runtime values.
//!
//! `Object` is a cheap-to-clone handle. Scalars are stored inline;
//! containers live in a shared `Heap` cell so mutation through one
//! handle is visible through every other.
//!
//! # Factory methods
//! Containers must be built with `Object::array`, `Object::hash` and
//! `Object::set`, which are the only paths to a `Heap`.

pub mod duration;
mod function;
mod hash_key;
mod heap;

use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use tam_stack::ensure_sufficient_stack;

pub use function::{Builtin, BuiltinFn, CallContext, Function, Module};
pub use hash_key::HashKey;
pub(crate) use hash_key::{compare_int_float, int_equals_float};
pub use heap::Heap;

use crate::errors::EvalError;

/// A key/value pair stored in a Hash. The original key object is kept
/// so `keys()` and inspection can return it.
#[derive(Clone, Debug)]
pub struct HashPair {
    pub key: Object,
    pub value: Object,
}

/// Storage of a Hash object.
pub type HashPairs = FxHashMap<HashKey, HashPair>;

/// Storage of a Set object: key to the stored element.
pub type SetItems = FxHashMap<HashKey, Object>;

/// Type tag of an object.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ObjectType {
    Integer,
    Float,
    String,
    Boolean,
    Null,
    Array,
    Hash,
    Set,
    Function,
    Builtin,
    Error,
    Duration,
    Module,
}

impl ObjectType {
    /// Upper-case name used in error messages (`INTEGER`).
    pub fn as_str(self) -> &'static str {
        match self {
            ObjectType::Integer => "INTEGER",
            ObjectType::Float => "FLOAT",
            ObjectType::String => "STRING",
            ObjectType::Boolean => "BOOLEAN",
            ObjectType::Null => "NULL",
            ObjectType::Array => "ARRAY",
            ObjectType::Hash => "HASH",
            ObjectType::Set => "SET",
            ObjectType::Function => "FUNCTION",
            ObjectType::Builtin => "BUILTIN",
            ObjectType::Error => "ERROR",
            ObjectType::Duration => "DURATION",
            ObjectType::Module => "MODULE",
        }
    }

    /// Lower-case name returned by the `type()` builtin (`integer`).
    pub fn script_name(self) -> &'static str {
        match self {
            ObjectType::Integer => "integer",
            ObjectType::Float => "float",
            ObjectType::String => "string",
            ObjectType::Boolean => "boolean",
            ObjectType::Null => "null",
            ObjectType::Array => "array",
            ObjectType::Hash => "hash",
            ObjectType::Set => "set",
            ObjectType::Function => "function",
            ObjectType::Builtin => "builtin",
            ObjectType::Error => "error",
            ObjectType::Duration => "duration",
            ObjectType::Module => "module",
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A runtime value.
#[derive(Clone)]
pub enum Object {
    Integer(i64),
    Float(f64),
    String(Rc<str>),
    Boolean(bool),
    Null,
    Array(Heap<Vec<Object>>),
    Hash(Heap<HashPairs>),
    Set(Heap<SetItems>),
    Function(Rc<Function>),
    Builtin(Rc<Builtin>),
    Error(Rc<EvalError>),
    /// Signed nanoseconds.
    Duration(i64),
    Module(Rc<Module>),
}

impl Object {
    // Factories

    #[inline]
    pub fn string(s: impl Into<Rc<str>>) -> Self {
        Object::String(s.into())
    }

    pub fn array(items: Vec<Object>) -> Self {
        Object::Array(Heap::new(items))
    }

    pub fn hash(pairs: HashPairs) -> Self {
        Object::Hash(Heap::new(pairs))
    }

    pub fn set(items: SetItems) -> Self {
        Object::Set(Heap::new(items))
    }

    pub fn builtin(
        name: impl Into<tam_ir::Name>,
        func: impl Fn(&CallContext<'_>, &[Object]) -> Object + 'static,
    ) -> Self {
        Object::Builtin(Rc::new(Builtin::new(name, func)))
    }

    pub fn module(module: Module) -> Self {
        Object::Module(Rc::new(module))
    }

    pub fn error(err: EvalError) -> Self {
        Object::Error(Rc::new(err))
    }

    // Queries

    pub fn kind(&self) -> ObjectType {
        match self {
            Object::Integer(_) => ObjectType::Integer,
            Object::Float(_) => ObjectType::Float,
            Object::String(_) => ObjectType::String,
            Object::Boolean(_) => ObjectType::Boolean,
            Object::Null => ObjectType::Null,
            Object::Array(_) => ObjectType::Array,
            Object::Hash(_) => ObjectType::Hash,
            Object::Set(_) => ObjectType::Set,
            Object::Function(_) => ObjectType::Function,
            Object::Builtin(_) => ObjectType::Builtin,
            Object::Error(_) => ObjectType::Error,
            Object::Duration(_) => ObjectType::Duration,
            Object::Module(_) => ObjectType::Module,
        }
    }

    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.kind().as_str()
    }

    /// Only `null` and `false` are falsy.
    #[inline]
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Object::Null | Object::Boolean(false))
    }

    #[inline]
    pub fn is_error(&self) -> bool {
        matches!(self, Object::Error(_))
    }

    pub fn as_error(&self) -> Option<&EvalError> {
        match self {
            Object::Error(err) => Some(err),
            _ => None,
        }
    }

    /// Key for Hash/Set storage; `None` for unhashable types.
    #[inline]
    pub fn hash_key(&self) -> Option<HashKey> {
        HashKey::of(self)
    }

    /// Value equality. Integers and floats compare numerically,
    /// containers structurally, callables and modules by identity.
    ///
    /// A pair of containers met again while already being compared is
    /// treated as equal, so self-referencing containers terminate.
    pub fn equals(&self, other: &Object) -> bool {
        self.equals_in(other, &mut Vec::new())
    }

    #[allow(clippy::float_cmp)]
    fn equals_in(&self, other: &Object, active: &mut Vec<(*const (), *const ())>) -> bool {
        match (self, other) {
            (Object::Integer(a), Object::Integer(b)) => a == b,
            (Object::Float(a), Object::Float(b)) => a == b,
            (Object::Integer(a), Object::Float(b)) | (Object::Float(b), Object::Integer(a)) => {
                int_equals_float(*a, *b)
            }
            (Object::String(a), Object::String(b)) => a == b,
            (Object::Boolean(a), Object::Boolean(b)) => a == b,
            (Object::Null, Object::Null) => true,
            (Object::Duration(a), Object::Duration(b)) => a == b,
            (Object::Array(a), Object::Array(b)) => {
                if a.ptr_eq(b) {
                    return true;
                }
                nested(active, (a.addr(), b.addr()), true, |active| {
                    let (a, b) = (a.borrow(), b.borrow());
                    a.len() == b.len()
                        && a.iter().zip(b.iter()).all(|(x, y)| x.equals_in(y, active))
                })
            }
            (Object::Hash(a), Object::Hash(b)) => {
                if a.ptr_eq(b) {
                    return true;
                }
                nested(active, (a.addr(), b.addr()), true, |active| {
                    let (a, b) = (a.borrow(), b.borrow());
                    a.len() == b.len()
                        && a.iter().all(|(key, pair)| {
                            b.get(key)
                                .is_some_and(|other| pair.value.equals_in(&other.value, active))
                        })
                })
            }
            (Object::Set(a), Object::Set(b)) => {
                if a.ptr_eq(b) {
                    return true;
                }
                let (a, b) = (a.borrow(), b.borrow());
                a.len() == b.len() && a.keys().all(|key| b.contains_key(key))
            }
            (Object::Function(a), Object::Function(b)) => Rc::ptr_eq(a, b),
            (Object::Builtin(a), Object::Builtin(b)) => Rc::ptr_eq(a, b),
            (Object::Module(a), Object::Module(b)) => Rc::ptr_eq(a, b),
            (Object::Error(a), Object::Error(b)) => a.message() == b.message(),
            _ => false,
        }
    }

    // Rendering

    /// Source-like rendering: strings quoted, containers recursive.
    ///
    /// A container that contains itself renders the inner occurrence as
    /// `[...]` or `{...}`.
    pub fn inspect(&self) -> String {
        self.inspect_in(&mut Vec::new())
    }

    fn inspect_in(&self, active: &mut Vec<*const ()>) -> String {
        match self {
            Object::Integer(n) => n.to_string(),
            Object::Float(f) => format!("{f:?}"),
            Object::String(s) => format!("{:?}", &**s),
            Object::Boolean(b) => b.to_string(),
            Object::Null => "null".to_string(),
            Object::Array(items) => nested(active, items.addr(), "[...]".to_string(), |active| {
                let parts: Vec<String> =
                    items.borrow().iter().map(|item| item.inspect_in(active)).collect();
                format!("[{}]", parts.join(", "))
            }),
            Object::Hash(pairs) => nested(active, pairs.addr(), "{...}".to_string(), |active| {
                let mut parts: Vec<(String, String)> = pairs
                    .borrow()
                    .values()
                    .map(|pair| (pair.key.inspect(), pair.value.inspect_in(active)))
                    .collect();
                parts.sort();
                let parts: Vec<String> = parts
                    .into_iter()
                    .map(|(k, v)| format!("{k}: {v}"))
                    .collect();
                format!("{{{}}}", parts.join(", "))
            }),
            Object::Set(items) => {
                let items = items.borrow();
                if items.is_empty() {
                    return "set()".to_string();
                }
                let mut parts: Vec<String> = items.values().map(Object::inspect).collect();
                parts.sort();
                format!("{{{}}}", parts.join(", "))
            }
            Object::Function(func) => {
                let params: Vec<&str> = func.params().iter().map(|p| p.as_str()).collect();
                match func.name() {
                    Some(name) => format!("func {name}({})", params.join(", ")),
                    None => format!("func({})", params.join(", ")),
                }
            }
            Object::Builtin(builtin) => format!("builtin({})", builtin.name()),
            Object::Error(err) => format!("error({})", err.message()),
            Object::Duration(d) => format!("duration({})", duration::format(*d)),
            Object::Module(module) => format!("module({})", module.name()),
        }
    }

    /// Text used by `print` and `string()`: strings bare, errors as their
    /// message, durations in clock notation, everything else as `inspect`.
    pub fn display_value(&self) -> String {
        match self {
            Object::String(s) => s.to_string(),
            Object::Error(err) => err.message().to_string(),
            Object::Duration(d) => duration::format(*d),
            other => other.inspect(),
        }
    }
}

/// Run `walk` with `id` marked active, or return `revisited` when `id` is
/// already being walked further up. Deep nesting grows the stack on demand.
fn nested<K: PartialEq, R>(
    active: &mut Vec<K>,
    id: K,
    revisited: R,
    walk: impl FnOnce(&mut Vec<K>) -> R,
) -> R {
    if active.contains(&id) {
        return revisited;
    }
    active.push(id);
    let result = ensure_sufficient_stack(|| walk(active));
    active.pop();
    result
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_value())
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inspect())
    }
}

impl From<EvalError> for Object {
    fn from(err: EvalError) -> Self {
        Object::error(err)
    }
}

impl From<i64> for Object {
    fn from(n: i64) -> Self {
        Object::Integer(n)
    }
}

impl From<f64> for Object {
    fn from(f: f64) -> Self {
        Object::Float(f)
    }
}

impl From<bool> for Object {
    fn from(b: bool) -> Self {
        Object::Boolean(b)
    }
}

impl From<&str> for Object {
    fn from(s: &str) -> Self {
        Object::string(s)
    }
}

impl From<String> for Object {
    fn from(s: String) -> Self {
        Object::string(s)
    }
}

impl From<Vec<Object>> for Object {
    fn from(items: Vec<Object>) -> Self {
        Object::array(items)
    }
}

/// Build Hash storage from key/value objects, rejecting unhashable keys.
pub fn hash_pairs<I>(entries: I) -> Result<HashPairs, EvalError>
where
    I: IntoIterator<Item = (Object, Object)>,
{
    let mut pairs = HashPairs::default();
    for (key, value) in entries {
        let hash_key = key
            .hash_key()
            .ok_or_else(|| crate::errors::unhashable(&key))?;
        pairs.insert(hash_key, HashPair { key, value });
    }
    Ok(pairs)
}

/// Hash pairs ordered by the inspect text of their keys.
pub fn sorted_pairs(pairs: &HashPairs) -> Vec<HashPair> {
    let mut entries: Vec<(String, HashPair)> = pairs
        .values()
        .map(|pair| (pair.key.inspect(), pair.clone()))
        .collect();
    entries.sort_by(|a, b| a.0.cmp(&b.0));
    entries.into_iter().map(|(_, pair)| pair).collect()
}

/// Set elements ordered by their inspect text.
pub fn sorted_items(items: &SetItems) -> Vec<Object> {
    let mut entries: Vec<(String, Object)> = items
        .values()
        .map(|item| (item.inspect(), item.clone()))
        .collect();
    entries.sort_by(|a, b| a.0.cmp(&b.0));
    entries.into_iter().map(|(_, item)| item).collect()
}

/// Build Set storage from elements, rejecting unhashable ones.
/// Later duplicates are dropped.
pub fn set_items<I>(elements: I) -> Result<SetItems, EvalError>
where
    I: IntoIterator<Item = Object>,
{
    let mut items = SetItems::default();
    for element in elements {
        let key = element
            .hash_key()
            .ok_or_else(|| crate::errors::unhashable(&element))?;
        items.entry(key).or_insert(element);
    }
    Ok(items)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn truthiness() {
        assert!(Object::Integer(0).is_truthy());
        assert!(Object::string("").is_truthy());
        assert!(Object::array(vec![]).is_truthy());
        assert!(!Object::Null.is_truthy());
        assert!(!Object::Boolean(false).is_truthy());
    }

    #[test]
    fn numeric_equality_crosses_types() {
        assert!(Object::Float(1.0).equals(&Object::Integer(1)));
        assert!(!Object::Float(1.5).equals(&Object::Integer(1)));
        assert!(!Object::Integer(1).equals(&Object::string("1")));
    }

    #[test]
    fn containers_compare_structurally() {
        let a = Object::array(vec![Object::Integer(1), Object::string("x")]);
        let b = Object::array(vec![Object::Float(1.0), Object::string("x")]);
        assert!(a.equals(&b));

        let h1 = Object::hash(hash_pairs([(Object::string("k"), Object::Integer(1))]).unwrap());
        let h2 = Object::hash(hash_pairs([(Object::string("k"), Object::Integer(1))]).unwrap());
        assert!(h1.equals(&h2));
    }

    #[test]
    fn arrays_share_storage_between_handles() {
        let a = Object::array(vec![]);
        let b = a.clone();
        if let Object::Array(items) = &a {
            items.borrow_mut().push(Object::Integer(7));
        }
        assert_eq!(b.inspect(), "[7]");
    }

    #[test]
    fn inspect_and_display() {
        assert_eq!(Object::string("hi").inspect(), "\"hi\"");
        assert_eq!(Object::string("hi").display_value(), "hi");
        assert_eq!(Object::Float(8.0).inspect(), "8.0");
        assert_eq!(Object::Null.inspect(), "null");
        assert_eq!(Object::Duration(1_500_000_000).inspect(), "duration(1.5s)");
        assert_eq!(Object::set(SetItems::default()).inspect(), "set()");
    }

    #[test]
    fn hash_and_set_inspect_sorted() {
        let hash = Object::hash(
            hash_pairs([
                (Object::string("b"), Object::Integer(2)),
                (Object::string("a"), Object::Integer(1)),
            ])
            .unwrap(),
        );
        assert_eq!(hash.inspect(), "{\"a\": 1, \"b\": 2}");

        let set = Object::set(set_items([3, 1, 2, 1].map(Object::Integer)).unwrap());
        assert_eq!(set.inspect(), "{1, 2, 3}");
    }

    #[test]
    fn self_referencing_containers_terminate() {
        let a = Object::array(vec![Object::Integer(1)]);
        if let Object::Array(items) = &a {
            items.borrow_mut().push(a.clone());
        }
        assert_eq!(a.inspect(), "[1, [...]]");

        let b = Object::array(vec![Object::Integer(1)]);
        if let Object::Array(items) = &b {
            items.borrow_mut().push(b.clone());
        }
        assert!(a.equals(&b));
        assert!(a.equals(&a.clone()));

        let h = Object::hash(HashPairs::default());
        if let Object::Hash(pairs) = &h {
            let key = Object::string("self");
            pairs.borrow_mut().insert(
                key.hash_key().unwrap(),
                HashPair { key, value: h.clone() },
            );
        }
        assert_eq!(h.inspect(), "{\"self\": {...}}");
    }

    #[test]
    fn unhashable_keys_are_rejected() {
        let err = hash_pairs([(Object::array(vec![]), Object::Null)]).unwrap_err();
        assert_eq!(err.message(), "type error: unhashable type: ARRAY");
    }

    #[test]
    fn type_names() {
        assert_eq!(Object::Integer(1).type_name(), "INTEGER");
        assert_eq!(Object::Duration(1).kind().script_name(), "duration");
    }
}
