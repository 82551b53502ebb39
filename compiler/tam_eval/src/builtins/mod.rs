//! Native functions visible to scripts.
//!
//! The registry is an ordinary value handed to the interpreter builder,
//! so independent interpreters can expose different builtin sets. The
//! evaluator consults it only when a name is not bound in any scope.

mod duration;
mod globals;

use std::fmt;

use rustc_hash::FxHashMap;
use tam_ir::Name;

use crate::errors::{wrong_arg_count, EvalError, EvalResult};
use crate::object::{CallContext, Module, Object};

/// Name-to-callable table consulted after the scope chain.
#[derive(Clone, Default)]
pub struct BuiltinRegistry {
    entries: FxHashMap<Name, Object>,
}

impl BuiltinRegistry {
    /// No builtins at all.
    pub fn empty() -> Self {
        Self::default()
    }

    /// `len`, `type`, `print`, `string`, `int`, `float`, `keys`,
    /// `delete`, `set`, `sleep` and the `duration` module.
    pub fn standard() -> Self {
        let mut registry = Self::empty();
        globals::register(&mut registry);
        duration::register(&mut registry);
        registry
    }

    /// Register a native function under `name`, replacing any previous entry.
    pub fn register(
        &mut self,
        name: &str,
        func: impl Fn(&CallContext<'_>, &[Object]) -> Object + 'static,
    ) -> &mut Self {
        self.entries
            .insert(Name::new(name), Object::builtin(name, func));
        self
    }

    /// Register a module under its own name.
    pub fn register_module(&mut self, module: Module) -> &mut Self {
        let name = module.name().clone();
        self.entries.insert(name, Object::module(module));
        self
    }

    pub fn get(&self, name: &str) -> Option<Object> {
        self.entries.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<Name> {
        let mut names: Vec<Name> = self.entries.keys().cloned().collect();
        names.sort();
        names
    }
}

impl fmt::Debug for BuiltinRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuiltinRegistry")
            .field("names", &self.names())
            .finish()
    }
}

// Helpers shared by builtins and bound attribute methods.

/// Exactly `want` arguments.
pub(crate) fn check_arity(args: &[Object], want: usize) -> Result<(), EvalError> {
    if args.len() == want {
        Ok(())
    } else {
        Err(wrong_arg_count(args.len(), want))
    }
}

/// Between `min` and `max` arguments, inclusive.
pub(crate) fn check_arity_range(args: &[Object], min: usize, max: usize) -> Result<(), EvalError> {
    if args.len() < min {
        Err(wrong_arg_count(args.len(), min))
    } else if args.len() > max {
        Err(wrong_arg_count(args.len(), max))
    } else {
        Ok(())
    }
}

/// Collapse a builtin's result into the object handed back to the script.
#[inline]
pub(crate) fn finish(result: EvalResult) -> Object {
    result.unwrap_or_else(Object::from)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn standard_contains_core_names() {
        let registry = BuiltinRegistry::standard();
        for name in [
            "len", "type", "print", "string", "int", "float", "keys", "delete", "set", "sleep",
            "duration",
        ] {
            assert!(registry.contains(name), "missing {name}");
        }
        assert!(matches!(registry.get("duration"), Some(Object::Module(_))));
    }

    #[test]
    fn empty_registry_and_custom_entries() {
        let mut registry = BuiltinRegistry::empty();
        assert!(registry.names().is_empty());
        registry
            .register("answer", |_, _| Object::Integer(42))
            .register_module(Module::new("host").member("version", Object::string("1.0")));
        assert_eq!(
            registry.names(),
            vec![Name::new("answer"), Name::new("host")]
        );
    }

    #[test]
    fn arity_helpers() {
        let args = [Object::Null, Object::Null];
        assert!(check_arity(&args, 2).is_ok());
        assert_eq!(
            check_arity(&args, 1).unwrap_err().message(),
            "wrong number of arguments. got=2, want=1"
        );
        assert_eq!(
            check_arity_range(&args[..0], 1, 2).unwrap_err().message(),
            "wrong number of arguments. got=0, want=1"
        );
    }
}
