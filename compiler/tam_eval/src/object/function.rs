//! Callable objects (script closures and native builtins) and modules.

use std::fmt;

use rustc_hash::FxHashMap;
use tam_ir::{Name, ParamRange, SharedArena, StmtRange};

use super::Object;
use crate::context::Context;
use crate::environment::Environment;
use crate::print_handler::PrintHandlerImpl;

/// A closure: parameters, body and the environment it was created in.
///
/// The body lives in `arena`, which the function keeps alive on its own,
/// so closures outlive the `Program` that defined them.
pub struct Function {
    name: Option<Name>,
    params: ParamRange,
    body: StmtRange,
    arena: SharedArena,
    env: Environment,
}

impl Function {
    pub(crate) fn new(
        name: Option<Name>,
        params: ParamRange,
        body: StmtRange,
        arena: SharedArena,
        env: Environment,
    ) -> Self {
        Function {
            name,
            params,
            body,
            arena,
            env,
        }
    }

    pub fn name(&self) -> Option<&Name> {
        self.name.as_ref()
    }

    pub fn params(&self) -> &[Name] {
        self.arena.get_params(self.params)
    }

    pub(crate) fn body(&self) -> StmtRange {
        self.body
    }

    pub(crate) fn arena(&self) -> &SharedArena {
        &self.arena
    }

    /// The captured defining environment.
    pub fn env(&self) -> &Environment {
        &self.env
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("name", &self.name)
            .field("params", &self.params())
            .finish_non_exhaustive()
    }
}

/// What a builtin sees of the running evaluation.
pub struct CallContext<'a> {
    ctx: &'a Context,
    output: &'a PrintHandlerImpl,
}

impl<'a> CallContext<'a> {
    pub fn new(ctx: &'a Context, output: &'a PrintHandlerImpl) -> Self {
        CallContext { ctx, output }
    }

    /// Cancellation context of the evaluation; blocking builtins must
    /// honour it.
    pub fn context(&self) -> &Context {
        self.ctx
    }

    /// Destination for script output.
    pub fn output(&self) -> &PrintHandlerImpl {
        self.output
    }
}

/// Signature every native callable satisfies.
pub type BuiltinFn = dyn Fn(&CallContext<'_>, &[Object]) -> Object;

/// A named native callable.
pub struct Builtin {
    name: Name,
    func: Box<BuiltinFn>,
}

impl Builtin {
    pub fn new(
        name: impl Into<Name>,
        func: impl Fn(&CallContext<'_>, &[Object]) -> Object + 'static,
    ) -> Self {
        Builtin {
            name: name.into(),
            func: Box::new(func),
        }
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    #[inline]
    pub fn call(&self, cx: &CallContext<'_>, args: &[Object]) -> Object {
        (self.func)(cx, args)
    }
}

impl fmt::Debug for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Builtin({})", self.name)
    }
}

/// A named bag of members reached through attribute access,
/// e.g. `duration.parse`.
#[derive(Debug)]
pub struct Module {
    name: Name,
    members: FxHashMap<Name, Object>,
}

impl Module {
    pub fn new(name: impl Into<Name>) -> Self {
        Module {
            name: name.into(),
            members: FxHashMap::default(),
        }
    }

    /// Add a native function member named `<module>.<name>`.
    #[must_use]
    pub fn function(
        mut self,
        name: &str,
        func: impl Fn(&CallContext<'_>, &[Object]) -> Object + 'static,
    ) -> Self {
        let qualified = format!("{}.{name}", self.name);
        self.members
            .insert(Name::new(name), Object::builtin(qualified, func));
        self
    }

    /// Add an arbitrary member value.
    #[must_use]
    pub fn member(mut self, name: &str, value: Object) -> Self {
        self.members.insert(Name::new(name), value);
        self
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn get(&self, name: &str) -> Option<Object> {
        self.members.get(name).cloned()
    }

    /// Member names, sorted.
    pub fn member_names(&self) -> Vec<Name> {
        let mut names: Vec<Name> = self.members.keys().cloned().collect();
        names.sort();
        names
    }
}
