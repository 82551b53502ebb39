//! `InterpreterBuilder` for creating configured `Interpreter` instances.

use super::Interpreter;
use crate::builtins::BuiltinRegistry;
use crate::print_handler::{stdout_handler, SharedPrintHandler};

/// Nested call limit used when none is configured.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 10_000;

/// Builder for `Interpreter`.
///
/// Defaults: the standard builtin registry, stdout output and a call
/// depth limit of `DEFAULT_MAX_CALL_DEPTH`.
#[derive(Default)]
pub struct InterpreterBuilder {
    registry: Option<BuiltinRegistry>,
    print_handler: Option<SharedPrintHandler>,
    max_call_depth: Option<usize>,
}

impl InterpreterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builtins consulted after the scope chain.
    #[must_use]
    pub fn registry(mut self, registry: BuiltinRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Destination of `print` output.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    /// Maximum number of nested function calls before evaluation fails
    /// with a recursion error.
    #[must_use]
    pub fn max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = Some(depth);
        self
    }

    pub fn build(self) -> Interpreter {
        Interpreter {
            registry: self.registry.unwrap_or_else(BuiltinRegistry::standard),
            print_handler: self.print_handler.unwrap_or_else(stdout_handler),
            max_call_depth: self.max_call_depth.unwrap_or(DEFAULT_MAX_CALL_DEPTH),
        }
    }
}
