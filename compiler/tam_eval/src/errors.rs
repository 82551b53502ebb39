//! Script-level error values.
//!
//! Every failure inside the evaluator becomes an `EvalError`, which scripts
//! and embedders see as `Object::Error`. The factory functions below are the
//! single source of the user-visible message formats.

use std::fmt;

use crate::context::Cancelled;
use crate::object::Object;

/// Result of an operation that can fail with a script error.
pub type EvalResult = Result<Object, EvalError>;

/// Error category; decides the message prefix.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Operand or argument of the wrong type (`type error: ...`).
    Type,
    /// Unresolved identifier (`name error: ...`).
    Name,
    /// Sequence index out of range (`index error: ...`).
    Index,
    /// Missing hash key (`key error: ...`).
    Key,
    /// Builtin or function called with bad arguments (no prefix).
    Arguments,
    /// Well-typed but invalid value (`value error: ...`).
    Value,
    /// Context cancelled or deadline exceeded (no prefix).
    Cancelled,
    /// Call depth limit reached (`recursion error: ...`).
    Recursion,
}

impl ErrorKind {
    fn prefix(self) -> &'static str {
        match self {
            ErrorKind::Type => "type error: ",
            ErrorKind::Name => "name error: ",
            ErrorKind::Index => "index error: ",
            ErrorKind::Key => "key error: ",
            ErrorKind::Value => "value error: ",
            ErrorKind::Recursion => "recursion error: ",
            ErrorKind::Arguments | ErrorKind::Cancelled => "",
        }
    }
}

/// A script error: its category and the full message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalError {
    kind: ErrorKind,
    message: String,
}

impl EvalError {
    /// Build an error; `detail` is prefixed according to `kind`.
    pub fn new(kind: ErrorKind, detail: impl fmt::Display) -> Self {
        EvalError {
            kind,
            message: format!("{}{detail}", kind.prefix()),
        }
    }

    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Full message, prefix included.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for EvalError {}

// Operators

#[cold]
pub fn unsupported_operands(op: &str, left: &Object, right: &Object) -> EvalError {
    EvalError::new(
        ErrorKind::Type,
        format_args!(
            "unsupported operand types for {op}: {} and {}",
            left.type_name(),
            right.type_name()
        ),
    )
}

#[cold]
pub fn bad_unary_operand(op: &str, operand: &Object) -> EvalError {
    EvalError::new(
        ErrorKind::Type,
        format_args!("bad operand type for unary {op}: {}", operand.type_name()),
    )
}

#[cold]
pub fn division_by_zero() -> EvalError {
    EvalError::new(ErrorKind::Value, "division by zero")
}

#[cold]
pub fn integer_overflow() -> EvalError {
    EvalError::new(ErrorKind::Value, "integer overflow")
}

// Names and calls

#[cold]
pub fn undefined_name(name: &str) -> EvalError {
    EvalError::new(ErrorKind::Name, format_args!("{name} is not defined"))
}

#[cold]
pub fn not_callable(callee: &Object) -> EvalError {
    EvalError::new(
        ErrorKind::Type,
        format_args!("{} object is not callable", callee.type_name()),
    )
}

#[cold]
pub fn wrong_arg_count(got: usize, want: usize) -> EvalError {
    EvalError::new(
        ErrorKind::Arguments,
        format_args!("wrong number of arguments. got={got}, want={want}"),
    )
}

#[cold]
pub fn unsupported_argument(builtin: &str, arg: &Object) -> EvalError {
    EvalError::new(
        ErrorKind::Arguments,
        format_args!("argument to `{builtin}` not supported, got={}", arg.type_name()),
    )
}

#[cold]
pub fn recursion_limit(max_depth: usize) -> EvalError {
    EvalError::new(
        ErrorKind::Recursion,
        format_args!("maximum call depth exceeded ({max_depth})"),
    )
}

#[cold]
pub fn cancelled(cause: Cancelled) -> EvalError {
    EvalError::new(ErrorKind::Cancelled, cause)
}

// Indexing and attributes

#[cold]
pub fn index_out_of_range(what: &str, index: i64) -> EvalError {
    EvalError::new(
        ErrorKind::Index,
        format_args!("{what} index out of range: {index}"),
    )
}

#[cold]
pub fn key_not_found(key: &Object) -> EvalError {
    EvalError::new(ErrorKind::Key, key.display_value())
}

#[cold]
pub fn unhashable(key: &Object) -> EvalError {
    EvalError::new(
        ErrorKind::Type,
        format_args!("unhashable type: {}", key.type_name()),
    )
}

#[cold]
pub fn not_subscriptable(receiver: &Object) -> EvalError {
    EvalError::new(
        ErrorKind::Type,
        format_args!("{} object is not subscriptable", receiver.type_name()),
    )
}

#[cold]
pub fn item_assignment_unsupported(receiver: &Object) -> EvalError {
    EvalError::new(
        ErrorKind::Type,
        format_args!(
            "{} object does not support item assignment",
            receiver.type_name()
        ),
    )
}

#[cold]
pub fn index_not_integer(what: &str, index: &Object) -> EvalError {
    EvalError::new(
        ErrorKind::Type,
        format_args!("{what} indices must be integers, got {}", index.type_name()),
    )
}

#[cold]
pub fn no_attribute(receiver: &Object, name: &str) -> EvalError {
    EvalError::new(
        ErrorKind::Type,
        format_args!("{} object has no attribute \"{name}\"", receiver.type_name()),
    )
}

// Values

#[cold]
pub fn invalid_duration(text: &str) -> EvalError {
    EvalError::new(ErrorKind::Value, format_args!("invalid duration {text:?}"))
}

#[cold]
pub fn expected_type(builtin: &str, expected: &str, got: &Object) -> EvalError {
    EvalError::new(
        ErrorKind::Type,
        format_args!("{builtin} expected {expected} ({} given)", got.type_name()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn prefixes_follow_kind() {
        assert_eq!(undefined_name("foobar").message(), "name error: foobar is not defined");
        assert_eq!(
            index_out_of_range("array", -4).message(),
            "index error: array index out of range: -4"
        );
        assert_eq!(
            wrong_arg_count(2, 1).message(),
            "wrong number of arguments. got=2, want=1"
        );
        assert_eq!(division_by_zero().message(), "value error: division by zero");
    }

    #[test]
    fn cancellation_messages_have_no_prefix() {
        assert_eq!(
            cancelled(Cancelled::DeadlineExceeded).message(),
            "context deadline exceeded"
        );
        assert_eq!(cancelled(Cancelled::Canceled).kind(), ErrorKind::Cancelled);
    }

    #[test]
    fn key_errors_render_strings_bare() {
        assert_eq!(key_not_found(&Object::string("bar")).message(), "key error: bar");
    }
}
