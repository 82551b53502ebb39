//! Lexer error types.

use tam_ir::Span;
use thiserror::Error;

/// A lexer error: what went wrong and where.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("{kind}")]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
}

impl LexError {
    pub fn new(kind: LexErrorKind, span: Span) -> Self {
        LexError { kind, span }
    }
}

/// What kind of lexer error occurred.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum LexErrorKind {
    #[error("unterminated string literal")]
    UnterminatedString,

    #[error("invalid escape sequence `\\{0}` in string literal")]
    InvalidEscape(char),

    #[error("invalid unicode escape in string literal")]
    InvalidUnicodeEscape,

    #[error("integer literal `{0}` is out of range")]
    IntOverflow(String),

    #[error("invalid float literal `{0}`")]
    InvalidFloat(String),

    #[error("unexpected character `{0}`")]
    UnexpectedChar(char),
}
