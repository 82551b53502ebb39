//! Parse error type.

use tam_ir::{Span, TokenKind};
use tam_lexer::LexError;
use thiserror::Error;

/// The first error the parser hit. Parsing stops there.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("{message}")]
pub struct ParseError {
    pub message: String,
    pub span: Span,
}

impl ParseError {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        ParseError {
            message: message.into(),
            span,
        }
    }

    /// `expected <what>, found <token>`
    #[cold]
    pub(crate) fn expected(what: &str, found: &TokenKind, span: Span) -> Self {
        ParseError::new(format!("expected {what}, found {}", found.describe()), span)
    }

    /// 1-based line and column of the error start within `source`.
    pub fn line_col(&self, source: &str) -> (usize, usize) {
        let offset = (self.span.start as usize).min(source.len());
        let before = source.get(..offset).unwrap_or(source);
        let line = before.matches('\n').count() + 1;
        let col = before
            .rsplit('\n')
            .next()
            .map_or(0, |last| last.chars().count())
            + 1;
        (line, col)
    }
}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        ParseError::new(err.kind.to_string(), err.span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tam_lexer::LexErrorKind;

    #[test]
    fn line_col_counts_from_one() {
        let source = "let a = 1;\nlet b = ;";
        let err = ParseError::new("boom", Span::new(19, 20));
        assert_eq!(err.line_col(source), (2, 9));
    }

    #[test]
    fn lex_errors_keep_their_span() {
        let lex = LexError::new(LexErrorKind::UnexpectedChar('@'), Span::new(3, 4));
        let err = ParseError::from(lex);
        assert_eq!(err.message, "unexpected character `@`");
        assert_eq!(err.span, Span::new(3, 4));
    }
}
