//! Token cursor for navigating the token stream.

use std::mem;

use crate::ParseError;
use tam_ir::{Name, Span, Token, TokenKind, TokenList};

/// Position in a `TokenList` plus lookahead and consumption helpers.
///
/// The lexer always ends the list with `Eof`; reading past it keeps
/// returning that `Eof`.
pub struct Cursor<'a> {
    tokens: &'a TokenList,
    eof: Token,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(tokens: &'a TokenList) -> Self {
        let end = tokens
            .get(tokens.len().saturating_sub(1))
            .map_or(Span::DUMMY, |t| Span::new(t.span.end, t.span.end));
        Cursor {
            tokens,
            eof: Token::new(TokenKind::Eof, end),
            pos: 0,
        }
    }

    #[inline]
    pub fn current(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or(&self.eof)
    }

    #[inline]
    pub fn current_kind(&self) -> &TokenKind {
        &self.current().kind
    }

    #[inline]
    pub fn current_span(&self) -> Span {
        self.current().span
    }

    /// Span of the most recently consumed token.
    #[inline]
    pub fn previous_span(&self) -> Span {
        match self.pos.checked_sub(1).and_then(|i| self.tokens.get(i)) {
            Some(token) => token.span,
            None => Span::DUMMY,
        }
    }

    #[inline]
    pub fn peek_next_kind(&self) -> &TokenKind {
        self.tokens
            .get(self.pos + 1)
            .map_or(&self.eof.kind, |t| &t.kind)
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        matches!(self.current_kind(), TokenKind::Eof)
    }

    /// Compare by variant only, ignoring literal payloads.
    #[inline]
    pub fn check(&self, kind: &TokenKind) -> bool {
        mem::discriminant(self.current_kind()) == mem::discriminant(kind)
    }

    pub fn advance(&mut self) -> &Token {
        let current = self.pos;
        if current < self.tokens.len() {
            self.pos += 1;
        }
        self.tokens.get(current).unwrap_or(&self.eof)
    }

    /// Consume the token if it matches; report whether it did.
    pub fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume a token of `kind` or fail with `expected ..., found ...`.
    pub fn expect(&mut self, kind: &TokenKind) -> Result<Span, ParseError> {
        if self.check(kind) {
            Ok(self.advance().span)
        } else {
            Err(self.make_expect_error(&format!("`{}`", kind.symbol())))
        }
    }

    pub fn expect_ident(&mut self) -> Result<(Name, Span), ParseError> {
        let name = match self.current_kind() {
            TokenKind::Ident(name) => name.clone(),
            _ => return Err(self.make_expect_error("identifier")),
        };
        let span = self.advance().span;
        Ok((name, span))
    }

    #[cold]
    #[inline(never)]
    pub fn make_expect_error(&self, what: &str) -> ParseError {
        ParseError::expected(what, self.current_kind(), self.current_span())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn advance_stops_at_eof() {
        let tokens = tam_lexer::lex("a").unwrap();
        let mut cursor = Cursor::new(&tokens);
        cursor.advance();
        cursor.advance();
        cursor.advance();
        assert!(cursor.is_at_end());
        assert_eq!(cursor.current_span(), Span::new(1, 1));
    }

    #[test]
    fn check_ignores_payload() {
        let tokens = tam_lexer::lex("42").unwrap();
        let cursor = Cursor::new(&tokens);
        assert!(cursor.check(&TokenKind::Int(0)));
        assert!(!cursor.check(&TokenKind::Float(0)));
    }

    #[test]
    fn expect_reports_found_token() {
        let tokens = tam_lexer::lex("let").unwrap();
        let mut cursor = Cursor::new(&tokens);
        let err = cursor.expect(&TokenKind::LParen).unwrap_err();
        assert_eq!(err.message, "expected `(`, found `let`");
    }
}
