//! Recursive descent parser for Tamarin.
//!
//! Produces a flat AST in an `ExprArena`, wrapped up as a `Program`.

mod cursor;
mod error;
mod grammar;

#[cfg(test)]
mod tests;

pub use cursor::Cursor;
pub use error::ParseError;

use tam_ir::{Expr, ExprArena, ExprId, Program, SharedArena, Span, Stmt, StmtId, Token, TokenKind};

/// Parser state.
pub struct Parser<'a> {
    cursor: Cursor<'a>,
    arena: ExprArena,
    /// Number of enclosing loop bodies; reset inside function literals.
    loop_depth: u32,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a tam_ir::TokenList, source_len: usize) -> Self {
        Parser {
            cursor: Cursor::new(tokens),
            arena: ExprArena::with_capacity(source_len),
            loop_depth: 0,
        }
    }

    // Cursor delegation

    #[inline]
    fn current_kind(&self) -> &TokenKind {
        self.cursor.current_kind()
    }

    #[inline]
    fn current_span(&self) -> Span {
        self.cursor.current_span()
    }

    #[inline]
    fn previous_span(&self) -> Span {
        self.cursor.previous_span()
    }

    #[inline]
    fn peek_next_kind(&self) -> &TokenKind {
        self.cursor.peek_next_kind()
    }

    #[inline]
    fn is_at_end(&self) -> bool {
        self.cursor.is_at_end()
    }

    #[inline]
    fn check(&self, kind: &TokenKind) -> bool {
        self.cursor.check(kind)
    }

    #[inline]
    fn advance(&mut self) -> &Token {
        self.cursor.advance()
    }

    #[inline]
    fn eat(&mut self, kind: &TokenKind) -> bool {
        self.cursor.eat(kind)
    }

    #[inline]
    fn expect(&mut self, kind: &TokenKind) -> Result<Span, ParseError> {
        self.cursor.expect(kind)
    }

    #[inline]
    fn expect_ident(&mut self) -> Result<(tam_ir::Name, Span), ParseError> {
        self.cursor.expect_ident()
    }

    #[inline]
    fn error_expected(&self, what: &str) -> ParseError {
        self.cursor.make_expect_error(what)
    }

    // Arena helpers

    #[inline]
    fn alloc(&mut self, expr: Expr) -> ExprId {
        self.arena.alloc_expr(expr)
    }

    #[inline]
    fn alloc_stmt(&mut self, stmt: Stmt) -> StmtId {
        self.arena.alloc_stmt(stmt)
    }

    #[inline]
    fn span_of(&self, id: ExprId) -> Span {
        self.arena.get_expr(id).span
    }

    /// Span from `start` to the end of the last consumed token.
    #[inline]
    fn span_from(&self, start: Span) -> Span {
        start.merge(self.previous_span())
    }

    /// Parse the whole token stream into a `Program`.
    pub fn parse_program(mut self) -> Result<Program, ParseError> {
        let mut statements = Vec::new();
        while !self.is_at_end() {
            statements.push(self.parse_statement()?);
        }
        let range = self.arena.alloc_stmt_list(statements);
        Ok(Program::new(SharedArena::new(self.arena), range))
    }
}

/// Lex and parse `source` into a `Program`.
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn parse(source: &str) -> Result<Program, ParseError> {
    let tokens = tam_lexer::lex(source)?;
    let program = Parser::new(&tokens, source.len()).parse_program()?;
    tracing::debug!(
        statements = program.statements.len(),
        exprs = program.arena.expr_count(),
        "parsed program"
    );
    Ok(program)
}
