//! Grammar productions.
//!
//! - this module: statements and blocks
//! - [`expr`]: expressions, from assignment down to primaries
//!
//! Semicolons after statements are optional; newlines carry no meaning.

mod expr;

use crate::{ParseError, Parser};
use tam_ir::{ExprId, ExprKind, Stmt, StmtId, StmtKind, StmtRange, TokenKind};

/// `(init, condition, post)` of a loop header.
type ForHeader = (Option<StmtId>, Option<ExprId>, Option<ExprId>);

impl Parser<'_> {
    /// Parse one statement, consuming a trailing `;` if present.
    pub(crate) fn parse_statement(&mut self) -> Result<StmtId, ParseError> {
        let start = self.current_span();
        let kind = match self.current_kind() {
            TokenKind::Let => self.parse_let()?,
            TokenKind::Return => self.parse_return()?,
            TokenKind::Break | TokenKind::Continue => self.parse_loop_jump()?,
            TokenKind::For => self.parse_for()?,
            TokenKind::Func if matches!(self.peek_next_kind(), TokenKind::Ident(_)) => {
                self.parse_func_decl()?
            }
            _ => StmtKind::Expr(self.parse_expr()?),
        };
        self.eat(&TokenKind::Semicolon);
        let span = self.span_from(start);
        Ok(self.alloc_stmt(Stmt::new(kind, span)))
    }

    /// `let name = value`
    fn parse_let(&mut self) -> Result<StmtKind, ParseError> {
        self.expect(&TokenKind::Let)?;
        let (name, _) = self.expect_ident()?;
        self.expect(&TokenKind::Eq)?;
        let value = self.parse_expr()?;
        Ok(StmtKind::Let { name, value })
    }

    /// `return` with an optional value.
    fn parse_return(&mut self) -> Result<StmtKind, ParseError> {
        self.expect(&TokenKind::Return)?;
        let bare = matches!(
            self.current_kind(),
            TokenKind::Semicolon | TokenKind::RBrace | TokenKind::Eof
        );
        if bare {
            return Ok(StmtKind::Return(None));
        }
        Ok(StmtKind::Return(Some(self.parse_expr()?)))
    }

    /// `break` / `continue`, only valid inside a loop body.
    fn parse_loop_jump(&mut self) -> Result<StmtKind, ParseError> {
        let span = self.current_span();
        let is_break = self.check(&TokenKind::Break);
        self.advance();
        let keyword = if is_break { "break" } else { "continue" };
        if self.loop_depth == 0 {
            return Err(ParseError::new(
                format!("`{keyword}` outside of a loop"),
                span,
            ));
        }
        Ok(if is_break {
            StmtKind::Break
        } else {
            StmtKind::Continue
        })
    }

    /// `func name(params) { body }`
    fn parse_func_decl(&mut self) -> Result<StmtKind, ParseError> {
        let func = self.parse_function_literal()?;
        match &self.arena.get_expr(func).kind {
            ExprKind::Function {
                name: Some(name), ..
            } => Ok(StmtKind::FuncDecl {
                name: name.clone(),
                func,
            }),
            _ => Err(ParseError::new(
                "expected a function name",
                self.span_of(func),
            )),
        }
    }

    /// The three loop forms:
    ///
    /// - `for { ... }`
    /// - `for (cond) { ... }`
    /// - `for (init; cond; post) { ... }`, each clause optional
    fn parse_for(&mut self) -> Result<StmtKind, ParseError> {
        self.expect(&TokenKind::For)?;

        let (init, condition, post) = if self.check(&TokenKind::LBrace) {
            (None, None, None)
        } else {
            self.expect(&TokenKind::LParen)?;
            self.parse_for_header()?
        };

        let body = self.parse_loop_body()?;
        Ok(StmtKind::For {
            init,
            condition,
            post,
            body,
        })
    }

    /// Everything after `for (` up to and including `)`.
    fn parse_for_header(&mut self) -> Result<ForHeader, ParseError> {
        // `for (;` starts a C-style header with no init.
        if self.eat(&TokenKind::Semicolon) {
            return self.parse_for_clauses(None);
        }

        if self.check(&TokenKind::Let) {
            let start = self.current_span();
            let kind = self.parse_let()?;
            let span = self.span_from(start);
            let init = self.alloc_stmt(Stmt::new(kind, span));
            self.expect(&TokenKind::Semicolon)?;
            return self.parse_for_clauses(Some(init));
        }

        let first = self.parse_expr()?;
        if self.eat(&TokenKind::Semicolon) {
            let span = self.span_of(first);
            let init = self.alloc_stmt(Stmt::new(StmtKind::Expr(first), span));
            return self.parse_for_clauses(Some(init));
        }

        self.expect(&TokenKind::RParen)?;
        Ok((None, Some(first), None))
    }

    /// `cond; post)` of a C-style header, after the init clause.
    fn parse_for_clauses(&mut self, init: Option<StmtId>) -> Result<ForHeader, ParseError> {
        let condition = if self.check(&TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        self.expect(&TokenKind::Semicolon)?;

        let post = if self.check(&TokenKind::RParen) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        self.expect(&TokenKind::RParen)?;

        Ok((init, condition, post))
    }

    fn parse_loop_body(&mut self) -> Result<StmtRange, ParseError> {
        self.loop_depth += 1;
        let body = self.parse_block();
        self.loop_depth -= 1;
        body
    }

    /// `{ statements }`
    pub(crate) fn parse_block(&mut self) -> Result<StmtRange, ParseError> {
        self.expect(&TokenKind::LBrace)?;
        let mut statements = Vec::new();
        while !self.check(&TokenKind::RBrace) {
            if self.is_at_end() {
                return Err(self.error_expected("`}`"));
            }
            statements.push(self.parse_statement()?);
        }
        self.expect(&TokenKind::RBrace)?;
        Ok(self.arena.alloc_stmt_list(statements))
    }
}
