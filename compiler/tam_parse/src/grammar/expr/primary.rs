//! Primary expressions: literals, identifiers, grouping, collection
//! literals, function literals and `if`.

use std::rc::Rc;

use crate::{ParseError, Parser};
use tam_ir::{Expr, ExprId, ExprKind, MapEntry, Name, TokenKind};

impl Parser<'_> {
    pub(crate) fn parse_primary(&mut self) -> Result<ExprId, ParseError> {
        let span = self.current_span();
        let kind = match self.current_kind() {
            TokenKind::Int(n) => ExprKind::Int(*n),
            TokenKind::Float(bits) => ExprKind::Float(f64::from_bits(*bits)),
            TokenKind::String(s) => ExprKind::String(Rc::from(s.as_str())),
            TokenKind::True => ExprKind::Bool(true),
            TokenKind::False => ExprKind::Bool(false),
            TokenKind::Null => ExprKind::Null,
            TokenKind::Ident(name) => ExprKind::Ident(name.clone()),
            TokenKind::LParen => return self.parse_grouping(),
            TokenKind::LBracket => return self.parse_array_literal(),
            TokenKind::LBrace => return self.parse_brace_literal(),
            TokenKind::Func => return self.parse_function_literal(),
            TokenKind::If => return self.parse_if(),
            _ => return Err(self.error_expected("an expression")),
        };
        self.advance();
        Ok(self.alloc(Expr::new(kind, span)))
    }

    /// `( expr )`
    fn parse_grouping(&mut self) -> Result<ExprId, ParseError> {
        self.expect(&TokenKind::LParen)?;
        let inner = self.parse_expr()?;
        self.expect(&TokenKind::RParen)?;
        Ok(inner)
    }

    /// `[a, b, c]`
    fn parse_array_literal(&mut self) -> Result<ExprId, ParseError> {
        let start = self.expect(&TokenKind::LBracket)?;
        let items = self.parse_comma_list(&TokenKind::RBracket)?;
        self.expect(&TokenKind::RBracket)?;
        let range = self.arena.alloc_expr_list(items);
        let span = self.span_from(start);
        Ok(self.alloc(Expr::new(ExprKind::Array(range), span)))
    }

    /// `{}` and `{k: v, ...}` are hashes, `{a, b, ...}` is a set.
    ///
    /// The first element decides: a `:` after it makes the literal a hash.
    fn parse_brace_literal(&mut self) -> Result<ExprId, ParseError> {
        let start = self.expect(&TokenKind::LBrace)?;

        if self.eat(&TokenKind::RBrace) {
            let range = self.arena.alloc_map_entries(std::iter::empty());
            let span = self.span_from(start);
            return Ok(self.alloc(Expr::new(ExprKind::Hash(range), span)));
        }

        let first = self.parse_expr()?;
        if self.check(&TokenKind::Colon) {
            return self.finish_hash_literal(start, first);
        }

        let mut items = vec![first];
        while self.eat(&TokenKind::Comma) {
            if self.check(&TokenKind::RBrace) {
                break;
            }
            items.push(self.parse_expr()?);
        }
        self.expect(&TokenKind::RBrace)?;
        let range = self.arena.alloc_expr_list(items);
        let span = self.span_from(start);
        Ok(self.alloc(Expr::new(ExprKind::Set(range), span)))
    }

    fn finish_hash_literal(
        &mut self,
        start: tam_ir::Span,
        first_key: ExprId,
    ) -> Result<ExprId, ParseError> {
        let mut entries = Vec::new();
        let mut key = first_key;
        loop {
            self.expect(&TokenKind::Colon)?;
            let value = self.parse_expr()?;
            let span = self.span_of(key).merge(self.span_of(value));
            entries.push(MapEntry { key, value, span });

            if !self.eat(&TokenKind::Comma) || self.check(&TokenKind::RBrace) {
                break;
            }
            key = self.parse_expr()?;
        }
        self.expect(&TokenKind::RBrace)?;
        let range = self.arena.alloc_map_entries(entries);
        let span = self.span_from(start);
        Ok(self.alloc(Expr::new(ExprKind::Hash(range), span)))
    }

    /// `func name?(params) { body }`
    ///
    /// The body is parsed with a fresh loop context, so `break` inside a
    /// function nested in a loop is still rejected.
    pub(crate) fn parse_function_literal(&mut self) -> Result<ExprId, ParseError> {
        let start = self.expect(&TokenKind::Func)?;

        let name = if matches!(self.current_kind(), TokenKind::Ident(_)) {
            Some(self.expect_ident()?.0)
        } else {
            None
        };

        self.expect(&TokenKind::LParen)?;
        let mut params: Vec<Name> = Vec::new();
        while !self.check(&TokenKind::RParen) {
            let (param, span) = self.expect_ident()?;
            if params.contains(&param) {
                return Err(ParseError::new(
                    format!("duplicate parameter `{param}`"),
                    span,
                ));
            }
            params.push(param);
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::RParen)?;

        let saved_depth = std::mem::replace(&mut self.loop_depth, 0);
        let body = self.parse_block();
        self.loop_depth = saved_depth;
        let body = body?;

        let params = self.arena.alloc_params(params);
        let span = self.span_from(start);
        Ok(self.alloc(Expr::new(
            ExprKind::Function { name, params, body },
            span,
        )))
    }

    /// `if cond { ... }` with optional `else { ... }` or `else if ...`.
    /// Parentheses around the condition are ordinary grouping.
    fn parse_if(&mut self) -> Result<ExprId, ParseError> {
        let start = self.expect(&TokenKind::If)?;
        let condition = self.parse_expr()?;
        let then_branch = self.parse_block()?;

        let else_branch = if self.eat(&TokenKind::Else) {
            if self.check(&TokenKind::If) {
                Some(self.parse_if()?)
            } else {
                let block_start = self.current_span();
                let block = self.parse_block()?;
                let span = self.span_from(block_start);
                Some(self.alloc(Expr::new(ExprKind::Block(block), span)))
            }
        } else {
            None
        };

        let span = self.span_from(start);
        Ok(self.alloc(Expr::new(
            ExprKind::If {
                condition,
                then_branch,
                else_branch,
            },
            span,
        )))
    }
}
