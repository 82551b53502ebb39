//! Postfix expression parsing: calls, indexing, slicing, attributes and
//! `++`/`--`.

use crate::{ParseError, Parser};
use tam_ir::{Expr, ExprId, ExprKind, TokenKind};

impl Parser<'_> {
    pub(crate) fn parse_postfix(&mut self) -> Result<ExprId, ParseError> {
        let expr = self.parse_primary()?;
        self.apply_postfix_ops(expr)
    }

    fn apply_postfix_ops(&mut self, mut expr: ExprId) -> Result<ExprId, ParseError> {
        loop {
            if self.check(&TokenKind::LParen) {
                self.advance();
                let args = self.parse_comma_list(&TokenKind::RParen)?;
                self.expect(&TokenKind::RParen)?;
                let args = self.arena.alloc_expr_list(args);
                let span = self.span_from(self.span_of(expr));
                expr = self.alloc(Expr::new(ExprKind::Call { func: expr, args }, span));
            } else if self.check(&TokenKind::LBracket) {
                self.advance();
                expr = self.parse_index_or_slice(expr)?;
            } else if self.check(&TokenKind::Dot) {
                self.advance();
                let (name, _) = self.expect_ident()?;
                let span = self.span_from(self.span_of(expr));
                expr = self.alloc(Expr::new(
                    ExprKind::Attribute {
                        receiver: expr,
                        name,
                    },
                    span,
                ));
            } else if let Some(op) = self.match_postfix_op() {
                self.advance();
                let span = self.span_from(self.span_of(expr));
                expr = self.alloc(Expr::new(ExprKind::Postfix { op, target: expr }, span));
            } else {
                return Ok(expr);
            }
        }
    }

    /// After `receiver[`: either `index]` or `low:high]` with optional bounds.
    fn parse_index_or_slice(&mut self, receiver: ExprId) -> Result<ExprId, ParseError> {
        let low = if self.check(&TokenKind::Colon) {
            None
        } else {
            Some(self.parse_expr()?)
        };

        let kind = if self.eat(&TokenKind::Colon) {
            let high = if self.check(&TokenKind::RBracket) {
                None
            } else {
                Some(self.parse_expr()?)
            };
            ExprKind::Slice {
                receiver,
                low,
                high,
            }
        } else {
            match low {
                Some(index) => ExprKind::Index { receiver, index },
                None => return Err(self.error_expected("an index")),
            }
        };

        self.expect(&TokenKind::RBracket)?;
        let span = self.span_from(self.span_of(receiver));
        Ok(self.alloc(Expr::new(kind, span)))
    }

    /// Comma separated expressions up to (not including) `close`.
    /// A trailing comma is allowed.
    pub(crate) fn parse_comma_list(&mut self, close: &TokenKind) -> Result<Vec<ExprId>, ParseError> {
        let mut items = Vec::new();
        while !self.check(close) {
            items.push(self.parse_expr()?);
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        Ok(items)
    }
}
