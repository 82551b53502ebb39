//! Expression parsing.
//!
//! - `mod.rs`: entry point (`parse_expr`), assignment, and the binary
//!   precedence chain
//! - `operators.rs`: token to operator matching
//! - `primary.rs`: literals, identifiers, grouping, collections, `func`, `if`
//! - `postfix.rs`: calls, indexing, slicing, attributes, `++`/`--`
//!
//! Precedence, loosest first: assignment, `||`, `&&`, equality, comparison,
//! additive, multiplicative, prefix `-`/`!`, `**`, postfix.

mod operators;
mod postfix;
mod primary;

use crate::{ParseError, Parser};
use tam_ir::{BinaryOp, Expr, ExprId, ExprKind, TokenKind};
use tam_stack::ensure_sufficient_stack;

impl Parser<'_> {
    /// Parse an expression, including assignment.
    ///
    /// Wrapped in `ensure_sufficient_stack` so deeply nested input grows
    /// the stack instead of overflowing it.
    pub(crate) fn parse_expr(&mut self) -> Result<ExprId, ParseError> {
        ensure_sufficient_stack(|| self.parse_expr_inner())
    }

    fn parse_expr_inner(&mut self) -> Result<ExprId, ParseError> {
        let left = self.parse_binary_or()?;

        let Some(op) = self.match_assign_op() else {
            return Ok(left);
        };

        let target_span = self.span_of(left);
        if !matches!(
            self.arena.get_expr(left).kind,
            ExprKind::Ident(_) | ExprKind::Index { .. }
        ) {
            return Err(ParseError::new("invalid assignment target", target_span));
        }

        self.advance();
        let value = self.parse_expr()?;
        let span = target_span.merge(self.span_of(value));
        Ok(self.alloc(Expr::new(
            ExprKind::Assign {
                op,
                target: left,
                value,
            },
            span,
        )))
    }

    fn make_binary(&mut self, op: BinaryOp, left: ExprId, right: ExprId) -> ExprId {
        let span = self.span_of(left).merge(self.span_of(right));
        self.alloc(Expr::new(ExprKind::Binary { op, left, right }, span))
    }

    /// `||` (loosest binary operator).
    fn parse_binary_or(&mut self) -> Result<ExprId, ParseError> {
        let mut left = self.parse_binary_and()?;
        while self.check(&TokenKind::PipePipe) {
            self.advance();
            let right = self.parse_binary_and()?;
            left = self.make_binary(BinaryOp::Or, left, right);
        }
        Ok(left)
    }

    /// `&&`
    fn parse_binary_and(&mut self) -> Result<ExprId, ParseError> {
        let mut left = self.parse_equality()?;
        while self.check(&TokenKind::AmpAmp) {
            self.advance();
            let right = self.parse_equality()?;
            left = self.make_binary(BinaryOp::And, left, right);
        }
        Ok(left)
    }

    /// `==` `!=`
    fn parse_equality(&mut self) -> Result<ExprId, ParseError> {
        let mut left = self.parse_comparison()?;
        while let Some(op) = self.match_equality_op() {
            self.advance();
            let right = self.parse_comparison()?;
            left = self.make_binary(op, left, right);
        }
        Ok(left)
    }

    /// `<` `<=` `>` `>=`
    fn parse_comparison(&mut self) -> Result<ExprId, ParseError> {
        let mut left = self.parse_additive()?;
        while let Some(op) = self.match_comparison_op() {
            self.advance();
            let right = self.parse_additive()?;
            left = self.make_binary(op, left, right);
        }
        Ok(left)
    }

    /// `+` `-`
    fn parse_additive(&mut self) -> Result<ExprId, ParseError> {
        let mut left = self.parse_multiplicative()?;
        while let Some(op) = self.match_additive_op() {
            self.advance();
            let right = self.parse_multiplicative()?;
            left = self.make_binary(op, left, right);
        }
        Ok(left)
    }

    /// `*` `/` `%`
    fn parse_multiplicative(&mut self) -> Result<ExprId, ParseError> {
        let mut left = self.parse_prefix()?;
        while let Some(op) = self.match_multiplicative_op() {
            self.advance();
            let right = self.parse_prefix()?;
            left = self.make_binary(op, left, right);
        }
        Ok(left)
    }

    /// Prefix `-` and `!`. Binds looser than `**`, so `-2 ** 2` is `-(2 ** 2)`.
    fn parse_prefix(&mut self) -> Result<ExprId, ParseError> {
        let Some(op) = self.match_prefix_op() else {
            return self.parse_power();
        };
        let start = self.current_span();
        self.advance();
        let operand = ensure_sufficient_stack(|| self.parse_prefix())?;
        let span = start.merge(self.span_of(operand));
        Ok(self.alloc(Expr::new(ExprKind::Prefix { op, operand }, span)))
    }

    /// `**`, right associative. The exponent may carry its own prefix
    /// operator: `2 ** -1`.
    fn parse_power(&mut self) -> Result<ExprId, ParseError> {
        let base = self.parse_postfix()?;
        if !self.check(&TokenKind::StarStar) {
            return Ok(base);
        }
        self.advance();
        let exponent = ensure_sufficient_stack(|| self.parse_prefix())?;
        Ok(self.make_binary(BinaryOp::Pow, base, exponent))
    }
}
