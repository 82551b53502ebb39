//! Tamarin IR - syntax tree types shared by the parser and the evaluator.
//!
//! - Spans for source locations
//! - `Name` for identifiers
//! - Tokens and `TokenList` for lexer output
//! - Flat AST nodes (`Expr`, `Stmt`) stored in an `ExprArena`
//! - `Program`, the unit handed to the evaluator
//!
//! # Design
//!
//! - **Flatten everything**: no `Box<Expr>`, children are `ExprId` indices
//! - **Share, don't copy**: a finished arena is wrapped in `SharedArena` so
//!   closures keep their bodies alive cheaply

mod arena;
pub mod ast;
mod expr_id;
mod name;
mod span;
mod token;

pub use arena::{ExprArena, SharedArena};
pub use ast::{
    AssignOp, BinaryOp, Expr, ExprKind, MapEntry, PostfixOp, PrefixOp, Stmt, StmtKind,
};
pub use expr_id::{ExprId, ExprRange, MapEntryRange, ParamRange, StmtId, StmtRange};
pub use name::Name;
pub use span::Span;
pub use token::{Token, TokenKind, TokenList};

/// A parsed script: its arena plus the top-level statement list.
#[derive(Clone, Debug)]
pub struct Program {
    pub arena: SharedArena,
    pub statements: StmtRange,
}

impl Program {
    pub fn new(arena: SharedArena, statements: StmtRange) -> Self {
        Program { arena, statements }
    }

    /// Top-level statements in source order.
    pub fn statements(&self) -> &[StmtId] {
        self.arena.get_stmt_list(self.statements)
    }
}
