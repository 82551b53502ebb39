//! AST node types.
//!
//! Expressions and statements are flat: children are `ExprId`/`StmtId`
//! indices into an `ExprArena`, never boxes.

use std::fmt;
use std::rc::Rc;

use crate::{ExprId, ExprRange, MapEntryRange, Name, ParamRange, Span, StmtId, StmtRange};

/// Expression node.
#[derive(Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.span)
    }
}

/// Expression variants.
#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind {
    // Literals
    Int(i64),
    Float(f64),
    String(Rc<str>),
    Bool(bool),
    Null,

    /// Variable reference.
    Ident(Name),

    /// `-x`, `!x`
    Prefix { op: PrefixOp, operand: ExprId },

    /// `left op right`
    Binary {
        op: BinaryOp,
        left: ExprId,
        right: ExprId,
    },

    /// `x++`, `x--`
    Postfix { op: PostfixOp, target: ExprId },

    /// `target = value` and the compound forms. The target is an
    /// identifier or an index expression.
    Assign {
        op: AssignOp,
        target: ExprId,
        value: ExprId,
    },

    /// `func(args...)`
    Call { func: ExprId, args: ExprRange },

    /// `receiver[index]`
    Index { receiver: ExprId, index: ExprId },

    /// `receiver[low:high]`, either bound may be omitted.
    Slice {
        receiver: ExprId,
        low: Option<ExprId>,
        high: Option<ExprId>,
    },

    /// `receiver.name`
    Attribute { receiver: ExprId, name: Name },

    /// `[a, b, c]`
    Array(ExprRange),

    /// `{k: v, ...}`
    Hash(MapEntryRange),

    /// `{a, b, c}`
    Set(ExprRange),

    /// `func(params) { body }`; `name` is set for declarations.
    Function {
        name: Option<Name>,
        params: ParamRange,
        body: StmtRange,
    },

    /// `if (condition) { ... } else ...`; the else branch is either a
    /// `Block` or another `If`.
    If {
        condition: ExprId,
        then_branch: StmtRange,
        else_branch: Option<ExprId>,
    },

    /// `{ statements }` used as an else branch.
    Block(StmtRange),
}

/// Statement node.
#[derive(Clone, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Stmt { kind, span }
    }
}

impl fmt::Debug for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.span)
    }
}

/// Statement variants.
#[derive(Clone, Debug, PartialEq)]
pub enum StmtKind {
    /// `let name = value;`
    Let { name: Name, value: ExprId },
    /// `return;` or `return value;`
    Return(Option<ExprId>),
    Break,
    Continue,
    /// Expression statement; its value becomes the block's value.
    Expr(ExprId),
    /// `func name(params) { body }` binding `name` in the current frame.
    FuncDecl { name: Name, func: ExprId },
    /// `for (cond) {}`, `for (init; cond; post) {}` or `for {}`.
    For {
        init: Option<StmtId>,
        condition: Option<ExprId>,
        post: Option<ExprId>,
        body: StmtRange,
    },
}

/// One `key: value` entry of a hash literal.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MapEntry {
    pub key: ExprId,
    pub value: ExprId,
    pub span: Span,
}

/// Binary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    And,
    Or,
}

impl BinaryOp {
    pub fn as_symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Pow => "**",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::LtEq => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::GtEq => ">=",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
        }
    }

    /// `true` for `== != < <= > >=`.
    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            BinaryOp::Eq
                | BinaryOp::NotEq
                | BinaryOp::Lt
                | BinaryOp::LtEq
                | BinaryOp::Gt
                | BinaryOp::GtEq
        )
    }
}

/// Prefix operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum PrefixOp {
    Neg,
    Not,
}

impl PrefixOp {
    pub fn as_symbol(self) -> &'static str {
        match self {
            PrefixOp::Neg => "-",
            PrefixOp::Not => "!",
        }
    }
}

/// Postfix update operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum PostfixOp {
    Increment,
    Decrement,
}

impl PostfixOp {
    pub fn as_symbol(self) -> &'static str {
        match self {
            PostfixOp::Increment => "++",
            PostfixOp::Decrement => "--",
        }
    }
}

/// Assignment operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum AssignOp {
    Assign,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
}

impl AssignOp {
    /// The binary operator a compound assignment applies, `None` for `=`.
    pub fn binary_op(self) -> Option<BinaryOp> {
        match self {
            AssignOp::Assign => None,
            AssignOp::AddAssign => Some(BinaryOp::Add),
            AssignOp::SubAssign => Some(BinaryOp::Sub),
            AssignOp::MulAssign => Some(BinaryOp::Mul),
            AssignOp::DivAssign => Some(BinaryOp::Div),
        }
    }
}
