//! Arena storage for the flat AST.

use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use crate::ast::{Expr, MapEntry, Stmt};
use crate::{ExprId, ExprRange, MapEntryRange, Name, ParamRange, StmtId, StmtRange};

/// Contiguous storage for every node of one parsed script.
///
/// - All expressions and statements live in flat `Vec`s
/// - Child references are `ExprId`/`StmtId` indices
/// - Lists (arguments, block bodies, entries, parameters) are ranges into
///   side tables
#[derive(Clone, Default)]
pub struct ExprArena {
    exprs: Vec<Expr>,
    expr_lists: Vec<ExprId>,
    stmts: Vec<Stmt>,
    stmt_lists: Vec<StmtId>,
    params: Vec<Name>,
    map_entries: Vec<MapEntry>,
}

fn next_index(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}

fn range_len(start: u32, end: usize) -> u32 {
    next_index(end).saturating_sub(start)
}

impl ExprArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with capacity estimated from source size
    /// (roughly one expression per 8 bytes of source).
    pub fn with_capacity(source_len: usize) -> Self {
        let estimated = source_len / 8;
        ExprArena {
            exprs: Vec::with_capacity(estimated),
            expr_lists: Vec::with_capacity(estimated / 2),
            stmts: Vec::with_capacity(estimated / 4),
            stmt_lists: Vec::with_capacity(estimated / 4),
            params: Vec::new(),
            map_entries: Vec::new(),
        }
    }

    // Expressions

    #[inline]
    pub fn alloc_expr(&mut self, expr: Expr) -> ExprId {
        let id = ExprId::new(next_index(self.exprs.len()));
        self.exprs.push(expr);
        id
    }

    /// # Panics
    /// Panics if `id` was not allocated by this arena.
    #[inline]
    #[track_caller]
    pub fn get_expr(&self, id: ExprId) -> &Expr {
        &self.exprs[id.index()]
    }

    #[inline]
    pub fn expr_count(&self) -> usize {
        self.exprs.len()
    }

    pub fn alloc_expr_list(&mut self, exprs: impl IntoIterator<Item = ExprId>) -> ExprRange {
        let start = next_index(self.expr_lists.len());
        self.expr_lists.extend(exprs);
        ExprRange::new(start, range_len(start, self.expr_lists.len()))
    }

    #[inline]
    pub fn get_expr_list(&self, range: ExprRange) -> &[ExprId] {
        &self.expr_lists[range.as_range()]
    }

    // Statements

    #[inline]
    pub fn alloc_stmt(&mut self, stmt: Stmt) -> StmtId {
        let id = StmtId::new(next_index(self.stmts.len()));
        self.stmts.push(stmt);
        id
    }

    /// # Panics
    /// Panics if `id` was not allocated by this arena.
    #[inline]
    #[track_caller]
    pub fn get_stmt(&self, id: StmtId) -> &Stmt {
        &self.stmts[id.index()]
    }

    pub fn alloc_stmt_list(&mut self, stmts: impl IntoIterator<Item = StmtId>) -> StmtRange {
        let start = next_index(self.stmt_lists.len());
        self.stmt_lists.extend(stmts);
        StmtRange::new(start, range_len(start, self.stmt_lists.len()))
    }

    #[inline]
    pub fn get_stmt_list(&self, range: StmtRange) -> &[StmtId] {
        &self.stmt_lists[range.as_range()]
    }

    // Parameters

    pub fn alloc_params(&mut self, params: impl IntoIterator<Item = Name>) -> ParamRange {
        let start = next_index(self.params.len());
        self.params.extend(params);
        ParamRange::new(start, range_len(start, self.params.len()))
    }

    #[inline]
    pub fn get_params(&self, range: ParamRange) -> &[Name] {
        &self.params[range.as_range()]
    }

    // Hash literal entries

    pub fn alloc_map_entries(&mut self, entries: impl IntoIterator<Item = MapEntry>) -> MapEntryRange {
        let start = next_index(self.map_entries.len());
        self.map_entries.extend(entries);
        MapEntryRange::new(start, range_len(start, self.map_entries.len()))
    }

    #[inline]
    pub fn get_map_entries(&self, range: MapEntryRange) -> &[MapEntry] {
        &self.map_entries[range.as_range()]
    }
}

impl fmt::Debug for ExprArena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExprArena")
            .field("exprs", &self.exprs.len())
            .field("stmts", &self.stmts.len())
            .finish_non_exhaustive()
    }
}

/// Shared, immutable handle to a finished arena.
///
/// Function values hold one so their body stays reachable for as long as
/// the closure lives, independently of the `Program` that created it.
#[derive(Clone, Debug)]
pub struct SharedArena(Rc<ExprArena>);

impl SharedArena {
    pub fn new(arena: ExprArena) -> Self {
        SharedArena(Rc::new(arena))
    }

    /// `true` when both handles point at the same arena.
    pub fn ptr_eq(&self, other: &SharedArena) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Deref for SharedArena {
    type Target = ExprArena;

    #[inline]
    fn deref(&self) -> &ExprArena {
        &self.0
    }
}
