//! Arena indices and list ranges for the flat AST.
//!
//! Children are referenced by `u32` indices into `ExprArena` rather than
//! boxed, and variable-length children (call arguments, block statements,
//! hash entries, parameters) by a `start`/`len` range into a side table.

use std::fmt;

macro_rules! arena_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Copy, Clone, Eq, PartialEq, Hash)]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            #[inline]
            pub const fn new(index: u32) -> Self {
                $name(index)
            }

            /// Index into the owning arena table.
            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }
    };
}

macro_rules! arena_range {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
        pub struct $name {
            pub start: u32,
            pub len: u32,
        }

        impl $name {
            pub const EMPTY: $name = $name { start: 0, len: 0 };

            #[inline]
            pub const fn new(start: u32, len: u32) -> Self {
                $name { start, len }
            }

            #[inline]
            pub const fn is_empty(self) -> bool {
                self.len == 0
            }

            #[inline]
            pub const fn len(self) -> usize {
                self.len as usize
            }

            /// Bounds as a `usize` range for slicing the side table.
            #[inline]
            pub fn as_range(self) -> std::ops::Range<usize> {
                let start = self.start as usize;
                start..start + self.len as usize
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(
                    f,
                    concat!(stringify!($name), "({}..{})"),
                    self.start,
                    self.start + self.len
                )
            }
        }
    };
}

arena_id!(
    /// Index of an expression in `ExprArena`.
    ExprId
);
arena_id!(
    /// Index of a statement in `ExprArena`.
    StmtId
);

arena_range!(
    /// Contiguous run of `ExprId`s (call arguments, array elements).
    ExprRange
);
arena_range!(
    /// Contiguous run of `StmtId`s forming a block body.
    StmtRange
);
arena_range!(
    /// Contiguous run of function parameter names.
    ParamRange
);
arena_range!(
    /// Contiguous run of hash literal entries.
    MapEntryRange
);
