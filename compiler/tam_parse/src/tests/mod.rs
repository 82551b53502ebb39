//! Parser tests.
//!
//! - `parser`: literals, operators and precedence, collections, calls
//! - `statements`: let/return/func/for, blocks and error cases

mod statements;
