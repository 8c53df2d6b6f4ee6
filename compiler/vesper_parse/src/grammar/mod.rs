//! Grammar productions, split by syntactic category.
//!
//! - `stmt`: statements, blocks, declarations, control flow
//! - `class`: class bodies
//! - `expr`: the precedence chain, postfix forms and primaries
//! - `pattern`: destructuring patterns

mod class;
mod expr;
mod pattern;
mod stmt;
