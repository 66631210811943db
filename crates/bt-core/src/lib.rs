//! The tree walker: resolves every node of a parsed expression against
//! the symbol table, validating arity and argument types, and produces a
//! typed side table an emitter can query.

mod walker;

pub use walker::{check, TypedTree};
