//! Target emitter: renders a checked parse tree as Python or Java source.
//!
//! Dispatch to a class's emission logic happens by `Type::id` through a
//! lookup map (`hooks`) rather than a `match` enumerating every class, so
//! a newly recognized class only needs a new map entry.

mod emit;
mod hooks;
mod render;
mod target;

pub use emit::{translate, EmitCtx};
pub use target::Target;
