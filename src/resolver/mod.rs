//! Symbol and type resolution.
//!
//! Turns the raw AST into the validated AST: every identifier is bound,
//! every expression carries its type, `base[...]` selections are split
//! into indexing and field access, and every `goto` points at an entry in
//! its function's label table. Functions fail independently, so one run
//! reports a set of diagnostics.

pub mod builtins;
pub mod catalog;
pub mod resolver;
pub mod validated_ast;

#[cfg(test)]
mod tests;
