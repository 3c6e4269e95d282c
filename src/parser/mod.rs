//! Recursive-descent parser.
//!
//! Consumes the lexer's token stream and produces the raw AST. The
//! grammar is keyword-prefixed and operator-free, so parsing needs no
//! precedence machinery: a lookup table dispatches statements on their
//! leading token, and types, expressions and declarations are plain
//! recursive descent. Parsing stops at the first error.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
pub mod types;
