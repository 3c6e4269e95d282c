/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the raw (untyped) AST structure
///
/// Submodules:
/// - ast: Program and top-level declarations
/// - expressions: Definitions for expression nodes
/// - statements: Definitions for statement nodes
/// - types: Source-level type expressions and resolved types
/// - pretty: Prints an AST back to source text
pub mod ast;
pub mod expressions;
pub mod pretty;
pub mod statements;
pub mod types;
