//! Program root and top-level declarations.

use crate::Span;

use super::{
    statements::{Block, VarDecl},
    types::{ConstValue, TypeExpr},
};

/// One parsed source unit. Owns its whole tree; labels and gotos reference
/// each other only by name, so the tree is strictly acyclic.
#[derive(Debug, Clone)]
pub struct Program {
    pub decls: Vec<Decl>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub enum Decl {
    Const(ConstDecl),
    Var(VarDecl),
    Struct(StructDecl),
    Fun(FunDecl),
}

impl Decl {
    pub fn get_span(&self) -> &Span {
        match self {
            Decl::Const(decl) => &decl.span,
            Decl::Var(decl) => &decl.span,
            Decl::Struct(decl) => &decl.span,
            Decl::Fun(decl) => &decl.span,
        }
    }
}

/// `const name literal` - the value is a literal, so const types are always
/// known without inference.
#[derive(Debug, Clone)]
pub struct ConstDecl {
    pub name: String,
    pub value: ConstValue,
    pub span: Span,
}

/// `struct Name [var f1 ty1, var f2 ty2]`
#[derive(Debug, Clone)]
pub struct StructDecl {
    pub name: String,
    pub fields: Vec<VarDecl>,
    pub span: Span,
}

/// `fun name ret(var p1 ty1, ...) { ... }`
#[derive(Debug, Clone)]
pub struct FunDecl {
    pub name: String,
    pub ret: TypeExpr,
    pub params: Vec<VarDecl>,
    pub body: Block,
    pub span: Span,
}
