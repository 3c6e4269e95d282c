//! The validated AST.
//!
//! This is what resolution produces: every expression carries its resolved
//! [`Ty`], the ambiguous `base[...]` selections are split into array
//! indexing and struct field access, calls are split into direct, indirect
//! and builtin forms, and every `goto` holds the index of its target in
//! the function's label table.

use crate::{
    ast::types::{ConstValue, Ty},
    Span,
};

#[derive(Debug, Clone)]
pub struct ValidatedProgram {
    pub consts: Vec<TypedConst>,
    pub globals: Vec<TypedGlobalVar>,
    pub structs: Vec<TypedStruct>,
    pub functions: Vec<TypedFunction>,
}

#[derive(Debug, Clone)]
pub struct TypedConst {
    pub name: String,
    pub value: ConstValue,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct TypedGlobalVar {
    pub name: String,
    pub ty: Ty,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct TypedStruct {
    pub name: String,
    pub fields: Vec<(String, Ty)>,
    pub span: Span,
}

/// One resolved function. `labels` is the function's flat label table;
/// label and goto statements refer to it by index.
#[derive(Debug, Clone)]
pub struct TypedFunction {
    pub name: String,
    pub params: Vec<(String, Ty)>,
    pub ret: Ty,
    pub labels: Vec<LabelEntry>,
    pub body: Vec<TypedStmt>,
    pub span: Span,
}

/// Where a label sits in the function body: the statement index at each
/// nesting level, outermost first. An `if` contributes two components,
/// its statement index and then a branch discriminant (0 for the then
/// body, 1 for the else arm), so labels in opposite branches never share
/// a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelEntry {
    pub name: String,
    pub stmt_path: Vec<usize>,
}

#[derive(Debug, Clone)]
pub enum TypedStmt {
    VarDecl {
        name: String,
        ty: Ty,
        span: Span,
    },
    Assign {
        target: TypedExpr,
        value: TypedExpr,
        span: Span,
    },
    Call {
        call: TypedExpr,
        span: Span,
    },
    If {
        cond: TypedExpr,
        then_body: Vec<TypedStmt>,
        else_body: Option<Box<TypedStmt>>,
        span: Span,
    },
    While {
        cond: TypedExpr,
        body: Vec<TypedStmt>,
        span: Span,
    },
    Break {
        span: Span,
    },
    Continue {
        span: Span,
    },
    Label {
        name: String,
        /// Index into the owning function's `labels`.
        index: usize,
        span: Span,
    },
    Goto {
        label: String,
        /// Index into the owning function's `labels`.
        target: usize,
        span: Span,
    },
    Block {
        body: Vec<TypedStmt>,
        span: Span,
    },
}

/// A resolved expression: its kind plus the type it evaluates to. Call
/// statements may carry `Ty::Void` here; everywhere else the type is a
/// value type.
#[derive(Debug, Clone)]
pub struct TypedExpr {
    pub kind: TypedExprKind,
    pub ty: Ty,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub enum TypedExprKind {
    IntLit(i64),
    FloatLit(f64),
    ByteLit(u8),
    Ident(String),
    Index {
        base: Box<TypedExpr>,
        index: Box<TypedExpr>,
    },
    Field {
        base: Box<TypedExpr>,
        field: String,
    },
    /// Direct or indirect call; the callee's type is always
    /// `Ty::Function`.
    Call {
        callee: Box<TypedExpr>,
        args: Vec<TypedExpr>,
    },
    Builtin {
        name: String,
        args: Vec<TypedExpr>,
    },
    /// `_alloc(T)` or `_alloc(T, n)`; the expression's type is `T*`.
    Alloc {
        elem: Ty,
        count: Option<Box<TypedExpr>>,
    },
    /// `_free(p)`; always `void`.
    Free {
        arg: Box<TypedExpr>,
    },
    AddrOf {
        target: Box<TypedExpr>,
    },
    /// `_addr(f)` on a declared function; the only way a function name
    /// becomes a value.
    AddrOfFunc {
        name: String,
    },
    Composite {
        elems: Vec<TypedExpr>,
    },
}
