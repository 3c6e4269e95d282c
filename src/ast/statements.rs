//! Statement nodes of the raw AST.
//!
//! A [`Block`] is purely a syntactic grouping: it introduces no scope.
//! Every `var` and `label` anywhere inside a function body lands in that
//! function's single flat namespace.

use crate::Span;

use super::{
    expressions::Expr,
    types::TypeExpr,
};

#[derive(Debug, Clone)]
pub struct Block {
    pub body: Vec<Stmt>,
    pub span: Span,
}

/// `var name type` - used as a statement, a parameter, and a struct field.
#[derive(Debug, Clone)]
pub struct VarDecl {
    pub name: String,
    pub ty: TypeExpr,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub enum Stmt {
    VarDecl(VarDecl),
    Assign {
        target: Expr,
        value: Expr,
        span: Span,
    },
    /// A call in statement position; the only way to invoke a `void`
    /// function (or `_free`). Its result, if any, is discarded.
    Call {
        call: Expr,
        span: Span,
    },
    If {
        cond: Expr,
        then_body: Block,
        /// `Stmt::If` for an `else if` chain, `Stmt::Block` for a final
        /// `else`.
        else_body: Option<Box<Stmt>>,
        span: Span,
    },
    While {
        cond: Expr,
        body: Block,
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
        span: Span,
    },
    Goto {
        label: String,
        span: Span,
    },
    Block(Block),
}

impl Stmt {
    pub fn get_span(&self) -> &Span {
        match self {
            Stmt::VarDecl(decl) => &decl.span,
            Stmt::Assign { span, .. } => span,
            Stmt::Call { span, .. } => span,
            Stmt::If { span, .. } => span,
            Stmt::While { span, .. } => span,
            Stmt::Break { span } => span,
            Stmt::Continue { span } => span,
            Stmt::Label { span, .. } => span,
            Stmt::Goto { span, .. } => span,
            Stmt::Block(block) => &block.span,
        }
    }
}
