//! Expression nodes of the raw AST.
//!
//! The grammar cannot tell an array index from a struct field selector
//! (both are `base[...]`), so the parser emits a single [`Expr::Select`]
//! node and the resolver splits it using the base's type.

use crate::Span;

use super::types::TypeExpr;

#[derive(Debug, Clone)]
pub enum Expr {
    IntLit {
        value: i64,
        span: Span,
    },
    FloatLit {
        value: f64,
        span: Span,
    },
    ByteLit {
        value: u8,
        span: Span,
    },
    Ident {
        name: String,
        span: Span,
    },
    /// `base[selector]` - array index or struct field selection.
    Select {
        base: Box<Expr>,
        selector: Box<Expr>,
        span: Span,
    },
    /// `callee(args)` - direct, indirect or builtin call.
    Call {
        callee: Box<Expr>,
        args: Vec<CallArg>,
        span: Span,
    },
    /// `[e1, e2, ...]` - composite literal; shape checked against the
    /// context's expected type by the resolver.
    Composite {
        elems: Vec<Expr>,
        span: Span,
    },
    /// `_addr(target)` - lowered by the parser from the special form.
    AddrOf {
        target: Box<Expr>,
        span: Span,
    },
}

impl Expr {
    pub fn get_span(&self) -> &Span {
        match self {
            Expr::IntLit { span, .. } => span,
            Expr::FloatLit { span, .. } => span,
            Expr::ByteLit { span, .. } => span,
            Expr::Ident { span, .. } => span,
            Expr::Select { span, .. } => span,
            Expr::Call { span, .. } => span,
            Expr::Composite { span, .. } => span,
            Expr::AddrOf { span, .. } => span,
        }
    }
}

/// One call argument. `_alloc` takes a type name where a value would
/// normally stand, so arguments distinguish the two at the AST level
/// instead of bending the expression grammar.
#[derive(Debug, Clone)]
pub enum CallArg {
    Value(Expr),
    Ty(TypeExpr),
}
