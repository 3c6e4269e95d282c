//! Name and type resolution.
//!
//! Resolution runs in two passes over a parsed [`Program`]:
//!
//! 1. **Collection** builds the global catalog: constants first, then
//!    struct names, then struct fields, global variable types and function
//!    signatures (forward references are legal), and finally the struct
//!    value-containment cycle check.
//! 2. **Bodies**: each function body is walked once against a fresh flat
//!    local scope. The first error in a body halts that function but not
//!    the others, so one run reports a set of diagnostics.

use std::collections::HashSet;

use crate::{
    ast::{
        ast::{Decl, FunDecl, Program},
        expressions::{CallArg, Expr},
        pretty::print_expr,
        statements::{Block, Stmt},
        types::{ArraySize, ConstValue, Ty, TypeExpr},
    },
    errors::errors::{Error, ErrorImpl},
    Span,
};

use super::{
    builtins::BUILTINS,
    catalog::{Catalog, Symbol, SymbolKind},
    validated_ast::{
        LabelEntry, TypedConst, TypedExpr, TypedExprKind, TypedFunction, TypedGlobalVar,
        TypedStmt, TypedStruct, ValidatedProgram,
    },
};

/// Resolves a parsed program into a validated one, or reports every
/// diagnostic found.
pub fn resolve(program: &Program) -> Result<ValidatedProgram, Vec<Error>> {
    Resolver::new().run(program)
}

struct Resolver {
    catalog: Catalog,
    diagnostics: Vec<Error>,
    /// Label table of the function currently being resolved, in document
    /// order.
    labels: Vec<LabelEntry>,
    /// `while` nesting depth within the current function.
    while_depth: usize,
}

impl Resolver {
    fn new() -> Self {
        Resolver {
            catalog: Catalog::new(),
            diagnostics: vec![],
            labels: vec![],
            while_depth: 0,
        }
    }

    fn run(mut self, program: &Program) -> Result<ValidatedProgram, Vec<Error>> {
        let (consts, globals, structs) = self.collect(program);
        // A broken catalog would cascade into every body, so collection
        // errors end the run here.
        if !self.diagnostics.is_empty() {
            return Err(self.diagnostics);
        }

        let mut functions = vec![];
        for decl in program.decls.iter() {
            if let Decl::Fun(fun) = decl {
                match self.resolve_function(fun) {
                    Ok(function) => functions.push(function),
                    Err(error) => self.diagnostics.push(error),
                }
            }
        }

        if self.diagnostics.is_empty() {
            Ok(ValidatedProgram {
                consts,
                globals,
                structs,
                functions,
            })
        } else {
            Err(self.diagnostics)
        }
    }

    // -- Collection pass --

    fn collect(
        &mut self,
        program: &Program,
    ) -> (Vec<TypedConst>, Vec<TypedGlobalVar>, Vec<TypedStruct>) {
        let mut consts = vec![];
        let mut globals = vec![];
        let mut structs = vec![];

        // Constants first: array sizes may name them.
        for decl in program.decls.iter() {
            if let Decl::Const(decl) = decl {
                let symbol = Symbol {
                    name: decl.name.clone(),
                    ty: decl.value.ty(),
                    kind: SymbolKind::Const,
                    value: Some(decl.value),
                };
                match self.catalog.declare_global(symbol, &decl.span.start) {
                    Ok(()) => consts.push(TypedConst {
                        name: decl.name.clone(),
                        value: decl.value,
                        span: decl.span.clone(),
                    }),
                    Err(error) => self.diagnostics.push(error),
                }
            }
        }

        // Struct names next, so every later type reference resolves no
        // matter the declaration order.
        for decl in program.decls.iter() {
            if let Decl::Struct(decl) = decl {
                let symbol = Symbol {
                    name: decl.name.clone(),
                    ty: Ty::Struct(decl.name.clone()),
                    kind: SymbolKind::Struct,
                    value: None,
                };
                if let Err(error) = self.catalog.declare_global(symbol, &decl.span.start) {
                    self.diagnostics.push(error);
                }
            }
        }

        // Field lists, global variable types and function signatures.
        for decl in program.decls.iter() {
            match decl {
                Decl::Struct(decl) => {
                    let mut fields = vec![];
                    let mut seen = HashSet::new();
                    for field in decl.fields.iter() {
                        if !seen.insert(field.name.clone()) {
                            self.diagnostics.push(Error::new(
                                ErrorImpl::DuplicateDeclaration {
                                    name: field.name.clone(),
                                },
                                field.span.start.clone(),
                            ));
                            continue;
                        }
                        match self.resolve_type(&field.ty, false) {
                            Ok(ty) => fields.push((field.name.clone(), ty)),
                            Err(error) => self.diagnostics.push(error),
                        }
                    }
                    self.catalog.set_struct_fields(&decl.name, fields.clone());
                    structs.push(TypedStruct {
                        name: decl.name.clone(),
                        fields,
                        span: decl.span.clone(),
                    });
                }
                Decl::Var(decl) => match self.resolve_type(&decl.ty, false) {
                    Ok(ty) => {
                        let symbol = Symbol {
                            name: decl.name.clone(),
                            ty: ty.clone(),
                            kind: SymbolKind::Var,
                            value: None,
                        };
                        match self.catalog.declare_global(symbol, &decl.span.start) {
                            Ok(()) => globals.push(TypedGlobalVar {
                                name: decl.name.clone(),
                                ty,
                                span: decl.span.clone(),
                            }),
                            Err(error) => self.diagnostics.push(error),
                        }
                    }
                    Err(error) => self.diagnostics.push(error),
                },
                Decl::Fun(decl) => match self.resolve_signature(decl) {
                    Ok(ty) => {
                        let symbol = Symbol {
                            name: decl.name.clone(),
                            ty,
                            kind: SymbolKind::Func,
                            value: None,
                        };
                        if let Err(error) = self.catalog.declare_global(symbol, &decl.span.start)
                        {
                            self.diagnostics.push(error);
                        }
                    }
                    Err(error) => self.diagnostics.push(error),
                },
                Decl::Const(_) => {}
            }
        }

        // Value-containment cycles make struct layout impossible; pointers
        // break them.
        for decl in program.decls.iter() {
            if let Decl::Struct(decl) = decl {
                let mut seen = HashSet::new();
                let contains_self = self
                    .catalog
                    .get_struct_fields(&decl.name)
                    .map(|fields| {
                        fields
                            .iter()
                            .any(|(_, ty)| self.contains_by_value(&decl.name, ty, &mut seen))
                    })
                    .unwrap_or(false);
                if contains_self {
                    self.diagnostics.push(Error::new(
                        ErrorImpl::SelfContainingStruct {
                            name: decl.name.clone(),
                        },
                        decl.span.start.clone(),
                    ));
                }
            }
        }

        (consts, globals, structs)
    }

    fn resolve_signature(&self, decl: &FunDecl) -> Result<Ty, Error> {
        let ret = self.resolve_type(&decl.ret, true)?;
        let mut params = vec![];
        for param in decl.params.iter() {
            params.push(self.resolve_type(&param.ty, false)?);
        }
        Ok(Ty::Function {
            params,
            ret: Box::new(ret),
        })
    }

    fn contains_by_value(&self, root: &str, ty: &Ty, seen: &mut HashSet<String>) -> bool {
        match ty {
            Ty::Struct(name) => {
                if name == root {
                    return true;
                }
                if !seen.insert(name.clone()) {
                    return false;
                }
                self.catalog
                    .get_struct_fields(name)
                    .map(|fields| {
                        fields
                            .iter()
                            .any(|(_, ty)| self.contains_by_value(root, ty, seen))
                    })
                    .unwrap_or(false)
            }
            Ty::Array(elem, _) => self.contains_by_value(root, elem, seen),
            _ => false,
        }
    }

    // -- Type resolution --

    /// Resolves a written type to a [`Ty`]. `void` is legal only where
    /// `allow_void` is set (return type position).
    fn resolve_type(&self, ty: &TypeExpr, allow_void: bool) -> Result<Ty, Error> {
        match ty {
            TypeExpr::Named { name, position } => match name.as_str() {
                "int" => Ok(Ty::Int),
                "float" => Ok(Ty::Float),
                "byte" => Ok(Ty::Byte),
                "void" => {
                    if allow_void {
                        Ok(Ty::Void)
                    } else {
                        Err(Error::new(ErrorImpl::InvalidVoid, position.clone()))
                    }
                }
                _ => match self.catalog.lookup(name) {
                    Some(symbol) if symbol.kind == SymbolKind::Struct => {
                        Ok(Ty::Struct(name.clone()))
                    }
                    _ => Err(Error::new(
                        ErrorImpl::UnknownType {
                            type_: name.clone(),
                        },
                        position.clone(),
                    )),
                },
            },
            TypeExpr::Pointer { elem } => {
                Ok(Ty::Pointer(Box::new(self.resolve_type(elem, false)?)))
            }
            TypeExpr::Array { elem, size } => {
                let elem_ty = self.resolve_type(elem, false)?;
                let size = self.resolve_array_size(size, &ty.position())?;
                Ok(Ty::Array(Box::new(elem_ty), size))
            }
            TypeExpr::Function { ret, params } => {
                let ret_ty = self.resolve_type(ret, true)?;
                let mut param_tys = vec![];
                for param in params.iter() {
                    param_tys.push(self.resolve_type(param, false)?);
                }
                Ok(Ty::Function {
                    params: param_tys,
                    ret: Box::new(ret_ty),
                })
            }
        }
    }

    /// An array size must come out a positive integer: either a literal or
    /// an `int` constant.
    fn resolve_array_size(
        &self,
        size: &ArraySize,
        position: &crate::Position,
    ) -> Result<usize, Error> {
        match size {
            ArraySize::Literal(n) => {
                if *n > 0 {
                    Ok(*n as usize)
                } else {
                    Err(Error::new(
                        ErrorImpl::InvalidArraySize {
                            size: n.to_string(),
                        },
                        position.clone(),
                    ))
                }
            }
            ArraySize::Named(name) => match self.catalog.lookup(name) {
                Some(symbol) if symbol.kind == SymbolKind::Const => match symbol.value {
                    Some(ConstValue::Int(n)) if n > 0 => Ok(n as usize),
                    _ => Err(Error::new(
                        ErrorImpl::InvalidArraySize { size: name.clone() },
                        position.clone(),
                    )),
                },
                Some(_) => Err(Error::new(
                    ErrorImpl::InvalidArraySize { size: name.clone() },
                    position.clone(),
                )),
                None => Err(Error::new(
                    ErrorImpl::UndefinedIdentifier { name: name.clone() },
                    position.clone(),
                )),
            },
        }
    }

    // -- Body pass --

    fn resolve_function(&mut self, decl: &FunDecl) -> Result<TypedFunction, Error> {
        let ret = self.resolve_type(&decl.ret, true)?;

        self.catalog.enter_function();
        self.labels = vec![];
        self.while_depth = 0;

        let result = self.resolve_function_inner(decl, &ret);
        self.catalog.leave_function();
        result
    }

    fn resolve_function_inner(
        &mut self,
        decl: &FunDecl,
        ret: &Ty,
    ) -> Result<TypedFunction, Error> {
        // `result` is declared before the parameters so a parameter of the
        // same name reports the duplicate at the parameter.
        if !ret.is_void() {
            self.catalog.declare_local(
                Symbol {
                    name: String::from("result"),
                    ty: ret.clone(),
                    kind: SymbolKind::Var,
                    value: None,
                },
                &decl.span.start,
            )?;
        }

        let mut params = vec![];
        for param in decl.params.iter() {
            let ty = self.resolve_type(&param.ty, false)?;
            self.catalog.declare_local(
                Symbol {
                    name: param.name.clone(),
                    ty: ty.clone(),
                    kind: SymbolKind::Var,
                    value: None,
                },
                &param.span.start,
            )?;
            params.push((param.name.clone(), ty));
        }

        // Pre-scan the labels so forward gotos resolve in the single
        // statement walk below.
        let mut path = vec![];
        self.collect_labels(&decl.body, &mut path)?;

        let body = self.resolve_block(&decl.body)?;

        Ok(TypedFunction {
            name: decl.name.clone(),
            params,
            ret: ret.clone(),
            labels: std::mem::take(&mut self.labels),
            body,
            span: decl.span.clone(),
        })
    }

    fn collect_labels(&mut self, block: &Block, path: &mut Vec<usize>) -> Result<(), Error> {
        for (index, stmt) in block.body.iter().enumerate() {
            match stmt {
                Stmt::Label { name, span } => {
                    // Labels share the function's flat namespace with
                    // parameters, `result` and vars; the catalog rejects
                    // reserved names and collisions with any of them.
                    self.catalog.declare_local(
                        Symbol {
                            name: name.clone(),
                            ty: Ty::Void,
                            kind: SymbolKind::Label,
                            value: None,
                        },
                        &span.start,
                    )?;
                    path.push(index);
                    self.labels.push(LabelEntry {
                        name: name.clone(),
                        stmt_path: path.clone(),
                    });
                    path.pop();
                }
                Stmt::If {
                    then_body,
                    else_body,
                    ..
                } => {
                    path.push(index);
                    path.push(0);
                    self.collect_labels(then_body, path)?;
                    path.pop();
                    if let Some(else_stmt) = else_body {
                        path.push(1);
                        self.collect_labels_stmt(else_stmt, path)?;
                        path.pop();
                    }
                    path.pop();
                }
                Stmt::While { body, .. } => {
                    path.push(index);
                    self.collect_labels(body, path)?;
                    path.pop();
                }
                Stmt::Block(inner) => {
                    path.push(index);
                    self.collect_labels(inner, path)?;
                    path.pop();
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn collect_labels_stmt(&mut self, stmt: &Stmt, path: &mut Vec<usize>) -> Result<(), Error> {
        match stmt {
            Stmt::If {
                then_body,
                else_body,
                ..
            } => {
                path.push(0);
                self.collect_labels(then_body, path)?;
                path.pop();
                if let Some(else_stmt) = else_body {
                    path.push(1);
                    self.collect_labels_stmt(else_stmt, path)?;
                    path.pop();
                }
                Ok(())
            }
            Stmt::Block(block) => self.collect_labels(block, path),
            _ => Ok(()),
        }
    }

    fn resolve_block(&mut self, block: &Block) -> Result<Vec<TypedStmt>, Error> {
        let mut body = vec![];
        for stmt in block.body.iter() {
            body.push(self.resolve_stmt(stmt)?);
        }
        Ok(body)
    }

    fn resolve_stmt(&mut self, stmt: &Stmt) -> Result<TypedStmt, Error> {
        match stmt {
            Stmt::VarDecl(decl) => {
                let ty = self.resolve_type(&decl.ty, false)?;
                self.catalog.declare_local(
                    Symbol {
                        name: decl.name.clone(),
                        ty: ty.clone(),
                        kind: SymbolKind::Var,
                        value: None,
                    },
                    &decl.span.start,
                )?;
                Ok(TypedStmt::VarDecl {
                    name: decl.name.clone(),
                    ty,
                    span: decl.span.clone(),
                })
            }
            Stmt::Assign {
                target,
                value,
                span,
            } => {
                let target = self.resolve_lvalue(target)?;
                let value = self.resolve_expr(value, Some(&target.ty))?;
                if value.ty != target.ty {
                    return Err(Error::new(
                        ErrorImpl::AssignmentMismatch {
                            expected: target.ty.to_string(),
                            received: value.ty.to_string(),
                        },
                        value.span.start.clone(),
                    ));
                }
                Ok(TypedStmt::Assign {
                    target,
                    value,
                    span: span.clone(),
                })
            }
            Stmt::Call { call, span } => {
                // Statement position accepts any return type; the value is
                // discarded.
                let call = self.resolve_expr(call, None)?;
                Ok(TypedStmt::Call {
                    call,
                    span: span.clone(),
                })
            }
            Stmt::If {
                cond,
                then_body,
                else_body,
                span,
            } => {
                let cond = self.resolve_cond(cond)?;
                let then_body = self.resolve_block(then_body)?;
                let else_body = match else_body {
                    Some(stmt) => Some(Box::new(self.resolve_stmt(stmt)?)),
                    None => None,
                };
                Ok(TypedStmt::If {
                    cond,
                    then_body,
                    else_body,
                    span: span.clone(),
                })
            }
            Stmt::While { cond, body, span } => {
                let cond = self.resolve_cond(cond)?;
                self.while_depth += 1;
                let body = self.resolve_block(body)?;
                self.while_depth -= 1;
                Ok(TypedStmt::While {
                    cond,
                    body,
                    span: span.clone(),
                })
            }
            Stmt::Break { span } => {
                if self.while_depth == 0 {
                    return Err(Error::new(
                        ErrorImpl::NotInLoop {
                            keyword: String::from("break"),
                        },
                        span.start.clone(),
                    ));
                }
                Ok(TypedStmt::Break { span: span.clone() })
            }
            Stmt::Continue { span } => {
                if self.while_depth == 0 {
                    return Err(Error::new(
                        ErrorImpl::NotInLoop {
                            keyword: String::from("continue"),
                        },
                        span.start.clone(),
                    ));
                }
                Ok(TypedStmt::Continue { span: span.clone() })
            }
            Stmt::Label { name, span } => {
                let index = self
                    .labels
                    .iter()
                    .position(|label| label.name == *name)
                    .unwrap_or_else(|| unreachable!("label registered by the pre-scan"));
                Ok(TypedStmt::Label {
                    name: name.clone(),
                    index,
                    span: span.clone(),
                })
            }
            Stmt::Goto { label, span } => {
                // Gotos resolve only against this function's label table;
                // labels are never visible across functions.
                match self.labels.iter().position(|entry| entry.name == *label) {
                    Some(target) => Ok(TypedStmt::Goto {
                        label: label.clone(),
                        target,
                        span: span.clone(),
                    }),
                    None => Err(Error::new(
                        ErrorImpl::UndefinedLabel {
                            label: label.clone(),
                        },
                        span.start.clone(),
                    )),
                }
            }
            Stmt::Block(block) => Ok(TypedStmt::Block {
                body: self.resolve_block(block)?,
                span: block.span.clone(),
            }),
        }
    }

    fn resolve_cond(&mut self, cond: &Expr) -> Result<TypedExpr, Error> {
        let cond = self.resolve_expr(cond, Some(&Ty::Int))?;
        if cond.ty != Ty::Int {
            return Err(Error::new(
                ErrorImpl::NonIntCondition {
                    received: cond.ty.to_string(),
                },
                cond.span.start.clone(),
            ));
        }
        Ok(cond)
    }

    // -- Expressions --

    /// Resolves an expression. `expected` is the type its context needs,
    /// when known; composite literals can only be resolved against one.
    fn resolve_expr(&mut self, expr: &Expr, expected: Option<&Ty>) -> Result<TypedExpr, Error> {
        match expr {
            Expr::IntLit { value, span } => Ok(TypedExpr {
                kind: TypedExprKind::IntLit(*value),
                ty: Ty::Int,
                span: span.clone(),
            }),
            Expr::FloatLit { value, span } => Ok(TypedExpr {
                kind: TypedExprKind::FloatLit(*value),
                ty: Ty::Float,
                span: span.clone(),
            }),
            Expr::ByteLit { value, span } => Ok(TypedExpr {
                kind: TypedExprKind::ByteLit(*value),
                ty: Ty::Byte,
                span: span.clone(),
            }),
            Expr::Ident { name, span } => {
                let symbol = match self.catalog.lookup(name) {
                    Some(symbol) => symbol,
                    None => {
                        return Err(Error::new(
                            ErrorImpl::UndefinedIdentifier { name: name.clone() },
                            span.start.clone(),
                        ))
                    }
                };
                match symbol.kind {
                    SymbolKind::Var | SymbolKind::Const => Ok(TypedExpr {
                        kind: TypedExprKind::Ident(name.clone()),
                        ty: symbol.ty.clone(),
                        span: span.clone(),
                    }),
                    // A bare function name has no storage; `_addr` is the
                    // one way to turn it into a value. Labels and struct
                    // names never are values.
                    SymbolKind::Func | SymbolKind::Struct | SymbolKind::Label => Err(Error::new(
                        ErrorImpl::NotAddressable {
                            target: name.clone(),
                        },
                        span.start.clone(),
                    )),
                }
            }
            Expr::Select {
                base,
                selector,
                span,
            } => {
                let base = self.resolve_expr(base, None)?;
                self.resolve_select(base, selector, span)
            }
            Expr::Call { callee, args, span } => self.resolve_call(callee, args, span),
            Expr::Composite { elems, span } => self.resolve_composite(elems, span, expected),
            Expr::AddrOf { target, span } => self.resolve_addr_of(target, span),
        }
    }

    /// Splits `base[...]` on the base's type: arrays and pointers index
    /// with an `int`, structs select a field with a bare identifier.
    fn resolve_select(
        &mut self,
        base: TypedExpr,
        selector: &Expr,
        span: &Span,
    ) -> Result<TypedExpr, Error> {
        match base.ty.clone() {
            Ty::Array(elem, _) | Ty::Pointer(elem) => {
                let index = self.resolve_expr(selector, Some(&Ty::Int))?;
                if index.ty != Ty::Int {
                    return Err(Error::new(
                        ErrorImpl::NonIntIndex {
                            received: index.ty.to_string(),
                        },
                        index.span.start.clone(),
                    ));
                }
                Ok(TypedExpr {
                    kind: TypedExprKind::Index {
                        base: Box::new(base),
                        index: Box::new(index),
                    },
                    ty: *elem,
                    span: span.clone(),
                })
            }
            Ty::Struct(name) => {
                let field = match selector {
                    Expr::Ident { name, .. } => name.clone(),
                    _ => {
                        return Err(Error::new(
                            ErrorImpl::UnknownField {
                                field: print_expr(selector),
                                strukt: name,
                            },
                            selector.get_span().start.clone(),
                        ))
                    }
                };
                let field_ty = self
                    .catalog
                    .get_struct_fields(&name)
                    .and_then(|fields| {
                        fields
                            .iter()
                            .find(|(field_name, _)| *field_name == field)
                            .map(|(_, ty)| ty.clone())
                    });
                match field_ty {
                    Some(ty) => Ok(TypedExpr {
                        kind: TypedExprKind::Field {
                            base: Box::new(base),
                            field,
                        },
                        ty,
                        span: span.clone(),
                    }),
                    None => Err(Error::new(
                        ErrorImpl::UnknownField {
                            field,
                            strukt: name,
                        },
                        selector.get_span().start.clone(),
                    )),
                }
            }
            other => Err(Error::new(
                ErrorImpl::NotIndexable {
                    received: other.to_string(),
                },
                base.span.start.clone(),
            )),
        }
    }

    /// An assignment target or `_addr` operand: an identifier or selection
    /// chain whose root is a variable.
    fn resolve_lvalue(&mut self, expr: &Expr) -> Result<TypedExpr, Error> {
        match expr {
            Expr::Ident { name, span } => {
                let symbol = match self.catalog.lookup(name) {
                    Some(symbol) => symbol,
                    None => {
                        return Err(Error::new(
                            ErrorImpl::UndefinedIdentifier { name: name.clone() },
                            span.start.clone(),
                        ))
                    }
                };
                if symbol.kind != SymbolKind::Var {
                    return Err(Error::new(
                        ErrorImpl::NotAddressable {
                            target: name.clone(),
                        },
                        span.start.clone(),
                    ));
                }
                Ok(TypedExpr {
                    kind: TypedExprKind::Ident(name.clone()),
                    ty: symbol.ty.clone(),
                    span: span.clone(),
                })
            }
            Expr::Select {
                base,
                selector,
                span,
            } => {
                let base = self.resolve_lvalue(base)?;
                self.resolve_select(base, selector, span)
            }
            _ => Err(Error::new(
                ErrorImpl::NotAddressable {
                    target: print_expr(expr),
                },
                expr.get_span().start.clone(),
            )),
        }
    }

    fn resolve_addr_of(&mut self, target: &Expr, span: &Span) -> Result<TypedExpr, Error> {
        // `_addr` on a declared function yields a function-pointer value
        // with exactly the function's signature.
        if let Expr::Ident { name, .. } = target {
            if let Some(symbol) = self.catalog.lookup(name) {
                if symbol.kind == SymbolKind::Func {
                    return Ok(TypedExpr {
                        kind: TypedExprKind::AddrOfFunc { name: name.clone() },
                        ty: symbol.ty.clone(),
                        span: span.clone(),
                    });
                }
            }
        }

        let target = self.resolve_lvalue(target)?;
        let ty = Ty::Pointer(Box::new(target.ty.clone()));
        Ok(TypedExpr {
            kind: TypedExprKind::AddrOf {
                target: Box::new(target),
            },
            ty,
            span: span.clone(),
        })
    }

    fn resolve_composite(
        &mut self,
        elems: &[Expr],
        span: &Span,
        expected: Option<&Ty>,
    ) -> Result<TypedExpr, Error> {
        let expected = match expected {
            Some(ty) => ty.clone(),
            None => {
                return Err(Error::new(
                    ErrorImpl::CompositeShapeMismatch {
                        expected: String::from("a known target type"),
                        received: String::from("a composite literal with no context"),
                    },
                    span.start.clone(),
                ))
            }
        };

        match &expected {
            Ty::Array(elem_ty, size) => {
                if elems.len() != *size {
                    return Err(Error::new(
                        ErrorImpl::CompositeShapeMismatch {
                            expected: format!("{} elements for `{}`", size, expected),
                            received: format!("{} elements", elems.len()),
                        },
                        span.start.clone(),
                    ));
                }
                let mut typed = vec![];
                for elem in elems.iter() {
                    let elem = self.resolve_expr(elem, Some(elem_ty))?;
                    if elem.ty != **elem_ty {
                        return Err(Error::new(
                            ErrorImpl::AssignmentMismatch {
                                expected: elem_ty.to_string(),
                                received: elem.ty.to_string(),
                            },
                            elem.span.start.clone(),
                        ));
                    }
                    typed.push(elem);
                }
                Ok(TypedExpr {
                    kind: TypedExprKind::Composite { elems: typed },
                    ty: expected.clone(),
                    span: span.clone(),
                })
            }
            Ty::Struct(name) => {
                let fields = match self.catalog.get_struct_fields(name) {
                    Some(fields) => fields.clone(),
                    None => {
                        return Err(Error::new(
                            ErrorImpl::UnknownType { type_: name.clone() },
                            span.start.clone(),
                        ))
                    }
                };
                if elems.len() != fields.len() {
                    return Err(Error::new(
                        ErrorImpl::CompositeShapeMismatch {
                            expected: format!("{} fields for struct `{}`", fields.len(), name),
                            received: format!("{} elements", elems.len()),
                        },
                        span.start.clone(),
                    ));
                }
                let mut typed = vec![];
                for (elem, (field_name, field_ty)) in elems.iter().zip(fields.iter()) {
                    let elem = self.resolve_expr(elem, Some(field_ty))?;
                    if elem.ty != *field_ty {
                        return Err(Error::new(
                            ErrorImpl::AssignmentMismatch {
                                expected: format!("{} (field `{}`)", field_ty, field_name),
                                received: elem.ty.to_string(),
                            },
                            elem.span.start.clone(),
                        ));
                    }
                    typed.push(elem);
                }
                Ok(TypedExpr {
                    kind: TypedExprKind::Composite { elems: typed },
                    ty: expected.clone(),
                    span: span.clone(),
                })
            }
            other => Err(Error::new(
                ErrorImpl::CompositeShapeMismatch {
                    expected: other.to_string(),
                    received: String::from("a composite literal"),
                },
                span.start.clone(),
            )),
        }
    }

    // -- Calls --

    fn resolve_call(
        &mut self,
        callee: &Expr,
        args: &[CallArg],
        span: &Span,
    ) -> Result<TypedExpr, Error> {
        if let Expr::Ident { name, span: callee_span } = callee {
            match name.as_str() {
                "_alloc" => return self.resolve_alloc(args, span),
                "_free" => return self.resolve_free(args, span),
                _ => {}
            }

            if let Some(symbol) = self.catalog.lookup(name) {
                let symbol = symbol.clone();
                return match (&symbol.kind, &symbol.ty) {
                    // Direct call to a declared function, or an indirect
                    // call through a function-pointer variable.
                    (SymbolKind::Func, Ty::Function { params, ret })
                    | (SymbolKind::Var, Ty::Function { params, ret }) => {
                        let args = self.check_args(args, params, span)?;
                        Ok(TypedExpr {
                            kind: TypedExprKind::Call {
                                callee: Box::new(TypedExpr {
                                    kind: TypedExprKind::Ident(name.clone()),
                                    ty: symbol.ty.clone(),
                                    span: callee_span.clone(),
                                }),
                                args,
                            },
                            ty: *ret.clone(),
                            span: span.clone(),
                        })
                    }
                    _ => Err(Error::new(
                        ErrorImpl::NotCallable { name: name.clone() },
                        callee_span.start.clone(),
                    )),
                };
            }

            if let Some((params, ret)) = BUILTINS.get(name.as_str()) {
                let args = self.check_args(args, params, span)?;
                return Ok(TypedExpr {
                    kind: TypedExprKind::Builtin {
                        name: name.clone(),
                        args,
                    },
                    ty: ret.clone(),
                    span: span.clone(),
                });
            }

            return Err(Error::new(
                ErrorImpl::UndefinedIdentifier { name: name.clone() },
                callee_span.start.clone(),
            ));
        }

        // Indirect call through a selection chain, e.g. an element of an
        // array of function pointers.
        let callee_typed = self.resolve_lvalue(callee)?;
        match callee_typed.ty.clone() {
            Ty::Function { params, ret } => {
                let args = self.check_args(args, &params, span)?;
                Ok(TypedExpr {
                    kind: TypedExprKind::Call {
                        callee: Box::new(callee_typed),
                        args,
                    },
                    ty: *ret,
                    span: span.clone(),
                })
            }
            _ => Err(Error::new(
                ErrorImpl::NotCallable {
                    name: print_expr(callee),
                },
                callee_typed.span.start.clone(),
            )),
        }
    }

    fn check_args(
        &mut self,
        args: &[CallArg],
        params: &[Ty],
        span: &Span,
    ) -> Result<Vec<TypedExpr>, Error> {
        if args.len() != params.len() {
            return Err(Error::new(
                ErrorImpl::UnexpectedArguments {
                    expected: params.len(),
                    received: args.len(),
                },
                span.start.clone(),
            ));
        }

        let mut typed = vec![];
        for (arg, param) in args.iter().zip(params.iter()) {
            let arg = match arg {
                CallArg::Value(expr) => self.resolve_expr(expr, Some(param))?,
                // The parser emits type arguments only inside `_alloc`.
                CallArg::Ty(_) => unreachable!("type argument outside _alloc"),
            };
            if arg.ty != *param {
                return Err(Error::new(
                    ErrorImpl::ArgumentMismatch {
                        expected: param.to_string(),
                        received: arg.ty.to_string(),
                    },
                    arg.span.start.clone(),
                ));
            }
            typed.push(arg);
        }
        Ok(typed)
    }

    /// `_alloc(T)` or `_alloc(T, n)` with `n: int`; yields `T*`.
    fn resolve_alloc(&mut self, args: &[CallArg], span: &Span) -> Result<TypedExpr, Error> {
        let (ty_arg, count_arg) = match args {
            [CallArg::Ty(ty)] => (ty, None),
            [CallArg::Ty(ty), CallArg::Value(count)] => (ty, Some(count)),
            _ => {
                return Err(Error::new(
                    ErrorImpl::UnexpectedArguments {
                        expected: 1,
                        received: args.len(),
                    },
                    span.start.clone(),
                ))
            }
        };

        let elem = self.resolve_type(ty_arg, false)?;
        let count = match count_arg {
            Some(expr) => {
                let count = self.resolve_expr(expr, Some(&Ty::Int))?;
                if count.ty != Ty::Int {
                    return Err(Error::new(
                        ErrorImpl::ArgumentMismatch {
                            expected: Ty::Int.to_string(),
                            received: count.ty.to_string(),
                        },
                        count.span.start.clone(),
                    ));
                }
                Some(Box::new(count))
            }
            None => None,
        };

        Ok(TypedExpr {
            kind: TypedExprKind::Alloc {
                elem: elem.clone(),
                count,
            },
            ty: Ty::Pointer(Box::new(elem)),
            span: span.clone(),
        })
    }

    /// `_free(p)` takes any pointer and returns `void`.
    fn resolve_free(&mut self, args: &[CallArg], span: &Span) -> Result<TypedExpr, Error> {
        let arg = match args {
            [CallArg::Value(expr)] => self.resolve_expr(expr, None)?,
            _ => {
                return Err(Error::new(
                    ErrorImpl::UnexpectedArguments {
                        expected: 1,
                        received: args.len(),
                    },
                    span.start.clone(),
                ))
            }
        };

        if !matches!(arg.ty, Ty::Pointer(_)) {
            return Err(Error::new(
                ErrorImpl::ArgumentMismatch {
                    expected: String::from("a pointer"),
                    received: arg.ty.to_string(),
                },
                arg.span.start.clone(),
            ));
        }

        Ok(TypedExpr {
            kind: TypedExprKind::Free { arg: Box::new(arg) },
            ty: Ty::Void,
            span: span.clone(),
        })
    }
}
