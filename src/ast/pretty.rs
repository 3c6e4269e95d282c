//! Prints an AST back to source text.
//!
//! The output honors the adjacency rules (no space before a suffix `*`,
//! `[`, or call `(`), so re-parsing printed output reproduces the tree.
//! The round-trip tests rely on that.

use std::fmt::Write;

use super::{
    ast::{Decl, Program},
    expressions::{CallArg, Expr},
    statements::{Block, Stmt},
};

pub fn print_program(program: &Program) -> String {
    let mut out = String::new();
    for decl in program.decls.iter() {
        match decl {
            Decl::Const(decl) => {
                let _ = writeln!(out, "const {} {}", decl.name, decl.value);
            }
            Decl::Var(decl) => {
                let _ = writeln!(out, "var {} {}", decl.name, decl.ty);
            }
            Decl::Struct(decl) => {
                let fields = decl
                    .fields
                    .iter()
                    .map(|field| format!("var {} {}", field.name, field.ty))
                    .collect::<Vec<String>>()
                    .join(", ");
                let _ = writeln!(out, "struct {} [{}]", decl.name, fields);
            }
            Decl::Fun(decl) => {
                let params = decl
                    .params
                    .iter()
                    .map(|param| format!("var {} {}", param.name, param.ty))
                    .collect::<Vec<String>>()
                    .join(", ");
                let _ = writeln!(out, "fun {} {}({}) {{", decl.name, decl.ret, params);
                print_block_body(&mut out, &decl.body, 1);
                let _ = writeln!(out, "}}");
            }
        }
    }
    out
}

fn print_block_body(out: &mut String, block: &Block, indent: usize) {
    for stmt in block.body.iter() {
        print_stmt(out, stmt, indent);
    }
}

fn print_stmt(out: &mut String, stmt: &Stmt, indent: usize) {
    let pad = "    ".repeat(indent);
    match stmt {
        Stmt::VarDecl(decl) => {
            let _ = writeln!(out, "{}var {} {}", pad, decl.name, decl.ty);
        }
        Stmt::Assign { target, value, .. } => {
            let _ = writeln!(out, "{}{} := {}", pad, print_expr(target), print_expr(value));
        }
        Stmt::Call { call, .. } => {
            let _ = writeln!(out, "{}{}", pad, print_expr(call));
        }
        Stmt::If { .. } => {
            let _ = write!(out, "{}", pad);
            print_if_chain(out, stmt, indent);
        }
        Stmt::While { cond, body, .. } => {
            let _ = writeln!(out, "{}while {} {{", pad, print_expr(cond));
            print_block_body(out, body, indent + 1);
            let _ = writeln!(out, "{}}}", pad);
        }
        Stmt::Break { .. } => {
            let _ = writeln!(out, "{}break", pad);
        }
        Stmt::Continue { .. } => {
            let _ = writeln!(out, "{}continue", pad);
        }
        Stmt::Label { name, .. } => {
            let _ = writeln!(out, "{}label {}", pad, name);
        }
        Stmt::Goto { label, .. } => {
            let _ = writeln!(out, "{}goto label {}", pad, label);
        }
        Stmt::Block(block) => {
            let _ = writeln!(out, "{}{{", pad);
            print_block_body(out, block, indent + 1);
            let _ = writeln!(out, "{}}}", pad);
        }
    }
}

// `else if` chains print on one line, so the caller writes the leading
// padding and this writes everything from `if` onward.
fn print_if_chain(out: &mut String, stmt: &Stmt, indent: usize) {
    let pad = "    ".repeat(indent);
    if let Stmt::If { cond, then_body, else_body, .. } = stmt {
        let _ = writeln!(out, "if {} {{", print_expr(cond));
        print_block_body(out, then_body, indent + 1);
        match else_body {
            None => {
                let _ = writeln!(out, "{}}}", pad);
            }
            Some(else_stmt) => match else_stmt.as_ref() {
                Stmt::If { .. } => {
                    let _ = write!(out, "{}}} else ", pad);
                    print_if_chain(out, else_stmt, indent);
                }
                Stmt::Block(block) => {
                    let _ = writeln!(out, "{}}} else {{", pad);
                    print_block_body(out, block, indent + 1);
                    let _ = writeln!(out, "{}}}", pad);
                }
                _ => unreachable!("else body is always an if or a block"),
            },
        }
    }
}

pub fn print_expr(expr: &Expr) -> String {
    match expr {
        Expr::IntLit { value, .. } => format!("{}", value),
        Expr::FloatLit { value, .. } => {
            if value.fract() == 0.0 && value.is_finite() {
                format!("{:.1}", value)
            } else {
                format!("{}", value)
            }
        }
        Expr::ByteLit { value, .. } => format!("{}b", value),
        Expr::Ident { name, .. } => name.clone(),
        Expr::Select { base, selector, .. } => {
            format!("{}[{}]", print_expr(base), print_expr(selector))
        }
        Expr::Call { callee, args, .. } => {
            let args = args
                .iter()
                .map(|arg| match arg {
                    CallArg::Value(expr) => print_expr(expr),
                    CallArg::Ty(ty) => format!("{}", ty),
                })
                .collect::<Vec<String>>()
                .join(", ");
            format!("{}({})", print_expr(callee), args)
        }
        Expr::Composite { elems, .. } => {
            let elems = elems
                .iter()
                .map(print_expr)
                .collect::<Vec<String>>()
                .join(", ");
            format!("[{}]", elems)
        }
        Expr::AddrOf { target, .. } => format!("_addr({})", print_expr(target)),
    }
}
