//! Statement dispatch table.
//!
//! Every statement form starts with a fixed keyword or `{`, so statement
//! parsing is a single table lookup on the leading token kind. Identifiers
//! (assignments and calls) are the one exception and are handled by the
//! dispatcher's fallback.

use std::collections::HashMap;

use crate::{ast::statements::Stmt, errors::errors::Error, lexer::tokens::TokenKind};

use super::{parser::Parser, stmt};

pub type StmtHandler = fn(&mut Parser) -> Result<Stmt, Error>;
pub type StmtLookup = HashMap<TokenKind, StmtHandler>;

pub fn create_stmt_lookups(parser: &mut Parser) {
    parser.stmt(TokenKind::Var, stmt::parse_var_stmt);
    parser.stmt(TokenKind::If, stmt::parse_if_stmt);
    parser.stmt(TokenKind::While, stmt::parse_while_stmt);
    parser.stmt(TokenKind::Break, stmt::parse_break_stmt);
    parser.stmt(TokenKind::Continue, stmt::parse_continue_stmt);
    parser.stmt(TokenKind::Label, stmt::parse_label_stmt);
    parser.stmt(TokenKind::Goto, stmt::parse_goto_stmt);
    parser.stmt(TokenKind::OpenCurly, stmt::parse_nested_block_stmt);
}
