//! Declaration and statement parsing.

use crate::{
    ast::{
        ast::{ConstDecl, Decl, FunDecl, StructDecl},
        expressions::Expr,
        statements::{Block, Stmt, VarDecl},
        types::ConstValue,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Span,
};

use super::{
    expr::{parse_expr, parse_postfix_expr},
    parser::Parser,
    types::parse_type,
};

/// Parses one top-level declaration: `const`, `var`, `struct` or `fun`.
pub fn parse_decl(parser: &mut Parser) -> Result<Decl, Error> {
    match parser.current_token_kind() {
        TokenKind::Const => Ok(Decl::Const(parse_const_decl(parser)?)),
        TokenKind::Var => Ok(Decl::Var(parse_var_decl(parser)?)),
        TokenKind::Struct => Ok(Decl::Struct(parse_struct_decl(parser)?)),
        TokenKind::Fun => Ok(Decl::Fun(parse_fun_decl(parser)?)),
        _ => Err(Error::new(
            ErrorImpl::UnexpectedTokenDetailed {
                token: parser.current_token().value.clone(),
                message: String::from("expected `const`, `var`, `struct` or `fun`"),
            },
            parser.get_position(),
        )),
    }
}

/// `const name literal` - the initializer must be a single literal token,
/// which also fixes the constant's type.
fn parse_const_decl(parser: &mut Parser) -> Result<ConstDecl, Error> {
    let start = parser.advance().span.start.clone();
    let name = parser.expect(TokenKind::Identifier)?.value;

    let token = parser.current_token().clone();
    let value = match token.kind {
        TokenKind::Int => ConstValue::Int(parse_literal::<i64>(&token.value, &token)?),
        TokenKind::Float => ConstValue::Float(parse_literal::<f64>(&token.value, &token)?),
        TokenKind::Byte => ConstValue::Byte(parse_literal::<u8>(&token.value, &token)?),
        _ => {
            return Err(Error::new(
                ErrorImpl::UnexpectedTokenDetailed {
                    token: token.value.clone(),
                    message: String::from("expected a literal constant"),
                },
                token.span.start.clone(),
            ))
        }
    };
    parser.advance();

    Ok(ConstDecl {
        name,
        value,
        span: Span {
            start,
            end: parser.get_position(),
        },
    })
}

fn parse_literal<T: std::str::FromStr>(
    text: &str,
    token: &crate::lexer::tokens::Token,
) -> Result<T, Error> {
    text.parse::<T>().map_err(|_| {
        Error::new(
            ErrorImpl::MalformedLiteral {
                token: token.value.clone(),
            },
            token.span.start.clone(),
        )
    })
}

/// `var name type` - shared by globals, locals, parameters and struct
/// fields.
pub fn parse_var_decl(parser: &mut Parser) -> Result<VarDecl, Error> {
    let start = parser.expect(TokenKind::Var)?.span.start;
    let name = parser.expect(TokenKind::Identifier)?.value;
    let ty = parse_type(parser)?;

    Ok(VarDecl {
        name,
        ty,
        span: Span {
            start,
            end: parser.get_position(),
        },
    })
}

/// `struct Name [var f1 ty1, var f2 ty2]`
///
/// The field list's `[` is ordinary bracket punctuation, not an array
/// suffix, so the adjacency rule does not apply to it.
fn parse_struct_decl(parser: &mut Parser) -> Result<StructDecl, Error> {
    let start = parser.advance().span.start.clone();
    let name = parser.expect(TokenKind::Identifier)?.value;
    parser.expect(TokenKind::OpenBracket)?;

    let mut fields = vec![];
    while parser.current_token_kind() != TokenKind::CloseBracket
        && parser.current_token_kind() != TokenKind::EOF
    {
        fields.push(parse_var_decl(parser)?);
        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        } else {
            break;
        }
    }
    parser.expect(TokenKind::CloseBracket)?;

    Ok(StructDecl {
        name,
        fields,
        span: Span {
            start,
            end: parser.get_position(),
        },
    })
}

/// `fun name ret(var p1 ty1, ...) { ... }`
///
/// The return type is parsed greedily; a `(` that opens a parameter list
/// rather than a function-signature suffix makes the speculative signature
/// parse fail and rewind, leaving the `(` for us.
fn parse_fun_decl(parser: &mut Parser) -> Result<FunDecl, Error> {
    let start = parser.advance().span.start.clone();
    let name = parser.expect(TokenKind::Identifier)?.value;
    let ret = parse_type(parser)?;

    let paren = parser.current_token();
    if paren.kind != TokenKind::OpenParen {
        return Err(Error::new(
            ErrorImpl::UnexpectedTokenDetailed {
                token: paren.value.clone(),
                message: String::from("expected a parameter list"),
            },
            paren.span.start.clone(),
        ));
    }
    if !paren.adjacent {
        return Err(Error::new(
            ErrorImpl::IllegalWhitespace {
                token: String::from("("),
            },
            paren.span.start.clone(),
        ));
    }
    parser.advance();

    let mut params = vec![];
    while parser.current_token_kind() != TokenKind::CloseParen
        && parser.current_token_kind() != TokenKind::EOF
    {
        params.push(parse_var_decl(parser)?);
        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        } else {
            break;
        }
    }
    parser.expect(TokenKind::CloseParen)?;

    let body = parse_block(parser)?;

    Ok(FunDecl {
        name,
        ret,
        params,
        body,
        span: Span {
            start,
            end: parser.get_position(),
        },
    })
}

/// `{ stmt* }` - purely a grouping, no scope of its own.
pub fn parse_block(parser: &mut Parser) -> Result<Block, Error> {
    let start = parser.expect(TokenKind::OpenCurly)?.span.start;

    let mut body = vec![];
    parser.skip_semicolons();
    while parser.current_token_kind() != TokenKind::CloseCurly
        && parser.current_token_kind() != TokenKind::EOF
    {
        body.push(parse_stmt(parser)?);
        parser.skip_semicolons();
    }
    parser.expect(TokenKind::CloseCurly)?;

    Ok(Block {
        body,
        span: Span {
            start,
            end: parser.get_position(),
        },
    })
}

/// Parses one statement, dispatching on the leading token.
pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    if let Some(handler) = parser
        .get_stmt_lookup()
        .get(&parser.current_token_kind())
        .copied()
    {
        return handler(parser);
    }

    if parser.current_token_kind() == TokenKind::Identifier {
        return parse_assign_or_call_stmt(parser);
    }

    Err(Error::new(
        ErrorImpl::UnexpectedToken {
            token: parser.current_token().value.clone(),
        },
        parser.get_position(),
    ))
}

pub fn parse_var_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    Ok(Stmt::VarDecl(parse_var_decl(parser)?))
}

pub fn parse_if_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();
    let cond = parse_expr(parser)?;
    let then_body = parse_block(parser)?;

    let else_body = if parser.current_token_kind() == TokenKind::Else {
        parser.advance();
        if parser.current_token_kind() == TokenKind::If {
            Some(Box::new(parse_if_stmt(parser)?))
        } else {
            Some(Box::new(Stmt::Block(parse_block(parser)?)))
        }
    } else {
        None
    };

    Ok(Stmt::If {
        cond,
        then_body,
        else_body,
        span: Span {
            start,
            end: parser.get_position(),
        },
    })
}

pub fn parse_while_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();
    let cond = parse_expr(parser)?;
    let body = parse_block(parser)?;

    Ok(Stmt::While {
        cond,
        body,
        span: Span {
            start,
            end: parser.get_position(),
        },
    })
}

pub fn parse_break_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let token = parser.advance();
    Ok(Stmt::Break {
        span: token.span.clone(),
    })
}

pub fn parse_continue_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let token = parser.advance();
    Ok(Stmt::Continue {
        span: token.span.clone(),
    })
}

pub fn parse_label_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();
    let name = parser.expect(TokenKind::Identifier)?.value;

    Ok(Stmt::Label {
        name,
        span: Span {
            start,
            end: parser.get_position(),
        },
    })
}

/// `goto label name` - the `label` keyword is part of the statement.
pub fn parse_goto_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();
    parser.expect(TokenKind::Label)?;
    let label = parser.expect(TokenKind::Identifier)?.value;

    Ok(Stmt::Goto {
        label,
        span: Span {
            start,
            end: parser.get_position(),
        },
    })
}

pub fn parse_nested_block_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    Ok(Stmt::Block(parse_block(parser)?))
}

/// An identifier-led statement: either `lvalue := expr` or a call.
fn parse_assign_or_call_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.get_position();
    let expr = parse_postfix_expr(parser)?;

    if parser.current_token_kind() == TokenKind::Walrus {
        match expr {
            Expr::Ident { .. } | Expr::Select { .. } => {}
            _ => {
                return Err(Error::new(
                    ErrorImpl::UnexpectedTokenDetailed {
                        token: String::from(":="),
                        message: String::from("the left side of `:=` is not assignable"),
                    },
                    parser.get_position(),
                ))
            }
        }
        parser.advance();
        let value = parse_expr(parser)?;
        return Ok(Stmt::Assign {
            target: expr,
            value,
            span: Span {
                start,
                end: parser.get_position(),
            },
        });
    }

    match expr {
        Expr::Call { .. } => Ok(Stmt::Call {
            call: expr,
            span: Span {
                start,
                end: parser.get_position(),
            },
        }),
        _ => Err(Error::new(
            ErrorImpl::UnexpectedTokenDetailed {
                token: parser.current_token().value.clone(),
                message: String::from("expected `:=` or a call"),
            },
            parser.get_position(),
        )),
    }
}
