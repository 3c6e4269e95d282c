//! Expression parsing.
//!
//! Expressions are literals, composites and identifier chains; there are
//! no operators, so no precedence climbing. Identifier chains take `[...]`
//! and `(...)` suffixes, each of which must be adjacent to what it
//! follows.

use crate::{
    ast::expressions::{CallArg, Expr},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Span,
};

use super::{parser::Parser, types::parse_type};

pub fn parse_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.current_token().clone();
    match token.kind {
        TokenKind::Int => {
            parser.advance();
            let value = token.value.parse::<i64>().map_err(|_| {
                Error::new(
                    ErrorImpl::MalformedLiteral {
                        token: token.value.clone(),
                    },
                    token.span.start.clone(),
                )
            })?;
            Ok(Expr::IntLit {
                value,
                span: token.span,
            })
        }
        TokenKind::Float => {
            parser.advance();
            let value = token.value.parse::<f64>().map_err(|_| {
                Error::new(
                    ErrorImpl::MalformedLiteral {
                        token: token.value.clone(),
                    },
                    token.span.start.clone(),
                )
            })?;
            Ok(Expr::FloatLit {
                value,
                span: token.span,
            })
        }
        TokenKind::Byte => {
            parser.advance();
            // The lexer already range-checked the value and stripped the
            // `b` suffix (char literals land here too, as decimal text).
            let value = token.value.parse::<u8>().map_err(|_| {
                Error::new(
                    ErrorImpl::MalformedLiteral {
                        token: token.value.clone(),
                    },
                    token.span.start.clone(),
                )
            })?;
            Ok(Expr::ByteLit {
                value,
                span: token.span,
            })
        }
        TokenKind::Identifier => parse_postfix_expr(parser),
        TokenKind::OpenBracket => parse_composite(parser),
        _ => Err(Error::new(
            ErrorImpl::UnexpectedTokenDetailed {
                token: token.value.clone(),
                message: String::from("expected an expression"),
            },
            token.span.start.clone(),
        )),
    }
}

/// `[e1, e2, ...]` - a composite literal. Its shape is checked against
/// the expected type of its context later; the parser only collects the
/// elements.
fn parse_composite(parser: &mut Parser) -> Result<Expr, Error> {
    let start = parser.advance().span.start.clone();

    let mut elems = vec![];
    while parser.current_token_kind() != TokenKind::CloseBracket
        && parser.current_token_kind() != TokenKind::EOF
    {
        elems.push(parse_expr(parser)?);
        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        } else {
            break;
        }
    }
    parser.expect(TokenKind::CloseBracket)?;

    Ok(Expr::Composite {
        elems,
        span: Span {
            start,
            end: parser.get_position(),
        },
    })
}

/// An identifier followed by any number of `[...]` and `(...)` suffixes.
/// Both suffixes require adjacency; a gap before them is an error, never a
/// different parse.
pub fn parse_postfix_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.expect(TokenKind::Identifier)?;
    let start = token.span.start.clone();
    let mut expr = Expr::Ident {
        name: token.value,
        span: token.span,
    };

    loop {
        match parser.current_token_kind() {
            TokenKind::OpenBracket => {
                if !parser.current_is_adjacent() {
                    return Err(Error::new(
                        ErrorImpl::IllegalWhitespace {
                            token: String::from("["),
                        },
                        parser.get_position(),
                    ));
                }
                parser.advance();
                let selector = parse_expr(parser)?;
                parser.expect(TokenKind::CloseBracket)?;
                expr = Expr::Select {
                    base: Box::new(expr),
                    selector: Box::new(selector),
                    span: Span {
                        start: start.clone(),
                        end: parser.get_position(),
                    },
                };
            }
            TokenKind::OpenParen => {
                if !parser.current_is_adjacent() {
                    return Err(Error::new(
                        ErrorImpl::IllegalWhitespace {
                            token: String::from("("),
                        },
                        parser.get_position(),
                    ));
                }
                expr = parse_call(parser, expr, start.clone())?;
            }
            _ => break,
        }
    }

    Ok(expr)
}

/// Parses a call suffix. Two names are special forms rather than
/// functions: `_addr(lvalue)` lowers straight to an address-of node, and
/// `_alloc(type)` / `_alloc(type, count)` takes a type where a value
/// would normally stand.
fn parse_call(parser: &mut Parser, callee: Expr, start: crate::Position) -> Result<Expr, Error> {
    parser.advance();

    if let Expr::Ident { name, .. } = &callee {
        if name == "_addr" {
            let target = parse_expr(parser)?;
            parser.expect(TokenKind::CloseParen)?;
            return Ok(Expr::AddrOf {
                target: Box::new(target),
                span: Span {
                    start,
                    end: parser.get_position(),
                },
            });
        }
        if name == "_alloc" {
            let ty = parse_type(parser)?;
            let mut args = vec![CallArg::Ty(ty)];
            if parser.current_token_kind() == TokenKind::Comma {
                parser.advance();
                args.push(CallArg::Value(parse_expr(parser)?));
            }
            parser.expect(TokenKind::CloseParen)?;
            return Ok(Expr::Call {
                callee: Box::new(callee),
                args,
                span: Span {
                    start,
                    end: parser.get_position(),
                },
            });
        }
    }

    let mut args = vec![];
    while parser.current_token_kind() != TokenKind::CloseParen
        && parser.current_token_kind() != TokenKind::EOF
    {
        args.push(CallArg::Value(parse_expr(parser)?));
        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        } else {
            break;
        }
    }
    parser.expect(TokenKind::CloseParen)?;

    Ok(Expr::Call {
        callee: Box::new(callee),
        args,
        span: Span {
            start,
            end: parser.get_position(),
        },
    })
}
