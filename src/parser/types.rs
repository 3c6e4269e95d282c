//! Type expression parsing.
//!
//! A type is a base (a name, or a parenthesised type) followed by suffixes
//! that nest outward: `*` for pointer, `[n]` for array, `(types)*` for a
//! function signature. Every suffix must be adjacent to what it follows.
//!
//! The signature suffix is the one ambiguous spot in the grammar: inside
//! `fun f void(...)` the `(` after the return type opens the parameter
//! list, not a signature. A signature's parentheses hold types while a
//! parameter list holds `var` declarations, so the signature parse is
//! speculative and rewinds on failure.

use crate::{
    ast::types::{ArraySize, TypeExpr},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::parser::Parser;

pub fn parse_type(parser: &mut Parser) -> Result<TypeExpr, Error> {
    let mut ty = match parser.current_token_kind() {
        TokenKind::Identifier => {
            let token = parser.advance();
            TypeExpr::Named {
                name: token.value.clone(),
                position: token.span.start.clone(),
            }
        }
        TokenKind::OpenParen => {
            parser.advance();
            let inner = parse_type(parser)?;
            parser.expect(TokenKind::CloseParen)?;
            inner
        }
        _ => {
            return Err(Error::new(
                ErrorImpl::UnexpectedTokenDetailed {
                    token: parser.current_token().value.clone(),
                    message: String::from("expected a type"),
                },
                parser.get_position(),
            ))
        }
    };

    loop {
        match parser.current_token_kind() {
            TokenKind::Star => {
                if !parser.current_is_adjacent() {
                    return Err(Error::new(
                        ErrorImpl::IllegalWhitespace {
                            token: String::from("*"),
                        },
                        parser.get_position(),
                    ));
                }
                parser.advance();
                ty = TypeExpr::Pointer { elem: Box::new(ty) };
            }
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
                let size = parse_array_size(parser)?;
                parser.expect(TokenKind::CloseBracket)?;
                ty = TypeExpr::Array {
                    elem: Box::new(ty),
                    size,
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
                let checkpoint = parser.checkpoint();
                match parse_signature_suffix(parser, ty.clone()) {
                    Ok(sig) => ty = sig,
                    Err(_) => {
                        parser.rewind(checkpoint);
                        break;
                    }
                }
            }
            _ => break,
        }
    }

    Ok(ty)
}

/// The size inside `[...]` is an integer literal or the name of an integer
/// constant. Whether a named size actually is one is the resolver's call.
fn parse_array_size(parser: &mut Parser) -> Result<ArraySize, Error> {
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
            Ok(ArraySize::Literal(value))
        }
        TokenKind::Identifier => {
            parser.advance();
            Ok(ArraySize::Named(token.value))
        }
        _ => Err(Error::new(
            ErrorImpl::UnexpectedTokenDetailed {
                token: token.value.clone(),
                message: String::from("expected an array size"),
            },
            token.span.start.clone(),
        )),
    }
}

/// `(param, ...)* ` after a return type. Fails (and the caller rewinds)
/// when the parentheses hold anything but a comma-separated list of types
/// closed by an adjacent `*`.
fn parse_signature_suffix(parser: &mut Parser, ret: TypeExpr) -> Result<TypeExpr, Error> {
    parser.advance();

    let mut params = vec![];
    while parser.current_token_kind() != TokenKind::CloseParen
        && parser.current_token_kind() != TokenKind::EOF
    {
        params.push(parse_type(parser)?);
        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        } else {
            break;
        }
    }
    parser.expect(TokenKind::CloseParen)?;

    let star = parser.current_token();
    if star.kind != TokenKind::Star || !star.adjacent {
        return Err(Error::new(
            ErrorImpl::UnexpectedTokenDetailed {
                token: star.value.clone(),
                message: String::from("a function signature type ends with `*`"),
            },
            star.span.start.clone(),
        ));
    }
    parser.advance();

    Ok(TypeExpr::Function {
        ret: Box::new(ret),
        params,
    })
}
