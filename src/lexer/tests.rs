//! Unit tests for the lexer module.
//!
//! This module contains tests for tokenization including:
//! - Keywords and identifiers
//! - Numeric literals (ints, floats, both byte forms)
//! - Punctuation and the walrus operator
//! - Comments and whitespace
//! - Token adjacency tracking
//! - Error cases

use super::{lexer::tokenize, tokens::TokenKind};

#[test]
fn test_tokenize_keywords() {
    let source = "const var struct fun if else while break continue label goto".to_string();
    let tokens = tokenize(source, Some("test.rill".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Const);
    assert_eq!(tokens[1].kind, TokenKind::Var);
    assert_eq!(tokens[2].kind, TokenKind::Struct);
    assert_eq!(tokens[3].kind, TokenKind::Fun);
    assert_eq!(tokens[4].kind, TokenKind::If);
    assert_eq!(tokens[5].kind, TokenKind::Else);
    assert_eq!(tokens[6].kind, TokenKind::While);
    assert_eq!(tokens[7].kind, TokenKind::Break);
    assert_eq!(tokens[8].kind, TokenKind::Continue);
    assert_eq!(tokens[9].kind, TokenKind::Label);
    assert_eq!(tokens[10].kind, TokenKind::Goto);
    assert_eq!(tokens[11].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_identifiers() {
    let source = "foo bar baz_123 _add_i CamelCase".to_string();
    let tokens = tokenize(source, Some("test.rill".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[0].value, "foo");
    assert_eq!(tokens[1].kind, TokenKind::Identifier);
    assert_eq!(tokens[1].value, "bar");
    assert_eq!(tokens[2].kind, TokenKind::Identifier);
    assert_eq!(tokens[2].value, "baz_123");
    assert_eq!(tokens[3].kind, TokenKind::Identifier);
    assert_eq!(tokens[3].value, "_add_i");
    assert_eq!(tokens[4].kind, TokenKind::Identifier);
    assert_eq!(tokens[4].value, "CamelCase");
    assert_eq!(tokens[5].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_ints() {
    let source = "42 0 -17".to_string();
    let tokens = tokenize(source, Some("test.rill".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Int);
    assert_eq!(tokens[0].value, "42");
    assert_eq!(tokens[1].kind, TokenKind::Int);
    assert_eq!(tokens[1].value, "0");
    assert_eq!(tokens[2].kind, TokenKind::Int);
    assert_eq!(tokens[2].value, "-17");
    assert_eq!(tokens[3].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_floats() {
    let source = "3.14 -0.5 1e9 2.5e-3".to_string();
    let tokens = tokenize(source, Some("test.rill".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Float);
    assert_eq!(tokens[0].value, "3.14");
    assert_eq!(tokens[1].kind, TokenKind::Float);
    assert_eq!(tokens[1].value, "-0.5");
    assert_eq!(tokens[2].kind, TokenKind::Float);
    assert_eq!(tokens[2].value, "1e9");
    assert_eq!(tokens[3].kind, TokenKind::Float);
    assert_eq!(tokens[3].value, "2.5e-3");
    assert_eq!(tokens[4].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_byte_literals() {
    let source = "0b 255b 65b".to_string();
    let tokens = tokenize(source, Some("test.rill".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Byte);
    assert_eq!(tokens[0].value, "0");
    assert_eq!(tokens[1].kind, TokenKind::Byte);
    assert_eq!(tokens[1].value, "255");
    assert_eq!(tokens[2].kind, TokenKind::Byte);
    assert_eq!(tokens[2].value, "65");
    assert_eq!(tokens[3].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_char_literals() {
    let source = r"'A' ' ' '\n' '\0' '\\'".to_string();
    let tokens = tokenize(source, Some("test.rill".to_string())).unwrap();

    // Both byte forms carry the decimal value.
    assert_eq!(tokens[0].kind, TokenKind::Byte);
    assert_eq!(tokens[0].value, "65");
    assert_eq!(tokens[1].kind, TokenKind::Byte);
    assert_eq!(tokens[1].value, "32");
    assert_eq!(tokens[2].kind, TokenKind::Byte);
    assert_eq!(tokens[2].value, "10");
    assert_eq!(tokens[3].kind, TokenKind::Byte);
    assert_eq!(tokens[3].value, "0");
    assert_eq!(tokens[4].kind, TokenKind::Byte);
    assert_eq!(tokens[4].value, "92");
    assert_eq!(tokens[5].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_punctuation() {
    let source = "[ ] { } ( ) * , ; :=".to_string();
    let tokens = tokenize(source, Some("test.rill".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::OpenBracket);
    assert_eq!(tokens[1].kind, TokenKind::CloseBracket);
    assert_eq!(tokens[2].kind, TokenKind::OpenCurly);
    assert_eq!(tokens[3].kind, TokenKind::CloseCurly);
    assert_eq!(tokens[4].kind, TokenKind::OpenParen);
    assert_eq!(tokens[5].kind, TokenKind::CloseParen);
    assert_eq!(tokens[6].kind, TokenKind::Star);
    assert_eq!(tokens[7].kind, TokenKind::Comma);
    assert_eq!(tokens[8].kind, TokenKind::Semicolon);
    assert_eq!(tokens[9].kind, TokenKind::Walrus);
    assert_eq!(tokens[10].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_comments() {
    let source = "var x int // trailing comment\nvar y float".to_string();
    let tokens = tokenize(source, Some("test.rill".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Var);
    assert_eq!(tokens[1].value, "x");
    assert_eq!(tokens[2].value, "int");
    assert_eq!(tokens[3].kind, TokenKind::Var);
    assert_eq!(tokens[4].value, "y");
    assert_eq!(tokens[5].value, "float");
    assert_eq!(tokens[6].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_adjacency() {
    let source = "x[0] y [0]".to_string();
    let tokens = tokenize(source, Some("test.rill".to_string())).unwrap();

    // x [ 0 ] y [ 0 ] EOF
    assert_eq!(tokens[1].kind, TokenKind::OpenBracket);
    assert!(tokens[1].adjacent);
    assert_eq!(tokens[5].kind, TokenKind::OpenBracket);
    assert!(!tokens[5].adjacent);
}

#[test]
fn test_tokenize_pointer_adjacency() {
    let source = "int* float *".to_string();
    let tokens = tokenize(source, Some("test.rill".to_string())).unwrap();

    assert_eq!(tokens[1].kind, TokenKind::Star);
    assert!(tokens[1].adjacent);
    assert_eq!(tokens[3].kind, TokenKind::Star);
    assert!(!tokens[3].adjacent);
}

#[test]
fn test_tokenize_comment_breaks_adjacency() {
    let source = "x//c\n[0]".to_string();
    let tokens = tokenize(source, Some("test.rill".to_string())).unwrap();

    assert_eq!(tokens[1].kind, TokenKind::OpenBracket);
    assert!(!tokens[1].adjacent);
}

#[test]
fn test_tokenize_swap_function() {
    let source = "fun swap_ints void(var x int*, var y int*) { var t int }".to_string();
    let tokens = tokenize(source, Some("test.rill".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Fun);
    assert_eq!(tokens[1].kind, TokenKind::Identifier);
    assert_eq!(tokens[1].value, "swap_ints");
    assert_eq!(tokens[2].kind, TokenKind::Identifier);
    assert_eq!(tokens[2].value, "void");
    assert_eq!(tokens[3].kind, TokenKind::OpenParen);
    assert!(tokens[3].adjacent);
    assert_eq!(tokens[4].kind, TokenKind::Var);
    assert_eq!(tokens[6].value, "int");
    assert_eq!(tokens[7].kind, TokenKind::Star);
    assert!(tokens[7].adjacent);
}

#[test]
fn test_tokenize_unrecognised_token() {
    let source = "var x @".to_string();
    let result = tokenize(source, Some("test.rill".to_string()));

    assert!(result.is_err());
    assert_eq!(
        result.err().unwrap().get_error_name(),
        "LexError::UnrecognisedToken"
    );
}

#[test]
fn test_tokenize_byte_out_of_range() {
    let source = "256b".to_string();
    let result = tokenize(source, Some("test.rill".to_string()));

    assert!(result.is_err());
    assert_eq!(
        result.err().unwrap().get_error_name(),
        "LexError::MalformedLiteral"
    );
}

#[test]
fn test_tokenize_bad_escape() {
    let source = r"'\q'".to_string();
    let result = tokenize(source, Some("test.rill".to_string()));

    assert!(result.is_err());
    assert_eq!(result.err().unwrap().get_error_name(), "LexError::BadEscape");
}

#[test]
fn test_tokenize_float_not_split() {
    let source = "3.14".to_string();
    let tokens = tokenize(source, Some("test.rill".to_string())).unwrap();

    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].kind, TokenKind::Float);
}

#[test]
fn test_tokenize_positions() {
    let source = "var x int".to_string();
    let tokens = tokenize(source, Some("test.rill".to_string())).unwrap();

    assert_eq!(tokens[0].span.start.0, 0);
    assert_eq!(tokens[1].span.start.0, 4);
    assert_eq!(tokens[2].span.start.0, 6);
}
