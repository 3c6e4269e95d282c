//! Utility macros for the front end.
//!
//! This module defines helper macros used throughout the front end:
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_DEFAULT_HANDLER!` - Creates a default lexer handler for simple tokens
//!
//! These macros reduce boilerplate in the lexer implementation.

/// Creates a Token instance.
///
/// The `adjacent` flag is filled in by `Lexer::push`, which knows whether
/// whitespace was skipped since the previous token.
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Int, "42".to_string(), span);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr, $span:expr) => {
        Token {
            kind: $kind,
            value: $value,
            span: $span,
            adjacent: false,
        }
    };
}

/// Creates a default lexer handler for simple single-token patterns.
///
/// Generates a handler function that creates a token with the given kind
/// and advances the lexer position by the token's length.
///
/// # Example
///
/// ```ignore
/// RegexPattern {
///     regex: Regex::new(":=").unwrap(),
///     handler: MK_DEFAULT_HANDLER!(TokenKind::Walrus, ":="),
/// }
/// ```
#[macro_export]
macro_rules! MK_DEFAULT_HANDLER {
    ($kind:expr, $value:literal) => {
        |lexer: &mut Lexer, _regex: Regex| {
            lexer.push(MK_TOKEN!(
                $kind,
                String::from($value),
                Span {
                    start: Position(lexer.pos, Rc::clone(&lexer.file)),
                    end: Position(lexer.pos + $value.len() as u32, Rc::clone(&lexer.file))
                }
            ));
            lexer.advance_n($value.len() as u32);
            Ok(())
        }
    };
}
