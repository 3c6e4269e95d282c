//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct and the top-level parse
//! entry point. Every production in the grammar is disambiguated by a
//! fixed leading keyword or punctuation, so there is no precedence
//! machinery: statements dispatch through a lookup table keyed on the
//! leading token, and everything else is plain recursive descent.
//!
//! The grammar is whitespace-sensitive in exactly three places (pointer
//! `*`, array/index `[`, call/declaration `(`); the lexer records token
//! adjacency and the parser rejects a gap at those points.

use std::{collections::HashMap, rc::Rc};

use crate::{
    ast::ast::Program,
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    Position, Span,
};

use super::{
    lookups::{create_stmt_lookups, StmtHandler, StmtLookup},
    stmt::parse_decl,
};

/// The main parser structure that maintains parsing state.
pub struct Parser {
    /// The list of tokens to parse
    tokens: Vec<Token>,
    /// Current position in the token stream
    pos: usize,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Parser {
            tokens,
            pos: 0,
            stmt_lookup: HashMap::new(),
        }
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        self.tokens.get(self.pos).unwrap()
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.tokens.get(self.pos).unwrap().kind
    }

    /// Whether the current token directly follows the previous one, with
    /// no whitespace or comment in between.
    pub fn current_is_adjacent(&self) -> bool {
        self.tokens.get(self.pos).unwrap().adjacent
    }

    /// Advances to the next token and returns the previous token.
    pub fn advance(&mut self) -> &Token {
        self.pos += 1;
        self.tokens.get(self.pos - 1).unwrap()
    }

    /// Expects a token of the specified kind, with optional custom error.
    pub fn expect_error(
        &mut self,
        expected_kind: TokenKind,
        error: Option<Error>,
    ) -> Result<Token, Error> {
        let token = self.current_token();
        let kind = token.kind;
        if kind != expected_kind {
            match error {
                Some(error) => Err(error),
                None => Err(Error::new(
                    ErrorImpl::UnexpectedToken {
                        token: token.value.clone(),
                    },
                    token.span.start.clone(),
                )),
            }
        } else {
            Ok(self.advance().clone())
        }
    }

    /// Expects a token of the specified kind with default error message.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        self.expect_error(expected_kind, None)
    }

    /// Checks if there are more tokens to parse.
    pub fn has_tokens(&self) -> bool {
        self.pos + 1 < self.tokens.len() && self.current_token_kind() != TokenKind::EOF
    }

    /// Returns a reference to the statement lookup table.
    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    /// Registers a statement handler for a token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    /// Saves the current token position so a speculative parse can back
    /// out. Used only for the function-signature type suffix, which shares
    /// its first token with a `fun` declaration's parameter list.
    pub fn checkpoint(&self) -> usize {
        self.pos
    }

    pub fn rewind(&mut self, checkpoint: usize) {
        self.pos = checkpoint;
    }

    /// Semicolons are optional statement separators; callers drop them
    /// between statements and declarations.
    pub fn skip_semicolons(&mut self) {
        while self.current_token_kind() == TokenKind::Semicolon {
            self.advance();
        }
    }

    /// Returns the source position of the current token.
    pub fn get_position(&self) -> Position {
        self.current_token().span.start.clone()
    }
}

/// Parses a stream of tokens into a Program.
///
/// This is the main entry point for parsing. Parsing stops at the first
/// syntax error; no recovery is attempted.
pub fn parse(tokens: Vec<Token>, file: Rc<String>) -> Result<Program, Error> {
    let mut parser = Parser::new(tokens);
    create_stmt_lookups(&mut parser);

    let mut decls = vec![];

    parser.skip_semicolons();
    while parser.has_tokens() {
        decls.push(parse_decl(&mut parser)?);
        parser.skip_semicolons();
    }

    Ok(Program {
        decls,
        span: Span {
            start: Position(0, Rc::clone(&file)),
            end: parser.get_position(),
        },
    })
}
