use std::rc::Rc;

use regex::Regex;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position, Span, MK_DEFAULT_HANDLER, MK_TOKEN,
};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

pub type RegexHandler = fn(&mut Lexer, Regex) -> Result<(), Error>;

#[derive(Clone)]
pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

#[derive(Clone)]
pub struct Lexer {
    patterns: Vec<RegexPattern>,
    tokens: Vec<Token>,
    source: String,
    pos: u32,
    file: Rc<String>,
    /// Whether whitespace or a comment was skipped since the last token.
    /// Cleared when the next token is pushed; that token gets
    /// `adjacent = false`.
    gap: bool,
}

impl Lexer {
    pub fn new(source: String, file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        Lexer {
            pos: 0,
            tokens: vec![],
            patterns: vec![
                RegexPattern { regex: Regex::new("\\s+").unwrap(), handler: skip_handler },
                RegexPattern { regex: Regex::new("\\/\\/.*").unwrap(), handler: skip_handler },
                // Literal order matters: floats before byte literals before
                // integers, so "3.14" and "42b" are not split apart.
                RegexPattern { regex: Regex::new("-?[0-9]+(\\.[0-9]+([eE][+-]?[0-9]+)?|[eE][+-]?[0-9]+)").unwrap(), handler: float_handler },
                RegexPattern { regex: Regex::new("[0-9]+b").unwrap(), handler: byte_handler },
                RegexPattern { regex: Regex::new("-?[0-9]+").unwrap(), handler: int_handler },
                RegexPattern { regex: Regex::new("'(\\\\.|[^'\\\\])'").unwrap(), handler: char_handler },
                RegexPattern { regex: Regex::new("[a-zA-Z_][a-zA-Z0-9_]*").unwrap(), handler: symbol_handler },
                RegexPattern { regex: Regex::new(":=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Walrus, ":=") },
                RegexPattern { regex: Regex::new("\\[").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenBracket, "[") },
                RegexPattern { regex: Regex::new("\\]").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseBracket, "]") },
                RegexPattern { regex: Regex::new("\\{").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenCurly, "{") },
                RegexPattern { regex: Regex::new("\\}").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseCurly, "}") },
                RegexPattern { regex: Regex::new("\\(").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenParen, "(") },
                RegexPattern { regex: Regex::new("\\)").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseParen, ")") },
                RegexPattern { regex: Regex::new("\\*").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Star, "*") },
                RegexPattern { regex: Regex::new(",").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Comma, ",") },
                RegexPattern { regex: Regex::new(";").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Semicolon, ";") },
            ],
            source,
            file: file_name,
            gap: false,
        }
    }

    pub fn advance_n(&mut self, n: u32) {
        self.pos += n;
    }

    pub fn push(&mut self, mut token: Token) {
        token.adjacent = !self.gap;
        self.gap = false;
        self.tokens.push(token);
    }

    pub fn at(&self) -> char {
        self.source.as_bytes()[self.pos as usize] as char
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos as usize..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos as usize >= self.source.len()
    }
}

fn skip_handler(lexer: &mut Lexer, regex: Regex) -> Result<(), Error> {
    let matched = regex.find(lexer.remainder()).unwrap().end();
    lexer.advance_n(matched as u32);
    lexer.gap = true;
    Ok(())
}

fn int_handler(lexer: &mut Lexer, regex: Regex) -> Result<(), Error> {
    let matched = regex.find(lexer.remainder()).unwrap().as_str().to_string();

    lexer.push(MK_TOKEN!(
        TokenKind::Int,
        matched.clone(),
        Span {
            start: Position(lexer.pos, Rc::clone(&lexer.file)),
            end: Position(lexer.pos + matched.len() as u32, Rc::clone(&lexer.file))
        }
    ));
    lexer.advance_n(matched.len() as u32);
    Ok(())
}

fn float_handler(lexer: &mut Lexer, regex: Regex) -> Result<(), Error> {
    let matched = regex.find(lexer.remainder()).unwrap().as_str().to_string();

    lexer.push(MK_TOKEN!(
        TokenKind::Float,
        matched.clone(),
        Span {
            start: Position(lexer.pos, Rc::clone(&lexer.file)),
            end: Position(lexer.pos + matched.len() as u32, Rc::clone(&lexer.file))
        }
    ));
    lexer.advance_n(matched.len() as u32);
    Ok(())
}

/// Digit-form byte literal: `42b`. The token value is the digits only.
fn byte_handler(lexer: &mut Lexer, regex: Regex) -> Result<(), Error> {
    let matched = regex.find(lexer.remainder()).unwrap().as_str().to_string();
    let digits = &matched[..matched.len() - 1];

    if digits.parse::<u8>().is_err() {
        return Err(Error::new(
            ErrorImpl::MalformedLiteral { token: matched.clone() },
            Position(lexer.pos, Rc::clone(&lexer.file)),
        ));
    }

    lexer.push(MK_TOKEN!(
        TokenKind::Byte,
        digits.to_string(),
        Span {
            start: Position(lexer.pos, Rc::clone(&lexer.file)),
            end: Position(lexer.pos + matched.len() as u32, Rc::clone(&lexer.file))
        }
    ));
    lexer.advance_n(matched.len() as u32);
    Ok(())
}

/// Quoted-form byte literal: `'a'`, `'\n'`. The token value is the decimal
/// byte value, same as the digit form.
fn char_handler(lexer: &mut Lexer, regex: Regex) -> Result<(), Error> {
    let matched = regex.find(lexer.remainder()).unwrap().as_str().to_string();
    let inner = &matched[1..matched.len() - 1];

    let value: u8 = if let Some(escape) = inner.strip_prefix('\\') {
        match escape {
            "n" => b'\n',
            "t" => b'\t',
            "r" => b'\r',
            "0" => 0,
            "\\" => b'\\',
            "'" => b'\'',
            _ => {
                return Err(Error::new(
                    ErrorImpl::BadEscape { escape: inner.to_string() },
                    Position(lexer.pos, Rc::clone(&lexer.file)),
                ))
            }
        }
    } else {
        let ch = inner.chars().next().unwrap();
        if !ch.is_ascii() {
            return Err(Error::new(
                ErrorImpl::MalformedLiteral { token: matched.clone() },
                Position(lexer.pos, Rc::clone(&lexer.file)),
            ));
        }
        ch as u8
    };

    lexer.push(MK_TOKEN!(
        TokenKind::Byte,
        value.to_string(),
        Span {
            start: Position(lexer.pos, Rc::clone(&lexer.file)),
            end: Position(lexer.pos + matched.len() as u32, Rc::clone(&lexer.file))
        }
    ));
    lexer.advance_n(matched.len() as u32);
    Ok(())
}

fn symbol_handler(lexer: &mut Lexer, regex: Regex) -> Result<(), Error> {
    let value = regex.find(lexer.remainder()).unwrap().as_str().to_string();

    let kind = if let Some(kind) = RESERVED_LOOKUP.get(value.as_str()) {
        *kind
    } else {
        TokenKind::Identifier
    };

    lexer.push(MK_TOKEN!(
        kind,
        value.clone(),
        Span {
            start: Position(lexer.pos, Rc::clone(&lexer.file)),
            end: Position(lexer.pos + value.len() as u32, Rc::clone(&lexer.file))
        }
    ));
    lexer.advance_n(value.len() as u32);
    Ok(())
}

pub fn tokenize(source: String, file: Option<String>) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(source, file);

    while !lex.at_eof() {
        let mut matched = false;

        for pattern in lex.clone().patterns.iter() {
            let match_here = pattern.regex.find(lex.remainder());

            if match_here.is_some() && match_here.unwrap().start() == 0 {
                (pattern.handler)(&mut lex, pattern.regex.clone())?;
                matched = true;
                break;
            }
        }

        if !matched {
            return Err(Error::new(
                ErrorImpl::UnrecognisedToken { token: lex.at().to_string() },
                Position(lex.pos, Rc::clone(&lex.file)),
            ));
        }
    }

    lex.push(MK_TOKEN!(
        TokenKind::EOF,
        String::from("EOF"),
        Span {
            start: Position(lex.pos, Rc::clone(&lex.file)),
            end: Position(lex.pos, Rc::clone(&lex.file))
        }
    ));
    Ok(lex.tokens)
}
