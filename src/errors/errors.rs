use std::fmt::Display;

use thiserror::Error;

use crate::Position;

/// One diagnostic: an error kind plus the source position it points at.
///
/// `get_error_name` returns the taxonomy name (`"NameError::Duplicate"`),
/// `get_tip` a human suggestion, and `severity` the reporting level.
#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "Error"),
            Severity::Warning => write!(f, "Warning"),
        }
    }
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn severity(&self) -> Severity {
        // Every kind in the current taxonomy rejects the unit.
        Severity::Error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "LexError::UnrecognisedToken",
            ErrorImpl::BadEscape { .. } => "LexError::BadEscape",
            ErrorImpl::MalformedLiteral { .. } => "LexError::MalformedLiteral",
            ErrorImpl::UnexpectedToken { .. } => "SyntaxError::UnexpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "SyntaxError::UnexpectedToken",
            ErrorImpl::IllegalWhitespace { .. } => "SyntaxError::IllegalWhitespace",
            ErrorImpl::DuplicateDeclaration { .. } => "NameError::Duplicate",
            ErrorImpl::UndefinedIdentifier { .. } => "NameError::UndefinedIdentifier",
            ErrorImpl::UndefinedLabel { .. } => "NameError::UndefinedLabel",
            ErrorImpl::ReservedName { .. } => "NameError::ReservedName",
            ErrorImpl::AssignmentMismatch { .. } => "TypeError::AssignmentMismatch",
            ErrorImpl::ArgumentMismatch { .. } => "TypeError::ArgumentMismatch",
            ErrorImpl::UnexpectedArguments { .. } => "TypeError::UnexpectedArguments",
            ErrorImpl::CompositeShapeMismatch { .. } => "TypeError::CompositeShapeMismatch",
            ErrorImpl::InvalidArraySize { .. } => "TypeError::InvalidArraySize",
            ErrorImpl::NonIntCondition { .. } => "TypeError::NonIntCondition",
            ErrorImpl::NonIntIndex { .. } => "TypeError::NonIntIndex",
            ErrorImpl::SelfContainingStruct { .. } => "TypeError::SelfContainingStruct",
            ErrorImpl::UnknownType { .. } => "TypeError::UnknownType",
            ErrorImpl::InvalidVoid => "TypeError::InvalidVoid",
            ErrorImpl::NotCallable { .. } => "TypeError::NotCallable",
            ErrorImpl::NotIndexable { .. } => "TypeError::NotIndexable",
            ErrorImpl::UnknownField { .. } => "TypeError::UnknownField",
            ErrorImpl::NotAddressable { .. } => "TypeError::NotAddressable",
            ErrorImpl::NotInLoop { .. } => "ControlFlowError::NotInLoop",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::BadEscape { escape } => {
                ErrorTip::Suggestion(format!("`{}` is not a recognised escape", escape))
            }
            ErrorImpl::MalformedLiteral { token } => ErrorTip::Suggestion(format!(
                "`{}` does not fit its literal type, is it out of range?",
                token
            )),
            ErrorImpl::UnexpectedToken { token } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`", token))
            }
            ErrorImpl::UnexpectedTokenDetailed { token, message } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`, {}", token, message))
            }
            ErrorImpl::IllegalWhitespace { token } => ErrorTip::Suggestion(format!(
                "whitespace is not allowed before `{}` here",
                token
            )),
            ErrorImpl::DuplicateDeclaration { name } => {
                ErrorTip::Suggestion(format!("`{}` is already declared in this scope", name))
            }
            ErrorImpl::UndefinedIdentifier { name } => {
                ErrorTip::Suggestion(format!("`{}` is not declared", name))
            }
            ErrorImpl::UndefinedLabel { label } => ErrorTip::Suggestion(format!(
                "no `label {}` exists in this function",
                label
            )),
            ErrorImpl::ReservedName { name } => ErrorTip::Suggestion(format!(
                "`{}` starts with `_`, which is reserved for builtins",
                name
            )),
            ErrorImpl::AssignmentMismatch { expected, received } => ErrorTip::Suggestion(
                format!("Expected type `{}`, received `{}`", expected, received),
            ),
            ErrorImpl::ArgumentMismatch { expected, received } => ErrorTip::Suggestion(format!(
                "Expected argument type `{}`, received `{}`",
                expected, received
            )),
            ErrorImpl::UnexpectedArguments { expected, received } => ErrorTip::Suggestion(
                format!("Expected {} arguments, received {}", expected, received),
            ),
            ErrorImpl::CompositeShapeMismatch { expected, received } => ErrorTip::Suggestion(
                format!("Expected {}, received {}", expected, received),
            ),
            ErrorImpl::InvalidArraySize { size } => ErrorTip::Suggestion(format!(
                "`{}` is not a positive integer constant",
                size
            )),
            ErrorImpl::NonIntCondition { received } => ErrorTip::Suggestion(format!(
                "conditions must be `int` (non-zero is true), received `{}`",
                received
            )),
            ErrorImpl::NonIntIndex { received } => ErrorTip::Suggestion(format!(
                "array subscripts must be `int`, received `{}`",
                received
            )),
            ErrorImpl::SelfContainingStruct { name } => ErrorTip::Suggestion(format!(
                "`{}` contains itself by value, use a pointer field instead",
                name
            )),
            ErrorImpl::UnknownType { type_ } => {
                ErrorTip::Suggestion(format!("Unknown type `{}` found", type_))
            }
            ErrorImpl::InvalidVoid => ErrorTip::Suggestion(String::from(
                "`void` is only valid as a return type",
            )),
            ErrorImpl::NotCallable { name } => {
                ErrorTip::Suggestion(format!("`{}` is not a function or function pointer", name))
            }
            ErrorImpl::NotIndexable { received } => ErrorTip::Suggestion(format!(
                "`{}` is not an array, pointer or struct",
                received
            )),
            ErrorImpl::UnknownField { field, strukt } => ErrorTip::Suggestion(format!(
                "struct `{}` has no field `{}`",
                strukt, field
            )),
            ErrorImpl::NotAddressable { target } => ErrorTip::Suggestion(format!(
                "`{}` has no storage location",
                target
            )),
            ErrorImpl::NotInLoop { keyword } => ErrorTip::Suggestion(format!(
                "`{}` is only valid inside a `while` body",
                keyword
            )),
        }
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone)]
pub enum ErrorImpl {
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("bad escape sequence: {escape:?}")]
    BadEscape { escape: String },
    #[error("malformed literal: {token:?}")]
    MalformedLiteral { token: String },
    #[error("unexpected token: {token:?}")]
    UnexpectedToken { token: String },
    #[error("unexpected token ({message:?}): {token:?}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("illegal whitespace before {token:?}")]
    IllegalWhitespace { token: String },
    #[error("{name:?} already declared in this scope")]
    DuplicateDeclaration { name: String },
    #[error("{name:?} not declared")]
    UndefinedIdentifier { name: String },
    #[error("label {label:?} not declared in this function")]
    UndefinedLabel { label: String },
    #[error("{name:?} uses the reserved builtin prefix")]
    ReservedName { name: String },
    #[error("assignment types do not match: expected {expected:?}, received {received:?}")]
    AssignmentMismatch { expected: String, received: String },
    #[error("argument types do not match: expected {expected:?}, received {received:?}")]
    ArgumentMismatch { expected: String, received: String },
    #[error("unexpected arguments: expected {expected:?}, received {received:?}")]
    UnexpectedArguments { expected: usize, received: usize },
    #[error("composite literal does not match its target: expected {expected:?}, received {received:?}")]
    CompositeShapeMismatch { expected: String, received: String },
    #[error("invalid array size: {size:?}")]
    InvalidArraySize { size: String },
    #[error("condition is not an int: {received:?}")]
    NonIntCondition { received: String },
    #[error("array subscript is not an int: {received:?}")]
    NonIntIndex { received: String },
    #[error("struct {name:?} contains itself by value")]
    SelfContainingStruct { name: String },
    #[error("unknown type {type_} found")]
    UnknownType { type_: String },
    #[error("void is only valid as a return type")]
    InvalidVoid,
    #[error("{name:?} is not callable")]
    NotCallable { name: String },
    #[error("{received:?} cannot be indexed or selected into")]
    NotIndexable { received: String },
    #[error("struct {strukt:?} has no field {field:?}")]
    UnknownField { field: String, strukt: String },
    #[error("{target:?} is not addressable")]
    NotAddressable { target: String },
    #[error("{keyword:?} outside of a loop")]
    NotInLoop { keyword: String },
}
