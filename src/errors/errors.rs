use std::fmt::Display;

use thiserror::Error;

use crate::{lexer::tokens::TokenKind, Position};

/// A syntax error recorded by the parser.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    internal_error: ParseErrorKind,
    position: Position,
}

impl ParseError {
    pub fn new(error_kind: ParseErrorKind, position: Position) -> Self {
        ParseError {
            internal_error: error_kind,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn kind(&self) -> &ParseErrorKind {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ParseErrorKind::UnexpectedToken { .. } => "UnexpectedToken",
            ParseErrorKind::NoPrefixRule { .. } => "NoPrefixRule",
            ParseErrorKind::MalformedInteger { .. } => "MalformedInteger",
            ParseErrorKind::MalformedParameterList { .. } => "MalformedParameterList",
            ParseErrorKind::Unterminated { .. } => "Unterminated",
            ParseErrorKind::IllegalToken { .. } => "IllegalToken",
            ParseErrorKind::NestingTooDeep { .. } => "NestingTooDeep",
        }
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.position, self.internal_error)
    }
}

impl std::error::Error for ParseError {}

/// Constructs that must be closed by a matching token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Construct {
    Block,
    Group,
    String,
    ArgumentList,
}

impl Display for Construct {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Construct::Block => write!(f, "block"),
            Construct::Group => write!(f, "group"),
            Construct::String => write!(f, "string literal"),
            Construct::ArgumentList => write!(f, "argument list"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseErrorKind {
    #[error("expected `{expected}`, got `{found}`")]
    UnexpectedToken { expected: TokenKind, found: String },
    #[error("no prefix parse rule for `{token}`")]
    NoPrefixRule { token: String },
    #[error("could not parse `{literal}` as a 64-bit integer")]
    MalformedInteger { literal: String },
    #[error("malformed parameter list: expected identifier, got `{found}`")]
    MalformedParameterList { found: String },
    #[error("unterminated {construct}")]
    Unterminated { construct: Construct },
    #[error("illegal character `{literal}`")]
    IllegalToken { literal: String },
    #[error("nesting deeper than {limit} levels")]
    NestingTooDeep { limit: usize },
}

/// A failure raised while evaluating a program.
///
/// These surface to users as `Value::Error`, never as a panic.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuntimeError {
    #[error("identifier not found: {name}")]
    IdentifierNotFound { name: String },
    #[error("bad operand for prefix `{operator}`: {operand}")]
    BadPrefixOperand { operator: String, operand: String },
    #[error("bad expression: {left} {operator} {right}")]
    BadInfixOperands {
        left: String,
        operator: String,
        right: String,
    },
    #[error("unknown operator: {operator}")]
    UnknownOperator { operator: String },
    #[error("division by zero: {left} {operator} 0")]
    DivisionByZero { left: i64, operator: String },
    #[error("not a function: {value}")]
    NotAFunction { value: String },
    #[error("wrong number of arguments: expected {expected}, got {received}")]
    ArgumentCountMismatch { expected: usize, received: usize },
    #[error("bad operand for `{operator}{name}`: {value}")]
    BadIncDecOperand {
        operator: String,
        name: String,
        value: String,
    },
}
