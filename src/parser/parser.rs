//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct and the `parse` entry point.
//! The parser uses a Pratt parser approach with NUD/LED handlers for
//! expression parsing and specialized functions for statement parsing.
//!
//! It maintains lookup tables for:
//! - Statement handlers
//! - NUD (null denotation) handlers for prefix expressions
//! - LED (left denotation) handlers for infix expressions
//! - Binding powers for operator precedence
//!
//! Tokens are pulled lazily from any iterator, one token beyond `current`.

use std::{collections::HashMap, mem};

use tracing::debug;

use crate::{
    ast::ast::Program,
    errors::errors::{ParseError, ParseErrorKind},
    lexer::tokens::{Token, TokenKind},
    Position, MK_TOKEN,
};

use super::{
    lookups::{
        create_token_lookups, BPLookup, BindingPower, LEDHandler, LEDLookup, NUDHandler,
        NUDLookup, StmtHandler, StmtLookup,
    },
    stmt::parse_stmt,
};

/// The main parser structure that maintains parsing state.
pub struct Parser {
    /// Remaining tokens, pulled on demand
    tokens: Box<dyn Iterator<Item = Token>>,
    current: Token,
    peek: Token,
    /// Errors recorded so far, in source order
    errors: Vec<ParseError>,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup,
    /// Lookup table for null denotation (prefix) expression handlers
    nud_lookup: NUDLookup,
    /// Lookup table for left denotation (infix) expression handlers
    led_lookup: LEDLookup,
    /// Lookup table for expression binding powers (precedence)
    binding_power_lookup: BPLookup,
    /// Depth of the node being built, counted in expressions and blocks
    nesting: usize,
}

/// Deepest expression or block nesting the parser accepts.
pub const MAX_NESTING: usize = 256;

impl Parser {
    pub fn new<I>(tokens: I) -> Self
    where
        I: IntoIterator<Item = Token>,
        I::IntoIter: 'static,
    {
        let mut tokens: Box<dyn Iterator<Item = Token>> = Box::new(tokens.into_iter());

        let current = tokens
            .next()
            .unwrap_or_else(|| MK_TOKEN!(TokenKind::EOF, String::new(), Position::start()));
        let peek = Self::pull(&mut tokens, &current);

        Parser {
            tokens,
            current,
            peek,
            errors: Vec::new(),
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
            nesting: 0,
        }
    }

    /// Pulls the token after `last`, synthesizing `EOF` once the source runs dry.
    fn pull(tokens: &mut Box<dyn Iterator<Item = Token>>, last: &Token) -> Token {
        if last.is(TokenKind::EOF) {
            return last.clone();
        }

        tokens
            .next()
            .unwrap_or_else(|| MK_TOKEN!(TokenKind::EOF, String::new(), last.position))
    }

    pub fn current_token(&self) -> &Token {
        &self.current
    }

    pub fn current_token_kind(&self) -> TokenKind {
        self.current.kind
    }

    pub fn peek_token(&self) -> &Token {
        &self.peek
    }

    pub fn peek_token_kind(&self) -> TokenKind {
        self.peek.kind
    }

    pub fn current_is(&self, kind: TokenKind) -> bool {
        self.current.is(kind)
    }

    pub fn peek_is(&self, kind: TokenKind) -> bool {
        self.peek.is(kind)
    }

    /// Shifts the lookahead into `current` and returns the new current token.
    pub fn advance(&mut self) -> &Token {
        let next = Self::pull(&mut self.tokens, &self.peek);
        self.current = mem::replace(&mut self.peek, next);
        &self.current
    }

    /// Advances if the lookahead has the expected kind.
    ///
    /// On a mismatch nothing is consumed and the error is positioned at the
    /// current token.
    pub fn expect_peek(&mut self, expected_kind: TokenKind) -> Result<&Token, ParseError> {
        if self.peek_is(expected_kind) {
            return Ok(self.advance());
        }

        Err(ParseError::new(
            ParseErrorKind::UnexpectedToken {
                expected: expected_kind,
                found: self.peek.describe(),
            },
            self.get_position(),
        ))
    }

    /// Error located at the current token.
    pub fn error_here(&self, kind: ParseErrorKind) -> ParseError {
        ParseError::new(kind, self.get_position())
    }

    pub fn record_error(&mut self, error: ParseError) {
        debug!(%error, "parse error");
        self.errors.push(error);
    }

    /// Skips to the end of the broken statement.
    ///
    /// Stops on a `;`, or just before a `}` or `EOF`, so the caller's
    /// statement loop can resume with its usual advance.
    pub fn synchronize(&mut self) {
        while !self.current_is(TokenKind::Semicolon)
            && !self.peek_is(TokenKind::CloseCurly)
            && !self.peek_is(TokenKind::EOF)
        {
            self.advance();
        }
    }

    pub fn nesting(&self) -> usize {
        self.nesting
    }

    pub fn set_nesting(&mut self, nesting: usize) {
        self.nesting = nesting;
    }

    /// Goes one level deeper, failing once `MAX_NESTING` is passed.
    pub fn nest(&mut self) -> Result<(), ParseError> {
        self.nesting += 1;
        if self.nesting > MAX_NESTING {
            return Err(self.error_here(ParseErrorKind::NestingTooDeep { limit: MAX_NESTING }));
        }
        Ok(())
    }

    /// Binding power of the lookahead, `Default` if it cannot continue an expression.
    pub fn peek_binding_power(&self) -> BindingPower {
        *self
            .binding_power_lookup
            .get(&self.peek.kind)
            .unwrap_or(&BindingPower::Default)
    }

    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    pub fn get_led_lookup(&self) -> &LEDLookup {
        &self.led_lookup
    }

    /// Registers a left denotation (infix) handler for a token.
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (prefix) handler for a token.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a statement handler for a token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    /// Returns the position of the current token.
    pub fn get_position(&self) -> Position {
        self.current.position
    }
}

/// Parses a stream of tokens into a program.
///
/// This is the main entry point for parsing. It creates a parser instance,
/// initializes all lookup tables, and parses statements until EOF. Errors
/// do not stop the parse: each one is recorded and the parser resumes at
/// the next statement. A program returned alongside errors is partial.
pub fn parse<I>(tokens: I) -> (Program, Vec<ParseError>)
where
    I: IntoIterator<Item = Token>,
    I::IntoIter: 'static,
{
    let mut parser = Parser::new(tokens);
    create_token_lookups(&mut parser);

    let mut body = vec![];

    while !parser.current_is(TokenKind::EOF) {
        match parse_stmt(&mut parser) {
            Ok(stmt) => body.push(stmt),
            // The rest of an over-deep construct cannot be resynchronized
            Err(error) if matches!(error.kind(), ParseErrorKind::NestingTooDeep { .. }) => {
                parser.record_error(error);
                break;
            }
            Err(error) => {
                parser.record_error(error);
                parser.synchronize();
            }
        }
        parser.advance();
    }

    (Program { body }, parser.errors)
}
