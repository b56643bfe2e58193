use crate::{
    ast::{
        ast::Stmt,
        statements::{BlockStmt, ExpressionStmt, LetStmt, ReturnStmt},
    },
    errors::errors::{Construct, ParseError, ParseErrorKind},
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::BindingPower},
};

use super::{expr::parse_identifier, parser::Parser};

pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, ParseError> {
    let token_kind = parser.current_token_kind();
    let handler = parser.get_stmt_lookup().get(&token_kind).copied();
    if let Some(handler) = handler {
        return handler(parser);
    }

    let expression = parse_expr(parser, BindingPower::Default)?;

    // The terminator is optional for expression statements
    if parser.peek_is(TokenKind::Semicolon) {
        parser.advance();
    }

    Ok(Stmt::Expression(ExpressionStmt { expression }))
}

pub fn parse_let_stmt(parser: &mut Parser) -> Result<Stmt, ParseError> {
    let token = parser.current_token().clone();

    parser.expect_peek(TokenKind::Identifier)?;
    let name = parse_identifier(parser);

    parser.expect_peek(TokenKind::Assignment)?;
    parser.advance();
    let value = parse_expr(parser, BindingPower::Default)?;

    parser.expect_peek(TokenKind::Semicolon)?;

    Ok(Stmt::Let(LetStmt { token, name, value }))
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Stmt, ParseError> {
    let token = parser.current_token().clone();

    if parser.peek_is(TokenKind::Semicolon) {
        parser.advance();
        return Ok(Stmt::Return(ReturnStmt { token, value: None }));
    }

    parser.advance();
    let value = parse_expr(parser, BindingPower::Default)?;
    parser.expect_peek(TokenKind::Semicolon)?;

    Ok(Stmt::Return(ReturnStmt {
        token,
        value: Some(value),
    }))
}

pub fn parse_block_stmt(parser: &mut Parser) -> Result<Stmt, ParseError> {
    Ok(Stmt::Block(parse_block(parser)?))
}

/// Parses `{ ... }` with `current` on the opening brace, leaving it on the closing one.
///
/// Errors inside the block are recorded and skipped so the remaining
/// statements still parse.
pub fn parse_block(parser: &mut Parser) -> Result<BlockStmt, ParseError> {
    let nesting = parser.nesting();
    let result = parse_nested_block(parser);
    parser.set_nesting(nesting);
    result
}

fn parse_nested_block(parser: &mut Parser) -> Result<BlockStmt, ParseError> {
    let token = parser.current_token().clone();
    parser.nest()?;
    parser.advance();

    let mut body = Vec::new();
    while !parser.current_is(TokenKind::CloseCurly) {
        if parser.current_is(TokenKind::EOF) {
            return Err(parser.error_here(ParseErrorKind::Unterminated {
                construct: Construct::Block,
            }));
        }

        match parse_stmt(parser) {
            Ok(stmt) => body.push(stmt),
            Err(error) if matches!(error.kind(), ParseErrorKind::NestingTooDeep { .. }) => {
                return Err(error)
            }
            Err(error) => {
                let stalled = stalled_on_close(parser, &error);
                parser.record_error(error);
                if stalled {
                    continue;
                }
                parser.synchronize();
            }
        }
        parser.advance();
    }

    Ok(BlockStmt { token, body })
}

/// Whether a statement failed on this block's own `}` without consuming it.
///
/// Only rules that reject the current token leave it unconsumed. A `}` that
/// closed an inner function body is current after an `expect_peek` failure,
/// and the block must still skip past it.
fn stalled_on_close(parser: &Parser, error: &ParseError) -> bool {
    parser.current_is(TokenKind::CloseCurly)
        && matches!(
            error.kind(),
            ParseErrorKind::NoPrefixRule { .. } | ParseErrorKind::MalformedParameterList { .. }
        )
}
