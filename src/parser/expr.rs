use std::rc::Rc;

use crate::{
    ast::{
        ast::Expr,
        expressions::{
            BooleanExpr, CallExpr, FunctionExpr, IdentifierExpr, IfExpr, IncDecExpr, InfixExpr,
            IntegerExpr, PrefixExpr, StringExpr,
        },
    },
    errors::errors::{Construct, ParseError, ParseErrorKind},
    lexer::tokens::TokenKind,
};

use super::{
    lookups::BindingPower,
    parser::Parser,
    stmt::{parse_block, parse_stmt},
};

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, ParseError> {
    let nesting = parser.nesting();
    let result = parse_nested_expr(parser, bp);
    parser.set_nesting(nesting);
    result
}

fn parse_nested_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, ParseError> {
    parser.nest()?;

    // First parse NUD
    let token_kind = parser.current_token_kind();
    let nud = match parser.get_nud_lookup().get(&token_kind) {
        Some(handler) => *handler,
        None => return Err(missing_prefix_error(parser)),
    };

    let mut left = nud(parser)?;

    // While the lookahead binds tighter than bp, fold it into lhs
    while !parser.peek_is(TokenKind::Semicolon) && parser.peek_binding_power() > bp {
        let led = match parser.get_led_lookup().get(&parser.peek_token_kind()) {
            Some(handler) => *handler,
            None => return Ok(left),
        };
        let operator_bp = parser.peek_binding_power();

        // Each fold deepens the left operand
        parser.nest()?;
        parser.advance();
        left = led(parser, left, operator_bp)?;
    }

    Ok(left)
}

fn missing_prefix_error(parser: &Parser) -> ParseError {
    let token = parser.current_token();

    let kind = if token.is(TokenKind::Illegal) && token.literal.starts_with('"') {
        ParseErrorKind::Unterminated {
            construct: Construct::String,
        }
    } else if token.is(TokenKind::Illegal) {
        ParseErrorKind::IllegalToken {
            literal: token.literal.clone(),
        }
    } else {
        ParseErrorKind::NoPrefixRule {
            token: token.describe(),
        }
    };

    parser.error_here(kind)
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, ParseError> {
    let token = parser.current_token().clone();

    match token.kind {
        TokenKind::Integer => match token.literal.parse::<i64>() {
            Ok(value) => Ok(Expr::Integer(IntegerExpr { token, value })),
            Err(_) => Err(parser.error_here(ParseErrorKind::MalformedInteger {
                literal: token.literal,
            })),
        },
        TokenKind::Identifier => Ok(Expr::Identifier(parse_identifier(parser))),
        TokenKind::String => Ok(Expr::String(StringExpr {
            value: token.literal.clone(),
            token,
        })),
        TokenKind::True | TokenKind::False => Ok(Expr::Boolean(BooleanExpr {
            value: token.is(TokenKind::True),
            token,
        })),
        _ => Err(parser.error_here(ParseErrorKind::NoPrefixRule {
            token: token.describe(),
        })),
    }
}

/// Builds an identifier node from the current token.
pub fn parse_identifier(parser: &Parser) -> IdentifierExpr {
    let token = parser.current_token().clone();
    IdentifierExpr {
        value: token.literal.clone(),
        token,
    }
}

pub fn parse_infix_expr(
    parser: &mut Parser,
    left: Expr,
    bp: BindingPower,
) -> Result<Expr, ParseError> {
    let operator = parser.current_token().clone();
    parser.advance();

    let right = parse_expr(parser, bp)?;

    Ok(Expr::Infix(InfixExpr {
        left: Box::new(left),
        operator,
        right: Box::new(right),
    }))
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Expr, ParseError> {
    let operator = parser.current_token().clone();
    parser.advance();

    let right_expr = parse_expr(parser, BindingPower::Prefix)?;

    Ok(Expr::Prefix(PrefixExpr {
        operator,
        right_expr: Box::new(right_expr),
    }))
}

pub fn parse_inc_dec_expr(parser: &mut Parser) -> Result<Expr, ParseError> {
    let operator = parser.current_token().clone();
    parser.expect_peek(TokenKind::Identifier)?;

    Ok(Expr::IncDec(IncDecExpr {
        operator,
        identifier: parse_identifier(parser),
    }))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, ParseError> {
    parser.advance();
    let expr = parse_expr(parser, BindingPower::Default)?;

    if parser.peek_is(TokenKind::EOF) {
        return Err(parser.error_here(ParseErrorKind::Unterminated {
            construct: Construct::Group,
        }));
    }
    parser.expect_peek(TokenKind::CloseParen)?;

    Ok(expr)
}

pub fn parse_function_expr(parser: &mut Parser) -> Result<Expr, ParseError> {
    let token = parser.current_token().clone();

    parser.expect_peek(TokenKind::OpenParen)?;
    let parameters = parse_parameters(parser)?;

    parser.expect_peek(TokenKind::OpenCurly)?;
    let body = parse_block(parser)?;

    Ok(Expr::Function(Rc::new(FunctionExpr {
        token,
        parameters,
        body,
    })))
}

/// Parses `a, b, c)` with `current` on the opening parenthesis.
fn parse_parameters(parser: &mut Parser) -> Result<Vec<IdentifierExpr>, ParseError> {
    let mut parameters = vec![];

    if parser.peek_is(TokenKind::CloseParen) {
        parser.advance();
        return Ok(parameters);
    }

    parser.advance();
    loop {
        if !parser.current_is(TokenKind::Identifier) {
            return Err(parser.error_here(ParseErrorKind::MalformedParameterList {
                found: parser.current_token().describe(),
            }));
        }
        parameters.push(parse_identifier(parser));

        match parser.peek_token_kind() {
            TokenKind::Comma => {
                parser.advance();
                parser.advance();
            }
            TokenKind::CloseParen => {
                parser.advance();
                return Ok(parameters);
            }
            _ => {
                return Err(parser.error_here(ParseErrorKind::MalformedParameterList {
                    found: parser.peek_token().describe(),
                }))
            }
        }
    }
}

pub fn parse_if_expr(parser: &mut Parser) -> Result<Expr, ParseError> {
    let token = parser.current_token().clone();

    parser.expect_peek(TokenKind::OpenParen)?;
    parser.advance();
    let condition = parse_expr(parser, BindingPower::Default)?;
    parser.expect_peek(TokenKind::CloseParen)?;

    parser.advance();
    let then_body = parse_stmt(parser)?;

    let else_body = if parser.peek_is(TokenKind::Else) {
        parser.advance();
        parser.advance();
        Some(Box::new(parse_stmt(parser)?))
    } else {
        None
    };

    Ok(Expr::If(IfExpr {
        token,
        condition: Box::new(condition),
        then_body: Box::new(then_body),
        else_body,
    }))
}

pub fn parse_call_expr(
    parser: &mut Parser,
    left: Expr,
    _bp: BindingPower,
) -> Result<Expr, ParseError> {
    let token = parser.current_token().clone();
    let mut arguments = vec![];

    if parser.peek_is(TokenKind::CloseParen) {
        parser.advance();
    } else {
        parser.advance();
        arguments.push(parse_expr(parser, BindingPower::Default)?);

        while parser.peek_is(TokenKind::Comma) {
            parser.advance();
            parser.advance();
            arguments.push(parse_expr(parser, BindingPower::Default)?);
        }

        if parser.peek_is(TokenKind::EOF) {
            return Err(parser.error_here(ParseErrorKind::Unterminated {
                construct: Construct::ArgumentList,
            }));
        }
        parser.expect_peek(TokenKind::CloseParen)?;
    }

    Ok(Expr::Call(CallExpr {
        token,
        callee: Box::new(left),
        arguments,
    }))
}
