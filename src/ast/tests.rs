//! Unit tests for canonical AST rendering.

use std::rc::Rc;

use pretty_assertions::assert_eq;

use crate::{
    lexer::tokens::{Token, TokenKind},
    Position,
};

use super::{
    ast::{Expr, Program, Stmt},
    expressions::{
        CallExpr, FunctionExpr, IdentifierExpr, IfExpr, InfixExpr, IntegerExpr, PrefixExpr,
        StringExpr,
    },
    statements::{BlockStmt, ExpressionStmt, LetStmt, ReturnStmt},
};

fn token(kind: TokenKind, literal: &str) -> Token {
    Token {
        kind,
        literal: literal.to_string(),
        position: Position::start(),
    }
}

fn ident(name: &str) -> IdentifierExpr {
    IdentifierExpr {
        token: token(TokenKind::Identifier, name),
        value: name.to_string(),
    }
}

fn integer(value: i64) -> Expr {
    Expr::Integer(IntegerExpr {
        token: token(TokenKind::Integer, &value.to_string()),
        value,
    })
}

fn infix(left: Expr, operator: TokenKind, right: Expr) -> Expr {
    Expr::Infix(InfixExpr {
        left: Box::new(left),
        operator: token(operator, operator.as_str()),
        right: Box::new(right),
    })
}

#[test]
fn test_let_statement_string() {
    let program = Program {
        body: vec![Stmt::Let(LetStmt {
            token: token(TokenKind::Let, "let"),
            name: ident("myVar"),
            value: Expr::Identifier(ident("anotherVar")),
        })],
    };

    assert_eq!(program.to_string(), "let myVar = anotherVar;");
}

#[test]
fn test_return_statement_string() {
    let bare = Stmt::Return(ReturnStmt {
        token: token(TokenKind::Return, "return"),
        value: None,
    });
    let valued = Stmt::Return(ReturnStmt {
        token: token(TokenKind::Return, "return"),
        value: Some(integer(5)),
    });

    assert_eq!(bare.to_string(), "return;");
    assert_eq!(valued.to_string(), "return 5;");
}

#[test]
fn test_infix_and_prefix_string() {
    let expr = infix(
        integer(5),
        TokenKind::Plus,
        infix(integer(5), TokenKind::Star, integer(2)),
    );
    assert_eq!(expr.to_string(), "(5+(5*2))");

    let negated = Expr::Prefix(PrefixExpr {
        operator: token(TokenKind::Dash, "-"),
        right_expr: Box::new(Expr::Identifier(ident("a"))),
    });
    assert_eq!(negated.to_string(), "(-a)");
}

#[test]
fn test_string_literal_is_escaped() {
    let expr = Expr::String(StringExpr {
        token: token(TokenKind::String, "say \"hi\"\n"),
        value: String::from("say \"hi\"\n"),
    });

    assert_eq!(expr.to_string(), r#""say \"hi\"\n""#);
}

#[test]
fn test_function_and_call_string() {
    let function = Expr::Function(Rc::new(FunctionExpr {
        token: token(TokenKind::Fn, "fn"),
        parameters: vec![ident("x"), ident("y")],
        body: BlockStmt {
            token: token(TokenKind::OpenCurly, "{"),
            body: vec![Stmt::Expression(ExpressionStmt {
                expression: infix(
                    Expr::Identifier(ident("x")),
                    TokenKind::Plus,
                    Expr::Identifier(ident("y")),
                ),
            })],
        },
    }));
    assert_eq!(function.to_string(), "fn(x, y) {(x+y);}");

    let call = Expr::Call(CallExpr {
        token: token(TokenKind::OpenParen, "("),
        callee: Box::new(Expr::Identifier(ident("add"))),
        arguments: vec![integer(1), infix(integer(2), TokenKind::Star, integer(3))],
    });
    assert_eq!(call.to_string(), "add(1, (2*3))");
}

#[test]
fn test_if_string_parenthesizes_plain_condition() {
    let then_body = Stmt::Expression(ExpressionStmt {
        expression: Expr::Identifier(ident("x")),
    });
    let else_body = Stmt::Block(BlockStmt {
        token: token(TokenKind::OpenCurly, "{"),
        body: vec![],
    });

    let plain = Expr::If(IfExpr {
        token: token(TokenKind::If, "if"),
        condition: Box::new(Expr::Identifier(ident("c"))),
        then_body: Box::new(then_body.clone()),
        else_body: Some(Box::new(else_body)),
    });
    assert_eq!(plain.to_string(), "if (c) x; else {}");

    let compared = Expr::If(IfExpr {
        token: token(TokenKind::If, "if"),
        condition: Box::new(infix(
            Expr::Identifier(ident("x")),
            TokenKind::Less,
            integer(3),
        )),
        then_body: Box::new(then_body),
        else_body: None,
    });
    assert_eq!(compared.to_string(), "if (x<3) x;");
}
