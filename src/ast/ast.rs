use std::{fmt::Display, rc::Rc};

use crate::{lexer::tokens::Token, Position};

use super::{
    expressions::{
        BooleanExpr, CallExpr, FunctionExpr, IdentifierExpr, IfExpr, IncDecExpr, InfixExpr,
        IntegerExpr, PrefixExpr, StringExpr,
    },
    statements::{BlockStmt, ExpressionStmt, LetStmt, ReturnStmt},
};

/// Expression
///
/// The closed set of expression nodes. Grouping parentheses are parsed away
/// and have no node of their own.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Identifier(IdentifierExpr),
    Integer(IntegerExpr),
    String(StringExpr),
    Boolean(BooleanExpr),
    Prefix(PrefixExpr),
    Infix(InfixExpr),
    IncDec(IncDecExpr),
    /// Shared with every function value created from this literal.
    Function(Rc<FunctionExpr>),
    If(IfExpr),
    Call(CallExpr),
}

impl Expr {
    /// The token the expression originated from.
    pub fn token(&self) -> &Token {
        match self {
            Expr::Identifier(expr) => &expr.token,
            Expr::Integer(expr) => &expr.token,
            Expr::String(expr) => &expr.token,
            Expr::Boolean(expr) => &expr.token,
            Expr::Prefix(expr) => &expr.operator,
            Expr::Infix(expr) => &expr.operator,
            Expr::IncDec(expr) => &expr.operator,
            Expr::Function(expr) => &expr.token,
            Expr::If(expr) => &expr.token,
            Expr::Call(expr) => &expr.token,
        }
    }

    pub fn get_position(&self) -> Position {
        self.token().position
    }

    /// Whether the canonical form already starts and ends with its own parentheses.
    pub fn is_self_parenthesized(&self) -> bool {
        matches!(self, Expr::Prefix(_) | Expr::Infix(_) | Expr::IncDec(_))
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Identifier(expr) => expr.fmt(f),
            Expr::Integer(expr) => expr.fmt(f),
            Expr::String(expr) => expr.fmt(f),
            Expr::Boolean(expr) => expr.fmt(f),
            Expr::Prefix(expr) => expr.fmt(f),
            Expr::Infix(expr) => expr.fmt(f),
            Expr::IncDec(expr) => expr.fmt(f),
            Expr::Function(expr) => expr.fmt(f),
            Expr::If(expr) => expr.fmt(f),
            Expr::Call(expr) => expr.fmt(f),
        }
    }
}

/// Statement
///
/// The closed set of statement nodes.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Let(LetStmt),
    Return(ReturnStmt),
    Expression(ExpressionStmt),
    Block(BlockStmt),
}

impl Display for Stmt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stmt::Let(stmt) => stmt.fmt(f),
            Stmt::Return(stmt) => stmt.fmt(f),
            Stmt::Expression(stmt) => stmt.fmt(f),
            Stmt::Block(stmt) => stmt.fmt(f),
        }
    }
}

/// The root of a parsed source: its top-level statements in order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub body: Vec<Stmt>,
}

impl Program {
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write_joined(f, &self.body, " ")
    }
}

pub(crate) fn write_joined<T: Display>(
    f: &mut std::fmt::Formatter<'_>,
    items: &[T],
    separator: &str,
) -> std::fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, "{}", separator)?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}
