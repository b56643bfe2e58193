//! Tree-walking evaluation entry points.
//!
//! Evaluation internally returns `Result<Value, Interrupt>` so `?` carries
//! both `return` and runtime errors up through every composite node. The
//! public entry points settle the interrupt back into a plain `Value`.

use crate::{
    ast::ast::{Expr, Program, Stmt},
    errors::errors::RuntimeError,
};

use super::{environment::Env, value::Value};

/// How `if` treats its branches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConditionalEvaluation {
    /// Both branches run before one is selected. Errors from either propagate.
    #[default]
    Eager,
    /// Only the selected branch runs.
    Strict,
}

/// Stops normal evaluation until a call boundary or the program root.
#[derive(Debug, Clone, PartialEq)]
pub enum Interrupt {
    Return(Value),
    Error(RuntimeError),
}

impl From<RuntimeError> for Interrupt {
    fn from(error: RuntimeError) -> Self {
        Interrupt::Error(error)
    }
}

pub type EvalResult = Result<Value, Interrupt>;

/// Settles an interrupted result into the value a caller observes.
pub(crate) fn settle(result: EvalResult) -> Value {
    match result {
        Ok(value) | Err(Interrupt::Return(value)) => value,
        Err(Interrupt::Error(error)) => Value::Error(error),
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Evaluator {
    pub conditional: ConditionalEvaluation,
}

impl Evaluator {
    pub fn new(conditional: ConditionalEvaluation) -> Self {
        Evaluator { conditional }
    }

    /// Evaluates top-level statements in order.
    ///
    /// A runtime error or a top-level `return` stops evaluation and becomes
    /// the result. An empty program evaluates to null.
    pub fn eval_program(&self, program: &Program, env: &Env) -> Value {
        settle(self.statements(&program.body, env))
    }

    pub fn eval_statement(&self, stmt: &Stmt, env: &Env) -> Value {
        settle(self.statement(stmt, env))
    }

    pub fn eval_expression(&self, expr: &Expr, env: &Env) -> Value {
        settle(self.expression(expr, env))
    }

    /// Runs statements in `env`, yielding the last statement's value.
    pub(crate) fn statements(&self, stmts: &[Stmt], env: &Env) -> EvalResult {
        let mut result = Value::Null;
        for stmt in stmts {
            result = self.statement(stmt, env)?;
        }
        Ok(result)
    }
}

/// Evaluates a program with the default configuration.
pub fn eval_program(program: &Program, env: &Env) -> Value {
    Evaluator::default().eval_program(program, env)
}

/// Evaluates a single statement with the default configuration.
pub fn eval_statement(stmt: &Stmt, env: &Env) -> Value {
    Evaluator::default().eval_statement(stmt, env)
}

/// Evaluates a single expression with the default configuration.
pub fn eval_expression(expr: &Expr, env: &Env) -> Value {
    Evaluator::default().eval_expression(expr, env)
}
