use crate::ast::{
    ast::Stmt,
    statements::{BlockStmt, LetStmt, ReturnStmt},
};

use super::{
    environment::{Env, Environment},
    evaluator::{EvalResult, Evaluator, Interrupt},
    value::Value,
};

impl Evaluator {
    pub(crate) fn statement(&self, stmt: &Stmt, env: &Env) -> EvalResult {
        match stmt {
            Stmt::Let(stmt) => self.let_stmt(stmt, env),
            Stmt::Return(stmt) => self.return_stmt(stmt, env),
            Stmt::Expression(stmt) => self.expression(&stmt.expression, env),
            Stmt::Block(stmt) => self.block(stmt, env),
        }
    }

    fn let_stmt(&self, stmt: &LetStmt, env: &Env) -> EvalResult {
        let value = self.expression(&stmt.value, env)?;
        env.borrow_mut().set(stmt.name.value.as_str(), value);

        Ok(Value::Null)
    }

    fn return_stmt(&self, stmt: &ReturnStmt, env: &Env) -> EvalResult {
        let value = match &stmt.value {
            Some(expr) => self.expression(expr, env)?,
            None => Value::Null,
        };

        Err(Interrupt::Return(value))
    }

    /// Runs the block in a child scope; its bindings vanish on exit.
    pub(crate) fn block(&self, block: &BlockStmt, env: &Env) -> EvalResult {
        let scope = Environment::new_enclosed(env);
        self.statements(&block.body, &scope)
    }
}
