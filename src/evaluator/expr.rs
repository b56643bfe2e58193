use std::rc::Rc;

use tracing::trace;

use crate::{
    ast::{
        ast::{Expr, Stmt},
        expressions::{CallExpr, IfExpr, IncDecExpr, InfixExpr, PrefixExpr},
    },
    errors::errors::RuntimeError,
    lexer::tokens::{Token, TokenKind},
};

use super::{
    environment::{Env, Environment},
    evaluator::{ConditionalEvaluation, EvalResult, Evaluator, Interrupt},
    value::{FunctionValue, Value},
};

impl Evaluator {
    pub(crate) fn expression(&self, expr: &Expr, env: &Env) -> EvalResult {
        match expr {
            Expr::Identifier(expr) => env.borrow().get(&expr.value).ok_or_else(|| {
                Interrupt::from(RuntimeError::IdentifierNotFound {
                    name: expr.value.clone(),
                })
            }),
            Expr::Integer(expr) => Ok(Value::Integer(expr.value)),
            Expr::String(expr) => Ok(Value::String(expr.value.clone())),
            Expr::Boolean(expr) => Ok(Value::Boolean(expr.value)),
            Expr::Prefix(expr) => self.prefix(expr, env),
            Expr::Infix(expr) => self.infix(expr, env),
            Expr::IncDec(expr) => self.inc_dec(expr, env),
            Expr::Function(literal) => Ok(Value::Function(FunctionValue {
                literal: Rc::clone(literal),
                env: Rc::clone(env),
            })),
            Expr::If(expr) => self.if_expr(expr, env),
            Expr::Call(expr) => self.call(expr, env),
        }
    }

    fn prefix(&self, expr: &PrefixExpr, env: &Env) -> EvalResult {
        let right = self.expression(&expr.right_expr, env)?;

        match (expr.operator.kind, &right) {
            (TokenKind::Not, _) => Ok(Value::Boolean(!right.is_truthy())),
            (TokenKind::Dash, Value::Integer(value)) => Ok(Value::Integer(value.wrapping_neg())),
            (TokenKind::Dash, _) => Err(RuntimeError::BadPrefixOperand {
                operator: expr.operator.literal.clone(),
                operand: right.type_name().to_string(),
            }
            .into()),
            _ => Err(RuntimeError::UnknownOperator {
                operator: expr.operator.literal.clone(),
            }
            .into()),
        }
    }

    fn infix(&self, expr: &InfixExpr, env: &Env) -> EvalResult {
        let left = self.expression(&expr.left, env)?;

        // Logical operators accept any operands and may skip the right side
        match expr.operator.kind {
            TokenKind::Or if left.is_truthy() => return Ok(Value::Boolean(true)),
            TokenKind::And if !left.is_truthy() => return Ok(Value::Boolean(false)),
            TokenKind::Or | TokenKind::And => {
                let right = self.expression(&expr.right, env)?;
                return Ok(Value::Boolean(right.is_truthy()));
            }
            _ => {}
        }

        let right = self.expression(&expr.right, env)?;

        match (&left, &right) {
            (Value::Integer(left), Value::Integer(right)) => {
                integer_infix(&expr.operator, *left, *right).map_err(Interrupt::from)
            }
            _ => Err(RuntimeError::BadInfixOperands {
                left: left.to_string(),
                operator: expr.operator.literal.clone(),
                right: right.to_string(),
            }
            .into()),
        }
    }

    fn inc_dec(&self, expr: &IncDecExpr, env: &Env) -> EvalResult {
        let name = &expr.identifier.value;
        let current = env
            .borrow()
            .get(name)
            .ok_or_else(|| RuntimeError::IdentifierNotFound { name: name.clone() })?;

        let updated = match (expr.operator.kind, &current) {
            (TokenKind::PlusPlus, Value::Integer(value)) => value.wrapping_add(1),
            (TokenKind::MinusMinus, Value::Integer(value)) => value.wrapping_sub(1),
            _ => {
                return Err(RuntimeError::BadIncDecOperand {
                    operator: expr.operator.literal.clone(),
                    name: name.clone(),
                    value: current.type_name().to_string(),
                }
                .into())
            }
        };

        env.borrow_mut().set(name.as_str(), Value::Integer(updated));
        Ok(Value::Integer(updated))
    }

    fn if_expr(&self, expr: &IfExpr, env: &Env) -> EvalResult {
        let condition = self.expression(&expr.condition, env)?;

        match self.conditional {
            ConditionalEvaluation::Strict => {
                if condition.is_truthy() {
                    self.statement(&expr.then_body, env)
                } else {
                    self.optional_branch(expr.else_body.as_deref(), env)
                }
            }
            ConditionalEvaluation::Eager => {
                // A pending `return` only fires if its branch is selected
                let then_result = keep_return(self.statement(&expr.then_body, env))?;
                let else_result =
                    keep_return(self.optional_branch(expr.else_body.as_deref(), env))?;

                if condition.is_truthy() {
                    then_result
                } else {
                    else_result
                }
            }
        }
    }

    fn optional_branch(&self, branch: Option<&Stmt>, env: &Env) -> EvalResult {
        match branch {
            Some(stmt) => self.statement(stmt, env),
            None => Ok(Value::Null),
        }
    }

    fn call(&self, expr: &CallExpr, env: &Env) -> EvalResult {
        let function = match self.expression(&expr.callee, env)? {
            Value::Function(function) => function,
            other => {
                return Err(RuntimeError::NotAFunction {
                    value: other.to_string(),
                }
                .into())
            }
        };

        let parameters = &function.literal.parameters;
        if parameters.len() != expr.arguments.len() {
            return Err(RuntimeError::ArgumentCountMismatch {
                expected: parameters.len(),
                received: expr.arguments.len(),
            }
            .into());
        }

        let frame = Environment::new_enclosed(&function.env);
        for (parameter, argument) in parameters.iter().zip(&expr.arguments) {
            let value = self.expression(argument, env)?;
            frame.borrow_mut().set(parameter.value.as_str(), value);
        }

        let position = expr.callee.get_position();
        trace!(function = %expr.callee, row = position.row, col = position.col, "call");

        match self.statements(&function.literal.body.body, &frame) {
            Ok(value) | Err(Interrupt::Return(value)) => Ok(value),
            Err(error) => Err(error),
        }
    }
}

/// Holds a branch's `return` aside so only runtime errors short-circuit.
fn keep_return(result: EvalResult) -> Result<EvalResult, Interrupt> {
    match result {
        Err(Interrupt::Error(error)) => Err(Interrupt::Error(error)),
        other => Ok(other),
    }
}

fn integer_infix(operator: &Token, left: i64, right: i64) -> Result<Value, RuntimeError> {
    let value = match operator.kind {
        TokenKind::Plus => Value::Integer(left.wrapping_add(right)),
        TokenKind::Dash => Value::Integer(left.wrapping_sub(right)),
        TokenKind::Star => Value::Integer(left.wrapping_mul(right)),
        TokenKind::Slash | TokenKind::Percent if right == 0 => {
            return Err(RuntimeError::DivisionByZero {
                left,
                operator: operator.literal.clone(),
            })
        }
        TokenKind::Slash => Value::Integer(left.wrapping_div(right)),
        TokenKind::Percent => Value::Integer(left.wrapping_rem(right)),
        TokenKind::Equals => Value::Boolean(left == right),
        TokenKind::NotEquals => Value::Boolean(left != right),
        TokenKind::Less => Value::Boolean(left < right),
        TokenKind::LessEquals => Value::Boolean(left <= right),
        TokenKind::Greater => Value::Boolean(left > right),
        TokenKind::GreaterEquals => Value::Boolean(left >= right),
        _ => {
            return Err(RuntimeError::UnknownOperator {
                operator: operator.literal.clone(),
            })
        }
    };

    Ok(value)
}
