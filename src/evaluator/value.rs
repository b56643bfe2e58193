use std::{fmt::Display, rc::Rc};

use crate::{
    ast::{
        ast::write_joined,
        expressions::{escape, FunctionExpr},
    },
    errors::errors::RuntimeError,
};

use super::environment::Env;

/// A runtime value.
#[derive(Debug, Clone)]
pub enum Value {
    Integer(i64),
    Boolean(bool),
    String(String),
    Null,
    Function(FunctionValue),
    Error(RuntimeError),
}

/// A function literal closed over the scope it was evaluated in.
#[derive(Clone)]
pub struct FunctionValue {
    pub literal: Rc<FunctionExpr>,
    pub env: Env,
}

impl std::fmt::Debug for FunctionValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "FunctionValue({})", self.literal)
    }
}

impl PartialEq for FunctionValue {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.literal, &other.literal) && Rc::ptr_eq(&self.env, &other.env)
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Integer(left), Value::Integer(right)) => left == right,
            (Value::Boolean(left), Value::Boolean(right)) => left == right,
            (Value::String(left), Value::String(right)) => left == right,
            (Value::Null, Value::Null) => true,
            (Value::Function(left), Value::Function(right)) => left == right,
            (Value::Error(left), Value::Error(right)) => left == right,
            _ => false,
        }
    }
}

impl Value {
    /// Integers are truthy when nonzero, strings when nonempty. Null and errors are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Integer(value) => *value != 0,
            Value::Boolean(value) => *value,
            Value::String(value) => !value.is_empty(),
            Value::Function(_) => true,
            Value::Null | Value::Error(_) => false,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "INTEGER",
            Value::Boolean(_) => "BOOLEAN",
            Value::String(_) => "STRING",
            Value::Null => "NULL",
            Value::Function(_) => "FUNCTION",
            Value::Error(_) => "ERROR",
        }
    }
}

impl From<RuntimeError> for Value {
    fn from(error: RuntimeError) -> Self {
        Value::Error(error)
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Integer(value) => write!(f, "{}", value),
            Value::Boolean(value) => write!(f, "{}", value),
            Value::String(value) => write!(f, "\"{}\"", escape(value)),
            Value::Null => write!(f, "null"),
            Value::Function(function) => {
                write!(f, "fn(")?;
                write_joined(f, &function.literal.parameters, ", ")?;
                write!(f, ") {}", function.literal.body)
            }
            Value::Error(error) => write!(f, "<Error: {}>", error),
        }
    }
}
