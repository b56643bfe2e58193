//! Evaluator module: a tree-walking interpreter over the AST.
//!
//! - evaluator: Entry points, configuration and the control-flow result type
//! - expr / stmt: Evaluation rules per node kind
//! - environment: Chained scopes shared by closures
//! - value: Runtime values

pub mod environment;
pub mod evaluator;
pub mod expr;
pub mod stmt;
pub mod value;

#[cfg(test)]
mod tests;
