/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: The closed `Expr`/`Stmt` families and the `Program` root
/// - expressions: Definitions for the expression nodes
/// - statements: Definitions for the statement nodes
///
/// Every node renders to a canonical source form through `Display`.
pub mod ast;
pub mod expressions;
pub mod statements;

#[cfg(test)]
mod tests;
