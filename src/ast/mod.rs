/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the tree the parser produces
///
/// Submodules:
/// - ast: `Stmt` / `Expr` node sets and the `Program` root
/// - expressions: Definitions for the expression nodes
/// - statements: Definitions for the statement nodes
///
/// Nodes are built once during parsing and never mutated afterwards. Every
/// node renders back to source through `Display`.
pub mod ast;
pub mod expressions;
pub mod statements;
