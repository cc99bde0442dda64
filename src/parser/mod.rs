//! Pratt parser producing the AST.
//!
//! Expressions are parsed with NUD (null denotation) and LED (left
//! denotation) handlers selected by token kind, with binding powers deciding
//! how far an operator reaches. Statement-level errors are collected instead
//! of aborting the parse.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;

#[cfg(test)]
mod tests;
