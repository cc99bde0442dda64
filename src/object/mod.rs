//! Runtime value model.
//!
//! `Object` is the closed set of values an evaluator produces and
//! `Environment` is the chain of name bindings it evaluates them in.

pub mod environment;
pub mod object;
