//! Diagnostics for the front end.
//!
//! Every structural defect found while scanning or parsing becomes an
//! `Error` carrying:
//!
//! - the kind of defect (`ErrorImpl`) and its human-readable message
//! - the source position of the offending token
//! - an optional suggestion for the command-line report
//!
//! Diagnostics are collected, never thrown: the parser keeps going and the
//! caller decides whether any diagnostic should stop further processing.

pub mod errors;
