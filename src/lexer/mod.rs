//! Lexical analysis module.
//!
//! Converts source text into the token stream the parser pulls from:
//!
//! - Regex pattern table matched on demand (`Lexer`)
//! - Keyword recognition through `RESERVED_LOOKUP`
//! - Token spans for diagnostics
//! - Whitespace and `//` comments are skipped
//!
//! Anything implementing `TokenSource` can feed the parser; `TokenStream`
//! replays an already-scanned token vector.

pub mod lexer;
pub mod tokens;
