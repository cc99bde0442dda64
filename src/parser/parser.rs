//! Parser state and entry points.
//!
//! The parser pulls tokens on demand from a `TokenSource` and always holds
//! two of them: the `current` token and one token of lookahead (`peek`).
//! Parsing never backtracks.
//!
//! Handlers are looked up per token kind in the tables built by
//! `create_token_lookups`:
//! - statement handlers for `let` and `return`
//! - NUD (null denotation) handlers for tokens that start an expression
//! - LED (left denotation) handlers for infix operators and calls
//!
//! Handlers start with `current` on the first token of their construct and
//! leave it on the last one. Structural defects become `Error`s collected in
//! order. A broken sub-expression is kept in the tree as `Expr::Invalid` and
//! parsing carries on around it.

use std::mem;

use tracing::debug;

use crate::{
    ast::ast::Program,
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::Lexer,
        tokens::{Token, TokenKind, TokenSource},
    },
    Position, Span,
};

use super::{
    lookups::{create_token_lookups, precedence_of, BindingPower, LEDHandler, Lookups, NUDHandler, StmtHandler},
    stmt::parse_stmt,
};

/// Deepest expression nesting the parser recurses into. Each level costs
/// several stack frames, so this keeps malformed or hostile input from
/// overflowing the stack.
pub const MAX_NESTING_DEPTH: usize = 64;

/// The main parser structure that maintains parsing state.
pub struct Parser {
    /// Where tokens are pulled from
    tokens: Box<dyn TokenSource>,
    /// The token being parsed
    current: Token,
    /// One token of lookahead
    peek: Token,
    /// Diagnostics in the order they were found
    errors: Vec<Error>,
    /// Handler tables, fixed at construction
    lookups: Lookups,
    /// Current expression nesting
    depth: usize,
}

impl Parser {
    /// Creates a parser over `source`, reading the first two tokens.
    pub fn new<S: TokenSource + 'static>(source: S) -> Self {
        let mut tokens: Box<dyn TokenSource> = Box::new(source);
        let current = tokens.next_token();
        let peek = tokens.next_token();

        Parser {
            tokens,
            current,
            peek,
            errors: vec![],
            lookups: create_token_lookups(),
            depth: 0,
        }
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.current
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current.kind
    }

    /// Returns the lookahead token.
    pub fn peek_token(&self) -> &Token {
        &self.peek
    }

    /// Returns the kind of the lookahead token.
    pub fn peek_token_kind(&self) -> TokenKind {
        self.peek.kind
    }

    /// Shifts `peek` into `current`, pulls the next token and returns the
    /// previous current token.
    pub fn advance(&mut self) -> Token {
        let next = self.tokens.next_token();
        mem::replace(&mut self.current, mem::replace(&mut self.peek, next))
    }

    /// Advances only when the lookahead token is `expected_kind`.
    ///
    /// # Returns
    ///
    /// The new current token, or an `UnexpectedToken` error positioned at the
    /// lookahead token. The parser does not move on error.
    pub fn expect_peek(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        if self.peek.kind != expected_kind {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    expected: expected_kind,
                    found: self.peek.kind,
                },
                self.peek.span.start.clone(),
            ));
        }

        self.advance();
        Ok(self.current.clone())
    }

    /// Consumes the lookahead token if it is a semicolon.
    pub fn skip_semicolon(&mut self) {
        if self.peek.is(TokenKind::Semicolon) {
            self.advance();
        }
    }

    pub fn current_precedence(&self) -> BindingPower {
        precedence_of(self.current.kind)
    }

    pub fn peek_precedence(&self) -> BindingPower {
        precedence_of(self.peek.kind)
    }

    pub fn get_stmt(&self, kind: TokenKind) -> Option<StmtHandler> {
        self.lookups.get_stmt(kind)
    }

    pub fn get_nud(&self, kind: TokenKind) -> Option<NUDHandler> {
        self.lookups.get_nud(kind)
    }

    pub fn get_led(&self, kind: TokenKind) -> Option<LEDHandler> {
        self.lookups.get_led(kind)
    }

    /// Span from `start` to the end of the current token.
    pub fn span_from(&self, start: Position) -> Span {
        Span {
            start,
            end: self.current.span.end.clone(),
        }
    }

    /// Enters one level of expression nesting.
    ///
    /// Fails with `NestingTooDeep` at the current token once
    /// `MAX_NESTING_DEPTH` levels are open; the depth is unchanged then.
    pub fn descend(&mut self) -> Result<(), Error> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(Error::new(
                ErrorImpl::NestingTooDeep {
                    limit: MAX_NESTING_DEPTH,
                },
                self.current.span.start.clone(),
            ));
        }

        self.depth += 1;
        Ok(())
    }

    /// Leaves a level entered with `descend`.
    pub fn ascend(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Appends a diagnostic.
    pub fn record(&mut self, error: Error) {
        debug!(error = %error, position = error.get_position().0, "parse error");
        self.errors.push(error);
    }

    /// Diagnostics found so far, in parse order.
    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    /// Parses statements until the end of input.
    ///
    /// Always returns a program; statements that failed to parse are left
    /// out and described in `errors()`.
    pub fn parse_program(&mut self) -> Program {
        let mut program = Program::default();

        while !self.current.is(TokenKind::EOF) {
            if let Some(stmt) = parse_stmt(self) {
                program.statements.push(stmt);
            }
            self.advance();
        }

        program
    }
}

/// Scans and parses `source` in one go.
///
/// # Returns
///
/// A tuple containing:
/// - The program (possibly missing statements that failed to parse)
/// - Every diagnostic, in source order
pub fn parse(source: String, file: Option<String>) -> (Program, Vec<Error>) {
    let mut parser = Parser::new(Lexer::new(source, file));
    let program = parser.parse_program();

    (program, parser.errors)
}
