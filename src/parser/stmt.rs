use crate::{
    ast::{
        ast::Stmt,
        expressions::IdentifierExpr,
        statements::{BlockStmt, ExpressionStmt, LetStmt, ReturnStmt},
    },
    errors::errors::Error,
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::BindingPower},
};

use super::parser::Parser;

/// Parses one statement starting at the current token.
///
/// A `let` or `return` missing one of its fixed tokens is recorded as a
/// diagnostic and yields `None`. Errors inside expressions never get here;
/// they leave an `Expr::Invalid` in the statement instead.
pub fn parse_stmt(parser: &mut Parser) -> Option<Stmt> {
    let result = match parser.get_stmt(parser.current_token_kind()) {
        Some(stmt_fn) => stmt_fn(parser),
        None => parse_expression_stmt(parser),
    };

    match result {
        Ok(stmt) => Some(stmt),
        Err(error) => {
            parser.record(error);
            None
        }
    }
}

pub fn parse_expression_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let expression = parse_expr(parser, BindingPower::Lowest);
    parser.skip_semicolon();

    Ok(Stmt::from(ExpressionStmt {
        span: parser.span_from(expression.get_span().start.clone()),
        expression,
    }))
}

// let <name> = <value>[;]
pub fn parse_let_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.current_token().span.start.clone();

    let name_token = parser.expect_peek(TokenKind::Identifier)?;
    let name = IdentifierExpr {
        value: name_token.value,
        span: name_token.span,
    };

    parser.expect_peek(TokenKind::Assignment)?;
    parser.advance();

    let value = parse_expr(parser, BindingPower::Lowest);
    parser.skip_semicolon();

    Ok(Stmt::from(LetStmt {
        name,
        value,
        span: parser.span_from(start),
    }))
}

// return <value>[;]
pub fn parse_return_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start;

    let value = parse_expr(parser, BindingPower::Lowest);
    parser.skip_semicolon();

    Ok(Stmt::from(ReturnStmt {
        value,
        span: parser.span_from(start),
    }))
}

/// Parses `{ ... }` starting on the opening brace and ending on the closing
/// one (or at end of input). Statements that fail to parse are dropped.
pub fn parse_block_stmt(parser: &mut Parser) -> BlockStmt {
    let start = parser.advance().span.start;

    let mut body = Vec::new();
    while !parser.current_token().is(TokenKind::CloseCurly)
        && !parser.current_token().is(TokenKind::EOF)
    {
        if let Some(stmt) = parse_stmt(parser) {
            body.push(stmt);
        }
        parser.advance();
    }

    BlockStmt {
        body,
        span: parser.span_from(start),
    }
}
