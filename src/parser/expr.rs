use tracing::trace;

use crate::{
    ast::{
        ast::Expr,
        expressions::{
            BooleanExpr, CallExpr, FunctionExpr, IdentifierExpr, IfExpr, InfixExpr, IntegerExpr,
            InvalidExpr, PrefixExpr,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Span,
};

use super::{lookups::BindingPower, parser::Parser, stmt::parse_block_stmt};

/// Parses an expression whose operators bind tighter than `bp`.
///
/// Never fails: a missing prefix rule, a handler error or too deep nesting
/// is recorded and the affected operand becomes `Expr::Invalid`, so the
/// surrounding construct stays in the tree.
pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Expr {
    if let Err(error) = parser.descend() {
        parser.record(error);
        return invalid_expr(parser);
    }

    let expr = parse_nested_expr(parser, bp);
    parser.ascend();

    expr
}

fn parse_nested_expr(parser: &mut Parser, bp: BindingPower) -> Expr {
    trace!(token = %parser.current_token(), ?bp, "parse_expr");

    // First parse NUD
    let token_kind = parser.current_token_kind();
    let Some(nud) = parser.get_nud(token_kind) else {
        parser.record(Error::new(
            ErrorImpl::NoPrefixParseFn { kind: token_kind },
            parser.current_token().span.start.clone(),
        ));
        return invalid_expr(parser);
    };

    let mut left = nud(parser).unwrap_or_else(|error| {
        parser.record(error);
        invalid_expr(parser)
    });

    // While the next operator binds tighter than bp, fold it into lhs
    while !parser.peek_token().is(TokenKind::Semicolon) && parser.peek_precedence() > bp {
        let Some(led) = parser.get_led(parser.peek_token_kind()) else {
            return left;
        };

        parser.advance();
        let operator_bp = parser.current_precedence();
        left = led(parser, left, operator_bp).unwrap_or_else(|error| {
            parser.record(error);
            invalid_expr(parser)
        });
    }

    left
}

fn invalid_expr(parser: &Parser) -> Expr {
    Expr::from(InvalidExpr {
        span: parser.current_token().span.clone(),
    })
}

pub fn parse_identifier_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.current_token();

    Ok(Expr::from(IdentifierExpr {
        value: token.value.clone(),
        span: token.span.clone(),
    }))
}

pub fn parse_integer_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.current_token();

    match parse_int_literal(&token.value) {
        Some(value) => Ok(Expr::from(IntegerExpr {
            value,
            span: token.span.clone(),
        })),
        None => Err(Error::new(
            ErrorImpl::NumberParseError {
                token: token.value.clone(),
            },
            token.span.start.clone(),
        )),
    }
}

/// Reads an integer literal with its base taken from the prefix: `0x`, `0o`
/// and `0b` select 16, 8 and 2, and a bare leading `0` means octal (so `010`
/// is 8 and `08` is rejected). Anything that does not fit `i64` is `None`.
pub fn parse_int_literal(text: &str) -> Option<i64> {
    let (digits, radix) = match text.as_bytes() {
        [b'0', b'x' | b'X', ..] => (&text[2..], 16),
        [b'0', b'o' | b'O', ..] => (&text[2..], 8),
        [b'0', b'b' | b'B', ..] => (&text[2..], 2),
        [b'0', _, ..] => (&text[1..], 8),
        _ => (text, 10),
    };

    // from_str_radix would accept a sign
    if digits.starts_with(['+', '-']) {
        return None;
    }

    i64::from_str_radix(digits, radix).ok()
}

pub fn parse_boolean_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.current_token();

    Ok(Expr::from(BooleanExpr {
        value: token.is(TokenKind::True),
        span: token.span.clone(),
    }))
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Expr, Error> {
    trace!(operator = %parser.current_token(), "parse_prefix_expr");

    let operator_token = parser.advance();
    let right = parse_expr(parser, BindingPower::Prefix);

    Ok(Expr::from(PrefixExpr {
        span: Span {
            start: operator_token.span.start.clone(),
            end: right.get_span().end.clone(),
        },
        operator: operator_token,
        right: Box::new(right),
    }))
}

/// Parses the right operand at the operator's own binding power, which makes
/// binary operators left-associative.
pub fn parse_infix_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> Result<Expr, Error> {
    trace!(operator = %parser.current_token(), ?bp, "parse_infix_expr");

    let operator_token = parser.advance();
    let right = parse_expr(parser, bp);

    Ok(Expr::from(InfixExpr {
        span: Span {
            start: left.get_span().start.clone(),
            end: right.get_span().end.clone(),
        },
        left: Box::new(left),
        operator: operator_token,
        right: Box::new(right),
    }))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.advance();
    let expr = parse_expr(parser, BindingPower::Lowest);
    parser.expect_peek(TokenKind::CloseParen)?;

    Ok(expr)
}

pub fn parse_if_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let start = parser.current_token().span.start.clone();

    parser.expect_peek(TokenKind::OpenParen)?;
    parser.advance();
    let condition = parse_expr(parser, BindingPower::Lowest);
    parser.expect_peek(TokenKind::CloseParen)?;

    parser.expect_peek(TokenKind::OpenCurly)?;
    let consequence = parse_block_stmt(parser);

    let alternative = if parser.peek_token().is(TokenKind::Else) {
        parser.advance();
        parser.expect_peek(TokenKind::OpenCurly)?;
        Some(parse_block_stmt(parser))
    } else {
        None
    };

    Ok(Expr::from(IfExpr {
        condition: Box::new(condition),
        consequence,
        alternative,
        span: parser.span_from(start),
    }))
}

pub fn parse_function_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let start = parser.current_token().span.start.clone();

    parser.expect_peek(TokenKind::OpenParen)?;
    let parameters = parse_function_parameters(parser)?;

    parser.expect_peek(TokenKind::OpenCurly)?;
    let body = parse_block_stmt(parser);

    Ok(Expr::from(FunctionExpr {
        parameters,
        body,
        span: parser.span_from(start),
    }))
}

// fn(a, b, c): starts on `(`, ends on `)`
fn parse_function_parameters(parser: &mut Parser) -> Result<Vec<IdentifierExpr>, Error> {
    let mut parameters = vec![];

    if parser.peek_token().is(TokenKind::CloseParen) {
        parser.advance();
        return Ok(parameters);
    }

    loop {
        let token = parser.expect_peek(TokenKind::Identifier)?;
        parameters.push(IdentifierExpr {
            value: token.value,
            span: token.span,
        });

        if !parser.peek_token().is(TokenKind::Comma) {
            break;
        }
        parser.advance();
    }

    parser.expect_peek(TokenKind::CloseParen)?;

    Ok(parameters)
}

pub fn parse_call_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    let mut arguments = vec![];

    if parser.peek_token().is(TokenKind::CloseParen) {
        parser.advance();
    } else {
        parser.advance();
        arguments.push(parse_expr(parser, BindingPower::Lowest));

        while parser.peek_token().is(TokenKind::Comma) {
            parser.advance();
            parser.advance();
            arguments.push(parse_expr(parser, BindingPower::Lowest));
        }

        parser.expect_peek(TokenKind::CloseParen)?;
    }

    Ok(Expr::from(CallExpr {
        span: parser.span_from(left.get_span().start.clone()),
        function: Box::new(left),
        arguments,
    }))
}
