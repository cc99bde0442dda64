//! Unit tests for the parser module.
//!
//! Covers operator precedence and associativity, let and return statements,
//! conditionals, function literals and calls, and diagnostics for malformed
//! input.

use pretty_assertions::assert_eq;

use crate::{
    ast::ast::{Expr, Program, Stmt},
    errors::errors::Error,
    lexer::{lexer::{tokenize, Lexer, TokenStream}, tokens::TokenKind},
};

use super::{
    expr::parse_int_literal,
    lookups::{precedence_of, BindingPower},
    parser::{parse, Parser, MAX_NESTING_DEPTH},
};

fn parse_ok(source: &str) -> Program {
    let (program, errors) = parse(source.to_string(), Some("test.mk".to_string()));
    assert!(errors.is_empty(), "unexpected diagnostics for {source:?}: {errors:?}");
    program
}

fn messages(errors: &[Error]) -> Vec<String> {
    errors.iter().map(|error| error.to_string()).collect()
}

fn single_expression(program: &Program) -> &Expr {
    assert_eq!(program.statements.len(), 1);
    match &program.statements[0] {
        Stmt::Expression(stmt) => &stmt.expression,
        other => panic!("expected an expression statement, got {other:?}"),
    }
}

#[test]
fn test_operator_precedence_rendering() {
    let cases = [
        ("1 + 2 * 3", "(1 + (2 * 3))"),
        ("1 + 2 + 3", "((1 + 2) + 3)"),
        ("-a * b", "((-a) * b)"),
        ("(1 + 2) * 3", "((1 + 2) * 3)"),
        ("!-a", "(!(-a))"),
        ("a + b - c", "((a + b) - c)"),
        ("a * b / c", "((a * b) / c)"),
        ("a + b * c + d / e - f", "(((a + (b * c)) + (d / e)) - f)"),
        ("3 + 4; -5 * 5", "(3 + 4)((-5) * 5)"),
        ("5 > 4 == 3 < 4", "((5 > 4) == (3 < 4))"),
        ("5 < 4 != 3 > 4", "((5 < 4) != (3 > 4))"),
        ("3 > 5 == false", "((3 > 5) == false)"),
        ("!(true == true)", "(!(true == true))"),
        ("1 + (2 + 3) + 4", "((1 + (2 + 3)) + 4)"),
        ("-(5 + 5)", "(-(5 + 5))"),
        ("a + add(b * c) + d", "((a + add((b * c))) + d)"),
        (
            "add(a, b, 1, 2 * 3, 4 + 5, add(6, 7 * 8))",
            "add(a, b, 1, (2 * 3), (4 + 5), add(6, (7 * 8)))",
        ),
        ("add(a + b + c * d / f + g)", "add((((a + b) + ((c * d) / f)) + g))"),
    ];

    for (source, expected) in cases {
        assert_eq!(parse_ok(source).to_string(), expected, "source: {source}");
    }
}

#[test]
fn test_precedence_table() {
    assert_eq!(precedence_of(TokenKind::Equals), BindingPower::Equals);
    assert_eq!(precedence_of(TokenKind::Less), BindingPower::LessGreater);
    assert_eq!(precedence_of(TokenKind::Dash), BindingPower::Sum);
    assert_eq!(precedence_of(TokenKind::Slash), BindingPower::Product);
    assert_eq!(precedence_of(TokenKind::OpenParen), BindingPower::Call);
    assert_eq!(precedence_of(TokenKind::Semicolon), BindingPower::Lowest);
    assert_eq!(precedence_of(TokenKind::Identifier), BindingPower::Lowest);
    assert!(BindingPower::Lowest < BindingPower::Equals);
    assert!(BindingPower::Prefix < BindingPower::Call);
}

#[test]
fn test_let_statements() {
    let program = parse_ok("let x = 5; let y = true; let foobar = y;");
    assert_eq!(program.statements.len(), 3);

    let expected = [("x", "5"), ("y", "true"), ("foobar", "y")];
    for (stmt, (name, value)) in program.statements.iter().zip(expected) {
        match stmt {
            Stmt::Let(let_stmt) => {
                assert_eq!(let_stmt.name.value, name);
                assert_eq!(let_stmt.value.to_string(), value);
            }
            other => panic!("expected a let statement, got {other:?}"),
        }
    }
}

#[test]
fn test_let_with_full_expression() {
    let program = parse_ok("let total = a + b * 2;");
    assert_eq!(program.to_string(), "let total = (a + (b * 2));");
}

#[test]
fn test_return_statements() {
    let program = parse_ok("return 5; return 10; return add(1, 2);");
    assert_eq!(program.statements.len(), 3);
    assert!(program.statements.iter().all(|stmt| matches!(stmt, Stmt::Return(_))));
    assert_eq!(program.to_string(), "return 5;return 10;return add(1, 2);");
}

#[test]
fn test_semicolons_are_optional() {
    let program = parse_ok("let a = 1\nreturn a\na + 1");
    assert_eq!(program.statements.len(), 3);
}

#[test]
fn test_identifier_integer_boolean() {
    let program = parse_ok("foobar;");
    assert!(matches!(single_expression(&program), Expr::Identifier(ident) if ident.value == "foobar"));

    let program = parse_ok("5;");
    assert!(matches!(single_expression(&program), Expr::Integer(int) if int.value == 5));

    let program = parse_ok("false;");
    assert!(matches!(single_expression(&program), Expr::Boolean(boolean) if !boolean.value));
}

#[test]
fn test_if_expression() {
    let program = parse_ok("if (x < y) { x }");
    let Expr::If(if_expr) = single_expression(&program) else {
        panic!("expected an if expression");
    };

    assert_eq!(if_expr.condition.to_string(), "(x < y)");
    assert_eq!(if_expr.consequence.iter().count(), 1);
    assert!(if_expr.alternative.is_none());
}

#[test]
fn test_if_else_expression() {
    let program = parse_ok("if (x < y) { x } else { y; z }");
    let Expr::If(if_expr) = single_expression(&program) else {
        panic!("expected an if expression");
    };

    let alternative = if_expr.alternative.as_ref().unwrap();
    assert_eq!(alternative.body.len(), 2);
    assert_eq!(program.to_string(), "if(x < y) xelse yz");
}

#[test]
fn test_function_literal() {
    let program = parse_ok("fn(x, y) { x + y; }");
    let Expr::Function(function) = single_expression(&program) else {
        panic!("expected a function literal");
    };

    let names: Vec<&str> = function.parameters.iter().map(|p| p.value.as_str()).collect();
    assert_eq!(names, vec!["x", "y"]);
    assert_eq!(function.body.to_string(), "(x + y)");
}

#[test]
fn test_function_parameter_counts() {
    let cases = [("fn() {};", 0), ("fn(x) {};", 1), ("fn(x, y, z) {};", 3)];

    for (source, count) in cases {
        let program = parse_ok(source);
        let Expr::Function(function) = single_expression(&program) else {
            panic!("expected a function literal for {source}");
        };
        assert_eq!(function.parameters.len(), count, "source: {source}");
    }
}

#[test]
fn test_call_expression() {
    let program = parse_ok("add(1, 2 * 3, 4 + 5);");
    let Expr::Call(call) = single_expression(&program) else {
        panic!("expected a call expression");
    };

    assert_eq!(call.function.to_string(), "add");
    let arguments: Vec<String> = call.arguments.iter().map(|arg| arg.to_string()).collect();
    assert_eq!(arguments, vec!["1", "(2 * 3)", "(4 + 5)"]);

    let program = parse_ok("noop()");
    assert_eq!(program.to_string(), "noop()");
}

#[test]
fn test_immediately_called_function_literal() {
    let program = parse_ok("fn(x) { x; }(5)");
    assert_eq!(program.to_string(), "fn(x) x(5)");
}

#[test]
fn test_missing_prefix_rule() {
    for (source, kind) in [(")", "RPAREN"), (";", "SEMICOLON"), ("let x = ;", "SEMICOLON")] {
        let (_, errors) = parse(source.to_string(), None);
        assert!(!errors.is_empty(), "source: {source}");
        assert_eq!(
            errors[0].to_string(),
            format!("no prefix parse function for {kind} found")
        );
    }
}

#[test]
fn test_if_missing_close_paren() {
    let (program, errors) = parse("if (x { x }".to_string(), None);

    let unexpected: Vec<String> = messages(&errors)
        .into_iter()
        .filter(|message| message.starts_with("expected next token"))
        .collect();
    assert_eq!(
        unexpected,
        vec!["expected next token to be RPAREN, got LBRACE instead".to_string()]
    );
    assert_eq!(errors[0].get_position().0, 6);
    assert_eq!(program.to_string(), "x");
}

#[test]
fn test_let_diagnostics() {
    let (_, errors) = parse("let = 5;".to_string(), None);
    assert_eq!(errors[0].to_string(), "expected next token to be IDENT, got ASSIGN instead");

    let (_, errors) = parse("let x 5;".to_string(), None);
    assert_eq!(errors[0].to_string(), "expected next token to be ASSIGN, got INT instead");
}

#[test]
fn test_integer_overflow() {
    let (program, errors) = parse("9223372036854775808; 1".to_string(), None);

    assert_eq!(
        messages(&errors),
        vec!["could not parse \"9223372036854775808\" as integer".to_string()]
    );
    assert_eq!(program.to_string(), "1");

    let program = parse_ok("9223372036854775807");
    assert_eq!(program.to_string(), "9223372036854775807");
}

#[test]
fn test_recovers_after_broken_statement() {
    let (program, errors) = parse("let = 1; let y = 2; y".to_string(), None);

    assert!(!errors.is_empty());
    assert!(program.to_string().ends_with("let y = 2;y"));
}

#[test]
fn test_illegal_character_reported() {
    let (_, errors) = parse("let a = @;".to_string(), None);
    assert_eq!(errors[0].to_string(), "no prefix parse function for ILLEGAL found");
}

#[test]
fn test_unterminated_block_at_eof() {
    let (program, errors) = parse("if (x) { y".to_string(), None);
    assert!(errors.is_empty());
    assert_eq!(program.to_string(), "ifx y");
}

#[test]
fn test_empty_program() {
    let program = parse_ok("");
    assert!(program.statements.is_empty());
}

#[test]
fn test_statement_spans() {
    let program = parse_ok("let x = 5;\nx + 10");

    let first = program.statements[0].get_span();
    assert_eq!((first.start.0, first.end.0), (0, 10));

    let second = program.statements[1].get_span();
    assert_eq!((second.start.0, second.end.0), (11, 17));
    assert_eq!(second.start.1.as_str(), "test.mk");
}

#[test]
fn test_parser_over_token_stream() {
    let tokens = tokenize("a + b * c".to_string(), None).unwrap();
    let mut parser = Parser::new(TokenStream::new(tokens));
    let program = parser.parse_program();

    assert!(parser.errors().is_empty());
    assert_eq!(program.to_string(), "(a + (b * c))");
}

#[test]
fn test_parser_over_lexer() {
    let mut parser = Parser::new(Lexer::new("return -x;".to_string(), None));
    let program = parser.parse_program();

    assert!(parser.errors().is_empty());
    assert_eq!(program.to_string(), "return (-x);");
}

#[test]
fn test_missing_operand_keeps_expression() {
    let (program, errors) = parse("1 + ;".to_string(), None);

    assert_eq!(
        messages(&errors),
        vec!["no prefix parse function for SEMICOLON found".to_string()]
    );
    let Expr::Infix(infix) = single_expression(&program) else {
        panic!("expected an infix expression");
    };
    assert!(matches!(*infix.right, Expr::Invalid(_)));
    assert_eq!(program.to_string(), "(1 + )");
}

#[test]
fn test_errors_inside_group_do_not_restart_statement() {
    let (program, errors) = parse("(1 + ) * 3; 7".to_string(), None);

    assert_eq!(
        messages(&errors),
        vec![
            "no prefix parse function for RPAREN found".to_string(),
            "expected next token to be RPAREN, got SEMICOLON instead".to_string(),
        ]
    );
    assert_eq!(program.statements.len(), 2);
    assert!(matches!(
        &program.statements[0],
        Stmt::Expression(stmt) if matches!(stmt.expression, Expr::Invalid(_))
    ));
    assert_eq!(program.to_string(), "7");
}

#[test]
fn test_several_errors_in_one_statement() {
    let (program, errors) = parse("let v = 08 + (1 * 099) - ;".to_string(), None);

    assert_eq!(
        messages(&errors),
        vec![
            "could not parse \"08\" as integer".to_string(),
            "could not parse \"099\" as integer".to_string(),
            "no prefix parse function for SEMICOLON found".to_string(),
        ]
    );
    assert_eq!(program.statements.len(), 1);
    assert_eq!(program.to_string(), "let v = (( + (1 * )) - );");
}

#[test]
fn test_deep_prefix_nesting_is_reported() {
    let source = format!("{}true", "!".repeat(500));
    let (_, errors) = parse(source, None);

    assert!(!errors.is_empty());
    assert!(errors.iter().all(|error| error.get_error_name() == "NestingTooDeep"));
    assert_eq!(
        errors[0].to_string(),
        format!("expression nested more than {MAX_NESTING_DEPTH} levels deep")
    );
}

#[test]
fn test_deep_grouping_is_reported() {
    let depth = 5000;
    let source = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
    let (_, errors) = parse(source, None);

    assert_eq!(errors[0].get_error_name(), "NestingTooDeep");
}

#[test]
fn test_nesting_up_to_limit_parses() {
    // The operand itself takes the last level.
    let source = format!("{}true", "!".repeat(MAX_NESTING_DEPTH - 1));
    let program = parse_ok(&source);

    assert_eq!(program.statements.len(), 1);
}

#[test]
fn test_integer_literal_bases() {
    assert_eq!(parse_ok("010").to_string(), "8");
    assert_eq!(parse_ok("0").to_string(), "0");
    assert_eq!(parse_ok("00").to_string(), "0");

    let (_, errors) = parse("08".to_string(), None);
    assert_eq!(
        messages(&errors),
        vec!["could not parse \"08\" as integer".to_string()]
    );

    assert_eq!(parse_int_literal("0x1F"), Some(31));
    assert_eq!(parse_int_literal("0o17"), Some(15));
    assert_eq!(parse_int_literal("0b101"), Some(5));
    assert_eq!(parse_int_literal("0x"), None);
    assert_eq!(parse_int_literal("0x-1"), None);
    assert_eq!(parse_int_literal("9223372036854775807"), Some(i64::MAX));
}
