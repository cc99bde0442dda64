//! Property-based tests for the parser.
//!
//! Generated programs use only the supported grammar, so they must parse
//! without diagnostics, and their canonical rendering must be stable under
//! re-parsing.

use interpreter::{ast::ast::Stmt, lexer::lexer::tokenize, parser::parser::parse};
use proptest::prelude::*;

const KEYWORDS: [&str; 7] = ["let", "return", "fn", "if", "else", "true", "false"];

// ============================================================================
// Strategies for generating test inputs
// ============================================================================

fn arb_ident() -> impl Strategy<Value = String> {
    "[a-z_][a-z0-9_]{0,8}".prop_filter("keywords are not identifiers", |name| {
        !KEYWORDS.contains(&name.as_str())
    })
}

fn arb_atom() -> impl Strategy<Value = String> {
    prop_oneof![
        (0i64..=100_000).prop_map(|n| n.to_string()),
        Just("true".to_string()),
        Just("false".to_string()),
        arb_ident(),
    ]
}

fn arb_binop() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("+"),
        Just("-"),
        Just("*"),
        Just("/"),
        Just("=="),
        Just("!="),
        Just("<"),
        Just(">"),
    ]
}

fn arb_expr() -> impl Strategy<Value = String> {
    arb_atom().prop_recursive(4, 24, 4, |inner| {
        prop_oneof![
            (inner.clone(), arb_binop(), inner.clone())
                .prop_map(|(left, op, right)| format!("{left} {op} {right}")),
            (prop_oneof![Just("!"), Just("-")], inner.clone())
                .prop_map(|(op, right)| format!("{op}{right}")),
            inner.clone().prop_map(|expr| format!("({expr})")),
            (arb_ident(), prop::collection::vec(inner, 0..3))
                .prop_map(|(name, args)| format!("{name}({})", args.join(", "))),
        ]
    })
}

fn arb_stmt() -> impl Strategy<Value = String> {
    prop_oneof![
        (arb_ident(), arb_expr()).prop_map(|(name, value)| format!("let {name} = {value};")),
        arb_expr().prop_map(|value| format!("return {value};")),
        arb_expr().prop_map(|value| format!("{value};")),
    ]
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Lexer should never panic on any input
    #[test]
    fn lexer_no_panic(input in ".{0,100}") {
        let _ = tokenize(input, None);
    }

    /// Parser should never panic on any input, even invalid
    #[test]
    fn parser_no_panic(input in ".{0,100}") {
        let _ = parse(input, None);
    }

    /// Parser should never panic on token soup drawn from the language
    #[test]
    fn parser_no_panic_on_token_soup(
        pieces in prop::collection::vec(
            prop_oneof![
                Just("let"), Just("fn"), Just("if"), Just("else"), Just("return"),
                Just("("), Just(")"), Just("{"), Just("}"), Just(";"), Just(","),
                Just("="), Just("+"), Just("!"), Just("x"), Just("1"),
            ],
            0..40,
        )
    ) {
        let _ = parse(pieces.join(" "), None);
    }

    /// Well-formed programs produce no diagnostics and one statement per terminator
    #[test]
    fn well_formed_program_parses(stmts in prop::collection::vec(arb_stmt(), 0..6)) {
        let source = stmts.join("\n");
        let (program, errors) = parse(source.clone(), None);

        prop_assert!(errors.is_empty(), "diagnostics for {:?}: {:?}", source, errors);
        prop_assert_eq!(program.statements.len(), stmts.len());
    }

    /// Rendering a parsed expression and parsing it again gives the same tree
    #[test]
    fn rendering_is_stable(expr in arb_expr()) {
        let (first, errors) = parse(expr.clone(), None);
        prop_assert!(errors.is_empty(), "diagnostics for {:?}: {:?}", expr, errors);

        let rendered = first.to_string();
        let (second, errors) = parse(rendered.clone(), None);
        prop_assert!(errors.is_empty(), "diagnostics for {:?}: {:?}", rendered, errors);
        prop_assert_eq!(second.to_string(), rendered);
    }

    /// Let statements keep their name and full value expression
    #[test]
    fn let_binds_name(name in arb_ident(), value in arb_expr()) {
        let (program, errors) = parse(format!("let {name} = {value};"), None);
        prop_assert!(errors.is_empty());

        match &program.statements[0] {
            Stmt::Let(stmt) => {
                prop_assert_eq!(&stmt.name.value, &name);
                let (reparsed, _) = parse(value, None);
                prop_assert_eq!(stmt.value.to_string(), reparsed.to_string());
            }
            other => prop_assert!(false, "expected a let statement, got {:?}", other),
        }
    }
}
