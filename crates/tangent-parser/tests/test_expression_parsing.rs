//! Parser tests for the restricted infix grammar
//!
//! These tests verify precedence, associativity, implicit multiplication
//! and the error messages surfaced for rejected input.

use tangent_parser::{parse, BinaryOp, Expr, ParseError};

fn x() -> Expr {
    Expr::symbol("x")
}

fn n(value: f64) -> Expr {
    Expr::number(value)
}

#[test]
fn test_parse_polynomial() {
    let result = parse("x^2 - 2");
    assert!(result.is_ok(), "Failed to parse: {:?}", result.err());
    assert_eq!(result.unwrap(), Expr::sub(Expr::pow(x(), n(2.0)), n(2.0)));
}

#[test]
fn test_product_binds_tighter_than_sum() {
    let expr = parse("1 + 2 * x").unwrap();
    assert_eq!(expr, Expr::add(n(1.0), Expr::mul(n(2.0), x())));
}

#[test]
fn test_left_associative_subtraction_and_division() {
    assert_eq!(
        parse("x - 1 - 2").unwrap(),
        Expr::sub(Expr::sub(x(), n(1.0)), n(2.0))
    );
    assert_eq!(
        parse("x / 2 / 4").unwrap(),
        Expr::div(Expr::div(x(), n(2.0)), n(4.0))
    );
}

#[test]
fn test_power_is_right_associative() {
    assert_eq!(
        parse("2^3^2").unwrap(),
        Expr::pow(n(2.0), Expr::pow(n(3.0), n(2.0)))
    );
}

#[test]
fn test_negation_is_looser_than_power() {
    assert_eq!(parse("-x^2").unwrap(), Expr::neg(Expr::pow(x(), n(2.0))));
    assert_eq!(parse("2^-x").unwrap(), Expr::pow(n(2.0), Expr::neg(x())));
    assert_eq!(parse("--x").unwrap(), x());
    assert_eq!(parse("+x").unwrap(), x());
}

#[test]
fn test_implicit_multiplication() {
    assert_eq!(parse("2x").unwrap(), Expr::mul(n(2.0), x()));
    assert_eq!(
        parse("3(x + 1)").unwrap(),
        Expr::mul(n(3.0), Expr::add(x(), n(1.0)))
    );
    assert_eq!(
        parse("(x - 1)(x + 1)").unwrap(),
        Expr::mul(Expr::sub(x(), n(1.0)), Expr::add(x(), n(1.0)))
    );
    assert_eq!(
        parse("2x^2").unwrap(),
        Expr::mul(n(2.0), Expr::pow(x(), n(2.0)))
    );
}

#[test]
fn test_adjacent_numbers_are_not_multiplied() {
    for source in ["2 3", "x 2", "(x + 1) 2", "2 .5", "sin(x) 4"] {
        assert!(parse(source).is_err(), "Expected error for {:?}", source);
    }
    assert_eq!(parse("2 x").unwrap(), Expr::mul(n(2.0), x()));
}

#[test]
fn test_function_calls() {
    match parse("sin(x)").unwrap() {
        Expr::Call { name, args } => {
            assert_eq!(name, "sin");
            assert_eq!(args, vec![x()]);
        }
        other => panic!("Expected Call, got {:?}", other),
    }

    match parse("atan2(x, 1)").unwrap() {
        Expr::Call { name, args } => {
            assert_eq!(name, "atan2");
            assert_eq!(args.len(), 2);
        }
        other => panic!("Expected Call, got {:?}", other),
    }

    match parse("f()").unwrap() {
        Expr::Call { args, .. } => assert!(args.is_empty()),
        other => panic!("Expected Call, got {:?}", other),
    }
}

#[test]
fn test_identifiers_are_symbols() {
    assert_eq!(parse("pi").unwrap(), Expr::symbol("pi"));
    assert_eq!(parse("qwerty").unwrap(), Expr::symbol("qwerty"));
    // A bare function name is still just a name to the grammar
    assert_eq!(parse("sin").unwrap(), Expr::symbol("sin"));
}

#[test]
fn test_number_forms() {
    assert_eq!(parse("1.5").unwrap(), n(1.5));
    assert_eq!(parse(".25").unwrap(), n(0.25));
    assert_eq!(parse("1e3").unwrap(), n(1000.0));
    assert_eq!(parse("2.5E-1").unwrap(), n(0.25));
    // `2e` without exponent digits is 2 times Euler's number
    assert_eq!(parse("2e").unwrap(), Expr::mul(n(2.0), Expr::symbol("e")));
}

#[test]
fn test_whitespace_is_ignored() {
    assert_eq!(parse("  x^2\t-  2 ").unwrap(), parse("x^2-2").unwrap());
}

#[test]
fn test_rejects_malformed_input() {
    for source in ["", "x +", "(x", "x)", "2 ** x", "*x", "sin(x,)"] {
        let result = parse(source);
        assert!(result.is_err(), "Expected error for {:?}", source);
    }
}

#[test]
fn test_error_reports_position() {
    match parse("x + ") {
        Err(ParseError::Syntax { line, column, message }) => {
            assert_eq!(line, 1);
            assert!(column >= 4, "column was {}", column);
            assert!(message.contains("expected"), "message was {}", message);
        }
        other => panic!("Expected syntax error, got {:?}", other),
    }
}

#[test]
fn test_display_round_trips_through_parser() {
    for source in [
        "x^2 - 2",
        "sin(x) / x",
        "2 * (x + 1)",
        "-x^2 + exp(-x)",
        "(x - 1) / (x + 1)",
        "2^x^2",
        "x - (x - 1)",
    ] {
        let expr = parse(source).unwrap();
        let printed = expr.to_string();
        let reparsed = parse(&printed).unwrap();
        assert_eq!(expr, reparsed, "{} printed as {}", source, printed);
    }
}

#[test]
fn test_binary_op_symbols() {
    assert_eq!(BinaryOp::Pow.symbol(), "^");
    assert_eq!(BinaryOp::Div.symbol(), "/");
}
