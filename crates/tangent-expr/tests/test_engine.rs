//! Tests for the expression engine as the solver sees it
//!
//! This module tests:
//! - NaN normalisation of every evaluation fault
//! - Symbolic vs numerical derivative selection
//! - Validation messages for the common user mistakes

use approx::assert_relative_eq;
use proptest::prelude::*;
use tangent_expr::{compile, differentiate, validate, Strategy};

// ============================================================================
// Compilation
// ============================================================================

#[test]
fn test_compiled_function_matches_closed_form() {
    let f = compile("x^3 - 2*x + 2").unwrap();
    for x in [-2.0, -0.5, 0.0, 1.0, 3.25] {
        assert_relative_eq!(f.call(x), x * x * x - 2.0 * x + 2.0, epsilon = 1e-12);
    }
}

#[test]
fn test_implicit_multiplication_evaluates() {
    let f = compile("2x(x + 1)").unwrap();
    // `x(` is a call to an unknown function `x`, so this is undefined
    assert!(f.call(1.0).is_nan());

    let g = compile("2(x + 1)x").unwrap();
    assert_relative_eq!(g.call(3.0), 24.0);
}

proptest! {
    #[test]
    fn prop_call_never_panics(x in proptest::num::f64::ANY) {
        for source in ["1/x", "sqrt(x)", "ln(x)", "asin(x)", "x^0.5", "tan(x)", "q(x)"] {
            let f = compile(source).unwrap();
            let _ = f.call(x);
        }
    }

    #[test]
    fn prop_sqrt_defined_on_nonnegative(x in 0.0f64..1e6) {
        let f = compile("sqrt(x)").unwrap();
        prop_assert!(f.call(x).is_finite());
    }
}

// ============================================================================
// Differentiation
// ============================================================================

#[test]
fn test_derivative_display_for_polynomial() {
    let d = differentiate("x^2 - 2").unwrap();
    assert_eq!(d.strategy(), Strategy::Symbolic);
    assert_eq!(d.display(), "2 * x");
    assert_relative_eq!(d.call(3.0), 6.0);
}

#[test]
fn test_numerical_fallback_is_central_difference() {
    let d = differentiate("floor(x) + x^2").unwrap();
    assert_eq!(d.strategy(), Strategy::Numerical);
    assert_eq!(d.display(), "f'(x)");
    // Away from the jumps of floor, the slope is that of x^2
    assert_relative_eq!(d.call(1.5), 3.0, epsilon = 1e-5);
}

#[test]
fn test_derivative_nan_at_singularity() {
    let d = differentiate("1/x").unwrap();
    assert!(d.call(0.0).is_nan());

    let d = differentiate("sqrt(x)").unwrap();
    assert!(d.call(0.0).is_nan());
}

// ============================================================================
// Validation
// ============================================================================

#[test]
fn test_validation_scenarios() {
    let empty = validate("");
    assert!(!empty.valid);
    assert_eq!(empty.error.as_deref(), Some("Expression cannot be empty."));

    let bare = validate("sin");
    assert!(!bare.valid);
    let message = bare.error.unwrap();
    assert!(message.contains("sin") && message.contains("sin(x)"));

    assert!(validate("x^2 - 2").valid);

    let garbage = validate("qwerty");
    assert!(!garbage.valid);
    assert!(garbage.error.unwrap().contains("not a valid function of x"));
}
