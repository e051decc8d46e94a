//! User-facing validation of expression text
//!
//! Checks run in order and stop at the first failure, so that specific
//! messages (a function written without its argument) win over generic
//! ones. The plausibility check is a cheap pre-filter, not a grammar.

use crate::function::{Function, VARIABLE};
use serde::Serialize;
use tangent_parser::{Constant, MathFunction};

/// Second probe point, used when `x = 1` happens to be a singularity.
const PROBE_POINTS: [f64; 2] = [1.0, 2.0];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Validation {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Validation {
    fn ok() -> Self {
        Validation {
            valid: true,
            error: None,
        }
    }

    fn invalid(message: impl Into<String>) -> Self {
        Validation {
            valid: false,
            error: Some(message.into()),
        }
    }
}

pub fn validate(expression: &str) -> Validation {
    let trimmed = expression.trim();

    if trimmed.is_empty() {
        return Validation::invalid("Expression cannot be empty.");
    }

    if let Some(function) = function_missing_argument(trimmed) {
        return Validation::invalid(format!(
            "Function '{name}' requires an argument in parentheses, e.g. {name}(x).",
            name = function.name()
        ));
    }

    if !starts_with_math_token(trimmed) && !evaluates_at_probe(trimmed) {
        return Validation::invalid(format!("'{}' is not a valid function of x.", trimmed));
    }

    let expr = match tangent_parser::parse(trimmed) {
        Ok(expr) => expr,
        Err(err) => return Validation::invalid(format!("Invalid expression: {}", err)),
    };
    let function = Function::from_expr(expr);

    if let Some(fault) = function.unresolved() {
        return Validation::invalid(format!(
            "Expression must evaluate to a number ({}).",
            fault
        ));
    }

    for x in PROBE_POINTS {
        match function.try_call(x) {
            Ok(value) if !value.is_nan() => return Validation::ok(),
            // Domain faults are the same "undefined here" as NaN
            Ok(_) | Err(_) => continue,
        }
    }

    Validation::invalid(format!(
        "Cannot evaluate function: result is undefined at x = {} and x = {}.",
        PROBE_POINTS[0], PROBE_POINTS[1]
    ))
}

/// First built-in function name that is not followed by `(`.
fn function_missing_argument(source: &str) -> Option<MathFunction> {
    let chars: Vec<char> = source.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c.is_ascii_digit() || c == '.' {
            // Skip number literals so `2sin` still reports `sin`
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                i += 1;
            }
        } else if c.is_ascii_alphabetic() || c == '_' {
            let start = i;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            if let Some(function) = MathFunction::from_name(&word) {
                let next = chars[i..].iter().find(|c| !c.is_whitespace());
                if next != Some(&'(') {
                    return Some(function);
                }
            }
        } else {
            i += 1;
        }
    }

    None
}

/// Does the text open with something that looks like math?
fn starts_with_math_token(source: &str) -> bool {
    let Some(first) = source.chars().next() else {
        return false;
    };

    if first.is_ascii_digit() || "+-*/^().".contains(first) {
        return true;
    }
    if source.starts_with(VARIABLE) {
        return true;
    }

    MathFunction::ALL
        .iter()
        .map(|f| f.name())
        .chain(Constant::ALL.iter().map(|c| c.name()))
        .any(|name| source.starts_with(name))
}

/// Fallback for text that does not look like math: accept it only if it
/// compiles and produces a number at the first probe point.
fn evaluates_at_probe(source: &str) -> bool {
    match crate::function::compile(source) {
        Ok(function) => matches!(function.try_call(PROBE_POINTS[0]), Ok(v) if !v.is_nan()),
        Err(_) => false,
    }
}
