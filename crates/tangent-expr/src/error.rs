//! Error types for the expression engine

use tangent_parser::ParseError;
use thiserror::Error;

/// Structural errors raised while building callables
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExprError {
    /// The text could not be parsed
    #[error("Invalid expression: {0}")]
    InvalidExpression(#[from] ParseError),
}

/// Faults raised while evaluating a compiled function at a point.
///
/// These never escape [`crate::Function::call`]; they are folded into `NaN`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalFault {
    #[error("Undefined symbol '{0}'")]
    UnknownSymbol(String),

    #[error("Undefined function '{0}'")]
    UnknownFunction(String),

    #[error("{function}() expects {expected} argument(s), got {got}")]
    Arity {
        function: String,
        expected: usize,
        got: usize,
    },

    #[error("{function}({arg}) is outside the domain of {function}")]
    Domain { function: &'static str, arg: f64 },

    #[error("Division by zero")]
    DivisionByZero,
}

impl EvalFault {
    /// True for faults that no choice of `x` can fix: the expression names
    /// something the engine cannot resolve to a number.
    pub fn is_unresolved(&self) -> bool {
        matches!(
            self,
            EvalFault::UnknownSymbol(_) | EvalFault::UnknownFunction(_) | EvalFault::Arity { .. }
        )
    }
}

/// Reasons symbolic differentiation gives up.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DiffError {
    #[error("Derivative of function '{0}' is not supported")]
    Unsupported(String),

    #[error("Derivative of unknown function '{0}' is not known")]
    UnknownFunction(String),

    #[error("Cannot differentiate unknown symbol '{0}'")]
    UnknownSymbol(String),

    #[error("{function}() expects 1 argument, got {got}")]
    Arity { function: String, got: usize },
}
