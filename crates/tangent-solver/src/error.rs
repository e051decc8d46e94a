//! Error types for the Newton solver
//!
//! ┌ InvalidExpression    : construction, the text does not parse
//! ├ DomainErrorAtGuess   : f or f' undefined at the initial guess
//! ├ NotInitialized       : stepping before an initial guess
//! ├ ZeroDerivative       : horizontal tangent at the current iterate
//! ├ Divergence           : next iterate is not finite
//! └ SingularityAtIterate : next iterate is finite but f or f' is not
//!
//! None of these are retried. Every one leaves the solver as it was, so
//! the caller can pick a new guess, reset, or build a new solver.

use std::fmt;
use tangent_expr::ExprError;
use thiserror::Error;

/// Which half of the pair `(f, f')` was undefined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Undefined {
    Function,
    Derivative,
}

impl fmt::Display for Undefined {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Undefined::Function => write!(f, "Function"),
            Undefined::Derivative => write!(f, "Derivative"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolverError {
    #[error(transparent)]
    InvalidExpression(#[from] ExprError),

    #[error("{kind} is undefined at initial guess x = {x:.4} (possible singularity)")]
    DomainErrorAtGuess { x: f64, kind: Undefined },

    #[error("Derivative is zero at x = {x:.4}; the tangent is horizontal and has no root")]
    ZeroDerivative { x: f64 },

    #[error("Newton step from x = {from:.4} diverged to {value}")]
    Divergence { from: f64, value: f64 },

    #[error("{kind} is undefined at x = {x:.4} (singularity)")]
    SingularityAtIterate { x: f64, kind: Undefined },

    #[error("Solver is not initialized: set an initial guess first")]
    NotInitialized,
}

pub type Result<T> = std::result::Result<T, SolverError>;
