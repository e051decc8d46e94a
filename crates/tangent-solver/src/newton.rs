//! Newton's method, one step at a time
//!
//! `x_{n+1} = x_n - f(x_n) / f'(x_n)`
//!
//! The solver keeps the full iteration history so that every tangent line
//! can be drawn. Each step either appends exactly one record or fails and
//! leaves the history untouched.
//!
//! States: Uninitialized → Active → Converged, with [`NewtonSolver::reset`]
//! returning to Uninitialized. Convergence depends on the tolerance the
//! caller asks about, so the solver does not refuse steps once converged;
//! stopping is up to the driver.

use crate::error::{Result, SolverError, Undefined};
use crate::progress::convergence_progress;
use crate::record::IterationRecord;
use tangent_expr::{compile, Derivative, Function, Strategy};

/// Below this `|f'(x)|` the tangent is treated as horizontal.
pub const ZERO_DERIVATIVE_TOLERANCE: f64 = 1e-12;

/// Default `|f(x)|` threshold for [`NewtonSolver::has_converged`].
pub const DEFAULT_CONVERGENCE_TOLERANCE: f64 = 1e-10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverStatus {
    Uninitialized,
    Active,
    Converged,
}

#[derive(Debug, Clone)]
pub struct NewtonSolver {
    expression: String,
    function: Function,
    derivative: Derivative,
    iterations: Vec<IterationRecord>,
    current_x: Option<f64>,
}

impl NewtonSolver {
    /// Compile `expression` and its derivative.
    ///
    /// Fails only if the expression cannot be parsed. Symbolic
    /// differentiation problems fall back to a numerical derivative.
    pub fn new(expression: &str) -> Result<Self> {
        let function = compile(expression)?;
        let derivative = Derivative::of(function.expr());

        tracing::debug!(
            expression,
            derivative = %derivative.display(),
            strategy = %derivative.strategy(),
            "compiled newton solver"
        );

        Ok(NewtonSolver {
            expression: expression.to_string(),
            function,
            derivative,
            iterations: Vec::new(),
            current_x: None,
        })
    }

    /// Start a fresh session at `x0`. Any previous history is discarded.
    pub fn set_initial_guess(&mut self, x0: f64) -> Result<IterationRecord> {
        let (fx, f_prime_x) = self
            .evaluate_pair(x0)
            .map_err(|kind| SolverError::DomainErrorAtGuess { x: x0, kind })?;

        let record = IterationRecord::new(0, x0, fx, f_prime_x, None);
        self.iterations.clear();
        self.iterations.push(record);
        self.current_x = Some(x0);

        tracing::debug!(x0, fx, f_prime_x, "initial guess set");
        Ok(record)
    }

    /// Take one Newton step from the current iterate.
    ///
    /// On error nothing changes: the history and the current iterate are
    /// exactly as before the call.
    pub fn next_iteration(&mut self) -> Result<IterationRecord> {
        match self.compute_step() {
            Ok(record) => {
                self.iterations.push(record);
                self.current_x = Some(record.x);
                tracing::debug!(
                    n = record.n,
                    x = record.x,
                    fx = record.fx,
                    f_prime_x = record.f_prime_x,
                    "newton step committed"
                );
                Ok(record)
            }
            Err(err) => {
                tracing::warn!(error = %err, "newton step rejected");
                Err(err)
            }
        }
    }

    fn compute_step(&self) -> Result<IterationRecord> {
        let last = self.iterations.last().ok_or(SolverError::NotInitialized)?;
        let (x, fx, f_prime_x) = (last.x, last.fx, last.f_prime_x);

        if f_prime_x.abs() < ZERO_DERIVATIVE_TOLERANCE {
            return Err(SolverError::ZeroDerivative { x });
        }

        let next_x = x - fx / f_prime_x;
        if !next_x.is_finite() {
            return Err(SolverError::Divergence {
                from: x,
                value: next_x,
            });
        }

        let (next_fx, next_f_prime_x) = self
            .evaluate_pair(next_x)
            .map_err(|kind| SolverError::SingularityAtIterate { x: next_x, kind })?;

        Ok(IterationRecord::new(
            self.iterations.len(),
            next_x,
            next_fx,
            next_f_prime_x,
            Some(x),
        ))
    }

    /// `(f(x), f'(x))`, or which of the two is not finite.
    fn evaluate_pair(&self, x: f64) -> std::result::Result<(f64, f64), Undefined> {
        let fx = self.function.call(x);
        if !fx.is_finite() {
            return Err(Undefined::Function);
        }
        let f_prime_x = self.derivative.call(x);
        if !f_prime_x.is_finite() {
            return Err(Undefined::Derivative);
        }
        Ok((fx, f_prime_x))
    }

    /// True once at least one step was taken and the latest `|f(x)|` is
    /// below `tolerance`.
    pub fn has_converged(&self, tolerance: f64) -> bool {
        if self.iterations.len() < 2 {
            return false;
        }
        self.iterations
            .last()
            .map(|r| r.fx.abs() < tolerance)
            .unwrap_or(false)
    }

    pub fn has_converged_default(&self) -> bool {
        self.has_converged(DEFAULT_CONVERGENCE_TOLERANCE)
    }

    pub fn status(&self, tolerance: f64) -> SolverStatus {
        if self.iterations.is_empty() {
            SolverStatus::Uninitialized
        } else if self.has_converged(tolerance) {
            SolverStatus::Converged
        } else {
            SolverStatus::Active
        }
    }

    /// Copy of the full history, oldest first.
    pub fn iterations(&self) -> Vec<IterationRecord> {
        self.iterations.clone()
    }

    pub fn last_iteration(&self) -> Option<IterationRecord> {
        self.iterations.last().copied()
    }

    pub fn current_x(&self) -> Option<f64> {
        self.current_x
    }

    /// `f(x)` for arbitrary `x`, independent of the iteration state.
    pub fn evaluate(&self, x: f64) -> f64 {
        self.function.call(x)
    }

    pub fn evaluate_derivative(&self, x: f64) -> f64 {
        self.derivative.call(x)
    }

    /// Progress of the latest residual towards `target`, see
    /// [`convergence_progress`]. `None` before an initial guess.
    pub fn progress(&self, target: f64) -> Option<f64> {
        let first = self.iterations.first()?;
        let last = self.iterations.last()?;
        Some(convergence_progress(last.fx.abs(), first.fx.abs(), target))
    }

    /// Discard the session and return to the uninitialized state.
    pub fn reset(&mut self) {
        self.iterations.clear();
        self.current_x = None;
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn derivative_display(&self) -> String {
        self.derivative.display()
    }

    pub fn derivative_strategy(&self) -> Strategy {
        self.derivative.strategy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_new_compiles_derivative() {
        let solver = NewtonSolver::new("x^2 - 2").unwrap();
        assert_eq!(solver.derivative_display(), "2 * x");
        assert_eq!(solver.derivative_strategy(), Strategy::Symbolic);
        assert_eq!(solver.status(DEFAULT_CONVERGENCE_TOLERANCE), SolverStatus::Uninitialized);
        assert_eq!(solver.current_x(), None);
    }

    #[test]
    fn test_new_rejects_unparsable() {
        assert!(matches!(
            NewtonSolver::new("x^"),
            Err(SolverError::InvalidExpression(_))
        ));
    }

    #[test]
    fn test_first_step() {
        let mut solver = NewtonSolver::new("x^2 - 2").unwrap();
        solver.set_initial_guess(3.0).unwrap();
        let r = solver.next_iteration().unwrap();
        assert_eq!(r.n, 1);
        assert_eq!(r.prev_x, Some(3.0));
        assert_relative_eq!(r.x, 3.0 - 7.0 / 6.0, epsilon = 1e-12);
        assert_eq!(solver.current_x(), Some(r.x));
        assert_eq!(solver.last_iteration(), Some(r));
        assert_eq!(solver.status(1e-10), SolverStatus::Active);
    }

    #[test]
    fn test_not_initialized() {
        let mut solver = NewtonSolver::new("x").unwrap();
        assert_eq!(solver.last_iteration(), None);
        assert_eq!(solver.next_iteration(), Err(SolverError::NotInitialized));
    }

    #[test]
    fn test_reset_returns_to_uninitialized() {
        let mut solver = NewtonSolver::new("x^2 - 2").unwrap();
        solver.set_initial_guess(1.0).unwrap();
        solver.next_iteration().unwrap();
        solver.reset();
        assert!(solver.iterations().is_empty());
        assert_eq!(solver.current_x(), None);
        assert_eq!(solver.progress(1e-10), None);
        assert_eq!(solver.next_iteration(), Err(SolverError::NotInitialized));
    }

    #[test]
    fn test_error_messages_format_four_decimals() {
        let mut solver = NewtonSolver::new("1/x").unwrap();
        let err = solver.set_initial_guess(0.0).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Function is undefined at initial guess x = 0.0000 (possible singularity)"
        );

        let mut solver = NewtonSolver::new("x^2").unwrap();
        solver.set_initial_guess(0.0).unwrap();
        assert_eq!(
            solver.next_iteration().unwrap_err().to_string(),
            "Derivative is zero at x = 0.0000; the tangent is horizontal and has no root"
        );
    }
}
