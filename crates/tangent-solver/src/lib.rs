//! Newton's method solver
//!
//! Driven one step at a time by a presentation layer: construct from an
//! expression, set an initial guess, call [`NewtonSolver::next_iteration`]
//! and read the history back with [`NewtonSolver::iterations`].
//!
//! ```
//! use tangent_solver::NewtonSolver;
//!
//! let mut solver = NewtonSolver::new("x^2 - 2").unwrap();
//! solver.set_initial_guess(3.0).unwrap();
//! while !solver.has_converged_default() {
//!     solver.next_iteration().unwrap();
//! }
//! let root = solver.current_x().unwrap();
//! assert!((root - 2f64.sqrt()).abs() < 1e-10);
//! ```

pub mod error;
pub mod newton;
pub mod progress;
pub mod record;
pub mod settings;

// Re-exports
pub use error::{SolverError, Undefined};
pub use newton::{
    NewtonSolver, SolverStatus, DEFAULT_CONVERGENCE_TOLERANCE, ZERO_DERIVATIVE_TOLERANCE,
};
pub use progress::{convergence_progress, DEFAULT_PROGRESS_TARGET};
pub use record::IterationRecord;
pub use settings::SolverSettings;
pub use tangent_expr::Strategy;
