//! Expression engine
//!
//! Turns expression text into things that can be evaluated:
//! - [`compile`]: a [`Function`] of `x` that never raises (faults become `NaN`)
//! - [`differentiate`]: a [`Derivative`], symbolic when possible, otherwise a
//!   central difference
//! - [`validate`]: layered checks with messages meant for the user

pub mod derivative;
pub mod error;
pub mod function;
pub mod simplify;
pub mod validate;

// Re-exports
pub use derivative::{differentiate, Derivative, Strategy, NUMERICAL_DISPLAY, NUMERICAL_STEP};
pub use error::{DiffError, EvalFault, ExprError};
pub use function::{compile, Function, VARIABLE};
pub use validate::{validate, Validation};
