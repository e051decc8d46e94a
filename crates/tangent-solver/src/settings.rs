//! Driver settings
//!
//! The engine's own thresholds (zero derivative, default tolerance) are
//! fixed constants. These settings are for whoever drives the solver:
//! when to call it converged, how many steps to offer, and where the
//! progress bar ends.

use crate::newton::DEFAULT_CONVERGENCE_TOLERANCE;
use crate::progress::DEFAULT_PROGRESS_TARGET;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverSettings {
    /// `|f(x)|` below which the solver counts as converged
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    /// Upper bound on steps a driver will request
    #[serde(default = "default_max_steps")]
    pub max_steps: usize,
    /// Residual at which convergence progress reads 100%
    #[serde(default = "default_progress_target")]
    pub progress_target: f64,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            tolerance: default_tolerance(),
            max_steps: default_max_steps(),
            progress_target: default_progress_target(),
        }
    }
}

fn default_tolerance() -> f64 {
    DEFAULT_CONVERGENCE_TOLERANCE
}

fn default_max_steps() -> usize {
    50
}

fn default_progress_target() -> f64 {
    DEFAULT_PROGRESS_TARGET
}
