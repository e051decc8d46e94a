//! Drives a solver the way an interactive front end would: one step per
//! request, checking convergence after every step.

use crate::error::{CliError, Result};
use serde::Serialize;
use std::fs;
use tangent_expr::validate;
use tangent_solver::{IterationRecord, NewtonSolver, SolverError, SolverSettings, SolverStatus};

/// Load settings from an optional JSON file, falling back to defaults.
pub fn load_settings(path: Option<&str>) -> Result<SolverSettings> {
    let Some(path) = path else {
        return Ok(SolverSettings::default());
    };

    let contents = fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|source| CliError::Settings {
        path: path.to_string(),
        source,
    })
}

/// Outcome of a stepping session.
pub struct Session {
    pub solver: NewtonSolver,
    pub settings: SolverSettings,
    pub error: Option<SolverError>,
}

impl Session {
    pub fn status(&self) -> SolverStatus {
        self.solver.status(self.settings.tolerance)
    }

    pub fn converged(&self) -> bool {
        self.status() == SolverStatus::Converged
    }

    pub fn progress(&self) -> Option<f64> {
        self.solver.progress(self.settings.progress_target)
    }

    pub fn report(&self) -> SessionReport {
        SessionReport {
            expression: self.solver.expression().to_string(),
            derivative: self.solver.derivative_display(),
            strategy: self.solver.derivative_strategy().to_string(),
            status: status_label(self.status()),
            root: if self.converged() {
                self.solver.current_x()
            } else {
                None
            },
            progress: self.progress(),
            iterations: self.solver.iterations(),
            error: self.error.as_ref().map(|e| e.to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SessionReport {
    pub expression: String,
    pub derivative: String,
    pub strategy: String,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<f64>,
    pub iterations: Vec<IterationRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub fn status_label(status: SolverStatus) -> &'static str {
    match status {
        SolverStatus::Uninitialized => "uninitialized",
        SolverStatus::Active => "active",
        SolverStatus::Converged => "converged",
    }
}

/// Validate, build, seed with `x0` and step until converged, failed, or
/// out of steps. Step failures end the session but are not errors here;
/// they are reported on the returned [`Session`].
pub fn run(expression: &str, x0: f64, settings: SolverSettings) -> Result<Session> {
    let validation = validate(expression);
    if !validation.valid {
        let message = validation
            .error
            .unwrap_or_else(|| "Invalid expression".to_string());
        return Err(CliError::InvalidExpression(message));
    }

    let mut solver = NewtonSolver::new(expression)?;
    let mut session_error = None;

    match solver.set_initial_guess(x0) {
        Ok(_) => {
            for _ in 0..settings.max_steps {
                if solver.has_converged(settings.tolerance) {
                    break;
                }
                if let Err(err) = solver.next_iteration() {
                    session_error = Some(err);
                    break;
                }
            }
        }
        Err(err) => session_error = Some(err),
    }

    tracing::info!(
        expression,
        x0,
        steps = solver.iterations().len().saturating_sub(1),
        residual = ?solver.last_iteration().map(|r| r.fx),
        "session finished"
    );

    Ok(Session {
        solver,
        settings,
        error: session_error,
    })
}

/// Evenly spaced samples of `f` over `[from, to]`, for plotting.
pub fn sample(solver: &NewtonSolver, from: f64, to: f64, points: usize) -> Result<Vec<(f64, f64)>> {
    if points < 2 {
        return Err(CliError::InvalidArgument(format!(
            "need at least 2 sample points, got {}",
            points
        )));
    }
    if !(from.is_finite() && to.is_finite()) || from >= to {
        return Err(CliError::InvalidArgument(format!(
            "sample range must be finite with from < to, got [{}, {}]",
            from, to
        )));
    }

    let step = (to - from) / (points - 1) as f64;
    Ok((0..points)
        .map(|i| {
            let x = from + step * i as f64;
            (x, solver.evaluate(x))
        })
        .collect())
}
