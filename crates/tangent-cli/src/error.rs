//! CLI error types

use tangent_solver::SolverError;
use thiserror::Error;

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Error, Debug)]
pub enum CliError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Settings file could not be read as JSON
    #[error("Invalid settings file '{path}': {source}")]
    Settings {
        path: String,
        source: serde_json::Error,
    },

    /// JSON output failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Expression rejected by validation
    #[error("{0}")]
    InvalidExpression(String),

    /// Solver error
    #[error(transparent)]
    Solver(#[from] SolverError),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
