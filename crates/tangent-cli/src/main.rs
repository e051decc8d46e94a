use clap::{Parser, Subcommand};
use tangent_expr::{differentiate, validate};
use tangent_solver::NewtonSolver;
use tracing_subscriber::EnvFilter;

mod error;
mod formatting;
mod session;

use error::{CliError, Result};

/// Tangent - Newton's method, one step at a time
#[derive(Parser)]
#[command(name = "tangent")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Step through Newton's method on a function of x", long_about = "Tangent\n\nCompiles a function of x, differentiates it, and walks Newton's method\nfrom an initial guess, printing every iterate with its tangent line.\n\nSet TANGENT_LOG (e.g. TANGENT_LOG=debug) to see engine logs on stderr.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that an expression is a usable function of x
    Validate {
        /// Expression, e.g. "x^2 - 2"
        expression: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the derivative and how it is computed
    Derive {
        /// Expression to differentiate
        expression: String,
    },
    /// Evaluate f at one or more points
    Eval {
        /// Expression to evaluate
        expression: String,
        /// Points at which to evaluate
        #[arg(required = true, allow_negative_numbers = true)]
        points: Vec<f64>,
    },
    /// Run Newton's method from an initial guess
    Iterate {
        /// Expression whose root to find
        expression: String,
        /// Initial guess
        #[arg(long, allow_negative_numbers = true)]
        x0: f64,
        /// Maximum number of steps
        #[arg(long)]
        steps: Option<usize>,
        /// Convergence tolerance on |f(x)|
        #[arg(long)]
        tolerance: Option<f64>,
        /// JSON settings file (tolerance, max_steps, progress_target)
        #[arg(long, value_name = "FILE")]
        config: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Sample f over a range, e.g. to plot the curve
    Sample {
        /// Expression to sample
        expression: String,
        /// Start of the range
        #[arg(long, allow_negative_numbers = true)]
        from: f64,
        /// End of the range
        #[arg(long, allow_negative_numbers = true)]
        to: f64,
        /// Number of evenly spaced points
        #[arg(long, default_value_t = 101)]
        points: usize,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Validate { expression, json } => validate_command(&expression, json),
        Commands::Derive { expression } => derive_command(&expression),
        Commands::Eval { expression, points } => eval_command(&expression, &points),
        Commands::Iterate {
            expression,
            x0,
            steps,
            tolerance,
            config,
            json,
        } => iterate_command(&expression, x0, steps, tolerance, config.as_deref(), json),
        Commands::Sample {
            expression,
            from,
            to,
            points,
            json,
        } => sample_command(&expression, from, to, points, json),
    };

    if let Err(err) = result {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

/// Filter used when `TANGENT_LOG` is unset. Failures already reach the user
/// as `Error: ...`, so only engine errors are logged by default.
const DEFAULT_LOG_FILTER: &str = "error";

fn init_logging() {
    let filter = EnvFilter::try_from_env("TANGENT_LOG")
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn validate_command(expression: &str, json: bool) -> Result<()> {
    let validation = validate(expression);

    if json {
        println!("{}", serde_json::to_string_pretty(&validation)?);
    } else if validation.valid {
        println!("valid");
    }

    if validation.valid {
        Ok(())
    } else {
        Err(CliError::InvalidExpression(
            validation.error.unwrap_or_default(),
        ))
    }
}

fn derive_command(expression: &str) -> Result<()> {
    let derivative = differentiate(expression).map_err(tangent_solver::SolverError::from)?;
    println!("f(x)  = {}", expression.trim());
    println!("f'(x) = {}", derivative.display());
    println!("strategy: {}", derivative.strategy());
    Ok(())
}

fn eval_command(expression: &str, points: &[f64]) -> Result<()> {
    let solver = NewtonSolver::new(expression)?;
    for &x in points {
        println!(
            "f({}) = {}",
            x,
            formatting::format_value(solver.evaluate(x))
        );
    }
    Ok(())
}

fn iterate_command(
    expression: &str,
    x0: f64,
    steps: Option<usize>,
    tolerance: Option<f64>,
    config: Option<&str>,
    json: bool,
) -> Result<()> {
    // Flags override the settings file, which overrides the defaults
    let mut settings = session::load_settings(config)?;
    if let Some(steps) = steps {
        settings.max_steps = steps;
    }
    if let Some(tolerance) = tolerance {
        if tolerance.is_nan() || tolerance <= 0.0 {
            return Err(CliError::InvalidArgument(format!(
                "tolerance must be positive, got {}",
                tolerance
            )));
        }
        settings.tolerance = tolerance;
    }

    let session = session::run(expression, x0, settings)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&session.report())?);
    } else {
        print_session(&session);
    }

    match session.error {
        Some(err) => Err(err.into()),
        None => Ok(()),
    }
}

fn print_session(session: &session::Session) {
    let solver = &session.solver;
    println!("f(x)  = {}", solver.expression().trim());
    println!(
        "f'(x) = {} ({})",
        solver.derivative_display(),
        solver.derivative_strategy()
    );
    println!();

    let history = solver.iterations();
    if !history.is_empty() {
        println!("{}", formatting::table_header());
        let initial = history[0].fx.abs();
        for record in &history {
            let progress = tangent_solver::convergence_progress(
                record.fx.abs(),
                initial,
                session.settings.progress_target,
            );
            println!("{}", formatting::table_row(record, progress));
        }
        println!();
    }

    if session.converged() {
        if let Some(root) = solver.current_x() {
            println!(
                "Converged to x = {} after {} step(s)",
                formatting::format_value(root),
                history.len() - 1
            );
        }
    } else if session.error.is_none() {
        println!(
            "Stopped after {} step(s) without reaching |f(x)| < {}",
            history.len().saturating_sub(1),
            session.settings.tolerance
        );
    }
}

fn sample_command(expression: &str, from: f64, to: f64, points: usize, json: bool) -> Result<()> {
    let solver = NewtonSolver::new(expression)?;
    let samples = session::sample(&solver, from, to, points)?;

    if json {
        let rows: Vec<serde_json::Value> = samples
            .iter()
            .map(|(x, y)| serde_json::json!({ "x": x, "y": y }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        for (x, y) in samples {
            println!("{}\t{}", x, formatting::format_value(y));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_default_log_filter() {
        assert_eq!(DEFAULT_LOG_FILTER, "error");
        assert!(EnvFilter::try_new(DEFAULT_LOG_FILTER).is_ok());
    }

    #[test]
    fn test_iterate_accepts_negative_guess() {
        let cli = Cli::try_parse_from(["tangent", "iterate", "x^2 - 2", "--x0", "-3"]).unwrap();
        match cli.command {
            Commands::Iterate { x0, .. } => assert_eq!(x0, -3.0),
            _ => panic!("Expected iterate"),
        }
    }
}
