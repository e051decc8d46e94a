/// Output helpers for tables of iterates
use tangent_solver::IterationRecord;

/// Format a value for a table cell; NaN and infinities read as words.
pub fn format_value(value: f64) -> String {
    if value.is_nan() {
        "undefined".to_string()
    } else if value.is_infinite() {
        if value > 0.0 {
            "inf".to_string()
        } else {
            "-inf".to_string()
        }
    } else if value != 0.0 && (value.abs() < 1e-4 || value.abs() >= 1e8) {
        format!("{:.6e}", value)
    } else {
        format!("{:.10}", value)
    }
}

/// Tangent line as `y = m·t + b`
pub fn format_tangent(record: &IterationRecord) -> String {
    let b = record.tangent_intercept;
    let sign = if b < 0.0 { '-' } else { '+' };
    format!(
        "y = {}·t {} {}",
        format_value(record.tangent_slope),
        sign,
        format_value(b.abs())
    )
}

pub fn format_progress(progress: f64) -> String {
    format!("{:>5.1}%", progress * 100.0)
}

pub fn table_header() -> String {
    format!(
        "{:>4}  {:>18}  {:>18}  {:>18}  {:>7}  {}",
        "n", "x", "f(x)", "f'(x)", "done", "tangent"
    )
}

pub fn table_row(record: &IterationRecord, progress: f64) -> String {
    format!(
        "{:>4}  {:>18}  {:>18}  {:>18}  {:>7}  {}",
        record.n,
        format_value(record.x),
        format_value(record.fx),
        format_value(record.f_prime_x),
        format_progress(progress),
        format_tangent(record)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(f64::NAN), "undefined");
        assert_eq!(format_value(f64::NEG_INFINITY), "-inf");
        assert_eq!(format_value(1.5), "1.5000000000");
        assert_eq!(format_value(0.0), "0.0000000000");
        assert_eq!(format_value(1e-12), "1.000000e-12");
    }

    #[test]
    fn test_format_progress() {
        assert_eq!(format_progress(0.5), " 50.0%");
        assert_eq!(format_progress(1.0), "100.0%");
    }
}
