use serde::Serialize;

/// One row of the iteration history.
///
/// Field names serialize in camelCase (`fPrimeX`, `prevX`, ...) for
/// consumers that draw the tangent lines.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IterationRecord {
    /// Position in the history, 0 for the initial guess
    pub n: usize,
    pub x: f64,
    pub fx: f64,
    pub f_prime_x: f64,
    /// Tangent line at `(x, fx)` is `y = tangent_slope * t + tangent_intercept`
    pub tangent_slope: f64,
    pub tangent_intercept: f64,
    /// Iterate this one was derived from; `None` for the initial guess
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev_x: Option<f64>,
}

impl IterationRecord {
    pub(crate) fn new(n: usize, x: f64, fx: f64, f_prime_x: f64, prev_x: Option<f64>) -> Self {
        IterationRecord {
            n,
            x,
            fx,
            f_prime_x,
            tangent_slope: f_prime_x,
            tangent_intercept: fx - f_prime_x * x,
            prev_x,
        }
    }

    /// Height of the tangent line at `t`.
    pub fn tangent_at(&self, t: f64) -> f64 {
        self.tangent_slope * t + self.tangent_intercept
    }

    /// Where the tangent crosses zero, i.e. the next Newton iterate.
    pub fn tangent_root(&self) -> Option<f64> {
        if self.tangent_slope == 0.0 {
            return None;
        }
        let root = -self.tangent_intercept / self.tangent_slope;
        root.is_finite().then_some(root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_tangent_passes_through_point() {
        let r = IterationRecord::new(0, 3.0, 7.0, 6.0, None);
        assert_eq!(r.tangent_slope, 6.0);
        assert_eq!(r.tangent_intercept, -11.0);
        assert_relative_eq!(r.tangent_at(3.0), 7.0);
        assert_relative_eq!(r.tangent_root().unwrap(), 3.0 - 7.0 / 6.0);
    }

    #[test]
    fn test_horizontal_tangent_has_no_root() {
        let r = IterationRecord::new(0, 0.0, 0.0, 0.0, None);
        assert_eq!(r.tangent_root(), None);
    }
}
