//! Convergence progress for display
//!
//! Newton's method shrinks `|f(x)|` multiplicatively, so progress is
//! interpolated on a log scale between the initial residual and the target.

pub const DEFAULT_PROGRESS_TARGET: f64 = 1e-10;

/// Map the current residual `|f(x)|` to a value in `[0, 1]`.
///
/// - `1` when the start was already within `target`, or `current` is zero
/// - `0` when there is no improvement over `initial`
/// - otherwise `(log10(initial) - log10(max(current, target))) / (log10(initial) - log10(target))`
pub fn convergence_progress(current: f64, initial: f64, target: f64) -> f64 {
    // `f64::max` would swallow a NaN residual below
    if current.is_nan() || initial.is_nan() || target.is_nan() {
        return 0.0;
    }
    if initial <= target || current <= 0.0 {
        return 1.0;
    }
    if current >= initial {
        return 0.0;
    }

    let span = initial.log10() - target.log10();
    let progress = (initial.log10() - current.max(target).log10()) / span;

    if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0)
    }
}
