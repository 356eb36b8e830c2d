//! Scalar kernels for the elementwise builtins that have no direct `f64`
//! method counterpart.

/// Magnitudes at or below this count as zero for `sgn`.
pub const SIGN_EPSILON: f64 = 1e-12;

/// Truncates toward zero, keeping the result as a float.
///
/// # Example
/// ```
/// use tracecalc::interpreter::evaluator::function::builtin::trunc;
///
/// assert_eq!(trunc(-2.7), -2.0);
/// assert_eq!(trunc(3.9), 3.0);
/// ```
#[must_use]
pub fn trunc(x: f64) -> f64 {
    x.trunc()
}

/// Rounds to the nearest integer, with ties going to the even neighbour.
///
/// # Example
/// ```
/// use tracecalc::interpreter::evaluator::function::builtin::round;
///
/// assert_eq!(round(2.5), 2.0);
/// assert_eq!(round(3.5), 4.0);
/// assert_eq!(round(-0.5), -0.0);
/// ```
#[must_use]
pub fn round(x: f64) -> f64 {
    x.round_ties_even()
}

/// Returns `-1`, `0` or `1`, treating magnitudes up to [`SIGN_EPSILON`] as
/// zero. `NaN` stays `NaN`.
///
/// # Example
/// ```
/// use tracecalc::interpreter::evaluator::function::builtin::sgn;
///
/// assert_eq!(sgn(-3.0), -1.0);
/// assert_eq!(sgn(1e-13), 0.0);
/// assert_eq!(sgn(0.25), 1.0);
/// ```
#[must_use]
pub fn sgn(x: f64) -> f64 {
    if x.is_nan() {
        return x;
    }
    if x.abs() <= SIGN_EPSILON { 0.0 } else { x.signum() }
}
