/// Largest integer magnitude exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_INT: u64 = 9_007_199_254_740_991;

/// Converts an `i64` to the nearest `f64`.
///
/// Values beyond [`MAX_SAFE_INT`] in magnitude round to the nearest
/// representable double, matching IEEE conversion.
///
/// ## Example
/// ```
/// use tracecalc::util::num::i64_to_f64;
///
/// assert_eq!(i64_to_f64(-42), -42.0);
/// ```
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub const fn i64_to_f64(value: i64) -> f64 {
    value as f64
}

/// Converts a `usize` (an index or a length) to the nearest `f64`.
///
/// ## Example
/// ```
/// use tracecalc::util::num::usize_to_f64;
///
/// assert_eq!(usize_to_f64(8), 8.0);
/// ```
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub const fn usize_to_f64(value: usize) -> f64 {
    value as f64
}

/// Returns `true` when `value` is an integer exactly representable as `f64`.
///
/// ## Example
/// ```
/// use tracecalc::util::num::is_exact_in_f64;
///
/// assert!(is_exact_in_f64(1 << 40));
/// assert!(!is_exact_in_f64(i64::MAX));
/// ```
#[must_use]
pub const fn is_exact_in_f64(value: i64) -> bool {
    value.unsigned_abs() <= MAX_SAFE_INT
}
