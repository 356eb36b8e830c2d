//! Reductions over every element of every argument.
//!
//! Scalars contribute one element and vectors all of theirs, so
//! `sum(x, 1)` adds one to the total of `x`.

use crate::util::num::usize_to_f64;

/// Adds every element. An empty input sums to `0`.
#[must_use]
pub fn sum(values: &[f64]) -> f64 {
    values.iter().sum()
}

/// Arithmetic mean. An empty input yields `NaN`.
///
/// # Example
/// ```
/// use tracecalc::interpreter::evaluator::function::reduce::mean;
///
/// assert_eq!(mean(&[1.0, 2.0, 6.0]), 3.0);
/// assert!(mean(&[]).is_nan());
/// ```
#[must_use]
pub fn mean(values: &[f64]) -> f64 {
    sum(values) / usize_to_f64(values.len())
}

/// Smallest element, ignoring `NaN`s. An empty input yields `+inf`.
#[must_use]
pub fn min(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::INFINITY, f64::min)
}

/// Largest element, ignoring `NaN`s. An empty input yields `-inf`.
#[must_use]
pub fn max(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}
