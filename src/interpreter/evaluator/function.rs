/// Scalar kernels for `trunc`, `round` and `sgn`.
pub mod builtin;

/// The registry table, arity checks and call dispatch.
pub mod core;

/// `sum`, `mean`, `min` and `max`.
pub mod reduce;

/// The magnitude spectrum behind `fft`.
pub mod spectral;
