/// Binary operator evaluation.
///
/// Combines scalars and vectors elementwise, broadcasting a scalar over a
/// vector and rejecting vectors of different lengths.
pub mod binary;

/// Core evaluation logic and variable bindings.
///
/// Contains the stack machine that runs a compiled program and the
/// `Bindings` table it reads variables from.
pub mod core;

/// The built-in function registry.
///
/// Declares every callable function with its arity and implements the
/// elementwise, reduction and spectral kernels.
pub mod function;
