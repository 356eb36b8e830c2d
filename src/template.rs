/// Splitting commands into literal text and variable slots.
///
/// # Responsibilities
/// - Finds every occurrence of a sweep variable, longest name first.
/// - Rebuilds the command as a format string or renders it for one point.
pub mod command;
/// Sweep steps and the actions they expand into.
pub mod plan;
/// Sweep variables, traversal orders and series parsing.
///
/// # Responsibilities
/// - Zips series for sequential sweeps.
/// - Builds Cartesian products in a chosen loop order for permutation
///   sweeps.
pub mod sweep;
