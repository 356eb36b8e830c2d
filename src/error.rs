/// Parse failures.
///
/// Describes malformed expression input: the offending text, the 1-based
/// line and column of the failing token, and a labelled span so a caller can
/// draw a caret under it.
pub mod parse_failure;
/// Expression errors.
///
/// Every error the compile and evaluate entry points can return, from parse
/// failures to undefined variables and vector shape mismatches.
pub mod expr_error;
/// Sweep and templating errors.
pub mod sweep_error;

pub use expr_error::ExprError;
pub use parse_failure::ParseFailure;
pub use sweep_error::SweepError;
