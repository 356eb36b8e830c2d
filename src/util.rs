/// Numeric conversion helpers.
///
/// Central place for the integer-to-float casts the evaluator needs, so the
/// precision-loss lint is silenced in one spot instead of at every call site.
pub mod num;
