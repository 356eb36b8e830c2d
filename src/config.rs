/// Default bound on expression nesting for both parsing and evaluation.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Limits shared by the parser and the evaluator.
///
/// One value is threaded explicitly through each compile or evaluate call;
/// there is no global engine state.
///
/// # Example
/// ```
/// use tracecalc::{EngineConfig, compile_with, error::ExprError};
///
/// let config = EngineConfig { max_depth: 4 };
/// let err = compile_with("((((((1))))))", &config).unwrap_err();
///
/// assert!(matches!(err, ExprError::RecursionLimitExceeded { limit: 4 }));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Maximum nesting depth before `RecursionLimitExceeded` is reported.
    pub max_depth: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { max_depth: DEFAULT_MAX_DEPTH }
    }
}
