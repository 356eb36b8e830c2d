use miette::Diagnostic;
use thiserror::Error;

/// Represents all errors raised while templating commands or expanding a
/// sweep.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum SweepError {
    /// A traversal priority names a variable the sweep does not have.
    #[error("priority names unknown sweep variable '{name}'")]
    UnknownVariable {
        /// The unknown name.
        name: String,
    },
    /// A traversal priority lists the same variable twice.
    #[error("sweep variable '{name}' appears twice in the priority order")]
    DuplicatePriority {
        /// The repeated name.
        name: String,
    },
    /// A command slot has no value in the current sweep point.
    #[error("no value for template variable '{name}'")]
    MissingValue {
        /// The slot's variable name.
        name: String,
    },
    /// A series entry is not a number.
    #[error("'{token}' is not a numeric series value")]
    InvalidSeriesValue {
        /// The offending text.
        token: String,
    },
    /// The variable names could not be compiled into a matcher.
    #[error("cannot match template variables: {details}")]
    Pattern {
        /// The underlying matcher error.
        details: String,
    },
    /// A step definition could not be understood.
    #[error("invalid step '{step}': expected 'text', 'instrument|command' or 'instrument|command|output'")]
    InvalidStep {
        /// The raw step text.
        step: String,
    },
}
