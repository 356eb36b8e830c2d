use miette::Diagnostic;
use thiserror::Error;

use crate::{error::ParseFailure, interpreter::evaluator::function::core::Arity};

/// Represents every failure of compiling or evaluating an expression.
///
/// None of these abort the engine; callers decide how to present them.
/// Floating-point domain problems (`0/0`, overflow) are not errors and show up
/// as `NaN` or infinite values instead.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum ExprError {
    /// The input does not match the grammar.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseFailure),
    /// An identifier has no binding at evaluation time.
    #[error("undefined variable '{name}'")]
    #[diagnostic(code(tracecalc::undefined_variable))]
    UndefinedVariable {
        /// The name of the variable.
        name: String,
    },
    /// A call names a function outside the registry.
    #[error("unknown function '{name}'")]
    #[diagnostic(code(tracecalc::unknown_function),
                 help("functions are limited to the built-in registry"))]
    UnknownFunction {
        /// The name of the function.
        name: String,
    },
    /// A known function was called with the wrong number of arguments.
    #[error("function '{name}' expects {expected} argument(s) but was given {got}")]
    #[diagnostic(code(tracecalc::arity_mismatch))]
    ArityMismatch {
        /// The name of the function.
        name:     String,
        /// The accepted argument count.
        expected: Arity,
        /// The argument count at the call site.
        got:      usize,
    },
    /// Two vectors of different lengths met in an elementwise operation.
    #[error("cannot combine vectors of length {left} and {right}")]
    #[diagnostic(code(tracecalc::shape_mismatch))]
    ShapeMismatch {
        /// Length of the left operand.
        left:  usize,
        /// Length of the right operand.
        right: usize,
    },
    /// The expression nests deeper than the configured limit.
    #[error("expression nesting exceeds the limit of {limit}")]
    #[diagnostic(code(tracecalc::recursion_limit))]
    RecursionLimitExceeded {
        /// The configured maximum depth.
        limit: usize,
    },
    /// A function that only accepts vectors received a scalar.
    #[error("function '{name}' requires a vector argument")]
    #[diagnostic(code(tracecalc::expected_vector))]
    ExpectedVector {
        /// The name of the function.
        name: String,
    },
    /// A hand-built instruction sequence does not reduce to one value.
    #[error("malformed instruction sequence: {details}")]
    #[diagnostic(code(tracecalc::malformed_program))]
    MalformedProgram {
        /// Why the sequence could not be evaluated.
        details: String,
    },
}
