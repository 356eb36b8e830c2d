//! # tracecalc
//!
//! tracecalc compiles arithmetic expressions over scalars and numeric series
//! into postfix programs and evaluates them with broadcasting. It also splits
//! instrument commands into templates and expands parameter sweeps into
//! per-point command lists.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

/// Defines the structure of parsed expressions.
///
/// This module declares the `Expr` enum and the literal, constant and operator
/// types it is built from. The AST is built by the parser and flattened by
/// the compiler.
///
/// # Responsibilities
/// - Defines expression types for all language constructs.
/// - Evaluates constants and scalar operators.
pub mod ast;
/// Engine limits shared by parsing and evaluation.
pub mod config;
/// Provides unified error types for expressions and sweeps.
///
/// This module defines all errors that can be raised while lexing, parsing,
/// compiling or evaluating an expression, and while templating commands. It
/// standardizes error reporting and carries source locations for parse
/// failures.
///
/// # Responsibilities
/// - Defines error enums for all failure modes.
/// - Attaches line and column information to parse failures.
/// - Integrates with `miette` so callers can render diagnostics.
pub mod error;
/// Orchestrates compiling and running expressions.
///
/// This module ties together lexing, parsing, compiling, evaluation and value
/// representations.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, compiler and evaluator.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// Command templating and parameter sweeps.
///
/// Operates on raw command strings and numeric series only; it never talks to
/// instruments itself.
pub mod template;
/// Applying an expression to plotted series.
pub mod transform;
/// General utilities for numeric conversion.
///
/// This module provides conversion routines that are used throughout the
/// interpreter, such as turning integers and lengths into `f64` without
/// scattering casts.
pub mod util;

pub use crate::{
    config::EngineConfig,
    interpreter::{compiler::Program, evaluator::core::Bindings, value::Value},
};
use crate::{error::ExprError, interpreter::compiler::compile_source};

/// Compiles an expression with the default configuration.
///
/// # Errors
/// Returns an error if the expression does not parse, nests too deeply, or
/// calls an unknown function or a function with the wrong argument count.
///
/// # Examples
/// ```
/// use tracecalc::{Bindings, compile};
///
/// let program = compile("3 + 4 * 2").unwrap();
/// assert_eq!(program.evaluate(&Bindings::new()).unwrap().as_scalar(), Some(11.0));
///
/// // Parse failures are values, not panics.
/// assert!(compile("3 + * 2").is_err());
/// ```
pub fn compile(source: &str) -> Result<Program, ExprError> {
    compile_source(source, &EngineConfig::default())
}

/// Compiles an expression with explicit limits.
///
/// # Errors
/// See [`compile`].
pub fn compile_with(source: &str, config: &EngineConfig) -> Result<Program, ExprError> {
    compile_source(source, config)
}

/// Compiles and evaluates an expression in one step.
///
/// # Errors
/// Returns any compile or evaluation error.
///
/// # Examples
/// ```
/// use tracecalc::{Bindings, Value, evaluate};
///
/// let mut bindings = Bindings::new();
/// bindings.insert_vector("x", vec![1.0, 2.0, 3.0]);
///
/// let result = evaluate("x + 1", &bindings).unwrap();
/// assert_eq!(result, Value::from(vec![2.0, 3.0, 4.0]));
/// ```
pub fn evaluate(source: &str, bindings: &Bindings) -> Result<Value, ExprError> {
    compile(source)?.evaluate(bindings)
}
