/// Parser entry point and shared parser types.
///
/// Holds the `parse` function that turns source text into an [`Expr`]
/// tree, the internal syntax error type, and the nesting guard.
///
/// [`Expr`]: crate::ast::Expr
pub mod core;

/// Binary operator parsing.
///
/// Implements the `expr`, `term` and `factor` grammar levels: additive and
/// multiplicative chains (left-associative) and right-associative
/// exponentiation.
pub mod binary;

/// Atom parsing.
///
/// Handles leading signs, numeric literals, constants, variables, function
/// calls and parenthesized sub-expressions.
pub mod unary;

/// Small helpers shared by the grammar levels.
pub mod utils;
