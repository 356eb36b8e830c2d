use std::iter::Peekable;

use crate::{
    EngineConfig,
    ast::Expr,
    error::{ExprError, ParseFailure},
    interpreter::{
        lexer::{Span, Token, tokenize},
        parser::binary::parse_additive,
    },
};

/// Errors raised inside the grammar functions.
///
/// Positions are byte spans; they are converted into a line/column
/// [`ParseFailure`] once the whole source is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    /// The parser could not accept a token. `span` is `None` at end of input.
    Unexpected {
        /// Span of the offending token.
        span:    Option<Span>,
        /// What was expected and what was found.
        message: String,
    },
    /// The expression nests deeper than allowed.
    TooDeep {
        /// The configured limit.
        limit: usize,
    },
}

impl SyntaxError {
    /// Attaches the source text and converts into the public error type.
    #[must_use]
    pub fn into_expr_error(self, source: &str) -> ExprError {
        match self {
            Self::Unexpected { span: Some(span), message } => {
                ParseFailure::new(source, span.start, span.len(), message).into()
            },
            Self::Unexpected { span: None, message } => {
                ParseFailure::new(source, source.len(), 0, message).into()
            },
            Self::TooDeep { limit } => ExprError::RecursionLimitExceeded { limit },
        }
    }
}

pub type ParseResult<T> = Result<T, SyntaxError>;

/// Tracks how deep the parser has descended.
///
/// Every construct that recurses into a nested expression (a sign, a
/// parenthesis, an exponent, an argument list) enters one level.
/// Left-associative chains are collected in a loop and enter nothing.
#[derive(Debug, Clone, Copy)]
pub struct Nesting {
    depth: usize,
    limit: usize,
}

impl Nesting {
    /// Starts at depth zero with the given limit.
    #[must_use]
    pub const fn new(limit: usize) -> Self {
        Self { depth: 0, limit }
    }

    /// Descends one level.
    ///
    /// # Errors
    /// Returns `SyntaxError::TooDeep` once the limit is exceeded.
    pub const fn enter(self) -> ParseResult<Self> {
        if self.depth >= self.limit {
            return Err(SyntaxError::TooDeep { limit: self.limit });
        }
        Ok(Self { depth: self.depth + 1,
                  limit: self.limit, })
    }
}

/// Parses a full expression.
///
/// Grammar: `expression := expr` where `expr` is the additive level.
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, Span)` pairs.
/// - `nesting`: Depth guard for the current position.
///
/// # Returns
/// The parsed expression node.
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>, nesting: Nesting) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Span)>
{
    parse_additive(tokens, nesting)
}

/// Parses a complete source string into an expression tree.
///
/// The whole input must be consumed; a leftover token is reported as a parse
/// failure pointing at that token.
///
/// # Errors
/// - `ExprError::Parse` for malformed input.
/// - `ExprError::RecursionLimitExceeded` when nesting exceeds
///   `config.max_depth`.
///
/// # Example
/// ```
/// use tracecalc::{
///     EngineConfig,
///     ast::{BinaryOperator, Expr},
///     error::ExprError,
///     interpreter::parser::core::parse,
/// };
///
/// let expr = parse("2^3^2", &EngineConfig::default()).unwrap();
/// let Expr::BinaryOp { op, right, .. } = expr else { panic!() };
/// assert_eq!(op, BinaryOperator::Pow);
/// assert!(matches!(*right, Expr::BinaryOp { op: BinaryOperator::Pow, .. }));
///
/// let err = parse("3+*2", &EngineConfig::default()).unwrap_err();
/// let ExprError::Parse(failure) = err else { panic!() };
/// assert_eq!(failure.column, 3);
/// ```
pub fn parse(source: &str, config: &EngineConfig) -> Result<Expr, ExprError> {
    let tokens = tokenize(source)?;
    let mut iter = tokens.iter().peekable();

    let expr = parse_expression(&mut iter, Nesting::new(config.max_depth))
        .map_err(|e| e.into_expr_error(source))?;

    if let Some((tok, span)) = iter.next() {
        return Err(ParseFailure::new(source,
                                     span.start,
                                     span.len(),
                                     format!("Expected end of input, found {}", tok.describe()))
                   .into());
    }

    Ok(expr)
}
