use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, Expr},
    interpreter::{
        lexer::{Span, Token},
        parser::{
            core::{Nesting, ParseResult},
            unary::parse_atom,
        },
    },
};

/// Parses addition and subtraction expressions.
///
/// Handles left-associative binary operators: `+` and `-`.
///
/// The rule is: `expr := term (("+" | "-") term)*`
///
/// # Parameters
/// - `tokens`: Token stream with spans.
/// - `nesting`: Depth guard; a chain stays at the current level however long
///   it grows.
///
/// # Returns
/// The single term, or an `Expr::Chain` of all of them.
pub fn parse_additive<'a, I>(tokens: &mut Peekable<I>, nesting: Nesting) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Span)>
{
    let first = parse_multiplicative(tokens, nesting)?;
    let mut rest = Vec::new();
    while let Some((token, _)) = tokens.peek()
          && let Some(op) = token_to_binary_operator(token)
          && matches!(op, BinaryOperator::Add | BinaryOperator::Sub)
    {
        tokens.next();
        rest.push((op, parse_multiplicative(tokens, nesting)?));
    }
    Ok(chain(first, rest))
}

/// Parses multiplication-level expressions.
///
/// Handles left-associative operators `*` and `/`.
///
/// The rule is: `term := factor (("*" | "/") factor)*`
///
/// # Parameters
/// - `tokens`: Token stream with spans.
/// - `nesting`: Depth guard; a chain stays at the current level.
///
/// # Returns
/// The single factor, or an `Expr::Chain` of all of them.
pub fn parse_multiplicative<'a, I>(tokens: &mut Peekable<I>,
                                   nesting: Nesting)
                                   -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Span)>
{
    let first = parse_exponent(tokens, nesting)?;
    let mut rest = Vec::new();
    while let Some((token, _)) = tokens.peek()
          && let Some(op) = token_to_binary_operator(token)
          && matches!(op, BinaryOperator::Mul | BinaryOperator::Div)
    {
        tokens.next();
        rest.push((op, parse_exponent(tokens, nesting)?));
    }
    Ok(chain(first, rest))
}

fn chain(first: Expr, rest: Vec<(BinaryOperator, Expr)>) -> Expr {
    if rest.is_empty() {
        return first;
    }
    Expr::Chain { first: Box::new(first),
                  rest }
}

/// Parses exponentiation expressions.
///
/// The exponent is itself a factor, which makes `^` right-associative:
/// `2 ^ 3 ^ 2` parses as `2 ^ (3 ^ 2)`. Signs bind to the atom, so `-2 ^ 2`
/// parses as `(-2) ^ 2`.
///
/// The rule is: `factor := atom ("^" factor)*`
///
/// # Parameters
/// - `tokens`: Token stream with spans.
/// - `nesting`: Depth guard; the exponent is parsed one level deeper.
///
/// # Returns
/// An exponentiation expression tree.
pub fn parse_exponent<'a, I>(tokens: &mut Peekable<I>, nesting: Nesting) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Span)>
{
    let base = parse_atom(tokens, nesting)?;
    if let Some((Token::Caret, _)) = tokens.peek() {
        tokens.next();
        let exponent = parse_exponent(tokens, nesting.enter()?)?;
        return Ok(Expr::BinaryOp { left:  Box::new(base),
                                   op:    BinaryOperator::Pow,
                                   right: Box::new(exponent), });
    }
    Ok(base)
}

/// Maps a token to its corresponding binary operator.
///
/// Returns `None` for all tokens that are not `+`, `-`, `*`, `/` or `^`.
///
/// # Example
/// ```
/// use tracecalc::{
///     ast::BinaryOperator,
///     interpreter::{lexer::Token, parser::binary::token_to_binary_operator},
/// };
///
/// assert_eq!(token_to_binary_operator(&Token::Plus),
///            Some(BinaryOperator::Add));
/// assert_eq!(token_to_binary_operator(&Token::Comma), None);
/// ```
#[must_use]
pub const fn token_to_binary_operator(token: &Token) -> Option<BinaryOperator> {
    match token {
        Token::Plus => Some(BinaryOperator::Add),
        Token::Minus => Some(BinaryOperator::Sub),
        Token::Star => Some(BinaryOperator::Mul),
        Token::Slash => Some(BinaryOperator::Div),
        Token::Caret => Some(BinaryOperator::Pow),
        _ => None,
    }
}
