use std::iter::Peekable;

use crate::{
    ast::{Constant, Expr},
    interpreter::{
        lexer::{Span, Token},
        parser::{
            core::{Nesting, ParseResult, parse_expression},
            utils::{expect_token, parse_comma_separated, unexpected},
        },
    },
};

/// Parses an atom with its leading signs.
///
/// Any run of `+` and `-` may precede the operand. `+` is dropped; every `-`
/// wraps the operand in one [`Expr::Negate`], so `--2` is `2`. The signs
/// belong to the atom alone, which is why `-2^2` evaluates as `(-2)^2`.
///
/// Grammar:
/// ```text
///     atom := ("+" | "-")* primary
/// ```
/// # Parameters
/// - `tokens`: Token iterator with lookahead.
/// - `nesting`: Depth guard; each `-` enters one level.
///
/// # Returns
/// The primary expression wrapped in its negations.
pub(crate) fn parse_atom<'a, I>(tokens: &mut Peekable<I>, nesting: Nesting) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Span)>
{
    let mut negations = 0usize;
    let mut inner = nesting;
    while let Some((sign @ (Token::Plus | Token::Minus), _)) = tokens.peek() {
        if *sign == Token::Minus {
            negations += 1;
            inner = inner.enter()?;
        }
        tokens.next();
    }

    let mut node = parse_primary(tokens, inner)?;
    for _ in 0..negations {
        node = Expr::Negate(Box::new(node));
    }
    Ok(node)
}

/// Parses a primary expression.
///
/// Primary expressions form the base of the grammar:
/// - numeric literals
/// - the constants `PI` and `E` (any case)
/// - variables
/// - function calls
/// - parenthesized expressions
///
/// Grammar (simplified):
/// ```text
///     primary := call | PI | E | number | ident | "(" expr ")"
/// ```
/// # Parameters
/// - `tokens`: Token iterator positioned at the start of a primary expression.
/// - `nesting`: Depth guard for the current position.
///
/// # Returns
/// The parsed primary [`Expr`] or a `SyntaxError` on failure.
fn parse_primary<'a, I>(tokens: &mut Peekable<I>, nesting: Nesting) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Span)>
{
    match tokens.peek() {
        Some((Token::Number(n), _)) => {
            let value = *n;
            tokens.next();
            Ok(Expr::Literal(value))
        },
        Some((Token::LParen, _)) => parse_grouping(tokens, nesting),
        Some((Token::Identifier(_), _)) => parse_identifier_or_function(tokens, nesting),
        _ => Err(unexpected(tokens.next(), "a number, identifier, function call or '('")),
    }
}

/// Parses a parenthesized expression.
///
/// Expected form `( expression )`. The parentheses themselves produce no node;
/// the inner expression is returned as-is.
///
/// Grammar `grouping := "(" expr ")"`
///
/// # Parameters
/// - `tokens`: Token iterator positioned at `(`.
/// - `nesting`: Depth guard; the inner expression is one level deeper.
///
/// # Returns
/// The inner expression.
fn parse_grouping<'a, I>(tokens: &mut Peekable<I>, nesting: Nesting) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Span)>
{
    expect_token(tokens, &Token::LParen, "'('")?;
    let expr = parse_expression(tokens, nesting.enter()?)?;
    expect_token(tokens, &Token::RParen, "')'")?;
    Ok(expr)
}

/// Parses an identifier, constant, or function call.
///
/// Supported forms:
///
/// - name(arg1, arg2, ...)
/// - PI / E, matched case-insensitively
/// - name
///
/// A name immediately followed by `(` is always a call, even `pi(...)`. The
/// number of arguments becomes the call's arity.
///
/// # Parameters
/// - `tokens`: Token iterator positioned at an identifier.
/// - `nesting`: Depth guard; call arguments are one level deeper.
///
/// # Returns
/// - [`Expr::Call`] if followed by parentheses,
/// - [`Expr::Constant`] for `PI` or `E`,
/// - [`Expr::Variable`] otherwise.
fn parse_identifier_or_function<'a, I>(tokens: &mut Peekable<I>,
                                       nesting: Nesting)
                                       -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Span)>
{
    let name = match tokens.next() {
        Some((Token::Identifier(n), _)) => n.clone(),
        other => return Err(unexpected(other, "an identifier")),
    };

    if let Some((Token::LParen, _)) = tokens.peek() {
        tokens.next();
        let inner = nesting.enter()?;
        let arguments =
            parse_comma_separated(tokens, |t| parse_expression(t, inner), &Token::RParen)?;
        return Ok(Expr::Call { name, arguments });
    }

    Ok(Constant::from_identifier(&name).map_or(Expr::Variable(name), Expr::Constant))
}
