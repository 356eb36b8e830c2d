use std::iter::Peekable;

use crate::interpreter::{
    lexer::{Span, Token},
    parser::core::{ParseResult, SyntaxError},
};

/// Builds the error for an unexpected token or for the end of input.
pub(in crate::interpreter::parser) fn unexpected(found: Option<&(Token, Span)>,
                                                 expected: &str)
                                                 -> SyntaxError {
    match found {
        Some((tok, span)) => {
            SyntaxError::Unexpected { span:    Some(span.clone()),
                                      message: format!("Expected {expected}, found {}",
                                                       tok.describe()), }
        },
        None => SyntaxError::Unexpected { span:    None,
                                          message: format!("Expected {expected}, found end of input"), },
    }
}

/// Consumes the next token if it equals `expected`.
///
/// # Errors
/// Returns a `SyntaxError` naming `description` when the next token differs
/// or the input ends.
pub(in crate::interpreter::parser) fn expect_token<'a, I>(tokens: &mut Peekable<I>,
                                                          expected: &Token,
                                                          description: &str)
                                                          -> ParseResult<()>
    where I: Iterator<Item = &'a (Token, Span)>
{
    match tokens.next() {
        Some((tok, _)) if tok == expected => Ok(()),
        other => Err(unexpected(other, description)),
    }
}

/// Parses a non-empty comma-separated list of items up to a closing token.
///
/// Function argument lists use this. Unlike a general list, an immediately
/// encountered closing token is an error: every call takes at least one
/// argument.
///
/// Grammar (simplified): `list := item ("," item)* closing`
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the first item.
/// - `parse_item`: Function used to parse each list element.
/// - `closing`: The token that terminates the list.
///
/// # Returns
/// A vector of parsed items.
///
/// # Errors
/// Returns a `SyntaxError` if an item fails to parse, an unexpected token is
/// encountered, or the stream ends before the closing token.
pub(in crate::interpreter::parser) fn parse_comma_separated<'a, I, T>(
    tokens: &mut Peekable<I>,
    parse_item: impl Fn(&mut Peekable<I>) -> ParseResult<T>,
    closing: &Token)
    -> ParseResult<Vec<T>>
    where I: Iterator<Item = &'a (Token, Span)>
{
    let mut items = Vec::new();
    loop {
        items.push(parse_item(tokens)?);
        match tokens.next() {
            Some((Token::Comma, _)) => {},
            Some((tok, _)) if tok == closing => break,
            other => {
                return Err(unexpected(other, &format!("',' or {}", closing.describe())));
            },
        }
    }
    Ok(items)
}
