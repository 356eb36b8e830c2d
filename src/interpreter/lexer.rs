use std::ops::Range;

use logos::Logos;

use crate::{ast::LiteralValue, error::ParseFailure};

/// Byte range of a token within the source.
pub type Span = Range<usize>;

/// Represents a lexical token in an expression.
///
/// Whitespace is skipped. `PI` and `E` arrive as identifiers; the parser
/// decides whether they name a constant or a function.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum Token {
    /// Numeric literal tokens, such as `42`, `3.`, `3.14` or `2.1e-10`.
    #[regex(r"[0-9]+", parse_number)]
    #[regex(r"[0-9]+\.[0-9]*([eE][+-]?[0-9]+)?", parse_number)]
    #[regex(r"[0-9]+[eE][+-]?[0-9]+", parse_number)]
    Number(LiteralValue),
    /// Identifier tokens; variable or function names such as `x` or `sin`.
    #[regex(r"[a-zA-Z][a-zA-Z0-9_$]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `^`
    #[token("^")]
    Caret,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `,`
    #[token(",")]
    Comma,
}

impl Token {
    /// Short human-readable description used in parse failures.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Number(n) => format!("number {n}"),
            Self::Identifier(name) => format!("identifier '{name}'"),
            Self::Plus => "'+'".to_string(),
            Self::Minus => "'-'".to_string(),
            Self::Star => "'*'".to_string(),
            Self::Slash => "'/'".to_string(),
            Self::Caret => "'^'".to_string(),
            Self::LParen => "'('".to_string(),
            Self::RParen => "')'".to_string(),
            Self::Comma => "','".to_string(),
        }
    }
}

/// Converts the source into a vector of tokens with their byte spans.
///
/// # Errors
/// Returns a [`ParseFailure`] positioned at the first character that starts
/// no valid token.
///
/// # Example
/// ```
/// use tracecalc::interpreter::lexer::{Token, tokenize};
///
/// let tokens = tokenize("x ^ 2").unwrap();
/// assert_eq!(tokens[0], (Token::Identifier("x".to_string()), 0..1));
/// assert_eq!(tokens[1].0, Token::Caret);
/// assert_eq!(tokens.len(), 3);
///
/// let err = tokenize("3 # 4").unwrap_err();
/// assert_eq!(err.column, 3);
/// ```
pub fn tokenize(source: &str) -> Result<Vec<(Token, Span)>, ParseFailure> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer(source);

    while let Some(token) = lexer.next() {
        if let Ok(tok) = token {
            tokens.push((tok, lexer.span()));
        } else {
            let span = lexer.span();
            return Err(ParseFailure::new(source,
                                         span.start,
                                         span.len(),
                                         format!("unexpected character '{}'", lexer.slice())));
        }
    }

    Ok(tokens)
}

/// Parses a numeric literal from the current token slice.
///
/// Slices without `.`, `e` or `E` become integers; integers that overflow
/// `i64` fall back to a real.
fn parse_number(lex: &logos::Lexer<Token>) -> Option<LiteralValue> {
    let slice = lex.slice();
    if !slice.contains(['.', 'e', 'E'])
       && let Ok(n) = slice.parse::<i64>()
    {
        return Some(LiteralValue::Integer(n));
    }
    slice.parse::<f64>().ok().map(LiteralValue::Real)
}
