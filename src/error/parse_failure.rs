use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

/// Malformed expression input.
///
/// Carries the whole input together with the position of the token the parser
/// could not accept. `line` and `column` are 1-based; `column` counts
/// characters, not bytes. At end of input the column points one past the last
/// character.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("{message} (line {line}, column {column})")]
#[diagnostic(code(tracecalc::parse_failure))]
pub struct ParseFailure {
    /// The complete expression that failed to parse.
    #[source_code]
    pub input:   String,
    /// Line of the failing token.
    pub line:    usize,
    /// Column of the failing token.
    pub column:  usize,
    /// What the parser expected or found.
    pub message: String,
    /// Byte span of the failing token within `input`.
    #[label("here")]
    pub span:    SourceSpan,
}

impl ParseFailure {
    /// Builds a failure for the token at `offset..offset + len`.
    ///
    /// Offsets past the end of the input are clamped to the input length, and
    /// both ends of the span are moved back onto character boundaries.
    ///
    /// # Example
    /// ```
    /// use tracecalc::error::ParseFailure;
    ///
    /// let failure = ParseFailure::new("3+*2", 2, 1, "unexpected '*'");
    /// assert_eq!((failure.line, failure.column), (1, 3));
    /// ```
    #[must_use]
    pub fn new(input: &str, offset: usize, len: usize, message: impl Into<String>) -> Self {
        let offset = char_boundary_at_or_before(input, offset);
        let end = char_boundary_at_or_before(input, offset.saturating_add(len));
        let len = end - offset;
        let before = &input[..offset];
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        let column = input[line_start..offset].chars().count() + 1;

        Self { input: input.to_string(),
               line,
               column,
               message: message.into(),
               span: (offset..offset + len).into() }
    }

    /// Byte offset of the failing token.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.span.offset()
    }

    /// Renders the failing line with a caret under the failing column.
    ///
    /// # Example
    /// ```
    /// use tracecalc::error::ParseFailure;
    ///
    /// let failure = ParseFailure::new("3+*2", 2, 1, "unexpected '*'");
    /// assert_eq!(failure.caret(), "3+*2\n  ^");
    /// ```
    #[must_use]
    pub fn caret(&self) -> String {
        let text = self.input.lines().nth(self.line.saturating_sub(1)).unwrap_or("");
        format!("{text}\n{}^", " ".repeat(self.column.saturating_sub(1)))
    }
}

fn char_boundary_at_or_before(input: &str, index: usize) -> usize {
    let mut index = index.min(input.len());
    while !input.is_char_boundary(index) {
        index -= 1;
    }
    index
}
