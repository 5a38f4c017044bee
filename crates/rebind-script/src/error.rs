//! Parse error type and pretty diagnostics.

use rebind_core::Span;
use thiserror::Error;

/// Errors produced by the tokenizer and parser.
///
/// Every variant carries enough location information to point back into
/// the offending source text.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ParseError {
    /// A character that can start no token.
    #[error("unexpected character '{ch}' at offset {offset}")]
    UnexpectedChar { ch: char, offset: usize },

    /// A string literal with no closing quote.
    #[error("unterminated string literal starting at offset {offset}")]
    UnterminatedString { offset: usize },

    /// A block comment with no closing `*/`.
    #[error("unterminated block comment starting at offset {offset}")]
    UnterminatedComment { offset: usize },

    /// A number literal that does not scan as a value.
    #[error("invalid number literal at {span}")]
    InvalidNumber { span: Span },

    /// A token that does not fit the grammar at this point.
    #[error("unexpected token '{found}' at {span}: expected {expected}")]
    UnexpectedToken {
        found: String,
        expected: String,
        span: Span,
    },

    /// Input ended while the grammar still required a token.
    #[error("unexpected end of input: expected {expected}")]
    UnexpectedEof { expected: String },

    /// The left-hand side of an assignment is not a name or member access.
    #[error("invalid assignment target at {span}")]
    InvalidAssignmentTarget { span: Span },
}

impl ParseError {
    /// The source span the error points at, if it has one.
    pub fn span(&self) -> Option<Span> {
        match self {
            ParseError::UnexpectedChar { ch, offset } => {
                Some(Span::new(*offset, offset + ch.len_utf8()))
            }
            ParseError::UnterminatedString { offset }
            | ParseError::UnterminatedComment { offset } => Some(Span::new(*offset, offset + 1)),
            ParseError::InvalidNumber { span }
            | ParseError::UnexpectedToken { span, .. }
            | ParseError::InvalidAssignmentTarget { span } => Some(*span),
            ParseError::UnexpectedEof { .. } => None,
        }
    }
}

/// Format a parse error as an annotated source snippet.
///
/// `label` names the input (e.g. a file name) in the rendered header.
pub fn prettify_error(source: &str, err: &ParseError, label: &str) -> String {
    use annotate_snippets::{Level, Renderer, Snippet};

    let span = err
        .span()
        .unwrap_or_else(|| Span::new(source.len(), source.len()));
    let start = span.start.min(source.len());
    let mut end = span.end.min(source.len());
    if end == start {
        end = (start + 1).min(source.len());
    }
    let message = err.to_string();

    let rendered = Renderer::styled()
        .render(
            Level::Error.title(label).snippet(
                Snippet::source(source)
                    .line_start(1)
                    .fold(true)
                    .annotations(vec![Level::Error.span(start..end).label(&message)]),
            ),
        )
        .to_string();
    rendered
}
