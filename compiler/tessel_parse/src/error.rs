//! Parse errors.

use tessel_ir::{Span, SpanError};
use tessel_lexer::LexError;

/// Failure to build a tree from source text.
///
/// The front-end does no recovery: the first error ends the parse.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error("expected {expected}, found {found} at {span}")]
    Unexpected {
        expected: &'static str,
        found: &'static str,
        span: Span,
    },
    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEof { expected: &'static str },
    #[error(transparent)]
    TooLarge(#[from] SpanError),
}

impl ParseError {
    /// Location of the offending token, if there is one.
    pub fn span(&self) -> Option<Span> {
        match self {
            ParseError::Lex(LexError::UnexpectedCharacter { span })
            | ParseError::Unexpected { span, .. } => Some(*span),
            _ => None,
        }
    }
}
