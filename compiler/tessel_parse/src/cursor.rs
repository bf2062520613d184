//! Token cursor for navigating the token stream.
//!
//! Comment tokens are invisible to lookahead and consumption. List parsers
//! pick them up explicitly with [`Cursor::take_comment`] before each element.

use tessel_ir::Span;
use tessel_lexer::{Token, TokenKind};

use crate::ParseError;

pub(crate) struct Cursor<'s> {
    tokens: &'s [Token],
    source: &'s str,
    /// Byte length of `source`, used as the position of end of input.
    end: u32,
    pos: usize,
}

impl<'s> Cursor<'s> {
    pub fn new(tokens: &'s [Token], source: &'s str, end: u32) -> Self {
        Cursor {
            tokens,
            source,
            end,
            pos: 0,
        }
    }

    fn significant(&self) -> impl Iterator<Item = &'s Token> {
        let tokens: &'s [Token] = self.tokens;
        tokens[self.pos..].iter().filter(|t| !t.kind.is_comment())
    }

    /// Next non-comment token.
    pub fn peek(&self) -> Option<Token> {
        self.significant().next().copied()
    }

    pub fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(|t| t.kind)
    }

    /// Kind of the `n`-th upcoming non-comment token, `0` being the next.
    pub fn peek_nth_kind(&self, n: usize) -> Option<TokenKind> {
        self.significant().nth(n).map(|t| t.kind)
    }

    #[inline]
    pub fn check(&self, kind: TokenKind) -> bool {
        self.peek_kind() == Some(kind)
    }

    /// No tokens left, comments included.
    pub fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Start offset of the next non-comment token, or end of input.
    pub fn next_start(&self) -> u32 {
        self.peek().map_or(self.end, |t| t.span.start)
    }

    /// Consume the comment directly at the cursor.
    pub fn take_comment(&mut self) -> Option<Token> {
        let token = *self.tokens.get(self.pos)?;
        if token.kind.is_comment() {
            self.pos += 1;
            Some(token)
        } else {
            None
        }
    }

    /// Consume the next non-comment token.
    pub fn bump(&mut self) -> Option<Token> {
        while self.tokens.get(self.pos).is_some_and(|t| t.kind.is_comment()) {
            self.pos += 1;
        }
        let token = *self.tokens.get(self.pos)?;
        self.pos += 1;
        Some(token)
    }

    pub fn eat(&mut self, kind: TokenKind) -> Option<Token> {
        if self.check(kind) {
            self.bump()
        } else {
            None
        }
    }

    pub fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        self.eat(kind)
            .ok_or_else(|| self.unexpected(kind.describe()))
    }

    /// Error describing the next token as unexpected.
    pub fn unexpected(&self, expected: &'static str) -> ParseError {
        match self.peek() {
            Some(token) => ParseError::Unexpected {
                expected,
                found: token.kind.describe(),
                span: token.span,
            },
            None => ParseError::UnexpectedEof { expected },
        }
    }

    pub fn slice(&self, span: Span) -> &'s str {
        self.source.get(span.to_range()).unwrap_or_default()
    }
}
