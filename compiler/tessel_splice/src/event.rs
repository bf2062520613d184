//! Print events observed by the interceptor.

use std::borrow::Cow;

use tessel_ir::{NodeId, Role};
use tessel_print::TokenSink;

/// Token sink method an event was raised through.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum SinkMethod {
    Keyword,
    Separator,
    Operator,
    Identifier,
    Literal,
    Comment,
    CodeSnippet,
    Space,
    Newline,
    IncTab,
    DecTab,
}

impl SinkMethod {
    /// Indentation bookkeeping, which reaches the output even when muted.
    pub fn is_indentation(self) -> bool {
        matches!(self, SinkMethod::IncTab | SinkMethod::DecTab)
    }
}

/// One call on a [`TokenSink`], recorded so it can be replayed later.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenEvent<'a> {
    pub method: SinkMethod,
    pub token: Cow<'a, str>,
}

impl<'a> TokenEvent<'a> {
    pub fn new(method: SinkMethod, token: &'a str) -> Self {
        TokenEvent {
            method,
            token: Cow::Borrowed(token),
        }
    }

    /// Event without text (space, newline, indentation).
    pub fn bare(method: SinkMethod) -> Self {
        TokenEvent {
            method,
            token: Cow::Borrowed(""),
        }
    }

    pub fn into_owned(self) -> TokenEvent<'static> {
        TokenEvent {
            method: self.method,
            token: Cow::Owned(self.token.into_owned()),
        }
    }

    /// Replay the event on `sink`.
    pub fn apply<S: TokenSink + ?Sized>(&self, sink: &mut S) {
        let token = self.token.as_ref();
        match self.method {
            SinkMethod::Keyword => sink.write_keyword(token),
            SinkMethod::Separator => sink.write_separator(token),
            SinkMethod::Operator => sink.write_operator(token),
            SinkMethod::Identifier => sink.write_identifier(token),
            SinkMethod::Literal => sink.write_literal(token),
            SinkMethod::Comment => sink.write_comment(token),
            SinkMethod::CodeSnippet => sink.write_code_snippet(token),
            SinkMethod::Space => sink.write_space(),
            SinkMethod::Newline => sink.writeln(),
            SinkMethod::IncTab => sink.inc_tab(),
            SinkMethod::DecTab => sink.dec_tab(),
        }
    }

    pub fn as_print_event(&self) -> PrintEvent<'_> {
        PrintEvent::Token {
            method: self.method,
            token: &self.token,
        }
    }
}

/// Event a fragment boundary can be triggered by.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PrintEvent<'e> {
    /// A token is written.
    Token { method: SinkMethod, token: &'e str },
    /// `node`, held under `role` by its parent, is about to be scanned.
    Scan { node: NodeId, role: Option<Role> },
}
