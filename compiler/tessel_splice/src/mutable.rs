//! Mutable token sink.

use tessel_print::{TokenSink, VerbatimSink};

use crate::event::TokenEvent;

/// Sink wrapper that can be muted.
///
/// While muted, tokens are dropped because original text covering them was
/// already copied with [`MutableSink::direct_print`]. Indentation changes
/// always pass, so generated code resumes at the right depth.
pub struct MutableSink<S> {
    inner: S,
    muted: bool,
}

impl<S: VerbatimSink> MutableSink<S> {
    pub fn new(inner: S) -> Self {
        MutableSink {
            inner,
            muted: false,
        }
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Copy original text regardless of the mute state.
    pub fn direct_print(&mut self, text: &str) {
        self.inner.write_verbatim(text);
    }

    /// Replay a recorded event through the mute gate.
    pub fn apply(&mut self, event: &TokenEvent<'_>) {
        event.apply(self);
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: VerbatimSink> TokenSink for MutableSink<S> {
    fn write_keyword(&mut self, keyword: &str) {
        if !self.muted {
            self.inner.write_keyword(keyword);
        }
    }

    fn write_separator(&mut self, separator: &str) {
        if !self.muted {
            self.inner.write_separator(separator);
        }
    }

    fn write_operator(&mut self, operator: &str) {
        if !self.muted {
            self.inner.write_operator(operator);
        }
    }

    fn write_identifier(&mut self, identifier: &str) {
        if !self.muted {
            self.inner.write_identifier(identifier);
        }
    }

    fn write_literal(&mut self, literal: &str) {
        if !self.muted {
            self.inner.write_literal(literal);
        }
    }

    fn write_comment(&mut self, comment: &str) {
        if !self.muted {
            self.inner.write_comment(comment);
        }
    }

    fn write_code_snippet(&mut self, snippet: &str) {
        if !self.muted {
            self.inner.write_code_snippet(snippet);
        }
    }

    fn write_space(&mut self) {
        if !self.muted {
            self.inner.write_space();
        }
    }

    fn writeln(&mut self) {
        if !self.muted {
            self.inner.writeln();
        }
    }

    fn inc_tab(&mut self) {
        self.inner.inc_tab();
    }

    fn dec_tab(&mut self) {
        self.inner.dec_tab();
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tessel_print::{PrintConfig, StringSink};

    use super::*;
    use crate::event::SinkMethod;

    #[test]
    fn test_muted_sink_drops_tokens_but_keeps_indentation() {
        let mut sink = MutableSink::new(StringSink::new(PrintConfig::default()));
        sink.set_muted(true);
        sink.write_keyword("class");
        sink.inc_tab();
        sink.writeln();
        sink.direct_print("{\n");
        sink.set_muted(false);
        sink.write_identifier("x");
        assert_eq!(sink.into_inner().output(), "{\n    x");
    }

    #[test]
    fn test_apply_replays_event() {
        let mut sink = MutableSink::new(StringSink::new(PrintConfig::default()));
        sink.apply(&TokenEvent::new(SinkMethod::Separator, ";"));
        sink.apply(&TokenEvent::bare(SinkMethod::Space));
        sink.set_muted(true);
        sink.apply(&TokenEvent::new(SinkMethod::Literal, "1"));
        assert_eq!(sink.inner().as_str(), "; ");
    }
}
