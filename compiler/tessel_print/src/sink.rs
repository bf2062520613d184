//! Token sinks.
//!
//! The printer never writes text directly; it reports every token with its
//! lexical category so wrappers can observe, suppress or replace output.

use crate::PrintConfig;

/// Output channel of the printer, one method per lexical category.
pub trait TokenSink {
    fn write_keyword(&mut self, keyword: &str);
    fn write_separator(&mut self, separator: &str);
    fn write_operator(&mut self, operator: &str);
    fn write_identifier(&mut self, identifier: &str);
    fn write_literal(&mut self, literal: &str);
    fn write_comment(&mut self, comment: &str);
    /// Free-form code the printer does not categorize.
    fn write_code_snippet(&mut self, snippet: &str);
    fn write_space(&mut self);
    fn writeln(&mut self);
    /// Increase the indentation of following lines.
    fn inc_tab(&mut self);
    /// Decrease the indentation of following lines.
    fn dec_tab(&mut self);
}

/// Sink that can also take raw text copied from the original source.
pub trait VerbatimSink: TokenSink {
    fn write_verbatim(&mut self, text: &str);
}

/// String-building sink with lazy indentation.
///
/// Indentation is written when the first token of a line arrives, so
/// `inc_tab`/`dec_tab` may be called in any order relative to `writeln`.
#[derive(Debug)]
pub struct StringSink {
    buffer: String,
    config: PrintConfig,
    depth: usize,
    at_line_start: bool,
    /// The current line was not opened by `writeln`: either copied text
    /// ended with a newline or nothing has been written yet.
    verbatim_line: bool,
}

impl StringSink {
    pub fn new(config: PrintConfig) -> Self {
        StringSink {
            buffer: String::new(),
            config,
            depth: 0,
            at_line_start: true,
            verbatim_line: true,
        }
    }

    pub fn with_capacity(config: PrintConfig, capacity: usize) -> Self {
        StringSink {
            buffer: String::with_capacity(capacity),
            ..Self::new(config)
        }
    }

    /// Get the current buffer contents without consuming.
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    /// Current indentation level.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn output(self) -> String {
        self.buffer
    }

    fn write_token(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if self.at_line_start {
            self.buffer.push_str(&self.config.indent(self.depth));
            self.at_line_start = false;
        }
        self.buffer.push_str(text);
    }
}

impl TokenSink for StringSink {
    fn write_keyword(&mut self, keyword: &str) {
        self.write_token(keyword);
    }

    fn write_separator(&mut self, separator: &str) {
        self.write_token(separator);
    }

    fn write_operator(&mut self, operator: &str) {
        self.write_token(operator);
    }

    fn write_identifier(&mut self, identifier: &str) {
        self.write_token(identifier);
    }

    fn write_literal(&mut self, literal: &str) {
        self.write_token(literal);
    }

    fn write_comment(&mut self, comment: &str) {
        self.write_token(comment);
    }

    fn write_code_snippet(&mut self, snippet: &str) {
        self.write_token(snippet);
    }

    fn write_space(&mut self) {
        self.write_token(" ");
    }

    fn writeln(&mut self) {
        self.buffer.push('\n');
        self.at_line_start = true;
        self.verbatim_line = false;
    }

    fn inc_tab(&mut self) {
        self.depth += 1;
    }

    fn dec_tab(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}

impl VerbatimSink for StringSink {
    /// Copy `text` unchanged.
    ///
    /// Text starting a line opened by `writeln` with a non-blank character
    /// is indented to the current depth first. The first line of the buffer
    /// and lines opened by copied text keep their original indentation.
    fn write_verbatim(&mut self, text: &str) {
        let Some(first) = text.chars().next() else {
            return;
        };
        if self.at_line_start && !self.verbatim_line && !first.is_whitespace() {
            self.buffer.push_str(&self.config.indent(self.depth));
        }
        self.buffer.push_str(text);
        self.at_line_start = text.ends_with('\n');
        self.verbatim_line = self.at_line_start;
    }
}
