//! Printer configuration.

/// How one level of indentation is written.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum IndentStyle {
    #[default]
    Spaces,
    Tabs,
}

/// Layout settings for generated code.
///
/// Only code the printer generates follows these settings; text reused from
/// the original source keeps its own layout.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PrintConfig {
    /// Columns per indentation level when indenting with spaces.
    pub indent_width: usize,
    pub indent_style: IndentStyle,
}

impl Default for PrintConfig {
    fn default() -> Self {
        PrintConfig {
            indent_width: 4,
            indent_style: IndentStyle::Spaces,
        }
    }
}

impl PrintConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }

    #[must_use]
    pub fn with_tabs(mut self) -> Self {
        self.indent_style = IndentStyle::Tabs;
        self
    }

    /// Text for `depth` levels of indentation.
    pub fn indent(&self, depth: usize) -> String {
        match self.indent_style {
            IndentStyle::Spaces => " ".repeat(depth * self.indent_width),
            IndentStyle::Tabs => "\t".repeat(depth),
        }
    }
}
