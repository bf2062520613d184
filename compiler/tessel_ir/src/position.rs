//! Source files and node positions.
//!
//! A node's position records where its text lives in the original file.
//! Declarations also carry the sub-ranges of their modifiers and name, and
//! body holders (types, executables) the range of their body.

use std::fmt;
use std::sync::Arc;

use crate::Span;

/// Index of a registered source file.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct SourceFileId(u32);

impl SourceFileId {
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        SourceFileId(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for SourceFileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SourceFileId({})", self.0)
    }
}

/// Original text of one source file.
///
/// The text is shared: fragments and printers slice it by offset and never
/// copy it per node.
#[derive(Clone, Debug)]
pub struct SourceFile {
    id: SourceFileId,
    name: String,
    text: Arc<str>,
}

impl SourceFile {
    pub fn new(id: SourceFileId, name: impl Into<String>, text: impl Into<Arc<str>>) -> Self {
        SourceFile {
            id,
            name: name.into(),
            text: text.into(),
        }
    }

    pub fn id(&self) -> SourceFileId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Shared handle to the text.
    pub fn shared_text(&self) -> Arc<str> {
        Arc::clone(&self.text)
    }

    /// Text covered by `span`, or `None` if the span is out of bounds.
    pub fn slice(&self, span: Span) -> Option<&str> {
        self.text.get(span.to_range())
    }
}

/// Where a node's text lives in the original source.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum SourcePosition {
    /// Synthetic node, created after parsing.
    #[default]
    None,
    /// Whole-node range only.
    Plain { file: SourceFileId, span: Span },
    /// Declaration with modifier and name sub-ranges.
    ///
    /// `modifiers` starts at `span.start`; it is empty when the declaration
    /// has no modifiers or annotations.
    Declaration {
        file: SourceFileId,
        span: Span,
        modifiers: Span,
        name: Span,
    },
    /// Declaration that also owns a body, e.g. a class or a method.
    BodyHolder {
        file: SourceFileId,
        span: Span,
        modifiers: Span,
        name: Span,
        body: Span,
    },
}

impl SourcePosition {
    pub fn is_none(&self) -> bool {
        matches!(self, SourcePosition::None)
    }

    pub fn file(&self) -> Option<SourceFileId> {
        match *self {
            SourcePosition::None => None,
            SourcePosition::Plain { file, .. }
            | SourcePosition::Declaration { file, .. }
            | SourcePosition::BodyHolder { file, .. } => Some(file),
        }
    }

    pub fn span(&self) -> Option<Span> {
        match *self {
            SourcePosition::None => None,
            SourcePosition::Plain { span, .. }
            | SourcePosition::Declaration { span, .. }
            | SourcePosition::BodyHolder { span, .. } => Some(span),
        }
    }

    pub fn modifiers(&self) -> Option<Span> {
        match *self {
            SourcePosition::Declaration { modifiers, .. }
            | SourcePosition::BodyHolder { modifiers, .. } => Some(modifiers),
            _ => None,
        }
    }

    pub fn name(&self) -> Option<Span> {
        match *self {
            SourcePosition::Declaration { name, .. } | SourcePosition::BodyHolder { name, .. } => {
                Some(name)
            }
            _ => None,
        }
    }

    pub fn body(&self) -> Option<Span> {
        match *self {
            SourcePosition::BodyHolder { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Whether this position carries declaration sub-ranges.
    pub fn is_declaration(&self) -> bool {
        matches!(
            self,
            SourcePosition::Declaration { .. } | SourcePosition::BodyHolder { .. }
        )
    }
}
