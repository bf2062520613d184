//! Fragment tree construction errors.
//!
//! Any of these aborts construction for the whole file; the file is then
//! printed by the generic printer.

use tessel_ir::{NodeId, SourceFileId, Span};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FragmentError {
    #[error("fragment {new} partially overlaps fragment {existing}")]
    Overlap { existing: Span, new: Span },
    #[error("fragment {0} compared with itself")]
    SelfComparison(Span),
    #[error("fragment {start}..{end} ends before it starts")]
    InvertedInterval { start: u32, end: u32 },
    #[error("fragment {span} exceeds the source text of length {len}")]
    OutOfBounds { span: Span, len: usize },
    #[error("node {node:?} belongs to {found:?}, expected {expected:?}")]
    ForeignSourceFile {
        node: NodeId,
        expected: SourceFileId,
        found: SourceFileId,
    },
    #[error("node {node:?} at {span} lies outside its parent fragment {parent}")]
    OutsideParent {
        node: NodeId,
        span: Span,
        parent: Span,
    },
    #[error("declaration {node:?} at {span} has inconsistent sub-ranges")]
    InconsistentDecomposition { node: NodeId, span: Span },
    #[error("node {node:?} has no original source")]
    MissingSource { node: NodeId },
}
