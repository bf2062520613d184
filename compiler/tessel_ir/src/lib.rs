//! Tessel IR - Syntax Tree Types
//!
//! This crate contains the data the source-preserving printer works on:
//! - Spans and source files
//! - Source positions, including declaration sub-ranges
//! - Roles, node kinds and modifiers
//! - The arena-allocated syntax tree with its edit API
//! - Change tracking
//!
//! # Design Philosophy
//!
//! - **Flatten Everything**: nodes are addressed by `NodeId(u32)`
//! - **Edits Are Recorded**: every edit through [`SyntaxTree`] marks the
//!   changed role on the node and on each ancestor

mod changes;
mod kind;
mod position;
mod role;
mod span;
mod tree;

pub use changes::{ChangeCollector, ChangeTracker};
pub use kind::{Modifier, NodeCategory, NodeKind};
pub use position::{SourceFile, SourceFileId, SourcePosition};
pub use role::Role;
pub use span::{Span, SpanError};
pub use tree::{Modifiers, Node, NodeId, NodeSpec, SyntaxTree};
