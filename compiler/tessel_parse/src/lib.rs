//! Parser for the declaration language.
//!
//! Produces a [`SyntaxTree`] whose nodes carry exact original offsets:
//! - every node has a [`SourcePosition`](tessel_ir::SourcePosition) in its file
//! - declarations record their modifier and name ranges, body holders their
//!   body range
//! - comments between list elements become `Comment` nodes
//!
//! The parser does no error recovery.

mod cursor;
mod error;
mod grammar;

pub use error::ParseError;

use tessel_ir::{NodeId, SpanError, SyntaxTree};

use cursor::Cursor;
use grammar::Parser;

/// Parse `text` as a new source file of `tree` and return its compilation
/// unit, which is also registered as the file's root.
///
/// On error the file stays registered without a root.
#[tracing::instrument(level = "debug", skip(tree, text), fields(len = text.len()))]
pub fn parse_source(tree: &mut SyntaxTree, name: &str, text: &str) -> Result<NodeId, ParseError> {
    let tokens = tessel_lexer::lex(text)?;
    let len = u32::try_from(text.len()).map_err(|_| SpanError::EndTooLarge(text.len()))?;
    let file = tree.add_source_file(name, text);

    let mut parser = Parser::new(tree, file, Cursor::new(&tokens, text, len));
    let root = parser.compilation_unit(len)?;
    tree.set_file_root(file, root);

    tracing::debug!(tokens = tokens.len(), nodes = tree.len(), "parsed source file");
    Ok(root)
}
