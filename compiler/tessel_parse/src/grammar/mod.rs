//! Recursive-descent grammar.
//!
//! Children are parsed before their parent is allocated, so every node is
//! created with its final position and attached in source order.

mod expr;
mod item;
mod stmt;
mod ty;

use tessel_ir::{
    Modifiers, NodeId, NodeKind, NodeSpec, Role, SourceFileId, SourcePosition, Span, SyntaxTree,
};

use crate::cursor::Cursor;

pub(crate) struct Parser<'t, 's> {
    cursor: Cursor<'s>,
    tree: &'t mut SyntaxTree,
    file: SourceFileId,
}

/// Annotations and modifiers in front of a declaration.
struct Header {
    start: u32,
    /// Empty at `start` when there are neither annotations nor modifiers.
    span: Span,
    modifiers: Modifiers,
    annotations: Vec<NodeId>,
}

/// Children collected before their parent node exists.
type Children = Vec<(Role, NodeId)>;

impl<'t, 's> Parser<'t, 's> {
    pub fn new(tree: &'t mut SyntaxTree, file: SourceFileId, cursor: Cursor<'s>) -> Self {
        Parser { cursor, tree, file }
    }

    fn plain(&self, span: Span) -> SourcePosition {
        SourcePosition::Plain {
            file: self.file,
            span,
        }
    }

    fn span_of(&self, node: NodeId) -> Span {
        self.tree.position(node).span().unwrap_or_default()
    }

    fn finish(&mut self, spec: NodeSpec, children: Children) -> NodeId {
        let node = self.tree.alloc(spec);
        for (role, child) in children {
            self.tree.attach(node, role, child);
        }
        node
    }

    /// Turn the comments at the cursor into list elements.
    fn comments_into(&mut self, children: &mut Children) {
        while let Some(token) = self.cursor.take_comment() {
            let text = self.cursor.slice(token.span);
            let spec = NodeSpec::new(NodeKind::Comment)
                .position(self.plain(token.span))
                .text(text);
            children.push((Role::Comment, self.tree.alloc(spec)));
        }
    }

    pub fn compilation_unit(&mut self, len: u32) -> Result<NodeId, crate::ParseError> {
        let mut children = Children::new();
        loop {
            self.comments_into(&mut children);
            if self.cursor.at_end() {
                break;
            }
            let decl = self.type_declaration()?;
            children.push((Role::DeclaredType, decl));
        }
        let spec =
            NodeSpec::new(NodeKind::CompilationUnit).position(self.plain(Span::new(0, len)));
        Ok(self.finish(spec, children))
    }
}
