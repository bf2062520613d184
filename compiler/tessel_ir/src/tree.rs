//! Arena-allocated syntax tree.
//!
//! Nodes are addressed by [`NodeId`] and own an ordered list of children.
//! Each child records the [`Role`] it plays in its parent.
//!
//! Two groups of operations exist:
//! - setup (`alloc`, `attach`, `set_file_root`): used by the parser, never
//!   recorded as changes;
//! - edits (`set_name`, `insert_child`, `remove_child`, ...): recorded in the
//!   tree's [`ChangeCollector`] for the edited node and all its ancestors.

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::{ChangeCollector, Modifier, NodeKind, Role, SourceFile, SourceFileId, SourcePosition};

/// Index of a node in a [`SyntaxTree`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        NodeId(raw)
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

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

/// Inline storage for modifier keywords; declarations rarely carry more.
pub type Modifiers = SmallVec<[Modifier; 4]>;

/// One syntax node.
#[derive(Clone, Debug)]
pub struct Node {
    kind: NodeKind,
    position: SourcePosition,
    parent: Option<NodeId>,
    role: Option<Role>,
    name: Option<String>,
    text: Option<String>,
    modifiers: Modifiers,
    children: Vec<NodeId>,
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn position(&self) -> SourcePosition {
        self.position
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Role this node plays in its parent.
    pub fn role(&self) -> Option<Role> {
        self.role
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Literal value, comment text or operator symbol.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn modifiers(&self) -> &[Modifier] {
        &self.modifiers
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Builder for a node before it is allocated.
#[derive(Clone, Debug)]
pub struct NodeSpec {
    kind: NodeKind,
    position: SourcePosition,
    name: Option<String>,
    text: Option<String>,
    modifiers: Modifiers,
}

impl NodeSpec {
    pub fn new(kind: NodeKind) -> Self {
        NodeSpec {
            kind,
            position: SourcePosition::None,
            name: None,
            text: None,
            modifiers: Modifiers::new(),
        }
    }

    #[must_use]
    pub fn position(mut self, position: SourcePosition) -> Self {
        self.position = position;
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    #[must_use]
    pub fn modifiers(mut self, modifiers: impl IntoIterator<Item = Modifier>) -> Self {
        self.modifiers = modifiers.into_iter().collect();
        self
    }
}

/// Syntax tree of one or more source files.
#[derive(Clone, Debug, Default)]
pub struct SyntaxTree {
    nodes: Vec<Node>,
    files: Vec<SourceFile>,
    roots: FxHashMap<SourceFileId, NodeId>,
    changes: ChangeCollector,
}

impl SyntaxTree {
    pub fn new() -> Self {
        Self::default()
    }

    // Source files

    /// Register the original text of a file.
    pub fn add_source_file(
        &mut self,
        name: impl Into<String>,
        text: impl Into<Arc<str>>,
    ) -> SourceFileId {
        let raw = u32::try_from(self.files.len()).unwrap_or(u32::MAX);
        let id = SourceFileId::from_raw(raw);
        self.files.push(SourceFile::new(id, name, text));
        id
    }

    pub fn source_file(&self, id: SourceFileId) -> Option<&SourceFile> {
        self.files.get(id.index())
    }

    pub fn source_files(&self) -> &[SourceFile] {
        &self.files
    }

    pub fn set_file_root(&mut self, file: SourceFileId, root: NodeId) {
        self.roots.insert(file, root);
    }

    /// Compilation unit parsed from `file`.
    pub fn file_root(&self, file: SourceFileId) -> Option<NodeId> {
        self.roots.get(&file).copied()
    }

    // Setup

    /// Allocate a detached node.
    pub fn alloc(&mut self, spec: NodeSpec) -> NodeId {
        let raw = u32::try_from(self.nodes.len()).unwrap_or(u32::MAX);
        self.nodes.push(Node {
            kind: spec.kind,
            position: spec.position,
            parent: None,
            role: None,
            name: spec.name,
            text: spec.text,
            modifiers: spec.modifiers,
            children: Vec::new(),
        });
        NodeId(raw)
    }

    /// Append `child` to `parent` under `role` without recording a change.
    pub fn attach(&mut self, parent: NodeId, role: Role, child: NodeId) {
        self.link(child, parent, role);
        self.nodes[parent.index()].children.push(child);
    }

    // Queries

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.node(id).kind
    }

    pub fn position(&self, id: NodeId) -> SourcePosition {
        self.node(id).position
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    /// Children of `id` attached under `role`, in order.
    pub fn children_on(&self, id: NodeId, role: Role) -> impl Iterator<Item = NodeId> + '_ {
        self.children(id)
            .iter()
            .copied()
            .filter(move |&child| self.node(child).role == Some(role))
    }

    /// First child of `id` attached under `role`.
    pub fn child_on(&self, id: NodeId, role: Role) -> Option<NodeId> {
        self.children_on(id, role).next()
    }

    /// Elements of the `role` collection of `id`, in order.
    ///
    /// For the kind's list role this includes the comments stored between
    /// the elements.
    pub fn list_elements(&self, id: NodeId, role: Role) -> Vec<NodeId> {
        let with_comments = self.kind(id).list_role() == Some(role);
        self.children(id)
            .iter()
            .copied()
            .filter(|&child| {
                let child_role = self.node(child).role;
                child_role == Some(role) || (with_comments && child_role == Some(Role::Comment))
            })
            .collect()
    }

    /// Ancestors of `id`, nearest first.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |&node| self.parent(node))
    }

    pub fn changes(&self) -> &ChangeCollector {
        &self.changes
    }

    /// Forget recorded changes.
    pub fn clear_changes(&mut self) {
        self.changes.clear();
    }

    // Edits

    pub fn set_name(&mut self, id: NodeId, name: impl Into<String>) {
        self.nodes[id.index()].name = Some(name.into());
        self.record(id, Role::Name);
    }

    /// Replace a literal value, comment text or operator symbol.
    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) {
        self.nodes[id.index()].text = Some(text.into());
        let role = if self.kind(id) == NodeKind::BinaryOperator {
            Role::Operator
        } else {
            Role::Value
        };
        self.record(id, role);
    }

    pub fn set_modifiers(&mut self, id: NodeId, modifiers: impl IntoIterator<Item = Modifier>) {
        self.nodes[id.index()].modifiers = modifiers.into_iter().collect();
        self.record(id, Role::Modifier);
    }

    /// Insert `child` as element `index` of the `role` collection of `parent`.
    ///
    /// Indices count the same elements as [`SyntaxTree::list_elements`]. An
    /// index at or past the end appends after the last element, or after all
    /// children when the collection is empty.
    pub fn insert_child(&mut self, parent: NodeId, role: Role, index: usize, child: NodeId) {
        let elements = self.list_elements(parent, role);
        let children = &self.nodes[parent.index()].children;
        let at = match elements.get(index) {
            Some(anchor) => children.iter().position(|c| c == anchor),
            None => elements
                .last()
                .and_then(|last| children.iter().position(|c| c == last))
                .map(|pos| pos + 1),
        }
        .unwrap_or(children.len());
        self.link(child, parent, role);
        self.nodes[parent.index()].children.insert(at, child);
        self.record_on(parent, role);
    }

    /// Detach `child` from `parent`. Returns `false` if it was not a child.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        let children = &mut self.nodes[parent.index()].children;
        let Some(at) = children.iter().position(|&c| c == child) else {
            return false;
        };
        children.remove(at);
        let role = self.nodes[child.index()].role.take();
        self.nodes[child.index()].parent = None;
        if let Some(role) = role {
            self.record_on(parent, role);
        }
        true
    }

    /// Put `new` in the place of `old`, under the same role.
    ///
    /// Returns `false` if `old` is detached.
    pub fn replace_child(&mut self, old: NodeId, new: NodeId) -> bool {
        let (Some(parent), Some(role)) = (self.parent(old), self.node(old).role) else {
            return false;
        };
        let children = &mut self.nodes[parent.index()].children;
        let Some(at) = children.iter().position(|&c| c == old) else {
            return false;
        };
        children[at] = new;
        self.nodes[old.index()].parent = None;
        self.nodes[old.index()].role = None;
        self.link(new, parent, role);
        self.record_on(parent, role);
        true
    }

    /// Set or clear the single child of `parent` on `role`.
    pub fn set_child(&mut self, parent: NodeId, role: Role, child: Option<NodeId>) {
        let existing = self.child_on(parent, role);
        match (existing, child) {
            (Some(old), Some(new)) => {
                self.replace_child(old, new);
            }
            (Some(old), None) => {
                self.remove_child(parent, old);
            }
            (None, Some(new)) => {
                self.link(new, parent, role);
                self.nodes[parent.index()].children.push(new);
                self.record_on(parent, role);
            }
            (None, None) => {}
        }
    }

    fn link(&mut self, child: NodeId, parent: NodeId, role: Role) {
        let node = &mut self.nodes[child.index()];
        debug_assert!(node.parent.is_none(), "node {child:?} is already attached");
        node.parent = Some(parent);
        node.role = Some(role);
    }

    /// Record a change of `role` on `parent`, where the changed thing is a
    /// child in that role.
    fn record_on(&mut self, parent: NodeId, role: Role) {
        let role = self.collection_role(parent, role);
        self.record(parent, role);
    }

    /// Record `role` of `id` and propagate to the ancestors.
    fn record(&mut self, id: NodeId, role: Role) {
        self.changes.record(id, role);
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            let Some(role) = self.node(current).role else {
                break;
            };
            let role = self.collection_role(parent, role);
            self.changes.record(parent, role);
            current = parent;
        }
    }

    /// Comments live in their parent's element list.
    fn collection_role(&self, parent: NodeId, role: Role) -> Role {
        if role == Role::Comment {
            self.kind(parent).list_role().unwrap_or(role)
        } else {
            role
        }
    }
}
