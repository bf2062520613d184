//! Fragment tree.
//!
//! An ordered tree of half-open intervals over one file's text. Every
//! positioned node owns a MAIN fragment; declarations also own sub-part
//! fragments (modifiers, name, ...) which are the first children of their
//! MAIN fragment.
//!
//! Two fragments of one tree are either disjoint or nested. Touching is
//! allowed; partial overlap is rejected when the second fragment is added.
//!
//! Fragments store offsets only. Text is sliced from the shared file text on
//! demand.

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;
use tessel_ir::{NodeId, SourceFileId, SourcePosition, Span};

use crate::registry::FragmentDescriptor;
use crate::FragmentError;

/// Index of a fragment in its [`FragmentTree`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct FragmentId(u32);

impl FragmentId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for FragmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FragmentId({})", self.0)
    }
}

/// Which part of a node a fragment covers.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum FragmentKind {
    /// The whole node.
    Main,
    Modifiers,
    /// Between the modifiers and the name, e.g. `class ` or `int `.
    BeforeName,
    Name,
    /// Between the name and the body (or the end of the node).
    AfterName,
    Body,
}

/// Position of a fragment `b` relative to a fragment `a`.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Containment {
    /// `b` ends at or before the start of `a`.
    Before,
    /// `b` starts at or after the end of `a`.
    After,
    /// `b` is nested in `a`.
    Child,
    /// `a` is nested in `b`.
    Parent,
}

/// Compare interval `b` against interval `a`.
///
/// Equal intervals nest: `b` is a child of `a`. An empty interval touching
/// an edge of `a` lies outside it.
pub fn compare(a: Span, b: Span) -> Result<Containment, FragmentError> {
    if a.end <= b.start {
        Ok(Containment::After)
    } else if b.end <= a.start {
        Ok(Containment::Before)
    } else if a.contains_span(b) {
        Ok(Containment::Child)
    } else if b.contains_span(a) {
        Ok(Containment::Parent)
    } else {
        Err(FragmentError::Overlap {
            existing: a,
            new: b,
        })
    }
}

/// One interval of source text.
#[derive(Clone, Debug)]
pub struct Fragment {
    span: Span,
    kind: FragmentKind,
    node: Option<NodeId>,
    modified: bool,
    descriptor: Option<&'static FragmentDescriptor>,
    first_child: Option<FragmentId>,
    next_sibling: Option<FragmentId>,
}

impl Fragment {
    pub fn span(&self) -> Span {
        self.span
    }

    pub fn start(&self) -> u32 {
        self.span.start
    }

    pub fn end(&self) -> u32 {
        self.span.end
    }

    pub fn kind(&self) -> FragmentKind {
        self.kind
    }

    pub fn node(&self) -> Option<NodeId> {
        self.node
    }

    /// Set by the last reconciliation of the owning node.
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Printing rule assigned by the last reconciliation.
    pub fn descriptor(&self) -> Option<&'static FragmentDescriptor> {
        self.descriptor
    }

    pub fn first_child(&self) -> Option<FragmentId> {
        self.first_child
    }

    pub fn next_sibling(&self) -> Option<FragmentId> {
        self.next_sibling
    }
}

/// Interval tree of one source file.
#[derive(Clone, Debug)]
pub struct FragmentTree {
    file: SourceFileId,
    text: Arc<str>,
    fragments: Vec<Fragment>,
    first_root: Option<FragmentId>,
    by_node: FxHashMap<NodeId, FragmentId>,
}

impl FragmentTree {
    pub fn new(file: SourceFileId, text: Arc<str>) -> Self {
        FragmentTree {
            file,
            text,
            fragments: Vec::new(),
            first_root: None,
            by_node: FxHashMap::default(),
        }
    }

    pub fn file(&self) -> SourceFileId {
        self.file
    }

    /// Original text of the file.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub fn get(&self, id: FragmentId) -> &Fragment {
        &self.fragments[id.index()]
    }

    /// First fragment of the top-level chain.
    pub fn first_root(&self) -> Option<FragmentId> {
        self.first_root
    }

    /// Top-level fragments in order.
    pub fn roots(&self) -> Siblings<'_> {
        Siblings {
            tree: self,
            next: self.first_root,
        }
    }

    /// Direct children of `id` in order.
    pub fn children(&self, id: FragmentId) -> Siblings<'_> {
        Siblings {
            tree: self,
            next: self.get(id).first_child,
        }
    }

    // Construction

    /// Allocate a detached fragment.
    pub fn fragment(
        &mut self,
        span: Span,
        kind: FragmentKind,
        node: Option<NodeId>,
    ) -> Result<FragmentId, FragmentError> {
        if span.start > span.end {
            return Err(FragmentError::InvertedInterval {
                start: span.start,
                end: span.end,
            });
        }
        if span.end as usize > self.text.len() {
            return Err(FragmentError::OutOfBounds {
                span,
                len: self.text.len(),
            });
        }
        let raw = u32::try_from(self.fragments.len()).map_err(|_| FragmentError::OutOfBounds {
            span,
            len: self.text.len(),
        })?;
        self.fragments.push(Fragment {
            span,
            kind,
            node,
            modified: false,
            descriptor: None,
            first_child: None,
            next_sibling: None,
        });
        Ok(FragmentId(raw))
    }

    /// Allocate the MAIN fragment of `node` and, for declarations, its
    /// sub-part fragments.
    ///
    /// Sub-parts are gap-free and in order: MODIFIERS, BEFORE_NAME if the
    /// modifiers end before the name, NAME, AFTER_NAME if text follows the
    /// name before the body or the end, BODY for body holders. The MAIN
    /// fragment is not linked into the tree yet.
    pub fn create_main(
        &mut self,
        node: NodeId,
        position: SourcePosition,
    ) -> Result<FragmentId, FragmentError> {
        let span = position
            .span()
            .ok_or(FragmentError::MissingSource { node })?;
        let main = self.fragment(span, FragmentKind::Main, Some(node))?;

        if let (Some(modifiers), Some(name)) = (position.modifiers(), position.name()) {
            let body = position.body();
            let after_end = body.map_or(span.end, |b| b.start);
            let consistent = modifiers.start == span.start
                && modifiers.start <= modifiers.end
                && modifiers.end <= name.start
                && name.start <= name.end
                && name.end <= after_end
                && body.map_or(true, |b| b.start <= b.end && b.end == span.end)
                && after_end <= span.end;
            if !consistent {
                return Err(FragmentError::InconsistentDecomposition { node, span });
            }

            let mut parts = vec![(FragmentKind::Modifiers, modifiers)];
            if modifiers.end < name.start {
                parts.push((
                    FragmentKind::BeforeName,
                    Span::new(modifiers.end, name.start),
                ));
            }
            parts.push((FragmentKind::Name, name));
            if name.end < after_end {
                parts.push((FragmentKind::AfterName, Span::new(name.end, after_end)));
            }
            if let Some(body) = body {
                parts.push((FragmentKind::Body, body));
            }

            let mut previous: Option<FragmentId> = None;
            for (kind, part_span) in parts {
                let part = self.fragment(part_span, kind, Some(node))?;
                match previous {
                    Some(prev) => self.fragments[prev.index()].next_sibling = Some(part),
                    None => self.fragments[main.index()].first_child = Some(part),
                }
                previous = Some(part);
            }
        }

        self.by_node.insert(node, main);
        Ok(main)
    }

    /// Compare fragment `b` against fragment `a`.
    pub fn compare_fragments(
        &self,
        a: FragmentId,
        b: FragmentId,
    ) -> Result<Containment, FragmentError> {
        if a == b {
            return Err(FragmentError::SelfComparison(self.get(a).span));
        }
        compare(self.get(a).span, self.get(b).span)
    }

    /// Insert `new` into the top-level chain, descending into whichever
    /// fragment contains it.
    pub fn add_root(&mut self, new: FragmentId) -> Result<(), FragmentError> {
        self.insert(None, new)
    }

    /// Insert `new` below `parent`.
    ///
    /// Returns where `new` lies relative to `parent`; it is only inserted
    /// when that is [`Containment::Child`].
    pub fn add_child(
        &mut self,
        parent: FragmentId,
        new: FragmentId,
    ) -> Result<Containment, FragmentError> {
        let containment = self.compare_fragments(parent, new)?;
        if containment == Containment::Child {
            self.insert(Some(parent), new)?;
        }
        Ok(containment)
    }

    /// Insert `new` into the child chain of `owner` (the top-level chain for
    /// `None`), descending while an existing fragment contains it.
    fn insert(
        &mut self,
        mut owner: Option<FragmentId>,
        new: FragmentId,
    ) -> Result<(), FragmentError> {
        'chain: loop {
            let head = match owner {
                Some(owner) => self.get(owner).first_child,
                None => self.first_root,
            };
            let Some(head) = head else {
                self.set_head(owner, new);
                return Ok(());
            };

            let mut previous = None;
            let mut current = head;
            loop {
                match self.compare_fragments(current, new)? {
                    Containment::After => match self.get(current).next_sibling {
                        Some(next) => {
                            previous = Some(current);
                            current = next;
                        }
                        None => {
                            self.fragments[current.index()].next_sibling = Some(new);
                            return Ok(());
                        }
                    },
                    Containment::Before => {
                        self.fragments[new.index()].next_sibling = Some(current);
                        self.link_after(owner, previous, new);
                        return Ok(());
                    }
                    Containment::Child => {
                        owner = Some(current);
                        continue 'chain;
                    }
                    Containment::Parent => {
                        self.wrap(current, new)?;
                        self.link_after(owner, previous, new);
                        return Ok(());
                    }
                }
            }
        }
    }

    /// Make `parent` the parent of `first` and of every following sibling it
    /// contains; the first sibling outside it becomes `parent`'s next sibling.
    fn wrap(&mut self, first: FragmentId, parent: FragmentId) -> Result<(), FragmentError> {
        let mut absorbed = vec![first];
        let mut next = self.get(first).next_sibling;
        while let Some(candidate) = next {
            if self.compare_fragments(parent, candidate)? != Containment::Child {
                break;
            }
            absorbed.push(candidate);
            next = self.get(candidate).next_sibling;
        }
        self.fragments[parent.index()].next_sibling = next;

        if self.get(parent).first_child.is_none() {
            self.fragments[parent.index()].first_child = Some(first);
            if let Some(&last) = absorbed.last() {
                self.fragments[last.index()].next_sibling = None;
            }
            return Ok(());
        }
        // `parent` already has sub-parts: merge the run into them one by one.
        for id in absorbed {
            self.fragments[id.index()].next_sibling = None;
            self.insert(Some(parent), id)?;
        }
        Ok(())
    }

    fn link_after(&mut self, owner: Option<FragmentId>, previous: Option<FragmentId>, new: FragmentId) {
        match previous {
            Some(prev) => self.fragments[prev.index()].next_sibling = Some(new),
            None => self.set_head(owner, new),
        }
    }

    fn set_head(&mut self, owner: Option<FragmentId>, head: FragmentId) {
        match owner {
            Some(owner) => self.fragments[owner.index()].first_child = Some(head),
            None => self.first_root = Some(head),
        }
    }

    // Lookup

    /// MAIN fragment of `node`.
    pub fn fragment_of_node(&self, node: NodeId) -> Option<FragmentId> {
        self.by_node.get(&node).copied()
    }

    /// Outermost fragment spanning exactly `start..end`.
    ///
    /// Fails if the interval partially overlaps a fragment on the way down.
    pub fn fragment_of(&self, start: u32, end: u32) -> Result<Option<FragmentId>, FragmentError> {
        let query = Span::new(start, end);
        let mut next = self.first_root;
        while let Some(current) = next {
            let fragment = self.get(current);
            match compare(fragment.span, query)? {
                Containment::Child if fragment.span == query => return Ok(Some(current)),
                Containment::Child => next = fragment.first_child,
                Containment::After | Containment::Before => next = fragment.next_sibling,
                Containment::Parent => return Ok(None),
            }
        }
        Ok(None)
    }

    /// Original text covered by `id`.
    pub fn source_code(&self, id: FragmentId) -> &str {
        self.slice(self.get(id).span)
    }

    pub fn slice(&self, span: Span) -> &str {
        self.text.get(span.to_range()).unwrap_or_default()
    }

    /// Text between the start of `id` and its first child.
    pub fn text_before_first_child(&self, id: FragmentId) -> Option<&str> {
        let fragment = self.get(id);
        let child = self.get(fragment.first_child?);
        Some(self.slice(Span::new(fragment.start(), child.start())))
    }

    /// Text between the last child of `id` and its end.
    pub fn text_after_last_child(&self, id: FragmentId) -> Option<&str> {
        let fragment = self.get(id);
        let last = self.children(id).last()?;
        Some(self.slice(Span::new(self.get(last).end(), fragment.end())))
    }

    /// First sub-part of the node owning `id`.
    pub fn child_fragment_of_same_node(&self, id: FragmentId) -> Option<FragmentId> {
        let fragment = self.get(id);
        fragment
            .first_child
            .filter(|&child| fragment.node.is_some() && self.get(child).node == fragment.node)
    }

    /// Next sub-part of the same node.
    pub fn next_fragment_of_same_node(&self, id: FragmentId) -> Option<FragmentId> {
        let fragment = self.get(id);
        fragment
            .next_sibling
            .filter(|&next| fragment.node.is_some() && self.get(next).node == fragment.node)
    }

    /// Sub-parts of the MAIN fragment `main`, in order.
    pub fn sub_parts(&self, main: FragmentId) -> Vec<FragmentId> {
        std::iter::successors(self.child_fragment_of_same_node(main), |&part| {
            self.next_fragment_of_same_node(part)
        })
        .collect()
    }

    pub(crate) fn mark(
        &mut self,
        id: FragmentId,
        modified: bool,
        descriptor: Option<&'static FragmentDescriptor>,
    ) {
        let fragment = &mut self.fragments[id.index()];
        fragment.modified = modified;
        fragment.descriptor = descriptor;
    }
}

/// Iterator over a sibling chain.
pub struct Siblings<'a> {
    tree: &'a FragmentTree,
    next: Option<FragmentId>,
}

impl Iterator for Siblings<'_> {
    type Item = FragmentId;

    fn next(&mut self) -> Option<FragmentId> {
        let current = self.next?;
        self.next = self.tree.get(current).next_sibling;
        Some(current)
    }
}
