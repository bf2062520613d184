//! Per-node print contexts.
//!
//! While a node is printed, its context follows the token stream through
//! the node's fragment chain. Entering an unmodified fragment copies its
//! original text and mutes the sink; entering a modified one unmutes it so
//! the generic printer's tokens reach the output.

use rustc_hash::FxHashMap;
use tessel_ir::{NodeId, Role, Span, SyntaxTree};
use tessel_print::VerbatimSink;
use tracing::trace;

use crate::event::{PrintEvent, TokenEvent};
use crate::fragment::{FragmentId, FragmentTree};
use crate::mutable::MutableSink;

/// Shared state a context works against.
pub(crate) struct Env<'a, S> {
    pub tree: &'a SyntaxTree,
    pub fragments: &'a FragmentTree,
    pub sink: &'a mut MutableSink<S>,
}

pub(crate) enum FragmentContext {
    /// Events go straight to the sink.
    Delegate,
    Scalar(ScalarContext),
}

/// Walks the fragment chain of one node.
pub(crate) struct ScalarContext {
    node: NodeId,
    chain: Vec<FragmentId>,
    current: Option<usize>,
    list: Option<ListContext>,
}

impl ScalarContext {
    /// Context positioned on the first fragment of `chain`.
    pub fn new<S: VerbatimSink>(node: NodeId, chain: Vec<FragmentId>, env: &mut Env<'_, S>) -> Self {
        let mut context = ScalarContext {
            node,
            chain,
            current: None,
            list: None,
        };
        if !context.chain.is_empty() {
            context.enter(0, env);
        }
        context
    }

    pub fn on_token<S: VerbatimSink>(&mut self, event: &TokenEvent<'_>, env: &mut Env<'_, S>) {
        let print_event = event.as_print_event();
        self.start_on(&print_event, env);
        match &mut self.list {
            Some(list) => list.on_token(event, env),
            None => env.sink.apply(event),
        }
        self.end_on(&print_event, env);
    }

    pub fn before_scan<S: VerbatimSink>(
        &mut self,
        node: NodeId,
        role: Option<Role>,
        env: &mut Env<'_, S>,
    ) {
        let event = PrintEvent::Scan { node, role };
        self.start_on(&event, env);
        if let Some(list) = &mut self.list {
            list.before_element(node, role, env);
        }
        self.end_on(&event, env);
    }

    pub fn after_scan<S: VerbatimSink>(&mut self, role: Option<Role>, sink: &mut MutableSink<S>) {
        if let Some(list) = &mut self.list {
            list.after_element(role, sink);
        }
    }

    /// Close an open list; called when the node is left.
    pub fn finish<S: VerbatimSink>(&mut self, env: &mut Env<'_, S>) {
        self.finish_list(env);
    }

    fn enter<S: VerbatimSink>(&mut self, index: usize, env: &mut Env<'_, S>) {
        self.current = Some(index);
        let id = self.chain[index];
        let fragments = env.fragments;
        let fragment = fragments.get(id);
        trace!(node = ?self.node, kind = ?fragment.kind(), modified = fragment.is_modified(), "entering fragment");
        if fragment.is_modified() {
            env.sink.set_muted(false);
            if let Some(descriptor) = fragment.descriptor() {
                if let Some(role) = descriptor.list_role() {
                    let list = ListContext::new(id, self.node, role, env);
                    self.list = Some(list.with_terminator(descriptor.terminator()));
                }
            }
        } else {
            env.sink.direct_print(fragments.source_code(id));
            env.sink.set_muted(true);
        }
    }

    /// Move to a later fragment whose start trigger matches `event`.
    ///
    /// Unmodified fragments passed over on the way are copied.
    fn start_on<S: VerbatimSink>(&mut self, event: &PrintEvent<'_>, env: &mut Env<'_, S>) {
        let Some(current) = self.current else {
            return;
        };
        let target = (current + 1..self.chain.len()).find(|&index| {
            env.fragments
                .get(self.chain[index])
                .descriptor()
                .is_some_and(|d| d.starts_on(event))
        });
        let Some(target) = target else {
            return;
        };
        self.finish_list(env);
        for &skipped in &self.chain[current + 1..target] {
            if !env.fragments.get(skipped).is_modified() {
                env.sink.direct_print(env.fragments.source_code(skipped));
            }
        }
        self.enter(target, env);
    }

    fn end_on<S: VerbatimSink>(&mut self, event: &PrintEvent<'_>, env: &mut Env<'_, S>) {
        let Some(current) = self.current else {
            return;
        };
        let ends = env
            .fragments
            .get(self.chain[current])
            .descriptor()
            .is_some_and(|d| d.ends_on(event));
        if !ends {
            return;
        }
        self.finish_list(env);
        if current + 1 < self.chain.len() {
            self.enter(current + 1, env);
        } else {
            self.current = None;
        }
    }

    fn finish_list<S: VerbatimSink>(&mut self, env: &mut Env<'_, S>) {
        if let Some(mut list) = self.list.take() {
            list.finish(env);
        }
    }
}

/// Prints a modified list fragment element by element.
///
/// Elements are printed by their own contexts. Between two elements the
/// original separator text is reused when the second element existed in
/// the original source; otherwise the generic separator tokens are kept.
struct ListContext {
    fragment: FragmentId,
    role: Role,
    terminator: &'static str,
    /// Original text in front of each surviving element, back to the
    /// preceding element.
    prefixes: FxHashMap<NodeId, Span>,
    /// Separator tokens muted since the previous element.
    pending: Vec<TokenEvent<'static>>,
    /// Index of the element printed last.
    index: Option<usize>,
    /// Original text up to the first element, held back until an element
    /// or the end of the list shows how it is used.
    prefix: Option<Span>,
    started: bool,
}

impl ListContext {
    fn new<S>(fragment: FragmentId, owner: NodeId, role: Role, env: &Env<'_, S>) -> Self {
        let fragments = env.fragments;
        let mut gaps = FxHashMap::default();
        let mut previous_end = None;
        for child in fragments.children(fragment) {
            let child = fragments.get(child);
            if let (Some(node), Some(end)) = (child.node(), previous_end) {
                gaps.insert(node, Span::new(end, child.start()));
            }
            previous_end = Some(child.end());
        }
        let prefixes = env
            .tree
            .list_elements(owner, role)
            .into_iter()
            .filter_map(|element| gaps.get(&element).map(|&gap| (element, gap)))
            .collect();
        ListContext {
            fragment,
            role,
            terminator: "",
            prefixes,
            pending: Vec::new(),
            index: None,
            prefix: None,
            started: false,
        }
    }

    fn with_terminator(mut self, terminator: &'static str) -> Self {
        self.terminator = terminator;
        self
    }

    fn is_element(&self, role: Option<Role>) -> bool {
        role == Some(self.role) || role == Some(Role::Comment)
    }

    /// Take over the original text up to the first element, muting the
    /// generated tokens it replaces.
    fn start<S: VerbatimSink>(&mut self, env: &mut Env<'_, S>) {
        if self.started {
            return;
        }
        self.started = true;
        if env.sink.is_muted() {
            return;
        }
        let fragment = env.fragments.get(self.fragment);
        if let Some(first) = fragment.first_child() {
            self.prefix = Some(Span::new(fragment.start(), env.fragments.get(first).start()));
            env.sink.set_muted(true);
        }
    }

    fn on_token<S: VerbatimSink>(&mut self, event: &TokenEvent<'_>, env: &mut Env<'_, S>) {
        if self.index.is_none() {
            self.start(env);
            env.sink.apply(event);
        } else if env.sink.is_muted() && !event.method.is_indentation() {
            self.pending.push(event.clone().into_owned());
        } else {
            env.sink.apply(event);
        }
    }

    fn before_element<S: VerbatimSink>(
        &mut self,
        node: NodeId,
        role: Option<Role>,
        env: &mut Env<'_, S>,
    ) {
        if !self.is_element(role) {
            return;
        }
        self.start(env);
        let index = self.index.map_or(0, |index| index + 1);
        self.index = Some(index);
        env.sink.set_muted(false);
        if let Some(prefix) = self.prefix.take() {
            env.sink.direct_print(env.fragments.slice(prefix));
        }
        if index == 0 {
            return;
        }
        match self.prefixes.get(&node) {
            Some(&gap) => {
                env.sink.direct_print(env.fragments.slice(gap));
                self.pending.clear();
            }
            None => self.flush(env.sink),
        }
    }

    fn after_element<S: VerbatimSink>(&mut self, role: Option<Role>, sink: &mut MutableSink<S>) {
        if self.is_element(role) {
            sink.set_muted(true);
        }
    }

    /// Copy the original text after the last element, or replay the
    /// generic tokens when the original list was empty.
    ///
    /// A list that lost all its elements keeps its original boundaries,
    /// minus the whitespace that led to the first element and the
    /// terminator of the last one.
    fn finish<S: VerbatimSink>(&mut self, env: &mut Env<'_, S>) {
        env.sink.set_muted(false);
        let mut suffix = env.fragments.text_after_last_child(self.fragment);
        if let Some(prefix) = self.prefix.take() {
            env.sink.direct_print(env.fragments.slice(prefix).trim_end());
            suffix = suffix.map(|text| text.strip_prefix(self.terminator).unwrap_or(text));
        }
        match suffix {
            Some(suffix) => {
                env.sink.direct_print(suffix);
                self.pending.clear();
            }
            None => self.flush(env.sink),
        }
    }

    fn flush<S: VerbatimSink>(&mut self, sink: &mut MutableSink<S>) {
        for event in self.pending.drain(..) {
            sink.apply(&event);
        }
    }
}
