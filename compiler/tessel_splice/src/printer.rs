//! Source-preserving printer.
//!
//! [`SplicingPrinter`] drives the generic printer and intercepts every
//! token it emits. Each scanned node gets a [`FragmentContext`] that decides,
//! per fragment, whether original text is copied or generated tokens pass.

use tessel_ir::{ChangeTracker, NodeId, Role, SyntaxTree};
use tessel_print::{print_node, Scan, TokenSink, VerbatimSink};
use tracing::debug;

use crate::context::{Env, FragmentContext, ScalarContext};
use crate::event::{SinkMethod, TokenEvent};
use crate::fragment::FragmentTree;
use crate::mutable::MutableSink;
use crate::reconcile::{reconcile, FallbackReason, Reconciliation};

/// A node printed without its original text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fallback {
    pub node: NodeId,
    pub reason: FallbackReason,
}

/// Output of [`print_preserving`].
#[derive(Debug)]
pub struct Printed<S> {
    pub sink: S,
    pub fallbacks: Vec<Fallback>,
}

/// Token sink between the generic printer and the real output.
pub struct Interceptor<'t, 'f, S> {
    tree: &'t SyntaxTree,
    fragments: &'f mut FragmentTree,
    out: MutableSink<S>,
    stack: Vec<FragmentContext>,
    fallbacks: Vec<Fallback>,
}

impl<'t, 'f, S: VerbatimSink> Interceptor<'t, 'f, S> {
    fn new(tree: &'t SyntaxTree, fragments: &'f mut FragmentTree, out: S) -> Self {
        Interceptor {
            tree,
            fragments,
            out: MutableSink::new(out),
            stack: Vec::new(),
            fallbacks: Vec::new(),
        }
    }

    fn on_token(&mut self, event: &TokenEvent<'_>) {
        match self.stack.last_mut() {
            Some(FragmentContext::Scalar(context)) => {
                let mut env = Env {
                    tree: self.tree,
                    fragments: &*self.fragments,
                    sink: &mut self.out,
                };
                context.on_token(event, &mut env);
            }
            Some(FragmentContext::Delegate) | None => self.out.apply(event),
        }
    }

    fn before_scan(&mut self, node: NodeId, role: Option<Role>) {
        if let Some(FragmentContext::Scalar(context)) = self.stack.last_mut() {
            let mut env = Env {
                tree: self.tree,
                fragments: &*self.fragments,
                sink: &mut self.out,
            };
            context.before_scan(node, role, &mut env);
        }
    }

    fn after_scan(&mut self, role: Option<Role>) {
        if let Some(FragmentContext::Scalar(context)) = self.stack.last_mut() {
            context.after_scan(role, &mut self.out);
        }
    }

    /// Push the context of `node`.
    ///
    /// Inside copied text nothing is reconciled: the node's tokens are
    /// muted anyway.
    fn enter<C: ChangeTracker + ?Sized>(&mut self, node: NodeId, changes: &C) {
        if self.out.is_muted() {
            self.stack.push(FragmentContext::Delegate);
            return;
        }
        let kind = self.tree.kind(node);
        match reconcile(self.fragments, kind, node, changes.changed_roles(node)) {
            Reconciliation::Verbatim(first) | Reconciliation::Partial(first) => {
                let fragments = &*self.fragments;
                let chain = std::iter::successors(Some(first), |&fragment| {
                    fragments.next_fragment_of_same_node(fragment)
                })
                .collect();
                let mut env = Env {
                    tree: self.tree,
                    fragments,
                    sink: &mut self.out,
                };
                let context = ScalarContext::new(node, chain, &mut env);
                self.stack.push(FragmentContext::Scalar(context));
            }
            Reconciliation::Fallback(reason) => {
                debug!(?node, %kind, %reason, "printing node without original text");
                self.fallbacks.push(Fallback { node, reason });
                self.stack.push(FragmentContext::Delegate);
            }
        }
    }

    fn leave(&mut self) {
        if let Some(FragmentContext::Scalar(mut context)) = self.stack.pop() {
            let mut env = Env {
                tree: self.tree,
                fragments: &*self.fragments,
                sink: &mut self.out,
            };
            context.finish(&mut env);
            self.out.set_muted(false);
        }
    }
}

impl<S: VerbatimSink> TokenSink for Interceptor<'_, '_, S> {
    fn write_keyword(&mut self, keyword: &str) {
        self.on_token(&TokenEvent::new(SinkMethod::Keyword, keyword));
    }

    fn write_separator(&mut self, separator: &str) {
        self.on_token(&TokenEvent::new(SinkMethod::Separator, separator));
    }

    fn write_operator(&mut self, operator: &str) {
        self.on_token(&TokenEvent::new(SinkMethod::Operator, operator));
    }

    fn write_identifier(&mut self, identifier: &str) {
        self.on_token(&TokenEvent::new(SinkMethod::Identifier, identifier));
    }

    fn write_literal(&mut self, literal: &str) {
        self.on_token(&TokenEvent::new(SinkMethod::Literal, literal));
    }

    fn write_comment(&mut self, comment: &str) {
        self.on_token(&TokenEvent::new(SinkMethod::Comment, comment));
    }

    fn write_code_snippet(&mut self, snippet: &str) {
        self.on_token(&TokenEvent::new(SinkMethod::CodeSnippet, snippet));
    }

    fn write_space(&mut self) {
        self.on_token(&TokenEvent::bare(SinkMethod::Space));
    }

    fn writeln(&mut self) {
        self.on_token(&TokenEvent::bare(SinkMethod::Newline));
    }

    fn inc_tab(&mut self) {
        self.on_token(&TokenEvent::bare(SinkMethod::IncTab));
    }

    fn dec_tab(&mut self) {
        self.on_token(&TokenEvent::bare(SinkMethod::DecTab));
    }
}

/// Printer that reuses original text for unchanged parts of the tree.
pub struct SplicingPrinter<'t, 'f, S, C> {
    tree: &'t SyntaxTree,
    changes: &'t C,
    sink: Interceptor<'t, 'f, S>,
}

impl<'t, 'f, S: VerbatimSink, C: ChangeTracker> SplicingPrinter<'t, 'f, S, C> {
    pub fn new(tree: &'t SyntaxTree, changes: &'t C, fragments: &'f mut FragmentTree, sink: S) -> Self {
        SplicingPrinter {
            tree,
            changes,
            sink: Interceptor::new(tree, fragments, sink),
        }
    }

    pub fn finish(self) -> Printed<S> {
        Printed {
            sink: self.sink.out.into_inner(),
            fallbacks: self.sink.fallbacks,
        }
    }
}

impl<'t, 'f, S: VerbatimSink, C: ChangeTracker> Scan<'t> for SplicingPrinter<'t, 'f, S, C> {
    type Sink = Interceptor<'t, 'f, S>;

    fn tree(&self) -> &'t SyntaxTree {
        self.tree
    }

    fn sink(&mut self) -> &mut Self::Sink {
        &mut self.sink
    }

    fn scan(&mut self, node: NodeId) {
        let role = self.tree.node(node).role();
        self.sink.before_scan(node, role);
        self.sink.enter(node, self.changes);
        print_node(self, node);
        self.sink.leave();
        self.sink.after_scan(role);
    }
}

/// Print `roots`, all from the file of `fragments`, reusing original text
/// wherever `changes` reports nothing.
#[tracing::instrument(level = "debug", skip_all, fields(file = ?fragments.file(), roots = roots.len()))]
pub fn print_preserving<S: VerbatimSink, C: ChangeTracker>(
    tree: &SyntaxTree,
    changes: &C,
    fragments: &mut FragmentTree,
    roots: &[NodeId],
    sink: S,
) -> Printed<S> {
    let mut printer = SplicingPrinter::new(tree, changes, fragments, sink);
    for &root in roots {
        printer.scan(root);
    }
    let printed = printer.finish();
    debug!(fallbacks = printed.fallbacks.len(), "printed with original text");
    printed
}
