//! Reconciliation of recorded changes against a node's fragments.
//!
//! Each changed role must be covered by a sub-part descriptor. Covered
//! sub-parts are marked modified and will be regenerated; the rest are
//! copied from the original text.

use std::fmt;

use rustc_hash::FxHashSet;
use tessel_ir::{NodeId, NodeKind, Role};
use tracing::debug;

use crate::fragment::{FragmentId, FragmentTree};
use crate::registry::{self, FragmentDescriptor};

/// Why a node is printed without its original text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FallbackReason {
    /// The node has no fragment, e.g. it was created after parsing.
    NoSource,
    /// The node changed but has no sub-parts and no whole-node descriptor.
    NotDecomposed,
    /// The node's kind has no descriptor table.
    UnknownKind(NodeKind),
    /// Changed roles that no sub-part covers.
    UnmappedRoles(Vec<Role>),
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackReason::NoSource => f.write_str("no original source"),
            FallbackReason::NotDecomposed => f.write_str("changed node without sub-parts"),
            FallbackReason::UnknownKind(kind) => write!(f, "no descriptors for {kind}"),
            FallbackReason::UnmappedRoles(roles) => {
                f.write_str("unmapped roles:")?;
                for role in roles {
                    write!(f, " {role}")?;
                }
                Ok(())
            }
        }
    }
}

/// Outcome of reconciling one node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reconciliation {
    /// Nothing changed: the MAIN fragment is copied as is.
    Verbatim(FragmentId),
    /// Some fragments are regenerated; printing walks the chain starting here.
    Partial(FragmentId),
    /// The node is printed by the generic printer.
    Fallback(FallbackReason),
}

impl Reconciliation {
    /// First fragment of the chain to print, unless falling back.
    pub fn first(&self) -> Option<FragmentId> {
        match self {
            Reconciliation::Verbatim(first) | Reconciliation::Partial(first) => Some(*first),
            Reconciliation::Fallback(_) => None,
        }
    }
}

/// Mark the fragments of `node` for printing, given its changed roles.
///
/// Modified flags and descriptors of previous runs are overwritten.
pub fn reconcile(
    fragments: &mut FragmentTree,
    kind: NodeKind,
    node: NodeId,
    mut changed: FxHashSet<Role>,
) -> Reconciliation {
    let Some(main) = fragments.fragment_of_node(node) else {
        return Reconciliation::Fallback(FallbackReason::NoSource);
    };
    if changed.is_empty() {
        fragments.mark(main, false, None);
        return Reconciliation::Verbatim(main);
    }

    let parts = fragments.sub_parts(main);
    if parts.len() < 2 {
        let Some(descriptor) = registry::main_descriptor(kind) else {
            return Reconciliation::Fallback(FallbackReason::NotDecomposed);
        };
        apply_descriptor(fragments, main, descriptor, &mut changed);
        return finish(node, main, changed);
    }

    if registry::descriptors(kind).is_none() {
        return Reconciliation::Fallback(FallbackReason::UnknownKind(kind));
    }
    fragments.mark(main, true, None);
    for &part in &parts {
        match registry::descriptor(kind, fragments.get(part).kind()) {
            Some(descriptor) => apply_descriptor(fragments, part, descriptor, &mut changed),
            None => fragments.mark(part, false, None),
        }
    }
    finish(node, parts[0], changed)
}

/// Remove the roles `descriptor` covers from `changed` and mark `id`
/// modified if any were present.
fn apply_descriptor(
    fragments: &mut FragmentTree,
    id: FragmentId,
    descriptor: &'static FragmentDescriptor,
    changed: &mut FxHashSet<Role>,
) {
    let mut modified = false;
    for role in descriptor.roles() {
        modified |= changed.remove(role);
    }
    fragments.mark(id, modified, Some(descriptor));
}

fn finish(node: NodeId, first: FragmentId, changed: FxHashSet<Role>) -> Reconciliation {
    if changed.is_empty() {
        return Reconciliation::Partial(first);
    }
    let mut roles: Vec<Role> = changed.into_iter().collect();
    roles.sort_unstable();
    debug!(?node, ?roles, "changed roles without a fragment");
    Reconciliation::Fallback(FallbackReason::UnmappedRoles(roles))
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
