//! Change tracking.
//!
//! The collector remembers which roles of which nodes were touched since
//! parse time. Recording is done by [`SyntaxTree`](crate::SyntaxTree) so a
//! change also reaches every ancestor under the role of the changed subtree.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::{NodeId, Role};

/// Read-only view of recorded changes.
///
/// Queries have no side effects and may be repeated freely.
pub trait ChangeTracker {
    /// Roles of `node` changed since parsing; empty for untouched nodes.
    ///
    /// The returned set is a working copy the caller may consume.
    fn changed_roles(&self, node: NodeId) -> FxHashSet<Role>;
}

/// Map from node to the set of its changed roles.
#[derive(Clone, Debug, Default)]
pub struct ChangeCollector {
    changes: FxHashMap<NodeId, FxHashSet<Role>>,
}

impl ChangeCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `role` of `node` changed.
    pub fn record(&mut self, node: NodeId, role: Role) {
        self.changes.entry(node).or_default().insert(role);
    }

    pub fn is_changed(&self, node: NodeId) -> bool {
        self.changes.get(&node).is_some_and(|roles| !roles.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Number of nodes with at least one changed role.
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// Forget every recorded change, e.g. after the output was written.
    pub fn clear(&mut self) {
        self.changes.clear();
    }
}

impl ChangeTracker for ChangeCollector {
    fn changed_roles(&self, node: NodeId) -> FxHashSet<Role> {
        self.changes.get(&node).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests;
