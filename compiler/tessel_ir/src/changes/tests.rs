use super::*;

#[test]
fn test_untouched_node_has_no_roles() {
    let changes = ChangeCollector::new();
    assert!(changes.changed_roles(NodeId::from_raw(3)).is_empty());
    assert!(!changes.is_changed(NodeId::from_raw(3)));
    assert!(changes.is_empty());
}

#[test]
fn test_record_accumulates_roles() {
    let mut changes = ChangeCollector::new();
    let node = NodeId::from_raw(1);
    changes.record(node, Role::Name);
    changes.record(node, Role::Modifier);
    changes.record(node, Role::Name);

    let roles = changes.changed_roles(node);
    assert_eq!(roles.len(), 2);
    assert!(roles.contains(&Role::Name));
    assert!(roles.contains(&Role::Modifier));
    assert_eq!(changes.len(), 1);
}

#[test]
fn test_query_returns_working_copy() {
    let mut changes = ChangeCollector::new();
    let node = NodeId::from_raw(0);
    changes.record(node, Role::Body);

    let mut roles = changes.changed_roles(node);
    roles.remove(&Role::Body);
    assert!(changes.changed_roles(node).contains(&Role::Body));
}

#[test]
fn test_clear() {
    let mut changes = ChangeCollector::new();
    changes.record(NodeId::from_raw(0), Role::Body);
    changes.clear();
    assert!(changes.is_empty());
}
