use pretty_assertions::assert_eq;
use tessel_ir::{ChangeTracker, SyntaxTree};
use tessel_parse::parse_source;

use super::*;
use crate::build_fragment_tree;
use crate::fragment::FragmentKind;

fn roles(list: &[Role]) -> FxHashSet<Role> {
    list.iter().copied().collect()
}

struct Fixture {
    tree: SyntaxTree,
    fragments: FragmentTree,
    field: NodeId,
}

fn fixture() -> Fixture {
    let mut tree = SyntaxTree::new();
    let root = parse_source(&mut tree, "A.java", "class A { public int x = 1; }").unwrap();
    let class = tree.child_on(root, Role::DeclaredType).unwrap();
    let field = tree.child_on(class, Role::TypeMember).unwrap();
    let fragments = build_fragment_tree(&tree, root).unwrap();
    Fixture {
        tree,
        fragments,
        field,
    }
}

fn modified_kinds(fragments: &FragmentTree, main: FragmentId) -> Vec<FragmentKind> {
    fragments
        .sub_parts(main)
        .into_iter()
        .filter(|&part| fragments.get(part).is_modified())
        .map(|part| fragments.get(part).kind())
        .collect()
}

#[test]
fn test_unchanged_node_is_verbatim() {
    let Fixture {
        tree,
        mut fragments,
        field,
    } = fixture();
    let main = fragments.fragment_of_node(field).unwrap();
    let result = reconcile(&mut fragments, tree.kind(field), field, FxHashSet::default());
    assert_eq!(result, Reconciliation::Verbatim(main));
    assert!(!fragments.get(main).is_modified());
}

#[test]
fn test_name_change_marks_only_name() {
    let Fixture {
        tree,
        mut fragments,
        field,
    } = fixture();
    let main = fragments.fragment_of_node(field).unwrap();
    let result = reconcile(&mut fragments, tree.kind(field), field, roles(&[Role::Name]));
    let first = fragments.sub_parts(main)[0];
    assert_eq!(result, Reconciliation::Partial(first));
    assert_eq!(modified_kinds(&fragments, main), vec![FragmentKind::Name]);
    assert!(fragments.get(first).descriptor().is_some());
}

#[test]
fn test_several_roles_mark_several_parts() {
    let Fixture {
        tree,
        mut fragments,
        field,
    } = fixture();
    let main = fragments.fragment_of_node(field).unwrap();
    reconcile(
        &mut fragments,
        tree.kind(field),
        field,
        roles(&[Role::Modifier, Role::Type, Role::DefaultExpression]),
    );
    assert_eq!(
        modified_kinds(&fragments, main),
        vec![
            FragmentKind::Modifiers,
            FragmentKind::BeforeName,
            FragmentKind::AfterName
        ]
    );
}

#[test]
fn test_unmapped_role_falls_back() {
    let Fixture {
        tree,
        mut fragments,
        field,
    } = fixture();
    let result = reconcile(
        &mut fragments,
        tree.kind(field),
        field,
        roles(&[Role::Name, Role::Thrown, Role::Body]),
    );
    assert_eq!(
        result,
        Reconciliation::Fallback(FallbackReason::UnmappedRoles(vec![Role::Thrown, Role::Body]))
    );
}

#[test]
fn test_rerun_resets_previous_marks() {
    let Fixture {
        tree,
        mut fragments,
        field,
    } = fixture();
    let main = fragments.fragment_of_node(field).unwrap();
    reconcile(&mut fragments, tree.kind(field), field, roles(&[Role::Name]));
    reconcile(&mut fragments, tree.kind(field), field, roles(&[Role::Type]));
    assert_eq!(modified_kinds(&fragments, main), vec![FragmentKind::BeforeName]);
}

#[test]
fn test_leaf_node_change_is_not_decomposed() {
    let Fixture {
        mut tree,
        mut fragments,
        field,
    } = fixture();
    let literal = tree.child_on(field, Role::DefaultExpression).unwrap();
    tree.set_text(literal, "2");
    let changed = tree.changes().changed_roles(literal);
    assert_eq!(
        reconcile(&mut fragments, NodeKind::Literal, literal, changed),
        Reconciliation::Fallback(FallbackReason::NotDecomposed)
    );
}

#[test]
fn test_compilation_unit_uses_list_descriptor() {
    let Fixture {
        tree,
        mut fragments,
        ..
    } = fixture();
    let root = tree.file_root(fragments.file()).unwrap();
    let main = fragments.fragment_of_node(root).unwrap();
    let result = reconcile(
        &mut fragments,
        NodeKind::CompilationUnit,
        root,
        roles(&[Role::DeclaredType]),
    );
    assert_eq!(result, Reconciliation::Partial(main));
    let fragment = fragments.get(main);
    assert!(fragment.is_modified());
    assert_eq!(
        fragment.descriptor().and_then(FragmentDescriptor::list_role),
        Some(Role::DeclaredType)
    );
}

#[test]
fn test_node_without_fragment() {
    let Fixture {
        mut tree,
        mut fragments,
        ..
    } = fixture();
    let fresh = tree.alloc(tessel_ir::NodeSpec::new(NodeKind::Field));
    assert_eq!(
        reconcile(&mut fragments, NodeKind::Field, fresh, roles(&[Role::Name])),
        Reconciliation::Fallback(FallbackReason::NoSource)
    );
}

#[test]
fn test_fallback_reason_display() {
    let reason = FallbackReason::UnmappedRoles(vec![Role::Thrown, Role::Body]);
    assert_eq!(
        reason.to_string(),
        format!("unmapped roles: {} {}", Role::Thrown, Role::Body)
    );
}
