use pretty_assertions::assert_eq;
use tessel_ir::{NodeKind, NodeSpec, Role, SourceFileId};
use tessel_parse::parse_source;

use super::*;

fn two_files() -> (SyntaxTree, NodeId, NodeId) {
    let mut tree = SyntaxTree::new();
    let a = parse_source(&mut tree, "A.java", "class A { int x; }\n").unwrap();
    let b = parse_source(&mut tree, "B.java", "class B {\n    int y;\n}\n").unwrap();
    (tree, a, b)
}

fn file_of(tree: &SyntaxTree, root: NodeId) -> SourceFileId {
    tree.position(root).file().unwrap()
}

#[test]
fn test_fragments_are_built_per_file() {
    let (tree, a, b) = two_files();
    let (file_a, file_b) = (file_of(&tree, a), file_of(&tree, b));
    let session = PreservingSession::new(tree);

    let fragments = session.fragments(file_a).unwrap();
    assert_eq!(fragments.file(), file_a);
    assert_eq!(fragments.text(), "class A { int x; }\n");
    assert!(session.fragments(file_b).is_some());
    assert!(session.build_error(file_a).is_none());
}

#[test]
fn test_unknown_file_prints_nothing() {
    let (tree, _, _) = two_files();
    let mut session = PreservingSession::new(tree);
    assert!(session.print_file(SourceFileId::from_raw(99)).is_none());
    assert!(session.fragments(SourceFileId::from_raw(99)).is_none());
}

#[test]
fn test_unedited_session_reproduces_every_file() {
    let (tree, _, _) = two_files();
    let mut session = PreservingSession::new(tree);
    let texts: Vec<_> = session
        .print_all()
        .into_iter()
        .map(|report| {
            assert!(report.is_fully_preserved());
            report.text
        })
        .collect();
    assert_eq!(texts, vec!["class A { int x; }\n", "class B {\n    int y;\n}\n"]);
}

#[test]
fn test_broken_file_falls_back_alone() {
    let (mut tree, a, b) = two_files();
    let class_a = tree.child_on(a, Role::DeclaredType).unwrap();
    let foreign = tree.alloc(
        NodeSpec::new(NodeKind::Field)
            .name("z")
            .position(tree.position(b)),
    );
    tree.attach(class_a, Role::TypeMember, foreign);

    let file_a = file_of(&tree, a);
    let mut session = PreservingSession::new(tree);
    assert!(matches!(
        session.build_error(file_a),
        Some(FragmentError::ForeignSourceFile { .. })
    ));

    let reports = session.print_all();
    assert!(reports[0].file_fallback.is_some());
    assert!(reports[1].file_fallback.is_none());
    assert_eq!(reports[1].text, "class B {\n    int y;\n}\n");
}
