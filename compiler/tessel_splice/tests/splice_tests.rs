#![allow(clippy::unwrap_used, clippy::expect_used)]

//! End-to-end printing of edited trees.

use pretty_assertions::assert_eq;
use tessel_ir::{Modifier, NodeId, NodeKind, NodeSpec, Role, SourceFileId, SyntaxTree};
use tessel_parse::parse_source;
use tessel_print::{print_tree, PrintConfig};
use tessel_splice::{init_tracing, FallbackReason, FragmentError, PreservingSession, PrintReport};

struct Session {
    session: PreservingSession,
    root: NodeId,
    file: SourceFileId,
}

fn session(text: &str) -> Session {
    init_tracing();
    let mut tree = SyntaxTree::new();
    let root = parse_source(&mut tree, "Test.java", text).expect("parse failed");
    let file = tree.position(root).file().unwrap();
    Session {
        session: PreservingSession::new(tree),
        root,
        file,
    }
}

impl Session {
    fn tree(&mut self) -> &mut SyntaxTree {
        self.session.tree_mut()
    }

    fn class(&self) -> NodeId {
        self.session
            .tree()
            .child_on(self.root, Role::DeclaredType)
            .unwrap()
    }

    fn member(&self, index: usize) -> NodeId {
        self.session
            .tree()
            .list_elements(self.class(), Role::TypeMember)[index]
    }

    fn report(&mut self) -> PrintReport {
        self.session.print_file(self.file).unwrap()
    }

    fn print(&mut self) -> String {
        self.report().text
    }
}

fn new_field(tree: &mut SyntaxTree, ty: &str, name: &str) -> NodeId {
    let field = tree.alloc(NodeSpec::new(NodeKind::Field).name(name));
    let ty = tree.alloc(NodeSpec::new(NodeKind::TypeReference).name(ty));
    tree.attach(field, Role::Type, ty);
    field
}

const THREE: &str = "class A {\n    int a;\n    int b;\n    int c;\n}\n";

#[test]
fn unchanged_file_is_reproduced() {
    let text = "// leading\n\n@Entity\npublic final class Foo<T> extends Base implements Api, Other {\n\n    /* counter */\n    private static int count = 0 ;\n\n    public Foo( int start )  throws Problem {\n        count = start;\n        return;\n    }\n\n    <R> R map(T value) ;\n}\n\ninterface Api extends Marker { }\n";
    let mut s = session(text);
    let report = s.report();
    assert_eq!(report.text, text);
    assert!(report.is_fully_preserved());
}

#[test]
fn rename_field() {
    let mut s = session("class A { int x; int y; }");
    let x = s.member(0);
    s.tree().set_name(x, "z");
    assert_eq!(s.print(), "class A { int z; int y; }");
}

#[test]
fn rename_class_keeps_header_layout() {
    let mut s = session("/* c */\npublic  class A extends B {\n}\n");
    let class = s.class();
    s.tree().set_name(class, "C");
    assert_eq!(s.print(), "/* c */\npublic  class C extends B {\n}\n");
}

#[test]
fn append_member() {
    let mut s = session("class A {\n    int x;\n}");
    let class = s.class();
    let field = new_field(s.tree(), "int", "n");
    s.tree().insert_child(class, Role::TypeMember, 1, field);
    assert_eq!(s.print(), "class A {\n    int x;\n    int n;\n}");
}

#[test]
fn prepend_member() {
    let mut s = session("class A {\n    int x;\n}");
    let class = s.class();
    let field = new_field(s.tree(), "int", "n");
    s.tree().insert_child(class, Role::TypeMember, 0, field);
    assert_eq!(s.print(), "class A {\n    int n;\n    int x;\n}");
}

#[test]
fn add_member_to_empty_class() {
    let mut s = session("class A {}");
    let class = s.class();
    let field = new_field(s.tree(), "String", "name");
    s.tree().insert_child(class, Role::TypeMember, 0, field);
    assert_eq!(s.print(), "class A {\n    String name;\n}");
}

#[test]
fn remove_middle_member() {
    let mut s = session(THREE);
    let (class, b) = (s.class(), s.member(1));
    assert!(s.tree().remove_child(class, b));
    assert_eq!(s.print(), "class A {\n    int a;\n    int c;\n}\n");
}

#[test]
fn remove_first_member() {
    let mut s = session(THREE);
    let (class, a) = (s.class(), s.member(0));
    s.tree().remove_child(class, a);
    assert_eq!(s.print(), "class A {\n    int b;\n    int c;\n}\n");
}

#[test]
fn remove_last_member() {
    let mut s = session(THREE);
    let (class, c) = (s.class(), s.member(2));
    s.tree().remove_child(class, c);
    assert_eq!(s.print(), "class A {\n    int a;\n    int b;\n}\n");
}

#[test]
fn remove_all_members() {
    let mut s = session("class A { int x; }");
    let (class, x) = (s.class(), s.member(0));
    s.tree().remove_child(class, x);
    assert_eq!(s.print(), "class A { }");
}

#[test]
fn comments_between_members_survive_insertion() {
    let mut s = session("class A {\n    // first\n    int x;\n}\n");
    let class = s.class();
    let field = new_field(s.tree(), "int", "n");
    s.tree().insert_child(class, Role::TypeMember, 2, field);
    assert_eq!(s.print(), "class A {\n    // first\n    int x;\n    int n;\n}\n");
}

#[test]
fn add_modifier() {
    let mut s = session("class A {\n    int x;\n}");
    let x = s.member(0);
    s.tree().set_modifiers(x, [Modifier::Private]);
    assert_eq!(s.print(), "class A {\n    private int x;\n}");
}

#[test]
fn remove_modifiers() {
    let mut s = session("class A {\n    public  static int x;\n}");
    let x = s.member(0);
    s.tree().set_modifiers(x, []);
    assert_eq!(s.print(), "class A {\n    int x;\n}");
}

#[test]
fn change_field_type() {
    let mut s = session("class A {\n    int x = 1;\n}");
    let x = s.member(0);
    let long = s
        .tree()
        .alloc(NodeSpec::new(NodeKind::TypeReference).name("long"));
    s.tree().set_child(x, Role::Type, Some(long));
    assert_eq!(s.print(), "class A {\n    long x = 1;\n}");
}

#[test]
fn rename_constructor() {
    let mut s = session("class A {\n    A() {\n    }\n}");
    let ctor = s.member(0);
    s.tree().set_name(ctor, "B");
    assert_eq!(s.print(), "class A {\n    B() {\n    }\n}");
}

#[test]
fn rename_parameter() {
    let mut s = session("class A {\n    void f(final int a) { }\n}");
    let method = s.member(0);
    let param = s.session.tree().child_on(method, Role::Parameter).unwrap();
    s.tree().set_name(param, "b");
    assert_eq!(s.print(), "class A {\n    void f(final int b) { }\n}");
}

#[test]
fn append_statement() {
    let text = "class A {\n    void f() {\n        a();\n        b();\n    }\n}";
    let mut s = session(text);
    let method = s.member(0);
    let body = s.session.tree().child_on(method, Role::Body).unwrap();
    let call = s
        .tree()
        .alloc(NodeSpec::new(NodeKind::Invocation).name("c"));
    s.tree().insert_child(body, Role::Statement, 2, call);
    assert_eq!(
        s.print(),
        "class A {\n    void f() {\n        a();\n        b();\n        c();\n    }\n}"
    );
}

#[test]
fn empty_a_block() {
    let mut s = session("class A {\n    void f() {\n        a();\n    }\n}");
    let method = s.member(0);
    let body = s.session.tree().child_on(method, Role::Body).unwrap();
    let call = s.session.tree().child_on(body, Role::Statement).unwrap();
    s.tree().remove_child(body, call);
    assert_eq!(s.print(), "class A {\n    void f() {\n    }\n}");
}

#[test]
fn add_class_to_compilation_unit() {
    let mut s = session("class A {}\n");
    let root = s.root;
    let class = s.tree().alloc(NodeSpec::new(NodeKind::Class).name("B"));
    s.tree().insert_child(root, Role::DeclaredType, 1, class);
    assert_eq!(s.print(), "class A {}\n\nclass B {}\n");
}

#[test]
fn changed_literal_is_reported() {
    let mut s = session("class A { int x = 1; }");
    let x = s.member(0);
    let literal = s
        .session
        .tree()
        .child_on(x, Role::DefaultExpression)
        .unwrap();
    s.tree().set_text(literal, "42");
    let report = s.report();
    assert_eq!(report.text, "class A { int x = 42; }");
    assert_eq!(report.fallbacks.len(), 1);
    assert_eq!(report.fallbacks[0].node, literal);
    assert_eq!(report.fallbacks[0].reason, FallbackReason::NotDecomposed);
    assert!(report.file_fallback.is_none());
}

#[test]
fn foreign_node_falls_back_for_whole_file() {
    let mut tree = SyntaxTree::new();
    let a = parse_source(&mut tree, "A.java", "class A { }").unwrap();
    let b = parse_source(&mut tree, "B.java", "class B { int y; }").unwrap();
    let class_a = tree.child_on(a, Role::DeclaredType).unwrap();
    let class_b = tree.child_on(b, Role::DeclaredType).unwrap();
    let y = tree.child_on(class_b, Role::TypeMember).unwrap();
    let copy = tree.alloc(
        NodeSpec::new(NodeKind::Field)
            .name("y")
            .position(tree.position(y)),
    );
    tree.attach(class_a, Role::TypeMember, copy);
    let file = tree.position(a).file().unwrap();
    let expected = print_tree(&tree, a, PrintConfig::default());

    let mut session = PreservingSession::new(tree);
    let report = session.print_file(file).unwrap();
    assert!(matches!(
        report.file_fallback,
        Some(FragmentError::ForeignSourceFile { node, .. }) if node == copy
    ));
    assert_eq!(report.text, expected);
}

#[test]
fn print_all_files_in_order() {
    let mut tree = SyntaxTree::new();
    let texts = [
        "class A { int a; }\n",
        "class B {\n    int b;\n}\n",
        "interface C { }\n",
    ];
    let roots: Vec<NodeId> = texts
        .iter()
        .enumerate()
        .map(|(i, text)| parse_source(&mut tree, &format!("F{i}.java"), text).unwrap())
        .collect();
    let class_b = tree.child_on(roots[1], Role::DeclaredType).unwrap();
    let field = tree.child_on(class_b, Role::TypeMember).unwrap();
    tree.set_name(field, "renamed");

    let mut session = PreservingSession::new(tree);
    let printed: Vec<String> = session
        .print_all()
        .into_iter()
        .map(|report| report.text)
        .collect();
    assert_eq!(
        printed,
        vec![
            "class A { int a; }\n".to_owned(),
            "class B {\n    int renamed;\n}\n".to_owned(),
            "interface C { }\n".to_owned(),
        ]
    );
}

#[test]
fn print_selected_nodes() {
    let mut s = session("class A { }\n\nclass B { int x; }\n");
    let classes = s.session.tree().list_elements(s.root, Role::DeclaredType);
    let x = s.session.tree().child_on(classes[1], Role::TypeMember).unwrap();
    s.tree().set_name(x, "y");
    let file = s.file;
    let report = s.session.print_nodes(file, &classes[1..]).unwrap();
    assert_eq!(report.text, "class B { int y; }");
}

#[test]
fn tracing_init_is_repeatable() {
    init_tracing();
    init_tracing();
    let mut s = session("/* header */\nclass A { }\n");
    assert_eq!(s.report().text, "/* header */\nclass A { }\n");
}
