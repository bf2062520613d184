#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Position tests for the parser.

use pretty_assertions::assert_eq;
use tessel_ir::{Modifier, NodeId, NodeKind, Role, SourcePosition, Span, SyntaxTree};
use tessel_parse::{parse_source, ParseError};

fn parse(text: &str) -> (SyntaxTree, NodeId) {
    let mut tree = SyntaxTree::new();
    let root = parse_source(&mut tree, "Test.java", text).expect("parse failed");
    (tree, root)
}

fn text_of<'a>(tree: &SyntaxTree, text: &'a str, node: NodeId) -> &'a str {
    let span = tree.position(node).span().expect("node has a position");
    &text[span.to_range()]
}

#[test]
fn compilation_unit_covers_file() {
    let text = "  class A {}\n";
    let (tree, root) = parse(text);
    assert_eq!(tree.kind(root), NodeKind::CompilationUnit);
    assert_eq!(tree.position(root).span(), Some(Span::new(0, 13)));
    let file = tree.position(root).file().unwrap();
    assert_eq!(tree.file_root(file), Some(root));
}

#[test]
fn class_positions() {
    let text = "public final class Foo extends Bar implements Baz { }";
    let (tree, root) = parse(text);
    let class = tree.child_on(root, Role::DeclaredType).unwrap();
    let node = tree.node(class);

    assert_eq!(node.kind(), NodeKind::Class);
    assert_eq!(node.name(), Some("Foo"));
    assert_eq!(node.modifiers(), &[Modifier::Public, Modifier::Final]);

    let SourcePosition::BodyHolder {
        span,
        modifiers,
        name,
        body,
        ..
    } = tree.position(class)
    else {
        panic!("expected a body holder position");
    };
    assert_eq!(&text[span.to_range()], text);
    assert_eq!(&text[modifiers.to_range()], "public final");
    assert_eq!(&text[name.to_range()], "Foo");
    assert_eq!(&text[body.to_range()], "{ }");

    let sup = tree.child_on(class, Role::SuperType).unwrap();
    assert_eq!(text_of(&tree, text, sup), "Bar");
    let iface = tree.child_on(class, Role::Interface).unwrap();
    assert_eq!(text_of(&tree, text, iface), "Baz");
}

#[test]
fn declaration_without_modifiers_has_empty_modifier_range() {
    let text = "class A { int x; }";
    let (tree, root) = parse(text);
    let class = tree.child_on(root, Role::DeclaredType).unwrap();
    assert_eq!(tree.position(class).modifiers(), Some(Span::new(0, 0)));

    let field = tree.child_on(class, Role::TypeMember).unwrap();
    assert_eq!(tree.kind(field), NodeKind::Field);
    assert_eq!(text_of(&tree, text, field), "int x;");
    assert_eq!(tree.position(field).modifiers(), Some(Span::new(10, 10)));
    assert_eq!(tree.position(field).name(), Some(Span::new(14, 15)));
}

#[test]
fn method_positions() {
    let text = "class A {\n    @Override\n    public <T> List<T> get(int i) throws E { return i; }\n}";
    let (tree, root) = parse(text);
    let class = tree.child_on(root, Role::DeclaredType).unwrap();
    let method = tree.child_on(class, Role::TypeMember).unwrap();

    assert_eq!(tree.kind(method), NodeKind::Method);
    let pos = tree.position(method);
    assert_eq!(
        &text[pos.span().unwrap().to_range()],
        "@Override\n    public <T> List<T> get(int i) throws E { return i; }"
    );
    assert_eq!(&text[pos.modifiers().unwrap().to_range()], "@Override\n    public");
    assert_eq!(&text[pos.name().unwrap().to_range()], "get");
    assert_eq!(&text[pos.body().unwrap().to_range()], "{ return i; }");

    let ty = tree.child_on(method, Role::Type).unwrap();
    assert_eq!(text_of(&tree, text, ty), "List<T>");
    let param = tree.child_on(method, Role::Parameter).unwrap();
    assert_eq!(text_of(&tree, text, param), "int i");
    assert!(tree.child_on(method, Role::Annotation).is_some());
    assert!(tree.child_on(method, Role::TypeParameter).is_some());
    assert!(tree.child_on(method, Role::Thrown).is_some());
}

#[test]
fn constructor_and_abstract_method() {
    let text = "class A { A(int x) { this_x = x; } abstract void run(); }";
    let (tree, root) = parse(text);
    let class = tree.child_on(root, Role::DeclaredType).unwrap();
    let members: Vec<_> = tree.children_on(class, Role::TypeMember).collect();

    assert_eq!(tree.kind(members[0]), NodeKind::Constructor);
    assert!(tree.child_on(members[0], Role::Type).is_none());
    assert!(tree.position(members[0]).body().is_some());

    assert_eq!(tree.kind(members[1]), NodeKind::Method);
    assert!(matches!(
        tree.position(members[1]),
        SourcePosition::Declaration { .. }
    ));
    assert_eq!(text_of(&tree, text, members[1]), "abstract void run();");
}

#[test]
fn statements() {
    let text = "class A { void f() { int y = a + b * 2; y = 3; log(y); return y; } }";
    let (tree, root) = parse(text);
    let class = tree.child_on(root, Role::DeclaredType).unwrap();
    let method = tree.child_on(class, Role::TypeMember).unwrap();
    let body = tree.child_on(method, Role::Body).unwrap();
    let stmts: Vec<_> = tree.children_on(body, Role::Statement).collect();

    let kinds: Vec<_> = stmts.iter().map(|&s| tree.kind(s)).collect();
    assert_eq!(
        kinds,
        vec![
            NodeKind::LocalVariable,
            NodeKind::Assignment,
            NodeKind::Invocation,
            NodeKind::Return,
        ]
    );
    assert_eq!(text_of(&tree, text, stmts[0]), "int y = a + b * 2;");
    assert_eq!(text_of(&tree, text, stmts[1]), "y = 3");
    assert_eq!(text_of(&tree, text, stmts[2]), "log(y)");
    assert_eq!(text_of(&tree, text, stmts[3]), "return y;");

    let init = tree.child_on(stmts[0], Role::DefaultExpression).unwrap();
    assert_eq!(tree.node(init).text(), Some("+"));
    let right = tree.child_on(init, Role::RightOperand).unwrap();
    assert_eq!(text_of(&tree, text, right), "b * 2");
}

#[test]
fn chained_invocation() {
    let text = "class A { void f() { out.print(1, \"s\"); } }";
    let (tree, root) = parse(text);
    let class = tree.child_on(root, Role::DeclaredType).unwrap();
    let method = tree.child_on(class, Role::TypeMember).unwrap();
    let body = tree.child_on(method, Role::Body).unwrap();
    let call = tree.child_on(body, Role::Statement).unwrap();

    assert_eq!(tree.node(call).name(), Some("print"));
    assert_eq!(text_of(&tree, text, call), "out.print(1, \"s\")");
    assert_eq!(tree.children_on(call, Role::Argument).count(), 2);
    let target = tree.child_on(call, Role::Expression).unwrap();
    assert_eq!(tree.kind(target), NodeKind::VariableRead);
}

#[test]
fn comments_between_elements_become_nodes() {
    let text = "// header\nclass A {\n    // first\n    int x; /* trailing */\n}\n";
    let (tree, root) = parse(text);

    let top = tree.list_elements(root, Role::DeclaredType);
    assert_eq!(tree.kind(top[0]), NodeKind::Comment);
    assert_eq!(tree.node(top[0]).text(), Some("// header"));

    let class = top[1];
    let members = tree.list_elements(class, Role::TypeMember);
    let kinds: Vec<_> = members.iter().map(|&m| tree.kind(m)).collect();
    assert_eq!(
        kinds,
        vec![NodeKind::Comment, NodeKind::Field, NodeKind::Comment]
    );
    assert_eq!(text_of(&tree, text, members[2]), "/* trailing */");
}

#[test]
fn comment_inside_declaration_is_skipped() {
    let text = "class A { int /* odd */ x; }";
    let (tree, root) = parse(text);
    let class = tree.child_on(root, Role::DeclaredType).unwrap();
    assert_eq!(tree.list_elements(class, Role::TypeMember).len(), 1);
}

#[test]
fn errors() {
    let mut tree = SyntaxTree::new();
    let err = parse_source(&mut tree, "Bad.java", "class { }").unwrap_err();
    assert!(matches!(err, ParseError::Unexpected { expected: "identifier", .. }));
    assert_eq!(err.span(), Some(Span::new(6, 7)));

    let err = parse_source(&mut tree, "Bad.java", "class A {").unwrap_err();
    assert!(matches!(err, ParseError::UnexpectedEof { .. }));

    let err = parse_source(&mut tree, "Bad.java", "class A { # }").unwrap_err();
    assert!(matches!(err, ParseError::Lex(_)));
}
