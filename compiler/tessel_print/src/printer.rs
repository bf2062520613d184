//! Generic tree printer.
//!
//! [`print_node`] emits the tokens of one node and recurses into its children
//! through [`Scan::scan`]. Implementors that override `scan` see every node
//! before and after it is printed, which is how the source-preserving printer
//! hooks in.

use tessel_ir::{NodeId, NodeKind, Role, SyntaxTree};

use crate::{PrintConfig, StringSink, TokenSink};

/// Recursive-descent printing driver.
pub trait Scan<'t> {
    type Sink: TokenSink;

    fn tree(&self) -> &'t SyntaxTree;

    fn sink(&mut self) -> &mut Self::Sink;

    /// Print `node`; implementations end up calling [`print_node`].
    fn scan(&mut self, node: NodeId);
}

/// Emit the tokens of `node`, scanning its children.
pub fn print_node<'t, P: Scan<'t> + ?Sized>(p: &mut P, node: NodeId) {
    let tree = p.tree();
    match tree.kind(node) {
        NodeKind::CompilationUnit => print_compilation_unit(p, node),
        NodeKind::Class | NodeKind::Interface => print_type(p, node),
        NodeKind::Method | NodeKind::Constructor => print_executable(p, node),
        NodeKind::Field | NodeKind::LocalVariable => {
            print_variable(p, node);
            p.sink().write_separator(";");
        }
        NodeKind::Parameter => print_variable(p, node),
        NodeKind::Block => print_block(p, node),
        NodeKind::Return => {
            p.sink().write_keyword("return");
            if let Some(value) = tree.child_on(node, Role::Expression) {
                p.sink().write_space();
                p.scan(value);
            }
            p.sink().write_separator(";");
        }
        NodeKind::Assignment => {
            scan_role(p, node, Role::Assigned);
            p.sink().write_space();
            p.sink().write_operator("=");
            p.sink().write_space();
            scan_role(p, node, Role::Assignment);
        }
        NodeKind::BinaryOperator => {
            scan_role(p, node, Role::LeftOperand);
            p.sink().write_space();
            p.sink().write_operator(text(tree, node));
            p.sink().write_space();
            scan_role(p, node, Role::RightOperand);
        }
        NodeKind::Invocation => {
            if let Some(target) = tree.child_on(node, Role::Expression) {
                p.scan(target);
                p.sink().write_separator(".");
            }
            p.sink().write_identifier(name(tree, node));
            p.sink().write_separator("(");
            scan_separated(p, tree.children_on(node, Role::Argument));
            p.sink().write_separator(")");
        }
        NodeKind::Literal => p.sink().write_literal(text(tree, node)),
        NodeKind::VariableRead | NodeKind::TypeParameter => {
            p.sink().write_identifier(name(tree, node));
        }
        NodeKind::TypeReference => {
            p.sink().write_identifier(name(tree, node));
            print_angle_list(p, node, Role::TypeArgument);
        }
        NodeKind::Annotation => {
            p.sink().write_separator("@");
            p.sink().write_identifier(name(tree, node));
        }
        NodeKind::Comment => p.sink().write_comment(text(tree, node)),
    }
}

fn name(tree: &SyntaxTree, node: NodeId) -> &str {
    tree.node(node).name().unwrap_or_default()
}

fn text(tree: &SyntaxTree, node: NodeId) -> &str {
    tree.node(node).text().unwrap_or_default()
}

fn scan_role<'t, P: Scan<'t> + ?Sized>(p: &mut P, node: NodeId, role: Role) {
    if let Some(child) = p.tree().child_on(node, role) {
        p.scan(child);
    }
}

/// Scan `nodes` separated by `, `.
fn scan_separated<'t, P: Scan<'t> + ?Sized>(p: &mut P, nodes: impl Iterator<Item = NodeId>) {
    for (i, child) in nodes.enumerate() {
        if i > 0 {
            p.sink().write_separator(",");
            p.sink().write_space();
        }
        p.scan(child);
    }
}

/// `<A, B>` for the children on `role`; nothing when there are none.
fn print_angle_list<'t, P: Scan<'t> + ?Sized>(p: &mut P, node: NodeId, role: Role) {
    let tree = p.tree();
    if tree.child_on(node, role).is_none() {
        return;
    }
    p.sink().write_separator("<");
    scan_separated(p, tree.children_on(node, role));
    p.sink().write_separator(">");
}

/// Annotations, one per line for members and types, inline otherwise.
fn print_annotations<'t, P: Scan<'t> + ?Sized>(p: &mut P, node: NodeId, own_line: bool) {
    let tree = p.tree();
    for annotation in tree.children_on(node, Role::Annotation) {
        p.scan(annotation);
        if own_line {
            p.sink().writeln();
        } else {
            p.sink().write_space();
        }
    }
}

fn print_modifiers<'t, P: Scan<'t> + ?Sized>(p: &mut P, node: NodeId) {
    let tree = p.tree();
    for modifier in tree.node(node).modifiers() {
        p.sink().write_keyword(modifier.keyword());
        p.sink().write_space();
    }
}

fn print_compilation_unit<'t, P: Scan<'t> + ?Sized>(p: &mut P, node: NodeId) {
    let elements = p.tree().list_elements(node, Role::DeclaredType);
    for (i, &element) in elements.iter().enumerate() {
        if i > 0 {
            p.sink().writeln();
            p.sink().writeln();
        }
        p.scan(element);
    }
    if !elements.is_empty() {
        p.sink().writeln();
    }
}

fn print_type<'t, P: Scan<'t> + ?Sized>(p: &mut P, node: NodeId) {
    let tree = p.tree();
    let kind = tree.kind(node);
    print_annotations(p, node, true);
    print_modifiers(p, node);
    p.sink().write_keyword(if kind == NodeKind::Interface {
        "interface"
    } else {
        "class"
    });
    p.sink().write_space();
    p.sink().write_identifier(name(tree, node));
    print_angle_list(p, node, Role::TypeParameter);

    if let Some(super_type) = tree.child_on(node, Role::SuperType) {
        p.sink().write_space();
        p.sink().write_keyword("extends");
        p.sink().write_space();
        p.scan(super_type);
    }
    if tree.child_on(node, Role::Interface).is_some() {
        p.sink().write_space();
        p.sink().write_keyword(if kind == NodeKind::Interface {
            "extends"
        } else {
            "implements"
        });
        p.sink().write_space();
        scan_separated(p, tree.children_on(node, Role::Interface));
    }

    p.sink().write_space();
    p.sink().write_separator("{");
    let members = tree.list_elements(node, Role::TypeMember);
    if !members.is_empty() {
        p.sink().inc_tab();
        p.sink().writeln();
        for member in members {
            p.scan(member);
            p.sink().writeln();
        }
        p.sink().dec_tab();
    }
    p.sink().write_separator("}");
}

fn print_executable<'t, P: Scan<'t> + ?Sized>(p: &mut P, node: NodeId) {
    let tree = p.tree();
    print_annotations(p, node, true);
    print_modifiers(p, node);
    if tree.child_on(node, Role::TypeParameter).is_some() {
        print_angle_list(p, node, Role::TypeParameter);
        p.sink().write_space();
    }
    if let Some(ty) = tree.child_on(node, Role::Type) {
        p.scan(ty);
        p.sink().write_space();
    }
    p.sink().write_identifier(name(tree, node));
    p.sink().write_separator("(");
    scan_separated(p, tree.children_on(node, Role::Parameter));
    p.sink().write_separator(")");
    if tree.child_on(node, Role::Thrown).is_some() {
        p.sink().write_space();
        p.sink().write_keyword("throws");
        p.sink().write_space();
        scan_separated(p, tree.children_on(node, Role::Thrown));
    }
    match tree.child_on(node, Role::Body) {
        Some(body) => {
            p.sink().write_space();
            p.scan(body);
        }
        None => p.sink().write_separator(";"),
    }
}

/// Field, parameter or local variable, without a trailing `;`.
fn print_variable<'t, P: Scan<'t> + ?Sized>(p: &mut P, node: NodeId) {
    let tree = p.tree();
    print_annotations(p, node, tree.kind(node) == NodeKind::Field);
    print_modifiers(p, node);
    scan_role(p, node, Role::Type);
    p.sink().write_space();
    p.sink().write_identifier(name(tree, node));
    if let Some(value) = tree.child_on(node, Role::DefaultExpression) {
        p.sink().write_space();
        p.sink().write_operator("=");
        p.sink().write_space();
        p.scan(value);
    }
}

fn print_block<'t, P: Scan<'t> + ?Sized>(p: &mut P, node: NodeId) {
    let tree = p.tree();
    p.sink().write_separator("{");
    let statements = tree.list_elements(node, Role::Statement);
    if !statements.is_empty() {
        p.sink().inc_tab();
        p.sink().writeln();
        for statement in statements {
            p.scan(statement);
            if is_expression_statement(tree.kind(statement)) {
                p.sink().write_separator(";");
            }
            p.sink().writeln();
        }
        p.sink().dec_tab();
    }
    p.sink().write_separator("}");
}

/// Statements whose node excludes the terminating `;`.
fn is_expression_statement(kind: NodeKind) -> bool {
    matches!(
        kind,
        NodeKind::Assignment
            | NodeKind::Invocation
            | NodeKind::BinaryOperator
            | NodeKind::Literal
            | NodeKind::VariableRead
    )
}

/// Printer that emits every node through [`print_node`].
pub struct DefaultPrinter<'t, S> {
    tree: &'t SyntaxTree,
    sink: S,
}

impl<'t, S: TokenSink> DefaultPrinter<'t, S> {
    pub fn new(tree: &'t SyntaxTree, sink: S) -> Self {
        DefaultPrinter { tree, sink }
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}

impl<'t, S: TokenSink> Scan<'t> for DefaultPrinter<'t, S> {
    type Sink = S;

    fn tree(&self) -> &'t SyntaxTree {
        self.tree
    }

    fn sink(&mut self) -> &mut S {
        &mut self.sink
    }

    fn scan(&mut self, node: NodeId) {
        print_node(self, node);
    }
}

/// Print `root` with generated layout only.
#[tracing::instrument(level = "debug", skip(tree, config))]
pub fn print_tree(tree: &SyntaxTree, root: NodeId, config: PrintConfig) -> String {
    let mut printer = DefaultPrinter::new(tree, StringSink::new(config));
    printer.scan(root);
    printer.into_sink().output()
}
