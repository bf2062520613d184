//! Node kinds and modifiers.

use std::fmt;

use crate::Role;

/// Kind of a syntax node.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum NodeKind {
    CompilationUnit,
    Class,
    Interface,
    Method,
    Constructor,
    Field,
    Parameter,
    LocalVariable,
    Block,
    Return,
    Assignment,
    Invocation,
    BinaryOperator,
    Literal,
    VariableRead,
    TypeReference,
    TypeParameter,
    Annotation,
    Comment,
}

/// Closed set of declaration shapes.
///
/// Every kind in one category decomposes into the same sub-parts.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum NodeCategory {
    /// Class or interface.
    Type,
    /// Method or constructor.
    Executable,
    /// Field, parameter or local variable.
    Variable,
    Other,
}

impl NodeKind {
    pub const fn category(self) -> NodeCategory {
        match self {
            NodeKind::Class | NodeKind::Interface => NodeCategory::Type,
            NodeKind::Method | NodeKind::Constructor => NodeCategory::Executable,
            NodeKind::Field | NodeKind::Parameter | NodeKind::LocalVariable => {
                NodeCategory::Variable
            }
            _ => NodeCategory::Other,
        }
    }

    /// Role of the ordered element list this kind owns, if any.
    ///
    /// Comments between the elements of that list are stored as children
    /// with [`Role::Comment`].
    pub const fn list_role(self) -> Option<Role> {
        match self {
            NodeKind::CompilationUnit => Some(Role::DeclaredType),
            NodeKind::Class | NodeKind::Interface => Some(Role::TypeMember),
            NodeKind::Block => Some(Role::Statement),
            _ => None,
        }
    }

    pub const fn is_comment(self) -> bool {
        matches!(self, NodeKind::Comment)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Declaration modifier keyword.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Modifier {
    Public,
    Private,
    Protected,
    Static,
    Final,
    Abstract,
}

impl Modifier {
    pub const fn keyword(self) -> &'static str {
        match self {
            Modifier::Public => "public",
            Modifier::Private => "private",
            Modifier::Protected => "protected",
            Modifier::Static => "static",
            Modifier::Final => "final",
            Modifier::Abstract => "abstract",
        }
    }
}
