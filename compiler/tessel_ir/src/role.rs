//! Structural roles.
//!
//! A role names the attribute under which a value or child hangs in its
//! parent. Change tracking and fragment descriptors both speak in roles.

use std::fmt;

/// Structural attribute of a syntax node.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum Role {
    Name,
    Modifier,
    Annotation,
    TypeParameter,
    SuperType,
    Interface,
    TypeMember,
    Type,
    TypeArgument,
    Parameter,
    Thrown,
    Body,
    DefaultExpression,
    Statement,
    Expression,
    Argument,
    LeftOperand,
    RightOperand,
    Assigned,
    Assignment,
    Value,
    Operator,
    DeclaredType,
    Comment,
}

impl Role {
    pub const fn as_str(self) -> &'static str {
        match self {
            Role::Name => "name",
            Role::Modifier => "modifier",
            Role::Annotation => "annotation",
            Role::TypeParameter => "type parameter",
            Role::SuperType => "super type",
            Role::Interface => "interface",
            Role::TypeMember => "type member",
            Role::Type => "type",
            Role::TypeArgument => "type argument",
            Role::Parameter => "parameter",
            Role::Thrown => "thrown",
            Role::Body => "body",
            Role::DefaultExpression => "default expression",
            Role::Statement => "statement",
            Role::Expression => "expression",
            Role::Argument => "argument",
            Role::LeftOperand => "left operand",
            Role::RightOperand => "right operand",
            Role::Assigned => "assigned",
            Role::Assignment => "assignment",
            Role::Value => "value",
            Role::Operator => "operator",
            Role::DeclaredType => "declared type",
            Role::Comment => "comment",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
