//! Fragment descriptors per node category.
//!
//! A descriptor says which child roles a fragment prints and which print
//! events open and close it. Trigger-less boundaries are crossed when the
//! previous fragment ends.

use tessel_ir::{NodeCategory, NodeKind, Role};

use crate::event::{PrintEvent, SinkMethod};
use crate::fragment::FragmentKind;

/// Print event a fragment boundary reacts to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Trigger {
    /// A token written through `method` whose text is one of `tokens`.
    /// An empty `tokens` list matches any text.
    Token {
        method: SinkMethod,
        tokens: &'static [&'static str],
    },
    /// A child held under one of `roles` is about to be scanned.
    Scan { roles: &'static [Role] },
}

impl Trigger {
    pub fn matches(&self, event: &PrintEvent<'_>) -> bool {
        match (*self, *event) {
            (Trigger::Token { method, tokens }, PrintEvent::Token { method: m, token }) => {
                method == m && (tokens.is_empty() || tokens.iter().any(|&t| t == token))
            }
            (Trigger::Scan { roles }, PrintEvent::Scan { role: Some(role), .. }) => {
                roles.contains(&role)
            }
            _ => false,
        }
    }
}

/// What a fragment prints.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FragmentContent {
    /// Single-valued children under these roles.
    Scalar { roles: &'static [Role] },
    /// The ordered elements held under `role`.
    ///
    /// `terminator` is text the original source may carry after an element
    /// but outside its range, such as the `;` of an expression statement.
    List {
        role: &'static Role,
        terminator: &'static str,
    },
}

#[derive(Debug, PartialEq, Eq)]
pub struct FragmentDescriptor {
    pub kind: FragmentKind,
    pub content: FragmentContent,
    pub start: &'static [Trigger],
    pub end: &'static [Trigger],
}

impl FragmentDescriptor {
    /// Roles whose changes this fragment absorbs.
    pub fn roles(&self) -> &'static [Role] {
        match self.content {
            FragmentContent::Scalar { roles } => roles,
            FragmentContent::List { role, .. } => std::slice::from_ref(role),
        }
    }

    pub fn list_role(&self) -> Option<Role> {
        match self.content {
            FragmentContent::List { role, .. } => Some(*role),
            FragmentContent::Scalar { .. } => None,
        }
    }

    /// Element terminator of a list fragment; empty when there is none.
    pub fn terminator(&self) -> &'static str {
        match self.content {
            FragmentContent::List { terminator, .. } => terminator,
            FragmentContent::Scalar { .. } => "",
        }
    }

    pub fn starts_on(&self, event: &PrintEvent<'_>) -> bool {
        self.start.iter().any(|trigger| trigger.matches(event))
    }

    pub fn ends_on(&self, event: &PrintEvent<'_>) -> bool {
        self.end.iter().any(|trigger| trigger.matches(event))
    }
}

const NO_TRIGGERS: &[Trigger] = &[];

const ANY_IDENTIFIER: &[Trigger] = &[Trigger::Token {
    method: SinkMethod::Identifier,
    tokens: &[],
}];

const MODIFIERS: FragmentDescriptor = FragmentDescriptor {
    kind: FragmentKind::Modifiers,
    content: FragmentContent::Scalar {
        roles: &[Role::Annotation, Role::Modifier],
    },
    start: NO_TRIGGERS,
    end: NO_TRIGGERS,
};

const NAME: FragmentDescriptor = FragmentDescriptor {
    kind: FragmentKind::Name,
    content: FragmentContent::Scalar { roles: &[Role::Name] },
    start: ANY_IDENTIFIER,
    end: ANY_IDENTIFIER,
};

static TYPE_DESCRIPTORS: [FragmentDescriptor; 5] = [
    MODIFIERS,
    FragmentDescriptor {
        kind: FragmentKind::BeforeName,
        content: FragmentContent::Scalar { roles: &[] },
        start: &[Trigger::Token {
            method: SinkMethod::Keyword,
            tokens: &["class", "interface"],
        }],
        end: NO_TRIGGERS,
    },
    NAME,
    FragmentDescriptor {
        kind: FragmentKind::AfterName,
        content: FragmentContent::Scalar {
            roles: &[Role::SuperType, Role::Interface, Role::TypeParameter],
        },
        start: NO_TRIGGERS,
        end: NO_TRIGGERS,
    },
    FragmentDescriptor {
        kind: FragmentKind::Body,
        content: FragmentContent::List {
            role: &Role::TypeMember,
            terminator: "",
        },
        start: &[Trigger::Token {
            method: SinkMethod::Separator,
            tokens: &["{"],
        }],
        end: &[Trigger::Token {
            method: SinkMethod::Separator,
            tokens: &["}"],
        }],
    },
];

static EXECUTABLE_DESCRIPTORS: [FragmentDescriptor; 5] = [
    MODIFIERS,
    FragmentDescriptor {
        kind: FragmentKind::BeforeName,
        content: FragmentContent::Scalar {
            roles: &[Role::Type, Role::TypeParameter],
        },
        start: &[
            Trigger::Scan {
                roles: &[Role::TypeParameter, Role::Type],
            },
            Trigger::Token {
                method: SinkMethod::Separator,
                tokens: &["<"],
            },
        ],
        end: NO_TRIGGERS,
    },
    NAME,
    FragmentDescriptor {
        kind: FragmentKind::AfterName,
        content: FragmentContent::Scalar {
            roles: &[Role::Parameter, Role::Thrown],
        },
        start: &[Trigger::Token {
            method: SinkMethod::Separator,
            tokens: &["("],
        }],
        end: NO_TRIGGERS,
    },
    FragmentDescriptor {
        kind: FragmentKind::Body,
        content: FragmentContent::Scalar { roles: &[Role::Body] },
        start: &[Trigger::Scan { roles: &[Role::Body] }],
        end: NO_TRIGGERS,
    },
];

static VARIABLE_DESCRIPTORS: [FragmentDescriptor; 4] = [
    MODIFIERS,
    FragmentDescriptor {
        kind: FragmentKind::BeforeName,
        content: FragmentContent::Scalar { roles: &[Role::Type] },
        start: &[Trigger::Scan { roles: &[Role::Type] }],
        end: NO_TRIGGERS,
    },
    NAME,
    FragmentDescriptor {
        kind: FragmentKind::AfterName,
        content: FragmentContent::Scalar {
            roles: &[Role::DefaultExpression],
        },
        start: NO_TRIGGERS,
        end: NO_TRIGGERS,
    },
];

static COMPILATION_UNIT_MAIN: FragmentDescriptor = FragmentDescriptor {
    kind: FragmentKind::Main,
    content: FragmentContent::List {
        role: &Role::DeclaredType,
        terminator: "",
    },
    start: NO_TRIGGERS,
    end: NO_TRIGGERS,
};

static BLOCK_MAIN: FragmentDescriptor = FragmentDescriptor {
    kind: FragmentKind::Main,
    content: FragmentContent::List {
        role: &Role::Statement,
        terminator: ";",
    },
    start: NO_TRIGGERS,
    end: NO_TRIGGERS,
};

/// Sub-part descriptors for declarations of `kind`, in source order.
pub fn descriptors(kind: NodeKind) -> Option<&'static [FragmentDescriptor]> {
    match kind.category() {
        NodeCategory::Type => Some(&TYPE_DESCRIPTORS),
        NodeCategory::Executable => Some(&EXECUTABLE_DESCRIPTORS),
        NodeCategory::Variable => Some(&VARIABLE_DESCRIPTORS),
        NodeCategory::Other => None,
    }
}

/// Descriptor of the `fragment` sub-part of a `kind` declaration.
pub fn descriptor(kind: NodeKind, fragment: FragmentKind) -> Option<&'static FragmentDescriptor> {
    descriptors(kind)?.iter().find(|d| d.kind == fragment)
}

/// Descriptor for an undivided MAIN fragment that holds a list.
pub fn main_descriptor(kind: NodeKind) -> Option<&'static FragmentDescriptor> {
    match kind {
        NodeKind::CompilationUnit => Some(&COMPILATION_UNIT_MAIN),
        NodeKind::Block => Some(&BLOCK_MAIN),
        _ => None,
    }
}
