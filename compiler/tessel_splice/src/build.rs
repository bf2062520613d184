//! Fragment tree construction from a parsed syntax tree.

use tessel_ir::{NodeId, SourcePosition, Span, SyntaxTree};
use tracing::{debug, trace};

use crate::fragment::{Containment, FragmentId, FragmentTree};
use crate::FragmentError;

/// Build the fragment tree of the file `root` was parsed from.
///
/// Nodes without a source position are skipped, as are nodes sharing their
/// parent's exact position. Comments outside their parent's range are
/// attached at the nearest level that contains them.
#[tracing::instrument(level = "debug", skip(tree))]
pub fn build_fragment_tree(tree: &SyntaxTree, root: NodeId) -> Result<FragmentTree, FragmentError> {
    let missing = FragmentError::MissingSource { node: root };
    let file = tree.position(root).file().ok_or(missing.clone())?;
    let source = tree.source_file(file).ok_or(missing)?;
    let mut fragments = FragmentTree::new(file, source.shared_text());

    let mut stack: Vec<(NodeId, Option<FragmentId>)> = vec![(root, None)];
    while let Some((node, ancestor)) = stack.pop() {
        let owner = register(tree, &mut fragments, node, ancestor)?.or(ancestor);
        for &child in tree.children(node).iter().rev() {
            stack.push((child, owner));
        }
    }

    debug!(fragments = fragments.len(), "built fragment tree");
    Ok(fragments)
}

/// Create and link the MAIN fragment of `node`, if it gets one.
fn register(
    tree: &SyntaxTree,
    fragments: &mut FragmentTree,
    node: NodeId,
    ancestor: Option<FragmentId>,
) -> Result<Option<FragmentId>, FragmentError> {
    let position = tree.position(node);
    let Some(found) = position.file() else {
        return Ok(None);
    };
    if found != fragments.file() {
        return Err(FragmentError::ForeignSourceFile {
            node,
            expected: fragments.file(),
            found,
        });
    }
    if tree
        .parent(node)
        .is_some_and(|parent| tree.position(parent) == position)
    {
        trace!(?node, "sharing parent position");
        return Ok(None);
    }

    let position = absorb_modifier_whitespace(fragments.text(), position);
    let main = fragments.create_main(node, position)?;
    let Some(parent) = ancestor else {
        fragments.add_root(main)?;
        return Ok(Some(main));
    };
    match fragments.add_child(parent, main)? {
        Containment::Child => {}
        _ if tree.kind(node).is_comment() => fragments.add_root(main)?,
        _ => {
            return Err(FragmentError::OutsideParent {
                node,
                span: fragments.get(main).span(),
                parent: fragments.get(parent).span(),
            })
        }
    }
    Ok(Some(main))
}

/// Extend non-empty modifiers over the whitespace up to the next token.
///
/// Regenerated modifiers are printed with a trailing space, so the original
/// separator belongs to them.
fn absorb_modifier_whitespace(text: &str, position: SourcePosition) -> SourcePosition {
    let (Some(modifiers), Some(name)) = (position.modifiers(), position.name()) else {
        return position;
    };
    if modifiers.is_empty() || modifiers.end >= name.start {
        return position;
    }
    let gap = text
        .get(modifiers.end as usize..name.start as usize)
        .unwrap_or_default();
    let blank = gap.len() - gap.trim_start().len();
    let Ok(blank) = u32::try_from(blank) else {
        return position;
    };
    let modifiers = Span::new(modifiers.start, modifiers.end + blank);
    match position {
        SourcePosition::Declaration {
            file, span, name, ..
        } => SourcePosition::Declaration {
            file,
            span,
            modifiers,
            name,
        },
        SourcePosition::BodyHolder {
            file,
            span,
            name,
            body,
            ..
        } => SourcePosition::BodyHolder {
            file,
            span,
            modifiers,
            name,
            body,
        },
        other => other,
    }
}
