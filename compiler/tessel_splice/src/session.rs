//! Printing session over every parsed file of a syntax tree.

use rayon::prelude::*;
use tessel_ir::{NodeId, SourceFileId, SyntaxTree};
use tessel_print::{DefaultPrinter, PrintConfig, Scan, StringSink};
use tracing::warn;

use crate::fragment::FragmentTree;
use crate::printer::{print_preserving, Fallback};
use crate::{build_fragment_tree, FragmentError};

/// Result of printing one file.
#[derive(Clone, Debug)]
pub struct PrintReport {
    pub file: SourceFileId,
    pub text: String,
    /// Nodes printed without their original text.
    pub fallbacks: Vec<Fallback>,
    /// Set when the file had no usable fragment tree and was printed by the
    /// generic printer alone.
    pub file_fallback: Option<FragmentError>,
}

impl PrintReport {
    /// Every node kept its original text or was reconciled.
    pub fn is_fully_preserved(&self) -> bool {
        self.file_fallback.is_none() && self.fallbacks.is_empty()
    }
}

struct FileState {
    file: SourceFileId,
    root: NodeId,
    fragments: Result<FragmentTree, FragmentError>,
}

/// Owns a syntax tree together with the fragment trees of its files.
///
/// Fragment trees are built once, when the session is created, so they
/// reflect the text the tree was parsed from. Edit the tree through
/// [`PreservingSession::tree_mut`]; edits are reported by its change
/// collector.
pub struct PreservingSession {
    tree: SyntaxTree,
    files: Vec<FileState>,
    config: PrintConfig,
}

impl PreservingSession {
    pub fn new(tree: SyntaxTree) -> Self {
        Self::with_config(tree, PrintConfig::default())
    }

    #[tracing::instrument(level = "debug", skip_all)]
    pub fn with_config(tree: SyntaxTree, config: PrintConfig) -> Self {
        let files = tree
            .source_files()
            .iter()
            .filter_map(|source| Some((source.id(), tree.file_root(source.id())?)))
            .map(|(file, root)| {
                let fragments = build_fragment_tree(&tree, root);
                if let Err(err) = &fragments {
                    warn!(?file, %err, "no fragment tree; file will be regenerated");
                }
                FileState {
                    file,
                    root,
                    fragments,
                }
            })
            .collect();
        PreservingSession {
            tree,
            files,
            config,
        }
    }

    pub fn tree(&self) -> &SyntaxTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut SyntaxTree {
        &mut self.tree
    }

    pub fn into_tree(self) -> SyntaxTree {
        self.tree
    }

    /// Fragment tree of `file`, if one could be built.
    pub fn fragments(&self, file: SourceFileId) -> Option<&FragmentTree> {
        self.state(file)?.fragments.as_ref().ok()
    }

    /// Why `file` has no fragment tree.
    pub fn build_error(&self, file: SourceFileId) -> Option<&FragmentError> {
        self.state(file)?.fragments.as_ref().err()
    }

    /// Print the whole of `file`.
    pub fn print_file(&mut self, file: SourceFileId) -> Option<PrintReport> {
        let index = self.files.iter().position(|state| state.file == file)?;
        let state = &mut self.files[index];
        let root = state.root;
        Some(print_state(&self.tree, self.config, state, &[root]))
    }

    /// Print `roots`, which must all come from `file`, one after the other.
    pub fn print_nodes(&mut self, file: SourceFileId, roots: &[NodeId]) -> Option<PrintReport> {
        let index = self.files.iter().position(|state| state.file == file)?;
        Some(print_state(&self.tree, self.config, &mut self.files[index], roots))
    }

    /// Print every file, in parallel.
    pub fn print_all(&mut self) -> Vec<PrintReport> {
        let tree = &self.tree;
        let config = self.config;
        self.files
            .par_iter_mut()
            .map(|state| {
                let root = state.root;
                print_state(tree, config, state, &[root])
            })
            .collect()
    }

    fn state(&self, file: SourceFileId) -> Option<&FileState> {
        self.files.iter().find(|state| state.file == file)
    }
}

fn print_state(
    tree: &SyntaxTree,
    config: PrintConfig,
    state: &mut FileState,
    roots: &[NodeId],
) -> PrintReport {
    match &mut state.fragments {
        Ok(fragments) => {
            let printed = print_preserving(tree, tree.changes(), fragments, roots, StringSink::new(config));
            PrintReport {
                file: state.file,
                text: printed.sink.output(),
                fallbacks: printed.fallbacks,
                file_fallback: None,
            }
        }
        Err(err) => {
            let mut printer = DefaultPrinter::new(tree, StringSink::new(config));
            for &root in roots {
                printer.scan(root);
            }
            PrintReport {
                file: state.file,
                text: printer.into_sink().output(),
                fallbacks: Vec::new(),
                file_fallback: Some(err.clone()),
            }
        }
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
