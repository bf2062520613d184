//! Tessel Splice - Source-Preserving Printer
//!
//! Prints an edited syntax tree so that untouched code keeps its original
//! text, layout and comments, and only changed parts are regenerated:
//! - [`FragmentTree`]: interval tree over the original text, one MAIN
//!   fragment per node plus sub-parts for declarations
//! - [`registry`]: which child roles each sub-part prints and which print
//!   events open and close it
//! - [`reconcile`]: maps recorded changes onto fragments
//! - [`SplicingPrinter`]: intercepts the generic printer's tokens and
//!   splices original text around the regenerated ones
//! - [`PreservingSession`]: builds fragment trees for every file and prints
//!   files with per-file fallback
//!
//! A node whose changes cannot be mapped onto its fragments is printed by
//! the generic printer; so is a whole file whose fragment tree cannot be
//! built.

mod build;
mod context;
mod error;
mod event;
mod fragment;
mod mutable;
mod printer;
pub mod reconcile;
pub mod registry;
mod session;

use std::sync::Once;

pub use build::build_fragment_tree;
pub use error::FragmentError;
pub use event::{PrintEvent, SinkMethod, TokenEvent};
pub use fragment::{compare, Containment, Fragment, FragmentId, FragmentKind, FragmentTree, Siblings};
pub use mutable::MutableSink;
pub use printer::{print_preserving, Fallback, Interceptor, Printed, SplicingPrinter};
pub use reconcile::{FallbackReason, Reconciliation};
pub use registry::{FragmentContent, FragmentDescriptor, Trigger};
pub use session::{PreservingSession, PrintReport};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing subscriber for debug output.
///
/// Reads the filter from `RUST_LOG`, e.g. `RUST_LOG=tessel_splice=debug`.
/// Does nothing when `RUST_LOG` is unset. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}
