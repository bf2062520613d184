//! Tessel Print - Generic Printer
//!
//! Walks a syntax tree and emits tokens through a [`TokenSink`]:
//! - [`TokenSink`]: one method per lexical category
//! - [`VerbatimSink`]: sinks that also accept original text
//! - [`Scan`] and [`print_node`]: the overridable recursive walk
//! - [`PrintConfig`]: layout of generated code

mod config;
mod printer;
mod sink;

pub use config::{IndentStyle, PrintConfig};
pub use printer::{print_node, print_tree, DefaultPrinter, Scan};
pub use sink::{StringSink, TokenSink, VerbatimSink};
