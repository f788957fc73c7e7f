//! Parsing and validation of `stack.toml`.
//!
//! The manifest is the user-facing description of a stack. It is checked
//! for well-formed identifiers and references here, with diagnostics that
//! point back into the source file. Graph integrity (unique ids, known data
//! sources, acyclic edges) is left to `stratus-graph`.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod error;
mod manifest;

pub use error::{Error, Result, SourceContext};
pub use manifest::{
    AttributeField, DataSourceDecl, Manifest, ParseContext, ResolverDecl, ResourceDecl,
    StackConfig, StackToml,
};
