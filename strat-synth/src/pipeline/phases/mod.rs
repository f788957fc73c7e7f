//! Built-in pipeline phases.
//!
//! - [`ValidatePhase`] - runs lints over the manifest
//! - [`LowerPhase`] - builds the resource graph
//! - [`OrderPhase`] - computes the apply order
//! - [`EmitPhase`] - serializes the graph and seals it

mod emit;
mod lower;
mod order;
mod validate;

pub use emit::EmitPhase;
pub use lower::LowerPhase;
pub use order::OrderPhase;
pub use validate::{
    DanglingReferenceLint, DataSourceBindingLint, Lint, LintInfo, MutationReadBackLint,
    ResolverTemplateLint, UnusedDataSourceLint, ValidatePhase,
};
