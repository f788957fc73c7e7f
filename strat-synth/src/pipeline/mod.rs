//! Synthesis pipeline.
//!
//! Phases run in a fixed order (validate → lower → order → emit), each
//! reading and extending a shared [`SynthesisContext`]. Non-fatal findings
//! are collected as [`Diagnostic`]s; fatal ones stop the pipeline.

mod context;
mod diagnostic;
mod phase;
pub mod phases;
mod runner;

pub use context::SynthesisContext;
pub use diagnostic::{Diagnostic, Severity};
pub use phase::{Phase, PhaseInfo};
pub use runner::Pipeline;
