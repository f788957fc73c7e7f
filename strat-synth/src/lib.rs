//! Synthesis of a stack manifest into a resource document.
//!
//! The [`pipeline`] runs a parsed [`Manifest`](stratus_manifest::Manifest)
//! through validation, lowering into a resource graph, apply ordering and
//! emission of the final document.
//!
//! ```ignore
//! use stratus_synth::pipeline::Pipeline;
//!
//! let ctx = Pipeline::new().run(manifest)?;
//! let json = ctx.document()?.to_json_string()?;
//! ```

pub mod pipeline;
