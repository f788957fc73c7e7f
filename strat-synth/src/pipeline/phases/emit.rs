//! Emit phase - renders the graph into its document and seals it.

use eyre::{Result, WrapErr};

use crate::pipeline::{Phase, SynthesisContext};

/// Phase that serializes the resource graph.
///
/// The graph is sealed afterwards.
pub struct EmitPhase;

impl Phase for EmitPhase {
    fn name(&self) -> &'static str {
        "emit"
    }

    fn description(&self) -> &'static str {
        "Serialize the resource graph into a document"
    }

    fn run(&self, ctx: &mut SynthesisContext) -> Result<()> {
        let document = ctx
            .graph_mut()?
            .serialize()
            .wrap_err("failed to serialize resource graph")?;
        ctx.document = Some(document);
        Ok(())
    }
}
