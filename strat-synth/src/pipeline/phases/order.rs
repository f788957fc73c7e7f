//! Order phase - computes the apply order of the graph.

use eyre::{Result, WrapErr};
use tracing::debug;

use crate::pipeline::{Phase, SynthesisContext};

/// Phase that computes the order resources must be applied in.
pub struct OrderPhase;

impl Phase for OrderPhase {
    fn name(&self) -> &'static str {
        "order"
    }

    fn description(&self) -> &'static str {
        "Compute the apply order of resources"
    }

    fn run(&self, ctx: &mut SynthesisContext) -> Result<()> {
        let order = ctx
            .graph()?
            .compute_apply_order()
            .wrap_err("failed to compute apply order")?;
        debug!(order = ?order.iter().map(|id| id.as_str()).collect::<Vec<_>>(), "apply order");
        ctx.apply_order = Some(order);
        Ok(())
    }
}
