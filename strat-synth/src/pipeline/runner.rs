//! Pipeline orchestrator.

use eyre::Result;
use stratus_manifest::Manifest;
use tracing::debug;

use super::{
    Diagnostic, Phase, PhaseInfo, SynthesisContext,
    phases::{EmitPhase, LowerPhase, OrderPhase, ValidatePhase},
};

/// The synthesis pipeline.
///
/// Runs the built-in phases (validate, lower, order, emit) in order.
///
/// # Example
///
/// ```ignore
/// let ctx = Pipeline::new().run(manifest)?;
/// for id in ctx.apply_order()? {
///     println!("{}", id);
/// }
/// ```
pub struct Pipeline {
    phases: Vec<Box<dyn Phase>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::with_validate(ValidatePhase::new())
    }

    /// Create a pipeline with a custom validate phase (e.g. extra lints).
    pub fn with_validate(validate: ValidatePhase) -> Self {
        Self {
            phases: vec![
                Box::new(validate),
                Box::new(LowerPhase),
                Box::new(OrderPhase),
                Box::new(EmitPhase),
            ],
        }
    }

    /// Information about each phase, in execution order.
    pub fn phases(&self) -> Vec<PhaseInfo> {
        self.phases.iter().map(|p| p.info()).collect()
    }

    /// Run every phase on a manifest.
    ///
    /// # Errors
    ///
    /// Returns the first fatal phase error. No document is produced in
    /// that case.
    pub fn run(&self, manifest: Manifest) -> Result<SynthesisContext> {
        let mut ctx = SynthesisContext::new(manifest);
        for phase in &self.phases {
            self.run_phase(phase.as_ref(), &mut ctx)?;
        }
        Ok(ctx)
    }

    /// Run the phases until one fails, recording the failure as an error
    /// diagnostic instead of returning it.
    ///
    /// Used to report on a stack rather than synthesize it.
    pub fn diagnose(&self, manifest: Manifest) -> SynthesisContext {
        let mut ctx = SynthesisContext::new(manifest);
        for phase in &self.phases {
            if let Err(err) = self.run_phase(phase.as_ref(), &mut ctx) {
                // The validate phase has already recorded its own errors
                if !ctx.has_errors() {
                    ctx.add_diagnostic(Diagnostic::error(phase.name(), format!("{:#}", err)));
                }
                break;
            }
        }
        ctx
    }

    fn run_phase(&self, phase: &dyn Phase, ctx: &mut SynthesisContext) -> Result<()> {
        debug!(phase = phase.name(), "running phase");
        phase.run(ctx)?;
        debug!(
            phase = phase.name(),
            diagnostics = ctx.diagnostics.len(),
            "phase complete"
        );
        Ok(())
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}
