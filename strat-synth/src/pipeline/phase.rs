//! Pipeline phase trait.

use eyre::Result;

use super::SynthesisContext;

/// Information about a pipeline phase.
#[derive(Debug, Clone)]
pub struct PhaseInfo {
    pub name: &'static str,
    pub description: &'static str,
}

/// A phase in the synthesis pipeline.
///
/// Each phase reads what earlier phases left in the context and adds its
/// own results. Non-fatal issues are recorded as diagnostics; returning an
/// error stops the pipeline.
pub trait Phase: Send + Sync {
    /// The name of this phase (used in diagnostics and logs).
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// Run this phase on the synthesis context.
    ///
    /// # Errors
    ///
    /// Returns an error if the phase fails fatally.
    fn run(&self, ctx: &mut SynthesisContext) -> Result<()>;

    fn info(&self) -> PhaseInfo {
        PhaseInfo {
            name: self.name(),
            description: self.description(),
        }
    }
}
