//! Validate phase - runs lints on the manifest.

mod lint;
pub mod lints;

use eyre::{Result, bail};
pub use lint::{Lint, LintInfo};
pub use lints::{
    DanglingReferenceLint, DataSourceBindingLint, MutationReadBackLint, ResolverTemplateLint,
    UnusedDataSourceLint,
};

use crate::pipeline::{Phase, SynthesisContext};

/// Phase that validates the manifest using configurable lints.
pub struct ValidatePhase {
    lints: Vec<Box<dyn Lint>>,
}

impl ValidatePhase {
    /// Create a new validate phase with default lints.
    pub fn new() -> Self {
        Self {
            lints: vec![
                Box::new(DanglingReferenceLint),
                Box::new(DataSourceBindingLint),
                Box::new(ResolverTemplateLint),
                Box::new(UnusedDataSourceLint),
                Box::new(MutationReadBackLint),
            ],
        }
    }

    /// Create a validate phase with no lints.
    pub fn empty() -> Self {
        Self { lints: Vec::new() }
    }

    /// Add a custom lint to the validation phase.
    pub fn with_lint(mut self, lint: impl Lint + 'static) -> Self {
        self.lints.push(Box::new(lint));
        self
    }

    pub fn lint_info(&self) -> Vec<LintInfo> {
        self.lints.iter().map(|l| l.info()).collect()
    }
}

impl Default for ValidatePhase {
    fn default() -> Self {
        Self::new()
    }
}

impl Phase for ValidatePhase {
    fn name(&self) -> &'static str {
        "validate"
    }

    fn description(&self) -> &'static str {
        "Check references and resolver templates"
    }

    fn run(&self, ctx: &mut SynthesisContext) -> Result<()> {
        for lint in &self.lints {
            lint.check(&ctx.manifest, &mut ctx.diagnostics);
        }

        // Warnings are allowed
        if ctx.has_errors() {
            bail!("validation failed with {} error(s)", ctx.error_count());
        }

        Ok(())
    }
}
