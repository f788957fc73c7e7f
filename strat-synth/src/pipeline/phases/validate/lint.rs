//! Lint trait for manifest validation.

use stratus_manifest::Manifest;

use crate::pipeline::Diagnostic;

/// Information about a lint.
#[derive(Debug, Clone)]
pub struct LintInfo {
    pub name: &'static str,
    pub description: &'static str,
}

/// A check over the manifest that reports problems as diagnostics.
pub trait Lint: Send + Sync {
    /// The name of this lint.
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// Check the manifest and add any diagnostics.
    fn check(&self, manifest: &Manifest, diagnostics: &mut Vec<Diagnostic>);

    fn info(&self) -> LintInfo {
        LintInfo {
            name: self.name(),
            description: self.description(),
        }
    }
}
