//! Check operation - stack validation.

use stratus_manifest::StackToml;
use stratus_synth::pipeline::Pipeline;

use crate::reports::{CheckReport, Diagnostics};

/// Run the pipeline over a stack and report what it found.
///
/// Never fails: a phase error becomes an error diagnostic on the report.
pub fn check(stack: &StackToml) -> CheckReport {
    let manifest = stack.manifest();
    let ctx = Pipeline::new().diagnose(manifest.clone());

    CheckReport {
        config_path: stack.path().to_path_buf(),
        stack_name: manifest.stack.name.clone(),
        description: manifest.stack.description.clone(),
        resource_count: manifest.resource_count(),
        resolver_count: manifest.resolvers.len(),
        diagnostics: Diagnostics::collect(&ctx.diagnostics),
    }
}
