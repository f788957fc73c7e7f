//! Synth operation - render a stack to its document.

use std::path::Path;

use eyre::{Context, Result};
use stratus_manifest::Manifest;
use stratus_synth::pipeline::Pipeline;
use tracing::info;

use crate::reports::{Diagnostics, SynthReport};

/// Synthesize a manifest and, when `output` is given, write the document.
///
/// When synthesis fails the report carries the errors and nothing is
/// written.
///
/// # Errors
///
/// Fails if the document cannot be rendered or written.
pub fn synth(manifest: Manifest, output: Option<&Path>) -> Result<SynthReport> {
    let mut ctx = Pipeline::new().diagnose(manifest);
    let diagnostics = Diagnostics::collect(&ctx.diagnostics);

    let document = match ctx.document.take() {
        Some(document) if !diagnostics.has_errors() => document,
        _ => {
            return Ok(SynthReport {
                document: None,
                written_to: None,
                diagnostics,
            });
        }
    };

    let written_to = match output {
        Some(path) => {
            let json = document
                .to_json_string()
                .wrap_err("failed to render document")?;
            std::fs::write(path, json)
                .wrap_err_with(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), "wrote document");
            Some(path.to_path_buf())
        }
        None => None,
    };

    Ok(SynthReport {
        document: Some(document),
        written_to,
        diagnostics,
    })
}
