//! Lint that statically validates resolver templates.

use miette::Diagnostic as _;
use stratus_manifest::Manifest;
use stratus_template::{TemplateValidator, ValidationReport};

use super::super::Lint;
use crate::pipeline::{Diagnostic, phases::lower::lower_resolver};

/// Lint that runs the template validator over every resolver.
///
/// Uses the stack's `template_versions` when set. Resolvers that pass get
/// an info diagnostic summarizing what their templates do.
pub struct ResolverTemplateLint;

impl ResolverTemplateLint {
    fn validator(manifest: &Manifest) -> TemplateValidator {
        if manifest.stack.template_versions.is_empty() {
            TemplateValidator::new()
        } else {
            TemplateValidator::with_versions(manifest.stack.template_versions.iter().cloned())
        }
    }
}

impl Lint for ResolverTemplateLint {
    fn name(&self) -> &'static str {
        "resolver-templates"
    }

    fn description(&self) -> &'static str {
        "Validate request and response templates of every resolver"
    }

    fn check(&self, manifest: &Manifest, diagnostics: &mut Vec<Diagnostic>) {
        let validator = Self::validator(manifest);

        for decl in &manifest.resolvers {
            let name = decl.qualified_name();
            let location = format!("resolvers.{}", name);

            match validator.validate(&lower_resolver(decl), &decl.argument_set()) {
                Ok(report) => {
                    diagnostics.push(
                        Diagnostic::info("validate", format!("{}: {}", name, summary(&report)))
                            .at(location),
                    );
                }
                Err(err) => {
                    let mut diag =
                        Diagnostic::error("validate", format!("{}: {}", name, err)).at(location);
                    if let Some(help) = err.help() {
                        diag = diag.with_help(help.to_string());
                    }
                    diagnostics.push(diag);
                }
            }
        }
    }
}

fn summary(report: &ValidationReport) -> String {
    let statements = match report.statement_count {
        1 => "1 statement".to_string(),
        n => format!("{} statements", n),
    };
    match report.statement_index {
        Some(index) => format!("{}, response reads statement {}", statements, index),
        None if report.reads_result => format!("{}, response reads the whole result", statements),
        None => format!("{}, response ignores the result", statements),
    }
}
