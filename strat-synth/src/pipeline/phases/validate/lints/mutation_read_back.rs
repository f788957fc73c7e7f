//! Lint for mutations that don't read back what they wrote.

use stratus_manifest::Manifest;
use stratus_template::{RequestTemplate, ResponseTemplate, TemplateSource};

use super::super::Lint;
use crate::pipeline::{Diagnostic, phases::lower::lower_resolver};

/// Lint that warns when a mutation's response can't return the row it
/// changed.
///
/// A relational mutation returns data only if its final statement is a
/// `SELECT` and the response reads the result. Templates that don't parse
/// are left to the resolver-templates lint.
pub struct MutationReadBackLint;

impl Lint for MutationReadBackLint {
    fn name(&self) -> &'static str {
        "mutation-read-back"
    }

    fn description(&self) -> &'static str {
        "Warn about mutations that do not read back the row they write"
    }

    fn check(&self, manifest: &Manifest, diagnostics: &mut Vec<Diagnostic>) {
        let mutations = manifest
            .resolvers
            .iter()
            .map(lower_resolver)
            .filter(|r| r.is_mutation());

        for resolver in mutations {
            let name = resolver.id().to_string();
            let request =
                RequestTemplate::parse(&TemplateSource::new(&name, resolver.request_template));
            let response =
                ResponseTemplate::parse(&TemplateSource::new(&name, resolver.response_template));
            let (Ok(request), Ok(response)) = (request, response) else {
                continue;
            };

            let ends_with_select = request.statements.last().is_some_and(|s| {
                s.text
                    .trim_start()
                    .get(..6)
                    .is_some_and(|kw| kw.eq_ignore_ascii_case("select"))
            });

            let problem = if !response.reads_result() {
                "its response never reads the result"
            } else if !ends_with_select {
                "its final statement is not a SELECT"
            } else {
                continue;
            };

            diagnostics.push(
                Diagnostic::warning(
                    "validate",
                    format!("mutation {} does not read back what it writes: {}", name, problem),
                )
                .at(format!("resolvers.{}", name))
                .with_help("end the request with a SELECT of the written row and read it in the response"),
            );
        }
    }
}
