//! Lint for references to undeclared resources.

use std::collections::HashSet;

use stratus_ir::OutputRef;
use stratus_manifest::Manifest;

use super::super::Lint;
use crate::pipeline::Diagnostic;

/// Lint that errors when a reference or dependency names a resource the
/// stack never declares.
pub struct DanglingReferenceLint;

impl Lint for DanglingReferenceLint {
    fn name(&self) -> &'static str {
        "dangling-reference"
    }

    fn description(&self) -> &'static str {
        "Detect references and dependencies to undeclared resources"
    }

    fn check(&self, manifest: &Manifest, diagnostics: &mut Vec<Diagnostic>) {
        let declared: HashSet<&str> = manifest
            .resources
            .iter()
            .map(|r| r.id.as_str())
            .chain(manifest.data_sources.iter().map(|ds| ds.id.as_str()))
            .collect();

        let mut report = |target: &str, what: String, location: String| {
            if !declared.contains(target) {
                diagnostics.push(
                    Diagnostic::error(
                        "validate",
                        format!("{} refers to '{}', which is not declared", what, target),
                    )
                    .at(location),
                );
            }
        };

        for resource in &manifest.resources {
            let location = format!("resources.{}", resource.id);
            for (name, field) in &resource.attributes {
                if let Some(target) = field.reference()
                    && let Ok(target) = target.parse::<OutputRef>()
                {
                    report(
                        target.resource.as_str(),
                        format!("attribute '{}' of '{}'", name, resource.id),
                        location.clone(),
                    );
                }
            }
            for dep in &resource.depends_on {
                report(
                    dep,
                    format!("depends_on of '{}'", resource.id),
                    location.clone(),
                );
            }
        }

        for ds in &manifest.data_sources {
            let location = format!("data_sources.{}", ds.id);
            report(&ds.api, format!("api of '{}'", ds.id), location.clone());
            if let Ok(target) = ds.backing_store_ref() {
                report(
                    target.resource.as_str(),
                    format!("backing_store of '{}'", ds.id),
                    location.clone(),
                );
            }
            if let Ok(target) = ds.credentials_ref() {
                report(
                    target.resource.as_str(),
                    format!("credentials of '{}'", ds.id),
                    location,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::phases::validate::lints::parse_manifest;

    #[test]
    fn test_all_declared() {
        let manifest = parse_manifest(
            r#"
            [stack]
            name = "Demo"

            [[resources]]
            id = "db"
            kind = "database_cluster"
            depends_on = ["vpc"]
            [resources.attributes]
            vpcId = { ref = "vpc.vpcId" }

            [[resources]]
            id = "vpc"
            kind = "network"
        "#,
        );

        let mut diagnostics = Vec::new();
        DanglingReferenceLint.check(&manifest, &mut diagnostics);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_reports_every_dangling_target() {
        let manifest = parse_manifest(
            r#"
            [stack]
            name = "Demo"

            [[resources]]
            id = "db"
            kind = "database_cluster"
            depends_on = ["secret"]
            [resources.attributes]
            vpcId = { ref = "vpc.vpcId" }

            [[data_sources]]
            id = "rds"
            api = "MyApi"
            backing_store = "db.clusterArn"
            credentials = "secret.secretArn"
            database = "demos"
        "#,
        );

        let mut diagnostics = Vec::new();
        DanglingReferenceLint.check(&manifest, &mut diagnostics);

        let messages: Vec<_> = diagnostics.iter().map(|d| d.message.as_str()).collect();
        assert_eq!(
            messages,
            [
                "attribute 'vpcId' of 'db' refers to 'vpc', which is not declared",
                "depends_on of 'db' refers to 'secret', which is not declared",
                "api of 'rds' refers to 'MyApi', which is not declared",
                "credentials of 'rds' refers to 'secret', which is not declared",
            ]
        );
        assert!(diagnostics.iter().all(|d| d.severity.is_error()));
        assert_eq!(diagnostics[2].location.as_deref(), Some("data_sources.rds"));
    }
}
