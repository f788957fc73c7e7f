//! Lint for data sources bound to the wrong kind of resource.

use std::collections::HashMap;

use stratus_ir::ResourceKind;
use stratus_manifest::Manifest;

use super::super::Lint;
use crate::pipeline::Diagnostic;

/// Lint that errors when a data source's api, backing store or credentials
/// point at a resource of the wrong kind.
pub struct DataSourceBindingLint;

impl Lint for DataSourceBindingLint {
    fn name(&self) -> &'static str {
        "data-source-binding"
    }

    fn description(&self) -> &'static str {
        "Check data sources bind an api, a database cluster and a secret"
    }

    fn check(&self, manifest: &Manifest, diagnostics: &mut Vec<Diagnostic>) {
        let kinds: HashMap<&str, ResourceKind> = manifest
            .resources
            .iter()
            .map(|r| (r.id.as_str(), r.kind))
            .collect();

        for ds in &manifest.data_sources {
            let bindings = [
                ("api", Some(ds.api.clone()), ResourceKind::Api),
                (
                    "backing_store",
                    ds.backing_store_ref().ok().map(|r| r.resource.to_string()),
                    ResourceKind::DatabaseCluster,
                ),
                (
                    "credentials",
                    ds.credentials_ref().ok().map(|r| r.resource.to_string()),
                    ResourceKind::Secret,
                ),
            ];

            for (field, target, expected) in bindings {
                // Missing targets are reported by the dangling-reference lint
                let Some(target) = target else { continue };
                let Some(&kind) = kinds.get(target.as_str()) else {
                    continue;
                };
                if kind != expected {
                    diagnostics.push(
                        Diagnostic::error(
                            "validate",
                            format!(
                                "{} of data source '{}' is '{}', a {} resource",
                                field, ds.id, target, kind
                            ),
                        )
                        .at(format!("data_sources.{}", ds.id))
                        .with_help(format!("{} must name a {} resource", field, expected)),
                    );
                }
            }
        }
    }
}
