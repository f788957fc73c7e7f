//! Lint for data sources no resolver uses.

use stratus_manifest::Manifest;

use super::super::Lint;
use crate::pipeline::Diagnostic;

/// Lint that warns about data sources without resolvers.
pub struct UnusedDataSourceLint;

impl Lint for UnusedDataSourceLint {
    fn name(&self) -> &'static str {
        "unused-data-source"
    }

    fn description(&self) -> &'static str {
        "Warn about data sources that no resolver uses"
    }

    fn check(&self, manifest: &Manifest, diagnostics: &mut Vec<Diagnostic>) {
        for ds in &manifest.data_sources {
            let used = manifest.resolvers.iter().any(|r| r.data_source == ds.id);
            if !used {
                diagnostics.push(
                    Diagnostic::warning(
                        "validate",
                        format!("data source '{}' is not used by any resolver", ds.id),
                    )
                    .at(format!("data_sources.{}", ds.id)),
                );
            }
        }
    }
}
