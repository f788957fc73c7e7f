//! Order operation - resources in apply order.

use stratus_manifest::Manifest;
use stratus_synth::pipeline::Pipeline;

use crate::reports::{Diagnostics, OrderReport, OrderedResource};

/// Compute the apply order of a manifest.
///
/// Returns the diagnostics instead when the stack cannot be ordered.
pub fn order(manifest: Manifest) -> Result<OrderReport, Diagnostics> {
    let ctx = Pipeline::new().diagnose(manifest);
    if ctx.has_errors() {
        return Err(Diagnostics::collect(&ctx.diagnostics));
    }

    let Some(document) = &ctx.document else {
        return Err(Diagnostics::collect(&ctx.diagnostics));
    };

    let resources = document
        .resources
        .iter()
        .map(|(id, entry)| OrderedResource {
            id: id.clone(),
            type_name: entry.kind.clone(),
        })
        .collect();

    Ok(OrderReport { resources })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_example_order() {
        let manifest: Manifest = Manifest::example("Demo").parse().unwrap();
        let report = order(manifest).unwrap();
        let ids: Vec<_> = report.resources.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(
            ids,
            ["MyApi", "AuroraSecret", "AuroraVpc", "AuroraCluster", "rds"]
        );
        assert_eq!(report.resources[4].type_name, "DataSource");
    }

    #[test]
    fn test_unknown_dependency() {
        let manifest: Manifest = r#"
[stack]
name = "Dangling"

[[resources]]
id = "db"
kind = "database_cluster"
depends_on = ["ghost"]
"#
        .parse()
        .unwrap();

        let diagnostics = order(manifest).unwrap_err();
        assert!(diagnostics.has_errors());
    }
}
