//! Lower phase - builds the resource graph from the manifest.

use eyre::{Result, WrapErr};
use stratus_graph::ResourceGraph;
use stratus_ir::{AttributeValue, DataSource, Resolver, Resource};
use stratus_manifest::{DataSourceDecl, Manifest, ResolverDecl, ResourceDecl};
use tracing::debug;

use crate::pipeline::{Phase, SynthesisContext};

/// Phase that turns manifest declarations into a [`ResourceGraph`].
///
/// Resources are added first, in declaration order, then data sources,
/// then resolvers.
pub struct LowerPhase;

impl Phase for LowerPhase {
    fn name(&self) -> &'static str {
        "lower"
    }

    fn description(&self) -> &'static str {
        "Build the resource graph from the manifest"
    }

    fn run(&self, ctx: &mut SynthesisContext) -> Result<()> {
        let graph = lower_manifest(&ctx.manifest)?;
        debug!(
            resources = graph.len(),
            resolvers = graph.resolvers().len(),
            "lowered manifest"
        );
        ctx.graph = Some(graph);
        Ok(())
    }
}

fn lower_manifest(manifest: &Manifest) -> Result<ResourceGraph> {
    let mut graph = ResourceGraph::new();

    for decl in &manifest.resources {
        graph
            .add_resource(lower_resource(decl)?)
            .wrap_err_with(|| format!("failed to add resource '{}'", decl.id))?;
    }

    for decl in &manifest.data_sources {
        graph
            .add_data_source(lower_data_source(decl)?)
            .wrap_err_with(|| format!("failed to add data source '{}'", decl.id))?;
    }

    for decl in &manifest.resolvers {
        graph
            .add_resolver(lower_resolver(decl))
            .wrap_err_with(|| format!("failed to add resolver {}", decl.qualified_name()))?;
    }

    Ok(graph)
}

fn lower_resource(decl: &ResourceDecl) -> Result<Resource> {
    let mut resource = Resource::new(decl.id.as_str(), decl.kind);

    for (name, field) in &decl.attributes {
        resource = match (field.reference(), field.literal()) {
            (Some(target), _) => {
                let target = target.parse().wrap_err_with(|| {
                    format!("attribute '{}' of resource '{}'", name, decl.id)
                })?;
                resource.reference(name.as_str(), target)
            }
            (None, Some(literal)) => resource.attribute(name.as_str(), AttributeValue::Literal(literal)),
            (None, None) => resource,
        };
    }

    for dep in &decl.depends_on {
        resource = resource.depends_on(dep.as_str());
    }

    Ok(resource)
}

fn lower_data_source(decl: &DataSourceDecl) -> Result<DataSource> {
    let context = || format!("data source '{}'", decl.id);
    Ok(DataSource::new(
        decl.id.as_str(),
        decl.api.as_str(),
        decl.backing_store_ref().wrap_err_with(context)?,
        decl.credentials_ref().wrap_err_with(context)?,
        decl.database.as_str(),
    ))
}

pub(crate) fn lower_resolver(decl: &ResolverDecl) -> Resolver {
    Resolver::new(
        decl.type_name.as_str(),
        decl.field.as_str(),
        decl.data_source.as_str(),
    )
    .request(decl.request.as_str())
    .response(decl.response.as_str())
}
