use std::collections::{HashMap, HashSet};

use stratus_ir::{DataSource, Resolver, ResolverId, Resource, ResourceId, ResourceKind};
use tracing::debug;

use crate::{Document, Error, Result, order};

/// Lifecycle of a [`ResourceGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GraphState {
    /// Accepting resources and resolvers.
    #[default]
    Building,
    /// Serialized at least once; no further additions.
    Sealed,
}

/// Owner of every resource and resolver in a stack.
#[derive(Debug, Default)]
pub struct ResourceGraph {
    resources: Vec<Resource>,
    index: HashMap<ResourceId, usize>,
    resolvers: Vec<Resolver>,
    bound: HashSet<ResolverId>,
    state: GraphState,
}

impl ResourceGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a resource in declaration order.
    ///
    /// Edges to resources not yet added are accepted here and checked when
    /// the apply order is computed.
    pub fn add_resource(&mut self, resource: Resource) -> Result<ResourceId> {
        self.ensure_building("add resource")?;

        if self.index.contains_key(&resource.id) {
            return Err(Box::new(Error::DuplicateId {
                id: resource.id.clone(),
            }));
        }

        let id = resource.id.clone();
        debug!(
            id = %id,
            kind = %resource.kind,
            depends_on = resource.depends_on.len(),
            "added resource"
        );
        self.index.insert(id.clone(), self.resources.len());
        self.resources.push(resource);
        Ok(id)
    }

    /// Lower a data source into its resource form and add it.
    pub fn add_data_source(&mut self, data_source: DataSource) -> Result<ResourceId> {
        self.add_resource(data_source.into_resource())
    }

    /// Bind a resolver to a field.
    ///
    /// The data source must already be in the graph.
    pub fn add_resolver(&mut self, resolver: Resolver) -> Result<ResolverId> {
        self.ensure_building("add resolver")?;

        let id = resolver.id();
        match self.resource(&resolver.data_source) {
            None => {
                return Err(Box::new(Error::UnknownDataSource {
                    resolver: id,
                    data_source: resolver.data_source.clone(),
                }));
            }
            Some(resource) if resource.kind != ResourceKind::DataSource => {
                return Err(Box::new(Error::NotADataSource {
                    resolver: id,
                    data_source: resolver.data_source.clone(),
                    kind: resource.kind,
                }));
            }
            Some(_) => {}
        }

        if self.bound.contains(&id) {
            return Err(Box::new(Error::DuplicateResolver { resolver: id }));
        }

        debug!(resolver = %id, data_source = %resolver.data_source, "added resolver");
        self.bound.insert(id.clone());
        self.resolvers.push(resolver);
        Ok(id)
    }

    /// Order resources so every dependency comes before its dependents.
    ///
    /// Resources with no ordering constraint between them keep their
    /// declaration order.
    pub fn compute_apply_order(&self) -> Result<Vec<ResourceId>> {
        let order = order::apply_order(&self.resources, &self.index)?;
        debug!(resources = order.len(), "computed apply order");
        Ok(order)
    }

    /// Render the graph as a document and seal it.
    ///
    /// A sealed graph can be serialized again and produces the same
    /// document.
    pub fn serialize(&mut self) -> Result<Document> {
        let document = Document::from_graph(self)?;
        if self.state == GraphState::Building {
            debug!("sealed resource graph");
            self.state = GraphState::Sealed;
        }
        Ok(document)
    }

    pub fn resource(&self, id: &ResourceId) -> Option<&Resource> {
        self.index.get(id).map(|&i| &self.resources[i])
    }

    /// Resources in declaration order.
    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    /// Resolvers in declaration order.
    pub fn resolvers(&self) -> &[Resolver] {
        &self.resolvers
    }

    pub fn state(&self) -> GraphState {
        self.state
    }

    pub fn is_sealed(&self) -> bool {
        self.state == GraphState::Sealed
    }

    /// Number of resources.
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    fn ensure_building(&self, operation: &'static str) -> Result<()> {
        match self.state {
            GraphState::Building => Ok(()),
            GraphState::Sealed => Err(Box::new(Error::GraphSealed { operation })),
        }
    }
}
