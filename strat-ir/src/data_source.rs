//! Data sources binding an API to a backing store.

use crate::{OutputRef, Reference, Resource, ResourceId, ResourceKind};

/// Data source type written for relational backing stores.
pub const RELATIONAL_DATABASE: &str = "RELATIONAL_DATABASE";

/// A resource binding an API to a relational backing store.
///
/// The data source never holds credentials itself, only a reference to the
/// secret that does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSource {
    pub id: ResourceId,
    /// The API this data source is attached to.
    pub api: ResourceId,
    /// The database cluster queries are sent to.
    pub backing_store: Reference,
    /// The secret holding the cluster credentials.
    pub credentials: Reference,
    /// Database selected on the cluster.
    pub target_database_name: String,
}

impl DataSource {
    pub fn new(
        id: impl Into<ResourceId>,
        api: impl Into<ResourceId>,
        backing_store: OutputRef,
        credentials: OutputRef,
        target_database_name: impl Into<String>,
    ) -> Self {
        let id = id.into();
        Self {
            backing_store: Reference::new(id.clone(), "dbClusterIdentifier", backing_store),
            credentials: Reference::new(id.clone(), "secretStoreArn", credentials),
            api: api.into(),
            target_database_name: target_database_name.into(),
            id,
        }
    }

    /// Lower into the generic resource form held by the graph.
    pub fn into_resource(self) -> Resource {
        let api = OutputRef::new(self.api, "apiId");
        Resource::new(self.id, ResourceKind::DataSource)
            .reference("apiId", api)
            .attribute("type", RELATIONAL_DATABASE)
            .attribute(self.backing_store.from_attribute.clone(), self.backing_store)
            .attribute(self.credentials.from_attribute.clone(), self.credentials)
            .attribute("databaseName", self.target_database_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_resource() {
        let ds = DataSource::new(
            "rds",
            "MyApi",
            OutputRef::new("AuroraCluster", "clusterArn"),
            OutputRef::new("AuroraSecret", "secretArn"),
            "demos",
        );
        let resource = ds.into_resource();

        assert_eq!(resource.kind, ResourceKind::DataSource);
        let deps: Vec<_> = resource.depends_on.iter().map(ResourceId::as_str).collect();
        assert_eq!(deps, ["MyApi", "AuroraCluster", "AuroraSecret"]);

        let rendered: Vec<_> = resource
            .attributes
            .iter()
            .map(|(name, value)| format!("{}={}", name, value.render()))
            .collect();
        assert_eq!(
            rendered,
            [
                "apiId=${MyApi.apiId}",
                "type=RELATIONAL_DATABASE",
                "dbClusterIdentifier=${AuroraCluster.clusterArn}",
                "secretStoreArn=${AuroraSecret.secretArn}",
                "databaseName=demos",
            ]
        );
    }
}
