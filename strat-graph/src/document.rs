//! The declarative document handed to the apply engine.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use stratus_ir::{Resolver, Resource};

use crate::{Error, ResourceGraph, Result};

/// Serialized form of a resource graph.
///
/// Resources appear in apply order, resolvers in declaration order. The
/// document holds nothing that depends on when or where it was produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub resources: IndexMap<String, ResourceEntry>,
    pub resolvers: IndexMap<String, ResolverEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceEntry {
    #[serde(rename = "type")]
    pub kind: String,
    pub properties: IndexMap<String, String>,
    pub depends_on: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolverEntry {
    pub type_name: String,
    pub field_name: String,
    pub data_source: String,
    pub request_mapping_template: String,
    pub response_mapping_template: String,
}

impl From<&Resource> for ResourceEntry {
    fn from(resource: &Resource) -> Self {
        Self {
            kind: resource.kind.type_name().to_string(),
            properties: resource
                .attributes
                .iter()
                .map(|(name, value)| (name.clone(), value.render()))
                .collect(),
            depends_on: resource
                .depends_on
                .iter()
                .map(|id| id.to_string())
                .collect(),
        }
    }
}

impl From<&Resolver> for ResolverEntry {
    fn from(resolver: &Resolver) -> Self {
        Self {
            type_name: resolver.type_name.clone(),
            field_name: resolver.field_name.clone(),
            data_source: resolver.data_source.to_string(),
            request_mapping_template: resolver.request_template.clone(),
            response_mapping_template: resolver.response_template.clone(),
        }
    }
}

impl Document {
    /// Build the document for a graph without sealing it.
    ///
    /// # Errors
    ///
    /// Fails if the graph has no valid apply order.
    pub fn from_graph(graph: &ResourceGraph) -> Result<Self> {
        let order = graph.compute_apply_order()?;

        let mut resources = IndexMap::with_capacity(order.len());
        for id in &order {
            if let Some(resource) = graph.resource(id) {
                resources.insert(id.to_string(), ResourceEntry::from(resource));
            }
        }

        let resolvers = graph
            .resolvers()
            .iter()
            .map(|resolver| (resolver.id().to_string(), ResolverEntry::from(resolver)))
            .collect();

        Ok(Self {
            resources,
            resolvers,
        })
    }

    /// Pretty JSON with a trailing newline.
    pub fn to_json_string(&self) -> Result<String> {
        let mut json =
            serde_json::to_string_pretty(self).map_err(|source| Box::new(Error::Render { source }))?;
        json.push('\n');
        Ok(json)
    }

    /// Resource ids in the order they appear, which is apply order.
    pub fn resource_ids(&self) -> impl Iterator<Item = &str> {
        self.resources.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use stratus_ir::{OutputRef, ResourceKind};

    use super::*;

    #[test]
    fn test_resources_follow_apply_order() {
        let mut graph = ResourceGraph::new();
        graph
            .add_resource(
                Resource::new("db1", ResourceKind::DatabaseCluster)
                    .reference("vpcId", OutputRef::new("net1", "vpcId")),
            )
            .unwrap();
        graph
            .add_resource(Resource::new("net1", ResourceKind::Network))
            .unwrap();

        let document = Document::from_graph(&graph).unwrap();
        let ids: Vec<_> = document.resource_ids().collect();
        assert_eq!(ids, ["net1", "db1"]);
        assert!(!graph.is_sealed());
    }

    #[test]
    fn test_small_document_json() {
        let mut graph = ResourceGraph::new();
        graph
            .add_resource(Resource::new("net1", ResourceKind::Network).attribute("cidr", "10.0.0.0/16"))
            .unwrap();
        graph
            .add_resource(
                Resource::new("db1", ResourceKind::DatabaseCluster)
                    .attribute("engine", "aurora-mysql")
                    .reference("vpcId", OutputRef::new("net1", "vpcId")),
            )
            .unwrap();

        let json = graph.serialize().unwrap().to_json_string().unwrap();
        insta::assert_snapshot!(json, @r#"
        {
          "resources": {
            "net1": {
              "type": "Network",
              "properties": {
                "cidr": "10.0.0.0/16"
              },
              "dependsOn": []
            },
            "db1": {
              "type": "DatabaseCluster",
              "properties": {
                "engine": "aurora-mysql",
                "vpcId": "${net1.vpcId}"
              },
              "dependsOn": [
                "net1"
              ]
            }
          },
          "resolvers": {}
        }
        "#);
    }

    #[test]
    fn test_round_trips_through_json() {
        let mut graph = ResourceGraph::new();
        graph
            .add_resource(Resource::new("net1", ResourceKind::Network))
            .unwrap();
        let document = graph.serialize().unwrap();
        let json = document.to_json_string().unwrap();
        let parsed: Document = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, document);
    }
}
