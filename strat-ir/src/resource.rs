//! Resources and their attributes.

use std::{borrow::Borrow, fmt};

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::{OutputRef, Reference};

/// Identifier of a resource, unique within a graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(String);

impl ResourceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResourceId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ResourceId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&ResourceId> for ResourceId {
    fn from(id: &ResourceId) -> Self {
        id.clone()
    }
}

impl AsRef<str> for ResourceId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ResourceId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for ResourceId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ResourceId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// The kind of infrastructure a resource declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Network,
    Secret,
    DatabaseCluster,
    Api,
    DataSource,
}

impl ResourceKind {
    /// Get the snake_case name used in stack.toml.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Network => "network",
            ResourceKind::Secret => "secret",
            ResourceKind::DatabaseCluster => "database_cluster",
            ResourceKind::Api => "api",
            ResourceKind::DataSource => "data_source",
        }
    }

    /// Get the PascalCase type name written to the document.
    pub fn type_name(&self) -> &'static str {
        match self {
            ResourceKind::Network => "Network",
            ResourceKind::Secret => "Secret",
            ResourceKind::DatabaseCluster => "DatabaseCluster",
            ResourceKind::Api => "Api",
            ResourceKind::DataSource => "DataSource",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value of a resource attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    /// A plain configuration value.
    Literal(String),
    /// A pointer to another resource's output.
    Reference(Reference),
}

impl AttributeValue {
    /// Render the value as it appears in the document.
    ///
    /// References render symbolically, e.g. `${AuroraVpc.vpcId}`.
    pub fn render(&self) -> String {
        match self {
            Self::Literal(value) => value.clone(),
            Self::Reference(reference) => reference.render(),
        }
    }

    pub fn as_reference(&self) -> Option<&Reference> {
        match self {
            Self::Reference(reference) => Some(reference),
            Self::Literal(_) => None,
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::Literal(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        Self::Literal(value)
    }
}

impl From<Reference> for AttributeValue {
    fn from(reference: Reference) -> Self {
        Self::Reference(reference)
    }
}

/// A named, typed unit of infrastructure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    /// Identifier, unique within the graph.
    pub id: ResourceId,
    /// What kind of infrastructure this is.
    pub kind: ResourceKind,
    /// Configuration attributes in declaration order.
    pub attributes: IndexMap<String, AttributeValue>,
    /// Resources that must be applied before this one.
    pub depends_on: IndexSet<ResourceId>,
}

impl Resource {
    pub fn new(id: impl Into<ResourceId>, kind: ResourceKind) -> Self {
        Self {
            id: id.into(),
            kind,
            attributes: IndexMap::new(),
            depends_on: IndexSet::new(),
        }
    }

    /// Set an attribute.
    ///
    /// A reference value also records an explicit dependency on the
    /// referenced resource.
    pub fn attribute(mut self, name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        let value = value.into();
        if let AttributeValue::Reference(reference) = &value {
            self.depends_on.insert(reference.to_resource.clone());
        }
        self.attributes.insert(name.into(), value);
        self
    }

    /// Point an attribute at another resource's output.
    pub fn reference(self, name: impl Into<String>, target: OutputRef) -> Self {
        let name = name.into();
        let reference = Reference::new(self.id.clone(), name.clone(), target);
        self.attribute(name, reference)
    }

    /// Add an explicit dependency edge.
    pub fn depends_on(mut self, id: impl Into<ResourceId>) -> Self {
        self.depends_on.insert(id.into());
        self
    }

    /// Iterate over every reference held by this resource's attributes.
    pub fn references(&self) -> impl Iterator<Item = &Reference> {
        self.attributes.values().filter_map(AttributeValue::as_reference)
    }
}
