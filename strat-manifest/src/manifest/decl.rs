//! Declarations of the `[[resources]]`, `[[data_sources]]` and
//! `[[resolvers]]` arrays.

use std::collections::BTreeSet;

use indexmap::IndexMap;
use serde::Deserialize;
use stratus_ir::{OutputRef, ParseOutputRefError, ResourceKind};

/// A `[[resources]]` entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResourceDecl {
    pub id: String,
    pub kind: ResourceKind,
    /// Explicit ordering edges on top of those implied by references.
    #[serde(default)]
    pub depends_on: Vec<String>,
    #[serde(default)]
    pub attributes: IndexMap<String, AttributeField>,
}

/// An attribute value: a scalar, or `{ ref = "resource.attribute" }`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AttributeField {
    Reference {
        #[serde(rename = "ref")]
        target: String,
    },
    Text(String),
    Integer(i64),
    Boolean(bool),
}

impl AttributeField {
    /// The reference target, if this is a reference.
    pub fn reference(&self) -> Option<&str> {
        match self {
            AttributeField::Reference { target } => Some(target),
            _ => None,
        }
    }

    /// The literal rendered as text, if this is not a reference.
    pub fn literal(&self) -> Option<String> {
        match self {
            AttributeField::Reference { .. } => None,
            AttributeField::Text(text) => Some(text.clone()),
            AttributeField::Integer(n) => Some(n.to_string()),
            AttributeField::Boolean(b) => Some(b.to_string()),
        }
    }
}

/// A `[[data_sources]]` entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DataSourceDecl {
    pub id: String,
    /// Id of the API resource the data source attaches to.
    pub api: String,
    /// Database cluster output, as `resource.attribute`.
    pub backing_store: String,
    /// Secret output holding the cluster credentials, as `resource.attribute`.
    pub credentials: String,
    /// Database selected on the cluster.
    pub database: String,
}

impl DataSourceDecl {
    pub fn backing_store_ref(&self) -> Result<OutputRef, ParseOutputRefError> {
        self.backing_store.parse()
    }

    pub fn credentials_ref(&self) -> Result<OutputRef, ParseOutputRefError> {
        self.credentials.parse()
    }
}

/// A `[[resolvers]]` entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResolverDecl {
    #[serde(rename = "type")]
    pub type_name: String,
    pub field: String,
    pub data_source: String,
    /// Names of the field's arguments.
    #[serde(default)]
    pub arguments: Vec<String>,
    /// Request mapping template.
    pub request: String,
    /// Response mapping template.
    pub response: String,
}

impl ResolverDecl {
    /// `Type.field`, as resolvers are addressed in diagnostics.
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.type_name, self.field)
    }

    pub fn argument_set(&self) -> BTreeSet<String> {
        self.arguments.iter().cloned().collect()
    }
}
