//! Manifest types and parsing for stack.toml files.

mod decl;
mod example;
mod file;
mod parse;
mod validate;

pub use decl::{AttributeField, DataSourceDecl, ResolverDecl, ResourceDecl};
pub use file::StackToml;
use serde::Deserialize;
pub use validate::ParseContext;

/// Root manifest for stack.toml
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Stack metadata
    pub stack: StackConfig,

    /// Infrastructure resources, in declaration order
    #[serde(default)]
    pub resources: Vec<ResourceDecl>,

    /// Data sources binding the API to a database
    #[serde(default)]
    pub data_sources: Vec<DataSourceDecl>,

    /// Field resolvers
    #[serde(default)]
    pub resolvers: Vec<ResolverDecl>,
}

/// The `[stack]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StackConfig {
    /// Stack name
    pub name: String,

    /// Optional description
    #[serde(default)]
    pub description: Option<String>,

    /// Request template versions resolvers may declare.
    ///
    /// Empty means the validator's default set.
    #[serde(default)]
    pub template_versions: Vec<String>,
}

impl Manifest {
    /// Find a data source by id.
    pub fn data_source(&self, id: &str) -> Option<&DataSourceDecl> {
        self.data_sources.iter().find(|ds| ds.id == id)
    }

    /// Total number of resources the stack declares, data sources included.
    pub fn resource_count(&self) -> usize {
        self.resources.len() + self.data_sources.len()
    }
}
