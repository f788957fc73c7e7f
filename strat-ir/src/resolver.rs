//! Resolvers binding API fields to data sources.

use std::{fmt, str::FromStr};

use crate::ResourceId;

/// Root operation types of a GraphQL schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationType {
    Query,
    Mutation,
    Subscription,
}

impl OperationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationType::Query => "Query",
            OperationType::Mutation => "Mutation",
            OperationType::Subscription => "Subscription",
        }
    }
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperationType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Query" => Ok(OperationType::Query),
            "Mutation" => Ok(OperationType::Mutation),
            "Subscription" => Ok(OperationType::Subscription),
            _ => Err(()),
        }
    }
}

/// Identifies a resolver by the field it resolves.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResolverId {
    pub type_name: String,
    pub field_name: String,
}

impl ResolverId {
    pub fn new(type_name: impl Into<String>, field_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            field_name: field_name.into(),
        }
    }
}

impl fmt::Display for ResolverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.type_name, self.field_name)
    }
}

/// Binding of an API field to a data source plus its transform templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolver {
    /// Parent type of the field (e.g. "Query", "Mutation").
    pub type_name: String,
    /// Field being resolved.
    pub field_name: String,
    /// Data source the request is sent to.
    pub data_source: ResourceId,
    /// Turns field arguments into a backend request.
    pub request_template: String,
    /// Turns the backend result into the field's value.
    pub response_template: String,
}

impl Resolver {
    pub fn new(
        type_name: impl Into<String>,
        field_name: impl Into<String>,
        data_source: impl Into<ResourceId>,
    ) -> Self {
        Self {
            type_name: type_name.into(),
            field_name: field_name.into(),
            data_source: data_source.into(),
            request_template: String::new(),
            response_template: String::new(),
        }
    }

    pub fn request(mut self, template: impl Into<String>) -> Self {
        self.request_template = template.into();
        self
    }

    pub fn response(mut self, template: impl Into<String>) -> Self {
        self.response_template = template.into();
        self
    }

    pub fn id(&self) -> ResolverId {
        ResolverId::new(self.type_name.clone(), self.field_name.clone())
    }

    /// The root operation this resolver belongs to, if its parent type is
    /// one of the root types.
    pub fn operation(&self) -> Option<OperationType> {
        self.type_name.parse().ok()
    }

    pub fn is_mutation(&self) -> bool {
        self.operation() == Some(OperationType::Mutation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolver_id() {
        let resolver = Resolver::new("Query", "getDemos", "rds");
        assert_eq!(resolver.id().to_string(), "Query.getDemos");
        assert!(!resolver.is_mutation());
        assert!(Resolver::new("Mutation", "addDemo", "rds").is_mutation());
    }

    #[test]
    fn test_operation_type() {
        let resolver = Resolver::new("Subscription", "onDemo", "rds");
        assert_eq!(resolver.operation(), Some(OperationType::Subscription));
        assert_eq!(Resolver::new("Demo", "owner", "rds").operation(), None);
    }
}
