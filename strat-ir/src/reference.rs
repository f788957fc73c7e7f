//! References between resources.

use std::{fmt, str::FromStr};

use crate::ResourceId;

/// An output attribute of a resource, written `resource.attribute`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OutputRef {
    pub resource: ResourceId,
    pub attribute: String,
}

impl OutputRef {
    pub fn new(resource: impl Into<ResourceId>, attribute: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            attribute: attribute.into(),
        }
    }
}

impl fmt::Display for OutputRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.resource, self.attribute)
    }
}

/// Error returned when a string is not of the form `resource.attribute`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOutputRefError {
    pub input: String,
}

impl fmt::Display for ParseOutputRefError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "'{}' is not a reference, expected 'resource.attribute'",
            self.input
        )
    }
}

impl std::error::Error for ParseOutputRefError {}

impl FromStr for OutputRef {
    type Err = ParseOutputRefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseOutputRefError {
            input: s.to_string(),
        };
        // The attribute may itself be dotted (e.g. `Cluster.endpoint.address`)
        let (resource, attribute) = s.split_once('.').ok_or_else(err)?;
        if resource.is_empty() || attribute.is_empty() || attribute.ends_with('.') {
            return Err(err());
        }
        if s.chars().any(char::is_whitespace) {
            return Err(err());
        }
        Ok(Self::new(resource, attribute))
    }
}

/// A typed pointer from one resource's attribute to another resource's output.
///
/// References are non-owning: they name their target by id and are resolved
/// against the graph when the apply order is computed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Reference {
    pub from_resource: ResourceId,
    pub from_attribute: String,
    pub to_resource: ResourceId,
    pub to_attribute: String,
}

impl Reference {
    pub fn new(
        from_resource: impl Into<ResourceId>,
        from_attribute: impl Into<String>,
        target: OutputRef,
    ) -> Self {
        Self {
            from_resource: from_resource.into(),
            from_attribute: from_attribute.into(),
            to_resource: target.resource,
            to_attribute: target.attribute,
        }
    }

    /// The output this reference points at.
    pub fn target(&self) -> OutputRef {
        OutputRef::new(self.to_resource.clone(), self.to_attribute.clone())
    }

    /// Render as a symbolic pointer, e.g. `${AuroraCluster.clusterArn}`.
    pub fn render(&self) -> String {
        format!("${{{}.{}}}", self.to_resource, self.to_attribute)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_output_ref() {
        let target: OutputRef = "AuroraCluster.clusterArn".parse().unwrap();
        assert_eq!(target.resource.as_str(), "AuroraCluster");
        assert_eq!(target.attribute, "clusterArn");
        assert_eq!(target.to_string(), "AuroraCluster.clusterArn");
    }

    #[test]
    fn test_parse_nested_attribute() {
        let target: OutputRef = "Cluster.endpoint.address".parse().unwrap();
        assert_eq!(target.resource.as_str(), "Cluster");
        assert_eq!(target.attribute, "endpoint.address");
    }

    #[test]
    fn test_parse_invalid_output_ref() {
        assert!("AuroraCluster".parse::<OutputRef>().is_err());
        assert!(".arn".parse::<OutputRef>().is_err());
        assert!("Cluster.".parse::<OutputRef>().is_err());
        assert!("Cluster. arn".parse::<OutputRef>().is_err());
    }

    #[test]
    fn test_render() {
        let reference = Reference::new("rds", "dbClusterIdentifier", OutputRef::new("db1", "arn"));
        assert_eq!(reference.render(), "${db1.arn}");
        assert_eq!(reference.target(), OutputRef::new("db1", "arn"));
    }
}
