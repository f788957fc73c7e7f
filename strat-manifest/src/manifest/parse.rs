//! Manifest parsing from files and strings.

use std::{path::Path, str::FromStr};

use stratus_ir::ResourceKind;

use super::{Manifest, validate::ParseContext};
use crate::{Error, Result, error::SourceContext};

impl FromStr for Manifest {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_manifest(s, "stack.toml")
    }
}

impl Manifest {
    /// Parse a stack.toml file from the given path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        parse_manifest(&content, &path.display().to_string())
    }

    /// Parse a stack.toml from a string with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        parse_manifest(content, filename)
    }
}

/// Parse a manifest from content with the given filename for error reporting.
pub(crate) fn parse_manifest(content: &str, filename: &str) -> Result<Manifest> {
    let source_ctx = SourceContext::new(content, filename);
    let manifest: Manifest = toml::from_str(content).map_err(|e| source_ctx.parse_error(e))?;
    validate_manifest(&manifest, content, filename)?;
    Ok(manifest)
}

/// Validate names and references after parsing.
fn validate_manifest(manifest: &Manifest, src: &str, filename: &str) -> Result<()> {
    let ctx = ParseContext::new(src, filename);

    ctx.validate_name(&manifest.stack.name, "stack name")?;

    let resources_ctx = ctx.push("resources");
    for resource in &manifest.resources {
        resources_ctx.validate_name(&resource.id, "resource id")?;
        let res_ctx = resources_ctx.push(&resource.id);

        if resource.kind == ResourceKind::DataSource {
            return Err(ctx.source_context().validation_error_at(
                format!(
                    "'{}' has kind 'data_source'; declare data sources under [[data_sources]]",
                    resource.id
                ),
                ctx.find_span("data_source"),
            ));
        }

        for dep in &resource.depends_on {
            res_ctx.validate_name(dep, "depends_on entry")?;
        }

        for (name, value) in &resource.attributes {
            if let Some(target) = value.reference() {
                res_ctx.validate_reference(target, &format!("attribute '{}'", name))?;
            }
        }
    }

    let data_sources_ctx = ctx.push("data_sources");
    for ds in &manifest.data_sources {
        data_sources_ctx.validate_name(&ds.id, "data source id")?;
        let ds_ctx = data_sources_ctx.push(&ds.id);
        ds_ctx.validate_name(&ds.api, "api")?;
        ds_ctx.validate_reference(&ds.backing_store, "backing_store")?;
        ds_ctx.validate_reference(&ds.credentials, "credentials")?;
        if ds.database.trim().is_empty() {
            return Err(ctx.source_context().validation_error_at(
                format!("data source '{}' has an empty database name", ds.id),
                None,
            ));
        }
    }

    let resolvers_ctx = ctx.push("resolvers");
    for resolver in &manifest.resolvers {
        resolvers_ctx.validate_name(&resolver.type_name, "resolver type")?;
        resolvers_ctx.validate_name(&resolver.field, "resolver field")?;

        let name = resolver.qualified_name();
        let resolver_ctx = resolvers_ctx.push(&name);
        resolver_ctx.validate_name(&resolver.data_source, "data_source")?;
        for arg in &resolver.arguments {
            resolver_ctx.validate_name(arg, "argument")?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
[stack]
name = "Demo"
"#;

    #[test]
    fn test_minimal_manifest() {
        let manifest: Manifest = MINIMAL.parse().unwrap();
        assert_eq!(manifest.stack.name, "Demo");
        assert!(manifest.stack.description.is_none());
        assert!(manifest.stack.template_versions.is_empty());
        assert!(manifest.resources.is_empty());
        assert_eq!(manifest.resource_count(), 0);
    }

    #[test]
    fn test_parse_error_has_span() {
        let err = Manifest::from_str("[stack]\nname = ").unwrap_err();
        match *err {
            Error::Parse { span, .. } => assert!(span.is_some()),
            ref other => panic!("expected Parse, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_field_rejected() {
        let src = "[stack]\nname = \"Demo\"\nregion = \"eu-west-1\"\n";
        assert!(matches!(*Manifest::from_str(src).unwrap_err(), Error::Parse { .. }));
    }

    #[test]
    fn test_attribute_forms() {
        let src = r#"
[stack]
name = "Demo"

[[resources]]
id = "db"
kind = "database_cluster"
[resources.attributes]
engine = "aurora-mysql"
port = 3306
deletionProtection = false
vpcId = { ref = "vpc.vpcId" }
"#;
        let manifest: Manifest = src.parse().unwrap();
        let attrs = &manifest.resources[0].attributes;
        let names: Vec<_> = attrs.keys().map(String::as_str).collect();
        assert_eq!(names, ["engine", "port", "deletionProtection", "vpcId"]);
        assert_eq!(attrs["port"].literal().as_deref(), Some("3306"));
        assert_eq!(attrs["deletionProtection"].literal().as_deref(), Some("false"));
        assert_eq!(attrs["vpcId"].reference(), Some("vpc.vpcId"));
        assert_eq!(attrs["vpcId"].literal(), None);
    }

    #[test]
    fn test_invalid_resource_id() {
        let src = r#"
[stack]
name = "Demo"

[[resources]]
id = "Aurora Vpc"
kind = "network"
"#;
        let err = Manifest::from_str(src).unwrap_err();
        match *err {
            Error::InvalidIdentifier {
                ref name,
                ref context,
                span,
                ..
            } => {
                assert_eq!(name, "Aurora Vpc");
                assert_eq!(context, "resource id in 'resources'");
                assert!(span.is_some());
            }
            ref other => panic!("expected InvalidIdentifier, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_attribute_reference() {
        let src = r#"
[stack]
name = "Demo"

[[resources]]
id = "db"
kind = "database_cluster"
[resources.attributes]
vpcId = { ref = "vpc" }
"#;
        let err = Manifest::from_str(src).unwrap_err();
        match *err {
            Error::InvalidReference {
                ref reference,
                ref context,
                ..
            } => {
                assert_eq!(reference, "vpc");
                assert_eq!(context, "attribute 'vpcId' in 'resources.db'");
            }
            ref other => panic!("expected InvalidReference, got {:?}", other),
        }
    }

    #[test]
    fn test_data_source_kind_in_resources() {
        let src = r#"
[stack]
name = "Demo"

[[resources]]
id = "rds"
kind = "data_source"
"#;
        let err = Manifest::from_str(src).unwrap_err();
        assert!(matches!(*err, Error::Validation { .. }));
        assert!(err.to_string().contains("[[data_sources]]"));
    }

    #[test]
    fn test_data_source_references() {
        let src = r#"
[stack]
name = "Demo"

[[data_sources]]
id = "rds"
api = "MyApi"
backing_store = "AuroraCluster"
credentials = "AuroraSecret.secretArn"
database = "demos"
"#;
        let err = Manifest::from_str(src).unwrap_err();
        match *err {
            Error::InvalidReference { ref context, .. } => {
                assert_eq!(context, "backing_store in 'data_sources.rds'");
            }
            ref other => panic!("expected InvalidReference, got {:?}", other),
        }
    }

    #[test]
    fn test_resolver_arguments() {
        let src = r#"
[stack]
name = "Demo"

[[resolvers]]
type = "Mutation"
field = "addDemo"
data_source = "rds"
arguments = ["version"]
request = "{}"
response = "$util.toJson($ctx.result)"
"#;
        let manifest: Manifest = src.parse().unwrap();
        let resolver = &manifest.resolvers[0];
        assert_eq!(resolver.qualified_name(), "Mutation.addDemo");
        assert!(resolver.argument_set().contains("version"));
    }

    #[test]
    fn test_from_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = Manifest::from_file(dir.path().join("stack.toml")).unwrap_err();
        assert!(matches!(*err, Error::Io { .. }));
    }
}
