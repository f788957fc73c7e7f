//! Validation context and utilities for manifest parsing.

use std::sync::Arc;

use miette::SourceSpan;
use stratus_ir::OutputRef;

use crate::{Result, error::SourceContext};

/// Parsing and validation context that carries source information.
///
/// Tracks the path through the manifest (e.g. `resources.AuroraCluster`) so
/// errors can say where a bad name was found.
///
/// # Example
///
/// ```ignore
/// let ctx = ParseContext::new(src, "stack.toml");
/// ctx.validate_name("AuroraVpc", "resource id")?;
///
/// let nested = ctx.push("resources").push("AuroraCluster");
/// nested.validate_reference("AuroraVpc.vpcId", "attribute 'vpcId'")?;
/// ```
#[derive(Debug, Clone)]
pub struct ParseContext<'a> {
    /// Source context for error reporting (shared across nested contexts)
    source: Arc<SourceContext>,
    /// Path segments for nested validation (e.g., ["resolvers", "Query.getDemos"])
    path: Vec<&'a str>,
}

impl<'a> ParseContext<'a> {
    pub fn new(src: &str, filename: &str) -> Self {
        Self {
            source: Arc::new(SourceContext::new(src, filename)),
            path: Vec::new(),
        }
    }

    pub fn src(&self) -> &str {
        self.source.src()
    }

    pub fn filename(&self) -> &str {
        self.source.filename()
    }

    /// Get the source context for error creation.
    pub fn source_context(&self) -> &SourceContext {
        &self.source
    }

    /// Push a path segment and return a new context.
    pub fn push(&self, segment: &'a str) -> Self {
        let mut new_path = self.path.clone();
        new_path.push(segment);
        Self {
            source: Arc::clone(&self.source),
            path: new_path,
        }
    }

    /// Get the current path as a dot-separated string.
    pub fn path_string(&self) -> String {
        self.path.join(".")
    }

    /// Get a context description for error messages.
    ///
    /// For example: "depends_on entry in 'resources.AuroraCluster'".
    pub fn context_for(&self, kind: &str) -> String {
        if self.path.is_empty() {
            kind.to_string()
        } else {
            format!("{} in '{}'", kind, self.path_string())
        }
    }

    /// Find the span of a quoted value in the source.
    pub fn find_span(&self, name: &str) -> Option<SourceSpan> {
        find_name_span(self.source.src(), name)
    }

    /// Validate that a name is a valid identifier.
    pub fn validate_name(&self, name: &str, kind: &str) -> Result<()> {
        if let Some(reason) = validate_identifier(name) {
            return Err(self.source.invalid_identifier_error(
                name,
                self.context_for(kind),
                reason,
                self.find_span(name),
            ));
        }
        Ok(())
    }

    /// Validate a `resource.attribute` reference.
    pub fn validate_reference(&self, reference: &str, kind: &str) -> Result<OutputRef> {
        let invalid = || {
            self.source.invalid_reference_error(
                reference,
                self.context_for(kind),
                self.find_span(reference),
            )
        };

        let target: OutputRef = reference.parse().map_err(|_| invalid())?;
        if validate_identifier(target.resource.as_str()).is_some() {
            return Err(invalid());
        }
        Ok(target)
    }
}

/// Find the span of a string value in the TOML source.
///
/// Identifiers and references only ever appear as string values, so this
/// looks for the quoted form (`"name"` or `'name'`) and points inside the
/// quotes.
pub(crate) fn find_name_span(src: &str, name: &str) -> Option<SourceSpan> {
    if name.is_empty() {
        return None;
    }

    let patterns = [format!("\"{}\"", name), format!("'{}'", name)];
    for pattern in &patterns {
        if let Some(pos) = src.find(pattern.as_str()) {
            // +1 to skip the opening quote
            return Some(SourceSpan::from((pos + 1, name.len())));
        }
    }

    // No fallback - better to have no span than point to wrong location
    None
}

/// Validate that a name is a usable identifier.
/// Returns None if valid, Some(reason) if invalid
pub(crate) fn validate_identifier(name: &str) -> Option<&'static str> {
    let mut chars = name.chars();

    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        Some(_) => return Some("name must start with a letter or underscore"),
        None => return Some("name cannot be empty"),
    }

    for c in chars {
        if !(c.is_ascii_alphanumeric() || c == '_' || c == '-') {
            return Some("name must contain only letters, numbers, underscores, and dashes");
        }
    }

    if name.ends_with('-') {
        return Some("name cannot end with a dash");
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_valid_identifiers() {
        assert!(validate_identifier("AuroraVpc").is_none());
        assert!(validate_identifier("rds").is_none());
        assert!(validate_identifier("_internal").is_none());
        assert!(validate_identifier("db-endpoint-test").is_none());
        assert!(validate_identifier("cluster2").is_none());
    }

    #[test]
    fn test_invalid_identifiers() {
        assert!(validate_identifier("").is_some());
        assert!(validate_identifier("1st").is_some());
        assert!(validate_identifier("-vpc").is_some());
        assert!(validate_identifier("vpc-").is_some());
        assert!(validate_identifier("Aurora.Vpc").is_some());
        assert!(validate_identifier("my vpc").is_some());
    }

    #[test]
    fn test_find_name_span() {
        let src = "[[resources]]\nid = \"AuroraVpc\"\n";
        let span = find_name_span(src, "AuroraVpc").unwrap();
        assert_eq!(span.offset(), 20);
        assert_eq!(span.len(), 9);
    }

    #[test]
    fn test_find_name_span_single_quotes() {
        let src = "api = 'MyApi'";
        let span = find_name_span(src, "MyApi").unwrap();
        assert_eq!(span.offset(), 7);
    }

    #[test]
    fn test_find_name_span_missing() {
        assert!(find_name_span("id = \"rds\"", "AuroraVpc").is_none());
        assert!(find_name_span("id = \"\"", "").is_none());
    }

    #[test]
    fn test_parse_context_path() {
        let ctx = ParseContext::new("", "stack.toml");
        assert_eq!(ctx.context_for("resource id"), "resource id");

        let nested = ctx.push("resources").push("AuroraCluster");
        assert_eq!(nested.path_string(), "resources.AuroraCluster");
        assert_eq!(
            nested.context_for("depends_on entry"),
            "depends_on entry in 'resources.AuroraCluster'"
        );
    }

    #[test]
    fn test_validate_name_error_has_span() {
        let ctx = ParseContext::new("id = \"9lives\"", "stack.toml");
        let err = ctx.validate_name("9lives", "resource id").unwrap_err();
        match *err {
            Error::InvalidIdentifier { span, ref name, .. } => {
                assert_eq!(name, "9lives");
                assert_eq!(span.map(|s| s.offset()), Some(6));
            }
            ref other => panic!("expected InvalidIdentifier, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_reference() {
        let ctx = ParseContext::new("", "stack.toml");
        let target = ctx
            .validate_reference("AuroraCluster.clusterArn", "backing_store")
            .unwrap();
        assert_eq!(target.resource, "AuroraCluster");
        assert_eq!(target.attribute, "clusterArn");

        assert!(ctx.validate_reference("AuroraCluster", "backing_store").is_err());
        assert!(ctx.validate_reference(".arn", "backing_store").is_err());
        assert!(ctx.validate_reference("1bad.arn", "backing_store").is_err());
    }
}
