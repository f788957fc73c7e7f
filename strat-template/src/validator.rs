//! Static validation of resolver templates.

use std::collections::BTreeSet;

use stratus_ir::Resolver;
use tracing::debug;

use crate::{PlaceholderKind, RequestTemplate, ResponseTemplate, Result, TemplateSource};

/// Request template version accepted when none are configured.
pub const DEFAULT_TEMPLATE_VERSION: &str = "2018-05-29";

/// Summary of a resolver that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Declared request template version.
    pub version: String,
    /// Number of statements the request issues.
    pub statement_count: usize,
    /// Field arguments referenced, in order of first use.
    pub arguments: Vec<String>,
    /// Utility functions called, in order of first use.
    pub utilities: Vec<String>,
    /// Statement whose result the response reads.
    pub statement_index: Option<usize>,
    /// Whether the response reads the backend result at all.
    pub reads_result: bool,
}

/// Checks resolver templates against field arguments and protocol versions.
#[derive(Debug, Clone)]
pub struct TemplateValidator {
    supported_versions: Vec<String>,
}

impl TemplateValidator {
    /// Create a validator accepting only [`DEFAULT_TEMPLATE_VERSION`].
    pub fn new() -> Self {
        Self {
            supported_versions: vec![DEFAULT_TEMPLATE_VERSION.to_string()],
        }
    }

    /// Create a validator accepting the given versions.
    pub fn with_versions<I, S>(versions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            supported_versions: versions.into_iter().map(Into::into).collect(),
        }
    }

    pub fn supported_versions(&self) -> &[String] {
        &self.supported_versions
    }

    /// Validate both templates of a resolver.
    ///
    /// # Errors
    ///
    /// Fails on the first problem found, in this order: malformed or
    /// unknown placeholders, an unsupported version, an argument the field
    /// does not declare, an undeclared SQL variable, and a response that
    /// does not read the final statement of the request.
    pub fn validate(
        &self,
        resolver: &Resolver,
        field_arguments: &BTreeSet<String>,
    ) -> Result<ValidationReport> {
        let id = resolver.id();
        let request_src = TemplateSource::new(
            format!("{} (request)", id),
            resolver.request_template.clone(),
        );
        let response_src = TemplateSource::new(
            format!("{} (response)", id),
            resolver.response_template.clone(),
        );

        let request = RequestTemplate::parse(&request_src)?;
        let response = ResponseTemplate::parse(&response_src)?;

        if !self.supported_versions.contains(&request.version) {
            return Err(request_src.unsupported_version(
                request.version.clone(),
                self.supported_versions.join(", "),
                request.version_span.clone(),
            ));
        }

        let mut arguments: Vec<String> = Vec::new();
        let mut utilities: Vec<String> = Vec::new();
        let sources = [
            (&request_src, &request.placeholders),
            (&response_src, &response.placeholders),
        ];
        for (source, placeholders) in sources {
            for placeholder in placeholders {
                match &placeholder.kind {
                    PlaceholderKind::Argument { name } => {
                        if !field_arguments.contains(name) {
                            return Err(source.unknown_argument(
                                id.to_string(),
                                name.clone(),
                                declared_list(field_arguments),
                                placeholder.span.clone(),
                            ));
                        }
                        if !arguments.contains(name) {
                            arguments.push(name.clone());
                        }
                    }
                    PlaceholderKind::Utility { function } => {
                        if !utilities.contains(function) {
                            utilities.push(function.clone());
                        }
                    }
                    PlaceholderKind::Result { .. } => {}
                }
            }
        }

        for statement in &request.statements {
            for (name, span) in statement.variables(request_src.text()) {
                if !request.variables.iter().any(|v| v == name) {
                    return Err(request_src.undefined_variable(name, span));
                }
            }
        }

        let statement_count = request.statement_count();
        let statement_index = match response.statement_index() {
            Some((index, span)) => {
                if index.checked_add(1) != Some(statement_count) {
                    return Err(response_src.statement_index_mismatch(
                        index,
                        statement_count,
                        span,
                    ));
                }
                Some(index)
            }
            None => None,
        };

        debug!(
            resolver = %id,
            version = %request.version,
            statements = statement_count,
            "validated resolver templates"
        );

        Ok(ValidationReport {
            version: request.version,
            statement_count,
            arguments,
            utilities,
            statement_index,
            reads_result: response.reads_result(),
        })
    }
}

impl Default for TemplateValidator {
    fn default() -> Self {
        Self::new()
    }
}

fn declared_list(arguments: &BTreeSet<String>) -> String {
    if arguments.is_empty() {
        "(none)".to_string()
    } else {
        arguments.iter().cloned().collect::<Vec<_>>().join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    const ADD_DEMO_REQUEST: &str = r#"
      {
        "version": "2018-05-29",
        "statements": [
          "INSERT INTO demos VALUES (:id, :version)",
          "SELECT * WHERE id = :id"
        ],
        "variableMap": {
          ":id": $util.toJson($util.autoId()),
          ":version": $util.toJson($ctx.args.version)
        }
      }
      "#;

    fn args(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    fn add_demo(response: &str) -> Resolver {
        Resolver::new("Mutation", "addDemo", "rds")
            .request(ADD_DEMO_REQUEST)
            .response(response)
    }

    #[test]
    fn test_read_back_of_second_statement() {
        let resolver = add_demo("$utils.toJson($utils.rds.toJsonObject($ctx.result)[1][0])");
        let report = TemplateValidator::new()
            .validate(&resolver, &args(&["version"]))
            .unwrap();

        assert_eq!(report.version, "2018-05-29");
        assert_eq!(report.statement_count, 2);
        assert_eq!(report.statement_index, Some(1));
        assert_eq!(report.arguments, ["version"]);
        assert_eq!(report.utilities, ["toJson", "autoId", "rds.toJsonObject"]);
        assert!(report.reads_result);
    }

    #[test]
    fn test_off_by_one_statement_index() {
        let resolver = add_demo("$utils.toJson($utils.rds.toJsonObject($ctx.result)[2][0])");
        let err = TemplateValidator::new()
            .validate(&resolver, &args(&["version"]))
            .unwrap_err();

        match *err {
            Error::StatementIndexMismatch {
                index,
                statements,
                expected,
                ..
            } => {
                assert_eq!(index, 2);
                assert_eq!(statements, 2);
                assert_eq!(expected, 1);
            }
            other => panic!("expected StatementIndexMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_max_statement_index_is_a_mismatch() {
        let resolver = add_demo(
            "$utils.toJson($utils.rds.toJsonObject($ctx.result)[18446744073709551615][0])",
        );
        let err = TemplateValidator::new()
            .validate(&resolver, &args(&["version"]))
            .unwrap_err();
        assert!(matches!(
            *err,
            Error::StatementIndexMismatch {
                index: usize::MAX,
                statements: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_overflowing_statement_index_is_a_mismatch() {
        let resolver =
            add_demo("$utils.toJson($utils.rds.toJsonObject($ctx.result)[99999999999999999999][0])");
        let err = TemplateValidator::new()
            .validate(&resolver, &args(&["version"]))
            .unwrap_err();
        assert!(matches!(*err, Error::StatementIndexMismatch { .. }));
    }

    #[test]
    fn test_colon_inside_sql_literal() {
        let resolver = Resolver::new("Query", "getDemos", "rds")
            .request(r#"{ "version": "2018-05-29", "statements": ["SELECT * FROM demos WHERE tag = 'a:b'"] }"#)
            .response("$utils.toJson($utils.rds.toJsonObject($ctx.result)[0])");
        let report = TemplateValidator::new()
            .validate(&resolver, &BTreeSet::new())
            .unwrap();
        assert_eq!(report.statement_count, 1);
    }

    #[test]
    fn test_query_reads_only_statement() {
        let resolver = Resolver::new("Query", "getDemos", "rds")
            .request(r#"{ "version": "2018-05-29", "statements": ["SELECT * FROM demos"] }"#)
            .response("$utils.toJson($utils.rds.toJsonObject($ctx.result)[0])");
        let report = TemplateValidator::new()
            .validate(&resolver, &BTreeSet::new())
            .unwrap();
        assert_eq!(report.statement_index, Some(0));
        assert!(report.arguments.is_empty());
    }

    #[test]
    fn test_unknown_argument() {
        let resolver = add_demo("$util.toJson($ctx.result)");
        let err = TemplateValidator::new()
            .validate(&resolver, &args(&["name"]))
            .unwrap_err();

        match *err {
            Error::UnknownArgument {
                argument,
                resolver,
                declared,
                ..
            } => {
                assert_eq!(argument, "version");
                assert_eq!(resolver, "Mutation.addDemo");
                assert_eq!(declared, "name");
            }
            other => panic!("expected UnknownArgument, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_argument_in_response() {
        let resolver = add_demo("$util.toJson(${args.missing})");
        let err = TemplateValidator::new()
            .validate(&resolver, &args(&["version"]))
            .unwrap_err();
        assert!(matches!(*err, Error::UnknownArgument { ref argument, .. } if argument == "missing"));
    }

    #[test]
    fn test_unsupported_version() {
        let resolver = Resolver::new("Query", "getDemos", "rds")
            .request(r#"{ "version": "2017-02-28", "statements": ["SELECT 1"] }"#)
            .response("$util.toJson($ctx.result)");
        let err = TemplateValidator::new()
            .validate(&resolver, &BTreeSet::new())
            .unwrap_err();
        match *err {
            Error::UnsupportedTemplateVersion {
                version, supported, ..
            } => {
                assert_eq!(version, "2017-02-28");
                assert_eq!(supported, "2018-05-29");
            }
            other => panic!("expected UnsupportedTemplateVersion, got {:?}", other),
        }
    }

    #[test]
    fn test_configured_versions() {
        let resolver = Resolver::new("Query", "getDemos", "rds")
            .request(r#"{ "version": "2020-05-29", "statements": ["SELECT 1"] }"#)
            .response("$util.toJson($ctx.result)");
        let validator = TemplateValidator::with_versions(["2018-05-29", "2020-05-29"]);
        assert!(validator.validate(&resolver, &BTreeSet::new()).is_ok());
    }

    #[test]
    fn test_undefined_variable() {
        let resolver = Resolver::new("Query", "getDemo", "rds")
            .request(r#"{ "version": "2018-05-29", "statements": ["SELECT * FROM demos WHERE id = :id"] }"#)
            .response("$util.toJson($ctx.result)");
        let err = TemplateValidator::new()
            .validate(&resolver, &BTreeSet::new())
            .unwrap_err();
        assert!(matches!(*err, Error::UndefinedVariable { ref name, .. } if name == "id"));
    }
}
