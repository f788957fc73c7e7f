//! Request mapping templates.

use std::ops::Range;

use crate::{
    Placeholder, Result, TemplateSource, placeholder::scan_placeholders, scanner::Scanner,
};

/// One statement of a relational request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    /// Unescaped statement text.
    pub text: String,
    /// Span of the raw statement inside the template.
    pub span: Range<usize>,
}

impl Statement {
    /// SQL variables (`:name`) used by the statement, with their spans.
    ///
    /// `::` casts and text inside single-quoted SQL literals (where `''`
    /// escapes a quote) are not variables.
    pub fn variables<'a>(&self, template: &'a str) -> Vec<(&'a str, Range<usize>)> {
        let raw = &template[self.span.clone()];
        let bytes = raw.as_bytes();
        let mut vars = Vec::new();
        let mut i = 0;

        while i < bytes.len() {
            if bytes[i] == b'\'' {
                i += 1;
                while i < bytes.len() {
                    if bytes[i] == b'\'' {
                        if bytes.get(i + 1) == Some(&b'\'') {
                            i += 2;
                            continue;
                        }
                        break;
                    }
                    i += 1;
                }
                i += 1;
            } else if bytes[i] == b':' {
                if bytes.get(i + 1) == Some(&b':') {
                    i += 2;
                    continue;
                }
                let start = i + 1;
                let mut end = start;
                while end < bytes.len() && (bytes[end].is_ascii_alphanumeric() || bytes[end] == b'_')
                {
                    end += 1;
                }
                if end > start && !bytes[start].is_ascii_digit() {
                    let offset = self.span.start;
                    vars.push((&raw[start..end], offset + i..offset + end));
                }
                i = end.max(i + 1);
            } else {
                i += 1;
            }
        }

        vars
    }
}

/// A parsed request mapping template.
///
/// The template is a JSON-like object with a `version`, a list of
/// `statements` and an optional `variableMap` whose values may be
/// unquoted placeholder expressions:
///
/// ```text
/// {
///   "version": "2018-05-29",
///   "statements": ["INSERT INTO demos VALUES (:id, :version)"],
///   "variableMap": { ":id": $util.toJson($util.autoId()) }
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RequestTemplate {
    pub version: String,
    pub version_span: Range<usize>,
    pub statements: Vec<Statement>,
    /// Keys of `variableMap`, without the leading `:`.
    pub variables: Vec<String>,
    pub placeholders: Vec<Placeholder>,
}

impl RequestTemplate {
    pub fn parse(source: &TemplateSource) -> Result<Self> {
        let placeholders = scan_placeholders(source)?;
        let mut scanner = Scanner::new(source);

        let mut version: Option<(String, Range<usize>)> = None;
        let mut statements: Option<Vec<Statement>> = None;
        let mut variables = Vec::new();

        scanner.expect(b'{', "'{' to open the request template")?;
        if !scanner.eat(b'}') {
            loop {
                let key = scanner.string()?;
                scanner.expect(b':', "':' after key")?;

                match key.value.as_str() {
                    "version" => {
                        let lit = scanner.string()?;
                        version = Some((lit.value, lit.span));
                    }
                    "statements" => statements = Some(parse_statements(&mut scanner)?),
                    "variableMap" => variables = parse_variable_keys(&mut scanner)?,
                    _ => scanner.skip_value()?,
                }

                if scanner.eat(b',') {
                    continue;
                }
                scanner.expect(b'}', "',' or '}'")?;
                break;
            }
        }

        scanner.skip_whitespace();
        if !scanner.is_at_end() {
            return Err(scanner.error_here("unexpected content after the request object"));
        }

        let Some((version, version_span)) = version else {
            return Err(source.malformed("request template declares no \"version\"", None));
        };
        let Some(statements) = statements else {
            return Err(source.malformed("request template declares no \"statements\"", None));
        };
        if statements.is_empty() {
            return Err(source.malformed("statement list is empty", None));
        }

        Ok(Self {
            version,
            version_span,
            statements,
            variables,
            placeholders,
        })
    }

    pub fn statement_count(&self) -> usize {
        self.statements.len()
    }
}

fn parse_statements(scanner: &mut Scanner<'_>) -> Result<Vec<Statement>> {
    let mut statements = Vec::new();
    scanner.expect(b'[', "'[' to open the statement list")?;
    if scanner.eat(b']') {
        return Ok(statements);
    }
    loop {
        let lit = scanner.string()?;
        statements.push(Statement {
            text: lit.value,
            span: lit.span,
        });
        if scanner.eat(b',') {
            continue;
        }
        scanner.expect(b']', "',' or ']' in the statement list")?;
        return Ok(statements);
    }
}

fn parse_variable_keys(scanner: &mut Scanner<'_>) -> Result<Vec<String>> {
    let mut keys = Vec::new();
    scanner.expect(b'{', "'{' to open the variableMap")?;
    if scanner.eat(b'}') {
        return Ok(keys);
    }
    loop {
        let key = scanner.string()?;
        keys.push(key.value.trim_start_matches(':').to_string());
        scanner.expect(b':', "':' after variable name")?;
        scanner.skip_value()?;
        if scanner.eat(b',') {
            continue;
        }
        scanner.expect(b'}', "',' or '}' in the variableMap")?;
        return Ok(keys);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADD_DEMO: &str = r#"
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

    #[test]
    fn test_parse_mutation_request() {
        let source = TemplateSource::new("Mutation.addDemo (request)", ADD_DEMO);
        let request = RequestTemplate::parse(&source).unwrap();

        assert_eq!(request.version, "2018-05-29");
        assert_eq!(&ADD_DEMO[request.version_span.clone()], "2018-05-29");
        assert_eq!(request.statement_count(), 2);
        assert_eq!(request.statements[1].text, "SELECT * WHERE id = :id");
        assert_eq!(request.variables, ["id", "version"]);
        assert_eq!(request.placeholders.len(), 4);
    }

    #[test]
    fn test_statement_variables() {
        let source = TemplateSource::new("test", ADD_DEMO);
        let request = RequestTemplate::parse(&source).unwrap();
        let vars: Vec<_> = request.statements[0]
            .variables(ADD_DEMO)
            .into_iter()
            .map(|(name, span)| {
                assert_eq!(&ADD_DEMO[span], format!(":{}", name));
                name
            })
            .collect();
        assert_eq!(vars, ["id", "version"]);
    }

    #[test]
    fn test_casts_are_not_variables() {
        let template = r#"{"version": "2018-05-29", "statements": ["SELECT id::text FROM t WHERE x = :x"]}"#;
        let source = TemplateSource::new("test", template);
        let request = RequestTemplate::parse(&source).unwrap();
        let vars: Vec<_> = request.statements[0]
            .variables(template)
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        assert_eq!(vars, ["x"]);
    }

    #[test]
    fn test_sql_literals_are_not_variables() {
        let template = r#"{"version": "2018-05-29", "statements": ["SELECT * FROM demos WHERE tag = 'a:b' AND note = 'it''s :c' AND id = :id"]}"#;
        let source = TemplateSource::new("test", template);
        let request = RequestTemplate::parse(&source).unwrap();
        let vars: Vec<_> = request.statements[0]
            .variables(template)
            .into_iter()
            .map(|(name, span)| (name, &template[span]))
            .collect();
        assert_eq!(vars, [("id", ":id")]);
    }

    #[test]
    fn test_missing_version() {
        let source = TemplateSource::new("test", r#"{"statements": ["SELECT 1"]}"#);
        let err = RequestTemplate::parse(&source).unwrap_err();
        assert!(err.to_string().contains("version"));
    }

    #[test]
    fn test_missing_statements() {
        let source = TemplateSource::new("test", r#"{"version": "2018-05-29"}"#);
        assert!(RequestTemplate::parse(&source).is_err());
    }

    #[test]
    fn test_trailing_content() {
        let source = TemplateSource::new(
            "test",
            r#"{"version": "2018-05-29", "statements": ["SELECT 1"]} extra"#,
        );
        assert!(RequestTemplate::parse(&source).is_err());
    }

    #[test]
    fn test_unknown_keys_are_skipped() {
        let source = TemplateSource::new(
            "test",
            r#"{"version": "2018-05-29", "schema": "main", "statements": ["SELECT 1"]}"#,
        );
        let request = RequestTemplate::parse(&source).unwrap();
        assert_eq!(request.statement_count(), 1);
    }
}
