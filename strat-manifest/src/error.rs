use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for manifest operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Source context for error reporting.
///
/// Holds the manifest text and its filename so error factories don't need
/// both passed separately.
///
/// # Example
///
/// ```ignore
/// let ctx = SourceContext::new(content, "stack.toml");
/// ctx.validation_error_at("data sources go under [[data_sources]]", span);
/// ctx.invalid_reference_error("Cluster", "data source 'rds'", span);
/// ```
#[derive(Debug, Clone)]
pub struct SourceContext {
    src: String,
    filename: String,
}

impl SourceContext {
    pub fn new(src: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
        }
    }

    pub fn src(&self) -> &str {
        &self.src
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Create a NamedSource for miette error reporting.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    /// Create a parse error from a toml error.
    pub fn parse_error(&self, source: toml::de::Error) -> Box<Error> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Parse {
            src: self.named_source(),
            span,
            source,
        })
    }

    /// Create a validation error pointing at the source, if a span is known.
    pub fn validation_error_at(
        &self,
        message: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::Validation {
            src: self.named_source(),
            span,
            message: message.into(),
        })
    }

    pub fn invalid_identifier_error(
        &self,
        name: impl Into<String>,
        context: impl Into<String>,
        reason: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::InvalidIdentifier {
            src: self.named_source(),
            span,
            name: name.into(),
            context: context.into(),
            reason: reason.into(),
        })
    }

    pub fn invalid_reference_error(
        &self,
        reference: impl Into<String>,
        context: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::InvalidReference {
            src: self.named_source(),
            span,
            reference: reference.into(),
            context: context.into(),
        })
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(help("run 'strat init' to create a stack.toml"))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse stack.toml")]
    #[diagnostic(code(stratus::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("{message}")]
    #[diagnostic(code(stratus::validation_error))]
    Validation {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
    },

    #[error("invalid {context} '{name}'")]
    #[diagnostic(
        code(stratus::invalid_identifier),
        help(
            "{reason}. Use only letters, numbers, underscores and dashes, starting with a letter or underscore."
        )
    )]
    InvalidIdentifier {
        #[source_code]
        src: NamedSource<String>,
        #[label("invalid identifier")]
        span: Option<SourceSpan>,
        name: String,
        context: String,
        reason: String,
    },

    #[error("invalid reference '{reference}' in {context}")]
    #[diagnostic(
        code(stratus::invalid_reference),
        help("references are written 'resource.attribute', e.g. 'AuroraCluster.clusterArn'")
    )]
    InvalidReference {
        #[source_code]
        src: NamedSource<String>,
        #[label("expected 'resource.attribute'")]
        span: Option<SourceSpan>,
        reference: String,
        context: String,
    },
}
