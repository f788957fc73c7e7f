use std::ops::Range;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for template operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// A template together with the name it is reported under.
///
/// Encapsulates the template text and a display name such as
/// `Mutation.addDemo (request)`, so every error can point back into the
/// template it came from.
#[derive(Debug, Clone)]
pub struct TemplateSource {
    name: String,
    text: String,
}

impl TemplateSource {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.name, self.text.clone())
    }

    pub(crate) fn malformed(&self, message: impl Into<String>, span: Option<Range<usize>>) -> Box<Error> {
        Box::new(Error::MalformedTemplate {
            src: self.named_source(),
            span: span.map(SourceSpan::from),
            message: message.into(),
        })
    }

    pub(crate) fn unknown_placeholder(&self, path: impl Into<String>, span: Range<usize>) -> Box<Error> {
        Box::new(Error::UnknownPlaceholder {
            src: self.named_source(),
            span: span.into(),
            path: path.into(),
        })
    }

    pub(crate) fn unknown_argument(
        &self,
        resolver: impl Into<String>,
        argument: impl Into<String>,
        declared: impl Into<String>,
        span: Range<usize>,
    ) -> Box<Error> {
        Box::new(Error::UnknownArgument {
            src: self.named_source(),
            span: span.into(),
            resolver: resolver.into(),
            argument: argument.into(),
            declared: declared.into(),
        })
    }

    pub(crate) fn unsupported_version(
        &self,
        version: impl Into<String>,
        supported: impl Into<String>,
        span: Range<usize>,
    ) -> Box<Error> {
        Box::new(Error::UnsupportedTemplateVersion {
            src: self.named_source(),
            span: span.into(),
            version: version.into(),
            supported: supported.into(),
        })
    }

    pub(crate) fn statement_index_mismatch(
        &self,
        index: usize,
        statements: usize,
        span: Range<usize>,
    ) -> Box<Error> {
        Box::new(Error::StatementIndexMismatch {
            src: self.named_source(),
            span: span.into(),
            index,
            statements,
            expected: statements.saturating_sub(1),
        })
    }

    pub(crate) fn undefined_variable(&self, name: impl Into<String>, span: Range<usize>) -> Box<Error> {
        Box::new(Error::UndefinedVariable {
            src: self.named_source(),
            span: span.into(),
            name: name.into(),
        })
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("malformed template: {message}")]
    #[diagnostic(code(stratus::malformed_template))]
    MalformedTemplate {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
    },

    #[error("unknown placeholder '${path}'")]
    #[diagnostic(
        code(stratus::unknown_placeholder),
        help("placeholders must refer to args.NAME, util.* or result (optionally prefixed with ctx.)")
    )]
    UnknownPlaceholder {
        #[source_code]
        src: NamedSource<String>,
        #[label("not a recognised placeholder")]
        span: SourceSpan,
        path: String,
    },

    #[error("'{argument}' is not an argument of {resolver}")]
    #[diagnostic(
        code(stratus::unknown_argument),
        help("declared arguments: {declared}")
    )]
    UnknownArgument {
        #[source_code]
        src: NamedSource<String>,
        #[label("unknown argument")]
        span: SourceSpan,
        resolver: String,
        argument: String,
        declared: String,
    },

    #[error("unsupported template version '{version}'")]
    #[diagnostic(
        code(stratus::unsupported_template_version),
        help("supported versions: {supported}")
    )]
    UnsupportedTemplateVersion {
        #[source_code]
        src: NamedSource<String>,
        #[label("declared here")]
        span: SourceSpan,
        version: String,
        supported: String,
    },

    #[error("response reads statement {index} but the request issues {statements} statement(s)")]
    #[diagnostic(
        code(stratus::statement_index_mismatch),
        help("statement indices are 0-based, the final statement is index {expected}")
    )]
    StatementIndexMismatch {
        #[source_code]
        src: NamedSource<String>,
        #[label("statement {index} read here")]
        span: SourceSpan,
        index: usize,
        statements: usize,
        expected: usize,
    },

    #[error("statement uses undefined variable ':{name}'")]
    #[diagnostic(
        code(stratus::undefined_variable),
        help("declare \":{name}\" in the request's variableMap")
    )]
    UndefinedVariable {
        #[source_code]
        src: NamedSource<String>,
        #[label("undefined variable")]
        span: SourceSpan,
        name: String,
    },
}
