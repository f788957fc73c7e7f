//! Mapping template parsing and validation.
//!
//! Resolver templates are not treated as opaque text. Each template is
//! scanned for placeholders in a small tagged grammar:
//!
//! ```text
//! placeholder := '$' ( '{' path '}' | path )
//! path        := segment ( '.' segment | '[' digits ']' )*
//! ```
//!
//! Placeholders resolve to field arguments (`args.NAME`), utility calls
//! (`util.*`) or the backend result (`result`), which lets the
//! [`TemplateValidator`] check a resolver before anything is deployed.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod error;
mod placeholder;
mod request;
mod response;
mod scanner;
mod validator;

pub use error::{Error, Result, TemplateSource};
pub use placeholder::{Placeholder, PlaceholderKind, scan_placeholders};
pub use request::{RequestTemplate, Statement};
pub use response::ResponseTemplate;
pub use validator::{DEFAULT_TEMPLATE_VERSION, TemplateValidator, ValidationReport};
