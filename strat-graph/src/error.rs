use miette::Diagnostic;
use stratus_ir::{ResolverId, ResourceId, ResourceKind};
use thiserror::Error;

/// Result type for graph operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("duplicate resource id '{id}'")]
    #[diagnostic(
        code(stratus::duplicate_id),
        help("resource ids must be unique within a stack")
    )]
    DuplicateId { id: ResourceId },

    #[error("resolver {resolver} uses unknown data source '{data_source}'")]
    #[diagnostic(
        code(stratus::unknown_data_source),
        help("declare the data source before adding resolvers that use it")
    )]
    UnknownDataSource {
        resolver: ResolverId,
        data_source: ResourceId,
    },

    #[error("resolver {resolver} uses '{data_source}', which is a {kind} and not a data source")]
    #[diagnostic(code(stratus::unknown_data_source))]
    NotADataSource {
        resolver: ResolverId,
        data_source: ResourceId,
        kind: ResourceKind,
    },

    #[error("field {resolver} already has a resolver")]
    #[diagnostic(
        code(stratus::duplicate_resolver),
        help("each field can be bound to exactly one resolver")
    )]
    DuplicateResolver { resolver: ResolverId },

    #[error("cyclic dependency: {}", cycle_path(.cycle))]
    #[diagnostic(
        code(stratus::cyclic_dependency),
        help("remove one of the references or depends_on edges on the cycle")
    )]
    CyclicDependency { cycle: Vec<ResourceId> },

    #[error("'{from}' depends on '{to}', which is not in the graph")]
    #[diagnostic(code(stratus::unknown_reference))]
    UnknownReference { from: ResourceId, to: ResourceId },

    #[error("cannot {operation}: the graph is sealed")]
    #[diagnostic(
        code(stratus::graph_sealed),
        help("a graph is sealed once it has been serialized")
    )]
    GraphSealed { operation: &'static str },

    #[error("failed to render document")]
    #[diagnostic(code(stratus::render_error))]
    Render {
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    /// The resource id that caused the error, if any.
    pub fn resource_id(&self) -> Option<&ResourceId> {
        match self {
            Error::DuplicateId { id } => Some(id),
            Error::UnknownDataSource { data_source, .. }
            | Error::NotADataSource { data_source, .. } => Some(data_source),
            Error::CyclicDependency { cycle } => cycle.first(),
            Error::UnknownReference { to, .. } => Some(to),
            _ => None,
        }
    }
}

/// Render a cycle as `a -> b -> a`.
fn cycle_path(cycle: &[ResourceId]) -> String {
    let mut parts: Vec<&str> = cycle.iter().map(ResourceId::as_str).collect();
    if let Some(first) = cycle.first() {
        parts.push(first.as_str());
    }
    parts.join(" -> ")
}
