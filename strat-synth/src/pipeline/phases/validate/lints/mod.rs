//! Built-in lints.

mod dangling_reference;
mod data_source_binding;
mod mutation_read_back;
mod resolver_templates;
mod unused_data_source;

pub use dangling_reference::DanglingReferenceLint;
pub use data_source_binding::DataSourceBindingLint;
pub use mutation_read_back::MutationReadBackLint;
pub use resolver_templates::ResolverTemplateLint;
pub use unused_data_source::UnusedDataSourceLint;

#[cfg(test)]
pub(crate) fn parse_manifest(content: &str) -> stratus_manifest::Manifest {
    content.parse().expect("Failed to parse test manifest")
}
