//! Resource model types for the stratus resource graph.
//!
//! This crate provides the typed building blocks that a stack is made of.
//! They are plain data: constructing them has no side effects and performs
//! no validation beyond what the type system enforces. Integrity checks
//! (unique ids, known data sources, acyclic dependencies) belong to the
//! graph that owns them.
//!
//! # Architecture
//!
//! ```text
//! stack.toml → strat-manifest (parsing) → strat-ir (model) → strat-graph → Document
//! ```

mod data_source;
mod reference;
mod resolver;
mod resource;

pub use data_source::{DataSource, RELATIONAL_DATABASE};
pub use reference::{OutputRef, ParseOutputRefError, Reference};
pub use resolver::{OperationType, Resolver, ResolverId};
pub use resource::{AttributeValue, Resource, ResourceId, ResourceKind};
