//! The resource graph and the document it serializes to.
//!
//! A [`ResourceGraph`] is the single owner of every resource and resolver
//! in a stack. It enforces the graph's integrity as items are added,
//! computes a deterministic apply order, and renders the declarative
//! [`Document`] handed to the external apply engine.
//!
//! # Example
//!
//! ```
//! use stratus_graph::ResourceGraph;
//! use stratus_ir::{OutputRef, Resource, ResourceKind};
//!
//! let mut graph = ResourceGraph::new();
//! graph.add_resource(Resource::new("net1", ResourceKind::Network))?;
//! graph.add_resource(
//!     Resource::new("db1", ResourceKind::DatabaseCluster)
//!         .reference("vpcId", OutputRef::new("net1", "vpcId")),
//! )?;
//!
//! let order = graph.compute_apply_order()?;
//! assert_eq!(order, ["net1", "db1"]);
//! # Ok::<(), Box<stratus_graph::Error>>(())
//! ```

mod document;
mod error;
mod graph;
mod order;

pub use document::{Document, ResolverEntry, ResourceEntry};
pub use error::{Error, Result};
pub use graph::{GraphState, ResourceGraph};
