//! # snomed-graph
//!
//! The `GraphRepository` contract the SNOMED CT seeding pipeline
//! consumes against its external property-graph store, plus an
//! in-memory implementation for tests.

#![warn(missing_docs)]

mod in_memory;
mod repository;
mod types;

pub use in_memory::InMemoryGraph;
pub use repository::GraphRepository;
pub use types::{Edge, EdgeId, GraphError, GraphResult, PropertyFilter, PropertyMap, PropertyValue, Vertex, VertexId};
