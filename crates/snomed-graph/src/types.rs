//! Property-graph value types shared by the [`crate::GraphRepository`]
//! contract and its in-memory test double.

use std::collections::HashMap;

use thiserror::Error;

/// Opaque vertex identifier assigned by the graph store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VertexId(pub String);

/// Opaque edge identifier assigned by the graph store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EdgeId(pub String);

/// A scalar property value.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    /// A string value.
    String(String),
    /// A boolean value.
    Bool(bool),
    /// A signed integer value.
    Integer(i64),
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::String(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::String(value)
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        PropertyValue::Bool(value)
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        PropertyValue::Integer(value)
    }
}

impl From<u32> for PropertyValue {
    fn from(value: u32) -> Self {
        PropertyValue::Integer(value as i64)
    }
}

impl From<u64> for PropertyValue {
    fn from(value: u64) -> Self {
        PropertyValue::Integer(value as i64)
    }
}

/// A vertex or edge property bag.
pub type PropertyMap = HashMap<String, PropertyValue>;

/// Equality filter applied by `count_vertices_by_label` and
/// `get_vertices_by_label`. Only used by the search surface, which the
/// ingestion core itself never calls.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyFilter {
    /// The property key to match.
    pub key: String,
    /// The value it must equal.
    pub value: PropertyValue,
}

/// A graph vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    /// Store-assigned identifier.
    pub id: VertexId,
    /// Vertex label (e.g. `SnomedConcept`).
    pub label: String,
    /// Vertex properties.
    pub properties: PropertyMap,
}

/// A graph edge.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    /// Store-assigned identifier.
    pub id: EdgeId,
    /// Edge label (e.g. `IS_A`, `DEFINING_REL`).
    pub label: String,
    /// Source vertex.
    pub out_id: VertexId,
    /// Destination vertex.
    pub in_id: VertexId,
    /// Edge properties.
    pub properties: PropertyMap,
}

/// Errors surfaced by a [`crate::GraphRepository`] implementation.
#[derive(Error, Debug)]
pub enum GraphError {
    /// The referenced vertex or edge does not exist.
    #[error("graph entity not found: {0}")]
    NotFound(String),

    /// The underlying store rejected or failed the operation.
    #[error("graph backend error: {0}")]
    Backend(String),
}

/// Result type for graph repository operations.
pub type GraphResult<T> = Result<T, GraphError>;
