//! The graph-store contract the seeding pipeline consumes.

use crate::types::{Edge, GraphResult, PropertyFilter, PropertyMap, Vertex, VertexId};

/// The exact set of operations the ingestion core depends on against
/// the Gremlin-compatible graph back end. Nothing beyond this surface
/// is consumed; the back end's own internals are out of scope.
#[async_trait::async_trait]
pub trait GraphRepository: Send + Sync {
    /// Creates a new vertex with the given label and properties.
    async fn add_vertex(&self, label: &str, props: PropertyMap) -> GraphResult<Vertex>;

    /// Creates a new edge from `out_id` to `in_id`.
    async fn add_edge(
        &self,
        label: &str,
        out_id: VertexId,
        in_id: VertexId,
        props: Option<PropertyMap>,
    ) -> GraphResult<Edge>;

    /// Looks up a vertex by id.
    async fn get_vertex_by_id(&self, id: VertexId) -> GraphResult<Option<Vertex>>;

    /// Overwrites a subset of a vertex's properties. Returns `false` if
    /// the vertex does not exist.
    async fn update_vertex_properties(&self, id: VertexId, props: PropertyMap) -> GraphResult<bool>;

    /// Idempotent on `(label, key, value)`: returns the existing
    /// vertex's id if one matches, otherwise creates it with `props`.
    async fn upsert_vertex_and_return_id(
        &self,
        label: &str,
        key: &str,
        value: &str,
        props: PropertyMap,
    ) -> GraphResult<VertexId>;

    /// Looks up a vertex id by an exact label+property match.
    async fn get_vertex_id_by_label_and_property(
        &self,
        label: &str,
        key: &str,
        value: &str,
    ) -> GraphResult<Option<VertexId>>;

    /// Looks up a full vertex by an exact label+property match.
    async fn get_vertex_by_label_and_property(
        &self,
        label: &str,
        key: &str,
        value: &str,
    ) -> GraphResult<Option<Vertex>>;

    /// Counts vertices with `label`, optionally narrowed by `filter`.
    async fn count_vertices_by_label(
        &self,
        label: &str,
        filter: Option<PropertyFilter>,
    ) -> GraphResult<u64>;

    /// Lists vertices with `label`, optionally narrowed by `filter`.
    /// Search-surface only; the ingestion core never calls this.
    async fn get_vertices_by_label(
        &self,
        label: &str,
        filter: Option<PropertyFilter>,
        count: usize,
        offset: usize,
    ) -> GraphResult<Vec<Vertex>>;
}
