//! An in-memory [`GraphRepository`] test double.
//!
//! Used by the pipeline and service integration tests in place of a
//! real Gremlin-compatible store, which stays out of this repository's
//! scope.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::RwLock;

use crate::repository::GraphRepository;
use crate::types::{Edge, EdgeId, GraphResult, PropertyFilter, PropertyMap, Vertex, VertexId};

/// A thread-safe, process-local graph store backed by `HashMap`s.
#[derive(Default)]
pub struct InMemoryGraph {
    vertices: RwLock<HashMap<VertexId, Vertex>>,
    edges: RwLock<HashMap<EdgeId, Edge>>,
    next_vertex_id: AtomicU64,
    next_edge_id: AtomicU64,
}

impl InMemoryGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    fn fresh_vertex_id(&self) -> VertexId {
        let n = self.next_vertex_id.fetch_add(1, Ordering::Relaxed);
        VertexId(format!("v{n}"))
    }

    fn fresh_edge_id(&self) -> EdgeId {
        let n = self.next_edge_id.fetch_add(1, Ordering::Relaxed);
        EdgeId(format!("e{n}"))
    }

    fn matches(vertex: &Vertex, label: &str, key: &str, value: &str) -> bool {
        vertex.label == label
            && matches!(
                vertex.properties.get(key),
                Some(crate::types::PropertyValue::String(s)) if s == value
            )
    }

    fn matches_filter(vertex: &Vertex, filter: &PropertyFilter) -> bool {
        vertex.properties.get(&filter.key) == Some(&filter.value)
    }

    /// Total number of vertices, for test assertions.
    pub async fn vertex_count(&self) -> usize {
        self.vertices.read().await.len()
    }

    /// Total number of edges, for test assertions.
    pub async fn edge_count(&self) -> usize {
        self.edges.read().await.len()
    }

    /// All edges with the given label, for test assertions.
    pub async fn edges_with_label(&self, label: &str) -> Vec<Edge> {
        self.edges
            .read()
            .await
            .values()
            .filter(|e| e.label == label)
            .cloned()
            .collect()
    }
}

#[async_trait::async_trait]
impl GraphRepository for InMemoryGraph {
    async fn add_vertex(&self, label: &str, props: PropertyMap) -> GraphResult<Vertex> {
        let id = self.fresh_vertex_id();
        let vertex = Vertex {
            id,
            label: label.to_string(),
            properties: props,
        };
        self.vertices
            .write()
            .await
            .insert(vertex.id.clone(), vertex.clone());
        Ok(vertex)
    }

    async fn add_edge(
        &self,
        label: &str,
        out_id: VertexId,
        in_id: VertexId,
        props: Option<PropertyMap>,
    ) -> GraphResult<Edge> {
        let id = self.fresh_edge_id();
        let edge = Edge {
            id,
            label: label.to_string(),
            out_id,
            in_id,
            properties: props.unwrap_or_default(),
        };
        self.edges
            .write()
            .await
            .insert(edge.id.clone(), edge.clone());
        Ok(edge)
    }

    async fn get_vertex_by_id(&self, id: VertexId) -> GraphResult<Option<Vertex>> {
        Ok(self.vertices.read().await.get(&id).cloned())
    }

    async fn update_vertex_properties(&self, id: VertexId, props: PropertyMap) -> GraphResult<bool> {
        let mut vertices = self.vertices.write().await;
        match vertices.get_mut(&id) {
            Some(vertex) => {
                vertex.properties.extend(props);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn upsert_vertex_and_return_id(
        &self,
        label: &str,
        key: &str,
        value: &str,
        props: PropertyMap,
    ) -> GraphResult<VertexId> {
        let mut vertices = self.vertices.write().await;
        if let Some(existing) = vertices.values().find(|v| Self::matches(v, label, key, value)) {
            return Ok(existing.id.clone());
        }
        let id = self.fresh_vertex_id();
        vertices.insert(
            id.clone(),
            Vertex {
                id: id.clone(),
                label: label.to_string(),
                properties: props,
            },
        );
        Ok(id)
    }

    async fn get_vertex_id_by_label_and_property(
        &self,
        label: &str,
        key: &str,
        value: &str,
    ) -> GraphResult<Option<VertexId>> {
        Ok(self
            .vertices
            .read()
            .await
            .values()
            .find(|v| Self::matches(v, label, key, value))
            .map(|v| v.id.clone()))
    }

    async fn get_vertex_by_label_and_property(
        &self,
        label: &str,
        key: &str,
        value: &str,
    ) -> GraphResult<Option<Vertex>> {
        Ok(self
            .vertices
            .read()
            .await
            .values()
            .find(|v| Self::matches(v, label, key, value))
            .cloned())
    }

    async fn count_vertices_by_label(
        &self,
        label: &str,
        filter: Option<PropertyFilter>,
    ) -> GraphResult<u64> {
        let vertices = self.vertices.read().await;
        let count = vertices
            .values()
            .filter(|v| v.label == label)
            .filter(|v| filter.as_ref().map(|f| Self::matches_filter(v, f)).unwrap_or(true))
            .count();
        Ok(count as u64)
    }

    async fn get_vertices_by_label(
        &self,
        label: &str,
        filter: Option<PropertyFilter>,
        count: usize,
        offset: usize,
    ) -> GraphResult<Vec<Vertex>> {
        let vertices = self.vertices.read().await;
        let matching: Vec<Vertex> = vertices
            .values()
            .filter(|v| v.label == label)
            .filter(|v| filter.as_ref().map(|f| Self::matches_filter(v, f)).unwrap_or(true))
            .cloned()
            .collect();
        Ok(matching.into_iter().skip(offset).take(count).collect())
    }
}
