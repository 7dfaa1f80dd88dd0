//! DiagramStore trait implementation for the in-memory store.

use super::cycle::{find_cycles, would_create_cycle_impl};
use super::InMemoryStore;
use crate::error::{Error, Result};
use crate::store::DiagramStore;
use async_trait::async_trait;
use linkage_engine::{
    chain_emphasis, hop_distances, reachable, DependencyCounts, Direction, Edge, EdgeFilter,
    EdgeId, EmphasisTier, HopDistanceMap, NewEdge, NodeId, ReachabilitySet,
};
use std::collections::HashMap;
use tracing::debug;

#[async_trait]
impl DiagramStore for InMemoryStore {
    async fn add_edge(&mut self, new_edge: NewEdge) -> Result<Edge> {
        let mut inner = self.lock().await;

        // Refresh the generator bucket before drawing an id from it.
        inner.update_id_generator_if_needed();
        let id = inner.id_generator.generate(
            new_edge.source.as_str(),
            new_edge.target.as_str(),
            &new_edge.dependency_type.to_string(),
        )?;

        let edge = Edge {
            id: EdgeId::new(id),
            source: new_edge.source,
            target: new_edge.target,
            dependency_type: new_edge.dependency_type,
        };
        edge.validate()
            .map_err(|e| Error::Storage(crate::error::StorageError::InvalidFormat(e)))?;

        debug!(edge = %edge.id, source = %edge.source, target = %edge.target, "adding edge");
        inner.edges.push(edge.clone());
        inner.rebuild_derived();

        Ok(edge)
    }

    async fn remove_edge(&mut self, id: &EdgeId) -> Result<Edge> {
        let mut inner = self.lock().await;

        let position = inner
            .edges
            .iter()
            .position(|edge| edge.id == *id)
            .ok_or_else(|| Error::EdgeNotFound(id.clone()))?;

        let removed = inner.edges.remove(position);
        debug!(edge = %removed.id, "removed edge");
        inner.rebuild_derived();

        Ok(removed)
    }

    async fn get_edge(&self, id: &EdgeId) -> Result<Option<Edge>> {
        let inner = self.lock().await;
        Ok(inner.edges.iter().find(|edge| edge.id == *id).cloned())
    }

    async fn list_edges(&self, filter: &EdgeFilter) -> Result<Vec<Edge>> {
        let inner = self.lock().await;
        let limit = filter.limit.unwrap_or(usize::MAX);
        Ok(inner
            .edges
            .iter()
            .filter(|edge| filter.matches(edge))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn edge_count(&self) -> Result<usize> {
        let inner = self.lock().await;
        Ok(inner.edges.len())
    }

    async fn export_all(&self) -> Result<Vec<Edge>> {
        let inner = self.lock().await;
        Ok(inner.edges.clone())
    }

    async fn node_ids(&self) -> Result<Vec<NodeId>> {
        let inner = self.lock().await;
        Ok(inner.adjacency.nodes().cloned().collect())
    }

    async fn neighbors(&self, node: &NodeId, direction: Direction) -> Result<Vec<NodeId>> {
        let inner = self.lock().await;
        Ok(direction.neighbors(&inner.adjacency, node).to_vec())
    }

    async fn upstream(&self, node: &NodeId) -> Result<ReachabilitySet> {
        let inner = self.lock().await;
        Ok(reachable(node, &inner.adjacency, Direction::Upstream))
    }

    async fn downstream(&self, node: &NodeId) -> Result<ReachabilitySet> {
        let inner = self.lock().await;
        Ok(reachable(node, &inner.adjacency, Direction::Downstream))
    }

    async fn hop_distances(&self, node: &NodeId, direction: Direction) -> Result<HopDistanceMap> {
        let inner = self.lock().await;
        Ok(hop_distances(node, &inner.adjacency, direction))
    }

    async fn chain_emphasis(&self, node: &NodeId) -> Result<HashMap<NodeId, EmphasisTier>> {
        let inner = self.lock().await;
        Ok(chain_emphasis(node, &inner.adjacency))
    }

    async fn critical_path(&self) -> Result<Vec<NodeId>> {
        let inner = self.lock().await;
        Ok(inner.critical.clone())
    }

    async fn dependency_counts(&self) -> Result<DependencyCounts> {
        let inner = self.lock().await;
        Ok(inner.counts.clone())
    }

    async fn would_create_cycle(&self, source: &NodeId, target: &NodeId) -> Result<bool> {
        let inner = self.lock().await;
        Ok(would_create_cycle_impl(
            &inner.graph,
            &inner.node_map,
            source,
            target,
        ))
    }

    async fn cycles(&self) -> Result<Vec<Vec<NodeId>>> {
        let inner = self.lock().await;
        Ok(find_cycles(&inner.graph))
    }
}
