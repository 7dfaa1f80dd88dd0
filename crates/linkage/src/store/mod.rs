//! Diagram snapshot store for linkage.
//!
//! This module provides the storage trait the CLI executes against and the
//! in-memory backend that implements it. The store owns the current edge
//! snapshot and every derivation the engine computes from it.
//!
//! # Architecture
//!
//! The store keeps the raw, insertion-ordered edge list as the source of
//! truth. Whenever the edge set changes it rebuilds the engine's adjacency
//! index once and refreshes the cached critical path and dependency counts
//! from that single shared instance; read queries then serve from the
//! caches and the shared index without recomputing anything. On-demand
//! queries (closures, hop distances, chain emphasis) run against the cached
//! adjacency index at call time.
//!
//! # Edge Direction Convention
//!
//! Edges run `source -> target`, meaning **target depends on source**:
//!
//! - the source is upstream of the target
//! - the target is downstream of the source
//! - `upstream(n)` answers "what does n transitively depend on"
//! - `downstream(n)` answers "what transitively depends on n"
//!
//! # Malformed graphs
//!
//! Nothing in the store rejects graph shape. Cycles, self-references,
//! duplicate connectors between the same pair, and dangling node ids are
//! all preserved exactly as written; the cycle helpers only *report*.

use crate::error::Result;
use async_trait::async_trait;
use linkage_engine::{
    DependencyCounts, DependencyType, Direction, Edge, EdgeFilter, EdgeId, EmphasisTier,
    HopDistanceMap, NewEdge, NodeId, ReachabilitySet,
};
use std::collections::HashMap;

// Storage backend implementations
pub mod in_memory;

/// Core storage trait for diagram snapshots.
///
/// Implementations must be `Send + Sync` to support concurrent access in
/// async contexts. The trait is object-safe, allowing dynamic dispatch via
/// `Box<dyn DiagramStore>`.
///
/// # Method Categories
///
/// - **Edges**: `add_edge`, `remove_edge`, `get_edge`, `list_edges`,
///   `edge_count`, `export_all`
/// - **Graph queries**: `upstream`, `downstream`, `hop_distances`,
///   `chain_emphasis`, `critical_path`, `dependency_counts`, `node_ids`
/// - **Cycle diagnostics**: `would_create_cycle`, `cycles`
///
/// # Determinism
///
/// Every query is idempotent: calling it twice against the same snapshot
/// yields equal results. Mutations recompute all derivations before they
/// return, so a reader never observes a stale cache.
#[async_trait]
pub trait DiagramStore: Send + Sync {
    // ========== Edge Operations ==========

    /// Add a connector to the snapshot, assigning it a generated id.
    ///
    /// Cycles are accepted; use [`DiagramStore::would_create_cycle`] first
    /// when the caller wants to warn.
    async fn add_edge(&mut self, new_edge: NewEdge) -> Result<Edge>;

    /// Remove a connector by id, returning the removed edge.
    async fn remove_edge(&mut self, id: &EdgeId) -> Result<Edge>;

    /// Look up a connector by id.
    async fn get_edge(&self, id: &EdgeId) -> Result<Option<Edge>>;

    /// List connectors matching a filter, in insertion order.
    async fn list_edges(&self, filter: &EdgeFilter) -> Result<Vec<Edge>>;

    /// Total number of connectors in the snapshot.
    async fn edge_count(&self) -> Result<usize>;

    /// Every connector, in insertion order (for persistence).
    async fn export_all(&self) -> Result<Vec<Edge>>;

    // ========== Graph Queries ==========

    /// Nodes touching at least one connector, in first-seen order.
    async fn node_ids(&self) -> Result<Vec<NodeId>>;

    /// Direct neighbors of a node in one direction, in edge order.
    ///
    /// This is the list walk-mode UIs offer as next steps; duplicates are
    /// preserved when parallel connectors exist.
    async fn neighbors(&self, node: &NodeId, direction: Direction) -> Result<Vec<NodeId>>;

    /// Transitive prerequisites of a node.
    async fn upstream(&self, node: &NodeId) -> Result<ReachabilitySet>;

    /// Transitive dependents of a node.
    async fn downstream(&self, node: &NodeId) -> Result<ReachabilitySet>;

    /// Minimum hop counts from a node in one direction.
    async fn hop_distances(&self, node: &NodeId, direction: Direction) -> Result<HopDistanceMap>;

    /// Merged-direction emphasis tiers for the chain-highlight overlay.
    async fn chain_emphasis(&self, node: &NodeId) -> Result<HashMap<NodeId, EmphasisTier>>;

    /// The critical path through the current snapshot (cached).
    async fn critical_path(&self) -> Result<Vec<NodeId>>;

    /// Direct in/out badge counts per node (cached).
    async fn dependency_counts(&self) -> Result<DependencyCounts>;

    // ========== Cycle Diagnostics ==========

    /// Whether adding `source -> target` would close a directed cycle.
    async fn would_create_cycle(&self, source: &NodeId, target: &NodeId) -> Result<bool>;

    /// Strongly connected components with more than one node, plus
    /// self-loops, as the editor's cycle warning list.
    async fn cycles(&self) -> Result<Vec<Vec<NodeId>>>;
}

/// Count edges per dependency type, for the info summary.
#[must_use]
pub fn type_histogram(edges: &[Edge]) -> Vec<(DependencyType, usize)> {
    DependencyType::ALL
        .iter()
        .map(|&dep_type| {
            let count = edges
                .iter()
                .filter(|edge| edge.dependency_type == dep_type)
                .count();
            (dep_type, count)
        })
        .filter(|(_, count)| *count > 0)
        .collect()
}
