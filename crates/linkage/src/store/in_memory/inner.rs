//! Core in-memory store data structures.
//!
//! The inner store owns the raw edge list and every derivation computed
//! from it. It is wrapped in `Arc<Mutex<>>` for thread safety.

use crate::id_generation::{EdgeIdGenerator, EdgeIdGeneratorConfig};
use linkage_engine::{
    critical_path, dependency_counts, AdjacencyList, DependencyCounts, DependencyType, Edge,
    NodeId,
};
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;
use tracing::debug;

/// Inner store structure (not thread-safe on its own).
///
/// The `edges` vector is the source of truth; everything else is derived.
/// Derivations are recomputed wholesale on every mutation - never patched
/// incrementally - so they hold no identity across rebuilds and a reader
/// can never observe a half-updated cache.
pub(crate) struct InMemoryStoreInner {
    /// Connectors in insertion order. Duplicates and self-references are
    /// preserved; direct counts depend on seeing every occurrence.
    pub(super) edges: Vec<Edge>,

    /// Adjacency index rebuilt once per edge-list change and shared by
    /// every query.
    pub(super) adjacency: AdjacencyList,

    /// Cached critical path for the current snapshot.
    pub(super) critical: Vec<NodeId>,

    /// Cached per-node badge counts for the current snapshot.
    pub(super) counts: DependencyCounts,

    /// petgraph mirror of the snapshot, used only for cycle diagnostics.
    ///
    /// Nodes contain `NodeId` values, edges contain `DependencyType`.
    /// Edge direction matches the snapshot: source -> target.
    pub(super) graph: DiGraph<NodeId, DependencyType>,

    /// Mapping from NodeId to graph NodeIndex in the mirror.
    pub(super) node_map: HashMap<NodeId, NodeIndex>,

    /// Generator for new edge ids.
    pub(super) id_generator: EdgeIdGenerator,

    /// Prefix for edge ids (e.g., "wire").
    prefix: String,
}

impl InMemoryStoreInner {
    /// Create a new empty store instance.
    pub(crate) fn new(prefix: String) -> Self {
        let config = EdgeIdGeneratorConfig {
            prefix: prefix.clone(),
            snapshot_size: 0,
        };

        Self {
            edges: Vec::new(),
            adjacency: AdjacencyList::default(),
            critical: Vec::new(),
            counts: DependencyCounts::default(),
            graph: DiGraph::new(),
            node_map: HashMap::new(),
            id_generator: EdgeIdGenerator::new(config),
            prefix: prefix.clone(),
        }
    }

    /// Rebuild every derivation from the current edge list.
    ///
    /// Called exactly once per mutation, after `edges` has changed. Keeping
    /// the rebuild out of the per-query path is what makes repeated queries
    /// over an unchanged snapshot O(V+E) total rather than per call.
    pub(super) fn rebuild_derived(&mut self) {
        self.adjacency = AdjacencyList::build(&self.edges);
        self.critical = critical_path(&self.adjacency);
        self.counts = dependency_counts(&self.edges);

        self.graph.clear();
        self.node_map.clear();
        let graph = &mut self.graph;
        let node_map = &mut self.node_map;
        for edge in &self.edges {
            let source = *node_map
                .entry(edge.source.clone())
                .or_insert_with(|| graph.add_node(edge.source.clone()));
            let target = *node_map
                .entry(edge.target.clone())
                .or_insert_with(|| graph.add_node(edge.target.clone()));
            graph.add_edge(source, target, edge.dependency_type);
        }

        debug!(
            edges = self.edges.len(),
            nodes = self.adjacency.len(),
            critical_len = self.critical.len(),
            "rebuilt derived graph state"
        );
    }

    /// Refresh the generator's size bucket if the edge count crossed a
    /// length threshold (100, 1000 edges).
    pub(super) fn update_id_generator_if_needed(&mut self) {
        let current_size = self.edges.len();
        let old_size = self.id_generator.snapshot_size();

        let needs_update = match (old_size, current_size) {
            // Crossing 100 boundary (4 -> 5 chars)
            (0..=100, 101..) => true,
            // Crossing 1000 boundary (5 -> 6 chars)
            (0..=1000, 1001..) => true,
            // Crossing backwards (rare, but possible after disconnects)
            (101.., 0..=100) => true,
            (1001.., 0..=1000) => true,
            _ => false,
        };

        if needs_update {
            let mut generator = EdgeIdGenerator::new(EdgeIdGeneratorConfig {
                prefix: self.prefix.clone(),
                snapshot_size: current_size,
            });
            // Re-register all existing ids (O(n), but only at thresholds)
            for edge in &self.edges {
                generator.register_id(edge.id.as_str().to_string());
            }
            self.id_generator = generator;
        }
    }
}
