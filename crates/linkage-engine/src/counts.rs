//! Direct dependency counts for node badges.
//!
//! Counts are one-hop, not closures, and are intentionally computed from
//! the raw edge list rather than the adjacency index: the badge overlay
//! must stay correct under multi-edges regardless of what duplication
//! semantics a given adjacency consumer applies.

use crate::domain::{Edge, NodeId};
use serde::Serialize;
use std::collections::HashMap;

/// Direct in/out edge counts for one node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NodeDegree {
    /// Connectors pointing into the node.
    #[serde(rename = "in")]
    pub incoming: usize,

    /// Connectors leaving the node.
    #[serde(rename = "out")]
    pub outgoing: usize,
}

/// Per-node direct edge counts.
///
/// Nodes that never appear in any edge are absent; [`DependencyCounts::get`]
/// reads absent entries as zero.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DependencyCounts(HashMap<NodeId, NodeDegree>);

impl DependencyCounts {
    /// Counts for a node, zero for nodes touching no edge.
    #[must_use]
    pub fn get(&self, node: &NodeId) -> NodeDegree {
        self.0.get(node).copied().unwrap_or_default()
    }

    /// Whether the node has an explicit entry.
    #[must_use]
    pub fn contains(&self, node: &NodeId) -> bool {
        self.0.contains_key(node)
    }

    /// Iterate over all counted nodes.
    pub fn iter(&self) -> impl Iterator<Item = (&NodeId, &NodeDegree)> {
        self.0.iter()
    }

    /// Number of nodes with at least one edge.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no node touches any edge.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Tally direct edge counts from the raw edge list.
///
/// Each edge increments `out` on its source and `in` on its target; a
/// self-referencing edge increments both on the same node. Runs in O(E).
#[must_use]
pub fn dependency_counts(edges: &[Edge]) -> DependencyCounts {
    let mut counts: HashMap<NodeId, NodeDegree> = HashMap::new();

    for edge in edges {
        counts.entry(edge.source.clone()).or_default().outgoing += 1;
        counts.entry(edge.target.clone()).or_default().incoming += 1;
    }

    DependencyCounts(counts)
}
