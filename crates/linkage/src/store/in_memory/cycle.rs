//! Cycle diagnostics over the petgraph mirror.
//!
//! Diagrams are expected to be acyclic, so the editor warns when a new
//! connector closes a loop and offers a listing of the loops already
//! present. Diagnostics only: nothing here ever rejects or repairs the
//! snapshot, and every traversal elsewhere in the crate stays correct on
//! cyclic input.

use linkage_engine::{DependencyType, NodeId};
use petgraph::algo;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;

/// Check whether adding `source -> target` would close a directed cycle.
///
/// A cycle appears exactly when a path `target -> ... -> source` already
/// exists. Endpoints the snapshot has never seen cannot close anything and
/// report `false`.
pub(super) fn would_create_cycle_impl(
    graph: &DiGraph<NodeId, DependencyType>,
    node_map: &HashMap<NodeId, NodeIndex>,
    source: &NodeId,
    target: &NodeId,
) -> bool {
    if source == target {
        return true;
    }

    let (Some(&source_node), Some(&target_node)) = (node_map.get(source), node_map.get(target))
    else {
        return false;
    };

    algo::has_path_connecting(graph, target_node, source_node, None)
}

/// List the cycles present in the snapshot.
///
/// Returns every strongly connected component with more than one node,
/// plus single nodes carrying a self-loop. Components come out in
/// petgraph's SCC order, which is stable for a given snapshot.
pub(super) fn find_cycles(graph: &DiGraph<NodeId, DependencyType>) -> Vec<Vec<NodeId>> {
    algo::tarjan_scc(graph)
        .into_iter()
        .filter(|component| {
            component.len() > 1
                || component
                    .first()
                    .is_some_and(|&node| graph.find_edge(node, node).is_some())
        })
        .map(|component| {
            component
                .into_iter()
                .map(|index| graph[index].clone())
                .collect()
        })
        .collect()
}
