//! Critical path computation.
//!
//! The critical path is the longest chain of nodes connected by directed
//! edges, by node count. Dependency diagrams are expected to be acyclic,
//! but nothing here assumes it: the walk treats any node already on the
//! current path as a dead end, which bounds path length by the node count
//! and guarantees termination on cyclic input.
//!
//! Determinism is load-bearing. Among paths of equal maximum length the
//! result prefers the candidate start enumerated earliest, and within a
//! single walk the downstream neighbor listed earliest. "Earliest" is the
//! first-seen node order recorded by [`AdjacencyList`], so repeated runs
//! over the same edge list always return the same chain.

use crate::adjacency::AdjacencyList;
use crate::domain::NodeId;
use std::collections::HashSet;
use tracing::trace;

/// Compute the critical path through the dependency graph.
///
/// Candidate starts are the nodes with no upstream neighbors; when the
/// whole graph is cyclic and no such node exists, every node is a
/// candidate, in first-seen order. From each candidate a depth-first walk
/// follows downstream edges, keeping the longest simple path found.
///
/// Every consecutive pair in the result is joined by an edge present in
/// the input, the result contains no duplicate node, and an empty index
/// yields an empty path.
#[must_use]
pub fn critical_path(adj: &AdjacencyList) -> Vec<NodeId> {
    if adj.is_empty() {
        return Vec::new();
    }

    let roots: Vec<&NodeId> = adj
        .nodes()
        .filter(|node| adj.upstream_of(node).is_empty())
        .collect();

    // A fully cyclic graph has no roots; fall back to every node so the
    // path is still found deterministically.
    let candidates: Vec<&NodeId> = if roots.is_empty() {
        adj.nodes().collect()
    } else {
        roots
    };

    let mut best: Vec<NodeId> = Vec::new();
    let mut path: Vec<NodeId> = Vec::new();
    let mut on_path: HashSet<NodeId> = HashSet::new();

    for start in candidates {
        path.clear();
        on_path.clear();
        walk_longest(start, adj, &mut path, &mut on_path, &mut best);
    }

    trace!(len = best.len(), "critical path computed");
    best
}

/// Depth-first walk along downstream edges, tracking the current path.
///
/// `best` is replaced only when the current path is strictly longer, which
/// keeps the first-found path among equals and so preserves both tie-break
/// rules: candidates run in enumeration order, and neighbors are explored
/// in downstream-list order.
fn walk_longest(
    node: &NodeId,
    adj: &AdjacencyList,
    path: &mut Vec<NodeId>,
    on_path: &mut HashSet<NodeId>,
    best: &mut Vec<NodeId>,
) {
    path.push(node.clone());
    on_path.insert(node.clone());

    if path.len() > best.len() {
        *best = path.clone();
    }

    for neighbor in adj.downstream_of(node) {
        // A node already on the current path is a dead end (cycle guard).
        if !on_path.contains(neighbor) {
            walk_longest(neighbor, adj, path, on_path, best);
        }
    }

    on_path.remove(node);
    path.pop();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DependencyType, Edge};

    fn adj(edges: &[(&str, &str)]) -> AdjacencyList {
        let edges: Vec<Edge> = edges
            .iter()
            .enumerate()
            .map(|(i, (s, t))| Edge::new(format!("e{i}"), *s, *t, DependencyType::DependsOn))
            .collect();
        AdjacencyList::build(&edges)
    }

    fn ids(path: &[NodeId]) -> Vec<&str> {
        path.iter().map(NodeId::as_str).collect()
    }

    #[test]
    fn empty_graph_yields_empty_path() {
        assert!(critical_path(&AdjacencyList::build(&[])).is_empty());
    }

    #[test]
    fn single_edge_yields_both_nodes() {
        let adj = adj(&[("a", "b")]);
        assert_eq!(ids(&critical_path(&adj)), vec!["a", "b"]);
    }

    #[test]
    fn longest_branch_wins() {
        let adj = adj(&[("a", "b"), ("b", "c"), ("c", "d"), ("a", "e")]);
        assert_eq!(ids(&critical_path(&adj)), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn tie_prefers_first_listed_downstream_neighbor() {
        // b's downstream list is [c, d]; both complete a 3-node chain.
        let adj = adj(&[("a", "b"), ("b", "c"), ("b", "d")]);
        assert_eq!(ids(&critical_path(&adj)), vec!["a", "b", "c"]);
    }

    #[test]
    fn tie_prefers_earliest_enumerated_start() {
        // Two disjoint 2-node chains; x was seen before p.
        let adj = adj(&[("x", "y"), ("p", "q")]);
        assert_eq!(ids(&critical_path(&adj)), vec!["x", "y"]);
    }

    #[test]
    fn pure_cycle_terminates_without_repeats() {
        let adj = adj(&[("a", "b"), ("b", "c"), ("c", "a")]);
        let path = critical_path(&adj);

        assert_eq!(path.len(), 3);
        let unique: HashSet<&NodeId> = path.iter().collect();
        assert_eq!(unique.len(), path.len());
        // First-seen fallback order makes the result stable.
        assert_eq!(ids(&path), vec!["a", "b", "c"]);
    }

    #[test]
    fn two_node_cycle_has_no_repeats() {
        let adj = adj(&[("x", "y"), ("y", "x")]);
        let path = critical_path(&adj);
        assert!(path.len() <= 2);
        let unique: HashSet<&NodeId> = path.iter().collect();
        assert_eq!(unique.len(), path.len());
    }

    #[test]
    fn cycle_hanging_off_a_chain_is_bounded() {
        // d->e->d is a cycle reachable from the root chain.
        let adj = adj(&[("a", "b"), ("b", "c"), ("c", "d"), ("d", "e"), ("e", "d")]);
        let path = critical_path(&adj);

        assert_eq!(ids(&path), vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn consecutive_pairs_are_real_edges() {
        let adj = adj(&[("a", "b"), ("b", "c"), ("a", "c")]);
        let path = critical_path(&adj);

        for pair in path.windows(2) {
            assert!(adj.downstream_of(&pair[0]).contains(&pair[1]));
        }
    }

    #[test]
    fn repeated_runs_are_identical() {
        let adj = adj(&[("a", "b"), ("b", "c"), ("b", "d"), ("c", "e")]);
        let first = critical_path(&adj);
        for _ in 0..10 {
            assert_eq!(critical_path(&adj), first);
        }
    }
}
