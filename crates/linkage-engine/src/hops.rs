//! Hop-distance maps and the chain-highlight emphasis falloff.
//!
//! Structurally the same BFS as [`crate::reach`], but retaining the depth at
//! which each node was first visited instead of discarding it. The
//! chain-highlight feature merges the upstream and downstream maps of a
//! highlighted node and decays visual emphasis in exactly three tiers.

use crate::adjacency::AdjacencyList;
use crate::domain::NodeId;
use crate::reach::Direction;
use serde::Serialize;
use std::collections::{HashMap, VecDeque};

/// Minimum number of edge traversals from an origin, per node.
pub type HopDistanceMap = HashMap<NodeId, usize>;

/// Compute minimum hop counts from `start` in `direction`.
///
/// The origin maps to 0. BFS visit order guarantees the first recorded
/// depth for a node is its minimum. A start node absent from the index
/// yields an empty map. Runs in O(V+E) worst case.
#[must_use]
pub fn hop_distances(start: &NodeId, adj: &AdjacencyList, direction: Direction) -> HopDistanceMap {
    let mut distances: HopDistanceMap = HashMap::new();
    if !adj.contains(start) {
        return distances;
    }

    let mut queue: VecDeque<(NodeId, usize)> = VecDeque::new();
    distances.insert(start.clone(), 0);
    queue.push_back((start.clone(), 0));

    while let Some((current, depth)) = queue.pop_front() {
        for neighbor in direction.neighbors(adj, &current) {
            if !distances.contains_key(neighbor) {
                distances.insert(neighbor.clone(), depth + 1);
                queue.push_back((neighbor.clone(), depth + 1));
            }
        }
    }

    distances
}

/// Merge two hop-distance maps, keeping the minimum where both are defined.
#[must_use]
pub fn merge_min_distances(a: &HopDistanceMap, b: &HopDistanceMap) -> HopDistanceMap {
    let mut merged = a.clone();
    for (node, &distance) in b {
        merged
            .entry(node.clone())
            .and_modify(|d| *d = (*d).min(distance))
            .or_insert(distance);
    }
    merged
}

/// Visual emphasis applied to a node in the chain-highlight overlay.
///
/// A three-tier falloff, not an interpolation: the renderer maps each tier
/// to a fixed opacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmphasisTier {
    /// Distance 0 or 1: the node itself and its direct neighbors.
    Full,

    /// Distance 2.
    Partial,

    /// Distance 3 or more.
    Minimal,
}

impl EmphasisTier {
    /// Tier for a given hop distance.
    #[must_use]
    pub fn for_distance(distance: usize) -> Self {
        match distance {
            0 | 1 => EmphasisTier::Full,
            2 => EmphasisTier::Partial,
            _ => EmphasisTier::Minimal,
        }
    }
}

impl std::fmt::Display for EmphasisTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmphasisTier::Full => write!(f, "full"),
            EmphasisTier::Partial => write!(f, "partial"),
            EmphasisTier::Minimal => write!(f, "minimal"),
        }
    }
}

/// Emphasis tiers for every node related to `start` in either direction.
///
/// Merges the upstream and downstream hop maps (minimum wins where both are
/// defined) and converts distances to tiers. The highlighted node itself is
/// included at [`EmphasisTier::Full`].
#[must_use]
pub fn chain_emphasis(start: &NodeId, adj: &AdjacencyList) -> HashMap<NodeId, EmphasisTier> {
    let up = hop_distances(start, adj, Direction::Upstream);
    let down = hop_distances(start, adj, Direction::Downstream);

    merge_min_distances(&up, &down)
        .into_iter()
        .map(|(node, distance)| (node, EmphasisTier::for_distance(distance)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DependencyType, Edge};

    fn chain(edges: &[(&str, &str)]) -> AdjacencyList {
        let edges: Vec<Edge> = edges
            .iter()
            .enumerate()
            .map(|(i, (s, t))| Edge::new(format!("e{i}"), *s, *t, DependencyType::DependsOn))
            .collect();
        AdjacencyList::build(&edges)
    }

    #[test]
    fn origin_maps_to_zero() {
        let adj = chain(&[("a", "b")]);
        let distances = hop_distances(&"a".into(), &adj, Direction::Downstream);
        assert_eq!(distances.get(&"a".into()), Some(&0));
    }

    #[test]
    fn chain_distances_increase_by_hop() {
        let adj = chain(&[("a", "b"), ("b", "c"), ("c", "d")]);
        let distances = hop_distances(&"a".into(), &adj, Direction::Downstream);

        assert_eq!(distances.get(&"a".into()), Some(&0));
        assert_eq!(distances.get(&"b".into()), Some(&1));
        assert_eq!(distances.get(&"c".into()), Some(&2));
        assert_eq!(distances.get(&"d".into()), Some(&3));
    }

    #[test]
    fn diamond_takes_minimum_distance() {
        // Two routes to d: a->b->d (2 hops) and a->d (1 hop).
        let adj = chain(&[("a", "b"), ("b", "d"), ("a", "d")]);
        let distances = hop_distances(&"a".into(), &adj, Direction::Downstream);
        assert_eq!(distances.get(&"d".into()), Some(&1));
    }

    #[test]
    fn cycle_terminates_with_stable_distances() {
        let adj = chain(&[("x", "y"), ("y", "x")]);
        let distances = hop_distances(&"x".into(), &adj, Direction::Downstream);

        assert_eq!(distances.get(&"x".into()), Some(&0));
        assert_eq!(distances.get(&"y".into()), Some(&1));
        assert_eq!(distances.len(), 2);
    }

    #[test]
    fn unknown_start_yields_empty_map() {
        let adj = chain(&[("a", "b")]);
        assert!(hop_distances(&"ghost".into(), &adj, Direction::Upstream).is_empty());
    }

    #[test]
    fn merge_takes_minimum_where_both_defined() {
        let a: HopDistanceMap = [("n".into(), 3)].into_iter().collect();
        let b: HopDistanceMap = [("n".into(), 1), ("m".into(), 2)].into_iter().collect();

        let merged = merge_min_distances(&a, &b);
        assert_eq!(merged.get(&"n".into()), Some(&1));
        assert_eq!(merged.get(&"m".into()), Some(&2));
    }

    #[test]
    fn emphasis_has_exactly_three_tiers() {
        assert_eq!(EmphasisTier::for_distance(0), EmphasisTier::Full);
        assert_eq!(EmphasisTier::for_distance(1), EmphasisTier::Full);
        assert_eq!(EmphasisTier::for_distance(2), EmphasisTier::Partial);
        assert_eq!(EmphasisTier::for_distance(3), EmphasisTier::Minimal);
        assert_eq!(EmphasisTier::for_distance(17), EmphasisTier::Minimal);
    }

    #[test]
    fn chain_emphasis_decays_along_the_chain() {
        let adj = chain(&[("a", "b"), ("b", "c"), ("c", "d")]);
        let emphasis = chain_emphasis(&"a".into(), &adj);

        assert_eq!(emphasis.get(&"a".into()), Some(&EmphasisTier::Full));
        assert_eq!(emphasis.get(&"b".into()), Some(&EmphasisTier::Full));
        assert_eq!(emphasis.get(&"c".into()), Some(&EmphasisTier::Partial));
        assert_eq!(emphasis.get(&"d".into()), Some(&EmphasisTier::Minimal));
    }

    #[test]
    fn chain_emphasis_merges_both_directions() {
        // b is highlighted: a is 1 upstream, c is 1 downstream.
        let adj = chain(&[("a", "b"), ("b", "c")]);
        let emphasis = chain_emphasis(&"b".into(), &adj);

        assert_eq!(emphasis.get(&"a".into()), Some(&EmphasisTier::Full));
        assert_eq!(emphasis.get(&"c".into()), Some(&EmphasisTier::Full));
    }
}
