//! Linkage engine - the dependency graph core for node-diagram editors.
//!
//! This crate answers the graph questions a diagram editor asks about its
//! connectors: what a node transitively depends on, what depends on it, how
//! far away each related node sits, which chain of nodes forms the critical
//! path, and how many connectors touch each node. It also provides the
//! stateful walk-mode cursor used for breadcrumb navigation.
//!
//! # Design
//!
//! Every derivation is a pure, synchronous function over an immutable edge
//! snapshot. The expected caller pattern is:
//!
//! 1. Rebuild the [`AdjacencyList`] once whenever the edge set changes.
//! 2. Let each consumer derive what it needs from that shared instance
//!    (closures, hop distances, critical path).
//! 3. Compute [`dependency_counts`] directly from the raw edge list, since
//!    duplicate connectors must be counted per occurrence.
//!
//! The [`WalkNavigator`] is the only stateful entity: it accumulates a
//! breadcrumb trail while walk mode is active and holds no graph logic of
//! its own.
//!
//! # Cycle safety
//!
//! Diagrams are expected to be acyclic, but nothing here assumes it. Every
//! traversal guards against revisiting nodes, so cycles never cause
//! non-termination and a node is never reported as its own dependency.
//!
//! # Example
//!
//! ```
//! use linkage_engine::{AdjacencyList, DependencyType, Edge};
//!
//! let edges = vec![
//!     Edge::new("e1", "a", "b", DependencyType::DependsOn),
//!     Edge::new("e2", "b", "c", DependencyType::Blocks),
//! ];
//!
//! let adj = AdjacencyList::build(&edges);
//! let downstream = linkage_engine::downstream(&"a".into(), &adj);
//! assert!(downstream.contains(&"c".into()));
//!
//! let path = linkage_engine::critical_path(&adj);
//! assert_eq!(path.len(), 3);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod adjacency;
pub mod counts;
pub mod critical;
pub mod domain;
pub mod hops;
pub mod reach;
pub mod walk;

pub use adjacency::{AdjacencyEntry, AdjacencyList};
pub use counts::{dependency_counts, DependencyCounts, NodeDegree};
pub use critical::critical_path;
pub use domain::{DependencyType, Edge, EdgeFilter, EdgeId, NewEdge, NodeId};
pub use hops::{chain_emphasis, hop_distances, merge_min_distances, EmphasisTier, HopDistanceMap};
pub use reach::{downstream, reachable, upstream, Direction, ReachabilitySet};
pub use walk::WalkNavigator;
