//! Domain types for the dependency graph engine.
//!
//! This module contains the identity and connector types shared by every
//! graph derivation. Nodes are opaque: the engine never inspects anything
//! beyond equality of their ids.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length accepted for a node id.
///
/// Node ids come from the diagram editor and are normally short; the cap
/// exists so a corrupted snapshot line cannot smuggle megabytes into an id.
pub const MAX_NODE_ID_LENGTH: usize = 256;

/// Unique identifier for a diagram node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub String);

impl NodeId {
    /// Create a new node ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// View the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Unique identifier for a connector (edge) between two nodes.
///
/// The graph algorithms never read edge ids; they exist so the store can
/// address individual connectors for removal and round-tripping.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeId(pub String);

impl EdgeId {
    /// Create a new edge ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// View the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for EdgeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for EdgeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Semantic tag carried by a connector.
///
/// The graph algorithms are indifferent to the tag; it is preserved for the
/// editor's styling and filtering surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DependencyType {
    /// Target requires source to be complete.
    DependsOn,

    /// Source prevents work on target.
    Blocks,

    /// Soft link - informational only.
    Related,

    /// Source starting/finishing triggers target.
    Triggers,

    /// Nice-to-have prerequisite.
    Optional,

    /// Target cannot start until the source milestone is reached.
    MilestoneGate,

    /// Connector drawn without a semantic tag.
    None,
}

impl DependencyType {
    /// All known dependency types, in display order.
    pub const ALL: [DependencyType; 7] = [
        DependencyType::DependsOn,
        DependencyType::Blocks,
        DependencyType::Related,
        DependencyType::Triggers,
        DependencyType::Optional,
        DependencyType::MilestoneGate,
        DependencyType::None,
    ];
}

impl fmt::Display for DependencyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DependencyType::DependsOn => "depends-on",
            DependencyType::Blocks => "blocks",
            DependencyType::Related => "related",
            DependencyType::Triggers => "triggers",
            DependencyType::Optional => "optional",
            DependencyType::MilestoneGate => "milestone-gate",
            DependencyType::None => "none",
        };
        write!(f, "{s}")
    }
}

/// A directed, typed connector between two diagram nodes.
///
/// Direction convention: `source -> target` means **target depends on
/// source**. The source is upstream of the target; the target is downstream
/// of the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// Unique identifier for this connector.
    pub id: EdgeId,

    /// Node the connector leaves from (the prerequisite side).
    pub source: NodeId,

    /// Node the connector points into (the dependent side).
    pub target: NodeId,

    /// Semantic tag for this connector.
    #[serde(rename = "dependency-type")]
    pub dependency_type: DependencyType,
}

impl Edge {
    /// Convenience constructor used heavily in tests and examples.
    pub fn new(
        id: impl Into<EdgeId>,
        source: impl Into<NodeId>,
        target: impl Into<NodeId>,
        dependency_type: DependencyType,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            dependency_type,
        }
    }

    /// Check structural validity of an edge loaded from external data.
    ///
    /// Self-referencing edges are valid: the editor allows them and the
    /// count aggregator depends on seeing them. Only empty or oversized
    /// ids are rejected.
    pub fn validate(&self) -> Result<(), String> {
        if self.id.as_str().is_empty() {
            return Err("edge id cannot be empty".to_string());
        }
        if self.source.as_str().is_empty() {
            return Err("edge source cannot be empty".to_string());
        }
        if self.target.as_str().is_empty() {
            return Err("edge target cannot be empty".to_string());
        }
        if self.source.as_str().len() > MAX_NODE_ID_LENGTH {
            return Err(format!(
                "edge source exceeds {MAX_NODE_ID_LENGTH} characters"
            ));
        }
        if self.target.as_str().len() > MAX_NODE_ID_LENGTH {
            return Err(format!(
                "edge target exceeds {MAX_NODE_ID_LENGTH} characters"
            ));
        }
        Ok(())
    }
}

/// Data for creating a new connector (the store assigns the id).
#[derive(Debug, Clone)]
pub struct NewEdge {
    /// Node the connector leaves from.
    pub source: NodeId,

    /// Node the connector points into.
    pub target: NodeId,

    /// Semantic tag for the connector.
    pub dependency_type: DependencyType,
}

/// Filter for querying connectors.
#[derive(Debug, Clone, Default)]
pub struct EdgeFilter {
    /// Keep only connectors with this tag.
    pub dependency_type: Option<DependencyType>,

    /// Keep only connectors touching this node (as source or target).
    pub node: Option<NodeId>,

    /// Limit number of results.
    pub limit: Option<usize>,
}

impl EdgeFilter {
    /// Test whether an edge passes this filter (ignoring `limit`).
    #[must_use]
    pub fn matches(&self, edge: &Edge) -> bool {
        if let Some(dep_type) = self.dependency_type {
            if edge.dependency_type != dep_type {
                return false;
            }
        }
        if let Some(node) = &self.node {
            if edge.source != *node && edge.target != *node {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dependency_type_round_trips_kebab_case() {
        for dep_type in DependencyType::ALL {
            let json = serde_json::to_string(&dep_type).unwrap();
            assert_eq!(json.trim_matches('"'), dep_type.to_string());
            let back: DependencyType = serde_json::from_str(&json).unwrap();
            assert_eq!(back, dep_type);
        }
    }

    #[test]
    fn edge_validation_rejects_empty_ids() {
        let edge = Edge::new("", "a", "b", DependencyType::DependsOn);
        assert!(edge.validate().is_err());

        let edge = Edge::new("e1", "", "b", DependencyType::DependsOn);
        assert!(edge.validate().is_err());

        let edge = Edge::new("e1", "a", "", DependencyType::DependsOn);
        assert!(edge.validate().is_err());
    }

    #[test]
    fn edge_validation_accepts_self_reference() {
        let edge = Edge::new("e1", "a", "a", DependencyType::Related);
        assert!(edge.validate().is_ok());
    }

    #[test]
    fn edge_filter_matches_type_and_endpoint() {
        let edge = Edge::new("e1", "a", "b", DependencyType::Blocks);

        let by_type = EdgeFilter {
            dependency_type: Some(DependencyType::Blocks),
            ..Default::default()
        };
        assert!(by_type.matches(&edge));

        let by_node = EdgeFilter {
            node: Some("b".into()),
            ..Default::default()
        };
        assert!(by_node.matches(&edge));

        let miss = EdgeFilter {
            node: Some("c".into()),
            ..Default::default()
        };
        assert!(!miss.matches(&edge));
    }
}
