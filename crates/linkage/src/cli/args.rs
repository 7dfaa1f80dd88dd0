//! CLI argument structs for all commands.
//!
//! Each command has its own argument struct with clap derive attributes
//! for parsing and validation.

use clap::Parser;

use super::types::{DependencyTypeArg, DirectionArg};
use super::validators::{validate_edge_id, validate_node_id, validate_prefix};

/// Arguments for the `init` command
#[derive(Parser, Debug, Clone)]
pub struct InitArgs {
    /// Edge ID prefix (e.g., "wire" for "wire-a3f8")
    ///
    /// Must be 2-20 alphanumeric characters. This prefix is used for all
    /// connector IDs in this diagram.
    #[arg(short, long, value_parser = validate_prefix)]
    pub prefix: Option<String>,

    /// Suppress output messages
    #[arg(short, long)]
    pub quiet: bool,
}

/// Arguments for the `info` command
#[derive(Parser, Debug, Clone)]
pub struct InfoArgs {}

/// Arguments for the `connect` command
#[derive(Parser, Debug, Clone)]
pub struct ConnectArgs {
    /// Source node (the prerequisite side)
    #[arg(value_parser = validate_node_id)]
    pub source: String,

    /// Target node (the dependent side)
    #[arg(value_parser = validate_node_id)]
    pub target: String,

    /// Dependency type for the connector
    #[arg(short = 't', long = "type", value_enum, default_value = "depends-on")]
    pub dependency_type: DependencyTypeArg,
}

/// Arguments for the `disconnect` command
#[derive(Parser, Debug, Clone)]
pub struct DisconnectArgs {
    /// Edge ID to remove
    #[arg(value_parser = validate_edge_id)]
    pub edge_id: String,
}

/// Arguments for the `edges` command
#[derive(Parser, Debug, Clone)]
pub struct EdgesArgs {
    /// Filter by dependency type
    #[arg(short = 't', long = "type", value_enum)]
    pub dependency_type: Option<DependencyTypeArg>,

    /// Filter by a node appearing as source or target
    #[arg(long, value_parser = validate_node_id)]
    pub node: Option<String>,

    /// Maximum number of edges to display
    #[arg(short = 'n', long, default_value = "50")]
    pub limit: usize,
}

/// Arguments for the `upstream` and `downstream` commands
#[derive(Parser, Debug, Clone)]
pub struct ClosureArgs {
    /// Node to compute the closure from
    #[arg(value_parser = validate_node_id)]
    pub node: String,

    /// Print the closure as a flat sorted list instead of a tree
    #[arg(long)]
    pub flat: bool,
}

/// Arguments for the `hops` command
#[derive(Parser, Debug, Clone)]
pub struct HopsArgs {
    /// Origin node
    #[arg(value_parser = validate_node_id)]
    pub node: String,

    /// Traversal direction
    #[arg(short, long, value_enum, default_value = "downstream")]
    pub direction: DirectionArg,
}

/// Arguments for the `chain` command
#[derive(Parser, Debug, Clone)]
pub struct ChainArgs {
    /// Highlighted node
    #[arg(value_parser = validate_node_id)]
    pub node: String,
}

/// Arguments for the `path` command
#[derive(Parser, Debug, Clone)]
pub struct PathArgs {}

/// Arguments for the `counts` command
#[derive(Parser, Debug, Clone)]
pub struct CountsArgs {
    /// Show only this node's counts
    #[arg(long, value_parser = validate_node_id)]
    pub node: Option<String>,
}

/// Arguments for the `walk` command
#[derive(Parser, Debug, Clone)]
pub struct WalkArgs {
    /// Node to start the walk at
    #[arg(value_parser = validate_node_id)]
    pub start: String,

    /// Nodes to walk to, in order
    #[arg(value_parser = validate_node_id)]
    pub steps: Vec<String>,
}

/// Arguments for the `check` command
#[derive(Parser, Debug, Clone)]
pub struct CheckArgs {}
