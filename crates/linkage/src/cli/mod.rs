//! CLI argument parsing and command dispatch.
//!
//! This module provides the command-line interface for linkage using clap's
//! derive API. Each command has its own argument struct with validation and
//! helpful error messages.
//!
//! # Commands
//!
//! - `init`: Initialize a new linkage diagram
//! - `info`: Show diagram information
//! - `connect`: Add a connector between two nodes
//! - `disconnect`: Remove a connector
//! - `edges`: List connectors with optional filters
//! - `upstream` / `downstream`: Transitive closures as hop trees
//! - `hops`: Hop-distance table from a node
//! - `chain`: Chain-highlight emphasis tiers around a node
//! - `path`: The critical path through the diagram
//! - `counts`: Per-node in/out badge counts
//! - `walk`: Replay a walk-mode session
//! - `check`: Cycle diagnostics
//!
//! # Global Flags
//!
//! - `--json`: Output in JSON format (applies to all commands)
//!
//! # Example
//!
//! ```bash
//! linkage connect gateway auth-svc --type depends-on
//! linkage downstream gateway
//! linkage path --json
//! ```

mod args;
mod execute;
mod types;
mod validators;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::App;
use crate::output::OutputMode;

// Re-export argument structs
pub use args::{
    ChainArgs, CheckArgs, ClosureArgs, ConnectArgs, CountsArgs, DisconnectArgs, EdgesArgs,
    HopsArgs, InfoArgs, InitArgs, PathArgs, WalkArgs,
};

// Re-export types
pub use types::{DependencyTypeArg, DirectionArg};

// Re-export validators for external use
pub use validators::{validate_edge_id, validate_node_id, validate_prefix};

/// Linkage - dependency graph tooling for node diagrams
///
/// Track connectors, reachability, and the critical path of a diagram.
/// Snapshots are stored in `.linkage/diagram.jsonl` for easy version
/// control integration.
#[derive(Parser, Debug)]
#[command(name = "linkage")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output in JSON format for programmatic use
    #[arg(long, global = true)]
    pub json: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Initialize a new linkage diagram
    ///
    /// Creates the `.linkage/` directory with configuration and an empty
    /// snapshot. Run this once in your project root.
    Init(InitArgs),

    /// Show diagram information
    ///
    /// Displays snapshot path, edge prefix, and summary statistics.
    Info(InfoArgs),

    /// Add a connector between two nodes
    ///
    /// Creates a directed edge source -> target (target depends on source).
    /// Warns when the new connector closes a cycle.
    Connect(ConnectArgs),

    /// Remove a connector by id
    Disconnect(DisconnectArgs),

    /// List connectors with optional filters
    Edges(EdgesArgs),

    /// Show everything a node transitively depends on
    ///
    /// Renders the upstream closure as a tree, dimming with hop distance.
    Upstream(ClosureArgs),

    /// Show everything that transitively depends on a node
    ///
    /// Renders the downstream closure as a tree, dimming with hop distance.
    Downstream(ClosureArgs),

    /// Hop distances from a node in one direction
    Hops(HopsArgs),

    /// Chain-highlight emphasis tiers around a node
    ///
    /// Merges upstream and downstream hop distances and reports the
    /// three-tier emphasis falloff the canvas overlay uses.
    Chain(ChainArgs),

    /// Show the critical path through the diagram
    ///
    /// The longest chain of directly connected nodes, deterministic across
    /// runs.
    Path(PathArgs),

    /// Per-node direct dependency counts
    ///
    /// The in/out badge numbers shown on each node.
    Counts(CountsArgs),

    /// Replay a walk-mode session
    ///
    /// Starts at the given node, steps through the listed nodes in order,
    /// and prints the breadcrumb trail.
    Walk(WalkArgs),

    /// Check the diagram for cycles
    Check(CheckArgs),
}

impl Cli {
    /// Parse CLI arguments from the process environment.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Execute the parsed command.
    pub async fn execute(&self) -> Result<()> {
        let output_mode = if self.json {
            OutputMode::Json
        } else {
            OutputMode::Text
        };

        match &self.command {
            Some(Commands::Init(args)) => execute::execute_init(args).await,
            Some(Commands::Info(args)) => {
                let app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_info(&app, args, output_mode).await
            }
            Some(Commands::Connect(args)) => {
                let mut app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_connect(&mut app, args, output_mode).await
            }
            Some(Commands::Disconnect(args)) => {
                let mut app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_disconnect(&mut app, args, output_mode).await
            }
            Some(Commands::Edges(args)) => {
                let app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_edges(&app, args, output_mode).await
            }
            Some(Commands::Upstream(args)) => {
                let app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_closure(&app, args, linkage_engine::Direction::Upstream, output_mode)
                    .await
            }
            Some(Commands::Downstream(args)) => {
                let app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_closure(
                    &app,
                    args,
                    linkage_engine::Direction::Downstream,
                    output_mode,
                )
                .await
            }
            Some(Commands::Hops(args)) => {
                let app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_hops(&app, args, output_mode).await
            }
            Some(Commands::Chain(args)) => {
                let app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_chain(&app, args, output_mode).await
            }
            Some(Commands::Path(args)) => {
                let app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_path(&app, args, output_mode).await
            }
            Some(Commands::Counts(args)) => {
                let app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_counts(&app, args, output_mode).await
            }
            Some(Commands::Walk(args)) => {
                let app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_walk(&app, args, output_mode).await
            }
            Some(Commands::Check(args)) => {
                let app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_check(&app, args, output_mode).await
            }
            None => {
                println!("Linkage dependency graph tooling");
                println!("Use --help for more information");
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========== CLI Parsing Tests ==========

    #[test]
    fn test_parse_no_command() {
        let cli = Cli::try_parse_from(["linkage"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.json);
    }

    #[test]
    fn test_parse_global_json_flag() {
        let cli = Cli::try_parse_from(["linkage", "--json", "path"]).unwrap();
        assert!(cli.json);
        assert!(matches!(cli.command, Some(Commands::Path(_))));
    }

    #[test]
    fn test_parse_connect_with_type() {
        let cli =
            Cli::try_parse_from(["linkage", "connect", "a", "b", "--type", "blocks"]).unwrap();
        match cli.command {
            Some(Commands::Connect(args)) => {
                assert_eq!(args.source, "a");
                assert_eq!(args.target, "b");
                assert_eq!(args.dependency_type, DependencyTypeArg::Blocks);
            }
            _ => panic!("Expected Connect command"),
        }
    }

    #[test]
    fn test_parse_connect_defaults_to_depends_on() {
        let cli = Cli::try_parse_from(["linkage", "connect", "a", "b"]).unwrap();
        match cli.command {
            Some(Commands::Connect(args)) => {
                assert_eq!(args.dependency_type, DependencyTypeArg::DependsOn);
            }
            _ => panic!("Expected Connect command"),
        }
    }

    #[test]
    fn test_parse_rejects_empty_node_id() {
        assert!(Cli::try_parse_from(["linkage", "upstream", "  "]).is_err());
    }

    #[test]
    fn test_parse_hops_direction() {
        let cli =
            Cli::try_parse_from(["linkage", "hops", "a", "--direction", "upstream"]).unwrap();
        match cli.command {
            Some(Commands::Hops(args)) => {
                assert_eq!(args.direction, DirectionArg::Upstream);
            }
            _ => panic!("Expected Hops command"),
        }
    }

    #[test]
    fn test_parse_walk_steps() {
        let cli = Cli::try_parse_from(["linkage", "walk", "a", "b", "c"]).unwrap();
        match cli.command {
            Some(Commands::Walk(args)) => {
                assert_eq!(args.start, "a");
                assert_eq!(args.steps, vec!["b".to_string(), "c".to_string()]);
            }
            _ => panic!("Expected Walk command"),
        }
    }

    #[test]
    fn test_parse_rejects_malformed_edge_id() {
        assert!(Cli::try_parse_from(["linkage", "disconnect", "nodash"]).is_err());
    }
}
