//! Command execution logic.
//!
//! This module contains the implementation of all CLI commands.

use anyhow::Result;
use chrono::{DateTime, Utc};
use linkage_engine::{
    DependencyType, Direction, EdgeFilter, NewEdge, NodeId, WalkNavigator,
};
use std::collections::{HashMap, HashSet};

use super::args::{
    ChainArgs, CheckArgs, ClosureArgs, ConnectArgs, CountsArgs, DisconnectArgs, EdgesArgs,
    HopsArgs, InfoArgs, InitArgs, PathArgs, WalkArgs,
};
use crate::app::App;
use crate::output::tree::{print_closure_tree, ClosureTreeNode};
use crate::output::{self, color, OutputConfig, OutputMode};
use crate::store::type_histogram;

/// Execute the init command
pub async fn execute_init(args: &InitArgs) -> Result<()> {
    use crate::commands::init;

    let current_dir = std::env::current_dir()?;

    if !args.quiet {
        println!(
            "Initializing linkage diagram{}...",
            args.prefix
                .as_ref()
                .map(|p| format!(" with prefix '{p}'"))
                .unwrap_or_default()
        );
    }

    let result = init::init(&current_dir, args.prefix.as_deref()).await?;

    if !args.quiet {
        println!("Initialized linkage in {}", result.linkage_dir.display());
        println!("  Config:  {}", result.config_file.display());
        println!("  Diagram: {}", result.diagram_file.display());
        println!("  Edge prefix: {}", result.prefix);
    }

    Ok(())
}

/// Execute the info command
pub async fn execute_info(app: &App, _args: &InfoArgs, output_mode: OutputMode) -> Result<()> {
    let edges = app.store().export_all().await?;
    let nodes = app.store().node_ids().await?;
    let histogram = type_histogram(&edges);

    let saved_at: Option<DateTime<Utc>> = tokio::fs::metadata(app.diagram_path())
        .await
        .ok()
        .and_then(|meta| meta.modified().ok())
        .map(DateTime::<Utc>::from);

    match output_mode {
        OutputMode::Json => {
            output::print_json(&serde_json::json!({
                "diagram_path": app.diagram_path().display().to_string(),
                "edge_prefix": app.prefix(),
                "nodes": nodes.len(),
                "edges": edges.len(),
                "edges_by_type": histogram
                    .iter()
                    .map(|(dep_type, count)| (dep_type.to_string(), count))
                    .collect::<HashMap<_, _>>(),
                "saved_at": saved_at.map(|t| t.to_rfc3339()),
            }))?;
        }
        OutputMode::Text => {
            println!("Linkage Diagram Information");
            println!("===========================");
            println!();
            println!("Snapshot:    {}", app.diagram_path().display());
            println!("Edge prefix: {}", app.prefix());
            if let Some(saved_at) = saved_at {
                println!("Last saved:  {}", saved_at.format("%Y-%m-%d %H:%M:%S UTC"));
            }
            println!();
            println!("{} node(s), {} edge(s)", nodes.len(), edges.len());
            for (dep_type, count) in histogram {
                println!("  {dep_type:<15} {count}");
            }
        }
    }

    Ok(())
}

/// Execute the connect command
pub async fn execute_connect(
    app: &mut App,
    args: &ConnectArgs,
    output_mode: OutputMode,
) -> Result<()> {
    let config = OutputConfig::from_env();
    let source = NodeId::from(args.source.as_str());
    let target = NodeId::from(args.target.as_str());
    let dependency_type = DependencyType::from(args.dependency_type);

    // Diagrams are expected to be acyclic; the connector is accepted either
    // way, the check only drives the warning.
    let closes_cycle = app.store().would_create_cycle(&source, &target).await?;

    let edge = app
        .store_mut()
        .add_edge(NewEdge {
            source,
            target,
            dependency_type,
        })
        .await?;
    app.save().await?;

    match output_mode {
        OutputMode::Json => {
            output::print_json(&serde_json::json!({
                "edge": edge,
                "closes_cycle": closes_cycle,
            }))?;
        }
        OutputMode::Text => {
            println!(
                "Connected {} {} {} ({})",
                edge.source,
                if config.use_ascii { "->" } else { "→" },
                edge.target,
                edge.id
            );
            if closes_cycle {
                println!(
                    "{}",
                    color::warning(
                        "Warning: this connector closes a cycle in the diagram",
                        &config
                    )
                );
            }
        }
    }

    Ok(())
}

/// Execute the disconnect command
pub async fn execute_disconnect(
    app: &mut App,
    args: &DisconnectArgs,
    output_mode: OutputMode,
) -> Result<()> {
    let edge_id = linkage_engine::EdgeId::from(args.edge_id.as_str());
    let removed = app.store_mut().remove_edge(&edge_id).await?;
    app.save().await?;

    match output_mode {
        OutputMode::Json => {
            output::print_json(&serde_json::json!({ "removed": removed }))?;
        }
        OutputMode::Text => {
            println!(
                "Disconnected {} ({} -> {})",
                removed.id, removed.source, removed.target
            );
        }
    }

    Ok(())
}

/// Execute the edges command
pub async fn execute_edges(app: &App, args: &EdgesArgs, output_mode: OutputMode) -> Result<()> {
    let filter = EdgeFilter {
        dependency_type: args.dependency_type.map(DependencyType::from),
        node: args.node.as_deref().map(NodeId::from),
        limit: Some(args.limit),
    };
    let edges = app.store().list_edges(&filter).await?;

    match output_mode {
        OutputMode::Json => output::print_json(&edges)?,
        OutputMode::Text => {
            let config = OutputConfig::from_env();
            output::print_edge_list(&edges, &config)?;
        }
    }

    Ok(())
}

/// Execute the upstream/downstream commands
pub async fn execute_closure(
    app: &App,
    args: &ClosureArgs,
    direction: Direction,
    output_mode: OutputMode,
) -> Result<()> {
    let node = NodeId::from(args.node.as_str());
    let closure = match direction {
        Direction::Upstream => app.store().upstream(&node).await?,
        Direction::Downstream => app.store().downstream(&node).await?,
    };

    if args.flat {
        let mut members: Vec<String> = closure.iter().map(|n| n.as_str().to_string()).collect();
        members.sort();

        match output_mode {
            OutputMode::Json => output::print_json(&members)?,
            OutputMode::Text => {
                let config = OutputConfig::from_env();
                if members.is_empty() {
                    println!("No {direction} nodes for {node}.");
                } else {
                    for member in members {
                        println!("{}", color::info(&member, &config));
                    }
                }
            }
        }
        return Ok(());
    }

    let root = build_closure_tree(app, &node, direction).await?;
    print_closure_tree(&root, output_mode)?;
    Ok(())
}

/// Build the BFS spanning tree of a node's closure for rendering.
///
/// Each closure member appears once, under the neighbor that reached it
/// first; the shared visited set is what keeps cyclic diagrams rendering
/// as finite trees.
async fn build_closure_tree(
    app: &App,
    start: &NodeId,
    direction: Direction,
) -> Result<ClosureTreeNode> {
    let mut root = ClosureTreeNode {
        id: start.as_str().to_string(),
        hops: 0,
        children: Vec::new(),
    };

    let mut visited: HashSet<NodeId> = HashSet::new();
    visited.insert(start.clone());

    // Queue of (node, path-of-child-indexes from the root) so each BFS layer
    // can attach children without holding references into the tree. FIFO
    // order is what makes each node land under its minimum-hop parent.
    let mut queue: std::collections::VecDeque<(NodeId, Vec<usize>)> = std::collections::VecDeque::new();
    queue.push_back((start.clone(), Vec::new()));

    while let Some((current, tree_path)) = queue.pop_front() {
        let neighbors = app.store().neighbors(&current, direction).await?;
        for neighbor in neighbors {
            if !visited.insert(neighbor.clone()) {
                continue;
            }

            let parent = node_at_path_mut(&mut root, &tree_path);
            parent.children.push(ClosureTreeNode {
                id: neighbor.as_str().to_string(),
                hops: parent.hops + 1,
                children: Vec::new(),
            });

            let mut child_path = tree_path.clone();
            child_path.push(parent.children.len() - 1);
            queue.push_back((neighbor, child_path));
        }
    }

    Ok(root)
}

/// Walk a child-index path down the tree.
fn node_at_path_mut<'a>(root: &'a mut ClosureTreeNode, path: &[usize]) -> &'a mut ClosureTreeNode {
    let mut node = root;
    for &index in path {
        node = &mut node.children[index];
    }
    node
}

/// Execute the hops command
pub async fn execute_hops(app: &App, args: &HopsArgs, output_mode: OutputMode) -> Result<()> {
    let node = NodeId::from(args.node.as_str());
    let direction = Direction::from(args.direction);
    let distances = app.store().hop_distances(&node, direction).await?;

    match output_mode {
        OutputMode::Json => output::print_json(&distances)?,
        OutputMode::Text => {
            let config = OutputConfig::from_env();
            println!("Hop distances from {node} ({direction}):");
            output::print_hop_table(&node, &distances, &config)?;
        }
    }

    Ok(())
}

/// Execute the chain command
pub async fn execute_chain(app: &App, args: &ChainArgs, output_mode: OutputMode) -> Result<()> {
    let node = NodeId::from(args.node.as_str());
    let emphasis = app.store().chain_emphasis(&node).await?;

    match output_mode {
        OutputMode::Json => output::print_json(&emphasis)?,
        OutputMode::Text => {
            let config = OutputConfig::from_env();
            println!("Chain highlight for {node}:");
            output::print_emphasis_groups(&emphasis, &config)?;
        }
    }

    Ok(())
}

/// Execute the path command
pub async fn execute_path(app: &App, _args: &PathArgs, output_mode: OutputMode) -> Result<()> {
    let path = app.store().critical_path().await?;

    match output_mode {
        OutputMode::Json => output::print_json(&path)?,
        OutputMode::Text => {
            let config = OutputConfig::from_env();
            output::print_critical_path(&path, &config)?;
        }
    }

    Ok(())
}

/// Execute the counts command
pub async fn execute_counts(app: &App, args: &CountsArgs, output_mode: OutputMode) -> Result<()> {
    let counts = app.store().dependency_counts().await?;

    if let Some(node) = &args.node {
        let node = NodeId::from(node.as_str());
        // Absent entries read as zero - a node with no edges has no badge.
        let degree = counts.get(&node);
        match output_mode {
            OutputMode::Json => output::print_json(&serde_json::json!({
                "node": node.as_str(),
                "in": degree.incoming,
                "out": degree.outgoing,
            }))?,
            OutputMode::Text => {
                println!("{node}: {} in, {} out", degree.incoming, degree.outgoing);
            }
        }
        return Ok(());
    }

    match output_mode {
        OutputMode::Json => output::print_json(&counts)?,
        OutputMode::Text => {
            let config = OutputConfig::from_env();
            let mut rows: Vec<(&NodeId, usize, usize)> = counts
                .iter()
                .map(|(node, degree)| (node, degree.incoming, degree.outgoing))
                .collect();
            rows.sort_by(|a, b| a.0.cmp(b.0));

            if rows.is_empty() {
                println!("No edges in the diagram.");
                return Ok(());
            }

            println!("{:>4} {:>4}  node", "in", "out");
            for (node, incoming, outgoing) in rows {
                println!(
                    "{incoming:>4} {outgoing:>4}  {}",
                    color::info(node.as_str(), &config)
                );
            }
        }
    }

    Ok(())
}

/// Execute the walk command
pub async fn execute_walk(app: &App, args: &WalkArgs, output_mode: OutputMode) -> Result<()> {
    let config = OutputConfig::from_env();
    let known: HashSet<NodeId> = app.store().node_ids().await?.into_iter().collect();

    let mut navigator = WalkNavigator::new();
    let mut warnings: Vec<String> = Vec::new();

    let start = NodeId::from(args.start.as_str());
    if !known.contains(&start) {
        warnings.push(format!("{start} is not in the diagram"));
    }
    navigator.start(start);

    for step in &args.steps {
        let step = NodeId::from(step.as_str());
        if !known.contains(&step) {
            warnings.push(format!("{step} is not in the diagram"));
        } else if let Some(current) = navigator.current() {
            // The breadcrumb records the step regardless; adjacency is only
            // a hint that the UI would not normally have offered it.
            let forward = app.store().neighbors(current, Direction::Downstream).await?;
            let backward = app.store().neighbors(current, Direction::Upstream).await?;
            if !forward.contains(&step) && !backward.contains(&step) {
                warnings.push(format!("{step} is not adjacent to {current}"));
            }
        }
        navigator.walk_to(step);
    }

    match output_mode {
        OutputMode::Json => {
            output::print_json(&serde_json::json!({
                "path": navigator.path(),
                "current": navigator.current(),
                "warnings": warnings,
            }))?;
        }
        OutputMode::Text => {
            output::print_walk_trail(navigator.path(), navigator.current(), &config)?;
            for warning in &warnings {
                println!("{}", color::warning(&format!("Warning: {warning}"), &config));
            }
        }
    }

    Ok(())
}

/// Execute the check command
pub async fn execute_check(app: &App, _args: &CheckArgs, output_mode: OutputMode) -> Result<()> {
    let cycles = app.store().cycles().await?;

    match output_mode {
        OutputMode::Json => output::print_json(&cycles)?,
        OutputMode::Text => {
            let config = OutputConfig::from_env();
            output::print_cycles(&cycles, &config)?;
        }
    }

    Ok(())
}
