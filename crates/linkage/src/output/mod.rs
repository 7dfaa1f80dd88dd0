//! Output formatting for CLI commands.
//!
//! This module provides utilities for formatting command output in both
//! human-readable text format and JSON format for programmatic use.
//!
//! Submodules:
//! - [`color`]: Color and styling helpers (semantic colors, emphasis tiers)
//! - [`tree`]: Closure tree rendering with ASCII/Unicode connectors

pub mod color;
pub mod tree;

use colored::Colorize;
use linkage_engine::{Edge, EmphasisTier, NodeId};
use serde::Serialize;
use std::collections::HashMap;
use std::env;
use std::io::{self, Write};

use color::{colorize_dep_type, colorize_edge_id, colorize_node_id, emphasized};

// ============================================================================
// Output Configuration
// ============================================================================

const DEFAULT_TERMINAL_WIDTH: u16 = 80;
const DEFAULT_MAX_CONTENT_WIDTH: usize = 80;

/// Output mode selected by the global `--json` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable text.
    Text,
    /// Machine-readable JSON.
    Json,
}

/// Configuration for output formatting.
///
/// Holds the settings that control how text output is rendered: width
/// limits, ASCII fallback, and color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    /// Maximum content width for text wrapping.
    pub max_width: usize,
    /// Whether to use ASCII-only connectors instead of Unicode.
    pub use_ascii: bool,
    /// Whether to use colors in output.
    pub use_colors: bool,
}

impl OutputConfig {
    /// Create an OutputConfig with explicit values.
    #[must_use]
    pub fn new(max_width: usize, use_ascii: bool, use_colors: bool) -> Self {
        Self {
            max_width,
            use_ascii,
            use_colors,
        }
    }

    /// Create an OutputConfig by reading from environment variables.
    ///
    /// Reads:
    /// - `LINKAGE_MAX_WIDTH`: Maximum content width (default: 80)
    /// - `LINKAGE_ASCII`: Set to "1" or "true" for ASCII-only connectors
    /// - `NO_COLOR`: Standard env var to disable colors (any value disables)
    /// - `LINKAGE_COLOR`: Set to "0" or "false" to disable colors
    #[must_use]
    pub fn from_env() -> Self {
        let max_width = match env::var("LINKAGE_MAX_WIDTH") {
            Ok(s) if !s.is_empty() => match s.parse() {
                Ok(width) => width,
                Err(_) => {
                    tracing::warn!(
                        env_var = "LINKAGE_MAX_WIDTH",
                        value = %s,
                        default = DEFAULT_MAX_CONTENT_WIDTH,
                        "Invalid value, using default"
                    );
                    DEFAULT_MAX_CONTENT_WIDTH
                }
            },
            _ => DEFAULT_MAX_CONTENT_WIDTH,
        };

        let use_ascii = match env::var("LINKAGE_ASCII") {
            Ok(v) if v == "1" || v.eq_ignore_ascii_case("true") => true,
            Ok(v) if v == "0" || v.eq_ignore_ascii_case("false") || v.is_empty() => false,
            Ok(v) => {
                tracing::warn!(
                    env_var = "LINKAGE_ASCII",
                    value = %v,
                    "Invalid value (expected '1', 'true', '0', or 'false'), using default"
                );
                false
            }
            Err(_) => false,
        };

        // Respect NO_COLOR standard (https://no-color.org/)
        // Also support LINKAGE_COLOR for explicit control
        let use_colors = env::var("NO_COLOR").is_err()
            && env::var("LINKAGE_COLOR")
                .map(|v| v != "0" && !v.eq_ignore_ascii_case("false"))
                .unwrap_or(true);

        Self {
            max_width,
            use_ascii,
            use_colors,
        }
    }

    /// Effective wrap width: the configured cap bounded by the terminal.
    #[must_use]
    pub fn wrap_width(&self) -> usize {
        self.max_width.min(get_terminal_width())
    }
}

/// Get the current terminal width, falling back to default if detection fails.
fn get_terminal_width() -> usize {
    terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(DEFAULT_TERMINAL_WIDTH as usize)
}

// ============================================================================
// JSON Output
// ============================================================================

/// Print any serializable value as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> io::Result<()> {
    let output = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
    println!("{output}");
    Ok(())
}

// ============================================================================
// Text Output
// ============================================================================

/// Print a list of edges as aligned rows.
pub fn print_edge_list(edges: &[Edge], config: &OutputConfig) -> io::Result<()> {
    let stdout = io::stdout();
    let mut w = stdout.lock();

    if edges.is_empty() {
        writeln!(w, "No edges found.")?;
        return Ok(());
    }

    let id_width = edges
        .iter()
        .map(|edge| edge.id.as_str().len())
        .max()
        .unwrap_or(0);

    for edge in edges {
        let arrow = if config.use_ascii { "->" } else { "→" };
        writeln!(
            w,
            "{:<id_width$}  {} {} {}  ({})",
            colorize_edge_id(edge.id.as_str(), config),
            colorize_node_id(edge.source.as_str(), config),
            arrow,
            colorize_node_id(edge.target.as_str(), config),
            colorize_dep_type(edge.dependency_type, config),
        )?;
    }

    writeln!(w)?;
    writeln!(w, "{} edge(s)", edges.len())?;
    Ok(())
}

/// Print the critical path as a single wrapped chain.
pub fn print_critical_path(path: &[NodeId], config: &OutputConfig) -> io::Result<()> {
    let stdout = io::stdout();
    let mut w = stdout.lock();

    if path.is_empty() {
        writeln!(w, "No critical path: the diagram has no edges.")?;
        return Ok(());
    }

    let arrow = if config.use_ascii { " -> " } else { " → " };
    let chain = path
        .iter()
        .map(|node| colorize_node_id(node.as_str(), config))
        .collect::<Vec<_>>()
        .join(arrow);

    writeln!(w, "Critical path ({} nodes):", path.len())?;
    // Wrap on the uncolored form to measure; colored output wraps only when
    // colors are off, since escape codes confuse width accounting.
    if config.use_colors {
        writeln!(w, "  {chain}")?;
    } else {
        for line in wrap_text(&chain, config.wrap_width().saturating_sub(2)) {
            writeln!(w, "  {line}")?;
        }
    }
    Ok(())
}

/// Print a hop-distance table, nearest first.
pub fn print_hop_table(
    origin: &NodeId,
    distances: &HashMap<NodeId, usize>,
    config: &OutputConfig,
) -> io::Result<()> {
    let stdout = io::stdout();
    let mut w = stdout.lock();

    if distances.is_empty() {
        writeln!(w, "{} touches no edges.", origin)?;
        return Ok(());
    }

    let mut rows: Vec<(&NodeId, usize)> = distances.iter().map(|(n, &d)| (n, d)).collect();
    rows.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(b.0)));

    writeln!(w, "{:>5}  node", "hops")?;
    for (node, distance) in rows {
        let tier = EmphasisTier::for_distance(distance);
        writeln!(
            w,
            "{:>5}  {}",
            distance,
            emphasized(&colorize_node_id(node.as_str(), config), tier, config)
        )?;
    }
    Ok(())
}

/// Print chain-highlight emphasis tiers grouped from full to minimal.
pub fn print_emphasis_groups(
    emphasis: &HashMap<NodeId, EmphasisTier>,
    config: &OutputConfig,
) -> io::Result<()> {
    let stdout = io::stdout();
    let mut w = stdout.lock();

    if emphasis.is_empty() {
        writeln!(w, "Nothing to highlight: the node touches no edges.")?;
        return Ok(());
    }

    for tier in [EmphasisTier::Full, EmphasisTier::Partial, EmphasisTier::Minimal] {
        let mut members: Vec<&NodeId> = emphasis
            .iter()
            .filter(|&(_, &t)| t == tier)
            .map(|(n, _)| n)
            .collect();
        if members.is_empty() {
            continue;
        }
        members.sort();

        let label = format!("{tier}:");
        let names = members
            .iter()
            .map(|node| emphasized(&colorize_node_id(node.as_str(), config), tier, config))
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(w, "{label:<9} {names}")?;
    }
    Ok(())
}

/// Print a walk breadcrumb trail.
pub fn print_walk_trail(path: &[NodeId], current: Option<&NodeId>, config: &OutputConfig) -> io::Result<()> {
    let stdout = io::stdout();
    let mut w = stdout.lock();

    let sep = if config.use_ascii { " > " } else { " › " };
    let trail = path
        .iter()
        .map(|node| colorize_node_id(node.as_str(), config))
        .collect::<Vec<_>>()
        .join(sep);

    writeln!(w, "Walk trail: {trail}")?;
    if let Some(current) = current {
        let name = colorize_node_id(current.as_str(), config);
        let name = if config.use_colors {
            name.bold().to_string()
        } else {
            name
        };
        writeln!(w, "Current:    {name}")?;
    }
    Ok(())
}

/// Print detected cycles, one per line.
pub fn print_cycles(cycles: &[Vec<NodeId>], config: &OutputConfig) -> io::Result<()> {
    let stdout = io::stdout();
    let mut w = stdout.lock();

    if cycles.is_empty() {
        writeln!(w, "{}", color::success("No cycles detected.", config))?;
        return Ok(());
    }

    writeln!(
        w,
        "{}",
        color::warning(&format!("Found {} cycle(s):", cycles.len()), config)
    )?;
    let arrow = if config.use_ascii { " -> " } else { " → " };
    for cycle in cycles {
        let mut nodes: Vec<String> = cycle
            .iter()
            .map(|node| colorize_node_id(node.as_str(), config))
            .collect();
        // Close the loop visually.
        if let Some(first) = nodes.first().cloned() {
            nodes.push(first);
        }
        writeln!(w, "  {}", nodes.join(arrow))?;
    }
    Ok(())
}

/// Wrap text to fit within a given width, preserving existing line breaks.
/// Uses textwrap to handle edge cases like long words (node ids, paths).
pub fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    text.lines()
        .flat_map(|line| {
            if line.trim().is_empty() {
                vec![String::new()]
            } else {
                textwrap::wrap(line, max_width)
                    .into_iter()
                    .map(|s| s.into_owned())
                    .collect()
            }
        })
        .collect()
}
