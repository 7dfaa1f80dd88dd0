//! Color and styling helpers for CLI output.
//!
//! Semantic Color Theme:
//!   - Success:       green   (clean check results, saved snapshots)
//!   - Warning:       yellow  (cycle warnings, unknown walk targets)
//!   - Error:         red     (failed operations, blocks connectors)
//!   - Info/Reference: cyan   (node ids, tree roots)
//!   - Muted:         dimmed  (edge ids, connectors, minimal emphasis)
//!   - Emphasis:      bold    (current walk node, full-emphasis nodes)

use colored::Colorize;
use linkage_engine::{DependencyType, EmphasisTier};

use super::OutputConfig;

/// Apply semantic "success" color (green) to text.
pub fn success(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.green().to_string()
}

/// Apply semantic "error" color (red) to text.
pub fn error(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.red().to_string()
}

/// Apply semantic "warning" color (yellow) to text.
pub fn warning(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.yellow().to_string()
}

/// Apply semantic "info" color (cyan) to text.
pub fn info(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.cyan().to_string()
}

/// Colorize a node id (cyan).
pub(crate) fn colorize_node_id(id: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return id.to_string();
    }
    id.cyan().to_string()
}

/// Colorize an edge id (dimmed, it is plumbing rather than content).
pub(crate) fn colorize_edge_id(id: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return id.to_string();
    }
    id.dimmed().to_string()
}

/// Apply color to a dependency type tag.
pub(crate) fn colorize_dep_type(dep_type: DependencyType, config: &OutputConfig) -> String {
    let text = format!("{dep_type}");
    if !config.use_colors {
        return text;
    }
    match dep_type {
        DependencyType::Blocks => text.red().to_string(),
        DependencyType::DependsOn => text.yellow().to_string(),
        DependencyType::Triggers => text.cyan().to_string(),
        DependencyType::MilestoneGate => text.magenta().to_string(),
        DependencyType::Related => text.white().to_string(),
        DependencyType::Optional | DependencyType::None => text.dimmed().to_string(),
    }
}

/// Style text by chain-highlight emphasis tier.
///
/// Full emphasis is bold, partial is left as-is, minimal is dimmed -
/// the terminal rendition of the three-tier opacity falloff.
pub(crate) fn emphasized(text: &str, tier: EmphasisTier, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    match tier {
        EmphasisTier::Full => text.bold().to_string(),
        EmphasisTier::Partial => text.to_string(),
        EmphasisTier::Minimal => text.dimmed().to_string(),
    }
}
