//! Closure tree rendering for `linkage upstream` / `linkage downstream`.

use std::io::{self, Write};

use colored::Colorize;
use linkage_engine::EmphasisTier;
use serde_json::json;

use super::color::{colorize_node_id, emphasized};
use super::{OutputConfig, OutputMode};

/// A node in a closure tree for rendering purposes.
///
/// The tree is a BFS spanning tree of the closure: each node appears once,
/// under the neighbor that reached it first, with its hop distance from
/// the root.
#[derive(Debug, Clone)]
pub struct ClosureTreeNode {
    /// Node id.
    pub id: String,
    /// Hop distance from the tree root.
    pub hops: usize,
    /// Children of this node in the closure tree.
    pub children: Vec<ClosureTreeNode>,
}

/// Print a closure tree with ASCII/Unicode connectors.
///
/// Renders a tree like:
/// ```text
/// ◆ gateway
/// ├── auth-svc
/// │   └── user-db
/// └── billing-svc
/// ```
///
/// Nodes dim with hop distance using the same three emphasis tiers the
/// chain-highlight overlay uses.
pub fn print_closure_tree(root: &ClosureTreeNode, mode: OutputMode) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let config = OutputConfig::from_env();

    match mode {
        OutputMode::Text => print_closure_tree_text(&mut handle, root, &config),
        OutputMode::Json => {
            let json = closure_tree_to_json(root);
            let output = serde_json::to_string_pretty(&json).map_err(io::Error::other)?;
            writeln!(handle, "{output}")
        }
    }
}

/// Render the closure tree with connector lines.
fn print_closure_tree_text<W: Write>(
    w: &mut W,
    root: &ClosureTreeNode,
    config: &OutputConfig,
) -> io::Result<()> {
    let root_icon = if config.use_ascii { "*" } else { "◆" };
    let root_icon_str = if config.use_colors {
        root_icon.cyan().bold().to_string()
    } else {
        root_icon.to_string()
    };

    writeln!(
        w,
        "{} {}",
        root_icon_str,
        colorize_node_id(&root.id, config)
    )?;

    print_closure_tree_children(w, &root.children, &[], config)
}

/// Recursively render tree children with proper connector lines.
///
/// `prefix_segments` tracks which ancestor levels still have siblings
/// below, used to draw the vertical continuation lines.
fn print_closure_tree_children<W: Write>(
    w: &mut W,
    children: &[ClosureTreeNode],
    prefix_segments: &[bool],
    config: &OutputConfig,
) -> io::Result<()> {
    let (branch, corner, pipe, space) = if config.use_ascii {
        ("|-- ", "`-- ", "|   ", "    ")
    } else {
        ("├── ", "└── ", "│   ", "    ")
    };

    for (i, child) in children.iter().enumerate() {
        let is_last = i == children.len() - 1;

        // Build prefix from ancestor continuation lines
        let mut prefix = String::new();
        for &has_more in prefix_segments {
            let segment = if has_more { pipe } else { space };
            if config.use_colors {
                prefix.push_str(&segment.dimmed().to_string());
            } else {
                prefix.push_str(segment);
            }
        }

        let connector = if is_last { corner } else { branch };
        let connector_str = if config.use_colors {
            connector.dimmed().to_string()
        } else {
            connector.to_string()
        };

        let tier = EmphasisTier::for_distance(child.hops);
        let label = emphasized(&colorize_node_id(&child.id, config), tier, config);
        writeln!(w, "{prefix}{connector_str}{label}")?;

        let mut child_segments = prefix_segments.to_vec();
        child_segments.push(!is_last);
        print_closure_tree_children(w, &child.children, &child_segments, config)?;
    }

    Ok(())
}

/// Convert a closure tree to a JSON value.
fn closure_tree_to_json(node: &ClosureTreeNode) -> serde_json::Value {
    json!({
        "id": node.id,
        "hops": node.hops,
        "children": node
            .children
            .iter()
            .map(closure_tree_to_json)
            .collect::<Vec<_>>(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> ClosureTreeNode {
        ClosureTreeNode {
            id: "root".to_string(),
            hops: 0,
            children: vec![
                ClosureTreeNode {
                    id: "near".to_string(),
                    hops: 1,
                    children: vec![ClosureTreeNode {
                        id: "far".to_string(),
                        hops: 2,
                        children: vec![],
                    }],
                },
                ClosureTreeNode {
                    id: "side".to_string(),
                    hops: 1,
                    children: vec![],
                },
            ],
        }
    }

    #[test]
    fn text_rendering_uses_ascii_connectors_when_configured() {
        let config = OutputConfig::new(80, true, false);
        let mut buf = Vec::new();
        print_closure_tree_text(&mut buf, &sample_tree(), &config).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.contains("* root"));
        assert!(text.contains("|-- near"));
        assert!(text.contains("`-- far"));
        assert!(text.contains("`-- side"));
    }

    #[test]
    fn json_rendering_nests_children() {
        let value = closure_tree_to_json(&sample_tree());
        assert_eq!(value["id"], "root");
        assert_eq!(value["children"][0]["id"], "near");
        assert_eq!(value["children"][0]["children"][0]["hops"], 2);
    }
}
