//! CLI input validation functions.
//!
//! These validators are used by clap's `value_parser` attribute to validate
//! user input at parse time, providing immediate feedback for invalid values.

use linkage_engine::domain::MAX_NODE_ID_LENGTH;

/// Validate edge id prefix format.
///
/// Delegates to the domain validator in `commands::init` to maintain
/// a single source of truth for validation rules.
pub fn validate_prefix(s: &str) -> Result<String, String> {
    use crate::commands::init;

    let trimmed = s.trim();
    init::validate_prefix(trimmed).map_err(|e| e.to_string())?;
    Ok(trimmed.to_string())
}

/// Validate a node id typed on the command line.
///
/// Node ids are opaque to the engine, so only emptiness and size are
/// checked; the diagram may legitimately contain any other spelling.
pub fn validate_node_id(s: &str) -> Result<String, String> {
    let trimmed = s.trim();

    if trimmed.is_empty() {
        return Err("Node ID cannot be empty".to_string());
    }
    if trimmed.len() > MAX_NODE_ID_LENGTH {
        return Err(format!(
            "Node ID cannot exceed {MAX_NODE_ID_LENGTH} characters"
        ));
    }

    Ok(trimmed.to_string())
}

/// Validate an edge id typed on the command line.
///
/// Expected format: `prefix-suffix` where the prefix is the configured
/// edge prefix (e.g., `wire-a3f8`).
pub fn validate_edge_id(s: &str) -> Result<String, String> {
    let s = s.trim();

    if s.is_empty() {
        return Err("Edge ID cannot be empty".to_string());
    }

    let parts: Vec<&str> = s.splitn(2, '-').collect();
    if parts.len() != 2 || parts[1].is_empty() {
        return Err(format!(
            "Invalid edge ID format: '{s}'. Expected format: prefix-suffix (e.g., wire-a3f8)"
        ));
    }

    if !parts[0].chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err("Edge ID prefix must contain only alphanumeric characters".to_string());
    }
    if !parts[1]
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-')
    {
        return Err("Edge ID suffix must contain only alphanumerics and hyphens".to_string());
    }

    Ok(s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::simple("node-a")]
    #[case::spaces_trimmed("  node-a  ")]
    #[case::unicode("café")]
    fn node_ids_accepted(#[case] input: &str) {
        assert!(validate_node_id(input).is_ok());
    }

    #[test]
    fn empty_node_id_rejected() {
        assert!(validate_node_id("").is_err());
        assert!(validate_node_id("   ").is_err());
    }

    #[test]
    fn oversized_node_id_rejected() {
        assert!(validate_node_id(&"x".repeat(MAX_NODE_ID_LENGTH + 1)).is_err());
    }

    #[rstest]
    #[case::plain("wire-a3f8")]
    #[case::hyphenated_suffix("wire-a3f8-2")]
    fn edge_ids_accepted(#[case] input: &str) {
        assert!(validate_edge_id(input).is_ok());
    }

    #[rstest]
    #[case::empty("")]
    #[case::no_hyphen("wirea3f8")]
    #[case::empty_suffix("wire-")]
    #[case::bad_prefix("wi re-a3f8")]
    fn edge_ids_rejected(#[case] input: &str) {
        assert!(validate_edge_id(input).is_err());
    }
}
