//! CLI value enums and domain type conversions.
//!
//! This module contains the value enums used for CLI argument parsing
//! and their conversions to/from engine types.

use clap::ValueEnum;

use linkage_engine::{DependencyType, Direction};

// ============================================================================
// Value Enums
// ============================================================================

/// Dependency type for CLI arguments.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyTypeArg {
    /// Target requires source to be complete
    #[value(name = "depends-on")]
    DependsOn,
    /// Source prevents work on target
    Blocks,
    /// Soft link - informational
    Related,
    /// Source triggers target
    Triggers,
    /// Nice-to-have prerequisite
    Optional,
    /// Gated on a milestone
    #[value(name = "milestone-gate")]
    MilestoneGate,
    /// No semantic tag
    None,
}

impl std::fmt::Display for DependencyTypeArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", DependencyType::from(*self))
    }
}

impl From<DependencyTypeArg> for DependencyType {
    fn from(arg: DependencyTypeArg) -> Self {
        match arg {
            DependencyTypeArg::DependsOn => DependencyType::DependsOn,
            DependencyTypeArg::Blocks => DependencyType::Blocks,
            DependencyTypeArg::Related => DependencyType::Related,
            DependencyTypeArg::Triggers => DependencyType::Triggers,
            DependencyTypeArg::Optional => DependencyType::Optional,
            DependencyTypeArg::MilestoneGate => DependencyType::MilestoneGate,
            DependencyTypeArg::None => DependencyType::None,
        }
    }
}

/// Traversal direction for CLI arguments.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectionArg {
    /// Toward prerequisites (incoming edges)
    Upstream,
    /// Toward dependents (outgoing edges)
    Downstream,
}

impl std::fmt::Display for DirectionArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Direction::from(*self))
    }
}

impl From<DirectionArg> for Direction {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::Upstream => Direction::Upstream,
            DirectionArg::Downstream => Direction::Downstream,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dependency_type_arg_converts_to_domain() {
        assert_eq!(
            DependencyType::from(DependencyTypeArg::MilestoneGate),
            DependencyType::MilestoneGate
        );
        assert_eq!(DependencyTypeArg::Blocks.to_string(), "blocks");
        assert_eq!(
            DependencyTypeArg::MilestoneGate.to_string(),
            "milestone-gate"
        );
    }

    #[test]
    fn direction_arg_converts_to_domain() {
        assert_eq!(Direction::from(DirectionArg::Upstream), Direction::Upstream);
        assert_eq!(DirectionArg::Downstream.to_string(), "downstream");
    }
}
