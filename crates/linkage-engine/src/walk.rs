//! Walk mode: a stateful cursor with a breadcrumb trail.
//!
//! The navigator is a pure path-accumulator driven by UI navigation
//! events. It holds no graph-traversal logic; callers typically use the
//! reachability closures to decide which nodes to offer as next steps, but
//! the navigator itself records whatever it is told - the breadcrumb is a
//! navigation history, not a validated traversal.

use crate::domain::NodeId;
use tracing::debug;

/// Stateful cursor over the graph with an ordered visit history.
///
/// Two states: idle (walk mode inactive) and walking (a current node plus
/// the breadcrumb path, with the current node as its last element).
///
/// | Transition          | Trigger        | Effect                               |
/// |---------------------|----------------|--------------------------------------|
/// | idle -> walking     | [`start`]      | path becomes `[initial]`             |
/// | walking -> walking  | [`walk_to`]    | node appended, becomes current       |
/// | walking -> idle     | [`stop`]       | cursor and path cleared              |
///
/// [`start`]: WalkNavigator::start
/// [`walk_to`]: WalkNavigator::walk_to
/// [`stop`]: WalkNavigator::stop
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalkNavigator {
    path: Vec<NodeId>,
}

impl WalkNavigator {
    /// Create a navigator in the idle state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether walk mode is active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.path.is_empty()
    }

    /// The node the cursor currently sits on, `None` while idle.
    #[must_use]
    pub fn current(&self) -> Option<&NodeId> {
        self.path.last()
    }

    /// The breadcrumb of nodes visited since walk mode was entered.
    #[must_use]
    pub fn path(&self) -> &[NodeId] {
        &self.path
    }

    /// Enter walk mode at `initial`.
    ///
    /// Starting while already walking begins a fresh session: the previous
    /// breadcrumb is discarded.
    pub fn start(&mut self, initial: NodeId) {
        debug!(node = %initial, "entering walk mode");
        self.path.clear();
        self.path.push(initial);
    }

    /// Step the cursor to `node`, appending it to the breadcrumb.
    ///
    /// The step is recorded unconditionally - even when `node` is not
    /// adjacent to the current node, or not present in the diagram at all.
    /// Offering only reachable targets is the caller's concern. Returns
    /// `false` (and records nothing) when walk mode is not active, since
    /// there is no valid idle-to-walking transition through this method.
    pub fn walk_to(&mut self, node: NodeId) -> bool {
        if !self.is_active() {
            debug!(node = %node, "ignoring walk step while idle");
            return false;
        }
        self.path.push(node);
        true
    }

    /// Leave walk mode, clearing the cursor and the breadcrumb.
    pub fn stop(&mut self) {
        debug!(steps = self.path.len(), "leaving walk mode");
        self.path.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_idle() {
        let nav = WalkNavigator::new();
        assert!(!nav.is_active());
        assert!(nav.current().is_none());
        assert!(nav.path().is_empty());
    }

    #[test]
    fn start_initializes_path_with_initial_node() {
        let mut nav = WalkNavigator::new();
        nav.start("a".into());

        assert!(nav.is_active());
        assert_eq!(nav.current(), Some(&"a".into()));
        assert_eq!(nav.path(), &[NodeId::from("a")]);
    }

    #[test]
    fn walk_accumulates_breadcrumb_in_order() {
        let mut nav = WalkNavigator::new();
        nav.start("a".into());
        assert!(nav.walk_to("b".into()));
        assert!(nav.walk_to("c".into()));

        assert_eq!(
            nav.path(),
            &[NodeId::from("a"), NodeId::from("b"), NodeId::from("c")]
        );
        assert_eq!(nav.current(), Some(&"c".into()));
    }

    #[test]
    fn walk_accepts_non_adjacent_and_revisited_nodes() {
        let mut nav = WalkNavigator::new();
        nav.start("a".into());
        assert!(nav.walk_to("unrelated".into()));
        assert!(nav.walk_to("a".into()));

        assert_eq!(nav.path().len(), 3);
        assert_eq!(nav.current(), Some(&"a".into()));
    }

    #[test]
    fn walk_while_idle_is_rejected() {
        let mut nav = WalkNavigator::new();
        assert!(!nav.walk_to("a".into()));
        assert!(!nav.is_active());
        assert!(nav.path().is_empty());
    }

    #[test]
    fn stop_resets_to_idle() {
        let mut nav = WalkNavigator::new();
        nav.start("a".into());
        nav.walk_to("b".into());
        nav.stop();

        assert!(!nav.is_active());
        assert!(nav.current().is_none());
        assert!(nav.path().is_empty());
    }

    #[test]
    fn restart_discards_previous_session() {
        let mut nav = WalkNavigator::new();
        nav.start("a".into());
        nav.walk_to("b".into());
        nav.start("z".into());

        assert_eq!(nav.path(), &[NodeId::from("z")]);
        assert_eq!(nav.current(), Some(&"z".into()));
    }
}
