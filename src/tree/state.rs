//! Expansion state for the tree view.

use std::collections::HashMap;

use super::TreePath;

/// Per-node expansion state, keyed by node path.
///
/// Only composite (array/object) nodes are ever looked up here; scalars
/// carry no expansion state. Nodes without an explicit entry fall back to
/// the depth rule: expanded while shallower than `default_depth`, collapsed
/// from there on down. The fallback depends only on the node's own depth,
/// never on sibling or ancestor state.
#[derive(Debug)]
pub struct TreeState {
    default_depth: usize,
    overrides: HashMap<TreePath, bool>,
}

impl TreeState {
    pub fn new(default_depth: usize) -> Self {
        TreeState {
            default_depth,
            overrides: HashMap::new(),
        }
    }

    pub fn is_expanded(&self, path: &TreePath) -> bool {
        self.overrides
            .get(path)
            .copied()
            .unwrap_or(path.depth() < self.default_depth)
    }

    /// Flip one node, returning its new state. Siblings and ancestors are
    /// untouched.
    pub fn toggle(&mut self, path: &TreePath) -> bool {
        let expanded = !self.is_expanded(path);
        self.overrides.insert(path.clone(), expanded);
        expanded
    }

    pub fn expand(&mut self, path: TreePath) {
        self.overrides.insert(path, true);
    }

    pub fn collapse(&mut self, path: TreePath) {
        self.overrides.insert(path, false);
    }

    /// Drop all per-node state, e.g. when a new document replaces the tree.
    pub fn clear(&mut self) {
        self.overrides.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_follows_the_depth_rule() {
        let state = TreeState::new(2);
        let root = TreePath::root();
        let level1 = root.child_key("a");
        let level2 = level1.child_key("b");
        let level3 = level2.child_index(0);

        assert!(state.is_expanded(&root));
        assert!(state.is_expanded(&level1));
        assert!(!state.is_expanded(&level2));
        assert!(!state.is_expanded(&level3));
    }

    #[test]
    fn toggle_flips_only_the_given_node() {
        let mut state = TreeState::new(2);
        let parent = TreePath::root().child_key("a");
        let target = parent.child_key("b");
        let sibling = parent.child_key("c");

        assert!(!state.is_expanded(&target));
        assert!(state.toggle(&target));
        assert!(state.is_expanded(&target));
        // Sibling and ancestor state is untouched.
        assert!(!state.is_expanded(&sibling));
        assert!(state.is_expanded(&parent));
        assert!(state.is_expanded(&TreePath::root()));

        // Toggling is symmetric and reversible.
        assert!(!state.toggle(&target));
        assert!(!state.is_expanded(&target));
    }

    #[test]
    fn clear_restores_the_defaults() {
        let mut state = TreeState::new(2);
        let deep = TreePath::root().child_key("a").child_key("b");
        state.toggle(&deep);
        assert!(state.is_expanded(&deep));
        state.clear();
        assert!(!state.is_expanded(&deep));
    }

    #[test]
    fn default_depth_zero_collapses_the_root() {
        let state = TreeState::new(0);
        assert!(!state.is_expanded(&TreePath::root()));
    }
}
