//! Tree structure operations for BPlusTreeSet.
//!
//! This module contains the tree-level queries over the overall shape:
//! the key count, height, node counts, and a read-only node view for
//! diagnostics and tests.

use std::fmt;

use crate::types::{BPlusTreeSet, NodeId, NodeRef, NULL_NODE};

// ============================================================================
// TREE STRUCTURE OPERATIONS
// ============================================================================

impl<K> BPlusTreeSet<K> {
    /// Returns the number of distinct keys stored in the tree.
    ///
    /// Branches contribute the sum of their children; leaves contribute
    /// their own key count.
    pub fn size(&self) -> usize {
        self.size_recursive(&self.root)
    }

    /// Recursively count keys with proper arena access.
    fn size_recursive(&self, node: &NodeRef<K>) -> usize {
        match node {
            NodeRef::Leaf(id, _) => self.leaf_arena.get(*id).map(|leaf| leaf.len()).unwrap_or(0),
            NodeRef::Branch(id, _) => self
                .branch_arena
                .get(*id)
                .map(|branch| {
                    branch
                        .children
                        .iter()
                        .map(|child| self.size_recursive(child))
                        .sum()
                })
                .unwrap_or(0),
        }
    }

    /// Maximum number of keys per node.
    pub fn order(&self) -> usize {
        self.order
    }

    /// Number of levels, counting the root level as 1.
    pub fn height(&self) -> usize {
        let mut height = 1;
        let mut current = self.root;
        while let NodeRef::Branch(id, _) = current {
            match self.branch_arena.get(id).and_then(|branch| branch.children.first()) {
                Some(child) => {
                    current = *child;
                    height += 1;
                }
                None => break,
            }
        }
        height
    }

    /// Returns true if the root is a leaf node.
    pub fn is_leaf_root(&self) -> bool {
        self.root.is_leaf()
    }

    /// Returns the number of leaf nodes in the tree.
    pub fn leaf_count(&self) -> usize {
        self.count_nodes_in_tree().0
    }

    /// Count the number of leaf and branch nodes reachable from the root.
    pub fn count_nodes_in_tree(&self) -> (usize, usize) {
        self.count_nodes_recursive(&self.root)
    }

    fn count_nodes_recursive(&self, node: &NodeRef<K>) -> (usize, usize) {
        match node {
            NodeRef::Leaf(_, _) => (1, 0),
            NodeRef::Branch(id, _) => {
                if let Some(branch) = self.branch_arena.get(*id) {
                    branch
                        .children
                        .iter()
                        .map(|child| self.count_nodes_recursive(child))
                        .fold((0, 1), |(leaves, branches), (l, b)| (leaves + l, branches + b))
                } else {
                    (0, 0)
                }
            }
        }
    }

    /// Read-only view of the root node.
    pub fn root_view(&self) -> NodeView<'_, K> {
        NodeView {
            tree: self,
            node: self.root,
        }
    }
}

// ============================================================================
// NODE VIEW
// ============================================================================

/// Read-only view of one node, for inspecting the tree's shape.
pub struct NodeView<'a, K> {
    tree: &'a BPlusTreeSet<K>,
    node: NodeRef<K>,
}

impl<K> Clone for NodeView<'_, K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for NodeView<'_, K> {}

impl<'a, K> NodeView<'a, K> {
    pub fn id(&self) -> NodeId {
        self.node.id()
    }

    pub fn is_leaf(&self) -> bool {
        self.node.is_leaf()
    }

    /// Keys of this node: stored keys for a leaf, separators for a branch.
    pub fn keys(&self) -> &'a [K] {
        self.tree.node_keys(self.node).unwrap_or(&[])
    }

    /// Children in left-to-right order; empty for a leaf.
    pub fn children(&self) -> Vec<NodeView<'a, K>> {
        match self.node {
            NodeRef::Leaf(_, _) => Vec::new(),
            NodeRef::Branch(id, _) => self
                .tree
                .branch_arena
                .get(id)
                .map(|branch| branch.children.iter().map(|child| self.with(*child)).collect())
                .unwrap_or_default(),
        }
    }

    /// The owning branch, or `None` for the root.
    pub fn parent(&self) -> Option<NodeView<'a, K>> {
        let parent = self.tree.links(self.node).ok()?.parent();
        (parent != NULL_NODE).then(|| self.with(NodeRef::branch(parent)))
    }

    /// Previous node at the same depth.
    pub fn left(&self) -> Option<NodeView<'a, K>> {
        let left = self.tree.left_sibling(self.node).ok()??;
        Some(self.with(left))
    }

    /// Next node at the same depth.
    pub fn right(&self) -> Option<NodeView<'a, K>> {
        let right = self.tree.right_sibling(self.node).ok()??;
        Some(self.with(right))
    }

    /// Every key stored in the leaves below this node, in tree order.
    pub fn subtree_keys(&self) -> Vec<&'a K> {
        let mut keys = Vec::new();
        let mut stack = vec![*self];
        while let Some(view) = stack.pop() {
            if view.is_leaf() {
                keys.extend(view.keys());
            } else {
                stack.extend(view.children().into_iter().rev());
            }
        }
        keys
    }

    fn with(&self, node: NodeRef<K>) -> NodeView<'a, K> {
        NodeView {
            tree: self.tree,
            node,
        }
    }
}

impl<K: fmt::Debug> fmt::Debug for NodeView<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeView")
            .field("id", &self.id())
            .field("leaf", &self.is_leaf())
            .field("keys", &self.keys())
            .finish()
    }
}
