//! Validation and debugging utilities for BPlusTreeSet.
//!
//! This module contains invariant checking and the diagnostic dump of the
//! tree structure.

use std::fmt;

use tracing::warn;

use crate::error::{BPlusTreeError, BTreeResult};
use crate::types::{BPlusTreeSet, NodeId, NodeRef, NULL_NODE};

/// Bounds a subtree's keys must respect: `lower <= key < upper`.
struct KeyRange<'a, K> {
    lower: Option<&'a K>,
    upper: Option<&'a K>,
}

// ============================================================================
// VALIDATION METHODS
// ============================================================================

impl<K: Ord> BPlusTreeSet<K> {
    /// Check if the tree maintains B+ tree invariants.
    pub fn check_invariants(&self) -> bool {
        self.check_invariants_detailed().is_ok()
    }

    /// Check invariants with detailed error reporting.
    ///
    /// Covers node capacity, key ordering and bounds, child counts, equal
    /// leaf depth, parent handles, the sibling chain at every depth, and
    /// that every arena slot is reachable from the root.
    pub fn check_invariants_detailed(&self) -> BTreeResult<()> {
        let result = self.check_all();
        if let Err(err) = &result {
            warn!(%err, "invariant check failed");
        }
        result
    }

    /// Alias for check_invariants_detailed (for test compatibility).
    pub fn validate(&self) -> BTreeResult<()> {
        self.check_invariants_detailed()
    }

    fn check_all(&self) -> BTreeResult<()> {
        if self.links(self.root)?.parent() != NULL_NODE {
            return Err(BPlusTreeError::corrupted_tree("Root", "root has a parent handle"));
        }

        let mut levels: Vec<Vec<NodeRef<K>>> = Vec::new();
        let range = KeyRange {
            lower: None,
            upper: None,
        };
        self.check_node(self.root, NULL_NODE, range, 0, &mut levels)?;

        // Branches always have children, so only the deepest level may hold leaves.
        let deepest = levels.len().saturating_sub(1);
        for (depth, level) in levels.iter().enumerate() {
            if depth != deepest {
                if let Some(leaf) = level.iter().find(|node| node.is_leaf()) {
                    return Err(BPlusTreeError::corrupted_tree(
                        "Leaf depth",
                        &format!("leaf {} sits at depth {} instead of {}", leaf.id(), depth, deepest),
                    ));
                }
            }
            self.check_sibling_chain(depth, level)?;
        }

        self.check_arena_tree_consistency()
    }

    /// Recursively check one node and its subtree, recording every node in
    /// `levels[depth]` in left-to-right order.
    fn check_node(
        &self,
        node: NodeRef<K>,
        expected_parent: NodeId,
        range: KeyRange<'_, K>,
        depth: usize,
        levels: &mut Vec<Vec<NodeRef<K>>>,
    ) -> BTreeResult<()> {
        let is_root = expected_parent == NULL_NODE;
        let keys = self.node_keys(node)?;
        let describe = || format!("{} node {}", if node.is_leaf() { "leaf" } else { "branch" }, node.id());

        if self.links(node)?.parent() != expected_parent {
            return Err(BPlusTreeError::corrupted_tree(
                "Parent handle",
                &format!("{} does not point at parent {}", describe(), expected_parent),
            ));
        }
        if keys.len() > self.order {
            return Err(BPlusTreeError::corrupted_tree(
                "Capacity",
                &format!("{} holds {} keys (order {})", describe(), keys.len(), self.order),
            ));
        }
        if keys.is_empty() && !(is_root && node.is_leaf()) {
            return Err(BPlusTreeError::corrupted_tree(
                "Occupancy",
                &format!("{} is empty", describe()),
            ));
        }
        if !keys.windows(2).all(|pair| pair[0] < pair[1]) {
            return Err(BPlusTreeError::corrupted_tree(
                "Key order",
                &format!("{} keys are not strictly ascending", describe()),
            ));
        }
        let below_lower = matches!((range.lower, keys.first()), (Some(lower), Some(first)) if first < lower);
        let above_upper = matches!((range.upper, keys.last()), (Some(upper), Some(last)) if last >= upper);
        if below_lower || above_upper {
            return Err(BPlusTreeError::corrupted_tree(
                "Key range",
                &format!("{} has keys outside its parent's separators", describe()),
            ));
        }

        if levels.len() <= depth {
            levels.push(Vec::new());
        }
        levels[depth].push(node);

        match node {
            NodeRef::Leaf(_, _) => Ok(()),
            NodeRef::Branch(id, _) => {
                let branch = self.branch(id)?;
                if branch.children.len() != keys.len() + 1 {
                    return Err(BPlusTreeError::corrupted_tree(
                        "Child count",
                        &format!(
                            "{} has {} keys but {} children",
                            describe(),
                            keys.len(),
                            branch.children.len()
                        ),
                    ));
                }
                for (i, child) in branch.children.iter().enumerate() {
                    let child_range = KeyRange {
                        lower: if i == 0 { range.lower } else { keys.get(i - 1) },
                        upper: if i == keys.len() { range.upper } else { keys.get(i) },
                    };
                    self.check_node(*child, id, child_range, depth + 1, levels)?;
                }
                Ok(())
            }
        }
    }

    /// Walking `right` from the leftmost node must visit exactly `level`, in
    /// ascending key order, and walking `left` must retrace it.
    fn check_sibling_chain(&self, depth: usize, level: &[NodeRef<K>]) -> BTreeResult<()> {
        let chain_error = |details: String| {
            BPlusTreeError::corrupted_tree("Sibling chain", &format!("depth {}: {}", depth, details))
        };

        if let Some(first) = level.first() {
            if self.left_sibling(*first)?.is_some() {
                return Err(chain_error(format!("leftmost node {} has a left sibling", first.id())));
            }
        }
        if let Some(last) = level.last() {
            if self.right_sibling(*last)?.is_some() {
                return Err(chain_error(format!("rightmost node {} has a right sibling", last.id())));
            }
        }

        for pair in level.windows(2) {
            let (left, right) = (pair[0], pair[1]);
            if self.right_sibling(left)? != Some(right) {
                return Err(chain_error(format!("node {} does not link right to {}", left.id(), right.id())));
            }
            if self.left_sibling(right)? != Some(left) {
                return Err(chain_error(format!("node {} does not link left to {}", right.id(), left.id())));
            }
            let ascending = match (self.node_keys(left)?.last(), self.node_keys(right)?.first()) {
                (Some(a), Some(b)) => a < b,
                _ => true,
            };
            if !ascending {
                return Err(chain_error(format!("nodes {} and {} are out of order", left.id(), right.id())));
            }
        }
        Ok(())
    }

    /// Every allocated node must be reachable from the root.
    fn check_arena_tree_consistency(&self) -> BTreeResult<()> {
        let (tree_leaf_count, tree_branch_count) = self.count_nodes_in_tree();
        let leaf_stats = self.leaf_arena.stats();
        let branch_stats = self.branch_arena.stats();

        if tree_leaf_count != leaf_stats.allocated_count {
            return Err(BPlusTreeError::arena_error(
                "Leaf consistency check",
                &format!("{} in tree vs {} in arena", tree_leaf_count, leaf_stats.allocated_count),
            ));
        }
        if tree_branch_count != branch_stats.allocated_count {
            return Err(BPlusTreeError::arena_error(
                "Branch consistency check",
                &format!("{} in tree vs {} in arena", tree_branch_count, branch_stats.allocated_count),
            ));
        }
        Ok(())
    }
}

// ============================================================================
// DEBUGGING UTILITIES
// ============================================================================

impl<K: fmt::Display> BPlusTreeSet<K> {
    /// Write an indented dump of the tree structure.
    ///
    /// Each node prints a header line (`leaf : #id` or `inner: #id`) and its
    /// keys one per line, with a branch's children interleaved between its
    /// keys. The format is for humans and may change.
    pub fn print<W: fmt::Write + ?Sized>(&self, out: &mut W) -> fmt::Result {
        self.print_node(out, self.root, 0)
    }

    fn print_node<W: fmt::Write + ?Sized>(&self, out: &mut W, node: NodeRef<K>, depth: usize) -> fmt::Result {
        let indent = "  ".repeat(depth);
        match node {
            NodeRef::Leaf(id, _) => {
                writeln!(out, "{}leaf : #{}", indent, id)?;
                match self.leaf_arena.get(id) {
                    Some(leaf) => {
                        for key in leaf.keys() {
                            writeln!(out, "{}  {}", indent, key)?;
                        }
                    }
                    None => writeln!(out, "{}  <missing>", indent)?,
                }
            }
            NodeRef::Branch(id, _) => {
                writeln!(out, "{}inner: #{}", indent, id)?;
                match self.branch_arena.get(id) {
                    Some(branch) => {
                        for (key, child) in branch.keys().iter().zip(&branch.children) {
                            self.print_node(out, *child, depth + 1)?;
                            writeln!(out, "{}  {}", indent, key)?;
                        }
                        if let Some(last) = branch.children.get(branch.keys().len()) {
                            self.print_node(out, *last, depth + 1)?;
                        }
                    }
                    None => writeln!(out, "{}  <missing>", indent)?,
                }
            }
        }
        Ok(())
    }
}

impl<K: fmt::Display> fmt::Display for BPlusTreeSet<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.print(f)
    }
}
