//! GET operations for BPlusTreeSet.
//!
//! This module contains the read operations for the B+ tree: descent to the
//! leaf that may hold a key, membership, and the arena accessors used by the
//! rest of the crate.

use std::borrow::Borrow;

use crate::error::{BPlusTreeError, TreeResult};
use crate::node::LevelLinks;
use crate::types::{BPlusTreeSet, BranchNode, LeafNode, NodeId, NodeRef, NULL_NODE};

impl<K: Ord> BPlusTreeSet<K> {
    // ============================================================================
    // PUBLIC GET OPERATIONS
    // ============================================================================

    /// Check if a key is stored in the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use bplustree_set::BPlusTreeSet;
    ///
    /// let mut tree = BPlusTreeSet::new(4).unwrap();
    /// tree.add(1).unwrap();
    /// assert!(tree.member(&1));
    /// assert!(!tree.member(&2));
    /// ```
    pub fn member<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.search(key)
            .ok()
            .and_then(|leaf_id| self.leaf_arena.get(leaf_id))
            .map(|leaf| leaf.contains(key))
            .unwrap_or(false)
    }

    /// Alias for [`member`](Self::member).
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.member(key)
    }

    // ============================================================================
    // TREE NAVIGATION
    // ============================================================================

    /// Find the leaf that would contain `key` if it were present.
    ///
    /// At each branch the first separator strictly greater than `key` selects
    /// the child to its left; otherwise the last child is taken.
    pub(crate) fn search<Q>(&self, key: &Q) -> TreeResult<NodeId>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current = self.root;

        loop {
            match current {
                NodeRef::Leaf(leaf_id, _) => return Ok(leaf_id),
                NodeRef::Branch(branch_id, _) => {
                    let branch = self.branch(branch_id)?;
                    current = branch.get_child(key).ok_or_else(|| {
                        BPlusTreeError::node_error("Branch", branch_id, "no child covers key")
                    })?;
                }
            }
        }
    }
}

impl<K> BPlusTreeSet<K> {
    // ============================================================================
    // ARENA ACCESS
    // ============================================================================

    pub(crate) fn leaf(&self, id: NodeId) -> TreeResult<&LeafNode<K>> {
        self.leaf_arena
            .get(id)
            .ok_or_else(|| BPlusTreeError::arena_error("Leaf lookup", &format!("node {} not found", id)))
    }

    pub(crate) fn leaf_mut(&mut self, id: NodeId) -> TreeResult<&mut LeafNode<K>> {
        self.leaf_arena
            .get_mut(id)
            .ok_or_else(|| BPlusTreeError::arena_error("Leaf lookup", &format!("node {} not found", id)))
    }

    pub(crate) fn branch(&self, id: NodeId) -> TreeResult<&BranchNode<K>> {
        self.branch_arena
            .get(id)
            .ok_or_else(|| BPlusTreeError::arena_error("Branch lookup", &format!("node {} not found", id)))
    }

    pub(crate) fn branch_mut(&mut self, id: NodeId) -> TreeResult<&mut BranchNode<K>> {
        self.branch_arena
            .get_mut(id)
            .ok_or_else(|| BPlusTreeError::arena_error("Branch lookup", &format!("node {} not found", id)))
    }

    /// Parent and sibling handles of either node kind.
    pub(crate) fn links(&self, node: NodeRef<K>) -> TreeResult<&dyn LevelLinks> {
        let links: &dyn LevelLinks = match node {
            NodeRef::Leaf(id, _) => self.leaf(id)?,
            NodeRef::Branch(id, _) => self.branch(id)?,
        };
        Ok(links)
    }

    pub(crate) fn links_mut(&mut self, node: NodeRef<K>) -> TreeResult<&mut dyn LevelLinks> {
        let links: &mut dyn LevelLinks = match node {
            NodeRef::Leaf(id, _) => self.leaf_mut(id)?,
            NodeRef::Branch(id, _) => self.branch_mut(id)?,
        };
        Ok(links)
    }

    /// Keys held by a node of either kind.
    pub(crate) fn node_keys(&self, node: NodeRef<K>) -> TreeResult<&[K]> {
        Ok(match node {
            NodeRef::Leaf(id, _) => self.leaf(id)?.keys(),
            NodeRef::Branch(id, _) => self.branch(id)?.keys(),
        })
    }

    /// The node immediately right of `node` at the same depth, if any.
    pub(crate) fn right_sibling(&self, node: NodeRef<K>) -> TreeResult<Option<NodeRef<K>>> {
        let right = self.links(node)?.right();
        Ok(self.handle_to_ref(node, right))
    }

    pub(crate) fn left_sibling(&self, node: NodeRef<K>) -> TreeResult<Option<NodeRef<K>>> {
        let left = self.links(node)?.left();
        Ok(self.handle_to_ref(node, left))
    }

    /// Siblings share their kind with `node`.
    fn handle_to_ref(&self, node: NodeRef<K>, handle: NodeId) -> Option<NodeRef<K>> {
        if handle == NULL_NODE {
            None
        } else {
            Some(node.same_kind(handle))
        }
    }
}
