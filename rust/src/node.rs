//! Node implementations for BPlusTreeSet.
//!
//! This module contains the node-local halves of the insertion algorithm:
//! sorted insertion with duplicate rejection, and the insert-then-split that
//! resolves an overflow. Nodes never follow their own parent or sibling
//! handles; wiring the result into the tree is done by the tree itself.

use std::borrow::Borrow;

use crate::error::{BPlusTreeError, TreeResult};
use crate::types::{BranchNode, LeafInsert, LeafNode, NodeId, NodeRef, NULL_NODE};

/// Parent and same-depth sibling handles shared by both node kinds.
pub(crate) trait LevelLinks {
    fn parent(&self) -> NodeId;
    fn set_parent(&mut self, id: NodeId);
    fn left(&self) -> NodeId;
    fn set_left(&mut self, id: NodeId);
    fn right(&self) -> NodeId;
    fn set_right(&mut self, id: NodeId);
}

macro_rules! impl_level_links {
    ($node:ident) => {
        impl<K> LevelLinks for $node<K> {
            fn parent(&self) -> NodeId {
                self.parent
            }
            fn set_parent(&mut self, id: NodeId) {
                self.parent = id;
            }
            fn left(&self) -> NodeId {
                self.left
            }
            fn set_left(&mut self, id: NodeId) {
                self.left = id;
            }
            fn right(&self) -> NodeId {
                self.right
            }
            fn set_right(&mut self, id: NodeId) {
                self.right = id;
            }
        }
    };
}

impl_level_links!(LeafNode);
impl_level_links!(BranchNode);

// ============================================================================
// LEAF NODE IMPLEMENTATION
// ============================================================================

impl<K> LeafNode<K> {
    /// Returns the number of keys in this leaf.
    pub(crate) fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns true if this leaf node is at capacity.
    pub(crate) fn is_full(&self) -> bool {
        self.keys.is_full()
    }

    pub(crate) fn keys(&self) -> &[K] {
        self.keys.as_slice()
    }

    pub(crate) fn first_key(&self) -> Option<&K> {
        self.keys.first()
    }

    /// Cut an overflowing leaf at `order / 2`, returning the right half.
    ///
    /// The right half inherits this leaf's parent and right neighbour; its
    /// left handle is filled in once it has an ID.
    fn split_overflowing(&mut self) -> LeafNode<K> {
        let mid = self.keys.order() / 2;
        LeafNode {
            keys: self.keys.split_off(mid),
            parent: self.parent,
            left: NULL_NODE,
            right: self.right,
        }
    }
}

impl<K: Ord> LeafNode<K> {
    pub(crate) fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.keys.contains(key)
    }

    /// Insert a key, splitting if the leaf is already full.
    ///
    /// The duplicate check happens before anything is shifted. When the leaf
    /// is full the key is placed first (one transient overflow slot) and the
    /// run of `order + 1` keys is cut so that exactly `order / 2` stay here.
    pub(crate) fn insert(&mut self, key: K) -> LeafInsert<K> {
        let index = match self.keys.locate(&key) {
            Ok(_) => return LeafInsert::Duplicate,
            Err(index) => index,
        };

        if !self.is_full() {
            self.keys.insert_at(index, key);
            return LeafInsert::Inserted;
        }

        self.keys.insert_at(index, key);
        LeafInsert::Split(self.split_overflowing())
    }
}

// ============================================================================
// BRANCH NODE IMPLEMENTATION
// ============================================================================

impl<K> BranchNode<K> {
    /// Returns true if this branch node is at capacity.
    pub(crate) fn is_full(&self) -> bool {
        self.keys.is_full()
    }

    pub(crate) fn keys(&self) -> &[K] {
        self.keys.as_slice()
    }

    /// Position of `child` among this branch's children.
    pub(crate) fn child_position(&self, child: NodeRef<K>) -> Option<usize> {
        self.children.iter().position(|candidate| *candidate == child)
    }

    /// Insert `separator` right after the child at `position` and make
    /// `new_child` the child to its right.
    ///
    /// Returns `None` when the branch had room, or the new right branch and
    /// the separator promoted out of it when the branch had to split.
    pub(crate) fn insert_child_and_split_if_needed(
        &mut self,
        position: usize,
        separator: K,
        new_child: NodeRef<K>,
    ) -> TreeResult<Option<(BranchNode<K>, K)>> {
        // Insert first in both cases; a full branch then holds order + 1
        // keys and order + 2 children until the split below.
        let needs_split = self.is_full();
        self.keys.insert_at(position, separator);
        self.children.insert(position + 1, new_child);

        if needs_split {
            self.split_data().map(Some)
        } else {
            Ok(None)
        }
    }

    /// Split an overflowing branch, returning the new right node and the key
    /// promoted to the parent.
    ///
    /// This branch keeps `order / 2` keys and `order / 2 + 1` children. The
    /// right node is cut with the remaining keys, and its lowest key moves up
    /// as the separator instead of staying below.
    fn split_data(&mut self) -> TreeResult<(BranchNode<K>, K)> {
        let mid = self.keys.order() / 2;

        let mut right_keys = self.keys.split_off(mid);
        let promoted_key = right_keys.take_first().ok_or_else(|| {
            BPlusTreeError::NodeError("branch split produced an empty right half".to_string())
        })?;
        let right_children = self.children.split_off(mid + 1);

        let new_right = BranchNode {
            keys: right_keys,
            children: right_children,
            parent: self.parent,
            left: NULL_NODE,
            right: self.right,
        };

        Ok((new_right, promoted_key))
    }
}

impl<K: Ord> BranchNode<K> {
    /// Find the index of the child that should contain the given key.
    pub(crate) fn find_child_index<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.keys.child_index(key)
    }

    /// Get the child node for a given key.
    pub(crate) fn get_child<Q>(&self, key: &Q) -> Option<NodeRef<K>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.children.get(self.find_child_index(key)).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_leaf(order: usize, keys: &[i32]) -> LeafNode<i32> {
        let mut leaf = LeafNode::new(order);
        for key in keys {
            assert!(matches!(leaf.insert(*key), LeafInsert::Inserted));
        }
        leaf
    }

    fn split_leaf(leaf: &mut LeafNode<i32>, key: i32) -> LeafNode<i32> {
        match leaf.insert(key) {
            LeafInsert::Split(right) => right,
            _ => panic!("expected a split"),
        }
    }

    #[test]
    fn test_leaf_insert_keeps_order() {
        let leaf = full_leaf(4, &[20, 10, 30]);
        assert_eq!(leaf.keys(), &[10, 20, 30]);
        assert!(!leaf.is_full());
    }

    #[test]
    fn test_leaf_rejects_duplicate_even_when_full() {
        let mut leaf = full_leaf(4, &[1, 2, 3, 4]);
        assert!(matches!(leaf.insert(3), LeafInsert::Duplicate));
        assert_eq!(leaf.keys(), &[1, 2, 3, 4]);
    }

    #[test]
    fn test_leaf_split_incoming_key_before_midpoint() {
        let mut leaf = full_leaf(4, &[10, 20, 30, 40]);
        let right = split_leaf(&mut leaf, 5);
        assert_eq!(leaf.keys(), &[5, 10]);
        assert_eq!(right.keys(), &[20, 30, 40]);
    }

    #[test]
    fn test_leaf_split_incoming_key_at_boundary_goes_right() {
        let mut leaf = full_leaf(4, &[10, 20, 30, 40]);
        let right = split_leaf(&mut leaf, 25);
        assert_eq!(leaf.keys(), &[10, 20]);
        assert_eq!(right.keys(), &[25, 30, 40]);
    }

    #[test]
    fn test_leaf_split_incoming_key_after_midpoint() {
        let mut leaf = full_leaf(4, &[10, 20, 30, 40]);
        let right = split_leaf(&mut leaf, 50);
        assert_eq!(leaf.keys(), &[10, 20]);
        assert_eq!(right.keys(), &[30, 40, 50]);
    }

    #[test]
    fn test_leaf_split_inherits_links() {
        let mut leaf = full_leaf(2, &[1, 2]);
        leaf.parent = 7;
        leaf.left = 3;
        leaf.right = 9;
        let right = split_leaf(&mut leaf, 3);
        assert_eq!(leaf.keys(), &[1]);
        assert_eq!(right.keys(), &[2, 3]);
        assert_eq!(right.parent, 7);
        assert_eq!(right.right, 9);
        assert_eq!(right.left, NULL_NODE);
        // the original keeps its handles until the tree relinks it
        assert_eq!(leaf.right, 9);
        assert_eq!(leaf.left, 3);
    }

    fn branch(order: usize, keys: &[i32]) -> BranchNode<i32> {
        let mut node = BranchNode::new(order);
        node.children.push(NodeRef::leaf(0));
        for (i, key) in keys.iter().enumerate() {
            node.keys.insert_at(i, *key);
            node.children.push(NodeRef::leaf(i as NodeId + 1));
        }
        node
    }

    #[test]
    fn test_branch_insert_without_split() {
        let mut node = branch(4, &[10, 30]);
        let result = node
            .insert_child_and_split_if_needed(1, 20, NodeRef::leaf(99))
            .unwrap();
        assert!(result.is_none());
        assert_eq!(node.keys(), &[10, 20, 30]);
        assert_eq!(
            node.children,
            [NodeRef::leaf(0), NodeRef::leaf(1), NodeRef::leaf(99), NodeRef::leaf(2)]
        );
    }

    #[test]
    fn test_branch_split_promotes_middle_key() {
        let mut node = branch(4, &[10, 20, 30, 40]);
        let (right, promoted) = node
            .insert_child_and_split_if_needed(4, 50, NodeRef::leaf(99))
            .unwrap()
            .unwrap();
        assert_eq!(promoted, 30);
        assert_eq!(node.keys(), &[10, 20]);
        assert_eq!(node.children.len(), 3);
        assert_eq!(right.keys(), &[40, 50]);
        assert_eq!(
            right.children,
            [NodeRef::leaf(3), NodeRef::leaf(4), NodeRef::leaf(99)]
        );
    }

    #[test]
    fn test_branch_split_order_two() {
        let mut node = branch(2, &[10, 20]);
        let (right, promoted) = node
            .insert_child_and_split_if_needed(0, 5, NodeRef::leaf(99))
            .unwrap()
            .unwrap();
        assert_eq!(node.keys(), &[5]);
        assert_eq!(node.children, [NodeRef::leaf(0), NodeRef::leaf(99)]);
        assert_eq!(promoted, 10);
        assert_eq!(right.keys(), &[20]);
        assert_eq!(right.children, [NodeRef::leaf(1), NodeRef::leaf(2)]);
    }

    #[test]
    fn test_find_child_index() {
        let node = branch(4, &[10, 20]);
        assert_eq!(node.find_child_index(&9), 0);
        assert_eq!(node.find_child_index(&10), 1);
        assert_eq!(node.find_child_index(&25), 2);
        assert_eq!(node.get_child(&25), Some(NodeRef::leaf(2)));
        assert_eq!(node.child_position(NodeRef::leaf(1)), Some(1));
        assert_eq!(node.child_position(NodeRef::branch(1)), None);
    }
}
