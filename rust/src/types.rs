//! Core types and data structures for BPlusTreeSet.
//!
//! This module contains the fundamental data structures, type definitions,
//! and constants used throughout the B+ tree implementation.

use std::marker::PhantomData;

use crate::compact_arena::CompactArena;
use crate::key_slots::KeySlots;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Minimum order for any B+ tree node (k = 1)
pub const MIN_ORDER: usize = 2;

// ============================================================================
// TYPE DEFINITIONS
// ============================================================================

/// Node ID type for arena-based allocation
pub type NodeId = u32;

/// Handle value meaning "no node" for parent and sibling links
pub const NULL_NODE: NodeId = u32::MAX;

// ============================================================================
// CORE DATA STRUCTURES
// ============================================================================

/// In-memory B+ tree holding a set of distinct ordered keys.
///
/// Every node holds at most `order` keys (`order = 2k`); a branch holds one
/// more child than it has keys. All keys live in the leaves, and every depth
/// level is threaded by a doubly linked sibling chain.
///
/// # Examples
///
/// ```
/// use bplustree_set::BPlusTreeSet;
///
/// let mut tree = BPlusTreeSet::new(4).unwrap();
/// for key in [10, 20, 5, 6, 12, 30, 7, 17] {
///     tree.add(key).unwrap();
/// }
///
/// assert!(tree.member(&6));
/// assert!(!tree.member(&99));
/// assert_eq!(tree.size(), 8);
/// assert!(!tree.is_leaf_root());
/// ```
///
/// # Performance Characteristics
///
/// - **Insertion**: O(log n) descent plus O(order) work per split level
/// - **Membership**: O(log n)
/// - **Size**: O(number of nodes)
#[derive(Debug)]
pub struct BPlusTreeSet<K> {
    /// Maximum number of keys per node.
    pub(crate) order: usize,
    /// The root node of the tree.
    pub(crate) root: NodeRef<K>,
    /// Arena storage for leaf nodes.
    pub(crate) leaf_arena: CompactArena<LeafNode<K>>,
    /// Arena storage for branch nodes.
    pub(crate) branch_arena: CompactArena<BranchNode<K>>,
}

/// Leaf node holding the stored keys.
#[derive(Debug, Clone)]
pub(crate) struct LeafNode<K> {
    /// Sorted keys, at most `order` of them between operations.
    pub(crate) keys: KeySlots<K>,
    /// Owning branch, or `NULL_NODE` for the root.
    pub(crate) parent: NodeId,
    /// Previous leaf at this depth.
    pub(crate) left: NodeId,
    /// Next leaf at this depth.
    pub(crate) right: NodeId,
}

/// Internal (branch) node containing separator keys and child references.
#[derive(Debug, Clone)]
pub(crate) struct BranchNode<K> {
    /// Sorted separator keys.
    pub(crate) keys: KeySlots<K>,
    /// Child nodes; always `keys.len() + 1` of them between operations.
    pub(crate) children: Vec<NodeRef<K>>,
    pub(crate) parent: NodeId,
    pub(crate) left: NodeId,
    pub(crate) right: NodeId,
}

// ============================================================================
// ENUMS AND RESULT TYPES
// ============================================================================

/// Node reference that can be either a leaf or branch node
#[derive(Debug)]
pub enum NodeRef<K> {
    Leaf(NodeId, PhantomData<K>),
    Branch(NodeId, PhantomData<K>),
}

impl<K> Clone for NodeRef<K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for NodeRef<K> {}

impl<K> PartialEq for NodeRef<K> {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (NodeRef::Leaf(a, _), NodeRef::Leaf(b, _)) | (NodeRef::Branch(a, _), NodeRef::Branch(b, _))
                if a == b
        )
    }
}

impl<K> Eq for NodeRef<K> {}

impl<K> NodeRef<K> {
    pub(crate) fn leaf(id: NodeId) -> Self {
        NodeRef::Leaf(id, PhantomData)
    }

    pub(crate) fn branch(id: NodeId) -> Self {
        NodeRef::Branch(id, PhantomData)
    }

    /// Return the raw node ID.
    pub fn id(&self) -> NodeId {
        match *self {
            NodeRef::Leaf(id, _) => id,
            NodeRef::Branch(id, _) => id,
        }
    }

    /// Returns true if this reference points to a leaf node.
    pub fn is_leaf(&self) -> bool {
        matches!(self, NodeRef::Leaf(_, _))
    }

    /// Reference to a sibling at the same depth, which is always the same kind.
    pub(crate) fn same_kind(&self, id: NodeId) -> Self {
        match self {
            NodeRef::Leaf(_, _) => NodeRef::leaf(id),
            NodeRef::Branch(_, _) => NodeRef::branch(id),
        }
    }
}

/// Result of inserting a key into a leaf.
pub(crate) enum LeafInsert<K> {
    /// The key was already present; nothing changed.
    Duplicate,
    /// The key fit into the leaf.
    Inserted,
    /// The leaf overflowed. Holds the new right half, not yet in the arena
    /// and not yet linked into the sibling chain.
    Split(LeafNode<K>),
}

/// What happened when a split separator was handed to the parent level.
pub(crate) enum Propagation<K> {
    /// Some ancestor had room; the tree height is unchanged.
    Absorbed,
    /// The root itself split. `separator` divides the old root from its new
    /// right sibling and must become the only key of a new root.
    ReachedRoot { separator: K },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_ref_identity() {
        let leaf: NodeRef<i32> = NodeRef::leaf(3);
        let branch: NodeRef<i32> = NodeRef::branch(3);
        assert!(leaf.is_leaf());
        assert!(!branch.is_leaf());
        assert_eq!(leaf.id(), branch.id());
        assert_ne!(leaf, branch);
        assert_eq!(leaf, NodeRef::leaf(3));
    }

    #[test]
    fn test_same_kind_keeps_variant() {
        let branch: NodeRef<i32> = NodeRef::branch(0);
        assert_eq!(branch.same_kind(9), NodeRef::branch(9));
        let leaf: NodeRef<i32> = NodeRef::leaf(0);
        assert_eq!(leaf.same_kind(9), NodeRef::leaf(9));
    }
}
