//! Construction and initialization logic for BPlusTreeSet and nodes.
//!
//! This module contains order validation, arena initialization, the
//! key-list constructors, and default implementations.

use crate::compact_arena::CompactArena;
use crate::error::{BPlusTreeError, BTreeResult, InitResult};
use crate::key_slots::KeySlots;
use crate::types::{BPlusTreeSet, BranchNode, LeafNode, NodeRef, MIN_ORDER, NULL_NODE};

/// Default order for B+ tree nodes (k = 2)
pub const DEFAULT_ORDER: usize = 4;

impl<K> BPlusTreeSet<K> {
    /// Create a B+ tree whose nodes hold at most `order` keys.
    ///
    /// # Arguments
    ///
    /// * `order` - Maximum number of keys per node; must be even and at least 2
    ///
    /// # Examples
    ///
    /// ```
    /// use bplustree_set::BPlusTreeSet;
    ///
    /// let tree = BPlusTreeSet::<i32>::new(4).unwrap();
    /// assert_eq!(tree.size(), 0);
    /// assert!(BPlusTreeSet::<i32>::new(3).is_err());
    /// ```
    pub fn new(order: usize) -> InitResult<Self> {
        validation::validate_order(order)?;
        Ok(Self::with_valid_order(order))
    }

    /// Create a B+ tree of order `2k`.
    ///
    /// ```
    /// use bplustree_set::BPlusTreeSet;
    ///
    /// let tree = BPlusTreeSet::<u64>::with_half_order(3).unwrap();
    /// assert_eq!(tree.order(), 6);
    /// ```
    pub fn with_half_order(k: usize) -> InitResult<Self> {
        let order = k.checked_mul(2).ok_or_else(|| {
            BPlusTreeError::invalid_order(usize::MAX, "2k overflows usize")
        })?;
        Self::new(order)
    }

    /// Create a B+ tree with the default order.
    pub fn with_default_order() -> Self {
        Self::with_valid_order(DEFAULT_ORDER)
    }

    fn with_valid_order(order: usize) -> Self {
        // The initial root is the only leaf, so the first arena slot is it.
        let (leaf_arena, root_id) = CompactArena::with_first(LeafNode::new(order));

        Self {
            order,
            root: NodeRef::leaf(root_id),
            leaf_arena,
            branch_arena: CompactArena::new(),
        }
    }
}

impl<K: Ord + Clone> BPlusTreeSet<K> {
    /// Build a tree of the given order from a list of keys, inserted in order.
    ///
    /// ```
    /// use bplustree_set::BPlusTreeSet;
    ///
    /// let tree = BPlusTreeSet::from_keys(4, [3, 1, 2, 3]).unwrap();
    /// assert_eq!(tree.size(), 3);
    /// ```
    pub fn from_keys<I>(order: usize, keys: I) -> InitResult<Self>
    where
        I: IntoIterator<Item = K>,
    {
        let mut tree = Self::new(order)?;
        tree.add_all(keys)?;
        Ok(tree)
    }
}

impl<K> LeafNode<K> {
    /// Creates a new, unlinked leaf node for a tree of the given order.
    pub(crate) fn new(order: usize) -> Self {
        Self {
            keys: KeySlots::new(order),
            parent: NULL_NODE,
            left: NULL_NODE,
            right: NULL_NODE,
        }
    }
}

impl<K> BranchNode<K> {
    /// Creates a new, unlinked branch node for a tree of the given order.
    pub(crate) fn new(order: usize) -> Self {
        Self {
            keys: KeySlots::new(order),
            // Branch nodes have one more child than keys, plus the overflow slot
            children: Vec::with_capacity(order + 2),
            parent: NULL_NODE,
            left: NULL_NODE,
            right: NULL_NODE,
        }
    }
}

impl<K> Default for BPlusTreeSet<K> {
    /// Create a B+ tree with the default order.
    fn default() -> Self {
        Self::with_default_order()
    }
}

/// Validation utilities for construction
pub mod validation {
    use super::*;

    /// Validate that an order is suitable for B+ tree nodes.
    ///
    /// The split keeps `order / 2` keys on the left, so the order must be even
    /// and at least `MIN_ORDER` for both halves to stay non-empty.
    pub fn validate_order(order: usize) -> BTreeResult<()> {
        if order < MIN_ORDER {
            Err(BPlusTreeError::invalid_order(
                order,
                &format!("minimum required: {}", MIN_ORDER),
            ))
        } else if order % 2 != 0 {
            Err(BPlusTreeError::invalid_order(order, "order must be even (order = 2k)"))
        } else {
            Ok(())
        }
    }

    /// Get the recommended order for a given expected number of keys.
    ///
    /// Always returns a valid (even, >= MIN_ORDER) order.
    pub fn recommended_order(expected_elements: usize) -> usize {
        if expected_elements < 100 {
            DEFAULT_ORDER
        } else if expected_elements < 10_000 {
            16
        } else if expected_elements < 1_000_000 {
            32
        } else {
            64
        }
    }
}
