//! INSERT operations for BPlusTreeSet.
//!
//! This module contains the insertion path of the B+ tree: leaf insertion,
//! linking split products into their level's sibling chain, propagating
//! separators through parent handles, and growing a new root.

use tracing::{debug, error, trace};

use crate::compact_arena::CompactArena;
use crate::error::{BPlusTreeError, BTreeResultExt, ModifyResult, TreeResult};
use crate::node::LevelLinks;
use crate::types::{BPlusTreeSet, BranchNode, LeafInsert, NodeId, NodeRef, Propagation, NULL_NODE};

impl<K: Ord + Clone> BPlusTreeSet<K> {
    /// Insert a key into the tree.
    ///
    /// Returns `Ok(true)` if the key was added and `Ok(false)` if it was
    /// already present, in which case the tree is left untouched. An error
    /// means the structure was found corrupted.
    ///
    /// # Examples
    ///
    /// ```
    /// use bplustree_set::BPlusTreeSet;
    ///
    /// let mut tree = BPlusTreeSet::new(4).unwrap();
    /// assert_eq!(tree.add(1), Ok(true));
    /// assert_eq!(tree.add(1), Ok(false));
    /// assert_eq!(tree.size(), 1);
    /// ```
    pub fn add(&mut self, key: K) -> ModifyResult<bool> {
        self.insert_key(key).with_operation("add")
    }

    fn insert_key(&mut self, key: K) -> TreeResult<bool> {
        let leaf_id = self.search(&key)?;

        let new_leaf = match self.leaf_mut(leaf_id)?.insert(key) {
            LeafInsert::Duplicate => {
                trace!(leaf = leaf_id, "duplicate key ignored");
                return Ok(false);
            }
            LeafInsert::Inserted => {
                trace!(leaf = leaf_id, "key inserted");
                return Ok(true);
            }
            LeafInsert::Split(new_leaf) => new_leaf,
        };

        // A leaf keeps its lowest key; the parent gets a copy as separator.
        let separator = new_leaf.first_key().cloned().ok_or_else(|| {
            BPlusTreeError::node_error("Leaf", leaf_id, "split produced an empty right half")
        })?;
        let new_leaf_id = link_right_of(&mut self.leaf_arena, leaf_id, new_leaf)?;
        debug!(leaf = leaf_id, new_leaf = new_leaf_id, "split leaf");

        let pending_root_separator = match self.propagate_to_parent(
            NodeRef::leaf(leaf_id),
            NodeRef::leaf(new_leaf_id),
            separator,
        )? {
            Propagation::Absorbed => None,
            Propagation::ReachedRoot { separator } => Some(separator),
        };

        self.promote_root_if_split(pending_root_separator)?;
        Ok(true)
    }

    /// Insert every key of `keys`, in order.
    ///
    /// Returns how many of them were new.
    pub fn add_all<I>(&mut self, keys: I) -> ModifyResult<usize>
    where
        I: IntoIterator<Item = K>,
    {
        let mut added = 0;
        for key in keys {
            if self.add(key)? {
                added += 1;
            }
        }
        Ok(added)
    }

    // ============================================================================
    // HELPERS FOR INSERT OPERATIONS
    // ============================================================================

    /// Tell the parents of freshly split nodes about their new siblings.
    ///
    /// `child` is the node that split and `new_node` its new right sibling.
    /// The separator goes into the parent right after `child`, with
    /// `new_node` as the child to its right. A full parent is split in turn
    /// and the loop continues one level up. Reaching a node without a parent
    /// means the root split; finishing that is left to the caller.
    fn propagate_to_parent(
        &mut self,
        mut child: NodeRef<K>,
        mut new_node: NodeRef<K>,
        mut separator: K,
    ) -> TreeResult<Propagation<K>> {
        loop {
            let parent_id = self.links(child)?.parent();
            if parent_id == NULL_NODE {
                return Ok(Propagation::ReachedRoot { separator });
            }

            let parent = self.branch_mut(parent_id)?;
            let position = parent.child_position(child).ok_or_else(|| {
                BPlusTreeError::node_error("Branch", parent_id, "split child is not one of its children")
            })?;

            let (right_branch, promoted) =
                match parent.insert_child_and_split_if_needed(position, separator, new_node)? {
                    None => {
                        trace!(branch = parent_id, "separator absorbed");
                        return Ok(Propagation::Absorbed);
                    }
                    Some(split) => split,
                };

            let right_id = link_right_of(&mut self.branch_arena, parent_id, right_branch)?;
            self.adopt_children(right_id)?;
            debug!(branch = parent_id, new_branch = right_id, "split branch");

            child = NodeRef::branch(parent_id);
            new_node = NodeRef::branch(right_id);
            separator = promoted;
        }
    }

    /// Grow the tree by one level if the root acquired a right sibling.
    ///
    /// The new root holds exactly one key and has the old root and its new
    /// sibling as its two children.
    fn promote_root_if_split(&mut self, pending_separator: Option<K>) -> TreeResult<()> {
        let old_root = self.root;
        let (right, separator) = match (self.right_sibling(old_root)?, pending_separator) {
            (None, None) => return Ok(()),
            (Some(right), Some(separator)) => (right, separator),
            (Some(_), None) => {
                return Err(BPlusTreeError::corrupted_tree(
                    "Root",
                    "root has a right sibling but no separator was propagated",
                ))
            }
            (None, Some(_)) => {
                return Err(BPlusTreeError::corrupted_tree(
                    "Root",
                    "root split did not link a right sibling",
                ))
            }
        };

        let mut new_root = BranchNode::new(self.order);
        new_root.keys.insert_at(0, separator);
        new_root.children.push(old_root);
        new_root.children.push(right);
        let root_id = self.branch_arena.allocate(new_root)?;

        self.links_mut(old_root)?.set_parent(root_id);
        self.links_mut(right)?.set_parent(root_id);
        self.root = NodeRef::branch(root_id);

        debug!(root = root_id, height = self.height(), "promoted new root");
        Ok(())
    }

    /// Point every child of `branch_id` back at it.
    fn adopt_children(&mut self, branch_id: NodeId) -> TreeResult<()> {
        let children = self.branch(branch_id)?.children.clone();
        for child in children {
            self.links_mut(child)?.set_parent(branch_id);
        }
        Ok(())
    }
}

/// Allocate `node` and link it into the sibling chain right after `original`.
///
/// `node` arrives carrying `original`'s old right neighbour; that neighbour's
/// left handle is re-pointed at the new node.
fn link_right_of<T: LevelLinks>(
    arena: &mut CompactArena<T>,
    original: NodeId,
    mut node: T,
) -> TreeResult<NodeId> {
    let old_right = node.right();
    node.set_left(original);
    let new_id = arena.allocate(node)?;

    arena
        .get_mut(original)
        .ok_or_else(|| BPlusTreeError::arena_error("Sibling link", &format!("node {} not found", original)))?
        .set_right(new_id);

    if old_right != NULL_NODE {
        arena
            .get_mut(old_right)
            .ok_or_else(|| {
                BPlusTreeError::arena_error("Sibling link", &format!("node {} not found", old_right))
            })?
            .set_left(new_id);
    }

    Ok(new_id)
}

/// Inserts keys in order with the single-key contract.
///
/// `Extend` cannot report failure: if the tree turns out to be corrupted the
/// error is logged and the remaining keys are dropped. Use
/// [`BPlusTreeSet::add_all`] to get the error back.
impl<K: Ord + Clone> Extend<K> for BPlusTreeSet<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        if let Err(err) = self.add_all(iter) {
            error!(%err, "extend stopped on a corrupted tree");
        }
    }
}

impl<K: Ord + Clone> FromIterator<K> for BPlusTreeSet<K> {
    /// Collect keys into a tree with the default order.
    ///
    /// Like `extend`, this cannot report a structural failure; use
    /// [`BPlusTreeSet::from_keys`] when the error matters.
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = Self::default();
        tree.extend(iter);
        tree
    }
}
