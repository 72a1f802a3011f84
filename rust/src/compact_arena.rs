//! Compact arena storage for tree nodes.
//!
//! Nodes live in a flat `Vec<T>` and are addressed by `NodeId`. The tree only
//! grows, so slots are never freed individually; dropping the arena drops
//! every node without following any parent or sibling handle.

use std::convert::TryFrom;

use crate::error::{BPlusTreeError, BTreeResult};
use crate::types::{NodeId, NULL_NODE};

/// Statistics for a compact arena
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompactArenaStats {
    pub total_capacity: usize,
    pub allocated_count: usize,
}

/// Append-only arena addressed by `NodeId`
#[derive(Debug)]
pub struct CompactArena<T> {
    storage: Vec<T>,
}

impl<T> Default for CompactArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> CompactArena<T> {
    /// Create a new empty compact arena
    pub fn new() -> Self {
        Self {
            storage: Vec::new(),
        }
    }

    /// Arena whose first slot holds `item`; that slot always has ID 0.
    pub fn with_first(item: T) -> (Self, NodeId) {
        (
            Self {
                storage: vec![item],
            },
            0,
        )
    }

    /// Allocate a new item in the arena and return its ID.
    ///
    /// Fails only when the arena would hand out `NULL_NODE` or an index that
    /// does not fit in a `NodeId`.
    #[inline]
    pub fn allocate(&mut self, item: T) -> BTreeResult<NodeId> {
        let index = self.storage.len();
        let id = NodeId::try_from(index)
            .ok()
            .filter(|id| *id != NULL_NODE)
            .ok_or_else(|| {
                BPlusTreeError::allocation_error("arena slot", "node id space exhausted")
            })?;
        self.storage.push(item);
        Ok(id)
    }

    /// Get a reference to an item in the arena
    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&T> {
        if id == NULL_NODE {
            return None;
        }
        self.storage.get(usize::try_from(id).ok()?)
    }

    /// Get a mutable reference to an item in the arena
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        if id == NULL_NODE {
            return None;
        }
        self.storage.get_mut(usize::try_from(id).ok()?)
    }

    /// Check if an ID refers to an allocated slot
    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Number of allocated slots
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Get arena statistics
    pub fn stats(&self) -> CompactArenaStats {
        CompactArenaStats {
            total_capacity: self.storage.capacity(),
            allocated_count: self.storage.len(),
        }
    }
}
