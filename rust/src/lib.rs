//! In-memory B+ tree set.
//!
//! `BPlusTreeSet` stores distinct ordered keys in a B+ tree of order `2k`.
//! Inserting descends to a leaf, splits it when it overflows, and pushes
//! separators up through parent handles; when the root itself splits the
//! tree grows a new root one level higher. Every depth level is threaded by
//! a doubly linked sibling chain.
//!
//! Nodes live in two arenas owned by the tree. Parent and sibling links are
//! plain `NodeId` handles, never owning references, so dropping a tree of
//! any height is a flat drop of two vectors.
//!
//! The tree also implements the generic [`Container`] trait. Only `add`,
//! `member`, `size` and `print` are meaningful there; removal, emptiness,
//! ordered traversal and min/max report [`BPlusTreeError::Unsupported`].
//!
//! ```
//! use bplustree_set::BPlusTreeSet;
//!
//! let mut tree = BPlusTreeSet::with_half_order(2).unwrap();
//! tree.add_all([10, 20, 5, 6, 12, 30, 7, 17]).unwrap();
//! assert_eq!(tree.size(), 8);
//! assert!(tree.member(&12));
//! assert!(tree.check_invariants());
//! println!("{}", tree);
//! ```

mod compact_arena;
mod construction;
mod container;
mod error;
mod get_operations;
mod insert_operations;
mod key_slots;
mod node;
mod tree_structure;
mod types;
mod validation;

pub use compact_arena::{CompactArena, CompactArenaStats};
pub use construction::{validation as order_validation, DEFAULT_ORDER};
pub use container::{Container, Order};
pub use error::{
    BPlusTreeError, BTreeResult, BTreeResultExt, ContainerResult, InitResult, ModifyResult,
};
pub use key_slots::KeySlots;
pub use tree_structure::NodeView;
pub use types::{BPlusTreeSet, NodeId, NodeRef, MIN_ORDER, NULL_NODE};
