//! Generic container contract implemented by BPlusTreeSet.
//!
//! A container can take keys one at a time or as a sequence, answer
//! membership and count queries, and dump itself for debugging. The rest of
//! the surface (removal, emptiness, ordered traversal, min/max) has default
//! implementations that report `BPlusTreeError::Unsupported` and touch
//! nothing, so a caller can tell "not available" apart from an empty answer.

use std::fmt;

use crate::error::{BPlusTreeError, ContainerResult};
use crate::types::BPlusTreeSet;

/// Traversal order requested from [`Container::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Order {
    #[default]
    DontCare,
    Ascending,
    Descending,
}

pub trait Container<K> {
    /// Insert one key. Inserting a key that is already present is a no-op.
    fn add(&mut self, key: K) -> ContainerResult<()>;

    /// Insert every key of `keys`, in order, with the single-key contract.
    fn add_all<I>(&mut self, keys: I) -> ContainerResult<()>
    where
        I: IntoIterator<Item = K>,
        Self: Sized,
    {
        for key in keys {
            self.add(key)?;
        }
        Ok(())
    }

    fn member(&self, key: &K) -> bool;

    /// Number of distinct keys held.
    fn size(&self) -> usize;

    /// Diagnostic dump; the format is not stable.
    fn print(&self, out: &mut dyn fmt::Write) -> fmt::Result;

    fn remove(&mut self, _keys: &[K]) -> ContainerResult<usize> {
        Err(BPlusTreeError::unsupported("remove"))
    }

    fn is_empty(&self) -> ContainerResult<bool> {
        Err(BPlusTreeError::unsupported("empty"))
    }

    /// Call `f` on every key in the requested order, returning how many
    /// keys were visited.
    fn apply(&self, _f: &mut dyn FnMut(&K), _order: Order) -> ContainerResult<usize> {
        Err(BPlusTreeError::unsupported("apply"))
    }

    fn min(&self) -> ContainerResult<K> {
        Err(BPlusTreeError::unsupported("min"))
    }

    fn max(&self) -> ContainerResult<K> {
        Err(BPlusTreeError::unsupported("max"))
    }
}

impl<K: Ord + Clone + fmt::Display> Container<K> for BPlusTreeSet<K> {
    fn add(&mut self, key: K) -> ContainerResult<()> {
        BPlusTreeSet::add(self, key).map(|_| ())
    }

    fn member(&self, key: &K) -> bool {
        BPlusTreeSet::member(self, key)
    }

    fn size(&self) -> usize {
        BPlusTreeSet::size(self)
    }

    fn print(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        BPlusTreeSet::print(self, out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill<C: Container<i32>>(container: &mut C, keys: &[i32]) {
        container.add_all(keys.iter().copied()).unwrap();
    }

    #[test]
    fn test_supported_operations_through_trait() {
        let mut tree = BPlusTreeSet::new(4).unwrap();
        fill(&mut tree, &[5, 3, 5, 9]);
        let container: &dyn Container<i32> = &tree;
        assert_eq!(container.size(), 3);
        assert!(container.member(&9));
        assert!(!container.member(&4));

        let mut out = String::new();
        container.print(&mut out).unwrap();
        assert!(out.starts_with("leaf : #0"));
    }

    #[test]
    fn test_unsupported_operations_report_their_name() {
        let mut tree = BPlusTreeSet::new(4).unwrap();
        fill(&mut tree, &[1, 2]);

        assert_eq!(
            Container::remove(&mut tree, &[1]),
            Err(BPlusTreeError::unsupported("remove"))
        );
        assert_eq!(Container::is_empty(&tree), Err(BPlusTreeError::unsupported("empty")));
        assert_eq!(Container::min(&tree), Err(BPlusTreeError::unsupported("min")));
        assert_eq!(Container::max(&tree), Err(BPlusTreeError::unsupported("max")));

        let mut visited = 0;
        let result = {
            let mut count = |_: &i32| visited += 1;
            Container::apply(&tree, &mut count, Order::Ascending)
        };
        assert_eq!(result, Err(BPlusTreeError::unsupported("apply")));
        assert_eq!(visited, 0);

        // nothing was removed
        assert_eq!(tree.size(), 2);
    }

    #[test]
    fn test_order_default() {
        assert_eq!(Order::default(), Order::DontCare);
    }
}
