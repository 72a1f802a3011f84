//! Fixed-capacity ordered key storage shared by leaf and branch nodes.
//!
//! `KeySlots` owns the sorted key array of one node together with the node
//! order. It may hold one key beyond the order, and only while a split is in
//! progress.

use std::borrow::Borrow;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySlots<K> {
    keys: Vec<K>,
    order: usize,
}

impl<K> KeySlots<K> {
    /// Empty slots for a node of the given order.
    pub fn new(order: usize) -> Self {
        // One spare slot for the transient overflow key during a split.
        Self {
            keys: Vec::with_capacity(order + 1),
            order,
        }
    }

    pub fn order(&self) -> usize {
        self.order
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// True when another key can only be accepted by splitting.
    pub fn is_full(&self) -> bool {
        self.keys.len() >= self.order
    }

    pub fn as_slice(&self) -> &[K] {
        &self.keys
    }

    pub fn get(&self, index: usize) -> Option<&K> {
        self.keys.get(index)
    }

    pub fn first(&self) -> Option<&K> {
        self.keys.first()
    }

    pub fn last(&self) -> Option<&K> {
        self.keys.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, K> {
        self.keys.iter()
    }

    /// Shift keys at `index..` one slot right and place `key` at `index`.
    pub fn insert_at(&mut self, index: usize, key: K) {
        debug_assert!(self.keys.len() <= self.order, "KeySlots already overflowing");
        self.keys.insert(index, key);
    }

    /// Keep `[0, at)` here and return `[at, len)` as new slots of the same order.
    pub fn split_off(&mut self, at: usize) -> Self {
        let mut right = Vec::with_capacity(self.order + 1);
        right.extend(self.keys.drain(at..));
        Self {
            keys: right,
            order: self.order,
        }
    }

    /// Remove and return the lowest key.
    pub fn take_first(&mut self) -> Option<K> {
        if self.keys.is_empty() {
            None
        } else {
            Some(self.keys.remove(0))
        }
    }
}

impl<K: Ord> KeySlots<K> {
    /// `Ok(index)` if `key` is present, else `Err(index)` of the first key
    /// greater than `key`.
    pub fn locate<Q>(&self, key: &Q) -> Result<usize, usize>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.keys.binary_search_by(|probe| probe.borrow().cmp(key))
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.locate(key).is_ok()
    }

    /// Index of the child to descend into: the position of the first key
    /// strictly greater than `key`, or `len` when there is none.
    pub fn child_index<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match self.locate(key) {
            Ok(index) => index + 1,
            Err(index) => index,
        }
    }

    /// Insert in sorted position. Returns the slot used, or `None` when an
    /// equal key is already present (nothing is shifted in that case).
    pub fn insert_sorted(&mut self, key: K) -> Option<usize> {
        match self.locate(&key) {
            Ok(_) => None,
            Err(index) => {
                self.insert_at(index, key);
                Some(index)
            }
        }
    }

    pub fn is_strictly_ascending(&self) -> bool {
        self.keys.windows(2).all(|pair| pair[0] < pair[1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slots(order: usize, keys: &[i32]) -> KeySlots<i32> {
        let mut slots = KeySlots::new(order);
        for key in keys {
            slots.insert_sorted(*key);
        }
        slots
    }

    #[test]
    fn test_insert_sorted_shifts_tail() {
        let mut s = slots(4, &[10, 30]);
        assert_eq!(s.insert_sorted(20), Some(1));
        assert_eq!(s.as_slice(), &[10, 20, 30]);
        assert_eq!(s.insert_sorted(5), Some(0));
        assert_eq!(s.as_slice(), &[5, 10, 20, 30]);
        assert!(s.is_full());
    }

    #[test]
    fn test_insert_sorted_rejects_duplicate() {
        let mut s = slots(4, &[1, 2, 3]);
        assert_eq!(s.insert_sorted(2), None);
        assert_eq!(s.as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn test_child_index_picks_first_greater_key() {
        let s = slots(4, &[10, 20, 30]);
        assert_eq!(s.child_index(&5), 0);
        assert_eq!(s.child_index(&10), 1);
        assert_eq!(s.child_index(&15), 1);
        assert_eq!(s.child_index(&30), 3);
        assert_eq!(s.child_index(&99), 3);
    }

    #[test]
    fn test_split_off_and_take_first() {
        let mut s = slots(4, &[1, 2, 3, 4]);
        s.insert_at(4, 5);
        let mut right = s.split_off(2);
        assert_eq!(s.as_slice(), &[1, 2]);
        assert_eq!(right.as_slice(), &[3, 4, 5]);
        assert_eq!(right.order(), 4);
        assert_eq!(right.take_first(), Some(3));
        assert_eq!(right.as_slice(), &[4, 5]);
    }

    #[test]
    fn test_take_first_on_empty() {
        let mut s: KeySlots<i32> = KeySlots::new(2);
        assert_eq!(s.take_first(), None);
        assert!(s.is_empty());
    }

    #[test]
    fn test_borrowed_lookup() {
        let mut s: KeySlots<String> = KeySlots::new(4);
        s.insert_sorted("b".to_string());
        s.insert_sorted("a".to_string());
        assert!(s.contains("a"));
        assert!(!s.contains("c"));
        assert!(s.is_strictly_ascending());
    }
}
