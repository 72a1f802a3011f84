use bplustree_set::{BPlusTreeError, BPlusTreeSet, Container, Order};

fn load<C: Container<u32>>(container: &mut C, keys: &[u32]) {
    container.add_all(keys.iter().copied()).unwrap();
}

fn dump(container: &dyn Container<u32>) -> String {
    let mut out = String::new();
    container.print(&mut out).unwrap();
    out
}

#[test]
fn test_container_add_member_size() {
    let mut tree = BPlusTreeSet::new(4).unwrap();
    load(&mut tree, &[8, 3, 8, 1, 13, 21, 2, 5, 1]);

    let container: &dyn Container<u32> = &tree;
    assert_eq!(container.size(), 7);
    for key in [1, 2, 3, 5, 8, 13, 21] {
        assert!(container.member(&key));
    }
    assert!(!container.member(&4));
}

#[test]
fn test_container_print_matches_display() {
    let mut tree = BPlusTreeSet::new(2).unwrap();
    load(&mut tree, &[1, 2, 3, 4, 5]);
    assert_eq!(dump(&tree), tree.to_string());
}

#[test]
fn test_unsupported_operations_leave_tree_untouched() {
    let mut tree = BPlusTreeSet::new(4).unwrap();
    load(&mut tree, &(0..50).collect::<Vec<_>>());
    let before = tree.to_string();

    let err = Container::remove(&mut tree, &[1, 2, 3]).unwrap_err();
    assert!(err.is_unsupported());
    assert_eq!(err.to_string(), "BPlusTreeSet: operation 'remove' is not supported");

    for order in [Order::DontCare, Order::Ascending, Order::Descending] {
        let mut seen = Vec::new();
        let result = {
            let mut record = |key: &u32| seen.push(*key);
            Container::apply(&tree, &mut record, order)
        };
        assert_eq!(result, Err(BPlusTreeError::unsupported("apply")));
        assert!(seen.is_empty());
    }

    assert!(Container::is_empty(&tree).unwrap_err().is_unsupported());
    assert!(Container::min(&tree).unwrap_err().is_unsupported());
    assert!(Container::max(&tree).unwrap_err().is_unsupported());

    assert_eq!(tree.to_string(), before);
    assert_eq!(tree.size(), 50);
    assert!(tree.check_invariants());
}

#[test]
fn test_empty_container() {
    let tree = BPlusTreeSet::<u32>::default();
    let container: &dyn Container<u32> = &tree;
    assert_eq!(container.size(), 0);
    assert!(!container.member(&0));
    assert_eq!(dump(container), "leaf : #0\n");
}
