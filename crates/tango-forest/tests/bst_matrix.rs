use tango_forest::validate::check_bst;
use tango_forest::{BasicBst, BinarySearchTree, TreeError, NIL_KEY};

fn insert_value(tree: &mut BasicBst<i32>, key: i32) {
    tree.insert(key, key * 10).unwrap();
    if let Err(err) = check_bst(tree.forest()) {
        panic!("invalid BST after insert({key}): {err}");
    }
}

fn remove_value(tree: &mut BasicBst<i32>, key: i32) -> Option<i32> {
    let removed = tree.remove(key).unwrap();
    if let Err(err) = check_bst(tree.forest()) {
        panic!("invalid BST after remove({key}): {err}");
    }
    removed
}

fn build(keys: &[i32]) -> BasicBst<i32> {
    let mut tree = BasicBst::new();
    for &key in keys {
        insert_value(&mut tree, key);
    }
    tree
}

fn root_key(tree: &BasicBst<i32>) -> i32 {
    tree.view(tree.root().unwrap()).key
}

#[test]
fn bst_insert_keeps_order_and_sizes_matrix() {
    let tree = build(&[50, 30, 70, 20, 40, 60, 80, 35, 45, 65]);
    assert_eq!(tree.len(), 10);
    assert_eq!(tree.keys(), vec![20, 30, 35, 40, 45, 50, 60, 65, 70, 80]);
    assert_eq!(root_key(&tree), 50);
    assert_eq!(tree.view(tree.root().unwrap()).size, 10);
    assert_eq!(tree.stats().rotations, 0);
}

#[test]
fn bst_insert_existing_key_replaces_value_matrix() {
    let mut tree = build(&[2, 1, 3]);
    let before = tree.search(1).map(|hit| (hit.key, *hit.value));
    assert_eq!(before, Some((1, 10)));

    let idx = tree.insert(1, -1).unwrap();
    assert_eq!(tree.view(idx).key, 1);
    assert_eq!(tree.len(), 3);
    assert_eq!(tree.search(1).map(|hit| *hit.value), Some(-1));
}

#[test]
fn bst_remove_leaf_one_child_and_two_children_matrix() {
    let mut tree = build(&[50, 30, 70, 20, 40, 60, 80, 35]);

    // leaf
    assert_eq!(remove_value(&mut tree, 80), Some(800));
    // one child (40 keeps 35)
    assert_eq!(remove_value(&mut tree, 40), Some(400));
    // two children: predecessor 20 moves up into 30's slot
    assert_eq!(remove_value(&mut tree, 30), Some(300));
    assert_eq!(tree.keys(), vec![20, 35, 50, 60, 70]);

    // root with two children
    assert_eq!(remove_value(&mut tree, 50), Some(500));
    assert_eq!(root_key(&tree), 35);
    assert_eq!(tree.len(), 4);
}

#[test]
fn bst_remove_down_to_empty_matrix() {
    let mut tree = build(&[3, 1, 2]);
    for key in [1, 3, 2] {
        assert_eq!(remove_value(&mut tree, key), Some(key * 10));
    }
    assert!(tree.is_empty());
    assert_eq!(tree.root(), None);
    assert!(tree.search(1).is_none());

    insert_value(&mut tree, 9);
    assert_eq!(tree.keys(), vec![9]);
}

#[test]
fn bst_remove_absent_key_is_noop_matrix() {
    let mut tree = build(&[2, 1, 3]);
    assert_eq!(remove_value(&mut tree, 7), None);
    assert_eq!(remove_value(&mut tree, 7), None);
    assert_eq!(tree.keys(), vec![1, 2, 3]);
}

#[test]
fn bst_search_reports_nearest_on_miss_matrix() {
    let mut tree = build(&[50, 30, 70]);
    let hit = tree.search(65).unwrap();
    assert!(!hit.exact);
    assert_eq!(hit.key, 70);
    assert_eq!(*hit.value, 700);

    tree.reset_stats();
    let hit = tree.search(30).unwrap();
    assert!(hit.exact);
    assert_eq!(tree.stats().traversals, 2);
}

#[test]
fn bst_rejects_reserved_key_matrix() {
    let mut tree = build(&[1]);
    assert_eq!(tree.insert(NIL_KEY, 0), Err(TreeError::ReservedKey(NIL_KEY)));
    assert_eq!(tree.len(), 1);
}

#[test]
fn bst_perfect_tree_matrix() {
    for levels in 1..=6 {
        let mut tree = BasicBst::new();
        tree.initialize_perfect_tree(levels, |k| k).unwrap();
        let n = (1 << levels) - 1;
        assert_eq!(tree.len(), n as usize);
        assert_eq!(tree.keys(), (1..=n).collect::<Vec<_>>());
        assert_eq!(root_key(&tree), 1 << (levels - 1));
        check_bst(tree.forest()).unwrap();
    }

    let mut tree = BasicBst::<i32>::new();
    assert!(matches!(
        tree.initialize_perfect_tree(0, |k| k),
        Err(TreeError::InvalidLevels { levels: 0, .. })
    ));
    assert!(matches!(
        tree.initialize_perfect_tree(31, |k| k),
        Err(TreeError::InvalidLevels { levels: 31, .. })
    ));
}
