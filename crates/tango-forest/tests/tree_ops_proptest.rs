//! Property-based tests: every mutable tree agrees with a `BTreeMap` model,
//! and Tango trees stay valid under arbitrary search sequences.

use std::collections::BTreeMap;

use proptest::prelude::*;
use tango_forest::validate::{check_bst, check_red_black, check_tango, check_tango_red_black};
use tango_forest::{BasicBst, BinarySearchTree, RedBlackTango, RedBlackTree, SplayTree, UnbalancedTango};

// =============================================================================
// Test helpers
// =============================================================================

#[derive(Clone, Debug)]
enum Op {
    Insert(i32, i32),
    Remove(i32),
    Search(i32),
}

fn arbitrary_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (-40..40i32, any::<i32>()).prop_map(|(k, v)| Op::Insert(k, v)),
        2 => (-40..40i32).prop_map(Op::Remove),
        2 => (-45..45i32).prop_map(Op::Search),
    ]
}

/// Applies `ops` to `tree` and to a model map, checking agreement and the
/// structural invariants after every step.
fn run_against_model<T>(
    tree: &mut T,
    ops: &[Op],
    check: impl Fn(&T) -> Result<(), String>,
) -> Result<(), TestCaseError>
where
    T: BinarySearchTree<i32>,
{
    let mut model = BTreeMap::new();
    for op in ops {
        match *op {
            Op::Insert(k, v) => {
                tree.insert(k, v).map_err(|e| TestCaseError::fail(e.to_string()))?;
                model.insert(k, v);
            }
            Op::Remove(k) => {
                let removed = tree.remove(k).map_err(|e| TestCaseError::fail(e.to_string()))?;
                prop_assert_eq!(removed, model.remove(&k));
            }
            Op::Search(k) => {
                let hit = tree.search(k).map(|hit| (hit.exact, hit.key, *hit.value));
                match (hit, model.get(&k)) {
                    (None, _) => prop_assert!(model.is_empty()),
                    (Some((exact, key, value)), Some(&expected)) => {
                        prop_assert!(exact);
                        prop_assert_eq!(key, k);
                        prop_assert_eq!(value, expected);
                    }
                    (Some((exact, key, value)), None) => {
                        prop_assert!(!exact);
                        let below = model.range(..k).next_back().map(|(&k, _)| k);
                        let above = model.range(k..).next().map(|(&k, _)| k);
                        prop_assert!(
                            Some(key) == below || Some(key) == above,
                            "nearest {} is neither {:?} nor {:?}",
                            key,
                            below,
                            above
                        );
                        prop_assert_eq!(Some(&value), model.get(&key));
                    }
                }
            }
        }

        if let Err(err) = check(&*tree) {
            return Err(TestCaseError::fail(format!("invalid tree after {op:?}: {err}")));
        }
        prop_assert_eq!(tree.len(), model.len());
        prop_assert_eq!(tree.keys(), model.keys().copied().collect::<Vec<_>>());
    }
    Ok(())
}

fn run_searches<T>(
    tree: &mut T,
    n: i32,
    keys: &[i32],
    check: impl Fn(&T) -> Result<(), String>,
) -> Result<(), TestCaseError>
where
    T: BinarySearchTree<i32>,
{
    for &key in keys {
        let hit = tree.search(key).map(|hit| (hit.exact, hit.key, *hit.value));
        let expected = if (1..=n).contains(&key) {
            (true, key, key)
        } else {
            let nearest = key.clamp(1, n);
            (false, nearest, nearest)
        };
        prop_assert_eq!(hit, Some(expected));
        if let Err(err) = check(&*tree) {
            return Err(TestCaseError::fail(format!("invalid tree after search({key}): {err}")));
        }
    }
    prop_assert_eq!(tree.keys(), (1..=n).collect::<Vec<_>>());
    Ok(())
}

// =============================================================================
// Model agreement
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn basic_bst_matches_model(ops in prop::collection::vec(arbitrary_op(), 1..120)) {
        let mut tree = BasicBst::new();
        run_against_model(&mut tree, &ops, |t| check_bst(t.forest()))?;
    }

    #[test]
    fn red_black_matches_model(ops in prop::collection::vec(arbitrary_op(), 1..120)) {
        let mut tree = RedBlackTree::new();
        run_against_model(&mut tree, &ops, |t| check_red_black(t.forest()))?;
    }

    #[test]
    fn splay_matches_model(ops in prop::collection::vec(arbitrary_op(), 1..120)) {
        let mut tree = SplayTree::new();
        run_against_model(&mut tree, &ops, |t| check_bst(t.forest()))?;
    }
}

// =============================================================================
// Tango search sequences
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(96))]

    #[test]
    fn red_black_tango_stays_valid(
        levels in 1u32..=5,
        keys in prop::collection::vec(-2..40i32, 1..80),
    ) {
        let n = (1 << levels) - 1;
        let mut tree: RedBlackTango<i32> = RedBlackTango::new();
        tree.initialize_perfect_tree(levels, |k| k).unwrap();
        run_searches(&mut tree, n, &keys, |t| check_tango_red_black(t.forest()))?;
    }

    #[test]
    fn unbalanced_tango_stays_valid(
        levels in 1u32..=5,
        keys in prop::collection::vec(-2..40i32, 1..80),
    ) {
        let n = (1 << levels) - 1;
        let mut tree: UnbalancedTango<i32> = UnbalancedTango::new();
        tree.initialize_perfect_tree(levels, |k| k).unwrap();
        run_searches(&mut tree, n, &keys, |t| check_tango(t.forest()))?;
    }
}
