//! Structural invariant checks. Each returns a description of the first
//! violation found.

use crate::bst::Forest;
use crate::tango::TangoNode;
use crate::types::{RbNodeLike, TreeNode};

/// Symmetric order, parent links and subtree sizes over the whole tree.
pub fn check_bst<N: TreeNode>(forest: &Forest<N>) -> Result<(), String> {
    let Some(root) = forest.root else {
        return Ok(());
    };
    if let Some(p) = forest.node(root).p() {
        return Err(format!("root {root} has parent {p}"));
    }

    let mut real = 0u32;
    let mut stack: Vec<(u32, Option<i32>, Option<i32>)> = vec![(root, None, None)];
    while let Some((idx, lo, hi)) = stack.pop() {
        let node = forest.node(idx);
        if node.is_sentinel() {
            if node.l().is_some() || node.r().is_some() {
                return Err(format!("sentinel {idx} has children"));
            }
            if node.size() != 0 {
                return Err(format!("sentinel {idx} has size {}", node.size()));
            }
            continue;
        }

        real += 1;
        let key = node.key();
        if lo.is_some_and(|lo| key <= lo) || hi.is_some_and(|hi| key >= hi) {
            return Err(format!("key {key} is outside ({lo:?}, {hi:?})"));
        }

        let mut expected = 1;
        for (child, lo, hi) in [(node.l(), lo, Some(key)), (node.r(), Some(key), hi)] {
            let Some(child) = child else {
                continue;
            };
            if forest.node(child).p() != Some(idx) {
                return Err(format!("child {child} of key {key} does not point back"));
            }
            expected += forest.node(child).size();
            stack.push((child, lo, hi));
        }
        if node.size() != expected {
            return Err(format!("key {key} has size {} but subtree holds {expected}", node.size()));
        }
    }

    let root_size = forest.node(root).size();
    if root_size != real {
        return Err(format!("root size {root_size} but {real} real nodes are reachable"));
    }
    Ok(())
}

/// Red-black properties of a standalone tree, including every tracked
/// black height.
pub fn check_red_black<N: RbNodeLike>(forest: &Forest<N>) -> Result<(), String> {
    check_bst(forest)?;
    let Some(root) = forest.root else {
        return Ok(());
    };
    check_red_black_at(forest, root)
}

/// Red-black properties of the tree rooted at `root`, with marked children
/// acting as black leaves. Every node's tracked black height must be exact.
fn check_red_black_at<N: RbNodeLike>(forest: &Forest<N>, root: u32) -> Result<(), String> {
    let node = forest.node(root);
    if !node.is_black() {
        return Err(format!("root key {} is red", node.key()));
    }
    black_height(forest, root).map(|_| ())
}

fn black_height<N: RbNodeLike>(forest: &Forest<N>, idx: u32) -> Result<u32, String> {
    let node = forest.node(idx);
    if node.is_sentinel() {
        return if node.is_black() {
            Ok(1)
        } else {
            Err(format!("sentinel {idx} is red"))
        };
    }

    let key = node.key();
    let (Some(l), Some(r)) = (node.l(), node.r()) else {
        return Err(format!("key {key} is missing a child"));
    };

    let mut heights = [1, 1];
    for (slot, child) in [l, r].into_iter().enumerate() {
        let c = forest.node(child);
        if c.is_marked() {
            continue;
        }
        if !node.is_black() && !c.is_black() {
            return Err(format!("red key {key} has red child key {}", c.key()));
        }
        heights[slot] = black_height(forest, child)?;
    }

    let [lh, rh] = heights;
    if lh != rh {
        return Err(format!("key {key} has black heights {lh} (left) and {rh} (right)"));
    }
    let bh = lh + u32::from(node.is_black());
    if node.black_height() != bh {
        return Err(format!("key {key} tracks black height {} but has {bh}", node.black_height()));
    }
    Ok(bh)
}

/// Real nodes whose aux tree they root: the physical root and every marked
/// node.
fn aux_roots<V>(forest: &Forest<TangoNode<V>>) -> Vec<u32> {
    let mut out = Vec::new();
    let mut stack: Vec<u32> = forest.root.into_iter().collect();
    while let Some(idx) = stack.pop() {
        let node = forest.node(idx);
        if node.is_sentinel() {
            continue;
        }
        if node.marked || node.p.is_none() {
            out.push(idx);
        }
        stack.extend(node.l.into_iter().chain(node.r));
    }
    out
}

/// Collects `(depth, key)` of every node in the aux subtree at `idx` and
/// checks the tracked depth summary of each.
fn aux_depths<V>(forest: &Forest<TangoNode<V>>, idx: u32, out: &mut Vec<(u32, i32)>) -> Result<(u32, u32), String> {
    let node = forest.node(idx);
    out.push((node.depth, node.k));
    let (mut min, mut max) = (node.depth, node.depth);
    for child in node.l.into_iter().chain(node.r) {
        let c = forest.node(child);
        if c.marked || c.is_sentinel() {
            continue;
        }
        let (cmin, cmax) = aux_depths(forest, child, out)?;
        min = min.min(cmin);
        max = max.max(cmax);
    }
    if (node.min_depth, node.max_depth) != (min, max) {
        return Err(format!(
            "key {} tracks depths {}..={} but its aux subtree spans {min}..={max}",
            node.k, node.min_depth, node.max_depth
        ));
    }
    Ok((min, max))
}

/// Tango partition: the root is marked, every aux tree is a preferred path
/// of the perfect reference tree (one node per depth over a contiguous
/// range, each the parent of the next), depth summaries are exact, and the
/// aux trees together cover every real node.
pub fn check_tango<V>(forest: &Forest<TangoNode<V>>) -> Result<(), String> {
    check_bst(forest)?;
    let Some(root) = forest.root() else {
        return Ok(());
    };
    if !forest.node(root).marked {
        return Err(format!("root key {} is not marked", forest.node(root).k));
    }
    let n = forest.len() + 1;
    if !n.is_power_of_two() {
        return Err(format!("{} nodes do not form a perfect tree", forest.len()));
    }
    let levels = n.trailing_zeros();

    let mut covered = 0;
    for aux_root in aux_roots(forest) {
        let mut path = Vec::new();
        aux_depths(forest, aux_root, &mut path)?;
        path.sort_unstable();
        for pair in path.windows(2) {
            let [(d, k), (next_d, next_k)] = [pair[0], pair[1]];
            if next_d != d + 1 {
                return Err(format!(
                    "aux tree at key {} has depths {:?}",
                    forest.node(aux_root).k,
                    path.iter().map(|&(d, _)| d).collect::<Vec<_>>()
                ));
            }
            if next_d >= levels {
                return Err(format!("key {next_k} has depth {next_d} in a {levels}-level tree"));
            }
            // In the reference tree a child at depth d + 1 sits
            // 2^(levels - d - 2) keys away from its parent.
            let step = 1i64 << (levels - d - 2);
            if (i64::from(next_k) - i64::from(k)).abs() != step {
                return Err(format!(
                    "aux tree at key {} is not a preferred path: key {next_k} at depth {next_d} is not a child of key {k}",
                    forest.node(aux_root).k
                ));
            }
        }
        covered += path.len();
    }

    if covered != forest.len() {
        return Err(format!("aux trees cover {covered} of {} nodes", forest.len()));
    }
    Ok(())
}

/// [`check_tango`] plus red-black validity of every aux tree on its own.
pub fn check_tango_red_black<V>(forest: &Forest<TangoNode<V>>) -> Result<(), String> {
    check_tango(forest)?;
    for aux_root in aux_roots(forest) {
        check_red_black_at(forest, aux_root)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bst::BasicBst;
    use crate::red_black::RedBlackTree;
    use crate::tango::UnbalancedTango;
    use crate::tree::BinarySearchTree;

    #[test]
    fn check_bst_catches_broken_size() {
        let mut tree = BasicBst::new();
        for k in [2, 1, 3] {
            tree.insert(k, k).unwrap();
        }
        assert_eq!(check_bst(tree.forest()), Ok(()));

        let leaf = tree.forest.search_by_key(3).unwrap();
        tree.forest.node_mut(leaf).size = 5;
        let err = check_bst(tree.forest()).unwrap_err();
        assert!(err.contains("size"), "{err}");
    }

    #[test]
    fn check_red_black_catches_red_root() {
        let mut tree = RedBlackTree::new();
        tree.insert(1, ()).unwrap();
        assert_eq!(check_red_black(tree.forest()), Ok(()));

        let root = tree.root().unwrap();
        tree.forest.node_mut(root).b = false;
        let err = check_red_black(tree.forest()).unwrap_err();
        assert!(err.contains("red"), "{err}");
    }

    #[test]
    fn check_red_black_catches_stale_inner_black_height() {
        let mut tree = RedBlackTree::new();
        for k in 1..=7 {
            tree.insert(k, k).unwrap();
        }
        assert_eq!(check_red_black(tree.forest()), Ok(()));

        let root = tree.root().unwrap();
        tree.forest.node_mut(root).bh += 1;
        let err = check_red_black(tree.forest()).unwrap_err();
        assert!(err.contains("tracks black height"), "{err}");
    }

    #[test]
    fn check_tango_catches_path_that_skips_a_level() {
        let mut tree: UnbalancedTango<i32> = UnbalancedTango::new();
        tree.initialize_perfect_tree(3, |k| k).unwrap();
        // 4-2-1 becomes one preferred path.
        tree.search(1);
        assert_eq!(check_tango(tree.forest()), Ok(()));

        // Depths stay contiguous but 1 now claims to be a child of 4.
        let one = tree.forest.search_by_key(1).unwrap();
        let two = tree.forest.search_by_key(2).unwrap();
        tree.forest.node_mut(one).depth = 1;
        tree.forest.node_mut(two).depth = 2;
        tree.forest.update_min_max_path(one);
        tree.forest.update_min_max_path(two);
        let err = check_tango(tree.forest()).unwrap_err();
        assert!(err.contains("not a preferred path"), "{err}");
    }
}
