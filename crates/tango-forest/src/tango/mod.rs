//! Tango trees: a perfect reference tree partitioned into preferred paths,
//! each stored as an aux tree whose root is marked.
//!
//! Every search re-partitions the tree along the accessed path by cutting
//! aux trees at a depth and joining them back together. How aux trees are
//! split and merged is up to the [`AuxStrategy`] the tree is built with:
//!
//! | Strategy          | Alias               | Aux-tree shape       |
//! |-------------------|---------------------|----------------------|
//! | [`RedBlackAux`]   | [`RedBlackTango`]   | red-black balanced   |
//! | [`UnbalancedAux`] | [`UnbalancedTango`] | whatever rotations leave |

pub mod red_black;
pub mod strategy;
pub mod types;
pub mod unbalanced;

use std::cmp::Ordering;

use tracing::{debug, trace};

use crate::bst::Forest;
use crate::error::TreeError;
use crate::stats::TreeStats;
use crate::tree::BinarySearchTree;
use crate::types::{NodeView, SearchHit};

pub use red_black::RedBlackAux;
pub use strategy::AuxStrategy;
pub use types::TangoNode;
pub use unbalanced::UnbalancedAux;

pub type RedBlackTango<V> = TangoTree<V, RedBlackAux>;
pub type UnbalancedTango<V> = TangoTree<V, UnbalancedAux>;

// ── forest helpers ───────────────────────────────────────────────────────────

impl<V> Forest<TangoNode<V>> {
    /// Absent, sentinel or marked: the places an aux tree ends.
    pub(crate) fn is_tango_leaf(&self, idx: Option<u32>) -> bool {
        match idx {
            None => true,
            Some(i) => self.is_sentinel(i) || self.is_marked(i),
        }
    }

    #[inline]
    pub(crate) fn depth(&self, idx: u32) -> u32 {
        self.node(idx).depth
    }

    pub(crate) fn update_min_max(&mut self, idx: u32) {
        types::update_min_max(&mut self.arena, idx);
    }

    /// Recomputes the depth summary from `idx` up to its aux-tree root.
    pub(crate) fn update_min_max_path(&mut self, idx: u32) {
        let mut curr = idx;
        self.update_min_max(curr);
        while !self.is_root(curr) {
            curr = self.p(curr).expect("non-root has a parent");
            self.update_min_max(curr);
        }
    }

    /// Nearest marked node at or above `idx`.
    fn aux_root_of(&self, idx: u32) -> u32 {
        let mut curr = idx;
        while !self.is_marked(curr) {
            curr = self.p(curr).expect("every aux tree has a marked root");
        }
        curr
    }

    /// `c` if it continues the current aux tree.
    fn aux_child(&self, c: Option<u32>) -> Option<u32> {
        c.filter(|&c| !self.is_tango_leaf(Some(c)))
    }

    /// Smallest-key node of the aux tree at `x` deeper than `cut_depth`.
    pub(crate) fn find_min_with_depth(&self, x: u32, cut_depth: u32) -> Option<u32> {
        let mut x = x;
        loop {
            let node = self.node(x);
            if let Some(l) = self.aux_child(node.l).filter(|&l| self.node(l).max_depth > cut_depth) {
                x = l;
            } else if node.depth > cut_depth {
                return Some(x);
            } else if let Some(r) = self.aux_child(node.r) {
                x = r;
            } else {
                return None;
            }
        }
    }

    /// Largest-key node of the aux tree at `x` deeper than `cut_depth`.
    pub(crate) fn find_max_with_depth(&self, x: u32, cut_depth: u32) -> Option<u32> {
        let mut x = x;
        loop {
            let node = self.node(x);
            if let Some(r) = self.aux_child(node.r).filter(|&r| self.node(r).max_depth > cut_depth) {
                x = r;
            } else if node.depth > cut_depth {
                return Some(x);
            } else if let Some(l) = self.aux_child(node.l) {
                x = l;
            } else {
                return None;
            }
        }
    }

    /// Descends from `root` towards `key - 1` and returns the first marked
    /// node crossed. `None` if the predecessor key already sits on the top
    /// path or the descent runs off the tree.
    fn find_marked_predecessor(&mut self, root: u32, key: i32) -> Option<u32> {
        let key = key - 1;
        let mut n = root;
        while !self.is_sentinel(n) {
            self.stats.inc_other_traversals();
            n = match key.cmp(&self.key(n)) {
                Ordering::Less => self.l(n)?,
                Ordering::Greater => self.r(n)?,
                Ordering::Equal => return None,
            };
            if self.is_marked(n) {
                return Some(n);
            }
        }
        None
    }
}

// ── tree ─────────────────────────────────────────────────────────────────────

/// Tango tree over aux trees managed by `S`. Shape changes only through
/// `search`; `insert` and `remove` are rejected.
#[derive(Clone, Debug)]
pub struct TangoTree<V, S> {
    pub(crate) forest: Forest<TangoNode<V>>,
    strategy: S,
}

impl<V, S: AuxStrategy> Default for TangoTree<V, S> {
    fn default() -> Self {
        Self {
            forest: Forest::default(),
            strategy: S::default(),
        }
    }
}

impl<V, S: AuxStrategy> TangoTree<V, S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn forest(&self) -> &Forest<TangoNode<V>> {
        &self.forest
    }

    /// Moves everything deeper than `cut_depth` out of the aux tree rooted
    /// at `v_root` into a new marked aux tree. Returns the new root of the
    /// remaining top part.
    fn cut(&mut self, v_root: u32, cut_depth: u32) -> u32 {
        let f = &mut self.forest;
        let l = f.find_min_with_depth(v_root, cut_depth);
        let r = f.find_max_with_depth(v_root, cut_depth);
        let lp = l.and_then(|l| f.predecessor(l));
        let rp = r.and_then(|r| f.successor(r));
        trace!(strategy = S::NAME, v_root, cut_depth, ?lp, ?rp, "cut");

        match (lp, rp) {
            // The whole aux tree is below the cut.
            (None, None) => v_root,
            (Some(lp), None) => {
                self.strategy.split(f, lp, v_root);
                let lower = f.r(lp).expect("split leaves the deep interval right of lp");
                debug_assert!(!f.is_tango_leaf(Some(lower)));
                f.mark(lower);
                f.update_min_max_path(lp);
                self.strategy.merge(f, lp)
            }
            (None, Some(rp)) => {
                self.strategy.split(f, rp, v_root);
                let lower = f.l(rp).expect("split leaves the deep interval left of rp");
                debug_assert!(!f.is_tango_leaf(Some(lower)));
                f.mark(lower);
                f.update_min_max_path(rp);
                self.strategy.merge(f, rp)
            }
            (Some(lp), Some(rp)) => {
                self.strategy.split(f, lp, v_root);
                let lr = f.r(lp).expect("split leaves rp right of lp");
                self.strategy.split(f, rp, lr);
                let lower = f.l(rp).expect("split leaves the deep interval left of rp");
                debug_assert!(!f.is_tango_leaf(Some(lower)));
                f.mark(lower);
                f.update_min_max_path(rp);
                self.strategy.merge(f, rp);
                self.strategy.merge(f, lp)
            }
        }
    }

    /// Joins the aux tree rooted at `n` back into the top path rooted at
    /// `top`, whose deepest node is at `cut_depth`. Returns the root of the
    /// combined aux tree.
    fn join(&mut self, top: u32, n: u32, cut_depth: u32) -> u32 {
        let f = &mut self.forest;
        debug_assert!(f.is_root(top) && f.is_root(n));
        debug_assert_eq!(f.node(top).max_depth, cut_depth);
        debug_assert_eq!(f.node(n).min_depth, cut_depth + 1);

        // n's neighbours in the top path, by physical descent.
        let n_key = f.key(n);
        let (mut lp, mut rp) = (None, None);
        let mut x = top;
        while x != n {
            if f.key(x) > n_key {
                rp = Some(x);
                x = f.l(x).expect("n hangs below the top path");
            } else {
                lp = Some(x);
                x = f.r(x).expect("n hangs below the top path");
            }
        }
        trace!(strategy = S::NAME, top, n, cut_depth, ?lp, ?rp, "join");

        match (lp, rp) {
            (None, None) => panic!("aux tree {n} has no neighbour in top path {top}"),
            (Some(lp), None) => {
                self.strategy.split(f, lp, top);
                let lower = f.r(lp).expect("split leaves n right of lp");
                debug_assert!(f.is_tango_leaf(Some(lower)));
                f.unmark(lower);
                f.update_min_max_path(lower);
                self.strategy.merge(f, lp)
            }
            (None, Some(rp)) => {
                self.strategy.split(f, rp, top);
                let lower = f.l(rp).expect("split leaves n left of rp");
                debug_assert!(f.is_tango_leaf(Some(lower)));
                f.unmark(lower);
                f.update_min_max_path(lower);
                self.strategy.merge(f, rp)
            }
            (Some(lp), Some(rp)) => {
                self.strategy.split(f, lp, top);
                let lr = f.r(lp).expect("split leaves rp right of lp");
                self.strategy.split(f, rp, lr);
                let lower = f.l(rp).expect("split leaves n left of rp");
                debug_assert!(f.is_tango_leaf(Some(lower)));
                f.unmark(lower);
                f.update_min_max_path(lower);
                self.strategy.merge(f, rp);
                self.strategy.merge(f, lp)
            }
        }
    }

    /// Entered the marked aux tree at `n` from above: cut the parent path
    /// just above `n`'s depth range and join `n`'s tree onto it.
    fn cut_and_join(&mut self, n: u32) -> u32 {
        let parent = self.forest.p(n).expect("marked node below the root has a parent");
        let top = self.forest.aux_root_of(parent);
        let cut_depth = self
            .forest
            .node(n)
            .min_depth
            .checked_sub(1)
            .expect("aux tree below another starts below depth 0");
        let top = self.cut(top, cut_depth);
        self.join(top, n, cut_depth)
    }

    /// Cuts everything below `n` off `n`'s aux tree.
    fn cut_at(&mut self, n: u32) -> u32 {
        let top = self.forest.aux_root_of(n);
        let cut_depth = self.forest.depth(n);
        self.cut(top, cut_depth)
    }

    fn reject(&self, op: &'static str) -> TreeError {
        debug!(strategy = S::NAME, op, "rejected mutation of tango tree");
        TreeError::OperationNotPermitted(op)
    }
}

impl<V, S: AuxStrategy> BinarySearchTree<V> for TangoTree<V, S> {
    fn insert(&mut self, _key: i32, _value: V) -> Result<u32, TreeError> {
        Err(self.reject("insert"))
    }

    fn remove(&mut self, _key: i32) -> Result<Option<V>, TreeError> {
        Err(self.reject("remove"))
    }

    fn search(&mut self, key: i32) -> Option<SearchHit<'_, V>> {
        let mut n = self.forest.root()?;
        debug_assert!(self.forest.is_marked(n), "tango root is an aux root");

        while !self.forest.is_sentinel(n) {
            self.forest.stats.inc_traversals();
            n = match key.cmp(&self.forest.key(n)) {
                Ordering::Less => self.forest.l(n).expect("real tango nodes have two children"),
                Ordering::Greater => self.forest.r(n).expect("real tango nodes have two children"),
                Ordering::Equal => break,
            };
            if self.forest.is_marked(n) {
                n = self.cut_and_join(n);
            }
        }

        let target = if self.forest.is_sentinel(n) {
            self.forest.p(n).expect("sentinels hang below a real node")
        } else {
            n
        };

        let top = self.cut_at(n);
        if !self.forest.is_sentinel(n) {
            if let Some(p) = self.forest.find_marked_predecessor(top, key) {
                let depth = self.forest.depth(n);
                self.join(top, p, depth);
            }
        }

        self.forest.hit(target, key)
    }

    fn root(&self) -> Option<u32> {
        self.forest.root()
    }

    fn stats(&self) -> TreeStats {
        self.forest.stats()
    }

    fn reset_stats(&mut self) {
        self.forest.reset_stats();
    }

    fn initialize_perfect_tree(&mut self, levels: u32, value_of: fn(i32) -> V) -> Result<(), TreeError> {
        self.forest
            .build_perfect(levels, |key, depth| TangoNode::new(key, value_of(key), depth))
    }

    fn view(&self, idx: u32) -> NodeView {
        self.forest.view(idx)
    }

    fn len(&self) -> usize {
        self.forest.len()
    }

    fn keys(&self) -> Vec<i32> {
        self.forest.keys()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn perfect<S: AuxStrategy>(levels: u32) -> TangoTree<i32, S> {
        let mut tree = TangoTree::new();
        tree.initialize_perfect_tree(levels, |k| k).unwrap();
        tree
    }

    fn marked_keys<S: AuxStrategy>(tree: &TangoTree<i32, S>) -> Vec<i32> {
        tree.forest
            .arena
            .iter()
            .filter(|n| n.marked && n.v.is_some())
            .map(|n| n.k)
            .collect()
    }

    #[test]
    fn perfect_tree_marks_every_node() {
        let tree = perfect::<RedBlackAux>(3);
        assert_eq!(marked_keys(&tree).len(), 7);
        let root = tree.root().unwrap();
        let view = tree.view(root);
        assert_eq!(view.key, 4);
        assert_eq!(view.depth, Some(0));
        assert!(view.marked);
    }

    #[test]
    fn find_min_and_max_with_depth_respect_threshold() {
        let mut tree = perfect::<UnbalancedAux>(3);
        // Make 4-2-1 one preferred path.
        tree.search(1);
        let root = tree.root().unwrap();
        let min = tree.forest.find_min_with_depth(root, 0).unwrap();
        let max = tree.forest.find_max_with_depth(root, 0).unwrap();
        assert_eq!(tree.forest.key(min), 1);
        assert_eq!(tree.forest.key(max), 2);
        assert_eq!(tree.forest.find_min_with_depth(root, 2), None);
    }

    #[test]
    fn search_reports_exact_and_nearest() {
        for levels in 1..=4 {
            let mut tree = perfect::<RedBlackAux>(levels);
            let hit = tree.search(1).unwrap();
            assert!(hit.exact);
            assert_eq!(*hit.value, 1);
        }

        let mut tree = perfect::<UnbalancedAux>(3);
        let hit = tree.search(100).unwrap();
        assert!(!hit.exact);
        assert_eq!(hit.key, 7);
        assert_eq!(*hit.value, 7);
    }

    #[test]
    fn mutations_are_rejected() {
        let mut tree = perfect::<RedBlackAux>(2);
        assert!(matches!(tree.insert(9, 9), Err(TreeError::OperationNotPermitted("insert"))));
        assert!(matches!(tree.remove(1), Err(TreeError::OperationNotPermitted("remove"))));
        assert_eq!(tree.keys(), vec![1, 2, 3]);
    }
}
