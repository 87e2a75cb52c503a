//! Base tree adaptor: arena ownership, navigation, rotation and size
//! maintenance shared by every tree family.
//!
//! Navigation is auxiliary-tree aware. A marked child is treated as absent
//! and a marked node is treated as a root, which is exactly what the Tango
//! family needs. Families that never mark a node get plain BST semantics
//! from the same code.

pub mod basic;
pub mod types;

use std::cmp::Ordering;

use tracing::debug;

use crate::error::{check_levels, TreeError};
use crate::stats::TreeStats;
use crate::types::{NodeView, SearchHit, TreeNode};

pub use basic::BasicBst;
pub use types::BstNode;

/// Arena of nodes plus the root index and statistics of one tree instance.
#[derive(Clone, Debug)]
pub struct Forest<N> {
    pub(crate) arena: Vec<N>,
    free: Vec<u32>,
    pub(crate) root: Option<u32>,
    pub(crate) stats: TreeStats,
}

impl<N> Default for Forest<N> {
    fn default() -> Self {
        Self {
            arena: Vec::new(),
            free: Vec::new(),
            root: None,
            stats: TreeStats::new(),
        }
    }
}

impl<N: TreeNode> Forest<N> {
    pub fn new() -> Self {
        Self::default()
    }

    // ── accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn node(&self, idx: u32) -> &N {
        &self.arena[idx as usize]
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, idx: u32) -> &mut N {
        &mut self.arena[idx as usize]
    }

    #[inline]
    pub(crate) fn p(&self, idx: u32) -> Option<u32> {
        self.arena[idx as usize].p()
    }

    #[inline]
    pub(crate) fn l(&self, idx: u32) -> Option<u32> {
        self.arena[idx as usize].l()
    }

    #[inline]
    pub(crate) fn r(&self, idx: u32) -> Option<u32> {
        self.arena[idx as usize].r()
    }

    #[inline]
    pub(crate) fn set_p(&mut self, idx: u32, v: Option<u32>) {
        self.arena[idx as usize].set_p(v);
    }

    #[inline]
    pub(crate) fn set_l(&mut self, idx: u32, v: Option<u32>) {
        self.arena[idx as usize].set_l(v);
    }

    #[inline]
    pub(crate) fn set_r(&mut self, idx: u32, v: Option<u32>) {
        self.arena[idx as usize].set_r(v);
    }

    #[inline]
    pub(crate) fn key(&self, idx: u32) -> i32 {
        self.arena[idx as usize].key()
    }

    #[inline]
    pub(crate) fn is_sentinel(&self, idx: u32) -> bool {
        self.arena[idx as usize].is_sentinel()
    }

    #[inline]
    pub(crate) fn is_marked(&self, idx: u32) -> bool {
        self.arena[idx as usize].is_marked()
    }

    #[inline]
    pub(crate) fn mark(&mut self, idx: u32) {
        self.arena[idx as usize].set_marked(true);
    }

    #[inline]
    pub(crate) fn unmark(&mut self, idx: u32) {
        self.arena[idx as usize].set_marked(false);
    }

    #[inline]
    fn size_of(&self, idx: Option<u32>) -> u32 {
        idx.map(|i| self.arena[i as usize].size()).unwrap_or(0)
    }

    /// Root of the whole tree, or `None` when the tree holds no real node.
    pub fn root(&self) -> Option<u32> {
        self.root.filter(|&r| !self.is_sentinel(r))
    }

    pub fn stats(&self) -> TreeStats {
        self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }

    /// Number of real (non-sentinel) nodes.
    pub fn len(&self) -> usize {
        self.size_of(self.root) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // ── arena slots ───────────────────────────────────────────────────────

    pub(crate) fn alloc(&mut self, node: N) -> u32 {
        match self.free.pop() {
            Some(idx) => {
                self.arena[idx as usize] = node;
                idx
            }
            None => {
                self.arena.push(node);
                (self.arena.len() - 1) as u32
            }
        }
    }

    /// Returns a slot to the free list. The node must already be unlinked.
    pub(crate) fn release(&mut self, idx: u32) {
        let node = self.node_mut(idx);
        node.set_p(None);
        node.set_l(None);
        node.set_r(None);
        node.set_value(None);
        self.free.push(idx);
    }

    pub(crate) fn clear(&mut self) {
        self.arena.clear();
        self.free.clear();
        self.root = None;
    }

    // ── inspection (aux-tree aware) ───────────────────────────────────────

    /// True for the physical root and for every marked (aux-tree) root.
    pub(crate) fn is_root(&self, idx: u32) -> bool {
        self.p(idx).is_none() || self.is_marked(idx)
    }

    pub(crate) fn left_in_aux(&self, idx: u32) -> Option<u32> {
        self.l(idx).filter(|&c| !self.is_marked(c))
    }

    pub(crate) fn right_in_aux(&self, idx: u32) -> Option<u32> {
        self.r(idx).filter(|&c| !self.is_marked(c))
    }

    pub(crate) fn is_left_child(&self, idx: u32) -> bool {
        match self.p(idx) {
            Some(p) => self.l(p) == Some(idx) && !self.is_marked(idx),
            None => false,
        }
    }

    pub(crate) fn is_right_child(&self, idx: u32) -> bool {
        match self.p(idx) {
            Some(p) => self.r(p) == Some(idx) && !self.is_marked(idx),
            None => false,
        }
    }

    pub(crate) fn sibling(&self, idx: u32) -> Option<u32> {
        if self.is_root(idx) {
            return None;
        }
        let p = self.p(idx)?;
        if self.is_left_child(idx) {
            self.right_in_aux(p)
        } else if self.is_right_child(idx) {
            self.left_in_aux(p)
        } else {
            None
        }
    }

    // ── search ────────────────────────────────────────────────────────────

    /// Descends from the root and returns the matching node, or the last
    /// node visited when the key is absent. Sentinels count as visited.
    pub fn search_by_key(&mut self, key: i32) -> Option<u32> {
        let mut curr = self.root;
        let mut last = None;
        while let Some(idx) = curr {
            last = Some(idx);
            self.stats.inc_traversals();
            curr = match key.cmp(&self.key(idx)) {
                Ordering::Less => self.l(idx),
                Ordering::Greater => self.r(idx),
                Ordering::Equal => break,
            };
        }
        last
    }

    /// Builds the search result for the node a descent ended on. A sentinel
    /// defers to its parent, the nearest real node on the path.
    pub(crate) fn hit(&self, idx: u32, key: i32) -> Option<SearchHit<'_, N::Value>> {
        let idx = if self.is_sentinel(idx) {
            self.p(idx)?
        } else {
            idx
        };
        let node = self.node(idx);
        Some(SearchHit {
            exact: node.key() == key,
            key: node.key(),
            value: node.value().expect("real nodes carry a value"),
        })
    }

    // ── unbalanced mutation ───────────────────────────────────────────────

    /// Inserts without rebalancing. An existing key has its value replaced.
    pub(crate) fn insert_unbalanced(&mut self, key: i32, value: N::Value) -> u32 {
        let Some(p) = self.search_by_key(key) else {
            let n = self.alloc(N::create(key, value));
            self.root = Some(n);
            return n;
        };

        if self.key(p) == key {
            self.node_mut(p).set_value(Some(value));
            return p;
        }

        let n = self.alloc(N::create(key, value));
        self.set_p(n, Some(p));
        if key < self.key(p) {
            self.set_l(p, Some(n));
        } else {
            self.set_r(p, Some(n));
        }
        self.update_subtree_size_path(Some(p));
        n
    }

    /// Removes without rebalancing, copying the predecessor up when the
    /// target has two children.
    pub(crate) fn remove_unbalanced(&mut self, key: i32) -> Option<N::Value> {
        let mut d = self.search_by_key(key)?;
        if self.key(d) != key {
            return None;
        }

        let payload = self.node_mut(d).take_value();

        match (self.l(d), self.r(d)) {
            (None, None) => {
                if self.root == Some(d) {
                    self.root = None;
                } else {
                    self.clear_parent_reference(d);
                }
            }
            (Some(_), Some(_)) => {
                let n = self
                    .predecessor(d)
                    .expect("node with two children has a predecessor");
                let n_key = self.key(n);
                let n_value = self.node_mut(n).take_value();
                let target = self.node_mut(d);
                target.set_key(n_key);
                target.set_value(n_value);

                match self.l(n) {
                    None => self.clear_parent_reference(n),
                    Some(nl) => {
                        let np = self.p(n);
                        self.replace_child(n, nl);
                        self.set_p(nl, np);
                    }
                }
                d = n;
            }
            (l, r) => {
                let c = l.or(r).expect("exactly one child");
                let dp = self.p(d);
                self.set_p(c, dp);
                if self.root == Some(d) {
                    self.root = Some(c);
                } else {
                    self.replace_child(d, c);
                }
            }
        }

        let dp = self.p(d);
        self.update_subtree_size_path(dp);
        self.release(d);
        payload
    }

    // ── low-level manipulation ────────────────────────────────────────────

    /// Points `cur`'s parent at `nw` in place of `cur`.
    pub(crate) fn replace_child(&mut self, cur: u32, nw: u32) {
        let p = self.p(cur).expect("replace_child requires a parent");
        if self.l(p) == Some(cur) {
            self.set_l(p, Some(nw));
        } else if self.r(p) == Some(cur) {
            self.set_r(p, Some(nw));
        } else {
            panic!("node {cur} is not a child of its parent {p}");
        }
    }

    pub(crate) fn clear_parent_reference(&mut self, n: u32) {
        let p = self.p(n).expect("clear_parent_reference requires a parent");
        if self.l(p) == Some(n) {
            self.set_l(p, None);
        } else if self.r(p) == Some(n) {
            self.set_r(p, None);
        } else {
            panic!("node {n} is not a child of its parent {p}");
        }
    }

    /// Left rotation at `n`: promotes `n.r`, pushes `n` down to its left.
    ///
    /// ```text
    ///   n              pv
    ///  / \            /  \
    /// a   pv    →    n    c
    ///    /  \       / \
    ///   b    c     a   b
    /// ```
    pub fn rotate_left(&mut self, n: u32) {
        let pv = self.r(n).expect("rotate_left requires a right child");
        debug_assert!(!self.is_marked(pv), "rotation pivot must share the aux tree");
        self.promote(n, pv);

        let b = self.l(pv);
        self.set_r(n, b);
        if let Some(b) = b {
            self.set_p(b, Some(n));
        }
        self.set_l(pv, Some(n));
        self.set_p(n, Some(pv));

        self.finish_rotation(n, pv);
    }

    /// Right rotation at `n`: promotes `n.l`, pushes `n` down to its right.
    pub fn rotate_right(&mut self, n: u32) {
        let pv = self.l(n).expect("rotate_right requires a left child");
        debug_assert!(!self.is_marked(pv), "rotation pivot must share the aux tree");
        self.promote(n, pv);

        let b = self.r(pv);
        self.set_l(n, b);
        if let Some(b) = b {
            self.set_p(b, Some(n));
        }
        self.set_r(pv, Some(n));
        self.set_p(n, Some(pv));

        self.finish_rotation(n, pv);
    }

    /// Moves `pv` into `n`'s slot under `n`'s parent (or the root pointer).
    fn promote(&mut self, n: u32, pv: u32) {
        let parent = self.p(n);
        self.set_p(pv, parent);
        match parent {
            Some(_) => self.replace_child(n, pv),
            // A detached subtree has nobody to notify.
            None if self.root == Some(n) => self.root = Some(pv),
            None => {}
        }
    }

    fn finish_rotation(&mut self, n: u32, pv: u32) {
        self.stats.inc_rotations();
        self.update_subtree_size(n);
        self.update_subtree_size(pv);

        // The mark always sits on the aux-tree root.
        if self.is_marked(n) {
            self.unmark(n);
            self.mark(pv);
        }

        N::refresh(&mut self.arena, n);
        N::refresh(&mut self.arena, pv);
    }

    /// Detaches `n` from `par`, which must be its parent.
    pub(crate) fn detach(&mut self, n: u32, par: u32) {
        assert_eq!(self.p(n), Some(par), "detach requires the actual parent");
        self.clear_parent_reference(n);
        self.set_p(n, None);
    }

    /// Attaches the parentless real node `n` under `par` on the side its key
    /// dictates.
    pub(crate) fn attach_up(&mut self, n: u32, par: u32) {
        assert!(self.p(n).is_none(), "attach_up requires a detached node");
        assert!(!self.is_sentinel(n), "sentinels are attached by side");
        if self.key(n) < self.key(par) {
            assert!(self.l(par).is_none(), "left slot of {par} is occupied");
            self.set_l(par, Some(n));
        } else {
            assert!(self.r(par).is_none(), "right slot of {par} is occupied");
            self.set_r(par, Some(n));
        }
        self.set_p(n, Some(par));
    }

    pub(crate) fn attach_left(&mut self, n: u32, par: u32) {
        assert!(self.p(n).is_none(), "attach_left requires a detached node");
        assert!(self.l(par).is_none(), "left slot of {par} is occupied");
        debug_assert!(self.is_sentinel(n) || self.key(n) < self.key(par));
        self.set_l(par, Some(n));
        self.set_p(n, Some(par));
    }

    pub(crate) fn attach_right(&mut self, n: u32, par: u32) {
        assert!(self.p(n).is_none(), "attach_right requires a detached node");
        assert!(self.r(par).is_none(), "right slot of {par} is occupied");
        debug_assert!(self.is_sentinel(n) || self.key(n) > self.key(par));
        self.set_r(par, Some(n));
        self.set_p(n, Some(par));
    }

    // ── symmetric-order navigation ────────────────────────────────────────

    /// Leftmost real node of `n`'s aux subtree.
    pub(crate) fn min_child(&mut self, n: u32) -> u32 {
        let mut n = n;
        while let Some(l) = self.left_in_aux(n) {
            if self.is_sentinel(l) {
                break;
            }
            n = l;
            self.stats.inc_other_traversals();
        }
        n
    }

    /// Rightmost real node of `n`'s aux subtree.
    pub(crate) fn max_child(&mut self, n: u32) -> u32 {
        let mut n = n;
        while let Some(r) = self.right_in_aux(n) {
            if self.is_sentinel(r) {
                break;
            }
            n = r;
            self.stats.inc_other_traversals();
        }
        n
    }

    /// In-order predecessor of `n` within its aux tree.
    pub(crate) fn predecessor(&mut self, n: u32) -> Option<u32> {
        if let Some(l) = self.left_in_aux(n) {
            if !self.is_sentinel(l) {
                return Some(self.max_child(l));
            }
        }
        let mut n = n;
        while !self.is_root(n) && self.is_left_child(n) {
            n = self.p(n)?;
            self.stats.inc_other_traversals();
        }
        if self.is_root(n) {
            None
        } else {
            self.p(n)
        }
    }

    /// In-order successor of `n` within its aux tree.
    pub(crate) fn successor(&mut self, n: u32) -> Option<u32> {
        if let Some(r) = self.right_in_aux(n) {
            if !self.is_sentinel(r) {
                return Some(self.min_child(r));
            }
        }
        let mut n = n;
        while !self.is_root(n) && self.is_right_child(n) {
            n = self.p(n)?;
            self.stats.inc_other_traversals();
        }
        if self.is_root(n) {
            None
        } else {
            self.p(n)
        }
    }

    // ── size maintenance ──────────────────────────────────────────────────

    /// Recomputes `size` of `n`, assuming its children are correct.
    pub(crate) fn update_subtree_size(&mut self, n: u32) {
        let size = if self.is_sentinel(n) {
            0
        } else {
            1 + self.size_of(self.l(n)) + self.size_of(self.r(n))
        };
        self.node_mut(n).set_size(size);
    }

    /// Recomputes `size` from `n` up to the physical root.
    pub(crate) fn update_subtree_size_path(&mut self, n: Option<u32>) {
        let mut curr = n;
        while let Some(idx) = curr {
            self.update_subtree_size(idx);
            curr = self.p(idx);
        }
    }

    // ── construction ──────────────────────────────────────────────────────

    /// Replaces the contents with a complete tree over keys `1..2^levels`.
    ///
    /// `make(key, depth)` builds each real node; sentinels are added under
    /// the bottom level for families that use them.
    pub(crate) fn build_perfect<F>(&mut self, levels: u32, mut make: F) -> Result<(), TreeError>
    where
        F: FnMut(i32, u32) -> N,
    {
        check_levels(levels)?;
        self.clear();
        let mut next_key = 1;
        let root = self.perfect_subtree(levels - 1, 0, &mut next_key, &mut make);
        self.root = Some(root);
        debug!(levels, nodes = self.len(), "initialized perfect tree");
        Ok(())
    }

    fn perfect_subtree<F>(&mut self, height: u32, depth: u32, next_key: &mut i32, make: &mut F) -> u32
    where
        F: FnMut(i32, u32) -> N,
    {
        let idx = if depth == height {
            let idx = self.alloc(make(*next_key, depth));
            *next_key += 1;
            if N::USES_SENTINELS {
                let nl = self.alloc(N::sentinel(depth + 1));
                let nr = self.alloc(N::sentinel(depth + 1));
                self.attach_left(nl, idx);
                self.attach_right(nr, idx);
            }
            idx
        } else {
            let l = self.perfect_subtree(height, depth + 1, next_key, make);
            let idx = self.alloc(make(*next_key, depth));
            *next_key += 1;
            let r = self.perfect_subtree(height, depth + 1, next_key, make);
            self.attach_left(l, idx);
            self.attach_right(r, idx);
            idx
        };
        self.update_subtree_size(idx);
        N::refresh(&mut self.arena, idx);
        idx
    }

    // ── read-only views ───────────────────────────────────────────────────

    /// Real keys in symmetric order.
    pub fn keys(&self) -> Vec<i32> {
        let mut out = Vec::with_capacity(self.len());
        let mut stack = Vec::new();
        let mut curr = self.root;
        loop {
            while let Some(idx) = curr {
                stack.push(idx);
                curr = self.l(idx);
            }
            let Some(idx) = stack.pop() else {
                break;
            };
            if !self.is_sentinel(idx) {
                out.push(self.key(idx));
            }
            curr = self.r(idx);
        }
        out
    }

    pub fn view(&self, idx: u32) -> NodeView {
        let n = self.node(idx);
        NodeView {
            index: idx,
            key: n.key(),
            parent: n.p(),
            left: n.l(),
            right: n.r(),
            size: n.size(),
            sentinel: n.is_sentinel(),
            color: n.color(),
            marked: n.is_marked(),
            depth: n.depth(),
        }
    }
}
