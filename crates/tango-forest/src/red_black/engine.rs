//! Red-black insert/delete with fix-up, generic over [`RbNodeLike`] so the
//! same code balances standalone trees and red-black Tango aux trees.

use crate::bst::Forest;
use crate::types::{Color, RbNodeLike};

use super::child_black_height;

impl<N: RbNodeLike> Forest<N> {
    // ── colors ────────────────────────────────────────────────────────────

    /// Absent children (including marked ones) count as black.
    #[inline]
    pub(crate) fn is_red(&self, idx: Option<u32>) -> bool {
        idx.map(|i| !self.node(i).is_black()).unwrap_or(false)
    }

    #[inline]
    pub(crate) fn is_black(&self, idx: Option<u32>) -> bool {
        !self.is_red(idx)
    }

    #[inline]
    pub(crate) fn paint(&mut self, idx: u32, color: Color) {
        self.node_mut(idx).set_color(color);
    }

    pub(crate) fn black_height(&self, idx: u32) -> u32 {
        self.node(idx).black_height()
    }

    /// Recomputes the black height of `idx` from its left child, which must
    /// already be exact. Sentinels keep theirs.
    pub(crate) fn update_black_height(&mut self, idx: u32) {
        if let Some(bh) = child_black_height(&self.arena, idx) {
            self.node_mut(idx).set_black_height(bh);
        }
    }

    /// Left rotation at `n` followed by the black heights of `n` and of the
    /// pivot that replaced it, lower node first.
    fn rotate_left_rb(&mut self, n: u32) {
        self.rotate_left(n);
        self.update_black_height(n);
        let pv = self.p(n).expect("rotated node hangs below its pivot");
        self.update_black_height(pv);
    }

    fn rotate_right_rb(&mut self, n: u32) {
        self.rotate_right(n);
        self.update_black_height(n);
        let pv = self.p(n).expect("rotated node hangs below its pivot");
        self.update_black_height(pv);
    }

    /// Recomputes black heights from `idx` up to its aux-tree root.
    pub(crate) fn update_black_height_path(&mut self, idx: u32) {
        let mut curr = idx;
        self.update_black_height(curr);
        while !self.is_root(curr) {
            curr = self.p(curr).expect("non-root has a parent");
            self.update_black_height(curr);
        }
    }

    // ── insert ────────────────────────────────────────────────────────────

    /// Restores the red-black properties after `n` was made red.
    pub(crate) fn insert_fixup(&mut self, n: u32) {
        let mut n = n;
        loop {
            // case 1: root
            if self.is_root(n) {
                self.paint(n, Color::Black);
                self.update_black_height(n);
                return;
            }
            self.update_black_height(n);

            // case 2: black parent
            let p = self.p(n).expect("non-root has a parent");
            if self.node(p).is_black() {
                self.update_black_height(p);
                return;
            }

            // case 3: red uncle
            let g = self.p(p).expect("red parent is not a root");
            let u = self.sibling(p);
            if let Some(u) = u.filter(|&u| !self.node(u).is_black()) {
                self.paint(p, Color::Black);
                self.update_black_height(p);
                self.paint(u, Color::Black);
                self.update_black_height(u);
                self.paint(g, Color::Red);
                self.update_black_height(g);
                n = g;
                continue;
            }

            // case 4: inner grandchild
            if self.is_left_child(p) {
                if self.is_right_child(n) {
                    self.rotate_left_rb(p);
                    n = p;
                }
            } else if self.is_left_child(n) {
                self.rotate_right_rb(p);
                n = p;
            }

            // case 5: outer grandchild
            let p = self.p(n).expect("fix-up node has a parent");
            let g = self.p(p).expect("fix-up node has a grandparent");
            self.paint(p, Color::Black);
            self.paint(g, Color::Red);
            if self.is_left_child(p) {
                self.rotate_right_rb(g);
            } else {
                self.rotate_left_rb(g);
            }
            return;
        }
    }

    /// Inserts `key` by growing a sentinel into a red node, then rebalances.
    pub(crate) fn insert_rb(&mut self, key: i32, value: N::Value) -> u32 {
        let n = match self.search_by_key(key) {
            Some(n) => n,
            None => {
                let nil = self.alloc(N::sentinel(0));
                self.root = Some(nil);
                nil
            }
        };

        if !self.is_sentinel(n) {
            self.node_mut(n).set_value(Some(value));
            return n;
        }

        let node = self.node_mut(n);
        node.set_key(key);
        node.set_value(Some(value));
        node.set_color(Color::Red);

        let nl = self.alloc(N::sentinel(0));
        let nr = self.alloc(N::sentinel(0));
        self.attach_left(nl, n);
        self.attach_right(nr, n);
        self.update_subtree_size_path(Some(n));

        if self.root == Some(n) {
            self.paint(n, Color::Black);
        } else {
            self.insert_fixup(n);
        }
        self.update_black_height_path(n);
        n
    }

    // ── delete ────────────────────────────────────────────────────────────

    /// Restores the red-black properties after a black node was removed
    /// above the black node `n`.
    pub(crate) fn delete_fixup(&mut self, n: u32) {
        let mut n = n;
        loop {
            // case 1: root
            if self.is_root(n) {
                return;
            }
            let p = self.p(n).expect("non-root has a parent");

            // case 2: red sibling
            if let Some(s) = self.sibling(n).filter(|&s| !self.node(s).is_black()) {
                self.paint(p, Color::Red);
                self.paint(s, Color::Black);
                if self.is_left_child(n) {
                    self.rotate_left_rb(p);
                } else {
                    self.rotate_right_rb(p);
                }
            }

            let s = self.sibling(n).expect("black deficit implies a sibling");
            let (sl, sr) = (self.left_in_aux(s), self.right_in_aux(s));
            let nephews_black = self.is_black(sl) && self.is_black(sr);

            // case 3: everything black
            if self.node(p).is_black() && self.node(s).is_black() && nephews_black {
                self.paint(s, Color::Red);
                self.update_black_height(s);
                self.update_black_height(p);
                n = p;
                continue;
            }

            // case 4: red parent
            if !self.node(p).is_black() && self.node(s).is_black() && nephews_black {
                self.paint(s, Color::Red);
                self.update_black_height(s);
                self.paint(p, Color::Black);
                self.update_black_height(p);
                return;
            }

            // case 5: near nephew red, far nephew black
            if self.is_left_child(s) {
                if let (true, Some(sr)) = (self.is_black(sl), sr.filter(|&x| !self.node(x).is_black())) {
                    self.paint(s, Color::Red);
                    self.paint(sr, Color::Black);
                    self.rotate_left_rb(s);
                }
            } else if let (Some(sl), true) = (sl.filter(|&x| !self.node(x).is_black()), self.is_black(sr)) {
                self.paint(s, Color::Red);
                self.paint(sl, Color::Black);
                self.rotate_right_rb(s);
            }

            // case 6: far nephew red
            let s = self.sibling(n).expect("black deficit implies a sibling");
            let p_color = self.node(p).color_of();
            self.paint(s, p_color);
            self.paint(p, Color::Black);
            if self.is_left_child(s) {
                let far = self.left_in_aux(s).expect("far nephew is red");
                self.paint(far, Color::Black);
                self.update_black_height(far);
                self.rotate_right_rb(p);
            } else {
                let far = self.right_in_aux(s).expect("far nephew is red");
                self.paint(far, Color::Black);
                self.update_black_height(far);
                self.rotate_left_rb(p);
            }
            return;
        }
    }

    /// Removes `key`, copying the predecessor up when the target has two
    /// real children, then rebalances from the spliced-in node.
    pub(crate) fn remove_rb(&mut self, key: i32) -> Option<N::Value> {
        let mut d = self.search_by_key(key)?;
        if self.is_sentinel(d) {
            return None;
        }

        let dl = self.l(d).expect("real red-black nodes have two children");
        let dr = self.r(d).expect("real red-black nodes have two children");
        let payload = self.node_mut(d).take_value();

        let r = match (self.is_sentinel(dl), self.is_sentinel(dr)) {
            (true, true) => {
                self.detach(dl, d);
                self.splice(d, dl);
                self.release(dr);
                dl
            }
            (false, false) => {
                let n = self
                    .predecessor(d)
                    .expect("node with two children has a predecessor");
                let n_key = self.key(n);
                let n_value = self.node_mut(n).take_value();
                let target = self.node_mut(d);
                target.set_key(n_key);
                target.set_value(n_value);

                let nl = self.l(n).expect("real red-black nodes have two children");
                let nr = self.r(n).expect("real red-black nodes have two children");
                debug_assert!(self.is_sentinel(nr), "predecessor has no right subtree");
                self.detach(nl, n);
                self.detach(nr, n);
                self.splice(n, nl);
                self.release(nr);
                d = n;
                nl
            }
            (l_nil, _) => {
                let (c, nil) = if l_nil { (dr, dl) } else { (dl, dr) };
                self.detach(c, d);
                self.detach(nil, d);
                self.splice(d, c);
                self.release(nil);
                c
            }
        };

        let dp = self.p(d);
        self.update_subtree_size_path(dp);

        if self.node(d).is_black() {
            if self.node(r).is_black() {
                self.delete_fixup(r);
            } else {
                self.paint(r, Color::Black);
            }
        }
        self.update_black_height_path(r);
        self.release(d);
        payload
    }

    /// Puts the detached node `c` into the slot `d` occupies.
    fn splice(&mut self, d: u32, c: u32) {
        let dp = self.p(d);
        self.set_p(c, dp);
        match dp {
            Some(_) => self.replace_child(d, c),
            None => self.root = Some(c),
        }
    }
}
