//! Red-black aux trees: split and merge are built on a three-way join of
//! red-black trees, so every aux tree stays within logarithmic height.

use std::cmp::Ordering;

use crate::bst::Forest;
use crate::types::{Color, RbNodeLike};

use super::{AuxStrategy, TangoNode};

#[derive(Clone, Copy, Debug, Default)]
pub struct RedBlackAux;

impl AuxStrategy for RedBlackAux {
    const NAME: &'static str = "red-black";

    fn split<V>(&self, f: &mut Forest<TangoNode<V>>, n: u32, v_root: u32) -> u32 {
        let vpar = f.p(v_root);
        if let Some(vpar) = vpar {
            f.detach(v_root, vpar);
        }
        let v_marked = f.is_marked(v_root);
        if v_marked {
            f.unmark(v_root);
        }

        // Walk down to `n`, peeling each visited node off into the left or
        // right accumulator tree. Every peeled node becomes the pivot of the
        // next join on its side.
        let key = f.key(n);
        let mut k = v_root;
        let (mut tl, mut vl) = (None, None);
        let (mut tr, mut vr) = (None, None);
        loop {
            assert!(!f.is_tango_leaf(Some(k)), "split target {n} is not in the aux tree of {v_root}");
            let kl = f.l(k).expect("real tango nodes have two children");
            let kr = f.r(k).expect("real tango nodes have two children");
            f.detach(kl, k);
            f.detach(kr, k);
            coerce_black(f, kl);
            coerce_black(f, kr);

            match key.cmp(&f.key(k)) {
                Ordering::Less => {
                    tr = Some(merge_red_black(f, Some(kr), vr, tr));
                    vr = Some(k);
                    k = kl;
                }
                Ordering::Greater => {
                    tl = Some(merge_red_black(f, tl, vl, Some(kl)));
                    vl = Some(k);
                    k = kr;
                }
                Ordering::Equal => {
                    let left = merge_red_black(f, tl, vl, Some(kl));
                    let right = merge_red_black(f, Some(kr), vr, tr);
                    f.attach_left(left, k);
                    f.attach_right(right, k);
                    f.update_subtree_size(k);
                    break;
                }
            }
        }

        match vpar {
            Some(vpar) => f.attach_up(n, vpar),
            None => f.root = Some(n),
        }
        if v_marked {
            f.mark(n);
        }
        n
    }

    fn merge<V>(&self, f: &mut Forest<TangoNode<V>>, n: u32) -> u32 {
        let np = f.p(n);
        let nl = f.l(n).expect("real tango nodes have two children");
        let nr = f.r(n).expect("real tango nodes have two children");

        let marked = f.is_marked(n);
        if marked {
            f.unmark(n);
        }
        if let Some(np) = np {
            f.detach(n, np);
        }
        f.detach(nl, n);
        f.detach(nr, n);

        coerce_black(f, n);
        coerce_black(f, nl);
        coerce_black(f, nr);

        let root = merge_red_black(f, Some(nl), Some(n), Some(nr));

        match np {
            Some(np) => f.attach_up(root, np),
            None => f.root = Some(root),
        }
        if marked {
            f.mark(root);
        }
        root
    }
}

/// Paints a subtree root black so it can enter a join as a valid tree.
fn coerce_black<V>(f: &mut Forest<TangoNode<V>>, idx: u32) {
    f.paint(idx, Color::Black);
    f.update_black_height(idx);
}

/// Joins `nl < n < nr` into one red-black tree and returns its root.
///
/// Either side may be a tango leaf (absent, sentinel or marked), in which
/// case it is carried along as a boundary. With no pivot the non-empty side
/// is returned as is.
fn merge_red_black<V>(f: &mut Forest<TangoNode<V>>, nl: Option<u32>, n: Option<u32>, nr: Option<u32>) -> u32 {
    let n = match n {
        None => nr.or(nl).expect("three-way join needs at least one tree"),
        Some(n) => {
            join_around(f, nl, n, nr);
            n
        }
    };

    // Depth summary and sizes first: rotations in the fix-up maintain them.
    f.update_min_max_path(n);
    f.update_subtree_size_path(Some(n));
    f.insert_fixup(n);
    f.update_black_height_path(n);

    let mut top = n;
    while let Some(p) = f.p(top) {
        top = p;
    }
    top
}

/// Links the detached pivot `n` between `nl` and `nr` and paints it red,
/// ready for insert fix-up.
fn join_around<V>(f: &mut Forest<TangoNode<V>>, nl: Option<u32>, n: u32, nr: Option<u32>) {
    match (f.is_tango_leaf(nl), f.is_tango_leaf(nr)) {
        (true, true) => {
            if let Some(nl) = nl {
                f.attach_left(nl, n);
            }
            if let Some(nr) = nr {
                f.attach_right(nr, n);
            }
        }
        (true, false) => {
            attach_as_minimum(f, n, nr.expect("non-leaf side exists"));
            if let Some(nl) = nl {
                f.attach_left(nl, n);
            }
        }
        (false, true) => {
            attach_as_maximum(f, n, nl.expect("non-leaf side exists"));
            if let Some(nr) = nr {
                f.attach_right(nr, n);
            }
        }
        (false, false) => {
            let nl = nl.expect("non-leaf side exists");
            let nr = nr.expect("non-leaf side exists");
            let (lh, rh) = (f.black_height(nl), f.black_height(nr));
            match lh.cmp(&rh) {
                Ordering::Equal => {
                    f.attach_left(nl, n);
                    f.attach_right(nr, n);
                }
                Ordering::Less => {
                    // Splice in down the left spine of the taller right tree.
                    let p = find_min_with_black_height(f, nr, lh);
                    let pp = f.p(p).expect("taller tree has nodes above the splice point");
                    f.attach_left(nl, n);
                    f.detach(p, pp);
                    f.attach_right(p, n);
                    f.attach_left(n, pp);
                    f.update_min_max_path(n);
                }
                Ordering::Greater => {
                    let p = find_max_with_black_height(f, nl, rh);
                    let pp = f.p(p).expect("taller tree has nodes above the splice point");
                    f.attach_right(nr, n);
                    f.detach(p, pp);
                    f.attach_left(p, n);
                    f.attach_right(n, pp);
                    f.update_min_max_path(n);
                }
            }
        }
    }
    f.paint(n, Color::Red);
    f.update_black_height(n);
}

/// Hangs `n` below the minimum of `t`, moving the leaf that was there to
/// `n`'s right.
fn attach_as_minimum<V>(f: &mut Forest<TangoNode<V>>, n: u32, t: u32) {
    let a = f.min_child(t);
    let al = f.l(a).expect("aux minimum keeps a leaf on its left");
    debug_assert!(f.key(n) < f.key(a));
    f.detach(al, a);
    f.attach_right(al, n);
    f.attach_left(n, a);
    f.update_min_max_path(n);
}

fn attach_as_maximum<V>(f: &mut Forest<TangoNode<V>>, n: u32, t: u32) {
    let a = f.max_child(t);
    let ar = f.r(a).expect("aux maximum keeps a leaf on its right");
    debug_assert!(f.key(n) > f.key(a));
    f.detach(ar, a);
    f.attach_left(ar, n);
    f.attach_right(n, a);
    f.update_min_max_path(n);
}

/// First black node of black height `target` on the left spine of `r`.
/// Heights are derived from the root's count on the way down.
fn find_min_with_black_height<V>(f: &mut Forest<TangoNode<V>>, r: u32, target: u32) -> u32 {
    let mut bh = f.black_height(r);
    let mut r = r;
    loop {
        assert!(!f.is_tango_leaf(Some(r)), "no node of black height {target} on the left spine");
        let black = f.node(r).is_black();
        if black && bh == target {
            return r;
        }
        if black {
            bh -= 1;
        }
        r = f.l(r).expect("real tango nodes have two children");
        f.stats.inc_other_traversals();
    }
}

fn find_max_with_black_height<V>(f: &mut Forest<TangoNode<V>>, r: u32, target: u32) -> u32 {
    let mut bh = f.black_height(r);
    let mut r = r;
    loop {
        assert!(!f.is_tango_leaf(Some(r)), "no node of black height {target} on the right spine");
        let black = f.node(r).is_black();
        if black && bh == target {
            return r;
        }
        if black {
            bh -= 1;
        }
        r = f.r(r).expect("real tango nodes have two children");
        f.stats.inc_other_traversals();
    }
}
