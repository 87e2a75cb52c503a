use crate::bst::Forest;

use super::{AuxStrategy, TangoNode};

/// Aux trees kept in whatever shape rotations leave them. Splits rotate the
/// target up to the aux root; merges only refresh the depth summary.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnbalancedAux;

impl AuxStrategy for UnbalancedAux {
    const NAME: &'static str = "unbalanced";

    fn split<V>(&self, forest: &mut Forest<TangoNode<V>>, n: u32, v_root: u32) -> u32 {
        if forest.is_root(n) || n == v_root {
            return n;
        }

        // Stand-in aux root so the climb stops at `v_root`'s position.
        let v_marked = forest.is_marked(v_root);
        if !v_marked {
            forest.mark(v_root);
        }

        while !forest.is_marked(n) {
            let p = forest.p(n).expect("unmarked node has a parent");
            if forest.is_left_child(n) {
                forest.rotate_right(p);
            } else {
                forest.rotate_left(p);
            }
        }

        if !v_marked {
            forest.unmark(n);
        }
        n
    }

    fn merge<V>(&self, forest: &mut Forest<TangoNode<V>>, n: u32) -> u32 {
        forest.update_min_max(n);
        n
    }
}
