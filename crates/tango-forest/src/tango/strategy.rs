use crate::bst::Forest;

use super::TangoNode;

/// How aux trees are split around a node and merged back together.
///
/// Both operations work within a single aux tree: marked children are
/// boundaries and must end up hanging off the same key range they started in.
pub trait AuxStrategy: Default {
    /// Short name used in logs.
    const NAME: &'static str;

    /// Promotes `n` to the root of the aux tree currently rooted at `v_root`,
    /// so that smaller keys end up on its left and larger keys on its right.
    /// The aux-root mark, if `v_root` carried one, moves to `n`. Returns `n`.
    fn split<V>(&self, forest: &mut Forest<TangoNode<V>>, n: u32, v_root: u32) -> u32;

    /// Rebuilds a single aux tree out of `n` and its two child subtrees,
    /// returning the new aux-tree root.
    fn merge<V>(&self, forest: &mut Forest<TangoNode<V>>, n: u32) -> u32;
}
