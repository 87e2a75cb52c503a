//! Red-black family: node type, the fix-up engine (shared with the
//! red-black Tango strategy) and the standalone [`RedBlackTree`].

pub mod engine;
#[path = "RedBlackTree.rs"]
pub mod red_black_tree;
pub mod types;

pub use red_black_tree::RedBlackTree;
pub use types::RbNode;

use crate::types::RbNodeLike;

/// Black height of `idx` from its left child's stored height. A marked or
/// sentinel child counts as one black leaf. Returns `None` for sentinels,
/// whose height is fixed at 1.
pub(crate) fn child_black_height<N: RbNodeLike>(arena: &[N], idx: u32) -> Option<u32> {
    let node = &arena[idx as usize];
    if node.is_sentinel() {
        return None;
    }
    let below = match node.l() {
        Some(l) if !arena[l as usize].is_marked() => arena[l as usize].black_height(),
        _ => 1,
    };
    Some(below + u32::from(node.is_black()))
}
