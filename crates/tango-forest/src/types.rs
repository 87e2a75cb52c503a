//! Node trait definitions shared by every tree family.
//!
//! Nodes live in a [`Vec`]-backed arena owned by [`crate::Forest`]. Each
//! "pointer" is an `Option<u32>` index into that arena, so parent
//! back-references never form ownership cycles.

use serde::{Deserialize, Serialize};

/// Key reserved for sentinel (nil) leaves. Never accepted by `insert`.
pub const NIL_KEY: i32 = i32::MIN;

/// Structural links (`p`, `l`, `r`).
pub trait Node {
    fn p(&self) -> Option<u32>;
    fn l(&self) -> Option<u32>;
    fn r(&self) -> Option<u32>;
    fn set_p(&mut self, v: Option<u32>);
    fn set_l(&mut self, v: Option<u32>);
    fn set_r(&mut self, v: Option<u32>);
}

/// Keyed, size-augmented node stored in a [`crate::Forest`].
///
/// The mark accessors default to "never marked", which collapses the
/// auxiliary-tree aware navigation of the forest into plain BST navigation
/// for every family except Tango.
pub trait TreeNode: Node + Sized {
    type Value;

    /// Builds a fresh, unlinked node holding a real key.
    fn create(key: i32, value: Self::Value) -> Self;

    /// Builds a sentinel leaf. Only families with `USES_SENTINELS` call it.
    fn sentinel(depth: u32) -> Self;

    /// Whether leaves of this family carry explicit sentinel children.
    const USES_SENTINELS: bool;

    fn key(&self) -> i32;
    fn set_key(&mut self, key: i32);
    fn value(&self) -> Option<&Self::Value>;
    fn take_value(&mut self) -> Option<Self::Value>;
    fn set_value(&mut self, value: Option<Self::Value>);

    /// Number of real nodes in the subtree rooted here, self included.
    fn size(&self) -> u32;
    fn set_size(&mut self, size: u32);

    fn is_sentinel(&self) -> bool {
        self.key() == NIL_KEY
    }

    fn is_marked(&self) -> bool {
        false
    }

    fn set_marked(&mut self, _marked: bool) {}

    fn color(&self) -> Option<Color> {
        None
    }

    fn depth(&self) -> Option<u32> {
        None
    }

    /// Recomputes family-specific augmentation of `idx` from its children.
    ///
    /// Called on both nodes of every rotation, lower node first.
    fn refresh(_arena: &mut [Self], _idx: u32) {}
}

/// Red-black node color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Red,
    Black,
}

/// Red-black specific node behavior.
pub trait RbNodeLike: TreeNode {
    fn color_of(&self) -> Color;
    fn set_color(&mut self, color: Color);
    /// Black nodes (self included) on any path down to a leaf.
    fn black_height(&self) -> u32;
    fn set_black_height(&mut self, bh: u32);

    fn is_black(&self) -> bool {
        self.color_of() == Color::Black
    }
}

/// Read-only snapshot of one node, as consumed by renderers and visualizers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct NodeView {
    pub index: u32,
    pub key: i32,
    pub parent: Option<u32>,
    pub left: Option<u32>,
    pub right: Option<u32>,
    pub size: u32,
    pub sentinel: bool,
    pub color: Option<Color>,
    pub marked: bool,
    pub depth: Option<u32>,
}

/// Outcome of a search: the payload of the matching node, or of the nearest
/// real node on the search path when the key is absent.
#[derive(Debug, PartialEq, Eq)]
pub struct SearchHit<'a, V> {
    pub exact: bool,
    pub key: i32,
    pub value: &'a V,
}
