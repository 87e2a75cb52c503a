//! Splay tree: every search rotates the found-or-last node to the root.

use crate::bst::{BstNode, Forest};
use crate::error::TreeError;
use crate::stats::TreeStats;
use crate::tree::BinarySearchTree;
use crate::types::{NodeView, SearchHit, TreeNode, NIL_KEY};

// ── engine ───────────────────────────────────────────────────────────────────

impl<N: TreeNode> Forest<N> {
    /// Rotates `u` up until it is a root, using zig, zig-zig and zig-zag
    /// steps.
    pub fn splay(&mut self, u: u32) {
        while !self.is_root(u) {
            let p = self.p(u).expect("non-root has a parent");
            if self.is_root(p) {
                // zig
                if self.is_left_child(u) {
                    self.rotate_right(p);
                } else {
                    self.rotate_left(p);
                }
                continue;
            }

            let g = self.p(p).expect("non-root has a parent");
            match (self.is_left_child(u), self.is_left_child(p)) {
                // zig-zig
                (true, true) => {
                    self.rotate_right(g);
                    self.rotate_right(p);
                }
                (false, false) => {
                    self.rotate_left(g);
                    self.rotate_left(p);
                }
                // zig-zag
                (true, false) => {
                    self.rotate_right(p);
                    self.rotate_left(g);
                }
                (false, true) => {
                    self.rotate_left(p);
                    self.rotate_right(g);
                }
            }
        }
    }
}

// ── tree ─────────────────────────────────────────────────────────────────────

/// Self-adjusting BST. Inserts and removals do not splay.
#[derive(Clone, Debug)]
pub struct SplayTree<V> {
    pub(crate) forest: Forest<BstNode<V>>,
}

impl<V> Default for SplayTree<V> {
    fn default() -> Self {
        Self {
            forest: Forest::default(),
        }
    }
}

impl<V> SplayTree<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn forest(&self) -> &Forest<BstNode<V>> {
        &self.forest
    }
}

impl<V> BinarySearchTree<V> for SplayTree<V> {
    fn insert(&mut self, key: i32, value: V) -> Result<u32, TreeError> {
        if key == NIL_KEY {
            return Err(TreeError::ReservedKey(key));
        }
        Ok(self.forest.insert_unbalanced(key, value))
    }

    fn remove(&mut self, key: i32) -> Result<Option<V>, TreeError> {
        Ok(self.forest.remove_unbalanced(key))
    }

    fn search(&mut self, key: i32) -> Option<SearchHit<'_, V>> {
        let idx = self.forest.search_by_key(key)?;
        self.forest.splay(idx);
        self.forest.hit(idx, key)
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
            .build_perfect(levels, |key, _depth| BstNode::create(key, value_of(key)))
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
