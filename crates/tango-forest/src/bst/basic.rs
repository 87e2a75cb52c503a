use super::{BstNode, Forest};
use crate::error::TreeError;
use crate::stats::TreeStats;
use crate::tree::BinarySearchTree;
use crate::types::{NodeView, SearchHit, NIL_KEY};

/// Unbalanced binary search tree. Shape depends entirely on insertion order.
#[derive(Clone, Debug)]
pub struct BasicBst<V> {
    pub(crate) forest: Forest<BstNode<V>>,
}

impl<V> Default for BasicBst<V> {
    fn default() -> Self {
        Self {
            forest: Forest::default(),
        }
    }
}

impl<V> BasicBst<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn forest(&self) -> &Forest<BstNode<V>> {
        &self.forest
    }
}

impl<V> BinarySearchTree<V> for BasicBst<V> {
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
            .build_perfect(levels, |key, _depth| BstNode::new(key, value_of(key)))
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
