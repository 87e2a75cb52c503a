use crate::bst::Forest;
use crate::error::TreeError;
use crate::stats::TreeStats;
use crate::tree::BinarySearchTree;
use crate::types::{NodeView, SearchHit, TreeNode, NIL_KEY};

use super::RbNode;

/// Standalone red-black tree with explicit sentinel leaves.
#[derive(Clone, Debug)]
pub struct RedBlackTree<V> {
    pub(crate) forest: Forest<RbNode<V>>,
}

impl<V> Default for RedBlackTree<V> {
    fn default() -> Self {
        let mut forest = Forest::new();
        let nil = forest.alloc(RbNode::sentinel(0));
        forest.root = Some(nil);
        Self { forest }
    }
}

impl<V> RedBlackTree<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn forest(&self) -> &Forest<RbNode<V>> {
        &self.forest
    }

    /// Tracked black height of the root, sentinel level included.
    pub fn black_height(&self) -> u32 {
        self.forest.root.map(|r| self.forest.black_height(r)).unwrap_or(1)
    }
}

impl<V> BinarySearchTree<V> for RedBlackTree<V> {
    fn insert(&mut self, key: i32, value: V) -> Result<u32, TreeError> {
        if key == NIL_KEY {
            return Err(TreeError::ReservedKey(key));
        }
        Ok(self.forest.insert_rb(key, value))
    }

    fn remove(&mut self, key: i32) -> Result<Option<V>, TreeError> {
        Ok(self.forest.remove_rb(key))
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
        // All black: a node at `depth` sees `levels - depth` black nodes
        // down to the sentinel level, itself included.
        self.forest.build_perfect(levels, |key, depth| {
            let mut node = RbNode::new(key, value_of(key));
            node.b = true;
            node.bh = levels - depth + 1;
            node
        })
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

    #[test]
    fn empty_tree_has_a_sentinel_root() {
        let mut tree = RedBlackTree::<i32>::new();
        assert_eq!(tree.root(), None);
        assert_eq!(tree.black_height(), 1);
        assert!(tree.search(5).is_none());
        assert_eq!(tree.remove(5).unwrap(), None);
    }

    #[test]
    fn perfect_tree_tracks_black_height() {
        let mut tree = RedBlackTree::new();
        tree.initialize_perfect_tree(4, |k| k).unwrap();
        assert_eq!(tree.black_height(), 5);
        assert_eq!(tree.len(), 15);
    }

    #[test]
    fn removing_last_key_restores_empty_tree() {
        let mut tree = RedBlackTree::new();
        tree.insert(1, "one").unwrap();
        assert_eq!(tree.remove(1).unwrap(), Some("one"));
        assert!(tree.is_empty());
        assert_eq!(tree.root(), None);
        tree.insert(2, "two").unwrap();
        assert_eq!(tree.keys(), vec![2]);
    }

    #[test]
    fn every_node_tracks_exact_black_height() {
        use crate::validate::check_red_black;

        let mut tree = RedBlackTree::new();
        tree.initialize_perfect_tree(3, |k| k).unwrap();
        check_red_black(tree.forest()).unwrap();

        for k in 8..=64 {
            tree.insert(k, k).unwrap();
            if let Err(err) = check_red_black(tree.forest()) {
                panic!("after insert({k}): {err}");
            }
        }
        for k in (1..=64).filter(|k| k % 3 != 0) {
            assert_eq!(tree.remove(k).unwrap(), Some(k));
            if let Err(err) = check_red_black(tree.forest()) {
                panic!("after remove({k}): {err}");
            }
        }
        assert_eq!(tree.keys(), (3..=63).step_by(3).collect::<Vec<_>>());
    }
}
