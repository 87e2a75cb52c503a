//! Common tree contract and tree-kind configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::bst::BasicBst;
use crate::error::TreeError;
use crate::red_black::RedBlackTree;
use crate::splay::SplayTree;
use crate::stats::TreeStats;
use crate::tango::{RedBlackTango, UnbalancedTango};
use crate::types::{NodeView, SearchHit};

/// Operations every tree family exposes to drivers and visualizers.
pub trait BinarySearchTree<V> {
    /// Inserts `key`, or replaces the value of an existing `key`. Returns the
    /// arena index of the node holding it.
    fn insert(&mut self, key: i32, value: V) -> Result<u32, TreeError>;

    /// Removes `key` and returns its value, or `Ok(None)` if it is absent.
    fn remove(&mut self, key: i32) -> Result<Option<V>, TreeError>;

    /// Looks `key` up. When it is absent the nearest real node on the search
    /// path is reported with `exact == false`. `None` only on an empty tree.
    fn search(&mut self, key: i32) -> Option<SearchHit<'_, V>>;

    fn root(&self) -> Option<u32>;

    fn stats(&self) -> TreeStats;

    fn reset_stats(&mut self);

    /// Replaces the contents with a complete tree over `1..2^levels`.
    fn initialize_perfect_tree(&mut self, levels: u32, value_of: fn(i32) -> V) -> Result<(), TreeError>;

    fn view(&self, idx: u32) -> NodeView;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn keys(&self) -> Vec<i32>;

    fn render(&self) -> String {
        crate::print::render::<V, Self>(self)
    }
}

/// Selects one of the tree families.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TreeKind {
    #[serde(alias = "basic")]
    Basic,
    #[serde(alias = "redBlack", alias = "red_black")]
    RedBlack,
    #[serde(alias = "splay")]
    Splay,
    #[serde(rename = "rbTango", alias = "RedBlackTango")]
    RedBlackTango,
    #[serde(rename = "uTango", alias = "UnbalancedTango")]
    UnbalancedTango,
}

impl TreeKind {
    pub const ALL: [TreeKind; 5] = [
        TreeKind::Basic,
        TreeKind::RedBlack,
        TreeKind::Splay,
        TreeKind::RedBlackTango,
        TreeKind::UnbalancedTango,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TreeKind::Basic => "Basic",
            TreeKind::RedBlack => "RedBlack",
            TreeKind::Splay => "Splay",
            TreeKind::RedBlackTango => "rbTango",
            TreeKind::UnbalancedTango => "uTango",
        }
    }

    /// Tango trees derive their shape from searches only.
    pub fn is_mutable(self) -> bool {
        !matches!(self, TreeKind::RedBlackTango | TreeKind::UnbalancedTango)
    }

    /// Creates an empty tree of this kind.
    pub fn create<V: 'static>(self) -> Box<dyn BinarySearchTree<V>> {
        match self {
            TreeKind::Basic => Box::new(BasicBst::new()),
            TreeKind::RedBlack => Box::new(RedBlackTree::new()),
            TreeKind::Splay => Box::new(SplayTree::new()),
            TreeKind::RedBlackTango => Box::new(RedBlackTango::new()),
            TreeKind::UnbalancedTango => Box::new(UnbalancedTango::new()),
        }
    }
}

impl fmt::Display for TreeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TreeKind {
    type Err = TreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TreeKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| TreeError::UnknownTreeKind(s.to_string()))
    }
}

/// Tree kind plus perfect-tree size, as a driver would read it from config.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeConfig {
    pub kind: TreeKind,
    pub levels: u32,
}

impl TreeConfig {
    pub fn new(kind: TreeKind, levels: u32) -> Self {
        Self { kind, levels }
    }

    /// Creates the configured tree and fills it as a perfect tree.
    pub fn build<V: 'static>(&self, value_of: fn(i32) -> V) -> Result<Box<dyn BinarySearchTree<V>>, TreeError> {
        let mut tree = self.kind.create();
        tree.initialize_perfect_tree(self.levels, value_of)?;
        Ok(tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tree_kind_parses_driver_names() {
        assert_eq!("rbtango".parse::<TreeKind>().unwrap(), TreeKind::RedBlackTango);
        assert_eq!("uTango".parse::<TreeKind>().unwrap(), TreeKind::UnbalancedTango);
        assert_eq!("REDBLACK".parse::<TreeKind>().unwrap(), TreeKind::RedBlack);
        assert!(matches!(
            "avl".parse::<TreeKind>(),
            Err(TreeError::UnknownTreeKind(name)) if name == "avl"
        ));
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for kind in TreeKind::ALL {
            assert_eq!(kind.to_string().parse::<TreeKind>().unwrap(), kind);
        }
    }
}
