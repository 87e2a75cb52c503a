//! Binary search tree family built around Tango trees.
//!
//! All trees store `i32` keys with arbitrary values in an arena of nodes
//! owned by a [`Forest`]. Every "pointer" is an `Option<u32>` index into
//! that arena, so parent back-references never form ownership cycles.
//!
//! Navigation and rotation live in the shared [`Forest`] and are aware of
//! Tango aux trees: a marked child counts as absent and a marked node counts
//! as a root. Families that never mark a node get ordinary BST behavior from
//! the same code.
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! [`types`] | [`Node`] and [`TreeNode`] traits, [`NodeView`], [`SearchHit`] |
//! [`bst`] | [`Forest`] base adaptor, [`BasicBst`] |
//! [`red_black`] | insert/delete fix-up engine, [`RedBlackTree`] |
//! [`splay`] | splay-to-root, [`SplayTree`] |
//! [`tango`] | cut/join search, [`AuxStrategy`], [`RedBlackTango`], [`UnbalancedTango`] |
//! [`tree`] | [`BinarySearchTree`] contract, [`TreeKind`], [`TreeConfig`] |
//! [`validate`] | invariant checks used by tests and debugging |
//! [`print`] | tree-dump rendering |

pub mod bst;
pub mod error;
pub mod print;
pub mod red_black;
pub mod splay;
pub mod stats;
pub mod tango;
pub mod tree;
pub mod types;
pub mod validate;

pub use bst::{BasicBst, BstNode, Forest};
pub use error::{TreeError, MAX_LEVELS};
pub use red_black::{RbNode, RedBlackTree};
pub use splay::SplayTree;
pub use stats::TreeStats;
pub use tango::{AuxStrategy, RedBlackAux, RedBlackTango, TangoNode, TangoTree, UnbalancedAux, UnbalancedTango};
pub use tree::{BinarySearchTree, TreeConfig, TreeKind};
pub use types::{Color, Node, NodeView, RbNodeLike, SearchHit, TreeNode, NIL_KEY};
