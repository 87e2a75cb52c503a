use std::fmt;

use serde::Serialize;

/// Lifetime counters of a tree instance.
///
/// `stats()` hands out copies, so a snapshot never changes after it is taken.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TreeStats {
    pub rotations: u64,
    /// Nodes visited by key-directed descents.
    pub traversals: u64,
    /// Steps taken by predecessor/successor, min/max and other bookkeeping walks.
    pub other_traversals: u64,
}

impl TreeStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inc_rotations(&mut self) {
        self.rotations += 1;
    }

    pub fn inc_traversals(&mut self) {
        self.traversals += 1;
    }

    pub fn inc_other_traversals(&mut self) {
        self.other_traversals += 1;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl fmt::Display for TreeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TreeStats: rot={},trav={},otrav={}",
            self.rotations, self.traversals, self.other_traversals
        )
    }
}
