use crate::types::{Node, TreeNode, NIL_KEY};

/// Plain BST node used by the basic and splay trees.
#[derive(Clone, Debug)]
pub struct BstNode<V> {
    pub p: Option<u32>,
    pub l: Option<u32>,
    pub r: Option<u32>,
    pub k: i32,
    pub v: Option<V>,
    pub size: u32,
}

impl<V> BstNode<V> {
    pub fn new(k: i32, v: V) -> Self {
        Self {
            p: None,
            l: None,
            r: None,
            k,
            v: Some(v),
            size: 1,
        }
    }
}

impl<V> Node for BstNode<V> {
    fn p(&self) -> Option<u32> {
        self.p
    }

    fn l(&self) -> Option<u32> {
        self.l
    }

    fn r(&self) -> Option<u32> {
        self.r
    }

    fn set_p(&mut self, v: Option<u32>) {
        self.p = v;
    }

    fn set_l(&mut self, v: Option<u32>) {
        self.l = v;
    }

    fn set_r(&mut self, v: Option<u32>) {
        self.r = v;
    }
}

impl<V> TreeNode for BstNode<V> {
    type Value = V;

    const USES_SENTINELS: bool = false;

    fn create(key: i32, value: V) -> Self {
        Self::new(key, value)
    }

    fn sentinel(_depth: u32) -> Self {
        Self {
            p: None,
            l: None,
            r: None,
            k: NIL_KEY,
            v: None,
            size: 0,
        }
    }

    fn key(&self) -> i32 {
        self.k
    }

    fn set_key(&mut self, key: i32) {
        self.k = key;
    }

    fn value(&self) -> Option<&V> {
        self.v.as_ref()
    }

    fn take_value(&mut self) -> Option<V> {
        self.v.take()
    }

    fn set_value(&mut self, value: Option<V>) {
        self.v = value;
    }

    fn size(&self) -> u32 {
        self.size
    }

    fn set_size(&mut self, size: u32) {
        self.size = size;
    }
}
