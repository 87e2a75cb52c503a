use crate::types::{Color, Node, RbNodeLike, TreeNode, NIL_KEY};

/// Red-black node. Leaves are explicit black sentinels with `bh == 1`.
#[derive(Clone, Debug)]
pub struct RbNode<V> {
    pub p: Option<u32>,
    pub l: Option<u32>,
    pub r: Option<u32>,
    pub k: i32,
    pub v: Option<V>,
    pub size: u32,
    /// Node color: `true` = black, `false` = red.
    pub b: bool,
    /// Black height, self and the sentinel included.
    pub bh: u32,
}

impl<V> RbNode<V> {
    /// A fresh red node, as inserted before fix-up.
    pub fn new(k: i32, v: V) -> Self {
        Self {
            p: None,
            l: None,
            r: None,
            k,
            v: Some(v),
            size: 1,
            b: false,
            bh: 1,
        }
    }
}

impl<V> Node for RbNode<V> {
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

impl<V> TreeNode for RbNode<V> {
    type Value = V;

    const USES_SENTINELS: bool = true;

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
            b: true,
            bh: 1,
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

    fn color(&self) -> Option<Color> {
        Some(self.color_of())
    }
}

impl<V> RbNodeLike for RbNode<V> {
    fn color_of(&self) -> Color {
        if self.b {
            Color::Black
        } else {
            Color::Red
        }
    }

    fn set_color(&mut self, color: Color) {
        self.b = color == Color::Black;
    }

    fn black_height(&self) -> u32 {
        self.bh
    }

    fn set_black_height(&mut self, bh: u32) {
        self.bh = bh;
    }
}
