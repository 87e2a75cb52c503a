use crate::types::{Color, Node, RbNodeLike, TreeNode, NIL_KEY};

/// Tango node. `depth` is the node's depth in the reference tree and never
/// changes; `min_depth`/`max_depth` summarize the node's aux subtree.
///
/// Color and black height are only consulted by the red-black strategy.
#[derive(Clone, Debug)]
pub struct TangoNode<V> {
    pub p: Option<u32>,
    pub l: Option<u32>,
    pub r: Option<u32>,
    pub k: i32,
    pub v: Option<V>,
    pub size: u32,
    /// Root of an aux tree.
    pub marked: bool,
    pub depth: u32,
    pub min_depth: u32,
    pub max_depth: u32,
    /// Node color: `true` = black, `false` = red.
    pub b: bool,
    /// Black height within the aux tree, kept by the red-black strategy only.
    pub bh: u32,
}

impl<V> TangoNode<V> {
    /// A singleton preferred path at `depth`, as the perfect-tree builder
    /// lays them out.
    pub fn new(k: i32, v: V, depth: u32) -> Self {
        Self {
            p: None,
            l: None,
            r: None,
            k,
            v: Some(v),
            size: 1,
            marked: true,
            depth,
            min_depth: depth,
            max_depth: depth,
            b: true,
            bh: 2,
        }
    }
}

/// Recomputes `min_depth`/`max_depth` of `idx` from its aux-tree children.
pub(crate) fn update_min_max<V>(arena: &mut [TangoNode<V>], idx: u32) {
    let node = &arena[idx as usize];
    if node.is_sentinel() {
        return;
    }
    let (mut min, mut max) = (node.depth, node.depth);
    for child in [node.l, node.r].into_iter().flatten() {
        let c = &arena[child as usize];
        if c.marked || c.is_sentinel() {
            continue;
        }
        min = min.min(c.min_depth);
        max = max.max(c.max_depth);
    }
    let node = &mut arena[idx as usize];
    node.min_depth = min;
    node.max_depth = max;
}

impl<V> Node for TangoNode<V> {
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

impl<V> TreeNode for TangoNode<V> {
    type Value = V;

    const USES_SENTINELS: bool = true;

    /// Tango trees are only ever built as perfect trees; `create` exists
    /// for the shared construction paths and yields a root-depth node.
    fn create(key: i32, value: V) -> Self {
        Self::new(key, value, 0)
    }

    fn sentinel(depth: u32) -> Self {
        Self {
            p: None,
            l: None,
            r: None,
            k: NIL_KEY,
            v: None,
            size: 0,
            marked: false,
            depth,
            min_depth: depth,
            max_depth: depth,
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

    fn is_marked(&self) -> bool {
        self.marked
    }

    fn set_marked(&mut self, marked: bool) {
        self.marked = marked;
    }

    fn color(&self) -> Option<Color> {
        Some(self.color_of())
    }

    fn depth(&self) -> Option<u32> {
        Some(self.depth)
    }

    fn refresh(arena: &mut [Self], idx: u32) {
        update_min_max(arena, idx);
    }
}

impl<V> RbNodeLike for TangoNode<V> {
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
