use crate::types::{KvNode, Node, RbNodeLike};

/// Red-black tree node.
#[derive(Clone, Debug)]
pub struct RbNode<K, V> {
    pub p: Option<u32>,
    pub l: Option<u32>,
    pub r: Option<u32>,
    pub k: K,
    pub v: V,
    /// `false` = red, `true` = black.
    pub b: bool,
}

impl<K, V> RbNode<K, V> {
    /// New detached node. Nodes enter the tree red.
    pub fn new(k: K, v: V) -> Self {
        Self {
            p: None,
            l: None,
            r: None,
            k,
            v,
            b: false,
        }
    }
}

impl<K, V> Node for RbNode<K, V> {
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

impl<K, V> KvNode<K, V> for RbNode<K, V> {
    fn key(&self) -> &K {
        &self.k
    }

    fn value(&self) -> &V {
        &self.v
    }

    fn value_mut(&mut self) -> &mut V {
        &mut self.v
    }
}

impl<K, V> RbNodeLike for RbNode<K, V> {
    fn is_black(&self) -> bool {
        self.b
    }

    fn set_black(&mut self, black: bool) {
        self.b = black;
    }
}
