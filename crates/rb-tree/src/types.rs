//! Node traits shared by the traversal helpers and the red-black tree.
//!
//! Nodes live in an arena and reference each other by `u32` index. A link
//! set to `None` is an absent child (or, for `p`, the tree header).

/// Structural links of an arena node.
pub trait Node {
    fn p(&self) -> Option<u32>;
    fn l(&self) -> Option<u32>;
    fn r(&self) -> Option<u32>;
    fn set_p(&mut self, v: Option<u32>);
    fn set_l(&mut self, v: Option<u32>);
    fn set_r(&mut self, v: Option<u32>);
}

/// Node carrying a key/value payload.
pub trait KvNode<K, V>: Node {
    fn key(&self) -> &K;
    fn value(&self) -> &V;
    fn value_mut(&mut self) -> &mut V;
}

/// Node with a red/black color bit.
pub trait RbNodeLike: Node {
    fn is_black(&self) -> bool;
    fn set_black(&mut self, black: bool);

    fn is_red(&self) -> bool {
        !self.is_black()
    }
}
