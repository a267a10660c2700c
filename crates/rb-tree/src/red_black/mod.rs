//! Red-black tree primitives over an index arena.
//!
//! The functions here are generic over [`RbNodeLike`] so they can be driven
//! by the tree's node store or by a plain `Vec` of nodes in tests. The
//! tree header (root plus cached extremes) is a plain struct rather than an
//! allocated sentinel node; a `None` parent link means "child of the header".

mod insert;
mod node;
mod remove;
mod rotate;
mod util;

pub use insert::{insert_rebalance, link};
pub use node::RbNode;
pub use remove::remove;
pub use rotate::{rotate_left, rotate_right};
pub use util::{black_height, height, validate};

use crate::types::RbNodeLike;

/// Tree anchor: the root and cached minimum/maximum nodes. All three are
/// `None` exactly when the tree is empty.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Header {
    pub root: Option<u32>,
    pub leftmost: Option<u32>,
    pub rightmost: Option<u32>,
}

/// Absent links count as black.
#[inline]
pub(crate) fn is_red<N: RbNodeLike>(arena: &[N], node: Option<u32>) -> bool {
    node.is_some_and(|i| arena[i as usize].is_red())
}
