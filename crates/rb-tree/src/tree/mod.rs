//! Red-black tree container: owns the node store, the header and the
//! comparator, and drives the primitives in [`crate::red_black`].

mod erase;
mod insert;
mod iter;
mod position;
mod search;

use std::cmp::Ordering;
use std::fmt;
use std::mem;

use log::debug;

pub use iter::{IntoIter, Iter, Keys, Range, Values};
pub use position::Position;

use crate::config::TreeConfig;
use crate::error::TreeError;
use crate::print::{print_binary, PrintChild, Printable};
use crate::red_black::{self, Header, RbNode};
use crate::store::NodeStore;
use crate::util::{first, last, next, prev};

pub type DefaultComparator<K> = fn(&K, &K) -> Ordering;

fn default_comparator<K: Ord>(a: &K, b: &K) -> Ordering {
    a.cmp(b)
}

/// Ordered key/value store shared by the map, set, multimap and multiset
/// containers.
///
/// Every element lives in an arena slot addressed by a [`Position`]. The
/// comparator must be a strict weak ordering that does not change for the
/// lifetime of the tree. Keys are inserted either in unique mode (equal keys
/// rejected) or multi mode (equal keys kept in insertion order).
pub struct RbTree<K, V, C = DefaultComparator<K>>
where
    C: Fn(&K, &K) -> Ordering,
{
    store: NodeStore<K, V>,
    header: Header,
    len: usize,
    comparator: C,
    config: TreeConfig,
}

impl<K: Ord, V> RbTree<K, V> {
    pub fn new() -> Self {
        Self::with_comparator(default_comparator::<K>)
    }
}

impl<K: Ord, V> Default for RbTree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C> RbTree<K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    pub fn with_comparator(comparator: C) -> Self {
        Self::with_config(comparator, TreeConfig::default())
    }

    pub fn with_config(comparator: C, config: TreeConfig) -> Self {
        Self {
            store: NodeStore::new(&config),
            header: Header::default(),
            len: 0,
            comparator,
            config,
        }
    }

    #[inline]
    pub(crate) fn less(&self, a: &K, b: &K) -> bool {
        (self.comparator)(a, b) == Ordering::Less
    }

    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Largest number of elements a tree can address.
    pub fn max_size(&self) -> usize {
        u32::MAX as usize
    }

    // --- positions ---

    /// Position of the smallest element, or `end()` when empty.
    pub fn begin(&self) -> Position {
        Position(self.header.leftmost)
    }

    pub fn end(&self) -> Position {
        Position::END
    }

    /// In-order successor of `pos`. Stepping past `end()` is a caller error.
    pub fn next_pos(&self, pos: Position) -> Position {
        Position(next(self.store.arena(), pos.node()))
    }

    /// In-order predecessor of `pos`; the predecessor of `end()` is the
    /// largest element. Stepping before `begin()` is a caller error.
    pub fn prev_pos(&self, pos: Position) -> Position {
        match pos.0 {
            None => Position(self.header.rightmost),
            Some(i) => {
                let p = prev(self.store.arena(), i);
                debug_assert!(p.is_some(), "stepped before the first element");
                Position(p)
            }
        }
    }

    pub fn first(&self) -> Option<(&K, &V)> {
        self.get(self.begin())
    }

    pub fn last(&self) -> Option<(&K, &V)> {
        self.get(Position(self.header.rightmost))
    }

    /// Element at `pos`, `None` for the end position.
    pub fn get(&self, pos: Position) -> Option<(&K, &V)> {
        pos.0.map(|i| {
            let n = self.store.node(i);
            (&n.k, &n.v)
        })
    }

    /// Element at `pos` with a mutable value, `None` for the end position.
    pub fn get_mut(&mut self, pos: Position) -> Option<(&K, &mut V)> {
        pos.0.map(|i| {
            let n = self.store.node_mut(i);
            (&n.k, &mut n.v)
        })
    }

    /// Key at `pos`. Panics on the end position.
    pub fn key(&self, pos: Position) -> &K {
        &self.store.node(pos.node()).k
    }

    /// Value at `pos`. Panics on the end position.
    pub fn value(&self, pos: Position) -> &V {
        &self.store.node(pos.node()).v
    }

    /// Mutable value at `pos`. Keys stay immutable so ordering is preserved.
    pub fn value_mut(&mut self, pos: Position) -> &mut V {
        &mut self.store.node_mut(pos.node()).v
    }

    // --- whole-tree operations ---

    /// Drops every element. No rebalancing happens since the whole
    /// structure is discarded.
    pub fn clear(&mut self) {
        if self.len != 0 {
            debug!("clearing tree with {} nodes", self.len);
        }
        self.store.clear();
        self.header = Header::default();
        self.len = 0;
    }

    /// Exchanges the contents (and comparators) of two trees in O(1).
    pub fn swap(&mut self, other: &mut Self) {
        debug!("swapping trees of {} and {} nodes", self.len, other.len);
        mem::swap(self, other);
    }

    /// Calls `f` on every element in order with mutable access to values.
    pub fn for_each_mut<F: FnMut(&K, &mut V)>(&mut self, mut f: F) {
        let mut curr = self.header.leftmost;
        while let Some(i) = curr {
            let node = self.store.node_mut(i);
            f(&node.k, &mut node.v);
            curr = next(self.store.arena(), i);
        }
    }

    // --- diagnostics ---

    /// Nodes on the longest root-to-leaf path.
    pub fn height(&self) -> usize {
        red_black::height(self.store.arena(), self.header.root)
    }

    pub fn black_height(&self) -> usize {
        red_black::black_height(self.store.arena(), self.header.root)
    }

    /// Checks every structural invariant, including that the size counter
    /// matches the reachable node count.
    pub fn validate(&self) -> Result<(), String> {
        let count = red_black::validate(self.store.arena(), &self.header, |a: &K, b: &K| {
            self.less(a, b)
        })?;
        if count != self.len {
            return Err(format!("size counter {} but {count} reachable nodes", self.len));
        }
        if self.store.len() != self.len {
            return Err(format!(
                "size counter {} but {} live nodes in the store",
                self.len,
                self.store.len()
            ));
        }
        Ok(())
    }

    // --- cloning ---

    /// Structural copy preserving shape and colors. Fails without side
    /// effects if the node store cannot hold the copy.
    pub fn try_clone(&self) -> Result<Self, TreeError>
    where
        K: Clone,
        V: Clone,
        C: Clone,
    {
        let config = self.config.with_initial_capacity(self.len);
        let mut out = Self::with_config(self.comparator.clone(), config);
        self.copy_into(&mut out)?;
        out.config = self.config;
        Ok(out)
    }

    /// Iterative pre-order copy of this tree into the empty tree `out`.
    fn copy_into(&self, out: &mut Self) -> Result<(), TreeError>
    where
        K: Clone,
        V: Clone,
    {
        let Some(root) = self.header.root else {
            return Ok(());
        };

        // (source node, destination parent, attach as left child)
        let mut stack = vec![(root, None, false)];
        while let Some((src, parent, left)) = stack.pop() {
            let n = self.store.node(src);
            let mut node = RbNode::new(n.k.clone(), n.v.clone());
            node.b = n.b;
            node.p = parent;
            let dst = out.store.alloc(node)?;

            match parent {
                None => out.header.root = Some(dst),
                Some(p) if left => out.store.node_mut(p).l = Some(dst),
                Some(p) => out.store.node_mut(p).r = Some(dst),
            }

            if let Some(r) = n.r {
                stack.push((r, Some(dst), false));
            }
            if let Some(l) = n.l {
                stack.push((l, Some(dst), true));
            }
        }

        out.header.leftmost = first(out.store.arena(), out.header.root);
        out.header.rightmost = last(out.store.arena(), out.header.root);
        out.len = self.len;
        Ok(())
    }
}

impl<K, V, C> Clone for RbTree<K, V, C>
where
    K: Clone,
    V: Clone,
    C: Fn(&K, &K) -> Ordering + Clone,
{
    fn clone(&self) -> Self {
        self.try_clone()
            .unwrap_or_else(|err| panic!("failed to clone tree: {err}"))
    }
}

impl<K, V, C> PartialEq for RbTree<K, V, C>
where
    K: PartialEq,
    V: PartialEq,
    C: Fn(&K, &K) -> Ordering,
{
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<K, V, C> Eq for RbTree<K, V, C>
where
    K: Eq,
    V: Eq,
    C: Fn(&K, &K) -> Ordering,
{
}

impl<K, V, C> PartialOrd for RbTree<K, V, C>
where
    K: PartialOrd,
    V: PartialOrd,
    C: Fn(&K, &K) -> Ordering,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<K, V, C> Ord for RbTree<K, V, C>
where
    K: Ord,
    V: Ord,
    C: Fn(&K, &K) -> Ordering,
{
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<K, V, C> fmt::Debug for RbTree<K, V, C>
where
    K: fmt::Debug,
    V: fmt::Debug,
    C: Fn(&K, &K) -> Ordering,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

fn print_subtree<K, V>(store: &NodeStore<K, V>, idx: u32, tab: &str) -> String
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    let n = store.node(idx);
    let color = if n.b { "b" } else { "r" };
    let left = n.l.map(|l| move |tab: &str| print_subtree(store, l, tab));
    let right = n.r.map(|r| move |tab: &str| print_subtree(store, r, tab));
    let children = print_binary(
        Some(tab),
        [
            left.as_ref().map(|f| f as &PrintChild<'_>),
            right.as_ref().map(|f| f as &PrintChild<'_>),
        ],
    );
    format!("{color} {:?} = {:?}{children}", n.k, n.v)
}

impl<K, V, C> Printable for RbTree<K, V, C>
where
    K: fmt::Debug,
    V: fmt::Debug,
    C: Fn(&K, &K) -> Ordering,
{
    fn to_string_with_tab(&self, tab: Option<&str>) -> String {
        let tab = tab.unwrap_or("");
        let body = match self.header.root {
            Some(root) => print_subtree(&self.store, root, tab),
            None => "∅".to_string(),
        };
        format!("RbTree(len={})\n{tab}{body}", self.len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_of(keys: &[i32]) -> RbTree<i32, i32> {
        let mut tree = RbTree::new();
        for &k in keys {
            tree.insert_unique(k, k * 10).unwrap();
        }
        tree
    }

    #[test]
    fn capacity_overflow_is_rejected_before_mutation() {
        let mut tree = tree_of(&[1, 2, 3]);
        let real_len = tree.len;
        tree.len = tree.max_size();

        assert_eq!(
            tree.insert_multi(4, 40),
            Err(TreeError::CapacityOverflow { max: u32::MAX as usize })
        );
        assert_eq!(
            tree.insert_unique_hint(tree.end(), 5, 50),
            Err(TreeError::CapacityOverflow { max: u32::MAX as usize })
        );
        // Duplicates are answered before any capacity check.
        assert_eq!(tree.insert_unique(2, 0).map(|(_, ok)| ok), Ok(false));

        tree.len = real_len;
        assert_eq!(tree.len(), 3);
        tree.validate().unwrap();
    }

    #[test]
    fn prev_of_end_is_the_maximum() {
        let tree = tree_of(&[5, 1, 9]);
        assert_eq!(*tree.key(tree.prev_pos(tree.end())), 9);
        assert_eq!(tree.prev_pos(RbTree::<i32, i32>::new().end()), Position::END);
    }

    #[test]
    fn clone_preserves_shape_and_colors() {
        let mut tree = tree_of(&[8, 4, 12, 2, 6, 10, 14, 1, 3]);
        tree.erase_unique(&12);
        let copy = tree.clone();

        assert_eq!(copy, tree);
        assert_eq!(
            copy.to_string_with_tab(None),
            tree.to_string_with_tab(None)
        );
        copy.validate().unwrap();
    }

    #[test]
    fn try_clone_respects_node_limit() {
        let mut tree =
            RbTree::with_config(default_comparator::<i32>, TreeConfig::new().with_node_limit(4));
        for k in 0..4 {
            tree.insert_unique(k, ()).unwrap();
        }
        let copy = tree.try_clone().unwrap();
        assert_eq!(copy.len(), 4);
        assert_eq!(copy.config().node_limit, Some(4));
    }

    #[test]
    fn print_marks_colors() {
        let tree = tree_of(&[2, 1, 3]);
        assert_eq!(
            tree.to_string_with_tab(None),
            "RbTree(len=3)\nb 2 = 20\n← r 1 = 10\n→ r 3 = 30"
        );
        assert_eq!(
            RbTree::<i32, ()>::new().to_string_with_tab(None),
            "RbTree(len=0)\n∅"
        );
    }

    #[test]
    fn debug_prints_as_map() {
        let tree = tree_of(&[2, 1]);
        assert_eq!(format!("{tree:?}"), "{1: 10, 2: 20}");
    }

    #[test]
    fn for_each_mut_visits_in_order() {
        let mut tree = tree_of(&[3, 1, 2]);
        let mut seen = Vec::new();
        tree.for_each_mut(|k, v| {
            seen.push(*k);
            *v += 1;
        });
        assert_eq!(seen, vec![1, 2, 3]);
        assert_eq!(tree.values().copied().collect::<Vec<_>>(), vec![11, 21, 31]);
    }
}
