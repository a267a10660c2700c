use std::cmp::Ordering;
use std::fmt;

use crate::config::TreeConfig;
use crate::error::TreeError;
use crate::tree::{DefaultComparator, IntoIter, Iter, Keys, Position, RbTree, Values};

/// Ordered map that keeps every inserted pair. Pairs with equal keys
/// iterate in insertion order.
pub struct TreeMultiMap<K, V, C = DefaultComparator<K>>
where
    C: Fn(&K, &K) -> Ordering,
{
    tree: RbTree<K, V, C>,
}

impl<K: Ord, V> TreeMultiMap<K, V> {
    pub fn new() -> Self {
        Self { tree: RbTree::new() }
    }
}

impl<K: Ord, V> Default for TreeMultiMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C> TreeMultiMap<K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            tree: RbTree::with_comparator(comparator),
        }
    }

    pub fn with_config(comparator: C, config: TreeConfig) -> Self {
        Self {
            tree: RbTree::with_config(comparator, config),
        }
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Adds the pair after any existing pairs with an equal key.
    pub fn insert(&mut self, key: K, value: V) -> Result<Position, TreeError> {
        self.tree.insert_multi(key, value)
    }

    /// Values stored under `key`, oldest first.
    pub fn get_all(&self, key: &K) -> impl Iterator<Item = &V> + '_ {
        let (first, last) = self.tree.equal_range(key);
        self.tree.range(first, last).map(|(_, v)| v)
    }

    /// Oldest value stored under `key`.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.tree.get(self.tree.find(key)).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.tree.contains_key(key)
    }

    pub fn count(&self, key: &K) -> usize {
        self.tree.count(key)
    }

    /// Removes every pair under `key`; returns how many were removed.
    pub fn remove_all(&mut self, key: &K) -> usize {
        self.tree.erase_key(key)
    }

    /// Removes the oldest pair under `key` and returns its value.
    pub fn remove_one(&mut self, key: &K) -> Option<V> {
        let pos = self.tree.find(key);
        (!pos.is_end()).then(|| self.tree.take(pos).1)
    }

    /// Removes the pair at `pos`, returning the position after it.
    pub fn remove_at(&mut self, pos: Position) -> Position {
        self.tree.erase(pos)
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        self.tree.iter()
    }

    pub fn keys(&self) -> Keys<'_, K, V> {
        self.tree.keys()
    }

    pub fn values(&self) -> Values<'_, K, V> {
        self.tree.values()
    }

    /// Pairs with keys in `[from, to)`.
    pub fn range(&self, from: &K, to: &K) -> impl Iterator<Item = (&K, &V)> + '_ {
        let first = self.tree.lower_bound(from);
        let last = if self.tree.less(from, to) {
            self.tree.lower_bound(to)
        } else {
            first
        };
        self.tree.range(first, last)
    }

    pub fn as_tree(&self) -> &RbTree<K, V, C> {
        &self.tree
    }
}

impl<K, V, C> Clone for TreeMultiMap<K, V, C>
where
    K: Clone,
    V: Clone,
    C: Fn(&K, &K) -> Ordering + Clone,
{
    fn clone(&self) -> Self {
        Self {
            tree: self.tree.clone(),
        }
    }
}

impl<K, V, C> PartialEq for TreeMultiMap<K, V, C>
where
    K: PartialEq,
    V: PartialEq,
    C: Fn(&K, &K) -> Ordering,
{
    fn eq(&self, other: &Self) -> bool {
        self.tree == other.tree
    }
}

impl<K, V, C> fmt::Debug for TreeMultiMap<K, V, C>
where
    K: fmt::Debug,
    V: fmt::Debug,
    C: Fn(&K, &K) -> Ordering,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<K, V, C> Extend<(K, V)> for TreeMultiMap<K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        if let Err(err) = self.tree.insert_multi_iter(iter) {
            panic!("failed to extend multimap: {err}");
        }
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for TreeMultiMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = TreeMultiMap::new();
        map.extend(iter);
        map
    }
}

impl<K, V, C> IntoIterator for TreeMultiMap<K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> IntoIter<K, V> {
        self.tree.into_iter()
    }
}
