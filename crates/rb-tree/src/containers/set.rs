use std::cmp::Ordering;
use std::fmt;

use crate::config::TreeConfig;
use crate::error::TreeError;
use crate::tree::{DefaultComparator, Keys, RbTree};

/// Ordered set of unique keys.
pub struct TreeSet<K, C = DefaultComparator<K>>
where
    C: Fn(&K, &K) -> Ordering,
{
    tree: RbTree<K, (), C>,
}

impl<K: Ord> TreeSet<K> {
    pub fn new() -> Self {
        Self { tree: RbTree::new() }
    }
}

impl<K: Ord> Default for TreeSet<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, C> TreeSet<K, C>
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

    /// Adds `key`; `false` when an equal key was already present.
    pub fn insert(&mut self, key: K) -> Result<bool, TreeError> {
        self.tree.insert_unique(key, ()).map(|(_, inserted)| inserted)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.tree.contains_key(key)
    }

    /// Stored key equal to `key`.
    pub fn get(&self, key: &K) -> Option<&K> {
        self.tree.get(self.tree.find(key)).map(|(k, _)| k)
    }

    pub fn remove(&mut self, key: &K) -> bool {
        self.tree.erase_unique(key) == 1
    }

    pub fn take(&mut self, key: &K) -> Option<K> {
        let pos = self.tree.find(key);
        (!pos.is_end()).then(|| self.tree.take(pos).0)
    }

    pub fn first(&self) -> Option<&K> {
        self.tree.first().map(|(k, _)| k)
    }

    pub fn last(&self) -> Option<&K> {
        self.tree.last().map(|(k, _)| k)
    }

    pub fn pop_first(&mut self) -> Option<K> {
        let pos = self.tree.begin();
        (!pos.is_end()).then(|| self.tree.take(pos).0)
    }

    pub fn pop_last(&mut self) -> Option<K> {
        let pos = self.tree.prev_pos(self.tree.end());
        (!pos.is_end()).then(|| self.tree.take(pos).0)
    }

    pub fn iter(&self) -> Keys<'_, K, ()> {
        self.tree.keys()
    }

    /// Keys in `[from, to)`.
    pub fn range(&self, from: &K, to: &K) -> impl Iterator<Item = &K> + '_ {
        let first = self.tree.lower_bound(from);
        let last = if self.tree.less(from, to) {
            self.tree.lower_bound(to)
        } else {
            first
        };
        self.tree.range(first, last).map(|(k, _)| k)
    }

    pub fn as_tree(&self) -> &RbTree<K, (), C> {
        &self.tree
    }
}

impl<K, C> Clone for TreeSet<K, C>
where
    K: Clone,
    C: Fn(&K, &K) -> Ordering + Clone,
{
    fn clone(&self) -> Self {
        Self {
            tree: self.tree.clone(),
        }
    }
}

impl<K: PartialEq, C> PartialEq for TreeSet<K, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    fn eq(&self, other: &Self) -> bool {
        self.tree == other.tree
    }
}

impl<K: fmt::Debug, C> fmt::Debug for TreeSet<K, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<K, C> Extend<K> for TreeSet<K, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        self.tree.extend(iter.into_iter().map(|k| (k, ())));
    }
}

impl<K: Ord> FromIterator<K> for TreeSet<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut set = TreeSet::new();
        set.extend(iter);
        set
    }
}

impl<K, C> IntoIterator for TreeSet<K, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    type Item = K;
    type IntoIter = std::iter::Map<crate::tree::IntoIter<K, ()>, fn((K, ())) -> K>;

    fn into_iter(self) -> Self::IntoIter {
        let key: fn((K, ())) -> K = |(k, _)| k;
        self.tree.into_iter().map(key)
    }
}
