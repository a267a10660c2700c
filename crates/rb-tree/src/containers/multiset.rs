use std::cmp::Ordering;
use std::fmt;

use crate::config::TreeConfig;
use crate::error::TreeError;
use crate::tree::{DefaultComparator, Keys, RbTree};

/// Ordered bag of keys; equal keys are all kept.
pub struct TreeMultiSet<K, C = DefaultComparator<K>>
where
    C: Fn(&K, &K) -> Ordering,
{
    tree: RbTree<K, (), C>,
}

impl<K: Ord> TreeMultiSet<K> {
    pub fn new() -> Self {
        Self { tree: RbTree::new() }
    }
}

impl<K: Ord> Default for TreeMultiSet<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, C> TreeMultiSet<K, C>
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

    pub fn insert(&mut self, key: K) -> Result<(), TreeError> {
        self.tree.insert_multi(key, ()).map(|_| ())
    }

    pub fn contains(&self, key: &K) -> bool {
        self.tree.contains_key(key)
    }

    pub fn count(&self, key: &K) -> usize {
        self.tree.count(key)
    }

    /// Removes one occurrence of `key`.
    pub fn remove_one(&mut self, key: &K) -> bool {
        let pos = self.tree.find(key);
        if pos.is_end() {
            return false;
        }
        self.tree.erase(pos);
        true
    }

    /// Removes every occurrence of `key`; returns how many there were.
    pub fn remove_all(&mut self, key: &K) -> usize {
        self.tree.erase_key(key)
    }

    pub fn first(&self) -> Option<&K> {
        self.tree.first().map(|(k, _)| k)
    }

    pub fn last(&self) -> Option<&K> {
        self.tree.last().map(|(k, _)| k)
    }

    pub fn iter(&self) -> Keys<'_, K, ()> {
        self.tree.keys()
    }

    /// Keys in `[from, to)`, duplicates included.
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

impl<K, C> Clone for TreeMultiSet<K, C>
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

impl<K: PartialEq, C> PartialEq for TreeMultiSet<K, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    fn eq(&self, other: &Self) -> bool {
        self.tree == other.tree
    }
}

impl<K: fmt::Debug, C> fmt::Debug for TreeMultiSet<K, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<K, C> Extend<K> for TreeMultiSet<K, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        if let Err(err) = self.tree.insert_multi_iter(iter.into_iter().map(|k| (k, ()))) {
            panic!("failed to extend multiset: {err}");
        }
    }
}

impl<K: Ord> FromIterator<K> for TreeMultiSet<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut set = TreeMultiSet::new();
        set.extend(iter);
        set
    }
}
