use std::cmp::Ordering;
use std::fmt;
use std::mem;

use crate::config::TreeConfig;
use crate::error::TreeError;
use crate::tree::{DefaultComparator, IntoIter, Iter, Keys, RbTree, Values};

/// Ordered map with unique keys.
pub struct TreeMap<K, V, C = DefaultComparator<K>>
where
    C: Fn(&K, &K) -> Ordering,
{
    tree: RbTree<K, V, C>,
}

impl<K: Ord, V> TreeMap<K, V> {
    pub fn new() -> Self {
        Self { tree: RbTree::new() }
    }
}

impl<K: Ord, V> Default for TreeMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C> TreeMap<K, V, C>
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

    /// Sets `key` to `value`. Returns the previous value when the key was
    /// already present; in that case the stored key is kept.
    pub fn insert(&mut self, key: K, value: V) -> Result<Option<V>, TreeError> {
        let pos = self.tree.lower_bound(&key);
        if !pos.is_end() && !self.tree.less(&key, self.tree.key(pos)) {
            return Ok(Some(mem::replace(self.tree.value_mut(pos), value)));
        }
        // `pos` is the element right after `key`, an exact hint.
        self.tree.insert_unique_hint(pos, key, value)?;
        Ok(None)
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.get_key_value(key).map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let pos = self.tree.find(key);
        self.tree.get_mut(pos).map(|(_, v)| v)
    }

    pub fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        self.tree.get(self.tree.find(key))
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.tree.contains_key(key)
    }

    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.remove_entry(key).map(|(_, v)| v)
    }

    pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        let pos = self.tree.find(key);
        (!pos.is_end()).then(|| self.tree.take(pos))
    }

    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.tree.first()
    }

    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.tree.last()
    }

    pub fn pop_first(&mut self) -> Option<(K, V)> {
        let pos = self.tree.begin();
        (!pos.is_end()).then(|| self.tree.take(pos))
    }

    pub fn pop_last(&mut self) -> Option<(K, V)> {
        let pos = self.tree.prev_pos(self.tree.end());
        (!pos.is_end()).then(|| self.tree.take(pos))
    }

    /// Smallest entry whose key is not less than `key`.
    pub fn ceiling(&self, key: &K) -> Option<(&K, &V)> {
        self.tree.get(self.tree.lower_bound(key))
    }

    /// Largest entry whose key is not greater than `key`.
    pub fn floor(&self, key: &K) -> Option<(&K, &V)> {
        let after = self.tree.upper_bound(key);
        if after == self.tree.begin() {
            return None;
        }
        self.tree.get(self.tree.prev_pos(after))
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

    /// Entries with keys in `[from, to)`. Empty when `to` is not greater
    /// than `from`.
    pub fn range(&self, from: &K, to: &K) -> impl Iterator<Item = (&K, &V)> + '_ {
        let first = self.tree.lower_bound(from);
        let last = if self.tree.less(from, to) {
            self.tree.lower_bound(to)
        } else {
            first
        };
        self.tree.range(first, last)
    }

    /// Keeps only the entries for which `f` returns `true`.
    pub fn retain<F: FnMut(&K, &mut V) -> bool>(&mut self, mut f: F) {
        let mut pos = self.tree.begin();
        while let Some((k, v)) = self.tree.get_mut(pos) {
            pos = if f(k, v) {
                self.tree.next_pos(pos)
            } else {
                self.tree.erase(pos)
            };
        }
    }

    /// The underlying tree, for position-level access.
    pub fn as_tree(&self) -> &RbTree<K, V, C> {
        &self.tree
    }
}

impl<K, V, C> Clone for TreeMap<K, V, C>
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

impl<K, V, C> PartialEq for TreeMap<K, V, C>
where
    K: PartialEq,
    V: PartialEq,
    C: Fn(&K, &K) -> Ordering,
{
    fn eq(&self, other: &Self) -> bool {
        self.tree == other.tree
    }
}

impl<K, V, C> fmt::Debug for TreeMap<K, V, C>
where
    K: fmt::Debug,
    V: fmt::Debug,
    C: Fn(&K, &K) -> Ordering,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.tree, f)
    }
}

/// Later pairs overwrite earlier ones with an equal key.
impl<K, V, C> Extend<(K, V)> for TreeMap<K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            if let Err(err) = self.insert(k, v) {
                panic!("failed to extend map: {err}");
            }
        }
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for TreeMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = TreeMap::new();
        map.extend(iter);
        map
    }
}

impl<K, V, C> IntoIterator for TreeMap<K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> IntoIter<K, V> {
        self.tree.into_iter()
    }
}

impl<'a, K, V, C> IntoIterator for &'a TreeMap<K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.tree.iter()
    }
}
