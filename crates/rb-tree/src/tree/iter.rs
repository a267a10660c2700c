use std::cmp::Ordering;
use std::iter::FusedIterator;

use crate::store::NodeStore;
use crate::util::{next, prev};

use super::{Position, RbTree};

impl<K, V, C> RbTree<K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    /// In-order iterator over `(key, value)` pairs.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            store: &self.store,
            front: self.header.leftmost,
            back: self.header.rightmost,
            remaining: self.len,
        }
    }

    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Elements in `[first, last)`. `last` must not come before `first`.
    pub fn range(&self, first: Position, last: Position) -> Range<'_, K, V> {
        Range {
            store: &self.store,
            front: first.0,
            end: last.0,
        }
    }
}

pub struct Iter<'a, K, V> {
    store: &'a NodeStore<K, V>,
    front: Option<u32>,
    back: Option<u32>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let i = self.front?;
        self.front = next(self.store.arena(), i);
        self.remaining -= 1;
        let n = self.store.node(i);
        Some((&n.k, &n.v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let i = self.back?;
        self.back = prev(self.store.arena(), i);
        self.remaining -= 1;
        let n = self.store.node(i);
        Some((&n.k, &n.v))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            store: self.store,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Keys<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, _)| k)
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Values<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}

/// Walk over a half-open span of positions.
pub struct Range<'a, K, V> {
    store: &'a NodeStore<K, V>,
    front: Option<u32>,
    end: Option<u32>,
}

impl<'a, K, V> Iterator for Range<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.end {
            return None;
        }
        let i = self.front?;
        self.front = next(self.store.arena(), i);
        let n = self.store.node(i);
        Some((&n.k, &n.v))
    }
}

impl<K, V> FusedIterator for Range<'_, K, V> {}

/// Owning in-order iterator. Nodes are moved out of the store one at a
/// time; whatever is left is dropped with the iterator.
pub struct IntoIter<K, V> {
    store: NodeStore<K, V>,
    order: std::vec::IntoIter<u32>,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<(K, V)> {
        let i = self.order.next()?;
        let n = self.store.free(i);
        Some((n.k, n.v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.order.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<(K, V)> {
        let i = self.order.next_back()?;
        let n = self.store.free(i);
        Some((n.k, n.v))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

impl<K, V, C> IntoIterator for RbTree<K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> IntoIter<K, V> {
        let mut order = Vec::with_capacity(self.len);
        let mut curr = self.header.leftmost;
        while let Some(i) = curr {
            order.push(i);
            curr = next(self.store.arena(), i);
        }
        IntoIter {
            store: self.store,
            order: order.into_iter(),
        }
    }
}

impl<'a, K, V, C> IntoIterator for &'a RbTree<K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::RbTree;

    fn sample() -> RbTree<i32, char> {
        [(5, 'e'), (3, 'c'), (8, 'h'), (1, 'a'), (4, 'd'), (7, 'g'), (9, 'i')]
            .into_iter()
            .collect()
    }

    #[test]
    fn iterates_in_key_order_both_ways() {
        let tree = sample();
        let fwd: Vec<_> = tree.keys().copied().collect();
        assert_eq!(fwd, vec![1, 3, 4, 5, 7, 8, 9]);
        let back: Vec<_> = tree.keys().rev().copied().collect();
        assert_eq!(back, vec![9, 8, 7, 5, 4, 3, 1]);
        assert_eq!(tree.iter().len(), 7);
    }

    #[test]
    fn front_and_back_meet_once() {
        let tree = sample();
        let mut it = tree.values();
        assert_eq!(it.next(), Some(&'a'));
        assert_eq!(it.next_back(), Some(&'i'));
        assert_eq!(it.len(), 5);
        let rest: String = it.copied().collect();
        assert_eq!(rest, "cdegh");
    }

    #[test]
    fn range_stops_before_last() {
        let tree = sample();
        let got: Vec<_> = tree
            .range(tree.lower_bound(&3), tree.upper_bound(&7))
            .map(|(k, _)| *k)
            .collect();
        assert_eq!(got, vec![3, 4, 5, 7]);
        assert_eq!(tree.range(tree.find(&4), tree.find(&4)).count(), 0);
        assert_eq!(tree.range(tree.find(&8), tree.end()).count(), 2);
    }

    #[test]
    fn into_iter_yields_owned_pairs() {
        let tree = sample();
        let pairs: Vec<_> = tree.into_iter().collect();
        assert_eq!(pairs.len(), 7);
        assert_eq!(pairs[0], (1, 'a'));
        assert_eq!(pairs[6], (9, 'i'));

        let mut it = sample().into_iter();
        assert_eq!(it.next_back(), Some((9, 'i')));
        assert_eq!(it.len(), 6);
    }
}
