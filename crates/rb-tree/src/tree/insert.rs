use std::cmp::Ordering;

use log::{debug, trace};

use crate::error::TreeError;
use crate::red_black::{self, RbNode};

use super::search::InsertPos;
use super::{Position, RbTree};

impl<K, V, C> RbTree<K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    /// Allocates a node for `(k, v)` and links it under `parent`. Every
    /// check that can fail runs before the tree is touched, so an error
    /// leaves it as it was.
    fn attach(&mut self, (parent, add_to_left): InsertPos, k: K, v: V) -> Result<Position, TreeError> {
        if self.len >= self.max_size() {
            return Err(TreeError::CapacityOverflow {
                max: self.max_size(),
            });
        }
        self.store.reserve_one()?;
        let x = self.store.insert(RbNode::new(k, v));
        red_black::link(self.store.arena_mut(), &mut self.header, x, parent, add_to_left);
        self.len += 1;
        trace!("linked node {x} under {parent:?} (left: {add_to_left})");
        Ok(Position(Some(x)))
    }

    /// Inserts `(k, v)` unless an equal key is present. Returns the position
    /// of the element with that key and whether it was newly inserted. A
    /// rejected pair is dropped.
    pub fn insert_unique(&mut self, k: K, v: V) -> Result<(Position, bool), TreeError> {
        match self.insert_unique_pos(&k) {
            Ok(at) => Ok((self.attach(at, k, v)?, true)),
            Err(dup) => Ok((Position(Some(dup)), false)),
        }
    }

    /// Inserts `(k, v)` after every element with an equal key.
    pub fn insert_multi(&mut self, k: K, v: V) -> Result<Position, TreeError> {
        let at = self.insert_multi_pos(&k);
        self.attach(at, k, v)
    }

    /// Unique insertion near `hint`. A good hint (the element right after
    /// where `k` belongs, or `end()` for a new maximum) makes the lookup
    /// O(1); a bad one costs a normal descent. When `k` is already present
    /// its position is returned and the pair is dropped.
    pub fn insert_unique_hint(&mut self, hint: Position, k: K, v: V) -> Result<Position, TreeError> {
        match self.hint_unique_pos(hint, &k) {
            Ok(at) => self.attach(at, k, v),
            Err(dup) => Ok(Position(Some(dup))),
        }
    }

    /// Multi insertion near `hint`. The new element always lands after
    /// every element with an equal key; a hint equal to `k` is answered by
    /// a normal descent.
    pub fn insert_multi_hint(&mut self, hint: Position, k: K, v: V) -> Result<Position, TreeError> {
        let at = self.hint_multi_pos(hint, &k);
        self.attach(at, k, v)
    }

    /// Unique-inserts every pair, using `end()` as the hint so sorted input
    /// runs in linear time. On error every pair this call inserted is
    /// removed again and the tree is back in its pre-call state.
    pub fn insert_unique_iter<I>(&mut self, iter: I) -> Result<(), TreeError>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        self.insert_batch(iter, |tree, k, v| match tree.hint_unique_pos(Position::END, &k) {
            Ok(at) => tree.attach(at, k, v).map(Some),
            Err(_) => Ok(None),
        })
    }

    /// Multi-inserts every pair, hinted at `end()`. Rolls back like
    /// [`RbTree::insert_unique_iter`].
    pub fn insert_multi_iter<I>(&mut self, iter: I) -> Result<(), TreeError>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        self.insert_batch(iter, |tree, k, v| {
            tree.insert_multi_hint(Position::END, k, v).map(Some)
        })
    }

    fn insert_batch<I, F>(&mut self, iter: I, mut insert_one: F) -> Result<(), TreeError>
    where
        I: IntoIterator<Item = (K, V)>,
        F: FnMut(&mut Self, K, V) -> Result<Option<Position>, TreeError>,
    {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        if self.len.saturating_add(lower) > self.max_size() {
            return Err(TreeError::CapacityOverflow {
                max: self.max_size(),
            });
        }

        let mut added = Vec::new();
        for (k, v) in iter {
            match insert_one(self, k, v) {
                Ok(Some(pos)) => added.push(pos),
                Ok(None) => {}
                Err(err) => {
                    debug!("bulk insert failed after {} pairs, rolling back: {err}", added.len());
                    for pos in added.into_iter().rev() {
                        self.erase(pos);
                    }
                    return Err(err);
                }
            }
        }
        Ok(())
    }
}

/// Unique insertion of every pair. Panics if the node store refuses a node.
impl<K, V, C> Extend<(K, V)> for RbTree<K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        if let Err(err) = self.insert_unique_iter(iter) {
            panic!("failed to extend tree: {err}");
        }
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for RbTree<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = RbTree::new();
        tree.extend(iter);
        tree
    }
}

#[cfg(test)]
mod tests {
    use crate::{RbTree, TreeConfig, TreeError};

    #[test]
    fn unique_rejects_duplicates_and_keeps_first_value() {
        let mut tree = RbTree::new();
        let (a, inserted) = tree.insert_unique(1, "one").unwrap();
        assert!(inserted);
        let (b, inserted) = tree.insert_unique(1, "uno").unwrap();
        assert!(!inserted);
        assert_eq!(a, b);
        assert_eq!(*tree.value(a), "one");
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn multi_keeps_equal_keys_in_insertion_order() {
        let mut tree = RbTree::new();
        for (i, k) in [2, 2, 2, 1, 3].into_iter().enumerate() {
            tree.insert_multi(k, i).unwrap();
        }
        let got: Vec<_> = tree.iter().map(|(k, v)| (*k, *v)).collect();
        assert_eq!(got, vec![(1, 3), (2, 0), (2, 1), (2, 2), (3, 4)]);
        tree.validate().unwrap();
    }

    #[test]
    fn hinted_duplicate_returns_existing_position() {
        let mut tree = RbTree::new();
        tree.insert_unique_iter([(1, 'a'), (2, 'b'), (3, 'c')]).unwrap();
        let existing = tree.find(&2);
        assert_eq!(tree.insert_unique_hint(tree.begin(), 2, 'z').unwrap(), existing);
        assert_eq!(tree.insert_unique_hint(tree.end(), 2, 'z').unwrap(), existing);
        assert_eq!(*tree.value(existing), 'b');
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn failed_allocation_leaves_tree_untouched() {
        let config = TreeConfig::new().with_node_limit(2);
        let mut tree = RbTree::with_config(|a: &i32, b: &i32| a.cmp(b), config);
        tree.insert_multi(1, ()).unwrap();
        tree.insert_multi(2, ()).unwrap();

        assert_eq!(
            tree.insert_multi(3, ()),
            Err(TreeError::AllocFailed { requested: 1 })
        );
        assert_eq!(
            tree.insert_unique_hint(tree.end(), 3, ()),
            Err(TreeError::AllocFailed { requested: 1 })
        );
        assert_eq!(tree.len(), 2);
        assert!(tree.find(&3).is_end());
        tree.validate().unwrap();
    }

    #[test]
    fn collects_from_iterator_as_unique() {
        let tree: RbTree<_, _> = [(3, 'c'), (1, 'a'), (3, 'x'), (2, 'b')].into_iter().collect();
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.get(tree.find(&3)), Some((&3, &'c')));
    }

    #[test]
    fn bulk_insert_rolls_back_on_partial_failure() {
        let config = TreeConfig::new().with_node_limit(3);
        let mut tree = RbTree::with_config(|a: &i32, b: &i32| a.cmp(b), config);
        tree.insert_unique(1, ()).unwrap();
        tree.insert_unique(2, ()).unwrap();

        let err = TreeError::AllocFailed { requested: 1 };
        assert_eq!(tree.insert_unique_iter([(10, ()), (11, ())]), Err(err.clone()));
        assert_eq!(tree.keys().copied().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(tree.insert_multi_iter([(2, ()), (0, ())]), Err(err));
        assert_eq!(tree.keys().copied().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(tree.len(), 2);
        tree.validate().unwrap();

        // The freed slot is usable again.
        tree.insert_unique_iter([(1, ()), (3, ())]).unwrap();
        assert_eq!(tree.keys().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn hinted_multi_lands_after_equal_keys() {
        let mut tree = RbTree::new();
        tree.insert_multi(1, "old1").unwrap();
        tree.insert_multi(3, "old3").unwrap();

        let pos = tree.insert_multi_hint(tree.find(&3), 3, "new3").unwrap();
        assert_eq!(tree.prev_pos(pos), tree.find(&3));
        tree.insert_multi_hint(tree.find(&3), 1, "new1").unwrap();
        tree.insert_multi_hint(tree.begin(), 1, "newer1").unwrap();

        let got: Vec<_> = tree.iter().map(|(k, v)| (*k, *v)).collect();
        assert_eq!(
            got,
            vec![(1, "old1"), (1, "new1"), (1, "newer1"), (3, "old3"), (3, "new3")]
        );
        tree.validate().unwrap();
    }
}
