//! Read-only descents: lookup, bounds and insertion-point discovery.

use std::cmp::Ordering;

use crate::util::{next, prev};

use super::{Position, RbTree};

/// Where a new node attaches: the parent (`None` for an empty tree) and
/// whether it becomes the left child.
pub(crate) type InsertPos = (Option<u32>, bool);

impl<K, V, C> RbTree<K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    #[inline]
    fn node_key(&self, i: u32) -> &K {
        &self.store.node(i).k
    }

    /// First element whose key is not less than `key`.
    pub fn lower_bound(&self, key: &K) -> Position {
        let mut y = None;
        let mut x = self.header.root;
        while let Some(i) = x {
            let n = self.store.node(i);
            if !self.less(&n.k, key) {
                y = Some(i);
                x = n.l;
            } else {
                x = n.r;
            }
        }
        Position(y)
    }

    /// First element whose key is greater than `key`.
    pub fn upper_bound(&self, key: &K) -> Position {
        let mut y = None;
        let mut x = self.header.root;
        while let Some(i) = x {
            let n = self.store.node(i);
            if self.less(key, &n.k) {
                y = Some(i);
                x = n.l;
            } else {
                x = n.r;
            }
        }
        Position(y)
    }

    /// First element equal to `key`, or `end()`.
    pub fn find(&self, key: &K) -> Position {
        match self.lower_bound(key).0 {
            Some(j) if !self.less(key, self.node_key(j)) => Position(Some(j)),
            _ => Position::END,
        }
    }

    pub fn contains_key(&self, key: &K) -> bool {
        !self.find(key).is_end()
    }

    /// `[lower_bound(key), upper_bound(key))`.
    pub fn equal_range(&self, key: &K) -> (Position, Position) {
        (self.lower_bound(key), self.upper_bound(key))
    }

    /// Equal range for trees that never hold duplicate keys: at most one
    /// element, found with a single descent.
    pub fn equal_range_unique(&self, key: &K) -> (Position, Position) {
        match self.find(key).0 {
            Some(i) => (Position(Some(i)), Position(next(self.store.arena(), i))),
            None => (Position::END, Position::END),
        }
    }

    /// Number of elements equal to `key`.
    pub fn count(&self, key: &K) -> usize {
        let (first, last) = self.equal_range(key);
        self.range(first, last).count()
    }

    /// Attachment point for a key that may duplicate existing ones. Equal
    /// keys descend right so the new element lands after them.
    pub(crate) fn insert_multi_pos(&self, key: &K) -> InsertPos {
        let mut y = None;
        let mut add_to_left = true;
        let mut x = self.header.root;
        while let Some(i) = x {
            y = Some(i);
            let n = self.store.node(i);
            add_to_left = self.less(key, &n.k);
            x = if add_to_left { n.l } else { n.r };
        }
        (y, add_to_left)
    }

    /// Attachment point for a key that must not duplicate an existing one.
    /// `Err` carries the node already holding an equal key.
    pub(crate) fn insert_unique_pos(&self, key: &K) -> Result<InsertPos, u32> {
        let (y, add_to_left) = self.insert_multi_pos(key);
        let Some(parent) = y else {
            return Ok((None, true));
        };

        // The only candidate for an equal key is the in-order neighbor just
        // before the attachment point.
        let candidate = if add_to_left {
            if self.header.leftmost == Some(parent) {
                return Ok((y, true));
            }
            match prev(self.store.arena(), parent) {
                Some(j) => j,
                None => return Ok((y, true)),
            }
        } else {
            parent
        };

        if self.less(self.node_key(candidate), key) {
            Ok((y, add_to_left))
        } else {
            Err(candidate)
        }
    }

    /// Unique-mode attachment point near `hint`. A hint at `begin`, at
    /// `end`, or right after a smaller neighbor is checked in O(1); any
    /// other case falls back to a full descent.
    pub(crate) fn hint_unique_pos(&self, hint: Position, key: &K) -> Result<InsertPos, u32> {
        let (Some(leftmost), Some(rightmost)) = (self.header.leftmost, self.header.rightmost)
        else {
            return Ok((None, true));
        };

        match hint.0 {
            Some(h) if h == leftmost => {
                if self.less(key, self.node_key(h)) {
                    return Ok((Some(h), true));
                }
            }
            None => {
                if self.less(self.node_key(rightmost), key) {
                    return Ok((Some(rightmost), false));
                }
            }
            Some(h) => {
                if let Some(before) = prev(self.store.arena(), h) {
                    if self.less(self.node_key(before), key) && self.less(key, self.node_key(h)) {
                        if let Some(pos) = self.between(before, h) {
                            return Ok(pos);
                        }
                    }
                }
            }
        }

        self.insert_unique_pos(key)
    }

    /// Multi-mode counterpart of [`RbTree::hint_unique_pos`]. The O(1)
    /// paths only place `key` after every equal element; a key equal to
    /// the hint goes through the right-ward descent.
    pub(crate) fn hint_multi_pos(&self, hint: Position, key: &K) -> InsertPos {
        let (Some(leftmost), Some(rightmost)) = (self.header.leftmost, self.header.rightmost)
        else {
            return (None, true);
        };

        match hint.0 {
            Some(h) if h == leftmost => {
                if self.less(key, self.node_key(h)) {
                    return (Some(h), true);
                }
            }
            None => {
                if !self.less(key, self.node_key(rightmost)) {
                    return (Some(rightmost), false);
                }
            }
            Some(h) => {
                if let Some(before) = prev(self.store.arena(), h) {
                    if !self.less(key, self.node_key(before)) && self.less(key, self.node_key(h)) {
                        if let Some(pos) = self.between(before, h) {
                            return pos;
                        }
                    }
                }
            }
        }

        self.insert_multi_pos(key)
    }

    /// Free link between in-order neighbors `before` and `after`: either
    /// `before` has no right child or `after` has no left child.
    fn between(&self, before: u32, after: u32) -> Option<InsertPos> {
        if self.store.node(before).r.is_none() {
            Some((Some(before), false))
        } else if self.store.node(after).l.is_none() {
            Some((Some(after), true))
        } else {
            None
        }
    }
}
