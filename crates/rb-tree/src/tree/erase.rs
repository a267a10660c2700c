use std::cmp::Ordering;

use log::{debug, trace};

use crate::red_black;
use crate::util::next;

use super::{Position, RbTree};

impl<K, V, C> RbTree<K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    /// Removes the element at `pos` and returns the position after it.
    /// Other positions stay valid. Panics on the end position.
    pub fn erase(&mut self, pos: Position) -> Position {
        let i = pos.node();
        let after = next(self.store.arena(), i);
        self.unlink(i);
        Position(after)
    }

    /// Removes the element at `pos` and hands back its key and value.
    pub fn take(&mut self, pos: Position) -> (K, V) {
        self.unlink(pos.node())
    }

    fn unlink(&mut self, i: u32) -> (K, V) {
        red_black::remove(self.store.arena_mut(), &mut self.header, i);
        let node = self.store.free(i);
        self.len -= 1;
        trace!("unlinked node {i}");
        (node.k, node.v)
    }

    /// Removes every element equal to `key` and returns how many there were.
    pub fn erase_key(&mut self, key: &K) -> usize {
        let (first, last) = self.equal_range(key);
        let before = self.len;
        self.erase_range(first, last);
        before - self.len
    }

    /// Removes the element equal to `key` in a tree without duplicates.
    /// Returns 0 or 1.
    pub fn erase_unique(&mut self, key: &K) -> usize {
        match self.find(key).0 {
            Some(i) => {
                self.unlink(i);
                1
            }
            None => 0,
        }
    }

    /// Removes `[first, last)` and returns `last`. Erasing everything takes
    /// the [`RbTree::clear`] path.
    pub fn erase_range(&mut self, first: Position, last: Position) -> Position {
        if first == self.begin() && last.is_end() {
            self.clear();
            return Position::END;
        }

        let mut pos = first;
        let mut erased = 0usize;
        while pos != last {
            pos = self.erase(pos);
            erased += 1;
        }
        if erased > 1 {
            debug!("erased a range of {erased} elements");
        }
        pos
    }
}
