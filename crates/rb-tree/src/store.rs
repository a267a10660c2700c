//! Node store backing a tree: a slot arena with an intrusive free list.
//!
//! Slot indices are stable for the lifetime of a node, so positions held by
//! callers survive unrelated insertions and removals. Vacated slots are
//! chained through [`Slot::Vacant`] and reused before the arena grows.

use std::mem;

use log::{trace, warn};

use crate::config::TreeConfig;
use crate::error::TreeError;
use crate::red_black::RbNode;
use crate::types::{KvNode, Node, RbNodeLike};

#[derive(Clone, Debug)]
pub enum Slot<K, V> {
    Occupied(RbNode<K, V>),
    /// Next vacant slot in the free list.
    Vacant(Option<u32>),
}

impl<K, V> Slot<K, V> {
    #[inline]
    fn node(&self) -> &RbNode<K, V> {
        match self {
            Slot::Occupied(node) => node,
            Slot::Vacant(_) => panic!("access to a vacated tree node"),
        }
    }

    #[inline]
    fn node_mut(&mut self) -> &mut RbNode<K, V> {
        match self {
            Slot::Occupied(node) => node,
            Slot::Vacant(_) => panic!("access to a vacated tree node"),
        }
    }
}

impl<K, V> Node for Slot<K, V> {
    fn p(&self) -> Option<u32> {
        self.node().p
    }

    fn l(&self) -> Option<u32> {
        self.node().l
    }

    fn r(&self) -> Option<u32> {
        self.node().r
    }

    fn set_p(&mut self, v: Option<u32>) {
        self.node_mut().p = v;
    }

    fn set_l(&mut self, v: Option<u32>) {
        self.node_mut().l = v;
    }

    fn set_r(&mut self, v: Option<u32>) {
        self.node_mut().r = v;
    }
}

impl<K, V> KvNode<K, V> for Slot<K, V> {
    fn key(&self) -> &K {
        &self.node().k
    }

    fn value(&self) -> &V {
        &self.node().v
    }

    fn value_mut(&mut self) -> &mut V {
        &mut self.node_mut().v
    }
}

impl<K, V> RbNodeLike for Slot<K, V> {
    fn is_black(&self) -> bool {
        self.node().b
    }

    fn set_black(&mut self, black: bool) {
        self.node_mut().b = black;
    }
}

#[derive(Debug)]
pub struct NodeStore<K, V> {
    slots: Vec<Slot<K, V>>,
    next_free: Option<u32>,
    len: usize,
    limit: Option<usize>,
}

impl<K, V> NodeStore<K, V> {
    pub fn new(config: &TreeConfig) -> Self {
        Self {
            slots: Vec::with_capacity(config.initial_capacity),
            next_free: None,
            len: 0,
            limit: config.node_limit,
        }
    }

    /// Live node count.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Makes sure the next [`NodeStore::insert`] cannot fail. The store is
    /// unchanged when this returns an error.
    pub fn reserve_one(&mut self) -> Result<(), TreeError> {
        if let Some(limit) = self.limit {
            if self.len >= limit {
                warn!("node store limit of {limit} nodes reached");
                return Err(TreeError::AllocFailed { requested: 1 });
            }
        }
        if self.next_free.is_some() {
            return Ok(());
        }
        if self.slots.len() >= u32::MAX as usize {
            warn!("node store index space exhausted");
            return Err(TreeError::AllocFailed { requested: 1 });
        }
        if self.slots.len() == self.slots.capacity() {
            self.slots.try_reserve(1).map_err(|err| {
                warn!("node store failed to grow: {err}");
                TreeError::AllocFailed { requested: 1 }
            })?;
            trace!("node store grew to {} slots", self.slots.capacity());
        }
        Ok(())
    }

    /// Stores `node` in a vacant slot, or at the end of the arena.
    pub fn insert(&mut self, node: RbNode<K, V>) -> u32 {
        self.len += 1;
        match self.next_free {
            Some(idx) => {
                let slot = mem::replace(&mut self.slots[idx as usize], Slot::Occupied(node));
                self.next_free = match slot {
                    Slot::Vacant(next) => next,
                    Slot::Occupied(_) => unreachable!("free list points at a live node"),
                };
                idx
            }
            None => {
                self.slots.push(Slot::Occupied(node));
                (self.slots.len() - 1) as u32
            }
        }
    }

    pub fn alloc(&mut self, node: RbNode<K, V>) -> Result<u32, TreeError> {
        self.reserve_one()?;
        Ok(self.insert(node))
    }

    /// Vacates slot `idx` and hands back the node it held.
    pub fn free(&mut self, idx: u32) -> RbNode<K, V> {
        assert!(
            matches!(self.slots[idx as usize], Slot::Occupied(_)),
            "double free of tree node {idx}"
        );
        let slot = mem::replace(&mut self.slots[idx as usize], Slot::Vacant(self.next_free));
        self.next_free = Some(idx);
        self.len -= 1;
        match slot {
            Slot::Occupied(node) => node,
            Slot::Vacant(_) => unreachable!(),
        }
    }

    /// Drops every node at once. Links are not consulted.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.next_free = None;
        self.len = 0;
    }

    #[inline]
    pub fn node(&self, idx: u32) -> &RbNode<K, V> {
        self.slots[idx as usize].node()
    }

    #[inline]
    pub fn node_mut(&mut self, idx: u32) -> &mut RbNode<K, V> {
        self.slots[idx as usize].node_mut()
    }

    #[inline]
    pub fn arena(&self) -> &[Slot<K, V>] {
        &self.slots
    }

    #[inline]
    pub fn arena_mut(&mut self) -> &mut [Slot<K, V>] {
        &mut self.slots
    }
}
