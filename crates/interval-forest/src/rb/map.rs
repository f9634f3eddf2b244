use std::fmt::Debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::node::RbNode;
use super::util;
use crate::error::InvariantError;
use crate::types::{Color, KvNode, NoAugment};
use crate::util::{self as tree_util, find, first, last, next, prev, reclaim, size};

/// An ordered map backed by an arena-allocated red-black tree.
///
/// Lookups hand out arena indices (`u32`) which act as cheap accessors;
/// any mutating call invalidates previously returned indices.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug)]
pub struct RbMap<K, V> {
    arena: Vec<RbNode<K, V>>,
    root: Option<u32>,
    len: usize,
}

impl<K, V> Default for RbMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> RbMap<K, V> {
    pub fn new() -> Self {
        Self {
            arena: Vec::new(),
            root: None,
            len: 0,
        }
    }

    pub fn size(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
        self.len = 0;
    }

    pub fn root_index(&self) -> Option<u32> {
        self.root
    }

    pub fn key(&self, idx: u32) -> &K {
        &self.arena[idx as usize].k
    }

    pub fn value(&self, idx: u32) -> &V {
        &self.arena[idx as usize].v
    }

    pub fn value_mut_by_index(&mut self, idx: u32) -> &mut V {
        &mut self.arena[idx as usize].v
    }

    pub fn color(&self, idx: u32) -> Color {
        self.arena[idx as usize].color
    }

    pub fn first(&self) -> Option<u32> {
        first(&self.arena, self.root)
    }

    pub fn last(&self) -> Option<u32> {
        last(&self.arena, self.root)
    }

    pub fn next(&self, curr: u32) -> Option<u32> {
        next(&self.arena, curr)
    }

    pub fn prev(&self, curr: u32) -> Option<u32> {
        prev(&self.arena, curr)
    }

    /// In-order iterator over node indices.
    pub fn iterator(&self) -> impl Iterator<Item = u32> + '_ {
        let mut curr = self.first();
        std::iter::from_fn(move || {
            let i = curr?;
            curr = self.next(i);
            Some(i)
        })
    }
}

impl<K: Ord, V> RbMap<K, V> {
    /// Inserts a key/value pair. Returns `false` (and leaves the existing
    /// entry untouched) when the key is already present; insertion is not
    /// an update.
    pub fn insert(&mut self, key: K, value: V) -> bool {
        if find(&self.arena, self.root, &key).is_some() {
            return false;
        }
        self.arena.push(RbNode::new(key, value));
        let idx = (self.arena.len() - 1) as u32;
        util::insert::<_, NoAugment>(&mut self.arena, &mut self.root, idx);
        self.len += 1;
        true
    }

    pub fn find(&self, key: &K) -> Option<u32> {
        find(&self.arena, self.root, key)
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.find(key).map(|i| self.arena[i as usize].value())
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let idx = self.find(key)?;
        Some(self.arena[idx as usize].value_mut())
    }

    pub fn has(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// Removes the entry for `key`. Returns `false` when the key is
    /// absent.
    pub fn remove(&mut self, key: &K) -> bool {
        let Some(idx) = self.find(key) else {
            return false;
        };
        let freed = util::remove::<_, NoAugment>(&mut self.arena, &mut self.root, idx);
        reclaim(&mut self.arena, &mut self.root, freed);
        self.len -= 1;
        true
    }

    /// Checks the red-black, ordering and size invariants.
    pub fn assert_valid(&self) -> Result<(), InvariantError> {
        util::assert_red_black_tree(&self.arena, self.root)?;
        let reachable = size(&self.arena, self.root);
        if reachable != self.len {
            return Err(InvariantError::SizeMismatch {
                recorded: self.len,
                actual: reachable,
            });
        }
        Ok(())
    }
}

impl<K: Debug, V: Debug> RbMap<K, V> {
    pub fn print(&self) -> String {
        tree_util::print(&self.arena, self.root, "")
    }
}
