use std::fmt::Debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::node::{IntervalNode, MaxAugment};
use crate::error::InvariantError;
use crate::rb::util;
use crate::types::Color;
use crate::util::{find, first, last, next, prev, reclaim, size};

/// An interval map: closed intervals `[low, high]` with associated
/// values, stored in an arena-backed red-black tree keyed by `low` and
/// augmented with the per-subtree maximum `high`.
///
/// Queries and lookups hand out arena indices (`u32`) which act as cheap
/// accessors into the map (`low(i)`, `high(i)`, `value(i)`, ...); any
/// mutating call invalidates previously returned indices.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug)]
pub struct IntervalMap<K, V> {
    arena: Vec<IntervalNode<K, V>>,
    root: Option<u32>,
    len: usize,
}

impl<K, V> IntervalMap<K, V> {
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

    pub fn low(&self, idx: u32) -> &K {
        &self.arena[idx as usize].low
    }

    pub fn high(&self, idx: u32) -> &K {
        &self.arena[idx as usize].high
    }

    /// Greatest `high` in the subtree rooted at `idx`.
    pub fn max(&self, idx: u32) -> &K {
        &self.arena[idx as usize].max
    }

    pub fn value(&self, idx: u32) -> &V {
        &self.arena[idx as usize].v
    }

    pub fn value_mut(&mut self, idx: u32) -> &mut V {
        &mut self.arena[idx as usize].v
    }

    pub fn color(&self, idx: u32) -> Color {
        self.arena[idx as usize].color
    }

    pub fn left(&self, idx: u32) -> Option<u32> {
        self.arena[idx as usize].l
    }

    pub fn right(&self, idx: u32) -> Option<u32> {
        self.arena[idx as usize].r
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

    /// In-order iterator over node indices (ascending `low`).
    pub fn iterator(&self) -> impl Iterator<Item = u32> + '_ {
        let mut curr = self.first();
        std::iter::from_fn(move || {
            let i = curr?;
            curr = self.next(i);
            Some(i)
        })
    }
}

impl<K, V> Default for IntervalMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord + Clone, V> IntervalMap<K, V> {
    /// Inserts the interval `[low, high]` with its value. Returns `false`
    /// (and leaves the existing entry untouched) when an interval with
    /// the same `low` is already present; insertion is not an update.
    ///
    /// # Panics
    ///
    /// Panics when `low > high`.
    pub fn insert(&mut self, low: K, high: K, value: V) -> bool {
        assert!(low <= high, "interval low endpoint exceeds high endpoint");
        if find(&self.arena, self.root, &low).is_some() {
            return false;
        }
        self.arena.push(IntervalNode::new(low, high, value));
        let idx = (self.arena.len() - 1) as u32;
        util::insert::<_, MaxAugment>(&mut self.arena, &mut self.root, idx);
        self.len += 1;
        true
    }

    /// Removes the interval `[low, high]`. A no-op returning `false` when
    /// no interval with this `low` exists or the stored `high` differs
    /// from the requested one.
    pub fn erase(&mut self, low: &K, high: &K) -> bool {
        let Some(idx) = find(&self.arena, self.root, low) else {
            return false;
        };
        if self.arena[idx as usize].high != *high {
            return false;
        }
        let freed = util::remove::<_, MaxAugment>(&mut self.arena, &mut self.root, idx);
        reclaim(&mut self.arena, &mut self.root, freed);
        self.len -= 1;
        true
    }

    /// Looks up the interval whose `low` endpoint equals `low`.
    pub fn find(&self, low: &K) -> Option<u32> {
        find(&self.arena, self.root, low)
    }

    /// Stabbing query: all intervals containing the point `p`, in
    /// ascending `low` order.
    ///
    /// Both children are explored whenever the subtree `max` admits a
    /// match, so the result is complete.
    pub fn query_point(&self, p: &K) -> Vec<u32> {
        let mut out = Vec::new();
        self.query_point_inner(self.root, p, &mut out);
        out
    }

    fn query_point_inner(&self, node: Option<u32>, p: &K, out: &mut Vec<u32>) {
        let Some(i) = node else {
            return;
        };
        let n = &self.arena[i as usize];
        // No interval in this subtree reaches p.
        if n.max < *p {
            return;
        }
        self.query_point_inner(n.l, p, out);
        if n.low <= *p && *p <= n.high {
            out.push(i);
        }
        // Every low in the right subtree exceeds n.low; when p is left of
        // it no right descendant can contain p.
        if *p >= n.low {
            self.query_point_inner(n.r, p, out);
        }
    }

    /// Overlap query: all intervals overlapping `[low, high]`, in
    /// ascending `low` order. Intervals overlap iff
    /// `low <= other.high && other.low <= high`.
    pub fn query_range(&self, low: &K, high: &K) -> Vec<u32> {
        let mut out = Vec::new();
        self.query_range_inner(self.root, low, high, &mut out);
        out
    }

    fn query_range_inner(&self, node: Option<u32>, low: &K, high: &K, out: &mut Vec<u32>) {
        let Some(i) = node else {
            return;
        };
        let n = &self.arena[i as usize];
        // Every interval in this subtree ends before the query begins.
        if *low > n.max {
            return;
        }
        self.query_range_inner(n.l, low, high, out);
        if n.low <= *high && *low <= n.high {
            out.push(i);
        }
        // Right descendants all have low > n.low.
        if *high > n.low {
            self.query_range_inner(n.r, low, high, out);
        }
    }

    /// Checks the red-black, ordering, `max` and size invariants.
    pub fn assert_valid(&self) -> Result<(), InvariantError> {
        util::assert_red_black_tree(&self.arena, self.root)?;
        self.assert_max(self.root)?;
        let reachable = size(&self.arena, self.root);
        if reachable != self.len {
            return Err(InvariantError::SizeMismatch {
                recorded: self.len,
                actual: reachable,
            });
        }
        Ok(())
    }

    fn assert_max(&self, node: Option<u32>) -> Result<(), InvariantError> {
        let Some(i) = node else {
            return Ok(());
        };
        let n = &self.arena[i as usize];
        let mut expected = &n.high;
        if let Some(l) = n.l {
            let lm = &self.arena[l as usize].max;
            if lm > expected {
                expected = lm;
            }
        }
        if let Some(r) = n.r {
            let rm = &self.arena[r as usize].max;
            if rm > expected {
                expected = rm;
            }
        }
        if n.max != *expected {
            return Err(InvariantError::MaxMismatch(i));
        }
        self.assert_max(n.l)?;
        self.assert_max(n.r)
    }
}

impl<K: Debug, V: Debug> IntervalMap<K, V> {
    /// Debug rendering showing `[low, high]`, `max` and color per node.
    pub fn print(&self) -> String {
        self.print_inner(self.root, "")
    }

    fn print_inner(&self, node: Option<u32>, tab: &str) -> String {
        match node {
            None => "∅".to_string(),
            Some(i) => {
                let n = &self.arena[i as usize];
                let color = if n.color == Color::Black {
                    "black"
                } else {
                    "red"
                };
                let left = self.print_inner(n.l, &format!("{tab}  "));
                let right = self.print_inner(n.r, &format!("{tab}  "));
                format!(
                    "Node[{i}] {color} {{ [{:?}, {:?}] max={:?} = {:?} }}\n{tab}L={left}\n{tab}R={right}",
                    n.low, n.high, n.max, n.v
                )
            }
        }
    }
}
