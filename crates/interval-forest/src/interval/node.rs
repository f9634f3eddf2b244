#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::types::{Augment, Color, KvNode, Node, RbNodeLike};

/// An interval tree node. Ordered by `low`; `max` is the greatest `high`
/// anywhere in the node's subtree.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug)]
pub struct IntervalNode<K, V> {
    pub(crate) p: Option<u32>,
    pub(crate) l: Option<u32>,
    pub(crate) r: Option<u32>,
    pub(crate) low: K,
    pub(crate) high: K,
    pub(crate) max: K,
    pub(crate) v: V,
    pub(crate) color: Color,
}

impl<K: Clone, V> IntervalNode<K, V> {
    /// New nodes start red with `max` equal to their own `high`.
    pub fn new(low: K, high: K, v: V) -> Self {
        let max = high.clone();
        Self {
            p: None,
            l: None,
            r: None,
            low,
            high,
            max,
            v,
            color: Color::Red,
        }
    }
}

impl<K, V> Node for IntervalNode<K, V> {
    fn p(&self) -> Option<u32> {
        self.p
    }

    fn l(&self) -> Option<u32> {
        self.l
    }

    fn r(&self) -> Option<u32> {
        self.r
    }

    fn set_p(&mut self, v: Option<u32>) {
        self.p = v;
    }

    fn set_l(&mut self, v: Option<u32>) {
        self.l = v;
    }

    fn set_r(&mut self, v: Option<u32>) {
        self.r = v;
    }
}

impl<K, V> KvNode for IntervalNode<K, V> {
    type Key = K;
    type Value = V;

    fn key(&self) -> &K {
        &self.low
    }

    fn value(&self) -> &V {
        &self.v
    }

    fn value_mut(&mut self) -> &mut V {
        &mut self.v
    }

    fn swap_payload(&mut self, other: &mut Self) {
        std::mem::swap(&mut self.low, &mut other.low);
        std::mem::swap(&mut self.high, &mut other.high);
        std::mem::swap(&mut self.v, &mut other.v);
    }
}

impl<K, V> RbNodeLike for IntervalNode<K, V> {
    fn color(&self) -> Color {
        self.color
    }

    fn set_color(&mut self, color: Color) {
        self.color = color;
    }
}

/// Keeps the `max` augmentation consistent across rotations and splices.
pub struct MaxAugment;

impl<K: Ord + Clone, V> Augment<IntervalNode<K, V>> for MaxAugment {
    fn update(arena: &mut [IntervalNode<K, V>], i: u32) {
        let node = &arena[i as usize];
        let mut max = node.high.clone();
        if let Some(l) = node.l {
            if arena[l as usize].max > max {
                max = arena[l as usize].max.clone();
            }
        }
        if let Some(r) = arena[i as usize].r {
            if arena[r as usize].max > max {
                max = arena[r as usize].max.clone();
            }
        }
        arena[i as usize].max = max;
    }

    fn propagate_insert(arena: &mut [IntervalNode<K, V>], i: u32) {
        // Raising walk: stop at the first ancestor whose max already
        // dominates the new high; everything above it dominates too.
        let high = arena[i as usize].high.clone();
        let mut curr = arena[i as usize].p;
        while let Some(a) = curr {
            if arena[a as usize].max < high {
                arena[a as usize].max = high.clone();
                curr = arena[a as usize].p;
            } else {
                break;
            }
        }
    }

    fn propagate_remove(arena: &mut [IntervalNode<K, V>], from: Option<u32>) {
        // Removal can only lower a max, and how far up it drops cannot be
        // decided locally, so re-derive all the way to the root.
        let mut curr = from;
        while let Some(i) = curr {
            Self::update(arena, i);
            curr = arena[i as usize].p;
        }
    }
}
