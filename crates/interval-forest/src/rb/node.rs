#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::types::{Color, KvNode, Node, RbNodeLike};

/// A red-black tree map node.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug)]
pub struct RbNode<K, V> {
    pub(crate) p: Option<u32>,
    pub(crate) l: Option<u32>,
    pub(crate) r: Option<u32>,
    pub(crate) k: K,
    pub(crate) v: V,
    pub(crate) color: Color,
}

impl<K, V> RbNode<K, V> {
    /// New nodes start red and unlinked; insertion recolors as needed.
    pub fn new(k: K, v: V) -> Self {
        Self {
            p: None,
            l: None,
            r: None,
            k,
            v,
            color: Color::Red,
        }
    }
}

impl<K, V> Node for RbNode<K, V> {
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

impl<K, V> KvNode for RbNode<K, V> {
    type Key = K;
    type Value = V;

    fn key(&self) -> &K {
        &self.k
    }

    fn value(&self) -> &V {
        &self.v
    }

    fn value_mut(&mut self) -> &mut V {
        &mut self.v
    }

    fn swap_payload(&mut self, other: &mut Self) {
        std::mem::swap(&mut self.k, &mut other.k);
        std::mem::swap(&mut self.v, &mut other.v);
    }
}

impl<K, V> RbNodeLike for RbNode<K, V> {
    fn color(&self) -> Color {
        self.color
    }

    fn set_color(&mut self, color: Color) {
        self.color = color;
    }
}
